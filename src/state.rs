//! Defines the states of the login handshake state machine.
//!
//! Each state is a struct used to enforce the protocol flow at compile
//! time, and owns the data that exists only at that point in the two-round
//! exchange: the ephemeral exponent lives exactly as long as the challenge
//! is outstanding, and the derived proofs exactly as long as they are
//! still needed. Only valid transitions are exposed in the API.

use crate::proof::ProofSet;
use num_bigint::BigUint;

/// The initial state: no message has been sent yet.
///
/// 初始状态：尚未发送任何消息。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Idle;

/// The client has sent its public ephemeral value and is awaiting the
/// server's salt and public ephemeral value. Owns the secret exponent `a`
/// for the duration of the outstanding challenge; it is dropped, never
/// persisted, once the challenge has been processed.
///
/// 客户端已发送其公开临时值，正在等待服务器的盐值和公开临时值。
/// 在质询未决期间持有秘密指数 `a`；质询处理完毕后即被丢弃，绝不持久化。
#[derive(Debug)]
pub struct ChallengeSent {
    pub(crate) secret: BigUint,
}

/// The server's challenge has been consumed and the proof values derived,
/// but the client proof has not been sent yet.
///
/// 已处理服务器的质询并推导出证明值，但客户端证明尚未发送。
#[derive(Debug)]
pub struct ChallengeReceived {
    pub(crate) proofs: ProofSet,
}

/// The client proof is on the wire; the server's proof is awaited and will
/// be checked against the retained expected value.
///
/// 客户端证明已发出，正在等待服务器的证明，并将与保留的预期值进行比对。
#[derive(Debug)]
pub struct ProofSent {
    pub(crate) proofs: ProofSet,
}

/// The final state of a successful login. The transport's session cookie
/// is now valid for subsequent requests; no key material is retained.
///
/// 登录成功的最终状态。传输层的会话 Cookie 此时对后续请求有效；
/// 不保留任何密钥材料。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authenticated;

/// The terminal state of a rejected login (strict proof policy only).
///
/// 登录被拒绝的终止状态（仅限严格证明策略）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Failed;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states_carry_no_key_material() {
        assert_eq!(std::mem::size_of::<Idle>(), 0);
        assert_eq!(std::mem::size_of::<Authenticated>(), 0);
        assert_eq!(std::mem::size_of::<Failed>(), 0);
    }
}
