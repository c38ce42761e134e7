//! Implements the client side of the login handshake state machine.
//!
//! The machine is pure: it produces the form fields each round must send
//! and consumes the decoded responses, but never touches the network. The
//! transport collaborator owns the actual round trips.
//!
//! 实现登录握手状态机的客户端。
//!
//! 状态机是纯粹的：它生成每一轮需要发送的表单字段并消费解码后的响应，
//! 但从不接触网络。实际的往返由传输协作方负责。

use crate::error::{AuthError, Result};
use crate::group::{GroupParameters, LOGIN_USERNAME};
use crate::message::{ChallengeRequest, ProofRequest, ServerChallenge, ServerProofResponse};
use crate::proof;
use crate::state::{Authenticated, ChallengeReceived, ChallengeSent, Idle, ProofSent};
use num_bigint::BigUint;
use rand::TryRngCore;
use rand::rngs::OsRng;

/// How a mismatching server proof is handled at the end of round 2.
///
/// The firmware's own revisions disagree on this, so the choice is left to
/// the caller rather than guessed.
///
/// 第二轮结束时如何处理不匹配的服务器证明。
///
/// 固件自身的不同版本在这一点上并不一致，因此交由调用方选择而不是猜测。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProofPolicy {
    /// Log a warning and keep the session (legacy-compatible).
    #[default]
    Lenient,
    /// Surface the mismatch as an error and discard the session.
    Strict,
}

/// The client-side login handshake state machine.
///
/// Generic over the state `S` to enforce protocol flow at compile time:
/// the proof request cannot be produced before the challenge is processed,
/// and the server proof cannot be verified before the client proof exists.
/// Each state owns the data that only exists at that point in the
/// exchange, so no transition can observe missing material.
///
/// 客户端登录握手状态机。
///
/// 通过泛型状态 `S` 在编译时强制执行协议流程：
/// 在处理质询之前无法生成证明请求，在客户端证明存在之前无法验证服务器证明。
/// 每个状态拥有仅在交换的该阶段存在的数据，因此任何转换都不会遇到缺失的材料。
#[derive(Debug)]
pub struct Handshake<'g, S> {
    /// The current state and the data scoped to it.
    state: S,
    /// The shared group constants, by reference.
    group: &'g GroupParameters,
    /// The operator-supplied password. Never transmitted in clear; it only
    /// enters the one-way hash chain.
    password: String,
}

impl<'g> Handshake<'g, Idle> {
    /// Creates a handshake in the `Idle` state.
    pub fn new(group: &'g GroupParameters, password: impl Into<String>) -> Self {
        Self {
            state: Idle,
            group,
            password: password.into(),
        }
    }

    /// Draws a fresh ephemeral exponent and produces the round 1 request.
    ///
    /// The exponent comes exclusively from the operating system's secure
    /// random source; if that source fails the attempt is abandoned, the
    /// machine never falls back to a fixed exponent.
    ///
    /// 抽取新的临时指数并生成第一轮请求。
    ///
    /// 指数只来自操作系统的安全随机源；如果该随机源失败则放弃本次尝试，
    /// 状态机绝不会退回到固定指数。
    pub fn start(
        self,
        csrf_token: &str,
    ) -> Result<(ChallengeRequest, Handshake<'g, ChallengeSent>)> {
        let mut raw = [0u8; 8];
        OsRng.try_fill_bytes(&mut raw)?;
        let secret = BigUint::from_bytes_be(&raw);

        let client_public =
            crate::codec::to_even_hex(&proof::client_public(self.group, &secret));
        let request = ChallengeRequest {
            csrf_token: csrf_token.to_owned(),
            username: LOGIN_USERNAME,
            client_public,
        };

        tracing::debug!(round = 1, "sending client public ephemeral value");

        let next = Handshake {
            state: ChallengeSent { secret },
            group: self.group,
            password: self.password,
        };
        Ok((request, next))
    }
}

impl<'g> Handshake<'g, ChallengeSent> {
    /// Consumes the server's challenge and derives the proof values. The
    /// secret exponent is dropped here; it is never reused.
    ///
    /// 消费服务器的质询并推导证明值。秘密指数在此处被丢弃，绝不重用。
    pub fn process_challenge(
        self,
        challenge: ServerChallenge,
    ) -> Result<Handshake<'g, ChallengeReceived>> {
        let proofs = proof::compute(
            self.group,
            &self.state.secret,
            &challenge.salt,
            &challenge.server_public,
            &self.password,
        )?;

        Ok(Handshake {
            state: ChallengeReceived { proofs },
            group: self.group,
            password: self.password,
        })
    }
}

impl<'g> Handshake<'g, ChallengeReceived> {
    /// Produces the round 2 request carrying the client proof.
    pub fn proof_request(self, csrf_token: &str) -> (ProofRequest, Handshake<'g, ProofSent>) {
        let request = ProofRequest {
            csrf_token: csrf_token.to_owned(),
            client_proof: self.state.proofs.client_proof.clone(),
        };

        tracing::debug!(round = 2, "sending client proof");

        let next = Handshake {
            state: ProofSent {
                proofs: self.state.proofs,
            },
            group: self.group,
            password: self.password,
        };
        (request, next)
    }
}

impl<'g> Handshake<'g, ProofSent> {
    /// Checks the server's proof against the expected value.
    ///
    /// Under [`ProofPolicy::Lenient`] a mismatch only emits a warning, the
    /// legacy firmware behavior; under [`ProofPolicy::Strict`] it fails the
    /// login and the session is discarded.
    ///
    /// 将服务器的证明与预期值进行比对。
    ///
    /// 在宽松策略下不匹配只会发出警告（旧固件行为）；
    /// 在严格策略下则登录失败并丢弃会话。
    pub fn verify_server_proof(
        self,
        response: &ServerProofResponse,
        policy: ProofPolicy,
    ) -> Result<Handshake<'g, Authenticated>> {
        let expected = &self.state.proofs.server_proof;
        let received = crate::codec::normalize_hex(&response.server_proof);

        if received != *expected {
            match policy {
                ProofPolicy::Strict => {
                    return Err(AuthError::ProofMismatch {
                        expected: expected.clone(),
                        received,
                    });
                }
                ProofPolicy::Lenient => {
                    tracing::warn!(
                        expected = %expected,
                        received = %received,
                        "server proof mismatch, keeping session (lenient policy)"
                    );
                }
            }
        }

        Ok(Handshake {
            state: Authenticated,
            group: self.group,
            password: self.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::parse_response;

    fn challenge_sent() -> (ChallengeRequest, Handshake<'static, ChallengeSent>) {
        Handshake::new(GroupParameters::vodafone(), "testpass")
            .start("token")
            .unwrap()
    }

    fn proof_sent() -> Handshake<'static, ProofSent> {
        let (_, handshake) = challenge_sent();
        let challenge: ServerChallenge =
            parse_response(r#"{"s":"abcd","B":"0123456789"}"#).unwrap();
        let handshake = handshake.process_challenge(challenge).unwrap();
        let (request, handshake) = handshake.proof_request("token");
        assert_eq!(request.client_proof.len(), 64);
        handshake
    }

    #[test]
    fn round_one_request_carries_fixed_username() {
        let (request, _) = challenge_sent();
        assert_eq!(request.username, "vodafone");
        assert_eq!(request.csrf_token, "token");
        assert_eq!(request.client_public.len() % 2, 0);
    }

    #[test]
    fn fresh_exponent_per_attempt() {
        let (first, _) = challenge_sent();
        let (second, _) = challenge_sent();
        // 64 random bits; a collision here means the exponent is not fresh.
        assert_ne!(first.client_public, second.client_public);
    }

    #[test]
    fn every_transition_carries_its_own_material() {
        // Drives the machine through all four transitions; each state owns
        // what it needs, so none of them can observe missing material.
        let handshake = proof_sent();
        let matching = ServerProofResponse {
            server_proof: handshake.state.proofs.server_proof.clone(),
        };
        assert!(handshake
            .verify_server_proof(&matching, ProofPolicy::Strict)
            .is_ok());
    }

    #[test]
    fn strict_policy_rejects_wrong_proof() {
        let wrong = ServerProofResponse {
            server_proof: "00".repeat(32),
        };
        let err = proof_sent()
            .verify_server_proof(&wrong, ProofPolicy::Strict)
            .unwrap_err();
        assert!(matches!(err, AuthError::ProofMismatch { .. }));
    }

    #[test]
    fn lenient_policy_keeps_session_on_wrong_proof() {
        let wrong = ServerProofResponse {
            server_proof: "00".repeat(32),
        };
        assert!(proof_sent()
            .verify_server_proof(&wrong, ProofPolicy::Lenient)
            .is_ok());
    }
}
