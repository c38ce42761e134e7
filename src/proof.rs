//! The pure cryptographic core of the login exchange.
//!
//! Given the group, the per-attempt secret exponent, the server's challenge
//! and the operator's password, derives the shared secret, the session key
//! and both proof values. Everything here is deterministic: the only
//! variability across attempts is the exponent and the server challenge.
//!
//! 登录交换的纯密码学核心。
//!
//! 给定群参数、每次尝试的秘密指数、服务器的质询以及操作者的密码，
//! 推导出共享密钥、会话密钥和双方的证明值。这里的一切都是确定性的：
//! 不同尝试之间唯一的变量是指数和服务器质询。

use crate::codec;
use crate::error::ProtocolError;
use crate::group::{GroupParameters, LOGIN_USERNAME};
use num_bigint::BigUint;
use sha2::{Digest, Sha256};

/// The values a finished proof computation hands back to the handshake,
/// all as normalized hexadecimal text.
///
/// 证明计算完成后交还给握手流程的各个值，均为规范化的十六进制文本。
#[derive(Debug, Clone)]
pub struct ProofSet {
    /// Client public ephemeral `A`.
    pub client_public: String,
    /// Session key `K`. Used only to bind the proofs; not retained after
    /// the handshake finishes.
    pub session_key: String,
    /// Client proof `M1`, sent in round 2.
    pub client_proof: String,
    /// The server proof `M2` the client expects back.
    pub server_proof: String,
}

/// Computes the public ephemeral `A = g^a mod N`.
pub fn client_public(group: &GroupParameters, secret: &BigUint) -> BigUint {
    group.generator.modpow(secret, &group.modulus)
}

/// Runs the full derivation chain against a server challenge.
///
/// Every modular step reduces into `[0, N)` before further use; in
/// particular the `B - k·g^x` subtraction is lifted by `N` first so it can
/// never go negative.
///
/// 针对服务器质询运行完整的推导链。
///
/// 每个模运算步骤都会在继续使用前归约到 `[0, N)`；特别是
/// `B - k·g^x` 的减法会先加上 `N`，因此永远不会出现负值。
pub fn compute(
    group: &GroupParameters,
    secret: &BigUint,
    salt_hex: &str,
    server_public_hex: &str,
    password: &str,
) -> Result<ProofSet, ProtocolError> {
    let n = &group.modulus;
    let salt_hex = codec::normalize_hex(salt_hex);
    let server_public_hex = codec::normalize_hex(server_public_hex);
    let a_pub = client_public(group, secret);
    let b_pub = codec::hex_to_uint(&server_public_hex, "B")?;

    // u = H(pad(A) || pad(B)), interpreted as an integer.
    let scrambling = {
        let mut hasher = Sha256::new();
        hasher.update(codec::to_padded_bytes(&a_pub));
        hasher.update(codec::to_padded_bytes(&b_pub));
        BigUint::from_bytes_be(&hasher.finalize())
    };

    // x = H(salt || hex(H("vodafone:" + password))), the salt and the
    // nested hash hex-decoded together into one buffer.
    let private_key = {
        let inner = Sha256::digest(format!("{LOGIN_USERNAME}:{password}").as_bytes());
        let buffer = codec::decode_hex(&format!("{}{}", salt_hex, hex::encode(inner)), "s")?;
        BigUint::from_bytes_be(&Sha256::digest(buffer))
    };

    // S = ((B - k·g^x) mod N) ^ (u·x + a) mod N.
    let kv = (&group.multiplier * group.generator.modpow(&private_key, n)) % n;
    let exponent = (((&scrambling * &private_key) % n) + secret) % n;
    let base = ((&b_pub % n) + n - &kv) % n;
    let shared_secret = base.modpow(&exponent, n);

    // K = H(bytes of the even-padded hex of S).
    let session_key = {
        let bytes = codec::decode_hex(&codec::to_even_hex(&shared_secret), "S")?;
        hex::encode(Sha256::digest(bytes))
    };

    // M1 and M2: the operands are concatenated as hex text, decoded as one
    // buffer, then hashed.
    let client_public_hex = codec::to_even_hex(&a_pub);

    let client_proof = {
        let identity = hex::encode(Sha256::digest(LOGIN_USERNAME.as_bytes()));
        let transcript = format!(
            "{}{}{}{}{}{}",
            group.identity_hash,
            identity,
            salt_hex,
            client_public_hex,
            server_public_hex,
            session_key
        );
        hex::encode(Sha256::digest(codec::decode_hex(&transcript, "M1")?))
    };

    let server_proof = {
        let transcript = format!("{client_public_hex}{client_proof}{session_key}");
        hex::encode(Sha256::digest(codec::decode_hex(&transcript, "M2")?))
    };

    Ok(ProofSet {
        client_public: client_public_hex,
        session_key,
        client_proof,
        server_proof,
    })
}
