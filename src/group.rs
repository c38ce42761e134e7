//! The fixed group parameters shared by every handshake.
//!
//! The Station firmware hardcodes the SRP group: a 2048-bit modulus, the
//! generator 2, a vendor-specific multiplier constant and a hash constant
//! tied to the mandated `vodafone` username. Every component works against
//! the same process-wide instance so the whole exchange agrees on the group.
//!
//! 每次握手共享的固定群参数。
//!
//! Station 固件硬编码了 SRP 群：一个 2048 位的模数、生成元 2、
//! 厂商特定的乘数常量以及与强制用户名 `vodafone` 绑定的哈希常量。
//! 所有组件都针对同一个进程级实例工作，以保证整个交换使用同一个群。

use num_bigint::BigUint;
use std::sync::OnceLock;

/// The username the firmware mandates for the web-management login.
pub const LOGIN_USERNAME: &str = "vodafone";

/// 2048-bit modulus `N`, as shipped in the firmware's login script.
const MODULUS_HEX: &[u8] = b"ac6bdb41324a9a9bf166de5e1389582faf72b6651987ee07fc3192943db56050a37329cbb4a099ed8193e0757767a13dd52312ab4b03310dcd7f48a9da04fd50e8083969edb767b0cf6095179a163ab3661a05fbd5faaae82918a9962f0b93b855f97993ec975eeaa80d740adbf4ff747359d041d5c33ea71d281e446b14773bca97b43a23fb801676bd207a436c6481f1d2b9078717461a5b9d32e688f87748544523b524b0d57d5ea77a2775d2ecfa032cfbdbf52fb3786160279004e57ae6af874e7303ce53299ccc041c7bc308d82a5698f3a8d0c38271ae35f8e9dbfbb694b5c803d89f7ae435de236d525f54759b65e372fcd68ef20fa7111f9e4aff73";

/// Multiplier constant `k`.
const MULTIPLIER_HEX: &[u8] =
    b"05b9e8ef059c6b32ea59fc1d322d37f04aa30bae5aa9003b8321e21ddb04e300";

/// The immutable cryptographic constants of the vendor's SRP variant.
///
/// Constructed once at first use and handed out by reference; nothing in
/// the crate ever mutates or recomputes these values.
///
/// 厂商 SRP 变体的不可变密码学常量。
///
/// 首次使用时构造一次，之后以引用方式分发；
/// crate 中没有任何代码会修改或重新计算这些值。
#[derive(Debug)]
pub struct GroupParameters {
    /// Modulus `N`, treated as prime.
    pub modulus: BigUint,
    /// Generator `g`.
    pub generator: BigUint,
    /// Multiplier `k`.
    pub multiplier: BigUint,
    /// Fixed hash constant tied to the hardcoded username, used as the
    /// first operand of the client-proof transcript.
    pub identity_hash: &'static str,
}

impl GroupParameters {
    /// The Vodafone Station group, shared process-wide.
    ///
    /// 进程级共享的 Vodafone Station 群参数。
    pub fn vodafone() -> &'static GroupParameters {
        static GROUP: OnceLock<GroupParameters> = OnceLock::new();
        GROUP.get_or_init(|| GroupParameters {
            // Fixed hexadecimal literals; parsing cannot fail.
            // 固定的十六进制字面量；解析不会失败。
            modulus: BigUint::parse_bytes(MODULUS_HEX, 16).unwrap(),
            generator: BigUint::from(2u32),
            multiplier: BigUint::parse_bytes(MULTIPLIER_HEX, 16).unwrap(),
            identity_hash: "4a76a9a2402bdd18123389b72ebbda50a30f65aedb90d7273130edea4b29cc4c",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    #[test]
    fn modulus_is_odd_and_large() {
        let group = GroupParameters::vodafone();
        assert!(group.modulus.bit(0), "modulus must be odd");
        assert!(group.modulus.bits() > 2000, "modulus must exceed 2^2000");
    }

    #[test]
    fn generator_and_multiplier_lie_in_group() {
        let group = GroupParameters::vodafone();
        let two = BigUint::from(2u32);
        assert!(group.generator >= two);
        assert!(group.generator < group.modulus);
        assert!(group.multiplier >= two);
        assert!(group.multiplier < group.modulus);
    }

    #[test]
    fn shared_instance_is_stable() {
        let a = GroupParameters::vodafone() as *const GroupParameters;
        let b = GroupParameters::vodafone() as *const GroupParameters;
        assert_eq!(a, b);
    }
}
