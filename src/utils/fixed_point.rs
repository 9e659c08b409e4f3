//! UQ112.112 fixed-point helper used by the oracle price accumulators.
//!
//! A 112-bit unsigned reserve is encoded as a 224-bit fraction by shifting it
//! left 112 bits; dividing two encoded reserves yields a UQ112.112 price.
//! Both operations are pure and never touch account data.

use uint::construct_uint;

construct_uint! {
    pub struct U256(4);
}

/// Number of fractional bits in the UQ112.112 representation.
pub const RESOLUTION: u32 = 112;

/// Encodes a 112-bit reserve as a UQ112.112 value (`y << 112`).
pub fn encode(y: u128) -> U256 {
    U256::from(y) << RESOLUTION
}

/// Divides an encoded UQ112.112 value by a 112-bit reserve, truncating.
/// Callers must ensure `z != 0`.
pub fn uq_div(encoded: U256, z: u128) -> U256 {
    encoded / U256::from(z)
}

/// Encodes `y` and divides by `z` in one step (`encode(y) / z`).
pub fn fraction(y: u128, z: u128) -> U256 {
    uq_div(encode(y), z)
}

/// Converts a `U256` to its little-endian byte representation, for storage
/// in a Borsh-serialized account (`uint::U256` has no Borsh impl).
pub fn u256_to_bytes(v: U256) -> [u8; 32] {
    let mut buf = [0u8; 32];
    v.to_little_endian(&mut buf);
    buf
}

/// Inverse of `u256_to_bytes`.
pub fn bytes_to_u256(buf: &[u8; 32]) -> U256 {
    U256::from_little_endian(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_shifts_left_by_112_bits() {
        assert_eq!(encode(1), U256::one() << 112);
        assert_eq!(encode(0), U256::zero());
    }

    #[test]
    fn fraction_of_equal_reserves_is_one_in_uq112x112() {
        let scale = 3_000_000_000_000_000_000u128;
        assert_eq!(fraction(scale, scale), U256::one() << 112);
    }

    #[test]
    fn bytes_roundtrip_preserves_value() {
        let v = encode(12345) / U256::from(7u32);
        assert_eq!(bytes_to_u256(&u256_to_bytes(v)), v);
    }

    #[test]
    fn fraction_truncates_towards_zero() {
        // fraction(1, 3) in UQ112.112 should floor, not round.
        let exact = fraction(1, 3);
        let one_over_three_scaled = (U256::one() << 112) / U256::from(3u32);
        assert_eq!(exact, one_over_three_scaled);
    }
}
