//! Checked arithmetic helpers shared by the pair engine.

use crate::error::AmmError;
use crate::utils::fixed_point::U256;

/// Babylonian-method integer square root, floor-rounded. `U256` has no
/// built-in `sqrt`, so this mirrors the bit-length-seeded Newton's-method
/// loop the constant-product design relies on for `root_k`/`root_k_last`.
pub fn sqrt_u256(y: U256) -> U256 {
    if y.is_zero() {
        return U256::zero();
    }
    if y <= U256::from(3u32) {
        return U256::one();
    }
    let mut z = y;
    let mut x = y / U256::from(2u32) + U256::one();
    while x < z {
        z = x;
        x = (y / x + x) / U256::from(2u32);
    }
    z
}

/// Floor square root of a `u128`, via `sqrt_u256`.
pub fn sqrt_u128(y: u128) -> u128 {
    sqrt_u256(U256::from(y)).as_u128()
}

/// Checked multiply-then-divide over `u128`, used for pro-rata liquidity math
/// (`amount_i * total_supply / reserve_i`). Widens into `U256` so the
/// intermediate product cannot overflow before the division narrows it back.
pub fn mul_div_u128(a: u128, b: u128, denom: u128) -> Result<u128, AmmError> {
    if denom == 0 {
        return Err(AmmError::Overflow);
    }
    let product = U256::from(a) * U256::from(b);
    let result = product / U256::from(denom);
    if result > U256::from(u128::MAX) {
        return Err(AmmError::Overflow);
    }
    Ok(result.as_u128())
}

/// Checked subtraction, mapping underflow to `Overflow` the way the spec's
/// "fails if underflow" clauses require.
pub fn checked_sub_u128(a: u128, b: u128) -> Result<u128, AmmError> {
    a.checked_sub(b).ok_or(AmmError::Overflow)
}

/// Checked addition over `u128`.
pub fn checked_add_u128(a: u128, b: u128) -> Result<u128, AmmError> {
    a.checked_add(b).ok_or(AmmError::Overflow)
}

/// Largest `amount_out` a single-sided swap can request against
/// `(reserve_in, reserve_out)` for a given `amount_in` without failing the
/// on-chain K-check, i.e. the floor of the fee-adjusted constant-product
/// quote `amount_in * 997 * reserve_out / (reserve_in * 1000 + amount_in * 997)`.
///
/// Not called by any processor — `swap` verifies the invariant directly
/// against whatever `amount_out` the caller names, it never needs to solve
/// for the maximum itself. This exists for callers (routers, tests) that
/// want to quote a swap before sending it, and is the pure-function surface
/// the getInputPrice scenario table is checked against.
pub fn get_amount_out(amount_in: u128, reserve_in: u128, reserve_out: u128) -> Result<u128, AmmError> {
    if amount_in == 0 {
        return Err(AmmError::InsufficientInputAmount);
    }
    if reserve_in == 0 || reserve_out == 0 {
        return Err(AmmError::InsufficientLiquidity);
    }
    let amount_in_with_fee =
        U256::from(amount_in) * (U256::from(crate::constants::FEE_DENOMINATOR) - U256::from(crate::constants::FEE_NUMERATOR));
    let numerator = amount_in_with_fee * U256::from(reserve_out);
    let denominator = U256::from(reserve_in) * U256::from(crate::constants::FEE_DENOMINATOR) + amount_in_with_fee;
    Ok((numerator / denominator).as_u128())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqrt_matches_known_values() {
        assert_eq!(sqrt_u128(0), 0);
        assert_eq!(sqrt_u128(1), 1);
        assert_eq!(sqrt_u128(4), 2);
        assert_eq!(sqrt_u128(8), 2);
        assert_eq!(sqrt_u128(9), 3);
        assert_eq!(sqrt_u128(1_000_000_000_000_000_000u128 * 4_000_000_000_000_000_000u128), 2_000_000_000_000_000_000u128);
    }

    #[test]
    fn mul_div_matches_integer_division() {
        assert_eq!(mul_div_u128(7, 3, 2).unwrap(), 10);
        assert_eq!(mul_div_u128(0, 3, 2).unwrap(), 0);
        assert!(mul_div_u128(1, 1, 0).is_err());
    }

    // The standard getInputPrice table (spec §8 scenario 2): for each
    // (amount_in, reserve_in, reserve_out) row, `get_amount_out` must match
    // the documented maximum, `swap` with that amount must be acceptable to
    // the K-check, and one unit more must not be.
    #[test]
    fn get_amount_out_matches_input_price_table() {
        let rows: [(u128, u128, u128, u128); 7] = [
            (1, 5, 10, 1662497915624478906),
            (1, 10, 5, 453305446940074565),
            (2, 5, 10, 2851015155847869602),
            (2, 10, 5, 831248957812239453),
            (1, 10, 10, 906610893880149131),
            (1, 100, 100, 987158034397061298),
            (1, 1000, 1000, 996006981039903216),
        ];
        for (amount_in_e, reserve_in_e, reserve_out_e, expected) in rows {
            let scale = 1_000_000_000_000_000_000u128;
            let amount_in = amount_in_e * scale;
            let reserve_in = reserve_in_e * scale;
            let reserve_out = reserve_out_e * scale;
            let got = get_amount_out(amount_in, reserve_in, reserve_out).unwrap();
            assert_eq!(got, expected, "row ({amount_in_e}, {reserve_in_e}, {reserve_out_e})");
        }
    }

    #[test]
    fn k_check_accepts_quoted_amount_and_rejects_one_more() {
        let scale = 1_000_000_000_000_000_000u128;
        let reserve0 = 5 * scale;
        let reserve1 = 10 * scale;
        let amount0_in = 1 * scale;
        let max_out = get_amount_out(amount0_in, reserve0, reserve1).unwrap();
        assert_eq!(max_out, 1662497915624478906);

        let check = |amount1_out: u128| -> bool {
            let bal0 = reserve0 + amount0_in;
            let bal1 = reserve1 - amount1_out;
            let bal0_adj = U256::from(bal0) * U256::from(1000u32) - U256::from(amount0_in) * U256::from(3u32);
            let bal1_adj = U256::from(bal1) * U256::from(1000u32);
            let lhs = bal0_adj * bal1_adj;
            let rhs = U256::from(reserve0) * U256::from(reserve1) * U256::from(1_000_000u32);
            lhs >= rhs
        };
        assert!(check(max_out));
        assert!(!check(max_out + 1));
    }
}
