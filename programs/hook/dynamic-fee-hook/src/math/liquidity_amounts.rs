// Liquidity <-> token amount conversions over a price range
//
// Only what JIT sizing and first-deposit pricing need; swap curves stay
// with the host pool manager.

use anchor_lang::prelude::*;

use super::{
    full_math::{div_rounding_up, mul_div_u256, Rounding},
    tick_math::{q96, RESOLUTION},
    u256::U256,
};
use crate::errors::*;

fn sorted(a: U256, b: U256) -> (U256, U256) {
    if a > b {
        (b, a)
    } else {
        (a, b)
    }
}

fn to_liquidity(value: U256) -> Result<u128> {
    Ok(value.to_u128().ok_or(HookError::Overflow)?)
}

pub fn get_liquidity_for_amount0(sqrt_price_a: U256, sqrt_price_b: U256, amount0: u128) -> Result<u128> {
    let (lower, upper) = sorted(sqrt_price_a, sqrt_price_b);
    if lower == upper {
        return Ok(0);
    }
    let intermediate = mul_div_u256(lower, upper, q96(), Rounding::Down)?;
    to_liquidity(mul_div_u256(
        U256::from(amount0),
        intermediate,
        upper - lower,
        Rounding::Down,
    )?)
}

pub fn get_liquidity_for_amount1(sqrt_price_a: U256, sqrt_price_b: U256, amount1: u128) -> Result<u128> {
    let (lower, upper) = sorted(sqrt_price_a, sqrt_price_b);
    if lower == upper {
        return Ok(0);
    }
    to_liquidity(mul_div_u256(
        U256::from(amount1),
        q96(),
        upper - lower,
        Rounding::Down,
    )?)
}

// Max liquidity mintable from the given amounts at the current price
pub fn get_liquidity_for_amounts(
    sqrt_price: U256,
    sqrt_price_a: U256,
    sqrt_price_b: U256,
    amount0: u128,
    amount1: u128,
) -> Result<u128> {
    let (lower, upper) = sorted(sqrt_price_a, sqrt_price_b);

    if sqrt_price <= lower {
        get_liquidity_for_amount0(lower, upper, amount0)
    } else if sqrt_price < upper {
        let liquidity0 = get_liquidity_for_amount0(sqrt_price, upper, amount0)?;
        let liquidity1 = get_liquidity_for_amount1(lower, sqrt_price, amount1)?;
        Ok(liquidity0.min(liquidity1))
    } else {
        get_liquidity_for_amount1(lower, upper, amount1)
    }
}

pub fn get_amount0_delta(
    sqrt_price_a: U256,
    sqrt_price_b: U256,
    liquidity: u128,
    rounding: Rounding,
) -> Result<U256> {
    let (lower, upper) = sorted(sqrt_price_a, sqrt_price_b);
    require!(!lower.is_zero(), HookError::DivisionByZero);

    let numerator1 = U256::from(liquidity) << RESOLUTION;
    let numerator2 = upper - lower;

    match rounding {
        Rounding::Up => div_rounding_up(
            mul_div_u256(numerator1, numerator2, upper, Rounding::Up)?,
            lower,
        ),
        Rounding::Down => Ok(mul_div_u256(numerator1, numerator2, upper, Rounding::Down)? / lower),
    }
}

pub fn get_amount1_delta(
    sqrt_price_a: U256,
    sqrt_price_b: U256,
    liquidity: u128,
    rounding: Rounding,
) -> Result<U256> {
    let (lower, upper) = sorted(sqrt_price_a, sqrt_price_b);
    mul_div_u256(U256::from(liquidity), upper - lower, q96(), rounding)
}

// Token amounts backing `liquidity` over [a, b] at the current price
pub fn get_amounts_for_liquidity(
    sqrt_price: U256,
    sqrt_price_a: U256,
    sqrt_price_b: U256,
    liquidity: u128,
    rounding: Rounding,
) -> Result<(u128, u128)> {
    let (lower, upper) = sorted(sqrt_price_a, sqrt_price_b);

    let (amount0, amount1) = if sqrt_price <= lower {
        (get_amount0_delta(lower, upper, liquidity, rounding)?, U256::zero())
    } else if sqrt_price < upper {
        (
            get_amount0_delta(sqrt_price, upper, liquidity, rounding)?,
            get_amount1_delta(lower, sqrt_price, liquidity, rounding)?,
        )
    } else {
        (U256::zero(), get_amount1_delta(lower, upper, liquidity, rounding)?)
    };

    Ok((
        amount0.to_u128().ok_or(HookError::Overflow)?,
        amount1.to_u128().ok_or(HookError::Overflow)?,
    ))
}
