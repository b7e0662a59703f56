// Mul-div with caller-selected rounding
//
// Products are taken at double width before dividing, so a * b never
// overflows for any u128 (or U256) operands. Only the final quotient is
// checked against the output width.

use anchor_lang::prelude::*;

use super::u256::U256;
use crate::errors::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    Down,
    Up,
}

fn mul_div_wide(a: u128, b: u128, denominator: u128, rounding: Rounding) -> Result<U256> {
    require!(denominator != 0, HookError::DivisionByZero);

    let product = U256::from(a) * U256::from(b);
    let denominator = U256::from(denominator);
    let mut quotient = product / denominator;

    if rounding == Rounding::Up && !(product % denominator).is_zero() {
        quotient = quotient
            .checked_add(U256::one())
            .ok_or(HookError::Overflow)?;
    }

    Ok(quotient)
}

// floor(a * b / denominator) or ceil(a * b / denominator)
pub fn mul_div(a: u128, b: u128, denominator: u128, rounding: Rounding) -> Result<u128> {
    let quotient = mul_div_wide(a, b, denominator, rounding)?;
    Ok(quotient.to_u128().ok_or(HookError::Overflow)?)
}

// mul_div pinned to u128::MAX instead of failing; for values that are
// capped by the caller right after
pub fn mul_div_saturating(a: u128, b: u128, denominator: u128, rounding: Rounding) -> Result<u128> {
    let quotient = mul_div_wide(a, b, denominator, rounding)?;
    Ok(quotient.to_u128().unwrap_or(u128::MAX))
}

// Same as mul_div but for 256-bit operands (sqrt prices, shifted liquidity)
pub fn mul_div_u256(a: U256, b: U256, denominator: U256, rounding: Rounding) -> Result<U256> {
    require!(!denominator.is_zero(), HookError::DivisionByZero);

    let product = a.widen() * b.widen();
    let denominator = denominator.widen();
    let mut quotient = product / denominator;

    if rounding == Rounding::Up && !(product % denominator).is_zero() {
        quotient = quotient + 1u64;
    }

    Ok(quotient.narrow().ok_or(HookError::Overflow)?)
}

pub fn div_rounding_up(a: U256, b: U256) -> Result<U256> {
    require!(!b.is_zero(), HookError::DivisionByZero);

    let quotient = a / b;
    if (a % b).is_zero() {
        Ok(quotient)
    } else {
        Ok(quotient + 1u64)
    }
}

// Clamp that tolerates lo > hi by letting the upper bound win
pub fn clamp<T: Ord>(value: T, lo: T, hi: T) -> T {
    if value > hi {
        hi
    } else if value < lo {
        lo
    } else {
        value
    }
}
