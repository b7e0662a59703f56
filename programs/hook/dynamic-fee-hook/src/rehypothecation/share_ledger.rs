// Rehypothecation Share Ledger
//
// Fungible claim on the two yield-source positions. Deposits round the
// required amounts up and withdrawals round the returned amounts down, so a
// deposit followed by a withdrawal of the same shares never gains value.

use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::{
    constants::*,
    errors::*,
    math::{liquidity_amounts::get_amounts_for_liquidity, mul_div, Rounding, U256},
};

// Pool price and JIT range bounds, all Q64.96
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceRange {
    pub sqrt_price_x96: U256,
    pub sqrt_price_lower: U256,
    pub sqrt_price_upper: U256,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShareLedger {
    total_supply: u128,
    balances: BTreeMap<Pubkey, u128>,
}

impl ShareLedger {
    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    pub fn balance_of(&self, owner: &Pubkey) -> u128 {
        self.balances.get(owner).copied().unwrap_or_default()
    }

    pub fn mint(&mut self, to: &Pubkey, shares: u128) -> Result<()> {
        require!(*to != Pubkey::default(), HookError::InvalidAddress);
        let total_supply = self
            .total_supply
            .checked_add(shares)
            .ok_or(HookError::Overflow)?;
        let balance = self.balance_of(to) + shares;

        self.total_supply = total_supply;
        self.balances.insert(*to, balance);
        Ok(())
    }

    pub fn burn(&mut self, from: &Pubkey, shares: u128) -> Result<()> {
        let balance = self
            .balance_of(from)
            .checked_sub(shares)
            .ok_or(HookError::InsufficientShares)?;

        self.total_supply -= shares;
        if balance == 0 {
            self.balances.remove(from);
        } else {
            self.balances.insert(*from, balance);
        }
        Ok(())
    }

    pub fn transfer(&mut self, from: &Pubkey, to: &Pubkey, shares: u128) -> Result<()> {
        require!(*to != Pubkey::default(), HookError::InvalidAddress);
        self.burn(from, shares)?;
        self.mint(to, shares)
    }
}

// Amounts a depositor pays for `shares`
pub fn convert_shares_to_amounts_for_deposit(
    shares: u128,
    total_supply: u128,
    amounts_in_vault: (u128, u128),
    range: &PriceRange,
) -> Result<(u128, u128)> {
    if total_supply == 0 {
        // First depositor prices shares as liquidity over the JIT range
        let (amount0, amount1) = get_amounts_for_liquidity(
            range.sqrt_price_x96,
            range.sqrt_price_lower,
            range.sqrt_price_upper,
            shares,
            Rounding::Up,
        )?;
        return Ok((
            amount0
                .checked_add(FIRST_DEPOSIT_MARGIN)
                .ok_or(HookError::Overflow)?,
            amount1
                .checked_add(FIRST_DEPOSIT_MARGIN)
                .ok_or(HookError::Overflow)?,
        ));
    }

    Ok((
        pro_rata(shares, amounts_in_vault.0, total_supply, Rounding::Up)?,
        pro_rata(shares, amounts_in_vault.1, total_supply, Rounding::Up)?,
    ))
}

// Amounts a holder receives for burning `shares`
pub fn convert_shares_to_amounts_for_withdrawal(
    shares: u128,
    total_supply: u128,
    amounts_in_vault: (u128, u128),
) -> Result<(u128, u128)> {
    Ok((
        pro_rata(shares, amounts_in_vault.0, total_supply, Rounding::Down)?,
        pro_rata(shares, amounts_in_vault.1, total_supply, Rounding::Down)?,
    ))
}

// Shares that convert to nothing on both sides cannot be minted or burned
pub fn require_nonzero_amounts(amounts: (u128, u128)) -> Result<(u128, u128)> {
    require!(amounts.0 > 0 || amounts.1 > 0, HookError::ZeroAmounts);
    Ok(amounts)
}

// shares * (amount + 1) / (supply + 1)
fn pro_rata(shares: u128, amount_in_vault: u128, total_supply: u128, rounding: Rounding) -> Result<u128> {
    let amount = amount_in_vault
        .checked_add(SHARE_CONVERSION_MARGIN)
        .ok_or(HookError::Overflow)?;
    let supply = total_supply
        .checked_add(SHARE_CONVERSION_MARGIN)
        .ok_or(HookError::Overflow)?;
    mul_div(shares, amount, supply, rounding)
}
