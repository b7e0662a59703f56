// Hook Configuration State
//
// Singleton PDA: owner, keeper, pause flag and the global adjustment cap.

use anchor_lang::prelude::*;

use super::guards::{AccessGuard, PauseGuard};
use crate::{constants::*, errors::*};

#[account]
#[derive(InitSpace, Debug)]
pub struct HookConfig {
    pub owner: Pubkey,              // Admin for every owner-gated operation
    pub poker: Pubkey,              // Keeper allowed to poke besides the owner
    pub paused: bool,               // Emergency pause state
    pub global_max_adj_rate: u128,  // Cap on any per-poke adjustment rate (WAD)
    pub bump: u8,                   // PDA bump
}

impl HookConfig {
    pub fn new(owner: Pubkey, global_max_adj_rate: u128, bump: u8) -> Result<Self> {
        require!(owner != Pubkey::default(), HookError::InvalidAddress);
        Self::validate_global_max_adj_rate(global_max_adj_rate)?;

        Ok(Self {
            owner,
            poker: owner,
            paused: false,
            global_max_adj_rate,
            bump,
        })
    }

    pub fn validate_global_max_adj_rate(rate: u128) -> Result<()> {
        require!(
            rate > 0 && rate <= MAX_ADJUSTMENT_RATE,
            HookError::InvalidParameter
        );
        Ok(())
    }

    // Returns the previous rate
    pub fn set_global_max_adj_rate(&mut self, rate: u128) -> Result<u128> {
        Self::validate_global_max_adj_rate(rate)?;
        let old_rate = self.global_max_adj_rate;
        self.global_max_adj_rate = rate;
        Ok(old_rate)
    }

    pub fn set_poker(&mut self, poker: Pubkey) -> Result<()> {
        require!(poker != Pubkey::default(), HookError::InvalidAddress);
        self.poker = poker;
        Ok(())
    }

    pub fn assert_can_poke(&self, caller: &Pubkey) -> Result<()> {
        require!(
            *caller == self.owner || *caller == self.poker,
            HookError::UnauthorizedAccess
        );
        Ok(())
    }
}

impl AccessGuard for HookConfig {
    fn owner(&self) -> Pubkey {
        self.owner
    }
}

impl PauseGuard for HookConfig {
    fn is_paused(&self) -> bool {
        self.paused
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}
