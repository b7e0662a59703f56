// Pool Fee Slot
//
// The live LP fee the host swap path reads. The controller never keeps its
// own copy; it reads and writes the fee only through FeeManager.

use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, interfaces::FeeManager};

#[account]
#[derive(InitSpace, Debug)]
pub struct PoolFeeSlot {
    pub pool: Pubkey,        // Host pool this fee applies to
    pub lp_fee: u32,         // Current LP fee (hundredths of a bip)
    pub bump: u8,            // PDA bump
}

impl FeeManager for PoolFeeSlot {
    fn lp_fee(&self, pool: &Pubkey) -> Result<u32> {
        require_keys_eq!(self.pool, *pool, HookError::InvalidPool);
        Ok(self.lp_fee)
    }

    fn update_dynamic_lp_fee(&mut self, pool: &Pubkey, fee: u32) -> Result<()> {
        require_keys_eq!(self.pool, *pool, HookError::InvalidPool);
        require!(fee <= MAX_FEE, HookError::InvalidFee);
        self.lp_fee = fee;
        Ok(())
    }
}
