// Poke Instruction
//
// Keeper entry point: feeds one activity ratio observation into the fee
// controller. Cooldown is enforced against the cluster clock.

use anchor_lang::prelude::*;

use crate::{constants::*, fee_engine::DynamicFeeEngine, state::*};

#[derive(Accounts)]
pub struct Poke<'info> {
    pub poker: Signer<'info>,

    #[account(
        seeds = [HOOK_CONFIG_SEED],
        bump = hook_config.bump,
    )]
    pub hook_config: Account<'info, HookConfig>,

    #[account(
        mut,
        seeds = [POOL_STATE_SEED, pool_state.pool.as_ref()],
        bump = pool_state.bump,
    )]
    pub pool_state: Account<'info, PoolState>,

    #[account(
        mut,
        seeds = [FEE_SLOT_SEED, pool_state.key().as_ref()],
        bump = fee_slot.bump,
    )]
    pub fee_slot: Account<'info, PoolFeeSlot>,
}

impl<'info> Poke<'info> {
    pub fn poke(&mut self, current_ratio: u128) -> Result<FeeUpdate> {
        self.hook_config.assert_not_paused()?;
        self.hook_config.assert_can_poke(&self.poker.key())?;

        let now = Clock::get()?.unix_timestamp;
        let update = self.pool_state.poke(
            &DynamicFeeEngine,
            current_ratio,
            self.hook_config.global_max_adj_rate,
            now,
            &mut *self.fee_slot,
        )?;

        Ok(update)
    }
}
