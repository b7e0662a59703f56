// Activate And Configure Pool Instruction
//
// Owner-only, once per pool. Creates the pool state and its fee slot, then
// moves the pool from Unconfigured to Active with the initial fee pushed.

use anchor_lang::prelude::*;

use crate::{constants::*, state::*};

#[derive(Accounts)]
#[instruction(pool: Pubkey)]
pub struct ActivateAndConfigurePool<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        seeds = [HOOK_CONFIG_SEED],
        bump = hook_config.bump,
    )]
    pub hook_config: Account<'info, HookConfig>,

    // init_if_needed so a second call fails with PoolAlreadyConfigured
    #[account(
        init_if_needed,
        payer = owner,
        space = ANCHOR_DISCRIMINATOR + PoolState::INIT_SPACE,
        seeds = [POOL_STATE_SEED, pool.as_ref()],
        bump
    )]
    pub pool_state: Account<'info, PoolState>,

    #[account(
        init_if_needed,
        payer = owner,
        space = ANCHOR_DISCRIMINATOR + PoolFeeSlot::INIT_SPACE,
        seeds = [FEE_SLOT_SEED, pool_state.key().as_ref()],
        bump
    )]
    pub fee_slot: Account<'info, PoolFeeSlot>,

    pub system_program: Program<'info, System>,
}

impl<'info> ActivateAndConfigurePool<'info> {
    pub fn activate_and_configure_pool(
        &mut self,
        pool: Pubkey,
        params: PoolParams,
        initial_fee: u32,
        initial_target_ratio: u128,
        bumps: &ActivateAndConfigurePoolBumps,
    ) -> Result<()> {
        self.hook_config.assert_is_owner(&self.owner.key())?;
        self.pool_state.assert_unconfigured()?;

        self.fee_slot.pool = pool;
        self.fee_slot.bump = bumps.fee_slot;

        let now = Clock::get()?.unix_timestamp;
        self.pool_state.activate_and_configure(
            pool,
            params,
            initial_fee,
            initial_target_ratio,
            now,
            &mut *self.fee_slot,
        )?;
        self.pool_state.bump = bumps.pool_state;

        msg!("Pool {} active, fee slot {}", pool, self.fee_slot.key());

        Ok(())
    }
}
