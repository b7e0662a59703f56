// Activate Pool Instruction
//
// Re-enables a configured pool. Economic parameters are untouched.

use anchor_lang::prelude::*;

use crate::{constants::*, state::*};

#[derive(Accounts)]
pub struct ActivatePool<'info> {
    pub owner: Signer<'info>,

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
}

impl<'info> ActivatePool<'info> {
    pub fn activate_pool(&mut self) -> Result<()> {
        self.hook_config.assert_is_owner(&self.owner.key())?;

        self.pool_state.activate()?;

        msg!("Pool {} activated", self.pool_state.pool);

        Ok(())
    }
}
