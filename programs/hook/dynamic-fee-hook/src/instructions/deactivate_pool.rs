// Deactivate Pool Instruction
//
// Stops pokes and swaps on a configured pool without resetting it.

use anchor_lang::prelude::*;

use crate::{constants::*, state::*};

#[derive(Accounts)]
pub struct DeactivatePool<'info> {
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

impl<'info> DeactivatePool<'info> {
    pub fn deactivate_pool(&mut self) -> Result<()> {
        self.hook_config.assert_is_owner(&self.owner.key())?;

        self.pool_state.deactivate()?;

        msg!("Pool {} deactivated", self.pool_state.pool);

        Ok(())
    }
}
