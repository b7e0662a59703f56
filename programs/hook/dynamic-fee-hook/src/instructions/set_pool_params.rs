// Set Pool Params Instruction
//
// Owner-only while not paused. Re-validates every bound and pulls the
// target ratio under a lowered ceiling.

use anchor_lang::prelude::*;

use crate::{constants::*, state::*};

#[derive(Accounts)]
pub struct SetPoolParams<'info> {
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

impl<'info> SetPoolParams<'info> {
    pub fn set_pool_params(&mut self, params: PoolParams) -> Result<()> {
        self.hook_config.assert_is_owner(&self.owner.key())?;
        self.hook_config.assert_not_paused()?;

        self.pool_state.set_params(params)?;

        msg!(
            "Pool {} params updated, target ratio {}",
            self.pool_state.pool,
            self.pool_state.target_ratio
        );

        Ok(())
    }
}
