// Set Global Max Adjustment Rate Instruction
//
// Owner-only. Caps the per-poke adjustment rate for every pool.

use anchor_lang::prelude::*;

use crate::{constants::*, events::*, state::*};

#[derive(Accounts)]
pub struct SetGlobalMaxAdjRate<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [HOOK_CONFIG_SEED],
        bump = hook_config.bump,
    )]
    pub hook_config: Account<'info, HookConfig>,
}

impl<'info> SetGlobalMaxAdjRate<'info> {
    pub fn set_global_max_adj_rate(&mut self, rate: u128) -> Result<()> {
        self.hook_config.assert_is_owner(&self.owner.key())?;

        let old_rate = self.hook_config.set_global_max_adj_rate(rate)?;

        emit!(GlobalMaxAdjRateUpdated {
            old_rate,
            new_rate: rate,
        });
        msg!("Global max adjustment rate: {} -> {}", old_rate, rate);

        Ok(())
    }
}
