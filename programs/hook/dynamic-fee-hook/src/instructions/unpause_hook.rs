// Unpause Hook Instruction
//
// Re-enables pokes and parameter updates. Only the owner can unpause.

use anchor_lang::prelude::*;

use crate::{constants::*, events::*, state::*};

#[derive(Accounts)]
pub struct UnpauseHook<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [HOOK_CONFIG_SEED],
        bump = hook_config.bump,
    )]
    pub hook_config: Account<'info, HookConfig>,
}

impl<'info> UnpauseHook<'info> {
    pub fn unpause(&mut self) -> Result<()> {
        self.hook_config.assert_is_owner(&self.owner.key())?;

        self.hook_config.unpause()?;

        emit!(HookUnpaused {
            by: self.owner.key(),
        });
        msg!("Hook unpaused by {}", self.owner.key());

        Ok(())
    }
}
