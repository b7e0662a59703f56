// Pause Hook Instruction
//
// Emergency pause. Only the owner can pause.

use anchor_lang::prelude::*;

use crate::{constants::*, events::*, state::*};

#[derive(Accounts)]
pub struct PauseHook<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [HOOK_CONFIG_SEED],
        bump = hook_config.bump,
    )]
    pub hook_config: Account<'info, HookConfig>,
}

impl<'info> PauseHook<'info> {
    pub fn pause(&mut self) -> Result<()> {
        self.hook_config.assert_is_owner(&self.owner.key())?;

        self.hook_config.pause()?;

        emit!(HookPaused {
            by: self.owner.key(),
        });
        msg!("Hook paused by {}", self.owner.key());

        Ok(())
    }
}
