// Set Poker Instruction
//
// Owner-only. The owner keeps poke rights regardless of the poker.

use anchor_lang::prelude::*;

use crate::{constants::*, events::*, state::*};

#[derive(Accounts)]
pub struct SetPoker<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [HOOK_CONFIG_SEED],
        bump = hook_config.bump,
    )]
    pub hook_config: Account<'info, HookConfig>,
}

impl<'info> SetPoker<'info> {
    pub fn set_poker(&mut self, poker: Pubkey) -> Result<()> {
        self.hook_config.assert_is_owner(&self.owner.key())?;

        let old_poker = self.hook_config.poker;
        self.hook_config.set_poker(poker)?;

        emit!(PokerUpdated {
            old_poker,
            new_poker: poker,
        });
        msg!("Poker set to {}", poker);

        Ok(())
    }
}
