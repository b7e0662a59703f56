// Initialize Hook Instruction
//
// Creates the singleton hook config. The signer becomes owner and poker.

use anchor_lang::prelude::*;

use crate::{constants::*, state::*};

#[derive(Accounts)]
pub struct InitializeHook<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        init,
        payer = owner,
        space = ANCHOR_DISCRIMINATOR + HookConfig::INIT_SPACE,
        seeds = [HOOK_CONFIG_SEED],
        bump
    )]
    pub hook_config: Account<'info, HookConfig>,

    pub system_program: Program<'info, System>,
}

impl<'info> InitializeHook<'info> {
    pub fn initialize_hook(
        &mut self,
        global_max_adj_rate: u128,
        bumps: &InitializeHookBumps,
    ) -> Result<()> {
        self.hook_config.set_inner(HookConfig::new(
            self.owner.key(),
            global_max_adj_rate,
            bumps.hook_config,
        )?);

        msg!("Hook initialized, owner {}", self.owner.key());
        msg!("Global max adjustment rate: {}", global_max_adj_rate);

        Ok(())
    }
}
