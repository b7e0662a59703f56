// Yield Source Positions
//
// Per-currency vault address and the vault shares the hook holds there.
// shares_owned moves only through deposit / withdraw / migrate below.

use anchor_lang::prelude::*;

use crate::{
    errors::*,
    interfaces::{PoolKey, VaultRegistry, YieldVault},
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct YieldSourceState {
    pub yield_source: Pubkey,  // Vault address, default = unconfigured
    pub shares_owned: u128,    // Vault shares held by the hook
}

impl YieldSourceState {
    pub fn is_configured(&self) -> bool {
        self.yield_source != Pubkey::default()
    }

    fn vault<'a>(&self, vaults: &'a dyn VaultRegistry) -> Result<&'a dyn YieldVault> {
        require!(self.is_configured(), HookError::YieldSourceNotConfigured);
        Ok(vaults
            .vault(&self.yield_source)
            .ok_or(HookError::InvalidYieldSource)?)
    }

    fn vault_mut<'a>(&self, vaults: &'a mut dyn VaultRegistry) -> Result<&'a mut dyn YieldVault> {
        require!(self.is_configured(), HookError::YieldSourceNotConfigured);
        Ok(vaults
            .vault_mut(&self.yield_source)
            .ok_or(HookError::InvalidYieldSource)?)
    }

    // Assets currently redeemable for shares_owned
    pub fn amount_available(&self, vaults: &dyn VaultRegistry) -> Result<u128> {
        let vault = self.vault(vaults)?;
        Ok(vault.convert_to_assets(self.shares_owned))
    }

    // Returns shares minted
    pub fn deposit(&mut self, vaults: &mut dyn VaultRegistry, assets: u128, hook: &Pubkey) -> Result<u128> {
        if assets == 0 {
            return Ok(0);
        }
        let minted = self.vault_mut(vaults)?.deposit(assets, hook)?;
        self.shares_owned = self
            .shares_owned
            .checked_add(minted)
            .ok_or(HookError::Overflow)?;
        Ok(minted)
    }

    // Returns shares burned
    pub fn withdraw(
        &mut self,
        vaults: &mut dyn VaultRegistry,
        assets: u128,
        receiver: &Pubkey,
        hook: &Pubkey,
    ) -> Result<u128> {
        if assets == 0 {
            return Ok(0);
        }
        let burned = self.vault_mut(vaults)?.withdraw(assets, receiver, hook)?;
        self.shares_owned = self
            .shares_owned
            .checked_sub(burned)
            .ok_or(HookError::InsufficientYieldShares)?;
        Ok(burned)
    }

    // Moves the whole position into `new_source`; returns the assets moved
    pub fn migrate(
        &mut self,
        vaults: &mut dyn VaultRegistry,
        new_source: Pubkey,
        hook: &Pubkey,
    ) -> Result<u128> {
        let mut assets = 0;
        if self.is_configured() && self.shares_owned > 0 {
            assets = self.vault_mut(vaults)?.redeem(self.shares_owned, hook, hook)?;
            self.shares_owned = 0;
        }

        self.yield_source = new_source;
        self.deposit(vaults, assets, hook)?;
        Ok(assets)
    }
}

// Positions for both currencies of the bound pool
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct YieldSources {
    pub currency0: YieldSourceState,
    pub currency1: YieldSourceState,
}

impl YieldSources {
    pub fn both_configured(&self) -> bool {
        self.currency0.is_configured() && self.currency1.is_configured()
    }

    pub fn for_currency(&self, key: &PoolKey, currency: &Pubkey) -> Result<&YieldSourceState> {
        if *currency == key.currency0 {
            Ok(&self.currency0)
        } else if *currency == key.currency1 {
            Ok(&self.currency1)
        } else {
            err!(HookError::InvalidCurrency)
        }
    }

    pub fn for_currency_mut(&mut self, key: &PoolKey, currency: &Pubkey) -> Result<&mut YieldSourceState> {
        if *currency == key.currency0 {
            Ok(&mut self.currency0)
        } else if *currency == key.currency1 {
            Ok(&mut self.currency1)
        } else {
            err!(HookError::InvalidCurrency)
        }
    }

    pub fn amounts_available(&self, vaults: &dyn VaultRegistry) -> Result<(u128, u128)> {
        Ok((
            self.currency0.amount_available(vaults)?,
            self.currency1.amount_available(vaults)?,
        ))
    }
}
