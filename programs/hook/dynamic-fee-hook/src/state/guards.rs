// Capability guards
//
// Access, pause and lifecycle checks are separate traits so the composed
// hook holds one implementor of each instead of a base-class chain.

use anchor_lang::prelude::*;

use crate::errors::*;

pub trait AccessGuard {
    fn owner(&self) -> Pubkey;

    fn assert_is_owner(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(self.owner(), *caller, HookError::UnauthorizedAccess);
        Ok(())
    }
}

pub trait PauseGuard {
    fn is_paused(&self) -> bool;

    fn set_paused(&mut self, paused: bool);

    fn pause(&mut self) -> Result<()> {
        require!(!self.is_paused(), HookError::HookAlreadyPaused);
        self.set_paused(true);
        Ok(())
    }

    fn unpause(&mut self) -> Result<()> {
        require!(self.is_paused(), HookError::HookNotPaused);
        self.set_paused(false);
        Ok(())
    }

    fn assert_not_paused(&self) -> Result<()> {
        require!(!self.is_paused(), HookError::HookPaused);
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolLifecycle {
    Unconfigured,
    Active,
    Inactive,
}

pub trait LifecycleGuard {
    fn lifecycle(&self) -> PoolLifecycle;

    fn assert_unconfigured(&self) -> Result<()> {
        require!(
            self.lifecycle() == PoolLifecycle::Unconfigured,
            HookError::PoolAlreadyConfigured
        );
        Ok(())
    }

    fn assert_configured(&self) -> Result<()> {
        require!(
            self.lifecycle() != PoolLifecycle::Unconfigured,
            HookError::PoolNotConfigured
        );
        Ok(())
    }

    fn assert_active(&self) -> Result<()> {
        self.assert_configured()?;
        require!(
            self.lifecycle() == PoolLifecycle::Active,
            HookError::PoolNotActive
        );
        Ok(())
    }
}

// Mutual exclusion flag held across external calls
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReentrancyLock {
    locked: bool,
}

impl ReentrancyLock {
    pub fn acquire(&mut self) -> Result<()> {
        require!(!self.locked, HookError::Reentrancy);
        self.locked = true;
        Ok(())
    }

    pub fn release(&mut self) {
        self.locked = false;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }
}
