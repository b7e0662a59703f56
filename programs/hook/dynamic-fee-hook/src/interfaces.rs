// External collaborators
//
// The host pool manager, the ERC-4626-style yield vaults and token custody
// are reached only through these traits. Calls are synchronous; any error
// they return aborts the enclosing operation.

use anchor_lang::{prelude::*, solana_program::hash::hashv};

use crate::{constants::*, errors::*, math::U256};

// Identifies a pool on the host pool manager
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolKey {
    pub currency0: Pubkey,
    pub currency1: Pubkey,
    pub fee: u32,
    pub tick_spacing: i32,
    pub hooks: Pubkey,
}

impl PoolKey {
    pub fn id(&self) -> Pubkey {
        let hash = hashv(&[
            self.currency0.as_ref(),
            self.currency1.as_ref(),
            &self.fee.to_le_bytes(),
            &self.tick_spacing.to_le_bytes(),
            self.hooks.as_ref(),
        ]);
        Pubkey::new_from_array(hash.to_bytes())
    }

    pub fn is_dynamic_fee(&self) -> bool {
        self.fee == DYNAMIC_FEE_FLAG
    }

    pub fn contains(&self, currency: &Pubkey) -> bool {
        *currency == self.currency0 || *currency == self.currency1
    }

    pub fn validate(&self) -> Result<()> {
        require!(self.currency0 < self.currency1, HookError::InvalidCurrency);
        require!(
            (MIN_TICK_SPACING..=MAX_TICK_SPACING).contains(&self.tick_spacing),
            HookError::InvalidTickRange
        );
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot0 {
    pub sqrt_price_x96: U256,
    pub tick: i32,
    pub lp_fee: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModifyLiquidityParams {
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub liquidity_delta: i128,
    pub salt: [u8; 32],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapParams {
    pub zero_for_one: bool,
    pub amount_specified: i128,
    pub sqrt_price_limit_x96: U256,
}

// Callbacks the host pool manager should invoke on this hook
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HookPermissions {
    pub before_initialize: bool,
    pub after_initialize: bool,
    pub before_add_liquidity: bool,
    pub after_add_liquidity: bool,
    pub before_remove_liquidity: bool,
    pub after_remove_liquidity: bool,
    pub before_swap: bool,
    pub after_swap: bool,
    pub before_donate: bool,
    pub after_donate: bool,
}

// Signed per-currency flow; positive means owed to the caller
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BalanceDelta {
    pub amount0: i128,
    pub amount1: i128,
}

pub trait FeeManager {
    fn lp_fee(&self, pool: &Pubkey) -> Result<u32>;

    fn update_dynamic_lp_fee(&mut self, pool: &Pubkey, fee: u32) -> Result<()>;
}

pub trait PoolManager: FeeManager {
    fn slot0(&self, pool: &Pubkey) -> Result<Slot0>;

    // Adds or removes liquidity; the returned delta stays outstanding until
    // taken or settled
    fn modify_liquidity(
        &mut self,
        pool: &Pubkey,
        owner: &Pubkey,
        params: &ModifyLiquidityParams,
    ) -> Result<BalanceDelta>;

    fn position_liquidity(
        &self,
        pool: &Pubkey,
        owner: &Pubkey,
        tick_lower: i32,
        tick_upper: i32,
        salt: &[u8; 32],
    ) -> u128;

    // Swap on behalf of `sender`; returns the sender's delta
    fn swap(&mut self, pool: &Pubkey, sender: &Pubkey, params: &SwapParams) -> Result<BalanceDelta>;

    // Net outstanding delta of `target` in `currency`
    fn currency_delta(&self, target: &Pubkey, currency: &Pubkey) -> i128;

    // Pull tokens the pool manager owes to `to`
    fn take(&mut self, currency: &Pubkey, to: &Pubkey, amount: u128) -> Result<()>;

    // Pay tokens `from` owes to the pool manager
    fn settle(&mut self, currency: &Pubkey, from: &Pubkey, amount: u128) -> Result<()>;
}

pub trait YieldVault {
    fn asset(&self) -> Pubkey;

    fn convert_to_assets(&self, shares: u128) -> u128;

    fn convert_to_shares(&self, assets: u128) -> u128;

    // Returns shares minted to `receiver`
    fn deposit(&mut self, assets: u128, receiver: &Pubkey) -> Result<u128>;

    // Returns shares burned from `owner`
    fn withdraw(&mut self, assets: u128, receiver: &Pubkey, owner: &Pubkey) -> Result<u128>;

    // Returns assets sent to `receiver`
    fn redeem(&mut self, shares: u128, receiver: &Pubkey, owner: &Pubkey) -> Result<u128>;
}

pub trait VaultRegistry {
    fn vault(&self, address: &Pubkey) -> Option<&dyn YieldVault>;

    fn vault_mut(&mut self, address: &Pubkey) -> Option<&mut dyn YieldVault>;
}

pub trait TokenCustody {
    // Move `amount` of `currency` from `from` into the hook
    fn transfer_in(&mut self, currency: &Pubkey, from: &Pubkey, amount: u128) -> Result<()>;
}
