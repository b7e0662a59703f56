// Wide unsigned integers for double-width intermediates
#![allow(clippy::assign_op_pattern)]
#![allow(clippy::ptr_offset_with_cast)]
#![allow(clippy::manual_range_contains)]

use uint::construct_uint;

construct_uint! {
    /// 256-bit unsigned integer.
    pub struct U256(4);
}

construct_uint! {
    /// 512-bit unsigned integer, only used as a mul-div intermediate.
    pub struct U512(8);
}

impl U256 {
    pub fn widen(self) -> U512 {
        let mut limbs = [0u64; 8];
        limbs[..4].copy_from_slice(&self.0);
        U512(limbs)
    }

    // Returns None when the value does not fit in 128 bits
    pub fn to_u128(self) -> Option<u128> {
        if self.0[2] != 0 || self.0[3] != 0 {
            return None;
        }
        Some(self.as_u128())
    }
}

impl U512 {
    // Returns None when the value does not fit in 256 bits
    pub fn narrow(self) -> Option<U256> {
        if self.0[4..].iter().any(|limb| *limb != 0) {
            return None;
        }
        let mut limbs = [0u64; 4];
        limbs.copy_from_slice(&self.0[..4]);
        Some(U256(limbs))
    }
}
