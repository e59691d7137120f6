//! Fixed-point reward math.

use primitive_types::U256;

/// One whole unit of an 18-decimal multiplier.
pub const REWARD_SCALE: u128 = 1_000_000_000_000_000_000;

/// Returns `floor(amount * multiplier / REWARD_SCALE)`.
///
/// The product is taken in 256 bits, so it never overflows; `None` means the
/// quotient itself does not fit in a `u128` balance.
pub fn compute_reward(amount: u128, multiplier: u128) -> Option<u128> {
    if amount == 0 || multiplier == 0 {
        return Some(0);
    }

    let product = U256::from(amount).checked_mul(U256::from(multiplier))?;
    let reward = product / U256::from(REWARD_SCALE);

    if reward > U256::from(u128::MAX) {
        return None;
    }
    Some(reward.low_u128())
}
