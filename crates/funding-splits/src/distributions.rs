//! Payout distribution math: percent and amount conversions, fee adjustment,
//! split-group totals and distribution-limit rebalancing.

use std::collections::HashSet;

use log::debug;

use crate::{
    amount::Amount,
    constants::{AMOUNT_PRECISION, FINE_PERCENT_TOTAL, MAX_FEE, SPLITS_TOTAL_PERCENT},
    errors::{ErrorCode, Result},
    percent::{scale_percentage, FeePercent, SplitPercent},
    state::{Address, Allocation, Split},
    utils::{calculate_split_amount, mul_div, mul_div_round, sum_split_percents},
};

/// Amount for a human-scale `percent` (0-100) of `amount`, rounded to 4 dp.
/// Percentages above 100 are not rejected here; over-allocation is checked
/// by [`validate_splits`].
pub fn amount_from_percent(percent: f64, amount: Amount) -> Result<Amount> {
    Amount::from_wei(fine_share(amount, percent)?).round_dp(AMOUNT_PRECISION)
}

/// `amount * percent / 100` in wei, with `percent` carried at 1e18 parts
/// of 100% so no float digits are dropped before the multiplication
fn fine_share(amount: Amount, percent: f64) -> Result<u128> {
    let scaled = scale_percentage(percent, FINE_PERCENT_TOTAL)?;
    mul_div_round(amount.wei(), scaled, FINE_PERCENT_TOTAL as u128).ok_or(ErrorCode::MathOverflow)
}

/// Fixed-point percent that `amount` represents of `distribution_limit`.
/// Rounds down so that converted amounts never add up past 100%.
pub fn percent_from_amount(amount: Amount, distribution_limit: Amount) -> Result<SplitPercent> {
    if distribution_limit.is_zero() {
        return Err(ErrorCode::ZeroDistributionLimit);
    }
    let value = mul_div(
        amount.wei(),
        SPLITS_TOTAL_PERCENT as u128,
        distribution_limit.wei(),
    )
    .ok_or(ErrorCode::MathOverflow)?;
    if value > SPLITS_TOTAL_PERCENT as u128 {
        return Err(ErrorCode::PercentOutOfRange {
            value,
            total: SPLITS_TOTAL_PERCENT,
        });
    }
    SplitPercent::new(value as u64)
}

/// Amount for `percent` of the distribution limit with the protocol fee
/// (human-scale `fee_percentage`) taken off, rounded to 4 dp.
/// Returns `None` when the amount before fee is zero.
pub fn distribution_amount_from_percent_after_fee(
    percent: f64,
    distribution_limit: Amount,
    fee_percentage: f64,
) -> Result<Option<Amount>> {
    let before_fee = amount_from_percent(percent, distribution_limit)?;
    if before_fee.is_zero() {
        return Ok(None);
    }

    if fee_percentage > 100.0 {
        return Err(ErrorCode::InvalidPercentage);
    }
    let fee = fine_share(before_fee, fee_percentage)?;

    let after_fee = before_fee.checked_sub(Amount::from_wei(fee))?;
    after_fee.round_dp(AMOUNT_PRECISION).map(Some)
}

/// Protocol fee charged on `amount`, rounded down
pub fn fee_for_amount(amount: Amount, fee: FeePercent) -> Result<Amount> {
    calculate_split_amount(amount.wei(), fee.value(), MAX_FEE)
        .map(Amount::from_wei)
        .ok_or(ErrorCode::MathOverflow)
}

/// Split's share of `total`, rounded down
pub fn split_amount(split: &Split, total: Amount) -> Result<Amount> {
    calculate_split_amount(total.wei(), split.percent.value(), SPLITS_TOTAL_PERCENT)
        .map(Amount::from_wei)
        .ok_or(ErrorCode::MathOverflow)
}

/// Split's share of `total` after the protocol fee. Splits paying another
/// project are fee exempt. Returns `None` when the share is zero.
pub fn split_amount_after_fee(split: &Split, total: Amount, fee: FeePercent) -> Result<Option<Amount>> {
    let share = split_amount(split, total)?;
    if share.is_zero() {
        return Ok(None);
    }
    if split.is_project_split() {
        return Ok(Some(share));
    }
    let fee = fee_for_amount(share, fee)?;
    share.checked_sub(fee).map(Some)
}

/// Fixed-point sum of a group's percents
pub fn total_split_percent<T: Allocation>(allocations: &[T]) -> Result<u64> {
    sum_split_percents(allocations).ok_or(ErrorCode::MathOverflow)
}

/// Human-scale (0-100) sum of a group's percents; 0 for an empty group
pub fn total_splits_percentage<T: Allocation>(allocations: &[T]) -> f64 {
    let total: u128 = allocations.iter().map(|a| a.percent_value() as u128).sum();
    total as f64 * 100.0 / T::TOTAL_PERCENT as f64
}

/// Combined amount of all splits under `distribution_limit`
pub fn sum_of_payout_split_amounts(splits: &[Split], distribution_limit: Amount) -> Result<Amount> {
    let total = total_split_percent(splits)?;
    mul_div(
        distribution_limit.wei(),
        total as u128,
        SPLITS_TOTAL_PERCENT as u128,
    )
    .map(Amount::from_wei)
    .ok_or(ErrorCode::MathOverflow)
}

/// Check an allocation group before it is submitted: percents must not
/// exceed 100% in total, none may be zero, and no beneficiary may repeat.
pub fn validate_splits<T: Allocation>(allocations: &[T]) -> Result<()> {
    let total = total_split_percent(allocations)?;
    if total > T::TOTAL_PERCENT {
        return Err(ErrorCode::SplitsExceedTotal {
            total,
            max: T::TOTAL_PERCENT,
        });
    }

    if allocations.iter().any(|a| a.percent_value() == 0) {
        return Err(ErrorCode::ZeroPercentage);
    }

    if let Some(duplicate) = duplicate_beneficiaries(allocations).first() {
        return Err(ErrorCode::DuplicateBeneficiary(duplicate.to_string()));
    }

    Ok(())
}

/// Beneficiaries appearing more than once, in order of their second
/// appearance. Allocations without a beneficiary are ignored.
pub fn duplicate_beneficiaries<T: Allocation>(allocations: &[T]) -> Vec<Address> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for beneficiary in allocations.iter().filter_map(|a| a.beneficiary()) {
        if !seen.insert(*beneficiary) && !duplicates.contains(beneficiary) {
            duplicates.push(*beneficiary);
        }
    }
    duplicates
}

/// Re-derive every split's percent so its absolute amount stays the same
/// when the distribution limit moves from `old_limit` to `new_limit`
pub fn adjusted_split_percents(
    splits: &[Split],
    old_limit: Amount,
    new_limit: Amount,
) -> Result<Vec<Split>> {
    if new_limit.is_zero() {
        return Err(ErrorCode::ZeroDistributionLimit);
    }

    splits
        .iter()
        .map(|split| {
            let current_amount = split_amount(split, old_limit)?;
            let percent = percent_from_amount(current_amount, new_limit)?;
            debug!(
                "rebalanced split {:?}: {} -> {} ({} of {})",
                split.beneficiary, split.percent, percent, current_amount, new_limit
            );
            Ok(Split {
                percent,
                ..split.clone()
            })
        })
        .collect()
}

/// Distribution limit needed for the split currently at
/// `editing_split_percent` (zero when adding a split) to be worth
/// `new_split_amount` while every other split keeps its amount.
/// Rounded to 4 dp.
pub fn new_distribution_limit(
    editing_split_percent: SplitPercent,
    new_split_amount: Amount,
    current_limit: Amount,
) -> Result<Amount> {
    let previous_amount = calculate_split_amount(
        current_limit.wei(),
        editing_split_percent.value(),
        SPLITS_TOTAL_PERCENT,
    )
    .map(Amount::from_wei)
    .ok_or(ErrorCode::MathOverflow)?;

    current_limit
        .checked_sub(previous_amount)?
        .checked_add(new_split_amount)?
        .round_dp(AMOUNT_PRECISION)
}
