//! Amount-first payout editing.
//!
//! Payout recipients are entered as absolute amounts. Each edit derives the
//! distribution limit the amounts imply and re-expresses every other split as
//! a percent of that limit, so no payee's amount moves as a side effect.

use log::debug;

use crate::{
    amount::Amount,
    constants::{AMOUNT_PRECISION, SPLITS_TOTAL_PERCENT},
    distributions::{
        adjusted_split_percents, new_distribution_limit, percent_from_amount, split_amount,
        total_split_percent, total_splits_percentage, validate_splits,
    },
    errors::{ErrorCode, Result},
    percent::SplitPercent,
    state::Split,
};

#[derive(Debug, Clone)]
pub struct PayoutsEditor {
    splits: Vec<Split>,
    distribution_limit: Amount,
    /// Unix timestamp used for lock checks
    now: u64,
}

impl PayoutsEditor {
    pub fn new(splits: Vec<Split>, distribution_limit: Amount, now: u64) -> Self {
        Self {
            splits,
            distribution_limit,
            now,
        }
    }

    pub fn splits(&self) -> &[Split] {
        &self.splits
    }

    pub fn into_splits(self) -> Vec<Split> {
        self.splits
    }

    pub fn distribution_limit(&self) -> Amount {
        self.distribution_limit
    }

    pub fn total_percentage(&self) -> f64 {
        total_splits_percentage(&self.splits)
    }

    /// Amount paid to the split at `index` under the current limit
    pub fn amount_of(&self, index: usize) -> Result<Amount> {
        let split = self.splits.get(index).ok_or(ErrorCode::SplitNotFound(index))?;
        split_amount(split, self.distribution_limit)
    }

    pub fn validate(&self) -> Result<()> {
        validate_splits(&self.splits)
    }

    /// Change the distribution limit, keeping every split's amount
    pub fn set_distribution_limit(&mut self, limit: Amount) -> Result<()> {
        if self.splits.is_empty() {
            self.distribution_limit = limit;
            return Ok(());
        }
        self.splits = adjusted_split_percents(&self.splits, self.distribution_limit, limit)?;
        self.distribution_limit = limit;
        Ok(())
    }

    /// Append a split paying `amount`; the limit grows by that amount.
    /// The split's own percent is ignored and derived from `amount`.
    /// Returns the new split's index.
    pub fn add_split(&mut self, split: Split, amount: Amount) -> Result<usize> {
        let amount = amount.round_dp(AMOUNT_PRECISION)?;
        if amount.is_zero() {
            return Err(ErrorCode::ZeroPercentage);
        }

        let limit = new_distribution_limit(SplitPercent::ZERO, amount, self.distribution_limit)?;
        let mut splits = adjusted_split_percents(&self.splits, self.distribution_limit, limit)?;
        let percent = settled_percent(&splits, amount, limit)?;
        splits.push(Split { percent, ..split });

        self.splits = splits;
        self.distribution_limit = limit;
        Ok(self.splits.len() - 1)
    }

    /// Set the amount paid to the split at `index`
    pub fn edit_split_amount(&mut self, index: usize, amount: Amount) -> Result<()> {
        let editing = self.unlocked(index)?.clone();
        let amount = amount.round_dp(AMOUNT_PRECISION)?;
        if amount.is_zero() {
            return Err(ErrorCode::ZeroPercentage);
        }

        let limit = new_distribution_limit(editing.percent, amount, self.distribution_limit)?;

        let mut others = self.splits.clone();
        others.remove(index);
        let mut splits = adjusted_split_percents(&others, self.distribution_limit, limit)?;
        let percent = settled_percent(&splits, amount, limit)?;
        splits.insert(index, Split { percent, ..editing });

        self.splits = splits;
        self.distribution_limit = limit;
        Ok(())
    }

    /// Drop the split at `index`; the limit shrinks by its amount
    pub fn remove_split(&mut self, index: usize) -> Result<Split> {
        let removed_percent = self.unlocked(index)?.percent;
        let mut limit =
            new_distribution_limit(removed_percent, Amount::ZERO, self.distribution_limit)?;

        let mut others = self.splits.clone();
        let removed = others.remove(index);

        // rounding the limit must not leave it short of what the rest still pay
        let remaining = others.iter().try_fold(Amount::ZERO, |sum, split| {
            sum.checked_add(split_amount(split, self.distribution_limit)?)
        })?;
        if remaining > limit {
            debug!("raising rounded limit {} to remaining payouts {}", limit, remaining);
            limit = remaining;
        }
        let splits = if others.is_empty() {
            others
        } else {
            adjusted_split_percents(&others, self.distribution_limit, limit)?
        };

        self.splits = splits;
        self.distribution_limit = limit;
        Ok(removed)
    }

    fn unlocked(&self, index: usize) -> Result<&Split> {
        let split = self.splits.get(index).ok_or(ErrorCode::SplitNotFound(index))?;
        if split.is_locked(self.now) {
            return Err(ErrorCode::SplitLocked {
                index,
                locked_until: split.locked_until.unwrap_or_default(),
            });
        }
        Ok(split)
    }
}

/// Percent for a split paying `amount` of `limit` next to `others`.
/// Rounding dust that would push the group past 100% is taken from this
/// split.
fn settled_percent(others: &[Split], amount: Amount, limit: Amount) -> Result<SplitPercent> {
    let percent = percent_from_amount(amount, limit)?;
    let taken = total_split_percent(others)?;
    let remaining = SPLITS_TOTAL_PERCENT
        .checked_sub(taken)
        .ok_or(ErrorCode::SplitsExceedTotal {
            total: taken,
            max: SPLITS_TOTAL_PERCENT,
        })?;

    if percent.value() > remaining {
        debug!(
            "absorbing {} units of rounding dust into edited split",
            percent.value() - remaining
        );
        return SplitPercent::new(remaining);
    }
    Ok(percent)
}
