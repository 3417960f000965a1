//! Funding-cycle estimates shown next to the pay and redeem forms.

use serde::{Deserialize, Serialize};

use crate::{
    amount::Amount,
    constants::{MAX_REDEMPTION_RATE, MAX_RESERVED_RATE, WAD},
    errors::{ErrorCode, Result},
    percent::Permyriad,
    utils::mul_div,
};

/// Which side of a payment's token issuance to report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssuanceRecipient {
    Payer,
    Reserved,
}

/// Tokens issued for paying `amount` into a cycle with `weight` (tokens per
/// currency unit, as a wad), split by `reserved_rate` between the payer and
/// the reserved list
pub fn weighted_amount(
    weight: Amount,
    reserved_rate: Permyriad,
    amount: Amount,
    recipient: IssuanceRecipient,
) -> Result<Amount> {
    let tokens = mul_div(weight.wei(), amount.wei(), WAD).ok_or(ErrorCode::MathOverflow)?;
    let share = match recipient {
        IssuanceRecipient::Payer => reserved_rate.complement(),
        IssuanceRecipient::Reserved => reserved_rate,
    };
    mul_div(tokens, share.value() as u128, MAX_RESERVED_RATE as u128)
        .map(Amount::from_wei)
        .ok_or(ErrorCode::MathOverflow)
}

/// Overflow reclaimable by redeeming `token_count` of `total_supply` on the
/// cycle's bonding curve. At a 100% redemption rate every token is worth the
/// same; lower rates favour holders who redeem later.
pub fn reclaimable_overflow(
    overflow: Amount,
    token_count: Amount,
    total_supply: Amount,
    redemption_rate: Permyriad,
) -> Result<Amount> {
    if token_count.is_zero() || total_supply.is_zero() || overflow.is_zero() {
        return Ok(Amount::ZERO);
    }
    if token_count > total_supply {
        return Err(ErrorCode::TokenCountExceedsSupply {
            count: token_count.to_string(),
            supply: total_supply.to_string(),
        });
    }

    let base = mul_div(overflow.wei(), token_count.wei(), total_supply.wei())
        .ok_or(ErrorCode::MathOverflow)?;
    if redemption_rate == Permyriad::FULL {
        return Ok(Amount::from_wei(base));
    }

    let rate = redemption_rate.value() as u128;
    let curve = mul_div(
        token_count.wei(),
        MAX_REDEMPTION_RATE as u128 - rate,
        total_supply.wei(),
    )
    .ok_or(ErrorCode::MathOverflow)?;

    mul_div(base, rate + curve, MAX_REDEMPTION_RATE as u128)
        .map(Amount::from_wei)
        .ok_or(ErrorCode::MathOverflow)
}
