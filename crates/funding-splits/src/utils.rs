use ruint::aliases::U256;

use crate::state::Allocation;

fn widen(value: u128) -> U256 {
    U256::from_limbs([value as u64, (value >> 64) as u64, 0, 0])
}

fn narrow(value: U256) -> Option<u128> {
    let limbs = value.as_limbs();
    if limbs[2] != 0 || limbs[3] != 0 {
        return None;
    }
    Some(((limbs[1] as u128) << 64) | limbs[0] as u128)
}

/// `10^exp`, None past the u128 range
pub(crate) fn pow10(exp: u32) -> Option<u128> {
    10u128.checked_pow(exp)
}

/// `a * b / denominator` rounded down, with a 256-bit intermediate product
/// Returns None on a zero denominator or when the quotient does not fit u128
pub(crate) fn mul_div(a: u128, b: u128, denominator: u128) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let product = widen(a).checked_mul(widen(b))?;
    narrow(product / widen(denominator))
}

/// `a * b / denominator` rounded half-up
pub(crate) fn mul_div_round(a: u128, b: u128, denominator: u128) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let denominator = widen(denominator);
    let product = widen(a)
        .checked_mul(widen(b))?
        .checked_add(denominator / widen(2))?;
    narrow(product / denominator)
}

/// Calculate a split's share of the total amount, rounding down
/// Returns None on overflow or a zero scale
pub fn calculate_split_amount(total: u128, percent: u64, total_percent: u64) -> Option<u128> {
    mul_div(total, percent as u128, total_percent as u128)
}

/// Sum the fixed-point percents of an allocation group
/// Returns None on overflow
pub fn sum_split_percents<T: Allocation>(allocations: &[T]) -> Option<u64> {
    allocations
        .iter()
        .try_fold(0u64, |acc, a| acc.checked_add(a.percent_value()))
}

/// Parse an unsigned decimal string into an integer scaled by `10^decimals`.
/// Digits past `decimals` are rounded half-up. Signs, exponents and
/// separators are rejected.
pub(crate) fn parse_decimal(input: &str, decimals: u32) -> Option<u128> {
    let input = input.trim();
    let (whole, fraction) = match input.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (input, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let scale = pow10(decimals)?;
    let mut value = if whole.is_empty() {
        0u128
    } else {
        whole.parse::<u128>().ok()?.checked_mul(scale)?
    };

    let kept = fraction.len().min(decimals as usize);
    if kept > 0 {
        let digits = fraction[..kept].parse::<u128>().ok()?;
        let padding = pow10(decimals - kept as u32)?;
        value = value.checked_add(digits.checked_mul(padding)?)?;
    }

    // half-up on the first dropped digit
    if fraction.len() > kept && fraction.as_bytes()[kept] >= b'5' {
        value = value.checked_add(1)?;
    }

    Some(value)
}

/// Format an integer scaled by `10^decimals` as a plain decimal string with
/// trailing fractional zeros removed
pub(crate) fn format_decimal(value: u128, decimals: u32) -> String {
    let Some(scale) = pow10(decimals) else {
        return value.to_string();
    };
    let whole = value / scale;
    let fraction = value % scale;
    if fraction == 0 {
        return whole.to_string();
    }
    let fraction = format!("{:0width$}", fraction, width = decimals as usize);
    format!("{}.{}", whole, fraction.trim_end_matches('0'))
}

/// Round a value scaled by `10^decimals` to `keep` decimals, half-up
pub(crate) fn round_decimals(value: u128, decimals: u32, keep: u32) -> Option<u128> {
    if keep >= decimals {
        return Some(value);
    }
    let unit = pow10(decimals - keep)?;
    let rounded = value.checked_add(unit / 2)? / unit;
    rounded.checked_mul(unit)
}
