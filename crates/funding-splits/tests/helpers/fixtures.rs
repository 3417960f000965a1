//! Builders for addresses, amounts and splits

use funding_splits::{Address, Amount, PayoutMod, Permyriad, Split, SplitPercent, TicketMod};

/// Deterministic non-zero address derived from `seed`
pub fn address(seed: u8) -> Address {
    let mut bytes = [0u8; 20];
    bytes[0] = 0xab;
    bytes[19] = seed;
    Address::new(bytes)
}

pub fn amount(value: &str) -> Amount {
    Amount::parse(value).unwrap()
}

pub fn split_percent(percentage: f64) -> SplitPercent {
    SplitPercent::from_percentage(percentage).unwrap()
}

/// Plain wallet split
pub fn split(seed: u8, percentage: f64) -> Split {
    Split {
        beneficiary: Some(address(seed)),
        percent: split_percent(percentage),
        ..Split::default()
    }
}

/// Split paying another project
pub fn project_split(project_id: u64, percentage: f64) -> Split {
    Split {
        project_id: Some(project_id),
        percent: split_percent(percentage),
        ..Split::default()
    }
}

pub fn payout_mod(seed: u8, percentage: f64) -> PayoutMod {
    PayoutMod {
        beneficiary: Some(address(seed)),
        percent: Permyriad::from_percentage(percentage).unwrap(),
        ..PayoutMod::default()
    }
}

pub fn ticket_mod(seed: u8, percentage: f64) -> TicketMod {
    TicketMod {
        beneficiary: Some(address(seed)),
        percent: Permyriad::from_percentage(percentage).unwrap(),
        ..TicketMod::default()
    }
}

/// Absolute difference between two amounts in wei
pub fn wei_diff(a: Amount, b: Amount) -> u128 {
    a.wei().abs_diff(b.wei())
}
