//! Tests for amount-first payout editing

mod helpers;

use {
    funding_splits::{
        constants::SPLITS_TOTAL_PERCENT, distributions::total_split_percent, payouts::PayoutsEditor,
        Amount, ErrorCode, Split,
    },
    helpers::{amount, split, split_percent},
};

const NOW: u64 = 1_700_000_000;

fn even_pair() -> PayoutsEditor {
    PayoutsEditor::new(vec![split(1, 50.0), split(2, 50.0)], amount("1000"), NOW)
}

fn locked_split(seed: u8, percentage: f64, until: u64) -> Split {
    Split {
        locked_until: Some(until),
        ..split(seed, percentage)
    }
}

#[test]
fn test_amount_of() {
    let editor = even_pair();
    assert_eq!(editor.amount_of(0).unwrap(), amount("500"));
    assert_eq!(editor.amount_of(2), Err(ErrorCode::SplitNotFound(2)));
}

#[test]
fn test_add_split_grows_limit() {
    let mut editor = even_pair();
    let index = editor.add_split(split(3, 0.0), amount("250")).unwrap();

    assert_eq!(index, 2);
    assert_eq!(editor.distribution_limit(), amount("1250"));
    assert_eq!(editor.splits()[0].percent, split_percent(40.0));
    assert_eq!(editor.splits()[1].percent, split_percent(40.0));
    assert_eq!(editor.splits()[2].percent, split_percent(20.0));

    // existing payees keep their amounts
    assert_eq!(editor.amount_of(0).unwrap(), amount("500"));
    assert_eq!(editor.amount_of(1).unwrap(), amount("500"));
    assert_eq!(editor.amount_of(2).unwrap(), amount("250"));
    assert_eq!(editor.total_percentage(), 100.0);
}

#[test]
fn test_add_split_to_empty_editor() {
    let mut editor = PayoutsEditor::new(vec![], Amount::ZERO, NOW);
    editor.add_split(split(1, 0.0), amount("42")).unwrap();

    assert_eq!(editor.distribution_limit(), amount("42"));
    assert_eq!(editor.splits()[0].percent, split_percent(100.0));
}

#[test]
fn test_add_split_zero_amount_fails() {
    let mut editor = even_pair();
    assert_eq!(
        editor.add_split(split(3, 0.0), Amount::ZERO),
        Err(ErrorCode::ZeroPercentage)
    );
    // sub-precision amounts round away to nothing
    assert_eq!(
        editor.add_split(split(3, 0.0), amount("0.00004")),
        Err(ErrorCode::ZeroPercentage)
    );
    assert_eq!(editor.splits().len(), 2);
}

#[test]
fn test_edit_split_amount() {
    let mut editor = even_pair();
    editor.edit_split_amount(0, amount("300")).unwrap();

    assert_eq!(editor.distribution_limit(), amount("800"));
    assert_eq!(editor.splits()[0].percent, split_percent(37.5));
    assert_eq!(editor.splits()[1].percent, split_percent(62.5));
    assert_eq!(editor.amount_of(0).unwrap(), amount("300"));
    assert_eq!(editor.amount_of(1).unwrap(), amount("500"));
}

#[test]
fn test_edit_split_keeps_position_and_fields() {
    let mut editor = PayoutsEditor::new(
        vec![split(1, 20.0), split(2, 30.0), split(3, 50.0)],
        amount("100"),
        NOW,
    );
    editor.edit_split_amount(1, amount("130")).unwrap();

    let beneficiaries: Vec<_> = editor.splits().iter().map(|s| s.beneficiary).collect();
    assert_eq!(
        beneficiaries,
        vec![split(1, 0.0).beneficiary, split(2, 0.0).beneficiary, split(3, 0.0).beneficiary]
    );
    assert_eq!(editor.distribution_limit(), amount("200"));
    assert_eq!(editor.splits()[0].percent, split_percent(10.0));
    assert_eq!(editor.splits()[1].percent, split_percent(65.0));
    assert_eq!(editor.amount_of(1).unwrap(), amount("130"));
}

#[test]
fn test_remove_split_shrinks_limit() {
    let mut editor = even_pair();
    let removed = editor.remove_split(1).unwrap();

    assert_eq!(removed, split(2, 50.0));
    assert_eq!(editor.distribution_limit(), amount("500"));
    assert_eq!(editor.splits().len(), 1);
    assert_eq!(editor.splits()[0].percent, split_percent(100.0));
}

#[test]
fn test_remove_last_split() {
    let mut editor = PayoutsEditor::new(vec![split(1, 100.0)], amount("10"), NOW);
    editor.remove_split(0).unwrap();
    assert!(editor.splits().is_empty());
    assert_eq!(editor.distribution_limit(), Amount::ZERO);
}

#[test]
fn test_locked_split_cannot_change() {
    let mut editor = PayoutsEditor::new(
        vec![locked_split(1, 50.0, NOW + 1), split(2, 50.0)],
        amount("1000"),
        NOW,
    );
    let locked = Err(ErrorCode::SplitLocked {
        index: 0,
        locked_until: NOW + 1,
    });

    assert_eq!(editor.edit_split_amount(0, amount("10")), locked);
    assert_eq!(editor.remove_split(0).map(|_| ()), locked);

    // unlocked neighbours still move around it
    editor.edit_split_amount(1, amount("1500")).unwrap();
    assert_eq!(editor.amount_of(0).unwrap(), amount("500"));
    assert_eq!(editor.splits()[0].locked_until, Some(NOW + 1));
}

#[test]
fn test_expired_lock_allows_edit() {
    let mut editor = PayoutsEditor::new(vec![locked_split(1, 100.0, NOW)], amount("10"), NOW);
    editor.edit_split_amount(0, amount("20")).unwrap();
    assert_eq!(editor.distribution_limit(), amount("20"));
}

#[test]
fn test_missing_index_fails() {
    let mut editor = even_pair();
    assert_eq!(
        editor.edit_split_amount(5, amount("1")),
        Err(ErrorCode::SplitNotFound(5))
    );
    assert_eq!(editor.remove_split(2).map(|_| ()), Err(ErrorCode::SplitNotFound(2)));
}

#[test]
fn test_set_distribution_limit_keeps_amounts() {
    let mut editor = PayoutsEditor::new(vec![split(1, 25.0)], amount("1000"), NOW);
    editor.set_distribution_limit(amount("500")).unwrap();

    assert_eq!(editor.splits()[0].percent, split_percent(50.0));
    assert_eq!(editor.amount_of(0).unwrap(), amount("250"));
}

#[test]
fn test_set_distribution_limit_without_splits() {
    let mut editor = PayoutsEditor::new(vec![], amount("1000"), NOW);
    editor.set_distribution_limit(Amount::ZERO).unwrap();
    assert_eq!(editor.distribution_limit(), Amount::ZERO);
}

#[test]
fn test_set_distribution_limit_zero_with_splits_fails() {
    let mut editor = even_pair();
    assert_eq!(
        editor.set_distribution_limit(Amount::ZERO),
        Err(ErrorCode::ZeroDistributionLimit)
    );
    assert_eq!(editor.distribution_limit(), amount("1000"));
}

#[test]
fn test_uneven_amounts_never_exceed_total() {
    let mut editor = PayoutsEditor::new(vec![], Amount::ZERO, NOW);
    for (seed, value) in [(1, "1"), (2, "1"), (3, "1"), (4, "333.3333"), (5, "0.0001")] {
        editor.add_split(split(seed, 0.0), amount(value)).unwrap();
        assert!(total_split_percent(editor.splits()).unwrap() <= SPLITS_TOTAL_PERCENT);
    }

    editor.edit_split_amount(2, amount("1234.5678")).unwrap();
    editor.remove_split(0).unwrap();
    editor.edit_split_amount(3, amount("7")).unwrap();

    assert!(total_split_percent(editor.splits()).unwrap() <= SPLITS_TOTAL_PERCENT);
    assert_eq!(editor.validate(), Ok(()));
}
