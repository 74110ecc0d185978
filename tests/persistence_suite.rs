mod common;

use std::fs;

use weekly_budget::{
    core::errors::BudgetError,
    currency::Money,
    ledger::Ledger,
    storage::{JsonFileSlot, LoadSource, PersistenceSlot, BUDGET_KEY, EXPENSES_KEY},
};

#[test]
fn first_run_starts_from_seed_and_writes_nothing() {
    let base = common::temp_base();
    let manager = common::open_manager(&base);
    assert_eq!(manager.load_report().source, LoadSource::Seeded);
    assert_eq!(manager.ledger(), &Ledger::seed());
    assert!(!base.join("slot").join("expenses.json").exists());
}

#[test]
fn file_slot_round_trip_reproduces_ledger() {
    let (mut manager, _config, base) = common::setup_test_env();
    manager.set_budget("150.25").unwrap();
    manager.add_expense("19.99", "Entertainment", Some("2025-10-30")).unwrap();
    manager.add_expense("5", "Food", None).unwrap();

    let reopened = common::open_manager(&base);
    assert_eq!(reopened.load_report().source, LoadSource::Persisted);
    assert!(reopened.load_report().warnings.is_empty());
    assert_eq!(reopened.ledger(), manager.ledger());
    assert_eq!(reopened.ledger().weekly_budget(), Money::from_cents(15_025));
}

#[test]
fn persisted_layout_uses_original_keys() {
    let (mut manager, _config, base) = common::setup_test_env();
    manager.set_budget("80").unwrap();
    let slot_dir = base.join("slot");
    assert_eq!(fs::read_to_string(slot_dir.join("weeklyBudget.json")).unwrap(), "80.00");
    let expenses: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(slot_dir.join("expenses.json")).unwrap()).unwrap();
    assert_eq!(expenses[0]["id"], 1678888800000i64);
    assert_eq!(expenses[0]["amount"], 50.0);
    assert_eq!(expenses[0]["date"], "2025-10-29");
}

#[test]
fn corrupt_expense_file_falls_back_to_seed() {
    let base = common::temp_base();
    let slot = JsonFileSlot::new(base.join("slot")).unwrap();
    slot.save(EXPENSES_KEY, "[{\"id\": 1, \"amount\": \"lots\"}]").unwrap();
    slot.save(BUDGET_KEY, "120").unwrap();

    let manager = common::open_manager(&base);
    assert_eq!(manager.load_report().source, LoadSource::Seeded);
    assert_eq!(manager.load_report().warnings.len(), 1);
    assert_eq!(manager.ledger().expenses(), Ledger::seed().expenses());
    assert_eq!(manager.ledger().weekly_budget(), Money::from_cents(12_000));
}

#[test]
fn failed_save_preserves_previous_file() {
    let (mut manager, _config, base) = common::setup_test_env();
    manager.set_budget("60").unwrap();
    let budget_path = base.join("slot").join("weeklyBudget.json");

    // A directory in place of the temp file makes File::create fail.
    fs::create_dir_all(base.join("slot").join("weeklyBudget.json.tmp")).unwrap();
    let err = manager.set_budget("75").unwrap_err();
    assert!(matches!(err, BudgetError::Storage(_)));
    assert_eq!(manager.ledger().weekly_budget(), Money::from_cents(7_500));
    assert_eq!(fs::read_to_string(&budget_path).unwrap(), "60.00");
}
