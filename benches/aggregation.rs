use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use weekly_budget::{
    core::services::{PeriodService, SummaryService},
    currency::Money,
    ledger::{Expense, Ledger, PeriodKey, PeriodKind},
    storage::{load_ledger, save_ledger, MemorySlot},
};

fn build_sample_ledger(count: i64) -> Ledger {
    let categories = ["Food", "Transport", "Bills", "Entertainment", "Shopping", "Health", "Other"];
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let expenses = (0..count)
        .map(|idx| {
            Expense::new(
                1_700_000_000_000 + idx,
                Money::from_cents(500 + (idx * 37) % 20_000),
                categories[idx as usize % categories.len()],
                start + Duration::days(idx % 1_000),
            )
        })
        .collect();
    Ledger::from_parts(expenses, Money::from_cents(40_000))
}

fn bench_aggregation(c: &mut Criterion) {
    let ledger = build_sample_ledger(black_box(20_000));
    let week = PeriodKey::Week { week: 20, year: 2024 };
    let month = PeriodKey::Month { month: 4, year: 2024 };

    c.bench_function("aggregate_week_20k", |b| {
        b.iter(|| black_box(SummaryService::aggregate_period(ledger.expenses(), &week)))
    });

    c.bench_function("aggregate_month_20k", |b| {
        b.iter(|| black_box(SummaryService::aggregate_period(ledger.expenses(), &month)))
    });

    c.bench_function("enumerate_weeks_20k", |b| {
        b.iter(|| black_box(PeriodService::available(ledger.expenses(), PeriodKind::Weekly)))
    });
}

fn bench_codec(c: &mut Criterion) {
    let ledger = build_sample_ledger(black_box(20_000));
    let slot = MemorySlot::new();

    c.bench_function("ledger_save_20k", |b| {
        b.iter(|| save_ledger(&slot, &ledger).expect("save ledger"))
    });

    c.bench_function("ledger_load_20k", |b| {
        b.iter(|| black_box(load_ledger(&slot)))
    });
}

criterion_group!(benches, bench_aggregation, bench_codec);
criterion_main!(benches);
