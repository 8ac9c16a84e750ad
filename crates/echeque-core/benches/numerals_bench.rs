// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for Arabic numeral expansion in the echeque-core crate.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use echeque_core::numerals::{amount_to_words, to_words};

/// Nine-digit amount touching every magnitude.
fn bench_to_words_large(c: &mut Criterion) {
    c.bench_function("to_words (987,654,321)", |b| {
        b.iter(|| black_box(to_words(black_box(987_654_321))));
    });
}

/// A spread of typical check amounts, fractional part included.
fn bench_amount_to_words(c: &mut Criterion) {
    let amounts: Vec<Decimal> = ["15", "200", "1500.75", "2500000", "99999.99"]
        .iter()
        .map(|s| s.parse().expect("decimal literal"))
        .collect();

    c.bench_function("amount_to_words (5 amounts)", |b| {
        b.iter(|| {
            for amount in &amounts {
                black_box(amount_to_words(*amount));
            }
        });
    });
}

criterion_group!(benches, bench_to_words_large, bench_amount_to_words);
criterion_main!(benches);
