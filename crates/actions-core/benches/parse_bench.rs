//! Criterion benchmarks for request parsing and key data lookup.
//!
//! Parsing runs on every perform-actions command before the first event is
//! dispatched, so it sits directly on the command latency path.
//!
//! Run with:
//! ```bash
//! cargo bench --package actions-core --bench parse_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use actions_core::keymap;
use actions_core::{parse_chain, ElementRef, InputState};
use serde_json::{json, Value};

// ── Representative payloads ───────────────────────────────────────────────────

/// Keyboard + mouse drag, the shape most test suites send.
fn drag_with_shift() -> Value {
    json!([
        {
            "id": "kbd",
            "type": "key",
            "actions": [
                { "type": "keyDown", "value": "\u{E008}" },
                { "type": "pause" },
                { "type": "pause" },
                { "type": "keyUp", "value": "\u{E008}" },
            ],
        },
        {
            "id": "mouse",
            "type": "pointer",
            "actions": [
                { "type": "pointerMove", "x": 10, "y": 10 },
                { "type": "pointerDown", "button": 0 },
                { "type": "pointerMove", "x": 200, "y": 150, "duration": 300 },
                { "type": "pointerUp", "button": 0 },
            ],
        },
    ])
}

/// A pinch gesture on `fingers` touch pointers.
fn pinch(fingers: usize) -> Value {
    let sequences: Vec<Value> = (0..fingers)
        .map(|i| {
            json!({
                "id": format!("finger{i}"),
                "type": "pointer",
                "parameters": { "pointerType": "touch" },
                "actions": [
                    { "type": "pointerMove", "x": 100 + i * 10, "y": 100 },
                    { "type": "pointerDown", "button": 0, "width": 4, "height": 4, "pressure": 0.6 },
                    { "type": "pointerMove", "x": 100 + i * 40, "y": 100, "duration": 250 },
                    { "type": "pointerUp", "button": 0 },
                ],
            })
        })
        .collect();
    Value::Array(sequences)
}

// ── Benchmarks: chain parsing ─────────────────────────────────────────────────

fn bench_parse_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_chain");

    let drag = drag_with_shift();
    group.bench_function("drag_with_shift", |b| {
        b.iter(|| {
            let mut state = InputState::new();
            parse_chain(&mut state, black_box(&drag), &ElementRef::from_web_element)
        })
    });

    for fingers in [2usize, 5, 10] {
        let payload = pinch(fingers);
        group.bench_with_input(BenchmarkId::new("pinch", fingers), &payload, |b, payload| {
            b.iter(|| {
                let mut state = InputState::new();
                parse_chain(&mut state, black_box(payload), &ElementRef::from_web_element)
            })
        });
    }

    group.finish();
}

// ── Benchmarks: key data ──────────────────────────────────────────────────────

const BENCH_KEYS: &[&str] = &[
    "a", "Z", "1", "!", " ", "\u{E006}", "\u{E008}", "\u{E050}", "\u{E03D}", "\u{E01A}",
    "\u{E05D}", "€",
];

fn bench_key_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("keymap");

    group.bench_function("key_data_single", |b| {
        b.iter(|| keymap::key_data(black_box("\u{E008}")))
    });

    group.bench_function("key_data_batch_12", |b| {
        b.iter(|| {
            BENCH_KEYS
                .iter()
                .map(|&key| keymap::key_data(black_box(key)))
                .collect::<Vec<_>>()
        })
    });

    group.bench_function("shifted_key_batch_12", |b| {
        b.iter(|| {
            BENCH_KEYS
                .iter()
                .map(|&key| keymap::shifted_key(black_box(key)))
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_parse_chain, bench_key_data);
criterion_main!(benches);
