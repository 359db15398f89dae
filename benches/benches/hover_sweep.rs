// Copyright 2025 the Row Actions Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use row_actions::host::LayoutHost;
use row_actions::types::RowKey;
use row_actions::{Coordinator, RegionConfig, RegionId};

const ROW_HEIGHT: f64 = 48.0;

struct Table {
    rows: u64,
}

impl LayoutHost for Table {
    fn row_rect(&self, row: RowKey) -> Option<Rect> {
        (row.0 < self.rows).then(|| {
            let y = row.0 as f64 * ROW_HEIGHT;
            Rect::new(0.0, y, 1200.0, y + ROW_HEIGHT)
        })
    }
}

fn table(rows: u64, per_row: u64) -> (Coordinator<Table>, Vec<RegionId>) {
    let mut c = Coordinator::new(Table { rows });
    let mut ids = Vec::with_capacity((rows * per_row) as usize);
    for row in 0..rows {
        for _ in 0..per_row {
            ids.push(c.create_region(RegionConfig::new(), Some(RowKey(row))));
        }
    }
    (c, ids)
}

/// Sweep the pointer down the table, settling on each row long enough to open it.
fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep");
    for &rows in &[16u64, 128, 1024] {
        group.throughput(Throughput::Elements(rows));
        group.bench_function(format!("settle_each_row_n{}", rows), |b| {
            b.iter_batched(
                || table(rows, 2),
                |(mut c, _)| {
                    for row in 0..rows {
                        let y = row as f64 * ROW_HEIGHT + ROW_HEIGHT / 2.0;
                        c.pointer_moved(Point::new(600.0, y));
                        c.row_hovered(RowKey(row));
                        c.advance_by(Duration::from_millis(60));
                    }
                    black_box(c.visible_regions().len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

/// Fast flicks across rows: every hover cancels the previous row's pending open.
fn bench_flick(c: &mut Criterion) {
    let mut group = c.benchmark_group("flick");
    for &rows in &[16u64, 128, 1024] {
        group.throughput(Throughput::Elements(rows));
        group.bench_function(format!("cross_rows_n{}", rows), |b| {
            b.iter_batched(
                || table(rows, 1),
                |(mut c, ids)| {
                    for &id in &ids {
                        c.row_pointer_move(id);
                        c.advance_by(Duration::from_millis(5));
                    }
                    black_box(c.next_deadline());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_pointer_samples(c: &mut Criterion) {
    let mut group = c.benchmark_group("pointer");
    let (mut coord, ids) = table(64, 1);
    coord.row_pointer_move(ids[10]);
    coord.advance_by(Duration::from_millis(50));
    let inside = Point::new(600.0, 10.0 * ROW_HEIGHT + 4.0);
    group.bench_function("sample_open_row", |b| {
        b.iter(|| {
            coord.pointer_moved(black_box(inside));
        })
    });
    group.finish();
}

criterion_group!(benches, bench_sweep, bench_flick, bench_pointer_samples);
criterion_main!(benches);
