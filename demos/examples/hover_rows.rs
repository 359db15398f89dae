// Copyright 2025 the Row Actions Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer walk over a small table.
//!
//! Drives a [`Coordinator`] through a scripted pointer path and prints which
//! row's toolbar is visible at each step. Set `RUST_LOG=row_actions=debug` to
//! see every region transition and listener change.
//!
//! Run:
//! - `cargo run -p row_actions_demos --example hover_rows`

use core::time::Duration;

use kurbo::{Point, Rect};
use row_actions::host::LayoutHost;
use row_actions::types::{ListenerChange, RegionId, RowKey};
use row_actions::{ContainerInfo, Coordinator, CoordinatorConfig, RegionConfig, Variant};
use tracing::info;
use tracing_subscriber::EnvFilter;

const ROW_HEIGHT: f64 = 52.0;

struct Table {
    rows: u64,
}

impl LayoutHost for Table {
    fn row_rect(&self, row: RowKey) -> Option<Rect> {
        (row.0 < self.rows).then(|| {
            let y = row.0 as f64 * ROW_HEIGHT;
            Rect::new(0.0, y, 640.0, y + ROW_HEIGHT)
        })
    }

    fn pointer_listener(&mut self, change: ListenerChange) {
        info!(?change, "document pointer listener");
    }
}

/// Which row the pointer is over, if any.
fn row_at(p: Point, rows: u64) -> Option<RowKey> {
    if p.x < 0.0 || p.x > 640.0 || p.y < 0.0 {
        return None;
    }
    let row = (p.y / ROW_HEIGHT) as u64;
    (row < rows).then_some(RowKey(row))
}

fn describe(c: &Coordinator<Table>, ids: &[RegionId]) -> String {
    let open: Vec<String> = ids
        .iter()
        .filter_map(|&id| c.region(id).map(|r| (id, r)))
        .filter(|(_, r)| r.is_visible())
        .map(|(_, r)| format!("row {} ({:?})", r.row().map_or(0, |k| k.0), r.state()))
        .collect();
    if open.is_empty() {
        "nothing visible".into()
    } else {
        open.join(", ")
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config: CoordinatorConfig =
        serde_json::from_str(r#"{ "timing": { "open_delay_ms": 50, "close_delay_ms": 80 } }"#)
            .expect("valid coordinator config");
    let rows = 4;
    let mut c = Coordinator::with_config(Table { rows }, config);

    let mut ids = Vec::new();
    for row in 0..rows {
        let variant = if row % 2 == 0 {
            Variant::Default
        } else {
            Variant::Tonal
        };
        let id = c.create_region(RegionConfig::new().with_variant(variant), Some(RowKey(row)));
        c.measure(id, Some(ContainerInfo::AFTER_CONTENT));
        ids.push(id);
    }

    // (time in ms, pointer position)
    let path = [
        (0, Point::new(300.0, 20.0)),
        (20, Point::new(300.0, 30.0)),
        (70, Point::new(300.0, 40.0)),
        (120, Point::new(300.0, 60.0)),
        (130, Point::new(300.0, 64.0)),
        (190, Point::new(300.0, 120.0)),
        (200, Point::new(300.0, 110.0)),
        (260, Point::new(700.0, 110.0)),
        (300, Point::new(300.0, 110.0)),
        (320, Point::new(700.0, 300.0)),
        (450, Point::new(700.0, 300.0)),
    ];

    println!("== Pointer walk ==");
    for (ms, p) in path {
        c.advance_to(Duration::from_millis(ms));
        c.pointer_moved(p);
        if let Some(row) = row_at(p, rows) {
            c.row_hovered(row);
        }
        println!(
            "  t={:>3}ms  pointer=({:>5.1}, {:>5.1})  {}",
            ms,
            p.x,
            p.y,
            describe(&c, &ids)
        );
    }

    let visible = c.visible_regions();
    assert!(visible.is_empty(), "pointer left the table: {visible:?}");

    for id in ids {
        c.destroy(id);
    }
    assert!(c.context().timers().is_empty());
    assert!(!c.context().tracker().is_listening());
}
