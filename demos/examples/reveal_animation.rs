// Copyright 2025 the Row Actions Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reveal geometry for leading and trailing toolbars.
//!
//! Measures two regions in the same row, one at the start of its cell and one
//! after the cell content, opens them, and prints the placement and a few
//! frames of each clip-inset reveal.
//!
//! Run:
//! - `cargo run -p row_actions_demos --example reveal_animation`

use core::time::Duration;

use kurbo::Rect;
use row_actions::host::LayoutHost;
use row_actions::types::{RegionId, RowKey};
use row_actions::{ContainerInfo, Coordinator, RegionConfig};
use row_actions_placement::ContainerPadding;
use tracing_subscriber::EnvFilter;

struct Table;

impl LayoutHost for Table {
    fn row_rect(&self, _row: RowKey) -> Option<Rect> {
        Some(Rect::new(0.0, 0.0, 720.0, 56.0))
    }

    fn container_padding(&self, _region: RegionId) -> ContainerPadding {
        ContainerPadding::new(16.0, 16.0)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut c = Coordinator::new(Table);
    let leading = c.create_region(RegionConfig::new(), Some(RowKey(0)));
    let trailing = c.create_region(RegionConfig::new(), Some(RowKey(0)));
    let still = c.create_region(RegionConfig::new().with_animation_disabled(true), Some(RowKey(0)));
    c.measure(leading, Some(ContainerInfo::FIRST_CHILD));
    c.measure(trailing, Some(ContainerInfo::AFTER_CONTENT));
    c.measure(still, Some(ContainerInfo::AFTER_CONTENT));

    c.row_hovered(RowKey(0));
    c.advance_by(Duration::from_millis(50));

    for (name, id) in [("leading", leading), ("trailing", trailing), ("still", still)] {
        let Some(r) = c.region(id) else { continue };
        println!("== {name} ==");
        println!(
            "  state={:?} anchor={:?} alignment={:?} toolbar_height={}",
            r.state(),
            r.anchor_side(),
            r.alignment(),
            r.toolbar_height()
        );
        println!("  host adjustment: {:?}", r.host_adjustment());
        match r.reveal() {
            Some(reveal) => {
                for ms in [0_u64, 50, 125, 200, 250] {
                    let clip = reveal.clip_at(Duration::from_millis(ms));
                    println!("  enter t={ms:>3}ms  clip={clip:?}");
                }
                let exit = reveal.exit();
                let clip = exit.clip_at(Duration::from_millis(125));
                println!("  exit  t=125ms  clip={clip:?}");
            }
            None => println!("  no reveal animation"),
        }
    }
}
