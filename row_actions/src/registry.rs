// Copyright 2025 the Row Actions Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region registry: the live set of regions and peer closing.
//!
//! The registry owns every constructed, non-destroyed [`RegionController`]
//! and hands out generational [`RegionId`]s. Its one piece of policy is
//! [`close_all_except`](Registry::close_all_except), which keeps toolbars on
//! different rows from being visible at the same time.

use tracing::debug;

use crate::context::Context;
use crate::region::RegionController;
use crate::types::RegionId;

#[derive(Debug)]
struct Entry {
    generation: u32,
    region: RegionController,
}

/// Slot map of live regions.
#[derive(Debug, Default)]
pub struct Registry {
    entries: Vec<Option<Entry>>,
    generations: Vec<u32>, // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    live: usize,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live regions.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether no region is registered.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Add a region and return its id.
    pub fn register(&mut self, region: RegionController) -> RegionId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            // Slots on the free list never hold a saturated generation.
            let generation = self.generations[idx] + 1;
            self.generations[idx] = generation;
            (idx, generation)
        } else {
            self.entries.push(None);
            self.generations.push(1);
            (self.entries.len() - 1, 1)
        };
        self.entries[idx] = Some(Entry { generation, region });
        self.live += 1;
        RegionId::new(idx, generation)
    }

    /// Remove a region, returning it. `None` if `id` is stale or unknown.
    ///
    /// This only drops bookkeeping; cancelling the region's timers and tracker
    /// subscription is the caller's job (see
    /// [`Coordinator::destroy`](crate::coordinator::Coordinator::destroy)).
    pub fn unregister(&mut self, id: RegionId) -> Option<RegionController> {
        if !self.contains(id) {
            return None;
        }
        let entry = self.entries[id.idx()].take()?;
        // An exhausted slot is retired so a stale id can never match it again.
        if entry.generation < u32::MAX {
            self.free_list.push(id.idx());
        }
        self.live -= 1;
        Some(entry.region)
    }

    /// Whether `id` refers to a live region.
    pub fn contains(&self, id: RegionId) -> bool {
        matches!(
            self.entries.get(id.idx()),
            Some(Some(e)) if e.generation == id.generation()
        )
    }

    /// Borrow a live region.
    pub fn get(&self, id: RegionId) -> Option<&RegionController> {
        match self.entries.get(id.idx()) {
            Some(Some(e)) if e.generation == id.generation() => Some(&e.region),
            _ => None,
        }
    }

    /// Mutably borrow a live region.
    pub fn get_mut(&mut self, id: RegionId) -> Option<&mut RegionController> {
        match self.entries.get_mut(id.idx()) {
            Some(Some(e)) if e.generation == id.generation() => Some(&mut e.region),
            _ => None,
        }
    }

    /// Iterate live regions in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (RegionId, &RegionController)> + '_ {
        self.entries.iter().enumerate().filter_map(|(idx, slot)| {
            slot.as_ref()
                .map(|e| (RegionId::new(idx, e.generation), &e.region))
        })
    }

    /// Immediately close every region on a different row than `id`.
    ///
    /// Pending open timers on those peers are cancelled; open or closing peers
    /// drop straight to closed without the close debounce and release their
    /// tracker subscription. Regions sharing `id`'s row, and `id` itself, are
    /// untouched. Returns how many peers changed state; unknown ids close nothing.
    pub fn close_all_except(&mut self, id: RegionId, ctx: &mut Context) -> usize {
        let Some(row) = self.get(id).map(RegionController::row) else {
            return 0;
        };
        let mut closed = 0;
        for (idx, slot) in self.entries.iter_mut().enumerate() {
            let Some(entry) = slot else { continue };
            if entry.region.row() == row {
                continue;
            }
            let peer = RegionId::new(idx, entry.generation);
            if entry.region.close_now(peer, ctx) {
                closed += 1;
            }
        }
        if closed > 0 {
            debug!(region = ?id, closed, "closed peers on other rows");
        }
        closed
    }
}
