//! # Position Mapping
//!
//! Every mutation records which range it replaced. Positions captured before
//! a mutation are translated through these records to stay valid afterwards.

use serde::{Deserialize, Serialize};

/// Which side a position sticks to when content is inserted exactly at it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Before,
    After,
}

/// One replaced range: `old_size` positions at `start` became `new_size`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepMap {
    pub start: usize,
    pub old_size: usize,
    pub new_size: usize,
}

impl StepMap {
    pub const fn new(start: usize, old_size: usize, new_size: usize) -> Self {
        Self {
            start,
            old_size,
            new_size,
        }
    }

    /// A map that leaves every position unchanged
    pub const fn empty() -> Self {
        Self::new(0, 0, 0)
    }

    pub fn is_empty(&self) -> bool {
        self.old_size == 0 && self.new_size == 0
    }

    pub fn map(&self, pos: usize, assoc: Assoc) -> usize {
        let end = self.start + self.old_size;
        if pos < self.start {
            return pos;
        }
        if pos > end {
            return pos - self.old_size + self.new_size;
        }

        let side = if self.old_size == 0 {
            assoc
        } else if pos == self.start {
            Assoc::Before
        } else if pos == end {
            Assoc::After
        } else {
            assoc
        };

        match side {
            Assoc::Before => self.start,
            Assoc::After => self.start + self.new_size,
        }
    }

    /// Map the start of a node of `size` positions; `None` when the node was
    /// inside the replaced range
    pub fn map_node(&self, pos: usize, size: usize) -> Option<usize> {
        let end = self.start + self.old_size;
        if self.old_size > 0 && pos >= self.start && pos + size <= end {
            return None;
        }
        Some(self.map(pos, Assoc::After))
    }
}

/// Ordered list of step maps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    maps: Vec<StepMap>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, map: StepMap) {
        self.maps.push(map);
    }

    pub fn append(&mut self, other: &Mapping) {
        self.maps.extend_from_slice(&other.maps);
    }

    pub fn maps(&self) -> &[StepMap] {
        &self.maps
    }

    pub fn is_empty(&self) -> bool {
        self.maps.iter().all(StepMap::is_empty)
    }

    /// Map a position, sticking to content inserted after it
    pub fn map(&self, pos: usize) -> usize {
        self.maps
            .iter()
            .fold(pos, |pos, map| map.map(pos, Assoc::After))
    }

    /// Map a node's start position, or `None` once any step removed it
    pub fn map_node(&self, pos: usize, size: usize) -> Option<usize> {
        self.maps
            .iter()
            .try_fold(pos, |pos, map| map.map_node(pos, size))
    }
}
