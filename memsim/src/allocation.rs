//! Contiguous allocation over a fixed table of unit blocks.
//!
//! A request for `size` units is placed on a run of `size` consecutive free
//! blocks chosen by a [`FitStrategy`]. Placement only flips the free flags;
//! it never links the blocks to a process.

use std::fmt;

use log::{debug, warn};
use rand::Rng;

use crate::block::MemoryBlock;
use crate::error::{Error, Result};

/// Placement policy for an allocation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FitStrategy {
    First,
    Best,
    Worst,
    /// A name that matches no strategy. Allocating with it touches nothing.
    Unrecognized(String),
}

impl FitStrategy {
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "first" => FitStrategy::First,
            "best" => FitStrategy::Best,
            "worst" => FitStrategy::Worst,
            _ => FitStrategy::Unrecognized(name.to_owned()),
        }
    }
}

impl From<&str> for FitStrategy {
    fn from(name: &str) -> Self {
        FitStrategy::parse(name)
    }
}

impl fmt::Display for FitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitStrategy::First => write!(f, "first"),
            FitStrategy::Best => write!(f, "best"),
            FitStrategy::Worst => write!(f, "worst"),
            FitStrategy::Unrecognized(name) => write!(f, "{}", name),
        }
    }
}

pub struct AllocationTable<const BLOCK_COUNT: usize> {
    blocks: [MemoryBlock; BLOCK_COUNT],
}

impl<const BLOCK_COUNT: usize> AllocationTable<BLOCK_COUNT> {
    pub fn new() -> Self {
        AllocationTable {
            blocks: std::array::from_fn(MemoryBlock::new),
        }
    }

    pub fn blocks(&self) -> &[MemoryBlock] {
        &self.blocks
    }

    pub fn allocated_count(&self) -> usize {
        self.blocks.iter().filter(|b| !b.is_free()).count()
    }

    pub fn free_count(&self) -> usize {
        BLOCK_COUNT - self.allocated_count()
    }

    /// Length of the longest run of consecutive free blocks.
    pub fn largest_free_run(&self) -> usize {
        (0..BLOCK_COUNT).map(|start| self.free_run_at(start)).max().unwrap_or(0)
    }

    /// Places `size` units and returns the id of the first block of the run.
    ///
    /// `None` means no run fits, `size` is zero, or the strategy is
    /// unrecognized. In all three cases the table is untouched.
    pub fn allocate(&mut self, size: usize, strategy: &FitStrategy) -> Option<usize> {
        if size == 0 || size > BLOCK_COUNT {
            debug!("allocation: no window of {} units in {} blocks", size, BLOCK_COUNT);
            return None;
        }

        let start = match strategy {
            FitStrategy::First => self.first_fit(size),
            FitStrategy::Best => self.best_fit(size),
            FitStrategy::Worst => self.worst_fit(size),
            FitStrategy::Unrecognized(name) => {
                warn!("allocation: unrecognized strategy {:?}, nothing placed", name);
                None
            }
        }?;

        for block in &mut self.blocks[start..start + size] {
            block.set_free(false);
        }

        debug!("allocation: {} fit placed {} units at block {}", strategy, size, start);

        Some(start)
    }

    /// Frees exactly one block, whatever the size of the run it came from.
    pub fn deallocate(&mut self, block_id: usize) -> Result<()> {
        let block = self.blocks.get_mut(block_id).ok_or(Error::BlockOutOfRange {
            block_id,
            block_count: BLOCK_COUNT,
        })?;

        block.set_free(true);

        Ok(())
    }

    /// Reclaims each allocated block with independent `probability`.
    /// Returns how many blocks were reclaimed.
    pub fn garbage_collect<R: Rng>(&mut self, rng: &mut R, probability: f64) -> usize {
        let mut collected = 0;

        for block in self.blocks.iter_mut() {
            if !block.is_free() && rng.gen::<f64>() < probability {
                block.set_free(true);
                collected += 1;
            }
        }

        collected
    }

    pub fn reset(&mut self) {
        self.blocks = std::array::from_fn(MemoryBlock::new);
    }

    /// Number of consecutive free blocks beginning at `start`.
    fn free_run_at(&self, start: usize) -> usize {
        self.blocks[start..].iter().take_while(|b| b.is_free()).count()
    }

    fn first_fit(&self, size: usize) -> Option<usize> {
        (0..=BLOCK_COUNT - size).find(|&start| {
            self.blocks[start..start + size].iter().all(MemoryBlock::is_free)
        })
    }

    fn best_fit(&self, size: usize) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;

        for start in 0..=BLOCK_COUNT - size {
            let run = self.free_run_at(start);

            if run < size {
                continue;
            }

            let waste = run - size;

            if best.map_or(true, |(_, min_waste)| waste < min_waste) {
                best = Some((start, waste));
            }
        }

        best.map(|(start, _)| start)
    }

    fn worst_fit(&self, size: usize) -> Option<usize> {
        let mut worst: Option<(usize, usize)> = None;

        for start in 0..=BLOCK_COUNT - size {
            let run = self.free_run_at(start);

            if run >= size && worst.map_or(true, |(_, max_run)| run > max_run) {
                worst = Some((start, run));
            }
        }

        worst.map(|(start, _)| start)
    }
}

impl<const BLOCK_COUNT: usize> Default for AllocationTable<BLOCK_COUNT> {
    fn default() -> Self {
        Self::new()
    }
}
