use std::collections::BTreeSet;

use log::info;

use crate::config::{SEEDED_RESIDENT, SEEDED_SWAPPED};
use crate::error::{Error, Result};

/// Which processes sit in RAM and which in swap space.
///
/// An identifier is in at most one of the two sets.
#[derive(Debug, Clone)]
pub struct SwapRegistry {
    resident: BTreeSet<String>,
    swapped: BTreeSet<String>,
}

impl SwapRegistry {
    pub fn new() -> Self {
        SwapRegistry {
            resident: BTreeSet::new(),
            swapped: BTreeSet::new(),
        }
    }

    /// Registry holding the placeholder processes of a fresh engine.
    pub fn seeded() -> Self {
        SwapRegistry {
            resident: SEEDED_RESIDENT.iter().map(|id| id.to_string()).collect(),
            swapped: SEEDED_SWAPPED.iter().map(|id| id.to_string()).collect(),
        }
    }

    pub fn swap_out(&mut self, id: &str) -> Result<String> {
        if !self.resident.remove(id) {
            return Err(Error::NotInRam(id.to_owned()));
        }

        self.swapped.insert(id.to_owned());
        info!("swap: {} moved to swap space", id);

        Ok(format!("✅ Process {} swapped out to disk successfully!", id))
    }

    pub fn swap_in(&mut self, id: &str) -> Result<String> {
        if !self.swapped.remove(id) {
            return Err(Error::NotInSwap(id.to_owned()));
        }

        self.resident.insert(id.to_owned());
        info!("swap: {} moved to RAM", id);

        Ok(format!("✅ Process {} swapped in to RAM successfully!", id))
    }

    /// Marks `id` resident. Adding an already resident id is a no-op; an id
    /// currently swapped out is refused.
    pub fn add_resident(&mut self, id: &str) -> Result<()> {
        if self.swapped.contains(id) {
            return Err(Error::AlreadySwapped(id.to_owned()));
        }

        self.resident.insert(id.to_owned());

        Ok(())
    }

    pub fn is_resident(&self, id: &str) -> bool {
        self.resident.contains(id)
    }

    pub fn is_swapped(&self, id: &str) -> bool {
        self.swapped.contains(id)
    }

    pub fn list_resident(&self) -> Vec<String> {
        self.resident.iter().cloned().collect()
    }

    pub fn list_swapped(&self) -> Vec<String> {
        self.swapped.iter().cloned().collect()
    }
}

impl Default for SwapRegistry {
    fn default() -> Self {
        Self::new()
    }
}
