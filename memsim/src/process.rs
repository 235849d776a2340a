use std::time::SystemTime;

use log::info;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::swap::SwapRegistry;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ProcessStatus {
    Ready,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    pub id: u32,
    pub name: String,
    pub size: usize,
    pub status: ProcessStatus,
    pub created_at: SystemTime,
    pub priority: i32,
}

/// Append-only list of created processes.
pub struct ProcessRegistry {
    processes: Vec<Process>,
    next_id: u32,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub(crate) fn starting_at(next_id: u32) -> Self {
        ProcessRegistry {
            processes: Vec::new(),
            next_id,
        }
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Creates a process and registers its name as resident in `swap`.
    ///
    /// The id is consumed before registration, so a failed creation leaves
    /// a gap in the sequence. Nothing is appended on failure.
    pub fn create(&mut self, name: &str, size: usize, swap: &mut SwapRegistry) -> Result<Process> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(Error::ProcessIdsExhausted)?;

        swap.add_resident(name)?;

        let process = Process {
            id,
            name: name.to_owned(),
            size,
            status: ProcessStatus::Ready,
            created_at: SystemTime::now(),
            priority: 0,
        };

        self.processes.push(process.clone());
        info!("process: created #{} {:?} ({} units)", id, name, size);

        Ok(process)
    }
}

impl Default for ProcessRegistry {
    fn default() -> Self {
        Self::new()
    }
}
