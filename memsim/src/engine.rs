//! The shared simulation engine.
//!
//! One [`Engine`] owns every table and is meant to be shared (for example
//! behind an `Arc`) by whatever front end drives it. Each table sits behind
//! its own lock. Locks are always taken in this order:
//!
//! memory (blocks, counters, rng) → page frames → processes → swap registry
//!
//! Every operation returns a plain value; failures are folded into the
//! result as `success == false` plus a message.

use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use spin::Mutex;

use crate::allocation::{AllocationTable, FitStrategy};
use crate::block::MemoryBlock;
use crate::config::{BLOCK_COUNT, FRAME_COUNT, GC_PROBABILITY, REFERENCE_STRING};
use crate::page_frame_table::{PageFrame, PageFrameTable};
use crate::page_replacer::ReplacementPolicy;
use crate::process::{Process, ProcessRegistry};
use crate::stats::{percent, Counters, MemoryStatistics};
use crate::swap::SwapRegistry;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<usize>,
    pub message: String,
    pub memory_blocks: Vec<MemoryBlock>,
    pub stats: MemoryStatistics,
}

/// Result of deallocate and reset.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryOutcome {
    pub success: bool,
    pub message: String,
    pub memory_blocks: Vec<MemoryBlock>,
    pub stats: MemoryStatistics,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessOutcome {
    pub success: bool,
    pub processes: Vec<Process>,
    pub message: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ReplacementOutcome {
    /// The policy name as the caller spelled it.
    #[serde(rename = "algorithm")]
    pub policy: String,
    #[serde(rename = "pageFaults")]
    pub fault_count: usize,
    #[serde(rename = "pageHits")]
    pub hit_count: usize,
    #[serde(rename = "hitRatio")]
    pub hit_ratio_percent: u64,
    #[serde(rename = "pageFrames")]
    pub frames: Vec<PageFrame>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GcOutcome {
    pub success: bool,
    #[serde(rename = "objectsCollected")]
    pub collected_count: usize,
    #[serde(rename = "gcCollections")]
    pub gc_run_count: u64,
    pub memory_blocks: Vec<MemoryBlock>,
    pub stats: MemoryStatistics,
}

struct Memory<R> {
    table: AllocationTable<BLOCK_COUNT>,
    counters: Counters,
    rng: R,
}

pub struct Engine<R = StdRng> {
    memory: Mutex<Memory<R>>,
    frames: Mutex<PageFrameTable<FRAME_COUNT>>,
    processes: Mutex<ProcessRegistry>,
    swap: Mutex<SwapRegistry>,
}

impl Engine<StdRng> {
    /// Engine whose garbage collector draws from OS entropy.
    pub fn new() -> Self {
        Engine::with_rng(StdRng::from_entropy())
    }
}

impl Default for Engine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng + Send> Engine<R> {
    pub fn with_rng(rng: R) -> Self {
        Engine {
            memory: Mutex::new(Memory {
                table: AllocationTable::new(),
                counters: Counters::default(),
                rng,
            }),
            frames: Mutex::new(PageFrameTable::new()),
            processes: Mutex::new(ProcessRegistry::new()),
            swap: Mutex::new(SwapRegistry::seeded()),
        }
    }

    pub fn blocks(&self) -> Vec<MemoryBlock> {
        self.memory.lock().table.blocks().to_vec()
    }

    pub fn allocate(&self, size: usize, strategy: &str) -> AllocationOutcome {
        let mut memory = self.memory.lock();
        memory.counters.total_allocations += 1;

        let block_id = memory.table.allocate(size, &FitStrategy::parse(strategy));

        let message = match block_id {
            Some(_) => {
                memory.counters.successful_allocations += 1;
                format!("Memory allocated successfully using {} fit", strategy)
            }
            None => "No suitable memory block found".to_owned(),
        };

        let (memory_blocks, stats) = self.snapshot(&memory);

        AllocationOutcome {
            success: block_id.is_some(),
            block_id,
            message,
            memory_blocks,
            stats,
        }
    }

    /// Frees the single block `block_id`.
    pub fn deallocate(&self, block_id: usize) -> MemoryOutcome {
        let mut memory = self.memory.lock();

        let (success, message) = match memory.table.deallocate(block_id) {
            Ok(()) => (true, "Memory deallocated successfully".to_owned()),
            Err(err) => {
                warn!("engine: deallocate rejected: {}", err);
                (false, err.to_string())
            }
        };

        let (memory_blocks, stats) = self.snapshot(&memory);

        MemoryOutcome {
            success,
            message,
            memory_blocks,
            stats,
        }
    }

    /// Frees every block, zeroes the counters and empties the page frames.
    /// Processes and swap membership survive.
    pub fn reset(&self) -> MemoryOutcome {
        let mut memory = self.memory.lock();
        memory.table.reset();
        memory.counters.reset();

        self.frames.lock().clear();

        info!("engine: memory reset");

        let (memory_blocks, stats) = self.snapshot(&memory);

        MemoryOutcome {
            success: true,
            message: "Memory reset successfully".to_owned(),
            memory_blocks,
            stats,
        }
    }

    pub fn processes(&self) -> Vec<Process> {
        self.processes.lock().processes().to_vec()
    }

    pub fn create_process(&self, name: &str, size: usize) -> ProcessOutcome {
        let mut processes = self.processes.lock();

        let created = {
            let mut swap = self.swap.lock();
            processes.create(name, size, &mut swap)
        };

        let (success, message) = match created {
            Ok(_) => (true, "Process created and added to RAM".to_owned()),
            Err(err) => {
                warn!("engine: process {:?} not created: {}", name, err);
                (false, err.to_string())
            }
        };

        ProcessOutcome {
            success,
            processes: processes.processes().to_vec(),
            message,
        }
    }

    pub fn simulate_page_replacement(&self, policy: &str) -> ReplacementOutcome {
        let mut frames = self.frames.lock();

        let fault_count = frames.simulate(&REFERENCE_STRING, &ReplacementPolicy::parse(policy));
        let hit_count = REFERENCE_STRING.len() - fault_count;

        ReplacementOutcome {
            policy: policy.to_owned(),
            fault_count,
            hit_count,
            hit_ratio_percent: percent(hit_count as u64, REFERENCE_STRING.len() as u64),
            frames: frames.frames().to_vec(),
        }
    }

    pub fn statistics(&self) -> MemoryStatistics {
        let memory = self.memory.lock();

        self.statistics_of(&memory)
    }

    pub fn garbage_collect(&self) -> GcOutcome {
        let mut memory = self.memory.lock();
        memory.counters.gc_collections += 1;

        let Memory { table, rng, .. } = &mut *memory;
        let collected_count = table.garbage_collect(rng, GC_PROBABILITY);

        info!("engine: gc run #{} collected {} blocks", memory.counters.gc_collections, collected_count);

        let (memory_blocks, stats) = self.snapshot(&memory);

        GcOutcome {
            success: true,
            collected_count,
            gc_run_count: memory.counters.gc_collections,
            memory_blocks,
            stats,
        }
    }

    /// Moves `process_id` from RAM to swap space.
    pub fn swap_out(&self, process_id: &str) -> String {
        self.swap
            .lock()
            .swap_out(process_id)
            .unwrap_or_else(|err| err.to_string())
    }

    /// Moves `process_id` from swap space to RAM.
    pub fn swap_in(&self, process_id: &str) -> String {
        self.swap
            .lock()
            .swap_in(process_id)
            .unwrap_or_else(|err| err.to_string())
    }

    pub fn list_resident(&self) -> Vec<String> {
        self.swap.lock().list_resident()
    }

    pub fn list_swapped(&self) -> Vec<String> {
        self.swap.lock().list_swapped()
    }

    fn statistics_of(&self, memory: &Memory<R>) -> MemoryStatistics {
        let active_processes = self.processes.lock().len();

        MemoryStatistics::collect(&memory.table, &memory.counters, active_processes)
    }

    fn snapshot(&self, memory: &Memory<R>) -> (Vec<MemoryBlock>, MemoryStatistics) {
        (memory.table.blocks().to_vec(), self.statistics_of(memory))
    }
}
