use serde::Serialize;

use crate::allocation::AllocationTable;

/// Engine-wide counters. Only [`Counters::reset`] ever lowers them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counters {
    pub total_allocations: u64,
    pub successful_allocations: u64,
    pub gc_collections: u64,
}

impl Counters {
    pub fn reset(&mut self) {
        *self = Counters::default();
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStatistics {
    pub allocated_blocks: usize,
    pub free_blocks: usize,
    pub total_blocks: usize,
    pub utilization_percentage: u64,
    pub total_allocations: u64,
    pub successful_allocations: u64,
    pub success_rate: u64,
    pub active_processes: usize,
    pub gc_collections: u64,
}

impl MemoryStatistics {
    pub fn collect<const BLOCK_COUNT: usize>(
        table: &AllocationTable<BLOCK_COUNT>,
        counters: &Counters,
        active_processes: usize,
    ) -> Self {
        let allocated_blocks = table.allocated_count();

        MemoryStatistics {
            allocated_blocks,
            free_blocks: table.free_count(),
            total_blocks: BLOCK_COUNT,
            utilization_percentage: percent(allocated_blocks as u64, BLOCK_COUNT as u64),
            total_allocations: counters.total_allocations,
            successful_allocations: counters.successful_allocations,
            success_rate: percent(counters.successful_allocations, counters.total_allocations),
            active_processes,
            gc_collections: counters.gc_collections,
        }
    }
}

/// `part / whole` as a percentage rounded half-up; 0 when `whole` is 0.
pub fn percent(part: u64, whole: u64) -> u64 {
    if whole == 0 {
        return 0;
    }

    (part * 200 + whole) / (whole * 2)
}
