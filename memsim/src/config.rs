//! Compile-time configuration of the simulation.
//!
//! The tables take their sizes as const generic parameters, so a different
//! geometry is just a different type (`AllocationTable<16>`,
//! `PageFrameTable<3>`). The constants below are the defaults used by
//! [`crate::engine::Engine`].

/// Number of unit blocks in the allocation table.
pub const BLOCK_COUNT: usize = 100;

/// Number of physical page frames.
pub const FRAME_COUNT: usize = 4;

/// The built-in page reference string every replacement run walks.
pub const REFERENCE_STRING: [i32; 20] = [7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2, 1, 2, 0, 1, 7, 0, 1];

/// Per-block probability that an allocated block is reclaimed by a GC run.
pub const GC_PROBABILITY: f64 = 0.3;

/// Identifiers resident in RAM when the swap registry is created.
pub const SEEDED_RESIDENT: [&str; 3] = ["Process-1", "Process-2", "Process-3"];

/// Identifiers sitting in swap space when the swap registry is created.
pub const SEEDED_SWAPPED: [&str; 2] = ["Process-4", "Process-5"];

/// Marker stored in a frame that holds no page.
pub const EMPTY_PAGE: i32 = -1;
