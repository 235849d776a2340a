//! Simulation engine for three classic memory-management mechanisms:
//! contiguous allocation (first/best/worst fit), page replacement
//! (FIFO/LRU/Optimal) and swapping processes between RAM and swap space.
//!
//! Nothing here touches real memory. The "memory" is a table of unit
//! blocks and the "frames" hold page numbers only.

pub mod allocation;
pub mod block;
pub mod config;
pub mod engine;
pub mod error;
pub mod page_frame_table;
pub mod page_replacer;
pub mod process;
pub mod stats;
pub mod swap;

pub use allocation::{AllocationTable, FitStrategy};
pub use block::MemoryBlock;
pub use engine::{AllocationOutcome, Engine, GcOutcome, MemoryOutcome, ProcessOutcome, ReplacementOutcome};
pub use error::Error;
pub use page_frame_table::{PageFrame, PageFrameTable};
pub use page_replacer::{PageReplacer, ReplacementPolicy};
pub use process::{Process, ProcessRegistry, ProcessStatus};
pub use stats::{Counters, MemoryStatistics};
pub use swap::SwapRegistry;
