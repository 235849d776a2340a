use std::collections::{HashMap, VecDeque};
use std::fmt;

use crate::page_frame_table::PageFrame;

pub enum PageEvent {
    /// A reference hit a page already in a frame.
    Touched { page: i32, position: usize },
    /// A page was written into `frame` after a fault.
    Loaded { page: i32, frame: usize, position: usize },
}

/// Victim selection for a full frame table.
///
/// `position` is the index of the current reference in the reference string.
pub trait PageReplacer {
    fn page_event(&mut self, _event: PageEvent) {}

    fn pick_replacement_frame(&mut self, frames: &[PageFrame], position: usize) -> usize;
}

/// Evicts frames in the order they were loaded, which walks the frame table
/// cyclically starting at frame 0.
pub struct FIFOPageReplacer {
    fifo: VecDeque<usize>,
}

impl FIFOPageReplacer {
    pub fn new() -> Self {
        FIFOPageReplacer {
            fifo: VecDeque::new(),
        }
    }
}

impl Default for FIFOPageReplacer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageReplacer for FIFOPageReplacer {
    fn page_event(&mut self, event: PageEvent) {
        if let PageEvent::Loaded { frame, .. } = event {
            self.fifo.push_back(frame)
        }
    }

    fn pick_replacement_frame(&mut self, _frames: &[PageFrame], _position: usize) -> usize {
        self.fifo.pop_front().unwrap_or(0)
    }
}

/// Evicts the frame whose page was referenced longest ago.
pub struct LRUPageReplacer {
    last_used: HashMap<i32, usize>,
}

impl LRUPageReplacer {
    pub fn new() -> Self {
        LRUPageReplacer {
            last_used: HashMap::new(),
        }
    }
}

impl Default for LRUPageReplacer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageReplacer for LRUPageReplacer {
    fn page_event(&mut self, event: PageEvent) {
        match event {
            PageEvent::Touched { page, position } | PageEvent::Loaded { page, position, .. } => {
                self.last_used.insert(page, position);
            }
        }
    }

    fn pick_replacement_frame(&mut self, frames: &[PageFrame], _position: usize) -> usize {
        let mut victim = 0;
        let mut oldest = i64::MAX;

        for (idx, frame) in frames.iter().enumerate() {
            let time = self
                .last_used
                .get(&frame.page_number())
                .map_or(-1, |&t| t as i64);

            // strict: ties stay on the lowest frame
            if time < oldest {
                oldest = time;
                victim = idx;
            }
        }

        victim
    }
}

/// Belady's optimal policy: evicts the page whose next use lies farthest
/// ahead in the reference string.
pub struct OptimalPageReplacer {
    reference: Vec<i32>,
}

impl OptimalPageReplacer {
    pub fn new(reference: &[i32]) -> Self {
        OptimalPageReplacer {
            reference: reference.to_vec(),
        }
    }

    /// Index of the next reference to `page` after `position`, or the
    /// reference length if it never recurs.
    fn next_use(&self, page: i32, position: usize) -> usize {
        self.reference
            .iter()
            .enumerate()
            .skip(position + 1)
            .find(|&(_, &p)| p == page)
            .map_or(self.reference.len(), |(idx, _)| idx)
    }
}

impl PageReplacer for OptimalPageReplacer {
    fn pick_replacement_frame(&mut self, frames: &[PageFrame], position: usize) -> usize {
        let mut victim = 0;
        let mut farthest = None;

        for (idx, frame) in frames.iter().enumerate() {
            let next_use = self.next_use(frame.page_number(), position);

            if farthest.map_or(true, |f| next_use > f) {
                farthest = Some(next_use);
                victim = idx;
            }
        }

        victim
    }
}

/// Replacement policy requested by name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplacementPolicy {
    Fifo,
    Lru,
    Optimal,
    /// A name that matches no policy. Simulating with it reports zero faults.
    Unrecognized(String),
}

impl ReplacementPolicy {
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "fifo" => ReplacementPolicy::Fifo,
            "lru" => ReplacementPolicy::Lru,
            "optimal" => ReplacementPolicy::Optimal,
            _ => ReplacementPolicy::Unrecognized(name.to_owned()),
        }
    }

    /// Fresh replacer for one run over `reference`. `None` for an
    /// unrecognized policy.
    pub fn replacer(&self, reference: &[i32]) -> Option<Box<dyn PageReplacer>> {
        match self {
            ReplacementPolicy::Fifo => Some(Box::new(FIFOPageReplacer::new())),
            ReplacementPolicy::Lru => Some(Box::new(LRUPageReplacer::new())),
            ReplacementPolicy::Optimal => Some(Box::new(OptimalPageReplacer::new(reference))),
            ReplacementPolicy::Unrecognized(_) => None,
        }
    }
}

impl From<&str> for ReplacementPolicy {
    fn from(name: &str) -> Self {
        ReplacementPolicy::parse(name)
    }
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplacementPolicy::Fifo => write!(f, "fifo"),
            ReplacementPolicy::Lru => write!(f, "lru"),
            ReplacementPolicy::Optimal => write!(f, "optimal"),
            ReplacementPolicy::Unrecognized(name) => write!(f, "{}", name),
        }
    }
}
