use std::time::SystemTime;

use log::{debug, warn};
use serde::Serialize;

use crate::config::EMPTY_PAGE;
use crate::page_replacer::{PageEvent, PageReplacer, ReplacementPolicy};

/// One physical frame. `page_number == -1` means empty.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFrame {
    frame_id: usize,
    page_number: i32,
    occupied: bool,
    last_access_time: SystemTime,
}

impl PageFrame {
    pub fn new(frame_id: usize) -> Self {
        PageFrame {
            frame_id,
            page_number: EMPTY_PAGE,
            occupied: false,
            last_access_time: SystemTime::now(),
        }
    }

    pub fn frame_id(&self) -> usize {
        self.frame_id
    }

    pub fn page_number(&self) -> i32 {
        self.page_number
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    pub fn is_empty(&self) -> bool {
        self.page_number == EMPTY_PAGE
    }

    pub fn last_access_time(&self) -> SystemTime {
        self.last_access_time
    }

    pub fn set_page_number(&mut self, page_number: i32) {
        self.page_number = page_number;
        self.occupied = page_number != EMPTY_PAGE;
        self.last_access_time = SystemTime::now();
    }

    pub fn clear(&mut self) {
        self.page_number = EMPTY_PAGE;
        self.occupied = false;
    }
}

pub struct PageFrameTable<const FRAME_COUNT: usize> {
    frames: [PageFrame; FRAME_COUNT],
}

impl<const FRAME_COUNT: usize> PageFrameTable<FRAME_COUNT> {
    pub fn new() -> Self {
        PageFrameTable {
            frames: std::array::from_fn(PageFrame::new),
        }
    }

    pub fn frames(&self) -> &[PageFrame] {
        &self.frames
    }

    pub fn clear(&mut self) {
        for frame in self.frames.iter_mut() {
            frame.clear();
        }
    }

    /// Clears the table and walks `reference` under `policy`.
    /// Returns the number of page faults.
    pub fn simulate(&mut self, reference: &[i32], policy: &ReplacementPolicy) -> usize {
        self.clear();

        match policy.replacer(reference) {
            Some(mut replacer) => self.run(reference, replacer.as_mut()),
            None => {
                warn!("page_table: unrecognized policy {:?}, nothing simulated", policy.to_string());
                0
            }
        }
    }

    /// Walks `reference` against the current frames using `replacer`.
    pub fn run(&mut self, reference: &[i32], replacer: &mut dyn PageReplacer) -> usize {
        let mut faults = 0;

        for (position, &page) in reference.iter().enumerate() {
            if self.frames.iter().any(|f| f.page_number() == page) {
                debug!("page_table: ref #{} page {} hit", position, page);
                replacer.page_event(PageEvent::Touched { page, position });
            } else {
                let frame = self.handle_page_fault(page, position, replacer);
                debug!("page_table: ref #{} page {} fault, loaded into frame {}", position, page, frame);
                faults += 1;
            }
        }

        faults
    }

    fn handle_page_fault(&mut self, page: i32, position: usize, replacer: &mut dyn PageReplacer) -> usize {
        let frame = match self.frames.iter().position(PageFrame::is_empty) {
            Some(empty) => empty,
            None => replacer.pick_replacement_frame(&self.frames, position),
        };

        self.frames[frame].set_page_number(page);

        replacer.page_event(PageEvent::Loaded { page, frame, position });

        frame
    }
}

impl<const FRAME_COUNT: usize> Default for PageFrameTable<FRAME_COUNT> {
    fn default() -> Self {
        Self::new()
    }
}
