use serde::Serialize;

/// One unit of simulated memory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryBlock {
    id: usize,
    free: bool,
    /// Every block is one unit wide.
    size: usize,
    process_id: Option<String>,
}

impl MemoryBlock {
    pub fn new(id: usize) -> Self {
        MemoryBlock {
            id,
            free: true,
            size: 1,
            process_id: None,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn is_free(&self) -> bool {
        self.free
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn process_id(&self) -> Option<&str> {
        self.process_id.as_deref()
    }

    /// Flips the free flag only. The owner link is left as it is.
    pub fn set_free(&mut self, free: bool) {
        self.free = free;
    }

    /// Marks the block used and links it to `process_id`.
    pub fn allocate(&mut self, process_id: &str) {
        self.free = false;
        self.process_id = Some(process_id.to_owned());
    }

    /// Marks the block free and drops the owner link.
    pub fn deallocate(&mut self) {
        self.free = true;
        self.process_id = None;
    }
}
