use std::collections::VecDeque;

use crate::process::ProcessRecord;

/// FIFO queue owning the process records placed in it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessQueue {
    queue: VecDeque<ProcessRecord>,
}

impl ProcessQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the tail. A pid that is already queued is an invariant violation.
    pub fn enqueue(&mut self, process: ProcessRecord) {
        assert!(
            !self.contains(process.pid()),
            "process {} is already in the queue",
            process.pid()
        );
        self.queue.push_back(process);
    }

    pub fn dequeue(&mut self) -> Option<ProcessRecord> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn contains(&self, pid: i32) -> bool {
        self.queue.iter().any(|process| process.pid() == pid)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProcessRecord> {
        self.queue.iter()
    }
}

impl FromIterator<ProcessRecord> for ProcessQueue {
    fn from_iter<I: IntoIterator<Item = ProcessRecord>>(iter: I) -> Self {
        let mut queue = Self::new();
        for process in iter {
            queue.enqueue(process);
        }
        queue
    }
}
