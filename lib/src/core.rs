//! This module contains the definition of the core (one execution slot) and the process result enum
use crate::{
    core::ProcessResult::*,
    process::{ProcessRecord, PulseOutcome},
};
use log::debug;

///enum to represent the four outcomes of one pulse on a core
///nothing allocated, still inside the quantum, quantum expired with iterations left, last iteration finished
#[derive(Debug, PartialEq, Clone)]
pub enum ProcessResult {
    Idle,
    Continue,
    Requeue(ProcessRecord),
    Done(ProcessRecord),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Core {
    pub processing_process: Option<ProcessRecord>,
}

///allocating an occupied core is a scheduler bug, so it panics instead of returning false
impl Core {
    pub fn is_idle(&self) -> bool {
        self.processing_process.is_none()
    }

    pub fn allocate(&mut self, process: ProcessRecord) {
        if let Some(current) = &self.processing_process {
            panic!(
                "Core is already allocated to process {}, cannot allocate process {}",
                current.pid(),
                process.pid()
            );
        }
        self.processing_process = Some(process);
    }

    pub fn process(&mut self) -> ProcessResult {
        let Some(process) = self.processing_process.as_mut() else {
            return Idle;
        };
        match process.consume_pulse() {
            PulseOutcome::Continue => Continue,
            PulseOutcome::QuantumExpired => {
                debug!(
                    "process {} used up its quantum, {} iterations left",
                    process.pid(),
                    process.iterations_remaining()
                );
                Requeue(self.take_ticked())
            }
            PulseOutcome::Finished => Done(self.take_ticked()),
        }
    }

    fn take_ticked(&mut self) -> ProcessRecord {
        self.release()
            .expect("core holds the process it just ticked")
    }

    pub fn release(&mut self) -> Option<ProcessRecord> {
        self.processing_process.take()
    }
}
