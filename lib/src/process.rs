//! This module contains the process record moved around by the scheduler
use crate::error::ConfigError;
use getset::{CopyGetters, Getters};
use serde_derive::{Deserialize, Serialize};

/// Input form of a process, in the field order of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDescriptor {
    pub pid: i32,
    pub ppid: i32,
    pub name: String,
    pub registers: u32,
    pub size: u32,
    pub threads: u32,
    pub quantum: u32,
    pub iterations: u32,
}

///result of consuming one pulse of the current turn
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PulseOutcome {
    Continue,
    QuantumExpired,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct ProcessRecord {
    #[getset(get_copy = "pub")]
    pid: i32,
    #[getset(get_copy = "pub")]
    ppid: i32,
    #[getset(get = "pub")]
    name: String,
    #[getset(get_copy = "pub")]
    register_count: u32,
    #[getset(get_copy = "pub")]
    memory_size: u32,
    #[getset(get_copy = "pub")]
    thread_count: u32,
    #[getset(get_copy = "pub")]
    quantum: u32,
    #[getset(get_copy = "pub")]
    total_iterations: u32,

    #[getset(get_copy = "pub")]
    quantum_remaining: u32,
    #[getset(get_copy = "pub")]
    iterations_remaining: u32,
    #[getset(get_copy = "pub")]
    finished: bool,
}

impl TryFrom<ProcessDescriptor> for ProcessRecord {
    type Error = ConfigError;

    fn try_from(descriptor: ProcessDescriptor) -> Result<Self, Self::Error> {
        if descriptor.quantum == 0 {
            return Err(ConfigError::InvalidQuantum {
                pid: descriptor.pid,
            });
        }
        if descriptor.iterations == 0 {
            return Err(ConfigError::InvalidIterations {
                pid: descriptor.pid,
            });
        }
        Ok(Self {
            pid: descriptor.pid,
            ppid: descriptor.ppid,
            name: descriptor.name,
            register_count: descriptor.registers,
            memory_size: descriptor.size,
            thread_count: descriptor.threads,
            quantum: descriptor.quantum,
            total_iterations: descriptor.iterations,
            quantum_remaining: descriptor.quantum,
            iterations_remaining: descriptor.iterations,
            finished: false,
        })
    }
}

impl ProcessRecord {
    /// Total pulses this process has to hold a slot before it terminates.
    pub fn total_pulses(&self) -> u64 {
        self.quantum as u64 * self.total_iterations as u64
    }

    /// Spend one pulse of the current turn.
    ///
    /// When the quantum runs out one iteration is consumed. If iterations remain the
    /// quantum is refilled for the next turn, otherwise the process becomes finished.
    pub(crate) fn consume_pulse(&mut self) -> PulseOutcome {
        assert!(
            !self.finished,
            "process {} consumed a pulse after finishing",
            self.pid
        );
        self.quantum_remaining -= 1;
        if self.quantum_remaining > 0 {
            return PulseOutcome::Continue;
        }
        self.iterations_remaining -= 1;
        if self.iterations_remaining > 0 {
            self.quantum_remaining = self.quantum;
            PulseOutcome::QuantumExpired
        } else {
            self.finished = true;
            PulseOutcome::Finished
        }
    }
}
