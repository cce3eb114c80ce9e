use std::collections::HashSet;

use serde_derive::{Deserialize, Serialize};

use crate::{error::ConfigError, process::ProcessDescriptor};

/// Everything needed to start a simulation: the slot topology and the processes in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub number_of_cores: usize,
    pub threads_per_core: usize,
    pub processes: Vec<ProcessDescriptor>,
}

impl SimulationConfig {
    pub fn number_of_slots(&self) -> Result<usize, ConfigError> {
        slot_count(self.number_of_cores, self.threads_per_core)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.number_of_cores == 0 {
            return Err(ConfigError::InvalidCoreCount);
        }
        if self.threads_per_core == 0 {
            return Err(ConfigError::InvalidThreadCount);
        }
        self.number_of_slots()?;
        let mut pids = HashSet::new();
        for descriptor in &self.processes {
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
            if !pids.insert(descriptor.pid) {
                return Err(ConfigError::DuplicatePid(descriptor.pid));
            }
        }
        Ok(())
    }
}

pub(crate) fn slot_count(
    number_of_cores: usize,
    threads_per_core: usize,
) -> Result<usize, ConfigError> {
    number_of_cores
        .checked_mul(threads_per_core)
        .ok_or(ConfigError::SlotCountOverflow {
            number_of_cores,
            threads_per_core,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_descriptor(pid: i32, quantum: u32, iterations: u32) -> ProcessDescriptor {
        ProcessDescriptor {
            pid,
            ppid: 0,
            name: format!("proc{}", pid),
            registers: 0,
            size: 0,
            threads: 1,
            quantum,
            iterations,
        }
    }

    fn create_config(
        number_of_cores: usize,
        threads_per_core: usize,
        processes: Vec<ProcessDescriptor>,
    ) -> SimulationConfig {
        SimulationConfig {
            number_of_cores,
            threads_per_core,
            processes,
        }
    }

    #[test]
    fn test_validate_normal() {
        let config = create_config(2, 2, vec![create_descriptor(1, 2, 3)]);
        assert!(config.validate().is_ok());
        assert_eq!(config.number_of_slots().unwrap(), 4);
    }

    #[test]
    fn test_validate_zero_cores() {
        let config = create_config(0, 1, vec![]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCoreCount)
        ));
    }

    #[test]
    fn test_validate_zero_threads() {
        let config = create_config(1, 0, vec![]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThreadCount)
        ));
    }

    #[test]
    fn test_validate_slot_count_overflow() {
        let config = create_config(usize::MAX, 2, vec![create_descriptor(1, 1, 1)]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SlotCountOverflow {
                number_of_cores: usize::MAX,
                threads_per_core: 2
            })
        ));
    }

    #[test]
    fn test_validate_zero_quantum() {
        let config = create_config(1, 1, vec![create_descriptor(4, 0, 1)]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidQuantum { pid: 4 })
        ));
    }

    #[test]
    fn test_validate_duplicate_pid() {
        let config = create_config(
            1,
            1,
            vec![create_descriptor(1, 1, 1), create_descriptor(1, 2, 2)],
        );
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicatePid(1))
        ));
    }
}
