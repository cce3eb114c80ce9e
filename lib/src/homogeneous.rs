use crate::{
    config::slot_count,
    core::{Core, ProcessResult},
    error::ConfigError,
    process::ProcessRecord,
    processor::ProcessorBase,
};

/// Identical slots laid out as `cores x threads_per_core`.
/// Slot `i` belongs to core `i / threads_per_core`, hardware thread `i % threads_per_core`.
#[derive(Clone, Debug)]
pub struct HomogeneousProcessor {
    cores: Vec<Core>,
    threads_per_core: usize,
}

impl HomogeneousProcessor {
    pub fn with_topology(
        number_of_cores: usize,
        threads_per_core: usize,
    ) -> Result<Self, ConfigError> {
        if number_of_cores == 0 {
            return Err(ConfigError::InvalidCoreCount);
        }
        if threads_per_core == 0 {
            return Err(ConfigError::InvalidThreadCount);
        }
        let number_of_slots = slot_count(number_of_cores, threads_per_core)?;
        Ok(Self {
            cores: vec![Core::default(); number_of_slots],
            threads_per_core,
        })
    }

    pub fn threads_per_core(&self) -> usize {
        self.threads_per_core
    }

    /// (physical core, hardware thread) of a slot.
    pub fn slot_topology(&self, core_id: usize) -> (usize, usize) {
        (
            core_id / self.threads_per_core,
            core_id % self.threads_per_core,
        )
    }
}

impl ProcessorBase for HomogeneousProcessor {
    fn new(num_cores: usize) -> Self {
        assert!(num_cores > 0, "a processor needs at least one core");
        Self {
            cores: vec![Core::default(); num_cores],
            threads_per_core: 1,
        }
    }

    fn allocate_specific_core(&mut self, core_id: usize, process: ProcessRecord) {
        self.cores[core_id].allocate(process)
    }

    fn process(&mut self) -> Vec<ProcessResult> {
        self.cores.iter_mut().map(|core| core.process()).collect()
    }

    fn get_number_of_cores(&self) -> usize {
        self.cores.len()
    }

    fn get_idle_core_index(&self) -> Option<usize> {
        self.cores.iter().position(|core| core.is_idle())
    }

    fn any_occupied(&self) -> bool {
        self.cores.iter().any(|core| !core.is_idle())
    }

    fn release(&mut self, core_id: usize) -> Option<ProcessRecord> {
        self.cores[core_id].release()
    }

    fn get_core(&self, core_id: usize) -> &Core {
        &self.cores[core_id]
    }
}
