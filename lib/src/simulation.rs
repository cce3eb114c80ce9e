//! Pulse-stepped driver that runs the round-robin scheduler to completion
use log::info;

use crate::{
    config::SimulationConfig,
    error::ConfigError,
    homogeneous::HomogeneousProcessor,
    log::SimulationLog,
    process::ProcessRecord,
    process_queue::ProcessQueue,
    processor::ProcessorBase,
    round_robin_scheduler::{PulseSnapshot, RoundRobinScheduler},
};

/// One self-contained simulation run. Independent instances share no state.
pub struct Simulation {
    scheduler: RoundRobinScheduler<HomogeneousProcessor>,
    process_count: usize,
    trace: Vec<PulseSnapshot>,
    log: SimulationLog,
}

impl Simulation {
    /// Validate the configuration and load every process into the ready queue in input order.
    pub fn new(config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let processor =
            HomogeneousProcessor::with_topology(config.number_of_cores, config.threads_per_core)?;
        let processes = config
            .processes
            .iter()
            .cloned()
            .map(ProcessRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let log = SimulationLog::new(&processes, processor.get_number_of_cores());
        Ok(Self {
            process_count: processes.len(),
            scheduler: RoundRobinScheduler::new(processor, processes),
            trace: Vec::new(),
            log,
        })
    }

    /// Run to completion and return the number of terminated processes.
    pub fn run(&mut self) -> usize {
        self.run_with(|_| {})
    }

    /// Run to completion, handing every pulse snapshot to `reporter` as it is produced.
    ///
    /// The loop stops once the ready queue is empty and no core is occupied.
    pub fn run_with(&mut self, mut reporter: impl FnMut(&PulseSnapshot)) -> usize {
        info!(
            "Simulating {} processes on {} slots",
            self.process_count,
            self.scheduler.processor().get_number_of_cores()
        );
        while !self.scheduler.is_finished() {
            let snapshot = self.scheduler.pulse();
            self.log.record(&snapshot);
            reporter(&snapshot);
            self.trace.push(snapshot);
        }
        self.log.finalize(self.schedule_length());

        let terminated_count = self.scheduler.terminated_queue().len();
        assert_eq!(
            terminated_count, self.process_count,
            "every process must terminate"
        );
        info!(
            "Simulation finished after {} pulses, {} processes terminated",
            self.schedule_length(),
            terminated_count
        );
        terminated_count
    }

    /// Number of pulses executed.
    pub fn schedule_length(&self) -> usize {
        self.scheduler.current_pulse()
    }

    pub fn process_count(&self) -> usize {
        self.process_count
    }

    pub fn trace(&self) -> &[PulseSnapshot] {
        &self.trace
    }

    /// Completed processes in completion order.
    pub fn terminated(&self) -> &ProcessQueue {
        self.scheduler.terminated_queue()
    }

    pub fn ready_queue(&self) -> &ProcessQueue {
        self.scheduler.ready_queue()
    }

    pub fn processor(&self) -> &HomogeneousProcessor {
        self.scheduler.processor()
    }

    pub fn log(&self) -> &SimulationLog {
        &self.log
    }
}
