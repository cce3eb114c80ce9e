use crate::{
    core::ProcessResult,
    process::ProcessRecord,
    process_queue::ProcessQueue,
    processor::ProcessorBase,
};
use log::{debug, info};
use serde_derive::{Deserialize, Serialize};

/// Occupant of one slot as seen at the end of a pulse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotState {
    Idle,
    Running {
        pid: i32,
        name: String,
        quantum_remaining: u32,
        iterations_remaining: u32,
    },
}

impl From<Option<&ProcessRecord>> for SlotState {
    fn from(process: Option<&ProcessRecord>) -> Self {
        match process {
            Some(process) => SlotState::Running {
                pid: process.pid(),
                name: process.name().clone(),
                quantum_remaining: process.quantum_remaining(),
                iterations_remaining: process.iterations_remaining(),
            },
            None => SlotState::Idle,
        }
    }
}

/// State of every slot after one pulse, plus what moved during it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PulseSnapshot {
    pub pulse: usize,
    pub slots: Vec<SlotState>,
    /// Slots that received a process from the ready queue in this pulse.
    pub dispatched: Vec<usize>,
    /// Pids that terminated in this pulse.
    pub terminated: Vec<i32>,
}

/// Preemptive round-robin over a pool of slots.
///
/// Each process record is owned by exactly one of the ready queue, a core of the processor
/// or the terminated queue. Records only move by value between them, so a process can never
/// be in two places at once.
pub struct RoundRobinScheduler<T: ProcessorBase> {
    processor: T,
    ready_queue: ProcessQueue,
    terminated_queue: ProcessQueue,
    current_pulse: usize,
}

impl<T: ProcessorBase> RoundRobinScheduler<T> {
    pub fn new(processor: T, processes: Vec<ProcessRecord>) -> Self {
        assert!(
            processor.get_number_of_cores() > 0,
            "the scheduler needs at least one core"
        );
        Self {
            processor,
            ready_queue: processes.into_iter().collect(),
            terminated_queue: ProcessQueue::new(),
            current_pulse: 0,
        }
    }

    pub fn processor(&self) -> &T {
        &self.processor
    }

    pub fn ready_queue(&self) -> &ProcessQueue {
        &self.ready_queue
    }

    pub fn terminated_queue(&self) -> &ProcessQueue {
        &self.terminated_queue
    }

    /// Number of pulses executed so far, which is also the index of the next pulse.
    pub fn current_pulse(&self) -> usize {
        self.current_pulse
    }

    pub fn is_finished(&self) -> bool {
        self.ready_queue.is_empty() && !self.processor.any_occupied()
    }

    /// Run one pulse.
    ///
    /// 1. Every running process spends one pulse of its quantum. A process whose quantum
    ///    expired goes to the tail of the ready queue, or to the terminated queue after its
    ///    last iteration. Either way its core is released.
    /// 2. Idle cores are filled in index order from the head of the ready queue. A process
    ///    requeued in step 1 can be dispatched again in the same pulse if the queue reaches it.
    /// 3. The occupancy of every core is captured.
    ///
    /// A freshly dispatched process is not ticked until the next pulse, so it shows its full
    /// quantum in this pulse's snapshot.
    pub fn pulse(&mut self) -> PulseSnapshot {
        let mut terminated = Vec::new();

        //Release cores whose process used up its quantum.
        for result in self.processor.process() {
            match result {
                ProcessResult::Requeue(process) => {
                    debug!(
                        "pulse {}: process {} requeued",
                        self.current_pulse,
                        process.pid()
                    );
                    self.ready_queue.enqueue(process);
                }
                ProcessResult::Done(process) => {
                    info!(
                        "pulse {}: process {} ({}) terminated",
                        self.current_pulse,
                        process.pid(),
                        process.name()
                    );
                    terminated.push(process.pid());
                    self.terminated_queue.enqueue(process);
                }
                ProcessResult::Idle | ProcessResult::Continue => {}
            }
        }

        //Assign the head of the ready queue to the first idle core found.
        let mut dispatched = Vec::new();
        while let Some(core_index) = self.processor.get_idle_core_index() {
            if let Some(process) = self.ready_queue.dequeue() {
                debug!(
                    "pulse {}: process {} dispatched to core {}",
                    self.current_pulse,
                    process.pid(),
                    core_index
                );
                self.processor.allocate_specific_core(core_index, process);
                dispatched.push(core_index);
            } else {
                break;
            }
        }

        let slots = (0..self.processor.get_number_of_cores())
            .map(|core_id| {
                SlotState::from(
                    self.processor
                        .get_core(core_id)
                        .processing_process
                        .as_ref(),
                )
            })
            .collect();

        let snapshot = PulseSnapshot {
            pulse: self.current_pulse,
            slots,
            dispatched,
            terminated,
        };
        self.current_pulse += 1;
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::Core, homogeneous::HomogeneousProcessor, process::ProcessDescriptor};

    fn create_process(pid: i32, quantum: u32, iterations: u32) -> ProcessRecord {
        ProcessRecord::try_from(ProcessDescriptor {
            pid,
            ppid: 0,
            name: format!("proc{}", pid),
            registers: 0,
            size: 0,
            threads: 1,
            quantum,
            iterations,
        })
        .unwrap()
    }

    fn running(pid: i32, quantum_remaining: u32, iterations_remaining: u32) -> SlotState {
        SlotState::Running {
            pid,
            name: format!("proc{}", pid),
            quantum_remaining,
            iterations_remaining,
        }
    }

    #[test]
    fn test_pulse_first_pulse_only_dispatches() {
        let mut scheduler = RoundRobinScheduler::new(
            HomogeneousProcessor::new(2),
            vec![
                create_process(0, 2, 1),
                create_process(1, 2, 1),
                create_process(2, 2, 1),
            ],
        );
        let snapshot = scheduler.pulse();
        assert_eq!(snapshot.pulse, 0);
        assert_eq!(snapshot.slots, vec![running(0, 2, 1), running(1, 2, 1)]);
        assert_eq!(snapshot.dispatched, vec![0, 1]);
        assert!(snapshot.terminated.is_empty());
        assert_eq!(scheduler.ready_queue().len(), 1);
        assert_eq!(scheduler.current_pulse(), 1);
    }

    #[test]
    fn test_pulse_requeued_process_is_redispatched_same_pulse() {
        let mut scheduler =
            RoundRobinScheduler::new(HomogeneousProcessor::new(1), vec![create_process(1, 2, 2)]);
        assert_eq!(scheduler.pulse().slots, vec![running(1, 2, 2)]);
        assert_eq!(scheduler.pulse().slots, vec![running(1, 1, 2)]);
        let snapshot = scheduler.pulse();
        assert_eq!(snapshot.slots, vec![running(1, 2, 1)]);
        assert_eq!(snapshot.dispatched, vec![0]);
        assert_eq!(scheduler.pulse().slots, vec![running(1, 1, 1)]);
        let snapshot = scheduler.pulse();
        assert_eq!(snapshot.slots, vec![SlotState::Idle]);
        assert_eq!(snapshot.terminated, vec![1]);
        assert!(scheduler.is_finished());
        assert_eq!(scheduler.terminated_queue().len(), 1);
    }

    #[test]
    fn test_pulse_requeued_process_goes_behind_waiting_ones() {
        let mut scheduler = RoundRobinScheduler::new(
            HomogeneousProcessor::new(1),
            vec![create_process(0, 1, 2), create_process(1, 1, 1)],
        );
        assert_eq!(scheduler.pulse().slots, vec![running(0, 1, 2)]);
        // 0 is requeued behind 1, so 1 gets the core.
        assert_eq!(scheduler.pulse().slots, vec![running(1, 1, 1)]);
        let snapshot = scheduler.pulse();
        assert_eq!(snapshot.terminated, vec![1]);
        assert_eq!(snapshot.slots, vec![running(0, 1, 1)]);
        let snapshot = scheduler.pulse();
        assert_eq!(snapshot.terminated, vec![0]);
        assert_eq!(snapshot.slots, vec![SlotState::Idle]);
        assert!(scheduler.is_finished());
    }

    #[test]
    fn test_pulse_freed_lower_core_takes_requeued_process() {
        // Core 0 frees up and requeues process 0 while process 2 waits, so core 0 gets 2.
        // Core 1 frees up in the same pulse and picks up the requeued process 0.
        let mut scheduler = RoundRobinScheduler::new(
            HomogeneousProcessor::new(2),
            vec![
                create_process(0, 1, 2),
                create_process(1, 1, 1),
                create_process(2, 3, 1),
            ],
        );
        scheduler.pulse();
        let snapshot = scheduler.pulse();
        assert_eq!(snapshot.terminated, vec![1]);
        assert_eq!(snapshot.slots, vec![running(2, 3, 1), running(0, 1, 1)]);
        assert_eq!(snapshot.dispatched, vec![0, 1]);
    }

    #[test]
    #[should_panic]
    fn test_new_empty_processor() {
        struct EmptyProcessor(Vec<Core>);
        impl ProcessorBase for EmptyProcessor {
            fn new(_num_cores: usize) -> Self {
                Self(Vec::new())
            }
            fn allocate_specific_core(&mut self, core_id: usize, process: ProcessRecord) {
                self.0[core_id].allocate(process)
            }
            fn process(&mut self) -> Vec<ProcessResult> {
                Vec::new()
            }
            fn get_number_of_cores(&self) -> usize {
                self.0.len()
            }
            fn get_idle_core_index(&self) -> Option<usize> {
                None
            }
            fn any_occupied(&self) -> bool {
                false
            }
            fn release(&mut self, core_id: usize) -> Option<ProcessRecord> {
                self.0[core_id].release()
            }
            fn get_core(&self, core_id: usize) -> &Core {
                &self.0[core_id]
            }
        }
        RoundRobinScheduler::new(EmptyProcessor::new(0), vec![create_process(0, 1, 1)]);
    }

    #[test]
    fn test_pulse_no_processes() {
        let mut scheduler = RoundRobinScheduler::new(HomogeneousProcessor::new(2), vec![]);
        assert!(scheduler.is_finished());
        let snapshot = scheduler.pulse();
        assert_eq!(snapshot.slots, vec![SlotState::Idle, SlotState::Idle]);
        assert!(snapshot.dispatched.is_empty());
    }
}
