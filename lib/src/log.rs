use serde_derive::{Deserialize, Serialize};

use crate::{
    output_log::append_info_to_yaml,
    process::ProcessRecord,
    round_robin_scheduler::{PulseSnapshot, SlotState},
};

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct ProcessLog {
    pub pid: i32,
    pub name: String,
    pub first_dispatch_pulse: Option<usize>,
    pub finish_pulse: Option<usize>,
    pub busy_pulses: usize,
    pub dispatch_count: usize,
}

impl ProcessLog {
    pub fn new(process: &ProcessRecord) -> Self {
        Self {
            pid: process.pid(),
            name: process.name().clone(),
            first_dispatch_pulse: Default::default(),
            finish_pulse: Default::default(),
            busy_pulses: Default::default(),
            dispatch_count: Default::default(),
        }
    }
}

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct ProcessLogs {
    pub process_logs: Vec<ProcessLog>,
}

impl ProcessLogs {
    pub fn new(processes: &[ProcessRecord]) -> Self {
        Self {
            process_logs: processes.iter().map(ProcessLog::new).collect(),
        }
    }

    pub fn get_mut(&mut self, pid: i32) -> Option<&mut ProcessLog> {
        self.process_logs.iter_mut().find(|log| log.pid == pid)
    }

    pub fn dump_process_logs_to_yaml(&self, file_path: &str) {
        let yaml =
            serde_yaml::to_string(&self).expect("Failed to serialize ProcessLogs to YAML");
        append_info_to_yaml(file_path, &yaml);
    }
}

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct ProcessorLog {
    pub average_utilization: f32,
    pub variance_utilization: f32,
    pub core_logs: Vec<CoreLog>,
}

impl ProcessorLog {
    pub fn new(num_cores: usize) -> Self {
        Self {
            average_utilization: Default::default(),
            variance_utilization: Default::default(),
            core_logs: (0..num_cores).map(CoreLog::new).collect(),
        }
    }

    pub fn calculate_average_utilization(&mut self) {
        if self.core_logs.is_empty() {
            return;
        }
        self.average_utilization = self
            .core_logs
            .iter()
            .map(|core_log| core_log.utilization)
            .sum::<f32>()
            / self.core_logs.len() as f32;
    }

    pub fn calculate_variance_utilization(&mut self) {
        if self.core_logs.is_empty() {
            return;
        }
        self.variance_utilization = self
            .core_logs
            .iter()
            .map(|core_log| (core_log.utilization - self.average_utilization).powi(2))
            .sum::<f32>()
            / self.core_logs.len() as f32;
    }

    pub fn calculate_cores_utilization(&mut self, schedule_length: usize) {
        for core_log in self.core_logs.iter_mut() {
            core_log.calculate_utilization(schedule_length);
        }
    }

    pub fn dump_processor_log_to_yaml(&self, file_path: &str) {
        let yaml = serde_yaml::to_string(&self).expect("Failed to serialize ProcessorLog to YAML");
        append_info_to_yaml(file_path, &yaml);
    }
}

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct CoreLog {
    pub core_id: usize,
    pub total_proc_time: usize,
    pub utilization: f32,
}

impl CoreLog {
    pub fn new(core_id: usize) -> Self {
        Self {
            core_id,
            total_proc_time: Default::default(),
            utilization: Default::default(),
        }
    }

    pub fn calculate_utilization(&mut self, schedule_length: usize) {
        self.utilization = if schedule_length == 0 {
            0.0
        } else {
            self.total_proc_time as f32 / schedule_length as f32
        };
    }
}

/// Execution statistics gathered from the pulse snapshots of one run.
#[derive(Clone, Default, Debug)]
pub struct SimulationLog {
    pub process_logs: ProcessLogs,
    pub processor_log: ProcessorLog,
}

impl SimulationLog {
    pub fn new(processes: &[ProcessRecord], num_cores: usize) -> Self {
        Self {
            process_logs: ProcessLogs::new(processes),
            processor_log: ProcessorLog::new(num_cores),
        }
    }

    pub fn record(&mut self, snapshot: &PulseSnapshot) {
        for &pid in &snapshot.terminated {
            if let Some(process_log) = self.process_logs.get_mut(pid) {
                process_log.finish_pulse = Some(snapshot.pulse);
            }
        }
        for &core_id in &snapshot.dispatched {
            if let SlotState::Running { pid, .. } = &snapshot.slots[core_id] {
                if let Some(process_log) = self.process_logs.get_mut(*pid) {
                    process_log.first_dispatch_pulse.get_or_insert(snapshot.pulse);
                    process_log.dispatch_count += 1;
                }
            }
        }
        for (core_id, slot) in snapshot.slots.iter().enumerate() {
            if let SlotState::Running { pid, .. } = slot {
                self.processor_log.core_logs[core_id].total_proc_time += 1;
                if let Some(process_log) = self.process_logs.get_mut(*pid) {
                    process_log.busy_pulses += 1;
                }
            }
        }
    }

    pub fn finalize(&mut self, schedule_length: usize) {
        self.processor_log
            .calculate_cores_utilization(schedule_length);
        self.processor_log.calculate_average_utilization();
        self.processor_log.calculate_variance_utilization();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessDescriptor;

    fn create_process(pid: i32) -> ProcessRecord {
        ProcessRecord::try_from(ProcessDescriptor {
            pid,
            ppid: 0,
            name: format!("proc{}", pid),
            registers: 0,
            size: 0,
            threads: 1,
            quantum: 1,
            iterations: 1,
        })
        .unwrap()
    }

    fn running(pid: i32) -> SlotState {
        SlotState::Running {
            pid,
            name: format!("proc{}", pid),
            quantum_remaining: 1,
            iterations_remaining: 1,
        }
    }

    #[test]
    fn test_simulation_log_record() {
        let mut log = SimulationLog::new(&[create_process(0), create_process(1)], 2);
        log.record(&PulseSnapshot {
            pulse: 0,
            slots: vec![running(0), running(1)],
            dispatched: vec![0, 1],
            terminated: vec![],
        });
        log.record(&PulseSnapshot {
            pulse: 1,
            slots: vec![SlotState::Idle, running(1)],
            dispatched: vec![],
            terminated: vec![0],
        });

        let process_log = &log.process_logs.process_logs[0];
        assert_eq!(process_log.first_dispatch_pulse, Some(0));
        assert_eq!(process_log.finish_pulse, Some(1));
        assert_eq!(process_log.busy_pulses, 1);
        assert_eq!(process_log.dispatch_count, 1);
        assert_eq!(log.process_logs.process_logs[1].busy_pulses, 2);
        assert_eq!(log.processor_log.core_logs[0].total_proc_time, 1);
        assert_eq!(log.processor_log.core_logs[1].total_proc_time, 2);
    }

    #[test]
    fn test_processor_log_utilization() {
        let mut processor_log = ProcessorLog::new(2);
        processor_log.core_logs[0].total_proc_time = 4;
        processor_log.core_logs[1].total_proc_time = 2;
        processor_log.calculate_cores_utilization(4);
        processor_log.calculate_average_utilization();
        processor_log.calculate_variance_utilization();

        assert_eq!(processor_log.core_logs[0].utilization, 1.0);
        assert_eq!(processor_log.core_logs[1].utilization, 0.5);
        assert_eq!(processor_log.average_utilization, 0.75);
        assert_eq!(processor_log.variance_utilization, 0.0625);
    }

    #[test]
    fn test_core_log_utilization_empty_schedule() {
        let mut core_log = CoreLog::new(0);
        core_log.calculate_utilization(0);
        assert_eq!(core_log.utilization, 0.0);
    }
}
