use lib::{
    process::ProcessDescriptor,
    round_robin_scheduler::{PulseSnapshot, SlotState},
};

const PROCESS_LIST_HEADER: &str =
    "[PID] | [PPID] | [Name] | [Reg] | [Size] | [Threads] | [Quantum] | [Iter]";

pub fn format_process_list(processes: &[ProcessDescriptor]) -> String {
    let mut lines = vec![
        "Ready process list".to_string(),
        String::new(),
        PROCESS_LIST_HEADER.to_string(),
    ];
    lines.extend(processes.iter().map(|p| {
        format!(
            "{} | {} | {} | {} | {} | {} | {} | {}",
            p.pid, p.ppid, p.name, p.registers, p.size, p.threads, p.quantum, p.iterations
        )
    }));
    lines.join("\n")
}

pub fn format_slot(core_id: usize, slot: &SlotState) -> String {
    match slot {
        SlotState::Running {
            pid,
            name,
            quantum_remaining,
            iterations_remaining,
        } => format!(
            "  CPU{:02}: PID={} ({}, Quantum={}, Iteration={})",
            core_id, pid, name, quantum_remaining, iterations_remaining
        ),
        SlotState::Idle => format!("  CPU{:02}: (idle)", core_id),
    }
}

pub fn format_pulse(snapshot: &PulseSnapshot) -> String {
    let mut lines = vec![format!("Pulse {}", snapshot.pulse)];
    lines.extend(
        snapshot
            .slots
            .iter()
            .enumerate()
            .map(|(core_id, slot)| format_slot(core_id, slot)),
    );
    lines.join("\n")
}

pub fn format_summary(terminated_count: usize) -> String {
    format!(
        "Simulation finished.\nTerminated processes: {}",
        terminated_count
    )
}
