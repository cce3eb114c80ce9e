use crate::{
    core::{Core, ProcessResult},
    process::ProcessRecord,
};

/// Pool of execution slots driven one pulse at a time by a scheduler.
pub trait ProcessorBase {
    fn new(num_cores: usize) -> Self;
    fn allocate_specific_core(&mut self, core_id: usize, process: ProcessRecord);
    /// Advance every slot by one pulse. Results are in slot index order.
    fn process(&mut self) -> Vec<ProcessResult>;
    fn get_number_of_cores(&self) -> usize;
    fn get_idle_core_index(&self) -> Option<usize>;
    fn any_occupied(&self) -> bool;
    fn release(&mut self, core_id: usize) -> Option<ProcessRecord>;
    fn get_core(&self, core_id: usize) -> &Core;
}
