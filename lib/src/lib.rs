pub mod config;
pub mod core;
pub mod error;
pub mod homogeneous;
pub mod log;
pub mod output_log;
pub mod process;
pub mod process_creator;
pub mod process_queue;
pub mod processor;
pub mod round_robin_scheduler;
pub mod simulation;
pub mod util;
