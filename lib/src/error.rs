//! Errors raised while building a simulation from its configuration
use thiserror::Error;

/// Rejected configuration. Once a simulation is constructed no error can occur.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("number of cores must be greater than 0")]
    InvalidCoreCount,

    #[error("threads per core must be greater than 0")]
    InvalidThreadCount,

    #[error("process {pid} has a quantum of 0")]
    InvalidQuantum { pid: i32 },

    #[error("process {pid} has 0 iterations")]
    InvalidIterations { pid: i32 },

    #[error("{number_of_cores} cores x {threads_per_core} threads per core overflows the slot count")]
    SlotCountOverflow {
        number_of_cores: usize,
        threads_per_core: usize,
    },

    #[error("pid {0} appears more than once")]
    DuplicatePid(i32),

    #[error("line {line}: missing field `{field}`")]
    MissingField { line: usize, field: &'static str },

    #[error("line {line}: {reason}")]
    MalformedDescriptor { line: usize, reason: String },

    #[error("configuration does not define `{0}`")]
    MissingTopology(&'static str),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] yaml_rust::ScanError),
}
