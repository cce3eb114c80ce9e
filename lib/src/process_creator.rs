//! Build a simulation configuration from a YAML file or from the pipe-separated text format
use crate::config::SimulationConfig;
use crate::error::ConfigError;
use crate::process::ProcessDescriptor;
use crate::util::{is_yaml_path, load_yaml};

use log::warn;
use std::fs;
use yaml_rust::Yaml;

const MAX_NAME_LENGTH: usize = 49;
const DESCRIPTOR_FIELDS: [&str; 8] = [
    "pid",
    "ppid",
    "name",
    "registers",
    "size",
    "threads",
    "quantum",
    "iterations",
];

/// load a configuration file and return the validated simulation configuration
///
/// `.yaml`/`.yml` files are read as YAML, anything else as the text format:
///
/// ```text
/// Procesadores [2]
/// Hilos [1]
/// 1 | 0 | init | 8 | 512 | 1 | 2 | 2
/// ```
///
/// # Example
///
/// ```
/// use lib::process_creator::create_simulation_config_from_file;
///
/// let config = create_simulation_config_from_file("tests/sample_configs/two_cores.yaml").unwrap();
/// assert_eq!(config.number_of_slots().unwrap(), 2);
/// assert_eq!(config.processes[0].name, "init");
/// ```
pub fn create_simulation_config_from_file(
    file_path: &str,
) -> Result<SimulationConfig, ConfigError> {
    let config = if is_yaml_path(file_path) {
        create_simulation_config_from_yaml(file_path)?
    } else {
        parse_text_config(&fs::read_to_string(file_path)?)?
    };
    config.validate()?;
    Ok(config)
}

fn get_yaml_field<T: TryFrom<i64>>(
    yaml: &Yaml,
    entry: usize,
    field: &'static str,
) -> Result<T, ConfigError> {
    let value = yaml[field].as_i64().ok_or(ConfigError::MissingField {
        line: entry,
        field,
    })?;
    T::try_from(value).map_err(|_| ConfigError::MalformedDescriptor {
        line: entry,
        reason: format!("`{}` is out of range: {}", field, value),
    })
}

fn create_simulation_config_from_yaml(file_path: &str) -> Result<SimulationConfig, ConfigError> {
    let yaml_docs = load_yaml(file_path)?;
    let yaml_doc = yaml_docs
        .first()
        .ok_or(ConfigError::MissingTopology("number_of_cores"))?;

    let number_of_cores = yaml_doc["number_of_cores"]
        .as_i64()
        .ok_or(ConfigError::MissingTopology("number_of_cores"))?;
    let threads_per_core = yaml_doc["threads_per_core"]
        .as_i64()
        .ok_or(ConfigError::MissingTopology("threads_per_core"))?;

    let mut processes = Vec::new();
    // Entries are numbered from 1 in error messages.
    for (i, process) in yaml_doc["processes"]
        .as_vec()
        .map(|v| v.as_slice())
        .unwrap_or_default()
        .iter()
        .enumerate()
    {
        let entry = i + 1;
        let name = process["name"]
            .as_str()
            .ok_or(ConfigError::MissingField {
                line: entry,
                field: "name",
            })?
            .to_owned();
        processes.push(ProcessDescriptor {
            pid: get_yaml_field(process, entry, "pid")?,
            ppid: get_yaml_field(process, entry, "ppid")?,
            name,
            registers: get_yaml_field(process, entry, "registers")?,
            size: get_yaml_field(process, entry, "size")?,
            threads: get_yaml_field(process, entry, "threads")?,
            quantum: get_yaml_field(process, entry, "quantum")?,
            iterations: get_yaml_field(process, entry, "iterations")?,
        });
    }

    Ok(SimulationConfig {
        number_of_cores: usize::try_from(number_of_cores)
            .map_err(|_| ConfigError::InvalidCoreCount)?,
        threads_per_core: usize::try_from(threads_per_core)
            .map_err(|_| ConfigError::InvalidThreadCount)?,
        processes,
    })
}

fn parse_bracket_value(line_no: usize, line: &str) -> Result<i64, ConfigError> {
    let malformed = |reason: String| ConfigError::MalformedDescriptor {
        line: line_no,
        reason,
    };
    let start = line
        .find('[')
        .ok_or_else(|| malformed("expected a value in the form `[N]`".to_string()))?;
    let end = line[start..]
        .find(']')
        .map(|offset| start + offset)
        .ok_or_else(|| malformed("missing closing `]`".to_string()))?;
    let value = line[start + 1..end].trim();
    value
        .parse::<i64>()
        .map_err(|err| malformed(format!("invalid number `{}`: {}", value, err)))
}

fn parse_descriptor_field<T: std::str::FromStr>(
    line_no: usize,
    field: &'static str,
    value: &str,
) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|err| ConfigError::MalformedDescriptor {
            line: line_no,
            reason: format!("invalid `{}` value `{}`: {}", field, value, err),
        })
}

fn parse_descriptor_line(line_no: usize, line: &str) -> Result<ProcessDescriptor, ConfigError> {
    let columns: Vec<&str> = line.split('|').map(str::trim).collect();
    if columns.len() < DESCRIPTOR_FIELDS.len() {
        let field = DESCRIPTOR_FIELDS[columns.len()];
        return Err(ConfigError::MissingField {
            line: line_no,
            field,
        });
    }
    if columns.len() > DESCRIPTOR_FIELDS.len() {
        return Err(ConfigError::MalformedDescriptor {
            line: line_no,
            reason: format!(
                "expected {} fields, found {}",
                DESCRIPTOR_FIELDS.len(),
                columns.len()
            ),
        });
    }

    let raw_name = columns[2]
        .split_whitespace()
        .next()
        .ok_or(ConfigError::MissingField {
            line: line_no,
            field: "name",
        })?;
    let name: String = raw_name.chars().take(MAX_NAME_LENGTH).collect();
    if name.len() < raw_name.len() {
        warn!(
            "line {}: process name truncated to {} characters: {}",
            line_no, MAX_NAME_LENGTH, name
        );
    }

    Ok(ProcessDescriptor {
        pid: parse_descriptor_field(line_no, "pid", columns[0])?,
        ppid: parse_descriptor_field(line_no, "ppid", columns[1])?,
        name,
        registers: parse_descriptor_field(line_no, "registers", columns[3])?,
        size: parse_descriptor_field(line_no, "size", columns[4])?,
        threads: parse_descriptor_field(line_no, "threads", columns[5])?,
        quantum: parse_descriptor_field(line_no, "quantum", columns[6])?,
        iterations: parse_descriptor_field(line_no, "iterations", columns[7])?,
    })
}

/// Parse the text format.
///
/// Lines before the thread count are only scanned for the core and thread counts.
/// Every non-blank line after it is one process descriptor.
pub fn parse_text_config(content: &str) -> Result<SimulationConfig, ConfigError> {
    let mut number_of_cores = None;
    let mut threads_per_core = None;
    // Line numbers start at 1.
    let mut lines = content.lines().enumerate().map(|(i, line)| (i + 1, line));

    for (line_no, line) in lines.by_ref() {
        let line = line.trim_start();
        if line.starts_with("Procesadores") || line.starts_with("Processors") {
            number_of_cores = Some(parse_bracket_value(line_no, line)?);
        } else if line.starts_with("Hilos") || line.starts_with("Threads") {
            threads_per_core = Some(parse_bracket_value(line_no, line)?);
            break;
        }
    }

    let number_of_cores =
        number_of_cores.ok_or(ConfigError::MissingTopology("number_of_cores"))?;
    let threads_per_core =
        threads_per_core.ok_or(ConfigError::MissingTopology("threads_per_core"))?;

    let mut processes = Vec::new();
    for (line_no, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        processes.push(parse_descriptor_line(line_no, line)?);
    }

    Ok(SimulationConfig {
        number_of_cores: usize::try_from(number_of_cores)
            .map_err(|_| ConfigError::InvalidCoreCount)?,
        threads_per_core: usize::try_from(threads_per_core)
            .map_err(|_| ConfigError::InvalidThreadCount)?,
        processes,
    })
}
