use chrono::{DateTime, Utc};
use log::{info, warn};
use serde_derive::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;

use crate::homogeneous::HomogeneousProcessor;
use crate::processor::ProcessorBase;

#[derive(Serialize, Deserialize)]
struct ProcessorInfo {
    number_of_cores: usize,
    threads_per_core: usize,
    number_of_slots: usize,
}

#[derive(Serialize, Deserialize)]
struct ResultInfo {
    schedule_length: usize,
    terminated_count: usize,
    process_count: usize,
}

pub fn create_yaml_file(folder_path: &str, file_name: &str) -> String {
    if fs::metadata(folder_path).is_err() {
        match fs::create_dir_all(folder_path) {
            Ok(()) => info!("Created folder: {}", folder_path),
            Err(err) => warn!("Failed to create folder {}: {}", folder_path, err),
        }
    }
    let file_path = format!("{}/{}.yaml", folder_path, file_name);
    if let Err(err) = fs::File::create(&file_path) {
        warn!("Failed to create file: {}", err);
    }
    file_path
}

pub fn create_scheduler_log_yaml_file(folder_path: &str, alg_name: &str) -> String {
    let now: DateTime<Utc> = Utc::now();
    let date = now.format("%Y-%m-%d-%H-%M-%S").to_string();
    let file_name = format!("{}-{}-log", date, alg_name);
    create_yaml_file(folder_path, &file_name)
}

pub fn append_info_to_yaml(file_path: &str, info: &str) {
    if let Ok(mut file) = OpenOptions::new()
        .write(true)
        .append(true)
        .create(true)
        .open(file_path)
    {
        if let Err(err) = file.write_all(info.as_bytes()) {
            eprintln!("Failed to write to file: {}", err);
        }
    } else {
        eprintln!("Failed to open file: {}", file_path);
    }
}

pub fn dump_processor_info_to_yaml(file_path: &str, processor: &HomogeneousProcessor) {
    let number_of_slots = processor.get_number_of_cores();
    let threads_per_core = processor.threads_per_core();
    let processor_info = ProcessorInfo {
        number_of_cores: number_of_slots / threads_per_core,
        threads_per_core,
        number_of_slots,
    };
    let yaml =
        serde_yaml::to_string(&processor_info).expect("Failed to serialize ProcessorInfo to YAML");
    append_info_to_yaml(file_path, &yaml);
}

pub fn dump_simulation_result_to_yaml(
    file_path: &str,
    schedule_length: usize,
    terminated_count: usize,
    process_count: usize,
) {
    let result_info = ResultInfo {
        schedule_length,
        terminated_count,
        process_count,
    };
    let yaml =
        serde_yaml::to_string(&result_info).expect("Failed to serialize ResultInfo to YAML");
    append_info_to_yaml(file_path, &yaml);
}
