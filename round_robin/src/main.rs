mod trace_printer;

use clap::Parser;
use lib::output_log::*;
use lib::process_creator::create_simulation_config_from_file;
use lib::simulation::Simulation;
use log::error;
use std::process::ExitCode;
use trace_printer::{format_process_list, format_pulse, format_summary};

#[derive(Parser)]
#[clap(
    name = "round_robin",
    version = "1.0",
    about = "About:
    Simulates preemptive round-robin scheduling on number_of_cores x threads_per_core slots.
    Every process runs for its quantum of pulses per turn until all of its iterations are done."
)]
struct ArgParser {
    ///Path to the configuration file (.yaml/.yml or the pipe-separated text format).
    #[clap(short = 'f', long = "config_file_path", required = true)]
    config_file_path: String,
    ///Overrides the number of cores given in the configuration file.
    #[clap(short = 'c', long = "number_of_cores")]
    number_of_cores: Option<usize>,
    ///Overrides the threads per core given in the configuration file.
    #[clap(short = 't', long = "threads_per_core")]
    threads_per_core: Option<usize>,
    ///Path to output directory.
    #[clap(short = 'o', long = "output_dir_path", default_value = "../outputs")]
    output_dir_path: String,
}

fn main() -> ExitCode {
    env_logger::init();
    let arg: ArgParser = ArgParser::parse();

    let mut config = match create_simulation_config_from_file(&arg.config_file_path) {
        Ok(config) => config,
        Err(err) => {
            error!("Failed to load {}: {}", arg.config_file_path, err);
            eprintln!("Invalid configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };
    if let Some(number_of_cores) = arg.number_of_cores {
        config.number_of_cores = number_of_cores;
    }
    if let Some(threads_per_core) = arg.threads_per_core {
        config.threads_per_core = threads_per_core;
    }

    let mut simulation = match Simulation::new(&config) {
        Ok(simulation) => simulation,
        Err(err) => {
            eprintln!("Invalid configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };

    println!("{}\n\n", format_process_list(&config.processes));
    let terminated_count = simulation.run_with(|snapshot| println!("{}\n", format_pulse(snapshot)));
    println!("{}", format_summary(terminated_count));

    let file_path = create_scheduler_log_yaml_file(&arg.output_dir_path, "round_robin");
    dump_simulation_result_to_yaml(
        &file_path,
        simulation.schedule_length(),
        terminated_count,
        simulation.process_count(),
    );
    dump_processor_info_to_yaml(&file_path, simulation.processor());
    simulation
        .log()
        .process_logs
        .dump_process_logs_to_yaml(&file_path);
    simulation
        .log()
        .processor_log
        .dump_processor_log_to_yaml(&file_path);

    ExitCode::SUCCESS
}
