/* 3rd party libraries */
use clap::{Arg, Command};
use log::info;
use std::io;
use std::sync::Arc;

/* Custom libraries */
use fleet::InMemoryCarRepository;
use service::{CarService, ServicePool};

/* Modules */
mod config;
mod console;
mod dispatcher;
mod elevator;
mod fleet;
mod service;
mod shared;

/* Main */
fn main() {
    // Initialize logging, RUST_LOG overrides the default level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Command::new("elevator_dispatch")
        .about("Dispatches floor calls to a fleet of elevator cars")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .takes_value(true)
                .default_value("config.toml")
                .help("Path to the configuration file"),
        )
        .arg(
            Arg::new("demo")
                .long("demo")
                .help("Run the scripted demo instead of reading commands from stdin"),
        )
        .get_matches();

    // Load the configuration
    let config_path = args.value_of("config").unwrap_or("config.toml");
    let config = unwrap_or_exit!(config::load_config(config_path));
    info!(
        "Building with {} cars serving floors {}..={}, lobby {}",
        config.elevator.car_count,
        config.elevator.min_floor,
        config.elevator.max_floor,
        config.elevator.lobby_floor
    );

    // Create the fleet and start the car service
    let repository = Arc::new(unwrap_or_exit!(InMemoryCarRepository::new(&config.elevator)));
    let service = CarService::new(repository, &config.elevator);
    let pool = unwrap_or_exit!(ServicePool::start(service, &config.service));
    let client = pool.client();

    if args.is_present("demo") {
        unwrap_or_exit!(console::run_demo(&client, &mut io::stdout()));
    } else {
        let stdin = io::stdin();
        unwrap_or_exit!(console::run_console(&client, stdin.lock(), &mut io::stdout()));
    }

    pool.shutdown();
}
