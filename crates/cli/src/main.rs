//! plait
//!
//! Converts FHIR R4B resources between JSON and XML and inspects their
//! structure.

use clap::Parser;
use plait_cli::{CliConfig, init_logging, run};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(2);
    }

    let stdout = std::io::stdout();
    run(&config, &mut stdout.lock())
}
