use clap::Parser;
use hubcheck::utils::{logger, validation::Validate};
use hubcheck::{run_validation_blocking, CliConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    let config = match cli.resolve().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            tracing::error!("Configuration validation failed: {}", e);
            tracing::error!("Suggestion: {}", e.recovery_suggestion());
            eprintln!("{}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting hubcheck against {}", config.root);
    tracing::debug!("Run config: {:?}", config);

    match run_validation_blocking(&config) {
        Ok(outcome) => {
            for output in &outcome.outputs {
                match &output.path {
                    Some(path) => tracing::info!("Report saved to: {}", path),
                    None => println!("{}", output.content),
                }
            }
        }
        Err(e) => {
            tracing::error!(
                "Health check failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("{}", e.user_friendly_message());

            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
