//! trackmirror CLI entry point

use clap::Parser;
use std::process::ExitCode;
use trackmirror::config::{Cli, Settings};
use trackmirror::pipeline;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(&cli);

    if let Err(e) = validate_inputs(&cli) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let settings = Settings::from_cli(&cli);

    match pipeline::run(&settings) {
        Ok(summary) => {
            if settings.dry_run {
                println!();
                println!("=== DRY RUN MODE ===");
                println!();
                for operation in &summary.operations {
                    println!("{}", operation);
                }
            }
            println!();
            println!(
                "Summary: {} directories, {} files, {} tracks ({} converted) in {:.2}s",
                summary.directories,
                summary.files_copied,
                summary.tracks(),
                summary.tracks_converted,
                summary.elapsed.as_secs_f64()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Fatal error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let filter = cli.log_level().as_str().to_lowercase();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

fn validate_inputs(cli: &Cli) -> Result<(), String> {
    if !cli.input.is_dir() {
        return Err(format!(
            "Input directory does not exist: {}\n\n  Tip: Check the path is correct and accessible.\n  Examples:\n    trackmirror -i ~/Music -o /mnt/player/Music\n    trackmirror -i ~/Music -o ./mp3 --convert mp3",
            cli.input.display()
        ));
    }

    // We create the output dir itself, but not its parents
    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(format!(
                "Output parent directory does not exist: {}\n\n  Tip: The output directory will be created automatically,\n  but its parent directory must exist.\n  Example: mkdir -p {}",
                parent.display(),
                parent.display()
            ));
        }
    }

    if cli.extension.trim().trim_start_matches('.').is_empty() {
        return Err("--extension must not be empty".to_string());
    }

    Ok(())
}
