use clap::{Parser, Subcommand};
use enduro::build_info;
use enduro::enduro::types::TARGET_FPS;
use enduro::{fetch_rate, run_session, EnduroConfig, RunOutcome};
use std::error::Error;
use std::process::ExitCode;

/// Mini Enduro - dodge traffic on a scrolling road.
#[derive(Parser)]
#[command(name = "enduro", version = build_info::BUILD_VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Seed for traffic placement (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Target frames per second
    #[arg(long, default_value_t = TARGET_FPS, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,
}

#[derive(Subcommand)]
enum Command {
    /// Print the current USD→BRL bid
    Rate {
        /// Endpoint returning `{"USDBRL": {"bid": ...}}`
        #[arg(long)]
        url: Option<String>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Rate { url }) => match fetch_rate(url.as_deref()) {
            Ok(rate) => {
                println!("USD-BRL: {:.4}", rate);
                ExitCode::SUCCESS
            }
            Err(e) => {
                report(&e);
                ExitCode::FAILURE
            }
        },
        None => {
            let config = EnduroConfig {
                target_fps: cli.fps,
                ..EnduroConfig::default()
            };
            match run_session(config, cli.seed) {
                Ok(summary) => {
                    let seconds = summary.elapsed_ms as f64 / 1000.0;
                    match summary.outcome {
                        RunOutcome::Crashed => println!(
                            "Crashed after {:.1}s. {} cars spawned.",
                            seconds, summary.obstacles_spawned
                        ),
                        RunOutcome::Quit => println!("Quit after {:.1}s. Goodbye!", seconds),
                    }
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    report(&e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}

/// Print an error and its cause chain to stderr.
fn report(err: &dyn Error) {
    eprintln!("Error: {}", err);
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
}
