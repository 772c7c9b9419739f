use clap::Parser;
use rent_or_buy::api::{Cli, Command, run_http_server, run_simulate_command};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    match cli.command {
        Command::Serve { port, log_level } => {
            rent_or_buy::logging::init(&log_level);
            if let Err(e) = run_http_server(port).await {
                tracing::error!(error = %e, "server error");
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Command::Simulate(args) => {
            rent_or_buy::logging::init(&args.log_level);
            match run_simulate_command(&args) {
                Ok(json) => println!("{json}"),
                Err(msg) => {
                    eprintln!("{msg}");
                    std::process::exit(1);
                }
            }
        }
    }
}
