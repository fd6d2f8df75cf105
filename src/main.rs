use bizdash::cli::{self, Command, USAGE};
use bizdash::core::config::AppConfig;
use dotenvy::dotenv;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match Command::parse(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            std::process::exit(2);
        }
    };

    let config = if command.needs_config() {
        match AppConfig::from_env() {
            Ok(config) => Some(config),
            Err(e) => {
                error!("Invalid configuration: {e}");
                std::process::exit(1);
            }
        }
    } else {
        None
    };

    if let Err(e) = cli::run(command, config).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}
