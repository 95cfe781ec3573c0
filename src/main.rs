use clap::Parser;
use solver_watch::cli::{run, Cli};
use solver_watch::config::Config;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    config.init_logging();

    if let Err(e) = run::execute(&cli, config).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
