use dotenvy::dotenv;

use status_client::cli::Cli;
use status_client::client;
use status_client::config::Config;
use status_client::logging::init_logging;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok();
    init_logging();

    let cli = Cli::parse_verbatim();

    let config = Config::from_env().unwrap_or_else(|err| {
        tracing::error!("{}", err);
        std::process::exit(1);
    });

    tracing::debug!("Client started with config: {:?}", config);

    let outcome = client::run(&config, &cli.command).await;
    let status = client::report(&mut std::io::stdout().lock(), outcome);
    std::process::exit(status);
}
