use anyhow::Context;
use clap::Parser;
use tower_lsp::{LspService, Server};
use tracing::info;

use recette_language_server::logging::init_logger;
use recette_language_server::lsp::{RecetteBackend, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "recette-language-server")]
#[command(version, about = "Language server for French cooking recipes")]
struct Args {
    /// Communicate over stdin/stdout (the only supported transport)
    #[arg(long)]
    stdio: bool,

    /// Log filter for stderr, e.g. "debug" or "recette_language_server=trace"
    #[arg(long)]
    log_level: Option<String>,

    /// Disable ANSI colors in stderr logs
    #[arg(long)]
    no_color: bool,

    /// Do not write session logs to the user cache directory
    #[arg(long)]
    no_file_logging: bool,

    /// Wait this long after an edit before validating
    #[arg(long, value_name = "MS")]
    validation_delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let _guard = init_logger(args.no_color, args.log_level.as_deref(), !args.no_file_logging)
        .context("failed to initialize logging")?;

    let config = ServerConfig::from_env_or_default(args.validation_delay_ms);
    info!(
        "Starting recette-language-server v{} (stdio={}, {:?})",
        env!("CARGO_PKG_VERSION"),
        args.stdio,
        config
    );

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(move |client| RecetteBackend::new(client, config.clone()));
    Server::new(stdin, stdout, socket).serve(service).await;

    info!("Server stopped");
    Ok(())
}
