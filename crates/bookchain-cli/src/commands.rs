use std::sync::Arc;

use anyhow::Context;
use bookchain_crypto::ChainHasher;
use bookchain_ledger::Chain;
use bookchain_server::{BookchainServer, ServerConfig};
use colored::Colorize;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::BookId(args) => cmd_book_id(args, &cli.format),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = server_config(&args)?;
    let chain = Arc::new(Chain::new());
    let server = BookchainServer::new(config, chain);

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn server_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if args.compact {
        config.pretty_json = false;
    }
    tracing::debug!(?config, "resolved server configuration");
    Ok(config)
}

fn cmd_book_id(args: BookIdArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let id = ChainHasher::book_id(&args.isbn, &args.publish_date);
    match format {
        OutputFormat::Text => println!("{} {}", "Book id:".green().bold(), id.yellow()),
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "isbn": args.isbn,
                "publish_date": args.publish_date,
                "id": id,
            })
        ),
    }
    Ok(())
}
