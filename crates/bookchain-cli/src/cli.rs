use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bookchain",
    about = "Bookchain: append-only hash chain of book checkouts",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start a fresh chain and serve it over HTTP
    Serve(ServeArgs),
    /// Derive the identifier the server assigns to a book
    BookId(BookIdArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Address to listen on, overriding the configuration file
    #[arg(short, long)]
    pub bind: Option<SocketAddr>,
    /// Emit compact instead of indented JSON
    #[arg(long)]
    pub compact: bool,
}

#[derive(Args)]
pub struct BookIdArgs {
    #[arg(long)]
    pub isbn: String,
    #[arg(long)]
    pub publish_date: String,
}
