use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "rostercar",
    about = "Pack rendered roster cards into a content-addressed CAR archive",
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

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build a CAR archive from card files
    Pack(PackArgs),
    /// List the roots, blocks and directory entries of an archive
    Inspect(InspectArgs),
    /// Re-hash every block of an archive against its CID
    Verify(VerifyArgs),
}

#[derive(Args)]
pub struct PackArgs {
    /// Card files, or directories whose files are all cards
    pub inputs: Vec<PathBuf>,
    /// JSON manifest: an array of `{ "name", "content" }` objects
    #[arg(long)]
    pub manifest: Option<PathBuf>,
    /// Output path (defaults to "<N> Player Images.car")
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Override the chunking threshold in bytes
    #[arg(long)]
    pub max_leaf_size: Option<usize>,
}

#[derive(Args)]
pub struct InspectArgs {
    pub archive: PathBuf,
}

#[derive(Args)]
pub struct VerifyArgs {
    pub archive: PathBuf,
}
