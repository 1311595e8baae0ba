use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;
use colored::Colorize;
use rostercar_car::CarReader;
use rostercar_dag::DirectoryNode;
use rostercar_sdk::{archive_file_name, ArchiveBuilder};
use rostercar_types::{Block, BlockCodec, ContentId};
use serde_json::json;
use tracing::warn;

use crate::cli::*;
use crate::config::PackConfig;
use crate::input::{collect_payloads, read_manifest};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Pack(args) => cmd_pack(args, &cli.format),
        Command::Inspect(args) => cmd_inspect(args, &cli.format),
        Command::Verify(args) => cmd_verify(args, &cli.format),
    }
}

fn cmd_pack(args: PackArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => PackConfig::load(path)?,
        None => PackConfig::default(),
    };
    if let Some(size) = args.max_leaf_size {
        config.import.max_leaf_size = size;
    }

    let mut payloads = match &args.manifest {
        Some(path) => read_manifest(path)?,
        None => Vec::new(),
    };
    payloads.extend(collect_payloads(&args.inputs)?);
    let count = payloads.len();

    let archive = ArchiveBuilder::new()
        .config(config.import)
        .build(payloads)?;

    let output = args.output.unwrap_or_else(|| {
        let name = PathBuf::from(archive_file_name(count));
        match &config.output_dir {
            Some(dir) => dir.join(name),
            None => name,
        }
    });
    let file = File::create(&output).with_context(|| format!("creating {}", output.display()))?;
    let written = archive.write_to(BufWriter::new(file))?;

    match format {
        OutputFormat::Json => println!(
            "{}",
            json!({
                "root": archive.root().to_string(),
                "cards": count,
                "blocks": archive.block_count(),
                "bytes": written,
                "output": output.display().to_string(),
            })
        ),
        OutputFormat::Text => {
            println!(
                "{} Packed {} cards into {}",
                "✓".green().bold(),
                count,
                output.display().to_string().bold()
            );
            println!("  Root: {}", archive.root().to_string().cyan());
            println!("  Blocks: {}, {} bytes", archive.block_count(), written);
        }
    }
    Ok(())
}

fn cmd_inspect(args: InspectArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let reader = CarReader::open(&args.archive)
        .with_context(|| format!("opening {}", args.archive.display()))?;
    let blocks: Vec<Block> = reader.blocks().collect::<Result<_, _>>()?;

    let directory = reader
        .roots()
        .first()
        .and_then(|root| root_directory(root, &blocks));

    match format {
        OutputFormat::Json => {
            let value = json!({
                "roots": reader.roots().iter().map(|r| r.to_string()).collect::<Vec<_>>(),
                "blocks": blocks.iter().map(|b| json!({
                    "cid": b.id().to_string(),
                    "codec": b.codec().to_string(),
                    "size": b.size(),
                })).collect::<Vec<_>>(),
                "entries": directory.iter().flat_map(|d| &d.entries).map(|e| json!({
                    "name": e.name,
                    "cid": e.id.to_string(),
                    "size": e.size,
                })).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            for root in reader.roots() {
                println!("Root: {}", root.to_string().cyan().bold());
                if let Some(legacy) = root.to_legacy_string() {
                    println!("      {}", legacy.dimmed());
                }
            }
            println!("\n{} blocks:", blocks.len());
            for block in &blocks {
                println!(
                    "  {:<7} {} {:>8}",
                    block.codec().to_string().yellow(),
                    block.id(),
                    block.size()
                );
            }
            if let Some(dir) = directory {
                println!("\n{} entries:", dir.len());
                for entry in &dir.entries {
                    println!(
                        "  {} {} {:>8}",
                        entry.name.bold(),
                        entry.id.to_string().dimmed(),
                        entry.size
                    );
                }
            }
        }
    }
    Ok(())
}

/// Decode the root block as a directory, if it is one.
fn root_directory(root: &ContentId, blocks: &[Block]) -> Option<DirectoryNode> {
    let block = blocks.iter().find(|b| b.id() == root)?;
    if block.codec() != BlockCodec::DagPb {
        return None;
    }
    match DirectoryNode::from_block(block) {
        Ok(dir) => Some(dir),
        Err(e) => {
            warn!(root = %root, error = %e, "root block is not a readable directory");
            None
        }
    }
}

fn cmd_verify(args: VerifyArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let reader = CarReader::open(&args.archive)
        .with_context(|| format!("opening {}", args.archive.display()))?;
    let report = reader
        .verify()
        .with_context(|| format!("verifying {}", args.archive.display()))?;

    match format {
        OutputFormat::Json => println!(
            "{}",
            json!({
                "ok": true,
                "roots": report.roots.iter().map(|r| r.to_string()).collect::<Vec<_>>(),
                "blocks": report.block_count,
                "bytes": report.block_bytes,
            })
        ),
        OutputFormat::Text => println!(
            "{} {} blocks verified ({} bytes)",
            "✓".green().bold(),
            report.block_count,
            report.block_bytes
        ),
    }
    Ok(())
}
