use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use rostercar_dag::Payload;
use serde::Deserialize;
use tracing::debug;

/// One card as written by the rendering front end.
#[derive(Debug, Deserialize)]
struct NamedContent {
    name: String,
    content: String,
}

/// Read a JSON manifest of `{ name, content }` cards, keeping their order.
pub fn read_manifest(path: &Path) -> anyhow::Result<Vec<Payload>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading manifest {}", path.display()))?;
    let cards: Vec<NamedContent> = serde_json::from_str(&text)
        .with_context(|| format!("parsing manifest {}", path.display()))?;
    Ok(cards
        .into_iter()
        .map(|card| Payload::new(card.name, card.content))
        .collect())
}

/// Turn file and directory arguments into payloads.
///
/// Files keep argument order. A directory contributes its regular files
/// sorted by name, so the same directory always yields the same archive.
pub fn collect_payloads(inputs: &[PathBuf]) -> anyhow::Result<Vec<Payload>> {
    let mut payloads = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(input)
                .with_context(|| format!("listing {}", input.display()))?
            {
                let path = entry?.path();
                if path.is_file() {
                    files.push(path);
                }
            }
            files.sort();
            for file in files {
                payloads.push(read_file(&file)?);
            }
        } else if input.is_file() {
            payloads.push(read_file(input)?);
        } else {
            bail!("no such file or directory: {}", input.display());
        }
    }
    Ok(payloads)
}

fn read_file(path: &Path) -> anyhow::Result<Payload> {
    let Some(name) = path.file_name() else {
        bail!("no file name in {}", path.display());
    };
    let Some(name) = name.to_str().map(str::to_owned) else {
        bail!("file name is not valid UTF-8: {}", path.display());
    };
    let content = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    debug!(%name, size = content.len(), "read card");
    Ok(Payload::new(name, content))
}
