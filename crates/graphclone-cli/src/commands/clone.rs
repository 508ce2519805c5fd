//! Clone command: read a document, clone one subgraph, print the result

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use graphclone_core::{EntityId, Graph};

use crate::config::Config;
use crate::output::format_output;
use crate::Cli;

pub fn run(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let text = read_input(&cli.input)?;
    let rendered = execute(&text, cli, config)?;
    println!("{}", rendered);
    Ok(())
}

/// Decode `text`, clone the subgraph rooted at `cli.entity_id`, and render
/// the result
pub fn execute(text: &str, cli: &Cli, config: &Config) -> anyhow::Result<String> {
    let root = EntityId(cli.entity_id);
    let sort_links = cli.sort_links(config);
    let mut graph = Graph::from_json_str(text, sort_links)
        .with_context(|| format!("Failed to parse {} as JSON", cli.input.display()))?;

    tracing::info!(
        "Loaded {} entities and {} links (sorted: {})",
        graph.len(),
        graph.link_count(),
        sort_links
    );

    match graph.clone_subgraph(root) {
        Some(summary) => tracing::info!(
            "Cloned entity {} as {}: {} entities, {} internal links, {} attached links",
            summary.root,
            summary.cloned_root,
            summary.entities_cloned(),
            summary.edges_cloned,
            summary.edges_attached
        ),
        None if graph.contains(root) => {
            tracing::warn!("Entity {} not cloned, graph left unchanged", root)
        }
        None => tracing::warn!("Entity {} not found, graph left unchanged", root),
    }

    format_output(&graph.to_document(), cli.output_format(config))
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        tracing::debug!("Reading document from stdin");
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }

    tracing::debug!("Reading document from {:?}", path);
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
