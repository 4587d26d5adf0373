//! Command to print the resolved config trees.

use crate::demo::Demo;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use confgraph::{Config, ConfigRegistry, Entry, Parent};

/// Print every resolved config with its clusters and entries.
#[derive(Args)]
pub struct TreeCommand {
    /// Only print the config with this key (e.g. `demo:server`)
    #[arg(long, value_name = "KEY")]
    pub config: Option<String>,
}

impl TreeCommand {
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let demo = Demo::build()?;
        let configs: Vec<&Config> = match &self.config {
            Some(key) => vec![super::select(&demo, key)?],
            None => demo.configs.iter().collect(),
        };
        for config in configs {
            print!("{}", render_tree(config, &demo.registry));
        }
        Ok(())
    }
}

/// Renders one config as an indented tree.
pub fn render_tree(config: &Config, registry: &ConfigRegistry) -> String {
    let mut out = config.key().to_string();
    if registry.main_config(config.mod_id()) == Some(config.key()) {
        out.push_str(" (main)");
    }
    if let Some(description) = config.description() {
        out.push_str(&format!(" - {description}"));
    }
    out.push('\n');
    render_parent(&mut out, config, 1);
    out
}

fn render_parent(out: &mut String, parent: &Parent, depth: usize) {
    let indent = "  ".repeat(depth);
    for entry in parent.entries() {
        out.push_str(&format!("{indent}{}\n", describe_entry(entry)));
        if let Some(description) = entry.description() {
            out.push_str(&format!("{indent}  # {description}\n"));
        }
    }
    for cluster in parent.clusters() {
        let line = match cluster.description() {
            Some(description) => format!("{indent}{}/ - {description}\n", cluster.id()),
            None => format!("{indent}{}/\n", cluster.id()),
        };
        out.push_str(&line);
        render_parent(out, cluster, depth + 1);
    }
}

fn describe_entry(entry: &Entry) -> String {
    let value = entry.value();
    let mut line = entry.id().to_string();
    if entry.name_key() != entry.id() {
        line.push_str(&format!(" [{}]", entry.name_key()));
    }
    line.push_str(&format!(": {} = {}", entry.kind(), entry.format(&value)));
    if !entry.variants().is_empty() {
        line.push_str(&format!(" of {{{}}}", entry.variants().join(", ")));
    }
    if &value != entry.default_value() {
        line.push_str(&format!(" (default {})", entry.format(entry.default_value())));
    }
    if entry.requires_restart() {
        line.push_str(" (restart)");
    }
    line
}
