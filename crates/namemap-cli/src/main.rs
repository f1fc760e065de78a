//! `namemap` command-line tool.
//!
//! Loads a name-map definition file and lists, maps, re-formats or exports it.

mod config;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use namemap_core::NameMap;
use serde_json::{Map, Value};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::{CliConfig, LogConfig};

/// Map names between naming domains
#[derive(Parser, Debug)]
#[command(name = "namemap")]
#[command(version, about = "Inspect and use name-map definition files")]
pub struct Cli {
    /// Definition file to load
    pub file: PathBuf,

    /// Reject definitions that repeat a term within one domain
    #[arg(long)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List domains in declaration order; the standard domain is marked with '*'
    Domains,

    /// List the terms of one domain, sorted
    Terms {
        /// Domain name
        domain: String,
    },

    /// Map a term into the first target domain that has a name for it
    Map {
        /// Source domain
        from: String,
        /// Term in the source domain
        term: String,
        /// Target domains in preference order
        to: Vec<String>,
    },

    /// Write the definition back in canonical form
    Fmt {
        /// Meta atom used for empty slots
        #[arg(short, long)]
        placeholder: Option<String>,
        /// Output file; standard output if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the rows of the standard domain as JSON
    Export,
}

fn main() -> anyhow::Result<()> {
    let config = CliConfig::load()?.apply_env();
    init_logging(&config.log)?;
    config.log_summary();

    let cli = Cli::parse();
    let mut options = config.load.clone();
    if cli.strict {
        options.duplicate_terms = namemap_core::DuplicateTermPolicy::Reject;
    }

    let file = File::open(&cli.file)
        .with_context(|| format!("cannot open '{}'", cli.file.display()))?;
    let nm = NameMap::load_with(file, &options)
        .with_context(|| format!("cannot load '{}'", cli.file.display()))?;
    info!(file = %cli.file.display(), domains = nm.domain_count(), "Loaded definition");

    let stdout = io::stdout();
    run(&nm, cli.command, &config, &mut stdout.lock())
}

fn init_logging(log: &LogConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log.filter))
        .context("invalid log filter")?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);
    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

fn run(
    nm: &NameMap,
    command: Command,
    config: &CliConfig,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::Domains => {
            for (idx, name) in nm.domain_names().enumerate() {
                let marker = if Some(idx) == nm.standard_index() { "*" } else { " " };
                writeln!(out, "{marker} {idx} {name}")?;
            }
        }
        Command::Terms { domain } => {
            let idx = nm
                .domain_index(&domain)
                .ok_or_else(|| namemap_core::NameMapError::unknown_domain("terms", &domain))?;
            let mut terms = Vec::with_capacity(nm.term_count(idx));
            nm.for_each_term(idx, |term| terms.push(term.to_string()));
            terms.sort();
            for term in terms {
                writeln!(out, "{term}")?;
            }
        }
        Command::Map { from, term, to } => {
            let targets: Vec<&str> = to.iter().map(String::as_str).collect();
            let view = nm
                .from_domain(&from, config.fallback_to_standard)
                .to_domains(config.append_standard, &targets);
            view.check("cli", &from)?;
            let (mapped, position) = view.map(&term);
            let domain = position
                .and_then(|pos| view.targets().get(pos))
                .and_then(|&idx| nm.domain_name(idx))
                .unwrap_or("-");
            debug!(term = %term, mapped, domain, "Mapped term");
            writeln!(out, "{mapped}\t{domain}")?;
        }
        Command::Fmt { placeholder, output } => {
            let placeholder = placeholder.as_deref().unwrap_or(&config.placeholder);
            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("cannot create '{}'", path.display()))?;
                    nm.save(BufWriter::new(file), placeholder)?;
                    info!(path = %path.display(), "Wrote definition");
                }
                None => nm.save(&mut *out, placeholder)?,
            }
        }
        Command::Export => {
            let names: Vec<&str> = nm.domain_names().collect();
            let rows: Vec<Map<String, Value>> = nm
                .standard_rows()?
                .map(|row| {
                    names
                        .iter()
                        .zip(row.slots())
                        .map(|(name, slot)| {
                            let value = if slot.is_empty() {
                                Value::Null
                            } else {
                                Value::String(slot.clone())
                            };
                            (name.to_string(), value)
                        })
                        .collect()
                })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &rows)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
