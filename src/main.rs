use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};
use typesift::identify::probe::{probe_view, InferProbe};
use typesift::io::{read_file_with_limit, IoLimits};
use typesift::unpack::{DuplicateSet, EmlUnpacker, ExtensionPicker, Unpacker};
use typesift::{Classifier, DetectorSet, FileView, Identification, RuleTable, SiftConfig};

/// Identify the type of untrusted files for sandbox routing.
#[derive(Parser, Debug)]
#[command(name = "typesift", version, about = "File-type identification for untrusted blobs", long_about = None)]
struct Cli {
    /// JSON configuration file; defaults apply to anything it omits.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify one or more files.
    Identify {
        /// Files to classify.
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Use this magic description instead of probing content.
        #[arg(long)]
        magic: Option<String>,

        /// Use this mime type instead of probing content.
        #[arg(long)]
        mime: Option<String>,

        /// Emit one JSON object per file.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Extract and classify the attachments of an email message.
    UnpackEml {
        path: PathBuf,

        /// File with one previously seen SHA-256 digest per line.
        #[arg(long)]
        seen: Option<PathBuf>,

        /// Unpack even if the file name does not look like an email.
        #[arg(long, default_value_t = false)]
        force: bool,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the built-in rule table in priority order.
    Rules,

    /// Print the effective configuration as JSON.
    Config,
}

#[derive(Serialize)]
struct FileReport<'a> {
    path: String,
    magic: &'a str,
    mime: &'a str,
    #[serde(flatten)]
    identification: &'a Identification,
}

#[derive(Serialize)]
struct EntryReport<'a> {
    filename: Option<&'a str>,
    size: usize,
    md5: &'a str,
    sha256: &'a str,
    duplicate: bool,
    #[serde(flatten)]
    identification: &'a Identification,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.log_json {
        typesift::logging::init_tracing_json();
    } else {
        typesift::logging::init_tracing();
    }

    let config = match &cli.config {
        Some(path) => SiftConfig::from_json_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => SiftConfig::default(),
    };

    match cli.command {
        Command::Identify {
            paths,
            magic,
            mime,
            json,
        } => identify_files(&config, &paths, magic.as_deref(), mime.as_deref(), json),
        Command::UnpackEml {
            path,
            seen,
            force,
            json,
        } => unpack_eml(&config, &path, seen.as_deref(), force, json),
        Command::Rules => {
            for (index, rule) in RuleTable::builtin().rules().iter().enumerate() {
                println!("{index:3} {rule}");
            }
            Ok(())
        }
        Command::Config => {
            println!("{}", config.to_json_pretty()?);
            Ok(())
        }
    }
}

fn load_view(
    config: &SiftConfig,
    path: &Path,
    magic: Option<&str>,
    mime: Option<&str>,
) -> Result<FileView> {
    let data = read_file_with_limit(path, IoLimits::from(&config.io))
        .with_context(|| format!("reading {}", path.display()))?;
    let probed = probe_view(data, &InferProbe);
    let view = if magic.is_some() || mime.is_some() {
        FileView::new(
            probed.bytes(),
            magic.unwrap_or(probed.magic()),
            mime.unwrap_or(probed.mime()),
        )
        .with_children(probed.children().iter().cloned())
    } else {
        probed
    };
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
    Ok(match name {
        Some(n) => view.with_name(n),
        None => view,
    })
}

fn identify_files(
    config: &SiftConfig,
    paths: &[PathBuf],
    magic: Option<&str>,
    mime: Option<&str>,
    json: bool,
) -> Result<()> {
    let detectors = DetectorSet::from_config(&config.detectors).context("building detectors")?;
    let classifier = Classifier::new(RuleTable::builtin(), &detectors);

    let results: Vec<(&PathBuf, Result<(FileView, Identification)>)> = paths
        .par_iter()
        .map(|path| {
            let _span = typesift::span_trace!("identify_file", path = %path.display()).entered();
            let outcome = load_view(config, path, magic, mime).map(|view| {
                let id = classifier.identify(&view);
                (view, id)
            });
            (path, outcome)
        })
        .collect();

    let mut failures = 0usize;
    for (path, outcome) in results {
        match outcome {
            Ok((view, id)) => {
                if json {
                    let report = FileReport {
                        path: path.display().to_string(),
                        magic: view.magic(),
                        mime: view.mime(),
                        identification: &id,
                    };
                    println!("{}", serde_json::to_string(&report)?);
                } else {
                    let suffix = if id.analyze_further() { " (analyze further)" } else { "" };
                    println!("{}: {}{}", path.display(), id, suffix);
                }
            }
            Err(e) => {
                failures += 1;
                warn!(path = %path.display(), error = %format!("{e:#}"), "skipped");
            }
        }
    }
    debug!(files = paths.len(), failures, "identify finished");
    if failures == paths.len() {
        bail!("no file could be read");
    }
    Ok(())
}

fn load_seen(path: Option<&Path>) -> Result<DuplicateSet> {
    let Some(path) = path else {
        return Ok(DuplicateSet::new());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading digests from {}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_ascii_lowercase)
        .collect())
}

fn unpack_eml(
    config: &SiftConfig,
    path: &Path,
    seen: Option<&Path>,
    force: bool,
    json: bool,
) -> Result<()> {
    let unpacker = EmlUnpacker::new(&config.unpack);
    if !force && !unpacker.handles(path, &ExtensionPicker::default()) {
        bail!("{} is not an .eml file (use --force)", path.display());
    }
    let raw = read_file_with_limit(path, IoLimits::from(&config.io))
        .with_context(|| format!("reading {}", path.display()))?;
    let mut seen = load_seen(seen)?;
    let entries = unpacker
        .unpack(&raw, &mut seen)
        .with_context(|| format!("unpacking {}", path.display()))?;

    let detectors = DetectorSet::from_config(&config.detectors).context("building detectors")?;
    let classifier = Classifier::new(RuleTable::builtin(), &detectors);
    for entry in &entries {
        let id = classifier.identify(&entry.to_file_view(&InferProbe));
        if json {
            let report = EntryReport {
                filename: entry.filename.as_deref(),
                size: entry.size(),
                md5: &entry.hashes.md5,
                sha256: &entry.hashes.sha256,
                duplicate: entry.duplicate,
                identification: &id,
            };
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!(
                "{}\t{}\t{}\t{}{}",
                entry.filename.as_deref().unwrap_or("-"),
                entry.size(),
                entry.hashes.sha256,
                id,
                if entry.duplicate { "\tduplicate" } else { "" }
            );
        }
    }
    Ok(())
}
