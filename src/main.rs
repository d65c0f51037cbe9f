use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{info, warn};

use cinder::config::Config;
use cinder::normalize::resolver::{CachingResolver, IdentityResolver, UrlResolver};
use cinder::output::{terminal, truncate_chars};
use cinder::records::{AccountRecord, PostRecord};
use cinder::{extract_account_features, extract_post_features, AccountFeatureVector, RuleSet};

/// Cinder: feature extraction for social media bot detection.
///
/// Turns raw posts and account profiles into fixed-length numeric vectors
/// for downstream classifiers.
#[derive(Parser)]
#[command(name = "cinder", version, about)]
struct Cli {
    /// Never touch the network; shortened links are kept as written
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the features of one post (JSON: {"post": ..., "author": ...})
    Post {
        file: PathBuf,

        /// Print a colored table instead of JSON
        #[arg(long)]
        table: bool,
    },

    /// Extract the features of one account (JSON: {"account": ..., "posts": [...]})
    Account {
        file: PathBuf,

        /// Print a colored table instead of JSON
        #[arg(long)]
        table: bool,
    },

    /// Extract features for every account in a JSONL file
    Batch {
        /// One account record per line
        input: PathBuf,

        /// Write results here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the feature layout (post layout unless --account)
    Layout {
        #[arg(long)]
        account: bool,
    },
}

#[derive(Serialize)]
struct BatchLine<'a> {
    id: &'a str,
    features: &'a AccountFeatureVector,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cinder=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Layout { account } => {
            if account {
                terminal::display_account_layout();
            } else {
                terminal::display_post_layout();
            }
        }

        Commands::Post { file, table } => {
            let config = Config::load()?;
            let rules = RuleSet::new().context("Failed to build the rule set")?;
            let resolver = build_resolver(&config, &rules, cli.offline)?;

            let record: PostRecord = read_json(&file)?;
            let features = extract_post_features(&rules, &resolver, &record.post, &record.author)
                .with_context(|| format!("Failed to extract features for post {}", record.post.id))?;

            if table {
                let title = format!(
                    "Post {} by @{}: {}",
                    record.post.id,
                    record.author.screen_name,
                    truncate_chars(&record.post.text, 60)
                );
                terminal::display_post_vector(&title, &features);
            } else {
                println!("{}", serde_json::to_string_pretty(&features)?);
            }
        }

        Commands::Account { file, table } => {
            let config = Config::load()?;
            let rules = RuleSet::new().context("Failed to build the rule set")?;
            let resolver = build_resolver(&config, &rules, cli.offline)?;

            let record: AccountRecord = read_json(&file)?;
            let features = extract_account_features(&rules, &resolver, &record.account, &record.posts)
                .with_context(|| {
                    format!("Failed to extract features for @{}", record.account.screen_name)
                })?;

            if table {
                let title = format!(
                    "@{} ({} posts)",
                    record.account.screen_name,
                    record.posts.len()
                );
                terminal::display_account_vector(&title, &features);
            } else {
                println!("{}", serde_json::to_string_pretty(&features)?);
            }
        }

        Commands::Batch { input, output } => {
            let config = Config::load()?;
            let rules = RuleSet::new().context("Failed to build the rule set")?;
            let resolver = build_resolver(&config, &rules, cli.offline)?;
            run_batch(&rules, &resolver, &input, output.as_deref())?;
        }
    }

    Ok(())
}

/// Pick the resolver for this run, wrapped in a cache shared by every record.
fn build_resolver(
    config: &Config,
    rules: &RuleSet,
    offline_flag: bool,
) -> Result<CachingResolver<Box<dyn UrlResolver>>> {
    let offline = offline_flag || config.offline;

    let inner: Box<dyn UrlResolver> = if offline {
        info!("Offline mode, shortened links are kept as written");
        Box::new(IdentityResolver)
    } else {
        online_resolver(config, rules)?
    };

    Ok(CachingResolver::new(inner))
}

#[cfg(feature = "http")]
fn online_resolver(config: &Config, rules: &RuleSet) -> Result<Box<dyn UrlResolver>> {
    let resolver = cinder::normalize::http::HttpUrlResolver::new(rules, &config.resolver_settings())
        .context("Failed to build the HTTP client")?;
    Ok(Box::new(resolver))
}

#[cfg(not(feature = "http"))]
fn online_resolver(_config: &Config, _rules: &RuleSet) -> Result<Box<dyn UrlResolver>> {
    warn!("Built without the `http` feature, shortened links are kept as written");
    Ok(Box::new(IdentityResolver))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn run_batch(
    rules: &RuleSet,
    resolver: &CachingResolver<Box<dyn UrlResolver>>,
    input: &Path,
    output: Option<&Path>,
) -> Result<()> {
    let lines: Vec<String> = BufReader::new(
        File::open(input).with_context(|| format!("Failed to open {}", input.display()))?,
    )
    .lines()
    .collect::<std::io::Result<_>>()
    .with_context(|| format!("Failed to read {}", input.display()))?;

    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };

    let pb = ProgressBar::new(lines.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Accounts [{bar:30}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut written = 0usize;
    let mut skipped = 0usize;

    for (line_no, line) in lines.iter().enumerate() {
        pb.inc(1);
        if line.trim().is_empty() {
            continue;
        }

        let record: AccountRecord = match serde_json::from_str(line) {
            Ok(record) => record,
            Err(e) => {
                warn!(line = line_no + 1, error = %e, "Skipping unparseable record");
                skipped += 1;
                continue;
            }
        };

        match extract_account_features(rules, resolver, &record.account, &record.posts) {
            Ok(features) => {
                let out = BatchLine {
                    id: &record.account.id,
                    features: &features,
                };
                serde_json::to_writer(&mut writer, &out)?;
                writeln!(writer)?;
                written += 1;
            }
            Err(e) => {
                warn!(
                    line = line_no + 1,
                    account = record.account.screen_name.as_str(),
                    error = %e,
                    "Skipping account"
                );
                skipped += 1;
            }
        }
    }

    writer.flush()?;
    pb.finish_and_clear();

    info!(
        written,
        skipped,
        cached_urls = resolver.len(),
        "Batch complete"
    );
    if skipped > 0 {
        eprintln!(
            "{} {} records skipped (see log for details)",
            "!".yellow(),
            skipped
        );
    }

    Ok(())
}
