//! csp-inject - prepend a hash-based Content-Security-Policy meta tag to a page head.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use csp_plugin::{on_pre_render_html, BuildEnv, InjectOutcome, PageComponents, PluginOptions};

/// Inject a Content-Security-Policy meta tag into a rendered page
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Page components JSON: {"head": [...], "preBody": [...], "postBody": [...]}
    page: PathBuf,

    /// Plugin options JSON file
    #[arg(long)]
    options: Option<PathBuf>,

    /// Build environment; "development" may disable injection
    #[arg(long, env = "NODE_ENV")]
    node_env: Option<String>,

    /// Print the new head as HTML instead of JSON
    #[arg(long)]
    html: bool,

    /// Print only the policy string
    #[arg(long, conflicts_with = "html")]
    policy_only: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let options = match &args.options {
        Some(path) => PluginOptions::from_path(path)
            .with_context(|| format!("loading options from {}", path.display()))?,
        None => PluginOptions::default(),
    };

    let json = std::fs::read_to_string(&args.page)
        .with_context(|| format!("reading {}", args.page.display()))?;
    let mut page = PageComponents::from_json_str(&json)
        .with_context(|| format!("decoding components in {}", args.page.display()))?;

    let env = BuildEnv::from_node_env(args.node_env.as_deref());
    let outcome = on_pre_render_html(&mut page, &options, env)?;

    match &outcome {
        InjectOutcome::Skipped => info!("Development build, CSP injection skipped"),
        InjectOutcome::Injected { header, .. } => info!("Injected {}", header),
    }

    if args.policy_only {
        if let Some(policy) = outcome.policy() {
            println!("{}", policy);
        }
    } else if args.html {
        print!("{}", dom::serialize_components(&page.head));
    } else {
        let head = dom::Component::list_to_json(&page.head);
        println!("{}", serde_json::to_string_pretty(&head)?);
    }

    Ok(())
}
