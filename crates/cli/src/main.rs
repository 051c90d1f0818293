use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use quill_core::{
    Document, Envelope, FetchConfig, HttpTransport, PROFILE_META, ProfileConfig, ProfileRecord, QuillError, Record,
    SCOTCH_BASE, assemble_profile, fetch_author_profile, fetch_author_profile_with_meta,
};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;
use url::Url;

mod echo;

use echo::{format_size, print_banner, print_error, print_field, print_info, print_profile_summary, print_step, print_success};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Extract a scotch.io author profile as JSON
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(author = "Quill Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Extract author profiles from scotch.io pages", long_about = None)]
struct Args {
    /// Author name, e.g. "chris"
    #[arg(value_name = "AUTHOR", required_unless_present = "html")]
    author: Option<String>,

    /// Extract from a saved profile page, or "-" for stdin, instead of fetching
    #[arg(long, value_name = "FILE")]
    html: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print JSON on a single line
    #[arg(long)]
    compact: bool,

    /// Wrap output in a {"status": ...} response envelope
    #[arg(long)]
    envelope: bool,

    /// Also print the page's open graph metadata
    #[arg(long)]
    meta: bool,

    /// Site origin for profile URLs and relative links
    #[arg(long, default_value = SCOTCH_BASE, value_name = "URL")]
    base_url: String,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quill_core=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn profile_config(args: &Args) -> anyhow::Result<ProfileConfig> {
    Url::parse(&args.base_url).with_context(|| format!("Invalid base URL: {}", args.base_url))?;

    let user_agent = args
        .user_agent
        .clone()
        .unwrap_or_else(|| FetchConfig::default().user_agent);

    Ok(ProfileConfig::builder()
        .base_url(args.base_url.as_str())
        .timeout(args.timeout)
        .user_agent(user_agent)
        .build())
}

fn read_html(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read file: {}", input))
    }
}

type Extracted = (ProfileRecord, Option<Record>);

async fn extract_html(html: &str, config: &ProfileConfig, with_meta: bool) -> quill_core::Result<Extracted> {
    let doc = Document::parse(html)?;
    let profile = assemble_profile(&doc, config).await?;
    let meta = if with_meta { Some(doc.meta_record(PROFILE_META)?) } else { None };
    Ok((profile, meta))
}

async fn extract_author(author: &str, config: &ProfileConfig, with_meta: bool) -> quill_core::Result<Extracted> {
    let transport = HttpTransport::new(config.fetch.clone())?;

    if with_meta {
        let (profile, meta) = fetch_author_profile_with_meta(&transport, config, author, PROFILE_META).await?;
        Ok((profile, Some(meta)))
    } else {
        Ok((fetch_author_profile(&transport, config, author).await?, None))
    }
}

fn to_json((profile, meta): Extracted, verbose: bool) -> quill_core::Result<Value> {
    if verbose {
        print_profile_summary(&profile);
    }

    let profile = serde_json::to_value(profile)?;
    Ok(match meta {
        Some(meta) => json!({ "profile": profile, "meta": meta }),
        None => profile,
    })
}

fn render(value: &Value, compact: bool) -> anyhow::Result<String> {
    let rendered = if compact { serde_json::to_string(value) } else { serde_json::to_string_pretty(value) };
    rendered.context("Failed to render JSON")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        init_tracing();
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    let config = profile_config(&args)?;

    let extracted = match &args.html {
        Some(input) => {
            if args.verbose {
                print_step(1, 3, &format!("Reading {}", input.bright_white()));
            }
            let html = read_html(input)?;
            if args.verbose {
                print_field("Size", &format_size(html.len()));
                print_step(2, 3, "Extracting profile");
            }
            extract_html(&html, &config, args.meta).await
        }
        None => {
            let author = args.author.as_deref().context("AUTHOR is required without --html")?;
            if args.verbose {
                let url = config.profile_url(author);
                print_step(1, 3, &format!("Fetching {}", url.bright_white().underline()));
                print_step(2, 3, "Extracting profile");
            }
            extract_author(author, &config, args.meta).await
        }
    };

    let result = extracted.and_then(|extracted| to_json(extracted, args.verbose));

    let (value, failure): (Value, Option<QuillError>) = match result {
        Ok(value) if args.envelope => (serde_json::to_value(Envelope::success(value))?, None),
        Ok(value) => (value, None),
        Err(err) if args.envelope => (serde_json::to_value(Envelope::<Value>::from_error(&err))?, Some(err)),
        Err(err) => return Err(err).context("Failed to extract profile"),
    };
    let output = render(&value, args.compact)?;

    if args.verbose {
        print_step(3, 3, "Writing output");
    }

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{}\n", output))
                .with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => println!("{}", output),
    }

    match failure {
        Some(err) => {
            print_error(&err.to_string());
            Err(err).context("Failed to extract profile")
        }
        None => Ok(()),
    }
}
