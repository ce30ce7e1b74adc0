//! Simple CLI that reads a fetched page from stdin and outputs JSON to stdout.
//!
//! Usage: `extract_stdin <post|reel|photo|watch> [request-path]`
//!
//! Environment:
//! - `FACEBED_BANNED_USERS`: comma separated author ids
//! - `FACEBED_TIMEZONE`: display offset in hours (default 7)
//! - `RUST_LOG`: log filter, logs go to stderr

use std::io::{self, Read};

use rs_facebed::{extract, Options, PageKind, ParsedPost};
use serde::Serialize;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct Output {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Data>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct Data {
    #[serde(flatten)]
    post: ParsedPost,
    date_formatted: String,
    reactions_formatted: String,
}

fn options_from_env() -> Options {
    let mut options = Options::default();

    if let Ok(list) = std::env::var("FACEBED_BANNED_USERS") {
        for id in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match id.parse() {
                Ok(id) => {
                    options.banned_users.insert(id);
                }
                Err(_) => warn!(id, "ignoring non-numeric banned user id"),
            }
        }
    }

    if let Ok(tz) = std::env::var("FACEBED_TIMEZONE") {
        match tz.trim().parse() {
            Ok(offset) => options.timezone_offset = offset,
            Err(_) => warn!(tz, "ignoring unparsable timezone offset"),
        }
    }

    options
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let kind = match args.next().as_deref().unwrap_or("post").parse::<PageKind>() {
        Ok(kind) => kind,
        Err(e) => {
            error!("{e}");
            std::process::exit(2);
        }
    };
    let path = args.next().unwrap_or_default();

    let options = options_from_env();
    if let Err(e) = options.validate() {
        error!("{e}");
        std::process::exit(2);
    }

    // Read HTML from stdin
    let mut html = String::new();
    if io::stdin().read_to_string(&mut html).is_err() {
        error!("failed to read from stdin");
        std::process::exit(1);
    }

    let output = match extract(&html, kind, &path, &options) {
        Ok(post) => Output {
            success: true,
            data: Some(Data {
                date_formatted: post.date_formatted(options.timezone_offset),
                reactions_formatted: post.reactions(),
                post,
            }),
            error: None,
        },
        Err(e) => {
            warn!(%kind, path, error = %e, "extraction failed");
            Output {
                success: false,
                data: None,
                error: Some(e.to_string()),
            }
        }
    };

    println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
}
