//! Command-line host for a single list page.
//!
//! Plays the part of the browser: it loads the configured page, feeds line
//! commands from stdin to the page runtime and prints the rendered document.
//!
//! # Usage
//!
//! ```text
//! labsite base=./site page=publications trace_level=debug < commands.txt
//! labsite config=labsite.toml
//! ```
//!
//! # Commands
//!
//! - `search <text>`: type into the search box (debounced)
//! - `set <field> <value>`: change a dropdown
//! - `reset`: clear every criterion
//! - `cite <id>`: open the citation panel
//! - `close`: close the citation panel
//! - `copy`: copy the citation (no clipboard here, so the fallback shows)
//! - `show`: wait for pending search, then print the document
//!
//! The document is also printed once stdin closes.

#![allow(clippy::multiple_crate_versions)]

use labsite::app::{Event, PageRuntime, UnavailableClipboard};
use labsite::domain::{Criteria, Item, NewsEntry, Project, Publication};
use labsite::observability::init_tracing;
use labsite::source::{fetcher_for, DataSource, Fetcher};
use labsite::ui::{Card, Document};
use labsite::{initialize, Config, PageKind, Result};
use std::collections::BTreeMap;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// A parsed stdin line.
#[derive(Debug)]
enum Command<I: Item> {
    Dispatch(Event<I>),
    Show,
}

fn parse_command<I: Item>(line: &str) -> std::result::Result<Option<Command<I>>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match verb {
        "search" => Command::Dispatch(Event::SearchInput(rest.to_string())),
        "set" => {
            let Some((field, value)) = rest.split_once(' ') else {
                return Err(format!("usage: set <field> <value>, got '{line}'"));
            };
            Command::Dispatch(Event::SelectFilter {
                field: field.to_string(),
                value: value.trim().to_string(),
            })
        }
        "reset" => Command::Dispatch(Event::Reset),
        "cite" if !rest.is_empty() => Command::Dispatch(Event::ShowCitation { id: rest.to_string() }),
        "close" => Command::Dispatch(Event::CloseCitation),
        "copy" => Command::Dispatch(Event::CopyCitation),
        "show" => Command::Show,
        _ => return Err(format!("unknown command '{line}'")),
    };
    Ok(Some(command))
}

async fn print_document(document: &Document) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(document.to_html().as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}

async fn run<I: Card, F: Fetcher>(config: &Config, source: &DataSource<F>) -> Result<()> {
    let regions = I::LAYOUT.region_ids(<I::Criteria as Criteria<I>>::FIELDS);
    let document = Document::with_regions(regions.iter().map(String::as_str));

    let mut runtime = PageRuntime::new(initialize::<I>(config), document, UnavailableClipboard);
    runtime.load(source).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        runtime.drain();
        match parse_command::<I>(&line) {
            Ok(Some(Command::Dispatch(event))) => runtime.dispatch(event),
            Ok(Some(Command::Show)) => {
                runtime.settle().await;
                print_document(runtime.surface()).await?;
            }
            Ok(None) => {}
            Err(message) => tracing::warn!(%message, "ignoring input"),
        }
    }

    runtime.settle().await;
    print_document(runtime.surface()).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args: BTreeMap<String, String> = std::env::args()
        .skip(1)
        .filter_map(|arg| {
            arg.split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        })
        .collect();

    let config = match args.get("config") {
        Some(path) => match Config::from_toml_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("labsite: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Config::from_map(&args),
    };

    init_tracing(&config);
    tracing::debug!(page = %config.page, base = %config.base, "starting");

    let source = match fetcher_for(&config.base) {
        Ok(fetcher) => DataSource::new(fetcher),
        Err(e) => {
            tracing::error!(error = %e, base = %config.base, "invalid base");
            return ExitCode::FAILURE;
        }
    };

    let result = match config.page {
        PageKind::Publications => run::<Publication, _>(&config, &source).await,
        PageKind::News => run::<NewsEntry, _>(&config, &source).await,
        PageKind::Projects => run::<Project, _>(&config, &source).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "labsite failed");
            ExitCode::FAILURE
        }
    }
}
