use clap::ArgMatches;
use commands::command_argument_builder;
use hyperlinks_core::crawl::{execute_crawl, CrawlOptions};
use hyperlinks_core::report;
use hyperlinks_core::store::GraphStore;
use std::path::{Path, PathBuf};
use url::Url;

mod commands;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let matches = command_argument_builder().get_matches();
    if let Err(message) = run(&matches).await {
        eprintln!("{message}");
        std::process::exit(1);
    }
}

async fn run(matches: &ArgMatches) -> Result<(), String> {
    let url = matches.get_one::<Url>("url").unwrap();
    let limit = *matches.get_one::<u64>("limit").unwrap() as usize;
    let timeout_secs = *matches.get_one::<u64>("timeout").unwrap();
    let out = matches.get_one::<PathBuf>("out");
    let db_out = matches.get_one::<String>("db-out");
    let pretty_print = matches.get_flag("pretty-print");
    let concurrent = matches.get_flag("concurrent");
    let quiet = matches.get_flag("quiet");

    if !url.has_host() {
        return Err("Invalid URL specified".to_string());
    }

    let options = CrawlOptions {
        start_url: url.as_str().to_string(),
        limit,
        concurrent,
        timeout_secs,
        show_progress: !quiet,
    };
    let graph = execute_crawl(options).await?;

    let json = report::to_json(&graph, pretty_print)
        .map_err(|e| format!("Failed to encode graph as JSON: {e}"))?;
    report::write_report(&json, out.map(PathBuf::as_path))
        .map_err(|e| format!("Failed to write output: {e}"))?;

    if let Some(db_path) = db_out {
        store_graph(db_path, url.as_str(), limit, &graph)
            .map_err(|e| format!("Error while storing to the db. {e}"))?;
    }

    Ok(())
}

fn store_graph(
    db_path: &str,
    start_url: &str,
    limit: usize,
    graph: &hyperlinks_crawler::LinkGraph,
) -> rusqlite::Result<()> {
    let expanded = shellexpand::tilde(db_path);
    let store = GraphStore::new(Path::new(expanded.as_ref()))?;
    let session_id = store.create_session(start_url, limit)?;
    store.write_graph(&session_id, graph)?;
    store.complete_session(&session_id)?;
    Ok(())
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
