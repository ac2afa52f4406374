// JSON rendering of a completed link graph

use hyperlinks_crawler::LinkGraph;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// One URL's link record with its neighbour sets flattened into sorted
/// lists, the shape consumed by the JSON report and the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphRecord {
    pub url: String,
    pub incoming: Vec<String>,
    pub outgoing: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Neighbours {
    incoming: Vec<String>,
    outgoing: Vec<String>,
}

/// Flatten the graph into one record per URL, sorted by URL with sorted
/// neighbour lists, so identical crawls render identical output.
pub fn flatten_graph(graph: &LinkGraph) -> Vec<GraphRecord> {
    let mut records: Vec<GraphRecord> = graph
        .iter()
        .map(|(url, info)| {
            let mut incoming: Vec<String> = info.incoming.iter().cloned().collect();
            let mut outgoing: Vec<String> = info.outgoing.iter().cloned().collect();
            incoming.sort();
            outgoing.sort();
            GraphRecord {
                url: url.clone(),
                incoming,
                outgoing,
            }
        })
        .collect();
    records.sort_by(|a, b| a.url.cmp(&b.url));
    records
}

/// Render the graph as `{url: {incoming: [...], outgoing: [...]}}`,
/// compact or pretty-printed.
pub fn to_json(graph: &LinkGraph, pretty: bool) -> serde_json::Result<String> {
    let by_url: BTreeMap<String, Neighbours> = flatten_graph(graph)
        .into_iter()
        .map(|record| {
            (
                record.url,
                Neighbours {
                    incoming: record.incoming,
                    outgoing: record.outgoing,
                },
            )
        })
        .collect();

    if pretty {
        serde_json::to_string_pretty(&by_url)
    } else {
        serde_json::to_string(&by_url)
    }
}

/// Write the rendered report to `dest`, or to stdout when no file is given.
pub fn write_report(json: &str, dest: Option<&Path>) -> io::Result<()> {
    match dest {
        Some(path) => fs::write(path, json),
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{json}")
        }
    }
}
