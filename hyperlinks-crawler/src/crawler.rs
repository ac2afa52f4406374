use crate::fetch::{Fetch, FetchResolver, HttpFetcher, Scheduling};
use crate::graph::LinkGraph;
use crate::normalize::{is_fragment, normalize};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tracing::{debug, info};

/// Diagnostic events emitted while a crawl runs. Observability signal only;
/// no crawl behavior depends on whether anyone listens.
#[derive(Debug, Clone)]
pub enum CrawlEvent {
    /// Page fetched and parsed as HTML; one unit of budget consumed.
    Reached { url: String, parent: Option<String> },
    /// Probe or content fetch failed; dropped without retry.
    Failed { url: String, parent: Option<String> },
    /// Link target already known to the graph; only the back-edge is
    /// recorded, the page is not fetched again.
    Revisit { url: String, parent: String },
}

pub type EventSink = Arc<dyn Fn(CrawlEvent) + Send + Sync>;

/// Breadth-first frontier controller. Dequeues discovery edges in
/// budget-sized batches, resolves them through the fetch pipeline and grows
/// the link graph until the frontier empties or the visit budget runs out.
pub struct Crawler<F> {
    resolver: FetchResolver<F>,
    event_sink: Option<EventSink>,
}

impl Crawler<HttpFetcher> {
    pub fn new() -> Self {
        Self::with_fetcher(HttpFetcher::new(), Scheduling::Sequential)
    }
}

impl Default for Crawler<HttpFetcher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Fetch> Crawler<F> {
    pub fn with_fetcher(fetch: F, scheduling: Scheduling) -> Self {
        Self {
            resolver: FetchResolver::new(fetch, scheduling),
            event_sink: None,
        }
    }

    pub fn with_event_sink(mut self, sink: EventSink) -> Self {
        self.event_sink = Some(sink);
        self
    }

    /// Crawl the link graph reachable from `start_url`, visiting at most
    /// `limit` pages. A page counts against the budget only when it is
    /// successfully probed as HTML and its content retrieved; unreachable
    /// and non-HTML URLs are dropped for free.
    ///
    /// The caller guarantees `start_url` carries a host and `limit > 0`;
    /// validating raw user input is the CLI's job.
    pub async fn crawl(&self, start_url: &str, limit: usize) -> LinkGraph {
        info!("starting url with limit {}: {}", limit, start_url);

        let mut graph = LinkGraph::new();
        let mut budget = limit;
        let mut frontier: VecDeque<(Option<String>, String)> = VecDeque::new();
        frontier.push_back((None, normalize(start_url, None)));

        while !frontier.is_empty() && budget > 0 {
            // Each reached page costs one unit, so a batch never needs to be
            // larger than the remaining budget.
            let take = frontier.len().min(budget);
            let batch: Vec<(Option<String>, String)> = frontier.drain(..take).collect();
            let urls: Vec<String> = batch.iter().map(|(_, url)| url.clone()).collect();

            let outcomes = self.resolver.resolve(&urls).await;

            for ((parent, url), outcome) in batch.into_iter().zip(outcomes) {
                if !outcome.reached {
                    debug!("FAILED {} <-- {}", url, parent.as_deref().unwrap_or("-"));
                    self.emit(CrawlEvent::Failed { url, parent });
                    continue;
                }

                budget -= 1;

                let targets: HashSet<String> = outcome
                    .links
                    .iter()
                    .filter(|raw| !is_fragment(raw))
                    .map(|raw| normalize(&url, Some(raw)))
                    .collect();

                graph.record_outgoing(&url, targets.iter().cloned());
                graph.record_incoming(&url, parent.as_deref());

                for target in targets {
                    if graph.visited(&target) {
                        debug!("ALREADY {} <-- {}", target, url);
                        self.emit(CrawlEvent::Revisit {
                            url: target.clone(),
                            parent: url.clone(),
                        });
                        graph.record_incoming(&target, Some(&url));
                    } else {
                        graph.record_incoming(&target, Some(&url));
                        frontier.push_back((Some(url.clone()), target));
                    }
                }

                debug!("OK {} <-- {}", url, parent.as_deref().unwrap_or("-"));
                self.emit(CrawlEvent::Reached { url, parent });
            }
        }

        info!("crawl complete, {} urls in graph", graph.len());
        graph
    }

    fn emit(&self, event: CrawlEvent) {
        if let Some(sink) = &self.event_sink {
            sink(event);
        }
    }
}
