use hyperlinks_crawler::{CrawlEvent, Crawler, HttpFetcher, LinkGraph, Scheduling};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use url::Url;

/// Options for configuring a crawl invocation.
pub struct CrawlOptions {
    pub start_url: String,
    pub limit: usize,
    /// Fan out each batch's requests instead of awaiting them one by one.
    pub concurrent: bool,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    pub show_progress: bool,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            start_url: String::new(),
            limit: 1,
            concurrent: false,
            timeout_secs: 10,
            show_progress: false,
        }
    }
}

/// Execute a crawl with the given options and return the completed graph.
///
/// Invocation errors (URL without a host, zero limit) are caught here at the
/// boundary; the engine itself assumes valid input.
pub async fn execute_crawl(options: CrawlOptions) -> Result<LinkGraph, String> {
    let CrawlOptions {
        start_url,
        limit,
        concurrent,
        timeout_secs,
        show_progress,
    } = options;

    let parsed = Url::parse(&start_url).map_err(|e| format!("Invalid URL specified: {e}"))?;
    if !parsed.has_host() {
        return Err("Invalid URL specified: missing host".to_string());
    }
    if limit == 0 {
        return Err("Invalid limit value specified".to_string());
    }

    let scheduling = if concurrent {
        Scheduling::Concurrent
    } else {
        Scheduling::Sequential
    };
    let mut crawler = Crawler::with_fetcher(HttpFetcher::with_timeout(timeout_secs), scheduling);

    let progress_bar = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message("Starting crawl...");
        Some(pb)
    } else {
        None
    };

    let visited_count = Arc::new(AtomicUsize::new(0));
    if let Some(pb) = progress_bar.clone() {
        let count = visited_count.clone();
        crawler = crawler.with_event_sink(Arc::new(move |event| match event {
            CrawlEvent::Reached { url, .. } => {
                let visited = count.fetch_add(1, Ordering::Relaxed) + 1;
                pb.set_message(format!("{visited} visited, at {url}"));
                pb.tick();
            }
            CrawlEvent::Failed { url, .. } => {
                pb.set_message(format!("failed: {url}"));
                pb.tick();
            }
            CrawlEvent::Revisit { .. } => {}
        }));
    }

    let graph = crawler.crawl(&start_url, limit).await;

    if let Some(pb) = &progress_bar {
        pb.finish_with_message(format!(
            "Crawl complete! {} pages visited, {} URLs in graph",
            visited_count.load(Ordering::Relaxed),
            graph.len()
        ));
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_url_without_host() {
        let options = CrawlOptions {
            start_url: "not a url".to_string(),
            limit: 3,
            ..CrawlOptions::default()
        };
        assert!(execute_crawl(options).await.is_err());
    }

    #[tokio::test]
    async fn rejects_zero_limit() {
        let options = CrawlOptions {
            start_url: "http://example.com".to_string(),
            limit: 0,
            ..CrawlOptions::default()
        };
        let error = execute_crawl(options).await.unwrap_err();
        assert!(error.contains("limit"));
    }
}
