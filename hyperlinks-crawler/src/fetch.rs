use crate::error::Result;
use crate::extract::extract_links;
use futures::future::join_all;
use reqwest::{Client, StatusCode};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// MIME types whose content is worth downloading and parsing.
const SUPPORTED_MIME_TYPES: &[&str] = &["text/html"];

/// Result of a metadata probe (HEAD) against one URL.
#[derive(Debug, Clone)]
pub struct Probe {
    pub status: u16,
    /// Raw `Content-Type` header value, parameters and all.
    pub mime_type: Option<String>,
}

/// Result of a content fetch (GET) against one URL.
#[derive(Debug, Clone)]
pub struct Content {
    pub success: bool,
    pub body: String,
}

/// Narrow fetch interface the resolver depends on. Production code uses
/// [`HttpFetcher`]; tests substitute an in-memory fake.
pub trait Fetch: Send + Sync {
    fn head(&self, url: &str) -> impl Future<Output = Result<Probe>> + Send;
    fn get(&self, url: &str) -> impl Future<Output = Result<Content>> + Send;
}

/// reqwest-backed [`Fetch`] implementation.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .user_agent("Hyperlinks/0.1 (https://github.com/hyperlinks/hyperlinks)")
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs((timeout_secs / 2).max(1)))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetch for HttpFetcher {
    async fn head(&self, url: &str) -> Result<Probe> {
        let response = self.client.head(url).send().await?;
        let status = response.status().as_u16();
        let mime_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        debug!("HEAD: {} Code: {}, Content-Type: {:?}", url, status, mime_type);
        Ok(Probe { status, mime_type })
    }

    async fn get(&self, url: &str) -> Result<Content> {
        let response = self.client.get(url).send().await?;
        let success = response.status() == StatusCode::OK;
        debug!("GET: {}, Success ?: {}", url, success);
        let body = if success {
            response.text().await?
        } else {
            String::new()
        };
        Ok(Content { success, body })
    }
}

/// How network calls within one batch are scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scheduling {
    /// Issue and await each request one at a time.
    #[default]
    Sequential,
    /// Fan out all requests of a phase, then gather at the batch boundary.
    Concurrent,
}

/// Outcome of resolving one URL: whether the page was reached as HTML and
/// the raw (possibly relative) link targets extracted from it.
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    pub reached: bool,
    pub links: HashSet<String>,
}

/// Two-phase probe-then-fetch pipeline. Probes every URL of a batch with a
/// metadata request, content-fetches only the HTML-compatible subset, and
/// hands back outcomes in strict 1:1 positional correspondence with the
/// input, whatever order the network calls complete in.
pub struct FetchResolver<F> {
    fetch: F,
    scheduling: Scheduling,
}

impl<F: Fetch> FetchResolver<F> {
    pub fn new(fetch: F, scheduling: Scheduling) -> Self {
        Self { fetch, scheduling }
    }

    /// Resolve a batch of URLs. `outcomes[i]` answers `urls[i]`.
    pub async fn resolve(&self, urls: &[String]) -> Vec<FetchOutcome> {
        let probes = self.probe_all(urls).await;

        // The probe phase drops non-HTML URLs, so the content phase must
        // remember which original slot each fetch answers instead of
        // relying on list position.
        let acceptable: Vec<(usize, &str)> = urls
            .iter()
            .enumerate()
            .filter(|(index, _)| probes[*index].as_ref().is_some_and(is_acceptable))
            .map(|(index, url)| (index, url.as_str()))
            .collect();

        let contents = self
            .fetch_contents(acceptable.iter().map(|(_, url)| *url))
            .await;

        let mut outcome_by_index: HashMap<usize, FetchOutcome> = HashMap::new();
        for ((index, _), content) in acceptable.iter().zip(contents) {
            let outcome = match content {
                Some(content) if content.success => FetchOutcome {
                    reached: true,
                    links: extract_links(&content.body),
                },
                _ => FetchOutcome::default(),
            };
            outcome_by_index.insert(*index, outcome);
        }

        (0..urls.len())
            .map(|index| outcome_by_index.remove(&index).unwrap_or_default())
            .collect()
    }

    async fn probe_all(&self, urls: &[String]) -> Vec<Option<Probe>> {
        match self.scheduling {
            Scheduling::Sequential => {
                let mut probes = Vec::with_capacity(urls.len());
                for url in urls {
                    probes.push(self.fetch.head(url).await.ok());
                }
                probes
            }
            Scheduling::Concurrent => join_all(urls.iter().map(|url| self.fetch.head(url)))
                .await
                .into_iter()
                .map(|probe| probe.ok())
                .collect(),
        }
    }

    async fn fetch_contents<'a>(
        &self,
        urls: impl Iterator<Item = &'a str>,
    ) -> Vec<Option<Content>> {
        match self.scheduling {
            Scheduling::Sequential => {
                let mut contents = Vec::new();
                for url in urls {
                    contents.push(self.fetch.get(url).await.ok());
                }
                contents
            }
            Scheduling::Concurrent => join_all(urls.map(|url| self.fetch.get(url)))
                .await
                .into_iter()
                .map(|content| content.ok())
                .collect(),
        }
    }
}

/// A probe is acceptable when the server reported no MIME type at all, or a
/// supported one once parameters such as `;charset=utf-8` are stripped.
fn is_acceptable(probe: &Probe) -> bool {
    match probe.mime_type.as_deref() {
        None => true,
        Some(mime) => SUPPORTED_MIME_TYPES.contains(&strip_mime_params(mime)),
    }
}

fn strip_mime_params(mime: &str) -> &str {
    mime.split(';').next().unwrap_or(mime).trim()
}
