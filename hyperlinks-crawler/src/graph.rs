use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Per-URL record of discovered neighbours: pages that link here and pages
/// linked from here. Membership-only; insertion order is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkInfo {
    pub incoming: HashSet<String>,
    pub outgoing: HashSet<String>,
}

/// Mapping from URL to its accumulated link record. A URL becomes a key when
/// it is visited or first discovered as a link target. The graph only grows
/// for the lifetime of one crawl; edges are added, never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkGraph {
    info_by_url: HashMap<String, LinkInfo>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record for `url`, creating an empty one if absent.
    pub fn ensure(&mut self, url: &str) -> &mut LinkInfo {
        self.info_by_url.entry(url.to_string()).or_default()
    }

    /// Unions `targets` into `url`'s outgoing set.
    pub fn record_outgoing(&mut self, url: &str, targets: impl IntoIterator<Item = String>) {
        self.ensure(url).outgoing.extend(targets);
    }

    /// Adds `parent` to `url`'s incoming set. The crawl root has no parent;
    /// `None` is a no-op.
    pub fn record_incoming(&mut self, url: &str, parent: Option<&str>) {
        if let Some(parent) = parent {
            self.ensure(url).incoming.insert(parent.to_string());
        }
    }

    /// True once `url` has been queued for, or completed, resolution.
    /// Used to prevent re-fetching pages the crawl already knows about.
    pub fn visited(&self, url: &str) -> bool {
        self.info_by_url.contains_key(url)
    }

    pub fn get(&self, url: &str) -> Option<&LinkInfo> {
        self.info_by_url.get(url)
    }

    /// Read-only iteration for serialization and storage sinks.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &LinkInfo)> {
        self.info_by_url.iter()
    }

    pub fn len(&self) -> usize {
        self.info_by_url.len()
    }

    pub fn is_empty(&self) -> bool {
        self.info_by_url.is_empty()
    }
}
