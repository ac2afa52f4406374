pub mod crawler;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod graph;
pub mod normalize;

pub use crawler::{CrawlEvent, Crawler, EventSink};
pub use error::CrawlError;
pub use fetch::{Fetch, FetchOutcome, FetchResolver, HttpFetcher, Scheduling};
pub use graph::{LinkGraph, LinkInfo};
