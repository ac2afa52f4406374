pub mod crawl;
pub mod report;
pub mod store;

pub use crawl::{execute_crawl, CrawlOptions};
pub use report::{flatten_graph, to_json, GraphRecord};
pub use store::GraphStore;
