//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: Lifecycle of one crawl (idle, running, completed, failed)
//! - `VisitedSet`: Page addresses already dispatched to a worker
//! - `Frontier`: Outstanding-unit counter used for termination detection

mod crawl_state;
mod frontier;
mod visited;

// Re-export main types
pub use crawl_state::CrawlState;
pub use frontier::Frontier;
pub use visited::VisitedSet;
