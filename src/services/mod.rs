pub mod element_finder;
pub mod pacer;
pub mod product_discovery;
pub mod review_extractor;
pub mod review_writer;

pub use element_finder::{CssStrategy, ElementFinder, FindOutcome, FinderStrategy, FoundElement};
pub use pacer::Pacer;
pub use product_discovery::ProductDiscovery;
pub use review_extractor::ReviewExtractor;
pub use review_writer::ReviewWriter;
