//! Fetching and parsing of the upstream statistics page.

pub mod http_client;
pub mod stats_page;

pub use http_client::{FetchError, HttpClient};
pub use stats_page::extract_records;

/// Lazily compiled CSS selector for a static pattern.
macro_rules! selector {
    ($e:expr) => {{
        use ::once_cell::sync::Lazy;
        use ::scraper::Selector;
        static SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse($e).unwrap());
        &*SELECTOR
    }};
}
pub(crate) use selector;
