//! USD→BRL exchange rate lookup over HTTP.

pub mod error;
pub mod fetcher;

pub use error::{FetchCause, FetchError};
pub use fetcher::{fetch_rate, parse_bid, DEFAULT_URL};
