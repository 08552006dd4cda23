//! Fetches the current USD→BRL bid from a public JSON endpoint.

use log::{debug, info};
use serde::Deserialize;

use super::error::{FetchCause, FetchError};

/// Public endpoint used when no URL override is given.
pub const DEFAULT_URL: &str = "https://economia.awesomeapi.com.br/json/last/USD-BRL";

const USER_AGENT: &str = concat!("enduro/", env!("CARGO_PKG_VERSION"));

/// Response shape: `{ "USDBRL": { "bid": "5.10", ... } }`. Other fields are ignored.
#[derive(Deserialize)]
struct QuoteResponse {
    #[serde(rename = "USDBRL")]
    usd_brl: Quote,
}

#[derive(Deserialize)]
struct Quote {
    bid: BidValue,
}

/// The API sends the bid as a decimal string, but a bare number is accepted too.
#[derive(Deserialize)]
#[serde(untagged)]
enum BidValue {
    Text(String),
    Number(f64),
}

/// Fetch the USD→BRL bid from `url`, or from [`DEFAULT_URL`] when `None`.
///
/// Performs one blocking GET. Transport failures, non-2xx statuses,
/// malformed bodies and unusable bids all surface as [`FetchError`].
pub fn fetch_rate(url: Option<&str>) -> Result<f64, FetchError> {
    let url = url.unwrap_or(DEFAULT_URL);

    let rate = request_bid(url).map_err(|cause| FetchError::new(url, cause))?;
    info!("USD-BRL bid from {}: {}", url, rate);

    Ok(rate)
}

fn request_bid(url: &str) -> Result<f64, FetchCause> {
    debug!("GET {}", url);

    let response = match ureq::get(url).set("User-Agent", USER_AGENT).call() {
        Ok(response) => response,
        Err(ureq::Error::Status(code, _)) => return Err(FetchCause::Status(code)),
        Err(ureq::Error::Transport(transport)) => return Err(FetchCause::Transport(transport)),
    };

    let body = response.into_string().map_err(FetchCause::Body)?;
    parse_bid(&body)
}

/// Extract `USDBRL.bid` from a response body as a positive, finite rate.
pub fn parse_bid(body: &str) -> Result<f64, FetchCause> {
    let response: QuoteResponse = serde_json::from_str(body).map_err(FetchCause::Json)?;

    let rate = match response.usd_brl.bid {
        BidValue::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| FetchCause::InvalidBid(text.clone()))?,
        BidValue::Number(n) => n,
    };

    if !rate.is_finite() || rate <= 0.0 {
        return Err(FetchCause::InvalidBid(rate.to_string()));
    }

    Ok(rate)
}
