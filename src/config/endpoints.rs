//! Fixed regional endpoint registry for the Selling Partner API.
//!
//! Read-only, process-wide mapping from region identifier to base URL.
//! Unknown regions resolve to the default region instead of failing.

pub const DEFAULT_REGION: &str = "eu-west-1";

const NA_ENDPOINT: &str = "https://sellingpartnerapi-na.amazon.com";
const EU_ENDPOINT: &str = "https://sellingpartnerapi-eu.amazon.com";
const FE_ENDPOINT: &str = "https://sellingpartnerapi-fe.amazon.com";

pub fn resolve_base_url(region: &str) -> &'static str {
    match region {
        "us-east-1" => NA_ENDPOINT,
        "eu-west-1" => EU_ENDPOINT,
        "us-west-2" => FE_ENDPOINT,
        _ => EU_ENDPOINT,
    }
}
