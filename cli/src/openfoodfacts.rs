use std::time::Duration;

use diario_core::RemoteError;
use diario_core::openfoodfacts::{FoodLookup, Product, SearchResponse, normalize};

const SEARCH_URL: &str = "https://world.openfoodfacts.org/cgi/search.pl";

/// Only download what the staging flow consumes (names, macros, id);
/// narrowing the fields makes the search several times faster.
const SEARCH_FIELDS: &str = "product_name,brands,nutriments,id,serving_size";

/// How many candidates a search returns.
const PAGE_SIZE: &str = "5";

/// Generous safety net for slow connections. There is no retry: a timeout
/// is surfaced once and the staged slot is left untouched.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub struct OpenFoodFactsClient {
    client: reqwest::Client,
}

impl OpenFoodFactsClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(format!(
                "diario-cli/{} (nutrition diary)",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to build HTTP client");
        Self { client }
    }
}

impl FoodLookup for OpenFoodFactsClient {
    async fn search(&self, query: &str) -> Result<Vec<Product>, RemoteError> {
        let resp = self
            .client
            .get(SEARCH_URL)
            .query(&[
                ("search_terms", query),
                ("json", "1"),
                ("page_size", PAGE_SIZE),
                ("fields", SEARCH_FIELDS),
            ])
            .send()
            .await
            .map_err(classify)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RemoteError::Unavailable {
                status: status.as_u16(),
            });
        }

        let data: SearchResponse = resp.json().await.map_err(classify)?;
        Ok(data.products.into_iter().map(normalize).collect())
    }
}

/// Timeouts, server errors, and connection failures are distinguished at
/// this boundary so each surfaces its own message.
fn classify(e: reqwest::Error) -> RemoteError {
    if e.is_timeout() {
        return RemoteError::Timeout;
    }
    if let Some(status) = e.status() {
        return RemoteError::Unavailable {
            status: status.as_u16(),
        };
    }
    RemoteError::Connection(e.to_string())
}
