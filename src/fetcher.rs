use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::asset::{display_name, AssetBook, AssetRecord};
use crate::constants;
use crate::error::FetchError;

// Subset of CoinGecko's /coins/{id} response; unknown fields are ignored.
#[derive(Deserialize, Debug)]
struct CoinResponse {
    #[serde(default)]
    description: Option<Localized>,
    #[serde(default)]
    categories: Option<Vec<Option<String>>>,
    #[serde(default)]
    market_data: Option<MarketData>,
}

#[derive(Deserialize, Debug)]
struct Localized {
    #[serde(default)]
    en: Option<String>,
}

#[derive(Deserialize, Debug)]
struct MarketData {
    #[serde(default)]
    current_price: Option<UsdQuote>,
    #[serde(default)]
    price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    market_cap: Option<UsdQuote>,
}

#[derive(Deserialize, Debug)]
struct UsdQuote {
    #[serde(default)]
    usd: Option<f64>,
}

impl CoinResponse {
    /// Price, 24h change and market cap are required; description and
    /// categories fall back to fixed defaults.
    fn into_record(self) -> Result<AssetRecord, FetchError> {
        let market = self
            .market_data
            .ok_or(FetchError::MissingField("market_data"))?;

        let current_price = market
            .current_price
            .and_then(|quote| quote.usd)
            .ok_or(FetchError::MissingField("market_data.current_price.usd"))?;
        let price_change_24h = market
            .price_change_percentage_24h
            .ok_or(FetchError::MissingField("market_data.price_change_percentage_24h"))?;
        let market_cap_usd = market
            .market_cap
            .and_then(|quote| quote.usd)
            .ok_or(FetchError::MissingField("market_data.market_cap.usd"))?;

        let use_case = self
            .categories
            .and_then(|categories| categories.into_iter().flatten().next());

        Ok(AssetRecord::from_market(
            current_price,
            price_change_24h,
            market_cap_usd,
            self.description.and_then(|d| d.en),
            use_case,
        ))
    }
}

/// Outcome of one refresh pass, by asset id.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    pub updated: Vec<String>,
    pub failed: Vec<String>,
}

/// Sequential, rate-limited client for the market-data API.
#[derive(Debug, Clone)]
pub struct MarketClient {
    client: Client,
    base_url: String,
    request_delay: Duration,
}

impl MarketClient {
    pub fn new(base_url: impl Into<String>, request_delay: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(constants::HTTP_TIMEOUT)
            .user_agent(concat!("cryptobuddy/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            request_delay,
        })
    }

    #[instrument(skip(self))]
    pub async fn fetch_asset(&self, asset_id: &str) -> Result<AssetRecord, FetchError> {
        let url = format!("{}/coins/{}", self.base_url, asset_id);
        debug!(%url, "Fetching market data");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(FetchError::Status { status, body });
        }

        let coin = response.json::<CoinResponse>().await?;
        coin.into_record()
    }

    /// Fetches every id in order, pausing `request_delay` after each request.
    ///
    /// Successful fetches replace the asset's record; failures are logged and
    /// leave whatever the book already held for that asset.
    pub async fn refresh(&self, asset_ids: &[&str], book: &mut AssetBook) -> RefreshReport {
        let mut report = RefreshReport::default();

        for asset_id in asset_ids {
            match self.fetch_asset(asset_id).await {
                Ok(record) => {
                    book.upsert(display_name(asset_id), record);
                    report.updated.push(asset_id.to_string());
                }
                Err(e) => {
                    warn!(%asset_id, error = %e, "Error fetching data, skipping this cycle");
                    report.failed.push(asset_id.to_string());
                }
            }

            if !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }
        }

        info!(
            updated = report.updated.len(),
            failed = report.failed.len(),
            "Market data refresh finished"
        );
        report
    }
}
