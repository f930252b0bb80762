// Runtime defaults, overridable from the environment (or a .env file loaded in main).

use std::env;
use std::time::Duration;

pub const BOT_NAME: &str = "CryptoBuddy";
pub const BOT_TONE: &str =
    "Hey there! I'm your friendly crypto advisor Do you want me to help you find your riches 🌱";
pub const DISCLAIMER: &str = "⚠️ DISCLAIMER: Crypto is risky—always do your own research! Past performance doesn't guarantee future results.";

/// CoinGecko ids queried on every refresh, in display order.
pub const SUPPORTED_ASSETS: [&str; 4] = ["bitcoin", "ethereum", "cardano", "solana"];

pub const DEFAULT_API_BASE: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_REFRESH_SECS: u64 = 300;
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 1000;
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

// Use lazy_static to initialize static variables safely.
lazy_static::lazy_static! {
    pub static ref API_BASE: String = env::var("CRYPTOBUDDY_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
    pub static ref REFRESH_SECS: u64 = env_u64("CRYPTOBUDDY_REFRESH_SECS", DEFAULT_REFRESH_SECS);
    pub static ref REQUEST_DELAY_MS: u64 = env_u64("CRYPTOBUDDY_REQUEST_DELAY_MS", DEFAULT_REQUEST_DELAY_MS);
}

fn env_u64(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(%key, %raw, "Ignoring non-numeric value, using default {}", default);
            default
        }),
        Err(_) => default,
    }
}
