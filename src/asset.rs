use serde::Serialize;
use std::fmt;

/// Fixed placeholder; no data source provides a real score.
pub const SUSTAINABILITY_SCORE: f64 = 0.5;
pub const DEFAULT_DESCRIPTION: &str = "No description available.";
pub const DEFAULT_USE_CASE: &str = "General purpose";

const TREND_THRESHOLD_PCT: f64 = 5.0;
const HIGH_CAP_USD: f64 = 10_000_000_000.0;
const MEDIUM_CAP_USD: f64 = 1_000_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTrend {
    Rising,
    Falling,
    Stable,
}

impl PriceTrend {
    pub fn from_change_24h(change_pct: f64) -> Self {
        if change_pct > TREND_THRESHOLD_PCT {
            PriceTrend::Rising
        } else if change_pct < -TREND_THRESHOLD_PCT {
            PriceTrend::Falling
        } else {
            PriceTrend::Stable
        }
    }
}

impl fmt::Display for PriceTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PriceTrend::Rising => "rising",
            PriceTrend::Falling => "falling",
            PriceTrend::Stable => "stable",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketCapTier {
    High,
    Medium,
    Low,
}

impl MarketCapTier {
    pub fn from_usd(market_cap: f64) -> Self {
        if market_cap > HIGH_CAP_USD {
            MarketCapTier::High
        } else if market_cap > MEDIUM_CAP_USD {
            MarketCapTier::Medium
        } else {
            MarketCapTier::Low
        }
    }
}

impl fmt::Display for MarketCapTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MarketCapTier::High => "high",
            MarketCapTier::Medium => "medium",
            MarketCapTier::Low => "low",
        })
    }
}

/// Coarse label used for energy use, risk and popularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Low => "low",
            Level::Medium => "medium",
            Level::High => "high",
        })
    }
}

/// Normalized snapshot of one asset, as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetRecord {
    pub price_trend: PriceTrend,
    pub market_cap: MarketCapTier,
    pub energy_use: Level,
    pub sustainability_score: f64,
    pub description: String,
    pub risk_level: Level,
    pub popularity: Level,
    pub use_case: String,
    pub current_price: f64,
    pub price_change_24h: f64,
    pub market_cap_usd: f64,
}

impl AssetRecord {
    /// Builds a record from raw market figures, deriving every bucketed field.
    pub fn from_market(
        current_price: f64,
        price_change_24h: f64,
        market_cap_usd: f64,
        description: Option<String>,
        use_case: Option<String>,
    ) -> Self {
        let market_cap = MarketCapTier::from_usd(market_cap_usd);
        let popularity = if market_cap == MarketCapTier::High {
            Level::High
        } else {
            Level::Medium
        };

        Self {
            price_trend: PriceTrend::from_change_24h(price_change_24h),
            market_cap,
            energy_use: Level::Medium,
            sustainability_score: SUSTAINABILITY_SCORE,
            description: description.unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            risk_level: Level::Medium,
            popularity,
            use_case: use_case.unwrap_or_else(|| DEFAULT_USE_CASE.to_string()),
            current_price,
            price_change_24h,
            market_cap_usd,
        }
    }
}

/// `bitcoin` -> `Bitcoin`: first character upper-cased, the rest lower-cased.
pub fn display_name(asset_id: &str) -> String {
    let mut chars = asset_id.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// In-memory asset records keyed by display name.
///
/// Iteration follows first-insertion order; replacing a record keeps its slot.
#[derive(Debug, Clone, Default)]
pub struct AssetBook {
    entries: Vec<(String, AssetRecord)>,
}

impl AssetBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the record for `name` wholesale, or appends it.
    pub fn upsert(&mut self, name: impl Into<String>, record: AssetRecord) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = record,
            None => self.entries.push((name, record)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&AssetRecord> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, record)| record)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AssetRecord)> {
        self.entries
            .iter()
            .map(|(name, record)| (name.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for AssetBook {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, record) in &self.entries {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }
}
