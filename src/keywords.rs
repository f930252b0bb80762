//! Intent categories and the phrases that trigger them.

/// A keyword bucket used to classify free-text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Growth,
    Sustainability,
    Trend,
    MarketCap,
    Energy,
    Price,
    Greeting,
}

impl Intent {
    /// Classification order. Earlier intents shadow later ones.
    pub const PRIORITY: [Intent; 7] = [
        Intent::Growth,
        Intent::Sustainability,
        Intent::Trend,
        Intent::MarketCap,
        Intent::Energy,
        Intent::Price,
        Intent::Greeting,
    ];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Intent::Growth => GROWTH,
            Intent::Sustainability => SUSTAINABILITY,
            Intent::Trend => TREND,
            Intent::MarketCap => MARKET_CAP,
            Intent::Energy => ENERGY,
            Intent::Price => PRICE,
            Intent::Greeting => GREETING,
        }
    }

    /// `query` must already be lower-cased and trimmed.
    pub fn matches(self, query: &str) -> bool {
        matches_any(query, self.keywords())
    }

    /// First intent in priority order whose keywords hit the query.
    pub fn classify(query: &str) -> Option<Intent> {
        Self::PRIORITY.into_iter().find(|intent| intent.matches(query))
    }
}

/// Whole-query equality is tried before substring containment.
pub fn matches_any(query: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| *keyword == query)
        || keywords.iter().any(|keyword| query.contains(keyword))
}

const GROWTH: &[&str] = &[
    "long-term growth",
    "trending up",
    "profitable",
    "invest",
    "buy",
    "purchase",
    "which crypto",
    "what should i invest",
    "recommend",
    "suggestion",
    "advice",
    "what to buy",
    "best crypto",
    "top crypto",
    "good investment",
    "should i invest",
    "looking to invest",
    "want to invest",
    "thinking of investing",
    "investment advice",
    "investment recommendation",
    "investment suggestion",
];

const SUSTAINABILITY: &[&str] = &[
    "sustainable",
    "eco-friendly",
    "green",
    "environment",
    "energy efficient",
    "low energy",
    "environmental",
    "climate",
    "carbon",
    "sustainability",
    "eco",
    "green crypto",
    "environmental impact",
    "environmentally friendly",
    "sustainable crypto",
    "eco friendly crypto",
    "green investment",
];

const TREND: &[&str] = &[
    "trending",
    "trend",
    "going up",
    "price movement",
    "price action",
    "market movement",
    "market trend",
    "price trend",
    "movement",
    "what's moving",
    "what's going up",
    "what's rising",
    "price changes",
    "market changes",
    "market direction",
    "price direction",
];

const MARKET_CAP: &[&str] = &[
    "market cap",
    "market capitalization",
    "biggest crypto",
    "largest crypto",
    "market size",
    "market value",
    "total value",
    "market worth",
    "which is biggest",
    "largest market",
    "biggest market",
    "market dominance",
    "market share",
    "largest by market",
    "biggest by market",
];

const ENERGY: &[&str] = &[
    "energy use",
    "energy consumption",
    "power usage",
    "electricity",
    "energy efficient",
    "power consumption",
    "energy impact",
    "environmental impact",
    "carbon footprint",
    "energy usage",
    "energy efficiency",
];

const PRICE: &[&str] = &[
    "price",
    "prices",
    "cost",
    "value",
    "worth",
    "trading at",
    "current price",
    "price movement",
    "price action",
    "price trend",
    "price changes",
    "price direction",
    "price analysis",
];

const GREETING: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "greetings",
    "good morning",
    "good afternoon",
    "good evening",
    "howdy",
    "sup",
    "what's up",
    "hi there",
    "hello there",
    "hey there",
];
