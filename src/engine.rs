//! Rule-based recommendation engine.
//!
//! Input is matched against asset display names first, then against the
//! keyword routes in [`ROUTES`], then against the literal `help` command.
//! Everything works on a borrowed [`AssetBook`]; the engine holds no state.

use crate::asset::{AssetBook, AssetRecord, Level, MarketCapTier, PriceTrend};
use crate::constants::{BOT_TONE, DISCLAIMER};
use crate::format::{score_out_of_ten, signed_percent, usd};
use crate::keywords::Intent;

/// Minimum score (exclusive) for the eco-friendly pick.
pub const SUSTAINABILITY_THRESHOLD: f64 = 0.7;

const CAPABILITIES: &str = "• Long-term growth recommendations\n\
• Sustainable crypto options\n\
• Price trends\n\
• Market cap information\n\
• Energy usage details";

type Handler = fn(&AssetBook, &str) -> String;

/// One row of the dispatch table.
pub struct Route {
    pub intent: Intent,
    handler: Handler,
}

/// Keyword routes in priority order.
pub const ROUTES: [Route; 7] = [
    Route { intent: Intent::Growth, handler: growth },
    Route { intent: Intent::Sustainability, handler: sustainability },
    Route { intent: Intent::Trend, handler: trend },
    Route { intent: Intent::MarketCap, handler: market_cap },
    Route { intent: Intent::Energy, handler: energy },
    Route { intent: Intent::Price, handler: prices },
    Route { intent: Intent::Greeting, handler: greeting },
];

/// Produces a reply for free-text `input`. Never fails.
pub fn recommend(book: &AssetBook, input: &str) -> String {
    let query = input.trim().to_lowercase();

    if let Some((name, record)) = book
        .iter()
        .find(|(name, _)| query.contains(&name.to_lowercase()))
    {
        return profile(name, record);
    }

    if let Some(route) = ROUTES.iter().find(|route| route.intent.matches(&query)) {
        tracing::debug!(intent = ?route.intent, "Routed query");
        return (route.handler)(book, &query);
    }

    if query.contains("help") {
        return help_text();
    }

    fallback_text()
}

pub fn help_text() -> String {
    format!(
        "I'm here to help you navigate the crypto world! Here's what I can do:\n\n\
1. Investment advice (try asking about 'long-term growth' or 'what should I invest in?')\n\
2. Sustainability information (ask about 'eco-friendly' options or 'green crypto')\n\
3. Market trends (ask about 'trending' coins or 'what's going up?')\n\
4. Market cap details (ask about 'biggest crypto' or 'market size')\n\
5. Energy usage information (ask about 'energy consumption' or 'environmental impact')\n\n\
Remember: {}",
        DISCLAIMER
    )
}

pub fn greeting_text() -> String {
    format!(
        "{}\n\nI'm here to help you explore the crypto world! I can help you with:\n{}\n\nWhat would you like to know about?",
        BOT_TONE, CAPABILITIES
    )
}

pub fn fallback_text() -> String {
    format!(
        "I'm not quite sure what you're asking about. I can help you with:\n{}\n\nOr type 'help' for more information!",
        CAPABILITIES
    )
}

pub fn no_growth_text() -> String {
    format!(
        "I'm currently not seeing any coins that perfectly match the criteria for both rising trend and high market cap. Would you like to explore other aspects like sustainability or energy efficiency? {}",
        DISCLAIMER
    )
}

fn profile(name: &str, data: &AssetRecord) -> String {
    format!(
        "Let me tell you about {name}:\n\n\
💰 Current Price: {}\n\
📈 24h Change: {}\n\
🌍 Sustainability: {}\n\
⚡ Energy Use: {}\n\
📊 Risk Level: {}\n\
💡 Use Case: {}\n\n\
Description: {}\n\n\
{}",
        usd(data.current_price),
        signed_percent(data.price_change_24h),
        score_out_of_ten(data.sustainability_score),
        data.energy_use,
        data.risk_level,
        data.use_case,
        data.description,
        DISCLAIMER
    )
}

/// Highest score wins; the earliest asset keeps ties.
fn best_by_score<'a>(
    candidates: impl Iterator<Item = (&'a str, &'a AssetRecord)>,
) -> Option<(&'a str, &'a AssetRecord)> {
    candidates.fold(None, |best, (name, record)| match best {
        Some((_, top)) if record.sustainability_score <= top.sustainability_score => best,
        _ => Some((name, record)),
    })
}

fn names(assets: &[(&str, &AssetRecord)]) -> String {
    assets
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn growth(book: &AssetBook, query: &str) -> String {
    let candidates: Vec<(&str, &AssetRecord)> = book
        .iter()
        .filter(|(_, data)| {
            data.price_trend == PriceTrend::Rising && data.market_cap == MarketCapTier::High
        })
        .collect();

    if candidates.is_empty() {
        return no_growth_text();
    }

    if Intent::Sustainability.matches(query) {
        if let Some((best, data)) = best_by_score(candidates.iter().copied()) {
            return format!(
                "Based on your interest in both growth and sustainability, I'd recommend looking into {best}! 🚀\n\n\
Here's why:\n\
• Current Price: {}\n\
• 24h Change: {}\n\
• Description: {}\n\
• Use Case: {}\n\
• Sustainability Score: {}\n\n\
{}",
                usd(data.current_price),
                signed_percent(data.price_change_24h),
                data.description,
                data.use_case,
                score_out_of_ten(data.sustainability_score),
                DISCLAIMER
            );
        }
    }

    format!(
        "I've analyzed the market and found some promising options: {}. Would you like to know more about any of these? {}",
        names(&candidates),
        DISCLAIMER
    )
}

fn sustainability(book: &AssetBook, _query: &str) -> String {
    let pick = best_by_score(book.iter().filter(|(_, data)| {
        data.energy_use == Level::Low && data.sustainability_score > SUSTAINABILITY_THRESHOLD
    }));

    match pick {
        Some((name, data)) => format!(
            "Looking for eco-friendly options? {name} stands out! 🌱\n\n\
Here's what makes it special:\n\
• Current Price: {}\n\
• 24h Change: {}\n\
• Description: {}\n\
• Sustainability Score: {}\n\
• Use Case: {}\n\n\
{}",
            usd(data.current_price),
            signed_percent(data.price_change_24h),
            data.description,
            score_out_of_ten(data.sustainability_score),
            data.use_case,
            DISCLAIMER
        ),
        None => format!(
            "I'm currently not seeing any cryptocurrencies that meet the highest sustainability standards. Would you like to know about other aspects like market trends or energy efficiency? {}",
            DISCLAIMER
        ),
    }
}

/// Shared shape of the trend, market cap and energy listings.
fn listing(
    assets: &[(&str, &AssetRecord)],
    intro: &str,
    detail: fn(&AssetRecord) -> String,
    empty: &str,
) -> String {
    if assets.is_empty() {
        return format!("{} {}", empty, DISCLAIMER);
    }

    let mut response = format!("{} {}.\n\n", intro, names(assets));
    for (name, data) in assets {
        response.push_str(&format!("\n{}:\n{}", name, detail(data)));
    }
    response.push_str(&format!(
        "\nWould you like to know more about any of these specifically? {}",
        DISCLAIMER
    ));
    response
}

fn trend(book: &AssetBook, _query: &str) -> String {
    let rising: Vec<_> = book
        .iter()
        .filter(|(_, data)| data.price_trend == PriceTrend::Rising)
        .collect();

    listing(
        &rising,
        "Looking at the current trends, these cryptocurrencies are showing upward movement:",
        |data| {
            format!(
                "• Current Price: {}\n• 24h Change: {}\n• Description: {}\n• Risk Level: {}\n",
                usd(data.current_price),
                signed_percent(data.price_change_24h),
                data.description,
                data.risk_level
            )
        },
        "I'm not seeing any strong upward trends in my current data. Would you like to explore other aspects like sustainability or market cap?",
    )
}

fn market_cap(book: &AssetBook, _query: &str) -> String {
    let majors: Vec<_> = book
        .iter()
        .filter(|(_, data)| data.market_cap == MarketCapTier::High)
        .collect();

    listing(
        &majors,
        "Looking at market capitalization, these are the major players:",
        |data| {
            format!(
                "• Market Cap: {}\n• Current Price: {}\n• Description: {}\n• Popularity: {}\n",
                usd(data.market_cap_usd),
                usd(data.current_price),
                data.description,
                data.popularity
            )
        },
        "I'm not seeing any cryptocurrencies with high market cap in my current data. Would you like to explore other aspects?",
    )
}

fn energy(book: &AssetBook, _query: &str) -> String {
    let frugal: Vec<_> = book
        .iter()
        .filter(|(_, data)| data.energy_use == Level::Low)
        .collect();

    listing(
        &frugal,
        "Looking for energy-efficient options? Here are some cryptocurrencies with lower energy consumption:",
        |data| {
            format!(
                "• Current Price: {}\n• 24h Change: {}\n• Sustainability Score: {}\n• Description: {}\n",
                usd(data.current_price),
                signed_percent(data.price_change_24h),
                score_out_of_ten(data.sustainability_score),
                data.description
            )
        },
        "I'm not seeing any cryptocurrencies with low energy use in my current data. Would you like to explore other aspects?",
    )
}

fn prices(book: &AssetBook, _query: &str) -> String {
    let quotes = book
        .iter()
        .map(|(name, data)| {
            format!(
                "{}: {} ({})",
                name,
                usd(data.current_price),
                signed_percent(data.price_change_24h)
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Let me break down the current prices for you:\n{}.\n\nWould you like to know more about any specific cryptocurrency? {}",
        quotes, DISCLAIMER
    )
}

fn greeting(_book: &AssetBook, _query: &str) -> String {
    greeting_text()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book_with(entries: &[(&str, f64, f64)]) -> AssetBook {
        let mut book = AssetBook::new();
        for (name, change, cap) in entries {
            book.upsert(
                *name,
                AssetRecord::from_market(1000.0, *change, *cap, Some(format!("{name} chain")), None),
            );
        }
        book
    }

    #[test]
    fn test_routes_follow_intent_priority() {
        let order: Vec<Intent> = ROUTES.iter().map(|route| route.intent).collect();
        assert_eq!(order, Intent::PRIORITY.to_vec());
    }

    #[test]
    fn test_growth_lists_rising_high_cap() {
        let book = book_with(&[
            ("Bitcoin", 6.0, 900e9),
            ("Ethereum", 7.0, 300e9),
            ("Cardano", 8.0, 5e9),
        ]);
        let reply = recommend(&book, "what should I invest in");
        assert!(reply.starts_with(
            "I've analyzed the market and found some promising options: Bitcoin, Ethereum."
        ));
        assert!(reply.ends_with(DISCLAIMER));
    }

    #[test]
    fn test_growth_with_sustainability_picks_first_on_tie() {
        let book = book_with(&[("Bitcoin", 6.0, 900e9), ("Ethereum", 7.0, 300e9)]);
        let reply = recommend(&book, "sustainable investment");
        assert!(reply.contains("I'd recommend looking into Bitcoin!"));
        assert!(reply.contains("• Sustainability Score: 5.0/10"));
    }

    #[test]
    fn test_best_by_score_prefers_higher() {
        let mut low = AssetRecord::from_market(1.0, 0.0, 0.0, None, None);
        let mut high = low.clone();
        low.sustainability_score = 0.2;
        high.sustainability_score = 0.9;
        let picked = best_by_score(vec![("A", &low), ("B", &high)].into_iter());
        assert_eq!(picked.map(|(name, _)| name), Some("B"));
    }

    #[test]
    fn test_sustainability_needs_low_energy() {
        let book = book_with(&[("Cardano", 0.0, 20e9)]);
        let reply = recommend(&book, "eco-friendly coins");
        assert!(reply.starts_with("I'm currently not seeing any cryptocurrencies that meet"));
        assert!(reply.ends_with(DISCLAIMER));

        let mut green = book.clone();
        let mut record = green.get("Cardano").unwrap().clone();
        record.energy_use = Level::Low;
        record.sustainability_score = 0.8;
        green.upsert("Cardano", record);
        let reply = recommend(&green, "eco-friendly coins");
        assert!(reply.starts_with("Looking for eco-friendly options? Cardano stands out!"));
        assert!(reply.contains("• Sustainability Score: 8.0/10"));
    }

    #[test]
    fn test_trend_listing() {
        let book = book_with(&[("Bitcoin", 1.0, 900e9), ("Solana", 12.5, 80e9)]);
        let reply = recommend(&book, "what's trending");
        assert!(reply.contains("showing upward movement: Solana."));
        assert!(reply.contains("\nSolana:\n• Current Price: $1,000.00\n• 24h Change: +12.50%"));
        assert!(!reply.contains("\nBitcoin:"));
    }

    #[test]
    fn test_trend_empty_gets_disclaimer() {
        let book = book_with(&[("Bitcoin", 1.0, 900e9)]);
        let reply = recommend(&book, "market trend");
        assert_eq!(
            reply,
            format!(
                "I'm not seeing any strong upward trends in my current data. Would you like to explore other aspects like sustainability or market cap? {}",
                DISCLAIMER
            )
        );
    }

    #[test]
    fn test_market_cap_listing() {
        let book = book_with(&[("Bitcoin", 0.0, 1_300_000_000_000.0), ("Cardano", 0.0, 9e9)]);
        let reply = recommend(&book, "biggest crypto");
        assert!(reply.contains("major players: Bitcoin."));
        assert!(reply.contains("• Market Cap: $1,300,000,000,000.00"));
        assert!(reply.contains("• Popularity: high"));
    }

    #[test]
    fn test_energy_listing_empty_with_constant_energy_use() {
        let book = book_with(&[("Bitcoin", 0.0, 900e9)]);
        let reply = recommend(&book, "electricity");
        assert!(reply.starts_with("I'm not seeing any cryptocurrencies with low energy use"));
    }

    #[test]
    fn test_prices_list_everything() {
        let book = book_with(&[("Bitcoin", -6.0, 900e9), ("Cardano", 1.25, 9e9)]);
        let reply = recommend(&book, "cost");
        assert!(reply.contains("Bitcoin: $1,000.00 (-6.00%), Cardano: $1,000.00 (+1.25%)."));
    }

    #[test]
    fn test_help_and_fallback() {
        let book = AssetBook::new();
        assert_eq!(recommend(&book, "help"), help_text());
        assert_eq!(recommend(&book, "tell me a joke"), fallback_text());
        assert_eq!(recommend(&book, "  HELLO "), greeting_text());
    }
}
