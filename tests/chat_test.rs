use cryptobuddy::engine::{help_text, greeting_text};
use cryptobuddy::{AssetBook, AssetRecord, ChatSession, MarketClient};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn offline_client() -> MarketClient {
    // Nothing listens here; sessions using it are built with a book and never refresh.
    MarketClient::new("http://127.0.0.1:9", Duration::ZERO).unwrap()
}

fn seeded_book() -> AssetBook {
    let mut book = AssetBook::new();
    book.upsert(
        "Bitcoin",
        AssetRecord::from_market(50_000.0, 1.0, 1e12, Some("Digital gold.".into()), None),
    );
    book
}

async fn transcript(session: &mut ChatSession, input: &str) -> String {
    let mut out = Vec::new();
    session.run(input.as_bytes(), &mut out).await.unwrap();
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn test_chat_answers_until_exit() {
    let mut session = ChatSession::new(offline_client(), &["bitcoin"], Duration::from_secs(3600))
        .with_book(seeded_book());

    let out = transcript(&mut session, "hello\nTell me about bitcoin\nEXIT\nhelp\n").await;

    assert!(out.starts_with("CryptoBuddy: Hey there!"));
    assert!(out.contains("Type 'exit' to quit or 'help' for available commands."));
    assert!(out.contains(&format!("\nCryptoBuddy: {}\n", greeting_text())));
    assert!(out.contains("CryptoBuddy: Let me tell you about Bitcoin:"));
    assert!(out.contains("💰 Current Price: $50,000.00"));
    // Lines after `exit` are never read.
    assert!(!out.contains(&help_text()));
    assert!(out.ends_with("CryptoBuddy: Goodbye! Remember to do your own research. 👋\n"));
    assert_eq!(out.matches("\nYou: ").count(), 3);
}

#[tokio::test]
async fn test_chat_ends_on_closed_input() {
    let mut session = ChatSession::new(offline_client(), &["bitcoin"], Duration::from_secs(3600))
        .with_book(AssetBook::new());

    let out = transcript(&mut session, "help\n").await;

    assert!(out.contains(&help_text()));
    assert!(out.contains("Goodbye!"));
    assert!(!out.contains("Updating cryptocurrency data"));
}

async fn mount_bitcoin(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/coins/bitcoin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "market_data": {
                "current_price": {"usd": 70000.0},
                "price_change_percentage_24h": 9.0,
                "market_cap": {"usd": 1.4e12}
            }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_chat_refreshes_when_interval_elapsed() {
    let server = MockServer::start().await;
    mount_bitcoin(&server).await;

    let client = MarketClient::new(server.uri(), Duration::ZERO).unwrap();
    let mut session =
        ChatSession::new(client, &["bitcoin"], Duration::ZERO).with_book(seeded_book());
    tokio::time::sleep(Duration::from_millis(2)).await;

    let out = transcript(&mut session, "what should i invest in\nexit\n").await;

    assert!(out.contains("CryptoBuddy: Updating cryptocurrency data..."));
    assert!(out.contains("CryptoBuddy: Data updated successfully!"));
    assert!(out.contains("found some promising options: Bitcoin."));
    assert_eq!(session.book().get("Bitcoin").unwrap().current_price, 70000.0);
}

#[tokio::test]
async fn test_chat_loads_data_before_first_prompt() {
    let server = MockServer::start().await;
    mount_bitcoin(&server).await;

    let client = MarketClient::new(server.uri(), Duration::ZERO).unwrap();
    let mut session = ChatSession::new(client, &["bitcoin"], Duration::from_secs(3600));
    assert!(session.book().is_empty());

    let out = transcript(&mut session, "tell me about bitcoin\nexit\n").await;

    let updating = out.find("CryptoBuddy: Updating cryptocurrency data...").unwrap();
    let first_prompt = out.find("\nYou: ").unwrap();
    assert!(updating < first_prompt);
    assert_eq!(out.matches("Updating cryptocurrency data").count(), 1);
    assert!(out.contains("💰 Current Price: $70,000.00"));
    assert_eq!(session.book().get("Bitcoin").unwrap().current_price, 70000.0);
}
