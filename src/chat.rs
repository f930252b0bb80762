// Interactive CLI chat: periodic market refresh plus a read-eval-print loop
// over the recommendation engine.

use anyhow::{Context, Result};
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::info;

use crate::asset::AssetBook;
use crate::constants::{BOT_NAME, BOT_TONE};
use crate::engine;
use crate::fetcher::{MarketClient, RefreshReport};

pub struct ChatSession {
    book: AssetBook,
    client: MarketClient,
    asset_ids: Vec<&'static str>,
    refresh_interval: Duration,
    /// `None` until the book has been filled once.
    last_refresh: Option<Instant>,
}

impl ChatSession {
    pub fn new(client: MarketClient, asset_ids: &[&'static str], refresh_interval: Duration) -> Self {
        Self {
            book: AssetBook::new(),
            client,
            asset_ids: asset_ids.to_vec(),
            refresh_interval,
            last_refresh: None,
        }
    }

    /// Session over an already populated book, e.g. from a prior refresh.
    /// The interval clock starts now.
    pub fn with_book(mut self, book: AssetBook) -> Self {
        self.book = book;
        self.last_refresh = Some(Instant::now());
        self
    }

    pub fn book(&self) -> &AssetBook {
        &self.book
    }

    /// Refreshes every asset now and restarts the interval clock.
    pub async fn refresh(&mut self) -> RefreshReport {
        let report = self.client.refresh(&self.asset_ids, &mut self.book).await;
        self.last_refresh = Some(Instant::now());
        report
    }

    fn refresh_due(&self) -> bool {
        match self.last_refresh {
            Some(at) => at.elapsed() > self.refresh_interval,
            None => true,
        }
    }

    pub fn respond(&self, input: &str) -> String {
        engine::recommend(&self.book, input)
    }

    /// Runs until `exit` or end of input.
    pub async fn run<R, W>(&mut self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        say(&mut writer, &format!("{}: {}\n", BOT_NAME, BOT_TONE)).await?;
        say(
            &mut writer,
            &format!("{}: Type 'exit' to quit or 'help' for available commands.\n", BOT_NAME),
        )
        .await?;

        let mut lines = reader.lines();
        loop {
            if self.refresh_due() {
                say(&mut writer, &format!("\n{}: Updating cryptocurrency data...\n", BOT_NAME)).await?;
                let report = self.refresh().await;
                info!(?report, "Periodic refresh complete");
                say(&mut writer, &format!("{}: Data updated successfully!\n", BOT_NAME)).await?;
            }

            say(&mut writer, "\nYou: ").await?;
            let Some(line) = lines.next_line().await.context("Failed to read user input")? else {
                info!("Input closed, ending chat session");
                say(&mut writer, "\n").await?;
                break;
            };

            if line.trim().eq_ignore_ascii_case("exit") {
                break;
            }

            let response = self.respond(&line);
            say(&mut writer, &format!("\n{}: {}\n", BOT_NAME, response)).await?;
        }

        say(
            &mut writer,
            &format!("\n{}: Goodbye! Remember to do your own research. 👋\n", BOT_NAME),
        )
        .await?;
        Ok(())
    }
}

async fn say<W: AsyncWrite + Unpin>(writer: &mut W, text: &str) -> Result<()> {
    writer
        .write_all(text.as_bytes())
        .await
        .context("Failed to write to console")?;
    writer.flush().await.context("Failed to flush console")?;
    Ok(())
}
