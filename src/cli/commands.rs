use std::process::ExitCode;
use std::sync::Arc;

use crate::app::{AppContext, Result, TickerError};
use crate::domain::NewsCollection;
use crate::store::JsonPositionStore;

/// Exit status when no feed produced any item.
pub const EXIT_NO_CONTENT: u8 = 2;

/// Aggregate on a background task; the collection is handed back once complete.
pub async fn fetch_news(ctx: Arc<AppContext>) -> Result<NewsCollection> {
    let worker = tokio::spawn(async move { ctx.aggregator.aggregate().await });
    worker
        .await
        .map_err(|e| TickerError::Other(format!("Aggregation task failed: {}", e)))
}

pub async fn show(ctx: Arc<AppContext>) -> Result<ExitCode> {
    let items = fetch_news(ctx.clone()).await?;
    if items.is_empty() {
        eprintln!("No news found.");
        return Ok(ExitCode::from(EXIT_NO_CONTENT));
    }

    // The overlay owns the terminal and blocks until dismissed.
    let store = ctx.position_store();
    tokio::task::spawn_blocking(move || crate::tui::run(items, store, &ctx.config))
        .await
        .map_err(|e| TickerError::Other(format!("Overlay task failed: {}", e)))??;

    Ok(ExitCode::SUCCESS)
}

pub async fn list(ctx: Arc<AppContext>) -> Result<ExitCode> {
    println!("Fetching {} feeds...", ctx.aggregator.sources().len());

    let items = fetch_news(ctx).await?;
    if items.is_empty() {
        eprintln!("No news found.");
        return Ok(ExitCode::from(EXIT_NO_CONTENT));
    }

    for item in &items {
        println!("{} [{}]", item.title, item.source);
        if item.has_link() {
            println!("    {}", item.link);
        }
    }
    println!("{} items", items.len());

    Ok(ExitCode::SUCCESS)
}

pub fn reset_position(ctx: &AppContext) -> Result<ExitCode> {
    match ctx.position_file() {
        Some(path) => {
            JsonPositionStore::new(&path, ctx.config.overlay.margins()).clear()?;
            println!("Cleared saved position: {}", path.display());
        }
        None => println!("No saved position"),
    }
    Ok(ExitCode::SUCCESS)
}
