//! Catalog search commands.

use std::time::Duration;

use bazaar_storefront::catalog::load_catalog;
use bazaar_storefront::config::SearchConfig;
use bazaar_storefront::search::{Debouncer, SUGGESTION_LIMIT, SearchIndex};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use super::{CliError, client, product_line};

/// Fetch the catalog into a fresh index.
async fn loaded_index() -> Result<SearchIndex, CliError> {
    let client = client()?;
    let index = SearchIndex::new();
    let count = load_catalog(&index, &client).await?;
    info!(count, "Catalog loaded");
    Ok(index)
}

/// Run one search and print every match.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched.
#[allow(clippy::print_stdout)]
pub async fn once(query: &str) -> Result<(), CliError> {
    let index = loaded_index().await?;
    let results = index.search(query)?;

    if results.is_empty() {
        println!("No products found for \"{}\"", query.trim());
        return Ok(());
    }
    for product in &results {
        println!("{}", product_line(product));
    }
    println!("{} result(s)", results.len());
    Ok(())
}

/// The dropdown view for one debounced input; empty for a blank query.
fn suggestion_lines(index: &SearchIndex, query: &str) -> Vec<String> {
    let results = match index.suggest(query, SUGGESTION_LIMIT) {
        Ok(results) => results,
        Err(e) => {
            warn!(error = %e, "Search failed");
            return Vec::new();
        }
    };

    if results.query.trim().is_empty() {
        return Vec::new();
    }
    let mut lines = vec![format!("--- {} ---", results.query)];
    if results.total == 0 {
        lines.push("No products found".to_string());
    }
    lines.extend(results.products.iter().map(product_line));
    if results.has_more() {
        lines.push(format!("View all {} results", results.total));
    }
    lines
}

#[allow(clippy::print_stdout)]
fn print_suggestions(index: &SearchIndex, query: &str) {
    for line in suggestion_lines(index, query) {
        println!("{line}");
    }
}

/// Feed each line of `reader` to `debouncer`, then wait for the last
/// pending call to run.
async fn feed_lines<R>(reader: R, debouncer: &Debouncer<String>) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        debouncer.call(line);
    }

    while debouncer.is_pending() {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    Ok(())
}

/// Treat each stdin line as the next state of a search box.
///
/// Lines arriving faster than the debounce window supersede each other; only
/// the input left standing once the window passes is searched. Exits at EOF
/// after the last pending search has run.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched or stdin fails.
pub async fn interactive() -> Result<(), CliError> {
    let window = SearchConfig::from_env()?.debounce;
    let index = loaded_index().await?;

    let debouncer = {
        let index = index.clone();
        Debouncer::new(window, move |query: String| {
            print_suggestions(&index, &query);
        })
    };

    feed_lines(BufReader::new(tokio::io::stdin()), &debouncer).await?;
    Ok(())
}
