//! The batch run: each exchange list becomes a feed and a viewer page, then
//! everything is combined into `all.atom` and `all.html`.
//!
//! Lists are processed one after another. Within a list, boundary lookups go
//! through an ordered buffer of `concurrency` requests, so entries always
//! come out in row order. The first error stops the run.

use anyhow::{Context, Result, anyhow};
use futures::{StreamExt, TryStreamExt, stream};
use tracing::info;

use crate::atom::{FeedEntry, RunTimestamp, render_feed};
use crate::boundary::{Polygon, fetch_polygon};
use crate::config::Config;
use crate::exchange::{Exchange, read_exchanges};
use crate::fetch::HttpClient;
use crate::headers::Columns;
use crate::output::write_outputs;
use crate::sheet::load_sheet;
use crate::sources::{COMBINED, SOURCES, Source, UK_MIDPOINT};
use crate::viewer::ViewerTemplate;

/// Number of entries written per list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub sources: Vec<(&'static str, usize)>,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.sources.iter().map(|(_, n)| n).sum()
    }
}

/// Loads the list for `source` and builds its entries without writing anything.
///
/// Fails before any boundary is fetched if the header row lacks a required column.
pub async fn build_entries<C: HttpClient + ?Sized>(
    client: &C,
    config: &Config,
    source: &Source,
    updated: RunTimestamp,
) -> Result<Vec<FeedEntry>> {
    let location = config.sheet_location(source.slug);
    let sheet = load_sheet(client, &location)
        .await
        .with_context(|| format!("failed to load exchange list '{}'", source.slug))?;

    let header = sheet
        .header()
        .ok_or_else(|| anyhow!("exchange list '{}' is empty", source.slug))?;
    let columns = Columns::from_header_row(header)
        .with_context(|| format!("unrecognised headers in exchange list '{}'", source.slug))?;

    let exchanges = read_exchanges(&sheet, &columns);
    info!(exchanges = exchanges.len(), "Exchange list read");

    let polygons = fetch_polygons(client, &config.bounds_url, &exchanges, config.concurrency)
        .await
        .with_context(|| format!("failed to fetch boundaries for '{}'", source.slug))?;

    Ok(exchanges
        .iter()
        .zip(&polygons)
        .map(|(exchange, polygon)| FeedEntry::new(exchange, polygon, updated))
        .collect())
}

/// Boundaries for `exchanges`, in the same order.
async fn fetch_polygons<C: HttpClient + ?Sized>(
    client: &C,
    url_template: &str,
    exchanges: &[Exchange],
    concurrency: usize,
) -> Result<Vec<Polygon>> {
    stream::iter(exchanges)
        .map(|exchange| fetch_polygon(client, url_template, &exchange.id))
        .buffered(concurrency.max(1))
        .try_collect()
        .await
}

/// Builds and writes the feed and viewer page for one list, returning its entries.
#[tracing::instrument(skip_all, fields(slug = source.slug))]
pub async fn process_source<C: HttpClient + ?Sized>(
    client: &C,
    config: &Config,
    template: &ViewerTemplate,
    source: &Source,
    updated: RunTimestamp,
) -> Result<Vec<FeedEntry>> {
    let entries = build_entries(client, config, source, updated).await?;

    let feed = render_feed(source, &entries, updated);
    let page = template.render(source, UK_MIDPOINT, updated);
    write_outputs(&config.output_dir, source.slug, &feed, &page)?;

    Ok(entries)
}

/// Runs every list in order, then writes the combined outputs.
pub async fn run<C: HttpClient + ?Sized>(
    client: &C,
    config: &Config,
    template: &ViewerTemplate,
    updated: RunTimestamp,
) -> Result<RunSummary> {
    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "failed to create output directory '{}'",
            config.output_dir.display()
        )
    })?;

    let mut summary = RunSummary::default();
    let mut all_entries = Vec::new();

    for source in &SOURCES {
        let entries = process_source(client, config, template, source, updated).await?;
        summary.sources.push((source.slug, entries.len()));
        all_entries.extend(entries);
    }

    let feed = render_feed(&COMBINED, &all_entries, updated);
    let page = template.render(&COMBINED, UK_MIDPOINT, updated);
    write_outputs(&config.output_dir, COMBINED.slug, &feed, &page)?;

    info!(total = summary.total(), updated = %updated, "Run complete");
    Ok(summary)
}
