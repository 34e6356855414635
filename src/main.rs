mod assemble;
mod chart;
mod config;
mod extract;
mod indicator;
mod model;
mod source;
mod storage;
mod table;

use assemble::assemble;
use chart::ChartSpec;
use config::{load_config, AppConfig, PageConfig, PageKind};
use extract::{PlotlyExtractor, RibbonExtractor};
use model::PageError;
use source::{CsvTabular, HttpFetcher, PageSource, TabularSource};
use storage::PageCache;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{error, info, warn};

/// Series the STH-NUPL page carries straight through to its chart.
const NUPL_SERIES: &[&str] = &[
    "Price",
    "NUPL",
    "Young-NUPL",
    "Old-NUPL",
    "Euphoria (2-of-3)",
    "Euphoria (3-of-3)",
    "Max Pain",
];

fn main() {
    tracing_subscriber::fmt::init();

    let config: AppConfig = match load_config("config.json") {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let cache = match PageCache::new(&config.cache_db) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to open snapshot cache: {}", e);
            return;
        }
    };

    if let Err(e) = fs::create_dir_all(&config.output_dir) {
        error!("Failed to create output dir {}: {}", config.output_dir, e);
        return;
    }

    let fetcher = HttpFetcher::new(Duration::from_secs(config.http_timeout_seconds));
    let tabular = CsvTabular::new(&config.tabular_dir);

    info!("Pages to process: {}", config.pages.len());
    for page in &config.pages {
        // Each page is an independent pipeline; one failing must not stop
        // the rest.
        match process_page(page, &fetcher, &cache, &tabular) {
            Ok(charts) => {
                for (suffix, spec) in charts {
                    if let Err(e) = write_spec(&config.output_dir, &page.name, suffix, &spec) {
                        warn!("Write failed for page {}: {}", page.name, e);
                    }
                }
            }
            Err(e) => error!("Page {} failed: {}", page.name, e),
        }
    }
}

/// Runs one page end to end: fetch (with snapshot fallback) → extract →
/// assemble → derive → chart specs.
fn process_page(
    page: &PageConfig,
    fetcher: &impl PageSource,
    cache: &PageCache,
    tabular: &impl TabularSource,
) -> Result<Vec<(&'static str, ChartSpec)>, PageError> {
    if page.kind == PageKind::Tabular {
        let (Some(name), Some(column)) = (&page.table, &page.column) else {
            return Err(PageError::Config(format!(
                "tabular page {} needs both `table` and `column`",
                page.name
            )));
        };
        let t = tabular.read_table(name)?;
        let spec = chart::tabular(&page.name, &t, column)?;
        return Ok(vec![("chart", spec)]);
    }

    info!("Fetching {}...", page.url);
    let html = fetch_with_fallback(fetcher, cache, &page.url)?;

    info!("Extracting series from {}...", page.name);
    let raw = match page.kind {
        PageKind::SthRibbon => RibbonExtractor::new().extract(&html, &page.name)?,
        _ => PlotlyExtractor::new(&page.marker).extract(&html, &page.name)?,
    };

    let table = assemble(&raw, required_series(page.kind))?;
    info!("Assembled {} rows for {}", table.len(), page.name);

    let charts = match page.kind {
        PageKind::CycleBands => {
            let t = indicator::cycle::derive(&table)?;
            vec![
                ("all_bands", chart::all_cycle_bands(&t)?),
                ("avg_bands", chart::avg_cycle_bands(&t)?),
                ("normalized", chart::normalized_cycle(&t)?),
                ("transformed", chart::transformed_cycle(&t)?),
            ]
        }
        PageKind::NormMvrv => {
            let t = indicator::mvrv::derive(&table)?;
            vec![("chart", chart::norm_mvrv(&t)?)]
        }
        PageKind::Aviv => {
            let t = indicator::aviv::derive(&table)?;
            vec![("chart", chart::aviv_ratio(&t)?)]
        }
        PageKind::SthIndicator => {
            let t = indicator::sth::derive(&table)?;
            vec![("chart", chart::sth_mvrv_indicator(&t)?)]
        }
        PageKind::SthRibbon => {
            let t = indicator::ribbon::derive(&table)?;
            vec![("chart", chart::sth_mvrv_ribbon(&t)?)]
        }
        PageKind::SthNupl => vec![("chart", chart::sth_nupl(&table)?)],
        PageKind::Tabular => unreachable!("handled above"),
    };
    Ok(charts)
}

fn required_series(kind: PageKind) -> &'static [&'static str] {
    match kind {
        PageKind::CycleBands => indicator::cycle::REQUIRED,
        PageKind::NormMvrv => indicator::mvrv::REQUIRED,
        PageKind::Aviv => indicator::aviv::REQUIRED,
        PageKind::SthIndicator => indicator::sth::REQUIRED,
        PageKind::SthRibbon => indicator::ribbon::REQUIRED,
        PageKind::SthNupl => NUPL_SERIES,
        PageKind::Tabular => &[],
    }
}

/// Fetches a page, falling back to the cached snapshot when the source is
/// unreachable. Fresh bodies refresh the cache.
fn fetch_with_fallback(
    fetcher: &impl PageSource,
    cache: &PageCache,
    url: &str,
) -> Result<String, PageError> {
    match fetcher.fetch_page(url) {
        Ok(body) => {
            if let Err(e) = cache.store(url, &body) {
                warn!("Snapshot store failed for {}: {}", url, e);
            }
            Ok(body)
        }
        Err(fetch_err) => match cache.last_known_good(url)? {
            Some((body, fetched_at)) => {
                warn!(
                    "Fetch of {} failed ({}); rendering from snapshot of {}",
                    url, fetch_err, fetched_at
                );
                Ok(body)
            }
            None => Err(fetch_err.into()),
        },
    }
}

fn write_spec(
    output_dir: &str,
    page: &str,
    suffix: &str,
    spec: &ChartSpec,
) -> Result<(), PageError> {
    let path = Path::new(output_dir).join(format!("{page}_{suffix}.json"));
    fs::write(&path, serde_json::to_string_pretty(spec)?)?;
    info!("Wrote {}", path.display());
    Ok(())
}
