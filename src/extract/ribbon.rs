// Extractor for pages that declare one `var trace.. = {x: [..], y: [..]}`
// block per series instead of a single Plotly data array.
use crate::extract::balanced_array;
use crate::model::{ExtractError, RawSeries};
use scraper::{Html, Selector};
use serde_json::Value;

pub const RIBBON_MARKER: &str = "var trace";

pub struct RibbonExtractor;

impl RibbonExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, html: &str, page: &str) -> Result<Vec<RawSeries>, ExtractError> {
        let document = Html::parse_document(html);
        let script_selector = Selector::parse("script").expect("static selector");

        let script = document
            .select(&script_selector)
            .map(|el| el.inner_html())
            .find(|text| text.contains(RIBBON_MARKER))
            .ok_or_else(|| ExtractError::MarkerNotFound {
                page: page.to_string(),
                marker: RIBBON_MARKER.to_string(),
            })?;

        let mut series = Vec::new();
        for chunk in script.split(RIBBON_MARKER).skip(1) {
            let x = axis_array(chunk, "x:", page)?;
            let y = axis_array(chunk, "y:", page)?;
            match (x, y) {
                (Some(x), Some(y)) => series.push(RawSeries {
                    name: quoted_after(chunk, "name:").unwrap_or_default(),
                    x,
                    y,
                }),
                // A trace block without both axes carries no plottable data.
                _ => continue,
            }
        }
        Ok(series)
    }
}

impl Default for RibbonExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn axis_array(chunk: &str, key: &str, page: &str) -> Result<Option<Vec<Value>>, ExtractError> {
    let Some(at) = chunk.find(key) else {
        return Ok(None);
    };
    let (start, end) =
        balanced_array(chunk, at).ok_or_else(|| ExtractError::UnbalancedBrackets {
            page: page.to_string(),
        })?;
    serde_json::from_str(&chunk[start..=end])
        .map(Some)
        .map_err(|source| ExtractError::Json {
            page: page.to_string(),
            source,
        })
}

/// Value of a `key: 'quoted'` or `key: "quoted"` field within the chunk.
fn quoted_after(chunk: &str, key: &str) -> Option<String> {
    let rest = &chunk[chunk.find(key)? + key.len()..];
    let open = rest.find(['\'', '"'])?;
    let quote = rest[open..].chars().next()?;
    let body = &rest[open + 1..];
    Some(body[..body.find(quote)?].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"
        var trace1 = {
            x: ["2020-01-01","2020-01-02"],
            y: [9000, 9100],
            name: 'Price',
        };
        var trace2 = {
            x: ["2020-01-01","2020-01-02"],
            y: [8000, 8050],
            name: '1m to 3m',
        };
        var layoutOnly = { title: 'no axes here' };
    "#;

    fn page(script: &str) -> String {
        format!("<html><body><script>{script}</script></body></html>")
    }

    #[test]
    fn extracts_one_series_per_trace_block() {
        let series = RibbonExtractor::new()
            .extract(&page(SCRIPT), "fixture")
            .unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].name, "Price");
        assert_eq!(series[1].name, "1m to 3m");
        assert_eq!(series[1].y[0], serde_json::json!(8000));
    }

    #[test]
    fn missing_marker_fails_fast() {
        let err = RibbonExtractor::new()
            .extract(&page("var other = 1;"), "fixture")
            .unwrap_err();
        assert!(matches!(err, ExtractError::MarkerNotFound { .. }));
    }

    #[test]
    fn block_without_y_axis_is_skipped() {
        let script = r#"var trace1 = { x: ["2020-01-01"], name: 'lonely' };"#;
        let series = RibbonExtractor::new()
            .extract(&page(script), "fixture")
            .unwrap();
        assert!(series.is_empty());
    }
}
