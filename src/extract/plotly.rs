// Extractor for pages embedding a `Plotly.newPlot(` data array in a script tag.
use crate::extract::balanced_array;
use crate::model::{ExtractError, RawSeries};
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_MARKER: &str = "Plotly.newPlot(";

/// The fields of a trace object we care about; everything else (colors, modes,
/// layout hints) is ignored by the decoder.
#[derive(Debug, Deserialize)]
struct Trace {
    name: Option<String>,
    x: Option<Vec<Value>>,
    y: Option<Vec<Value>>,
}

pub struct PlotlyExtractor {
    marker: String,
}

impl PlotlyExtractor {
    pub fn new(marker: &str) -> Self {
        Self {
            marker: marker.to_string(),
        }
    }

    /// Pulls the embedded data array out of `html` and decodes it into one
    /// `RawSeries` per trace carrying both axes.
    ///
    /// Any failure makes the whole page's data unavailable; there is no
    /// partial result.
    pub fn extract(&self, html: &str, page: &str) -> Result<Vec<RawSeries>, ExtractError> {
        let document = Html::parse_document(html);
        let script_selector = Selector::parse("script").expect("static selector");

        // The host pages escape-wrap the payload; stripping backslashes
        // restores plain JSON. Which script tag carries the data varies per
        // page, so take the first one containing the marker.
        let script = document
            .select(&script_selector)
            .map(|el| el.inner_html())
            .find(|text| text.contains(&self.marker))
            .ok_or_else(|| ExtractError::MarkerNotFound {
                page: page.to_string(),
                marker: self.marker.clone(),
            })?
            .replace('\\', "");

        let marker_at = script
            .find(&self.marker)
            .ok_or_else(|| ExtractError::MarkerNotFound {
                page: page.to_string(),
                marker: self.marker.clone(),
            })?;

        let (start, end) = balanced_array(&script, marker_at + self.marker.len())
            .ok_or_else(|| ExtractError::UnbalancedBrackets {
                page: page.to_string(),
            })?;

        let traces: Vec<Trace> =
            serde_json::from_str(&script[start..=end]).map_err(|source| ExtractError::Json {
                page: page.to_string(),
                source,
            })?;

        Ok(traces
            .into_iter()
            .filter_map(|t| match (t.x, t.y) {
                (Some(x), Some(y)) => Some(RawSeries {
                    name: t.name.unwrap_or_else(|| "Unnamed Trace".to_string()),
                    x,
                    y,
                }),
                // Entries carrying only one axis are annotations, not data.
                _ => None,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(script_body: &str) -> String {
        format!(
            "<html><head><script>var a = 1;</script></head>\
             <body><script>{script_body}</script></body></html>"
        )
    }

    #[test]
    fn extracts_traces_with_both_axes() {
        let html = page(
            r#"Plotly.newPlot("chart", [{"name":"Price","x":["2020-01-01","2020-01-02"],"y":[100,200]},{"name":"Annotation","x":["2020-01-01"]}], {"margin":[0,0]})"#,
        );
        let series = PlotlyExtractor::new(DEFAULT_MARKER)
            .extract(&html, "fixture")
            .unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].name, "Price");
        assert_eq!(series[0].x.len(), 2);
        assert_eq!(series[0].y[1], serde_json::json!(200));
    }

    #[test]
    fn isolates_exactly_the_first_balanced_array() {
        // Nested arrays inside the payload, plus a second bracketed argument
        // after it that must not leak into the parse.
        let html = page(
            r#"Plotly.newPlot("c", [{"name":"P","x":[["2020-01-01"]],"y":[[1,[2]]]}], [1,2,3])"#,
        );
        let series = PlotlyExtractor::new(DEFAULT_MARKER)
            .extract(&html, "fixture")
            .unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].x, vec![serde_json::json!(["2020-01-01"])]);
    }

    #[test]
    fn marker_not_found_fails_fast() {
        let html = page("var data = [1,2,3];");
        let err = PlotlyExtractor::new(DEFAULT_MARKER)
            .extract(&html, "fixture")
            .unwrap_err();
        assert!(matches!(err, ExtractError::MarkerNotFound { .. }));
    }

    #[test]
    fn unbalanced_brackets_fail_fast() {
        let html = page(r#"Plotly.newPlot("c", [[1,2"#);
        let err = PlotlyExtractor::new(DEFAULT_MARKER)
            .extract(&html, "fixture")
            .unwrap_err();
        assert!(matches!(err, ExtractError::UnbalancedBrackets { .. }));
    }

    #[test]
    fn json_decode_failure_yields_no_series() {
        let html = page(r#"Plotly.newPlot("c", [{name:"unquoted"}], {})"#);
        let err = PlotlyExtractor::new(DEFAULT_MARKER)
            .extract(&html, "fixture")
            .unwrap_err();
        assert!(matches!(err, ExtractError::Json { .. }));
    }
}
