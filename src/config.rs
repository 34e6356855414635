use crate::extract::plotly::DEFAULT_MARKER;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    CycleBands,
    NormMvrv,
    Aviv,
    SthIndicator,
    SthRibbon,
    SthNupl,
    Tabular,
}

#[derive(Debug, Deserialize)]
pub struct PageConfig {
    pub name: String,
    pub kind: PageKind,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_marker")]
    pub marker: String,
    /// Table name for `tabular` pages (resolved under `tabular_dir`).
    #[serde(default)]
    pub table: Option<String>,
    /// Column plotted for `tabular` pages.
    #[serde(default)]
    pub column: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub output_dir: String,
    pub cache_db: String,
    #[serde(default = "default_tabular_dir")]
    pub tabular_dir: String,
    #[serde(default = "default_timeout")]
    pub http_timeout_seconds: u64,
    pub pages: Vec<PageConfig>,
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

fn default_tabular_dir() -> String {
    "tables".to_string()
}

fn default_timeout() -> u64 {
    30
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_in() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "output_dir": "out",
                "cache_db": "cache.db",
                "pages": [
                    {"name": "mvrv", "kind": "norm_mvrv", "url": "https://example.test/mvrv"},
                    {"name": "breadth", "kind": "tabular", "table": "breadth", "column": "Avg"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.http_timeout_seconds, 30);
        assert_eq!(config.pages[0].marker, DEFAULT_MARKER);
        assert_eq!(config.pages[0].kind, PageKind::NormMvrv);
        assert_eq!(config.pages[1].table.as_deref(), Some("breadth"));
    }
}
