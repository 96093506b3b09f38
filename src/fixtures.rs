//! Fixture data access: dataset name → resource path → fetch → parsed JSON.
//!
//! Fixtures are pre-generated JSON documents standing in for a real API.
//! Nothing here validates or reshapes them; callers get back exactly what the
//! document contains, or an error. There is no caching, retry or timeout.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

use crate::config::normalize_base_path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dataset {
    Stats,
    WordCloud,
    Timeline,
    Themes,
    Conversations,
    Kpis,
    PrioritizationMatrix,
    SitePerformance,
    ChannelComparison,
}

impl Dataset {
    pub const ALL: [Dataset; 9] = [
        Dataset::Stats,
        Dataset::WordCloud,
        Dataset::Timeline,
        Dataset::Themes,
        Dataset::Conversations,
        Dataset::Kpis,
        Dataset::PrioritizationMatrix,
        Dataset::SitePerformance,
        Dataset::ChannelComparison,
    ];

    /// Datasets every layout provides
    pub const CORE: [Dataset; 7] = [
        Dataset::Stats,
        Dataset::WordCloud,
        Dataset::Timeline,
        Dataset::Themes,
        Dataset::Conversations,
        Dataset::Kpis,
        Dataset::PrioritizationMatrix,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Dataset::Stats => "stats",
            Dataset::WordCloud => "word-cloud",
            Dataset::Timeline => "timeline",
            Dataset::Themes => "themes",
            Dataset::Conversations => "conversations",
            Dataset::Kpis => "kpis",
            Dataset::PrioritizationMatrix => "prioritization-matrix",
            Dataset::SitePerformance => "site-performance",
            Dataset::ChannelComparison => "channel-comparison",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Dataset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dataset::ALL
            .into_iter()
            .find(|d| d.slug() == s)
            .ok_or_else(|| format!("unknown dataset '{s}'"))
    }
}

/// Known deployments' naming conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// `mocked-api/<name>.json` under the base path
    Standard,
    /// `mocked-api/<name>_dpd.json` under the base path, including the extended datasets
    Dpd,
    /// `/mocked-api/<name>.json` from the origin root
    Root,
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Preset::Standard),
            "dpd" => Ok(Preset::Dpd),
            "root" => Ok(Preset::Root),
            other => Err(format!(
                "unknown layout '{other}' (expected standard, dpd or root)"
            )),
        }
    }
}

/// Where each dataset lives, relative to a deployment base path
///
/// A filename starting with `/` is rooted at the origin and ignores the base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    base_path: String,
    files: BTreeMap<Dataset, String>,
}

impl Layout {
    pub fn new(base_path: &str, files: BTreeMap<Dataset, String>) -> Self {
        Self {
            base_path: normalize_base_path(base_path),
            files,
        }
    }

    pub fn preset(preset: Preset, base_path: &str) -> Self {
        let files = match preset {
            Preset::Standard => Dataset::CORE
                .into_iter()
                .map(|d| (d, format!("mocked-api/{}.json", d.slug())))
                .collect(),
            Preset::Dpd => Dataset::ALL
                .into_iter()
                .map(|d| (d, format!("mocked-api/{}_dpd.json", d.slug())))
                .collect(),
            Preset::Root => Dataset::CORE
                .into_iter()
                .map(|d| (d, format!("/mocked-api/{}.json", d.slug())))
                .collect(),
        };
        Self::new(base_path, files)
    }

    /// Parse a JSON manifest: `{"base_path": "/app/", "files": {"stats": "api/stats.json"}}`
    pub fn from_manifest(raw: &str) -> Result<Self, serde_json::Error> {
        let parsed: Layout = serde_json::from_str(raw)?;
        Ok(Self::new(&parsed.base_path, parsed.files))
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Datasets this layout can serve, in declaration order
    pub fn datasets(&self) -> impl Iterator<Item = Dataset> + '_ {
        self.files.keys().copied()
    }

    /// URL path of a dataset, base path included
    pub fn url_path(&self, dataset: Dataset) -> Option<String> {
        let file = self.files.get(&dataset)?;
        if file.starts_with('/') {
            Some(file.clone())
        } else {
            Some(format!("{}{}", self.base_path, file))
        }
    }

    /// Path of a dataset inside a served directory, where the base path does not exist
    pub fn relative_path(&self, dataset: Dataset) -> Option<&str> {
        self.files.get(&dataset).map(|f| f.trim_start_matches('/'))
    }
}

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("dataset {0} is not part of this layout")]
    Unmapped(Dataset),
    #[error("request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{location} is not valid JSON: {source}")]
    Parse {
        location: String,
        source: serde_json::Error,
    },
}

/// Where fixture documents are read from
#[derive(Debug, Clone)]
pub enum Source {
    /// HTTP origin such as `http://127.0.0.1:8000`
    Http { origin: String },
    /// A public directory on disk
    Directory(PathBuf),
}

impl Source {
    pub fn http(origin: &str) -> Self {
        let origin = if origin.starts_with("http://") || origin.starts_with("https://") {
            origin.to_string()
        } else {
            format!("http://{}", origin)
        };
        Source::Http {
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    pub fn directory(dir: impl Into<PathBuf>) -> Self {
        Source::Directory(dir.into())
    }
}

/// One accessor per dataset over a configurable layout and source
#[derive(Debug, Clone)]
pub struct FixtureClient {
    layout: Layout,
    source: Source,
    http: reqwest::Client,
}

impl FixtureClient {
    pub fn new(layout: Layout, source: Source) -> Self {
        Self {
            layout,
            source,
            http: reqwest::Client::new(),
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Human-readable location of a dataset for this source
    pub fn location(&self, dataset: Dataset) -> Option<String> {
        match &self.source {
            Source::Http { origin } => self
                .layout
                .url_path(dataset)
                .map(|path| format!("{}{}", origin, path)),
            Source::Directory(dir) => self
                .layout
                .relative_path(dataset)
                .map(|rel| dir.join(rel).display().to_string()),
        }
    }

    /// Fetch a dataset and return its parsed contents unchanged
    ///
    /// Numbers outside the `f64` range (e.g. `1e400`) are rejected as a
    /// [`FixtureError::Parse`] rather than rounded to infinity.
    pub async fn fetch(&self, dataset: Dataset) -> Result<Value, FixtureError> {
        match &self.source {
            Source::Http { origin } => self.fetch_http(origin, dataset).await,
            Source::Directory(dir) => self.fetch_file(dir, dataset).await,
        }
    }

    async fn fetch_http(&self, origin: &str, dataset: Dataset) -> Result<Value, FixtureError> {
        let path = self
            .layout
            .url_path(dataset)
            .ok_or(FixtureError::Unmapped(dataset))?;
        let url = format!("{}{}", origin, path);
        let request_err = |source| FixtureError::Request {
            url: url.clone(),
            source,
        };

        debug!("GET {}", url);
        let body = self
            .http
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(request_err)?
            .bytes()
            .await
            .map_err(request_err)?;

        parse(&url, &body)
    }

    async fn fetch_file(&self, dir: &Path, dataset: Dataset) -> Result<Value, FixtureError> {
        let rel = self
            .layout
            .relative_path(dataset)
            .ok_or(FixtureError::Unmapped(dataset))?;
        let path = dir.join(rel);

        debug!("READ {}", path.display());
        let body = fs::read(&path)
            .await
            .map_err(|source| FixtureError::Read {
                path: path.clone(),
                source,
            })?;

        parse(&path.display().to_string(), &body)
    }

    pub async fn stats(&self) -> Result<Value, FixtureError> {
        self.fetch(Dataset::Stats).await
    }

    pub async fn word_cloud(&self) -> Result<Value, FixtureError> {
        self.fetch(Dataset::WordCloud).await
    }

    pub async fn timeline(&self) -> Result<Value, FixtureError> {
        self.fetch(Dataset::Timeline).await
    }

    pub async fn themes(&self) -> Result<Value, FixtureError> {
        self.fetch(Dataset::Themes).await
    }

    pub async fn conversations(&self) -> Result<Value, FixtureError> {
        self.fetch(Dataset::Conversations).await
    }

    pub async fn kpis(&self) -> Result<Value, FixtureError> {
        self.fetch(Dataset::Kpis).await
    }

    pub async fn prioritization_matrix(&self) -> Result<Value, FixtureError> {
        self.fetch(Dataset::PrioritizationMatrix).await
    }

    pub async fn site_performance(&self) -> Result<Value, FixtureError> {
        self.fetch(Dataset::SitePerformance).await
    }

    pub async fn channel_comparison(&self) -> Result<Value, FixtureError> {
        self.fetch(Dataset::ChannelComparison).await
    }
}

fn parse(location: &str, body: &[u8]) -> Result<Value, FixtureError> {
    serde_json::from_slice(body).map_err(|source| FixtureError::Parse {
        location: location.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nanoid::nanoid;
    use serde_json::json;

    #[test]
    fn test_dataset_slugs_roundtrip_through_from_str() {
        for dataset in Dataset::ALL {
            assert_eq!(dataset.slug().parse::<Dataset>(), Ok(dataset));
        }
        assert!("wordcloud".parse::<Dataset>().is_err());
    }

    #[test]
    fn test_standard_layout_paths() {
        let layout = Layout::preset(Preset::Standard, "/voc/");
        assert_eq!(
            layout.url_path(Dataset::WordCloud).as_deref(),
            Some("/voc/mocked-api/word-cloud.json")
        );
        assert_eq!(
            layout.relative_path(Dataset::Kpis),
            Some("mocked-api/kpis.json")
        );
        assert_eq!(layout.url_path(Dataset::SitePerformance), None);
        assert_eq!(layout.datasets().count(), 7);
    }

    #[test]
    fn test_dpd_layout_is_extended() {
        let layout = Layout::preset(Preset::Dpd, "/");
        assert_eq!(layout.datasets().count(), 9);
        assert_eq!(
            layout.url_path(Dataset::ChannelComparison).as_deref(),
            Some("/mocked-api/channel-comparison_dpd.json")
        );
    }

    #[test]
    fn test_root_layout_ignores_base_path() {
        let layout = Layout::preset(Preset::Root, "/voc/");
        assert_eq!(
            layout.url_path(Dataset::Stats).as_deref(),
            Some("/mocked-api/stats.json")
        );
        assert_eq!(
            layout.relative_path(Dataset::Stats),
            Some("mocked-api/stats.json")
        );
    }

    #[test]
    fn test_manifest_layout() {
        let layout = Layout::from_manifest(
            r#"{"base_path": "app", "files": {"stats": "data/s.json", "kpis": "/k.json"}}"#,
        )
        .unwrap();
        assert_eq!(layout.base_path(), "/app/");
        assert_eq!(layout.url_path(Dataset::Stats).as_deref(), Some("/app/data/s.json"));
        assert_eq!(layout.url_path(Dataset::Kpis).as_deref(), Some("/k.json"));
        assert_eq!(layout.url_path(Dataset::Themes), None);

        assert!(Layout::from_manifest(r#"{"base_path": "/", "files": {"bogus": "x"}}"#).is_err());
    }

    #[test]
    fn test_http_source_adds_scheme() {
        let Source::Http { origin } = Source::http("127.0.0.1:8000/") else {
            panic!("expected http source");
        };
        assert_eq!(origin, "http://127.0.0.1:8000");
    }

    #[test]
    fn test_http_source_keeps_existing_scheme_only() {
        let origin_of = |raw: &str| match Source::http(raw) {
            Source::Http { origin } => origin,
            other => panic!("expected http source, got {other:?}"),
        };
        assert_eq!(origin_of("https://pages.example/"), "https://pages.example");
        assert_eq!(origin_of("http://127.0.0.1:8000"), "http://127.0.0.1:8000");
        assert_eq!(origin_of("httpbin.local:8000"), "http://httpbin.local:8000");
    }

    #[test]
    fn test_out_of_range_number_is_a_parse_error() {
        let err = parse("kpis.json", br#"{"ratio": 1e400}"#).unwrap_err();
        assert!(matches!(err, FixtureError::Parse { .. }));
        assert_eq!(parse("kpis.json", br#"{"ratio": 1e300}"#).unwrap()["ratio"], 1e300);
    }

    #[tokio::test]
    async fn test_directory_source_returns_document_unchanged() {
        let dir = std::env::temp_dir().join(format!("voc-dash-fixtures-{}", nanoid!(8)));
        let doc = json!({"total": 2000, "sentiment": {"positive": 0.4, "negative": 0.35}});
        std::fs::create_dir_all(dir.join("mocked-api")).unwrap();
        std::fs::write(dir.join("mocked-api/stats.json"), doc.to_string()).unwrap();
        std::fs::write(dir.join("mocked-api/themes.json"), "{oops").unwrap();

        let client = FixtureClient::new(
            Layout::preset(Preset::Standard, "/voc/"),
            Source::directory(&dir),
        );
        assert_eq!(client.stats().await.unwrap(), doc);
        assert!(matches!(
            client.themes().await,
            Err(FixtureError::Parse { .. })
        ));
        assert!(matches!(
            client.timeline().await,
            Err(FixtureError::Read { .. })
        ));
        assert!(matches!(
            client.site_performance().await,
            Err(FixtureError::Unmapped(Dataset::SitePerformance))
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
