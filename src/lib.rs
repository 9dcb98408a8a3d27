//! DevRadar: location-driven developer discovery.
//!
//! DevRadar finds registered developers near the user and shows them as map
//! markers with profile callouts, filtered by technology stack. The crate
//! owns the orchestration behind that screen:
//! - Location permission and a one-shot position fix
//! - Technology multi-select with a searchable catalog
//! - Proximity searches tagged with strictly increasing sequence numbers
//! - Reconciliation that applies only the latest search's outcome, so a slow
//!   stale response never replaces fresher results

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Headless host (main.rs)                            │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime.rs)                               │  ← Event loop
//! │  - Host commands and collaborator completions       │
//! │  - Action execution                                 │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Search coordination                              │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Device Layer  │   │ Worker Layer  │
//! │ (ui/)         │   │ (device/)     │   │ (worker/)     │
//! │ - View models │   │ - Permission  │   │ - Search API  │
//! │ - Presenters  │   │ - Position    │   │ - Timeouts    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) and Observability (observability/)│
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`device`]: Permission and position collaborators
//! - [`domain`]: Coordinates, developer records, queries, errors
//! - [`observability`]: Tracing setup and error reporting
//! - [`runtime`]: Event loop wiring collaborators to the state machine
//! - [`ui`]: View models, presenters and navigation
//! - [`worker`]: Search worker and HTTP backend
//!
//! # Configuration
//!
//! ```toml
//! api_base_url = "http://localhost:3333"
//! position_timeout_ms = 10000
//! search_timeout_ms = 15000
//! techs = ["ReactJS", "React Native", "VueJS", "PHP", "Angular", "Python"]
//! trace_level = "debug"
//! trace_file = "/tmp/devradar-otlp.json"
//! ```
//!
//! # Example
//!
//! ```rust
//! use devradar::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::Launch)?;
//! assert_eq!(actions, vec![Action::RequestPermission]);
//! # Ok::<(), devradar::DevRadarError>(())
//! ```

pub mod app;
pub mod device;
pub mod domain;
pub mod observability;
pub mod runtime;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, Labels, TechCatalog};
pub use domain::{Coordinate, DevRadarError, DeveloperRecord, Result, TechFilter};
pub use runtime::{Collaborators, Runtime, RuntimeHandle};

use app::catalog::DEFAULT_TECHS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "http://localhost:3333";
const DEFAULT_POSITION_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_SEARCH_TIMEOUT_MS: u64 = 15_000;

/// Runtime configuration.
///
/// Built from a host-provided key/value map with [`Config::from_map`] or from
/// a TOML file with [`Config::from_file`]. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the search API; searches go to `{api_base_url}/users`.
    pub api_base_url: String,

    /// Whether to ask for the most precise position fix. Default: `true`
    pub high_accuracy: bool,

    /// Upper bound on the position fetch. Default: 10000
    pub position_timeout_ms: u64,

    /// Upper bound on each search request. Default: 15000
    pub search_timeout_ms: u64,

    /// Technologies offered in the multi-select.
    pub techs: Vec<String>,

    /// Callout text for developers without a bio.
    pub bio_placeholder: String,

    /// Loading overlay text.
    pub loading_label: String,

    /// Tracing filter directive.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or a full
    /// `EnvFilter` directive. Default: `"info"`
    pub trace_level: Option<String>,

    /// Where to write OTLP JSON span lines. Span export is off when unset.
    pub trace_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let labels = Labels::default();
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            high_accuracy: true,
            position_timeout_ms: DEFAULT_POSITION_TIMEOUT_MS,
            search_timeout_ms: DEFAULT_SEARCH_TIMEOUT_MS,
            techs: DEFAULT_TECHS.iter().map(ToString::to_string).collect(),
            bio_placeholder: labels.bio_placeholder,
            loading_label: labels.loading,
            trace_level: None,
            trace_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from a string map.
    ///
    /// # Parsing Rules
    ///
    /// - `techs`: Comma-separated string → `Vec<String>` (blank entries dropped;
    ///   an empty result keeps the default catalog)
    /// - `high_accuracy`: `"true"` / `"false"` (anything else keeps the default)
    /// - `position_timeout_ms`, `search_timeout_ms`: String → `u64` (falls back
    ///   to the default on parse error)
    /// - everything else is taken verbatim
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use devradar::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("techs".to_string(), "Rust, Go".to_string());
    /// map.insert("search_timeout_ms".to_string(), "500".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.techs, vec!["Rust", "Go"]);
    /// assert_eq!(config.search_timeout_ms, 500);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let techs = map
            .get("techs")
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.techs);

        let parse_ms = |key: &str, default: u64| {
            map.get(key)
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(default)
        };

        Self {
            api_base_url: map.get("api_base_url").cloned().unwrap_or(defaults.api_base_url),
            high_accuracy: map
                .get("high_accuracy")
                .and_then(|s| s.trim().parse::<bool>().ok())
                .unwrap_or(defaults.high_accuracy),
            position_timeout_ms: parse_ms("position_timeout_ms", defaults.position_timeout_ms),
            search_timeout_ms: parse_ms("search_timeout_ms", defaults.search_timeout_ms),
            techs,
            bio_placeholder: map.get("bio_placeholder").cloned().unwrap_or(defaults.bio_placeholder),
            loading_label: map.get("loading_label").cloned().unwrap_or(defaults.loading_label),
            trace_level: map.get("trace_level").cloned(),
            trace_file: map.get("trace_file").map(PathBuf::from),
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`DevRadarError::Io`] if the file cannot be read and
    /// [`DevRadarError::Config`] if it is not valid TOML for this struct.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| DevRadarError::Config(format!("{}: {e}", path.display())))
    }

    #[must_use]
    pub const fn position_timeout(&self) -> Duration {
        Duration::from_millis(self.position_timeout_ms)
    }

    #[must_use]
    pub const fn search_timeout(&self) -> Duration {
        Duration::from_millis(self.search_timeout_ms)
    }

    #[must_use]
    pub fn labels(&self) -> Labels {
        Labels {
            bio_placeholder: self.bio_placeholder.clone(),
            loading: self.loading_label.clone(),
        }
    }
}

/// Builds the initial application state from configuration.
///
/// Nothing is acquired yet: permission is unknown, there is no position fix
/// and the result set is empty. Feed [`Event::Launch`] to start the flow.
///
/// # Example
///
/// ```rust
/// use devradar::{initialize, Config};
///
/// let state = initialize(&Config::default());
/// assert!(state.coordinate.is_none());
/// assert_eq!(state.catalog.items().len(), 6);
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        api_base_url = %config.api_base_url,
        tech_count = config.techs.len(),
        high_accuracy = config.high_accuracy,
        "initializing devradar"
    );

    let mut state = AppState::new(TechCatalog::from_names(&config.techs), config.labels());
    state.high_accuracy = config.high_accuracy;
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_map_screen() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:3333");
        assert_eq!(config.position_timeout(), Duration::from_secs(10));
        assert_eq!(config.search_timeout(), Duration::from_secs(15));
        assert_eq!(config.techs.len(), 6);
        assert_eq!(config.labels(), Labels::default());
    }

    #[test]
    fn from_map_falls_back_on_bad_values() {
        let map = BTreeMap::from([
            ("position_timeout_ms".to_string(), "soon".to_string()),
            ("high_accuracy".to_string(), "false".to_string()),
            ("techs".to_string(), " , ".to_string()),
            ("trace_file".to_string(), "/tmp/t.json".to_string()),
        ]);

        let config = Config::from_map(&map);
        assert_eq!(config.position_timeout_ms, 10_000);
        assert!(!config.high_accuracy);
        assert_eq!(config.techs, Config::default().techs);
        assert_eq!(config.trace_file, Some(PathBuf::from("/tmp/t.json")));
    }

    #[test]
    fn from_file_reads_partial_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_base_url = \"http://10.0.2.2:3333\"").unwrap();
        writeln!(file, "techs = [\"Rust\"]").unwrap();
        writeln!(file, "bio_placeholder = \"(no bio)\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.api_base_url, "http://10.0.2.2:3333");
        assert_eq!(config.techs, ["Rust"]);
        assert_eq!(config.labels().bio_placeholder, "(no bio)");
        assert_eq!(config.search_timeout_ms, 15_000);
    }

    #[test]
    fn from_file_rejects_bad_types() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "search_timeout_ms = \"fast\"").unwrap();

        assert!(matches!(Config::from_file(file.path()), Err(DevRadarError::Config(_))));
        assert!(matches!(Config::from_file("/definitely/not/here.toml"), Err(DevRadarError::Io(_))));
    }

    #[test]
    fn initialize_applies_config() {
        let config = Config {
            techs: vec!["Rust".to_string(), "Go".to_string()],
            high_accuracy: false,
            ..Config::default()
        };

        let state = initialize(&config);
        assert_eq!(state.catalog.items().len(), 2);
        assert!(!state.high_accuracy);
    }
}
