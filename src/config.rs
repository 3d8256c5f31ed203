use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Names a JSON file overriding [`DashboardConfig::default`].
pub const CONFIG_ENV: &str = "PHD_TRENDS_CONFIG";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Locations of the input files.
///
/// ```json
/// {
///   "salaries_path": "data/sed17-sr-tab049.xlsx",
///   "status_path": "data/sed17-sr-tab017.xlsx",
///   "countries_path": "data/sed17-sr-tab025.xlsx",
///   "header_image": "img/md-duran-1VqHRwxcCCw-unsplash.jpg"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Median salaries by field and employment sector (table 49).
    pub salaries_path: PathBuf,
    /// Recipients by year, field and citizenship status (table 17).
    pub status_path: PathBuf,
    /// Top countries of origin of temporary visa holders (table 25).
    pub countries_path: PathBuf,
    /// Decorative banner; omitted when `null`.
    pub header_image: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            salaries_path: PathBuf::from("data/sed17-sr-tab049.xlsx"),
            status_path: PathBuf::from("data/sed17-sr-tab017.xlsx"),
            countries_path: PathBuf::from("data/sed17-sr-tab025.xlsx"),
            header_image: Some(PathBuf::from("img/md-duran-1VqHRwxcCCw-unsplash.jpg")),
        }
    }
}

impl DashboardConfig {
    /// Read the file named by [`CONFIG_ENV`], or fall back to the defaults.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    /// Read a JSON config file. Relative paths inside it are resolved against
    /// the file's own directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let config = Self::from_json_str(&text, base)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("Using config {}", path.display());
        Ok(config)
    }

    pub fn from_json_str(text: &str, base: &Path) -> Result<Self> {
        let mut config: Self = serde_json::from_str(text)?;
        config.salaries_path = base.join(&config.salaries_path);
        config.status_path = base.join(&config.status_path);
        config.countries_path = base.join(&config.countries_path);
        config.header_image = config.header_image.map(|p| base.join(p));
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_keep_defaults() {
        let config = DashboardConfig::from_json_str(
            r#"{ "countries_path": "sample/countries.csv" }"#,
            Path::new(""),
        )
        .unwrap();
        let defaults = DashboardConfig::default();
        assert_eq!(config.countries_path, PathBuf::from("sample/countries.csv"));
        assert_eq!(config.salaries_path, defaults.salaries_path);
        assert_eq!(config.header_image, defaults.header_image);
    }

    #[test]
    fn relative_paths_resolve_against_config_dir() {
        let config = DashboardConfig::from_json_str(
            r#"{ "status_path": "status.csv", "header_image": null }"#,
            Path::new("sample_data"),
        )
        .unwrap();
        assert_eq!(config.status_path, Path::new("sample_data").join("status.csv"));
        assert_eq!(config.header_image, None);
    }

    #[test]
    fn absolute_paths_are_kept() {
        let config = DashboardConfig::from_json_str(
            r#"{ "salaries_path": "/srv/nsf/tab049.xlsx" }"#,
            Path::new("sample_data"),
        )
        .unwrap();
        assert_eq!(config.salaries_path, PathBuf::from("/srv/nsf/tab049.xlsx"));
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(DashboardConfig::from_json_str("{ nope", Path::new("")).is_err());
    }
}
