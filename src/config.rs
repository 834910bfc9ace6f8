//! Run configuration.
//!
//! Compiled-in defaults point at the published exchange lists and the
//! boundary service. Each can be overridden from the environment (a `.env`
//! file is honoured) and then from the command line.

use std::path::PathBuf;

/// Where the exchange lists live; `{slug}` is replaced by the source slug.
pub const DEFAULT_SHEET_URL: &str = "http://www.openreach.co.uk/orpg/home/products/\
    super-fastfibreaccess/downloads/sffa_exchange_lists/{slug}.xls";

/// Exchange boundary lookup; the `{id}` query value is replaced by the encoded exchange id.
pub const DEFAULT_BOUNDS_URL: &str =
    "http://www.samknows.com/broadband/index.php/map/getExchangeBoundsJson?olo={id}";

pub const DEFAULT_TEMPLATE: &str = "template.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Sheet location template. Anything not starting with `http` is a local path.
    pub sheet_url: String,
    pub bounds_url: String,
    /// Viewer page template, read once before anything is fetched.
    pub template_path: PathBuf,
    pub output_dir: PathBuf,
    /// Boundary requests in flight per source. 1 keeps the run strictly sequential.
    pub concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet_url: DEFAULT_SHEET_URL.to_string(),
            bounds_url: DEFAULT_BOUNDS_URL.to_string(),
            template_path: PathBuf::from(DEFAULT_TEMPLATE),
            output_dir: PathBuf::from("."),
            concurrency: 1,
        }
    }
}

impl Config {
    /// Defaults overridden by `EXCHANGES_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset or empty keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get("EXCHANGES_SHEET_URL") {
            config.sheet_url = url;
        }
        if let Some(url) = get("EXCHANGES_BOUNDS_URL") {
            config.bounds_url = url;
        }
        if let Some(path) = get("EXCHANGES_TEMPLATE") {
            config.template_path = PathBuf::from(path);
        }
        if let Some(dir) = get("EXCHANGES_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }

        config
    }

    /// Location of the sheet for `slug`.
    pub fn sheet_location(&self, slug: &str) -> String {
        self.sheet_url.replace("{slug}", slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_sheet_location() {
        let config = Config::default();
        assert_eq!(
            config.sheet_location("coming_soon"),
            "http://www.openreach.co.uk/orpg/home/products/super-fastfibreaccess/downloads/sffa_exchange_lists/coming_soon.xls"
        );
        assert_eq!(config.concurrency, 1);
    }

    #[test]
    fn test_lookup_overrides_defaults() {
        let vars: HashMap<&str, &str> = [
            ("EXCHANGES_SHEET_URL", "fixtures/{slug}.csv"),
            ("EXCHANGES_OUTPUT_DIR", "public"),
            ("EXCHANGES_BOUNDS_URL", "  "),
        ]
        .into_iter()
        .collect();

        let config = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.sheet_location("all"), "fixtures/all.csv");
        assert_eq!(config.output_dir, PathBuf::from("public"));
        // blank values are ignored
        assert_eq!(config.bounds_url, DEFAULT_BOUNDS_URL);
        assert_eq!(config.template_path, PathBuf::from(DEFAULT_TEMPLATE));
    }
}
