//! Configuration-related functionality for Quire.

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::data::load_as;
use crate::fs::maybe_canonicalize;
use crate::Error;

/// Decides when a file stem counts as the index page for the purposes of
/// title inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexMatch {
    /// Only a stem that is exactly `index`.
    Exact,
    /// Every literal occurrence of `index` within the stem, so `reindex`
    /// and `index-page` are affected too.
    Substring,
}

impl Default for IndexMatch {
    fn default() -> Self {
        Self::Exact
    }
}

impl std::str::FromStr for IndexMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(Self::Exact),
            "substring" => Ok(Self::Substring),
            _ => Err(format!(
                "unknown index match mode \"{}\" (expected \"exact\" or \"substring\")",
                s
            )),
        }
    }
}

/// Configuration for mirroring a directory tree through a single template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TreeConfig {
    /// The shared template every HTML page is rendered into.
    pub template: PathBuf,
    /// Root of the source tree.
    pub src: PathBuf,
    /// Root of the destination tree.
    pub dest: PathBuf,
    /// Title used for index pages.
    pub index_title: String,
    pub index_match: IndexMatch,
    /// Fail rendering when the template references a variable that isn't
    /// supplied.
    pub strict: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            template: PathBuf::from("template.html"),
            src: PathBuf::from("pages"),
            dest: PathBuf::from("docs"),
            index_title: "Home".to_string(),
            index_match: IndexMatch::default(),
            strict: false,
        }
    }
}

/// Configuration for building pages from explicit page records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PagesConfig {
    /// Directory page templates (and the layout) are loaded from.
    pub templates: PathBuf,
    /// Directory page data (and the site data) are loaded from.
    pub data: PathBuf,
    /// The JSON or YAML file listing the pages to build.
    pub pages: PathBuf,
    /// Output directory.
    pub dist: PathBuf,
    /// The layout, relative to `templates`.
    pub layout: PathBuf,
    /// Global site data, relative to `data`.
    pub site: PathBuf,
    pub strict: bool,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            templates: PathBuf::from("templates"),
            data: PathBuf::from("data"),
            pages: PathBuf::from("pages/pages.json"),
            dist: PathBuf::from("dist"),
            layout: PathBuf::from("layout.mustache"),
            site: PathBuf::from("site.json"),
            strict: false,
        }
    }
}

/// Quire project configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tree: TreeConfig,
    pub pages: PagesConfig,
}

impl Config {
    /// Load the configuration from the given JSON or YAML file, which must
    /// exist.
    pub fn load<P: AsRef<Path>>(config_file: P) -> Result<Self> {
        let config_file = config_file.as_ref();
        let config: Self = load_as(config_file)
            .wrap_err_with(|| Error::FailedToLoadConfig(config_file.to_path_buf()))?;
        debug!("Loaded configuration from {}", config_file.display());
        Ok(config)
    }

    /// Load the configuration from the given JSON or YAML file. If the file
    /// does not exist, the default configuration is returned.
    pub fn load_or_default<P: AsRef<Path>>(maybe_config_file: P) -> Result<Self> {
        let maybe_config_file = maybe_config_file.as_ref();
        debug!(
            "Attempting to load config file: {}",
            maybe_config_file.display()
        );
        match maybe_canonicalize(maybe_config_file)? {
            Some(config_path) => Self::load(config_path),
            None => {
                debug!(
                    "No such configuration file, using defaults: {}",
                    maybe_config_file.display()
                );
                Ok(Self::default())
            }
        }
    }
}
