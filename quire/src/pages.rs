//! Builds pages from explicit page records: each record names a template, a
//! data file and an output path, and every rendered page is wrapped in a
//! shared layout.

use std::fs;
use std::path::{Component, Path, PathBuf};

use eyre::{Result, WrapErr};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::data::{load_as, load_data};
use crate::fs::{ensure_parent_path_exists, ensure_path_exists};
use crate::{DataView, Error, PagesConfig, Templates};

/// The name the layout is registered under.
pub const LAYOUT_NAME: &str = "layout";

// Page templates are registered as `page:<path>` so that no template path
// can collide with the layout.
fn page_template_name(template: &Path) -> String {
    format!("page:{}", template.to_string_lossy())
}

/// A single page to build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Page template, relative to the templates directory.
    pub template: PathBuf,
    /// Page data file, relative to the data directory.
    pub data: PathBuf,
    /// Output file, relative to the output directory.
    pub output: PathBuf,
}

/// Execution context for building page records: site data and layout are
/// loaded once, page templates as they are first needed.
pub struct PagesBuilder<'a> {
    config: &'a PagesConfig,
    site: JsonValue,
    templates: Templates<'a>,
}

impl<'a> PagesBuilder<'a> {
    pub fn new(config: &'a PagesConfig) -> Result<Self> {
        let site_path = config.data.join(&config.site);
        let site = load_data(&site_path)
            .wrap_err_with(|| Error::FailedToLoadData(site_path.clone()))?;
        debug!("Loaded site data from {}", site_path.display());

        let mut templates = Templates::new(config.strict);
        templates.load(LAYOUT_NAME, config.templates.join(&config.layout))?;
        Ok(Self {
            config,
            site,
            templates,
        })
    }

    /// Reads the configured list of page records.
    pub fn load_records(&self) -> Result<Vec<PageRecord>> {
        let path = &self.config.pages;
        load_as(path).wrap_err_with(|| Error::FailedToLoadPages(path.to_path_buf()))
    }

    /// Renders a single page and writes it out, returning the output path.
    pub fn build_page(&mut self, record: &PageRecord) -> Result<PathBuf> {
        let output_path = self.output_path(&record.output)?;
        let template_name = page_template_name(&record.template);
        if !self.templates.contains(&template_name) {
            self.templates
                .load(&template_name, self.config.templates.join(&record.template))?;
        }
        let data_path = self.config.data.join(&record.data);
        let page = load_data(&data_path).wrap_err_with(|| Error::FailedToLoadData(data_path))?;

        let view = DataView {
            site: &self.site,
            page: &page,
        };
        let content = self.templates.render(&template_name, &view)?;
        let rendered = self
            .templates
            .render(LAYOUT_NAME, &view.with_content(&content))?;

        ensure_parent_path_exists(&output_path)?;
        fs::write(&output_path, rendered)
            .wrap_err_with(|| Error::FailedToWrite(output_path.clone()))?;
        info!("Built: {}", record.output.display());
        Ok(output_path)
    }

    /// Builds every configured page, stopping at the first failure. Returns
    /// the number of pages written.
    pub fn build(&mut self) -> Result<u64> {
        ensure_path_exists(&self.config.dist)?;
        let records = self.load_records()?;
        let mut output_count = 0_u64;
        for record in &records {
            self.build_page(record)?;
            output_count += 1;
        }
        Ok(output_count)
    }

    fn output_path(&self, output: &Path) -> Result<PathBuf> {
        let escapes = output
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || output.as_os_str().is_empty() {
            return Err(Error::OutputEscapesDestination(output.to_path_buf()).into());
        }
        Ok(self.config.dist.join(output))
    }
}

/// Loads site data and the layout once, then builds every page record.
pub fn build_pages(config: &PagesConfig) -> Result<u64> {
    PagesBuilder::new(config)?.build()
}
