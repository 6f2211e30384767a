//! Template registry.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use eyre::{Result, WrapErr};
use handlebars::Handlebars;
use log::debug;
use serde::Serialize;

use crate::Error;

/// Compiled templates, keyed by name.
///
/// Templates use [Handlebars](https://handlebarsjs.com/) syntax, which is a
/// superset of Mustache: `{{ var }}` is HTML-escaped and `{{{ var }}}` is
/// inserted raw.
pub struct Templates<'reg> {
    hb: Handlebars<'reg>,
    // Maps template names -> their source text.
    sources: HashMap<String, String>,
}

impl<'reg> Templates<'reg> {
    /// Constructor.
    ///
    /// In strict mode, referencing a variable that is absent from the data
    /// fails rendering. Otherwise it renders as an empty string.
    pub fn new(strict: bool) -> Self {
        let mut hb = Handlebars::new();
        hb.set_strict_mode(strict);
        Self {
            hb,
            sources: HashMap::new(),
        }
    }

    /// Compiles the given template and adds it to the registry, returning an
    /// error if a different template with the same name already exists or
    /// if the template cannot be parsed.
    pub fn register<N, T>(&mut self, name: N, template: T) -> Result<()>
    where
        N: AsRef<str>,
        T: AsRef<str>,
    {
        let name = name.as_ref();
        let template = template.as_ref();
        if let Some(existing) = self.sources.get(name) {
            if existing == template {
                debug!("Already have template {}, skipping", name);
                return Ok(());
            }
            return Err(Error::TemplateAlreadyExists(name.to_string()).into());
        }
        self.hb
            .register_template_string(name, template)
            .map_err(|e| Error::TemplateParse(name.to_string(), e))?;
        self.sources.insert(name.to_string(), template.to_string());
        debug!("Registered template {}", name);
        Ok(())
    }

    /// Reads the template at `path` and registers it under `name`.
    pub fn load<N, P>(&mut self, name: N, path: P) -> Result<()>
    where
        N: AsRef<str>,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .wrap_err_with(|| Error::FailedToLoadTemplate(path.to_path_buf()))?;
        self.register(name, content)
            .wrap_err_with(|| Error::FailedToLoadTemplate(path.to_path_buf()))
    }

    pub fn contains<N: AsRef<str>>(&self, name: N) -> bool {
        self.hb.has_template(name.as_ref())
    }

    /// Renders the named template against the given data.
    pub fn render<N, V>(&self, name: N, data: &V) -> Result<String>
    where
        N: AsRef<str>,
        V: Serialize,
    {
        let name = name.as_ref();
        Ok(self
            .hb
            .render(name, data)
            .map_err(|e| Error::TemplateRender(name.to_string(), e))?)
    }
}
