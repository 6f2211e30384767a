//! The data handed to templates.
//!
//! Each view enumerates exactly the keys a template may reference, so global
//! and page-local data can never silently overwrite each other.

use serde::Serialize;
use serde_json::Value as JsonValue;

/// What a page in a mirrored directory tree is rendered with.
///
/// `content` is the page's raw source text. It is never expanded as a
/// template itself, so reference it as `{{{content}}}` to insert it
/// unescaped.
#[derive(Debug, Clone, Serialize)]
pub struct PageView<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

/// What a page template is rendered with when building from page records.
///
/// Available to templates as `{{site.*}}` and `{{page.*}}`.
#[derive(Debug, Clone, Serialize)]
pub struct DataView<'a> {
    pub site: &'a JsonValue,
    pub page: &'a JsonValue,
}

/// What the shared layout is rendered with: the page's [`DataView`] plus the
/// rendered page as `content`.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutView<'a> {
    pub site: &'a JsonValue,
    pub page: &'a JsonValue,
    pub content: &'a str,
}

impl<'a> DataView<'a> {
    pub fn with_content(&self, content: &'a str) -> LayoutView<'a> {
        LayoutView {
            site: self.site,
            page: self.page,
            content,
        }
    }
}
