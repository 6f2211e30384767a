//! Quire turns a folder of pages, or a list of page records plus data, into
//! a finished static site.
//!
//! Two builders are provided:
//!
//! - [`build_tree`] mirrors a source directory into a destination directory,
//!   rendering every `.html` file through one shared template (with `title`
//!   and `content` available to it) and copying every other file verbatim.
//! - [`build_pages`] renders explicit page records (template + data file +
//!   output path) and wraps each result in a shared layout.
//!
//! This crate provides an API that allows for embedding Quire into another
//! application. For Quire's command line interface, see the `quire-cli`
//! crate.

mod config;
mod data;
mod error;
mod fs;
mod pages;
mod template;
mod title;
mod tree;
mod view;

pub use config::{Config, IndexMatch, PagesConfig, TreeConfig};
pub use data::load_data;
pub use error::Error;
pub use pages::{build_pages, PageRecord, PagesBuilder};
pub use template::Templates;
pub use title::infer_title;
pub use tree::{build_tree, copy_asset, BuildSummary, TreeBuilder};
pub use view::{DataView, LayoutView, PageView};
