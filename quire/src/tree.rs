//! Mirrors a source directory into a destination directory, rendering every
//! HTML file through a single shared template and copying everything else
//! verbatim.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use log::{debug, info, trace, warn};

use crate::fs::{ensure_path_exists, has_extension, resolve_path};
use crate::{infer_title, Error, PageView, Templates, TreeConfig};

/// The name the shared template is registered under.
pub const TEMPLATE_NAME: &str = "page";

/// What a tree build produced.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    /// HTML files rendered through the template.
    pub pages: u64,
    /// Other files copied verbatim.
    pub assets: u64,
    /// Directories mirrored, including the destination root.
    pub directories: u64,
}

impl std::fmt::Display for BuildSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} pages rendered, {} assets copied, {} directories",
            self.pages, self.assets, self.directories
        )
    }
}

/// Execution context for a tree build: the configuration plus the loaded
/// template.
pub struct TreeBuilder<'a> {
    config: &'a TreeConfig,
    templates: Templates<'a>,
}

impl<'a> TreeBuilder<'a> {
    /// Loads and compiles the configured template. Fails before anything is
    /// written if the template is missing or malformed.
    pub fn new(config: &'a TreeConfig) -> Result<Self> {
        let mut templates = Templates::new(config.strict);
        templates.load(TEMPLATE_NAME, &config.template)?;
        debug!("Loaded template from {}", config.template.display());
        Ok(Self { config, templates })
    }

    /// Mirrors the configured source root into the configured destination
    /// root.
    pub fn build(&self) -> Result<BuildSummary> {
        let src = &self.config.src;
        let dest = &self.config.dest;
        if !src.is_dir() {
            return Err(Error::SourceNotADirectory(src.to_path_buf()).into());
        }
        let src_resolved = resolve_path(src)?;
        let dest_resolved = resolve_path(dest)?;
        if dest_resolved.starts_with(&src_resolved) {
            return Err(
                Error::DestinationInsideSource(dest.to_path_buf(), src.to_path_buf()).into(),
            );
        }
        self.walk(src, dest)
    }

    /// Recreates the structure of `src` under `dest`, dispatching every file
    /// to [`Self::render_page`] or [`copy_asset`] by its extension.
    ///
    /// Sibling entries are processed in directory listing order. The first
    /// failure aborts the walk; whatever was written before it stays on disk.
    pub fn walk(&self, src: &Path, dest: &Path) -> Result<BuildSummary> {
        let mut summary = BuildSummary::default();
        let mut pending: Vec<(PathBuf, PathBuf)> =
            vec![(src.to_path_buf(), dest.to_path_buf())];
        while let Some((src_dir, dest_dir)) = pending.pop() {
            ensure_path_exists(&dest_dir)?;
            summary.directories += 1;
            let entries = fs::read_dir(&src_dir)
                .wrap_err_with(|| Error::FailedToListDir(src_dir.clone()))?;
            for entry_result in entries {
                let entry =
                    entry_result.wrap_err_with(|| Error::FailedToListDir(src_dir.clone()))?;
                let src_path = entry.path();
                let dest_path = dest_dir.join(entry.file_name());
                // Follows symlinks.
                let metadata = fs::metadata(&src_path)
                    .wrap_err_with(|| Error::FailedToReadSource(src_path.clone()))?;
                if metadata.is_dir() {
                    trace!("Queueing directory {}", src_path.display());
                    pending.push((src_path, dest_path));
                } else if has_extension(&src_path, "html") {
                    self.render_page(&src_path, &dest_path)?;
                    summary.pages += 1;
                } else {
                    copy_asset(&src_path, &dest_path)?;
                    summary.assets += 1;
                }
            }
        }
        Ok(summary)
    }

    /// Renders the HTML file at `src` into the shared template and writes the
    /// result to `dest`.
    ///
    /// The file's text becomes `content` as-is; only the shared template is
    /// expanded. Bytes that aren't valid UTF-8 are replaced with U+FFFD.
    pub fn render_page(&self, src: &Path, dest: &Path) -> Result<()> {
        let bytes =
            fs::read(src).wrap_err_with(|| Error::FailedToReadSource(src.to_path_buf()))?;
        let content = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = content {
            warn!(
                "{} is not valid UTF-8, invalid bytes were replaced",
                src.display()
            );
        }
        let title = infer_title(src, &self.config.index_title, self.config.index_match);
        let view = PageView {
            title: &title,
            content: &content,
        };
        let rendered = self
            .templates
            .render(TEMPLATE_NAME, &view)
            .wrap_err_with(|| Error::FailedToRenderPage(src.to_path_buf()))?;
        fs::write(dest, rendered).wrap_err_with(|| Error::FailedToWrite(dest.to_path_buf()))?;
        info!("Built: {}", dest.display());
        Ok(())
    }
}

/// Copies the file at `src` to `dest` byte for byte, returning the number of
/// bytes copied.
pub fn copy_asset(src: &Path, dest: &Path) -> Result<u64> {
    let bytes = fs::copy(src, dest)
        .wrap_err_with(|| Error::FailedToCopy(src.to_path_buf(), dest.to_path_buf()))?;
    debug!("Copied: {} ({} bytes)", dest.display(), bytes);
    Ok(bytes)
}

/// Loads the template once and mirrors `config.src` into `config.dest`.
pub fn build_tree(config: &TreeConfig) -> Result<BuildSummary> {
    TreeBuilder::new(config)?.build()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::IndexMatch;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    const LAYOUT: &str = "<h1>{{title}}</h1>{{{content}}}";

    struct Fixture {
        tmp: TempDir,
        config: TreeConfig,
    }

    impl Fixture {
        fn new(template: &str) -> Self {
            let tmp = TempDir::new().unwrap();
            let config = TreeConfig {
                template: tmp.path().join("template.html"),
                src: tmp.path().join("pages"),
                dest: tmp.path().join("docs"),
                index_title: "elisapaci".to_string(),
                ..TreeConfig::default()
            };
            fs::write(&config.template, template).unwrap();
            fs::create_dir_all(&config.src).unwrap();
            Self { tmp, config }
        }

        fn write_src<C: AsRef<[u8]>>(&self, rel: &str, content: C) {
            let path = self.config.src.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }

        fn read_dest(&self, rel: &str) -> String {
            fs::read_to_string(self.config.dest.join(rel)).unwrap()
        }
    }

    fn relative_paths(root: &Path) -> BTreeSet<PathBuf> {
        let mut out = BTreeSet::new();
        let mut pending = vec![root.to_path_buf()];
        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir).unwrap() {
                let path = entry.unwrap().path();
                out.insert(path.strip_prefix(root).unwrap().to_path_buf());
                if path.is_dir() {
                    pending.push(path);
                }
            }
        }
        out
    }

    #[test]
    fn index_page_renders_with_site_name() {
        let fx = Fixture::new(LAYOUT);
        fx.write_src("index.html", "<p>Hi</p>");
        let summary = build_tree(&fx.config).unwrap();
        assert_eq!(fx.read_dest("index.html"), "<h1>elisapaci</h1><p>Hi</p>");
        assert_eq!(
            summary,
            BuildSummary {
                pages: 1,
                assets: 0,
                directories: 1
            }
        );
    }

    #[test]
    fn page_titles_are_inferred_from_file_names() {
        let fx = Fixture::new(LAYOUT);
        fx.write_src("about-me.html", "");
        fx.write_src("blog/my_first-post.HTML", "text");
        build_tree(&fx.config).unwrap();
        assert_eq!(fx.read_dest("about-me.html"), "<h1>About Me</h1>");
        assert_eq!(
            fx.read_dest("blog/my_first-post.HTML"),
            "<h1>My First Post</h1>text"
        );
    }

    #[test]
    fn substring_mode_is_honoured_by_the_renderer() {
        let mut fx = Fixture::new(LAYOUT);
        fx.config.index_match = IndexMatch::Substring;
        fx.write_src("index-page.html", "");
        build_tree(&fx.config).unwrap();
        assert_eq!(fx.read_dest("index-page.html"), "<h1>elisapaci Page</h1>");
    }

    #[test]
    fn page_content_is_not_expanded_as_a_template() {
        let fx = Fixture::new(LAYOUT);
        fx.write_src("raw.html", "<p>{{title}} {{{content}}}</p>");
        build_tree(&fx.config).unwrap();
        assert_eq!(
            fx.read_dest("raw.html"),
            "<h1>Raw</h1><p>{{title}} {{{content}}}</p>"
        );
    }

    #[test]
    fn assets_are_copied_byte_for_byte() {
        let fx = Fixture::new(LAYOUT);
        let logo: Vec<u8> = vec![0x89, b'P', b'N', b'G', 0x00, 0xff, 0xfe, b'\n'];
        fx.write_src("img/logo.png", &logo);
        fx.write_src("notes.htm", "{{title}}");
        let summary = build_tree(&fx.config).unwrap();
        assert_eq!(fs::read(fx.config.dest.join("img/logo.png")).unwrap(), logo);
        assert_eq!(fx.read_dest("notes.htm"), "{{title}}");
        assert_eq!(summary.assets, 2);
        assert_eq!(summary.pages, 0);
    }

    #[test]
    fn directory_structure_is_mirrored() {
        let fx = Fixture::new(LAYOUT);
        fx.write_src("index.html", "a");
        fx.write_src("css/site.css", "body {}");
        fx.write_src("blog/2021/post.html", "b");
        fx.write_src("blog/2021/photo.jpg", "c");
        fs::create_dir_all(fx.config.src.join("empty/nested")).unwrap();
        assert!(!fx.config.dest.exists());

        let summary = build_tree(&fx.config).unwrap();
        assert_eq!(
            relative_paths(&fx.config.dest),
            relative_paths(&fx.config.src)
        );
        assert!(fx.config.dest.join("empty/nested").is_dir());
        assert_eq!(summary.directories, 6);
    }

    #[test]
    fn rebuilding_overwrites_previous_output() {
        let fx = Fixture::new(LAYOUT);
        fx.write_src("about.html", "old");
        build_tree(&fx.config).unwrap();
        fx.write_src("about.html", "new");
        build_tree(&fx.config).unwrap();
        assert_eq!(fx.read_dest("about.html"), "<h1>About</h1>new");
    }

    #[test]
    fn missing_template_fails_before_writing_anything() {
        let fx = Fixture::new(LAYOUT);
        fx.write_src("index.html", "x");
        let config = TreeConfig {
            template: fx.tmp.path().join("missing.html"),
            ..fx.config.clone()
        };
        let err = build_tree(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::FailedToLoadTemplate(_))
        ));
        assert!(!config.dest.exists());
    }

    #[test]
    fn malformed_template_fails_to_load() {
        let fx = Fixture::new("{{#each pages}}{{/if}}");
        let err = build_tree(&fx.config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::FailedToLoadTemplate(_))
        ));
        assert!(err
            .chain()
            .any(|e| matches!(e.downcast_ref::<Error>(), Some(Error::TemplateParse(_, _)))));
    }

    #[test]
    fn invalid_utf8_is_replaced_rather_than_fatal() {
        let fx = Fixture::new("{{{content}}}");
        // "café" in Latin-1.
        fx.write_src("latin1.html", [b'c', b'a', b'f', 0xe9]);
        let summary = build_tree(&fx.config).unwrap();
        assert_eq!(summary.pages, 1);
        assert_eq!(fx.read_dest("latin1.html"), "caf\u{fffd}");
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_source_aborts_the_build() {
        let fx = Fixture::new(LAYOUT);
        // A dangling symlink cannot be read.
        std::os::unix::fs::symlink(
            fx.tmp.path().join("missing.html"),
            fx.config.src.join("broken.html"),
        )
        .unwrap();
        let err = build_tree(&fx.config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::FailedToReadSource(_))
        ));
        assert!(!fx.config.dest.join("broken.html").exists());
    }

    #[test]
    fn strict_mode_turns_unknown_variables_into_errors() {
        let mut fx = Fixture::new("{{title}}{{author}}");
        fx.write_src("about.html", "");
        build_tree(&fx.config).unwrap();
        assert_eq!(fx.read_dest("about.html"), "About");

        fx.config.strict = true;
        let err = build_tree(&fx.config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::FailedToRenderPage(_))
        ));
    }

    #[test]
    fn source_must_be_a_directory() {
        let fx = Fixture::new(LAYOUT);
        let config = TreeConfig {
            src: fx.tmp.path().join("nope"),
            ..fx.config.clone()
        };
        let err = build_tree(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::SourceNotADirectory(_))
        ));
    }

    #[test]
    fn destination_inside_source_is_rejected() {
        let fx = Fixture::new(LAYOUT);
        fx.write_src("index.html", "x");
        let config = TreeConfig {
            dest: fx.config.src.join("out"),
            ..fx.config.clone()
        };
        let err = build_tree(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::DestinationInsideSource(_, _))
        ));
        assert!(!config.dest.exists());
    }

    #[test]
    fn destination_reaching_into_source_through_parent_dirs_is_rejected() {
        let fx = Fixture::new(LAYOUT);
        fx.write_src("site.css", "body {}");
        let config = TreeConfig {
            dest: fx.tmp.path().join("nope").join("..").join("pages").join("out"),
            ..fx.config.clone()
        };
        let err = build_tree(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::DestinationInsideSource(_, _))
        ));
        assert!(!fx.config.src.join("out").exists());
    }

    #[test]
    fn copy_asset_reports_missing_sources() {
        let tmp = TempDir::new().unwrap();
        let err = copy_asset(&tmp.path().join("a.png"), &tmp.path().join("b.png")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::FailedToCopy(_, _))
        ));
    }
}
