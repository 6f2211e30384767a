//! Page title inference from file names.

use std::path::Path;

use crate::IndexMatch;

/// The file stem reserved for a directory's index page.
pub const INDEX_STEM: &str = "index";

enum Segment<'a> {
    // Hyphens/underscores become spaces and words get capitalized.
    Name(&'a str),
    // Inserted as-is.
    Verbatim(&'a str),
}

/// Derives a human-readable title from the file name of `path`.
///
/// The stem `index` is replaced by `index_title`, which is inserted exactly
/// as given. In the rest of the stem, `-` and `_` become spaces and the first
/// character of every word is upper-cased:
///
/// ```
/// use std::path::Path;
/// use quire::{infer_title, IndexMatch};
///
/// assert_eq!(infer_title(Path::new("pages/about-me.html"), "Home", IndexMatch::Exact), "About Me");
/// assert_eq!(infer_title(Path::new("pages/index.html"), "elisapaci", IndexMatch::Exact), "elisapaci");
/// ```
pub fn infer_title(path: &Path, index_title: &str, index_match: IndexMatch) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let segments = match index_match {
        IndexMatch::Exact if stem == INDEX_STEM => vec![Segment::Verbatim(index_title)],
        IndexMatch::Exact => vec![Segment::Name(&stem)],
        IndexMatch::Substring => split_on_index(&stem, index_title),
    };
    capitalize(&segments)
}

fn split_on_index<'a>(stem: &'a str, index_title: &'a str) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    let mut rest = stem;
    while let Some(pos) = rest.find(INDEX_STEM) {
        segments.push(Segment::Name(&rest[..pos]));
        segments.push(Segment::Verbatim(index_title));
        rest = &rest[pos + INDEX_STEM.len()..];
    }
    segments.push(Segment::Name(rest));
    segments
}

fn capitalize(segments: &[Segment]) -> String {
    let mut title = String::new();
    let mut word_start = true;
    for segment in segments {
        match segment {
            Segment::Verbatim(s) => {
                title.push_str(s);
                if let Some(c) = s.chars().last() {
                    word_start = c == ' ';
                }
            }
            Segment::Name(s) => {
                for c in s.chars() {
                    let c = if c == '-' || c == '_' { ' ' } else { c };
                    if c == ' ' {
                        title.push(c);
                        word_start = true;
                    } else if word_start {
                        title.extend(c.to_uppercase());
                        word_start = false;
                    } else {
                        title.push(c);
                    }
                }
            }
        }
    }
    title
}
