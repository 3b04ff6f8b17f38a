//! Front matter records and the page-level rules built on them.
//!
//! The parser fills a [`FrontMatter`] while it is inside the `---` block and
//! hands it to sinks as the payload of the Header event. Everything else in
//! this module only reads that mapping.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};

/// Field mapping collected from a document's front matter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    fields: FxHashMap<String, String>,
}

impl FrontMatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any earlier value for the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Like [`get`](Self::get), but a missing field is an error.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| Error::missing_field(key))
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    pub fn date(&self) -> Option<&str> {
        self.get("date")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FrontMatter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fm = FrontMatter::new();
        for (k, v) in iter {
            fm.insert(k, v);
        }
        fm
    }
}

/// The handful of front matter fields page listings care about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMeta {
    pub title: Option<String>,
    pub date: Option<String>,
    /// Drafts are skipped by listings and feeds.
    pub draft: bool,
}

impl PageMeta {
    pub fn from_front_matter(fm: &FrontMatter) -> Self {
        Self {
            title: fm.title().map(str::to_string),
            date: fm.date().map(str::to_string),
            draft: fm.get("draft").is_some_and(is_truthy),
        }
    }

    /// Ordering for listings: newest date first, undated pages last.
    ///
    /// Dates compare as raw strings, which is chronological for ISO 8601.
    pub fn newest_first(a: &PageMeta, b: &PageMeta) -> Ordering {
        match (&a.date, &b.date) {
            (Some(x), Some(y)) => y.cmp(x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    /// Sort pages newest first. The sort is stable.
    pub fn sort_newest_first(pages: &mut [PageMeta]) {
        pages.sort_by(Self::newest_first);
    }
}

impl From<&FrontMatter> for PageMeta {
    fn from(fm: &FrontMatter) -> Self {
        Self::from_front_matter(fm)
    }
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    ["true", "yes", "1"]
        .iter()
        .any(|t| value.eq_ignore_ascii_case(t))
}

/// Section index pages are listed separately from ordinary pages.
pub fn is_index_page(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s.contains("index"))
}

/// Output file name for a source page: `.md` becomes `.html`.
pub fn html_file_name(path: &Path) -> PathBuf {
    match path.extension().and_then(|e| e.to_str()) {
        Some("md") => path.with_extension("html"),
        _ => {
            let mut name = path.as_os_str().to_owned();
            name.push(".html");
            PathBuf::from(name)
        }
    }
}
