//! File-backed category store for the word game
//!
//! Every category is a single delimited-text file named `<category>.csv`
//! inside one store directory. This module handles:
//! - Discovering the categories currently present in the store directory
//! - Resolving a category name to its backing file without leaving the store
//! - Parsing a category file into a clean, deduplicated word list
//!
//! Nothing is cached: each listing and each lookup re-reads the filesystem,
//! so categories can be added or removed while the server is running.
//! Failures never reach callers of [`CategoryStore::list_categories`] or
//! [`CategoryStore::words`]; they are logged and degrade to empty results.

use crate::error::StoreError;
use crate::game::WordSource;
use log::{debug, warn};
use shared::{CATEGORY_EXTENSION, HEADER_MARKER};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Read-only view over a directory of category files
#[derive(Debug, Clone)]
pub struct CategoryStore {
    dir: PathBuf,
}

impl CategoryStore {
    /// Creates a store rooted at `dir`
    ///
    /// The directory does not have to exist yet; a missing directory simply
    /// lists no categories until it is created.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Lists the categories currently available, sorted by name
    ///
    /// Returns an empty list when the store location is missing or is not a
    /// readable directory.
    pub fn list_categories(&self) -> Vec<String> {
        match self.scan() {
            Ok(mut names) => {
                names.sort();
                names.dedup();
                names
            }
            Err(e) => {
                warn!("Cannot list categories in {}: {}", self.dir.display(), e);
                Vec::new()
            }
        }
    }

    /// Returns the word list for `name`, or an empty list on any failure
    pub fn words(&self, name: &str) -> Vec<String> {
        match self.try_words(name) {
            Ok(words) => words,
            Err(e @ (StoreError::UnknownCategory { .. } | StoreError::InvalidName { .. })) => {
                debug!("Rejected category lookup: {}", e);
                Vec::new()
            }
            Err(e) => {
                warn!("Error reading category '{}' from {}: {}", name, self.dir.display(), e);
                Vec::new()
            }
        }
    }

    /// Resolves and parses the word list for `name`, reporting why it failed
    pub fn try_words(&self, name: &str) -> Result<Vec<String>, StoreError> {
        let path = self.resolve(name)?;
        read_words(&path)
    }

    /// Resolves a category name to its backing file inside the store
    ///
    /// The name must be a plain file stem and must match a category file
    /// present in the store right now. The resolved file must live directly
    /// inside the store directory once symlinks are followed.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, StoreError> {
        validate_name(name)?;

        if !self.dir.is_dir() {
            return Err(StoreError::NotADirectory {
                path: self.dir.clone(),
            });
        }
        let dir = fs::canonicalize(&self.dir)?;

        // Prefer the lowercase extension when several spellings coexist.
        let entry = fs::read_dir(&dir)?
            .filter_map(Result::ok)
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .and_then(category_name)
                    .is_some_and(|stem| stem == name)
            })
            .min_by_key(|entry| {
                let file_name = entry.file_name();
                let exact = file_name
                    .to_str()
                    .is_some_and(|f| f.ends_with(&format!(".{}", CATEGORY_EXTENSION)));
                (!exact, file_name)
            })
            .ok_or_else(|| StoreError::UnknownCategory {
                name: name.to_string(),
            })?;

        let path = fs::canonicalize(entry.path())?;
        if path.parent() != Some(dir.as_path()) || !path.is_file() {
            return Err(StoreError::OutsideStore { path });
        }

        Ok(path)
    }

    fn scan(&self) -> Result<Vec<String>, StoreError> {
        if !self.dir.is_dir() {
            return Err(StoreError::NotADirectory {
                path: self.dir.clone(),
            });
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.path().is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str().and_then(category_name) {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }
}

impl WordSource for CategoryStore {
    fn words(&self, category: &str) -> Vec<String> {
        CategoryStore::words(self, category)
    }
}

/// Strips a case-insensitive `.csv` extension, returning the category name
fn category_name(file_name: &str) -> Option<&str> {
    let split = file_name.len().checked_sub(CATEGORY_EXTENSION.len() + 1)?;
    let (stem, ext) = (file_name.get(..split)?, file_name.get(split..)?);

    let is_category = ext.starts_with('.') && ext[1..].eq_ignore_ascii_case(CATEGORY_EXTENSION);
    if is_category && !stem.is_empty() {
        Some(stem)
    } else {
        None
    }
}

fn validate_name(name: &str) -> Result<(), StoreError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);

    if invalid {
        Err(StoreError::InvalidName {
            name: name.to_string(),
        })
    } else {
        Ok(())
    }
}

/// Reads and parses a category file from disk
pub fn read_words(path: &Path) -> Result<Vec<String>, StoreError> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8(bytes)?;
    Ok(parse_words(&text)?)
}

/// Parses category file contents into a deduplicated word list
///
/// A first line mentioning `answer` (any case) switches to header mode, where
/// words come from the `answer` column. Otherwise the first field of every
/// row is a word. Any CSV error discards the whole result.
pub fn parse_words(content: &str) -> Result<Vec<String>, csv::Error> {
    let content = content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(content);

    // A lone `\r` ends a line too, as in classic Mac exports.
    let first_line = content.split(['\r', '\n']).next().unwrap_or("");
    let has_header = first_line.to_lowercase().contains(HEADER_MARKER);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut words = Vec::new();

    if has_header {
        // Later duplicate columns shadow earlier ones.
        let column = reader
            .headers()?
            .iter()
            .enumerate()
            .filter(|(_, header)| *header == HEADER_MARKER)
            .map(|(i, _)| i)
            .last();

        for result in reader.records() {
            let record = result?;
            let value = column.and_then(|i| record.get(i)).unwrap_or("").trim();
            if !value.is_empty() {
                words.push(value.to_string());
            }
        }
    } else {
        for result in reader.records() {
            let record = result?;
            if let Some(first) = record.get(0) {
                let value = first.trim();
                if !value.is_empty() {
                    words.push(value.to_string());
                }
            }
        }
    }

    Ok(dedup_case_insensitive(words))
}

/// Removes case-insensitive duplicates, keeping the first spelling seen
pub fn dedup_case_insensitive(words: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    words
        .into_iter()
        .filter(|word| seen.insert(word.to_lowercase()))
        .collect()
}
