//! # NutriBot Lexical Store
//!
//! File: cli/src/assistant/store.rs
//!
//! ## Overview
//!
//! Reads the foods, myths and swaps collections from their JSON-lines files.
//! Every call goes back to disk, so edits to the data files are picked up on
//! the next turn without restarting the service.
//!
//! File format rules:
//! - one JSON object per line
//! - blank lines and lines starting with `#` are ignored
//! - a line that does not parse into the expected record is logged and skipped
//! - a missing file is an empty collection
//!
use super::records::{FoodRecord, MythRecord, SwapCategory, SwapRecord};
use crate::core::config::FilesConfig;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Foods keyed by lowercase name, in file order.
///
/// A later line with the same name replaces the earlier record but keeps its
/// position, so substring scans stay in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct FoodTable {
    entries: Vec<(String, FoodRecord)>,
}

impl FoodTable {
    pub fn insert(&mut self, food: FoodRecord) {
        let key = food.name.to_lowercase();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = food,
            None => self.entries.push((key, food)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FoodRecord> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, f)| f)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FoodRecord)> {
        self.entries.iter().map(|(k, f)| (k.as_str(), f))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<FoodRecord> for FoodTable {
    fn from_iter<I: IntoIterator<Item = FoodRecord>>(iter: I) -> Self {
        let mut table = FoodTable::default();
        for food in iter {
            table.insert(food);
        }
        table
    }
}

/// File-backed source of foods, myths and swaps.
#[derive(Debug, Clone)]
pub struct LexicalStore {
    foods_path: PathBuf,
    myths_path: PathBuf,
    swaps_path: PathBuf,
}

impl LexicalStore {
    pub fn new(
        foods_path: impl Into<PathBuf>,
        myths_path: impl Into<PathBuf>,
        swaps_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            foods_path: foods_path.into(),
            myths_path: myths_path.into(),
            swaps_path: swaps_path.into(),
        }
    }

    pub fn from_config(files: &FilesConfig) -> Self {
        Self::new(&files.sg_foods, &files.myths, &files.swaps)
    }

    pub fn load_foods(&self) -> FoodTable {
        read_records::<FoodRecord>(&self.foods_path)
            .into_iter()
            .filter(|food| {
                let named = !food.name.trim().is_empty();
                if !named {
                    warn!(
                        "Skipping food without a name in {}",
                        self.foods_path.display()
                    );
                }
                named
            })
            .collect()
    }

    pub fn load_myths(&self) -> Vec<MythRecord> {
        read_records(&self.myths_path)
    }

    pub fn load_swaps(&self) -> Vec<SwapRecord> {
        read_records(&self.swaps_path)
    }

    /// Swaps of one category (all swaps when `category` is `None`), in file
    /// order, truncated to `limit`.
    pub fn get_swaps(&self, category: Option<SwapCategory>, limit: Option<usize>) -> Vec<SwapRecord> {
        let filtered = self
            .load_swaps()
            .into_iter()
            .filter(|swap| category.map_or(true, |c| swap.category == c));
        match limit {
            Some(n) => filtered.take(n).collect(),
            None => filtered.collect(),
        }
    }
}

/// Parses a JSON-lines file into records, skipping anything unreadable.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Data file {} not found, treating as empty", path.display());
            return Vec::new();
        }
        Err(e) => {
            warn!("Error reading data file {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match serde_json::from_str::<T>(line) {
            Ok(record) => records.push(record),
            Err(e) => warn!(
                "Line {} in {} is not a valid record, skipping: {}",
                index + 1,
                path.display(),
                e
            ),
        }
    }
    debug!("Loaded {} records from {}", records.len(), path.display());
    records
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Writes the given lines into foods/myths/swaps files inside a temp dir.
    pub(crate) fn store_with(foods: &[&str], myths: &[&str], swaps: &[&str]) -> (TempDir, LexicalStore) {
        let dir = TempDir::new().unwrap();
        let store = LexicalStore::new(
            dir.path().join("foods.txt"),
            dir.path().join("myths.txt"),
            dir.path().join("swaps.txt"),
        );
        fs::write(&store.foods_path, foods.join("\n")).unwrap();
        fs::write(&store.myths_path, myths.join("\n")).unwrap();
        fs::write(&store.swaps_path, swaps.join("\n")).unwrap();
        (dir, store)
    }

    fn swap_line(category: &str, n: usize) -> String {
        format!(
            r#"{{"category": "{}", "unhealthy": "{}-bad-{}", "healthy": "{}-good-{}", "benefit": "b"}}"#,
            category, category, n, category, n
        )
    }

    #[test]
    fn test_missing_files_are_empty() {
        let dir = TempDir::new().unwrap();
        let store = LexicalStore::new(
            dir.path().join("nope1.txt"),
            dir.path().join("nope2.txt"),
            dir.path().join("nope3.txt"),
        );
        assert!(store.load_foods().is_empty());
        assert!(store.load_myths().is_empty());
        assert!(store.load_swaps().is_empty());
    }

    #[test]
    fn test_comments_blank_and_malformed_lines_skipped() {
        let (_dir, store) = store_with(
            &[
                "# local hawker dishes",
                "",
                r#"{"name": "Chicken Rice", "calories": 607}"#,
                "{not json",
                r#"{"calories": 100}"#,
                r#"{"name": "Laksa", "calories": 569}"#,
            ],
            &[],
            &[],
        );
        let foods = store.load_foods();
        assert_eq!(foods.len(), 2);
        assert_eq!(foods.get("chicken rice").unwrap().calories, Some(607.0));
        let keys: Vec<&str> = foods.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["chicken rice", "laksa"]);
    }

    #[test]
    fn test_duplicate_food_keeps_first_position() {
        let (_dir, store) = store_with(
            &[
                r#"{"name": "laksa", "calories": 1}"#,
                r#"{"name": "mee rebus"}"#,
                r#"{"name": "LAKSA", "calories": 2}"#,
            ],
            &[],
            &[],
        );
        let foods = store.load_foods();
        let keys: Vec<&str> = foods.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["laksa", "mee rebus"]);
        assert_eq!(foods.get("laksa").unwrap().calories, Some(2.0));
    }

    #[test]
    fn test_get_swaps_filters_and_truncates_in_order() {
        let mut lines: Vec<String> = (1..=5).map(|n| swap_line("diabetes", n)).collect();
        lines.insert(2, swap_line("cholesterol", 1));
        lines.push(swap_line("blood_pressure", 1));
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let (_dir, store) = store_with(&[], &[], &refs);

        let swaps = store.get_swaps(Some(SwapCategory::Diabetes), Some(3));
        assert_eq!(swaps.len(), 3);
        assert!(swaps.iter().all(|s| s.category == SwapCategory::Diabetes));
        let names: Vec<&str> = swaps.iter().map(|s| s.unhealthy.as_str()).collect();
        assert_eq!(names, vec!["diabetes-bad-1", "diabetes-bad-2", "diabetes-bad-3"]);

        assert_eq!(store.get_swaps(None, None).len(), 7);
        assert_eq!(store.get_swaps(Some(SwapCategory::Cholesterol), Some(3)).len(), 1);
    }

    #[test]
    fn test_reload_picks_up_edits() {
        let (_dir, store) = store_with(&[r#"{"name": "laksa"}"#], &[], &[]);
        assert_eq!(store.load_foods().len(), 1);
        fs::write(&store.foods_path, "{\"name\": \"laksa\"}\n{\"name\": \"rojak\"}\n").unwrap();
        assert_eq!(store.load_foods().len(), 2);
    }
}
