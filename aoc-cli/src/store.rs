//! On-disk datasets: puzzle inputs and their expected answers
//!
//! Layout: `{root}/{year}/day{day:02}/input.{label}.txt` with the recorded
//! answers beside it as `input.{label}.expected`. A day usually carries an
//! `example` dataset and an `actual` one.

use crate::error::StoreError;
use aoc_runner::ExpectedAnswers;
use std::fs;
use std::path::PathBuf;

/// File-based store of puzzle inputs and expected answers
pub struct DatasetStore {
    root: PathBuf,
}

impl DatasetStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Directory holding a day's datasets
    pub fn day_dir(&self, year: u16, day: u8) -> PathBuf {
        self.root.join(year.to_string()).join(format!("day{day:02}"))
    }

    /// Path of a dataset's input file
    pub fn input_path(&self, year: u16, day: u8, label: &str) -> PathBuf {
        self.day_dir(year, day).join(format!("input.{label}.txt"))
    }

    /// Path of a dataset's expected-answer file
    pub fn expected_path(&self, year: u16, day: u8, label: &str) -> PathBuf {
        self.day_dir(year, day).join(format!("input.{label}.expected"))
    }

    /// Labels of the datasets present on disk for a year/day, sorted.
    /// A missing day directory is just an empty list.
    pub fn labels(&self, year: u16, day: u8) -> Result<Vec<String>, StoreError> {
        let dir = self.day_dir(year, day);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut labels = Vec::new();
        for entry in entries {
            let name = entry?.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some(label) = name
                .strip_prefix("input.")
                .and_then(|n| n.strip_suffix(".txt"))
                && !label.is_empty()
            {
                labels.push(label.to_string());
            }
        }
        labels.sort_unstable();
        Ok(labels)
    }

    /// Read a dataset's input
    pub fn read_input(&self, year: u16, day: u8, label: &str) -> Result<String, StoreError> {
        let path = self.input_path(year, day, label);
        if !path.exists() {
            return Err(StoreError::MissingInput(path));
        }
        Ok(fs::read_to_string(&path)?)
    }

    /// Read a dataset's expected answers; a missing file means every
    /// answer is unknown
    pub fn read_expected(
        &self,
        year: u16,
        day: u8,
        label: &str,
    ) -> Result<ExpectedAnswers, StoreError> {
        let path = self.expected_path(year, day, label);
        if !path.exists() {
            return Ok(ExpectedAnswers::empty());
        }
        Ok(ExpectedAnswers::parse(&fs::read_to_string(&path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn put_input(store: &DatasetStore, year: u16, day: u8, label: &str, input: &str) {
        fs::create_dir_all(store.day_dir(year, day)).unwrap();
        fs::write(store.input_path(year, day, label), input).unwrap();
    }

    #[test]
    fn test_path_layout() {
        let temp = TempDir::new().unwrap();
        let store = DatasetStore::new(temp.path().to_path_buf());

        let path = store.input_path(2024, 1, "example");
        assert!(path.to_string_lossy().ends_with("2024/day01/input.example.txt"));
        let path = store.expected_path(2021, 19, "actual");
        assert!(path.to_string_lossy().ends_with("2021/day19/input.actual.expected"));
    }

    #[test]
    fn test_dataset_roundtrip() {
        let temp = TempDir::new().unwrap();
        let store = DatasetStore::new(temp.path().to_path_buf());

        // initially nothing on disk
        assert!(store.labels(2024, 1).unwrap().is_empty());
        assert!(store.read_input(2024, 1, "example").is_err());

        put_input(&store, 2024, 1, "example", "1\n2\n3\n");
        put_input(&store, 2024, 1, "actual", "4\n5\n6\n");

        assert_eq!(store.labels(2024, 1).unwrap(), ["actual", "example"]);
        assert_eq!(store.read_input(2024, 1, "example").unwrap(), "1\n2\n3\n");
    }

    #[test]
    fn test_expected_answers() {
        let temp = TempDir::new().unwrap();
        let store = DatasetStore::new(temp.path().to_path_buf());
        put_input(&store, 2024, 1, "example", "input");

        // no expected file: everything unknown
        let expected = store.read_expected(2024, 1, "example").unwrap();
        assert!(expected.is_empty());

        fs::write(
            store.expected_path(2024, 1, "example"),
            "part1: 11\npart2: 31\n",
        )
        .unwrap();
        let expected = store.read_expected(2024, 1, "example").unwrap();
        assert_eq!(expected.get(1), Some("11"));
        assert_eq!(expected.get(2), Some("31"));
    }

    #[test]
    fn test_stray_files_are_not_datasets() {
        let temp = TempDir::new().unwrap();
        let store = DatasetStore::new(temp.path().to_path_buf());
        put_input(&store, 2024, 1, "example", "input");
        fs::write(store.day_dir(2024, 1).join("notes.txt"), "scratch").unwrap();
        fs::write(store.day_dir(2024, 1).join("input.example.expected"), "part1: 1").unwrap();

        assert_eq!(store.labels(2024, 1).unwrap(), ["example"]);
    }
}
