//! JSONL (JSON Lines) storage.
//!
//! Schedules are read as one record per line, in chronological order.
//! Blank lines are skipped; a malformed line is an error because dropping a
//! record would shift every later round.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use super::StorageError;

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Write entities, replacing the entire file.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        let mut count = 0;

        for entity in entities {
            let json = serde_json::to_string(entity)?;
            writeln!(writer, "{}", json)?;
            count += 1;
        }

        writer.flush()?;
        info!("Wrote {} entries to {:?}", count, self.path);

        Ok(count)
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    /// Read all entries in file order.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        let entries = self.iter()?.collect::<Result<Vec<_>, _>>()?;
        debug!("Read {} entries from {:?}", entries.len(), self.path);
        Ok(entries)
    }

    /// Create an iterator over the file.
    pub fn iter(&self) -> Result<JsonlIterator<T>, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::PathNotFound(self.path.clone()));
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);

        Ok(JsonlIterator {
            reader,
            line_num: 0,
            _marker: PhantomData,
        })
    }
}

/// Iterator over JSONL file entries.
pub struct JsonlIterator<T> {
    reader: BufReader<File>,
    line_num: usize,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> Iterator for JsonlIterator<T> {
    type Item = Result<T, StorageError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();

        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None, // EOF
                Ok(_) => {
                    self.line_num += 1;
                    if line.trim().is_empty() {
                        continue;
                    }
                    let line_num = self.line_num;
                    return Some(serde_json::from_str(&line).map_err(|source| {
                        StorageError::InvalidLine { line: line_num, source }
                    }));
                }
                Err(e) => return Some(Err(StorageError::Io(e))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestEntity {
        id: String,
        value: u32,
    }

    fn entity(id: &str, value: u32) -> TestEntity {
        TestEntity {
            id: id.to_string(),
            value,
        }
    }

    #[test]
    fn test_write_and_read_preserves_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("entities.jsonl");

        let entities = vec![entity("b", 2), entity("a", 1), entity("c", 3)];
        let written = JsonlWriter::new(&path).write_all(&entities).unwrap();
        assert_eq!(written, 3);

        let read: Vec<TestEntity> = JsonlReader::new(&path).read_all().unwrap();
        assert_eq!(read, entities);
    }

    #[test]
    fn test_write_all_replaces_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("entities.jsonl");
        let writer = JsonlWriter::new(&path);

        writer.write_all(&[entity("a", 1), entity("b", 2)]).unwrap();
        writer.write_all(&[entity("c", 3)]).unwrap();

        let read: Vec<TestEntity> = JsonlReader::new(&path).read_all().unwrap();
        assert_eq!(read, vec![entity("c", 3)]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("entities.jsonl");
        fs::write(
            &path,
            "{\"id\":\"a\",\"value\":1}\n\n   \n{\"id\":\"b\",\"value\":2}\n",
        )
        .unwrap();

        let read: Vec<TestEntity> = JsonlReader::new(&path).read_all().unwrap();
        assert_eq!(read.len(), 2);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("entities.jsonl");
        fs::write(&path, "{\"id\":\"a\",\"value\":1}\n\nnot json\n").unwrap();

        let result: Result<Vec<TestEntity>, _> = JsonlReader::new(&path).read_all();
        match result {
            Err(StorageError::InvalidLine { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected InvalidLine, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let reader: JsonlReader<TestEntity> = JsonlReader::new(temp_dir.path().join("nope.jsonl"));

        assert!(matches!(
            reader.read_all(),
            Err(StorageError::PathNotFound(_))
        ));
    }

    #[test]
    fn test_iter_yields_entries_lazily() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("entities.jsonl");
        JsonlWriter::new(&path)
            .write_all(&[entity("a", 1), entity("b", 2)])
            .unwrap();

        let mut iter = JsonlReader::<TestEntity>::new(&path).iter().unwrap();
        assert_eq!(iter.next().unwrap().unwrap(), entity("a", 1));
        assert_eq!(iter.next().unwrap().unwrap(), entity("b", 2));
        assert!(iter.next().is_none());
    }
}
