// File: src/persistence.rs
use crate::core::dictionary::DictionarySource;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Corrections and frequencies, saved and restored as one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningData {
    pub user_corrections: BTreeMap<String, Vec<String>>,
    pub word_frequencies: BTreeMap<String, u64>,
}

pub fn load_dictionary_source(path: &Path) -> Result<DictionarySource> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Writes the frequency table as pretty-printed JSON.
pub fn save_dictionary(frequencies: &BTreeMap<String, u64>, path: &Path) -> Result<()> {
    write_atomically(path, |writer| {
        serde_json::to_writer_pretty(&mut *writer, frequencies)?;
        writer.write_all(b"\n")?;
        Ok(())
    })
}

pub fn save_learning_data(data: &LearningData, path: &Path) -> Result<()> {
    write_atomically(path, |writer| {
        bincode::serialize_into(writer, data)?;
        Ok(())
    })
}

pub fn load_learning_data(path: &Path) -> Result<LearningData> {
    let reader = BufReader::new(File::open(path)?);
    Ok(bincode::deserialize_from(reader)?)
}

/// Writes to a temp file beside `path`, then renames it into place, so a
/// failed write leaves any existing file intact.
fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&mut NamedTempFile>) -> Result<()>,
{
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let mut temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&mut temp_file);
        write(&mut writer)?;
        writer.flush()?;
    }
    temp_file.persist(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AutocorrectError;

    #[test]
    fn dictionary_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dict.json");
        let mut table = BTreeMap::new();
        table.insert("THE".to_string(), 4);
        table.insert("AND".to_string(), 1);
        save_dictionary(&table, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"AND\": 1"));
        assert_eq!(load_dictionary_source(&path).unwrap(), DictionarySource::SeedFrequencies(table));
    }

    #[test]
    fn malformed_dictionary_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dict.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_dictionary_source(&path), Err(AutocorrectError::Json(_))));
        assert!(matches!(
            load_dictionary_source(&dir.path().join("missing.json")),
            Err(AutocorrectError::Io(_))
        ));
    }

    #[test]
    fn learning_data_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("learning.bin");
        let mut data = LearningData::default();
        data.user_corrections.insert("XYZ".into(), vec!["HELLO".into(), "HELP".into()]);
        data.word_frequencies.insert("HELLO".into(), 6);

        save_learning_data(&data, &path).unwrap();
        assert_eq!(load_learning_data(&path).unwrap(), data);
    }

    #[test]
    fn truncated_learning_data_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("learning.bin");
        fs::write(&path, [0xff, 0x01]).unwrap();
        assert!(matches!(load_learning_data(&path), Err(AutocorrectError::Bincode(_))));
    }
}
