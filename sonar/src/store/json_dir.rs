use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sonar_types::{DocumentStore, StoreError, StoredSurvey, SurveyFields, SurveyId};
use tracing::{debug, warn};

const EXTENSION: &str = "json";

/// Document store keeping one JSON file per survey in a directory.
///
/// Files are named `{id}.json` and hold the flat field map. Writes go
/// through a temporary file and a rename, so readers never see a partial
/// document.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    /// Open a store, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "opened survey directory");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a document. Ids that could leave the directory have none.
    fn path(&self, id: &str) -> Option<PathBuf> {
        is_valid_id(id).then(|| self.dir.join(format!("{id}.{EXTENSION}")))
    }

    fn read(&self, path: &Path) -> Result<Option<SurveyFields>, StoreError> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, path: &Path, fields: &SurveyFields) -> Result<(), StoreError> {
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(fields)?)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl DocumentStore for JsonDirStore {
    fn list(&self) -> Result<Vec<StoredSurvey>, StoreError> {
        let mut surveys = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(id) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .filter(|id| is_valid_id(id))
            else {
                continue;
            };

            match self.read(&path) {
                Ok(Some(fields)) => surveys.push(StoredSurvey {
                    id: id.to_string(),
                    fields,
                }),
                Ok(None) => {}
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unreadable survey")
                }
            }
        }

        surveys.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(surveys)
    }

    fn get(&self, id: &str) -> Result<Option<SurveyFields>, StoreError> {
        match self.path(id) {
            Some(path) => self.read(&path),
            None => Ok(None),
        }
    }

    fn create(&self, fields: &SurveyFields) -> Result<SurveyId, StoreError> {
        let id = super::generate_id();
        let path = self.dir.join(format!("{id}.{EXTENSION}"));
        self.write(&path, fields)?;
        debug!(survey_id = %id, fields = fields.len(), "survey document created");
        Ok(id)
    }

    fn update(&self, id: &str, fields: &SurveyFields) -> Result<(), StoreError> {
        let not_found = || StoreError::NotFound(id.to_string());
        let path = self.path(id).ok_or_else(not_found)?;
        let mut document = self.read(&path)?.ok_or_else(not_found)?;

        document.extend(fields.clone());
        self.write(&path, &document)?;
        debug!(survey_id = %id, "survey document updated");
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let Some(path) = self.path(id) else {
            return Ok(());
        };
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(survey_id = %id, "survey document deleted");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn documents_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let id = {
            let store = JsonDirStore::open(dir.path()).unwrap();
            store
                .create(&SurveyFields::new().with("surveyname", "Persisted"))
                .unwrap()
        };

        let store = JsonDirStore::open(dir.path()).unwrap();
        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, id);
        assert_eq!(listed[0].fields.get("surveyname"), Some("Persisted"));
    }

    #[test]
    fn update_merges_and_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDirStore::open(dir.path()).unwrap();
        let id = store
            .create(&SurveyFields::new().with("surveyname", "A").with("question1", "Q"))
            .unwrap();

        store
            .update(&id, &SurveyFields::new().with("surveyname", "B"))
            .unwrap();
        let fields = store.get(&id).unwrap().unwrap();
        assert_eq!(fields.get("surveyname"), Some("B"));
        assert_eq!(fields.get("question1"), Some("Q"));

        store.delete(&id).unwrap();
        store.delete(&id).unwrap();
        assert_eq!(store.get(&id).unwrap(), None);
        assert!(matches!(
            store.update(&id, &SurveyFields::new()),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn ids_cannot_escape_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDirStore::open(dir.path().join("surveys")).unwrap();
        fs::write(dir.path().join("secret.json"), "{}").unwrap();

        assert_eq!(store.get("../secret").unwrap(), None);
        store.delete("../secret").unwrap();
        assert!(dir.path().join("secret.json").exists());
    }

    #[test]
    fn unreadable_files_are_skipped_in_listings() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDirStore::open(dir.path()).unwrap();
        store.create(&SurveyFields::new()).unwrap();
        fs::write(dir.path().join("broken.json"), "not json").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        assert_eq!(store.list().unwrap().len(), 1);
        assert!(matches!(store.get("broken"), Err(StoreError::Json(_))));
    }

    #[test]
    fn listings_only_hold_ids_that_can_be_fetched() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDirStore::open(dir.path()).unwrap();
        let id = store.create(&SurveyFields::new()).unwrap();
        fs::write(dir.path().join("my survey.json"), "{}").unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, id);
        assert_eq!(store.get("my survey").unwrap(), None);
    }
}
