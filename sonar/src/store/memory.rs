use std::collections::BTreeMap;

use parking_lot::RwLock;
use sonar_types::{DocumentStore, StoreError, StoredSurvey, SurveyFields, SurveyId};

/// Document store kept in memory, ordered by id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<BTreeMap<SurveyId, SurveyFields>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document under a known id.
    pub fn with_document(self, id: impl Into<SurveyId>, fields: SurveyFields) -> Self {
        self.documents.write().insert(id.into(), fields);
        self
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }
}

impl DocumentStore for MemoryStore {
    fn list(&self) -> Result<Vec<StoredSurvey>, StoreError> {
        Ok(self
            .documents
            .read()
            .iter()
            .map(|(id, fields)| StoredSurvey {
                id: id.clone(),
                fields: fields.clone(),
            })
            .collect())
    }

    fn get(&self, id: &str) -> Result<Option<SurveyFields>, StoreError> {
        Ok(self.documents.read().get(id).cloned())
    }

    fn create(&self, fields: &SurveyFields) -> Result<SurveyId, StoreError> {
        let id = super::generate_id();
        self.documents.write().insert(id.clone(), fields.clone());
        Ok(id)
    }

    fn update(&self, id: &str, fields: &SurveyFields) -> Result<(), StoreError> {
        let mut documents = self.documents.write();
        let document = documents
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        document.extend(fields.clone());
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.documents.write().remove(id);
        Ok(())
    }
}
