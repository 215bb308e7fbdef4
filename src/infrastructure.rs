pub mod core;

use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use tracing::{debug, error, warn};

use crate::domain::{DataAccessError, Entity, Repository};

/// Whole-file JSON store for one entity type.
///
/// The file holds a single object keyed by each record's ID. Reads and writes
/// always cover the whole collection, so a store must not be shared by
/// concurrent writers.
#[derive(Debug)]
pub struct JsonStore<E> {
    path: PathBuf,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for JsonStore<E> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> JsonStore<E> {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(E::FILE_NAME),
            _entity: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole collection. A missing file is an empty collection.
    pub fn try_load(&self) -> Result<BTreeMap<String, E>, DataAccessError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(DataAccessError::ReadError(e)),
        };
        serde_json::from_str(&text).map_err(DataAccessError::ParseError)
    }

    /// Reads the whole collection, treating unreadable or corrupt files as
    /// empty. The next successful save overwrites them.
    pub fn load(&self) -> BTreeMap<String, E> {
        match self.try_load() {
            Ok(records) => {
                debug!("Loaded {} records from {}", records.len(), self.path.display());
                records
            }
            Err(e) => {
                error!("File {} unusable, starting empty: {}", self.path.display(), e);
                BTreeMap::new()
            }
        }
    }

    pub fn try_save(&self, records: &BTreeMap<String, E>) -> Result<(), DataAccessError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(DataAccessError::WriteError)?;
        }
        let text = serde_json::to_string_pretty(records).map_err(DataAccessError::SerializeError)?;
        fs::write(&self.path, text).map_err(DataAccessError::WriteError)
    }

    /// Writes the whole collection. Failures are reported and dropped.
    pub fn save(&self, records: &BTreeMap<String, E>) {
        if let Err(e) = self.try_save(records) {
            error!("Could not save {}: {}", self.path.display(), e);
        }
    }
}

impl<E: Entity> Repository<E> for JsonStore<E> {
    fn find_by_id(&self, id: &E::Id) -> Option<E> {
        self.load().remove(&id.to_string())
    }

    fn find_first<P>(&self, mut predicate: P) -> Option<E>
    where
        P: FnMut(&E) -> bool,
    {
        self.load().into_values().find(|e| predicate(e))
    }

    fn find_all(&self) -> Vec<E> {
        self.load().into_values().collect()
    }

    fn create(&self, entity: E) -> Option<E> {
        let key = entity.id().to_string();
        let mut records = self.load();
        if records.contains_key(&key) {
            warn!("{} {} already exists", E::ENTITY_NAME, key);
            return None;
        }
        records.insert(key, entity.clone());
        self.save(&records);
        Some(entity)
    }

    fn delete(&self, id: &E::Id) -> bool {
        let mut records = self.load();
        if records.remove(&id.to_string()).is_none() {
            warn!("{} {} not found", E::ENTITY_NAME, id);
            return false;
        }
        self.save(&records);
        true
    }

    fn update<F>(&self, id: &E::Id, f: F) -> bool
    where
        F: FnOnce(&mut E),
    {
        let mut records = self.load();
        match records.get_mut(&id.to_string()) {
            Some(record) => f(record),
            None => return false,
        }
        self.save(&records);
        true
    }
}
