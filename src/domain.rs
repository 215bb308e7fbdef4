pub mod core;
pub mod reserve;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::{
    error::Error,
    fmt::{Debug, Display},
};
use thiserror::Error;
use tracing::{error, warn};

/// Identifier of a stored record. Its `Display` form is the storage key.
pub trait Id: Clone + Eq + Display + Debug {}

pub trait Entity: Debug + Clone + Serialize + DeserializeOwned {
    type Id: Id;

    /// Name used in operator reports.
    const ENTITY_NAME: &'static str;
    /// Backing file, relative to the storage directory.
    const FILE_NAME: &'static str;

    fn id(&self) -> Self::Id;
}

/// An entity that accepts field-level changes after creation.
pub trait Aggregation: Entity {
    type Change: Clone + Debug;
    type Error: Error;

    /// Static whitelist of fields that raw updates may touch.
    /// Never contains the identifying key fields.
    const MUTABLE_FIELDS: &'static [&'static str];

    /// Parses a whitelisted raw field into a typed change.
    fn change_from_field(field: &str, value: Value) -> Result<Self::Change, Self::Error>;
    fn validate(&self, change: &Self::Change) -> Result<(), Self::Error>;
    fn apply(&mut self, change: Self::Change);
}

#[derive(Error, Debug)]
pub enum DataAccessError {
    #[error("Data read error: {0}")]
    ReadError(#[source] std::io::Error),
    #[error("Corrupt data: {0}")]
    ParseError(#[source] serde_json::Error),
    #[error("Data write error: {0}")]
    WriteError(#[source] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializeError(#[source] serde_json::Error),
}

/// Keyed collection of one entity type.
///
/// Every mutation is a whole-collection read-modify-write. Recoverable
/// conditions are reported and surfaced as `None`/`false`.
pub trait Repository<E: Entity> {
    /// Looks up a record by key. Never fails.
    fn find_by_id(&self, id: &E::Id) -> Option<E>;

    /// First record matching `predicate`, in key order.
    fn find_first<P>(&self, predicate: P) -> Option<E>
    where
        P: FnMut(&E) -> bool;

    fn find_all(&self) -> Vec<E>;

    /// Inserts a new record. Returns `None` without overwriting when the key
    /// is already taken.
    fn create(&self, entity: E) -> Option<E>;

    fn delete(&self, id: &E::Id) -> bool;

    /// Mutates the stored record in place and saves. Returns `false` if the
    /// key is absent.
    fn update<F>(&self, id: &E::Id, f: F) -> bool
    where
        F: FnOnce(&mut E);

    /// Applies typed changes to both `entity` and its stored record.
    ///
    /// Every change is validated before any is applied, so one invalid value
    /// blocks the whole call. `Ok(false)` means the record was not found.
    fn modify(
        &self,
        entity: &mut E,
        changes: Vec<<E as Aggregation>::Change>,
    ) -> Result<bool, <E as Aggregation>::Error>
    where
        E: Aggregation,
    {
        let id = entity.id();
        if self.find_by_id(&id).is_none() {
            warn!("{} {} not found", E::ENTITY_NAME, id);
            return Ok(false);
        }
        for change in &changes {
            if let Err(e) = entity.validate(change) {
                error!("Invalid change for {} {}: {}", E::ENTITY_NAME, id, e);
                return Err(e);
            }
        }
        let applied = changes.clone();
        let found = self.update(&id, move |stored| {
            for change in applied {
                stored.apply(change);
            }
        });
        if !found {
            warn!("{} {} not found", E::ENTITY_NAME, id);
            return Ok(false);
        }
        for change in changes {
            entity.apply(change);
        }
        Ok(true)
    }

    /// Applies a raw field map.
    ///
    /// Fields outside `MUTABLE_FIELDS` are reported and skipped; the rest go
    /// through [`Repository::modify`].
    fn modify_fields(
        &self,
        entity: &mut E,
        fields: Map<String, Value>,
    ) -> Result<bool, <E as Aggregation>::Error>
    where
        E: Aggregation,
    {
        let mut changes = Vec::with_capacity(fields.len());
        for (field, value) in fields {
            if !E::MUTABLE_FIELDS.contains(&field.as_str()) {
                error!("Attribute '{}' of {} is not modifiable", field, E::ENTITY_NAME);
                continue;
            }
            match E::change_from_field(&field, value) {
                Ok(change) => changes.push(change),
                Err(e) => {
                    error!("Invalid value for '{}': {}", field, e);
                    return Err(e);
                }
            }
        }
        self.modify(entity, changes)
    }
}

/// Deserializes a raw field mapping, reporting the failure before returning it.
pub(crate) fn from_fields<T: DeserializeOwned>(
    entity_name: &str,
    value: Value,
) -> Result<T, serde_json::Error> {
    serde_json::from_value(value).map_err(|e| {
        error!("Invalid {} fields: {}", entity_name, e);
        e
    })
}
