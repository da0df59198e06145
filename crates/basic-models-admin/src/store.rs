//! Persistence contract for the admin helpers.
//!
//! The helpers never persist anything themselves: they mutate records in
//! memory and hand them to a [`RecordStore`]. The trait is the slice of the
//! host's storage layer the hooks and actions rely on:
//!
//! - single-record save (insert or update, applying automatic timestamps),
//! - fetching a selection by primary key,
//! - one bulk update per action,
//! - bulk delete,
//! - assigning many-to-many relations after a save.
//!
//! [`InMemoryRecordStore`] implements it for development and tests.
//!
//! # Example
//!
//! ```
//! use basic_models_admin::store::InMemoryRecordStore;
//!
//! let store = InMemoryRecordStore::new();
//! assert_eq!(store.count("blog.article"), 0);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};

use basic_models_core::{BasicModelsError, BasicModelsResult};

use crate::model_admin::ModelAdmin;
use crate::record::Record;

/// Storage operations the admin helpers delegate to.
///
/// Records are addressed by their primary key rendered as a string, the same
/// form the admin uses for selected checkboxes.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetches a single record by primary key.
    async fn get(&self, admin: &ModelAdmin, pk: &str) -> BasicModelsResult<Record>;

    /// Saves a record. New records (no primary key) are inserted and receive
    /// one; existing records replace the stored row.
    ///
    /// Returns the record as stored.
    async fn save(&self, admin: &ModelAdmin, record: Record) -> BasicModelsResult<Record>;

    /// Fetches the records whose primary keys are in `pks`. Unknown keys are
    /// skipped.
    async fn fetch_many(&self, admin: &ModelAdmin, pks: &[String])
        -> BasicModelsResult<Vec<Record>>;

    /// Sets `values` on every record in `pks` as a single update.
    ///
    /// Returns the number of records updated. Automatic timestamps are not
    /// touched, matching a queryset-level update.
    async fn update_many(
        &self,
        admin: &ModelAdmin,
        pks: &[String],
        values: &Map<String, Value>,
    ) -> BasicModelsResult<usize>;

    /// Deletes every record in `pks`, returning how many were removed.
    async fn delete_many(&self, admin: &ModelAdmin, pks: &[String]) -> BasicModelsResult<usize>;

    /// Replaces the many-to-many relation `field` of record `pk`.
    async fn set_related(
        &self,
        admin: &ModelAdmin,
        pk: &str,
        field: &str,
        related: &[Value],
    ) -> BasicModelsResult<()>;
}

/// Storage entry for a model table in the in-memory store.
#[derive(Debug, Clone)]
struct ModelTable {
    records: Vec<Record>,
    next_id: u64,
}

impl ModelTable {
    const fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    fn position(&self, pk_field: &str, pk: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|r| r.pk(pk_field).as_deref() == Some(pk))
    }
}

/// In-memory implementation of [`RecordStore`].
///
/// Each model gets its own table keyed by `"app_label.model_name"`. Primary
/// keys are auto-incrementing integers. Every operation takes the lock once,
/// so a bulk update is atomic with respect to other store calls.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    tables: Arc<RwLock<HashMap<String, ModelTable>>>,
}

fn poisoned<T>(_: PoisonError<T>) -> BasicModelsError {
    BasicModelsError::DatabaseError("record store lock poisoned".to_string())
}

fn now_value() -> Value {
    Value::String(Utc::now().to_rfc3339())
}

impl InMemoryRecordStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of records in a model's table.
    pub fn count(&self, model_key: &str) -> usize {
        self.tables
            .read()
            .map_or(0, |tables| tables.get(model_key).map_or(0, |t| t.records.len()))
    }

    /// Returns all records for a model, in insertion order.
    pub fn all_records(&self, model_key: &str) -> Vec<Record> {
        self.tables.read().map_or_else(
            |_| Vec::new(),
            |tables| {
                tables
                    .get(model_key)
                    .map_or_else(Vec::new, |t| t.records.clone())
            },
        )
    }

    /// Applies `auto_now` / `auto_now_add` fields from the schema.
    fn apply_timestamps(admin: &ModelAdmin, record: &mut Record, previous: Option<&Record>) {
        for field in &admin.fields_schema {
            if field.auto_now {
                record.set(field.name.clone(), now_value());
            } else if field.auto_now_add {
                let kept = previous.and_then(|p| p.get(&field.name)).cloned();
                record.set(field.name.clone(), kept.unwrap_or_else(now_value));
            }
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn get(&self, admin: &ModelAdmin, pk: &str) -> BasicModelsResult<Record> {
        let model_key = admin.model_key();
        let tables = self.tables.read().map_err(poisoned)?;
        tables
            .get(&model_key)
            .and_then(|table| {
                table
                    .position(admin.pk_field(), pk)
                    .map(|idx| table.records[idx].clone())
            })
            .ok_or_else(|| {
                BasicModelsError::DoesNotExist(format!("{model_key} with pk '{pk}'"))
            })
    }

    #[allow(clippy::significant_drop_tightening)]
    async fn save(&self, admin: &ModelAdmin, mut record: Record) -> BasicModelsResult<Record> {
        let pk_field = admin.pk_field();
        let mut tables = self.tables.write().map_err(poisoned)?;
        let table = tables
            .entry(admin.model_key())
            .or_insert_with(ModelTable::new);

        let existing = record
            .pk(pk_field)
            .and_then(|pk| table.position(pk_field, &pk));

        if let Some(idx) = existing {
            Self::apply_timestamps(admin, &mut record, Some(&table.records[idx]));
            table.records[idx] = record.clone();
            return Ok(record);
        }

        match record.get(pk_field).and_then(Value::as_u64) {
            Some(explicit) => {
                let next = explicit.checked_add(1).ok_or_else(|| {
                    BasicModelsError::IntegrityError(format!(
                        "{} primary key {explicit} is out of range",
                        admin.model_key()
                    ))
                })?;
                table.next_id = table.next_id.max(next);
            }
            None if record.is_new(pk_field) => {
                record.set(pk_field, Value::from(table.next_id));
                table.next_id += 1;
            }
            None => {}
        }
        Self::apply_timestamps(admin, &mut record, None);
        table.records.push(record.clone());
        Ok(record)
    }

    async fn fetch_many(
        &self,
        admin: &ModelAdmin,
        pks: &[String],
    ) -> BasicModelsResult<Vec<Record>> {
        let pk_field = admin.pk_field();
        let tables = self.tables.read().map_err(poisoned)?;
        Ok(tables.get(&admin.model_key()).map_or_else(Vec::new, |table| {
            table
                .records
                .iter()
                .filter(|r| r.pk(pk_field).is_some_and(|pk| pks.contains(&pk)))
                .cloned()
                .collect()
        }))
    }

    #[allow(clippy::significant_drop_tightening)]
    async fn update_many(
        &self,
        admin: &ModelAdmin,
        pks: &[String],
        values: &Map<String, Value>,
    ) -> BasicModelsResult<usize> {
        let pk_field = admin.pk_field();
        let mut tables = self.tables.write().map_err(poisoned)?;
        let Some(table) = tables.get_mut(&admin.model_key()) else {
            return Ok(0);
        };

        let mut updated = 0;
        for record in &mut table.records {
            if record.pk(pk_field).is_some_and(|pk| pks.contains(&pk)) {
                for (field, value) in values {
                    record.set(field.clone(), value.clone());
                }
                updated += 1;
            }
        }
        Ok(updated)
    }

    #[allow(clippy::significant_drop_tightening)]
    async fn delete_many(&self, admin: &ModelAdmin, pks: &[String]) -> BasicModelsResult<usize> {
        let pk_field = admin.pk_field();
        let mut tables = self.tables.write().map_err(poisoned)?;
        let Some(table) = tables.get_mut(&admin.model_key()) else {
            return Ok(0);
        };

        let before = table.records.len();
        table
            .records
            .retain(|r| !r.pk(pk_field).is_some_and(|pk| pks.contains(&pk)));
        Ok(before - table.records.len())
    }

    #[allow(clippy::significant_drop_tightening)]
    async fn set_related(
        &self,
        admin: &ModelAdmin,
        pk: &str,
        field: &str,
        related: &[Value],
    ) -> BasicModelsResult<()> {
        let model_key = admin.model_key();
        let pk_field = admin.pk_field();
        let missing = || BasicModelsError::DoesNotExist(format!("{model_key} with pk '{pk}'"));
        let mut tables = self.tables.write().map_err(poisoned)?;
        let table = tables.get_mut(&model_key).ok_or_else(missing)?;
        let idx = table.position(pk_field, pk).ok_or_else(missing)?;
        table.records[idx].set(field, Value::Array(related.to_vec()));
        Ok(())
    }
}
