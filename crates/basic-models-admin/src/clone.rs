//! Record clone operations used by the duplicate action.
//!
//! Cloning belongs to the record type, not to the admin: a model that wants
//! to be duplicated registers a [`RecordCloner`] on its handler. The duplicate
//! action calls it once per selected record.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use basic_models_core::BasicModelsResult;

use crate::model_admin::ModelAdmin;
use crate::record::Record;
use crate::store::RecordStore;

/// A model-specific clone operation producing a new persisted record.
#[async_trait]
pub trait RecordCloner: Send + Sync {
    /// Persists a duplicate of `original` and returns it.
    async fn clone_record(
        &self,
        store: &dyn RecordStore,
        admin: &ModelAdmin,
        original: &Record,
    ) -> BasicModelsResult<Record>;
}

/// Clones a record by copying its fields into a new row.
///
/// The primary key and automatic timestamps are always dropped so the store
/// assigns fresh ones. Additional fields can be cleared (`reset`) or forced
/// to a value (`override_field`).
///
/// # Examples
///
/// ```
/// use basic_models_admin::clone::FieldCopyCloner;
/// use serde_json::json;
///
/// // Copies start inactive so a model with a single active row keeps one.
/// let cloner = FieldCopyCloner::new()
///     .override_field("is_active", json!(false))
///     .reset("slug");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldCopyCloner {
    reset: Vec<String>,
    overrides: HashMap<String, Value>,
}

impl FieldCopyCloner {
    /// Creates a cloner that copies every field except the primary key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Leaves `field` out of the copy.
    #[must_use]
    pub fn reset(mut self, field: impl Into<String>) -> Self {
        self.reset.push(field.into());
        self
    }

    /// Sets `field` to `value` on the copy.
    #[must_use]
    pub fn override_field(mut self, field: impl Into<String>, value: Value) -> Self {
        self.overrides.insert(field.into(), value);
        self
    }

    /// Builds the unsaved copy of `original`.
    pub fn copy_of(&self, admin: &ModelAdmin, original: &Record) -> Record {
        let mut copy = original.clone();
        copy.remove(admin.pk_field());
        for field in &admin.fields_schema {
            if field.auto_now || field.auto_now_add {
                copy.remove(&field.name);
            }
        }
        for field in &self.reset {
            copy.remove(field);
        }
        for (field, value) in &self.overrides {
            copy.set(field.clone(), value.clone());
        }
        copy
    }
}

#[async_trait]
impl RecordCloner for FieldCopyCloner {
    async fn clone_record(
        &self,
        store: &dyn RecordStore,
        admin: &ModelAdmin,
        original: &Record,
    ) -> BasicModelsResult<Record> {
        store.save(admin, self.copy_of(admin, original)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model_admin::FieldSchema;
    use crate::store::InMemoryRecordStore;
    use serde_json::json;

    fn admin() -> ModelAdmin {
        ModelAdmin::new("pages", "banner").fields_schema(vec![
            FieldSchema::new("id", "BigAutoField").primary_key(),
            FieldSchema::new("title", "CharField"),
            FieldSchema::new("slug", "SlugField"),
            FieldSchema::new("is_active", "BooleanField"),
            FieldSchema::new("created_at", "DateTimeField").auto_now_add(),
        ])
    }

    #[test]
    fn test_copy_drops_pk_and_timestamps() {
        let original = Record::from_value(json!({
            "id": 3, "title": "Sale", "slug": "sale", "is_active": true,
            "created_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        let copy = FieldCopyCloner::new().copy_of(&admin(), &original);
        assert!(copy.is_new("id"));
        assert!(!copy.contains("created_at"));
        assert_eq!(copy.get("title"), Some(&json!("Sale")));
        assert_eq!(copy.get("is_active"), Some(&json!(true)));
    }

    #[test]
    fn test_copy_reset_and_override() {
        let original =
            Record::from_value(json!({"id": 3, "slug": "sale", "is_active": true})).unwrap();
        let copy = FieldCopyCloner::new()
            .reset("slug")
            .override_field("is_active", json!(false))
            .copy_of(&admin(), &original);
        assert!(!copy.contains("slug"));
        assert_eq!(copy.get("is_active"), Some(&json!(false)));
    }

    #[tokio::test]
    async fn test_clone_record_persists_new_row() {
        let store = InMemoryRecordStore::new();
        let admin = admin();
        let original = store
            .save(&admin, Record::from_value(json!({"title": "Sale"})).unwrap())
            .await
            .unwrap();

        let copy = FieldCopyCloner::new()
            .clone_record(&store, &admin, &original)
            .await
            .unwrap();

        assert_eq!(copy.pk("id"), Some("2".to_string()));
        assert_eq!(copy.get("title"), Some(&json!("Sale")));
        assert_eq!(store.count("pages.banner"), 2);
    }
}
