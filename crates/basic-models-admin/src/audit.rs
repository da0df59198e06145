//! Audit stamping of `created_by` / `updated_by`.
//!
//! Before a record is handed to the store, [`AuditFields::stamp`] records the
//! acting user:
//!
//! - `updated_by` on every save;
//! - `created_by` only when the record is new (no primary key yet).
//!
//! By default a field is only stamped when the model has it, so the same
//! handler works for models with and without audit columns.
//! [`AuditFields::unconditional`] stamps both fields regardless, for models
//! known to carry them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use basic_models_core::AdminSettings;

use crate::model_admin::ModelAdmin;
use crate::record::Record;
use crate::request::AdminUser;

/// Names of the audit fields stamped with the acting user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditFields {
    /// Field set once, on the first save.
    pub created_by: String,
    /// Field overwritten on every save.
    pub updated_by: String,
    /// Only stamp fields the model declares.
    #[serde(default = "default_if_present")]
    pub if_present: bool,
}

const fn default_if_present() -> bool {
    true
}

impl Default for AuditFields {
    fn default() -> Self {
        Self::from_settings(&AdminSettings::default())
    }
}

/// What [`AuditFields::stamp`] changed on a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stamped {
    /// `created_by` was set.
    pub created_by: bool,
    /// `updated_by` was set.
    pub updated_by: bool,
}

impl AuditFields {
    /// Reads the field names from the admin settings.
    pub fn from_settings(settings: &AdminSettings) -> Self {
        Self {
            created_by: settings.created_by_field.clone(),
            updated_by: settings.updated_by_field.clone(),
            if_present: true,
        }
    }

    /// Stamps both fields even when the model schema does not declare them.
    #[must_use]
    pub const fn unconditional(mut self) -> Self {
        self.if_present = false;
        self
    }

    fn applies(&self, admin: &ModelAdmin, field: &str, record: &Record) -> bool {
        !self.if_present || admin.has_field(field, record)
    }

    /// Stamps `record` with `user` according to the rules above.
    ///
    /// # Examples
    ///
    /// ```
    /// use basic_models_admin::audit::AuditFields;
    /// use basic_models_admin::model_admin::ModelAdmin;
    /// use basic_models_admin::record::Record;
    /// use basic_models_admin::request::AdminUser;
    /// use serde_json::json;
    ///
    /// let admin = ModelAdmin::new("pages", "page");
    /// let mut record = Record::from_value(json!({"created_by": null, "updated_by": null})).unwrap();
    /// AuditFields::default().stamp(&admin, &mut record, &AdminUser::new(3, "editor"));
    ///
    /// assert_eq!(record.get("created_by"), Some(&json!(3)));
    /// assert_eq!(record.get("updated_by"), Some(&json!(3)));
    /// ```
    pub fn stamp(&self, admin: &ModelAdmin, record: &mut Record, user: &AdminUser) -> Stamped {
        let mut stamped = Stamped::default();

        if record.is_new(admin.pk_field()) && self.applies(admin, &self.created_by, record) {
            record.set(self.created_by.clone(), user.reference());
            stamped.created_by = true;
        }
        if self.applies(admin, &self.updated_by, record) {
            record.set(self.updated_by.clone(), user.reference());
            stamped.updated_by = true;
        }

        debug!(
            model = %admin.model_key(),
            user = %user.username,
            created_by = stamped.created_by,
            updated_by = stamped.updated_by,
            "stamped audit fields"
        );
        stamped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model_admin::FieldSchema;
    use serde_json::json;

    fn audited_admin() -> ModelAdmin {
        ModelAdmin::new("pages", "page").fields_schema(vec![
            FieldSchema::new("id", "BigAutoField").primary_key(),
            FieldSchema::new("name", "CharField"),
            FieldSchema::new("created_by", "ForeignKey").relation("auth.user"),
            FieldSchema::new("updated_by", "ForeignKey").relation("auth.user"),
        ])
    }

    #[test]
    fn test_new_record_gets_both_fields() {
        let admin = audited_admin();
        let mut record = Record::from_value(json!({"name": "x"})).unwrap();
        let stamped = AuditFields::default().stamp(&admin, &mut record, &AdminUser::new(5, "e"));
        assert_eq!(stamped, Stamped { created_by: true, updated_by: true });
        assert_eq!(record.get("created_by"), Some(&json!(5)));
        assert_eq!(record.get("updated_by"), Some(&json!(5)));
    }

    #[test]
    fn test_existing_record_keeps_created_by() {
        let admin = audited_admin();
        let mut record =
            Record::from_value(json!({"id": 1, "created_by": 2, "updated_by": 2})).unwrap();
        let stamped = AuditFields::default().stamp(&admin, &mut record, &AdminUser::new(9, "e"));
        assert!(!stamped.created_by);
        assert_eq!(record.get("created_by"), Some(&json!(2)));
        assert_eq!(record.get("updated_by"), Some(&json!(9)));
    }

    #[test]
    fn test_missing_fields_are_a_no_op() {
        let admin = ModelAdmin::new("pages", "tag").fields_schema(vec![
            FieldSchema::new("id", "BigAutoField").primary_key(),
            FieldSchema::new("name", "CharField"),
        ]);
        let mut record = Record::from_value(json!({"name": "x"})).unwrap();
        let before = record.clone();
        let stamped = AuditFields::default().stamp(&admin, &mut record, &AdminUser::new(1, "e"));
        assert_eq!(stamped, Stamped::default());
        assert_eq!(record, before);
    }

    #[test]
    fn test_only_updated_by_present() {
        let admin = ModelAdmin::new("pages", "note").fields_schema(vec![
            FieldSchema::new("id", "BigAutoField").primary_key(),
            FieldSchema::new("updated_by", "ForeignKey"),
        ]);
        let mut record = Record::new();
        AuditFields::default().stamp(&admin, &mut record, &AdminUser::new(4, "e"));
        assert!(!record.contains("created_by"));
        assert_eq!(record.get("updated_by"), Some(&json!(4)));
    }

    #[test]
    fn test_custom_field_names() {
        let settings = AdminSettings {
            created_by_field: "author".to_string(),
            updated_by_field: "editor".to_string(),
            ..AdminSettings::default()
        };
        let admin = ModelAdmin::new("blog", "post").fields_schema(vec![
            FieldSchema::new("author", "ForeignKey"),
            FieldSchema::new("editor", "ForeignKey"),
        ]);
        let mut record = Record::new();
        AuditFields::from_settings(&settings).stamp(&admin, &mut record, &AdminUser::new(8, "e"));
        assert_eq!(record.get("author"), Some(&json!(8)));
        assert_eq!(record.get("editor"), Some(&json!(8)));
    }

    #[test]
    fn test_unconditional_stamps_without_schema() {
        let admin = ModelAdmin::new("pages", "page");
        let mut record = Record::from_value(json!({"name": "x"})).unwrap();
        let stamped = AuditFields::default()
            .unconditional()
            .stamp(&admin, &mut record, &AdminUser::new(7, "e"));
        assert_eq!(stamped, Stamped { created_by: true, updated_by: true });
        assert_eq!(record.get("created_by"), Some(&json!(7)));
        assert_eq!(record.get("updated_by"), Some(&json!(7)));

        let mut existing = Record::from_value(json!({"id": 1, "created_by": 2})).unwrap();
        AuditFields::default()
            .unconditional()
            .stamp(&admin, &mut existing, &AdminUser::new(7, "e"));
        assert_eq!(existing.get("created_by"), Some(&json!(2)));
        assert_eq!(existing.get("updated_by"), Some(&json!(7)));
    }
}
