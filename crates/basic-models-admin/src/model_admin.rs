//! Model administration configuration.
//!
//! [`ModelAdmin`] describes how one model is presented in the admin: its
//! names, list columns, read-only fields, prepopulated fields, change form
//! template and the schema of its fields. The schema is also how the save
//! hooks decide whether a model "has" an audit field.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Configuration for how a model is displayed and managed in the admin panel.
///
/// # Examples
///
/// ```
/// use basic_models_admin::model_admin::{FieldSchema, ModelAdmin};
///
/// let admin = ModelAdmin::new("pages", "page")
///     .list_display(vec!["slug", "name"])
///     .readonly_fields(vec!["created_by"])
///     .save_on_top(true)
///     .fields_schema(vec![
///         FieldSchema::new("id", "BigAutoField").primary_key(),
///         FieldSchema::new("name", "CharField"),
///         FieldSchema::new("created_by", "ForeignKey").relation("auth.user"),
///     ]);
///
/// assert_eq!(admin.model_key(), "pages.page");
/// assert!(admin.declares_field("created_by"));
/// assert!(!admin.declares_field("updated_by"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelAdmin {
    /// The application label (e.g., "blog").
    pub app_label: String,
    /// The model name in lowercase (e.g., "article").
    pub model_name: String,
    /// The human-readable verbose name.
    pub verbose_name: String,
    /// The human-readable plural verbose name.
    pub verbose_name_plural: String,
    /// Fields to display in the list view.
    pub list_display: Vec<String>,
    /// Fields that are read-only in forms.
    pub readonly_fields: Vec<String>,
    /// Whether to show save buttons at the top of the form.
    pub save_on_top: bool,
    /// Fields that auto-populate from other fields (target -> sources).
    pub prepopulated_fields: HashMap<String, Vec<String>>,
    /// Template used for the change form, when not the host default.
    pub change_form_template: Option<String>,
    /// Schema information about model fields.
    pub fields_schema: Vec<FieldSchema>,
}

impl ModelAdmin {
    /// Creates a new `ModelAdmin` with default configuration.
    pub fn new(app_label: impl Into<String>, model_name: impl Into<String>) -> Self {
        let model = model_name.into();
        let verbose = model.replace('_', " ");
        let verbose_plural = format!("{verbose}s");
        Self {
            app_label: app_label.into(),
            model_name: model,
            verbose_name: verbose,
            verbose_name_plural: verbose_plural,
            list_display: vec!["__str__".to_string()],
            readonly_fields: Vec::new(),
            save_on_top: false,
            prepopulated_fields: HashMap::new(),
            change_form_template: None,
            fields_schema: Vec::new(),
        }
    }

    /// Sets the verbose name.
    #[must_use]
    pub fn verbose_name(mut self, name: impl Into<String>) -> Self {
        self.verbose_name = name.into();
        self
    }

    /// Sets the plural verbose name.
    #[must_use]
    pub fn verbose_name_plural(mut self, name: impl Into<String>) -> Self {
        self.verbose_name_plural = name.into();
        self
    }

    /// Sets the fields to display in the list view.
    #[must_use]
    pub fn list_display(mut self, fields: Vec<&str>) -> Self {
        self.list_display = fields.into_iter().map(String::from).collect();
        self
    }

    /// Sets the read-only fields.
    #[must_use]
    pub fn readonly_fields(mut self, fields: Vec<&str>) -> Self {
        self.readonly_fields = fields.into_iter().map(String::from).collect();
        self
    }

    /// Enables the save-on-top buttons.
    #[must_use]
    pub const fn save_on_top(mut self, enabled: bool) -> Self {
        self.save_on_top = enabled;
        self
    }

    /// Declares that `target` is prepopulated from `sources`.
    #[must_use]
    pub fn prepopulate(mut self, target: &str, sources: Vec<&str>) -> Self {
        self.prepopulated_fields.insert(
            target.to_string(),
            sources.into_iter().map(String::from).collect(),
        );
        self
    }

    /// Sets the change form template.
    #[must_use]
    pub fn change_form_template(mut self, template: impl Into<String>) -> Self {
        self.change_form_template = Some(template.into());
        self
    }

    /// Sets the field schema.
    #[must_use]
    pub fn fields_schema(mut self, schema: Vec<FieldSchema>) -> Self {
        self.fields_schema = schema;
        self
    }

    /// Returns the model key in `"app_label.model_name"` format.
    pub fn model_key(&self) -> String {
        format!("{}.{}", self.app_label, self.model_name)
    }

    /// Returns the primary key field name (`"id"` unless the schema says otherwise).
    pub fn pk_field(&self) -> &str {
        self.fields_schema
            .iter()
            .find(|f| f.primary_key)
            .map_or("id", |f| f.name.as_str())
    }

    /// Returns the schema entry for `name`, if declared.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields_schema.iter().find(|f| f.name == name)
    }

    /// Returns `true` if the schema declares `name`.
    pub fn declares_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Returns `true` if records of this model have `name`.
    ///
    /// With a schema, only declared fields count. Without one, a field counts
    /// when the record itself carries the key.
    pub fn has_field(&self, name: &str, record: &Record) -> bool {
        if self.fields_schema.is_empty() {
            record.contains(name)
        } else {
            self.declares_field(name)
        }
    }

    /// Returns `true` if `name` is read-only in the change form.
    pub fn is_readonly(&self, name: &str) -> bool {
        self.readonly_fields.iter().any(|f| f == name)
    }
}

/// Schema information about a single model field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct FieldSchema {
    /// The field name.
    pub name: String,
    /// The field type as a string (e.g., "`CharField`", "`ForeignKey`").
    pub field_type: String,
    /// Whether this field is the primary key.
    pub primary_key: bool,
    /// Set to the current time on every save.
    pub auto_now: bool,
    /// Set to the current time when the record is first saved.
    pub auto_now_add: bool,
    /// Whether this field is a many-to-many relation.
    pub many_to_many: bool,
    /// The target model for relational fields (e.g., "auth.user").
    pub related_model: Option<String>,
}

impl FieldSchema {
    /// Creates a new field schema entry.
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            primary_key: false,
            auto_now: false,
            auto_now_add: false,
            many_to_many: false,
            related_model: None,
        }
    }

    /// Marks this field as the primary key.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Refreshes this field with the current time on every save.
    #[must_use]
    pub const fn auto_now(mut self) -> Self {
        self.auto_now = true;
        self
    }

    /// Fills this field with the current time on the first save.
    #[must_use]
    pub const fn auto_now_add(mut self) -> Self {
        self.auto_now_add = true;
        self
    }

    /// Sets the field as relational with the given target model.
    #[must_use]
    pub fn relation(mut self, related_model: impl Into<String>) -> Self {
        self.related_model = Some(related_model.into());
        self
    }

    /// Marks this field as a many-to-many relation to `related_model`.
    #[must_use]
    pub fn many_to_many(mut self, related_model: impl Into<String>) -> Self {
        self.many_to_many = true;
        self.relation(related_model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_model_admin_new_defaults() {
        let admin = ModelAdmin::new("blog", "article");
        assert_eq!(admin.app_label, "blog");
        assert_eq!(admin.model_name, "article");
        assert_eq!(admin.verbose_name, "article");
        assert_eq!(admin.verbose_name_plural, "articles");
        assert_eq!(admin.list_display, vec!["__str__"]);
        assert!(admin.readonly_fields.is_empty());
        assert!(!admin.save_on_top);
        assert!(admin.prepopulated_fields.is_empty());
        assert!(admin.change_form_template.is_none());
    }

    #[test]
    fn test_model_admin_verbose_name_with_underscore() {
        let admin = ModelAdmin::new("blog", "blog_post");
        assert_eq!(admin.verbose_name, "blog post");
        assert_eq!(admin.verbose_name_plural, "blog posts");
    }

    #[test]
    fn test_model_admin_builder() {
        let admin = ModelAdmin::new("pages", "page")
            .verbose_name("web page")
            .verbose_name_plural("web pages")
            .list_display(vec!["slug", "name"])
            .readonly_fields(vec!["created_by", "updated_by"])
            .save_on_top(true)
            .prepopulate("slug", vec!["name"])
            .change_form_template("admin/preview_change_form.html");

        assert_eq!(admin.verbose_name_plural, "web pages");
        assert_eq!(admin.list_display, vec!["slug", "name"]);
        assert!(admin.is_readonly("created_by"));
        assert!(!admin.is_readonly("name"));
        assert!(admin.save_on_top);
        assert_eq!(
            admin.prepopulated_fields.get("slug"),
            Some(&vec!["name".to_string()])
        );
        assert_eq!(
            admin.change_form_template.as_deref(),
            Some("admin/preview_change_form.html")
        );
    }

    #[test]
    fn test_pk_field_default_and_from_schema() {
        assert_eq!(ModelAdmin::new("a", "b").pk_field(), "id");
        let admin = ModelAdmin::new("a", "b")
            .fields_schema(vec![FieldSchema::new("uuid", "UUIDField").primary_key()]);
        assert_eq!(admin.pk_field(), "uuid");
    }

    #[test]
    fn test_has_field_uses_schema_when_present() {
        let admin = ModelAdmin::new("a", "b")
            .fields_schema(vec![FieldSchema::new("updated_by", "ForeignKey")]);
        let record = Record::from_value(json!({"created_by": 1})).unwrap();
        assert!(admin.has_field("updated_by", &record));
        assert!(!admin.has_field("created_by", &record));
    }

    #[test]
    fn test_has_field_falls_back_to_record_keys() {
        let admin = ModelAdmin::new("a", "b");
        let record = Record::from_value(json!({"created_by": null})).unwrap();
        assert!(admin.has_field("created_by", &record));
        assert!(!admin.has_field("updated_by", &record));
    }

    #[test]
    fn test_field_schema_builders() {
        let f = FieldSchema::new("created_at", "DateTimeField").auto_now_add();
        assert!(f.auto_now_add);
        assert!(!f.auto_now);
        let tags = FieldSchema::new("tags", "ManyToManyField").many_to_many("pages.tag");
        assert!(tags.many_to_many);
        assert_eq!(tags.related_model.as_deref(), Some("pages.tag"));
    }

    #[test]
    fn test_model_admin_serialization() {
        let admin = ModelAdmin::new("blog", "article").save_on_top(true);
        let json = serde_json::to_string(&admin).unwrap();
        assert!(json.contains("\"app_label\":\"blog\""));
        assert!(json.contains("\"save_on_top\":true"));
    }
}
