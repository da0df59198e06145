//! The model-admin extension contract.
//!
//! [`ModelAdminHandler`] is what the host admin calls into for one registered
//! model. It combines the model's [`ModelAdmin`] configuration with the
//! behaviour the presets customize:
//!
//! - `save_model` / `save_formset`: prepopulate, keep the stored values of
//!   read-only and `created_by` fields, stamp audit fields, then delegate the
//!   save to the [`RecordStore`];
//! - `run_action`: dispatch a bulk action from the [`ActionRegistry`];
//! - `message_user`: report back to the operator.

use std::sync::Arc;

use tracing::{debug, warn, Instrument};

use basic_models_core::logging::{action_span, save_span};
use basic_models_core::{BasicModelsError, BasicModelsResult};

use crate::actions::{ActionContext, ActionRegistry, ActionResult, AdminAction};
use crate::audit::AuditFields;
use crate::clone::RecordCloner;
use crate::formset::InlineFormset;
use crate::messages::MessageLevel;
use crate::model_admin::ModelAdmin;
use crate::prepopulate::prepopulate;
use crate::record::Record;
use crate::request::AdminRequest;
use crate::store::RecordStore;

/// Shown when an action is submitted without any selected records.
pub const NO_SELECTION_MESSAGE: &str =
    "Items must be selected in order to perform actions on them. No items have been changed.";

/// Hooks the host admin invokes for one model.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use basic_models_admin::handler::ModelAdminHandler;
/// use basic_models_admin::model_admin::ModelAdmin;
/// use basic_models_admin::store::InMemoryRecordStore;
///
/// let handler = ModelAdminHandler::new(
///     ModelAdmin::new("pages", "page"),
///     Arc::new(InMemoryRecordStore::new()),
/// );
/// assert_eq!(handler.action_names(), vec!["delete_selected"]);
/// ```
pub struct ModelAdminHandler {
    admin: ModelAdmin,
    store: Arc<dyn RecordStore>,
    actions: ActionRegistry,
    audit: Option<AuditFields>,
    cloner: Option<Arc<dyn RecordCloner>>,
}

impl ModelAdminHandler {
    /// Creates a handler with the default actions and no audit stamping.
    pub fn new(admin: ModelAdmin, store: Arc<dyn RecordStore>) -> Self {
        Self {
            admin,
            store,
            actions: ActionRegistry::new(),
            audit: None,
            cloner: None,
        }
    }

    /// Enables audit stamping with the given field names.
    #[must_use]
    pub fn with_audit(mut self, fields: AuditFields) -> Self {
        self.audit = Some(fields);
        self
    }

    /// Sets the model's clone operation, used by the duplicate action.
    #[must_use]
    pub fn with_cloner(mut self, cloner: Arc<dyn RecordCloner>) -> Self {
        self.cloner = Some(cloner);
        self
    }

    /// Registers a bulk action.
    #[must_use]
    pub fn with_action(mut self, action: Box<dyn AdminAction>) -> Self {
        self.register_action(action);
        self
    }

    /// Registers a bulk action on an existing handler.
    pub fn register_action(&mut self, action: Box<dyn AdminAction>) {
        self.actions.register(action);
    }

    /// Returns the model configuration.
    pub const fn admin(&self) -> &ModelAdmin {
        &self.admin
    }

    /// Returns the fields shown read-only in the change form.
    pub fn readonly_fields(&self) -> &[String] {
        &self.admin.readonly_fields
    }

    /// Returns whether the save buttons are also shown above the form.
    pub const fn save_on_top(&self) -> bool {
        self.admin.save_on_top
    }

    /// Returns the change form template override, if any.
    pub fn change_form_template(&self) -> Option<&str> {
        self.admin.change_form_template.as_deref()
    }

    /// Returns the audit field names, if stamping is enabled.
    pub const fn audit(&self) -> Option<&AuditFields> {
        self.audit.as_ref()
    }

    /// Returns the store the handler saves through.
    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    /// Returns the registered action names, in order.
    pub fn action_names(&self) -> Vec<&str> {
        self.actions.action_names()
    }

    /// Returns `(name, label)` pairs for the action dropdown.
    pub fn action_choices(&self) -> Vec<(String, String)> {
        self.actions.choices(&self.admin)
    }

    /// Adds an operator message to the request.
    pub fn message_user(
        &self,
        request: &mut AdminRequest,
        level: MessageLevel,
        text: impl Into<String>,
    ) {
        request.message(level, text);
    }

    /// Prepares a record of `admin` for saving.
    ///
    /// Prepopulates empty fields, restores protected fields of an already
    /// stored record, then stamps the audit fields.
    async fn prepare(
        &self,
        admin: &ModelAdmin,
        request: &AdminRequest,
        record: &mut Record,
    ) -> BasicModelsResult<()> {
        prepopulate(admin, record);
        if let Some(pk) = record.pk(admin.pk_field()) {
            match self.store.get(admin, &pk).await {
                Ok(stored) => self.keep_protected(admin, record, &stored),
                Err(BasicModelsError::DoesNotExist(_)) => {}
                Err(err) => return Err(err),
            }
        }
        if let Some(audit) = &self.audit {
            audit.stamp(admin, record, &request.user);
        }
        Ok(())
    }

    /// Copies read-only fields and `created_by` from the stored row.
    ///
    /// Submitted values for these fields are discarded. A field the stored row
    /// lacks is removed from the record.
    fn keep_protected(&self, admin: &ModelAdmin, record: &mut Record, stored: &Record) {
        let created_by = self.audit.as_ref().map(|audit| &audit.created_by);
        for field in admin.readonly_fields.iter().chain(created_by) {
            match stored.get(field) {
                Some(value) => {
                    record.set(field.clone(), value.clone());
                }
                None => {
                    record.remove(field);
                }
            }
        }
        debug!(model = %admin.model_key(), "kept stored read-only fields");
    }

    /// Saves a single record edited in the change form.
    ///
    /// `change` is the host's "editing an existing object" flag; whether
    /// `created_by` is stamped depends only on the record having a primary key.
    pub async fn save_model(
        &self,
        request: &AdminRequest,
        mut record: Record,
        change: bool,
    ) -> BasicModelsResult<Record> {
        let span = save_span(&self.admin.model_key(), change);
        async {
            self.prepare(&self.admin, request, &mut record).await?;
            let saved = self.store.save(&self.admin, record).await?;
            debug!(pk = ?saved.pk(self.admin.pk_field()), "saved record");
            Ok(saved)
        }
        .instrument(span)
        .await
    }

    /// Saves every instance of an inline formset, then its many-to-many data.
    ///
    /// Returns the stored instances in form order.
    pub async fn save_formset(
        &self,
        request: &AdminRequest,
        formset: &InlineFormset,
        change: bool,
    ) -> BasicModelsResult<Vec<Record>> {
        let span = save_span(&formset.admin.model_key(), change);
        async {
            let mut saved = Vec::with_capacity(formset.forms.len());
            for mut instance in formset.instances() {
                self.prepare(&formset.admin, request, &mut instance).await?;
                saved.push(self.store.save(&formset.admin, instance).await?);
            }
            formset.save_m2m(self.store.as_ref(), &saved).await?;
            debug!(count = saved.len(), "saved formset");
            Ok(saved)
        }
        .instrument(span)
        .await
    }

    /// Runs the action `name` on the selected primary keys.
    ///
    /// An empty selection changes nothing and warns the operator. Errors from
    /// the action (unknown name, store failure, missing clone operation) are
    /// returned unchanged.
    pub async fn run_action(
        &self,
        request: &mut AdminRequest,
        name: &str,
        selected: &[String],
    ) -> BasicModelsResult<ActionResult> {
        let span = action_span(name, &self.admin.model_key());
        async {
            if selected.is_empty() {
                warn!("action submitted without a selection");
                request.message(MessageLevel::Warning, NO_SELECTION_MESSAGE);
                return Ok(ActionResult::failure(NO_SELECTION_MESSAGE));
            }

            let mut ctx = ActionContext {
                request,
                admin: &self.admin,
                store: self.store.as_ref(),
                cloner: self.cloner.as_deref(),
            };
            let result = self.actions.execute(name, &mut ctx, selected).await;
            if let Err(err) = &result {
                warn!(error = %err, "action failed");
            }
            result
        }
        .instrument(span)
        .await
    }
}

impl std::fmt::Debug for ModelAdminHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelAdminHandler")
            .field("model", &self.admin.model_key())
            .field("actions", &self.action_names())
            .field("audit", &self.audit)
            .field("has_cloner", &self.cloner.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::SetActiveAction;
    use crate::model_admin::FieldSchema;
    use crate::request::AdminUser;
    use crate::store::InMemoryRecordStore;
    use serde_json::json;

    fn handler() -> ModelAdminHandler {
        let admin = ModelAdmin::new("pages", "page")
            .prepopulate("slug", vec!["name"])
            .fields_schema(vec![
                FieldSchema::new("id", "BigAutoField").primary_key(),
                FieldSchema::new("name", "CharField"),
                FieldSchema::new("slug", "SlugField"),
                FieldSchema::new("is_active", "BooleanField"),
                FieldSchema::new("created_by", "ForeignKey"),
                FieldSchema::new("updated_by", "ForeignKey"),
            ]);
        ModelAdminHandler::new(admin, Arc::new(InMemoryRecordStore::new()))
            .with_audit(AuditFields::default())
            .with_action(Box::new(SetActiveAction::activate("is_active")))
    }

    #[tokio::test]
    async fn test_save_model_prepopulates_and_stamps() {
        let handler = handler();
        let request = AdminRequest::new(AdminUser::new(2, "ed"));
        let record = Record::from_value(json!({"name": "Contact Us"})).unwrap();

        let saved = handler.save_model(&request, record, false).await.unwrap();

        assert_eq!(saved.get("slug"), Some(&json!("contact-us")));
        assert_eq!(saved.get("created_by"), Some(&json!(2)));
        assert_eq!(saved.get("updated_by"), Some(&json!(2)));
        assert_eq!(saved.pk("id"), Some("1".to_string()));
    }

    #[tokio::test]
    async fn test_save_model_ignores_submitted_created_by() {
        let handler = handler();
        let created = handler
            .save_model(
                &AdminRequest::new(AdminUser::new(1, "ann")),
                Record::from_value(json!({"name": "Home"})).unwrap(),
                false,
            )
            .await
            .unwrap();

        let mut edited = created.clone();
        edited.set("created_by", json!(99));
        let saved = handler
            .save_model(&AdminRequest::new(AdminUser::new(2, "ed")), edited, true)
            .await
            .unwrap();

        assert_eq!(saved.get("created_by"), Some(&json!(1)));
        assert_eq!(saved.get("updated_by"), Some(&json!(2)));
    }

    #[tokio::test]
    async fn test_save_model_restores_omitted_created_by() {
        let handler = handler();
        handler
            .save_model(
                &AdminRequest::new(AdminUser::new(1, "ann")),
                Record::from_value(json!({"name": "Home"})).unwrap(),
                false,
            )
            .await
            .unwrap();

        let partial = Record::from_value(json!({"id": 1, "name": "Homepage"})).unwrap();
        let saved = handler
            .save_model(&AdminRequest::new(AdminUser::new(2, "ed")), partial, true)
            .await
            .unwrap();

        assert_eq!(saved.get("created_by"), Some(&json!(1)));
        assert_eq!(saved.get("updated_by"), Some(&json!(2)));
        let stored = handler.store().get(handler.admin(), "1").await.unwrap();
        assert_eq!(stored.get("created_by"), Some(&json!(1)));
        assert_eq!(stored.get("name"), Some(&json!("Homepage")));
    }

    #[tokio::test]
    async fn test_save_model_keeps_stored_readonly_fields() {
        let admin = ModelAdmin::new("pages", "page").readonly_fields(vec!["published_at"]);
        let handler = ModelAdminHandler::new(admin, Arc::new(InMemoryRecordStore::new()));
        let request = AdminRequest::new(AdminUser::new(1, "ann"));
        let created = handler
            .save_model(
                &request,
                Record::from_value(json!({"name": "a", "published_at": "2024-05-01"})).unwrap(),
                false,
            )
            .await
            .unwrap();

        let mut edited = created;
        edited.set("published_at", json!("1999-01-01"));
        edited.set("draft_note", json!("x"));
        let saved = handler.save_model(&request, edited, true).await.unwrap();

        assert_eq!(saved.get("published_at"), Some(&json!("2024-05-01")));
        assert_eq!(saved.get("draft_note"), Some(&json!("x")));
    }

    #[tokio::test]
    async fn test_save_model_without_audit_leaves_fields() {
        let handler = ModelAdminHandler::new(
            ModelAdmin::new("pages", "page"),
            Arc::new(InMemoryRecordStore::new()),
        );
        let request = AdminRequest::new(AdminUser::new(2, "ed"));
        let record = Record::from_value(json!({"created_by": null})).unwrap();
        let saved = handler.save_model(&request, record, false).await.unwrap();
        assert_eq!(saved.get("created_by"), Some(&json!(null)));
    }

    #[tokio::test]
    async fn test_run_action_empty_selection() {
        let handler = handler();
        let mut request = AdminRequest::new(AdminUser::new(2, "ed"));
        let result = handler
            .run_action(&mut request, "activate_objects", &[])
            .await
            .unwrap();
        assert!(!result.success);
        let messages = request.messages.get_messages();
        assert_eq!(messages[0].level, MessageLevel::Warning);
        assert_eq!(messages[0].text, NO_SELECTION_MESSAGE);
    }

    #[tokio::test]
    async fn test_run_action_unknown_name() {
        let handler = handler();
        let mut request = AdminRequest::new(AdminUser::new(2, "ed"));
        let err = handler
            .run_action(&mut request, "nope", &["1".to_string()])
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_action_choices_and_debug() {
        let handler = handler();
        assert_eq!(
            handler.action_choices(),
            vec![
                ("delete_selected".to_string(), "Delete selected pages".to_string()),
                (
                    "activate_objects".to_string(),
                    "Mark selected objects as active".to_string()
                ),
            ]
        );
        let debug = format!("{handler:?}");
        assert!(debug.contains("pages.page"));
    }

    #[test]
    fn test_message_user() {
        let handler = handler();
        let mut request = AdminRequest::new(AdminUser::new(2, "ed"));
        handler.message_user(&mut request, MessageLevel::Success, "ok");
        assert_eq!(request.messages.len(), 1);
    }
}
