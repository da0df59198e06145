//! Ready-made handler configurations.
//!
//! Each preset takes the model's own [`ModelAdmin`] (app label, model name,
//! field schema) and layers the shared behaviour on top:
//!
//! | Preset | Adds |
//! |---|---|
//! | [`user_model_admin`] | audit stamping, `created_by`/`updated_by` read-only |
//! | [`default_model_admin`] | the above with timestamps read-only, activate/deactivate actions |
//! | [`slug_model_admin`] | the above with `slug` prepopulated from `name` |
//! | [`one_active_admin`] | preview change form, `duplicate` action |

use std::sync::Arc;

use serde_json::Value;

use basic_models_core::AdminSettings;

use crate::actions::{DuplicateAction, SetActiveAction};
use crate::audit::AuditFields;
use crate::clone::FieldCopyCloner;
use crate::handler::ModelAdminHandler;
use crate::model_admin::ModelAdmin;
use crate::store::RecordStore;

/// Audited admin: stamps `created_by` and `updated_by` and shows them read-only.
///
/// Both fields are stamped whether or not the schema declares them.
pub fn user_model_admin(
    admin: ModelAdmin,
    store: Arc<dyn RecordStore>,
    settings: &AdminSettings,
) -> ModelAdminHandler {
    let admin = admin.save_on_top(settings.save_on_top).readonly_fields(vec![
        settings.created_by_field.as_str(),
        settings.updated_by_field.as_str(),
    ]);
    ModelAdminHandler::new(admin, store)
        .with_audit(AuditFields::from_settings(settings).unconditional())
}

/// Audited admin with read-only timestamps and activate/deactivate actions.
///
/// Only audit fields the model has are stamped.
pub fn default_model_admin(
    admin: ModelAdmin,
    store: Arc<dyn RecordStore>,
    settings: &AdminSettings,
) -> ModelAdminHandler {
    let admin = admin.save_on_top(settings.save_on_top).readonly_fields(vec![
        settings.created_at_field.as_str(),
        settings.created_by_field.as_str(),
        settings.updated_at_field.as_str(),
        settings.updated_by_field.as_str(),
    ]);
    ModelAdminHandler::new(admin, store)
        .with_audit(AuditFields::from_settings(settings))
        .with_action(Box::new(SetActiveAction::activate(&settings.active_field)))
        .with_action(Box::new(SetActiveAction::deactivate(&settings.active_field)))
}

/// [`default_model_admin`] for models with a `slug` derived from `name`.
pub fn slug_model_admin(
    admin: ModelAdmin,
    store: Arc<dyn RecordStore>,
    settings: &AdminSettings,
) -> ModelAdminHandler {
    let admin = admin
        .prepopulate("slug", vec!["name"])
        .list_display(vec!["slug", "name"]);
    default_model_admin(admin, store, settings)
}

/// Admin for models where one record at a time is active.
///
/// Duplicates are saved inactive. Use [`ModelAdminHandler::with_cloner`] to
/// replace the clone operation.
pub fn one_active_admin(
    admin: ModelAdmin,
    store: Arc<dyn RecordStore>,
    settings: &AdminSettings,
) -> ModelAdminHandler {
    let admin = admin
        .save_on_top(settings.save_on_top)
        .list_display(vec!["__str__", settings.active_field.as_str()])
        .change_form_template(settings.one_active_change_form_template.as_str());
    let cloner = FieldCopyCloner::new().override_field(&settings.active_field, Value::Bool(false));
    ModelAdminHandler::new(admin, store)
        .with_cloner(Arc::new(cloner))
        .with_action(Box::new(DuplicateAction))
}
