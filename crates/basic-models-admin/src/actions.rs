//! Admin actions for bulk operations on selected records.
//!
//! This module provides the [`AdminAction`] trait, the [`ActionRegistry`]
//! each handler owns, and the built-in actions:
//!
//! - [`DeleteSelectedAction`] (`delete_selected`), registered by default;
//! - [`SetActiveAction`] (`activate_objects` / `deactivate_objects`);
//! - [`DuplicateAction`] (`duplicate`).

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use basic_models_core::i18n::{self, LazyString};
use basic_models_core::utils::text::interpolate;
use basic_models_core::{BasicModelsError, BasicModelsResult};

use crate::clone::RecordCloner;
use crate::messages::MessageLevel;
use crate::model_admin::ModelAdmin;
use crate::request::AdminRequest;
use crate::store::RecordStore;

/// The result of executing an admin action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    /// Whether the action completed successfully.
    pub success: bool,
    /// A message describing the outcome (may be empty).
    pub message: String,
    /// The number of records affected by the action.
    pub affected_count: usize,
}

impl ActionResult {
    /// Creates a successful action result.
    pub fn success(message: impl Into<String>, affected_count: usize) -> Self {
        Self {
            success: true,
            message: message.into(),
            affected_count,
        }
    }

    /// Creates a failed action result.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            affected_count: 0,
        }
    }
}

/// Everything an action may touch while it runs.
pub struct ActionContext<'a> {
    /// The current request (acting user and operator messages).
    pub request: &'a mut AdminRequest,
    /// Configuration of the model the selection belongs to.
    pub admin: &'a ModelAdmin,
    /// The store holding the selected records.
    pub store: &'a dyn RecordStore,
    /// The model's clone operation, if it has one.
    pub cloner: Option<&'a dyn RecordCloner>,
}

impl ActionContext<'_> {
    /// Adds an operator message to the current request.
    pub fn message_user(&mut self, level: MessageLevel, text: impl Into<String>) {
        self.request.message(level, text);
    }
}

impl std::fmt::Debug for ActionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionContext")
            .field("user", &self.request.user.username)
            .field("model", &self.admin.model_key())
            .field("has_cloner", &self.cloner.is_some())
            .finish_non_exhaustive()
    }
}

/// An operation the operator can run on the records selected in the list view.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use basic_models_admin::actions::{ActionContext, ActionResult, AdminAction};
/// use basic_models_core::i18n::LazyString;
/// use basic_models_core::BasicModelsResult;
///
/// struct ArchiveAction;
///
/// #[async_trait]
/// impl AdminAction for ArchiveAction {
///     fn name(&self) -> &str { "archive" }
///     fn description(&self) -> LazyString { LazyString::from("Archive selected %(verbose_name_plural)s") }
///     async fn execute(
///         &self,
///         _ctx: &mut ActionContext<'_>,
///         selected: &[String],
///     ) -> BasicModelsResult<ActionResult> {
///         Ok(ActionResult::success("", selected.len()))
///     }
/// }
/// ```
#[async_trait]
pub trait AdminAction: Send + Sync {
    /// Returns the unique identifier for this action.
    fn name(&self) -> &str;

    /// Returns the untranslated label, which may contain `%(verbose_name)s`
    /// and `%(verbose_name_plural)s`.
    fn description(&self) -> LazyString;

    /// Returns the label shown in the action dropdown for `admin`.
    fn label(&self, admin: &ModelAdmin) -> String {
        let mut params = HashMap::new();
        params.insert("verbose_name", admin.verbose_name.clone());
        params.insert("verbose_name_plural", admin.verbose_name_plural.clone());
        interpolate(&self.description().evaluate(), &params)
    }

    /// Executes the action on the selected primary keys.
    async fn execute(
        &self,
        ctx: &mut ActionContext<'_>,
        selected: &[String],
    ) -> BasicModelsResult<ActionResult>;
}

/// Builds the operator message for a bulk activation change.
///
/// # Examples
///
/// ```
/// use basic_models_admin::actions::marked_message;
///
/// assert_eq!(marked_message(1, true), "1 object was marked as active.");
/// assert_eq!(marked_message(3, false), "3 objects were marked as inactive.");
/// ```
pub fn marked_message(count: usize, active: bool) -> String {
    let template = if active {
        i18n::ngettext(
            "%(count)s object was marked as active.",
            "%(count)s objects were marked as active.",
            count as u64,
        )
    } else {
        i18n::ngettext(
            "%(count)s object was marked as inactive.",
            "%(count)s objects were marked as inactive.",
            count as u64,
        )
    };
    let mut params = HashMap::new();
    params.insert("count", count.to_string());
    interpolate(&template, &params)
}

/// Built-in action that deletes the selected records.
///
/// Registered by default on every handler.
#[derive(Debug)]
pub struct DeleteSelectedAction;

#[async_trait]
impl AdminAction for DeleteSelectedAction {
    fn name(&self) -> &'static str {
        "delete_selected"
    }

    fn description(&self) -> LazyString {
        i18n::gettext_lazy("Delete selected %(verbose_name_plural)s")
    }

    async fn execute(
        &self,
        ctx: &mut ActionContext<'_>,
        selected: &[String],
    ) -> BasicModelsResult<ActionResult> {
        let count = ctx.store.delete_many(ctx.admin, selected).await?;

        let mut params = HashMap::new();
        params.insert("count", count.to_string());
        params.insert(
            "items",
            i18n::ngettext(
                &ctx.admin.verbose_name,
                &ctx.admin.verbose_name_plural,
                count as u64,
            ),
        );
        let message = interpolate(
            &i18n::gettext("Successfully deleted %(count)s %(items)s."),
            &params,
        );
        ctx.message_user(MessageLevel::Success, message.clone());
        Ok(ActionResult::success(message, count))
    }
}

/// Bulk action setting the active flag on the selected records.
///
/// One bulk update is issued per run; the operator is told how many records
/// the store actually updated.
#[derive(Debug, Clone)]
pub struct SetActiveAction {
    active: bool,
    field: String,
}

impl SetActiveAction {
    /// `activate_objects`: sets `field` to `true`.
    pub fn activate(field: impl Into<String>) -> Self {
        Self {
            active: true,
            field: field.into(),
        }
    }

    /// `deactivate_objects`: sets `field` to `false`.
    pub fn deactivate(field: impl Into<String>) -> Self {
        Self {
            active: false,
            field: field.into(),
        }
    }

    /// The value this action writes.
    pub const fn active(&self) -> bool {
        self.active
    }

}

#[async_trait]
impl AdminAction for SetActiveAction {
    fn name(&self) -> &'static str {
        if self.active {
            "activate_objects"
        } else {
            "deactivate_objects"
        }
    }

    fn description(&self) -> LazyString {
        if self.active {
            i18n::gettext_lazy("Mark selected objects as active")
        } else {
            i18n::gettext_lazy("Mark selected objects as inactive")
        }
    }

    async fn execute(
        &self,
        ctx: &mut ActionContext<'_>,
        selected: &[String],
    ) -> BasicModelsResult<ActionResult> {
        let mut values = Map::new();
        values.insert(self.field.clone(), Value::Bool(self.active));
        let count = ctx.store.update_many(ctx.admin, selected, &values).await?;

        let message = marked_message(count, self.active);
        info!(model = %ctx.admin.model_key(), count, field = %self.field, active = self.active, "bulk update");
        ctx.message_user(MessageLevel::Info, message.clone());
        Ok(ActionResult::success(message, count))
    }
}

/// Bulk action invoking the model's clone operation once per selected record.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateAction;

#[async_trait]
impl AdminAction for DuplicateAction {
    fn name(&self) -> &'static str {
        "duplicate"
    }

    fn description(&self) -> LazyString {
        i18n::gettext_lazy("Duplicate selected %(verbose_name_plural)s")
    }

    async fn execute(
        &self,
        ctx: &mut ActionContext<'_>,
        selected: &[String],
    ) -> BasicModelsResult<ActionResult> {
        let cloner = ctx.cloner.ok_or_else(|| {
            BasicModelsError::ImproperlyConfigured(format!(
                "{} has no clone operation",
                ctx.admin.model_key()
            ))
        })?;

        let originals = ctx.store.fetch_many(ctx.admin, selected).await?;
        let mut cloned = 0;
        for original in &originals {
            cloner.clone_record(ctx.store, ctx.admin, original).await?;
            cloned += 1;
        }
        Ok(ActionResult::success(String::new(), cloned))
    }
}

/// The actions available on one model admin, in registration order.
pub struct ActionRegistry {
    actions: Vec<Box<dyn AdminAction>>,
}

impl ActionRegistry {
    /// Creates a registry holding the default `delete_selected` action.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(DeleteSelectedAction));
        registry
    }

    /// Creates an empty registry (no default actions).
    pub fn empty() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Registers an action, replacing any action with the same name.
    pub fn register(&mut self, action: Box<dyn AdminAction>) {
        if let Some(slot) = self.actions.iter_mut().find(|a| a.name() == action.name()) {
            *slot = action;
        } else {
            self.actions.push(action);
        }
    }

    /// Returns the action named `name`, if registered.
    pub fn get(&self, name: &str) -> Option<&dyn AdminAction> {
        self.actions
            .iter()
            .find(|a| a.name() == name)
            .map(Box::as_ref)
    }

    /// Returns the names of all registered actions.
    pub fn action_names(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.name()).collect()
    }

    /// Returns `(name, label)` pairs for the action dropdown of `admin`.
    pub fn choices(&self, admin: &ModelAdmin) -> Vec<(String, String)> {
        self.actions
            .iter()
            .map(|a| (a.name().to_string(), a.label(admin)))
            .collect()
    }

    /// Finds and executes an action by name.
    pub async fn execute(
        &self,
        name: &str,
        ctx: &mut ActionContext<'_>,
        selected: &[String],
    ) -> BasicModelsResult<ActionResult> {
        let action = self
            .get(name)
            .ok_or_else(|| BasicModelsError::NotFound(format!("Action '{name}'")))?;
        action.execute(ctx, selected).await
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.action_names())
            .finish()
    }
}
