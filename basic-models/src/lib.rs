//! # basic-models
//!
//! Admin helpers for Django-style model admins.
//!
//! This is the meta-crate that re-exports the sub-crates. Depend on
//! `basic-models` for everything, or on the individual crates for
//! finer-grained control.
//!
//! ```
//! use std::sync::Arc;
//! use basic_models::prelude::*;
//!
//! let handler = presets::slug_model_admin(
//!     ModelAdmin::new("pages", "page"),
//!     Arc::new(InMemoryRecordStore::new()),
//!     &AdminSettings::default(),
//! );
//! assert!(handler.save_on_top());
//! ```

/// Errors, settings, logging, translations and text helpers.
pub use basic_models_core as core;

/// Model-admin handlers, actions and presets.
#[cfg(feature = "admin")]
pub use basic_models_admin as admin;

// Third-party re-exports
pub use async_trait::async_trait;
pub use serde_json;
pub use tracing;

/// Commonly used types.
pub mod prelude {
    pub use basic_models_core::i18n::{gettext, gettext_lazy, ngettext, LazyString};
    pub use basic_models_core::{AdminSettings, BasicModelsError, BasicModelsResult, Settings};

    #[cfg(feature = "admin")]
    pub use basic_models_admin::{
        actions::{ActionRegistry, ActionResult, AdminAction},
        audit::AuditFields,
        clone::{FieldCopyCloner, RecordCloner},
        formset::{InlineForm, InlineFormset},
        messages::MessageLevel,
        model_admin::FieldSchema,
        presets,
        request::{AdminRequest, AdminUser},
        InMemoryRecordStore, ModelAdmin, ModelAdminHandler, Record, RecordStore,
    };
}
