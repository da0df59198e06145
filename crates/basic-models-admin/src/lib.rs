//! # basic-models-admin
//!
//! Customizations for Django-style model admins. A [`handler::ModelAdminHandler`]
//! wraps a model's [`model_admin::ModelAdmin`] configuration and is what the
//! host admin calls on save and when a bulk action is submitted.
//!
//! ## Modules
//!
//! - [`record`] - Field-map records exchanged with the host
//! - [`model_admin`] - Per-model admin configuration and field schema
//! - [`store`] - The [`store::RecordStore`] persistence contract and an in-memory store
//! - [`audit`] - `created_by` / `updated_by` stamping
//! - [`prepopulate`] - Server-side slug prepopulation
//! - [`clone`] - Clone operations used by the duplicate action
//! - [`formset`] - Inline formsets and their many-to-many save phase
//! - [`actions`] - Bulk actions and the action registry
//! - [`messages`] - Operator messages
//! - [`request`] - The acting user and per-request message storage
//! - [`handler`] - The model-admin extension contract
//! - [`presets`] - `user_model_admin`, `default_model_admin`, `slug_model_admin`, `one_active_admin`

pub mod actions;
pub mod audit;
pub mod clone;
pub mod formset;
pub mod handler;
pub mod messages;
pub mod model_admin;
pub mod prepopulate;
pub mod presets;
pub mod record;
pub mod request;
pub mod store;

pub use handler::ModelAdminHandler;
pub use model_admin::ModelAdmin;
pub use record::Record;
pub use store::{InMemoryRecordStore, RecordStore};
