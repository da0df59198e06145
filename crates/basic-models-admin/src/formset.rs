//! Inline formsets: a set of related records edited on a parent's change page.
//!
//! Saving a formset happens in two phases. The handler first takes the edited
//! instances, stamps and saves each one; only then can the formset's pending
//! many-to-many assignments be written, because a new instance has no primary
//! key until it is saved. [`InlineFormset::save_m2m`] is that second phase.

use serde_json::Value;
use tracing::debug;

use basic_models_core::{BasicModelsError, BasicModelsResult};

use crate::model_admin::ModelAdmin;
use crate::record::Record;
use crate::store::RecordStore;

/// One edited inline form: the instance and its pending many-to-many values.
#[derive(Debug, Clone, Default)]
pub struct InlineForm {
    /// The (possibly new) record edited by this form.
    pub instance: Record,
    /// Many-to-many assignments to apply after the instance is saved.
    pub m2m: Vec<(String, Vec<Value>)>,
}

impl InlineForm {
    /// Creates a form for `instance` with no many-to-many data.
    pub fn new(instance: Record) -> Self {
        Self {
            instance,
            m2m: Vec::new(),
        }
    }

    /// Adds a pending many-to-many assignment.
    #[must_use]
    pub fn related(mut self, field: impl Into<String>, values: Vec<Value>) -> Self {
        self.m2m.push((field.into(), values));
        self
    }
}

/// A set of inline-edited records of one model.
///
/// # Examples
///
/// ```
/// use basic_models_admin::formset::{InlineForm, InlineFormset};
/// use basic_models_admin::model_admin::ModelAdmin;
/// use basic_models_admin::record::Record;
/// use serde_json::json;
///
/// let formset = InlineFormset::new(ModelAdmin::new("pages", "section"))
///     .form(InlineForm::new(Record::from_value(json!({"title": "Intro"})).unwrap()))
///     .form(InlineForm::new(Record::from_value(json!({"title": "Body"})).unwrap()));
///
/// assert_eq!(formset.instances().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct InlineFormset {
    /// Configuration of the inline model.
    pub admin: ModelAdmin,
    /// The edited forms, in display order.
    pub forms: Vec<InlineForm>,
}

impl InlineFormset {
    /// Creates an empty formset for the inline model `admin`.
    pub const fn new(admin: ModelAdmin) -> Self {
        Self {
            admin,
            forms: Vec::new(),
        }
    }

    /// Appends an edited form.
    #[must_use]
    pub fn form(mut self, form: InlineForm) -> Self {
        self.forms.push(form);
        self
    }

    /// Returns the edited instances without saving them.
    pub fn instances(&self) -> Vec<Record> {
        self.forms.iter().map(|f| f.instance.clone()).collect()
    }

    /// Writes pending many-to-many assignments for the saved instances.
    ///
    /// `saved` must hold the stored version of each instance, in form order.
    pub async fn save_m2m(
        &self,
        store: &dyn RecordStore,
        saved: &[Record],
    ) -> BasicModelsResult<()> {
        if saved.len() != self.forms.len() {
            return Err(BasicModelsError::IntegrityError(format!(
                "formset for {} has {} forms but {} saved instances",
                self.admin.model_key(),
                self.forms.len(),
                saved.len()
            )));
        }

        let pk_field = self.admin.pk_field();
        for (form, instance) in self.forms.iter().zip(saved) {
            if form.m2m.is_empty() {
                continue;
            }
            let pk = instance.pk(pk_field).ok_or_else(|| {
                BasicModelsError::IntegrityError(format!(
                    "{} instance has no primary key after save",
                    self.admin.model_key()
                ))
            })?;
            for (field, values) in &form.m2m {
                store.set_related(&self.admin, &pk, field, values).await?;
                debug!(model = %self.admin.model_key(), %pk, %field, "saved many-to-many");
            }
        }
        Ok(())
    }
}
