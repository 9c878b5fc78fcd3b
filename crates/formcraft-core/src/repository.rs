//! In-memory form repository.
//!
//! An explicitly owned store: construct it once at process start and share it
//! through an `Arc`. Nothing survives a restart. Concurrent writers are not
//! coordinated beyond the lock; the last update or delete wins.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::Form;
use crate::traits::FormsApi;

#[derive(Debug, Default)]
pub struct FormRepository {
    forms: RwLock<Vec<Form>>,
}

impl FormRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.forms.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn list(&self) -> Vec<Form> {
        self.forms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn get(&self, id: &str) -> Result<Form, StoreError> {
        self.forms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|form| form.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Store a new form under a fresh identifier. Questions without an
    /// identifier get one too.
    pub fn create(&self, form: Form) -> Result<Form, StoreError> {
        let mut form = form.into_checked()?;
        form.id = Uuid::new_v4().to_string();
        assign_question_ids(&mut form);

        self.forms
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(form.clone());
        info!(id = %form.id, questions = form.questions.len(), "created form");
        Ok(form)
    }

    /// Overwrite the form stored under `id`; the stored identifier is always
    /// `id`, whatever the payload says.
    pub fn update(&self, id: &str, form: Form) -> Result<Form, StoreError> {
        let mut form = form.into_checked()?;
        form.id = id.to_string();
        assign_question_ids(&mut form);

        let mut forms = self.forms.write().unwrap_or_else(PoisonError::into_inner);
        let slot = forms
            .iter_mut()
            .find(|existing| existing.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        *slot = form.clone();
        info!(id, "updated form");
        Ok(form)
    }

    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut forms = self.forms.write().unwrap_or_else(PoisonError::into_inner);
        let position = forms
            .iter()
            .position(|form| form.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        forms.remove(position);
        info!(id, "deleted form");
        Ok(())
    }
}

fn assign_question_ids(form: &mut Form) {
    for question in form.questions.iter_mut().filter(|q| q.id.is_empty()) {
        question.id = Uuid::new_v4().to_string();
    }
}

#[async_trait]
impl FormsApi for FormRepository {
    fn name(&self) -> &str {
        "memory"
    }

    async fn list_forms(&self) -> anyhow::Result<Vec<Form>> {
        Ok(self.list())
    }

    async fn get_form(&self, id: &str) -> anyhow::Result<Form> {
        Ok(self.get(id)?)
    }

    async fn create_form(&self, form: &Form) -> anyhow::Result<Form> {
        Ok(self.create(form.clone())?)
    }

    async fn update_form(&self, id: &str, form: &Form) -> anyhow::Result<Form> {
        Ok(self.update(id, form.clone())?)
    }

    async fn delete_form(&self, id: &str) -> anyhow::Result<()> {
        Ok(self.delete(id)?)
    }
}
