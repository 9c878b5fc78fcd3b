//! The persistence seam used by the editing engine.
//!
//! `FormsApi` is implemented in-process by `FormRepository` and over HTTP by
//! `formcraft-client`. Failures are `anyhow` errors wrapping a
//! [`StoreError`](crate::error::StoreError) so callers can classify them.

use async_trait::async_trait;

use crate::model::Form;

/// CRUD access to persisted forms.
#[async_trait]
pub trait FormsApi: Send + Sync {
    /// Human-readable backend name (e.g. "memory", "http").
    fn name(&self) -> &str;

    /// All forms in insertion order.
    async fn list_forms(&self) -> anyhow::Result<Vec<Form>>;

    /// Fetch one form by identifier.
    async fn get_form(&self, id: &str) -> anyhow::Result<Form>;

    /// Create a form; the backend assigns its identifier.
    async fn create_form(&self, form: &Form) -> anyhow::Result<Form>;

    /// Replace the form stored under `id`.
    async fn update_form(&self, id: &str, form: &Form) -> anyhow::Result<Form>;

    /// Delete the form stored under `id`.
    async fn delete_form(&self, id: &str) -> anyhow::Result<()>;
}
