//! formcraft-core — Form model, editing engine, validation and storage.
//!
//! This crate defines the persisted form model, the client-side editing
//! state with its score-range and checkbox-option editors, the validator,
//! the submission controller, and the in-memory repository that backs the
//! REST API.

pub mod builder;
pub mod checkbox_options;
pub mod config;
pub mod draft;
pub mod error;
pub mod model;
pub mod repository;
pub mod score_ranges;
pub mod submission;
pub mod traits;
pub mod validation;

pub use builder::FormBuilder;
pub use error::{EditorError, StoreError};
pub use model::{Form, Question, QuestionKind, ScoreRange};
pub use repository::FormRepository;
pub use traits::FormsApi;
