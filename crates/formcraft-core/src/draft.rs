//! Form-editing state.
//!
//! `FormDraft` mirrors the persisted `Form` with editing-side names. It holds
//! the *committed* values used for validation and submission; the pending
//! input buffers live in the score-range and checkbox-option editors.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EditorError;
use crate::model::{Form, QuestionKind, ScoreRange};

const DEFAULT_QUESTION_BODY: &str =
    "Select a number from the range that most closely relates to your situation";

/// Top-level fields editable through `change_basic_info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicField {
    Name,
    Description,
}

/// One field edit on a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionEdit {
    Title(String),
    Description(String),
    /// Switching kind resets the kind-specific payload and both flags.
    Kind(QuestionKind),
    Required(bool),
    HasComments(bool),
}

/// Editing-state form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDraft {
    /// Empty for a form that has never been saved.
    pub id: String,
    pub name: String,
    pub description: String,
    pub questions: Vec<QuestionDraft>,
}

/// Editing-state question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: QuestionKind,
    pub score_ranges: Option<Vec<ScoreRange>>,
    pub checkbox_options: Option<Vec<String>>,
    pub is_required: bool,
    pub has_comments: bool,
}

impl QuestionDraft {
    /// A fresh score question with one default range.
    pub fn new_score(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            kind: QuestionKind::Score,
            score_ranges: Some(vec![ScoreRange::numbered(1)]),
            checkbox_options: None,
            is_required: false,
            has_comments: false,
        }
    }

    fn apply(&mut self, edit: QuestionEdit) {
        match edit {
            QuestionEdit::Title(value) => self.title = value,
            QuestionEdit::Description(value) => self.description = value,
            QuestionEdit::Required(value) => self.is_required = value,
            QuestionEdit::HasComments(value) => self.has_comments = value,
            QuestionEdit::Kind(kind) => {
                self.kind = kind;
                match kind {
                    QuestionKind::Score => {
                        self.score_ranges = Some(vec![ScoreRange::numbered(1)]);
                        self.checkbox_options = None;
                    }
                    QuestionKind::Checkbox => {
                        self.score_ranges = None;
                        self.checkbox_options = Some(Vec::new());
                    }
                }
                // Flags are cleared on every kind switch.
                self.is_required = false;
                self.has_comments = false;
            }
        }
    }
}

impl FormDraft {
    /// The state a new builder starts from: two seeded score questions.
    pub fn seeded() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            questions: vec![
                QuestionDraft::new_score("Housing", DEFAULT_QUESTION_BODY),
                QuestionDraft::new_score("Dosing Consistency", DEFAULT_QUESTION_BODY),
            ],
        }
    }

    /// A blank form with a single empty question, used by reset.
    pub fn blank() -> Self {
        Self {
            questions: vec![QuestionDraft::new_score("", "")],
            ..Self::default()
        }
    }

    pub fn change_basic_info(&mut self, field: BasicField, value: impl Into<String>) {
        match field {
            BasicField::Name => self.name = value.into(),
            BasicField::Description => self.description = value.into(),
        }
    }

    pub fn change_question_field(
        &mut self,
        index: usize,
        edit: QuestionEdit,
    ) -> Result<(), EditorError> {
        self.question_mut(index)?.apply(edit);
        Ok(())
    }

    /// Append a default score question at the end.
    pub fn add_question(&mut self) {
        self.questions.push(QuestionDraft::new_score("", ""));
    }

    /// Remove question `index`. Returns `false` (and leaves the draft alone)
    /// when it is the last remaining question.
    pub fn remove_question(&mut self, index: usize) -> Result<bool, EditorError> {
        self.question_mut(index)?;
        if self.questions.len() <= 1 {
            return Ok(false);
        }
        self.questions.remove(index);
        Ok(true)
    }

    pub fn question_mut(&mut self, index: usize) -> Result<&mut QuestionDraft, EditorError> {
        let len = self.questions.len();
        self.questions
            .get_mut(index)
            .ok_or(EditorError::QuestionOutOfRange { index, len })
    }
}

impl From<Form> for FormDraft {
    fn from(form: Form) -> Self {
        Self {
            id: form.id,
            name: form.form_name,
            description: form.description,
            questions: form
                .questions
                .into_iter()
                .map(|q| QuestionDraft {
                    id: q.id,
                    title: q.title,
                    description: q.question_text,
                    kind: q.question_type,
                    score_ranges: q.score_ranges,
                    checkbox_options: q.options,
                    is_required: q.required,
                    has_comments: q.comment_required,
                })
                .collect(),
        }
    }
}
