//! The form-builder composition root.
//!
//! `FormBuilder` owns one editing session: the committed draft, both editors,
//! the error report and the submission controller. It keeps the per-question
//! slots of all of them index-aligned with the question list.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::checkbox_options::CheckboxOptionEditor;
use crate::draft::{BasicField, FormDraft, QuestionEdit};
use crate::error::EditorError;
use crate::model::Form;
use crate::score_ranges::{RangeField, ScoreRangeEditor};
use crate::submission::{SubmissionController, SubmitOutcome};
use crate::traits::FormsApi;
use crate::validation::{self, FormErrors, Validation};

#[derive(Debug)]
pub struct FormBuilder {
    draft: FormDraft,
    ranges: ScoreRangeEditor,
    options: CheckboxOptionEditor,
    errors: FormErrors,
    submission: SubmissionController,
}

impl Default for FormBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FormBuilder {
    /// A new session seeded with the two default score questions.
    pub fn new() -> Self {
        Self::from_draft(FormDraft::seeded())
    }

    /// Hydrate a session from a persisted form.
    pub fn from_form(form: Form) -> Self {
        Self::from_draft(FormDraft::from(form))
    }

    fn from_draft(draft: FormDraft) -> Self {
        Self {
            ranges: ScoreRangeEditor::for_questions(&draft.questions),
            options: CheckboxOptionEditor::for_questions(&draft.questions),
            errors: FormErrors::for_questions(draft.questions.len()),
            submission: SubmissionController::new(),
            draft,
        }
    }

    /// Fetch form `id` and hydrate a session from it.
    ///
    /// A missing form surfaces as a `StoreError::NotFound` in the error chain.
    pub async fn load(api: &dyn FormsApi, id: &str) -> Result<Self> {
        let form = api
            .get_form(id)
            .await
            .with_context(|| format!("failed to load form {id}"))?;
        info!(id, questions = form.questions.len(), "hydrated form builder");
        Ok(Self::from_form(form))
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn score_ranges(&self) -> &ScoreRangeEditor {
        &self.ranges
    }

    pub fn checkbox_options(&self) -> &CheckboxOptionEditor {
        &self.options
    }

    pub fn is_submitting(&self) -> bool {
        self.submission.is_submitting()
    }

    pub fn api_error(&self) -> Option<String> {
        self.submission.api_error()
    }

    // -----------------------------------------------------------------------
    // Form-field state
    // -----------------------------------------------------------------------

    /// Set name or description and refresh that field's error.
    pub fn change_basic_info(&mut self, field: BasicField, value: impl Into<String>) {
        let value = value.into();
        match field {
            BasicField::Name => {
                self.errors.name = validation::required_text(&value, validation::NAME_REQUIRED);
            }
            BasicField::Description => {
                self.errors.description =
                    validation::required_text(&value, validation::DESCRIPTION_REQUIRED);
            }
        }
        self.draft.change_basic_info(field, value);
    }

    /// Apply one question edit. A kind switch also reseeds the question's
    /// editor slots; title and description edits refresh their error.
    pub fn change_question_field(
        &mut self,
        index: usize,
        edit: QuestionEdit,
    ) -> Result<(), EditorError> {
        let live_error = match &edit {
            QuestionEdit::Title(value) => Some((
                true,
                validation::required_text(value, validation::TITLE_REQUIRED),
            )),
            QuestionEdit::Description(value) => Some((
                false,
                validation::required_text(value, validation::QUESTION_DESCRIPTION_REQUIRED),
            )),
            _ => None,
        };
        let kind_switch = matches!(edit, QuestionEdit::Kind(_));

        self.draft.change_question_field(index, edit)?;

        if kind_switch {
            self.ranges.reset_question(index);
            self.options.reset_question(index);
        }
        if let (Some((is_title, message)), Some(slot)) =
            (live_error, self.errors.questions.get_mut(index))
        {
            if is_title {
                slot.title = message;
            } else {
                slot.description = message;
            }
        }
        Ok(())
    }

    pub fn add_question(&mut self) {
        self.draft.add_question();
        self.ranges.push_question();
        self.options.push_question();
        self.errors.questions.push(Default::default());
    }

    /// Remove a question and its editor and error slots. Returns `false`
    /// when it is the only question left.
    pub fn remove_question(&mut self, index: usize) -> Result<bool, EditorError> {
        if !self.draft.remove_question(index)? {
            return Ok(false);
        }
        self.ranges.remove_question(index);
        self.options.remove_question(index);
        if index < self.errors.questions.len() {
            self.errors.questions.remove(index);
        }
        debug!(index, remaining = self.draft.questions.len(), "removed question");
        Ok(true)
    }

    /// Start over with one blank question; the next save creates a new form.
    pub fn reset(&mut self) {
        *self = Self::from_draft(FormDraft::blank());
    }

    // -----------------------------------------------------------------------
    // Score ranges
    // -----------------------------------------------------------------------

    pub fn set_range_field(
        &mut self,
        q: usize,
        r: usize,
        field: RangeField,
        value: &str,
    ) -> Result<(), EditorError> {
        self.ranges
            .set_range_field(&mut self.draft.questions, q, r, field, value)
    }

    pub fn commit_range_on_blur(
        &mut self,
        q: usize,
        r: usize,
        field: RangeField,
    ) -> Result<(), EditorError> {
        self.ranges
            .commit_on_blur(&mut self.draft.questions, q, r, field)
    }

    pub fn add_range(&mut self, q: usize) -> Result<(), EditorError> {
        self.ranges.add_range(&mut self.draft.questions, q)
    }

    /// Remove range `r`; the first range of a question is never removable.
    pub fn remove_range(&mut self, q: usize, r: usize) -> Result<bool, EditorError> {
        if r == 0 {
            return Ok(false);
        }
        self.ranges.remove_range(&mut self.draft.questions, q, r)?;
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Checkbox options
    // -----------------------------------------------------------------------

    pub fn edit_pending_option(
        &mut self,
        q: usize,
        o: usize,
        value: impl Into<String>,
    ) -> Result<(), EditorError> {
        self.options.edit_pending_option(q, o, value)
    }

    pub fn commit_options(&mut self, q: usize) -> Result<(), EditorError> {
        self.options.commit_options(&mut self.draft.questions, q)
    }

    pub fn remove_committed_option(&mut self, q: usize, o: usize) -> Result<(), EditorError> {
        self.options
            .remove_committed_option(&mut self.draft.questions, q, o)
    }

    pub fn remove_pending_option(&mut self, q: usize, o: usize) -> Result<(), EditorError> {
        self.options.remove_pending_option(q, o)
    }

    pub fn toggle_option(&mut self, q: usize, o: usize) -> Result<bool, EditorError> {
        self.options.toggle_option(q, o)
    }

    // -----------------------------------------------------------------------
    // Validation and submission
    // -----------------------------------------------------------------------

    /// Validate and overwrite the error report with the result.
    pub fn validate(&mut self) -> bool {
        let result = self.run_validation();
        let is_valid = result.is_valid;
        self.errors = result.errors;
        is_valid
    }

    fn run_validation(&self) -> Validation {
        validation::validate(&self.draft, self.ranges.inputs(), self.options.pending())
    }

    /// Validate, then create or update through `api`.
    pub async fn submit(&mut self, api: &dyn FormsApi) -> SubmitOutcome {
        let result = self.run_validation();
        self.errors = result.errors.clone();
        self.submission
            .submit(&result, &self.draft, self.options.pending(), api)
            .await
    }
}
