//! Checkbox-option editor.
//!
//! Tracks, per question, the pending text inputs for options that have not
//! been committed yet and one selection flag per committed option.

use tracing::debug;

use crate::draft::QuestionDraft;
use crate::error::EditorError;

/// Pending option inputs and selection flags, one slot per question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckboxOptionEditor {
    selections: Vec<Vec<bool>>,
    pending: Vec<Vec<String>>,
}

impl CheckboxOptionEditor {
    /// Seed from committed options: pending becomes `[options..., ""]` and
    /// every selection flag starts unset.
    pub fn for_questions(questions: &[QuestionDraft]) -> Self {
        let mut editor = Self::default();
        for question in questions {
            let committed = question.checkbox_options.clone().unwrap_or_default();
            editor.selections.push(vec![false; committed.len()]);
            editor.pending.push(with_trailing_slot(committed));
        }
        editor
    }

    pub fn pending(&self) -> &[Vec<String>] {
        &self.pending
    }

    pub fn selections(&self) -> &[Vec<bool>] {
        &self.selections
    }

    pub fn push_question(&mut self) {
        self.selections.push(Vec::new());
        self.pending.push(vec![String::new()]);
    }

    pub fn remove_question(&mut self, q: usize) {
        if q < self.pending.len() {
            self.pending.remove(q);
        }
        if q < self.selections.len() {
            self.selections.remove(q);
        }
    }

    pub fn reset_question(&mut self, q: usize) {
        if let Some(slot) = self.pending.get_mut(q) {
            *slot = vec![String::new()];
        }
        if let Some(flags) = self.selections.get_mut(q) {
            flags.clear();
        }
    }

    pub fn edit_pending_option(
        &mut self,
        q: usize,
        o: usize,
        value: impl Into<String>,
    ) -> Result<(), EditorError> {
        let slot = slot_mut(&mut self.pending, q)?;
        let len = slot.len();
        let input = slot.get_mut(o).ok_or(EditorError::OptionOutOfRange {
            question: q,
            index: o,
            len,
        })?;
        *input = value.into();
        Ok(())
    }

    /// Fold the pending inputs into the question's committed options.
    pub fn commit_options(
        &mut self,
        questions: &mut [QuestionDraft],
        q: usize,
    ) -> Result<(), EditorError> {
        let question = question_mut(questions, q)?;
        let pending = slot_mut(&mut self.pending, q)?;
        let committed: Vec<String> = pending
            .iter()
            .map(|input| input.trim())
            .filter(|input| !input.is_empty())
            .map(str::to_string)
            .collect();

        debug!(question = q, options = committed.len(), "committed checkbox options");
        *pending = with_trailing_slot(committed.clone());
        let flags = slot_mut(&mut self.selections, q)?;
        *flags = vec![false; committed.len()];
        question.checkbox_options = Some(committed);
        Ok(())
    }

    /// Drop a committed option together with its selection flag and the
    /// pending input at the same position.
    pub fn remove_committed_option(
        &mut self,
        questions: &mut [QuestionDraft],
        q: usize,
        o: usize,
    ) -> Result<(), EditorError> {
        let question = question_mut(questions, q)?;
        match question.checkbox_options.as_mut() {
            Some(options) if o < options.len() => {
                options.remove(o);
            }
            other => {
                return Err(EditorError::OptionOutOfRange {
                    question: q,
                    index: o,
                    len: other.map_or(0, |options| options.len()),
                });
            }
        }

        let flags = slot_mut(&mut self.selections, q)?;
        if o < flags.len() {
            flags.remove(o);
        }
        let pending = slot_mut(&mut self.pending, q)?;
        if o < pending.len() {
            pending.remove(o);
        }
        Ok(())
    }

    /// Drop one pending input slot.
    pub fn remove_pending_option(&mut self, q: usize, o: usize) -> Result<(), EditorError> {
        let slot = slot_mut(&mut self.pending, q)?;
        if o >= slot.len() {
            return Err(EditorError::OptionOutOfRange {
                question: q,
                index: o,
                len: slot.len(),
            });
        }
        slot.remove(o);
        Ok(())
    }

    /// Flip the selection flag of a committed option; returns the new state.
    pub fn toggle_option(&mut self, q: usize, o: usize) -> Result<bool, EditorError> {
        let flags = slot_mut(&mut self.selections, q)?;
        let len = flags.len();
        let flag = flags.get_mut(o).ok_or(EditorError::OptionOutOfRange {
            question: q,
            index: o,
            len,
        })?;
        *flag = !*flag;
        Ok(*flag)
    }
}

fn with_trailing_slot(mut options: Vec<String>) -> Vec<String> {
    options.push(String::new());
    options
}

fn slot_mut<T>(slots: &mut [Vec<T>], q: usize) -> Result<&mut Vec<T>, EditorError> {
    let len = slots.len();
    slots
        .get_mut(q)
        .ok_or(EditorError::QuestionOutOfRange { index: q, len })
}

fn question_mut(
    questions: &mut [QuestionDraft],
    q: usize,
) -> Result<&mut QuestionDraft, EditorError> {
    let len = questions.len();
    questions
        .get_mut(q)
        .ok_or(EditorError::QuestionOutOfRange { index: q, len })
}
