//! Form validator.
//!
//! A pure function of the committed draft plus both editors' pending inputs.
//! Score ranges are checked on the pending list (what the user sees), and a
//! checkbox question passes when it has committed options or any non-blank
//! pending input.

use serde::Serialize;

use crate::draft::{FormDraft, QuestionDraft};
use crate::model::QuestionKind;
use crate::score_ranges::RangeInput;

pub const NAME_REQUIRED: &str = "Form Name is required";
pub const DESCRIPTION_REQUIRED: &str = "Form Description is required";
pub const TITLE_REQUIRED: &str = "Question Title is required";
pub const QUESTION_DESCRIPTION_REQUIRED: &str = "Question Description is required";
pub const SCORE_RANGES_INVALID: &str =
    "Score ranges must have valid start/end values (end > start, non-overlapping)";
pub const OPTIONS_REQUIRED: &str = "At least one checkbox option is required";

/// Error report mirroring the form shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// One slot per question, index-aligned with the question list.
    pub questions: Vec<QuestionErrors>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_ranges: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
}

impl QuestionErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.score_ranges.is_none()
            && self.options.is_none()
    }
}

impl FormErrors {
    /// An empty report with one slot per question.
    pub fn for_questions(count: usize) -> Self {
        Self {
            questions: vec![QuestionErrors::default(); count],
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.questions.iter().all(QuestionErrors::is_empty)
    }

    /// Iterate over every message as `(field path, message)`.
    pub fn messages(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        if let Some(msg) = &self.name {
            out.push(("name".to_string(), msg.as_str()));
        }
        if let Some(msg) = &self.description {
            out.push(("description".to_string(), msg.as_str()));
        }
        for (i, q) in self.questions.iter().enumerate() {
            let fields = [
                ("title", &q.title),
                ("description", &q.description),
                ("scoreRanges", &q.score_ranges),
                ("options", &q.options),
            ];
            for (field, msg) in fields {
                if let Some(msg) = msg {
                    out.push((format!("questions[{i}].{field}"), msg.as_str()));
                }
            }
        }
        out
    }
}

/// Result of a validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub errors: FormErrors,
    pub is_valid: bool,
}

/// `Some(message)` when `value` is blank after trimming.
pub fn required_text(value: &str, message: &str) -> Option<String> {
    value.trim().is_empty().then(|| message.to_string())
}

/// Ranges must each end above their start and begin above the previous end.
pub fn ranges_are_valid(ranges: &[RangeInput]) -> bool {
    let mut previous_max: Option<i64> = None;
    for range in ranges {
        let min = range.min.unwrap_or(0);
        let max = range.max.unwrap_or(0);
        if max <= min {
            return false;
        }
        if previous_max.is_some_and(|prev| min <= prev) {
            return false;
        }
        previous_max = Some(max);
    }
    true
}

fn has_checkbox_options(question: &QuestionDraft, pending: Option<&Vec<String>>) -> bool {
    let committed = question
        .checkbox_options
        .as_ref()
        .is_some_and(|options| !options.is_empty());
    committed || pending.is_some_and(|inputs| inputs.iter().any(|opt| !opt.trim().is_empty()))
}

pub fn validate(
    draft: &FormDraft,
    pending_ranges: &[Vec<RangeInput>],
    pending_options: &[Vec<String>],
) -> Validation {
    let mut errors = FormErrors {
        name: required_text(&draft.name, NAME_REQUIRED),
        description: required_text(&draft.description, DESCRIPTION_REQUIRED),
        questions: Vec::with_capacity(draft.questions.len()),
    };

    for (index, question) in draft.questions.iter().enumerate() {
        let mut q_errors = QuestionErrors {
            title: required_text(&question.title, TITLE_REQUIRED),
            description: required_text(&question.description, QUESTION_DESCRIPTION_REQUIRED),
            ..QuestionErrors::default()
        };

        match question.kind {
            QuestionKind::Score => {
                if let Some(ranges) = pending_ranges.get(index) {
                    if !ranges_are_valid(ranges) {
                        q_errors.score_ranges = Some(SCORE_RANGES_INVALID.to_string());
                    }
                }
            }
            QuestionKind::Checkbox => {
                if !has_checkbox_options(question, pending_options.get(index)) {
                    q_errors.options = Some(OPTIONS_REQUIRED.to_string());
                }
            }
        }

        errors.questions.push(q_errors);
    }

    let is_valid = errors.is_empty();
    Validation { errors, is_valid }
}
