//! Persisted form model.
//!
//! These are the shapes stored by the repository and exchanged as JSON over
//! the REST API. Inbound payloads also accept the editing-state spellings
//! (`name`, `type`, `isRequired`, ...) as aliases; responses always use the
//! canonical names.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::StoreError;

/// A named, described collection of ordered questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    /// Server-assigned identifier; empty until the form is first saved.
    #[serde(default)]
    pub id: String,
    #[serde(alias = "name")]
    pub form_name: String,
    pub description: String,
    pub questions: Vec<Question>,
}

/// One prompt within a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default)]
    pub id: String,
    pub title: String,
    /// Body text shown under the title.
    #[serde(alias = "description")]
    pub question_text: String,
    #[serde(alias = "type")]
    pub question_type: QuestionKind,
    /// Present only on score questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_ranges: Option<Vec<ScoreRange>>,
    /// Present only on checkbox questions.
    #[serde(
        default,
        alias = "checkboxOptions",
        skip_serializing_if = "Option::is_none"
    )]
    pub options: Option<Vec<String>>,
    #[serde(default, alias = "isRequired")]
    pub required: bool,
    #[serde(default, alias = "hasComments")]
    pub comment_required: bool,
}

/// The two supported question kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    #[default]
    Score,
    Checkbox,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::Score => write!(f, "score"),
            QuestionKind::Checkbox => write!(f, "checkbox"),
        }
    }
}

/// One labeled numeric interval of a score question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub title: String,
    pub min: i64,
    pub max: i64,
}

impl ScoreRange {
    /// The default range appended at position `n` (1-based): `Range n`, 0..0.
    pub fn numbered(n: usize) -> Self {
        Self {
            title: format!("Range {n}"),
            min: 0,
            max: 0,
        }
    }
}

impl Form {
    /// Check the boundary contract and normalize the payload.
    ///
    /// Score questions must carry `scoreRanges` and checkbox questions must
    /// carry `options`; the list belonging to the other kind is dropped.
    pub fn into_checked(mut self) -> Result<Self, StoreError> {
        for (index, question) in self.questions.iter_mut().enumerate() {
            match question.question_type {
                QuestionKind::Score => {
                    if question.score_ranges.is_none() {
                        return Err(StoreError::InvalidPayload(format!(
                            "question {index}: score questions need scoreRanges"
                        )));
                    }
                    question.options = None;
                }
                QuestionKind::Checkbox => {
                    if question.options.is_none() {
                        return Err(StoreError::InvalidPayload(format!(
                            "question {index}: checkbox questions need options"
                        )));
                    }
                    question.score_ranges = None;
                }
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_display() {
        assert_eq!(QuestionKind::Score.to_string(), "score");
        assert_eq!(QuestionKind::Checkbox.to_string(), "checkbox");
    }

    #[test]
    fn numbered_range_defaults() {
        assert_eq!(
            ScoreRange::numbered(3),
            ScoreRange {
                title: "Range 3".into(),
                min: 0,
                max: 0
            }
        );
    }

    #[test]
    fn deserializes_editing_aliases() {
        let body = serde_json::json!({
            "name": "Satisfaction",
            "description": "d",
            "questions": [{
                "title": "Q1",
                "description": "d1",
                "type": "score",
                "scoreRanges": [{"title": "Low", "min": 0, "max": 3}],
                "isRequired": true,
                "hasComments": false
            }]
        });
        let form: Form = serde_json::from_value(body).unwrap();
        assert_eq!(form.form_name, "Satisfaction");
        assert!(form.id.is_empty());
        let q = &form.questions[0];
        assert_eq!(q.question_text, "d1");
        assert_eq!(q.question_type, QuestionKind::Score);
        assert!(q.required);
        assert!(!q.comment_required);
        assert!(q.id.is_empty());
    }

    #[test]
    fn serializes_canonical_names() {
        let form = Form {
            id: "f1".into(),
            form_name: "Intake".into(),
            description: "desc".into(),
            questions: vec![Question {
                id: "q1".into(),
                title: "Pick".into(),
                question_text: "Pick any".into(),
                question_type: QuestionKind::Checkbox,
                score_ranges: None,
                options: Some(vec!["Yes".into()]),
                required: false,
                comment_required: true,
            }],
        };
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["formName"], "Intake");
        let q = &value["questions"][0];
        assert_eq!(q["questionType"], "checkbox");
        assert_eq!(q["questionText"], "Pick any");
        assert_eq!(q["commentRequired"], true);
        assert!(q.get("scoreRanges").is_none());
    }

    #[test]
    fn contract_requires_kind_payload() {
        let body = serde_json::json!({
            "formName": "x",
            "description": "y",
            "questions": [{"title": "t", "questionText": "b", "questionType": "checkbox"}]
        });
        let form: Form = serde_json::from_value(body).unwrap();
        let err = form.into_checked().unwrap_err();
        assert!(err.to_string().contains("checkbox questions need options"));
    }

    #[test]
    fn contract_drops_other_kind_list() {
        let body = serde_json::json!({
            "formName": "x",
            "description": "y",
            "questions": [{
                "title": "t",
                "questionText": "b",
                "questionType": "checkbox",
                "scoreRanges": [],
                "options": ["A"]
            }]
        });
        let form: Form = serde_json::from_value(body).unwrap();
        let checked = form.into_checked().unwrap();
        assert!(checked.questions[0].score_ranges.is_none());
        assert_eq!(checked.questions[0].options.as_deref(), Some(&["A".to_string()][..]));
    }
}
