//! Score-range editor.
//!
//! Keeps one ordered list of pending range inputs per question. Numeric
//! fields may be empty while the user is typing; every edit folds the pending
//! list back into the question's committed `score_ranges`, reading an empty
//! field as 0.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::draft::QuestionDraft;
use crate::error::EditorError;
use crate::model::ScoreRange;

/// Which part of a range an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeField {
    Title,
    Min,
    Max,
}

/// A range as typed, before coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeInput {
    pub title: String,
    /// `None` while the field is empty.
    pub min: Option<i64>,
    /// `None` while the field is empty.
    pub max: Option<i64>,
}

impl RangeInput {
    pub fn numbered(n: usize) -> Self {
        ScoreRange::numbered(n).into()
    }

    /// Committed form of this input, empty fields read as 0.
    pub fn coerced(&self) -> ScoreRange {
        ScoreRange {
            title: self.title.clone(),
            min: self.min.unwrap_or(0),
            max: self.max.unwrap_or(0),
        }
    }
}

impl From<ScoreRange> for RangeInput {
    fn from(range: ScoreRange) -> Self {
        Self {
            title: range.title,
            min: Some(range.min),
            max: Some(range.max),
        }
    }
}

/// Pending range inputs, one list per question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreRangeEditor {
    inputs: Vec<Vec<RangeInput>>,
}

impl ScoreRangeEditor {
    /// Seed one slot per question from its committed ranges, or a single
    /// default range when it has none.
    pub fn for_questions(questions: &[QuestionDraft]) -> Self {
        Self {
            inputs: questions.iter().map(seed_slot).collect(),
        }
    }

    pub fn inputs(&self) -> &[Vec<RangeInput>] {
        &self.inputs
    }

    pub fn question(&self, q: usize) -> Option<&[RangeInput]> {
        self.inputs.get(q).map(Vec::as_slice)
    }

    /// Append a slot for a newly added question.
    pub fn push_question(&mut self) {
        self.inputs.push(vec![RangeInput::numbered(1)]);
    }

    pub fn remove_question(&mut self, q: usize) {
        if q < self.inputs.len() {
            self.inputs.remove(q);
        }
    }

    /// Reset a question's slot to a single default range.
    pub fn reset_question(&mut self, q: usize) {
        if let Some(slot) = self.inputs.get_mut(q) {
            *slot = vec![RangeInput::numbered(1)];
        }
    }

    pub fn set_range_field(
        &mut self,
        questions: &mut [QuestionDraft],
        q: usize,
        r: usize,
        field: RangeField,
        value: &str,
    ) -> Result<(), EditorError> {
        let input = self.range_mut(q, r)?;
        match field {
            RangeField::Title => input.title = value.to_string(),
            RangeField::Min => input.min = parse_bound(value)?,
            RangeField::Max => input.max = parse_bound(value)?,
        }
        self.sync_committed(questions, q)
    }

    /// Fold an empty min/max field to 0 when it loses focus.
    pub fn commit_on_blur(
        &mut self,
        questions: &mut [QuestionDraft],
        q: usize,
        r: usize,
        field: RangeField,
    ) -> Result<(), EditorError> {
        let input = self.range_mut(q, r)?;
        let bound = match field {
            RangeField::Title => return Ok(()),
            RangeField::Min => &mut input.min,
            RangeField::Max => &mut input.max,
        };
        if bound.is_none() {
            *bound = Some(0);
            self.sync_committed(questions, q)?;
        }
        Ok(())
    }

    pub fn add_range(
        &mut self,
        questions: &mut [QuestionDraft],
        q: usize,
    ) -> Result<(), EditorError> {
        let slot = self.slot_mut(q)?;
        let next = slot.len() + 1;
        slot.push(RangeInput::numbered(next));
        self.sync_committed(questions, q)
    }

    /// Remove range `r`. Guarding the first range is up to the caller.
    pub fn remove_range(
        &mut self,
        questions: &mut [QuestionDraft],
        q: usize,
        r: usize,
    ) -> Result<(), EditorError> {
        self.range_mut(q, r)?;
        self.slot_mut(q)?.remove(r);
        self.sync_committed(questions, q)
    }

    fn sync_committed(
        &self,
        questions: &mut [QuestionDraft],
        q: usize,
    ) -> Result<(), EditorError> {
        let len = questions.len();
        let question = questions
            .get_mut(q)
            .ok_or(EditorError::QuestionOutOfRange { index: q, len })?;
        let ranges: Vec<ScoreRange> = self.inputs[q].iter().map(RangeInput::coerced).collect();
        debug!(question = q, ranges = ranges.len(), "committed score ranges");
        question.score_ranges = Some(ranges);
        Ok(())
    }

    fn slot_mut(&mut self, q: usize) -> Result<&mut Vec<RangeInput>, EditorError> {
        let len = self.inputs.len();
        self.inputs
            .get_mut(q)
            .ok_or(EditorError::QuestionOutOfRange { index: q, len })
    }

    fn range_mut(&mut self, q: usize, r: usize) -> Result<&mut RangeInput, EditorError> {
        let slot = self.slot_mut(q)?;
        let len = slot.len();
        slot.get_mut(r).ok_or(EditorError::RangeOutOfRange {
            question: q,
            index: r,
            len,
        })
    }
}

fn seed_slot(question: &QuestionDraft) -> Vec<RangeInput> {
    match &question.score_ranges {
        Some(ranges) if !ranges.is_empty() => {
            ranges.iter().cloned().map(RangeInput::from).collect()
        }
        _ => vec![RangeInput::numbered(1)],
    }
}

/// Parse a min/max field.
///
/// Empty input is kept as `None`. Otherwise leading zeros are stripped and the
/// leading integer (optional sign, then digits) is taken; trailing garbage is
/// ignored. Input without a leading integer is rejected.
pub fn parse_bound(raw: &str) -> Result<Option<i64>, EditorError> {
    if raw.is_empty() {
        return Ok(None);
    }
    let stripped = match raw.trim_start_matches('0') {
        "" => "0",
        rest => rest,
    };
    let trimmed = stripped.trim_start();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if end == 0 {
        return Err(EditorError::InvalidNumber(raw.to_string()));
    }
    let magnitude: i64 = unsigned[..end]
        .parse()
        .map_err(|_| EditorError::InvalidNumber(raw.to_string()))?;
    Ok(Some(if negative { -magnitude } else { magnitude }))
}
