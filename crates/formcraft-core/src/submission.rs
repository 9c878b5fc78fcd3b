//! Submission controller.
//!
//! Maps the committed draft back to the persisted shape, chooses create or
//! update, and tracks the in-flight flag and the user-visible save error.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, instrument, warn};

use crate::draft::{FormDraft, QuestionDraft};
use crate::model::{Form, Question, QuestionKind};
use crate::traits::FormsApi;
use crate::validation::Validation;

/// Banner shown when a save fails for any transport or server reason.
pub const SAVE_FAILED: &str = "Failed to save form. Please try again.";

/// Where the caller should go after a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    FormsList,
}

/// What happened when a submission was triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form was stored; the editing session is done.
    Saved { form: Form, redirect: Navigation },
    /// Validation failed; nothing was sent.
    Invalid,
    /// The backend call failed; the draft is untouched and can be retried.
    Failed { message: String },
    /// Another submission is still running; nothing was sent.
    AlreadyInFlight,
}

/// Build the persisted form from the draft.
///
/// A checkbox question with no committed options falls back to its pending
/// inputs (trimmed, blanks dropped), so text the user typed but never
/// committed is still saved.
pub fn build_submission(draft: &FormDraft, pending_options: &[Vec<String>]) -> Form {
    Form {
        id: draft.id.clone(),
        form_name: draft.name.clone(),
        description: draft.description.clone(),
        questions: draft
            .questions
            .iter()
            .enumerate()
            .map(|(index, q)| to_question(q, pending_options.get(index)))
            .collect(),
    }
}

fn to_question(q: &QuestionDraft, pending: Option<&Vec<String>>) -> Question {
    let (score_ranges, options) = match q.kind {
        QuestionKind::Score => (Some(q.score_ranges.clone().unwrap_or_default()), None),
        QuestionKind::Checkbox => {
            let committed = q.checkbox_options.clone().unwrap_or_default();
            if committed.is_empty() {
                let promoted: Vec<String> = pending
                    .into_iter()
                    .flatten()
                    .map(|opt| opt.trim())
                    .filter(|opt| !opt.is_empty())
                    .map(str::to_string)
                    .collect();
                if !promoted.is_empty() {
                    debug!(question = %q.id, count = promoted.len(), "promoting uncommitted options");
                }
                (None, Some(promoted))
            } else {
                (None, Some(committed))
            }
        }
    };

    Question {
        id: q.id.clone(),
        title: q.title.clone(),
        question_text: q.description.clone(),
        question_type: q.kind,
        score_ranges,
        options,
        required: q.is_required,
        comment_required: q.has_comments,
    }
}

/// Guards one save at a time and remembers the last save error.
#[derive(Debug, Default)]
pub struct SubmissionController {
    in_flight: AtomicBool,
    api_error: Mutex<Option<String>>,
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// The banner message from the last failed save, if any.
    pub fn api_error(&self) -> Option<String> {
        self.api_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_api_error(&self, message: Option<String>) {
        *self.api_error.lock().unwrap_or_else(PoisonError::into_inner) = message;
    }

    /// Run one submission: abort on invalid input, otherwise create or update
    /// depending on whether the draft already has an identifier.
    #[instrument(skip_all, fields(backend = api.name(), form_id = %draft.id))]
    pub async fn submit(
        &self,
        validation: &Validation,
        draft: &FormDraft,
        pending_options: &[Vec<String>],
        api: &dyn FormsApi,
    ) -> SubmitOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("submission already in flight");
            return SubmitOutcome::AlreadyInFlight;
        }
        let _guard = InFlight(&self.in_flight);

        if !validation.is_valid {
            return SubmitOutcome::Invalid;
        }

        self.set_api_error(None);
        let payload = build_submission(draft, pending_options);

        let result = if draft.id.is_empty() {
            api.create_form(&payload).await
        } else {
            api.update_form(&draft.id, &payload).await
        };

        match result {
            Ok(form) => SubmitOutcome::Saved {
                form,
                redirect: Navigation::FormsList,
            },
            Err(e) => {
                warn!(error = %e, "failed to save form");
                self.set_api_error(Some(SAVE_FAILED.to_string()));
                SubmitOutcome::Failed {
                    message: SAVE_FAILED.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::QuestionEdit;
    use crate::repository::FormRepository;
    use crate::validation::FormErrors;

    fn valid() -> Validation {
        Validation {
            errors: FormErrors::default(),
            is_valid: true,
        }
    }

    fn checkbox_draft() -> FormDraft {
        let mut draft = FormDraft::blank();
        draft.name = "Intake".into();
        draft.description = "About you".into();
        draft.questions[0].title = "Pets".into();
        draft.questions[0].description = "Which pets".into();
        draft
            .change_question_field(0, QuestionEdit::Kind(QuestionKind::Checkbox))
            .unwrap();
        draft
    }

    #[test]
    fn pending_options_fill_in_for_empty_committed() {
        let draft = checkbox_draft();
        let form = build_submission(&draft, &[vec!["  Yes ".into(), "".into()]]);
        let q = &form.questions[0];
        assert_eq!(q.options, Some(vec!["Yes".to_string()]));
        assert!(q.score_ranges.is_none());
    }

    #[test]
    fn committed_options_win_over_pending() {
        let mut draft = checkbox_draft();
        draft.questions[0].checkbox_options = Some(vec!["Cat".into()]);
        let form = build_submission(&draft, &[vec!["Dog".into()]]);
        assert_eq!(form.questions[0].options, Some(vec!["Cat".to_string()]));
    }

    #[test]
    fn score_questions_carry_ranges_only() {
        let draft = FormDraft::seeded();
        let form = build_submission(&draft, &[]);
        for (q, source) in form.questions.iter().zip(&draft.questions) {
            assert_eq!(q.question_type, QuestionKind::Score);
            assert_eq!(q.score_ranges, source.score_ranges);
            assert!(q.options.is_none());
            assert_eq!(q.question_text, source.description);
        }
    }

    #[tokio::test]
    async fn invalid_submission_sends_nothing() {
        let repo = FormRepository::new();
        let controller = SubmissionController::new();
        let invalid = Validation {
            errors: FormErrors::default(),
            is_valid: false,
        };
        let outcome = controller
            .submit(&invalid, &checkbox_draft(), &[], &repo)
            .await;
        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert!(repo.is_empty());
        assert!(!controller.is_submitting());
    }

    #[tokio::test]
    async fn new_draft_creates_then_existing_updates() {
        let repo = FormRepository::new();
        let controller = SubmissionController::new();
        let mut draft = checkbox_draft();
        let pending = vec![vec!["Yes".to_string()]];

        let SubmitOutcome::Saved { form, redirect } =
            controller.submit(&valid(), &draft, &pending, &repo).await
        else {
            panic!("expected create to succeed");
        };
        assert_eq!(redirect, Navigation::FormsList);
        assert_eq!(form.questions[0].options, Some(vec!["Yes".to_string()]));

        draft.id = form.id.clone();
        draft.name = "Renamed".into();
        let outcome = controller.submit(&valid(), &draft, &pending, &repo).await;
        assert!(matches!(outcome, SubmitOutcome::Saved { .. }));
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.get(&form.id).unwrap().form_name, "Renamed");
    }

    #[tokio::test]
    async fn failed_save_sets_banner() {
        let repo = FormRepository::new();
        let controller = SubmissionController::new();
        let mut draft = checkbox_draft();
        draft.id = "never-created".into();

        let outcome = controller
            .submit(&valid(), &draft, &[vec!["Yes".into()]], &repo)
            .await;
        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                message: SAVE_FAILED.to_string()
            }
        );
        assert_eq!(controller.api_error().as_deref(), Some(SAVE_FAILED));
        assert!(!controller.is_submitting());
    }

    #[tokio::test]
    async fn busy_controller_rejects_second_trigger() {
        let repo = FormRepository::new();
        let controller = SubmissionController::new();
        controller.in_flight.store(true, Ordering::Release);

        let outcome = controller
            .submit(&valid(), &checkbox_draft(), &[vec!["Yes".into()]], &repo)
            .await;
        assert_eq!(outcome, SubmitOutcome::AlreadyInFlight);
        assert!(repo.is_empty());
    }
}
