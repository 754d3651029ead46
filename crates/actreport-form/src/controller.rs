//! Form controller
//!
//! Owns the draft for one editing session. Every mutation goes through the
//! controller, which checks it against the session's variant and rules and
//! reports problems as notifications. [`FormController::submit`] hands a
//! snapshot of the draft to the [`SubmissionAdapter`] and resets the draft
//! only when the whole pipeline succeeded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use actreport_core::error::{ErrorMetadata, FormError};
use actreport_core::models::{
    Attachment, AttachmentCategory, Coordinator, Draft, FieldName, FieldUpdate, FormVariant,
    NormalizedRecord,
};
use actreport_core::notification::log_error;
use actreport_core::validation::validate_draft;
use actreport_core::{FormRules, Notification, Notifier, ValidationError};

use crate::adapter::SubmissionAdapter;
use crate::error::SubmitError;

const SUCCESS_TITLE: &str = "Form Submitted Successfully!";
const SUCCESS_MESSAGE: &str =
    "Your SDG activity report has been saved to Google Sheets with file links.";

/// Clears the submitting flag when the submit call ends, however it ends
struct SubmittingGuard<'a>(&'a AtomicBool);

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

fn attachment_field(category: AttachmentCategory) -> FieldName {
    match category {
        AttachmentCategory::Photos => FieldName::Photos,
        AttachmentCategory::Reports => FieldName::Reports,
    }
}

pub struct FormController {
    variant: FormVariant,
    draft: Mutex<Draft>,
    rules: FormRules,
    adapter: SubmissionAdapter,
    notifier: Arc<dyn Notifier>,
    submitting: AtomicBool,
}

impl FormController {
    pub fn new(
        variant: FormVariant,
        rules: FormRules,
        adapter: SubmissionAdapter,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            variant,
            draft: Mutex::new(Draft::empty(variant)),
            rules,
            adapter,
            notifier,
            submitting: AtomicBool::new(false),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Draft> {
        self.draft
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn report<E: ErrorMetadata + std::fmt::Display>(&self, err: &E) {
        log_error(err);
        self.notifier.notify(Notification::from_error(err));
    }

    pub fn variant(&self) -> FormVariant {
        self.variant
    }

    pub fn rules(&self) -> &FormRules {
        &self.rules
    }

    /// Snapshot of the current draft
    pub fn draft(&self) -> Draft {
        self.lock().clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// Start over with an empty draft
    pub fn reset(&self) {
        *self.lock() = Draft::empty(self.variant);
    }

    /// Replace one field of the draft
    pub fn apply(&self, update: FieldUpdate) -> Result<(), FormError> {
        let result = self.lock().apply(update);
        if let Err(err) = &result {
            self.report(err);
        }
        result
    }

    /// Include or exclude one coordinator
    pub fn toggle_coordinator(&self, coordinator: Coordinator, included: bool) {
        self.lock().coordinators.toggle(coordinator, included);
        tracing::debug!(coordinator = %coordinator, included, "Coordinator toggled");
    }

    /// Append `files` to the `category` list.
    ///
    /// Every file is checked first; if any is rejected nothing is added.
    pub fn add_attachments(
        &self,
        files: Vec<Attachment>,
        category: AttachmentCategory,
    ) -> Result<(), FormError> {
        let result = self.try_add_attachments(files, category);
        if let Err(err) = &result {
            self.report(err);
        }
        result
    }

    fn try_add_attachments(
        &self,
        files: Vec<Attachment>,
        category: AttachmentCategory,
    ) -> Result<(), FormError> {
        if self.variant != FormVariant::MultiFile {
            return Err(FormError::FieldNotInVariant {
                field: attachment_field(category),
                variant: self.variant,
            });
        }

        let rules = self.rules.for_category(category);
        for file in &files {
            rules.check(category, file)?;
        }

        let mut draft = self.lock();
        let list = draft
            .attachments_mut(category)
            .ok_or(FormError::FieldNotInVariant {
                field: attachment_field(category),
                variant: self.variant,
            })?;

        let added = files.len();
        list.extend(files);

        tracing::debug!(
            category = %category,
            added,
            total = list.len(),
            "Attachments added"
        );
        Ok(())
    }

    /// Remove the `category` attachment at `index`; later items shift down
    pub fn remove_attachment(
        &self,
        index: usize,
        category: AttachmentCategory,
    ) -> Result<Attachment, FormError> {
        let result = {
            let mut draft = self.lock();
            match draft.attachments_mut(category) {
                Some(list) if index < list.len() => Ok(list.remove(index)),
                Some(list) => Err(FormError::AttachmentIndex {
                    category,
                    index,
                    len: list.len(),
                }),
                None => Err(FormError::FieldNotInVariant {
                    field: attachment_field(category),
                    variant: self.variant,
                }),
            }
        };

        if let Err(err) = &result {
            self.report(err);
        }
        result
    }

    /// Check the draft, notifying the first problem found
    pub fn validate(&self) -> Result<(), ValidationError> {
        let draft = self.draft();
        self.check(&draft)
    }

    fn check(&self, draft: &Draft) -> Result<(), ValidationError> {
        let result = validate_draft(draft, self.rules.require_numeric_beneficiaries);
        if let Err(err) = &result {
            self.report(&FormError::Validation(err.clone()));
        }
        result
    }

    /// Validate and submit the draft.
    ///
    /// Rejected while another submit is running. On success the draft is
    /// reset; on any failure it is left exactly as it was. Dropping the
    /// returned future before it completes leaves the draft as it was and
    /// does not remove files that were already uploaded.
    pub async fn submit(&self) -> Result<NormalizedRecord, SubmitError> {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            let err = FormError::SubmissionInProgress;
            log_error(&err);
            return Err(err.into());
        }
        let _guard = SubmittingGuard(&self.submitting);

        // Only the draft that passed validation reaches the adapter
        let snapshot = self.draft();
        self.check(&snapshot)?;

        tracing::info!(
            variant = %self.variant,
            category = %snapshot.category,
            title = %snapshot.title,
            "Submitting activity report"
        );

        match self.adapter.submit(&snapshot).await {
            Ok(record) => {
                self.reset();
                self.notifier
                    .notify(Notification::success(SUCCESS_TITLE, SUCCESS_MESSAGE));
                Ok(record)
            }
            Err(err) => {
                self.report(&err);
                Err(err)
            }
        }
    }
}
