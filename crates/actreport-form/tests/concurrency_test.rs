#[path = "helpers/mod.rs"]
mod helpers;

use actreport_core::models::{AttachmentCategory, Coordinator, FormVariant};
use actreport_core::FormError;
use actreport_form::SubmitError;
use actreport_storage::{MemoryRecordStore, MemoryStorage, RecordGate};
use helpers::fixtures::{complete_health_camp, fill_health_camp, photo, report};
use helpers::{setup_test_form, setup_test_form_with};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_second_submit_rejected_while_in_flight() {
    let gate = RecordGate::new();
    let t = setup_test_form_with(
        FormVariant::MultiFile,
        MemoryStorage::new(),
        MemoryRecordStore::with_gate(gate.clone()),
        &[],
    );
    complete_health_camp(&t.form);

    let first = {
        let form = t.form.clone();
        tokio::spawn(async move { form.submit().await })
    };

    gate.entered().await;
    assert!(t.form.is_submitting());

    let notifications_before = t.notifier.len();
    let second = t.form.submit().await;
    assert!(matches!(
        second,
        Err(SubmitError::Form(FormError::SubmissionInProgress))
    ));
    assert_eq!(t.notifier.len(), notifications_before);

    gate.release();
    let record = first.await.unwrap().unwrap();

    assert_eq!(t.records.records(), vec![record]);
    assert_eq!(t.storage.files().len(), 2);
    assert!(!t.form.is_submitting());
}

#[tokio::test]
async fn test_abandoned_submit_keeps_draft() {
    let gate = RecordGate::new();
    let t = setup_test_form_with(
        FormVariant::MultiFile,
        MemoryStorage::new(),
        MemoryRecordStore::with_gate(gate.clone()),
        &[],
    );
    complete_health_camp(&t.form);
    let before = t.form.draft();

    {
        let submit = t.form.submit();
        tokio::pin!(submit);
        tokio::select! {
            _ = &mut submit => panic!("submit should be held at the record store"),
            _ = gate.entered() => {}
        }
        assert!(t.form.is_submitting());
    }

    assert!(!t.form.is_submitting());
    assert_eq!(t.form.draft(), before);
    assert!(t.records.records().is_empty());
    // Uploaded files are not cleaned up
    assert_eq!(t.storage.files().len(), 2);
}

#[tokio::test]
async fn test_uploads_respect_concurrency_limit() {
    let storage = MemoryStorage::new().with_upload_delay(Duration::from_millis(20));
    let t = setup_test_form_with(
        FormVariant::MultiFile,
        storage,
        MemoryRecordStore::new(),
        &[("UPLOAD_CONCURRENCY", "2")],
    );
    fill_health_camp(&t.form);
    t.form
        .add_attachments(
            (0..6).map(|i| photo(&format!("p{}.jpg", i))).collect(),
            AttachmentCategory::Photos,
        )
        .unwrap();
    t.form
        .add_attachments(vec![report("r.pdf")], AttachmentCategory::Reports)
        .unwrap();

    t.form.submit().await.unwrap();

    assert_eq!(t.storage.max_in_flight(), 2);
    assert_eq!(t.storage.files().len(), 7);
}

#[tokio::test]
async fn test_failed_batch_stops_before_reports() {
    let storage = MemoryStorage::new();
    storage.fail_on("p1.jpg");
    let t = setup_test_form_with(
        FormVariant::MultiFile,
        storage,
        MemoryRecordStore::new(),
        &[],
    );
    fill_health_camp(&t.form);
    t.form
        .add_attachments(vec![photo("p0.jpg"), photo("p1.jpg")], AttachmentCategory::Photos)
        .unwrap();
    t.form
        .add_attachments(vec![report("r.pdf")], AttachmentCategory::Reports)
        .unwrap();

    let err = t.form.submit().await.unwrap_err();

    assert!(matches!(err, SubmitError::Upload(ref e) if e.file == "p1.jpg"));
    assert!(t
        .storage
        .files_in(&t.config.storage.reports_folder_id)
        .is_empty());
    assert!(t.records.records().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_coordinator_toggled_during_submit_never_recorded_empty() {
    let t = setup_test_form(FormVariant::TextReport);
    let running = Arc::new(AtomicBool::new(true));

    let toggler = {
        let form = t.form.clone();
        let running = running.clone();
        std::thread::spawn(move || {
            while running.load(Ordering::Relaxed) {
                form.toggle_coordinator(Coordinator::Hema, false);
                form.toggle_coordinator(Coordinator::Hema, true);
            }
        })
    };

    let mut stored = 0;
    for _ in 0..2000 {
        t.form.reset();
        complete_health_camp(&t.form);
        if t.form.submit().await.is_ok() {
            stored += 1;
        }
    }

    running.store(false, Ordering::Relaxed);
    toggler.join().unwrap();

    let records = t.records.records();
    assert_eq!(records.len(), stored);
    assert!(stored > 0);
    for record in records {
        assert_eq!(record.coordinators, "Dr. S. Hema (Asso. Prof./Civil)");
    }
}
