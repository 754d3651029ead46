#![allow(dead_code)]

pub mod fixtures;

use actreport_core::models::FormVariant;
use actreport_core::{Config, MemoryNotifier};
use actreport_form::{FormController, SubmissionAdapter};
use actreport_storage::{MemoryRecordStore, MemoryStorage};
use std::collections::HashMap;
use std::sync::Arc;

/// A form wired to in-memory backends
pub struct TestForm {
    pub form: Arc<FormController>,
    pub storage: Arc<MemoryStorage>,
    pub records: Arc<MemoryRecordStore>,
    pub notifier: Arc<MemoryNotifier>,
    pub config: Config,
}

/// Configuration with defaults plus `overrides`
pub fn test_config(overrides: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = overrides
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_vars(|key| vars.get(key).cloned()).expect("test configuration is valid")
}

pub fn setup_test_form(variant: FormVariant) -> TestForm {
    setup_test_form_with(
        variant,
        MemoryStorage::new(),
        MemoryRecordStore::new(),
        &[],
    )
}

/// Setup a form around the given backends and configuration overrides
pub fn setup_test_form_with(
    variant: FormVariant,
    storage: MemoryStorage,
    records: MemoryRecordStore,
    overrides: &[(&str, &str)],
) -> TestForm {
    let config = test_config(overrides);
    let storage = Arc::new(storage);
    let records = Arc::new(records);
    let notifier = Arc::new(MemoryNotifier::new());

    let adapter = SubmissionAdapter::new(&config, storage.clone(), records.clone());
    let form = Arc::new(FormController::new(
        variant,
        config.rules.clone(),
        adapter,
        notifier.clone(),
    ));

    TestForm {
        form,
        storage,
        records,
        notifier,
        config,
    }
}
