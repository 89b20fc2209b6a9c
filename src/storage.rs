//! Persistence of the raw calculator inputs.
//!
//! Only the strings the user typed are stored, never computed results. The
//! document lives under a single key as JSON; fields missing from an older
//! document are filled from [`MortgageData::default`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::i18n::Language;

pub const STORAGE_KEY: &str = "mortgage-calculator-data";

/// Keys written by earlier versions, one value per key.
pub const LEGACY_KEYS: [&str; 5] = [
    "loanAmount",
    "loanTermYears",
    "loanTermMonths",
    "interestRate",
    "language",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MortgageData {
    /// Loan amount in millions.
    pub loan_amount: String,
    pub loan_term_years: String,
    pub loan_term_months: String,
    pub interest_rate: String,
    pub language: Language,
    /// Property value in millions.
    pub current_property_value: String,
    pub expected_yearly_inflation: String,
    pub advanced_features_expanded: bool,
}

impl Default for MortgageData {
    fn default() -> Self {
        Self {
            loan_amount: "25".to_string(),
            loan_term_years: "20".to_string(),
            loan_term_months: "0".to_string(),
            interest_rate: "7.5".to_string(),
            language: Language::Hu,
            current_property_value: String::new(),
            expected_yearly_inflation: String::new(),
            advanced_features_expanded: false,
        }
    }
}

/// A string key-value store, such as browser local storage or a file backed map.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> anyhow::Result<()>;
    fn remove(&mut self, key: &str);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> anyhow::Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// The stored inputs together with the store they are persisted to.
pub struct MortgageStorage<S: KeyValueStore> {
    store: S,
    data: MortgageData,
}

impl<S: KeyValueStore> MortgageStorage<S> {
    /// Reads the stored document, falling back to defaults when it is absent
    /// or unreadable. An unreadable document triggers a migration attempt
    /// from the legacy per-field keys.
    pub fn load(mut store: S) -> Self {
        let data = match store.get(STORAGE_KEY) {
            None => MortgageData::default(),
            Some(raw) => match serde_json::from_str::<MortgageData>(&raw) {
                Ok(data) => data,
                Err(e) => {
                    log::warn!("Failed to parse stored mortgage data: {e}");
                    match migrate_from_legacy_keys(&mut store) {
                        Some(migrated) => {
                            log::info!("Migrated mortgage data from legacy storage keys");
                            migrated
                        }
                        None => MortgageData::default(),
                    }
                }
            },
        };

        Self { store, data }
    }

    pub fn data(&self) -> &MortgageData {
        &self.data
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Applies `change` and persists the result. The in-memory copy keeps the
    /// change even when saving fails.
    pub fn update<F>(&mut self, change: F) -> anyhow::Result<()>
    where
        F: FnOnce(&mut MortgageData),
    {
        change(&mut self.data);
        save(&mut self.store, &self.data).inspect_err(|e| {
            log::error!("Error saving mortgage data: {e}");
        })
    }
}

fn save<S: KeyValueStore>(store: &mut S, data: &MortgageData) -> anyhow::Result<()> {
    let json = serde_json::to_string(data)?;
    store.set(STORAGE_KEY, json)
}

/// Collects legacy per-field values on top of the defaults. On success the
/// merged document is written under [`STORAGE_KEY`] and the old keys removed.
fn migrate_from_legacy_keys<S: KeyValueStore>(store: &mut S) -> Option<MortgageData> {
    let mut fields = serde_json::Map::new();
    for key in LEGACY_KEYS {
        if let Some(raw) = store.get(key).filter(|raw| !raw.is_empty()) {
            fields.insert(key.to_string(), legacy_value(&raw));
        }
    }

    if fields.is_empty() {
        return None;
    }

    let data = match serde_json::from_value::<MortgageData>(Value::Object(fields)) {
        Ok(data) => data,
        Err(e) => {
            log::error!("Error during migration of legacy mortgage data: {e}");
            return None;
        }
    };

    if let Err(e) = save(store, &data) {
        log::error!("Error saving migrated mortgage data: {e}");
        return None;
    }
    for key in LEGACY_KEYS {
        store.remove(key);
    }

    Some(data)
}

/// Legacy values were written either JSON encoded or raw.
fn legacy_value(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::String(s)) => Value::String(s),
        Ok(Value::Number(n)) => Value::String(n.to_string()),
        _ => Value::String(raw.to_string()),
    }
}
