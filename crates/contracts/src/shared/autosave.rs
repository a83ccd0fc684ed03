//! Autosave draft record stored in localStorage.
//!
//! Shape on the wire: `{"timestamp": <epoch ms>, "data": {<field>: <value>, "item_rows": [...]}}`

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reserved key inside `data` holding the invoice/quotation line items
pub const ITEM_ROWS_KEY: &str = "item_rows";

/// Drafts this old (or older) are discarded on page load
pub const MAX_RECORD_AGE_MS: i64 = 24 * 60 * 60 * 1000;

/// Storage key for a form draft: `autosave_{formId}_{pathname}`
pub fn storage_key(form_id: &str, pathname: &str) -> String {
    format!("autosave_{}_{}", form_id, pathname)
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("autosave record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Value captured for one named form control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    /// Selected options of a `select-multiple`
    Multiple(Vec<String>),
}

impl FieldValue {
    /// Equality match used for radios and checkboxes
    pub fn matches(&self, value: &str) -> bool {
        match self {
            FieldValue::Single(saved) => saved == value,
            FieldValue::Multiple(_) => false,
        }
    }

    /// Membership test used for multi-select options
    pub fn contains(&self, value: &str) -> bool {
        match self {
            FieldValue::Single(saved) => saved == value,
            FieldValue::Multiple(saved) => saved.iter().any(|v| v == value),
        }
    }

    /// Text written back into a plain control
    pub fn to_value_string(&self) -> String {
        match self {
            FieldValue::Single(saved) => saved.clone(),
            FieldValue::Multiple(saved) => saved.join(","),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Single(value.to_string())
    }
}

/// One line item of an invoice or quotation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRow {
    pub name: String,
    pub price: String,
    pub quantity: String,
}

impl ItemRow {
    pub fn new(name: &str, price: &str, quantity: &str) -> Self {
        Self {
            name: name.to_string(),
            price: price.to_string(),
            quantity: quantity.to_string(),
        }
    }
}

/// Captured form contents, keyed by control name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMap {
    /// Present whenever the page had at least one `.item-row`, even if every row was incomplete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_rows: Option<Vec<ItemRow>>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later inserts under the same name replace earlier ones
    pub fn insert(&mut self, name: &str, value: FieldValue) {
        self.fields.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Number of top-level keys, `item_rows` included
    pub fn len(&self) -> usize {
        self.fields.len() + usize::from(self.item_rows.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutosaveRecord {
    /// Epoch milliseconds of the save
    pub timestamp: i64,
    pub data: FieldMap,
}

impl AutosaveRecord {
    pub fn new(timestamp: i64, data: FieldMap) -> Self {
        Self { timestamp, data }
    }

    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn age_ms(&self, now_ms: i64) -> i64 {
        now_ms - self.timestamp
    }

    /// Exactly 24 hours counts as expired
    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.age_ms(now_ms) >= MAX_RECORD_AGE_MS
    }

    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice_record() -> AutosaveRecord {
        let mut data = FieldMap::new();
        data.insert("customer", "Acme".into());
        data.insert(
            "tags",
            FieldValue::Multiple(vec!["urgent".to_string(), "eu".to_string()]),
        );
        data.item_rows = Some(vec![ItemRow::new("Widget", "10", "2")]);
        AutosaveRecord::new(1_700_000_000_000, data)
    }

    #[test]
    fn test_storage_key_includes_form_and_path() {
        assert_eq!(
            storage_key("invoiceForm", "/invoices/create/"),
            "autosave_invoiceForm_/invoices/create/"
        );
        assert_ne!(
            storage_key("invoiceForm", "/invoices/create/"),
            storage_key("invoiceForm", "/invoices/5/edit/")
        );
    }

    #[test]
    fn test_record_json_shape() {
        let json = invoice_record().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["timestamp"], 1_700_000_000_000i64);
        assert_eq!(value["data"]["customer"], "Acme");
        assert_eq!(value["data"]["tags"], serde_json::json!(["urgent", "eu"]));
        assert_eq!(
            value["data"]["item_rows"],
            serde_json::json!([{"name": "Widget", "price": "10", "quantity": "2"}])
        );
    }

    #[test]
    fn test_item_rows_omitted_when_absent() {
        let mut data = FieldMap::new();
        data.insert("notes", "hello".into());
        let json = AutosaveRecord::new(1, data).to_json().unwrap();
        assert!(!json.contains(ITEM_ROWS_KEY));
    }

    #[test]
    fn test_parse_record_written_by_browser() {
        let json = r#"{"timestamp":1700000000000,"data":{"customer":"Acme","currency":["USD"],"item_rows":[{"name":"Widget","price":"10","quantity":"2"}]}}"#;
        let record = AutosaveRecord::from_json(json).unwrap();
        assert_eq!(record, {
            let mut expected = invoice_record();
            expected.data.fields.remove("tags");
            expected
                .data
                .insert("currency", FieldValue::Multiple(vec!["USD".to_string()]));
            expected
        });
    }

    #[test]
    fn test_malformed_record_is_error() {
        assert!(AutosaveRecord::from_json("not json").is_err());
        assert!(AutosaveRecord::from_json(r#"{"data":{}}"#).is_err());
        assert!(AutosaveRecord::from_json(r#"{"timestamp":1,"data":{"qty":5}}"#).is_err());
    }

    #[test]
    fn test_expiry_boundary() {
        let record = AutosaveRecord::new(0, FieldMap::new());
        assert!(record.is_expired(MAX_RECORD_AGE_MS));
        assert!(!record.is_expired(MAX_RECORD_AGE_MS - 1_000));
        assert!(record.is_expired(MAX_RECORD_AGE_MS + 1));
    }

    #[test]
    fn test_field_map_len_counts_item_rows() {
        let mut data = FieldMap::new();
        assert!(data.is_empty());
        data.item_rows = Some(Vec::new());
        assert_eq!(data.len(), 1);
        data.insert("customer", "Acme".into());
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn test_field_value_matching() {
        let single = FieldValue::from("net30");
        assert!(single.matches("net30"));
        assert!(!single.matches("net60"));

        let multi = FieldValue::Multiple(vec!["a".to_string(), "c".to_string()]);
        assert!(multi.contains("c"));
        assert!(!multi.contains("b"));
        assert!(!multi.matches("a"));
        assert_eq!(multi.to_value_string(), "a,c");
    }

    #[test]
    fn test_saved_at() {
        let record = AutosaveRecord::new(1_700_000_000_000, FieldMap::new());
        assert_eq!(
            record.saved_at().unwrap().to_rfc3339(),
            "2023-11-14T22:13:20+00:00"
        );
    }
}
