// =============================================================================
// models.rs - BUSINESS RECORDS, AS DIRTY AS THEY COME
// =============================================================================
//
// A directory record has three fields we care about and an unknown number we
// don't. The three inspected fields keep "key not present" apart from "key
// present with a useless value": the first is a schema problem the pipeline
// refuses to paper over, the second is just dirty data and gets a "no".
//
// Everything else rides along in `extra` and comes out the other end exactly
// as it went in.
// =============================================================================

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Wraps whatever value is under a key in `Some`, so that together with
/// `#[serde(default)]` an absent key stays `None` while `null` becomes
/// `Some(Value::Null)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// One postal address attached to a business.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// Country code such as "US". `None` when the key is missing.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub country: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Address {
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            country: Some(Value::String(country.into())),
            extra: Map::new(),
        }
    }

    /// The country code when it is present and textual.
    pub fn country_code(&self) -> Option<&str> {
        self.country.as_ref().and_then(Value::as_str)
    }
}

/// A single business-directory entry.
///
/// `None` on an inspected field means the key was absent from the source
/// record. A present-but-wrong-typed value (a number where a name should be)
/// is kept as-is and judged leniently by the stage that reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub business_name: Option<Value>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Value>,

    /// `Some(None)` is an explicit `null`, which counts as "no addresses".
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Option<Vec<Address>>>,

    /// Passthrough fields. Never inspected.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BusinessRecord {
    pub fn new(business_name: impl Into<String>, confidence: f64) -> Self {
        Self {
            business_name: Some(Value::String(business_name.into())),
            confidence: Some(Value::from(confidence)),
            addresses: None,
            extra: Map::new(),
        }
    }

    pub fn with_addresses(mut self, addresses: Vec<Address>) -> Self {
        self.addresses = Some(Some(addresses));
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// The business name when the field is present and holds text.
    pub fn name_text(&self) -> Option<&str> {
        self.business_name.as_ref().and_then(Value::as_str)
    }

    /// The confidence score when the field is present and numeric.
    pub fn confidence_score(&self) -> Option<f64> {
        self.confidence.as_ref().and_then(Value::as_f64)
    }
}

/// An ordered collection of records. Stages take one by value and hand back
/// a new one; records are never edited in place inside a live dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<BusinessRecord>,
}

impl Dataset {
    pub fn new(records: Vec<BusinessRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[BusinessRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BusinessRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<BusinessRecord> {
        self.records
    }

    /// Whether the dataset has an `addresses` column at all, i.e. at least
    /// one record carries the key.
    pub fn carries_addresses(&self) -> bool {
        self.records.iter().any(|r| r.addresses.is_some())
    }
}

impl From<Vec<BusinessRecord>> for Dataset {
    fn from(records: Vec<BusinessRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<BusinessRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = BusinessRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Dataset {
    type Item = BusinessRecord;
    type IntoIter = std::vec::IntoIter<BusinessRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_key_differs_from_null() {
        let absent: BusinessRecord = serde_json::from_value(json!({"confidence": 0.95})).unwrap();
        assert!(absent.business_name.is_none());
        assert!(absent.addresses.is_none());

        let null: BusinessRecord = serde_json::from_value(json!({
            "business_name": null,
            "confidence": 0.95,
            "addresses": null
        }))
        .unwrap();
        assert_eq!(null.business_name, Some(Value::Null));
        assert_eq!(null.addresses, Some(None));
        assert_eq!(null.name_text(), None);
    }

    #[test]
    fn test_non_text_name_is_kept_but_not_text() {
        let record: BusinessRecord =
            serde_json::from_value(json!({"business_name": 42, "confidence": "high"})).unwrap();
        assert_eq!(record.business_name, Some(json!(42)));
        assert_eq!(record.name_text(), None);
        assert_eq!(record.confidence_score(), None);
    }

    #[test]
    fn test_passthrough_fields_round_trip_untouched() {
        let input = json!({
            "business_name": "Smith Freight",
            "confidence": 0.97,
            "addresses": [{"country": "US", "locality": "Tulsa"}],
            "id": "08f2a",
            "categories": {"primary": "trucking"}
        });
        let record: BusinessRecord = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(record.extra.get("id"), Some(&json!("08f2a")));
        let addresses = record.addresses.clone().flatten().unwrap();
        assert_eq!(addresses[0].country_code(), Some("US"));
        assert_eq!(addresses[0].extra.get("locality"), Some(&json!("Tulsa")));
        assert_eq!(serde_json::to_value(&record).unwrap(), input);
    }

    #[test]
    fn test_carries_addresses_needs_one_record_with_the_key() {
        let without = Dataset::new(vec![BusinessRecord::new("A Trucking", 0.95)]);
        assert!(!without.carries_addresses());

        let with = Dataset::new(vec![
            BusinessRecord::new("A Trucking", 0.95),
            BusinessRecord::new("B Freight", 0.95).with_addresses(vec![]),
        ]);
        assert!(with.carries_addresses());
    }
}
