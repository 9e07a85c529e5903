// =============================================================================
// cleaning_pipeline.rs - MAKING THE SURVIVORS PRESENTABLE
// =============================================================================
//
// Runs `clean_name` over every record's `business_name`, chunk by chunk,
// then throws out anything left without a usable name: absent key, null,
// non-text, or nothing left after cleaning. Output order is input order;
// nothing else about a record changes.
// =============================================================================

use std::num::NonZeroUsize;

use serde_json::Value;
use tracing::info;

use crate::chunked::chunked_map;
use crate::config::FilterConfig;
use crate::error::{Result, Stage};
use crate::models::{BusinessRecord, Dataset};
use crate::names::clean_name;
use crate::report::StageTransition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleaningPipeline {
    chunk_size: NonZeroUsize,
}

impl CleaningPipeline {
    pub fn new(chunk_size: NonZeroUsize) -> Self {
        Self { chunk_size }
    }

    pub fn from_config(config: &FilterConfig) -> Self {
        Self::new(config.cleaning_chunk_size)
    }

    /// Clean every business name and drop records whose cleaned name is
    /// absent or empty.
    pub fn clean(&self, dataset: Dataset) -> Result<Dataset> {
        self.clean_with_report(dataset).map(|(dataset, _)| dataset)
    }

    /// Same as `clean`, also returning how many records the empty-name drop
    /// removed.
    pub fn clean_with_report(&self, dataset: Dataset) -> Result<(Dataset, StageTransition)> {
        info!(records = dataset.len(), "Cleaning business names");

        let cleaned = chunked_map(
            dataset,
            self.chunk_size,
            Stage::Cleaning,
            |_, mut record: BusinessRecord| -> Result<BusinessRecord> {
                let name = record.business_name.as_ref().and_then(Value::as_str);
                let cleaned = clean_name(name).map_or(Value::Null, Value::String);
                record.business_name = Some(cleaned);
                Ok(record)
            },
        )?;

        let before = cleaned.len();
        let kept: Vec<BusinessRecord> = cleaned
            .into_iter()
            .filter(|record| record.name_text().is_some_and(|name| !name.is_empty()))
            .collect();
        let transition = StageTransition::new(Stage::Cleaning, before, kept.len());

        Ok((Dataset::new(kept), transition))
    }
}

impl Default for CleaningPipeline {
    fn default() -> Self {
        Self::from_config(&FilterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> BusinessRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_names_are_cleaned_in_order() {
        let dataset = Dataset::new(vec![
            BusinessRecord::new("  Discount   Towing  ", 0.91),
            BusinessRecord::new("ABC TRUCKING LLC", 0.95),
            BusinessRecord::new("smith \"freight\" co", 0.95),
        ]);
        let out = CleaningPipeline::default().clean(dataset).unwrap();
        let names: Vec<_> = out.iter().filter_map(BusinessRecord::name_text).collect();
        assert_eq!(names, vec!["Discount Towing", "ABC TRUCKING LLC", "Smith Freight Co"]);
    }

    #[test]
    fn test_empty_and_non_text_names_are_dropped() {
        let dataset = Dataset::new(vec![
            record(json!({"business_name": "   ", "confidence": 0.95})),
            record(json!({"business_name": "\"''\"", "confidence": 0.95})),
            record(json!({"business_name": null, "confidence": 0.95})),
            record(json!({"business_name": 7, "confidence": 0.95})),
            BusinessRecord::new("Keeper Freight", 0.95),
        ]);
        let out = CleaningPipeline::default().clean(dataset).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out.records()[0].name_text(), Some("Keeper Freight"));
    }

    #[test]
    fn test_other_fields_pass_through() {
        let dataset = Dataset::new(vec![record(json!({
            "business_name": "acme hauling",
            "confidence": 0.93,
            "addresses": [{"country": "US", "region": "OK"}],
            "id": "abc-1"
        }))]);
        let out = CleaningPipeline::default().clean(dataset).unwrap();
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            json!([{
                "business_name": "Acme Hauling",
                "confidence": 0.93,
                "addresses": [{"country": "US", "region": "OK"}],
                "id": "abc-1"
            }])
        );
    }

    #[test]
    fn test_record_without_business_name_is_dropped() {
        let dataset = Dataset::new(vec![
            BusinessRecord::new("Keeper Freight", 0.95),
            record(json!({"confidence": 0.95})),
        ]);
        let (out, transition) = CleaningPipeline::default().clean_with_report(dataset).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out.records()[0].name_text(), Some("Keeper Freight"));
        assert_eq!(
            transition,
            StageTransition { stage: Stage::Cleaning, before: 2, after: 1 }
        );
    }

    #[test]
    fn test_chunk_size_does_not_change_output() {
        let dataset: Dataset = (0..25)
            .map(|i| {
                let name = if i % 4 == 0 { "  ".to_string() } else { format!("fleet  co {i}") };
                BusinessRecord::new(name, 0.95)
            })
            .collect();

        let reference = CleaningPipeline::new(NonZeroUsize::new(25).unwrap())
            .clean(dataset.clone())
            .unwrap();
        for n in [1, 3, 24, 10_000] {
            let out = CleaningPipeline::new(NonZeroUsize::new(n).unwrap())
                .clean(dataset.clone())
                .unwrap();
            assert_eq!(out, reference, "chunk size {n}");
        }
        assert_eq!(reference.len(), 18);
    }
}
