// =============================================================================
// filter_pipeline.rs - CONFIDENCE, RELEVANCE, COUNTRY
// =============================================================================
//
// Three sieves, cheapest first:
//
//   1. Confidence. One float comparison per record over the whole dataset.
//      This is where most of the volume disappears, before any string work.
//   2. Relevance. Keyword classification of `business_name`, walked in
//      chunks of `relevance_chunk_size`.
//   3. Country. First address must be in the target country; no addresses
//      at all passes. Walked in chunks of `country_chunk_size`, and skipped
//      entirely when the dataset has no `addresses` column.
//
// Each per-record stage produces a boolean mask in input order and then
// keeps the masked records. The mask is consumed by the retain step, so it
// is gone before the next stage starts.
//
// A record without a `confidence` key is dropped like any other unusable
// score; only a dataset where no record has the key at all is rejected.
// A record missing `business_name`, or `addresses` once the dataset has an
// address column, aborts the whole run. Record indices in those errors are
// positions within that stage's input.
// =============================================================================

use std::num::NonZeroUsize;

use tracing::{enabled, info, trace, Level};

use crate::chunked::{chunked_map, retain_by_mask};
use crate::config::FilterConfig;
use crate::error::{FilterError, Result, Stage};
use crate::models::{BusinessRecord, Dataset};
use crate::relevance::RelevanceClassifier;
use crate::report::{FilterReport, StageTransition};

/// Keeps only confident, truck-relevant, in-country records.
#[derive(Debug, Clone)]
pub struct FilterPipeline {
    classifier: RelevanceClassifier,
    confidence_threshold: f64,
    relevance_chunk_size: NonZeroUsize,
    country_chunk_size: NonZeroUsize,
    target_country: String,
}

impl FilterPipeline {
    /// Use an already-built classifier with the thresholds and chunk sizes
    /// of `config`. The keyword lists in `config` are ignored.
    pub fn new(classifier: RelevanceClassifier, config: &FilterConfig) -> Self {
        Self {
            classifier,
            confidence_threshold: config.confidence_threshold,
            relevance_chunk_size: config.relevance_chunk_size,
            country_chunk_size: config.country_chunk_size,
            target_country: config.target_country.clone(),
        }
    }

    /// Build the classifier from the keyword lists in `config` as well.
    pub fn from_config(config: &FilterConfig) -> Result<Self> {
        let classifier =
            RelevanceClassifier::new(&config.include_keywords, &config.exclude_keywords)?;
        Ok(Self::new(classifier, config))
    }

    pub fn classifier(&self) -> &RelevanceClassifier {
        &self.classifier
    }

    pub fn filter(&self, dataset: Dataset) -> Result<Dataset> {
        self.filter_with_report(dataset).map(|(dataset, _)| dataset)
    }

    /// Run all stages and also return the per-stage record counts.
    pub fn filter_with_report(&self, dataset: Dataset) -> Result<(Dataset, FilterReport)> {
        info!(records = dataset.len(), "Filtering businesses");
        let mut report = FilterReport::default();

        let carries_addresses = dataset.carries_addresses();
        let records = dataset.into_records();

        let before = records.len();
        let records = self.confidence_stage(records)?;
        report.push(StageTransition::new(Stage::Confidence, before, records.len()));

        let before = records.len();
        let records = self.relevance_stage(records)?;
        report.push(StageTransition::new(Stage::Relevance, before, records.len()));

        let records = if carries_addresses && !records.is_empty() {
            let before = records.len();
            let records = self.country_stage(records)?;
            report.push(StageTransition::new(Stage::Country, before, records.len()));
            records
        } else {
            records
        };

        Ok((Dataset::new(records), report))
    }

    fn confidence_stage(&self, records: Vec<BusinessRecord>) -> Result<Vec<BusinessRecord>> {
        if !records.is_empty() && !records.iter().any(|r| r.confidence.is_some()) {
            return Err(FilterError::MissingColumn {
                stage: Stage::Confidence,
                field: "confidence",
            });
        }

        let mask = records
            .iter()
            .map(|record| {
                record
                    .confidence_score()
                    .is_some_and(|c| c >= self.confidence_threshold)
            })
            .collect();

        Ok(retain_by_mask(records, mask))
    }

    fn relevance_stage(&self, records: Vec<BusinessRecord>) -> Result<Vec<BusinessRecord>> {
        info!("Checking business names for truck relevance");
        let explain = enabled!(Level::TRACE);

        let mask = chunked_map(
            &records,
            self.relevance_chunk_size,
            Stage::Relevance,
            |index, record| -> Result<bool> {
                let name = record
                    .business_name
                    .as_ref()
                    .ok_or(FilterError::MissingField {
                        stage: Stage::Relevance,
                        field: "business_name",
                        index,
                    })?
                    .as_str();

                if explain {
                    let decision = self.classifier.classify(name);
                    trace!(index = index, decision = ?decision, "Relevance decision");
                    Ok(decision.is_relevant())
                } else {
                    Ok(self.classifier.is_truck_relevant(name))
                }
            },
        )?;

        Ok(retain_by_mask(records, mask))
    }

    fn country_stage(&self, records: Vec<BusinessRecord>) -> Result<Vec<BusinessRecord>> {
        info!(country = %self.target_country, "Filtering by country");

        let mask = chunked_map(
            &records,
            self.country_chunk_size,
            Stage::Country,
            |index, record| -> Result<bool> {
                let missing = |field| FilterError::MissingField {
                    stage: Stage::Country,
                    field,
                    index,
                };

                let addresses = record.addresses.as_ref().ok_or_else(|| missing("addresses"))?;
                let Some(first) = addresses.as_deref().and_then(<[_]>::first) else {
                    // no address on file: keep it
                    return Ok(true);
                };

                let country = first
                    .country
                    .as_ref()
                    .ok_or_else(|| missing("addresses[0].country"))?;
                Ok(country.as_str() == Some(self.target_country.as_str()))
            },
        )?;

        Ok(retain_by_mask(records, mask))
    }
}
