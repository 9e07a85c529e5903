//! # truck_business_filter
//!
//! Batch filter for business-directory records. Keeps businesses that are
//! confidently scored, look like truck/freight/logistics operations by name,
//! and sit in the target country, then tidies their names for display.
//!
//! ```rust,ignore
//! use truck_business_filter::{CleaningPipeline, Dataset, FilterConfig, FilterPipeline};
//!
//! let config = FilterConfig::from_env();
//! let filtered = FilterPipeline::from_config(&config)?.filter(dataset)?;
//! let cleaned = CleaningPipeline::from_config(&config).clean(filtered)?;
//! ```
//!
//! Loading and persisting datasets is left to the caller, as is any fuzzy
//! matching; [`normalize_for_matching`] only produces the comparison key.

pub mod chunked;
pub mod cleaning_pipeline;
pub mod config;
pub mod error;
pub mod filter_pipeline;
pub mod models;
pub mod names;
pub mod relevance;
pub mod report;

pub use cleaning_pipeline::CleaningPipeline;
pub use config::FilterConfig;
pub use error::{FilterError, Result, Stage};
pub use filter_pipeline::FilterPipeline;
pub use models::{Address, BusinessRecord, Dataset};
pub use names::{clean_name, normalize_for_matching};
pub use relevance::{Relevance, RelevanceClassifier};
pub use report::{FilterReport, StageTransition};
