// =============================================================================
// report.rs - BEFORE AND AFTER
// =============================================================================
//
// Every stage that drops records says how many went in and how many came
// out. The numbers are logged as they happen and collected so callers can
// look at them afterwards. They never influence the data.
// =============================================================================

use serde::Serialize;
use tracing::info;

use crate::error::Stage;

/// Record counts on either side of one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageTransition {
    pub stage: Stage,
    pub before: usize,
    pub after: usize,
}

impl StageTransition {
    /// Create a transition and log it.
    pub fn new(stage: Stage, before: usize, after: usize) -> Self {
        info!(stage = %stage, before = before, after = after, "Filtered by {}: {} -> {}", stage, before, after);
        Self { stage, before, after }
    }

    pub fn dropped(&self) -> usize {
        self.before - self.after
    }
}

/// The transitions of one pipeline run, in the order the stages ran.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterReport {
    pub transitions: Vec<StageTransition>,
}

impl FilterReport {
    pub fn push(&mut self, transition: StageTransition) {
        self.transitions.push(transition);
    }

    /// The transition for `stage`, if that stage ran.
    pub fn stage(&self, stage: Stage) -> Option<&StageTransition> {
        self.transitions.iter().find(|t| t.stage == stage)
    }

    pub fn total_dropped(&self) -> usize {
        self.transitions.iter().map(StageTransition::dropped).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_lookup_and_totals() {
        let mut report = FilterReport::default();
        report.push(StageTransition::new(Stage::Confidence, 10, 7));
        report.push(StageTransition::new(Stage::Relevance, 7, 3));

        assert_eq!(report.stage(Stage::Relevance).map(|t| t.dropped()), Some(4));
        assert!(report.stage(Stage::Country).is_none());
        assert_eq!(report.total_dropped(), 7);
    }

    #[test]
    fn test_report_serializes_stage_names() {
        let mut report = FilterReport::default();
        report.push(StageTransition::new(Stage::Country, 3, 2));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"transitions": [{"stage": "country", "before": 3, "after": 2}]})
        );
    }
}
