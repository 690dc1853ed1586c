use crate::exec::result::{ExecutionResult, Outcome};
use std::fmt;

/// Outcome counts for one batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub succeeded: usize,
    pub failed: usize,
    pub cancelled: usize,
    pub skipped: usize,
    pub previewed: usize,
}

impl Summary {
    /// Number of results counted, not the number of commands submitted
    pub fn total(&self) -> usize {
        self.succeeded + self.failed + self.cancelled + self.skipped + self.previewed
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// True when every counted result succeeded
    pub fn all_succeeded(&self) -> bool {
        self.total() > 0 && self.succeeded == self.total()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} succeeded, {} failed, {} cancelled, {} skipped",
            self.succeeded, self.failed, self.cancelled, self.skipped
        )?;
        if self.previewed > 0 {
            write!(f, ", {} previewed", self.previewed)?;
        }
        Ok(())
    }
}

/// Count a batch's results by outcome kind
pub fn summarize(results: &[ExecutionResult]) -> Summary {
    results
        .iter()
        .fold(Summary::default(), |mut summary, result| {
            match result.outcome {
                Outcome::Succeeded => summary.succeeded += 1,
                Outcome::Failed(_) => summary.failed += 1,
                Outcome::Cancelled => summary.cancelled += 1,
                Outcome::Skipped => summary.skipped += 1,
                Outcome::PreviewedOnly => summary.previewed += 1,
            }
            summary
        })
}
