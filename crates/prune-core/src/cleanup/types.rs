use serde::Serialize;

/// What happened to one function during a pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionReport {
    pub function: String,
    /// Published versions, `$LATEST` excluded.
    pub candidates: Vec<String>,
    /// Versions referenced by at least one alias.
    pub retained: Vec<String>,
    /// Candidates minus retained.
    pub orphaned: Vec<String>,
    /// Orphans actually deleted. Empty on a dry run.
    pub deleted: Vec<String>,
    /// Orphans logged as `Would Delete` on a dry run.
    pub would_delete: Vec<String>,
}

impl FunctionReport {
    pub fn new(function: String, candidates: Vec<String>, retained: Vec<String>, orphaned: Vec<String>) -> Self {
        Self {
            function,
            candidates,
            retained,
            orphaned,
            deleted: Vec::new(),
            would_delete: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionFailure {
    pub function: String,
    pub error_code: &'static str,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PruneSummary {
    pub dry_run: bool,
    pub functions: Vec<FunctionReport>,
    pub failures: Vec<FunctionFailure>,
    pub total_orphaned: usize,
    pub total_deleted: usize,
}

impl PruneSummary {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            functions: Vec::new(),
            failures: Vec::new(),
            total_orphaned: 0,
            total_deleted: 0,
        }
    }

    pub fn add_report(&mut self, report: FunctionReport) {
        self.total_orphaned += report.orphaned.len();
        self.total_deleted += report.deleted.len();
        self.functions.push(report);
    }

    pub fn add_failure(&mut self, failure: FunctionFailure) {
        self.failures.push(failure);
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_totals_accumulate() {
        let mut summary = PruneSummary::new(false);

        let mut report = FunctionReport::new(
            "f1".to_string(),
            vec!["1".to_string(), "2".to_string()],
            vec![],
            vec!["1".to_string(), "2".to_string()],
        );
        report.deleted.push("1".to_string());
        summary.add_report(report);

        summary.add_report(FunctionReport::new(
            "f2".to_string(),
            vec!["1".to_string()],
            vec!["1".to_string()],
            vec![],
        ));

        assert_eq!(summary.functions.len(), 2);
        assert_eq!(summary.total_orphaned, 2);
        assert_eq!(summary.total_deleted, 1);
        assert!(!summary.has_failures());
    }
}
