//! Agreement report generation.
//!
//! A report collects named numerical checks (round-trips, fast/precise
//! agreement, degenerate-input fallbacks), each with the worst error seen over
//! its samples and the tolerance it was held to. Reports serialize to JSON for
//! CI artifacts.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Check outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    Passed,
    Failed,
    Skipped,
}

impl CheckStatus {
    pub fn icon(&self) -> &'static str {
        match self {
            CheckStatus::Passed => "✓",
            CheckStatus::Failed => "✗",
            CheckStatus::Skipped => "○",
        }
    }
}

/// A single numerical check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Check ID (e.g. "EQ-001").
    pub id: String,
    pub name: String,
    pub category: String,
    pub status: CheckStatus,
    /// Inputs evaluated.
    pub samples: u32,
    /// Largest deviation observed.
    pub max_error: f32,
    pub tolerance: f32,
    pub duration: Duration,
    /// First failing input, rendered for humans.
    pub counterexample: Option<String>,
}

impl CheckResult {
    pub fn new(id: &str, name: &str, category: &str, tolerance: f32) -> Self {
        CheckResult {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            status: CheckStatus::Skipped,
            samples: 0,
            max_error: 0.0,
            tolerance,
            duration: Duration::ZERO,
            counterexample: None,
        }
    }

    /// Records one sample's error; the first sample over tolerance becomes
    /// the counterexample.
    pub fn record(&mut self, error: f32, input: impl FnOnce() -> String) {
        self.samples += 1;
        // NaN must count as a failure.
        if error.is_nan() || error > self.max_error {
            self.max_error = error;
        }
        let within = error <= self.tolerance;
        if !within && self.counterexample.is_none() {
            self.counterexample = Some(input());
        }
    }

    /// Settles the status from the recorded samples.
    pub fn finish(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self.status = if self.samples == 0 {
            CheckStatus::Skipped
        } else if self.counterexample.is_some() {
            CheckStatus::Failed
        } else {
            CheckStatus::Passed
        };
        self
    }
}

/// Category summary statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryStats {
    pub total: u32,
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
    pub samples: u64,
    pub total_duration: Duration,
}

impl CategoryStats {
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.passed as f64 / self.total as f64) * 100.0
    }

    pub fn add_result(&mut self, result: &CheckResult) {
        self.total += 1;
        self.samples += u64::from(result.samples);
        self.total_duration += result.duration;
        match result.status {
            CheckStatus::Passed => self.passed += 1,
            CheckStatus::Failed => self.failed += 1,
            CheckStatus::Skipped => self.skipped += 1,
        }
    }
}

/// Full agreement report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgreementReport {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    /// RNG seed the inputs were drawn from.
    pub seed: u64,
    pub results: Vec<CheckResult>,
    pub metadata: BTreeMap<String, String>,
}

impl AgreementReport {
    pub fn overall_stats(&self) -> CategoryStats {
        let mut stats = CategoryStats::default();
        for result in &self.results {
            stats.add_result(result);
        }
        stats
    }

    pub fn stats_by_category(&self) -> BTreeMap<String, CategoryStats> {
        let mut map: BTreeMap<String, CategoryStats> = BTreeMap::new();
        for result in &self.results {
            map.entry(result.category.clone())
                .or_default()
                .add_result(result);
        }
        map
    }

    /// True when nothing failed. Skipped checks do not count against it.
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.status != CheckStatus::Failed)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("serialize agreement report")
    }

    /// Save report as JSON.
    pub fn save_json(&self, path: &Path) -> anyhow::Result<()> {
        let json = self.to_json()?;
        fs::write(path, json).with_context(|| format!("write report to {}", path.display()))
    }
}

/// Report builder with fluent API.
pub struct ReportBuilder {
    report: AgreementReport,
}

impl ReportBuilder {
    pub fn new(title: &str) -> Self {
        ReportBuilder {
            report: AgreementReport {
                title: title.to_string(),
                generated_at: Utc::now(),
                seed: 0,
                results: Vec::new(),
                metadata: BTreeMap::new(),
            },
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.report.seed = seed;
        self
    }

    pub fn metadata(mut self, key: &str, value: &str) -> Self {
        self.report
            .metadata
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn add_check(mut self, result: CheckResult) -> Self {
        self.report.results.push(result);
        self
    }

    pub fn build(self) -> AgreementReport {
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passing(id: &str, category: &str) -> CheckResult {
        let mut check = CheckResult::new(id, "passing", category, 1e-5);
        check.record(1e-7, || "x".to_string());
        check.finish(Duration::from_millis(1))
    }

    #[test]
    fn records_worst_error_and_first_counterexample() {
        let mut check = CheckResult::new("EQ-001", "agreement", "Euler", 1e-3);
        check.record(1e-4, || "a".to_string());
        check.record(5e-3, || "b".to_string());
        check.record(9e-3, || "c".to_string());
        let check = check.finish(Duration::ZERO);

        assert_eq!(check.samples, 3);
        assert_eq!(check.max_error, 9e-3);
        assert_eq!(check.counterexample.as_deref(), Some("b"));
        assert_eq!(check.status, CheckStatus::Failed);
    }

    #[test]
    fn nan_error_fails() {
        let mut check = CheckResult::new("AA-001", "nan", "Axis-angle", 1e-3);
        check.record(f32::NAN, || "identity".to_string());
        assert_eq!(check.finish(Duration::ZERO).status, CheckStatus::Failed);
    }

    #[test]
    fn empty_check_is_skipped() {
        let check = CheckResult::new("X-001", "empty", "X", 1.0).finish(Duration::ZERO);
        assert_eq!(check.status, CheckStatus::Skipped);
    }

    #[test]
    fn category_stats() {
        let mut failing = CheckResult::new("B-002", "failing", "B", 1e-5);
        failing.record(1.0, || "big".to_string());

        let report = ReportBuilder::new("Category Test")
            .seed(7)
            .add_check(passing("A-001", "A"))
            .add_check(passing("A-002", "A"))
            .add_check(passing("B-001", "B"))
            .add_check(failing.finish(Duration::ZERO))
            .build();

        let by_cat = report.stats_by_category();
        assert_eq!(by_cat["A"].passed, 2);
        assert_eq!(by_cat["B"].passed, 1);
        assert_eq!(by_cat["B"].failed, 1);
        assert!(!report.all_passed());
        assert_eq!(report.overall_stats().samples, 4);
    }

    #[test]
    fn serializes_to_json() -> anyhow::Result<()> {
        let report = ReportBuilder::new("JSON Test")
            .metadata("profile", "debug")
            .add_check(passing("J-001", "Json"))
            .build();
        let json = report.to_json()?;
        assert!(json.contains("J-001"));
        assert!(json.contains("\"profile\": \"debug\""));
        let back: AgreementReport = serde_json::from_str(&json)?;
        assert_eq!(back.results.len(), 1);
        Ok(())
    }
}
