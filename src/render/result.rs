// ABOUTME: Binding and session result types for render runs
// ABOUTME: Tracks per-binding outcomes and aggregates them into a session report

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum BindingStatus {
    Pending,
    Running,
    Success,
    Failed,
    Skipped,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingResult {
    pub template: String,
    pub target: String,
    pub status: BindingStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration: Option<Duration>,
    /// Bytes appended into the target container
    pub rendered_bytes: Option<usize>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResult {
    pub page: String,
    pub run_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration: Option<Duration>,
    pub status: SessionStatus,
    pub bindings: Vec<BindingResult>,
    pub summary: SessionSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Running,
    Success,
    Failed,
    PartialSuccess,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionSummary {
    pub total_bindings: usize,
    pub successful_bindings: usize,
    pub failed_bindings: usize,
    pub skipped_bindings: usize,
    pub success_rate: f64,
}

impl BindingResult {
    pub fn new(template: String, target: String) -> Self {
        Self {
            template,
            target,
            status: BindingStatus::Pending,
            start_time: Utc::now(),
            end_time: None,
            duration: None,
            rendered_bytes: None,
            error: None,
        }
    }

    pub fn mark_started(&mut self) {
        self.status = BindingStatus::Running;
        self.start_time = Utc::now();
    }

    pub fn mark_success(&mut self, rendered_bytes: usize) {
        self.finish(BindingStatus::Success);
        self.rendered_bytes = Some(rendered_bytes);
    }

    pub fn mark_failed(&mut self, error: String) {
        self.finish(BindingStatus::Failed);
        self.error = Some(error);
    }

    pub fn mark_skipped(&mut self) {
        self.finish(BindingStatus::Skipped);
    }

    fn finish(&mut self, status: BindingStatus) {
        self.status = status;
        self.end_time = Some(Utc::now());
        self.duration = Some(
            (Utc::now() - self.start_time)
                .to_std()
                .unwrap_or(Duration::ZERO),
        );
    }

    pub fn is_successful(&self) -> bool {
        self.status == BindingStatus::Success
    }

    pub fn is_failed(&self) -> bool {
        self.status == BindingStatus::Failed
    }

    pub fn label(&self) -> String {
        format!("{} -> {}", self.template, self.target)
    }
}

impl SessionResult {
    pub fn new(page: String) -> Self {
        Self {
            page,
            run_id: Uuid::new_v4().to_string(),
            start_time: Utc::now(),
            end_time: None,
            duration: None,
            status: SessionStatus::Running,
            bindings: Vec::new(),
            summary: SessionSummary::default(),
        }
    }

    pub fn add_binding_result(&mut self, result: BindingResult) {
        self.bindings.push(result);
        self.update_summary();
    }

    pub fn mark_completed(&mut self) {
        self.end_time = Some(Utc::now());
        self.duration = Some(
            (Utc::now() - self.start_time)
                .to_std()
                .unwrap_or(Duration::ZERO),
        );
        self.update_status();
        self.update_summary();
    }

    pub fn has_failures(&self) -> bool {
        self.bindings.iter().any(|b| b.is_failed())
    }

    fn update_status(&mut self) {
        let has_failed = self.bindings.iter().any(|b| b.is_failed());
        let has_success = self.bindings.iter().any(|b| b.is_successful());

        self.status = match (has_failed, has_success) {
            (false, _) => SessionStatus::Success,
            (true, false) => SessionStatus::Failed,
            (true, true) => SessionStatus::PartialSuccess,
        };
    }

    fn update_summary(&mut self) {
        let total = self.bindings.len();
        let successful = self.bindings.iter().filter(|b| b.is_successful()).count();
        let failed = self.bindings.iter().filter(|b| b.is_failed()).count();
        let skipped = self
            .bindings
            .iter()
            .filter(|b| b.status == BindingStatus::Skipped)
            .count();

        let success_rate = if total > 0 {
            (successful as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        self.summary = SessionSummary {
            total_bindings: total,
            successful_bindings: successful,
            failed_bindings: failed,
            skipped_bindings: skipped,
            success_rate,
        };
    }
}

impl std::fmt::Display for BindingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindingStatus::Pending => write!(f, "pending"),
            BindingStatus::Running => write!(f, "running"),
            BindingStatus::Success => write!(f, "success"),
            BindingStatus::Failed => write!(f, "failed"),
            BindingStatus::Skipped => write!(f, "skipped"),
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::Running => write!(f, "running"),
            SessionStatus::Success => write!(f, "success"),
            SessionStatus::Failed => write!(f, "failed"),
            SessionStatus::PartialSuccess => write!(f, "partial_success"),
        }
    }
}
