use crate::domain::models::Stage;
use crate::error::IssuanceError;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Receives stage transitions from the pipeline.
pub trait StageObserver {
    fn started(&mut self, stage: Stage);
    fn succeeded(&mut self, stage: Stage);
    fn failed(&mut self, stage: Stage, error: &IssuanceError);
}

/// Logs transitions only.
pub struct LogObserver;

impl StageObserver for LogObserver {
    fn started(&mut self, stage: Stage) {
        tracing::info!(stage = stage.code(), "{}", stage.label());
    }

    fn succeeded(&mut self, stage: Stage) {
        tracing::info!(stage = stage.code(), "done");
    }

    fn failed(&mut self, stage: Stage, error: &IssuanceError) {
        tracing::error!(stage = stage.code(), kind = error.kind(), "{}", error);
    }
}

/// One terminal spinner per stage, drawn on stderr. Transitions are logged too.
pub struct SpinnerObserver {
    current: Option<ProgressBar>,
    log: LogObserver,
}

impl SpinnerObserver {
    pub fn new() -> Self {
        Self {
            current: None,
            log: LogObserver,
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for SpinnerObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl StageObserver for SpinnerObserver {
    fn started(&mut self, stage: Stage) {
        self.log.started(stage);
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::style());
        pb.set_message(format!("{} {}", stage.code(), stage.label()));
        pb.enable_steady_tick(Duration::from_millis(100));
        self.current = Some(pb);
    }

    fn succeeded(&mut self, stage: Stage) {
        if let Some(pb) = self.current.take() {
            pb.finish_with_message(format!("✓ {} {}", stage.code(), stage.label()));
        }
        self.log.succeeded(stage);
    }

    fn failed(&mut self, stage: Stage, error: &IssuanceError) {
        if let Some(pb) = self.current.take() {
            pb.abandon_with_message(format!("✗ {} {}: {}", stage.code(), stage.label(), error));
        }
        self.log.failed(stage, error);
    }
}
