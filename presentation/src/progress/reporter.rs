//! Progress reporting for searches and chat replies

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use tripscout_application::{SearchProgress, ServiceStage};

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn stage_display_name(stage: ServiceStage) -> &'static str {
    match stage {
        ServiceStage::Interpretation => "Understanding request",
        ServiceStage::Search => "Searching places",
    }
}

/// Start a steadily ticking spinner with `message`
pub fn start_spinner(prefix: &str, message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_prefix(prefix.to_string());
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Reports search progress with a spinner per stage
pub struct ProgressReporter {
    current: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchProgress for ProgressReporter {
    fn on_stage_start(&self, stage: ServiceStage) {
        let spinner = start_spinner(stage_display_name(stage), "...");
        if let Ok(mut current) = self.current.lock() {
            *current = Some(spinner);
        }
    }

    fn on_stage_complete(&self, stage: ServiceStage, success: bool) {
        let Ok(mut current) = self.current.lock() else {
            return;
        };
        if let Some(spinner) = current.take() {
            let status = if success { "done".green() } else { "failed".red() };
            spinner.finish_with_message(format!("{}", status));
        }
        if !success {
            tracing::debug!("Stage {} failed", stage);
        }
    }

    fn on_filtered(&self, kept: usize, total: usize) {
        if kept < total {
            println!(
                "{} {}",
                "->".cyan(),
                format!("kept {} of {} places after filtering", kept, total).dimmed()
            );
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl SearchProgress for SimpleProgress {
    fn on_stage_start(&self, stage: ServiceStage) {
        println!("{} {}", "->".cyan(), stage_display_name(stage).bold());
    }

    fn on_stage_complete(&self, _stage: ServiceStage, success: bool) {
        if success {
            println!("  {} done", "v".green());
        } else {
            println!("  {} failed", "x".red());
        }
    }

    fn on_filtered(&self, kept: usize, total: usize) {
        println!("  {} kept {} of {}", "v".green(), kept, total);
    }
}
