//! Parallel batch execution

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use indicatif::ProgressBar;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::{OutputNaming, ResizeJob};
use crate::error::{ResizeError, Result};
use crate::processing::{output_path, FileOutcome, ResamplingEngine};

pub mod progress;

pub use progress::*;

/// Runs one [`ResizeJob`] over a list of files on a dedicated worker pool
pub struct BatchRunner<'a, E: ResamplingEngine + ?Sized> {
    engine: &'a E,
    job: &'a ResizeJob,
    naming: &'a OutputNaming,
    delete_fails: bool,
    progress: bool,
}

impl<'a, E: ResamplingEngine + ?Sized> BatchRunner<'a, E> {
    pub fn new(engine: &'a E, job: &'a ResizeJob, naming: &'a OutputNaming) -> Self {
        Self {
            engine,
            job,
            naming,
            delete_fails: false,
            progress: false,
        }
    }

    /// Remove source files that fail to resize
    pub fn delete_fails(mut self, delete: bool) -> Self {
        self.delete_fails = delete;
        self
    }

    /// Draw a progress bar while running
    pub fn progress(mut self, show: bool) -> Self {
        self.progress = show;
        self
    }

    /// Process every file. A per-file failure is recorded and the batch goes
    /// on; any other error stops the remaining work and is returned.
    pub fn run(&self, files: &[PathBuf]) -> Result<BatchReport> {
        let start_time = Instant::now();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.job.threads())
            .thread_name(|index| format!("resize-worker-{}", index))
            .build()
            .map_err(|e| ResizeError::parallel(format!("Failed to start worker pool: {}", e)))?;

        info!(
            "Resizing {} files on {} threads",
            files.len(),
            self.job.threads()
        );

        let outputs: Vec<PathBuf> = files
            .iter()
            .map(|input| output_path(input, self.naming, self.job.output_format()))
            .collect();
        let conflicts = shared_outputs(&outputs);

        let bar = batch_bar(files.len(), self.progress);
        let stop = AtomicBool::new(false);
        let mut outcomes: Vec<Option<Result<FileOutcome>>> = pool.install(|| {
            files
                .par_iter()
                .zip(outputs.par_iter())
                .map(|(input, output)| {
                    if stop.load(Ordering::Relaxed) {
                        return None;
                    }
                    let outcome = if conflicts.contains(output) {
                        Err(ResizeError::OutputConflict {
                            file: input.clone(),
                            output: output.clone(),
                        })
                    } else {
                        self.engine.process(self.job, input, output)
                    };
                    if matches!(&outcome, Err(e) if !e.is_recoverable()) {
                        stop.store(true, Ordering::Relaxed);
                    }
                    self.record(input, output, &outcome, &bar);
                    Some(outcome)
                })
                .collect()
        });
        bar.finish_and_clear();

        let fatal = outcomes
            .iter()
            .position(|outcome| matches!(outcome, Some(Err(e)) if !e.is_recoverable()));
        if let Some(index) = fatal {
            if let Some(Err(error)) = outcomes.swap_remove(index) {
                return Err(error);
            }
        }

        let mut report = BatchReport::default();
        for (input, outcome) in files.iter().zip(outcomes) {
            match outcome {
                Some(Ok(FileOutcome::Resized { .. })) => report.resized += 1,
                Some(Ok(FileOutcome::Unchanged { .. })) => report.unchanged += 1,
                Some(Err(error)) => {
                    // A naming clash says nothing about the source itself
                    let bad_source = !matches!(error, ResizeError::OutputConflict { .. });
                    if self.delete_fails && bad_source && remove_source(input) {
                        report.deleted.push(input.clone());
                    }
                    report.failures.push(FileFailure {
                        input: input.clone(),
                        error,
                    });
                }
                None => {}
            }
        }
        report.elapsed = start_time.elapsed();

        info!(
            "Batch finished in {:.2}s: {} resized, {} unchanged, {} failed",
            report.elapsed.as_secs_f64(),
            report.resized,
            report.unchanged,
            report.failed()
        );

        Ok(report)
    }

    fn record(
        &self,
        input: &Path,
        output: &Path,
        outcome: &Result<FileOutcome>,
        bar: &ProgressBar,
    ) {
        bar.set_message(file_label(input));
        match outcome {
            Ok(done) => debug!("{} -> {}: {}", input.display(), output.display(), done),
            Err(e) => warn!("Failed to resize {}: {}", input.display(), e),
        }
        bar.inc(1);
    }
}

/// Output paths claimed by more than one input
fn shared_outputs(outputs: &[PathBuf]) -> HashSet<&PathBuf> {
    let mut seen = HashSet::new();
    outputs
        .iter()
        .filter(|output| !seen.insert(*output))
        .collect()
}

fn remove_source(input: &Path) -> bool {
    match fs::remove_file(input) {
        Ok(()) => {
            info!("Deleted {}", input.display());
            true
        }
        Err(e) => {
            warn!("Could not delete {}: {}", input.display(), e);
            false
        }
    }
}

/// A file that could not be resized
#[derive(Debug)]
pub struct FileFailure {
    pub input: PathBuf,
    pub error: ResizeError,
}

/// Totals of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub resized: usize,
    pub unchanged: usize,
    pub failures: Vec<FileFailure>,

    /// Sources removed after failing
    pub deleted: Vec<PathBuf>,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Number of files the batch looked at
    pub fn total(&self) -> usize {
        self.resized + self.unchanged + self.failed()
    }

    /// True when no file failed
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn files_per_second(&self) -> f64 {
        if self.elapsed.is_zero() {
            return 0.0;
        }
        self.total() as f64 / self.elapsed.as_secs_f64()
    }
}
