//! Single-file and batch conversion of IGC files
//!
//! A batch runs on scoped worker threads. Workers claim the next file from a
//! shared index, parse it with their own session, export it, and report the
//! outcome as a [`ConversionEvent`] on the caller's channel. A failing file
//! is reported and the worker moves on.

use crate::error::ParseError;
use crate::export::{export_flight, ExportOptions};
use crate::filters::should_skip_export;
use crate::parser::{parse_igc_file_with_mode, ParseMode};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Sender;
use std::thread;

/// Runtime configuration of a conversion run
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub export: ExportOptions,
    pub mode: ParseMode,
    /// Worker threads for batches; 0 means one per available CPU
    pub workers: usize,
    pub debug: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            export: ExportOptions::default(),
            mode: ParseMode::Strict,
            workers: 0,
            debug: false,
        }
    }
}

/// What happened to one input file
#[derive(Debug)]
pub enum ConversionOutcome {
    Converted {
        output: PathBuf,
        /// Lines skipped in lenient mode
        diagnostics: Vec<ParseError>,
    },
    Skipped {
        reason: String,
    },
}

/// Progress reported by [`convert_batch`]
#[derive(Debug)]
pub enum ConversionEvent {
    Started {
        total: usize,
    },
    FileConverted {
        input: PathBuf,
        output: PathBuf,
        skipped_lines: usize,
    },
    FileSkipped {
        input: PathBuf,
        reason: String,
    },
    FileFailed {
        input: PathBuf,
        error: String,
    },
    Completed(BatchSummary),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.converted + self.skipped + self.failed
    }
}

/// Parse one IGC file and export it according to `options`
pub fn convert_file(input: &Path, options: &ConvertOptions) -> Result<ConversionOutcome> {
    let (flight, diagnostics) = parse_igc_file_with_mode(input, options.mode, options.debug)?;

    if options.debug {
        for diagnostic in &diagnostics {
            eprintln!("Skipped line: {}", diagnostic);
        }
    }

    let (skip, reason) = should_skip_export(&flight, options.export.force_export);
    if skip {
        if options.debug {
            println!("Skipping export of {}: {}", input.display(), reason);
        }
        return Ok(ConversionOutcome::Skipped { reason });
    }

    let output = export_flight(&flight, input, &options.export).with_context(|| {
        format!(
            "Failed to export {} as {}",
            input.display(),
            options.export.format
        )
    })?;

    if options.debug {
        println!("Exported {} to {}", input.display(), output.display());
    }

    Ok(ConversionOutcome::Converted {
        output,
        diagnostics,
    })
}

/// Convert many files in parallel, reporting each outcome on `events`
///
/// Events are sent in completion order, bracketed by `Started` and
/// `Completed`. A dropped receiver does not stop the batch.
pub fn convert_batch(
    inputs: &[PathBuf],
    options: &ConvertOptions,
    events: &Sender<ConversionEvent>,
) -> BatchSummary {
    let _ = events.send(ConversionEvent::Started {
        total: inputs.len(),
    });

    let workers = worker_count(options.workers, inputs.len());
    let next_index = AtomicUsize::new(0);
    let converted = AtomicUsize::new(0);
    let skipped = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    if options.debug {
        println!(
            "Converting {} files with {} worker(s)",
            inputs.len(),
            workers
        );
    }

    thread::scope(|scope| {
        for _ in 0..workers {
            let events = events.clone();
            let next_index = &next_index;
            let converted = &converted;
            let skipped = &skipped;
            let failed = &failed;

            scope.spawn(move || loop {
                let index = next_index.fetch_add(1, Ordering::SeqCst);
                let Some(input) = inputs.get(index) else {
                    break;
                };

                let event = match convert_file(input, options) {
                    Ok(ConversionOutcome::Converted {
                        output,
                        diagnostics,
                    }) => {
                        converted.fetch_add(1, Ordering::SeqCst);
                        ConversionEvent::FileConverted {
                            input: input.clone(),
                            output,
                            skipped_lines: diagnostics.len(),
                        }
                    }
                    Ok(ConversionOutcome::Skipped { reason }) => {
                        skipped.fetch_add(1, Ordering::SeqCst);
                        ConversionEvent::FileSkipped {
                            input: input.clone(),
                            reason,
                        }
                    }
                    Err(e) => {
                        failed.fetch_add(1, Ordering::SeqCst);
                        ConversionEvent::FileFailed {
                            input: input.clone(),
                            error: format!("{:#}", e),
                        }
                    }
                };
                let _ = events.send(event);
            });
        }
    });

    let summary = BatchSummary {
        converted: converted.into_inner(),
        skipped: skipped.into_inner(),
        failed: failed.into_inner(),
    };
    let _ = events.send(ConversionEvent::Completed(summary));
    summary
}

fn worker_count(requested: usize, files: usize) -> usize {
    let workers = if requested == 0 {
        thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    } else {
        requested
    };
    workers.min(files).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportFormat;
    use std::fs;
    use std::sync::mpsc;

    const FLIGHT: &str = "AFLA9WL\nHFDTE150611\nB1511094538002N07249279WA-00940004000109\nB1512094541000N07249279WA-00940090000109\n";

    #[test]
    fn test_worker_count() {
        assert_eq!(worker_count(4, 2), 2);
        assert_eq!(worker_count(2, 10), 2);
        assert_eq!(worker_count(3, 0), 1);
        assert!(worker_count(0, 100) >= 1);
    }

    #[test]
    fn test_convert_file_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("flight.igc");
        fs::write(&input, FLIGHT).unwrap();

        let options = ConvertOptions {
            export: ExportOptions {
                format: ExportFormat::Acmi,
                ..ExportOptions::default()
            },
            ..ConvertOptions::default()
        };
        match convert_file(&input, &options).unwrap() {
            ConversionOutcome::Converted {
                output,
                diagnostics,
            } => {
                assert_eq!(output, dir.path().join("flight.acmi"));
                assert!(output.exists());
                assert!(diagnostics.is_empty());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_convert_file_skips_empty_flight() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.igc");
        fs::write(&input, "AFLA9WL\nHFDTE150611\n").unwrap();

        let outcome = convert_file(&input, &ConvertOptions::default()).unwrap();
        assert!(matches!(outcome, ConversionOutcome::Skipped { .. }));
        assert!(!dir.path().join("empty.csv").exists());
    }

    #[test]
    fn test_batch_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.igc");
        let bad = dir.path().join("bad.igc");
        let missing = dir.path().join("missing.igc");
        fs::write(&good, FLIGHT).unwrap();
        fs::write(&bad, "KTHISISATESTKSECTION\n").unwrap();

        let options = ConvertOptions {
            export: ExportOptions {
                format: ExportFormat::Acmi,
                ..ExportOptions::default()
            },
            workers: 2,
            ..ConvertOptions::default()
        };
        let (sender, receiver) = mpsc::channel();
        let summary = convert_batch(&[good.clone(), bad.clone(), missing], &options, &sender);
        drop(sender);

        assert_eq!(
            summary,
            BatchSummary {
                converted: 1,
                skipped: 0,
                failed: 2
            }
        );

        let events: Vec<ConversionEvent> = receiver.iter().collect();
        assert_eq!(events.len(), 5);
        assert!(matches!(events[0], ConversionEvent::Started { total: 3 }));
        assert!(matches!(events[4], ConversionEvent::Completed(s) if s == summary));
        assert!(events.iter().any(|event| matches!(
            event,
            ConversionEvent::FileFailed { input, error }
                if *input == bad && error.contains("K record found before any J record declaration")
        )));
        assert!(dir.path().join("good.acmi").exists());
    }
}
