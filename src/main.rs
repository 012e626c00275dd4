use anyhow::Result;
use clap::{Arg, Command};
use glob::glob;
use igc_parser::{
    convert_batch, BatchSummary, ConversionEvent, ConvertOptions, ExportFormat, ExportOptions,
    ParseMode,
};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

/// Maximum recursion depth to prevent stack overflow
const MAX_RECURSION_DEPTH: usize = 100;

/// Expand input paths to a list of IGC files.
/// If a path is a file, add it directly (will be filtered later for the IGC extension).
/// If a path is a directory, recursively find all IGC files within it.
/// If a path contains glob patterns, expand them first.
fn expand_input_paths(
    input_paths: &[String],
    visited: &mut HashSet<PathBuf>,
) -> Result<Vec<PathBuf>> {
    expand_input_paths_with_depth(input_paths, visited, 0)
}

/// Internal function with depth tracking for recursion protection
fn expand_input_paths_with_depth(
    input_paths: &[String],
    visited: &mut HashSet<PathBuf>,
    depth: usize,
) -> Result<Vec<PathBuf>> {
    if depth > MAX_RECURSION_DEPTH {
        return Err(anyhow::anyhow!(
            "Maximum recursion depth exceeded ({})",
            MAX_RECURSION_DEPTH
        ));
    }
    let mut igc_files = Vec::new();

    for input_path_str in input_paths {
        if input_path_str.contains('*') || input_path_str.contains('?') {
            let paths = glob(input_path_str)
                .map_err(|e| {
                    anyhow::Error::new(e)
                        .context(format!("Invalid glob pattern '{}'", input_path_str))
                })?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| {
                    anyhow::Error::new(e)
                        .context(format!("Error expanding glob pattern '{}'", input_path_str))
                })?;

            for path in paths {
                if let Some(path_str) = path.to_str() {
                    let sub_result =
                        expand_input_paths_with_depth(&[path_str.to_string()], visited, depth + 1)?;
                    igc_files.extend(sub_result);
                }
            }
            continue;
        }

        let input_path = Path::new(input_path_str);

        match input_path.canonicalize() {
            Ok(canonical_path) => {
                if canonical_path.is_file() {
                    // Same file named twice, e.g. directly and through a glob
                    if visited.insert(canonical_path.clone()) {
                        igc_files.push(canonical_path);
                    }
                } else if canonical_path.is_dir() {
                    let mut dir_files =
                        find_igc_files_in_dir_with_depth(&canonical_path, visited, depth + 1)?;
                    igc_files.append(&mut dir_files);
                } else {
                    eprintln!(
                        "Warning: Path not found or not accessible: {}",
                        input_path_str
                    );
                }
            }
            Err(e) => {
                eprintln!(
                    "Warning: Failed to canonicalize path '{}': {}",
                    input_path_str, e
                );
            }
        }
    }

    Ok(igc_files)
}

/// Recursively find all IGC files in a directory, protecting against symlink cycles and depth overflow
fn find_igc_files_in_dir_with_depth(
    dir_path: &Path,
    visited: &mut HashSet<PathBuf>,
    depth: usize,
) -> Result<Vec<PathBuf>> {
    if depth > MAX_RECURSION_DEPTH {
        return Err(anyhow::anyhow!(
            "Maximum recursion depth exceeded in directory traversal ({})",
            MAX_RECURSION_DEPTH
        ));
    }

    let mut igc_files = Vec::new();

    let canonical_dir = match dir_path.canonicalize() {
        Ok(canonical_dir) => canonical_dir,
        Err(e) => {
            eprintln!(
                "Warning: Failed to canonicalize directory '{}': {}",
                dir_path.display(),
                e
            );
            return Ok(igc_files);
        }
    };

    // Already visited, skip to avoid cycles
    if !visited.insert(canonical_dir.clone()) || !canonical_dir.is_dir() {
        return Ok(igc_files);
    }

    let entries = match fs::read_dir(&canonical_dir) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!(
                "Warning: Cannot read directory '{}': {}",
                canonical_dir.display(),
                e
            );
            return Ok(igc_files);
        }
    };

    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                eprintln!(
                    "Warning: Cannot read entry in directory '{}': {}",
                    canonical_dir.display(),
                    e
                );
                continue;
            }
        };

        let canonical_path = match path.canonicalize() {
            Ok(canonical_path) => canonical_path,
            Err(e) => {
                eprintln!(
                    "Warning: Failed to canonicalize path in dir '{}': {}",
                    path.display(),
                    e
                );
                continue;
            }
        };

        if canonical_path.is_dir() {
            let mut sub_files =
                find_igc_files_in_dir_with_depth(&canonical_path, visited, depth + 1)?;
            igc_files.append(&mut sub_files);
        } else if canonical_path.is_file()
            && has_igc_extension(&canonical_path)
            && visited.insert(canonical_path.clone())
        {
            igc_files.push(canonical_path);
        }
    }

    // Sort the files for consistent ordering
    igc_files.sort();
    Ok(igc_files)
}

fn has_igc_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("igc"))
        .unwrap_or(false)
}

fn build_command() -> Command {
    Command::new("IGC Converter")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse IGC flight recorder logs and convert them to CSV, Tacview ACMI or JSON.")
        .arg(
            Arg::new("files")
                .help("IGC files or directories to convert. Directories are searched recursively for .IGC files. Case-insensitive, supports globbing.")
                .required(false)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: csv, acmi or json")
                .value_name("FORMAT")
                .default_value("csv"),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for output files (default: same as input file)")
                .value_name("DIR"),
        )
        .arg(
            Arg::new("jobs")
                .long("jobs")
                .short('j')
                .help("Number of files converted in parallel (default: one per CPU)")
                .value_name("N")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("lenient")
                .long("lenient")
                .help("Skip malformed lines instead of rejecting the whole file")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("force-export")
                .long("force-export")
                .help("Export every flight, including files without 3D fixes and ground tests")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output and detailed parsing information")
                .action(clap::ArgAction::SetTrue),
        )
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();

    let debug = matches.get_flag("debug");
    let lenient = matches.get_flag("lenient");
    let force_export = matches.get_flag("force-export");
    let output_dir = matches.get_one::<String>("output-dir").cloned();
    let workers = matches.get_one::<usize>("jobs").copied().unwrap_or(0);

    let format_name = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("csv");
    let format = match ExportFormat::from_name(format_name) {
        Ok(format) => format,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };

    // Check if no files were provided and show help
    let file_patterns: Vec<String> = match matches.get_many::<String>("files") {
        Some(files) => files.cloned().collect(),
        None => {
            build_command().print_help()?;
            println!();
            return Ok(());
        }
    };

    if debug {
        println!("Input patterns: {file_patterns:?}");
    }

    let mut visited = HashSet::new();
    let input_files = match expand_input_paths(&file_patterns, &mut visited) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error expanding input paths: {e:#}");
            std::process::exit(1);
        }
    };

    let mut valid_paths = Vec::new();
    for path in input_files {
        if !has_igc_extension(&path) {
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("none");
            eprintln!("Warning: Skipping file with unsupported extension '{ext}': {path:?}");
            continue;
        }
        if debug {
            println!("Added valid file: {path:?}");
        }
        valid_paths.push(path);
    }

    if valid_paths.is_empty() {
        eprintln!("Error: No valid IGC files found to process.");
        eprintln!("Supported extension: .IGC (case-insensitive)");
        eprintln!("Input patterns were: {file_patterns:?}");
        std::process::exit(1);
    }

    let options = ConvertOptions {
        export: ExportOptions {
            format,
            output_dir,
            force_export,
        },
        mode: if lenient {
            ParseMode::Lenient
        } else {
            ParseMode::Strict
        },
        workers,
        debug,
    };

    let (sender, receiver) = mpsc::channel();
    let summary = thread::scope(|scope| {
        let printer = scope.spawn(move || print_progress(receiver));
        let summary = convert_batch(&valid_paths, &options, &sender);
        drop(sender);
        if printer.join().is_err() {
            eprintln!("Warning: progress reporter stopped unexpectedly");
        }
        summary
    });

    if summary.converted == 0 {
        eprintln!(
            "Error: No files were converted out of {} files found.",
            valid_paths.len()
        );
        if summary.failed > 0 {
            eprintln!("Use --lenient to skip malformed lines or --debug for details.");
        }
        if summary.skipped > 0 {
            eprintln!("Use --force-export to export flights without usable fixes.");
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Print converter events as they arrive
fn print_progress(receiver: mpsc::Receiver<ConversionEvent>) {
    let mut total = 0;
    let mut done = 0;

    for event in receiver {
        match event {
            ConversionEvent::Started { total: count } => {
                total = count;
                println!("Converting {total} file(s)");
            }
            ConversionEvent::FileConverted {
                input,
                output,
                skipped_lines,
            } => {
                done += 1;
                println!("Progress {done}/{total}");
                println!("Converted: {} -> {}", display_name(&input), output.display());
                if skipped_lines > 0 {
                    println!("  ({skipped_lines} malformed line(s) skipped)");
                }
            }
            ConversionEvent::FileSkipped { input, reason } => {
                done += 1;
                println!("Progress {done}/{total}");
                println!("Skipped: {} ({reason})", display_name(&input));
            }
            ConversionEvent::FileFailed { input, error } => {
                done += 1;
                println!("Progress {done}/{total}");
                eprintln!("Error processing {}: {error}", display_name(&input));
            }
            ConversionEvent::Completed(BatchSummary {
                converted,
                skipped,
                failed,
            }) => {
                println!();
                println!("Done: {converted} converted, {skipped} skipped, {failed} failed");
            }
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string()
}
