/// Content Linter — validates album content and reports authoring issues.
///
/// Usage: content_linter <album.ron | album_dir> [--verbose]

use album_engine::core::content::ContentTable;
use log::{error, info};
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: content_linter <album.ron | album_dir> [--verbose]");
        process::exit(0);
    }

    let verbose = args[2..].iter().any(|a| a == "--verbose" || a == "-v");
    album_engine::logging::init(verbose);

    let content_path = Path::new(&args[1]);
    let files = if content_path.is_file() {
        vec![content_path.to_path_buf()]
    } else if content_path.is_dir() {
        let mut files = Vec::new();
        collect_ron_files(content_path, &mut files);
        files.sort();
        files
    } else {
        eprintln!("ERROR: Path '{}' does not exist", content_path.display());
        process::exit(1);
    };

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for file in &files {
        match ContentTable::load_from_ron(file) {
            Ok(table) => {
                info!(
                    "{}: {} chapters, {} panels",
                    file.display(),
                    table.chapters.len(),
                    table.panel_count()
                );
                if table.is_empty() {
                    warnings.push(format!("{}: album has no chapters", file.display()));
                }
                for warning in table.lint() {
                    warnings.push(format!("{}: {}", file.display(), warning));
                }
            }
            Err(e) => {
                error!("failed to load {}", file.display());
                errors.push(format!("{}: {}", file.display(), e));
            }
        }
    }

    println!("\n=== Content Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} files, {} errors, {} warnings",
        files.len(),
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

/// Album files are any `.ron` file except engine configs.
fn collect_ron_files(dir: &Path, files: &mut Vec<std::path::PathBuf>) {
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                collect_ron_files(&path, files);
            } else if path.extension().and_then(|s| s.to_str()) == Some("ron") {
                let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
                if stem != "config" && !stem.ends_with("_config") {
                    files.push(path);
                }
            }
        }
    }
}
