//! Coverage command implementation.

use std::path::PathBuf;

use clap::Args;
use miette::{miette, IntoDiagnostic, Result};
use serde::Serialize;
use vmsg::{BundleWarning, ResourceBundle};

use crate::output::table::{format_coverage_table, LocaleCoverage};

/// Arguments for the coverage command.
#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// Directory containing the bundle files.
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Base name of the bundle files.
    #[arg(long, default_value = "ValidationMessages")]
    pub base_name: String,

    /// Exit with non-zero code if any translation is incomplete.
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for coverage data.
#[derive(Debug, Serialize)]
struct CoverageJson {
    locale: String,
    translated: usize,
    total: usize,
    missing: Vec<String>,
    unknown: Vec<String>,
}

/// Compare every locale of a bundle against its root table.
fn collect_coverage(bundle: &ResourceBundle) -> Vec<LocaleCoverage> {
    let root_count = bundle.keys("").len();
    bundle
        .tags()
        .into_iter()
        .filter(|tag| !tag.is_empty())
        .map(|tag| {
            let mut missing = Vec::new();
            let mut unknown = Vec::new();
            for warning in bundle.validate(tag) {
                match warning {
                    BundleWarning::MissingKey { key, .. } => missing.push(key),
                    BundleWarning::UnknownKey { key, .. } => unknown.push(key),
                }
            }
            LocaleCoverage {
                locale: tag.to_string(),
                translated: root_count - missing.len(),
                missing,
                unknown,
            }
        })
        .collect()
}

/// Run the coverage command.
pub fn run_coverage(args: CoverageArgs) -> Result<i32> {
    let bundle = ResourceBundle::load_dir(&args.dir, &args.base_name)
        .map_err(|e| miette!("Failed to load bundle from {:?}: {}", args.dir, e))?;

    if bundle.tags().first() != Some(&"") {
        return Err(miette!(
            "No root bundle {}.properties in {:?}",
            args.base_name,
            args.dir
        ));
    }

    let root_count = bundle.keys("").len();
    let coverage_data = collect_coverage(&bundle);

    // Check if any translation is incomplete
    let any_incomplete = coverage_data.iter().any(|c| !c.missing.is_empty());

    // Output results
    if args.json {
        let json_data: Vec<CoverageJson> = coverage_data
            .iter()
            .map(|c| CoverageJson {
                locale: c.locale.clone(),
                translated: c.translated,
                total: root_count,
                missing: c.missing.clone(),
                unknown: c.unknown.clone(),
            })
            .collect();

        let json_output = serde_json::to_string_pretty(&json_data).into_diagnostic()?;
        println!("{}", json_output);
    } else {
        // Print ASCII table
        let table = format_coverage_table(root_count, &coverage_data);
        println!("{}", table);

        // Print missing keys per locale
        for locale_coverage in &coverage_data {
            if !locale_coverage.missing.is_empty() {
                println!("\nMissing in {}:", locale_coverage.locale);
                for key in &locale_coverage.missing {
                    println!("  - {}", key);
                }
            }
        }
    }

    // Determine exit code
    if args.strict && any_incomplete {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
