//! Implementation of the `vmsg check` command.

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use miette::{miette, IntoDiagnostic, Report};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use vmsg::parser::{parse_properties, tokenize, InterpolationMode};
use vmsg::{FormatError, ParseError};

use crate::output::BundleDiagnostic;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Bundle files to check (.properties)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one problem found by the check command.
#[derive(Debug, Serialize)]
struct CheckProblem {
    file: String,
    line: usize,
    key: Option<String>,
    error: String,
}

/// Run the check command.
///
/// Every message must tokenize both with and without expression language.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let mut problems = Vec::new();

    for path in &args.files {
        let content = read_to_string(path)
            .into_diagnostic()
            .map_err(|e| miette!("Failed to read bundle file {:?}: {}", path, e))?;
        let found = check_content(path, &content);

        if !args.json {
            if found.is_empty() {
                println!(
                    "{} {}",
                    "ok".if_supports_color(Stream::Stdout, |t| t.green()),
                    path.display()
                );
            }
            for diagnostic in &found {
                eprintln!("{:?}", Report::new(diagnostic.to_diagnostic(path, &content)));
            }
        }
        problems.extend(found.into_iter().map(|f| f.into_problem(path)));
    }

    if args.json {
        let json_output = serde_json::to_string_pretty(&problems).into_diagnostic()?;
        println!("{}", json_output);
    }

    if problems.is_empty() {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}

/// A problem in one bundle file, before it is rendered.
enum Finding {
    Syntax(ParseError),
    Format {
        line: usize,
        key: String,
        error: FormatError,
    },
}

impl Finding {
    fn to_diagnostic(&self, path: &Path, content: &str) -> BundleDiagnostic {
        match self {
            Finding::Syntax(error) => BundleDiagnostic::from_parse_error(path, content, error),
            Finding::Format { line, key, error } => {
                BundleDiagnostic::from_format_error(path, content, *line, key, error)
            }
        }
    }

    fn into_problem(self, path: &Path) -> CheckProblem {
        let file = path.display().to_string();
        match self {
            Finding::Syntax(error) => {
                let line = match &error {
                    ParseError::Syntax { line, .. }
                    | ParseError::UnexpectedEof { line, .. } => *line,
                    ParseError::InvalidUtf8 => 0,
                };
                CheckProblem {
                    file,
                    line,
                    key: None,
                    error: error.to_string(),
                }
            }
            Finding::Format { line, key, error } => CheckProblem {
                file,
                line,
                key: Some(key),
                error: error.to_string(),
            },
        }
    }
}

fn check_content(path: &Path, content: &str) -> Vec<Finding> {
    let entries = match parse_properties(content) {
        Ok(entries) => entries,
        Err(error) => return vec![Finding::Syntax(error)],
    };
    tracing::debug!(path = %path.display(), entries = entries.len(), "checking bundle file");

    entries
        .into_iter()
        .filter_map(|entry| {
            let error = tokenize(&entry.value, InterpolationMode::Parameter)
                .and_then(|_| tokenize(&entry.value, InterpolationMode::ExpressionLanguage))
                .err()?;
            Some(Finding::Format {
                line: entry.line,
                key: entry.key,
                error,
            })
        })
        .collect()
}
