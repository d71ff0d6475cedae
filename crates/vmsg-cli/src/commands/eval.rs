//! Implementation of the `vmsg eval` command.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use vmsg::{
    AttributeValue, ExpressionLanguageFeatureLevel, Locale, MessageBundle, MessageInterpolator,
    ResourceBundle,
};

/// Arguments for the eval command.
#[derive(Debug, clap::Args)]
pub struct EvalArgs {
    /// Locale for interpolation (e.g., en, de, de-CH)
    #[arg(long, default_value = "en")]
    pub locale: String,

    /// Message descriptor to interpolate
    #[arg(long, required = true)]
    pub template: String,

    /// Directory with user bundle files (<base-name>[_<locale>].properties)
    #[arg(long)]
    pub bundle_dir: Option<PathBuf>,

    /// Base name of the user bundle files
    #[arg(long, default_value = "ValidationMessages")]
    pub base_name: String,

    /// Attributes in name=value format (repeatable)
    #[arg(short = 'a', long = "attr", value_parser = parse_key_val)]
    pub attributes: Vec<(String, String)>,

    /// Attributes as a JSON object, merged before --attr values
    #[arg(long)]
    pub attributes_json: Option<String>,

    /// Expression language level (none, variables, bean-properties, bean-methods)
    #[arg(long, default_value = "bean-properties")]
    pub el_level: ExpressionLanguageFeatureLevel,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
pub struct EvalResult {
    pub result: String,
}

/// Parse a key=value attribute string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid attribute format '{}': expected name=value", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Read a command-line attribute value as the narrowest fitting kind.
fn parse_attribute(value: String) -> AttributeValue {
    if value == "null" {
        AttributeValue::Null
    } else if let Ok(b) = value.parse::<bool>() {
        AttributeValue::from(b)
    } else if let Ok(n) = value.parse::<i64>() {
        AttributeValue::from(n)
    } else if let Ok(n) = value.parse::<f64>() {
        AttributeValue::from(n)
    } else {
        AttributeValue::from(value)
    }
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> miette::Result<i32> {
    let locale: Locale = args
        .locale
        .parse()
        .map_err(|e| miette::miette!("Invalid locale '{}': {}", args.locale, e))?;

    let user_bundle: Option<Arc<dyn MessageBundle>> = match &args.bundle_dir {
        Some(dir) => {
            let bundle = ResourceBundle::load_dir(dir, &args.base_name)
                .map_err(|e| miette::miette!("Failed to load bundle: {}", e))?;
            Some(Arc::new(bundle))
        }
        None => None,
    };
    let interpolator = MessageInterpolator::builder()
        .maybe_user_bundle(user_bundle)
        .build();

    let mut attributes: HashMap<String, AttributeValue> = match &args.attributes_json {
        Some(json) => serde_json::from_str(json)
            .map_err(|e| miette::miette!("Invalid attributes JSON: {}", e))?,
        None => HashMap::new(),
    };
    attributes.extend(
        args.attributes
            .into_iter()
            .map(|(k, v)| (k, parse_attribute(v))),
    );

    match interpolator.interpolate(&args.template, &attributes, &locale, args.el_level) {
        Ok(result) => {
            if args.json {
                let output = EvalResult { result };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output)
                        .expect("JSON serialization should not fail")
                );
            } else {
                println!("{}", result);
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            if args.json {
                let output = serde_json::json!({
                    "error": e.to_string()
                });
                eprintln!(
                    "{}",
                    serde_json::to_string_pretty(&output)
                        .expect("JSON serialization should not fail")
                );
            } else {
                eprintln!("Interpolation error: {}", e);
            }
            Ok(exitcode::DATAERR)
        }
    }
}
