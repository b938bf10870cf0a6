//! Check and evaluate rules against JSON input

use serde_json::Number;

use super::CliError;
use crate::{Rule, json};

/// How the rule result is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Projection {
    /// Whatever the rule evaluates to
    #[default]
    Auto,
    /// A boolean condition
    Bool,
    /// An integer (floats truncate)
    Int,
    /// A float
    Float,
}

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The rule text
    pub rule: String,
    /// JSON record to evaluate against
    pub input: Option<String>,
    /// Result projection
    pub projection: Projection,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Rule evaluated successfully
    Success(serde_json::Value),
}

/// Compile the rule and, unless only checking syntax, evaluate it
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let rule = Rule::compile(&options.rule)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let document: serde_json::Value = serde_json::from_str(json_str)?;
    let context = json::from_json(&document).ok_or(CliError::NullInput)?;

    let output = match options.projection {
        Projection::Bool => serde_json::Value::Bool(rule.bool_value(&context)?),
        Projection::Int => serde_json::Value::from(rule.int_value(&context)?),
        Projection::Float => Number::from_f64(rule.float_value(&context)?)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Projection::Auto => match rule.evaluate(&context)? {
            None => serde_json::Value::Bool(true),
            Some(value) => {
                json::to_json(&value).ok_or(CliError::UnprintableResult(value.type_name()))?
            }
        },
    };
    Ok(CheckResult::Success(output))
}
