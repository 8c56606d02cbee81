//! Executes fixture cases against the safe core.
//!
//! Each function renders its result as text so fixtures can compare plain
//! strings. A rejected `setlocale` renders as `NULL`.

use lconvshim_core::locale::{Category, call_outcome, locale_conv, resolve_locale, set_locale};
use lconvshim_membrane::{RuntimeDecision, SafetyLevel};
use serde_json::Value;

use crate::error::HarnessError;

/// Rendering of a null `setlocale` return.
pub const NULL_OUTPUT: &str = "NULL";

/// Run one fixture case under `mode` and render its output.
pub fn execute_fixture_case(
    function: &str,
    inputs: &Value,
    mode: &str,
) -> Result<String, HarnessError> {
    let level = SafetyLevel::from_str_loose(mode);
    match function {
        "setlocale" => run_setlocale(inputs, level),
        "localeconv" => run_localeconv(inputs),
        "category_value" => run_category_value(inputs),
        other => Err(HarnessError::UnknownFunction(other.to_string())),
    }
}

/// Category input: either a raw integer or a macro name such as `"LC_ALL"`.
fn category_input(function: &str, inputs: &Value) -> Result<i32, HarnessError> {
    match inputs.get("category") {
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .ok_or_else(|| HarnessError::bad_input(function, format!("category {n} out of range"))),
        Some(Value::String(name)) => Category::from_name(name)
            .map(Category::as_raw)
            .ok_or_else(|| HarnessError::bad_input(function, format!("unknown category {name}"))),
        _ => Err(HarnessError::bad_input(function, "missing category")),
    }
}

/// The membrane decision a case would produce, for log records.
///
/// Returns `None` for functions that never reach the membrane and for inputs
/// the case runner would reject.
pub fn decision_for_case(function: &str, inputs: &Value, mode: &str) -> Option<RuntimeDecision> {
    let level = SafetyLevel::from_str_loose(mode);
    match function {
        "setlocale" => {
            let category = category_input(function, inputs).ok()?;
            let name = locale_input(inputs).ok()?;
            let result = resolve_locale(category, name, level);
            Some(RuntimeDecision::setlocale(category, level, call_outcome(&result)))
        }
        "localeconv" => Some(RuntimeDecision::localeconv(level)),
        _ => None,
    }
}

fn locale_input(inputs: &Value) -> Result<Option<&[u8]>, HarnessError> {
    match inputs.get("locale") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_bytes())),
        Some(other) => Err(HarnessError::bad_input(
            "setlocale",
            format!("locale must be a string or null, got {other}"),
        )),
    }
}

fn run_setlocale(inputs: &Value, level: SafetyLevel) -> Result<String, HarnessError> {
    let category = category_input("setlocale", inputs)?;
    let name = locale_input(inputs)?;
    Ok(match set_locale(category, name, level) {
        Ok(outcome) => outcome.locale_name().to_string_lossy().into_owned(),
        Err(_) => NULL_OUTPUT.to_string(),
    })
}

fn run_localeconv(inputs: &Value) -> Result<String, HarnessError> {
    let field = inputs
        .get("field")
        .and_then(Value::as_str)
        .ok_or_else(|| HarnessError::bad_input("localeconv", "missing field"))?;
    locale_conv()
        .field(field)
        .ok_or_else(|| HarnessError::bad_input("localeconv", format!("no member {field}")))
}

fn run_category_value(inputs: &Value) -> Result<String, HarnessError> {
    let name = inputs
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| HarnessError::bad_input("category_value", "missing name"))?;
    Category::from_name(name)
        .map(|c| c.as_raw().to_string())
        .ok_or_else(|| HarnessError::bad_input("category_value", format!("unknown category {name}")))
}
