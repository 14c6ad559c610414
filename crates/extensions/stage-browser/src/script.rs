//! In-page helper script and call-expression building.

use serde_json::Value;

/// Overlay and measurement helpers installed as `window.__director`.
pub fn page_script() -> String {
    include_str!("page_script.js").to_string()
}

/// Build `window.__director.<function>(<args>)` with JSON-encoded arguments.
///
/// JSON literals are valid JavaScript, so arbitrary text passes through
/// without manual escaping.
pub fn call_expression(function: &str, args: &[Value]) -> String {
    let args: Vec<String> = args.iter().map(Value::to_string).collect();
    format!("window.__director.{}({})", function, args.join(", "))
}
