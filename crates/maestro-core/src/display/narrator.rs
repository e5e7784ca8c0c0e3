//! One-sentence narration of tool responses.

use serde_json::Value;

/// Narrates a tool response as a single sentence.
///
/// The message text is taken verbatim from the response's `message` field —
/// success or error — never translated, reformatted or summarized: it may be
/// shown directly to an end user in their own language. A response without a
/// message (only possible for payloads built outside this crate) falls back
/// to the compact JSON of the whole response so no information is dropped.
///
/// # Examples
///
/// ```rust
/// use maestro_core::display::format_tool_status;
/// use serde_json::json;
///
/// let response = json!({"status": "reset", "message": "Plano do supervisor limpo."});
/// assert_eq!(
///     format_tool_status("reset_plan", &response),
///     "reset_plan tool reported: Plano do supervisor limpo."
/// );
/// ```
pub fn format_tool_status(tool_name: &str, response: &Value) -> String {
    let message = match response.get("message").and_then(Value::as_str) {
        Some(message) => message.to_string(),
        None => response.to_string(),
    };
    format!("{tool_name} tool reported: {message}")
}
