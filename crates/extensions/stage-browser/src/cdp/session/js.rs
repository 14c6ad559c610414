//! JavaScript execution for CDP page session.

use serde_json::{json, Value};

use crate::cdp::error::CdpError;

use super::core::PageSession;

impl PageSession {
    /// Evaluate a JavaScript expression and return its value.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        if let Some(exception) = result.get("exceptionDetails") {
            return Err(CdpError::JavaScript(Self::exception_text(exception)));
        }

        Ok(result["result"]["value"].clone())
    }

    /// Register a script that runs before any page script on every new document.
    pub async fn add_init_script(&self, source: &str) -> Result<String, CdpError> {
        let result = self
            .call(
                "Page.addScriptToEvaluateOnNewDocument",
                Some(json!({ "source": source })),
            )
            .await?;

        result["identifier"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| CdpError::InvalidResponse("Missing script identifier".to_string()))
    }

    /// Prefer the thrown value's description over the generic "Uncaught".
    pub(super) fn exception_text(exception: &Value) -> String {
        exception["exception"]["description"]
            .as_str()
            .or_else(|| exception["text"].as_str())
            .unwrap_or("Unknown error")
            .to_string()
    }
}
