// Errors surfaced to the hosting page.
//
// The simulation itself cannot fail; these cover the browser plumbing around it.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    // No global `window`, e.g. when loaded inside a worker.
    #[error("no global window available")]
    NoWindow,

    // Theme names other than `nebula` and `supernova`.
    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    // A browser API call returned an exception.
    #[error("browser call failed: {0}")]
    Browser(String),
}

impl FieldError {
    pub fn browser(err: JsValue) -> FieldError {
        FieldError::Browser(format!("{:?}", err))
    }
}

impl From<FieldError> for JsValue {
    fn from(err: FieldError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(
            FieldError::UnknownTheme("aurora".to_owned()).to_string(),
            "unknown theme: aurora"
        );
        assert_eq!(FieldError::NoWindow.to_string(), "no global window available");
    }
}
