//! Browser host error types

use thiserror::Error;

/// Errors that stop the browser host from starting
#[derive(Error, Debug)]
pub enum HostError {
    /// Not running in a browser window
    #[error("No global window available")]
    NoWindow,

    /// Window has no document
    #[error("Window has no document")]
    NoDocument,

    /// No element matched the canvas selector
    #[error("No element matches `{0}`")]
    CanvasNotFound(&'static str),

    /// Matched element is not a canvas
    #[error("Element `{0}` is not a <canvas>")]
    NotACanvas(&'static str),

    /// Canvas refused to hand out a 2D context
    #[error("2D rendering context unavailable")]
    ContextUnavailable,

    /// A browser API call threw
    #[error("Browser call failed: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for HostError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}"));
        Self::Js(message)
    }
}

#[cfg(target_arch = "wasm32")]
impl From<HostError> for wasm_bindgen::JsValue {
    fn from(err: HostError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
