use thiserror::Error;

#[derive(Error, Debug)]
pub enum CarouselError {
    #[error("Missing element: {0}")]
    MissingElement(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Malformed carousel data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Browser call failed: {0}")]
    Js(String),
}

pub type Result<T> = std::result::Result<T, CarouselError>;

#[cfg(target_arch = "wasm32")]
impl From<CarouselError> for wasm_bindgen::JsValue {
    fn from(err: CarouselError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for CarouselError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        CarouselError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
