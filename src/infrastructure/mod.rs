#[cfg(target_arch = "wasm32")]
pub mod browser;
pub mod documents;
pub mod transports;
