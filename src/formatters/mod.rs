//! Entry renderers: one entry in, one framed line out

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;
