//! Entry-enriching hooks fired during dispatch

pub mod blob;
pub mod caller;

pub use blob::{BlobHook, BlobStore};
pub use caller::CallerHook;
