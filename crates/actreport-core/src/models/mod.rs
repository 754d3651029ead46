//! Data models for the form
//!
//! The draft and its typed field updates, the closed coordinator list,
//! attachments, and the normalized record sent to the record store.

mod attachment;
mod coordinator;
mod draft;
mod field;
mod record;

pub use attachment::*;
pub use coordinator::*;
pub use draft::*;
pub use field::*;
pub use record::*;
