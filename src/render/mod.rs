//! PDF export for résumé documents.

mod layout;
mod options;
mod pdf;

pub use options::{PageSize, RenderOptions};
pub use pdf::{render, suggested_filename, Pdf};
