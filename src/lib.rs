//! # cvpress
//!
//! Content toolkit for a personal résumé/portfolio site: parse Markdown
//! documents with front-matter metadata, load portfolio manifests, and
//! export a structured résumé as a paginated PDF.
//!
//! Both halves are pure, synchronous transformations: text or structs in,
//! structs or bytes out. Fetching content and persisting UI state belong to
//! the surrounding application, not to this crate; inputs are expected to be
//! fully materialized in memory.
//!
//! ## Quick Start
//!
//! ```
//! use cvpress::{parse_document, render_resume, ResumeDocument};
//!
//! fn main() -> cvpress::Result<()> {
//!     // Split a portfolio page into metadata and body.
//!     let page = parse_document("---\ntitle: GhostRush\ntech: [C++, Unreal]\n---\n# Overview");
//!     assert_eq!(page.meta.get_str("title"), Some("GhostRush"));
//!
//!     // Export a résumé to PDF bytes.
//!     let doc = ResumeDocument::from_json(r#"{"profile": {"name": "Jane Q. Public"}}"#)?;
//!     let pdf = render_resume(&doc)?;
//!     assert_eq!(pdf.suggested_filename(), "Jane_Q._Public_Resume.pdf");
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Best-effort front matter**: never fails, malformed metadata degrades
//!   to plain strings
//! - **Manifest loading**: portfolio listings validated at the boundary
//! - **Paginated PDF export**: cursor-driven layout, two-pass page
//!   numbering, derived filenames
//! - **Audience filtering**: experience bullets selected per reader, passed
//!   as an explicit parameter

pub mod content;
pub mod error;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use content::{FrontMatter, Manifest, ManifestEntry, MetaValue, ParsedDocument};
pub use error::{Error, Result};
pub use model::{
    Audience, Bullet, EducationEntry, ExperienceEntry, Highlight, Profile, ResumeDocument,
    SkillGroup,
};
pub use render::{PageSize, Pdf, RenderOptions};

/// Parse a content document into front matter and body.
///
/// Never fails; see [`content::parse`].
pub fn parse_document(raw: &str) -> ParsedDocument {
    content::parse(raw)
}

/// Render a résumé document to PDF with default options.
///
/// # Example
///
/// ```
/// use cvpress::ResumeDocument;
///
/// let doc = ResumeDocument::default();
/// let pdf = cvpress::render_resume(&doc).unwrap();
/// assert_eq!(pdf.page_count(), 1);
/// ```
pub fn render_resume(doc: &ResumeDocument) -> Result<Pdf> {
    render::render(doc, &RenderOptions::default())
}

/// Render a résumé document to PDF with custom options.
///
/// # Example
///
/// ```
/// use cvpress::{Audience, RenderOptions, ResumeDocument};
///
/// let doc = ResumeDocument::default();
/// let options = RenderOptions::new().with_audience(Audience::Technical);
/// let pdf = cvpress::render_resume_with_options(&doc, &options).unwrap();
/// assert!(pdf.bytes().starts_with(b"%PDF-1.4"));
/// ```
pub fn render_resume_with_options(doc: &ResumeDocument, options: &RenderOptions) -> Result<Pdf> {
    render::render(doc, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document_without_header() {
        let doc = parse_document("plain body");
        assert!(doc.meta.is_empty());
        assert_eq!(doc.body, "plain body");
    }

    #[test]
    fn test_render_resume_default_filename() {
        let doc = ResumeDocument::default();
        let pdf = render_resume(&doc).unwrap();
        assert_eq!(pdf.suggested_filename(), "resume_Resume.pdf");
    }

    #[test]
    fn test_render_with_options_compression() {
        let json = r#"{"profile": {"name": "Jane", "summary": "Ships games."}}"#;
        let doc = ResumeDocument::from_json(json).unwrap();

        let plain = render_resume(&doc).unwrap();
        let options = RenderOptions::new().with_compression(true);
        let compressed = render_resume_with_options(&doc, &options).unwrap();

        assert!(String::from_utf8_lossy(plain.bytes()).contains("Ships games."));
        assert!(!String::from_utf8_lossy(compressed.bytes()).contains("Ships games."));
        assert!(String::from_utf8_lossy(compressed.bytes()).contains("/FlateDecode"));
    }
}
