//! Render options and page geometry.

use crate::model::Audience;

/// Fixed page geometry for the exported document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    /// A4 (210 x 297 mm).
    #[default]
    A4,
    /// US Letter (8.5 x 11 inches).
    Letter,
}

impl PageSize {
    /// Page dimensions in points as (width, height).
    pub fn dimensions(self) -> (f64, f64) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
        }
    }
}

/// Options for rendering a résumé document to PDF.
///
/// The geometry fields are read once at the start of a render; a renderer
/// never re-reads them mid-document.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Page size.
    pub page_size: PageSize,

    /// Uniform page margin in points.
    pub margin: f64,

    /// Body text size in points.
    pub body_size: f64,

    /// Section heading size in points.
    pub heading_size: f64,

    /// Name headline size in points.
    pub name_size: f64,

    /// Secondary text (contact lines, date lines, footer) size in points.
    pub small_size: f64,

    /// Line height as a multiple of font size.
    pub line_factor: f64,

    /// Horizontal indent for bullet text, in points.
    pub bullet_indent: f64,

    /// Maximum bullets rendered per experience entry; extras are dropped.
    /// A print-density control, not a validation limit.
    pub max_bullets: usize,

    /// Which audience the experience bullets are selected for.
    pub audience: Audience,

    /// Compress content streams with zlib (`/FlateDecode`).
    pub compress: bool,
}

impl RenderOptions {
    /// Create render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.page_size = size;
        self
    }

    /// Set the page margin in points.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Set the body font size in points.
    pub fn with_body_size(mut self, size: f64) -> Self {
        self.body_size = size;
        self
    }

    /// Set the per-entry bullet cap.
    pub fn with_max_bullets(mut self, cap: usize) -> Self {
        self.max_bullets = cap;
        self
    }

    /// Select the audience for experience bullets.
    pub fn with_audience(mut self, audience: Audience) -> Self {
        self.audience = audience;
        self
    }

    /// Enable or disable content-stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Line height in points for a given font size.
    pub(crate) fn line_height(&self, font_size: f64) -> f64 {
        font_size * self.line_factor
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            margin: 50.0,
            body_size: 10.0,
            heading_size: 12.0,
            name_size: 20.0,
            small_size: 9.0,
            line_factor: 1.4,
            bullet_indent: 14.0,
            max_bullets: 6,
            audience: Audience::All,
            compress: false,
        }
    }
}
