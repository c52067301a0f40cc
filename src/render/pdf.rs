//! Résumé layout and PDF assembly.
//!
//! Layout runs a single vertical cursor down an ordered list of page
//! content streams. Every line or block checks for room before it writes:
//! if the block would cross the bottom margin, a new page is appended and
//! the cursor resets to the top margin. The check applies uniformly to
//! headings, rules, paragraph lines, and bullet lines, so a multi-line
//! block may span pages but no line ever lands past the bottom margin.
//!
//! Page numbering needs the final total, so pages are kept as addressable
//! builders and stamped in a second pass once content layout is done.

use std::fmt::Write as _;
use std::fs;
use std::io::Write as _;
use std::iter::once;
use std::path::{Path, PathBuf};

use chrono::Utc;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use unicode_normalization::UnicodeNormalization;

use super::layout::{self, Font};
use super::options::RenderOptions;
use crate::error::{Error, Result};
use crate::model::{
    Audience, EducationEntry, ExperienceEntry, Highlight, Profile, ResumeDocument, SkillGroup,
};

/// Vertical room taken by a horizontal rule, including its padding.
const RULE_HEIGHT: f64 = 14.0;

/// Extra breathing room above and below a section separator.
const SECTION_PAD: f64 = 3.0;

/// Filename base used when the profile has no name.
const DEFAULT_BASENAME: &str = "resume";

/// A rendered document: bytes plus export metadata.
#[derive(Debug, Clone)]
pub struct Pdf {
    bytes: Vec<u8>,
    page_count: usize,
    filename: String,
}

impl Pdf {
    /// The document bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume into the document bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Filename derived from the profile name.
    pub fn suggested_filename(&self) -> &str {
        &self.filename
    }

    /// Save to an explicit path.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, &self.bytes)?;
        Ok(())
    }

    /// Save under the suggested filename in `dir`, returning the full path.
    pub fn save_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.filename);
        fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Derive the export filename from a profile name.
///
/// Whitespace runs collapse to underscores and `_Resume.pdf` is appended;
/// a missing or blank name falls back to the `resume` placeholder.
pub fn suggested_filename(name: Option<&str>) -> String {
    let base = name
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_BASENAME);
    let collapsed = base.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{collapsed}_Resume.pdf")
}

/// Render a résumé document to a paginated PDF.
///
/// Pure with respect to `doc`: the input is only read. Saving the result is
/// a separate, explicit step on [`Pdf`].
pub fn render(doc: &ResumeDocument, options: &RenderOptions) -> Result<Pdf> {
    let (width, height) = options.page_size.dimensions();
    if options.margin * 2.0 >= width || options.margin * 2.0 >= height {
        return Err(Error::Render(format!(
            "margin {:.1} leaves no writable area on a {:.0}x{:.0} page",
            options.margin, width, height
        )));
    }

    let filtered;
    let doc = if options.audience == Audience::All {
        doc
    } else {
        filtered = doc.for_audience(options.audience);
        &filtered
    };

    log::debug!(
        "rendering resume: {} experience entries, {} skill groups, {} education entries",
        doc.experience.len(),
        doc.skills.len(),
        doc.education.len()
    );

    let mut sheet = Sheet::new(options, width, height);
    sheet.header(&doc.profile);
    sheet.summary(doc.profile.summary.as_deref());
    sheet.highlights(&doc.profile.highlights);
    sheet.skills(&doc.skills);
    sheet.experience(&doc.experience);
    sheet.education(&doc.education);
    sheet.stamp_footers();

    let page_count = sheet.pages.len();
    let name = doc.profile.name.as_deref();
    let bytes = assemble(&sheet.pages, name, options)?;

    log::debug!("rendered {} page(s), {} bytes", page_count, bytes.len());

    Ok(Pdf {
        bytes,
        page_count,
        filename: suggested_filename(name),
    })
}

/// Layout state: the cursor and the ordered page list.
struct Sheet<'a> {
    opts: &'a RenderOptions,
    width: f64,
    height: f64,
    content_width: f64,
    /// Content-stream operator text, one builder per page.
    pages: Vec<String>,
    /// Distance from the page top to the top of the next line block.
    y: f64,
    /// Whether any section has been emitted yet (controls separator rules).
    section_open: bool,
}

impl<'a> Sheet<'a> {
    fn new(opts: &'a RenderOptions, width: f64, height: f64) -> Self {
        Self {
            opts,
            width,
            height,
            content_width: width - 2.0 * opts.margin,
            pages: vec![String::new()],
            y: opts.margin,
            section_open: false,
        }
    }

    // ── cursor and primitives ──────────────────────────────────────────

    /// Make room for a block of height `h`, breaking the page if needed.
    fn ensure(&mut self, h: f64) {
        if self.y + h > self.height - self.opts.margin {
            self.pages.push(String::new());
            self.y = self.opts.margin;
        }
    }

    /// Advance the cursor without writing. Never breaks the page; the next
    /// written block's own check handles that.
    fn gap(&mut self, h: f64) {
        self.y += h;
    }

    /// Emit one text line at the left margin.
    fn line(&mut self, text: &str, font: Font, size: f64) {
        self.line_at(self.opts.margin, text, font, size);
    }

    /// Emit one text line at an explicit x offset.
    fn line_at(&mut self, x: f64, text: &str, font: Font, size: f64) {
        let h = self.opts.line_height(size);
        self.ensure(h);
        let baseline = self.height - (self.y + size);
        let page = self.pages.last_mut().expect("page list is never empty");
        text_op(page, x, baseline, text, font, size);
        self.y += h;
    }

    /// Emit a horizontal rule across the content width.
    fn rule(&mut self) {
        self.ensure(RULE_HEIGHT);
        let y = self.height - (self.y + RULE_HEIGHT / 2.0);
        let page = self.pages.last_mut().expect("page list is never empty");
        let _ = write!(
            page,
            "q\n0.75 G\n{:.2} {:.2} m\n{:.2} {:.2} l\nS\nQ\n",
            self.opts.margin,
            y,
            self.width - self.opts.margin,
            y
        );
        self.y += RULE_HEIGHT;
    }

    /// Wrap text to the content width and emit each line.
    fn wrapped(&mut self, text: &str, font: Font, size: f64) {
        for line in layout::wrap(text, font, size, self.content_width) {
            self.line(&line, font, size);
        }
    }

    /// Open a section: emit a separator rule unless this is the first one.
    fn begin_section(&mut self) {
        if self.section_open {
            self.gap(SECTION_PAD);
            self.rule();
            self.gap(SECTION_PAD);
        }
        self.section_open = true;
    }

    fn section_heading(&mut self, title: &str) {
        self.line(title, Font::Bold, self.opts.heading_size);
    }

    // ── sections ───────────────────────────────────────────────────────

    fn header(&mut self, profile: &Profile) {
        if profile.is_empty() {
            return;
        }
        self.begin_section();

        if let Some(name) = nonblank(&profile.name) {
            self.wrapped(name, Font::Bold, self.opts.name_size);
        }
        if let Some(title) = nonblank(&profile.title) {
            self.wrapped(title, Font::Regular, self.opts.body_size + 1.0);
        }

        let contact: Vec<&str> = [&profile.location, &profile.email, &profile.phone]
            .into_iter()
            .filter_map(nonblank)
            .collect();
        if !contact.is_empty() {
            self.wrapped(&contact.join(" • "), Font::Regular, self.opts.small_size);
        }

        if !profile.links.is_empty() {
            let links: Vec<String> = profile
                .links
                .iter()
                .map(|(label, url)| format!("{label}: {url}"))
                .collect();
            self.wrapped(&links.join(" • "), Font::Regular, self.opts.small_size);
        }
    }

    fn summary(&mut self, summary: Option<&str>) {
        let paragraphs = layout::split_paragraphs(summary.unwrap_or_default());
        if paragraphs.is_empty() {
            return;
        }
        self.begin_section();
        self.section_heading("Summary");

        let last = paragraphs.len() - 1;
        for (i, paragraph) in paragraphs.iter().enumerate() {
            self.wrapped(paragraph, Font::Regular, self.opts.body_size);
            if i < last {
                self.gap(self.opts.line_height(self.opts.body_size));
            }
        }
    }

    fn highlights(&mut self, highlights: &[Highlight]) {
        if highlights.is_empty() {
            return;
        }
        self.begin_section();
        self.section_heading("Highlights");

        let joined: Vec<String> = highlights
            .iter()
            .map(|h| format!("{}: {}", h.label, h.value))
            .collect();
        self.wrapped(&joined.join(" • "), Font::Regular, self.opts.body_size);
    }

    fn skills(&mut self, skills: &[SkillGroup]) {
        let groups: Vec<&SkillGroup> = skills
            .iter()
            .filter(|g| !g.group.trim().is_empty() || !g.items.is_empty())
            .collect();
        if groups.is_empty() {
            return;
        }
        self.begin_section();
        self.section_heading("Skills");

        let last = groups.len() - 1;
        for (i, group) in groups.iter().enumerate() {
            if !group.group.trim().is_empty() {
                self.line(group.group.trim(), Font::Bold, self.opts.body_size);
            }
            if !group.items.is_empty() {
                self.wrapped(&group.items.join(", "), Font::Regular, self.opts.body_size);
            }
            if i < last {
                self.gap(SECTION_PAD);
            }
        }
    }

    fn experience(&mut self, experience: &[ExperienceEntry]) {
        if experience.is_empty() {
            return;
        }
        self.begin_section();
        self.section_heading("Experience");

        let last = experience.len() - 1;
        for (i, entry) in experience.iter().enumerate() {
            let heading = entry.heading();
            if !heading.is_empty() {
                self.wrapped(&heading, Font::Bold, self.opts.body_size);
            }

            let mut info: Vec<String> = Vec::new();
            if let Some(range) = entry.date_range() {
                info.push(range);
            }
            if let Some(duration) = nonblank(&entry.duration) {
                info.push(duration.to_string());
            }
            if let Some(location) = nonblank(&entry.location) {
                info.push(location.to_string());
            }
            if !info.is_empty() {
                self.wrapped(&info.join(" • "), Font::Regular, self.opts.small_size);
            }

            if entry.bullets.len() > self.opts.max_bullets {
                log::warn!(
                    "entry {:?}: dropping {} bullet(s) past the cap of {}",
                    heading,
                    entry.bullets.len() - self.opts.max_bullets,
                    self.opts.max_bullets
                );
            }
            for bullet in entry.bullets.iter().take(self.opts.max_bullets) {
                self.bullet(bullet.text());
            }

            if i < last {
                self.gap(self.opts.line_height(self.opts.body_size) * 0.5);
            }
        }
    }

    fn education(&mut self, education: &[EducationEntry]) {
        let entries: Vec<&EducationEntry> = education
            .iter()
            .filter(|e| !e.name.trim().is_empty())
            .collect();
        if entries.is_empty() {
            return;
        }
        self.begin_section();
        self.section_heading("Education");

        let last = entries.len() - 1;
        for (i, entry) in entries.iter().enumerate() {
            self.wrapped(entry.name.trim(), Font::Bold, self.opts.body_size);
            if let Some(period) = nonblank(&entry.period) {
                self.line(period, Font::Regular, self.opts.small_size);
            }
            if let Some(summary) = nonblank(&entry.summary) {
                self.wrapped(summary, Font::Regular, self.opts.body_size);
            }
            if let Some(final_work) = nonblank(&entry.final_work) {
                self.wrapped(
                    &format!("Final project: {final_work}"),
                    Font::Regular,
                    self.opts.body_size,
                );
            }
            if i < last {
                self.gap(SECTION_PAD);
            }
        }
    }

    /// One bullet: glyph at the margin, text indented, continuation lines
    /// aligned under the text with no glyph.
    fn bullet(&mut self, text: &str) {
        let size = self.opts.body_size;
        let available = self.content_width - self.opts.bullet_indent;
        for (i, line) in layout::wrap(text, Font::Regular, size, available)
            .iter()
            .enumerate()
        {
            let h = self.opts.line_height(size);
            self.ensure(h);
            let baseline = self.height - (self.y + size);
            let page = self.pages.last_mut().expect("page list is never empty");
            if i == 0 {
                text_op(page, self.opts.margin, baseline, "•", Font::Regular, size);
            }
            text_op(
                page,
                self.opts.margin + self.opts.bullet_indent,
                baseline,
                line,
                Font::Regular,
                size,
            );
            self.y += h;
        }
    }

    // ── footer pass ────────────────────────────────────────────────────

    /// Stamp a right-aligned `page/total` on every page. Runs after layout,
    /// once the total is known.
    fn stamp_footers(&mut self) {
        let total = self.pages.len();
        let size = self.opts.small_size;
        let baseline = self.opts.margin / 2.0;
        let right_edge = self.width - self.opts.margin;
        for (i, page) in self.pages.iter_mut().enumerate() {
            let stamp = format!("{}/{}", i + 1, total);
            let x = right_edge - layout::text_width(&stamp, Font::Regular, size);
            text_op(page, x, baseline, &stamp, Font::Regular, size);
        }
    }
}

fn nonblank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Append one text-showing operator group to a content stream.
fn text_op(page: &mut String, x: f64, y: f64, text: &str, font: Font, size: f64) {
    let resource = match font {
        Font::Regular => "/F1",
        Font::Bold => "/F2",
    };
    let _ = write!(
        page,
        "BT\n{resource} {size:.1} Tf\n1 0 0 1 {x:.2} {y:.2} Tm\n({}) Tj\nET\n",
        escape_text(text)
    );
}

/// Escape text for a PDF literal string under WinAnsiEncoding.
///
/// Common typographic symbols map to their WinAnsi octal codes; other
/// non-ASCII characters are NFKD-decomposed to a base ASCII letter where
/// one exists, else replaced with `?`.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\n' | '\r' | '\t' => out.push(' '),
            '•' => out.push_str("\\267"),
            '–' => out.push_str("\\226"),
            '—' => out.push_str("\\227"),
            '©' => out.push_str("\\251"),
            c if c.is_ascii_control() => out.push(' '),
            c if c.is_ascii() => out.push(c),
            c => match once(c).nfkd().find(|d| d.is_ascii() && !d.is_ascii_control()) {
                Some(base @ ('\\' | '(' | ')')) => {
                    out.push('\\');
                    out.push(base);
                }
                Some(base) => out.push(base),
                None => out.push('?'),
            },
        }
    }
    out
}

/// Assemble page content streams into a complete PDF 1.4 document.
fn assemble(pages: &[String], name: Option<&str>, opts: &RenderOptions) -> Result<Vec<u8>> {
    let (width, height) = opts.page_size.dimensions();
    let page_count = pages.len();

    let mut pdf: Vec<u8> = Vec::new();
    pdf.extend_from_slice(b"%PDF-1.4\n");
    pdf.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

    // Byte offset per object, indexed by object number - 1.
    let mut xref: Vec<usize> = Vec::new();

    // Object 1: catalog.
    xref.push(pdf.len());
    pdf.extend_from_slice(b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

    // Object 2: pages tree, written after the kids exist.
    let pages_slot = xref.len();
    xref.push(0);

    // Objects 3..: page + content pairs, then fonts, then the info dict.
    let font_obj_start = 3 + page_count * 2;
    let mut kids: Vec<String> = Vec::new();

    for (idx, stream) in pages.iter().enumerate() {
        let page_id = 3 + idx * 2;
        let content_id = page_id + 1;
        kids.push(format!("{page_id} 0 R"));

        xref.push(pdf.len());
        pdf.extend_from_slice(
            format!(
                "{page_id} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {width:.2} {height:.2}] /Contents {content_id} 0 R /Resources << /Font << /F1 {font_obj_start} 0 R /F2 {} 0 R >> >> >>\nendobj\n",
                font_obj_start + 1
            )
            .as_bytes(),
        );

        xref.push(pdf.len());
        if opts.compress {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(stream.as_bytes())?;
            let data = encoder.finish()?;
            pdf.extend_from_slice(
                format!(
                    "{content_id} 0 obj\n<< /Length {} /Filter /FlateDecode >>\nstream\n",
                    data.len()
                )
                .as_bytes(),
            );
            pdf.extend_from_slice(&data);
            pdf.extend_from_slice(b"\nendstream\nendobj\n");
        } else {
            pdf.extend_from_slice(
                format!(
                    "{content_id} 0 obj\n<< /Length {} >>\nstream\n{stream}\nendstream\nendobj\n",
                    stream.len()
                )
                .as_bytes(),
            );
        }
    }

    xref[pages_slot] = pdf.len();
    pdf.extend_from_slice(
        format!(
            "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {page_count} >>\nendobj\n",
            kids.join(" ")
        )
        .as_bytes(),
    );

    xref.push(pdf.len());
    pdf.extend_from_slice(
        format!(
            "{font_obj_start} 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>\nendobj\n"
        )
        .as_bytes(),
    );
    xref.push(pdf.len());
    pdf.extend_from_slice(
        format!(
            "{} 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>\nendobj\n",
            font_obj_start + 1
        )
        .as_bytes(),
    );

    // Info dictionary.
    let info_id = font_obj_start + 2;
    xref.push(pdf.len());
    let title = match name {
        Some(name) => format!("{name} — Resume"),
        None => "Resume".to_string(),
    };
    pdf.extend_from_slice(
        format!(
            "{info_id} 0 obj\n<< /Title ({}) /Producer (cvpress {}) /CreationDate ({}) >>\nendobj\n",
            escape_text(&title),
            env!("CARGO_PKG_VERSION"),
            Utc::now().format("D:%Y%m%d%H%M%SZ")
        )
        .as_bytes(),
    );

    // Cross-reference table and trailer.
    let xref_start = pdf.len();
    pdf.extend_from_slice(b"xref\n");
    pdf.extend_from_slice(format!("0 {}\n", xref.len() + 1).as_bytes());
    pdf.extend_from_slice(b"0000000000 65535 f \n");
    for pos in &xref {
        pdf.extend_from_slice(format!("{pos:010} 00000 n \n").as_bytes());
    }
    pdf.extend_from_slice(b"trailer\n");
    pdf.extend_from_slice(
        format!(
            "<< /Size {} /Root 1 0 R /Info {info_id} 0 R >>\n",
            xref.len() + 1
        )
        .as_bytes(),
    );
    pdf.extend_from_slice(b"startxref\n");
    pdf.extend_from_slice(format!("{xref_start}\n").as_bytes());
    pdf.extend_from_slice(b"%%EOF\n");

    Ok(pdf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggested_filename() {
        assert_eq!(
            suggested_filename(Some("Jane Q. Public")),
            "Jane_Q._Public_Resume.pdf"
        );
        assert_eq!(suggested_filename(None), "resume_Resume.pdf");
        assert_eq!(suggested_filename(Some("  ")), "resume_Resume.pdf");
        assert_eq!(
            suggested_filename(Some("Henrique  Tornelli   Duarte")),
            "Henrique_Tornelli_Duarte_Resume.pdf"
        );
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a (b) \\c"), "a \\(b\\) \\\\c");
        assert_eq!(escape_text("x • y"), "x \\267 y");
        assert_eq!(escape_text("Uberlândia"), "Uberlandia");
        assert_eq!(escape_text("日本"), "??");
    }

    #[test]
    fn test_render_rejects_degenerate_margin() {
        let doc = ResumeDocument::default();
        let options = RenderOptions::new().with_margin(400.0);
        assert!(matches!(render(&doc, &options), Err(Error::Render(_))));
    }

    #[test]
    fn test_empty_document_renders_single_page() {
        let doc = ResumeDocument::default();
        let pdf = render(&doc, &RenderOptions::default()).unwrap();
        assert_eq!(pdf.page_count(), 1);
        assert!(pdf.bytes().starts_with(b"%PDF-1.4"));
        assert!(pdf.bytes().ends_with(b"%%EOF\n"));
    }
}
