//! Text measurement and line breaking.
//!
//! Widths come from static AFM tables for the two built-in Type1 fonts,
//! in thousandths of an em, covering ASCII 0x20..=0x7E. Non-ASCII
//! characters fall back to an average width; the escaping layer later maps
//! them to WinAnsi or ASCII anyway, so the approximation stays within a
//! glyph or two per line.

use regex::Regex;

/// The two fonts embedded in every exported document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Font {
    Regular,
    Bold,
}

/// Unbroken tokens at least this many chars long get break opportunities.
pub(crate) const LONG_TOKEN_CHARS: usize = 30;

/// Interval, in chars, between inserted break opportunities.
pub(crate) const BREAK_EVERY_CHARS: usize = 12;

/// Helvetica character widths, `widths[i]` = width of ASCII `(i + 32)`.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667,
    778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556,
    556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

/// Helvetica-Bold character widths, same slot layout.
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, 667,
    778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, 611,
    611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// Fallback width for characters outside the table.
const AVERAGE_WIDTH: u16 = 556;

fn char_units(c: char, font: Font) -> u16 {
    let code = c as usize;
    if (32..=126).contains(&code) {
        match font {
            Font::Regular => HELVETICA[code - 32],
            Font::Bold => HELVETICA_BOLD[code - 32],
        }
    } else {
        AVERAGE_WIDTH
    }
}

/// Measure the rendered width of a string in points.
pub(crate) fn text_width(text: &str, font: Font, size: f64) -> f64 {
    let units: u32 = text.chars().map(|c| u32::from(char_units(c, font))).sum();
    f64::from(units) * size / 1000.0
}

/// Word-wrap text to the given width, in points.
///
/// Greedy fill over whitespace-separated words. Words of
/// [`LONG_TOKEN_CHARS`] or more chars are pre-segmented into
/// [`BREAK_EVERY_CHARS`]-char chunks that may wrap mid-word without a
/// space, so URLs and similar never overflow the line. A single fragment
/// wider than `max_width` still occupies a line of its own.
///
/// Whitespace-only input yields no lines.
pub(crate) fn wrap(text: &str, font: Font, size: f64, max_width: f64) -> Vec<String> {
    let space_width = text_width(" ", font, size);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0.0;

    for (fragment, glued) in fragments(text) {
        let fragment_width = text_width(fragment, font, size);
        if line.is_empty() {
            line.push_str(fragment);
            line_width = fragment_width;
            continue;
        }
        let separator = if glued { space_width } else { 0.0 };
        if line_width + separator + fragment_width > max_width {
            lines.push(std::mem::take(&mut line));
            line.push_str(fragment);
            line_width = fragment_width;
        } else {
            if glued {
                line.push(' ');
            }
            line.push_str(fragment);
            line_width += separator + fragment_width;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Break text into wrap fragments.
///
/// The flag says whether a space precedes the fragment when it continues
/// the current line: true for word starts, false for the continuation
/// chunks of a pre-segmented long token.
fn fragments(text: &str) -> Vec<(&str, bool)> {
    let mut out = Vec::new();
    for word in text.split_whitespace() {
        if word.chars().count() < LONG_TOKEN_CHARS {
            out.push((word, true));
            continue;
        }
        let mut first = true;
        let mut chunk_start = 0;
        let mut count = 0;
        for (idx, _) in word.char_indices() {
            if count == BREAK_EVERY_CHARS {
                out.push((&word[chunk_start..idx], first));
                first = false;
                chunk_start = idx;
                count = 0;
            }
            count += 1;
        }
        out.push((&word[chunk_start..], first));
    }
    out
}

/// Split body text into paragraphs on blank-line boundaries.
///
/// Embedded single newlines (and any other whitespace runs) collapse to
/// single spaces within a paragraph.
pub(crate) fn split_paragraphs(text: &str) -> Vec<String> {
    let blank = Regex::new(r"(?:\r?\n[ \t]*){2,}").unwrap();
    let spaces = Regex::new(r"\s+").unwrap();
    blank
        .split(text)
        .map(|p| spaces.replace_all(p.trim(), " ").into_owned())
        .filter(|p| !p.is_empty())
        .collect()
}
