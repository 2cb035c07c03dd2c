use clap::ValueEnum;
use serde::Deserialize;
use std::ops::Range;
use thiserror::Error;
use tracing::debug;

/// Characters every output line spends on the two quote marks and the line break.
pub const RESERVED_CHARS: usize = 3;

// Length of `\t`, `\n`, `\'` and `\"` once escaped.
const ESCAPE_LEN: usize = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FitError {
    #[error(
        "line width {line_width} is too small: at least 4 characters are needed \
         (two quotes, a line break and one character of text)"
    )]
    DegenerateWidth { line_width: usize },
    #[error(
        "line width {line_width} cannot hold a two-character escape sequence; \
         keep-escapes chunking needs a width of at least 5"
    )]
    WidthTooSmallForEscapes { line_width: usize },
}

/// Quotation mark wrapped around every fitted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    #[default]
    Single,
    Double,
}

impl QuoteStyle {
    pub fn as_char(self) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
        }
    }
}

/// How the escaped text is cut into lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Chunking {
    /// Cut every `effective width` characters, even through an escape sequence.
    #[default]
    Exact,
    /// End a line early rather than split an escape sequence across two lines.
    KeepEscapes,
}

/// A single formatting job, as handed over by the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitRequest {
    pub text: String,
    pub quote: QuoteStyle,
    pub line_width: usize,
    pub chunking: Chunking,
}

impl FitRequest {
    pub fn new(text: impl Into<String>, quote: QuoteStyle, line_width: usize) -> Self {
        Self {
            text: text.into(),
            quote,
            line_width,
            chunking: Chunking::default(),
        }
    }

    pub fn with_chunking(mut self, chunking: Chunking) -> Self {
        self.chunking = chunking;
        self
    }
}

// One source character after escaping: a byte offset into the escaped text
// and the number of characters it expanded to.
#[derive(Debug, Clone, Copy)]
struct Unit {
    start: usize,
    chars: usize,
}

/// Escaped text plus the width it gets cut to. Built once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct TextFitter {
    quote: char,
    chunking: Chunking,
    effective_width: usize,
    escaped: String,
    units: Vec<Unit>,
}

impl TextFitter {
    pub fn new(request: FitRequest) -> Result<Self, FitError> {
        let FitRequest {
            text,
            quote,
            line_width,
            chunking,
        } = request;

        let effective_width = check_line_width(line_width, chunking)?;

        // Only the one trailing newline an editor leaves behind is dropped
        let trimmed = text.strip_suffix('\n').unwrap_or(&text);
        let (escaped, units) = escape_units(trimmed, quote.as_char());

        debug!(
            line_width,
            effective_width,
            source_chars = units.len(),
            escaped_chars = escaped.chars().count(),
            ?chunking,
            "prepared text for fitting"
        );

        Ok(Self {
            quote: quote.as_char(),
            chunking,
            effective_width,
            escaped,
            units,
        })
    }

    pub fn effective_width(&self) -> usize {
        self.effective_width
    }

    pub fn escaped(&self) -> &str {
        &self.escaped
    }

    /// The fitted lines, each wrapped in the quote character, in source order.
    pub fn lines(&self) -> Vec<String> {
        self.chunk_ranges()
            .into_iter()
            .map(|range| format!("{q}{}{q}", &self.escaped[range], q = self.quote))
            .collect()
    }

    /// The fitted lines joined by single newlines. Empty when there is no text.
    pub fn fit(&self) -> String {
        self.lines().join("\n")
    }

    fn chunk_ranges(&self) -> Vec<Range<usize>> {
        match self.chunking {
            Chunking::Exact => self.exact_ranges(),
            Chunking::KeepEscapes => self.escape_aware_ranges(),
        }
    }

    fn exact_ranges(&self) -> Vec<Range<usize>> {
        let starts: Vec<usize> = self
            .escaped
            .char_indices()
            .map(|(offset, _)| offset)
            .step_by(self.effective_width)
            .collect();

        starts
            .iter()
            .enumerate()
            .map(|(i, &start)| {
                let end = starts.get(i + 1).copied().unwrap_or(self.escaped.len());
                start..end
            })
            .collect()
    }

    fn escape_aware_ranges(&self) -> Vec<Range<usize>> {
        let mut ranges = Vec::new();
        let mut start = 0;
        let mut width = 0;

        for unit in &self.units {
            if width + unit.chars > self.effective_width {
                ranges.push(start..unit.start);
                start = unit.start;
                width = 0;
            }
            width += unit.chars;
        }
        if width > 0 {
            ranges.push(start..self.escaped.len());
        }

        ranges
    }
}

/// Returns the number of text characters that fit on a line of `line_width`.
///
/// Widths that leave no room for text, or no room for a whole escape
/// sequence under [`Chunking::KeepEscapes`], are rejected.
pub fn check_line_width(line_width: usize, chunking: Chunking) -> Result<usize, FitError> {
    let effective_width = line_width
        .checked_sub(RESERVED_CHARS)
        .filter(|width| *width >= 1)
        .ok_or(FitError::DegenerateWidth { line_width })?;
    if chunking == Chunking::KeepEscapes && effective_width < ESCAPE_LEN {
        return Err(FitError::WidthTooSmallForEscapes { line_width });
    }
    Ok(effective_width)
}

/// Escapes `text` for embedding between two `quote` characters.
///
/// The quote character gains a leading backslash, tabs become `\t` and
/// newlines become `\n`. Existing backslashes are left alone.
pub fn escape(text: &str, quote: QuoteStyle) -> String {
    escape_units(text, quote.as_char()).0
}

// Single pass; equivalent to replacing the quote, then tabs, then newlines,
// since none of the replacements introduces a character another one matches.
fn escape_units(text: &str, quote: char) -> (String, Vec<Unit>) {
    let mut escaped = String::with_capacity(text.len());
    let mut units = Vec::with_capacity(text.len());

    for c in text.chars() {
        let start = escaped.len();
        let chars = if c == quote {
            escaped.push('\\');
            escaped.push(quote);
            ESCAPE_LEN
        } else if c == '\t' {
            escaped.push_str("\\t");
            ESCAPE_LEN
        } else if c == '\n' {
            escaped.push_str("\\n");
            ESCAPE_LEN
        } else {
            escaped.push(c);
            1
        };
        units.push(Unit { start, chars });
    }

    (escaped, units)
}
