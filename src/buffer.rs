use crate::error::EmptyInput;
use unicode_width::UnicodeWidthChar;

/// Glyph used to display the synthetic end-of-line position.
pub const LINE_END_GLYPH: char = '⏎';

/// What the session expects at a cursor position: a literal character, or
/// the synthetic end-of-line symbol one past the last character (matched by
/// the Enter key).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expected {
    Char(char),
    LineEnd,
}

/// Immutable practice text: one string per source line, trailing whitespace
/// already stripped by the loader, tabs expanded to spaces on construction.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    lines: Vec<String>,
    /// offsets[l] is the position ordinal of (l, 0); each line contributes
    /// its character count plus one for the end-of-line symbol.
    offsets: Vec<usize>,
    tab_width: usize,
}

impl TextBuffer {
    pub fn new(lines: Vec<String>, tab_width: usize) -> Result<Self, EmptyInput> {
        if lines.is_empty() {
            return Err(EmptyInput);
        }

        let tab_width = tab_width.max(1);
        let lines: Vec<String> = lines
            .into_iter()
            .map(|line| expand_tabs(&line, tab_width))
            .collect();

        let mut offsets = Vec::with_capacity(lines.len());
        let mut total = 0;
        for line in &lines {
            offsets.push(total);
            total += line.chars().count() + 1;
        }

        Ok(Self {
            lines,
            offsets,
            tab_width,
        })
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, line_num: usize) -> &str {
        &self.lines[line_num]
    }

    /// Character count of a line; also the line_index of its end-of-line
    /// symbol.
    pub fn line_len(&self, line_num: usize) -> usize {
        self.lines[line_num].chars().count()
    }

    /// The terminal position of the whole buffer.
    pub fn last_position(&self) -> (usize, usize) {
        let last = self.lines.len() - 1;
        (last, self.line_len(last))
    }

    /// What a typed key is compared against at the given position.
    /// Total for every position satisfying the cursor invariant
    /// (0 <= line_index <= line_len).
    pub fn expected(&self, line_num: usize, line_index: usize) -> Expected {
        match self.lines[line_num].chars().nth(line_index) {
            Some(c) => Expected::Char(c),
            None => Expected::LineEnd,
        }
    }

    /// Flat ordinal of a position within the buffer's character stream,
    /// counting each line's end-of-line symbol as one position.
    pub fn ordinal(&self, line_num: usize, line_index: usize) -> usize {
        self.offsets[line_num] + line_index
    }
}

/// Expand tabs to the next tab stop, tracking display columns so that wide
/// characters before a tab keep the stops aligned.
fn expand_tabs(line: &str, tab_width: usize) -> String {
    if !line.contains('\t') {
        return line.to_owned();
    }

    let mut out = String::with_capacity(line.len() + tab_width);
    let mut col = 0;
    for c in line.chars() {
        if c == '\t' {
            let pad = tab_width - (col % tab_width);
            for _ in 0..pad {
                out.push(' ');
            }
            col += pad;
        } else {
            out.push(c);
            col += UnicodeWidthChar::width(c).unwrap_or(0);
        }
    }
    out
}
