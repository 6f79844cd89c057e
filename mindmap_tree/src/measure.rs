// Copyright 2025 the Mind Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement used to size node boxes.

use alloc::vec::Vec;

use unicode_width::UnicodeWidthStr;

/// Measures label text for layout.
///
/// The layout engine only needs two answers from a text system: how wide a
/// run of text is, and how tall one wrapped line is. Hosts with real font
/// metrics implement this trait; [`MonospaceMeasure`] is a deterministic
/// stand-in that counts display columns.
pub trait TextMeasure {
    /// Advance width of `text` laid out on a single line.
    fn width(&self, text: &str) -> f64;

    /// Height of one line of text.
    fn line_height(&self) -> f64;
}

/// Fixed-advance measurement based on Unicode display width.
///
/// Wide (East Asian) characters count as two columns.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MonospaceMeasure {
    /// Width of one display column.
    pub column_width: f64,
    /// Height of one line.
    pub line_height: f64,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self {
            column_width: 8.0,
            line_height: 20.0,
        }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn width(&self, text: &str) -> f64 {
        #[allow(
            clippy::cast_precision_loss,
            reason = "Label widths are far below 2^52 columns."
        )]
        let columns = text.width() as f64;
        columns * self.column_width
    }

    fn line_height(&self) -> f64 {
        self.line_height
    }
}

/// Greedy word wrap of `text` into lines no wider than `max_width`.
///
/// Whitespace separates words and collapses to a single space. A word wider
/// than the budget on its own is broken between characters. Explicit newlines
/// start a new line. Always returns at least one (possibly empty) line.
pub(crate) fn wrap<'t, M: TextMeasure + ?Sized>(
    measure: &M,
    text: &'t str,
    max_width: f64,
) -> Vec<WrappedLine<'t>> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = LineBuilder::default();
        for word in paragraph.split_whitespace() {
            let word_width = measure.width(word);
            if word_width > max_width {
                if !current.is_empty() {
                    lines.push(current.finish(measure));
                }
                current = break_word(measure, word, max_width, &mut lines);
                continue;
            }
            if current.is_empty() {
                current.push(word);
                continue;
            }
            let joined = measure.width(" ") + word_width + current.width(measure);
            if joined > max_width {
                lines.push(current.finish(measure));
                current = LineBuilder::default();
            }
            current.push(word);
        }
        lines.push(current.finish(measure));
    }
    lines
}

/// One line produced by [`wrap`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct WrappedLine<'t> {
    pub(crate) words: Vec<&'t str>,
    pub(crate) width: f64,
}

#[derive(Default)]
struct LineBuilder<'t> {
    words: Vec<&'t str>,
}

impl<'t> LineBuilder<'t> {
    fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn push(&mut self, word: &'t str) {
        self.words.push(word);
    }

    fn width<M: TextMeasure + ?Sized>(&self, measure: &M) -> f64 {
        let words: f64 = self.words.iter().map(|w| measure.width(w)).sum();
        #[allow(
            clippy::cast_precision_loss,
            reason = "Word counts per line are tiny."
        )]
        let gaps = self.words.len().saturating_sub(1) as f64;
        words + gaps * measure.width(" ")
    }

    fn finish<M: TextMeasure + ?Sized>(self, measure: &M) -> WrappedLine<'t> {
        let width = self.width(measure);
        WrappedLine {
            words: self.words,
            width,
        }
    }
}

/// Split an over-long word into chunks that each fit `max_width`.
///
/// Full chunks are pushed to `lines`; the trailing partial chunk is returned
/// so following words can join it.
fn break_word<'t, M: TextMeasure + ?Sized>(
    measure: &M,
    word: &'t str,
    max_width: f64,
    lines: &mut Vec<WrappedLine<'t>>,
) -> LineBuilder<'t> {
    let mut start = 0;
    for (idx, ch) in word.char_indices() {
        let end = idx + ch.len_utf8();
        // A chunk always keeps at least one character so narrow budgets still progress.
        if idx > start && measure.width(&word[start..end]) > max_width {
            let chunk = &word[start..idx];
            lines.push(WrappedLine {
                words: alloc::vec![chunk],
                width: measure.width(chunk),
            });
            start = idx;
        }
    }
    let mut rest = LineBuilder::default();
    rest.push(&word[start..]);
    rest
}
