//! Read-only line geometry produced by a [`TextShaper`](crate::TextShaper).
//!
//! A [`LineLayout`] is an ordered list of [`Line`]s, each made of [`Run`]s
//! (glyphs sharing one font and direction), each made of [`RunSlice`]s. A
//! slice is one grapheme cluster: the smallest unit the renderer can fade on
//! its own. All rects are relative to the top-left corner of the layout.

use smallvec::SmallVec;

use crate::{Rect, Size};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSlice {
    pub text: String,
    pub rect: Rect,
    /// Typographic ascent of the font this slice was shaped with.
    pub ascent: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Run {
    pub slices: SmallVec<[RunSlice; 8]>,
    pub font_size: f32,
}

impl Run {
    pub fn text(&self) -> String {
        self.slices.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Line {
    pub runs: Vec<Run>,
    /// Line box: full line height, width of the shaped content.
    pub rect: Rect,
    pub font_size: f32,
}

impl Line {
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text()).collect()
    }

    /// All slices of all runs, in visual order.
    pub fn slices(&self) -> impl Iterator<Item = &RunSlice> {
        self.runs.iter().flat_map(|r| r.slices.iter())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineLayout {
    pub lines: Vec<Line>,
}

impl LineLayout {
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }

    /// Natural size of every line.
    pub fn size(&self) -> Size {
        self.size_capped(usize::MAX)
    }

    /// Size of the first `max_lines` lines.
    pub fn size_capped(&self, max_lines: usize) -> Size {
        self.lines
            .iter()
            .take(max_lines)
            .fold(Size::ZERO, |acc, l| Size {
                width: acc.width.max(l.rect.max_x()),
                height: acc.height.max(l.rect.max_y()),
            })
            .sanitized()
    }
}

impl<'a> IntoIterator for &'a LineLayout {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
