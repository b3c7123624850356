//! Deterministic shaping for headless hosts and tests.

use smallvec::SmallVec;
use unicode_segmentation::UnicodeSegmentation;

use crate::{Line, LineLayout, Rect, Run, RunSlice, TextShaper};

/// Shapes text as if every grapheme had the same advance, breaking lines
/// at `\n` and wherever the next grapheme would cross `max_width`.
///
/// All metrics are fractions of the font size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvanceShaper {
    pub advance: f32,
    pub line_height: f32,
    pub ascent: f32,
}

impl Default for FixedAdvanceShaper {
    fn default() -> Self {
        Self {
            advance: 0.6,
            line_height: 1.3,
            ascent: 0.8,
        }
    }
}

impl FixedAdvanceShaper {
    fn build_line(&self, graphemes: &[&str], index: usize, font_px: f32) -> Line {
        let adv = self.advance * font_px;
        let lh = self.line_height * font_px;
        let y = index as f32 * lh;

        let slices: SmallVec<[RunSlice; 8]> = graphemes
            .iter()
            .enumerate()
            .map(|(i, g)| RunSlice {
                text: (*g).to_string(),
                rect: Rect {
                    x: i as f32 * adv,
                    y,
                    w: adv,
                    h: lh,
                },
                ascent: self.ascent * font_px,
            })
            .collect();

        let runs = if slices.is_empty() {
            Vec::new()
        } else {
            vec![Run {
                slices,
                font_size: font_px,
            }]
        };

        Line {
            runs,
            rect: Rect {
                x: 0.0,
                y,
                w: graphemes.len() as f32 * adv,
                h: lh,
            },
            font_size: font_px,
        }
    }
}

impl TextShaper for FixedAdvanceShaper {
    fn shape(&self, text: &str, font_px: f32, max_width: Option<f32>) -> LineLayout {
        let adv = self.advance * font_px;
        let cols = match max_width {
            Some(w) if adv > 0.0 && w.is_finite() => ((w / adv).floor() as usize).max(1),
            _ => usize::MAX,
        };

        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            let graphemes: Vec<&str> = paragraph.graphemes(true).collect();
            if graphemes.is_empty() {
                lines.push(self.build_line(&[], lines.len(), font_px));
                continue;
            }
            for chunk in graphemes.chunks(cols) {
                lines.push(self.build_line(chunk, lines.len(), font_px));
            }
        }
        LineLayout::new(lines)
    }

    fn measure_width(&self, text: &str, font_px: f32) -> f32 {
        text.graphemes(true).count() as f32 * self.advance * font_px
    }
}
