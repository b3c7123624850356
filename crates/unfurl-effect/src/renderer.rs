//! Per-line reveal: the pure part of the effect.
//!
//! Lines before the last visible one are drawn as-is. The last visible line
//! (index `length - 1`) cross-fades its trailing slices against a synthetic
//! label. Every hidden line owns an equal slice of the progress range and
//! fades in while un-blurring inside that window.

use unfurl_core::{Color, DrawScope, Line, LineLayout, LineRenderer, TextShaper, Vec2};
use unicode_segmentation::UnicodeSegmentation;

/// The suffix whose grapheme count decides how many trailing slices fade.
pub const MORE_SUFFIX: &str = "...More";
/// Blur radius of a hidden line that has not started revealing.
pub const MAX_BLUR: f32 = 6.0;

pub fn more_count() -> usize {
    MORE_SUFFIX.graphemes(true).count()
}

fn clamp01(x: f32) -> f32 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

/// Progress window `[start, end]` of hidden line `line_index` out of `total_extra`.
pub fn reveal_window(line_index: usize, total_extra: usize) -> (f32, f32) {
    let n = total_extra.max(1) as f32;
    (line_index as f32 / n, (line_index + 1) as f32 / n)
}

/// Local progress of one hidden line, always in [0, 1].
pub fn line_progress(progress: f32, line_index: usize, total_extra: usize) -> f32 {
    if total_extra == 0 {
        return 1.0;
    }
    let (start, end) = reveal_window(line_index, total_extra);
    clamp01((clamp01(progress) - start) / (end - start))
}

/// Visual parameters of the truncation affordance.
#[derive(Clone, Debug, PartialEq)]
pub struct TruncationStyle {
    pub label: String,
    pub label_color: Color,
    pub text_color: Color,
    pub max_blur: f32,
}

impl Default for TruncationStyle {
    fn default() -> Self {
        Self {
            label: "More".to_string(),
            label_color: Color::GRAY,
            text_color: Color::WHITE,
            max_blur: MAX_BLUR,
        }
    }
}

pub struct TruncationRenderer<'a> {
    pub length: usize,
    pub progress: f32,
    pub style: &'a TruncationStyle,
    pub measurer: &'a dyn TextShaper,
}

impl<'a> TruncationRenderer<'a> {
    pub fn new(
        length: usize,
        progress: f32,
        style: &'a TruncationStyle,
        measurer: &'a dyn TextShaper,
    ) -> Self {
        Self {
            length: length.max(1),
            progress: clamp01(progress),
            style,
            measurer,
        }
    }

    fn draw_revealing_line(
        &self,
        index: usize,
        line: &Line,
        line_count: usize,
        scope: &mut DrawScope,
    ) {
        let line_index = index - self.length;
        let total_extra = line_count - self.length;
        let p = line_progress(self.progress, line_index, total_extra);
        scope.draw_line(index, line, p, self.style.max_blur * (1.0 - p));
    }

    fn draw_more_line(&self, index: usize, line: &Line, scope: &mut DrawScope) {
        let slices: Vec<_> = line.slices().collect();
        let count = slices.len();
        let split = count.saturating_sub(more_count());

        for (i, slice) in slices.iter().enumerate() {
            let opacity = if i < split { 1.0 } else { self.progress };
            scope.draw_slice(index, i, slice, line.font_size, opacity);
        }

        let Some(anchor) = slices.get(split) else {
            return;
        };
        let size = anchor.ascent;
        let width = self.measurer.measure_width(&self.style.label, size);
        let center = Vec2 {
            x: anchor.rect.min_x() + width * 0.5,
            y: anchor.rect.mid_y(),
        };
        scope.draw_label(
            self.style.label.clone(),
            center,
            width,
            size,
            self.style.label_color,
            1.0 - self.progress,
        );
    }
}

impl LineRenderer for TruncationRenderer<'_> {
    fn render(&self, layout: &LineLayout, scope: &mut DrawScope) {
        let line_count = layout.len();
        for (index, line) in layout.iter().enumerate() {
            if index + 1 == self.length {
                self.draw_more_line(index, line, scope);
            } else if index < self.length {
                scope.draw_line(index, line, 1.0, 0.0);
            } else {
                self.draw_revealing_line(index, line, line_count, scope);
            }
        }
    }
}
