//! Line breaking and measurement backed by cosmic-text.
//!
//! One `FontSystem` is shared by the whole process behind a mutex; buffers
//! are built per call.

use ahash::AHashMap;
use cosmic_text::{Attrs, Buffer, FontSystem, LayoutRun, Metrics, Shaping};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use smallvec::SmallVec;
use unfurl_core::{Line, LineLayout, Rect, Run, RunSlice, TextShaper};
use unicode_segmentation::UnicodeSegmentation;

pub const LINE_HEIGHT_FACTOR: f32 = 1.3;
/// Ascent as a fraction of the font size; close enough for label sizing.
pub const ASCENT_FACTOR: f32 = 0.8;
/// Measured widths kept before the cache starts over.
const WIDTH_CACHE_CAP: usize = 256;

struct Engine {
    fs: FontSystem,
    // (text, px bits) -> single line width
    widths: AHashMap<(String, u32), f32>,
}

static ENGINE: OnceCell<Mutex<Engine>> = OnceCell::new();

fn engine() -> &'static Mutex<Engine> {
    ENGINE.get_or_init(|| {
        log::debug!("initialising font system");
        Mutex::new(Engine {
            fs: FontSystem::new(),
            widths: AHashMap::new(),
        })
    })
}

fn remember_width(widths: &mut AHashMap<(String, u32), f32>, key: (String, u32), w: f32) {
    if widths.len() >= WIDTH_CACHE_CAP {
        log::trace!("width cache full, clearing {} entries", widths.len());
        widths.clear();
    }
    widths.insert(key, w);
}

fn shape_buffer(fs: &mut FontSystem, text: &str, px: f32, max_width: Option<f32>) -> Buffer {
    let mut buf = Buffer::new(fs, Metrics::new(px, px * LINE_HEIGHT_FACTOR));
    {
        let mut b = buf.borrow_with(fs);
        b.set_size(max_width, None);
        b.set_text(text, &Attrs::new(), Shaping::Advanced, None);
        b.shape_until_scroll(true);
    }
    buf
}

// Index of the grapheme cluster containing byte offset `byte`.
fn cluster_index(starts: &[(usize, &str)], byte: usize) -> usize {
    match starts.binary_search_by(|(start, _)| start.cmp(&byte)) {
        Ok(i) => i,
        Err(i) => i.saturating_sub(1),
    }
}

fn line_from_run(run: &LayoutRun<'_>, px: f32) -> Line {
    let line_h = px * LINE_HEIGHT_FACTOR;
    let clusters: Vec<(usize, &str)> = run.text.grapheme_indices(true).collect();

    let mut runs: Vec<Run> = Vec::new();
    let mut run_key = None;
    let mut last_cluster = None;

    for g in run.glyphs {
        let key = (g.font_id, g.level.is_rtl());
        if run_key != Some(key) {
            runs.push(Run {
                slices: SmallVec::new(),
                font_size: g.font_size,
            });
            run_key = Some(key);
            last_cluster = None;
        }
        let Some(current) = runs.last_mut() else {
            continue;
        };

        let rect = Rect {
            x: g.x,
            y: run.line_top,
            w: g.w,
            h: line_h,
        };
        let cluster = cluster_index(&clusters, g.start);

        // Several glyphs shaping one grapheme (marks, ligature parts)
        if last_cluster == Some(cluster)
            && let Some(slice) = current.slices.last_mut()
        {
            slice.rect = slice.rect.union(&rect);
            continue;
        }

        let text = clusters
            .get(cluster)
            .map(|(_, s)| (*s).to_string())
            .unwrap_or_else(|| run.text.get(g.start..g.end).unwrap_or("").to_string());
        current.slices.push(RunSlice {
            text,
            rect,
            ascent: g.font_size * ASCENT_FACTOR,
        });
        last_cluster = Some(cluster);
    }

    Line {
        runs,
        rect: Rect {
            x: 0.0,
            y: run.line_top,
            w: run.line_w,
            h: line_h,
        },
        font_size: px,
    }
}

/// [`TextShaper`] over the process-wide cosmic-text font system.
#[derive(Clone, Copy, Debug, Default)]
pub struct CosmicShaper;

impl TextShaper for CosmicShaper {
    fn shape(&self, text: &str, font_px: f32, max_width: Option<f32>) -> LineLayout {
        let mut eng = engine().lock();
        let buf = shape_buffer(&mut eng.fs, text, font_px, max_width);
        let lines: Vec<Line> = buf
            .layout_runs()
            .map(|run| line_from_run(&run, font_px))
            .collect();
        log::trace!(
            "shaped {} bytes into {} lines (max_width={:?})",
            text.len(),
            lines.len(),
            max_width
        );
        LineLayout::new(lines)
    }

    fn measure_width(&self, text: &str, font_px: f32) -> f32 {
        let key = (text.to_string(), font_px.to_bits());
        let mut eng = engine().lock();
        if let Some(w) = eng.widths.get(&key) {
            return *w;
        }
        let buf = shape_buffer(&mut eng.fs, text, font_px, None);
        let w = buf.layout_runs().map(|r| r.line_w).fold(0.0f32, f32::max);
        remember_width(&mut eng.widths, key, w);
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_index_maps_bytes_to_graphemes() {
        let text = "ae\u{301}b";
        let clusters: Vec<(usize, &str)> = text.grapheme_indices(true).collect();
        assert_eq!(cluster_index(&clusters, 0), 0);
        assert_eq!(cluster_index(&clusters, 1), 1);
        // combining acute lives inside the second cluster
        assert_eq!(cluster_index(&clusters, 2), 1);
        assert_eq!(cluster_index(&clusters, 4), 2);
    }

    #[test]
    fn test_hard_breaks_produce_lines() {
        let layout = CosmicShaper.shape("one\ntwo\nthree", 16.0, None);
        assert_eq!(layout.len(), 3);
        let tops: Vec<f32> = layout.iter().map(|l| l.rect.y).collect();
        assert!(tops.windows(2).all(|w| w[0] < w[1]));
        assert!(layout.size_capped(1).height <= layout.size().height);
    }

    #[test]
    fn test_measure_width_is_cached_and_stable() {
        let a = CosmicShaper.measure_width("More", 14.0);
        let b = CosmicShaper.measure_width("More", 14.0);
        assert_eq!(a, b);
        assert!(a >= 0.0);
        assert_eq!(CosmicShaper.measure_width("", 14.0), 0.0);
    }

    #[test]
    fn test_width_cache_is_bounded() {
        let mut widths = AHashMap::new();
        for i in 0..WIDTH_CACHE_CAP * 3 {
            remember_width(&mut widths, (format!("label {i}"), 14.0f32.to_bits()), i as f32);
            assert!(widths.len() <= WIDTH_CACHE_CAP);
        }
        let last = WIDTH_CACHE_CAP * 3 - 1;
        assert_eq!(
            widths.get(&(format!("label {last}"), 14.0f32.to_bits())),
            Some(&(last as f32))
        );
    }
}
