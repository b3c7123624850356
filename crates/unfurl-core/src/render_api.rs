use crate::{Color, Line, LineLayout, Rect, RunSlice, Scene, SceneNode, Vec2};

/// Line breaking and measurement service.
pub trait TextShaper {
    /// Break `text` into lines no wider than `max_width` (unbounded when `None`).
    fn shape(&self, text: &str, font_px: f32, max_width: Option<f32>) -> LineLayout;
    /// Width of `text` laid out on a single line.
    fn measure_width(&self, text: &str, font_px: f32) -> f32;
}

/// Draws a shaped layout into a [`DrawScope`].
pub trait LineRenderer {
    fn render(&self, layout: &LineLayout, scope: &mut DrawScope);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Line {
        index: usize,
        rect: Rect,
        text: String,
        size: f32,
        opacity: f32,
        blur: f32,
    },
    Slice {
        line: usize,
        slice: usize,
        rect: Rect,
        text: String,
        size: f32,
        opacity: f32,
    },
    /// Synthetic text centered on `center`.
    Label {
        text: String,
        center: Vec2,
        width: f32,
        size: f32,
        color: Color,
        opacity: f32,
    },
}

impl DrawOp {
    pub fn opacity(&self) -> f32 {
        match self {
            DrawOp::Line { opacity, .. }
            | DrawOp::Slice { opacity, .. }
            | DrawOp::Label { opacity, .. } => *opacity,
        }
    }

    pub fn blur(&self) -> f32 {
        match self {
            DrawOp::Line { blur, .. } => *blur,
            DrawOp::Slice { .. } | DrawOp::Label { .. } => 0.0,
        }
    }
}

/// Records draw operations; replayed into a [`Scene`] by the host.
#[derive(Clone, Debug, Default)]
pub struct DrawScope {
    pub ops: Vec<DrawOp>,
}

fn clamp01(x: f32) -> f32 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

impl DrawScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw_line(&mut self, index: usize, line: &Line, opacity: f32, blur: f32) {
        self.ops.push(DrawOp::Line {
            index,
            rect: line.rect,
            text: line.text(),
            size: line.font_size,
            opacity: clamp01(opacity),
            blur: blur.max(0.0),
        });
    }

    pub fn draw_slice(
        &mut self,
        line: usize,
        slice: usize,
        run_slice: &RunSlice,
        size: f32,
        opacity: f32,
    ) {
        self.ops.push(DrawOp::Slice {
            line,
            slice,
            rect: run_slice.rect,
            text: run_slice.text.clone(),
            size,
            opacity: clamp01(opacity),
        });
    }

    pub fn draw_label(
        &mut self,
        text: impl Into<String>,
        center: Vec2,
        width: f32,
        size: f32,
        color: Color,
        opacity: f32,
    ) {
        self.ops.push(DrawOp::Label {
            text: text.into(),
            center,
            width: width.max(0.0),
            size,
            color,
            opacity: clamp01(opacity),
        });
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    /// Replay into scene nodes positioned at `origin`. Opacity is folded into
    /// the color alpha; fully transparent ops are culled.
    pub fn to_scene(&self, origin: Vec2, text_color: Color) -> Scene {
        let mut scene = Scene::default();
        for op in &self.ops {
            let node = match op {
                DrawOp::Line {
                    rect,
                    text,
                    size,
                    opacity,
                    blur,
                    ..
                } => SceneNode::Text {
                    rect: rect.translate(origin.x, origin.y),
                    text: text.clone(),
                    color: text_color.mul_alpha(*opacity),
                    size: *size,
                    blur: *blur,
                },
                DrawOp::Slice {
                    rect,
                    text,
                    size,
                    opacity,
                    ..
                } => SceneNode::Text {
                    rect: rect.translate(origin.x, origin.y),
                    text: text.clone(),
                    color: text_color.mul_alpha(*opacity),
                    size: *size,
                    blur: 0.0,
                },
                DrawOp::Label {
                    text,
                    center,
                    width,
                    size,
                    color,
                    opacity,
                } => SceneNode::Text {
                    rect: Rect {
                        x: origin.x + center.x - width * 0.5,
                        y: origin.y + center.y - size * 0.5,
                        w: *width,
                        h: *size,
                    },
                    text: text.clone(),
                    color: color.mul_alpha(*opacity),
                    size: *size,
                    blur: 0.0,
                },
            };
            let SceneNode::Text { color, .. } = &node;
            if color.3 > 0 {
                scene.nodes.push(node);
            }
        }
        scene
    }
}
