#![allow(non_snake_case)]
//! Truncate multi-line text to a fixed number of lines and animate the
//! expansion: hidden lines fade in and sharpen one after another while a
//! "More" label on the last visible line fades out.
//!
//! ```rust,no_run
//! use unfurl_effect::*;
//! use unfurl_core::AnimationSpec;
//!
//! let mut text = Text("A long paragraph ...")
//!     .size(16.0)
//!     .truncation_effect(3, true, AnimationSpec::default())?;
//!
//! // Every frame:
//! let frame = text.frame(320.0)?;
//! let scene = frame.to_scene();
//! # let _ = scene;
//!
//! // On tap:
//! text.set_enabled(false);
//! # Ok::<(), EffectError>(())
//! ```

pub mod coordinator;
pub mod error;
pub mod renderer;

use std::rc::Rc;

use taffy::prelude::*;
use unfurl_core::{
    AnimationSpec, Color, DrawOp, DrawScope, LineLayout, LineRenderer, Scene, TextShaper, Vec2,
};
use unfurl_text::CosmicShaper;
use web_time::Instant;

pub use coordinator::{LayoutCoordinator, Phase, TruncationConfig};
pub use error::EffectError;
pub use renderer::{
    MAX_BLUR, MORE_SUFFIX, TruncationRenderer, TruncationStyle, line_progress, more_count,
    reveal_window,
};

/// Text content awaiting a truncation effect.
#[derive(Clone, Debug, PartialEq)]
pub struct TextContent {
    pub text: String,
    pub font_size: f32,
    pub color: Color,
}

pub fn Text(text: impl Into<String>) -> TextContent {
    TextContent {
        text: text.into(),
        font_size: 16.0,
        color: Color::WHITE,
    }
}

impl TextContent {
    pub fn size(mut self, px: f32) -> Self {
        self.font_size = px;
        self
    }
    pub fn color(mut self, c: Color) -> Self {
        self.color = c;
        self
    }
}

pub trait TruncationEffectExt {
    /// Show at most `length` lines while `is_enabled`; animate to the full
    /// text with `animation` when it turns `false`.
    fn truncation_effect(
        self,
        length: usize,
        is_enabled: bool,
        animation: AnimationSpec,
    ) -> Result<TruncatedText, EffectError>;
}

impl TruncationEffectExt for TextContent {
    fn truncation_effect(
        self,
        length: usize,
        is_enabled: bool,
        animation: AnimationSpec,
    ) -> Result<TruncatedText, EffectError> {
        TruncatedText::new(
            self,
            TruncationConfig {
                length,
                enabled: is_enabled,
                animation,
            },
        )
    }
}

/// One laid-out and rendered frame.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Laid-out container size.
    pub size: unfurl_core::Size,
    pub progress: f32,
    pub ops: Vec<DrawOp>,
    text_color: Color,
}

impl Frame {
    pub fn to_scene(&self) -> Scene {
        self.to_scene_at(Vec2::default())
    }

    pub fn to_scene_at(&self, origin: Vec2) -> Scene {
        let scope = DrawScope {
            ops: self.ops.clone(),
        };
        scope.to_scene(origin, self.text_color)
    }
}

/// A text with the truncation effect applied.
pub struct TruncatedText {
    content: TextContent,
    style: TruncationStyle,
    coordinator: LayoutCoordinator,
    shaper: Rc<dyn TextShaper>,
    // Shaped for (width); dropped when content or width change.
    cached: Option<(f32, LineLayout)>,
}

impl TruncatedText {
    pub fn new(content: TextContent, config: TruncationConfig) -> Result<Self, EffectError> {
        if config.length < 1 {
            return Err(EffectError::InvalidLength(config.length));
        }
        Ok(Self {
            content,
            style: TruncationStyle::default(),
            coordinator: LayoutCoordinator::new(config),
            shaper: Rc::new(CosmicShaper),
            cached: None,
        })
    }

    pub fn with_shaper(mut self, shaper: Rc<dyn TextShaper>) -> Self {
        self.shaper = shaper;
        self.cached = None;
        self
    }

    pub fn with_style(mut self, style: TruncationStyle) -> Self {
        self.style = style;
        self
    }

    pub fn coordinator(&self) -> &LayoutCoordinator {
        &self.coordinator
    }

    pub fn is_enabled(&self) -> bool {
        self.coordinator.config().enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.set_enabled_at(enabled, unfurl_core::animation::now());
    }

    pub fn set_enabled_at(&mut self, enabled: bool, at: Instant) {
        self.coordinator.on_enabled_changed_at(enabled, at);
    }

    pub fn set_animation(&mut self, animation: AnimationSpec) {
        self.coordinator.set_animation(animation);
    }

    pub fn toggle_at(&mut self, at: Instant) {
        let enabled = !self.is_enabled();
        self.set_enabled_at(enabled, at);
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.content.text {
            self.content.text = text;
            self.cached = None;
        }
    }

    pub fn is_animating(&self) -> bool {
        self.coordinator.is_animating()
    }

    pub fn frame(&mut self, width: f32) -> Result<Frame, EffectError> {
        self.frame_at(width, unfurl_core::animation::now())
    }

    /// Lay out and render for `width` at time `at`.
    pub fn frame_at(&mut self, width: f32, at: Instant) -> Result<Frame, EffectError> {
        self.coordinator.initialize();
        self.coordinator.tick(at);

        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        let layout = cached_layout(
            &mut self.cached,
            self.shaper.as_ref(),
            &self.content,
            width,
        );
        self.coordinator.measure(layout);
        let size = layout_container(&self.coordinator, width)?;

        let progress = self.coordinator.progress();
        let mut scope = DrawScope::new();
        TruncationRenderer::new(
            self.coordinator.config().length,
            progress,
            &self.style,
            self.shaper.as_ref(),
        )
        .render(layout, &mut scope);

        log::trace!(
            "frame progress={progress:.3} height={} ops={}",
            size.height,
            scope.ops.len()
        );
        Ok(Frame {
            size,
            progress,
            ops: scope.into_ops(),
            text_color: self.content.color,
        })
    }
}

// Shapes only when the width or the text changed since the last frame.
fn cached_layout<'a>(
    cached: &'a mut Option<(f32, LineLayout)>,
    shaper: &dyn TextShaper,
    content: &TextContent,
    width: f32,
) -> &'a LineLayout {
    if cached.as_ref().is_some_and(|(w, _)| *w != width) {
        *cached = None;
    }
    let (_, layout) = cached.get_or_insert_with(|| {
        log::debug!("re-measuring text for width {width}");
        (
            width,
            shaper.shape(&content.text, content.font_size, Some(width)),
        )
    });
    layout
}

// The container hugs the collapsed placeholder; its height is pinned to
// the full height once expanded. The full text overflows it top-leading
// while the transition runs.
fn layout_container(
    coordinator: &LayoutCoordinator,
    width: f32,
) -> Result<unfurl_core::Size, EffectError> {
    let mut tree: TaffyTree<unfurl_core::Size> = TaffyTree::new();
    let placeholder = tree.new_leaf_with_context(
        Style {
            size: taffy::geometry::Size {
                width: percent(1.0),
                height: auto(),
            },
            ..Default::default()
        },
        coordinator.collapsed_size(),
    )?;
    let root = tree.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            align_items: Some(AlignItems::Start),
            size: taffy::geometry::Size {
                width: length(width),
                height: coordinator.resolved_height(),
            },
            ..Default::default()
        },
        &[placeholder],
    )?;

    tree.compute_layout_with_measure(
        root,
        taffy::geometry::Size {
            width: AvailableSpace::Definite(width),
            height: AvailableSpace::MaxContent,
        },
        |known, _avail, _node, ctx, _style| match ctx {
            Some(measured) => taffy::geometry::Size {
                width: known.width.unwrap_or(measured.width),
                height: known.height.unwrap_or(measured.height),
            },
            None => taffy::geometry::Size::ZERO,
        },
    )?;

    let l = tree.layout(root)?;
    Ok(unfurl_core::Size::new(l.size.width, l.size.height))
}
