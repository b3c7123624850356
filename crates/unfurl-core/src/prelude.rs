pub use crate::animation::{
    AnimatedValue, AnimationSpec, Clock, Easing, Interpolate, ManualClock, set_clock,
};
pub use crate::color::Color;
pub use crate::geometry::{Rect, Size, Vec2};
pub use crate::layout::{Line, LineLayout, Run, RunSlice};
pub use crate::render_api::{DrawOp, DrawScope, LineRenderer, TextShaper};
pub use crate::shaper::FixedAdvanceShaper;
pub use crate::view::{Scene, SceneNode};
