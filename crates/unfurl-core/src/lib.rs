//! # Unfurl core
//!
//! Shared vocabulary for the truncation effect:
//!
//! - geometry (`Vec2`, `Size`, `Rect`) and `Color`;
//! - `LineLayout`, the read-only line/run/slice geometry produced by a
//!   `TextShaper`;
//! - `AnimatedValue`, a retargetable tween sampled against a `Clock`;
//! - `DrawScope` / `DrawOp`, the draw instruction stream a `LineRenderer`
//!   emits, and the `Scene` it replays into.
//!
//! ```rust
//! use unfurl_core::*;
//!
//! let shaper = FixedAdvanceShaper::default();
//! let layout = shaper.shape("hello\nworld", 10.0, None);
//! assert_eq!(layout.len(), 2);
//! assert!(layout.size_capped(1).height < layout.size().height);
//! ```

pub mod animation;
pub mod color;
pub mod geometry;
pub mod layout;
pub mod prelude;
pub mod render_api;
pub mod shaper;
pub mod tests;
pub mod view;

pub use color::*;
pub use geometry::*;
pub use layout::*;
pub use prelude::*;
pub use render_api::*;
pub use shaper::*;
pub use view::*;
