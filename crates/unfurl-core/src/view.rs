use crate::{Color, Rect};

/// Renderable scene
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneNode {
    Text {
        rect: Rect,
        text: String,
        color: Color,
        size: f32,
        /// Gaussian blur radius in px; 0 draws sharp.
        blur: f32,
    },
}
