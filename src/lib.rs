mod clip;
mod layout;
mod tree;

pub mod config;
pub mod error;

pub use clip::disable_clip_on_ancestors;
pub use layout::{LayoutOutcome, ShadowLayout, ShadowState};
pub use tree::{Ancestors, LayoutParams, Node, NodeFlags, NodeId, NodeKind, ViewTree};

pub use softshadow_core::*;

pub use softshadow_raster as raster;
