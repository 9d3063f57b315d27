use softshadow_raster::RenderError;

use crate::tree::NodeId;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("node {0:?} does not exist")]
    InvalidNode(NodeId),

    #[error("node {0:?} cannot hold children")]
    NotAContainer(NodeId),

    #[error("child index {index} is out of bounds for {len} children")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("node {0:?} already has a parent")]
    IsAttached(NodeId),

    #[error("inserting node {0:?} would make it its own ancestor")]
    WouldCycle(NodeId),

    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("view tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("shadow render error: {0}")]
    Render(#[from] RenderError),
}
