use smallvec::SmallVec;
use thunderdome::Arena;

use softshadow_core::math::{SideOffsets, SizeI32};
use softshadow_raster::ShadowBitmap;

use crate::error::TreeError;

const INIT_NODE_CAPACITY: usize = 64;
const STATIC_ALLOC_CHILDREN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(thunderdome::Index);

bitflags::bitflags! {
    /// Per-node behaviour flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct NodeFlags: u32 {
        /// The node clips its children to its own bounds.
        const CLIP_CHILDREN = 0b0001;
        /// The node depends on clipping its children to work correctly
        /// (for example a paged, swipeable container). Clipping on such a
        /// node is never turned off by descendants.
        const CLIP_SENSITIVE = 0b0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        NodeFlags::empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A plain container that stacks its children.
    Container,
    /// A paged container that relies on clipping its children.
    Pager,
    /// An image element displaying a rendered bitmap.
    Image(ShadowBitmap),
    /// A node that cannot hold children.
    Leaf,
}

/// How a node asks to be laid out by its parent.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutParams {
    /// A fixed size, or `None` to let the parent decide.
    pub size: Option<SizeI32>,
    /// Margins around the node. Negative margins let the node extend
    /// past its parent's bounds.
    pub margins: SideOffsets,
}

#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    flags: NodeFlags,
    layout_params: LayoutParams,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; STATIC_ALLOC_CHILDREN]>,
}

impl Node {
    fn new(kind: NodeKind, flags: NodeFlags) -> Self {
        Self {
            kind,
            flags,
            layout_params: LayoutParams::default(),
            parent: None,
            children: SmallVec::new(),
        }
    }

    pub fn container() -> Self {
        Self::new(NodeKind::Container, NodeFlags::CLIP_CHILDREN)
    }

    pub fn pager() -> Self {
        Self::new(
            NodeKind::Pager,
            NodeFlags::CLIP_CHILDREN | NodeFlags::CLIP_SENSITIVE,
        )
    }

    pub fn image(bitmap: ShadowBitmap) -> Self {
        Self::new(NodeKind::Image(bitmap), NodeFlags::empty())
    }

    pub fn leaf() -> Self {
        Self::new(NodeKind::Leaf, NodeFlags::empty())
    }

    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_layout_params(mut self, layout_params: LayoutParams) -> Self {
        self.layout_params = layout_params;
        self
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    pub fn layout_params(&self) -> &LayoutParams {
        &self.layout_params
    }

    pub fn set_layout_params(&mut self, layout_params: LayoutParams) {
        self.layout_params = layout_params;
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Container | NodeKind::Pager)
    }

    pub fn bitmap(&self) -> Option<&ShadowBitmap> {
        match &self.kind {
            NodeKind::Image(bitmap) => Some(bitmap),
            _ => None,
        }
    }
}

/// A retained tree of view nodes.
///
/// Nodes live in an arena and refer to each other by [`NodeId`]. A node
/// is created detached and becomes part of the visible hierarchy once it
/// is inserted under a parent.
#[derive(Debug)]
pub struct ViewTree {
    nodes: Arena<Node>,
}

impl ViewTree {
    pub fn new() -> Self {
        Self {
            nodes: Arena::with_capacity(INIT_NODE_CAPACITY),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(id.0)
    }

    /// Adds a detached node to the tree.
    pub fn insert(&mut self, node: Node) -> NodeId {
        NodeId(self.nodes.insert(node))
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    fn node(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.nodes.get(id.0).ok_or(TreeError::InvalidNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, TreeError> {
        self.nodes.get_mut(id.0).ok_or(TreeError::InvalidNode(id))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// The children of `id` in stacking order (bottommost first). Empty
    /// if the node does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children()).unwrap_or(&[])
    }

    /// Iterates over the ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    pub fn is_container(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| n.is_container())
    }

    pub fn is_clip_sensitive(&self, id: NodeId) -> bool {
        self.get(id)
            .is_some_and(|n| n.flags.contains(NodeFlags::CLIP_SENSITIVE))
    }

    pub fn clip_children(&self, id: NodeId) -> bool {
        self.get(id)
            .is_some_and(|n| n.flags.contains(NodeFlags::CLIP_CHILDREN))
    }

    pub fn set_clip_children(&mut self, id: NodeId, clip: bool) -> Result<(), TreeError> {
        let node = self.node_mut(id)?;
        if !node.is_container() {
            return Err(TreeError::NotAContainer(id));
        }
        node.flags.set(NodeFlags::CLIP_CHILDREN, clip);
        Ok(())
    }

    /// Inserts the detached node `child` into `parent`'s children at
    /// `index`. Index `0` places it beneath every existing child.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        index: usize,
        child: NodeId,
    ) -> Result<(), TreeError> {
        let parent_node = self.node(parent)?;
        if !parent_node.is_container() {
            return Err(TreeError::NotAContainer(parent));
        }
        let len = parent_node.children.len();
        if index > len {
            return Err(TreeError::IndexOutOfBounds { index, len });
        }

        if self.node(child)?.parent.is_some() {
            return Err(TreeError::IsAttached(child));
        }
        if child == parent || self.ancestors(parent).any(|a| a == child) {
            return Err(TreeError::WouldCycle(child));
        }

        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.insert(index, child);
        Ok(())
    }

    /// Inserts the detached node `child` on top of `parent`'s children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let index = self.node(parent)?.children.len();
        self.insert_child(parent, index, child)
    }

    /// Removes `id` from its parent. The node and its subtree stay in the
    /// tree and can be inserted elsewhere.
    pub fn detach(&mut self, id: NodeId) -> Result<(), TreeError> {
        let Some(parent) = self.node(id)?.parent else {
            return Ok(());
        };

        self.node_mut(parent)?.children.retain(|c| *c != id);
        self.node_mut(id)?.parent = None;
        Ok(())
    }

    /// Detaches `id` and drops it along with its whole subtree. Returns
    /// the removed node.
    pub fn remove(&mut self, id: NodeId) -> Result<Node, TreeError> {
        self.detach(id)?;

        let mut stack: Vec<NodeId> = self.node(id)?.children.to_vec();
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(next.0) {
                stack.extend(node.children);
            }
        }

        self.nodes.remove(id.0).ok_or(TreeError::InvalidNode(id))
    }
}

impl Default for ViewTree {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Ancestors<'a> {
    tree: &'a ViewTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
