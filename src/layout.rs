use softshadow_core::math::{RectI32, SideOffsets, SizeI32};
use softshadow_raster::{render, shadow_margin, RenderMode, ShadowBitmap, ShadowStyle};

use crate::clip::disable_clip_on_ancestors;
use crate::config::{style_from_attributes, AttributeSource};
use crate::error::{LayoutError, TreeError};
use crate::tree::{LayoutParams, Node, NodeId, ViewTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShadowState {
    NoShadow,
    ShadowPresent,
}

/// What a call to [`ShadowLayout::on_layout`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutOutcome {
    /// The bounds did not change, nothing was done.
    Unchanged,
    /// The first shadow was inserted.
    Created,
    /// An existing shadow was replaced by one matching the new bounds.
    Regenerated,
    /// The new bounds are empty, so no shadow is shown.
    Cleared,
}

/// A container that draws a rounded rectangle with a drop shadow beneath
/// its content.
///
/// The shadow is a rendered bitmap held by an image node, which is always
/// the bottommost child of the container. It is rebuilt whenever the
/// container's bounds change. Content children are added through this type
/// and always stack above the shadow.
#[derive(Debug)]
pub struct ShadowLayout {
    node: NodeId,
    style: ShadowStyle,
    mode: RenderMode,
    shadow_node: Option<NodeId>,
    last_bounds: Option<RectI32>,
}

impl ShadowLayout {
    /// Creates the container as a detached node in `tree`.
    pub fn new(tree: &mut ViewTree, style: ShadowStyle) -> Self {
        Self::with_mode(tree, style, RenderMode::Interactive)
    }

    pub fn with_mode(tree: &mut ViewTree, style: ShadowStyle, mode: RenderMode) -> Self {
        let node = tree.insert(Node::container());

        Self {
            node,
            style: style.sanitized(),
            mode,
            shadow_node: None,
            last_bounds: None,
        }
    }

    /// Creates the container with a style read from `source`. Missing or
    /// invalid attributes fall back to their defaults.
    pub fn from_attributes<S: AttributeSource + ?Sized>(
        tree: &mut ViewTree,
        source: Option<&S>,
        mode: RenderMode,
    ) -> Self {
        Self::with_mode(tree, style_from_attributes(source), mode)
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn style(&self) -> &ShadowStyle {
        &self.style
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn state(&self) -> ShadowState {
        if self.shadow_node.is_some() {
            ShadowState::ShadowPresent
        } else {
            ShadowState::NoShadow
        }
    }

    /// The image node carrying the shadow, if one is present.
    pub fn shadow_node(&self) -> Option<NodeId> {
        self.shadow_node
    }

    pub fn shadow_bitmap<'a>(&self, tree: &'a ViewTree) -> Option<&'a ShadowBitmap> {
        self.shadow_node
            .and_then(|id| tree.get(id))
            .and_then(|n| n.bitmap())
    }

    /// The container has no intrinsic minimum size; it is sized entirely
    /// by its parent and content.
    pub fn suggested_minimum_size(&self) -> SizeI32 {
        SizeI32::zero()
    }

    /// Adds `child` on top of the existing content.
    pub fn add_child(&self, tree: &mut ViewTree, child: NodeId) -> Result<(), TreeError> {
        tree.append_child(self.node, child)
    }

    /// Inserts `child` at `index` among the content children. The shadow
    /// does not count towards the index.
    pub fn insert_child(
        &self,
        tree: &mut ViewTree,
        index: usize,
        child: NodeId,
    ) -> Result<(), TreeError> {
        let shadow_at_bottom = self.shadow_node.is_some()
            && tree.children(self.node).first().copied() == self.shadow_node;
        let offset = usize::from(shadow_at_bottom);
        let len = self.content_children(tree).count();
        if index > len {
            return Err(TreeError::IndexOutOfBounds { index, len });
        }
        tree.insert_child(self.node, index + offset, child)
    }

    /// Detaches the content child `child` from this container.
    pub fn remove_child(&self, tree: &mut ViewTree, child: NodeId) -> Result<(), TreeError> {
        if Some(child) == self.shadow_node || tree.parent(child) != Some(self.node) {
            return Err(TreeError::NotAChild {
                parent: self.node,
                child,
            });
        }
        tree.detach(child)
    }

    /// The content children in stacking order, without the shadow.
    pub fn content_children<'a>(&self, tree: &'a ViewTree) -> impl Iterator<Item = NodeId> + 'a {
        let shadow = self.shadow_node;
        tree.children(self.node)
            .iter()
            .copied()
            .filter(move |c| Some(*c) != shadow)
    }

    /// Handles a layout pass that placed the container at `bounds`.
    ///
    /// Does nothing if `bounds` equals the previous pass. Otherwise the
    /// old shadow is dropped and a new one matching the new size is
    /// inserted, and child clipping is disabled on the container and its
    /// ancestors so the shadow can draw past the container's edges.
    pub fn on_layout(
        &mut self,
        tree: &mut ViewTree,
        bounds: RectI32,
    ) -> Result<LayoutOutcome, LayoutError> {
        if self.last_bounds == Some(bounds) {
            return Ok(LayoutOutcome::Unchanged);
        }

        let had_shadow = self.remove_shadow(tree)?;

        let outcome = if bounds.size.width <= 0 || bounds.size.height <= 0 {
            log::debug!(
                "shadow layout {:?} has empty bounds {bounds:?}, no shadow shown",
                self.node
            );
            LayoutOutcome::Cleared
        } else {
            self.insert_shadow(tree, bounds.size)?;
            if had_shadow {
                LayoutOutcome::Regenerated
            } else {
                LayoutOutcome::Created
            }
        };

        self.last_bounds = Some(bounds);

        let disabled = disable_clip_on_ancestors(tree, self.node);
        log::debug!(
            "shadow layout {:?}: {outcome:?} for {bounds:?}, clipping disabled on {disabled} nodes",
            self.node
        );

        Ok(outcome)
    }

    /// Removes the shadow node and drops its bitmap. Returns `true` if
    /// there was one.
    fn remove_shadow(&mut self, tree: &mut ViewTree) -> Result<bool, TreeError> {
        let Some(id) = self.shadow_node.take() else {
            return Ok(false);
        };
        tree.remove(id)?;
        Ok(true)
    }

    fn insert_shadow(&mut self, tree: &mut ViewTree, extent: SizeI32) -> Result<(), LayoutError> {
        let bitmap = render(extent, &self.style, self.mode)?;

        let size = bitmap.size();
        let margin = shadow_margin(self.style.shadow_radius());
        let layout_params = LayoutParams {
            size: Some(SizeI32::new(size.width as i32, size.height as i32)),
            margins: SideOffsets::new_all_same(margin),
        };

        let id = tree.insert(Node::image(bitmap).with_layout_params(layout_params));
        if let Err(e) = tree.insert_child(self.node, 0, id) {
            let _ = tree.remove(id);
            return Err(e.into());
        }

        self.shadow_node = Some(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use softshadow_core::math::euclid::point2;
    use softshadow_core::math::PhysicalSizeU32;

    fn bounds(w: i32, h: i32) -> RectI32 {
        RectI32::new(point2(0, 0), SizeI32::new(w, h))
    }

    fn setup() -> (ViewTree, NodeId, ShadowLayout) {
        let mut tree = ViewTree::new();
        let root = tree.insert(Node::container());
        let layout = ShadowLayout::new(&mut tree, ShadowStyle::default());
        tree.append_child(root, layout.node()).unwrap();
        (tree, root, layout)
    }

    #[test]
    fn first_layout_inserts_shadow_beneath_content() {
        let (mut tree, _, mut layout) = setup();
        let content = tree.insert(Node::leaf());
        layout.add_child(&mut tree, content).unwrap();

        assert_eq!(layout.state(), ShadowState::NoShadow);
        assert_eq!(
            layout.on_layout(&mut tree, bounds(100, 50)),
            Ok(LayoutOutcome::Created)
        );
        assert_eq!(layout.state(), ShadowState::ShadowPresent);

        let shadow = layout.shadow_node().unwrap();
        assert_eq!(tree.children(layout.node()), &[shadow, content]);
        assert_eq!(layout.content_children(&tree).collect::<Vec<_>>(), vec![content]);

        let params = tree.get(shadow).unwrap().layout_params();
        assert_eq!(params.size, Some(SizeI32::new(120, 70)));
        assert_eq!(params.margins, SideOffsets::new_all_same(-10));
        assert_eq!(
            layout.shadow_bitmap(&tree).unwrap().size(),
            PhysicalSizeU32::new(120, 70)
        );
    }

    #[test]
    fn unchanged_bounds_do_not_regenerate() {
        let (mut tree, _, mut layout) = setup();

        layout.on_layout(&mut tree, bounds(100, 50)).unwrap();
        let first = layout.shadow_node();
        assert_eq!(
            layout.on_layout(&mut tree, bounds(100, 50)),
            Ok(LayoutOutcome::Unchanged)
        );

        assert_eq!(layout.shadow_node(), first);
        assert_eq!(tree.children(layout.node()).len(), 1);
    }

    #[test]
    fn resize_replaces_shadow() {
        let (mut tree, _, mut layout) = setup();

        layout.on_layout(&mut tree, bounds(100, 50)).unwrap();
        let old = layout.shadow_node().unwrap();
        let nodes_before = tree.len();

        assert_eq!(
            layout.on_layout(&mut tree, bounds(100, 60)),
            Ok(LayoutOutcome::Regenerated)
        );

        assert!(!tree.contains(old));
        assert_eq!(tree.len(), nodes_before);
        assert_eq!(tree.children(layout.node()).len(), 1);
        assert_eq!(
            layout.shadow_bitmap(&tree).unwrap().size(),
            PhysicalSizeU32::new(120, 80)
        );
    }

    #[test]
    fn empty_bounds_clear_the_shadow() {
        let (mut tree, _, mut layout) = setup();

        layout.on_layout(&mut tree, bounds(40, 40)).unwrap();
        assert_eq!(
            layout.on_layout(&mut tree, bounds(0, 40)),
            Ok(LayoutOutcome::Cleared)
        );
        assert_eq!(layout.state(), ShadowState::NoShadow);
        assert!(tree.children(layout.node()).is_empty());

        assert_eq!(
            layout.on_layout(&mut tree, bounds(40, 40)),
            Ok(LayoutOutcome::Created)
        );
    }

    #[test]
    fn insert_child_indices_skip_the_shadow() {
        let (mut tree, _, mut layout) = setup();
        let a = tree.insert(Node::leaf());
        let b = tree.insert(Node::leaf());

        layout.on_layout(&mut tree, bounds(10, 10)).unwrap();
        layout.add_child(&mut tree, a).unwrap();
        layout.insert_child(&mut tree, 0, b).unwrap();

        let shadow = layout.shadow_node().unwrap();
        assert_eq!(tree.children(layout.node()), &[shadow, b, a]);

        let c = tree.insert(Node::leaf());
        assert_eq!(
            layout.insert_child(&mut tree, 5, c),
            Err(TreeError::IndexOutOfBounds { index: 5, len: 2 })
        );
    }

    #[test]
    fn shadow_cannot_be_removed_as_content() {
        let (mut tree, _, mut layout) = setup();
        layout.on_layout(&mut tree, bounds(10, 10)).unwrap();
        let shadow = layout.shadow_node().unwrap();

        assert!(matches!(
            layout.remove_child(&mut tree, shadow),
            Err(TreeError::NotAChild { .. })
        ));
    }

    #[test]
    fn layout_disables_clipping_on_container_and_ancestors() {
        let (mut tree, root, mut layout) = setup();
        layout.on_layout(&mut tree, bounds(10, 10)).unwrap();

        assert!(!tree.clip_children(layout.node()));
        assert!(!tree.clip_children(root));
    }

    #[test]
    fn insert_child_after_shadow_was_detached_elsewhere() {
        let (mut tree, _, mut layout) = setup();
        layout.on_layout(&mut tree, bounds(10, 10)).unwrap();
        let shadow = layout.shadow_node().unwrap();
        tree.detach(shadow).unwrap();

        let a = tree.insert(Node::leaf());
        layout.insert_child(&mut tree, 0, a).unwrap();
        assert_eq!(tree.children(layout.node()), &[a]);

        let b = tree.insert(Node::leaf());
        assert_eq!(
            layout.insert_child(&mut tree, 2, b),
            Err(TreeError::IndexOutOfBounds { index: 2, len: 1 })
        );
    }

    #[test]
    fn minimum_size_is_zero() {
        let (_, _, layout) = setup();
        assert_eq!(layout.suggested_minimum_size(), SizeI32::zero());
    }
}
