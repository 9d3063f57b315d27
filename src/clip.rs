use crate::tree::{NodeId, ViewTree};

/// Turns off child clipping from `start` upward so content drawn past a
/// node's bounds stays visible.
///
/// The walk visits `start` and then each ancestor in turn, disabling
/// clipping on every container it visits, the topmost one included. It
/// stops before any clip-sensitive parent, which keeps its clipping. A
/// detached `start` is left as is. Returns the number of nodes whose
/// clipping was disabled.
pub fn disable_clip_on_ancestors(tree: &mut ViewTree, start: NodeId) -> usize {
    if tree.parent(start).is_none() {
        return 0;
    }

    let mut disabled = 0;
    let mut current = start;

    loop {
        if tree.is_container(current) && tree.set_clip_children(current, false).is_ok() {
            disabled += 1;
        }

        let Some(parent) = tree.parent(current) else {
            break;
        };

        if tree.is_clip_sensitive(parent) {
            log::debug!("stopping clip walk below clip-sensitive node {parent:?}");
            break;
        }

        current = parent;
    }

    disabled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Node;

    /// Builds `root > n1 > n2 > ... > leaf` and returns `[root, n1, .., leaf]`.
    fn chain(tree: &mut ViewTree, nodes: Vec<Node>) -> Vec<NodeId> {
        let ids: Vec<NodeId> = nodes.into_iter().map(|n| tree.insert(n)).collect();
        for pair in ids.windows(2) {
            tree.append_child(pair[0], pair[1]).unwrap();
        }
        ids
    }

    #[test]
    fn disables_clipping_on_every_ancestor() {
        let mut tree = ViewTree::new();
        let ids = chain(
            &mut tree,
            vec![
                Node::container(),
                Node::container(),
                Node::container(),
                Node::container(),
            ],
        );
        let start = ids[3];

        assert_eq!(disable_clip_on_ancestors(&mut tree, start), 4);
        assert!(ids.iter().all(|id| !tree.clip_children(*id)));
    }

    #[test]
    fn stops_below_clip_sensitive_ancestor() {
        let mut tree = ViewTree::new();
        let ids = chain(
            &mut tree,
            vec![
                Node::container(),
                Node::container(),
                Node::pager(),
                Node::container(),
                Node::container(),
            ],
        );

        assert_eq!(disable_clip_on_ancestors(&mut tree, ids[4]), 2);
        assert!(!tree.clip_children(ids[4]));
        assert!(!tree.clip_children(ids[3]));
        assert!(tree.clip_children(ids[2]));
        assert!(tree.clip_children(ids[1]));
        assert!(tree.clip_children(ids[0]));
    }

    #[test]
    fn detached_node_is_untouched() {
        let mut tree = ViewTree::new();
        let lone = tree.insert(Node::container());

        assert_eq!(disable_clip_on_ancestors(&mut tree, lone), 0);
        assert!(tree.clip_children(lone));
    }

    #[test]
    fn skips_non_container_start() {
        let mut tree = ViewTree::new();
        let ids = chain(&mut tree, vec![Node::container(), Node::container(), Node::leaf()]);

        assert_eq!(disable_clip_on_ancestors(&mut tree, ids[2]), 2);
        assert!(!tree.clip_children(ids[1]));
        assert!(!tree.clip_children(ids[0]));
    }
}
