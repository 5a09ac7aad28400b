//! Read-only tree view over a came-from map, for drawing the search tree.
//!
//! Layout follows the usual width-proportional scheme: every leaf takes one slot, every inner node
//! spans the slots of its children and sits centered above them.
use smallvec::SmallVec;

use crate::position::Position;
use crate::{CameFrom, FxIndexMap};

#[derive(Clone, Debug, Default)]
struct TreeNode {
    children: SmallVec<[Position; 4]>,
    depth: usize,
    width: usize,
}

/// Node placement produced by [SearchTree::layout], in slot units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodePlacement {
    pub position: Position,
    pub depth: usize,
    /// Horizontal center, measured in leaf slots from the left edge of the tree.
    pub center: f64,
}

/// The tree spanned by the predecessor links of a single search run. Children are listed in
/// discovery order. Cells whose chain of predecessors does not lead to the root are left out.
#[derive(Clone, Debug, Default)]
pub struct SearchTree {
    root: Option<Position>,
    nodes: FxIndexMap<Position, TreeNode>,
}

impl SearchTree {
    pub fn from_came_from(came_from: &CameFrom) -> SearchTree {
        let root = came_from
            .iter()
            .find_map(|(pos, parent)| parent.is_none().then_some(*pos));
        let Some(root) = root else {
            return SearchTree::default();
        };

        let mut children: FxIndexMap<Position, SmallVec<[Position; 4]>> = FxIndexMap::default();
        for (&pos, parent) in came_from {
            if let Some(parent) = parent {
                children.entry(*parent).or_default().push(pos);
            }
        }

        // Breadth-first from the root, so parents come before their children
        let mut nodes: FxIndexMap<Position, TreeNode> = FxIndexMap::default();
        nodes.insert(root, TreeNode::default());
        let mut ix = 0;
        while let Some((&pos, node)) = nodes.get_index(ix) {
            let depth = node.depth;
            let kids = children.swap_remove(&pos).unwrap_or_default();
            for &child in &kids {
                if !nodes.contains_key(&child) {
                    nodes.insert(
                        child,
                        TreeNode {
                            depth: depth + 1,
                            ..TreeNode::default()
                        },
                    );
                }
            }
            nodes[ix].children = kids;
            ix += 1;
        }

        for ix in (0..nodes.len()).rev() {
            let width = nodes[ix]
                .children
                .iter()
                .filter_map(|child| nodes.get(child))
                .map(|child| child.width)
                .sum::<usize>()
                .max(1);
            nodes[ix].width = width;
        }
        SearchTree {
            root: Some(root),
            nodes,
        }
    }

    /// The start cell of the run, or [None] for an empty tree.
    pub fn root(&self) -> Option<Position> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, pos: &Position) -> bool {
        self.nodes.contains_key(pos)
    }

    pub fn children(&self, pos: &Position) -> &[Position] {
        self.nodes
            .get(pos)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Number of edges between the root and `pos`.
    pub fn depth(&self, pos: &Position) -> Option<usize> {
        self.nodes.get(pos).map(|node| node.depth)
    }

    /// Leaf slots needed below `pos`; 1 for a leaf.
    pub fn subtree_width(&self, pos: &Position) -> Option<usize> {
        self.nodes.get(pos).map(|node| node.width)
    }

    /// Deepest level present, 0 for a lone root.
    pub fn height(&self) -> usize {
        self.nodes.values().map(|node| node.depth).max().unwrap_or(0)
    }

    /// Places every node: depth gives the row, and each node is centered over the slots its
    /// subtree occupies. Nodes are returned parents first.
    pub fn layout(&self) -> Vec<NodePlacement> {
        let mut placements = Vec::with_capacity(self.nodes.len());
        let Some(root) = self.root else {
            return placements;
        };
        let mut pending = vec![(root, 0usize)];
        while let Some((pos, offset)) = pending.pop() {
            let node = &self.nodes[&pos];
            placements.push(NodePlacement {
                position: pos,
                depth: node.depth,
                center: offset as f64 + node.width as f64 / 2.0,
            });
            let mut child_offset = offset;
            let mut row = SmallVec::<[(Position, usize); 4]>::new();
            for child in &node.children {
                row.push((*child, child_offset));
                child_offset += self.nodes[child].width;
            }
            pending.extend(row.into_iter().rev());
        }
        placements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(col: i32, row: i32) -> Position {
        Position::new(col, row)
    }

    fn sample() -> CameFrom {
        //        (1,1)
        //     /    |    \
        //  (2,1) (1,2) (0,1)
        //    |            |
        //  (2,2)        (0,0)
        let mut came_from = CameFrom::default();
        came_from.insert(p(1, 1), None);
        came_from.insert(p(2, 1), Some(p(1, 1)));
        came_from.insert(p(1, 2), Some(p(1, 1)));
        came_from.insert(p(0, 1), Some(p(1, 1)));
        came_from.insert(p(2, 2), Some(p(2, 1)));
        came_from.insert(p(0, 0), Some(p(0, 1)));
        came_from
    }

    #[test]
    fn structure() {
        let tree = SearchTree::from_came_from(&sample());
        assert_eq!(tree.root(), Some(p(1, 1)));
        assert_eq!(tree.len(), 6);
        assert_eq!(tree.children(&p(1, 1)), &[p(2, 1), p(1, 2), p(0, 1)]);
        assert!(tree.children(&p(2, 2)).is_empty());
        assert_eq!(tree.depth(&p(1, 1)), Some(0));
        assert_eq!(tree.depth(&p(0, 0)), Some(2));
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.depth(&p(5, 5)), None);
    }

    #[test]
    fn widths() {
        let tree = SearchTree::from_came_from(&sample());
        assert_eq!(tree.subtree_width(&p(2, 2)), Some(1));
        assert_eq!(tree.subtree_width(&p(2, 1)), Some(1));
        assert_eq!(tree.subtree_width(&p(1, 1)), Some(3));
    }

    #[test]
    fn layout_centers_parents() {
        let tree = SearchTree::from_came_from(&sample());
        let layout = tree.layout();
        assert_eq!(layout.len(), 6);
        assert_eq!(layout[0].position, p(1, 1));
        assert_eq!(layout[0].center, 1.5);
        let center_of = |pos| {
            layout
                .iter()
                .find(|placement| placement.position == pos)
                .map(|placement| placement.center)
        };
        assert_eq!(center_of(p(2, 1)), Some(0.5));
        assert_eq!(center_of(p(1, 2)), Some(1.5));
        assert_eq!(center_of(p(0, 0)), Some(2.5));
    }

    #[test]
    fn empty_map() {
        let tree = SearchTree::from_came_from(&CameFrom::default());
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
        assert!(tree.layout().is_empty());
    }
}
