//! Static interval tree for overlap queries over match spans.
//!
//! The tree is built once from a fixed collection. Each node picks the
//! midpoint of its members' overall range and splits them three ways:
//!
//! ```text
//!             [point]
//!            /   |   \
//!   end < point  |  start > point
//!                |
//!        contains point (kept at this node)
//! ```
//!
//! Nodes live in a flat arena and refer to their children by index, so neither
//! construction nor drop recurses.

use crate::emit::Span;

/// Index into the node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct NodeId(u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Default)]
struct Node {
    point: usize,
    left: Option<NodeId>,
    right: Option<NodeId>,
    /// Positions (into `IntervalTree::items`) of the intervals containing `point`
    members: Vec<usize>,
}

/// An immutable interval tree over a collection of spans.
#[derive(Debug)]
pub struct IntervalTree<T> {
    items: Vec<T>,
    nodes: Vec<Node>,
}

impl<T: Span> IntervalTree<T> {
    /// Build the tree. Takes ownership of the intervals; they can be read back
    /// with [`IntervalTree::items`].
    pub fn new(items: Vec<T>) -> Self {
        let mut tree = Self {
            items,
            nodes: Vec::new(),
        };
        if tree.items.is_empty() {
            return tree;
        }

        let root = tree.alloc();
        let mut pending: Vec<(NodeId, Vec<usize>)> = vec![(root, (0..tree.items.len()).collect())];

        while let Some((id, positions)) = pending.pop() {
            let point = tree.median(&positions);
            let mut to_left = Vec::new();
            let mut to_right = Vec::new();
            let mut members = Vec::new();

            for pos in positions {
                let item = &tree.items[pos];
                if item.end() < point {
                    to_left.push(pos);
                } else if item.start() > point {
                    to_right.push(pos);
                } else {
                    members.push(pos);
                }
            }

            if !to_left.is_empty() {
                let left = tree.alloc();
                tree.nodes[id.index()].left = Some(left);
                pending.push((left, to_left));
            }
            if !to_right.is_empty() {
                let right = tree.alloc();
                tree.nodes[id.index()].right = Some(right);
                pending.push((right, to_right));
            }

            let node = &mut tree.nodes[id.index()];
            node.point = point;
            node.members = members;
        }

        tree
    }

    fn alloc(&mut self) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::default());
        id
    }

    /// Midpoint between the smallest start and the largest end.
    fn median(&self, positions: &[usize]) -> usize {
        let mut start = usize::MAX;
        let mut end = 0;
        for &pos in positions {
            let item = &self.items[pos];
            start = start.min(item.start());
            end = end.max(item.end());
        }
        start + (end - start) / 2
    }

    /// All intervals in the tree, in the order they were given.
    #[inline]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Positions of every stored interval overlapping `query`.
    fn overlapping_positions<Q: Span + ?Sized>(&self, query: &Q) -> Vec<usize> {
        let mut found = Vec::new();
        if self.nodes.is_empty() {
            return found;
        }

        let mut stack = vec![NodeId(0)];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.index()];
            if node.point < query.start() {
                // Members all start at or before point, so only their ends matter.
                found.extend(
                    node.members
                        .iter()
                        .copied()
                        .filter(|&pos| self.items[pos].end() >= query.start()),
                );
                stack.extend(node.right);
            } else if node.point > query.end() {
                found.extend(
                    node.members
                        .iter()
                        .copied()
                        .filter(|&pos| self.items[pos].start() <= query.end()),
                );
                stack.extend(node.left);
            } else {
                found.extend(node.members.iter().copied());
                stack.extend(node.left);
                stack.extend(node.right);
            }
        }
        found
    }

    /// Remove overlaps, keeping the longest spans.
    ///
    /// Candidates are visited from largest to smallest (equal sizes: larger
    /// start first). A candidate that has not been knocked out is kept and
    /// knocks out everything it overlaps. The survivors come back sorted by
    /// start.
    pub fn into_non_overlapping(self) -> Vec<T> {
        let mut order: Vec<usize> = (0..self.items.len()).collect();
        order.sort_by(|&a, &b| {
            let (a, b) = (&self.items[a], &self.items[b]);
            b.size()
                .cmp(&a.size())
                .then_with(|| b.start().cmp(&a.start()))
        });

        let mut removed = vec![false; self.items.len()];
        for pos in order {
            if removed[pos] {
                continue;
            }
            for other in self.overlapping_positions(&self.items[pos]) {
                if other != pos {
                    removed[other] = true;
                }
            }
        }

        let mut kept: Vec<T> = self
            .items
            .into_iter()
            .zip(removed)
            .filter_map(|(item, gone)| (!gone).then_some(item))
            .collect();
        kept.sort_by_key(|item| item.start());
        kept
    }
}

impl<T: Span + PartialEq> IntervalTree<T> {
    /// Every stored interval overlapping `query`, except ones equal to
    /// `query` itself.
    pub fn find_overlaps(&self, query: &T) -> Vec<&T> {
        self.overlapping_positions(query)
            .into_iter()
            .map(|pos| &self.items[pos])
            .filter(|item| *item != query)
            .collect()
    }
}

/// Prune `intervals` to a non-overlapping, start-ordered subset biased toward
/// long spans. See [`IntervalTree::into_non_overlapping`].
pub fn remove_overlaps<T: Span>(intervals: Vec<T>) -> Vec<T> {
    IntervalTree::new(intervals).into_non_overlapping()
}
