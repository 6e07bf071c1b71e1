use std::cmp::Ordering;
use std::fmt;

use itertools::Itertools;

pub mod cli;
pub mod parser;

/// Node color. New nodes start red; the fixup engine repaints as needed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Red,
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => f.write_str("RED"),
            Color::Black => f.write_str("BLACK"),
        }
    }
}

/// Which way a rotation turns.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Opaque handle to a node inside one tree. Nodes are never removed, so a
/// handle stays usable for the whole life of the tree that produced it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NodeId(usize);

/// Hooks fired while the tree restructures itself. Every hook defaults to
/// doing nothing, so implementors only override what they care about.
pub trait Tracer<K> {
    /// A key finished its insertion, repairs included.
    fn inserted(&self, _key: &K) {}

    /// A node changed color. Fires only on actual changes.
    fn recolored(&self, _key: &K, _color: Color) {}

    /// A rotation turned the subtree rooted at `pivot`.
    fn rotated(&self, _side: Side, _pivot: &K) {}
}

/// The silent tracer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTracer;

impl<K> Tracer<K> for NoopTracer {}

#[derive(Debug)]
struct Node<K> {
    key: K,
    color: Color,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// A red black tree over keys of type `K`.
///
/// Nodes live in an arena owned by the tree and point at each other through
/// plain indices, parent links included, so there is no owning cycle to
/// break. Equal keys may be inserted more than once. Mutation goes through
/// `&mut self`; shared `&self` reads are safe to hand around.
///
/// `K`'s `Ord` must be a total order. An inconsistent ordering makes lookups
/// unreliable but can never corrupt memory.
#[derive(Debug)]
pub struct Sukuna<K, T = NoopTracer>
where
    K: Ord,
    T: Tracer<K>,
{
    nodes: Vec<Node<K>>,
    root: Option<NodeId>,
    tracer: T,
}

impl<K: Ord> Sukuna<K> {
    /// Creates an empty tree that traces nothing.
    pub fn new() -> Self {
        Self::with_tracer(NoopTracer)
    }
}

impl<K, T> Default for Sukuna<K, T>
where
    K: Ord,
    T: Tracer<K> + Default,
{
    fn default() -> Self {
        Self::with_tracer(T::default())
    }
}

impl<K, T> Sukuna<K, T>
where
    K: Ord,
    T: Tracer<K>,
{
    /// Creates an empty tree that reports repair steps to `tracer`.
    pub fn with_tracer(tracer: T) -> Self {
        Sukuna {
            nodes: Vec::new(),
            root: None,
            tracer,
        }
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Borrows the key behind a handle.
    pub fn key(&self, id: NodeId) -> &K {
        &self.node(id).key
    }

    /// Returns the color behind a handle.
    pub fn color(&self, id: NodeId) -> Color {
        self.node(id).color
    }

    /// Returns `true` if an equal key is stored.
    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Walks down from the root comparing as it goes and returns a handle
    /// to the first equal node on the path, if any.
    pub fn search(&self, key: &K) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            current = match key.cmp(&self.node(id).key) {
                Ordering::Equal => return Some(id),
                Ordering::Less => self.node(id).left,
                Ordering::Greater => self.node(id).right,
            };
        }
        None
    }

    /// Inserts `key`, rebalancing afterwards. Duplicates are kept: an equal
    /// key lands to the right of the keys it ties with, so `iter` reports
    /// them next to each other.
    pub fn insert(&mut self, key: K) {
        let id = self.alloc(key);
        match self.root {
            None => {
                self.root = Some(id);
                self.set_color(id, Color::Black);
            }
            Some(root) => {
                let mut parent = root;
                loop {
                    let next = match self.node(id).key.cmp(&self.node(parent).key) {
                        Ordering::Less => self.node(parent).left,
                        _ => self.node(parent).right,
                    };
                    match next {
                        Some(child) => parent = child,
                        None => break,
                    }
                }
                self.node_mut(id).parent = Some(parent);
                match self.node(id).key.cmp(&self.node(parent).key) {
                    Ordering::Less => self.node_mut(parent).left = Some(id),
                    _ => self.node_mut(parent).right = Some(id),
                }
                self.insert_fixup(id);
            }
        }
        self.tracer.inserted(&self.node(id).key);
    }

    /// In-order walk over `(key, color)` pairs. Every call starts fresh and
    /// walking never touches the tree.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            walk: InOrderIds::new(&self.nodes, self.root),
        }
    }

    /// In-order walk over node snapshots.
    pub fn node_info_iter(&self) -> NodeInfoIter<'_, K> {
        NodeInfoIter {
            walk: InOrderIds::new(&self.nodes, self.root),
        }
    }

    /// Snapshot of one node and its neighborhood.
    pub fn node_info(&self, id: NodeId) -> NodeInfo<'_, K> {
        info_at(&self.nodes, id)
    }

    /// Edges on the longest path from the root down to a leaf. An empty or
    /// single-node tree has height 0.
    pub fn height(&self) -> usize {
        let mut tallest = 0;
        let mut pending = Vec::new();
        if let Some(root) = self.root {
            pending.push((root, 0));
        }
        while let Some((id, depth)) = pending.pop() {
            tallest = tallest.max(depth);
            if let Some(left) = self.node(id).left {
                pending.push((left, depth + 1));
            }
            if let Some(right) = self.node(id).right {
                pending.push((right, depth + 1));
            }
        }
        tallest
    }

    /// Checks the whole shape in one pass: black root, no red node with a
    /// red child, the same number of black nodes on every path down, parent
    /// links agreeing with child links, and sorted traversal. Returning
    /// `false` means a bug in this module, not bad input.
    pub fn is_valid(&self) -> bool {
        match self.root {
            None => true,
            Some(root) => {
                self.node(root).color == Color::Black
                    && self.checked_black_height(Some(root), None).is_some()
                    && self
                        .iter()
                        .map(|(key, _)| key)
                        .tuple_windows()
                        .all(|(a, b)| a <= b)
            }
        }
    }

    /// Black-height of the subtree at `id`, or `None` if anything below it
    /// is broken. Absent children count as one black node.
    fn checked_black_height(&self, id: Option<NodeId>, parent: Option<NodeId>) -> Option<usize> {
        let id = match id {
            None => return Some(1),
            Some(id) => id,
        };
        let node = self.node(id);
        if node.parent != parent {
            return None;
        }
        if node.color == Color::Red
            && (self.color_of(node.left) == Color::Red || self.color_of(node.right) == Color::Red)
        {
            return None;
        }
        let left = self.checked_black_height(node.left, Some(id))?;
        let right = self.checked_black_height(node.right, Some(id))?;
        if left != right {
            return None;
        }
        Some(left + if node.color == Color::Black { 1 } else { 0 })
    }

    fn insert_fixup(&mut self, mut x: NodeId) {
        while let Some(parent) = self.node(x).parent {
            if self.node(parent).color == Color::Black {
                break;
            }
            let grandparent = self
                .node(parent)
                .parent
                .expect("a red node is never the root");
            if Some(parent) == self.node(grandparent).left {
                let uncle = self.node(grandparent).right;

                // Case 1
                if self.color_of(uncle) == Color::Red {
                    let uncle = uncle.expect("a red uncle is a real node");
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    x = grandparent;
                    continue;
                }

                // Case 2
                if Some(x) == self.node(parent).right {
                    x = parent;
                    self.rotate_left(x);
                }

                // Case 3
                let parent = self.node(x).parent.expect("a red node is never the root");
                let grandparent = self
                    .node(parent)
                    .parent
                    .expect("a red node is never the root");
                self.set_color(parent, Color::Black);
                self.set_color(grandparent, Color::Red);
                self.rotate_right(grandparent);
            } else {
                let uncle = self.node(grandparent).left;

                // Case 4
                if self.color_of(uncle) == Color::Red {
                    let uncle = uncle.expect("a red uncle is a real node");
                    self.set_color(uncle, Color::Black);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    x = grandparent;
                    continue;
                }

                // Case 5
                if Some(x) == self.node(parent).left {
                    x = parent;
                    self.rotate_right(x);
                }

                // Case 6
                let parent = self.node(x).parent.expect("a red node is never the root");
                let grandparent = self
                    .node(parent)
                    .parent
                    .expect("a red node is never the root");
                self.set_color(parent, Color::Black);
                self.set_color(grandparent, Color::Red);
                self.rotate_left(grandparent);
            }
        }
        let root = self.root.expect("fixup only runs on a non-empty tree");
        self.set_color(root, Color::Black);
    }

    /// Turns the subtree at `x` left so its right child takes its place.
    /// Pure relinking; colors stay untouched.
    fn rotate_left(&mut self, x: NodeId) {
        let y = self.node(x).right.expect("left rotation needs a right child");

        let moved = self.node(y).left;
        self.node_mut(x).right = moved;
        if let Some(child) = moved {
            self.node_mut(child).parent = Some(x);
        }

        let upper = self.node(x).parent;
        self.node_mut(y).parent = upper;
        match upper {
            None => self.root = Some(y),
            Some(parent) if self.node(parent).left == Some(x) => {
                self.node_mut(parent).left = Some(y);
            }
            Some(parent) => self.node_mut(parent).right = Some(y),
        }

        self.node_mut(y).left = Some(x);
        self.node_mut(x).parent = Some(y);
        self.tracer.rotated(Side::Left, &self.node(x).key);
    }

    /// Mirror of `rotate_left`.
    fn rotate_right(&mut self, x: NodeId) {
        let y = self.node(x).left.expect("right rotation needs a left child");

        let moved = self.node(y).right;
        self.node_mut(x).left = moved;
        if let Some(child) = moved {
            self.node_mut(child).parent = Some(x);
        }

        let upper = self.node(x).parent;
        self.node_mut(y).parent = upper;
        match upper {
            None => self.root = Some(y),
            Some(parent) if self.node(parent).right == Some(x) => {
                self.node_mut(parent).right = Some(y);
            }
            Some(parent) => self.node_mut(parent).left = Some(y),
        }

        self.node_mut(y).right = Some(x);
        self.node_mut(x).parent = Some(y);
        self.tracer.rotated(Side::Right, &self.node(x).key);
    }

    fn set_color(&mut self, id: NodeId, color: Color) {
        if self.node(id).color == color {
            return;
        }
        self.node_mut(id).color = color;
        self.tracer.recolored(&self.node(id).key, color);
    }

    /// Color of a possibly absent child; absent counts as black.
    fn color_of(&self, id: Option<NodeId>) -> Color {
        id.map_or(Color::Black, |id| self.node(id).color)
    }

    fn node(&self, id: NodeId) -> &Node<K> {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<K> {
        &mut self.nodes[id.0]
    }

    fn alloc(&mut self, key: K) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            key,
            color: Color::Red,
            parent: None,
            left: None,
            right: None,
        });
        id
    }
}

struct InOrderIds<'a, K> {
    nodes: &'a [Node<K>],
    stack: Vec<NodeId>,
}

impl<'a, K> InOrderIds<'a, K> {
    fn new(nodes: &'a [Node<K>], root: Option<NodeId>) -> Self {
        let mut walk = InOrderIds {
            nodes,
            stack: Vec::new(),
        };
        walk.push_left_spine(root);
        walk
    }

    fn push_left_spine(&mut self, mut current: Option<NodeId>) {
        while let Some(id) = current {
            self.stack.push(id);
            current = self.nodes[id.0].left;
        }
    }
}

impl<K> Iterator for InOrderIds<'_, K> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.push_left_spine(self.nodes[id.0].right);
        Some(id)
    }
}

/// In-order iterator over `(key, color)` pairs.
pub struct Iter<'a, K> {
    walk: InOrderIds<'a, K>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = (&'a K, Color);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.walk.next()?;
        let nodes = self.walk.nodes;
        let node = &nodes[id.0];
        Some((&node.key, node.color))
    }
}

/// In-order iterator over node snapshots.
pub struct NodeInfoIter<'a, K> {
    walk: InOrderIds<'a, K>,
}

impl<'a, K> Iterator for NodeInfoIter<'a, K> {
    type Item = NodeInfo<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.walk.next()?;
        Some(info_at(self.walk.nodes, id))
    }
}

/// What one node looks like from outside: its own key and color plus the
/// key and color of each neighbor. Absent neighbors are `None` and print as
/// `NULL(BLACK)`, since absent nodes count as black.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeInfo<'a, K> {
    pub key: &'a K,
    pub color: Color,
    pub parent: Option<(&'a K, Color)>,
    pub left: Option<(&'a K, Color)>,
    pub right: Option<(&'a K, Color)>,
}

impl<K: fmt::Display> fmt::Display for NodeInfo<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ {}({})", self.key, self.color)?;
        for (label, slot) in [("P", self.parent), ("L", self.left), ("R", self.right)] {
            match slot {
                Some((key, color)) => write!(f, " {label}:{key}({color})")?,
                None => write!(f, " {label}:NULL(BLACK)")?,
            }
        }
        f.write_str(" ]")
    }
}

fn info_at<K>(nodes: &[Node<K>], id: NodeId) -> NodeInfo<'_, K> {
    let node = &nodes[id.0];
    let slot =
        |child: Option<NodeId>| child.map(|child| (&nodes[child.0].key, nodes[child.0].color));
    NodeInfo {
        key: &node.key,
        color: node.color,
        parent: slot(node.parent),
        left: slot(node.left),
        right: slot(node.right),
    }
}
