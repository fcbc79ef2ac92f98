//! Tree traversals as lazy, restartable iterators.
//!
//! Pre-, in- and post-order use explicit stacks; level-order is queue-driven
//! and carries the depth of each node so callers can group generations.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use generational_arena::Index;

use crate::arena::{FamilyTree, PersonNode};
use crate::errors::StoreError;

/// Visit order for [`FamilyTree::traverse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    /// Root, left, right
    Pre,
    /// Left, root, right — ascending id order
    In,
    /// Left, right, root
    Post,
    /// Breadth-first by depth
    Level,
}

impl FromStr for TraversalOrder {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pre" | "preorder" => Ok(Self::Pre),
            "in" | "inorder" => Ok(Self::In),
            "post" | "postorder" => Ok(Self::Post),
            "level" | "bfs" => Ok(Self::Level),
            other => Err(StoreError::UnknownOrder(other.to_string())),
        }
    }
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pre => "pre-order",
            Self::In => "in-order",
            Self::Post => "post-order",
            Self::Level => "level-order",
        };
        write!(f, "{name}")
    }
}

impl FamilyTree {
    /// Single entry point over all four orders. Each call starts a fresh
    /// walk, so the sequence is restartable.
    pub fn traverse(&self, order: TraversalOrder) -> Traversal<'_> {
        match order {
            TraversalOrder::Pre => Traversal::Pre(self.iter_preorder()),
            TraversalOrder::In => Traversal::In(self.iter_inorder()),
            TraversalOrder::Post => Traversal::Post(self.iter_postorder()),
            TraversalOrder::Level => Traversal::Level(self.iter_levelorder()),
        }
    }

    pub fn iter_preorder(&self) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self)
    }

    pub fn iter_inorder(&self) -> InOrderIterator<'_> {
        InOrderIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    pub fn iter_levelorder(&self) -> LevelOrderIterator<'_> {
        LevelOrderIterator::new(self)
    }
}

/// Iterator over one of the four orders; see [`FamilyTree::traverse`].
pub enum Traversal<'a> {
    Pre(PreOrderIterator<'a>),
    In(InOrderIterator<'a>),
    Post(PostOrderIterator<'a>),
    Level(LevelOrderIterator<'a>),
}

impl<'a> Iterator for Traversal<'a> {
    type Item = (Index, &'a PersonNode);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Pre(it) => it.next(),
            Self::In(it) => it.next(),
            Self::Post(it) => it.next(),
            Self::Level(it) => it.next().map(|(idx, node, _)| (idx, node)),
        }
    }
}

pub struct PreOrderIterator<'a> {
    tree: &'a FamilyTree,
    stack: Vec<Index>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(tree: &'a FamilyTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (Index, &'a PersonNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get(current_idx) {
                // Right first so the left subtree is visited before it
                if let Some(right) = node.right {
                    self.stack.push(right);
                }
                if let Some(left) = node.left {
                    self.stack.push(left);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct InOrderIterator<'a> {
    tree: &'a FamilyTree,
    stack: Vec<Index>,
    cursor: Option<Index>,
}

impl<'a> InOrderIterator<'a> {
    fn new(tree: &'a FamilyTree) -> Self {
        Self {
            tree,
            stack: Vec::new(),
            cursor: tree.root(),
        }
    }
}

impl<'a> Iterator for InOrderIterator<'a> {
    type Item = (Index, &'a PersonNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(idx) = self.cursor {
            self.stack.push(idx);
            self.cursor = self.tree.get(idx).and_then(|n| n.left);
        }
        let current_idx = self.stack.pop()?;
        let node = self.tree.get(current_idx)?;
        self.cursor = node.right;
        Some((current_idx, node))
    }
}

pub struct PostOrderIterator<'a> {
    tree: &'a FamilyTree,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a FamilyTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push((root, false));
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a PersonNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    if let Some(right) = node.right {
                        self.stack.push((right, false));
                    }
                    if let Some(left) = node.left {
                        self.stack.push((left, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}

/// Breadth-first iterator; each item carries its 0-based depth.
pub struct LevelOrderIterator<'a> {
    tree: &'a FamilyTree,
    queue: VecDeque<(Index, usize)>,
}

impl<'a> LevelOrderIterator<'a> {
    fn new(tree: &'a FamilyTree) -> Self {
        let mut queue = VecDeque::new();
        if let Some(root) = tree.root() {
            queue.push_back((root, 0));
        }
        Self { tree, queue }
    }
}

impl<'a> Iterator for LevelOrderIterator<'a> {
    type Item = (Index, &'a PersonNode, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, depth)) = self.queue.pop_front() {
            if let Some(node) = self.tree.get(current_idx) {
                if let Some(left) = node.left {
                    self.queue.push_back((left, depth + 1));
                }
                if let Some(right) = node.right {
                    self.queue.push_back((right, depth + 1));
                }
                return Some((current_idx, node, depth));
            }
        }
        None
    }
}
