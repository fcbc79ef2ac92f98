use generational_arena::{Arena, Index};
use std::fmt;
use tracing::{debug, instrument};

/// Data payload for tree nodes representing registered individuals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    /// Unique identifier, the BST ordering key
    pub id: u32,
    /// Display name
    pub name: String,
    /// Birth date, pre-validated as dd/mm/yyyy
    pub birth_date: String,
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.id, self.name, self.birth_date)
    }
}

/// Tree node in the arena-based person registry.
///
/// `left`/`right` are the owning structural links of the search tree.
/// `father`/`mother` are non-owning lookup links; they may go stale when the
/// referenced slot is removed, in which case resolution yields `None`.
#[derive(Debug)]
pub struct PersonNode {
    /// Person data for this node
    pub person: Person,
    /// Index of the father's node, None when unknown
    pub father: Option<Index>,
    /// Index of the mother's node, None when unknown
    pub mother: Option<Index>,
    /// Left subtree (all ids strictly smaller)
    pub left: Option<Index>,
    /// Right subtree (all ids strictly greater)
    pub right: Option<Index>,
}

/// Arena-based binary search tree keyed by person id.
///
/// Uses a generational arena for memory-safe node references and O(1) slot
/// lookups. Stale parent references resolve to `None` instead of dangling.
#[derive(Debug)]
pub struct FamilyTree {
    /// Arena storage for all tree nodes
    arena: Arena<PersonNode>,
    /// Index of the root node, None for an empty registry
    root: Option<Index>,
    /// Next id handed out for auto-assignment, always greater than any stored id
    next_id: u32,
}

impl Default for FamilyTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FamilyTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            next_id: 1,
        }
    }

    /// Inserts a new person at the BST position dictated by `id`.
    ///
    /// `father`/`mother` must already be resolved by the caller (via
    /// [`FamilyTree::lookup`]); they are stored as-is and never mutated
    /// afterwards. An id that is already present is absorbed silently and
    /// `None` is returned, so callers can surface a soft warning if they
    /// care.
    #[instrument(level = "debug", skip(self, name, birth_date))]
    pub fn insert(
        &mut self,
        id: u32,
        name: &str,
        birth_date: &str,
        father: Option<Index>,
        mother: Option<Index>,
    ) -> Option<Index> {
        let mut attach: Option<(Index, bool)> = None;
        let mut cursor = self.root;

        while let Some(idx) = cursor {
            let node = self.arena.get(idx)?;
            if id < node.person.id {
                attach = Some((idx, true));
                cursor = node.left;
            } else if id > node.person.id {
                attach = Some((idx, false));
                cursor = node.right;
            } else {
                debug!(id, "duplicate id, insert ignored");
                return None;
            }
        }

        let node_idx = self.arena.insert(PersonNode {
            person: Person {
                id,
                name: name.to_string(),
                birth_date: birth_date.to_string(),
            },
            father,
            mother,
            left: None,
            right: None,
        });

        match attach {
            Some((parent_idx, true)) => {
                if let Some(parent) = self.arena.get_mut(parent_idx) {
                    parent.left = Some(node_idx);
                }
            }
            Some((parent_idx, false)) => {
                if let Some(parent) = self.arena.get_mut(parent_idx) {
                    parent.right = Some(node_idx);
                }
            }
            None => self.root = Some(node_idx),
        }

        if id >= self.next_id {
            self.next_id = id + 1;
        }
        Some(node_idx)
    }

    /// Finds the node holding `id`, strictly following BST ordering.
    #[instrument(level = "trace", skip(self))]
    pub fn lookup(&self, id: u32) -> Option<Index> {
        let mut cursor = self.root;
        while let Some(idx) = cursor {
            let node = self.arena.get(idx)?;
            if id < node.person.id {
                cursor = node.left;
            } else if id > node.person.id {
                cursor = node.right;
            } else {
                return Some(idx);
            }
        }
        None
    }

    /// Removes the person with `id` if present; returns whether a node was
    /// removed. Absent ids are a no-op.
    ///
    /// A node with two children is replaced in place by its in-order
    /// successor: the successor's person data is copied up and the successor
    /// node is removed from the right subtree. The occupying node keeps its
    /// original father/mother links, so position and identity can diverge
    /// for a copied-up node.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, id: u32) -> bool {
        let (new_root, removed) = self.remove_at(self.root, id);
        self.root = new_root;
        removed
    }

    fn remove_at(&mut self, root: Option<Index>, id: u32) -> (Option<Index>, bool) {
        let Some(idx) = root else {
            return (None, false);
        };
        let Some(node) = self.arena.get(idx) else {
            return (None, false);
        };
        let (node_id, left, right) = (node.person.id, node.left, node.right);

        if id < node_id {
            let (new_left, removed) = self.remove_at(left, id);
            if let Some(node) = self.arena.get_mut(idx) {
                node.left = new_left;
            }
            (Some(idx), removed)
        } else if id > node_id {
            let (new_right, removed) = self.remove_at(right, id);
            if let Some(node) = self.arena.get_mut(idx) {
                node.right = new_right;
            }
            (Some(idx), removed)
        } else {
            match (left, right) {
                (None, other) | (other, None) => {
                    self.arena.remove(idx);
                    (other, true)
                }
                (Some(_), Some(right_idx)) => {
                    let successor_idx = self.find_min(right_idx);
                    let Some(successor) =
                        self.arena.get(successor_idx).map(|n| n.person.clone())
                    else {
                        return (Some(idx), false);
                    };
                    let successor_id = successor.id;
                    if let Some(node) = self.arena.get_mut(idx) {
                        node.person = successor;
                    }
                    let (new_right, _) = self.remove_at(Some(right_idx), successor_id);
                    if let Some(node) = self.arena.get_mut(idx) {
                        node.right = new_right;
                    }
                    (Some(idx), true)
                }
            }
        }
    }

    /// Leftmost node of the subtree rooted at `idx`.
    ///
    /// The caller must pass a live index; a stale one is returned unchanged.
    pub fn find_min(&self, idx: Index) -> Index {
        let mut cursor = idx;
        while let Some(left) = self.arena.get(cursor).and_then(|n| n.left) {
            cursor = left;
        }
        cursor
    }

    /// Rebuilds the tree to minimal height.
    ///
    /// Flattens via an in-order walk (already sorted by the BST invariant)
    /// and rebuilds by picking the middle element of each range as subtree
    /// root. Only left/right links are rewired; node slots stay put, so
    /// father/mother references survive.
    #[instrument(level = "debug", skip(self))]
    pub fn rebalance(&mut self) {
        let ordered: Vec<Index> = self.iter_inorder().map(|(idx, _)| idx).collect();
        self.root = self.rebuild(&ordered);
        debug!(nodes = ordered.len(), height = self.height(), "rebalanced");
    }

    fn rebuild(&mut self, ordered: &[Index]) -> Option<Index> {
        if ordered.is_empty() {
            return None;
        }
        let mid = ordered.len() / 2;
        let left = self.rebuild(&ordered[..mid]);
        let right = self.rebuild(&ordered[mid + 1..]);
        let root_idx = ordered[mid];
        if let Some(node) = self.arena.get_mut(root_idx) {
            node.left = left;
            node.right = right;
        }
        Some(root_idx)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get(&self, idx: Index) -> Option<&PersonNode> {
        self.arena.get(idx)
    }

    /// Person data at `idx`, or `None` when the slot has been removed.
    pub fn person(&self, idx: Index) -> Option<&Person> {
        self.arena.get(idx).map(|n| &n.person)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Next id for auto-assignment; only consumed by a successful insert.
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    #[instrument(level = "debug", skip(self))]
    pub fn height(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_height(root)
        } else {
            0
        }
    }

    fn calculate_height(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get(node_idx) {
            1 + [node.left, node.right]
                .into_iter()
                .flatten()
                .map(|child| self.calculate_height(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> FamilyTree {
        let mut tree = FamilyTree::new();
        for id in [50, 30, 70, 20, 40, 60, 80] {
            tree.insert(id, &format!("p{id}"), "01/01/2000", None, None);
        }
        tree
    }

    #[test]
    fn test_find_min() {
        let tree = sample_tree();
        let root = tree.root().unwrap();
        let min = tree.find_min(root);
        assert_eq!(tree.person(min).unwrap().id, 20);
    }

    #[test]
    fn test_height_of_full_tree() {
        let tree = sample_tree();
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn test_next_id_tracks_max() {
        let mut tree = FamilyTree::new();
        assert_eq!(tree.next_id(), 1);
        tree.insert(7, "a", "01/01/2000", None, None);
        assert_eq!(tree.next_id(), 8);
        tree.insert(3, "b", "01/01/2000", None, None);
        assert_eq!(tree.next_id(), 8);
    }
}
