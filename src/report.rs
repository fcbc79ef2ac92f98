//! Hierarchical and tabular reports over the person registry.

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::arena::FamilyTree;

/// Ancestor report: follows father/mother links outward from `idx`, one
/// tree level per generation, branches labeled by role. An absent parent
/// truncates its branch; a removed parent renders as `(removed)`.
#[instrument(level = "debug", skip(tree))]
pub fn ancestor_tree(tree: &FamilyTree, idx: Index) -> Tree<String> {
    let Some(node) = tree.get(idx) else {
        return Tree::new("(removed)".to_string());
    };
    let mut root = Tree::new(node.person.to_string());
    if let Some(branch) = parent_branch(tree, node.father, "father") {
        root.push(branch);
    }
    if let Some(branch) = parent_branch(tree, node.mother, "mother") {
        root.push(branch);
    }
    root
}

fn parent_branch(tree: &FamilyTree, link: Option<Index>, role: &str) -> Option<Tree<String>> {
    let idx = link?;
    let Some(node) = tree.get(idx) else {
        // stale reference: target was deleted after the link was set
        return Some(Tree::new(format!("{role}: (removed)")));
    };
    let mut branch = Tree::new(format!("{role}: {}", node.person));
    if let Some(father) = parent_branch(tree, node.father, "father") {
        branch.push(father);
    }
    if let Some(mother) = parent_branch(tree, node.mother, "mother") {
        branch.push(mother);
    }
    Some(branch)
}

/// Descendant report: walks the STRUCTURAL left/right links below `idx`.
/// These are search-tree children, not genealogical offspring; the listing
/// reflects where ids happen to sit in the tree.
#[instrument(level = "debug", skip(tree))]
pub fn descendant_tree(tree: &FamilyTree, idx: Index) -> Tree<String> {
    let Some(node) = tree.get(idx) else {
        return Tree::new("(removed)".to_string());
    };
    let mut root = Tree::new(node.person.to_string());
    build_descendants(tree, idx, &mut root);
    root
}

fn build_descendants(tree: &FamilyTree, node_idx: Index, parent_tree: &mut Tree<String>) {
    if let Some(node) = tree.get(node_idx) {
        for child_idx in [node.left, node.right].into_iter().flatten() {
            if let Some(child) = tree.get(child_idx) {
                let mut child_tree = Tree::new(child.person.to_string());
                build_descendants(tree, child_idx, &mut child_tree);
                parent_tree.push(child_tree);
            }
        }
    }
}

/// In-order roster as a fixed-width table: id, name, birth date, father id,
/// mother name. Parent cells show `N/A` for an absent link and `(removed)`
/// for a stale one. The father column shows the id while the mother column
/// shows the name, as the legacy report did.
#[instrument(level = "debug", skip(tree))]
pub fn roster_table(tree: &FamilyTree) -> String {
    let mut out = String::new();
    out.push_str(
        "+-----+----------------------+------------+--------+----------------------+\n",
    );
    out.push_str(
        "| ID  | NAME                 | BORN       | FATHER | MOTHER               |\n",
    );
    out.push_str(
        "+-----+----------------------+------------+--------+----------------------+\n",
    );

    for (_, node) in tree.iter_inorder() {
        let father = match node.father {
            None => "N/A".to_string(),
            Some(idx) => tree
                .person(idx)
                .map(|p| p.id.to_string())
                .unwrap_or_else(|| "(removed)".to_string()),
        };
        let mother = match node.mother {
            None => "N/A".to_string(),
            Some(idx) => tree
                .person(idx)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| "(removed)".to_string()),
        };
        out.push_str(&format!(
            "| {:<3} | {:<20} | {:<10} | {:<6} | {:<20} |\n",
            node.person.id, node.person.name, node.person.birth_date, father, mother
        ));
    }

    out.push_str(
        "+-----+----------------------+------------+--------+----------------------+\n",
    );
    out
}
