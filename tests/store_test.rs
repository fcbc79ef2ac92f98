use famtree::FamilyTree;
use rstest::rstest;

fn tree_with_ids(ids: &[u32]) -> FamilyTree {
    let mut tree = FamilyTree::new();
    for &id in ids {
        tree.insert(id, &format!("p{id}"), "01/01/2000", None, None);
    }
    tree
}

fn inorder_ids(tree: &FamilyTree) -> Vec<u32> {
    tree.iter_inorder().map(|(_, n)| n.person.id).collect()
}

#[rstest]
fn test_insert_then_lookup() {
    let tree = tree_with_ids(&[50, 30, 70]);
    for id in [50, 30, 70] {
        let idx = tree.lookup(id).expect("inserted id must be found");
        assert_eq!(tree.person(idx).unwrap().id, id);
    }
    assert!(tree.lookup(99).is_none());
    assert!(FamilyTree::new().lookup(1).is_none());
}

#[rstest]
fn test_duplicate_insert_is_silent_noop() {
    let mut tree = tree_with_ids(&[10]);
    let result = tree.insert(10, "other", "02/02/2002", None, None);
    assert!(result.is_none());
    assert_eq!(tree.len(), 1);
    // original record untouched
    let idx = tree.lookup(10).unwrap();
    assert_eq!(tree.person(idx).unwrap().name, "p10");
}

#[rstest]
fn test_remove_leaf() {
    let mut tree = tree_with_ids(&[50, 30, 70]);
    assert!(tree.remove(30));
    assert!(tree.lookup(30).is_none());
    assert_eq!(inorder_ids(&tree), vec![50, 70]);
}

#[rstest]
fn test_remove_single_child_node_splices() {
    // 50 -> right 70 -> right 80
    let mut tree = tree_with_ids(&[50, 70, 80]);
    assert!(tree.remove(70));
    assert_eq!(inorder_ids(&tree), vec![50, 80]);
    let root = tree.root().unwrap();
    let right = tree.get(root).unwrap().right.unwrap();
    assert_eq!(tree.person(right).unwrap().id, 80);
}

#[rstest]
fn test_remove_two_child_node_copies_up_successor() {
    let mut tree = tree_with_ids(&[50, 30, 70, 20, 40, 60, 80]);
    assert!(tree.remove(50));
    assert!(tree.lookup(50).is_none());
    // in-order successor 60 now occupies the root position
    let root = tree.root().unwrap();
    assert_eq!(tree.person(root).unwrap().id, 60);
    assert_eq!(inorder_ids(&tree), vec![20, 30, 40, 60, 70, 80]);
}

#[rstest]
fn test_remove_is_idempotent() {
    let mut tree = tree_with_ids(&[50, 30, 70]);
    assert!(tree.remove(30));
    assert!(!tree.remove(30));
    assert!(!tree.remove(999));
    assert_eq!(tree.len(), 2);
    assert_eq!(inorder_ids(&tree), vec![50, 70]);
}

#[rstest]
fn test_remove_from_empty_store() {
    let mut tree = FamilyTree::new();
    assert!(!tree.remove(1));
    assert!(tree.is_empty());
}

/// Copy-up deletion moves person data, not node identity: the occupying
/// node keeps the deleted person's parent links.
#[rstest]
fn test_copy_up_keeps_position_parent_links() {
    let mut tree = FamilyTree::new();
    tree.insert(10, "alice", "01/01/1950", None, None);
    let alice = tree.lookup(10);
    tree.insert(5, "bob", "01/01/1960", None, None);
    tree.insert(20, "carol", "01/01/1980", alice, None);
    tree.insert(15, "dan", "01/01/1990", None, None);
    tree.insert(30, "eve", "01/01/1995", None, None);

    // 20 has two children (15, 30); successor 30's data is copied up
    assert!(tree.remove(20));
    let idx = tree.lookup(30).unwrap();
    let node = tree.get(idx).unwrap();
    assert_eq!(node.person.name, "eve");
    // carol's father link stayed with the position
    let father = node.father.and_then(|i| tree.person(i)).unwrap();
    assert_eq!(father.id, 10);
}

#[rstest]
fn test_parent_links_resolve_after_insert() {
    // scenario from the requirements: Ana, Leo, Eva
    let mut tree = FamilyTree::new();
    tree.insert(5, "Ana", "01/01/2000", None, None);
    tree.insert(3, "Leo", "01/01/1970", None, None);
    let father = tree.lookup(3);
    let mother = tree.lookup(5);
    tree.insert(8, "Eva", "01/01/1998", father, mother);

    let eva = tree.get(tree.lookup(8).unwrap()).unwrap();
    assert_eq!(eva.person.name, "Eva");
    assert_eq!(tree.person(eva.father.unwrap()).unwrap().id, 3);
    assert_eq!(tree.person(eva.mother.unwrap()).unwrap().id, 5);
    assert_eq!(inorder_ids(&tree), vec![3, 5, 8]);
}

/// Removing a structural leaf frees its slot; links to it resolve to None
/// ("target removed") rather than dangling.
#[rstest]
fn test_removed_parent_reports_gone() {
    let mut tree = FamilyTree::new();
    tree.insert(3, "Leo", "01/01/1970", None, None);
    tree.insert(5, "Ana", "01/01/2000", None, None);
    let father = tree.lookup(3);
    let mother = tree.lookup(5);
    tree.insert(8, "Eva", "01/01/1998", father, mother);

    // 5 sits between 3 and 8: single-child splice frees Ana's slot
    assert!(tree.remove(5));
    assert!(tree.lookup(5).is_none());

    let eva = tree.get(tree.lookup(8).unwrap()).unwrap();
    let mother_link = eva.mother.expect("link itself is never nulled out");
    assert!(tree.person(mother_link).is_none());
    // father is untouched
    assert_eq!(tree.person(eva.father.unwrap()).unwrap().id, 3);
}

#[rstest]
#[case(&[5, 3, 8, 1, 4, 7, 9])]
#[case(&[1, 2, 3, 4, 5, 6, 7])]
#[case(&[7, 6, 5, 4, 3, 2, 1])]
fn test_inorder_ascending_after_mixed_operations(#[case] ids: &[u32]) {
    let mut tree = tree_with_ids(ids);
    tree.remove(ids[2]);
    tree.insert(100, "late", "01/01/2001", None, None);
    tree.remove(ids[0]);

    let seen = inorder_ids(&tree);
    let mut sorted = seen.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(seen, sorted);
}
