use famtree::{FamilyTree, TraversalOrder};
use rstest::rstest;

fn sample_tree() -> FamilyTree {
    //         50
    //       /    \
    //     30      70
    //    /  \    /  \
    //  20    40 60   80
    let mut tree = FamilyTree::new();
    for id in [50, 30, 70, 20, 40, 60, 80] {
        tree.insert(id, &format!("p{id}"), "01/01/2000", None, None);
    }
    tree
}

fn ids(tree: &FamilyTree, order: TraversalOrder) -> Vec<u32> {
    tree.traverse(order).map(|(_, n)| n.person.id).collect()
}

#[rstest]
#[case(TraversalOrder::Pre, vec![50, 30, 20, 40, 70, 60, 80])]
#[case(TraversalOrder::In, vec![20, 30, 40, 50, 60, 70, 80])]
#[case(TraversalOrder::Post, vec![20, 40, 30, 60, 80, 70, 50])]
#[case(TraversalOrder::Level, vec![50, 30, 70, 20, 40, 60, 80])]
fn test_traversal_orders(#[case] order: TraversalOrder, #[case] expected: Vec<u32>) {
    assert_eq!(ids(&sample_tree(), order), expected);
}

#[rstest]
fn test_traversal_is_restartable() {
    let tree = sample_tree();
    let first = ids(&tree, TraversalOrder::Post);
    let second = ids(&tree, TraversalOrder::Post);
    assert_eq!(first, second);
}

#[rstest]
fn test_traversal_of_empty_tree_is_empty() {
    let tree = FamilyTree::new();
    for order in [
        TraversalOrder::Pre,
        TraversalOrder::In,
        TraversalOrder::Post,
        TraversalOrder::Level,
    ] {
        assert_eq!(tree.traverse(order).count(), 0);
    }
}

#[rstest]
fn test_level_order_depths() {
    let tree = sample_tree();
    let depths: Vec<(u32, usize)> = tree
        .iter_levelorder()
        .map(|(_, n, depth)| (n.person.id, depth))
        .collect();
    assert_eq!(
        depths,
        vec![
            (50, 0),
            (30, 1),
            (70, 1),
            (20, 2),
            (40, 2),
            (60, 2),
            (80, 2),
        ]
    );
}

#[rstest]
#[case("pre", TraversalOrder::Pre)]
#[case("inorder", TraversalOrder::In)]
#[case("POST", TraversalOrder::Post)]
#[case("bfs", TraversalOrder::Level)]
fn test_order_parses_from_str(#[case] input: &str, #[case] expected: TraversalOrder) {
    assert_eq!(input.parse::<TraversalOrder>().unwrap(), expected);
}

#[rstest]
fn test_unknown_order_is_rejected() {
    assert!("sideways".parse::<TraversalOrder>().is_err());
}
