use crimson_forest::error::Error;
use crimson_forest::rbl::RblTree;

fn leaf_keys(tree: &RblTree<i64>) -> Vec<i64> {
    tree.leaves().map(|n| tree.key(n)).collect()
}

#[test]
fn empty_tree_queries() {
    let tree = RblTree::<i64>::new().unwrap();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.minimum(), None);
    assert_eq!(tree.maximum(), None);
    assert_eq!(tree.search(42), None);
    assert_eq!(tree.find_leaf(42), None);
    assert_eq!(tree.leaves().count(), 0);
    tree.check().unwrap();
    tree.check_structure().unwrap();
}

#[test]
fn scenario_inserts_sort_into_leaf_list() {
    let keys = [5, 3, 8, 1, 4, 7, 9, 2, 6, 0];
    let mut tree = RblTree::new().unwrap();
    for (i, &k) in keys.iter().enumerate() {
        let leaf = tree.insert(k, Some(k)).unwrap();
        assert!(tree.is_leaf(leaf));
        assert_eq!(tree.len(), i + 1);
        tree.check().unwrap();
        tree.check_iterative().unwrap();
        tree.check_structure().unwrap();
    }
    assert_eq!(leaf_keys(&tree), (0..10).collect::<Vec<_>>());
}

#[test]
fn scenario_delete_minimum_drains_in_order() {
    let keys = [5, 3, 8, 1, 4, 7, 9, 2, 6, 0];
    let mut tree = RblTree::new().unwrap();
    for &k in &keys {
        tree.insert(k, Some(k)).unwrap();
    }

    let mut removed = Vec::new();
    while let Some(min) = tree.minimum() {
        removed.push(tree.key(min));
        tree.delete(min).unwrap();
        tree.check().unwrap();
        tree.check_structure().unwrap();
    }

    assert_eq!(removed, (0..10).collect::<Vec<_>>());
    assert!(tree.is_empty());
    tree.check().unwrap();
}

#[test]
fn sole_leaf_links_to_itself() {
    let mut tree = RblTree::new().unwrap();
    let leaf = tree.insert(1, Some(1)).unwrap();
    assert_eq!(tree.next_leaf(leaf), Ok(leaf));
    assert_eq!(tree.prev_leaf(leaf), Ok(leaf));
    assert_eq!(tree.successor(leaf), Ok(leaf));
    assert_eq!(tree.predecessor(leaf), Ok(leaf));
    tree.check_structure().unwrap();
}

#[test]
fn successor_and_predecessor_wrap_around() {
    let mut tree = RblTree::new().unwrap();
    for k in [10, 20, 30, 40, 50] {
        tree.insert(k, Some(k)).unwrap();
    }
    let min = tree.minimum().unwrap();
    let max = tree.maximum().unwrap();

    assert_eq!(tree.successor(max), Ok(min));
    assert_eq!(tree.predecessor(min), Ok(max));
    assert_eq!(tree.next_leaf(max), Ok(min));
    assert_eq!(tree.prev_leaf(min), Ok(max));

    // structural walk agrees with the list everywhere
    let mut curr = min;
    for _ in 0..tree.len() {
        let next = tree.next_leaf(curr).unwrap();
        assert_eq!(tree.successor(curr), Ok(next));
        assert_eq!(tree.predecessor(next), Ok(curr));
        curr = next;
    }
    assert_eq!(curr, min);
}

#[test]
fn duplicate_keys_coexist() {
    let mut tree = RblTree::new().unwrap();
    tree.insert(7, Some(1)).unwrap();
    tree.insert(7, Some(2)).unwrap();
    tree.check().unwrap();
    tree.check_structure().unwrap();
    assert_eq!(leaf_keys(&tree), vec![7, 7]);

    assert!(tree.search(7).is_some());
    let leaf = tree.find_leaf(7).unwrap();
    tree.delete(leaf).unwrap();
    tree.check().unwrap();
    tree.check_structure().unwrap();

    let other = tree.find_leaf(7).unwrap();
    assert_eq!(tree.key(other), 7);
    assert_eq!(tree.len(), 1);
}

#[test]
fn routers_are_not_deletable() {
    let mut tree = RblTree::new().unwrap();
    tree.insert(7, Some(7)).unwrap();
    tree.insert(9, Some(9)).unwrap();

    // equality stops at the router carrying the duplicated key
    let router = tree.search(7).unwrap();
    assert!(!tree.is_leaf(router));
    assert_eq!(tree.data(router), None);
    assert_eq!(tree.delete(router), Err(Error::InvalidOperand));
    assert_eq!(tree.next_leaf(router), Err(Error::InvalidOperand));
    assert_eq!(tree.prev_leaf(router), Err(Error::InvalidOperand));

    // the tree is untouched by the rejected calls
    tree.check().unwrap();
    tree.check_structure().unwrap();
    assert_eq!(tree.len(), 2);
}

#[test]
fn stale_ids_are_rejected() {
    let mut tree = RblTree::new().unwrap();
    let a = tree.insert(1, Some(1)).unwrap();
    tree.insert(2, Some(2)).unwrap();

    assert_eq!(tree.delete(a), Ok(Some(1)));
    assert_eq!(tree.delete(a), Err(Error::InvalidOperand));
    assert_eq!(tree.successor(a), Err(Error::InvalidOperand));
    tree.check_structure().unwrap();
}

#[test]
fn leaves_may_carry_empty_payloads() {
    let mut tree = RblTree::<i64>::new().unwrap();
    let bare = tree.insert(5, None).unwrap();
    tree.insert(6, Some(6)).unwrap();

    assert!(tree.is_leaf(bare));
    assert_eq!(tree.data(bare), None);
    tree.check_structure().unwrap();

    tree.delete(bare).unwrap();
    tree.check_structure().unwrap();
    assert_eq!(tree.len(), 1);
}

#[test]
fn interleaved_inserts_and_deletes() {
    let mut tree = RblTree::new().unwrap();
    for k in [8, 2, 12, 4, 10, 6, 14, 0] {
        tree.insert(k, Some(k)).unwrap();
    }
    for k in [2, 12, 8] {
        let leaf = tree.find_leaf(k).unwrap();
        assert_eq!(tree.delete(leaf), Ok(Some(k)));
        tree.check().unwrap();
        tree.check_structure().unwrap();
    }
    for k in [3, 11] {
        tree.insert(k, Some(k)).unwrap();
        tree.check().unwrap();
        tree.check_structure().unwrap();
    }
    assert_eq!(leaf_keys(&tree), vec![0, 3, 4, 6, 10, 11, 14]);
}

#[test]
fn search_forms_agree() {
    let mut tree = RblTree::new().unwrap();
    for k in [16, 4, 20, 2, 8, 18, 24] {
        tree.insert(k, Some(k)).unwrap();
    }
    for k in 0..30 {
        assert_eq!(tree.search(k), tree.search_iterative(k), "key {k}");
        assert_eq!(tree.find_leaf(k).is_some(), tree.search(k).is_some(), "key {k}");
    }
}

#[test]
fn clear_makes_tree_reusable() {
    let mut tree = RblTree::new().unwrap();
    for k in 0..12 {
        tree.insert(k, Some(k)).unwrap();
    }
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.leaves().count(), 0);

    tree.insert(3, Some(3)).unwrap();
    tree.insert(1, Some(1)).unwrap();
    assert_eq!(leaf_keys(&tree), vec![1, 3]);
    tree.check_structure().unwrap();
}
