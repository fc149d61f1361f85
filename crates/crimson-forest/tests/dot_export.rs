use crimson_forest::dot::DotExporter;
use crimson_forest::rb::RbTree;
use crimson_forest::rbl::RblTree;

fn render_rb<V>(exporter: &mut DotExporter, tree: &RbTree<V>) -> String {
    let mut buf = Vec::new();
    exporter.export_rb(tree, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

fn render_rbl<V>(exporter: &mut DotExporter, tree: &RblTree<V>) -> String {
    let mut buf = Vec::new();
    exporter.export_rbl(tree, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn empty_tree_is_a_bare_digraph() {
    let tree = RbTree::<i64>::new().unwrap();
    let mut exporter = DotExporter::new();
    let out = render_rb(&mut exporter, &tree);

    assert!(out.starts_with("digraph {\n"));
    assert!(out.trim_end().ends_with('}'));
    assert!(!out.contains(" -> "));
    assert_eq!(exporter.anon_boxes(), 0);
}

#[test]
fn classical_tree_lists_nodes_edges_and_nil_boxes() {
    let mut tree = RbTree::new().unwrap();
    for k in [10, 5, 15] {
        tree.insert(k, Some(k)).unwrap();
    }
    let mut exporter = DotExporter::new();
    let out = render_rb(&mut exporter, &tree);

    for k in [10, 5, 15] {
        assert!(out.contains(&format!("[label={k} ")), "missing node {k}:\n{out}");
    }
    // the root is black, the fresh children red
    assert!(out.contains("color=black"));
    assert!(out.contains("color=firebrick"));
    // two interior edges, and one nil box per sentinel child
    assert_eq!(out.matches(" -> ").count(), 6);
    assert_eq!(out.matches(" -> nil").count(), 4);
    assert_eq!(exporter.anon_boxes(), 4);
}

#[test]
fn anonymous_boxes_stay_unique_across_exports() {
    let mut tree = RbTree::new().unwrap();
    tree.insert(1, Some(1)).unwrap();

    let mut exporter = DotExporter::new();
    let first = render_rb(&mut exporter, &tree);
    assert!(first.contains("nil0"));
    assert!(first.contains("nil1"));
    assert_eq!(exporter.anon_boxes(), 2);

    let second = render_rb(&mut exporter, &tree);
    assert!(second.contains("nil2"));
    assert!(second.contains("nil3"));
    assert!(!second.contains("nil0 "));
    assert_eq!(exporter.anon_boxes(), 4);
}

#[test]
fn leaf_tree_uses_records_and_suppresses_nil_boxes() {
    let mut tree = RblTree::new().unwrap();
    for k in [2, 1, 3] {
        tree.insert(k, Some(k)).unwrap();
    }
    let mut exporter = DotExporter::new();
    let out = render_rbl(&mut exporter, &tree);

    assert!(!out.contains("nil"));
    assert_eq!(exporter.anon_boxes(), 0);
    assert_eq!(out.matches("shape=record").count(), 3);
    assert_eq!(out.matches("fontcolor=yellow").count(), 3);
    // the middle leaf shows both list neighbors
    assert!(out.contains("label=\"{2|{1|3}}\""), "record labels wrong:\n{out}");
    // wraparound neighbors on the extremes
    assert!(out.contains("label=\"{1|{3|2}}\""));
    assert!(out.contains("label=\"{3|{2|1}}\""));
}

#[test]
fn one_exporter_interleaves_both_variants() {
    let mut rb = RbTree::new().unwrap();
    rb.insert(1, Some(1)).unwrap();
    let mut rbl = RblTree::new().unwrap();
    rbl.insert(1, Some(1)).unwrap();

    let mut exporter = DotExporter::new();
    render_rb(&mut exporter, &rb);
    assert_eq!(exporter.anon_boxes(), 2);
    let out = render_rbl(&mut exporter, &rbl);
    assert!(!out.contains("nil"));
    assert_eq!(exporter.anon_boxes(), 2);
    let again = render_rb(&mut exporter, &rb);
    assert!(again.contains("nil2"));
    assert_eq!(exporter.anon_boxes(), 4);
}
