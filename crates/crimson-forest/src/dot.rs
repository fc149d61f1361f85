//! Graphviz DOT export for offline tree visualization.
//!
//! Read-only; intended for harnesses that dump one file per mutation and
//! render animation frames. Output format is only stable within a debug
//! session.

use std::io::{self, Write};

use crate::rb::RbTree;
use crate::rbl::RblTree;
use crate::types::{Color, NodeId};

fn color_name(c: Color) -> &'static str {
    match c {
        Color::Red => "firebrick",
        Color::Black => "black",
    }
}

/// Serializes trees as directed graphs.
///
/// Holds the counter for anonymous sentinel boxes explicitly, so numbers
/// stay unique across every export performed through the same exporter
/// and no hidden global state is involved. The counter is never reset.
pub struct DotExporter {
    anon: u32,
}

impl DotExporter {
    pub fn new() -> Self {
        Self { anon: 0 }
    }

    /// Anonymous sentinel boxes emitted so far.
    pub fn anon_boxes(&self) -> u32 {
        self.anon
    }

    /// Writes a classical tree; each sentinel child becomes a uniquely
    /// numbered `nil` box.
    pub fn export_rb<V, W: Write>(&mut self, tree: &RbTree<V>, out: &mut W) -> io::Result<()> {
        self.header(out)?;
        self.rb_node(tree, tree.root(), out)?;
        writeln!(out, "}}")
    }

    /// Writes a leaf-oriented tree; leaves render as records carrying
    /// their list neighbors' keys, and sentinel boxes are suppressed.
    pub fn export_rbl<V, W: Write>(&mut self, tree: &RblTree<V>, out: &mut W) -> io::Result<()> {
        self.header(out)?;
        self.rbl_node(tree, tree.root(), out)?;
        writeln!(out, "}}")
    }

    fn header<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        writeln!(out, "digraph {{")?;
        writeln!(out, "  nodesep=0.3;")?;
        writeln!(out, "  ranksep=0.2;")?;
        writeln!(out, "  node [shape=circle style=filled fontcolor=white];")?;
        writeln!(out, "  edge [arrowsize=0.8];")
    }

    fn nil_box<W: Write>(&mut self, out: &mut W, from: NodeId) -> io::Result<()> {
        let id = self.anon;
        self.anon += 1;
        writeln!(
            out,
            "  nil{id} [label=nil color=black shape=box width=0.25 height=0.25 fontsize=10];"
        )?;
        writeln!(out, "  n{} -> nil{id};", from.0)
    }

    fn rb_node<V, W: Write>(
        &mut self,
        tree: &RbTree<V>,
        x: NodeId,
        out: &mut W,
    ) -> io::Result<()> {
        if x.is_nil() {
            return Ok(());
        }
        let a = tree.arena();
        writeln!(
            out,
            "  n{} [label={} color={}];",
            x.0,
            a[x].key,
            color_name(a[x].color)
        )?;
        let l = a[x].l;
        let r = a[x].r;
        if !l.is_nil() {
            writeln!(out, "  n{} -> n{};", x.0, l.0)?;
        } else {
            self.nil_box(out, x)?;
        }
        if !r.is_nil() {
            writeln!(out, "  n{} -> n{};", x.0, r.0)?;
        } else {
            self.nil_box(out, x)?;
        }
        self.rb_node(tree, l, out)?;
        self.rb_node(tree, r, out)
    }

    fn rbl_node<V, W: Write>(
        &mut self,
        tree: &RblTree<V>,
        x: NodeId,
        out: &mut W,
    ) -> io::Result<()> {
        if x.is_nil() {
            return Ok(());
        }
        let a = tree.arena();
        if a[x].is_leaf() {
            let prev = a[a[x].prev].key;
            let next = a[a[x].next].key;
            writeln!(
                out,
                "  n{} [shape=record label=\"{{{}|{{{}|{}}}}}\" color={} fontcolor=yellow];",
                x.0,
                a[x].key,
                prev,
                next,
                color_name(a[x].color)
            )?;
        } else {
            writeln!(
                out,
                "  n{} [label={} color={} fontcolor=white];",
                x.0,
                a[x].key,
                color_name(a[x].color)
            )?;
        }
        let l = a[x].l;
        let r = a[x].r;
        if !l.is_nil() {
            writeln!(out, "  n{} -> n{};", x.0, l.0)?;
        }
        if !r.is_nil() {
            writeln!(out, "  n{} -> n{};", x.0, r.0)?;
        }
        self.rbl_node(tree, l, out)?;
        self.rbl_node(tree, r, out)
    }
}

impl Default for DotExporter {
    fn default() -> Self {
        Self::new()
    }
}
