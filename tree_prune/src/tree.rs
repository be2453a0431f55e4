use std::{
    collections::{BTreeSet, HashSet},
    fmt::{self, Write},
};

use phylotree::tree::Tree as PhyloTree;

#[derive(Debug, Clone, PartialEq)]
struct Node {
    name: Option<String>,
    length: Option<f64>,
    children: Vec<usize>,
}

/// Tree
///
/// Rooted tree stored as an arena of nodes.  Only nodes reachable from
/// the root belong to the tree.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    nodes: Vec<Node>,
    root: usize,
}

fn add_lengths(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (None, None) => None,
        _ => Some(a.unwrap_or(0.0) + b.unwrap_or(0.0)),
    }
}

impl Tree {
    /// Copy the topology, leaf names and branch lengths of a parsed tree
    pub fn from_phylo(t: &PhyloTree) -> anyhow::Result<Self> {
        let err = |e: phylotree::tree::TreeError| anyhow!("Invalid tree: {}", e);
        let root_id = t.get_root().map_err(err)?;

        let mut nodes = Vec::new();
        // (source id, index of new parent)
        let mut stack = vec![(root_id, None)];
        while let Some((id, parent)) = stack.pop() {
            let src = t.get(&id).map_err(err)?;
            let ix = nodes.len();
            nodes.push(Node {
                name: src.name.clone(),
                length: src.parent_edge,
                children: Vec::with_capacity(src.children.len()),
            });
            if let Some(p) = parent {
                let pn: &mut Node = &mut nodes[p];
                pn.children.push(ix);
            }
            // Reversed so children are visited, and stored, in their original order
            for c in src.children.iter().rev() {
                stack.push((*c, Some(ix)))
            }
        }
        Ok(Self { nodes, root: 0 })
    }

    fn is_leaf(&self, id: usize) -> bool {
        self.nodes[id].children.is_empty()
    }

    /// Node ids reachable from the root, children before parents
    fn postorder(&self) -> Vec<usize> {
        let mut order = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id].children.iter().copied());
        }
        order.reverse();
        order
    }

    /// Names of all leaves in depth first order
    pub fn leaf_names(&self) -> Vec<&str> {
        self.postorder()
            .into_iter()
            .filter(|id| self.is_leaf(*id))
            .filter_map(|id| self.nodes[id].name.as_deref())
            .collect()
    }

    /// Number of nodes reachable from the root
    pub fn node_count(&self) -> usize {
        self.postorder().len()
    }

    pub fn root_degree(&self) -> usize {
        self.nodes[self.root].children.len()
    }

    /// Keep only the leaves named in `tips`
    ///
    /// Subtrees without any of the named leaves are removed, and internal
    /// nodes left with a single child are dissolved.  The child keeps its own
    /// branch length unless `preserve_length` is set, in which case the
    /// lengths of dissolved nodes are added to it.
    pub fn prune(&self, tips: &[String], preserve_length: bool) -> anyhow::Result<Self> {
        if tips.is_empty() {
            return Err(anyhow!("No tips to keep"));
        }
        let keep: HashSet<&str> = tips.iter().map(|s| s.as_str()).collect();

        let present: HashSet<&str> = self.leaf_names().into_iter().collect();
        let missing: BTreeSet<&str> = keep.difference(&present).copied().collect();
        if !missing.is_empty() {
            return Err(anyhow!(
                "{} tip(s) not found in tree: {}",
                missing.len(),
                missing.into_iter().collect::<Vec<_>>().join(", ")
            ));
        }

        // Mark nodes that have a kept leaf at or below them
        let mut kept = vec![false; self.nodes.len()];
        for id in self.postorder() {
            let n = &self.nodes[id];
            kept[id] = if n.children.is_empty() {
                n.name.as_deref().map(|s| keep.contains(s)).unwrap_or(false)
            } else {
                n.children.iter().any(|c| kept[*c])
            };
        }

        let pruner = Pruner {
            tree: self,
            kept: &kept,
            preserve_length,
        };
        let (root, _) = pruner.collapse(self.root);
        let mut nodes = Vec::new();
        pruner.copy(root, None, &mut nodes);
        let t = Self { nodes, root: 0 };
        debug!(
            "Pruned tree from {} to {} nodes",
            self.node_count(),
            t.node_count()
        );
        Ok(t)
    }

    /// Turn a bifurcating root into a multifurcation
    ///
    /// The first internal child of the root is dissolved and its children
    /// appended after the remaining children of the root.  Its branch length
    /// is dropped, or added to the branches of its children if
    /// `preserve_length` is set.  Returns false if the tree was left
    /// unchanged.
    pub fn unroot(&mut self, preserve_length: bool) -> bool {
        let root = self.root;
        if self.nodes[root].children.len() != 2 {
            return false;
        }
        let Some(pos) = self.nodes[root]
            .children
            .iter()
            .position(|c| !self.is_leaf(*c))
        else {
            return false;
        };
        let d = self.nodes[root].children[pos];
        let grandchildren = std::mem::take(&mut self.nodes[d].children);
        if preserve_length {
            let l = self.nodes[d].length;
            for c in grandchildren.iter() {
                self.nodes[*c].length = add_lengths(self.nodes[*c].length, l);
            }
        }
        let children = &mut self.nodes[root].children;
        children.remove(pos);
        children.extend(grandchildren);
        true
    }

    /// Newick string with leaf names and branch lengths, no internal names
    pub fn to_newick(&self) -> String {
        let mut s = String::new();
        self.write_node(self.root, &mut s)
            .and_then(|_| s.write_char(';'))
            .expect("Writing to a String cannot fail");
        s
    }

    fn write_node(&self, id: usize, s: &mut String) -> fmt::Result {
        let n = &self.nodes[id];
        if n.children.is_empty() {
            if let Some(name) = n.name.as_deref() {
                write_name(name, s)?
            }
        } else {
            s.write_char('(')?;
            for (i, c) in n.children.iter().enumerate() {
                if i > 0 {
                    s.write_char(',')?
                }
                self.write_node(*c, s)?
            }
            s.write_char(')')?
        }
        match n.length {
            Some(l) if id != self.root => write!(s, ":{}", l),
            _ => Ok(()),
        }
    }
}

// Names with Newick delimiters or blanks are quoted, embedded quotes doubled
fn write_name(name: &str, s: &mut String) -> fmt::Result {
    if name
        .chars()
        .any(|c| c.is_whitespace() || "()[]':;,".contains(c))
    {
        write!(s, "'{}'", name.replace('\'', "''"))
    } else {
        s.write_str(name)
    }
}

struct Pruner<'a> {
    tree: &'a Tree,
    kept: &'a [bool],
    preserve_length: bool,
}

impl<'a> Pruner<'a> {
    fn kept_children(&self, id: usize) -> impl Iterator<Item = usize> + '_ {
        self.tree.nodes[id]
            .children
            .iter()
            .copied()
            .filter(|c| self.kept[*c])
    }

    /// Follow a chain of nodes with a single kept child down to the first
    /// node that is a leaf or branches, returning it with its new length
    fn collapse(&self, mut id: usize) -> (usize, Option<f64>) {
        let mut len = self.tree.nodes[id].length;
        loop {
            let mut it = self.kept_children(id);
            match (it.next(), it.next()) {
                (Some(c), None) => {
                    let cl = self.tree.nodes[c].length;
                    len = if self.preserve_length {
                        add_lengths(len, cl)
                    } else {
                        cl
                    };
                    id = c;
                }
                _ => return (id, len),
            }
        }
    }

    fn copy(&self, id: usize, len: Option<f64>, out: &mut Vec<Node>) -> usize {
        let ix = out.len();
        out.push(Node {
            name: self.tree.nodes[id].name.clone(),
            length: len,
            children: Vec::new(),
        });
        let children: Vec<usize> = self.kept_children(id).collect();
        for c in children {
            let (c, l) = self.collapse(c);
            let k = self.copy(c, l, out);
            out[ix].children.push(k);
        }
        ix
    }
}
