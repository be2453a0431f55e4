use anyhow::Context;

use crate::{config::Config, io};

/// Read the tree and the tip list, prune the tree to the listed tips,
/// optionally unroot it and write it out
pub fn prune_tree(cfg: &Config) -> anyhow::Result<()> {
    debug!("Starting processing");
    let tips = io::read_tip_list(cfg.tip_file())?;
    let tree = io::read_tree(cfg.tree_file())?;
    info!(
        "Read tree with {} leaves; keeping {} tips",
        tree.leaf_names().len(),
        tips.len()
    );

    let mut pruned = tree
        .prune(&tips, cfg.preserve_length())
        .with_context(|| format!("Error pruning tree from {}", cfg.tree_file().display()))?;

    if cfg.unroot() && !pruned.unroot(cfg.preserve_length()) {
        warn!(
            "Tree not unrooted: root has {} children and needs 2 with at least one internal",
            pruned.root_degree()
        )
    }

    io::write_tree(&pruned, cfg.output_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn prunes_unroots_and_writes() {
        let dir = tempfile::tempdir().unwrap();
        let tree = dir.path().join("best.tre");
        let names = dir.path().join("ref_names.txt");
        let out = dir.path().join("pruned.newick");
        fs::write(&tree, "(((A:1,B:1):1,q1:3):0.5,((C:1,q2:2):1,D:2):0.5);\n").unwrap();
        fs::write(&names, "A\nB\nC\nD\n").unwrap();

        let mut cfg = Config::new(tree, names);
        cfg.set_output_file(out.clone());
        prune_tree(&cfg).unwrap();
        // ((A,B),(C,D)) after pruning, then (A,B) dissolved and its children
        // appended to the root
        assert_eq!(fs::read_to_string(&out).unwrap(), "((C:1,D:2):0.5,A:1,B:1);\n");
    }

    #[test]
    fn keep_root_leaves_bifurcation() {
        let dir = tempfile::tempdir().unwrap();
        let tree = dir.path().join("best.tre");
        let names = dir.path().join("ref_names.txt");
        let out = dir.path().join("pruned.newick");
        fs::write(&tree, "((A:1,B:1):1,(C:1,D:1):1);").unwrap();
        fs::write(&names, "A\nB\nC\n").unwrap();

        let mut cfg = Config::new(tree, names);
        cfg.set_output_file(out.clone());
        cfg.set_unroot(false);
        prune_tree(&cfg).unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "((A:1,B:1):1,C:1);\n");
    }

    #[test]
    fn unknown_tip_fails() {
        let dir = tempfile::tempdir().unwrap();
        let tree = dir.path().join("best.tre");
        let names = dir.path().join("ref_names.txt");
        fs::write(&tree, "((A:1,B:1):1,C:1);").unwrap();
        fs::write(&names, "A\nX\n").unwrap();

        let cfg = Config::new(tree, names);
        let e = prune_tree(&cfg).unwrap_err();
        assert!(format!("{:#}", e).contains("1 tip(s) not found in tree: X"));
    }
}
