use std::{
    io::{Read, Write},
    path::Path,
};

use anyhow::Context;
use compress_io::compress::CompressIo;
use phylotree::tree::Tree as PhyloTree;
use utils::get_next_line;

use crate::tree::Tree;

/// Read list of tip names, one per line.  Empty lines are skipped
pub fn read_tip_list<P: AsRef<Path>>(fname: P) -> anyhow::Result<Vec<String>> {
    let fname = fname.as_ref();
    debug!("Reading in tip list from {}", fname.display());

    trace!("Opening tip file for reading");
    let mut rdr = CompressIo::new()
        .path(fname)
        .bufreader()
        .with_context(|| format!("Could not open tip list {}", fname.display()))?;

    let mut buf = String::new();
    let mut line = 0;
    let mut tips = Vec::new();

    while let Some(fields) = get_next_line(&mut rdr, &mut buf).with_context(|| {
        format!("Error after reading {} lines from {}", line, fname.display())
    })? {
        line += 1;
        if !fields[0].is_empty() {
            tips.push(fields[0].to_owned())
        }
    }

    debug!(
        "Finished reading in {} lines; found {} tips",
        line,
        tips.len()
    );
    Ok(tips)
}

/// Read a Newick tree from a file
pub fn read_tree<P: AsRef<Path>>(fname: P) -> anyhow::Result<Tree> {
    let fname = fname.as_ref();
    debug!("Reading in tree from {}", fname.display());

    let mut rdr = CompressIo::new()
        .path(fname)
        .bufreader()
        .with_context(|| format!("Could not open tree file {}", fname.display()))?;
    let mut s = String::new();
    rdr.read_to_string(&mut s)
        .with_context(|| format!("Error reading from {}", fname.display()))?;

    let t = PhyloTree::from_newick(s.trim())
        .map_err(|e| anyhow!("Error parsing Newick tree from {}: {}", fname.display(), e))?;
    Tree::from_phylo(&t)
}

/// Write tree in Newick format to a file, or to stdout if no file is given
pub fn write_tree(tree: &Tree, fname: Option<&Path>) -> anyhow::Result<()> {
    let mut wrt = CompressIo::new()
        .opt_path(fname)
        .bufwriter()
        .with_context(|| "Failed to open output file")?;
    writeln!(wrt, "{}", tree.to_newick()).with_context(|| "Error writing tree")?;
    wrt.flush().with_context(|| "Error writing tree")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn tips_skip_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("ref_names.txt");
        fs::write(&p, "taxon_1\n\n  taxon_2  \ntaxon_3").unwrap();
        assert_eq!(
            read_tip_list(&p).unwrap(),
            vec!["taxon_1", "taxon_2", "taxon_3"]
        );
    }

    #[test]
    fn tree_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("best.tre");
        fs::write(&p, "((A:1,B:2):0.5,C:3);\n").unwrap();
        let t = read_tree(&p).unwrap();
        assert_eq!(t.leaf_names(), vec!["A", "B", "C"]);

        let out = dir.path().join("pruned.newick");
        write_tree(&t, Some(&out)).unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "((A:1,B:2):0.5,C:3);\n");
    }

    #[test]
    fn missing_files_fail() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_tip_list(dir.path().join("none.txt")).is_err());
        assert!(read_tree(dir.path().join("none.tre")).is_err());
    }
}
