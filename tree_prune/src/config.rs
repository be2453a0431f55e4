use std::path::{Path, PathBuf};

/// Config
///
/// Configuration info for the program
/// This is generated from the command line arguments
/// Once set it is read only
///
/// tree_file - input Newick tree
/// tip_file - list of tip names to keep
/// output_file - output Newick file [default: stdout]
/// preserve_length - add branch lengths of dissolved nodes to their children
/// unroot - turn a bifurcating root into a multifurcation
///
pub struct Config {
    tree_file: PathBuf,
    tip_file: PathBuf,
    output_file: Option<PathBuf>,
    preserve_length: bool,
    unroot: bool,
}

impl Config {
    pub fn new(tree_file: PathBuf, tip_file: PathBuf) -> Self {
        Self {
            tree_file,
            tip_file,
            output_file: None,
            preserve_length: false,
            unroot: true,
        }
    }

    pub fn set_output_file(&mut self, p: PathBuf) {
        self.output_file = Some(p)
    }

    pub fn set_preserve_length(&mut self, x: bool) {
        self.preserve_length = x
    }

    pub fn set_unroot(&mut self, x: bool) {
        self.unroot = x
    }

    pub fn tree_file(&self) -> &Path {
        &self.tree_file
    }

    pub fn tip_file(&self) -> &Path {
        &self.tip_file
    }

    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }

    pub fn preserve_length(&self) -> bool {
        self.preserve_length
    }

    pub fn unroot(&self) -> bool {
        self.unroot
    }
}
