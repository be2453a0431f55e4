use std::path::PathBuf;

use clap::{
    crate_authors, crate_description, crate_name, crate_version, value_parser, Arg, ArgAction,
    ArgMatches, Command,
};

use utils::{add_log_args, init_log};

use crate::config::Config;

/// Set up definition of command options for clap
fn cli_model() -> Command {
    add_log_args(
        Command::new(crate_name!())
            .about(crate_description!())
            .version(crate_version!())
            .author(crate_authors!()),
    )
    .arg(
        Arg::new("output")
            .short('o')
            .long("output")
            .value_parser(value_parser!(PathBuf))
            .value_name("PATH")
            .help("Set output file [default: stdout]"),
    )
    .arg(
        Arg::new("preserve_length")
            .short('p')
            .long("preserve-branch-length")
            .action(ArgAction::SetTrue)
            .help("Add branch lengths of removed nodes to their remaining children"),
    )
    .arg(
        Arg::new("keep_root")
            .short('k')
            .long("keep-root")
            .action(ArgAction::SetTrue)
            .help("Do not unroot the pruned tree"),
    )
    .arg(
        Arg::new("tree_file")
            .value_parser(value_parser!(PathBuf))
            .value_name("TREE_FILE")
            .required(true)
            .help("Input file with tree in Newick format"),
    )
    .arg(
        Arg::new("tip_file")
            .value_parser(value_parser!(PathBuf))
            .value_name("TIP_FILE")
            .required(true)
            .help("Input file with list of tip names to keep"),
    )
}

fn config_from_matches(m: &ArgMatches) -> anyhow::Result<Config> {
    let tree_file = m
        .get_one::<PathBuf>("tree_file")
        .ok_or_else(|| anyhow!("Missing tree file"))?;
    let tip_file = m
        .get_one::<PathBuf>("tip_file")
        .ok_or_else(|| anyhow!("Missing tip file"))?;

    let mut cfg = Config::new(tree_file.to_owned(), tip_file.to_owned());
    if let Some(p) = m.get_one::<PathBuf>("output") {
        cfg.set_output_file(p.to_owned())
    }
    cfg.set_preserve_length(m.get_flag("preserve_length"));
    cfg.set_unroot(!m.get_flag("keep_root"));
    Ok(cfg)
}

/// Handle command line options.  Set up Config structure
pub fn handle_cli() -> anyhow::Result<Config> {
    // Get matches from command line
    let m = cli_model().get_matches();

    // Setup logging
    init_log(&m)?;

    debug!("Processing command line options");

    config_from_matches(&m)
}
