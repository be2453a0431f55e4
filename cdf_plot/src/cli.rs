use std::{
    num::{NonZeroU32, NonZeroUsize},
    path::PathBuf,
};

use clap::{
    crate_authors, crate_description, crate_name, crate_version, value_parser, Arg, ArgAction,
    ArgMatches, Command,
};

use utils::{add_log_args, init_log};

use crate::{
    config::Config,
    measure::{Layout, Measure, Method},
};

/// Set up definition of command options for clap
fn cli_model() -> Command {
    add_log_args(
        Command::new(crate_name!())
            .about(crate_description!())
            .version(crate_version!())
            .author(crate_authors!()),
    )
    .arg(
        Arg::new("measure")
            .short('m')
            .long("measure")
            .value_parser(value_parser!(Measure))
            .value_name("MEASURE")
            .value_delimiter(',')
            .action(ArgAction::Append)
            .help("Measures to plot (edpl, lwr, lwr_placed, wd_bu, wd_pl) [default: depends on layout]"),
    )
    .arg(
        Arg::new("method")
            .short('M')
            .long("method")
            .value_parser(value_parser!(Method))
            .value_name("METHOD")
            .value_delimiter(',')
            .action(ArgAction::Append)
            .default_value("exact")
            .help("Curve methods (exact, histogram, simple)"),
    )
    .arg(
        Arg::new("layout")
            .short('L')
            .long("layout")
            .value_parser(value_parser!(Layout))
            .value_name("LAYOUT")
            .default_value("table")
            .help("Input layout: table (<measure>_list.csv) or list (list_<measure>.txt)"),
    )
    .arg(
        Arg::new("bins")
            .short('b')
            .long("bins")
            .value_parser(value_parser!(NonZeroUsize))
            .value_name("INT")
            .default_value("10")
            .help("Set number of bins for histogram methods"),
    )
    .arg(
        Arg::new("output_dir")
            .short('d')
            .long("output-dir")
            .value_parser(value_parser!(PathBuf))
            .value_name("PATH")
            .help("Set output directory [default: current directory]"),
    )
    .arg(
        Arg::new("width")
            .short('W')
            .long("width")
            .value_parser(value_parser!(NonZeroU32))
            .value_name("INT")
            .default_value("800")
            .help("Set image width in pixels"),
    )
    .arg(
        Arg::new("height")
            .short('H')
            .long("height")
            .value_parser(value_parser!(NonZeroU32))
            .value_name("INT")
            .default_value("600")
            .help("Set image height in pixels"),
    )
    .arg(
        Arg::new("datasets")
            .value_parser(value_parser!(PathBuf))
            .value_name("DATASET")
            .num_args(1..)
            .default_values(["long", "V4"])
            .help("Dataset directories, one curve each"),
    )
}

/// Set up Config structure from parsed options
fn config_from_matches(m: &ArgMatches) -> anyhow::Result<Config> {
    let datasets: Vec<PathBuf> = m
        .get_many::<PathBuf>("datasets")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();
    if datasets.is_empty() {
        return Err(anyhow!("No datasets given"));
    }

    let layout = m
        .get_one::<Layout>("layout")
        .copied()
        .unwrap_or(Layout::Table);

    let measures = m
        .get_many::<Measure>("measure")
        .map(|v| v.copied().collect())
        .unwrap_or_else(|| layout.default_measures());

    let methods: Vec<Method> = m
        .get_many::<Method>("method")
        .map(|v| v.copied().collect())
        .unwrap_or_else(|| vec![Method::Exact]);

    debug!(
        "{} datasets, measures {:?}, methods {:?}, layout {}",
        datasets.len(),
        measures,
        methods,
        layout
    );

    let mut cfg = Config::new(datasets, measures, methods, layout);

    if let Some(b) = m.get_one::<NonZeroUsize>("bins") {
        cfg.set_bins(usize::from(*b))
    }

    if let (Some(w), Some(h)) = (
        m.get_one::<NonZeroU32>("width"),
        m.get_one::<NonZeroU32>("height"),
    ) {
        cfg.set_size(u32::from(*w), u32::from(*h))
    }

    if let Some(p) = m.get_one::<PathBuf>("output_dir") {
        cfg.set_output_dir(p.to_owned())
    }

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

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn parse(args: &[&str]) -> anyhow::Result<Config> {
        let m = cli_model().try_get_matches_from(args)?;
        config_from_matches(&m)
    }

    #[test]
    fn defaults() {
        let cfg = parse(&["cdf_plot"]).unwrap();
        assert_eq!(cfg.datasets(), &[PathBuf::from("long"), PathBuf::from("V4")]);
        assert_eq!(cfg.measures(), &[Measure::Edpl, Measure::Lwr]);
        assert_eq!(cfg.methods(), &[Method::Exact]);
        assert_eq!(cfg.layout(), Layout::Table);
        assert_eq!(cfg.bins(), 10);
        assert_eq!(cfg.size(), (800, 600));
        assert_eq!(cfg.output_dir(), None);
    }

    #[test]
    fn list_layout_defaults_to_its_measures() {
        let cfg = parse(&["cdf_plot", "-L", "list", "a", "b", "c"]).unwrap();
        assert_eq!(cfg.datasets().len(), 3);
        assert_eq!(
            cfg.measures(),
            &[Measure::Edpl, Measure::LwrPlaced, Measure::WdBu, Measure::WdPl]
        );
    }

    #[test]
    fn explicit_options() {
        let cfg = parse(&[
            "cdf_plot",
            "-m",
            "wd_bu,wd_pl",
            "-M",
            "exact,histogram",
            "-M",
            "simple",
            "-b",
            "20",
            "-d",
            "out",
            "-W",
            "1024",
            "-H",
            "768",
            "long",
        ])
        .unwrap();
        assert_eq!(cfg.measures(), &[Measure::WdBu, Measure::WdPl]);
        assert_eq!(
            cfg.methods(),
            &[Method::Exact, Method::Histogram, Method::Simple]
        );
        assert_eq!(cfg.bins(), 20);
        assert_eq!(cfg.size(), (1024, 768));
        assert_eq!(cfg.output_dir(), Some(Path::new("out")));
        assert_eq!(cfg.datasets(), &[PathBuf::from("long")]);
    }

    #[test]
    fn unsupported_names_are_rejected() {
        assert!(parse(&["cdf_plot", "-m", "rmsd"]).is_err());
        assert!(parse(&["cdf_plot", "-M", "kde"]).is_err());
        assert!(parse(&["cdf_plot", "-L", "json"]).is_err());
        assert!(parse(&["cdf_plot", "-b", "0"]).is_err());
    }
}
