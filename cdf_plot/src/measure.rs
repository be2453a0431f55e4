use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Placement quality measure
///
/// Each measure has a fixed upper limit for the x axis, and optionally a
/// column header under which it is stored in tabular (CSV) input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Edpl,
    Lwr,
    LwrPlaced,
    WdBu,
    WdPl,
}

const MEASURES: [Measure; 5] = [
    Measure::Edpl,
    Measure::Lwr,
    Measure::LwrPlaced,
    Measure::WdBu,
    Measure::WdPl,
];

impl Measure {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Edpl => "edpl",
            Self::Lwr => "lwr",
            Self::LwrPlaced => "lwr_placed",
            Self::WdBu => "wd_bu",
            Self::WdPl => "wd_pl",
        }
    }

    pub fn max_x(&self) -> f64 {
        match self {
            Self::Edpl => 0.1,
            Self::Lwr | Self::LwrPlaced => 1.0,
            Self::WdBu => 0.01,
            Self::WdPl => 2.0,
        }
    }

    pub fn table_column(&self) -> Option<&'static str> {
        match self {
            Self::Edpl => Some("EDPL"),
            Self::Lwr => Some("LWR 1"),
            _ => None,
        }
    }
}

impl FromStr for Measure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.to_lowercase();
        MEASURES
            .iter()
            .find(|m| m.name() == s)
            .copied()
            .ok_or_else(|| {
                let names: Vec<_> = MEASURES.iter().map(|m| m.name()).collect();
                format!(
                    "unsupported measure '{}' (expected one of: {})",
                    s,
                    names.join(", ")
                )
            })
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How a curve is derived from a sample set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Exact empirical CDF
    Exact,
    /// Cumulative histogram normalized by all samples
    Histogram,
    /// Cumulative histogram normalized by the samples in the plotted range
    Simple,
}

impl Method {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Histogram => "histogram",
            Self::Simple => "simple",
        }
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "histogram" => Ok(Self::Histogram),
            "simple" => Ok(Self::Simple),
            _ => Err(format!(
                "unsupported method '{}' (expected one of: exact, histogram, simple)",
                s
            )),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Input layout of a dataset directory
///
/// Table - <dataset>/<measure>_list.csv, comma separated with a header line
/// List - <dataset>/list_<measure>.txt, no header, one value per line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Table,
    List,
}

/// Column holding the measure within an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column<'a> {
    Name(&'a str),
    Index(usize),
}

impl Layout {
    pub fn sample_path(&self, dataset: &Path, measure: Measure) -> PathBuf {
        let fname = match self {
            Self::Table => format!("{}_list.csv", measure),
            Self::List => format!("list_{}.txt", measure),
        };
        dataset.join(fname)
    }

    pub fn column(&self, measure: Measure) -> anyhow::Result<Column<'static>> {
        match self {
            Self::Table => measure.table_column().map(Column::Name).ok_or_else(|| {
                anyhow!(
                    "Unsupported option: measure {} has no column in the table layout",
                    measure
                )
            }),
            Self::List => Ok(Column::Index(0)),
        }
    }

    pub fn default_measures(&self) -> Vec<Measure> {
        match self {
            Self::Table => vec![Measure::Edpl, Measure::Lwr],
            Self::List => vec![
                Measure::Edpl,
                Measure::LwrPlaced,
                Measure::WdBu,
                Measure::WdPl,
            ],
        }
    }

    /// File name stem (without extension) for a figure
    pub fn figure_stem(&self, measure: Measure, method: Method) -> String {
        match (self, method) {
            (Self::Table, Method::Exact) => measure.to_string(),
            _ => format!("{}_{}", measure, method),
        }
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "list" => Ok(Self::List),
            _ => Err(format!(
                "unsupported layout '{}' (expected one of: table, list)",
                s
            )),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::List => write!(f, "list"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_parse_by_name() {
        for m in MEASURES {
            assert_eq!(Measure::from_str(m.name()), Ok(m));
        }
        assert_eq!(Measure::from_str("EDPL"), Ok(Measure::Edpl));
        let e = Measure::from_str("rmsd").unwrap_err();
        assert!(e.starts_with("unsupported measure 'rmsd'"));
    }

    #[test]
    fn methods_and_layouts_reject_unknown_names() {
        assert_eq!(Method::from_str("Histogram"), Ok(Method::Histogram));
        assert!(Method::from_str("kde").unwrap_err().contains("unsupported method"));
        assert_eq!(Layout::from_str("list"), Ok(Layout::List));
        assert!(Layout::from_str("tsv").is_err());
    }

    #[test]
    fn axis_limits() {
        assert_eq!(Measure::Edpl.max_x(), 0.1);
        assert_eq!(Measure::LwrPlaced.max_x(), 1.0);
        assert_eq!(Measure::WdBu.max_x(), 0.01);
        assert_eq!(Measure::WdPl.max_x(), 2.0);
    }

    #[test]
    fn sample_paths_follow_layout() {
        let d = Path::new("long");
        assert_eq!(
            Layout::Table.sample_path(d, Measure::Lwr),
            PathBuf::from("long/lwr_list.csv")
        );
        assert_eq!(
            Layout::List.sample_path(d, Measure::WdPl),
            PathBuf::from("long/list_wd_pl.txt")
        );
    }

    #[test]
    fn table_layout_needs_a_column() {
        assert_eq!(
            Layout::Table.column(Measure::Lwr).unwrap(),
            Column::Name("LWR 1")
        );
        assert_eq!(
            Layout::List.column(Measure::WdBu).unwrap(),
            Column::Index(0)
        );
        let e = Layout::Table.column(Measure::WdBu).unwrap_err();
        assert!(e.to_string().starts_with("Unsupported option"));
    }

    #[test]
    fn figure_stems() {
        assert_eq!(Layout::Table.figure_stem(Measure::Edpl, Method::Exact), "edpl");
        assert_eq!(
            Layout::Table.figure_stem(Measure::Edpl, Method::Histogram),
            "edpl_histogram"
        );
        assert_eq!(
            Layout::List.figure_stem(Measure::WdBu, Method::Exact),
            "wd_bu_exact"
        );
    }
}
