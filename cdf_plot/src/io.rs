use std::path::Path;

use anyhow::Context;
use compress_io::compress::CompressIo;

use crate::measure::Column;

/// Read the values of one column from a delimited file
///
/// Column::Name expects a header line and looks the column up by name;
/// Column::Index reads the file without a header.  Blank cells and short
/// lines are skipped.
pub fn read_samples(p: &Path, col: Column) -> anyhow::Result<Vec<f64>> {
    trace!("Opening sample file {} for reading", p.display());
    let rdr = CompressIo::new()
        .path(p)
        .bufreader()
        .with_context(|| format!("Could not open sample file {}", p.display()))?;

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(matches!(col, Column::Name(_)))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let (ix, first_line) = match col {
        Column::Name(name) => {
            let hdr = rdr
                .headers()
                .with_context(|| format!("Error reading header line from {}", p.display()))?;
            let ix = hdr.iter().position(|h| h == name).ok_or_else(|| {
                anyhow!("Column '{}' not found in header of {}", name, p.display())
            })?;
            (ix, 2)
        }
        Column::Index(ix) => (ix, 1),
    };

    trace!("Reading column {} from {}", ix, p.display());
    let mut v = Vec::new();
    for (i, rec) in rdr.records().enumerate() {
        let line = first_line + i;
        let rec =
            rec.with_context(|| format!("{}:{} Error reading record", p.display(), line))?;
        let line = rec.position().map(|x| x.line()).unwrap_or(line as u64);
        if let Some(s) = rec.get(ix).filter(|s| !s.is_empty()) {
            let z = s.parse::<f64>().with_context(|| {
                format!("{}:{} Error reading value '{}'", p.display(), line, s)
            })?;
            v.push(z)
        }
    }
    debug!("Read {} values from {}", v.len(), p.display());
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn named_column_from_table() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("lwr_list.csv");
        fs::write(&p, "Name,LWR 1,LWR 2\nr1,0.9,0.1\nr2, 1.0 ,\nr3,,0.5\n").unwrap();
        let v = read_samples(&p, Column::Name("LWR 1")).unwrap();
        assert_eq!(v, vec![0.9, 1.0]);
    }

    #[test]
    fn first_column_without_header() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("list_edpl.txt");
        fs::write(&p, "0\n0.02\n\n0.5\n").unwrap();
        let v = read_samples(&p, Column::Index(0)).unwrap();
        assert_eq!(v, vec![0.0, 0.02, 0.5]);
    }

    #[test]
    fn unknown_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("edpl_list.csv");
        fs::write(&p, "Name,edpl\nr1,0.1\n").unwrap();
        let e = read_samples(&p, Column::Name("EDPL")).unwrap_err();
        assert!(e.to_string().contains("Column 'EDPL' not found"));
    }

    #[test]
    fn bad_value_names_line() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("list_wd_pl.txt");
        fs::write(&p, "1\n2\nthree\n").unwrap();
        let e = read_samples(&p, Column::Index(0)).unwrap_err();
        assert!(e.to_string().ends_with(":3 Error reading value 'three'"), "{}", e);
    }

    #[test]
    fn missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_samples(&dir.path().join("nope.csv"), Column::Index(0)).is_err());
    }
}
