//! Dataset file preprocessing.
//!
//! Some raw dumps cannot be fed to `LOAD CSV` as-is. These functions rewrite
//! them next to the original as tab-separated `<stem>_edit.csv` files.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{BenchError, BenchResult};

/// Outcome of rewriting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preprocessed {
    pub output: PathBuf,
    pub rows: usize,
}

/// Path of the rewritten file: `<dir>/<stem>_edit.csv`.
pub fn edited_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{stem}_edit.csv"))
}

fn tsv_writer(path: &Path) -> BenchResult<csv::Writer<std::fs::File>> {
    Ok(csv::WriterBuilder::new().delimiter(b'\t').from_path(path)?)
}

/// Rewrite `ACTIONID` in a mooc TSV file to the zero-based row index.
///
/// The action ids in the three mooc files must line up row by row; trailing
/// rows without an id are dropped.
pub fn renumber_actions(path: &Path) -> BenchResult<Preprocessed> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let id_col = headers
        .iter()
        .position(|h| h.trim() == "ACTIONID")
        .ok_or_else(|| BenchError::MalformedDataset {
            path: path.to_path_buf(),
            reason: "missing ACTIONID column".to_string(),
        })?;

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?);
    }

    while rows
        .last()
        .is_some_and(|r| r.get(id_col).map_or(true, |v| v.trim().is_empty()))
    {
        rows.pop();
    }

    let output = edited_path(path);
    let mut writer = tsv_writer(&output)?;
    writer.write_record(&headers)?;

    for (index, record) in rows.iter().enumerate() {
        let has_id = record.get(id_col).is_some_and(|v| !v.trim().is_empty());
        let id = index.to_string();
        let fields = record
            .iter()
            .enumerate()
            .map(|(col, value)| if col == id_col && has_id { id.as_str() } else { value });
        writer.write_record(fields)?;
    }
    writer.flush()?;

    debug!(
        input = %path.display(),
        output = %output.display(),
        rows = rows.len(),
        "Renumbered actions"
    );
    Ok(Preprocessed {
        output,
        rows: rows.len(),
    })
}

/// Turn a SNAP edge list into a TSV with a header row.
///
/// SNAP files open with three comment lines followed by a `# From\tTo`
/// header; the comments are dropped and the `# ` prefix stripped.
pub fn normalize_edge_list(path: &Path) -> BenchResult<Preprocessed> {
    let data = std::fs::read_to_string(path)?;
    let malformed = |reason: &str| BenchError::MalformedDataset {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let mut lines = data.lines().skip(3).map(|l| l.trim_end_matches('\r'));
    let header = lines.next().ok_or_else(|| malformed("missing header line"))?;
    let header = header
        .strip_prefix('#')
        .ok_or_else(|| malformed("header line must start with '#'"))?
        .trim_start();

    let mut body: Vec<&str> = lines.collect();
    while body.last().is_some_and(|l| l.trim().is_empty()) {
        body.pop();
    }

    let mut text = String::with_capacity(data.len());
    text.push_str(header);
    for line in &body {
        text.push('\n');
        text.push_str(line);
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_reader(text.as_bytes());

    let output = edited_path(path);
    let mut writer = tsv_writer(&output)?;
    writer.write_record(reader.headers()?)?;

    let mut rows = 0;
    for record in reader.records() {
        writer.write_record(&record?)?;
        rows += 1;
    }
    writer.flush()?;

    debug!(input = %path.display(), output = %output.display(), rows, "Normalized edge list");
    Ok(Preprocessed { output, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_edited_path() {
        assert_eq!(
            edited_path(Path::new("/import/act-mooc/mooc_actions.tsv")),
            PathBuf::from("/import/act-mooc/mooc_actions_edit.csv")
        );
        assert_eq!(
            edited_path(Path::new("roadNet-CA.txt")),
            PathBuf::from("roadNet-CA_edit.csv")
        );
    }

    #[test]
    fn test_renumber_actions() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("mooc_actions.tsv");
        fs::write(
            &input,
            "ACTIONID\tUSERID\tTARGETID\tTIMESTAMP\n\
             10\t0\t0\t0.0\n\
             11\t0\t1\t6.0\n\
             42\t1\t2\t41.0\n\
             \t\t\t\n",
        )
        .unwrap();

        let result = renumber_actions(&input).unwrap();
        assert_eq!(result.rows, 3);
        assert_eq!(result.output, dir.path().join("mooc_actions_edit.csv"));

        let written = fs::read_to_string(&result.output).unwrap();
        assert_eq!(
            written,
            "ACTIONID\tUSERID\tTARGETID\tTIMESTAMP\n\
             0\t0\t0\t0.0\n\
             1\t0\t1\t6.0\n\
             2\t1\t2\t41.0\n"
        );
    }

    #[test]
    fn test_renumber_actions_requires_column() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("mooc_action_labels.tsv");
        fs::write(&input, "ID\tLABEL\n0\t1\n").unwrap();

        let err = renumber_actions(&input).unwrap_err();
        assert!(matches!(err, BenchError::MalformedDataset { .. }));
    }

    #[test]
    fn test_normalize_edge_list() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("roadNet-CA.txt");
        fs::write(
            &input,
            "# Directed graph (each unordered pair of nodes is saved once): roadNet-CA.txt\r\n\
             # California road network\r\n\
             # Nodes: 1965206 Edges: 5533214\r\n\
             # FromNodeId\tToNodeId\r\n\
             0\t1\r\n\
             0\t2\r\n\
             1\t0\r\n\
             \r\n\
             \r\n",
        )
        .unwrap();

        let result = normalize_edge_list(&input).unwrap();
        assert_eq!(result.rows, 3);
        assert_eq!(
            fs::read_to_string(&result.output).unwrap(),
            "FromNodeId\tToNodeId\n0\t1\n0\t2\n1\t0\n"
        );
    }

    #[test]
    fn test_normalize_edge_list_too_short() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tiny.txt");
        fs::write(&input, "# one\n# two\n").unwrap();

        assert!(normalize_edge_list(&input).is_err());
    }
}
