use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::path::Path;
use tilecraft_common::{BlockId, CellCoord};
use tilecraft_kernel::WorldGrid;

/// Errors from writing a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A problem found while loading a snapshot. Each one has already been
/// recovered from; the affected cells hold 0.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadIssue {
    #[error("unable to open snapshot: {0}")]
    Io(String),
    #[error("snapshot is not valid JSON: {0}")]
    Parse(String),
    #[error("snapshot root is {0}, expected an array")]
    RootNotArray(&'static str),
    #[error("row {row} is {found}, expected an array")]
    RowNotArray { row: usize, found: &'static str },
    #[error("row {row} is missing")]
    MissingRow { row: usize },
    #[error("{extra} rows beyond the grid size were ignored")]
    ExtraRows { extra: usize },
    #[error("cell ({col}, {row}) is {found}, expected an integer")]
    CellNotInteger {
        row: usize,
        col: usize,
        found: &'static str,
    },
    #[error("cell ({col}, {row}) holds {value}, outside the block id range")]
    CellOutOfRange { row: usize, col: usize, value: String },
    #[error("cell ({col}, {row}) is missing")]
    MissingCell { row: usize, col: usize },
    #[error("row {row} has {extra} cells beyond the grid size, ignored")]
    ExtraCells { row: usize, extra: usize },
}

/// The result of a tolerant load: the recovered grid and what went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    pub grid: WorldGrid,
    pub issues: Vec<LoadIssue>,
}

impl Loaded {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Whether nothing could be read from the source: it was unopenable,
    /// not JSON, or not an array. The grid is then empty regardless of what
    /// the file held.
    pub fn is_unreadable(&self) -> bool {
        self.issues.iter().any(|issue| {
            matches!(
                issue,
                LoadIssue::Io(_) | LoadIssue::Parse(_) | LoadIssue::RootNotArray(_)
            )
        })
    }
}

/// Load a `size` × `size` grid from `path`, logging every recovered issue.
///
/// Never fails: an unreadable or unusable file yields an empty grid.
pub fn load(path: impl AsRef<Path>, size: u32) -> WorldGrid {
    let path = path.as_ref();
    let loaded = load_report(path, size);
    for issue in &loaded.issues {
        tracing::warn!(path = %path.display(), "{issue}");
    }
    tracing::info!(
        path = %path.display(),
        filled = loaded.grid.filled_count(),
        "world loaded"
    );
    loaded.grid
}

/// Load a grid from `path` and return the issues instead of logging them.
pub fn load_report(path: impl AsRef<Path>, size: u32) -> Loaded {
    match std::fs::read_to_string(path.as_ref()) {
        Ok(text) => decode(&text, size),
        Err(e) => Loaded {
            grid: WorldGrid::new(size),
            issues: vec![LoadIssue::Io(e.to_string())],
        },
    }
}

/// Decode snapshot text into a `size` × `size` grid.
pub fn decode(text: &str, size: u32) -> Loaded {
    let mut grid = WorldGrid::new(size);
    let mut issues = Vec::new();

    let root: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => {
            issues.push(LoadIssue::Parse(e.to_string()));
            return Loaded { grid, issues };
        }
    };
    let Value::Array(rows) = root else {
        issues.push(LoadIssue::RootNotArray(kind(&root)));
        return Loaded { grid, issues };
    };

    let n = size as usize;
    for row in 0..n {
        let Some(row_value) = rows.get(row) else {
            issues.push(LoadIssue::MissingRow { row });
            continue;
        };
        let Value::Array(cells) = row_value else {
            issues.push(LoadIssue::RowNotArray {
                row,
                found: kind(row_value),
            });
            continue;
        };
        for col in 0..n {
            let block = match cells.get(col) {
                Some(value) => match decode_cell(value, row, col) {
                    Ok(block) => block,
                    Err(issue) => {
                        issues.push(issue);
                        continue;
                    }
                },
                None => {
                    issues.push(LoadIssue::MissingCell { row, col });
                    continue;
                }
            };
            // In range by construction: row, col < size.
            let cell = CellCoord::new(col as i32, row as i32);
            if grid.set(cell, block).is_err() {
                tracing::error!(%cell, "decoded cell outside grid");
            }
        }
        if cells.len() > n {
            issues.push(LoadIssue::ExtraCells {
                row,
                extra: cells.len() - n,
            });
        }
    }
    if rows.len() > n {
        issues.push(LoadIssue::ExtraRows {
            extra: rows.len() - n,
        });
    }

    Loaded { grid, issues }
}

fn decode_cell(value: &Value, row: usize, col: usize) -> Result<BlockId, LoadIssue> {
    let Value::Number(number) = value else {
        return Err(LoadIssue::CellNotInteger {
            row,
            col,
            found: kind(value),
        });
    };
    if number.is_f64() {
        return Err(LoadIssue::CellNotInteger {
            row,
            col,
            found: "a real number",
        });
    }
    number
        .as_u64()
        .and_then(|v| u16::try_from(v).ok())
        .map(BlockId)
        .ok_or_else(|| LoadIssue::CellOutOfRange {
            row,
            col,
            value: number.to_string(),
        })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Encode the grid as snapshot bytes: row-major, 4-space indented JSON.
pub fn encode(grid: &WorldGrid) -> Result<Vec<u8>, PersistError> {
    let rows: Vec<&[BlockId]> = grid.rows().collect();
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    rows.serialize(&mut ser)?;
    Ok(buf)
}

/// Overwrite `path` with a snapshot of `grid`.
///
/// On failure nothing is retried and the in-memory grid is untouched; the
/// caller decides how to report the lost save.
pub fn save(path: impl AsRef<Path>, grid: &WorldGrid) -> Result<(), PersistError> {
    let path = path.as_ref();
    let bytes = encode(grid)?;
    std::fs::write(path, &bytes)?;
    tracing::info!(
        path = %path.display(),
        filled = grid.filled_count(),
        bytes = bytes.len(),
        "world saved"
    );
    Ok(())
}

/// SHA-256 of the encoded snapshot, as lowercase hex.
pub fn snapshot_digest(grid: &WorldGrid) -> Result<String, PersistError> {
    let mut hasher = Sha256::new();
    hasher.update(encode(grid)?);
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid(size: u32) -> WorldGrid {
        let mut g = WorldGrid::new(size);
        for (i, (cell, _)) in WorldGrid::new(size).iter().enumerate() {
            g.set(cell, BlockId((i % 11) as u16)).unwrap();
        }
        g
    }

    fn rows_json(rows: &[&str]) -> String {
        format!("[{}]", rows.join(","))
    }

    const FULL_ROW: &str = "[1,2,3,4,5,6,7,8,9,1]";

    #[test]
    fn save_load_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("world.json");
        let mut grid = sample_grid(10);
        grid.set(CellCoord::new(9, 9), BlockId(u16::MAX)).unwrap();

        save(&path, &grid).unwrap();
        let loaded = load_report(&path, 10);
        assert!(loaded.is_clean(), "{:?}", loaded.issues);
        assert_eq!(loaded.grid, grid);
        assert_eq!(load(&path, 10), grid);
    }

    #[test]
    fn repeated_saves_are_byte_identical() {
        let tmp = tempfile::tempdir().unwrap();
        let a = tmp.path().join("a.json");
        let b = tmp.path().join("b.json");
        let grid = sample_grid(10);
        save(&a, &grid).unwrap();
        save(&b, &grid).unwrap();
        assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
        assert_eq!(
            snapshot_digest(&grid).unwrap(),
            snapshot_digest(&grid.clone()).unwrap()
        );
    }

    #[test]
    fn encoding_is_indented_row_major() {
        let mut grid = WorldGrid::new(2);
        grid.set(CellCoord::new(1, 0), BlockId(1)).unwrap();
        grid.set(CellCoord::new(0, 1), BlockId(2)).unwrap();
        let text = String::from_utf8(encode(&grid).unwrap()).unwrap();
        assert_eq!(
            text,
            "[\n    [\n        0,\n        1\n    ],\n    [\n        2,\n        0\n    ]\n]"
        );
    }

    #[test]
    fn missing_file_gives_empty_grid() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nope.json");
        let loaded = load_report(&path, 10);
        assert_eq!(loaded.grid, WorldGrid::new(10));
        assert!(matches!(loaded.issues.as_slice(), [LoadIssue::Io(_)]));
        assert_eq!(load(&path, 10), WorldGrid::new(10));
    }

    #[test]
    fn unparseable_text_gives_empty_grid() {
        let loaded = decode("[[1, 2", 10);
        assert_eq!(loaded.grid, WorldGrid::new(10));
        assert!(matches!(loaded.issues.as_slice(), [LoadIssue::Parse(_)]));
    }

    #[test]
    fn non_array_root_gives_empty_grid() {
        let loaded = decode(r#"{"rows": [[1]]}"#, 10);
        assert_eq!(loaded.grid, WorldGrid::new(10));
        assert_eq!(loaded.issues, vec![LoadIssue::RootNotArray("an object")]);
    }

    #[test]
    fn only_whole_file_failures_are_unreadable() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(load_report(tmp.path().join("nope.json"), 10).is_unreadable());
        assert!(decode("[[1, 2", 10).is_unreadable());
        assert!(decode("7", 10).is_unreadable());

        let mut rows = vec![FULL_ROW; 10];
        rows[3] = "null";
        let damaged = decode(&rows_json(&rows), 10);
        assert!(!damaged.is_clean());
        assert!(!damaged.is_unreadable());
        assert!(!decode(&rows_json(&[FULL_ROW; 10]), 10).is_unreadable());
    }

    #[test]
    fn bad_row_is_skipped_others_load() {
        let mut rows = vec![FULL_ROW; 10];
        rows[3] = r#""not a row""#;
        let loaded = decode(&rows_json(&rows), 10);

        assert_eq!(
            loaded.issues,
            vec![LoadIssue::RowNotArray {
                row: 3,
                found: "a string"
            }]
        );
        for y in 0..10u32 {
            let row = loaded.grid.row(y).unwrap();
            if y == 3 {
                assert!(row.iter().all(|b| b.is_empty()));
            } else {
                assert_eq!(row[0], BlockId(1));
                assert_eq!(row[8], BlockId(9));
                assert_eq!(row[9], BlockId(1));
            }
        }
    }

    #[test]
    fn bad_cell_defaults_only_that_cell() {
        let mut rows = vec![FULL_ROW; 10];
        let damaged = r#"[1,2,"x",4,5,6,7,8,9,1]"#;
        rows[6] = damaged;
        let loaded = decode(&rows_json(&rows), 10);

        assert_eq!(
            loaded.issues,
            vec![LoadIssue::CellNotInteger {
                row: 6,
                col: 2,
                found: "a string"
            }]
        );
        let row = loaded.grid.row(6).unwrap();
        assert_eq!(row[1], BlockId(2));
        assert_eq!(row[2], BlockId::EMPTY);
        assert_eq!(row[3], BlockId(4));
        assert_eq!(row[9], BlockId(1));
    }

    #[test]
    fn reals_negatives_and_huge_values_are_rejected_per_cell() {
        let mut rows = vec![FULL_ROW; 10];
        rows[0] = "[1.5,-3,70000,null,5,6,7,8,9,1]";
        let loaded = decode(&rows_json(&rows), 10);
        let row = loaded.grid.row(0).unwrap();
        assert!(row[..4].iter().all(|b| b.is_empty()));
        assert_eq!(row[4], BlockId(5));
        assert_eq!(loaded.issues.len(), 4);
        assert!(matches!(
            loaded.issues[1],
            LoadIssue::CellOutOfRange { row: 0, col: 1, .. }
        ));
    }

    #[test]
    fn extra_rows_and_cells_are_ignored() {
        let loaded = decode("[[1,2,3],[4,5,6],[7,8,9]]", 2);
        assert_eq!(loaded.grid.row(0).unwrap(), &[BlockId(1), BlockId(2)]);
        assert_eq!(loaded.grid.row(1).unwrap(), &[BlockId(4), BlockId(5)]);
        assert_eq!(
            loaded.issues,
            vec![
                LoadIssue::ExtraCells { row: 0, extra: 1 },
                LoadIssue::ExtraCells { row: 1, extra: 1 },
                LoadIssue::ExtraRows { extra: 1 },
            ]
        );
    }

    #[test]
    fn short_rows_and_missing_rows_stay_zero() {
        let loaded = decode("[[3]]", 2);
        assert_eq!(loaded.grid.row(0).unwrap(), &[BlockId(3), BlockId::EMPTY]);
        assert_eq!(loaded.grid.row(1).unwrap(), &[BlockId::EMPTY, BlockId::EMPTY]);
        assert_eq!(
            loaded.issues,
            vec![
                LoadIssue::MissingCell { row: 0, col: 1 },
                LoadIssue::MissingRow { row: 1 },
            ]
        );
    }

    #[test]
    fn failed_save_reports_io_and_keeps_grid() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("missing_dir").join("world.json");
        let grid = sample_grid(4);
        let before = grid.clone();
        let err = save(&path, &grid).unwrap_err();
        assert!(matches!(err, PersistError::Io(_)));
        assert_eq!(grid, before);
        assert!(!path.exists());
    }
}
