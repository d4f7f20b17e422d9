//! Edge-list input: one `entity1 entity2` integer pair per line.
//!
//! Tokens may be separated by whitespace, `,` or `;`. Blank lines and lines
//! starting with `#` are skipped; a trailing `# ...` comment is stripped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{GraphError, Result};

/// Read an edge list from `path`.
pub fn read_edge_list(path: &Path) -> Result<Vec<(i64, i64)>> {
    let file = File::open(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let edges = parse_edge_list(BufReader::new(file)).map_err(|e| match e {
        GraphError::Io { source, .. } => GraphError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    tracing::debug!(path = %path.display(), edges = edges.len(), "edge list read");
    Ok(edges)
}

/// Parse an edge list from any buffered reader.
///
/// Every data line must hold exactly two integer columns. Returns
/// [`GraphError::EmptyEdgeList`] if no data line is found.
pub fn parse_edge_list<R: BufRead>(reader: R) -> Result<Vec<(i64, i64)>> {
    let mut edges = Vec::new();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| GraphError::Io {
            path: Default::default(),
            source,
        })?;
        let data = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line.as_str(),
        };

        let tokens: Vec<&str> = data
            .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.is_empty() {
            continue;
        }
        if tokens.len() != 2 {
            return Err(GraphError::Parse {
                line: lineno + 1,
                message: format!("expected 2 columns, found {}", tokens.len()),
            });
        }

        let u = parse_id(tokens[0], lineno + 1)?;
        let v = parse_id(tokens[1], lineno + 1)?;
        edges.push((u, v));
    }

    if edges.is_empty() {
        return Err(GraphError::EmptyEdgeList);
    }
    Ok(edges)
}

fn parse_id(token: &str, line: usize) -> Result<i64> {
    token.parse::<i64>().map_err(|e| GraphError::Parse {
        line,
        message: format!("invalid integer {token:?}: {e}"),
    })
}
