#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::engine::error::SudokuError;
use crate::engine::grid::Grid;
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Failure while reading a puzzle corpus.
#[derive(Debug)]
pub enum CorpusError {
    Io(io::Error),
    Puzzle { line: usize, source: SudokuError },
}

impl fmt::Display for CorpusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Puzzle { line, source } => write!(f, "line {line}: {source}"),
        }
    }
}

impl Error for CorpusError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Puzzle { source, .. } => Some(source),
        }
    }
}

impl From<io::Error> for CorpusError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Reads a newline-delimited corpus: one 81-character puzzle per line,
/// blank lines and `#` comments skipped. Errors carry the 1-based line
/// number of the offending puzzle.
pub fn parse_corpus<R: BufRead>(reader: R) -> Result<Vec<Grid>, CorpusError> {
    let mut grids = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let grid = Grid::from_text(trimmed).map_err(|source| CorpusError::Puzzle {
            line: idx + 1,
            source,
        })?;
        grids.push(grid);
    }
    Ok(grids)
}

pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Grid>, CorpusError> {
    let file = File::open(path)?;
    parse_corpus(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_corpus() {
        let input = "\
# two easy puzzles
974236158638591742125487936316754289742918563589362417867125394253649871491873625

2564891733746159829817234565932748617128.6549468591327635147298127958634849362715
";
        let grids = parse_corpus(Cursor::new(input)).unwrap();
        assert_eq!(grids.len(), 2);
        assert_eq!(grids[0].givens(), 81);
        assert_eq!(grids[1].givens(), 80);
    }

    #[test]
    fn test_bad_line_reported_with_number() {
        let input = "# header\n\nshort line\n";
        let err = parse_corpus(Cursor::new(input)).unwrap_err();
        match err {
            CorpusError::Puzzle { line, .. } => assert_eq!(line, 3),
            CorpusError::Io(_) => panic!("expected a puzzle error"),
        }
    }

    #[test]
    fn test_empty_corpus() {
        let grids = parse_corpus(Cursor::new("# nothing here\n")).unwrap();
        assert!(grids.is_empty());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            parse_file("/no/such/corpus.sdk"),
            Err(CorpusError::Io(_))
        ));
    }
}
