//! External-collaborator reference implementations for the formats spec
//! §6 describes as consumed-but-not-owned by the core: the puzzle text
//! file, the puzzle-definitions properties file, and the checkpoint
//! file naming convention. None of this is exercised by the search
//! engine itself; it exists so the `solve` binary has somewhere to turn
//! a path on disk into a [`PuzzleDefinition`].

use std::collections::HashMap;
use std::path::Path;

use crate::color::{BORDER, Color};
use crate::error::SolverError;
use crate::puzzle::{FixedPiece, PuzzleDefinition};
use crate::side::Rotation;
use crate::tile::{Tile, TileId};

/// Parse a puzzle definition from the text-file format of spec §6.
///
/// `min_depth_to_show_records` is not part of the puzzle file; it is a
/// run-level knob (typically from the CLI) threaded through so callers
/// get back one fully-formed [`PuzzleDefinition`] in a single call.
///
/// # Errors
///
/// Returns [`SolverError::InvalidInput`] for any malformed header,
/// fixed-piece, or tile line, or if required headers are missing.
pub fn parse_puzzle_file(text: &str, min_depth_to_show_records: usize) -> Result<PuzzleDefinition, SolverError> {
    let mut rows = None;
    let mut cols = None;
    let mut sort_ascending = true;
    let mut prioritize_borders = true;
    let mut verbose = false;
    let mut fixed_pieces = Vec::new();
    let mut tiles: HashMap<TileId, Tile> = HashMap::new();

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix("# Dimensions:") {
            let (r, c) = parse_dimensions(rest.trim())?;
            rows = Some(r);
            cols = Some(c);
        } else if let Some(rest) = line.strip_prefix("# SortOrder:") {
            sort_ascending = parse_sort_order(rest.trim())?;
        } else if let Some(rest) = line.strip_prefix("# PrioritizeBorders:") {
            prioritize_borders = parse_flag(rest.trim(), "PrioritizeBorders")?;
        } else if let Some(rest) = line.strip_prefix("# Verbose:") {
            verbose = parse_flag(rest.trim(), "Verbose")?;
        } else if let Some(rest) = line.strip_prefix("# PieceFixePosition:") {
            fixed_pieces.push(parse_fixed_piece(rest.trim())?);
        } else if line.starts_with('#') {
            // `# Type:` and `# Difficulty:` are descriptive only; any
            // other comment line is likewise ignored, per spec §6.
            continue;
        } else {
            let (id, tile) = parse_tile_line(line)?;
            tiles.insert(id, tile);
        }
    }

    let rows = rows.ok_or_else(|| SolverError::InvalidInput("puzzle file is missing '# Dimensions:'".to_string()))?;
    let cols = cols.ok_or_else(|| SolverError::InvalidInput("puzzle file is missing '# Dimensions:'".to_string()))?;

    PuzzleDefinition::new(
        rows,
        cols,
        tiles,
        fixed_pieces,
        BORDER,
        sort_ascending,
        prioritize_borders,
        verbose,
        min_depth_to_show_records,
    )
}

/// Read and parse a puzzle file from disk.
///
/// # Errors
///
/// Returns [`SolverError::Io`] if the file cannot be read, or whatever
/// [`parse_puzzle_file`] returns for a malformed body.
pub fn load_puzzle_file(path: &Path, min_depth_to_show_records: usize) -> Result<PuzzleDefinition, SolverError> {
    let text = std::fs::read_to_string(path).map_err(|source| SolverError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_puzzle_file(&text, min_depth_to_show_records)
}

fn parse_dimensions(text: &str) -> Result<(usize, usize), SolverError> {
    let (r, c) = text
        .split_once(['x', 'X'])
        .ok_or_else(|| SolverError::InvalidInput(format!("malformed Dimensions line: {text}")))?;
    let rows = r
        .trim()
        .parse()
        .map_err(|_| SolverError::InvalidInput(format!("bad row count in Dimensions: {text}")))?;
    let cols = c
        .trim()
        .parse()
        .map_err(|_| SolverError::InvalidInput(format!("bad column count in Dimensions: {text}")))?;
    Ok((rows, cols))
}

fn parse_sort_order(text: &str) -> Result<bool, SolverError> {
    match text.to_ascii_lowercase().as_str() {
        "ascending" => Ok(true),
        "descending" => Ok(false),
        other => Err(SolverError::InvalidInput(format!("unknown SortOrder: {other}"))),
    }
}

fn parse_flag(text: &str, field: &str) -> Result<bool, SolverError> {
    match text.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(SolverError::InvalidInput(format!("{field} must be true or false, found: {other}"))),
    }
}

fn parse_fixed_piece(text: &str) -> Result<FixedPiece, SolverError> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() != 4 {
        return Err(SolverError::InvalidInput(format!("malformed PieceFixePosition line: {text}")));
    }
    let tile_id = parts[0]
        .parse()
        .map_err(|_| SolverError::InvalidInput(format!("bad tile id in: {text}")))?;
    let row: usize = parts[1]
        .parse()
        .map_err(|_| SolverError::InvalidInput(format!("bad row in: {text}")))?;
    let col: usize = parts[2]
        .parse()
        .map_err(|_| SolverError::InvalidInput(format!("bad col in: {text}")))?;
    let steps: i32 = parts[3]
        .parse()
        .map_err(|_| SolverError::InvalidInput(format!("bad rotation in: {text}")))?;
    Ok(FixedPiece {
        at: (row, col),
        tile_id,
        rotation: Rotation::from_steps(steps),
    })
}

fn parse_tile_line(line: &str) -> Result<(TileId, Tile), SolverError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 5 {
        return Err(SolverError::InvalidInput(format!("malformed tile line: {line}")));
    }
    let id: TileId = parts[0]
        .parse()
        .map_err(|_| SolverError::InvalidInput(format!("bad tile id in: {line}")))?;
    let mut edges = [0 as Color; 4];
    for (slot, token) in edges.iter_mut().zip(&parts[1..5]) {
        *slot = token
            .parse()
            .map_err(|_| SolverError::InvalidInput(format!("bad edge color in: {line}")))?;
    }
    Ok((id, Tile::new(edges[0], edges[1], edges[2], edges[3])))
}

/// The puzzle-definitions properties file of spec §6: a flat
/// `puzzle.<name>.fixedPieces = <integer>` mapping, resolved by longest
/// matching name prefix with a `puzzle.default.fixedPieces` fallback.
#[derive(Debug, Clone, Default)]
pub struct PuzzlePropertiesConfig {
    fixed_pieces_by_prefix: HashMap<String, usize>,
}

impl PuzzlePropertiesConfig {
    /// Parse the properties file body. Blank lines and lines starting
    /// with `#` are ignored; any other non-matching line is skipped
    /// rather than rejected, since this format is advisory (spec §6).
    #[must_use]
    pub fn parse(text: &str) -> PuzzlePropertiesConfig {
        let mut fixed_pieces_by_prefix = HashMap::new();
        for raw_line in text.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let Some(prefix) = key.strip_prefix("puzzle.").and_then(|rest| rest.strip_suffix(".fixedPieces")) else {
                continue;
            };
            let Ok(count) = value.trim().parse() else {
                continue;
            };
            fixed_pieces_by_prefix.insert(prefix.to_string(), count);
        }
        PuzzlePropertiesConfig { fixed_pieces_by_prefix }
    }

    /// Read and parse a properties file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Io`] if the file cannot be read.
    pub fn load(path: &Path) -> Result<PuzzlePropertiesConfig, SolverError> {
        let text = std::fs::read_to_string(path).map_err(|source| SolverError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// The configured fixed-piece count for `puzzle_name`, resolved by
    /// the longest registered prefix that `puzzle_name` starts with,
    /// falling back to `puzzle.default.fixedPieces`, then to `0`.
    #[must_use]
    pub fn fixed_pieces_for(&self, puzzle_name: &str) -> usize {
        self.fixed_pieces_by_prefix
            .iter()
            .filter(|(prefix, _)| puzzle_name.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, &count)| count)
            .or_else(|| self.fixed_pieces_by_prefix.get("default").copied())
            .unwrap_or(0)
    }
}

/// File naming conventions for checkpoints (spec §6): the directory
/// layout itself is opaque to the core, but callers need a consistent
/// way to name the current, record, and per-thread files.
pub struct CheckpointNaming;

impl CheckpointNaming {
    /// The shared "current" checkpoint name, stamped with a timestamp
    /// so successive writes don't collide if an old file lingers.
    #[must_use]
    pub fn current(puzzle_name: &str, timestamp_secs: u64) -> String {
        format!("{puzzle_name}_current_{timestamp_secs}")
    }

    /// A record checkpoint name, keyed by the depth it was taken at.
    #[must_use]
    pub fn record(puzzle_name: &str, depth: usize) -> String {
        format!("{puzzle_name}_save_{depth}")
    }

    /// A per-worker checkpoint name, keyed by thread id.
    #[must_use]
    pub fn thread(puzzle_name: &str, thread_id: usize) -> String {
        format!("{puzzle_name}_thread_{thread_id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# Type: eternity2
# Dimensions: 2x2
# Difficulty: trivial
# SortOrder: descending
# PrioritizeBorders: false
# Verbose: true
# PieceFixePosition: 1 0 0 0

1 0 5 8 0
2 0 0 6 5
3 7 0 0 8
4 6 7 0 0
";

    #[test]
    fn parses_headers_tiles_and_fixed_pieces() {
        let puzzle = parse_puzzle_file(SAMPLE, 3).expect("sample file must parse");
        assert_eq!(puzzle.rows(), 2);
        assert_eq!(puzzle.cols(), 2);
        assert!(!puzzle.sort_ascending());
        assert!(!puzzle.prioritize_borders());
        assert!(puzzle.verbose());
        assert_eq!(puzzle.tileset().len(), 4);
        assert_eq!(puzzle.fixed_pieces().len(), 1);
        assert_eq!(puzzle.fixed_pieces()[0].tile_id, 1);
        assert_eq!(puzzle.min_depth_to_show_records(), 3);
    }

    #[test]
    fn blank_and_unknown_comment_lines_are_ignored() {
        let text = SAMPLE.replace("# Difficulty: trivial", "# Difficulty: trivial\n\n# Unrelated note\n\n");
        assert!(parse_puzzle_file(&text, 0).is_ok());
    }

    #[test]
    fn missing_dimensions_header_is_rejected() {
        let text = SAMPLE.replace("# Dimensions: 2x2\n", "");
        assert!(parse_puzzle_file(&text, 0).is_err());
    }

    #[test]
    fn malformed_tile_line_is_rejected() {
        let text = SAMPLE.replace("1 0 5 8 0", "1 0 5 8");
        assert!(parse_puzzle_file(&text, 0).is_err());
    }

    #[test]
    fn properties_resolve_by_longest_matching_prefix() {
        let props = PuzzlePropertiesConfig::parse(
            "puzzle.default.fixedPieces = 0\n\
             puzzle.eternity2.fixedPieces = 1\n\
             puzzle.eternity2_p01.fixedPieces = 4\n",
        );
        assert_eq!(props.fixed_pieces_for("eternity2_p01"), 4);
        assert_eq!(props.fixed_pieces_for("eternity2_p02"), 1);
        assert_eq!(props.fixed_pieces_for("indice"), 0);
    }

    #[test]
    fn checkpoint_names_follow_the_documented_convention() {
        assert_eq!(CheckpointNaming::current("eternity2", 42), "eternity2_current_42");
        assert_eq!(CheckpointNaming::record("eternity2", 12), "eternity2_save_12");
        assert_eq!(CheckpointNaming::thread("eternity2", 3), "eternity2_thread_3");
    }
}
