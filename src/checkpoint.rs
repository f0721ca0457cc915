//! Checkpoint format: serialize/deserialize a stable search state, with
//! the round-trip invariants of spec §3 and the atomic-write discipline
//! of spec §6/§7 (a corrupt checkpoint is logged and discarded, never
//! trusted).

use std::collections::HashMap;
use std::fs;
use std::io::Write as _;
use std::path::Path;

use crate::board::{Board, Coord};
use crate::error::SolverError;
use crate::history::{History, PlacementInfo};
use crate::placement::Placement;
use crate::side::Rotation;
use crate::tile::TileId;
use crate::tileset::TileSet;
use crate::used_set::PieceUsedSet;

/// A fully self-describing, serializable search state (spec §3).
#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint {
    /// Name of the puzzle this checkpoint belongs to.
    pub puzzle_name: String,
    /// Board row count.
    pub rows: usize,
    /// Board column count.
    pub cols: usize,
    /// Every currently placed cell, keyed by coordinate.
    pub placements_by_cell: HashMap<Coord, PlacementInfo>,
    /// The order placements were made in (also the undo order).
    pub placement_order: Vec<PlacementInfo>,
    /// Tile ids not yet placed.
    pub unused_tile_ids: Vec<TileId>,
    /// How many leading entries of `placement_order` are pre-fixed
    /// pieces rather than search-discovered placements.
    pub num_fixed_pieces: usize,
    /// The pre-fixed pieces themselves, in order.
    pub initial_fixed_pieces: Vec<PlacementInfo>,
    /// Estimated completion percentage at the time of the snapshot.
    pub progress_percent: f64,
    /// Wall-clock time spent in the session that wrote this checkpoint.
    pub elapsed_ms_this_session: u64,
    /// Total compute time across this and all prior sessions.
    pub cumulative_compute_ms: u64,
}

impl Checkpoint {
    /// Check every invariant spec §3 lists for a checkpoint, given the
    /// total tile count of the puzzle it belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::CorruptCheckpoint`]-worthy detail as an
    /// `Err(String)` describing the first invariant violated; callers
    /// wrap this into the full error with the file path.
    pub fn validate(&self, total_tiles: usize) -> Result<(), String> {
        if self.placement_order.len() != self.placements_by_cell.len() {
            return Err(format!(
                "placementOrder has {} entries but placementsByCell has {}",
                self.placement_order.len(),
                self.placements_by_cell.len()
            ));
        }

        for entry in &self.placement_order {
            match self.placements_by_cell.get(&entry.coord()) {
                Some(stored) if stored == entry => {}
                Some(_) => {
                    return Err(format!(
                        "placementOrder entry at {:?} does not match placementsByCell",
                        entry.coord()
                    ));
                }
                None => {
                    return Err(format!(
                        "placementOrder entry at {:?} has no placementsByCell counterpart",
                        entry.coord()
                    ));
                }
            }
        }

        if self.num_fixed_pieces > self.placement_order.len() {
            return Err("numFixedPieces exceeds the recorded placement order".to_string());
        }
        if self.initial_fixed_pieces.len() != self.num_fixed_pieces {
            return Err("initialFixedPieces length does not match numFixedPieces".to_string());
        }
        if self.placement_order[..self.num_fixed_pieces] != self.initial_fixed_pieces[..] {
            return Err("placementOrder's prefix does not match initialFixedPieces".to_string());
        }

        let mut seen: Vec<bool> = vec![false; total_tiles + 1];
        for &id in &self.unused_tile_ids {
            if id == 0 || id as usize > total_tiles {
                return Err(format!("unused tile id {id} out of range"));
            }
            if std::mem::replace(&mut seen[id as usize], true) {
                return Err(format!("tile id {id} listed twice in unusedTileIds"));
            }
        }
        for entry in self.placements_by_cell.values() {
            let id = entry.tile_id;
            if id == 0 || id as usize > total_tiles {
                return Err(format!("placed tile id {id} out of range"));
            }
            if std::mem::replace(&mut seen[id as usize], true) {
                return Err(format!("tile id {id} is both placed and unused, or placed twice"));
            }
        }
        if seen[1..].iter().any(|&was_seen| !was_seen) {
            return Err("unusedTileIds and placed tiles do not cover every tile id".to_string());
        }

        Ok(())
    }

    /// Rebuild the board, used-set, and history this checkpoint
    /// describes, validating every invariant first.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::CorruptCheckpoint`] if any invariant fails.
    pub fn reconstruct(
        &self,
        tileset: &TileSet,
    ) -> Result<(Board, PieceUsedSet, History), SolverError> {
        self.validate(tileset.len()).map_err(|reason| SolverError::CorruptCheckpoint {
            path: self.puzzle_name.clone().into(),
            reason,
        })?;

        let mut board = Board::new(self.rows, self.cols);
        let mut used = PieceUsedSet::new(tileset.len());
        for entry in &self.placement_order {
            let tile = tileset.get(entry.tile_id);
            board.place(entry.coord(), Placement::new(entry.tile_id, tile, entry.rotation));
            used.insert(entry.tile_id);
        }
        let history = History::from_entries(self.placement_order.clone());
        Ok((board, used, history))
    }
}

/// Reads and writes [`Checkpoint`]s in the line-oriented text format of
/// spec §6, with atomic (temp-file + rename) writes so a crash mid-write
/// never leaves a half-written file behind.
pub struct CheckpointStore;

impl CheckpointStore {
    /// Serialize `checkpoint` and atomically replace the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Io`] if the temp file cannot be written or
    /// the rename fails. Per spec §7, callers should log and continue
    /// rather than treat this as fatal.
    pub fn save(checkpoint: &Checkpoint, path: &Path) -> Result<(), SolverError> {
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|source| SolverError::Io { path: dir.to_path_buf(), source })?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .map_err(|source| SolverError::Io { path: dir.to_path_buf(), source })?;
        let text = Self::render(checkpoint);
        tmp.write_all(text.as_bytes())
            .map_err(|source| SolverError::Io { path: path.to_path_buf(), source })?;
        tmp.persist(path)
            .map_err(|e| SolverError::Io { path: path.to_path_buf(), source: e.error })?;
        Ok(())
    }

    /// Read and parse the checkpoint at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Io`] if the file cannot be read, or
    /// [`SolverError::CorruptCheckpoint`] if it does not parse as the
    /// expected format. Callers should treat a corrupt checkpoint as
    /// "start fresh" rather than propagate the error further (spec §7).
    pub fn load(path: &Path) -> Result<Checkpoint, SolverError> {
        let text = fs::read_to_string(path).map_err(|source| SolverError::Io { path: path.to_path_buf(), source })?;
        Self::parse(&text).map_err(|reason| SolverError::CorruptCheckpoint {
            path: path.to_path_buf(),
            reason,
        })
    }

    fn render(c: &Checkpoint) -> String {
        let mut out = String::new();
        out.push_str("# Checkpoint\n");
        out.push_str(&format!("puzzleName: {}\n", c.puzzle_name));
        out.push_str(&format!("rows: {}\n", c.rows));
        out.push_str(&format!("cols: {}\n", c.cols));
        out.push_str(&format!("depth: {}\n", c.placement_order.len()));
        out.push_str(&format!("progressPercent: {}\n", c.progress_percent));
        out.push_str(&format!("elapsedMs: {}\n", c.elapsed_ms_this_session));
        out.push_str(&format!("cumulativeComputeMs: {}\n", c.cumulative_compute_ms));
        out.push_str(&format!("numFixedPieces: {}\n", c.num_fixed_pieces));

        out.push_str("# Placements\n");
        // Deterministic order so byte-identical round trips are possible.
        let mut cells: Vec<&PlacementInfo> = c.placements_by_cell.values().collect();
        cells.sort_by_key(|p| (p.row, p.col));
        for p in cells {
            out.push_str(&Self::render_entry(p));
        }

        out.push_str("# PlacementOrder\n");
        for p in &c.placement_order {
            out.push_str(&Self::render_entry(p));
        }

        out.push_str("# UnusedPieces\n");
        let ids: Vec<String> = c.unused_tile_ids.iter().map(ToString::to_string).collect();
        out.push_str(&ids.join(" "));
        out.push('\n');

        out
    }

    fn render_entry(p: &PlacementInfo) -> String {
        format!("{} {} {} {}\n", p.row, p.col, p.tile_id, p.rotation.steps())
    }

    fn parse(text: &str) -> Result<Checkpoint, String> {
        let mut lines = text.lines();

        let header_line = |lines: &mut std::str::Lines, key: &str| -> Result<String, String> {
            let line = lines.next().ok_or_else(|| format!("checkpoint truncated before {key}"))?;
            let (found_key, value) = line
                .split_once(':')
                .ok_or_else(|| format!("malformed header line: {line}"))?;
            if found_key.trim() != key {
                return Err(format!("expected header {key}, found {found_key}"));
            }
            Ok(value.trim().to_string())
        };

        if lines.next() != Some("# Checkpoint") {
            return Err("missing '# Checkpoint' header".to_string());
        }
        let puzzle_name = header_line(&mut lines, "puzzleName")?;
        let rows = header_line(&mut lines, "rows")?
            .parse()
            .map_err(|_| "rows is not an integer".to_string())?;
        let cols = header_line(&mut lines, "cols")?
            .parse()
            .map_err(|_| "cols is not an integer".to_string())?;
        let _depth: usize = header_line(&mut lines, "depth")?
            .parse()
            .map_err(|_| "depth is not an integer".to_string())?;
        let progress_percent = header_line(&mut lines, "progressPercent")?
            .parse()
            .map_err(|_| "progressPercent is not a number".to_string())?;
        let elapsed_ms_this_session = header_line(&mut lines, "elapsedMs")?
            .parse()
            .map_err(|_| "elapsedMs is not an integer".to_string())?;
        let cumulative_compute_ms = header_line(&mut lines, "cumulativeComputeMs")?
            .parse()
            .map_err(|_| "cumulativeComputeMs is not an integer".to_string())?;
        let num_fixed_pieces = header_line(&mut lines, "numFixedPieces")?
            .parse()
            .map_err(|_| "numFixedPieces is not an integer".to_string())?;

        if lines.next() != Some("# Placements") {
            return Err("missing '# Placements' section".to_string());
        }
        let mut placements_by_cell = HashMap::new();
        let mut rest: Vec<&str> = lines.collect();
        let mut idx = 0;
        while idx < rest.len() && rest[idx] != "# PlacementOrder" {
            let entry = Self::parse_entry(rest[idx])?;
            placements_by_cell.insert(entry.coord(), entry);
            idx += 1;
        }
        if idx >= rest.len() {
            return Err("missing '# PlacementOrder' section".to_string());
        }
        idx += 1;

        let mut placement_order = Vec::new();
        while idx < rest.len() && rest[idx] != "# UnusedPieces" {
            placement_order.push(Self::parse_entry(rest[idx])?);
            idx += 1;
        }
        if idx >= rest.len() {
            return Err("missing '# UnusedPieces' section".to_string());
        }
        idx += 1;

        let unused_tile_ids = if idx < rest.len() && !rest[idx].trim().is_empty() {
            rest[idx]
                .split_whitespace()
                .map(|tok| tok.parse().map_err(|_| format!("bad unused tile id: {tok}")))
                .collect::<Result<Vec<TileId>, String>>()?
        } else {
            Vec::new()
        };
        rest.clear();

        let initial_fixed_pieces = placement_order.get(..num_fixed_pieces).map(<[_]>::to_vec).unwrap_or_default();

        Ok(Checkpoint {
            puzzle_name,
            rows,
            cols,
            placements_by_cell,
            placement_order,
            unused_tile_ids,
            num_fixed_pieces,
            initial_fixed_pieces,
            progress_percent,
            elapsed_ms_this_session,
            cumulative_compute_ms,
        })
    }

    fn parse_entry(line: &str) -> Result<PlacementInfo, String> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 4 {
            return Err(format!("malformed placement line: {line}"));
        }
        let row = parts[0].parse().map_err(|_| format!("bad row in: {line}"))?;
        let col = parts[1].parse().map_err(|_| format!("bad col in: {line}"))?;
        let tile_id = parts[2].parse().map_err(|_| format!("bad tile id in: {line}"))?;
        let steps: i32 = parts[3].parse().map_err(|_| format!("bad rotation in: {line}"))?;
        Ok(PlacementInfo::new((row, col), tile_id, Rotation::from_steps(steps)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BORDER;
    use crate::tile::Tile;

    fn sample_checkpoint() -> Checkpoint {
        let mut placements_by_cell = HashMap::new();
        let p1 = PlacementInfo::new((0, 0), 1, Rotation::Rot0);
        let p2 = PlacementInfo::new((0, 1), 2, Rotation::Rot90);
        placements_by_cell.insert(p1.coord(), p1);
        placements_by_cell.insert(p2.coord(), p2);
        Checkpoint {
            puzzle_name: "demo".to_string(),
            rows: 1,
            cols: 2,
            placements_by_cell,
            placement_order: vec![p1, p2],
            unused_tile_ids: vec![],
            num_fixed_pieces: 1,
            initial_fixed_pieces: vec![p1],
            progress_percent: 50.0,
            elapsed_ms_this_session: 1234,
            cumulative_compute_ms: 5678,
        }
    }

    #[test]
    fn valid_checkpoint_passes_all_invariants() {
        assert!(sample_checkpoint().validate(2).is_ok());
    }

    #[test]
    fn mismatched_placement_order_length_is_rejected() {
        let mut checkpoint = sample_checkpoint();
        checkpoint.placement_order.pop();
        assert!(checkpoint.validate(2).is_err());
    }

    #[test]
    fn fixed_piece_prefix_mismatch_is_rejected() {
        let mut checkpoint = sample_checkpoint();
        checkpoint.initial_fixed_pieces = vec![PlacementInfo::new((9, 9), 9, Rotation::Rot0)];
        assert!(checkpoint.validate(2).is_err());
    }

    #[test]
    fn double_counted_tile_id_is_rejected() {
        let mut checkpoint = sample_checkpoint();
        checkpoint.unused_tile_ids = vec![1];
        assert!(checkpoint.validate(2).is_err());
    }

    #[test]
    fn render_then_parse_round_trips_byte_identically() {
        let checkpoint = sample_checkpoint();
        let text = CheckpointStore::render(&checkpoint);
        let parsed = CheckpointStore::parse(&text).expect("valid checkpoint text must parse");
        let text_again = CheckpointStore::render(&parsed);
        assert_eq!(text, text_again);
        assert_eq!(parsed, checkpoint);
    }

    #[test]
    fn save_then_load_round_trips_through_the_filesystem() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("puzzle_current");
        let checkpoint = sample_checkpoint();
        CheckpointStore::save(&checkpoint, &path).expect("save must succeed");
        let loaded = CheckpointStore::load(&path).expect("load must succeed");
        assert_eq!(loaded, checkpoint);
    }

    #[test]
    fn truncated_file_is_reported_as_corrupt() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken");
        fs::write(&path, "# Checkpoint\npuzzleName: x\n").unwrap();
        let result = CheckpointStore::load(&path);
        assert!(matches!(result, Err(SolverError::CorruptCheckpoint { .. })));
    }

    #[test]
    fn reconstruct_rebuilds_board_used_and_history() {
        let tileset = TileSet::new(vec![
            Tile::new(BORDER, 1, BORDER, BORDER),
            Tile::new(BORDER, BORDER, BORDER, 1),
        ]);
        let checkpoint = sample_checkpoint();
        let (board, used, history) = checkpoint.reconstruct(&tileset).expect("reconstruct must succeed");
        assert_eq!(used.cardinality(), 2);
        assert!(!board.is_empty((0, 0)));
        assert!(!board.is_empty((0, 1)));
        assert_eq!(history.len(), 2);
    }
}
