//! Save a checkpoint to disk, reload it, and reconstruct the board/used
//! set/history from it, demonstrating the round-trip that lets a solve
//! resume after an interruption (spec §3/§6).

use std::collections::HashMap;

use eternity_solver::{
    BORDER, Checkpoint, CheckpointStore, PlacementInfo, Rotation, Tile, TileSet,
};

fn main() {
    let tileset = TileSet::new(vec![
        Tile::new(BORDER, 1, BORDER, BORDER),
        Tile::new(BORDER, BORDER, BORDER, 1),
    ]);

    let p0 = PlacementInfo::new((0, 0), 1, Rotation::Rot0);
    let p1 = PlacementInfo::new((0, 1), 2, Rotation::Rot0);
    let mut placements_by_cell = HashMap::new();
    placements_by_cell.insert(p0.coord(), p0);
    placements_by_cell.insert(p1.coord(), p1);

    let checkpoint = Checkpoint {
        puzzle_name: "demo".to_string(),
        rows: 1,
        cols: 2,
        placements_by_cell,
        placement_order: vec![p0, p1],
        unused_tile_ids: vec![],
        num_fixed_pieces: 0,
        initial_fixed_pieces: vec![],
        progress_percent: 100.0,
        elapsed_ms_this_session: 42,
        cumulative_compute_ms: 42,
    };

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("demo_current");

    CheckpointStore::save(&checkpoint, &path).expect("save must succeed");
    println!("wrote checkpoint to {}", path.display());

    let loaded = CheckpointStore::load(&path).expect("load must succeed");
    assert_eq!(loaded, checkpoint);
    println!("reloaded checkpoint matches what was written");

    let (board, used, history) = loaded.reconstruct(&tileset).expect("reconstruct must succeed");
    let (matched, max) = board.calculate_score();
    println!(
        "reconstructed board: {matched}/{max} edges matched, {} tiles used, {} history entries",
        used.cardinality(),
        history.len()
    );
}
