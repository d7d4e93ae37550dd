//! Map snapshot round-trips through a running simulation.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use rand::SeedableRng;
use rand::rngs::StdRng;
use survivalbox_core::{Simulation, SimulationConfig, SimulationError};
use survivalbox_types::{AgentAction, TileType};
use survivalbox_world::{MapMeta, MapSnapshot, WorldError};

fn config(seed: u64) -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.world.width = 32;
    config.world.height = 24;
    config.world.water_percentage = 0.35;
    config.world.seed = seed;
    config
}

#[test]
fn generated_map_survives_json_roundtrip() {
    let sim = Simulation::new(config(24)).expect("valid config");
    let snapshot = sim.map_snapshot();
    let json = snapshot.to_json().expect("encode");
    let decoded = MapSnapshot::from_json(&json).expect("decode");

    assert_eq!(decoded, snapshot);
    assert_eq!(decoded.stats, sim.terrain_stats());
    assert_eq!(decoded.stats.total, decoded.stats.check);
    assert_eq!(decoded.restore().expect("restore"), *sim.tiles());
}

#[test]
fn height_fields_roundtrip_exactly_across_seeds() {
    let meta = MapMeta {
        width: 40,
        height: 40,
        water_percentage: 0.4,
        tile_size: 4,
    };
    for seed in 0..20 {
        let snapshot =
            MapSnapshot::generate(meta, 8, &mut StdRng::seed_from_u64(seed)).expect("generate");
        let decoded = MapSnapshot::from_json(&snapshot.to_json().expect("encode")).expect("decode");
        assert_eq!(decoded.height_field, snapshot.height_field, "seed {seed}");
    }
}

#[test]
fn loading_a_map_replaces_terrain_and_dimensions() {
    let source = Simulation::new(config(5)).expect("valid config");
    let mut target = Simulation::new(SimulationConfig::default()).expect("valid config");

    target.load_map(source.map_snapshot()).expect("load");

    assert_eq!(target.config().world.width, 32);
    assert_eq!(target.config().world.height, 24);
    assert_eq!(target.terrain_stats(), source.terrain_stats());
    assert_eq!(target.tiles(), source.tiles());
    assert_eq!(target.ticks(), 0);
}

#[test]
fn snapshot_captures_eaten_grass() {
    let mut sim = Simulation::new(config(9)).expect("valid config");
    for _ in 0..20 {
        sim.step(&[AgentAction::MoveForward, AgentAction::StrafeLeft])
            .expect("tick");
    }
    let snapshot = sim.map_snapshot();
    let mud = snapshot
        .tile_types
        .iter()
        .filter(|(_, t)| *t == TileType::Mud)
        .count();
    assert_eq!(mud, sim.tiles().count(TileType::Mud));

    // Restoring always starts from the generated terrain.
    let restored = snapshot.restore().expect("restore");
    assert_eq!(restored.count(TileType::Mud), 0);
}

#[test]
fn map_file_roundtrip() {
    let sim = Simulation::new(config(13)).expect("valid config");
    let path = std::env::temp_dir().join(format!("survivalbox-map-{}.json", std::process::id()));
    sim.save_map(&path).expect("save");

    let mut other = Simulation::new(config(99)).expect("valid config");
    other.load_map_file(&path).expect("load");
    std::fs::remove_file(&path).expect("cleanup");

    assert_eq!(other.tiles(), sim.tiles());
}

#[test]
fn tampered_snapshot_is_rejected() {
    let mut sim = Simulation::new(config(3)).expect("valid config");
    let mut snapshot = sim.map_snapshot();
    snapshot.stats.grass += 1;
    let result = sim.load_map(snapshot);
    assert!(matches!(
        result,
        Err(SimulationError::World(WorldError::SnapshotMismatch { .. }))
    ));
}

#[test]
fn missing_map_file_is_an_io_error() {
    let mut sim = Simulation::new(config(3)).expect("valid config");
    let result = sim.load_map_file(std::path::Path::new("/nonexistent/survivalbox.json"));
    assert!(matches!(result, Err(SimulationError::Io { .. })));
}
