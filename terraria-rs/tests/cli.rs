//! CLI integration tests
//!
//! These run the `terraria-rs` binary against worlds written into a
//! temporary directory.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use terraria_wld::{
    Block, Chest, FramedTiles, ItemStack, Liquid, LiquidKind, Sign, Tile, Wall, World, WorldFile,
};

fn terraria_rs() -> Command {
    let mut cmd = Command::cargo_bin("terraria-rs").unwrap();
    cmd.env_remove("TERRARIA_WORLDS");
    cmd
}

/// A small world with terrain, a chest and a sign.
fn sample_world() -> World {
    let mut world = World::new(50, 30, FramedTiles::from_ids(314, [21])).unwrap();
    world.metadata.title = "Test World".to_string();
    world.metadata.world_id = 4242;
    world.metadata.ground_level = 10.0;
    world.metadata.rock_level = 20.0;
    world.metadata.killed_mobs = vec![0, 60, 7];

    for x in 0..50 {
        for y in 12..30 {
            let tile = Tile::default()
                .with_block(Block::new(if y < 15 { 0 } else { 1 }))
                .with_wall(Wall::new(2));
            world.set_tile(x, y, tile).unwrap();
        }
    }
    world
        .set_tile(5, 5, Tile::default().with_liquid(Liquid::new(LiquidKind::Water, 255)))
        .unwrap();
    world.set_tile(7, 17, Tile::default().with_block(Block::new(63))).unwrap();

    for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        let block = Block::framed(21, dx * 18, dy * 18);
        world
            .set_tile(20 + u32::from(dx), 10 + u32::from(dy), Tile::default().with_block(block))
            .unwrap();
    }

    let mut chest = Chest::new(20, 10, world.chest_slots);
    chest.name = "Loot".to_string();
    chest.items[0] = Some(ItemStack::new(73, 12));
    world.chests.push(chest);
    world.signs.push(Sign::new(3, 11, "Welcome"));
    world
}

fn write_world(dir: &Path, file: &str, world: &World) -> PathBuf {
    let path = dir.join(file);
    fs::write(&path, WorldFile::new().encode(world).unwrap()).unwrap();
    path
}

fn setup() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = write_world(temp.path(), "test.wld", &sample_world());
    (temp, path)
}

#[test]
fn test_help() {
    terraria_rs()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Terraria world files"));
}

#[test]
fn test_list() {
    let (temp, _) = setup();
    terraria_rs()
        .args(["list", "--dir"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Test World"))
        .stdout(predicate::str::contains("4242"));
}

#[test]
fn test_info_resolves_by_title_through_env() {
    let (temp, _) = setup();
    terraria_rs()
        .env("TERRARIA_WORLDS", temp.path())
        .args(["info", "Test World", "--pointers"])
        .assert()
        .success()
        .stdout(predicate::str::contains("50 x 30 tiles"))
        .stdout(predicate::str::contains("tiles"))
        .stdout(predicate::str::contains("footer"));
}

#[test]
fn test_verbose_enables_debug_logging() {
    let (_temp, path) = setup();
    terraria_rs()
        .env_remove("RUST_LOG")
        .arg("-vv")
        .arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"))
        .stderr(predicate::str::contains("reading tiles section"));
}

#[test]
fn test_default_log_level_hides_debug() {
    let (_temp, path) = setup();
    terraria_rs()
        .env_remove("RUST_LOG")
        .arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("reading tiles section").not());
}

#[test]
fn test_info_flags() {
    let (_temp, path) = setup();
    terraria_rs()
        .arg("info")
        .arg(&path)
        .arg("--flags")
        .assert()
        .success()
        .stdout(predicate::str::contains("WorldId"))
        .stdout(predicate::str::contains("KilledMobs"));
}

#[cfg(feature = "serde")]
#[test]
fn test_info_json() {
    let (_temp, path) = setup();
    let output = terraria_rs()
        .arg("info")
        .arg(&path)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["metadata"]["title"], "Test World");
    assert_eq!(json["chests"], 1);
}

#[test]
fn test_kills() {
    let (_temp, path) = setup();
    terraria_rs()
        .arg("kills")
        .arg(&path)
        .args(["--sort", "count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("60"))
        .stdout(predicate::str::contains("2 of 3 counters shown"));
}

#[test]
fn test_counts_gems() {
    let (_temp, path) = setup();
    terraria_rs()
        .arg("counts")
        .arg(&path)
        .arg("--gems")
        .assert()
        .success()
        .stdout(predicate::str::contains("63 Sapphire"))
        .stdout(predicate::str::contains("Total: 1"));
}

#[test]
fn test_find_csv() {
    let (_temp, path) = setup();
    terraria_rs()
        .arg("find")
        .arg(&path)
        .args(["-e", "Containers;0;0", "--csv"])
        .assert()
        .success()
        .stdout(predicate::eq("Tile,X,Y\n21,20,10\n"));
}

#[test]
fn test_find_syntax_error() {
    let (_temp, path) = setup();
    terraria_rs()
        .arg("find")
        .arg(&path)
        .args(["-e", "1;2;3;4;5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at most 4"));
}

#[test]
fn test_contents_chests() {
    let (_temp, path) = setup();
    terraria_rs()
        .arg("contents")
        .arg(&path)
        .arg("--chests")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Loot\""))
        .stdout(predicate::str::contains("12 x Gold Coin"))
        .stdout(predicate::str::contains("Welcome").not());
}

#[test]
fn test_objects() {
    let (_temp, path) = setup();
    terraria_rs()
        .arg("objects")
        .arg(&path)
        .args(["--id", "containers"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2x2"))
        .stdout(predicate::str::contains("1 object(s)"));
}

#[test]
fn test_render() {
    let (temp, path) = setup();
    let output = temp.path().join("map.png");
    terraria_rs()
        .arg("render")
        .arg(&path)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let image = image::open(&output).unwrap();
    assert_eq!((image.width(), image.height()), (50, 30));
}

#[test]
fn test_validate() {
    let (_temp, path) = setup();
    terraria_rs()
        .arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("✓"));
}

#[test]
fn test_validate_reports_error_kind() {
    let (temp, path) = setup();
    let mut bytes = fs::read(&path).unwrap();
    bytes.truncate(bytes.len() - 3);
    let broken = temp.path().join("broken.wld");
    fs::write(&broken, bytes).unwrap();

    terraria_rs()
        .arg("validate")
        .arg(&broken)
        .assert()
        .failure()
        .stderr(predicate::str::contains("OutOfBounds"));
}

#[test]
fn test_rewrite_round_trip() {
    let (temp, path) = setup();
    let output = temp.path().join("copy.wld");
    terraria_rs()
        .arg("rewrite")
        .arg(&path)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Rewrote"));

    assert_eq!(fs::read(&path).unwrap(), fs::read(&output).unwrap());
}

#[test]
fn test_rewrite_to_older_version() {
    let (temp, _) = setup();
    let mut world = sample_world();
    world.metadata.killed_mobs.clear();
    let path = write_world(temp.path(), "plain.wld", &world);
    let output = temp.path().join("old.wld");

    terraria_rs()
        .arg("rewrite")
        .arg(&path)
        .arg("-o")
        .arg(&output)
        .args(["--format-version", "120"])
        .assert()
        .success();

    let decoded = WorldFile::new().decode(fs::read(&output).unwrap()).unwrap();
    assert_eq!(decoded.version().number(), 120);
    assert_eq!(decoded.chests, world.chests);
}

#[test]
fn test_unknown_world() {
    let temp = TempDir::new().unwrap();
    terraria_rs()
        .args(["info", "Nowhere", "--dir"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No world matching"));
}

#[test]
fn test_completions() {
    terraria_rs()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("terraria-rs"));
}
