//! Integration tests for the query engine.
//!
//! These tests verify the complete import and query flows:
//! - Import → RecordStore → name index and spatial index
//! - Name, coordinate and rectangle queries returning the imported text
//! - Buffer pool behaviour seen through the engine
//! - Configuration driving engine sizing
//!
//! Run with: `cargo test --test engine_integration`

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use gisdb::config::ConfigFile;
use gisdb::engine::{EngineConfig, EngineError, QueryEngine, Structure};
use gisdb::store::HEADER;

// ============================================================================
// Test Helpers
// ============================================================================

const HIGHLAND: &[&str] = &[
    "1481345|Asbury Church|Church|VA|51|Highland|091|382607N|0793312W|38.4353981|-79.5533807|||||818|2684|Snowy Mountain|09/28/1979|",
    "1481852|Blue Grass|Populated Place|VA|51|Highland|091|383000N|0793259W|38.5001188|-79.5497702|||||770|2526|Hightown|09/28/1979|",
    "1482110|Bolar|Populated Place|VA|51|Highland|091|381902N|0794052W|38.3173492|-79.6811601|||||682|2238|Bolar|09/28/1979|",
    "1482324|Buck Hill|Summit|VA|51|Highland|091|381556N|0793807W|38.2656700|-79.6353339|||||1037|3402|Bolar|09/28/1979|",
    "1483018|Crab Run|Stream|VA|51|Highland|091|382006N|0793608W|38.3350913|-79.6022787|||||585|1919|Monterey SE|09/28/1979|",
    "1483492|Monterey|Populated Place|VA|51|Highland|091|382443N|0793452W|38.4120661|-79.5811570|||||879|2884|Monterey|09/28/1979|",
    "1484015|Monterey|Post Office|VA|51|Highland|091|382443N|0793452W|38.4120661|-79.5811570|||||879|2884|Monterey|01/01/1995|",
    "1484500|Unplaced Spring|Spring|VA|51|Highland|091|Unknown|Unknown||||||||||",
];

struct Fixture {
    _temp: TempDir,
    dir: PathBuf,
    engine: QueryEngine,
}

impl Fixture {
    fn new(config: &EngineConfig) -> Self {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().to_path_buf();
        let engine = QueryEngine::create(dir.join("db.txt"), config).unwrap();
        Self {
            _temp: temp,
            dir,
            engine,
        }
    }

    fn write_import(&self, name: &str, lines: &[&str]) -> PathBuf {
        write_import(&self.dir, name, lines)
    }

    fn highland_world(&mut self) {
        self.engine
            .world("0794500W", "0792000W", "381500N", "383500N");
    }
}

fn write_import(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut contents = format!("{}\n", HEADER);
    for line in lines {
        contents.push_str(line);
        contents.push('\n');
    }
    std::fs::write(&path, contents).unwrap();
    path
}

fn texts(results: &gisdb::engine::QueryResult) -> Vec<&str> {
    results.values().map(String::as_str).collect()
}

// ============================================================================
// Import and round trips
// ============================================================================

#[test]
fn test_import_then_query_returns_imported_text() {
    let mut fx = Fixture::new(&EngineConfig::default());
    fx.highland_world();
    let import = fx.write_import("highland.txt", HIGHLAND);

    let stats = fx.engine.import(&import).unwrap();
    assert_eq!(stats.records, 8);
    assert_eq!(stats.name_entries, 7);
    assert_eq!(stats.locations, 6);
    assert_eq!(stats.out_of_bounds, 1);

    for line in &HIGHLAND[..6] {
        let fields: Vec<&str> = line.split('|').collect();

        let by_name = fx.engine.what_is(fields[1], fields[3]).unwrap();
        assert!(texts(&by_name).contains(line), "{} not found by name", fields[1]);

        let by_coord = fx.engine.what_is_at(fields[7], fields[8]).unwrap();
        assert!(texts(&by_coord).contains(line), "{} not found by coordinate", fields[1]);

        let by_box = fx.engine.what_is_in(fields[7], fields[8], 0, 0).unwrap();
        assert!(texts(&by_box).contains(line), "{} not found by rectangle", fields[1]);
    }
}

#[test]
fn test_offsets_are_byte_positions_in_the_store() {
    let mut fx = Fixture::new(&EngineConfig::default());
    fx.highland_world();
    let import = fx.write_import("highland.txt", HIGHLAND);
    fx.engine.import(&import).unwrap();

    let contents = std::fs::read_to_string(fx.engine.store().path()).unwrap();
    let results = fx.engine.what_is("Bolar", "VA").unwrap();
    let (offset, text) = results.iter().next().unwrap();

    let offset = *offset as usize;
    assert_eq!(&contents[offset..offset + text.len()], text);
    assert_eq!(&contents[offset - 1..offset], "\n");
}

#[test]
fn test_shared_name_returns_both_records_in_order() {
    let mut fx = Fixture::new(&EngineConfig::default());
    fx.highland_world();
    let first = "10|Springfield|Populated Place|VA|51|Highland|091|382000N|0793000W||||||||||";
    let second = "11|Springfield|Populated Place|VA|51|Highland|091|382500N|0794000W||||||||||";
    let import = fx.write_import("springfield.txt", &[first, second]);
    fx.engine.import(&import).unwrap();

    let results = fx.engine.what_is("Springfield", "VA").unwrap();
    assert_eq!(texts(&results), vec![first, second]);
}

#[test]
fn test_shared_coordinate_returns_both_records() {
    let mut fx = Fixture::new(&EngineConfig::default());
    fx.highland_world();
    let import = fx.write_import("highland.txt", HIGHLAND);
    fx.engine.import(&import).unwrap();

    let results = fx.engine.what_is_at("382443N", "0793452W").unwrap();
    assert_eq!(texts(&results), vec![HIGHLAND[5], HIGHLAND[6]]);
}

#[test]
fn test_second_import_appends() {
    let mut fx = Fixture::new(&EngineConfig::default());
    fx.highland_world();
    let first = fx.write_import("a.txt", &HIGHLAND[..3]);
    let second = fx.write_import("b.txt", &HIGHLAND[3..6]);

    fx.engine.import(&first).unwrap();
    let size = fx.engine.store().len();
    let stats = fx.engine.import(&second).unwrap();
    assert_eq!(stats.records, 3);
    assert!(fx.engine.store().len() > size);

    let results = fx.engine.what_is_in("382500N", "0793200W", 1800, 1800).unwrap();
    assert_eq!(results.len(), 6);
}

#[test]
fn test_malformed_import_changes_nothing() {
    let mut fx = Fixture::new(&EngineConfig::default());
    fx.highland_world();
    let good = fx.write_import("good.txt", &HIGHLAND[..2]);
    fx.engine.import(&good).unwrap();
    let size = fx.engine.store().len();

    let bad = fx.write_import("bad.txt", &[HIGHLAND[2], "999|Truncated|Record"]);
    match fx.engine.import(&bad) {
        Err(EngineError::MalformedRecord { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected MalformedRecord, got {:?}", other),
    }

    assert_eq!(fx.engine.store().len(), size);
    assert!(fx.engine.what_is("Bolar", "VA").unwrap().is_empty());
    assert_eq!(fx.engine.spatial().len(), 2);
}

// ============================================================================
// Spatial behaviour
// ============================================================================

#[test]
fn test_points_outside_world_are_not_found() {
    let mut fx = Fixture::new(&EngineConfig::default());
    // World covering only the northern part of the county.
    fx.engine.world("0794500W", "0792000W", "382500N", "383500N");
    let import = fx.write_import("highland.txt", HIGHLAND);

    let stats = fx.engine.import(&import).unwrap();
    assert_eq!(stats.locations, 2);
    assert!(fx.engine.what_is_at("381902N", "0794052W").unwrap().is_empty());
    // Still reachable by name.
    assert_eq!(fx.engine.what_is("Bolar", "VA").unwrap().len(), 1);
}

#[test]
fn test_rectangle_edges_are_inclusive() {
    let mut fx = Fixture::new(&EngineConfig::default());
    fx.highland_world();
    let import = fx.write_import("highland.txt", HIGHLAND);
    fx.engine.import(&import).unwrap();

    // Blue Grass sits exactly 60 seconds north of a centre at 382900N.
    let results = fx.engine.what_is_in("382900N", "0793259W", 60, 0).unwrap();
    assert_eq!(texts(&results), vec![HIGHLAND[1]]);

    let results = fx.engine.what_is_in("382900N", "0793259W", 59, 0).unwrap();
    assert!(results.is_empty());
}

// ============================================================================
// Buffer pool and configuration
// ============================================================================

#[test]
fn test_pool_capacity_from_config() {
    let mut config = ConfigFile::default();
    config.cache.capacity = 2;
    config.index.initial_capacity = 1;

    let mut fx = Fixture::new(&config.engine_config());
    fx.highland_world();
    let import = fx.write_import("highland.txt", HIGHLAND);
    fx.engine.import(&import).unwrap();

    // The tiny index has grown to keep the load under the limit.
    assert!(fx.engine.names().capacity() > 1);
    assert!(fx.engine.names().load() <= fx.engine.names().load_limit());

    fx.engine.what_is("Asbury Church", "VA").unwrap();
    fx.engine.what_is("Blue Grass", "VA").unwrap();
    fx.engine.what_is("Asbury Church", "VA").unwrap();
    fx.engine.what_is("Bolar", "VA").unwrap();

    let pool = fx.engine.show(Structure::Pool);
    assert!(pool.contains("Bolar"));
    assert!(pool.contains("Asbury Church"));
    assert!(!pool.contains("Blue Grass"));
    assert_eq!(fx.engine.pool().len(), 2);
}

#[test]
fn test_repeated_queries_hit_the_pool() {
    let mut fx = Fixture::new(&EngineConfig::default());
    fx.highland_world();
    let import = fx.write_import("highland.txt", HIGHLAND);
    fx.engine.import(&import).unwrap();

    for _ in 0..5 {
        fx.engine.what_is("Monterey", "VA").unwrap();
    }

    let stats = fx.engine.pool().stats();
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hits, 8);
}
