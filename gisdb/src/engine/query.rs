//! Query engine tying the record store, both indexes and the buffer pool
//! together.

use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::cache::BufferPool;
use crate::coord;
use crate::name_index::{HashTable, NameEntry};
use crate::spatial::{QuadTree, Rect, SpatialPoint};
use crate::store::{Record, RecordStore};

use super::types::{EngineConfig, EngineError, ImportStats, Structure, WorldBounds};

/// Query results keyed by record offset.
pub type QueryResult = BTreeMap<u64, String>;

/// Single-session GIS database.
///
/// Owns the record store, the name index, the spatial index and the buffer
/// pool. Imports flow into the store and then both indexes; queries resolve
/// offsets through an index and fetch text from the pool, falling back to
/// the store on a miss.
#[derive(Debug)]
pub struct QueryEngine {
    store: RecordStore,
    names: HashTable<NameEntry>,
    world: QuadTree,
    bounds: WorldBounds,
    pool: BufferPool,
}

impl QueryEngine {
    /// Create an engine over a fresh record store at `db_path`.
    pub fn create(db_path: impl AsRef<Path>, config: &EngineConfig) -> Result<Self, EngineError> {
        let store = RecordStore::create(db_path)?;
        Ok(Self::new(store, config))
    }

    /// Create an engine over an existing store.
    ///
    /// The world is empty until [`world`](Self::world) is called, so every
    /// point is rejected by the spatial index before then.
    pub fn new(store: RecordStore, config: &EngineConfig) -> Self {
        let bounds = WorldBounds::default();
        Self {
            store,
            names: HashTable::new(config.index_capacity, config.load_limit),
            world: QuadTree::new(bounds.west, bounds.east, bounds.south, bounds.north),
            bounds,
            pool: BufferPool::new(config.pool_capacity),
        }
    }

    /// The backing record store.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// The name index.
    pub fn names(&self) -> &HashTable<NameEntry> {
        &self.names
    }

    /// The spatial index.
    pub fn spatial(&self) -> &QuadTree {
        &self.world
    }

    /// The buffer pool.
    pub fn pool(&self) -> &BufferPool {
        &self.pool
    }

    /// Current world bounds.
    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    /// Set the world rectangle from DMS boundary text.
    ///
    /// Discards the current spatial index; previously imported records are
    /// not re-inserted.
    pub fn world(&mut self, west: &str, east: &str, south: &str, north: &str) -> WorldBounds {
        self.set_world(WorldBounds {
            west: coord::to_arc_seconds(west),
            east: coord::to_arc_seconds(east),
            south: coord::to_arc_seconds(south),
            north: coord::to_arc_seconds(north),
        })
    }

    /// Set the world rectangle from arc-second bounds.
    pub fn set_world(&mut self, bounds: WorldBounds) -> WorldBounds {
        if !self.world.is_empty() {
            tracing::info!(points = self.world.len(), "Discarding spatial index");
        }
        self.world = QuadTree::new(bounds.west, bounds.east, bounds.south, bounds.north);
        self.bounds = bounds;
        tracing::info!(
            west = bounds.west,
            east = bounds.east,
            south = bounds.south,
            north = bounds.north,
            "World bounds set"
        );
        bounds
    }

    /// Import a record file.
    ///
    /// The first line is a header and is skipped, as are blank lines. Every
    /// data line is parsed before anything is written, so a malformed line
    /// aborts the import with the store and both indexes unchanged.
    pub fn import(&mut self, path: impl AsRef<Path>) -> Result<ImportStats, EngineError> {
        let path = path.as_ref();
        let records = read_records(path)?;

        let mut offset = self.store.append(&records.iter().map(Record::line).collect::<Vec<_>>())?;

        let mut keys = HashSet::new();
        let mut locations = HashSet::new();
        let mut name_chars = 0usize;
        let mut out_of_bounds = 0usize;

        for record in &records {
            name_chars += record.name().chars().count();

            let entry = NameEntry::new(record.name(), record.region(), offset);
            keys.insert(entry.key().to_string());
            self.names.insert(entry);

            let (x, y) = record.location();
            if let Some(point) = self.world.find_mut(x, y) {
                point.add_offset(offset);
                locations.insert((x, y));
            } else if self.world.insert(SpatialPoint::new(x, y, offset)) {
                locations.insert((x, y));
            } else {
                out_of_bounds += 1;
            }

            offset += record.line().len() as u64 + 1;
        }

        let stats = ImportStats {
            records: records.len(),
            name_entries: keys.len(),
            locations: locations.len(),
            average_name_length: name_chars.checked_div(records.len()).unwrap_or(0),
            out_of_bounds,
        };

        tracing::info!(
            file = %path.display(),
            records = stats.records,
            name_entries = stats.name_entries,
            locations = stats.locations,
            out_of_bounds = stats.out_of_bounds,
            "Import complete"
        );
        Ok(stats)
    }

    /// Records whose name and region match exactly.
    pub fn what_is(&mut self, name: &str, region: &str) -> Result<QueryResult, EngineError> {
        let offsets = match self.names.find(&NameEntry::probe(name, region)) {
            Some(entry) => entry.offsets().to_vec(),
            None => return Ok(QueryResult::new()),
        };
        self.fetch_all(offsets)
    }

    /// Records located exactly at the DMS coordinate.
    pub fn what_is_at(&mut self, latitude: &str, longitude: &str) -> Result<QueryResult, EngineError> {
        let x = coord::to_arc_seconds(longitude);
        let y = coord::to_arc_seconds(latitude);
        let offsets = match self.world.find(x, y) {
            Some(point) => point.offsets().to_vec(),
            None => return Ok(QueryResult::new()),
        };
        self.fetch_all(offsets)
    }

    /// Records inside the box centred on the DMS coordinate.
    ///
    /// The half extents are in arc-seconds and the box edges are inclusive.
    pub fn what_is_in(
        &mut self,
        latitude: &str,
        longitude: &str,
        half_height: i64,
        half_width: i64,
    ) -> Result<QueryResult, EngineError> {
        let x = coord::to_arc_seconds(longitude);
        let y = coord::to_arc_seconds(latitude);
        let rect = Rect::around(x, y, half_width, half_height);

        let offsets: Vec<u64> = self
            .world
            .find_in(&rect)
            .into_iter()
            .flat_map(|point| point.offsets().iter().copied())
            .collect();
        tracing::debug!(?rect, offsets = offsets.len(), "Range query");
        self.fetch_all(offsets)
    }

    /// Diagnostic dump of one structure.
    pub fn show(&self, structure: Structure) -> String {
        match structure {
            Structure::Quad => self.world.dump(),
            Structure::Hash => self.names.dump(),
            Structure::Pool => self.pool.dump(),
        }
    }

    fn fetch_all(&mut self, offsets: Vec<u64>) -> Result<QueryResult, EngineError> {
        let mut results = QueryResult::new();
        for offset in offsets {
            let text = self.fetch(offset)?;
            results.insert(offset, text);
        }
        Ok(results)
    }

    fn fetch(&mut self, offset: u64) -> Result<String, EngineError> {
        if let Some(text) = self.pool.get(offset) {
            return Ok(text.to_string());
        }
        let text = self.store.read_at(offset)?;
        self.pool.put(offset, text.clone());
        Ok(text)
    }
}

/// Parse every data line of an import file.
fn read_records(path: &Path) -> Result<Vec<Record>, EngineError> {
    let io_error = |source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    };
    let reader = BufReader::new(File::open(path).map_err(io_error)?);

    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(io_error)?;
        if index == 0 || line.trim().is_empty() {
            continue;
        }
        let record = Record::parse(&line).map_err(|reason| EngineError::MalformedRecord {
            line: index + 1,
            reason,
        })?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::HEADER;
    use tempfile::TempDir;

    const AFTON: &str = "1482324|Afton|Populated Place|VA|51|Nelson|125|375950N|0785710W|37.9970755|-78.9528034|||||290|951|Afton|09/28/1979|";
    const SPRING_A: &str = "1|Springfield|Populated Place|VA|51|Fairfax|059|384731N|0771112W||||||||||";
    const SPRING_B: &str = "2|Springfield|Populated Place|VA|51|Halifax|083|364500N|0785300W||||||||||";
    const SAME_SPOT: &str = "3|Afton Mountain|Summit|VA|51|Nelson|125|375950N|0785710W||||||||||";

    fn setup(lines: &[&str]) -> (TempDir, QueryEngine, std::path::PathBuf) {
        let temp = TempDir::new().unwrap();
        let engine = QueryEngine::create(temp.path().join("db.txt"), &EngineConfig::default()).unwrap();
        let import = temp.path().join("import.txt");
        let mut contents = format!("{}\n", HEADER);
        for line in lines {
            contents.push_str(line);
            contents.push('\n');
        }
        std::fs::write(&import, contents).unwrap();
        (temp, engine, import)
    }

    fn virginia(engine: &mut QueryEngine) {
        engine.world("0800000W", "0750000W", "360000N", "400000N");
    }

    #[test]
    fn test_world_converts_bounds() {
        let (_temp, mut engine, _) = setup(&[]);
        let bounds = engine.world("0800000W", "0750000W", "360000N", "400000N");
        assert_eq!(
            bounds,
            WorldBounds {
                west: -288_000,
                east: -270_000,
                south: 129_600,
                north: 144_000
            }
        );
        assert_eq!(engine.bounds(), bounds);
    }

    #[test]
    fn test_import_stats() {
        let (_temp, mut engine, import) = setup(&[AFTON, SPRING_A, SPRING_B, SAME_SPOT]);
        virginia(&mut engine);

        let stats = engine.import(&import).unwrap();
        assert_eq!(stats.records, 4);
        assert_eq!(stats.name_entries, 3);
        assert_eq!(stats.locations, 3);
        assert_eq!(stats.out_of_bounds, 0);
        // (5 + 11 + 11 + 14) / 4
        assert_eq!(stats.average_name_length, 10);
    }

    #[test]
    fn test_empty_import() {
        let (_temp, mut engine, import) = setup(&[]);
        let stats = engine.import(&import).unwrap();
        assert_eq!(stats, ImportStats::default());
    }

    #[test]
    fn test_import_skips_blank_lines() {
        let (_temp, mut engine, import) = setup(&[AFTON, "", "   ", SPRING_A]);
        virginia(&mut engine);
        assert_eq!(engine.import(&import).unwrap().records, 2);
    }

    #[test]
    fn test_import_without_world_counts_out_of_bounds() {
        let (_temp, mut engine, import) = setup(&[AFTON, SPRING_A]);
        let stats = engine.import(&import).unwrap();
        assert_eq!(stats.out_of_bounds, 2);
        assert_eq!(stats.locations, 0);
        assert_eq!(engine.what_is("Afton", "VA").unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_record_aborts_import() {
        let (_temp, mut engine, import) = setup(&[AFTON, "1|Broken|Record|VA"]);
        virginia(&mut engine);
        let before = engine.store().len();

        let err = engine.import(&import).unwrap_err();
        assert!(matches!(err, EngineError::MalformedRecord { line: 3, .. }));
        assert_eq!(engine.store().len(), before);
        assert!(engine.names().is_empty());
        assert!(engine.spatial().is_empty());
    }

    #[test]
    fn test_missing_import_file() {
        let (temp, mut engine, _) = setup(&[]);
        let err = engine.import(temp.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, EngineError::Io { .. }));
    }

    #[test]
    fn test_what_is_returns_all_matches_in_order() {
        let (_temp, mut engine, import) = setup(&[SPRING_A, AFTON, SPRING_B]);
        virginia(&mut engine);
        engine.import(&import).unwrap();

        let results = engine.what_is("Springfield", "VA").unwrap();
        let texts: Vec<&str> = results.values().map(String::as_str).collect();
        assert_eq!(texts, vec![SPRING_A, SPRING_B]);

        assert!(engine.what_is("Springfield", "MA").unwrap().is_empty());
    }

    #[test]
    fn test_what_is_at() {
        let (_temp, mut engine, import) = setup(&[AFTON, SPRING_A, SAME_SPOT]);
        virginia(&mut engine);
        engine.import(&import).unwrap();

        let results = engine.what_is_at("375950N", "0785710W").unwrap();
        let texts: Vec<&str> = results.values().map(String::as_str).collect();
        assert_eq!(texts, vec![AFTON, SAME_SPOT]);

        assert!(engine.what_is_at("375951N", "0785710W").unwrap().is_empty());
    }

    #[test]
    fn test_what_is_in() {
        let (_temp, mut engine, import) = setup(&[AFTON, SPRING_A, SPRING_B, SAME_SPOT]);
        virginia(&mut engine);
        engine.import(&import).unwrap();

        // One degree around Afton reaches neither Springfield.
        let results = engine.what_is_in("375950N", "0785710W", 3600, 3600).unwrap();
        assert_eq!(results.len(), 2);

        // The whole state.
        let results = engine.what_is_in("380000N", "0773000W", 7200, 9000).unwrap();
        assert_eq!(results.len(), 4);
    }

    #[test]
    fn test_what_is_in_with_maximum_extents_returns_everything() {
        let (_temp, mut engine, import) = setup(&[AFTON, SPRING_A, SPRING_B, SAME_SPOT]);
        virginia(&mut engine);
        engine.import(&import).unwrap();

        let results = engine
            .what_is_in("375950N", "0785710W", i64::MAX, i64::MAX)
            .unwrap();
        assert_eq!(results.len(), 4);
        assert!(results.values().any(|line| line == SPRING_A));
    }

    #[test]
    fn test_queries_populate_pool() {
        let (_temp, mut engine, import) = setup(&[AFTON, SPRING_A]);
        virginia(&mut engine);
        engine.import(&import).unwrap();
        assert!(engine.pool().is_empty());

        engine.what_is("Afton", "VA").unwrap();
        engine.what_is("Afton", "VA").unwrap();

        let stats = engine.pool().stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
        assert!(engine.show(Structure::Pool).contains(AFTON));
    }

    #[test]
    fn test_world_reset_discards_points() {
        let (_temp, mut engine, import) = setup(&[AFTON]);
        virginia(&mut engine);
        engine.import(&import).unwrap();
        assert_eq!(engine.spatial().len(), 1);

        virginia(&mut engine);
        assert!(engine.spatial().is_empty());
        assert!(engine.what_is_at("375950N", "0785710W").unwrap().is_empty());
        assert_eq!(engine.what_is("Afton", "VA").unwrap().len(), 1);
    }

    #[test]
    fn test_show_hash_and_quad() {
        let (_temp, mut engine, import) = setup(&[AFTON]);
        virginia(&mut engine);
        engine.import(&import).unwrap();

        let hash = engine.show(Structure::Hash);
        assert!(hash.starts_with("Number of elements: 1\n"));
        assert!(hash.contains("Afton|VA"));

        let quad = engine.show(Structure::Quad);
        assert!(quad.contains("(-284230, 136790)"));
    }
}
