use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::data::Unit;
use super::filter::{self, Criteria};
use crate::error::LoadError;

/// A catalog that was read successfully, plus where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedCatalog {
    pub units: Vec<Unit>,
    pub source: PathBuf,
}

/// The CatalogStore owns the unit list for the whole session.
/// It is created empty on start-up, filled once by `load_catalog`,
/// and only ever replaced wholesale.
#[derive(Debug, Default)]
pub struct CatalogStore {
    units: Vec<Unit>,
    levels: Vec<i64>,
    source: Option<PathBuf>,
    error: Option<String>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a load result into the store
    pub fn apply(&mut self, result: Result<LoadedCatalog, LoadError>) {
        match result {
            Ok(loaded) => self.replace(loaded),
            Err(err) => self.fail(&err),
        }
    }

    /// Replace the whole catalog and clear any previous error
    pub fn replace(&mut self, loaded: LoadedCatalog) {
        self.levels = distinct_levels(&loaded.units);
        self.units = loaded.units;
        self.source = Some(loaded.source);
        self.error = None;
    }

    /// Record a load failure. The catalog is left empty.
    pub fn fail(&mut self, err: &LoadError) {
        warn!("❌ Catalog load failed: {}", err);
        self.units.clear();
        self.levels.clear();
        self.source = None;
        self.error = Some(err.to_string());
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Distinct levels present in the catalog, ascending
    pub fn levels(&self) -> &[i64] {
        &self.levels
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Directory floor-plan paths are resolved against
    pub fn asset_root(&self) -> PathBuf {
        self.source
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    pub fn find(&self, id: &str) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id == id)
    }

    /// The derived view for the given criteria
    pub fn view(&self, criteria: &Criteria) -> Vec<&Unit> {
        filter::filter(self.units(), criteria)
    }
}

fn distinct_levels(units: &[Unit]) -> Vec<i64> {
    let mut levels: Vec<i64> = units.iter().map(|unit| unit.nivel).collect();
    levels.sort_unstable();
    levels.dedup();
    levels
}

/// Load the catalog from the first candidate that works.
///
/// Candidates are tried strictly in order, each one awaited before the
/// next. The error returned is the cause reported by the last candidate.
pub async fn load_catalog(candidates: Vec<PathBuf>) -> Result<LoadedCatalog, LoadError> {
    let mut last_err = LoadError::NoCandidates;

    for path in candidates {
        match read_candidate(&path).await {
            Ok(units) => {
                info!("📁 Loaded {} units from {}", units.len(), path.display());
                return Ok(LoadedCatalog { units, source: path });
            }
            Err(err) => {
                info!("🔍 Skipping candidate: {}", err);
                last_err = err;
            }
        }
    }

    Err(last_err)
}

/// Read and parse one candidate file
async fn read_candidate(path: &Path) -> Result<Vec<Unit>, LoadError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    parse_units(path, &bytes)
}

/// Parse a catalog body. Anything that is not a JSON array is rejected;
/// inside the array, records that can't be read are skipped with a warning
/// so one bad entry doesn't hide the rest of the catalog.
fn parse_units(path: &Path, bytes: &[u8]) -> Result<Vec<Unit>, LoadError> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| LoadError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let serde_json::Value::Array(records) = value else {
        return Err(LoadError::InvalidFormat {
            path: path.to_path_buf(),
        });
    };

    let mut units = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Unit>(record) {
            Ok(unit) => units.push(unit),
            Err(e) => warn!("⚠️  Skipping record {} in {}: {}", index, path.display(), e),
        }
    }

    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"id":"A1","nivel":1,"habitaciones":2,"area_m2":50,"disponible":true},
        {"id":"B2","nivel":2,"habitaciones":1,"area_m2":30,"disponible":false}
    ]"#;

    /// Scratch directory unique to one test
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join("unit-catalog-tests")
            .join(format!("{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn sample_units() -> Vec<Unit> {
        serde_json::from_str(SAMPLE).unwrap()
    }

    #[test]
    fn test_levels_are_distinct_and_sorted() {
        let mut units = sample_units();
        let mut extra = units[0].clone();
        extra.id = "C3".to_string();
        extra.nivel = 7;
        units.insert(0, extra);
        let mut dup = units[1].clone();
        dup.id = "A2".to_string();
        units.push(dup);

        let mut store = CatalogStore::new();
        store.replace(LoadedCatalog {
            units,
            source: PathBuf::from("public/apartments.json"),
        });

        assert_eq!(store.levels(), &[1, 2, 7]);
        assert_eq!(store.asset_root(), PathBuf::from("public"));
    }

    #[test]
    fn test_replace_clears_error() {
        let mut store = CatalogStore::new();
        store.fail(&LoadError::NoCandidates);
        assert!(store.error().is_some());

        store.replace(LoadedCatalog {
            units: sample_units(),
            source: PathBuf::from("apartments.json"),
        });
        assert_eq!(store.error(), None);
        assert_eq!(store.units().len(), 2);
        assert_eq!(store.view(&Criteria::default()).len(), 2);
    }

    #[test]
    fn test_non_array_is_invalid_format() {
        let path = Path::new("apartments.json");
        let err = parse_units(path, br#"{"id":"A1"}"#).unwrap_err();
        assert_eq!(err, LoadError::InvalidFormat { path: path.to_path_buf() });

        let err = parse_units(path, b"not json").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_bad_record_is_skipped() {
        let body = br#"[
            {"id":"A1","nivel":1.0,"habitaciones":2,"area_m2":50,"precio_usd":"98000","disponible":true},
            {"id":"X9","nivel":"alto","habitaciones":2,"area_m2":50,"disponible":true},
            {"id":"B2","nivel":2,"habitaciones":1,"area_m2":30,"disponible":false}
        ]"#;
        let units = parse_units(Path::new("apartments.json"), body).unwrap();

        let ids: Vec<&str> = units.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["A1", "B2"]);
        assert_eq!(units[0].nivel, 1);
        assert_eq!(units[0].precio_usd, Some(98_000.0));
    }

    #[tokio::test]
    async fn test_all_candidates_fail() {
        let dir = scratch_dir("all-fail");
        let not_array = dir.join("object.json");
        std::fs::write(&not_array, r#"{"units":[]}"#).unwrap();

        let candidates = vec![
            dir.join("missing.json"),
            dir.join("also-missing.json"),
            not_array.clone(),
        ];
        let result = load_catalog(candidates).await;
        assert_eq!(
            result.clone().unwrap_err(),
            LoadError::InvalidFormat { path: not_array }
        );

        let mut store = CatalogStore::new();
        store.apply(result);
        assert!(store.error().unwrap().contains("invalid format"));
        assert!(store.view(&Criteria::default()).is_empty());
        assert!(store.levels().is_empty());
    }

    #[tokio::test]
    async fn test_later_candidate_wins() {
        let dir = scratch_dir("later-wins");
        let good = dir.join("apartments.json");
        std::fs::write(&good, SAMPLE).unwrap();

        let result = load_catalog(vec![dir.join("missing.json"), good.clone()]).await;
        let loaded = result.unwrap();
        assert_eq!(loaded.source, good);

        let mut store = CatalogStore::new();
        store.apply(Ok(loaded));
        assert_eq!(store.asset_root(), dir);
        assert_eq!(store.find("B2").map(|u| u.nivel), Some(2));
    }

    #[tokio::test]
    async fn test_no_candidates() {
        let result = load_catalog(Vec::new()).await;
        assert_eq!(result.unwrap_err(), LoadError::NoCandidates);
    }
}
