/// Artifact loading and the process-wide memoized cache.
///
/// Artifacts are read from local persistent storage exactly once per
/// process: the first call deserializes and validates all four files, and
/// every later call returns the identical cached instances without touching
/// storage. There is no reload path — replacing artifacts requires a
/// restart.
///
/// # Storage injection
/// All reads go through the `ArtifactSource` trait rather than calling the
/// filesystem directly. Tests substitute an in-memory source with a read
/// counter, which makes the once-only contract observable without mocking.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use crate::artifact::{Predictor, Scaler};
use crate::model::{ArtifactError, PipelineVariant};
use crate::pipeline::{ArtifactSet, Pipeline};

// ---------------------------------------------------------------------------
// Artifact file layout
// ---------------------------------------------------------------------------

/// Default directory holding the artifact files, relative to the working
/// directory of the service.
pub const DEFAULT_ARTIFACT_DIR: &str = "artifacts";

/// File name of the fitted scaler for a variant.
pub fn scaler_file(variant: PipelineVariant) -> &'static str {
    match variant {
        PipelineVariant::Full => "scaler_full.json",
        PipelineVariant::RainOnly => "scaler_rain.json",
    }
}

/// File name of the fitted regression model for a variant.
pub fn model_file(variant: PipelineVariant) -> &'static str {
    match variant {
        PipelineVariant::Full => "model_full.json",
        PipelineVariant::RainOnly => "model_rain.json",
    }
}

// ---------------------------------------------------------------------------
// Storage abstraction
// ---------------------------------------------------------------------------

/// Read access to persisted artifacts.
pub trait ArtifactSource {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;
}

/// The production source: plain filesystem reads.
#[derive(Debug, Default)]
pub struct FsSource;

impl ArtifactSource for FsSource {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

fn read_artifact<S: ArtifactSource>(
    source: &S,
    path: &Path,
) -> Result<String, ArtifactError> {
    source
        .read_to_string(path)
        .map_err(|e| ArtifactError::Io {
            path: path.display().to_string(),
            source: e,
        })
}

fn load_scaler<S: ArtifactSource>(source: &S, path: &Path) -> Result<Scaler, ArtifactError> {
    let text = read_artifact(source, path)?;
    let scaler: Scaler = serde_json::from_str(&text).map_err(|e| ArtifactError::Parse {
        path: path.display().to_string(),
        detail: e.to_string(),
    })?;
    scaler.validate().map_err(|detail| ArtifactError::Invalid {
        path: path.display().to_string(),
        detail,
    })?;
    Ok(scaler)
}

fn load_predictor<S: ArtifactSource>(
    source: &S,
    path: &Path,
) -> Result<Predictor, ArtifactError> {
    let text = read_artifact(source, path)?;
    let predictor: Predictor =
        serde_json::from_str(&text).map_err(|e| ArtifactError::Parse {
            path: path.display().to_string(),
            detail: e.to_string(),
        })?;
    predictor
        .validate()
        .map_err(|detail| ArtifactError::Invalid {
            path: path.display().to_string(),
            detail,
        })?;
    Ok(predictor)
}

/// Loads and pairs the two artifact files of one variant.
pub fn load_pipeline<S: ArtifactSource>(
    source: &S,
    dir: &Path,
    variant: PipelineVariant,
) -> Result<Pipeline, ArtifactError> {
    let scaler_path: PathBuf = dir.join(scaler_file(variant));
    let model_path: PathBuf = dir.join(model_file(variant));
    let scaler = load_scaler(source, &scaler_path)?;
    let predictor = load_predictor(source, &model_path)?;
    Pipeline::new(variant, scaler, predictor).map_err(|detail| ArtifactError::Invalid {
        path: model_path.display().to_string(),
        detail,
    })
}

/// Loads and validates all four artifact files from `dir`.
///
/// All-or-nothing: the first failure aborts the load, and no partially
/// populated set is ever produced.
pub fn load_set<S: ArtifactSource>(source: &S, dir: &Path) -> Result<ArtifactSet, ArtifactError> {
    let full = load_pipeline(source, dir, PipelineVariant::Full)?;
    let rain_only = load_pipeline(source, dir, PipelineVariant::RainOnly)?;
    Ok(ArtifactSet::new(full, rain_only))
}

// ---------------------------------------------------------------------------
// Memoized cache
// ---------------------------------------------------------------------------

/// A write-once artifact cache with guarded double-checked initialization.
///
/// The fast path is a lock-free `OnceLock` read. On a cache miss the init
/// mutex serializes loaders, and the cell is re-checked under the lock so
/// concurrent first callers cannot read storage twice. After the single
/// successful load the cell is read-only for the life of the process.
pub struct ArtifactCache {
    cell: OnceLock<ArtifactSet>,
    init: Mutex<()>,
}

impl ArtifactCache {
    pub const fn new() -> ArtifactCache {
        ArtifactCache {
            cell: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// Returns the cached set, loading it on first use.
    ///
    /// A failed load leaves the cache empty, so a later call may retry;
    /// in practice the binary treats the first failure as fatal.
    pub fn get_or_load<S: ArtifactSource>(
        &self,
        source: &S,
        dir: &Path,
    ) -> Result<&ArtifactSet, ArtifactError> {
        if let Some(set) = self.cell.get() {
            return Ok(set);
        }
        let _guard = self.init.lock().unwrap();
        if let Some(set) = self.cell.get() {
            return Ok(set);
        }
        let set = load_set(source, dir)?;
        Ok(self.cell.get_or_init(|| set))
    }

    /// Whether the cache has been populated.
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl Default for ArtifactCache {
    fn default() -> Self {
        ArtifactCache::new()
    }
}

/// The process-wide cache used by the service binary.
static CACHE: ArtifactCache = ArtifactCache::new();

/// Loads the artifact set from the default directory, memoized
/// process-wide. Subsequent calls return the identical cached instance.
pub fn load_artifacts() -> Result<&'static ArtifactSet, ArtifactError> {
    load_artifacts_from(Path::new(DEFAULT_ARTIFACT_DIR))
}

/// Like `load_artifacts`, with an explicit artifact directory (used when
/// the configuration overrides the default location).
pub fn load_artifacts_from(dir: &Path) -> Result<&'static ArtifactSet, ArtifactError> {
    CACHE.get_or_load(&FsSource, dir)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory artifact storage that counts every read.
    struct CountingSource {
        files: HashMap<PathBuf, String>,
        reads: AtomicUsize,
    }

    impl CountingSource {
        fn with_valid_set() -> CountingSource {
            let mut files = HashMap::new();
            files.insert(
                PathBuf::from("store/scaler_full.json"),
                r#"{"mean": [50.0, 10.0, 120.0, 5.0], "scale": [10.0, 5.0, 20.0, 2.5]}"#
                    .to_string(),
            );
            files.insert(
                PathBuf::from("store/model_full.json"),
                r#"{"coefficients": [30.0, 5.0, 40.0, 5.0], "intercept": 100.0}"#.to_string(),
            );
            files.insert(
                PathBuf::from("store/scaler_rain.json"),
                r#"{"mean": [10.0, 5.0], "scale": [5.0, 2.5]}"#.to_string(),
            );
            files.insert(
                PathBuf::from("store/model_rain.json"),
                r#"{"coefficients": [0.5, 0.4], "intercept": 1.2}"#.to_string(),
            );
            CountingSource {
                files,
                reads: AtomicUsize::new(0),
            }
        }

        fn read_count(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }
    }

    impl ArtifactSource for CountingSource {
        fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.files.get(path).cloned().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such artifact")
            })
        }
    }

    #[test]
    fn test_load_set_reads_all_four_files() {
        let source = CountingSource::with_valid_set();
        let set = load_set(&source, Path::new("store")).expect("fixture set is valid");
        assert_eq!(source.read_count(), 4);
        assert_eq!(set.pipeline(PipelineVariant::Full).arity(), 4);
        assert_eq!(set.pipeline(PipelineVariant::RainOnly).arity(), 2);
    }

    #[test]
    fn test_second_load_hits_the_cache_not_storage() {
        let source = CountingSource::with_valid_set();
        let cache = ArtifactCache::new();

        let first = cache
            .get_or_load(&source, Path::new("store"))
            .expect("first load succeeds");
        assert_eq!(source.read_count(), 4, "first load reads every file once");

        let second = cache
            .get_or_load(&source, Path::new("store"))
            .expect("cached load succeeds");
        assert_eq!(
            source.read_count(),
            4,
            "second load must not touch storage"
        );
        assert!(
            std::ptr::eq(first, second),
            "both calls must return the identical cached instance"
        );
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let mut source = CountingSource::with_valid_set();
        source.files.remove(Path::new("store/model_rain.json"));
        let cache = ArtifactCache::new();

        let err = cache
            .get_or_load(&source, Path::new("store"))
            .expect_err("missing file must fail the whole load");
        assert!(
            matches!(err, ArtifactError::Io { .. }),
            "expected Io error, got {:?}",
            err
        );
        assert!(!cache.is_loaded(), "a failed load must not populate the cache");
    }

    #[test]
    fn test_corrupt_file_is_a_parse_error() {
        let mut source = CountingSource::with_valid_set();
        source.files.insert(
            PathBuf::from("store/scaler_full.json"),
            "not json at all".to_string(),
        );

        let err = load_set(&source, Path::new("store")).expect_err("corrupt scaler");
        assert!(matches!(err, ArtifactError::Parse { .. }), "got {:?}", err);
    }

    #[test]
    fn test_arity_disagreement_is_an_invalid_error() {
        // A 2-feature scaler in the full slot: files parse individually but
        // cannot be paired into the 4-feature pipeline.
        let mut source = CountingSource::with_valid_set();
        source.files.insert(
            PathBuf::from("store/scaler_full.json"),
            r#"{"mean": [10.0, 5.0], "scale": [5.0, 2.5]}"#.to_string(),
        );

        let err = load_set(&source, Path::new("store")).expect_err("mismatched arity");
        assert!(matches!(err, ArtifactError::Invalid { .. }), "got {:?}", err);
    }

    #[test]
    fn test_failed_load_can_be_retried() {
        let mut source = CountingSource::with_valid_set();
        let removed = source
            .files
            .remove(Path::new("store/scaler_full.json"))
            .expect("fixture has the file");
        let cache = ArtifactCache::new();

        assert!(cache.get_or_load(&source, Path::new("store")).is_err());

        source
            .files
            .insert(PathBuf::from("store/scaler_full.json"), removed);
        let set = cache
            .get_or_load(&source, Path::new("store"))
            .expect("retry after restoring the file succeeds");
        assert_eq!(set.pipeline(PipelineVariant::Full).arity(), 4);
    }

    #[test]
    fn test_artifact_file_names_follow_variant_ids() {
        assert_eq!(scaler_file(PipelineVariant::Full), "scaler_full.json");
        assert_eq!(model_file(PipelineVariant::Full), "model_full.json");
        assert_eq!(scaler_file(PipelineVariant::RainOnly), "scaler_rain.json");
        assert_eq!(model_file(PipelineVariant::RainOnly), "model_rain.json");
    }
}
