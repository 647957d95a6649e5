//! Santa Seal run pipeline.
//!
//! Wires [`santa_core`] and [`santa_crypto`] to the filesystem. A run is a
//! single synchronous pass:
//!
//! ```text
//! load keys ──▶ draw assignment ──▶ seal entries ──▶ write document
//! ```
//!
//! Any failure aborts the run before the output document is written. The
//! document itself is written to a uniquely named temporary sibling and
//! renamed into place, so readers never observe a partial file.
//!
//! The plaintext assignment never leaves memory and is never logged.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

pub use error::RunError;
use rand::{SeedableRng, rngs::OsRng};
use rand_chacha::ChaCha8Rng;
use santa_core::{AssignmentGenerator, GeneratorConfig};
use santa_crypto::{KeyStore, encrypt_all};
use tempfile::NamedTempFile;

/// Default key-store document path.
pub const DEFAULT_KEYS_PATH: &str = "assignments.json";

/// Default output document path.
pub const DEFAULT_OUTPUT_PATH: &str = "encrypted_assignments.json";

/// Configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Key-store document to read
    pub keys_path: PathBuf,
    /// Output document to write
    pub output_path: PathBuf,
    /// Generator settings (retry budget)
    pub generator: GeneratorConfig,
    /// Seed for the shuffle RNG. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            keys_path: PathBuf::from(DEFAULT_KEYS_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            generator: GeneratorConfig::default(),
            seed: None,
        }
    }
}

impl RunConfig {
    /// Reject settings that can never produce output.
    pub fn validate(&self) -> Result<(), RunError> {
        if self.generator.max_attempts == 0 {
            return Err(RunError::Config("max attempts must be at least 1".to_string()));
        }
        if self.keys_path == self.output_path {
            return Err(RunError::Config(format!(
                "output path {} would overwrite the key store",
                self.output_path.display()
            )));
        }
        Ok(())
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of participants sealed
    pub participants: usize,
    /// Shuffles the accepted draw took
    pub attempts: u32,
    /// Where the document was written
    pub output_path: PathBuf,
}

/// Load keys, draw, seal and write the output document.
pub fn run(config: &RunConfig) -> Result<RunSummary, RunError> {
    config.validate()?;

    tracing::info!(path = %config.keys_path.display(), "loading public keys");
    let keys = load_key_store(&config.keys_path)?;
    let participants = keys.participants();
    tracing::info!(
        count = participants.len(),
        participants = %participants.join(", "),
        "found participants"
    );

    tracing::info!(max_attempts = config.generator.max_attempts, "creating gift assignments");
    let mut shuffle_rng = shuffle_rng(config.seed);
    let generated =
        AssignmentGenerator::new(config.generator).generate(&participants, &mut shuffle_rng)?;

    tracing::info!(attempts = generated.attempts, "encrypting assignments with public keys");
    let sealed = encrypt_all(&generated.assignment, &keys, &mut OsRng)?;
    drop(generated.assignment);

    tracing::info!(path = %config.output_path.display(), "saving encrypted assignments");
    write_atomically(&config.output_path, sealed.to_json_pretty().as_bytes())?;

    Ok(RunSummary {
        participants: sealed.len(),
        attempts: generated.attempts,
        output_path: config.output_path.clone(),
    })
}

/// Read and parse a key-store document.
pub fn load_key_store(path: &Path) -> Result<KeyStore, RunError> {
    let document = fs::read_to_string(path)
        .map_err(|source| RunError::Read { path: path.to_path_buf(), source })?;
    Ok(KeyStore::from_json(&document)?)
}

fn shuffle_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => {
            tracing::debug!(seed, "using seeded shuffle");
            ChaCha8Rng::seed_from_u64(seed)
        },
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Write `contents` to `path` via temp file + fsync + rename.
///
/// The temporary file gets a fresh unique name in the destination directory,
/// so it can never alias the key store or any other existing file. On error
/// it is removed and `path` is left untouched.
fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), RunError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    write_synced(dir, contents)
        .and_then(|file| file.persist(path).map(|_| ()).map_err(|e| e.error))
        .map_err(|source| RunError::Write { path: path.to_path_buf(), source })
}

fn write_synced(dir: &Path, contents: &[u8]) -> io::Result<NamedTempFile> {
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    Ok(file)
}
