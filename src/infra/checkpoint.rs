// ============================================================
// Layer 6 — Model Artifact Store
// ============================================================
// Saves and restores the trained forest at one configured path.
//
// What gets saved:
//   a bincode-encoded envelope
//     format_version  — bumped whenever the layout changes
//     feature_names   — columns the model was trained on
//     forest          — the fitted trees
//
// Why an envelope?
//   The artifact outlives the process that wrote it. Checking
//   the version and the feature list on load turns "trained by
//   an incompatible build" into a clean load error instead of
//   garbage predictions.
//
// Writes go to a sibling `.tmp` file first and are renamed into
// place, so a reader never sees a half-written artifact.
//
// Reference: bincode crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::domain::traits::Persistable;
use crate::domain::FEATURE_COLUMNS;
use crate::ml::forest::RandomForest;

const FORMAT_VERSION: u32 = 1;

/// Borrowed view used for writing, so saving never clones the trees.
#[derive(Serialize)]
struct ArtifactRef<'a> {
    format_version: u32,
    feature_names:  Vec<String>,
    forest:         &'a RandomForest,
}

/// Owned form read back from disk.
#[derive(Deserialize)]
struct Artifact {
    format_version: u32,
    feature_names:  Vec<String>,
    forest:         RandomForest,
}

fn feature_names() -> Vec<String> {
    FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect()
}

impl Persistable for RandomForest {
    fn save(&self, path: &Path) -> Result<()> {
        let bytes = bincode::serialize(&ArtifactRef {
            format_version: FORMAT_VERSION,
            feature_names:  feature_names(),
            forest:         self,
        })
        .context("Failed to encode model artifact")?;

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create '{}'", dir.display()))?;
        }

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, &bytes)
            .with_context(|| format!("Failed to write '{}'", tmp.display()))?;
        fs::rename(&tmp, path)
            .with_context(|| format!("Failed to move artifact into '{}'", path.display()))?;

        tracing::debug!("Wrote model artifact ({} bytes)", bytes.len());
        Ok(())
    }

    fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("Cannot read model artifact '{}'", path.display()))?;

        let artifact: Artifact = bincode::deserialize(&bytes)
            .with_context(|| format!("Corrupt model artifact '{}'", path.display()))?;

        ensure!(
            artifact.format_version == FORMAT_VERSION,
            "artifact format version {} is not supported (expected {})",
            artifact.format_version,
            FORMAT_VERSION
        );
        ensure!(
            artifact.feature_names == feature_names()
                && artifact.forest.n_features() == FEATURE_COLUMNS.len(),
            "artifact was trained on features {:?}",
            artifact.feature_names
        );

        Ok(artifact.forest)
    }
}

/// Owns the artifact location and moves forests in and out of it.
#[derive(Debug, Clone)]
pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the artifact with `forest`.
    pub fn save(&self, forest: &RandomForest) -> Result<()> {
        forest.save(self.path())?;
        tracing::info!("Saved model artifact to '{}'", self.path().display());
        Ok(())
    }

    /// Read the artifact. Fails if it is absent, unreadable or
    /// written by an incompatible build.
    pub fn load(&self) -> Result<RandomForest> {
        let forest = RandomForest::load(self.path())?;
        tracing::info!(
            "Loaded model artifact from '{}' ({} trees)",
            self.path().display(),
            forest.n_trees()
        );
        Ok(forest)
    }
}
