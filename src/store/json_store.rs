use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::store::HouseholdData;

/// Persists a [`HouseholdData`] document as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document; a missing file is an empty household.
    pub async fn load(&self) -> Result<HouseholdData, StoreError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => {
                let data: HouseholdData = serde_json::from_str(&content)?;
                debug!(
                    "Loaded {} pantry items, {} plans, {} favourites from {:?}",
                    data.pantry.items.len(),
                    data.saved_plans.len(),
                    data.favorites.len(),
                    self.path
                );
                Ok(data)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No data file at {:?}, starting empty", self.path);
                Ok(HouseholdData::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Writes through a sibling temp file so a failed write leaves the
    /// previous document intact.
    pub async fn save(&self, data: &HouseholdData) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(data)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content).await?;
        fs::rename(&tmp_path, &self.path).await?;
        debug!("Saved household data to {:?}", self.path);
        Ok(())
    }
}
