//! ManifestRepository port - persistence of the last deployment's manifest

use std::path::Path;

use crate::domain::entities::Manifest;
use crate::error::FerryResult;

pub trait ManifestRepository {
    /// Guard held for the duration of one deployment attempt
    type Guard;

    /// Take the exclusive deploy lock for the manifest at `path`
    fn lock(&self, path: &Path) -> FerryResult<Self::Guard>;

    /// Load the manifest, or an empty one if none was saved yet
    fn load(&self, path: &Path) -> FerryResult<Manifest>;

    fn save(&self, manifest: &Manifest, path: &Path) -> FerryResult<()>;
}
