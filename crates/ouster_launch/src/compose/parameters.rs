//! Package share directory lookup and the shared parameter file

use crate::compose::CompositionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable listing ament install prefixes
pub const AMENT_PREFIX_PATH: &str = "AMENT_PREFIX_PATH";

/// Marker directory in which every installed package registers itself
const PACKAGE_MARKERS: &str = "share/ament_index/resource_index/packages";

/// Locates the installed share directory of a package
pub trait PackageIndex {
    fn share_directory(&self, package: &str) -> Result<PathBuf, CompositionError>;
}

/// Ament resource index over an ordered list of install prefixes
#[derive(Debug, Clone, Default)]
pub struct AmentIndex {
    prefixes: Vec<PathBuf>,
}

impl AmentIndex {
    pub fn new(prefixes: Vec<PathBuf>) -> Self {
        Self { prefixes }
    }

    /// Index a single install prefix
    pub fn with_prefix(prefix: impl Into<PathBuf>) -> Self {
        Self::new(vec![prefix.into()])
    }

    /// Build the index from `AMENT_PREFIX_PATH`
    ///
    /// An unset variable yields an empty index, so every lookup fails with
    /// `PackageNotFound` instead of failing here.
    pub fn from_env() -> Self {
        let prefixes = std::env::var_os(AMENT_PREFIX_PATH)
            .map(|value| {
                std::env::split_paths(&value)
                    .filter(|p| !p.as_os_str().is_empty())
                    .collect()
            })
            .unwrap_or_default();
        Self::new(prefixes)
    }

    pub fn prefixes(&self) -> &[PathBuf] {
        &self.prefixes
    }
}

impl PackageIndex for AmentIndex {
    fn share_directory(&self, package: &str) -> Result<PathBuf, CompositionError> {
        let not_found = || CompositionError::PackageNotFound {
            package: package.to_string(),
            searched: self.prefixes.clone(),
        };

        // A name with separators would escape the marker directory
        if package.is_empty() || package.contains(['/', '\\']) || package == ".." {
            return Err(not_found());
        }

        for prefix in &self.prefixes {
            let marker = prefix.join(PACKAGE_MARKERS).join(package);
            if marker.is_file() {
                let share = prefix.join("share").join(package);
                log::debug!("Found package '{}' at {}", package, share.display());
                return Ok(share);
            }
        }

        Err(not_found())
    }
}

/// Path to the parameter file shared by every composed unit
///
/// The file is never opened here; the path is handed to the supervisor as is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSource(PathBuf);

impl ParameterSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ParameterSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// A located package share directory
///
/// Looked up once; every file the composition needs from the package is
/// derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageShare {
    path: PathBuf,
}

impl PackageShare {
    pub fn locate(index: &dyn PackageIndex, package: &str) -> Result<Self, CompositionError> {
        Ok(Self {
            path: index.share_directory(package)?,
        })
    }

    /// A file inside the share directory
    pub fn file(&self, relative_path: &Path) -> PathBuf {
        self.path.join(relative_path)
    }

    /// The shared parameter file at `relative_path`
    pub fn parameters(&self, relative_path: &Path) -> ParameterSource {
        let source = ParameterSource::new(self.file(relative_path));
        log::debug!("Shared parameters: {}", source);
        source
    }
}

/// Resolve the shared parameter file of `package`
pub fn resolve_shared_parameters(
    index: &dyn PackageIndex,
    package: &str,
    relative_path: &Path,
) -> Result<ParameterSource, CompositionError> {
    Ok(PackageShare::locate(index, package)?.parameters(relative_path))
}
