// crates/contract-suite-core/src/universe/classpath.rs
// ============================================================================
// Module: Class Path
// Description: Manifest universe over directories and zip archives.
// Purpose: Enumerate and load `.ctype` manifests from on-disk locations.
// Dependencies: crate::{model, universe}, tracing, walkdir, zip
// ============================================================================

//! ## Overview
//! A [`ClassPath`] is an ordered list of locations. Directories are walked
//! recursively; archives are read as a stream of zip entries. A manifest at
//! `org/example/Shape.ctype` describes `org.example.Shape`.
//!
//! Enumeration skips `META-INF` directories and nested (`$`) names. A
//! location that cannot be read is logged and contributes nothing, both
//! when listing and when loading. Loading searches the locations in order
//! and returns the first manifest found; only a manifest that was found and
//! is invalid fails the load.
//!
//! Archives are opened once per class path and their central directory is
//! kept for later loads.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use tracing::debug;
use tracing::warn;
use walkdir::WalkDir;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::model::TypeDescriptor;
use crate::model::TypeName;
use crate::universe::loader::LoadError;
use crate::universe::loader::ScanError;
use crate::universe::loader::TypeLoader;
use crate::universe::loader::TypeSource;
use crate::universe::manifest::MANIFEST_EXTENSION;
use crate::universe::manifest::MAX_MANIFEST_BYTES;
use crate::universe::manifest::TypeManifest;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Reserved metadata directory skipped during enumeration.
const METADATA_DIR: &str = "META-INF";

// ============================================================================
// SECTION: Class Path
// ============================================================================

/// One class path location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassPathEntry {
    /// Directory tree of manifests.
    Directory(PathBuf),
    /// Zip archive of manifests.
    Archive(PathBuf),
}

impl ClassPathEntry {
    /// Classifies a path: existing directories are trees, anything else is
    /// read as an archive.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.is_dir() { Self::Directory(path) } else { Self::Archive(path) }
    }

    /// Returns the location path.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Directory(path) | Self::Archive(path) => path,
        }
    }
}

/// Manifest universe over directories and archives.
#[derive(Debug, Clone, Default)]
pub struct ClassPath {
    /// Locations searched in order.
    entries: Vec<ClassPathEntry>,
    /// Archives opened by earlier loads.
    archives: ArchiveCache,
}

impl ClassPath {
    /// Creates a class path from location paths.
    #[must_use]
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            entries: paths.into_iter().map(ClassPathEntry::from_path).collect(),
            archives: ArchiveCache::default(),
        }
    }

    /// Returns the locations in search order.
    #[must_use]
    pub fn entries(&self) -> &[ClassPathEntry] {
        &self.entries
    }
}

impl TypeSource for ClassPath {
    fn candidates(&self, root: &str) -> Vec<TypeName> {
        let mut names: Vec<TypeName> = Vec::new();
        for entry in &self.entries {
            let listed = match entry {
                ClassPathEntry::Directory(path) => list_directory(path),
                ClassPathEntry::Archive(path) => list_archive(path),
            };
            match listed {
                Ok(found) => {
                    for name in found {
                        if !name.is_nested() && name.is_under(root) && !names.contains(&name) {
                            names.push(name);
                        }
                    }
                }
                Err(err) => warn!(
                    location = %entry.path().display(),
                    error = %err,
                    "skipping unreadable class path entry"
                ),
            }
        }
        names
    }
}

impl TypeLoader for ClassPath {
    fn load(&self, name: &TypeName) -> Result<Arc<TypeDescriptor>, LoadError> {
        let relative = manifest_path(name);
        for entry in &self.entries {
            let read = match entry {
                ClassPathEntry::Directory(path) => read_directory_manifest(path, &relative),
                ClassPathEntry::Archive(path) => self.archives.read(path, &relative),
            };
            let text = match read {
                Ok(Some(text)) => text,
                Ok(None) => continue,
                Err(err @ LoadError::Manifest {
                    ..
                }) => return Err(err),
                Err(err) => {
                    warn!(
                        location = %entry.path().display(),
                        type_name = %name,
                        error = %err,
                        "skipping unreadable class path entry"
                    );
                    continue;
                }
            };
            let location = format!("{}!{relative}", entry.path().display());
            let manifest = TypeManifest::parse(&text).map_err(|message| LoadError::Manifest {
                path: location.clone(),
                message,
            })?;
            if &manifest.name != name {
                return Err(LoadError::Manifest {
                    path: location,
                    message: format!("declares `{}` but is stored as `{name}`", manifest.name),
                });
            }
            debug!(type_name = %name, %location, "loaded type manifest");
            return Ok(Arc::new(manifest.into_descriptor()));
        }
        Err(LoadError::NotFound(name.clone()))
    }
}

// ============================================================================
// SECTION: Name Mapping
// ============================================================================

/// Returns the `/`-separated manifest path for a type name.
fn manifest_path(name: &TypeName) -> String {
    format!("{}.{MANIFEST_EXTENSION}", name.as_str().replace('.', "/"))
}

/// Converts a `/`-separated manifest path into a type name.
fn name_from_path(relative: &str) -> Option<TypeName> {
    let stem = relative.strip_suffix(MANIFEST_EXTENSION)?.strip_suffix('.')?;
    let dotted = stem.trim_start_matches('/').replace('/', ".");
    TypeName::is_valid(&dotted).then(|| TypeName::new(dotted))
}

// ============================================================================
// SECTION: Directories
// ============================================================================

/// Lists manifest names below a directory.
fn list_directory(root: &Path) -> Result<Vec<TypeName>, ScanError> {
    let mut names = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || entry.file_name() != METADATA_DIR);
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(ScanError::Walk {
                    path: root.display().to_string(),
                    message: err.to_string(),
                });
            }
            Err(err) => {
                warn!(error = %err, "skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if let Some(name) = name_from_path(&relative) {
            names.push(name);
        }
    }
    Ok(names)
}

/// Reads a manifest from a directory, if present.
fn read_directory_manifest(root: &Path, relative: &str) -> Result<Option<String>, LoadError> {
    let path = root.join(relative);
    if !path.is_file() {
        return Ok(None);
    }
    let file = File::open(&path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    read_bounded(file, &path.display().to_string()).map(Some)
}

// ============================================================================
// SECTION: Archives
// ============================================================================

/// Lists manifest names inside an archive by streaming its entries.
fn list_archive(path: &Path) -> Result<Vec<TypeName>, ScanError> {
    let file = File::open(path).map_err(|source| ScanError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let mut reader = BufReader::new(file);
    let mut names = Vec::new();
    loop {
        let entry = zip::read::read_zipfile_from_stream(&mut reader).map_err(|source| {
            ScanError::Archive {
                path: path.display().to_string(),
                source,
            }
        })?;
        let Some(entry) = entry else {
            break;
        };
        if entry.is_dir() || entry.name().split('/').any(|segment| segment == METADATA_DIR) {
            continue;
        }
        if let Some(name) = name_from_path(entry.name()) {
            names.push(name);
        }
    }
    Ok(names)
}

/// Opened archives keyed by path, shared between clones of a class path.
#[derive(Clone, Default)]
struct ArchiveCache {
    /// One slot per archive path seen by a load.
    slots: Arc<Mutex<BTreeMap<PathBuf, ArchiveSlot>>>,
}

/// Cached state of one archive.
enum ArchiveSlot {
    /// Archive with its central directory read.
    Open(Box<ZipArchive<File>>),
    /// Archive that could not be opened; already logged.
    Unreadable,
}

impl fmt::Debug for ArchiveCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveCache").finish_non_exhaustive()
    }
}

impl ArchiveCache {
    /// Reads a manifest from the archive at `path`, opening it on first use.
    ///
    /// An archive that cannot be opened is logged once and then treated as
    /// holding no manifests.
    fn read(&self, path: &Path, relative: &str) -> Result<Option<String>, LoadError> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = match slots.entry(path.to_path_buf()) {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => vacant.insert(match open_archive(path) {
                Ok(archive) => ArchiveSlot::Open(Box::new(archive)),
                Err(err) => {
                    warn!(
                        location = %path.display(),
                        error = %err,
                        "skipping unreadable class path archive"
                    );
                    ArchiveSlot::Unreadable
                }
            }),
        };
        match slot {
            ArchiveSlot::Open(archive) => read_archive_manifest(archive, path, relative),
            ArchiveSlot::Unreadable => Ok(None),
        }
    }
}

/// Opens an archive and reads its central directory.
fn open_archive(path: &Path) -> Result<ZipArchive<File>, LoadError> {
    let location = path.display().to_string();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: location.clone(),
        source,
    })?;
    ZipArchive::new(file).map_err(|source| LoadError::Archive {
        path: location,
        source,
    })
}

/// Reads a manifest from an opened archive, if present.
fn read_archive_manifest(
    archive: &mut ZipArchive<File>,
    path: &Path,
    relative: &str,
) -> Result<Option<String>, LoadError> {
    let location = path.display().to_string();
    let entry = match archive.by_name(relative) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(source) => {
            return Err(LoadError::Archive {
                path: location,
                source,
            });
        }
    };
    read_bounded(entry, &format!("{location}!{relative}")).map(Some)
}

/// Reads UTF-8 text up to the manifest size limit.
fn read_bounded(reader: impl Read, location: &str) -> Result<String, LoadError> {
    let mut bytes = Vec::new();
    let limit = u64::try_from(MAX_MANIFEST_BYTES).unwrap_or(u64::MAX).saturating_add(1);
    reader.take(limit).read_to_end(&mut bytes).map_err(|source| LoadError::Io {
        path: location.to_string(),
        source,
    })?;
    if bytes.len() > MAX_MANIFEST_BYTES {
        return Err(LoadError::Manifest {
            path: location.to_string(),
            message: format!("manifest exceeds size limit of {MAX_MANIFEST_BYTES} bytes"),
        });
    }
    String::from_utf8(bytes).map_err(|_| LoadError::Manifest {
        path: location.to_string(),
        message: "manifest must be valid UTF-8".to_string(),
    })
}
