// SPDX-License-Identifier: MPL-2.0
//! Optional `catalog.toml` media manifest.
//!
//! When the asset directory contains a `catalog.toml`, it replaces the
//! built-in catalog. All paths inside it are relative to the asset directory.
//!
//! ```toml
//! video = "zumbavideo.mp4"
//!
//! [[entries]]
//! image = "gallery/birthday.jpg"
//! audio = "birthday-song.mp3"
//! title = "Happy Birthday!"
//!
//! [[entries]]
//! image = "present1.png"
//! audio = "gift.mp3"
//! title = "Your Birthday Present"
//! kind = "gift"
//!
//! [[photos]]
//! src = "images/beach.jpg"
//! date = "2014-06-28"
//! location = "Glastonbury"
//! ```

use crate::domain::catalog::{Catalog, CatalogEntry, EntryKind, Photo};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const MANIFEST_FILE: &str = "catalog.toml";

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
enum ManifestKind {
    #[default]
    Normal,
    SpecialVideo,
    Gift,
}

impl From<ManifestKind> for EntryKind {
    fn from(kind: ManifestKind) -> Self {
        match kind {
            ManifestKind::Normal => EntryKind::Normal,
            ManifestKind::SpecialVideo => EntryKind::SpecialVideo,
            ManifestKind::Gift => EntryKind::Gift,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    image: String,
    #[serde(default)]
    audio: Option<String>,
    title: String,
    #[serde(default)]
    kind: ManifestKind,
}

#[derive(Debug, Deserialize)]
struct ManifestPhoto {
    src: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    location: String,
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    video: Option<String>,
    #[serde(default)]
    entries: Vec<ManifestEntry>,
    #[serde(default)]
    photos: Vec<ManifestPhoto>,
}

impl TryFrom<Manifest> for Catalog {
    type Error = Error;

    fn try_from(manifest: Manifest) -> Result<Self> {
        let entries = manifest
            .entries
            .into_iter()
            .map(|e| CatalogEntry {
                image: e.image,
                audio: e.audio,
                title: e.title,
                kind: e.kind.into(),
            })
            .collect();
        let photos = manifest
            .photos
            .into_iter()
            .map(|p| Photo {
                src: p.src,
                date: p.date,
                location: p.location,
            })
            .collect();

        Catalog::new(entries, manifest.video, photos)
            .map_err(|issue| Error::Config(issue.to_string()))
    }
}

/// Parses and validates a manifest file.
///
/// # Errors
///
/// [`Error::Io`] when the file cannot be read, [`Error::Config`] when it is
/// not valid TOML or describes an unusable catalog.
pub fn load_catalog_from_path(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path)?;
    let manifest: Manifest = toml::from_str(&content)?;
    Catalog::try_from(manifest)
}

/// Loads the catalog for an asset directory.
///
/// Falls back to the built-in catalog when there is no manifest, or, with a
/// warning, when the manifest cannot be used.
pub fn load_catalog(asset_dir: &Path) -> (Catalog, Option<String>) {
    let path = asset_dir.join(MANIFEST_FILE);
    if !path.exists() {
        return (Catalog::default(), None);
    }

    match load_catalog_from_path(&path) {
        Ok(catalog) => (catalog, None),
        Err(err) => (
            Catalog::default(),
            Some(format!(
                "ignoring {}, using the built-in catalog: {}",
                path.display(),
                err
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const VALID: &str = r#"
video = "clip.mp4"

[[entries]]
image = "a.jpg"
audio = "a.mp3"
title = "A"

[[entries]]
image = "b.jpg"
title = "B"
kind = "special-video"

[[entries]]
image = "c.png"
audio = "c.mp3"
title = "C"
kind = "gift"

[[photos]]
src = "p.jpg"
date = "2020-01-01"
location = "Here"
"#;

    #[test]
    fn parses_entries_in_order() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join(MANIFEST_FILE);
        fs::write(&path, VALID).expect("write");

        let catalog = load_catalog_from_path(&path).expect("valid manifest");
        let kinds: Vec<_> = catalog.entries().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![EntryKind::Normal, EntryKind::SpecialVideo, EntryKind::Gift]
        );
        assert_eq!(catalog.video(), Some("clip.mp4"));
        assert_eq!(catalog.photos()[0].location, "Here");
    }

    #[test]
    fn missing_manifest_uses_builtin_catalog() {
        let dir = tempdir().expect("temp dir");
        let (catalog, warning) = load_catalog(dir.path());
        assert_eq!(catalog, Catalog::default());
        assert!(warning.is_none());
    }

    #[test]
    fn invalid_manifest_warns_and_uses_builtin() {
        let dir = tempdir().expect("temp dir");
        fs::write(
            dir.path().join(MANIFEST_FILE),
            "[[entries]]\nimage = \"a.jpg\"\ntitle = \"A\"\n",
        )
        .expect("write");

        let (catalog, warning) = load_catalog(dir.path());
        assert_eq!(catalog, Catalog::default());
        let warning = warning.expect("warning");
        assert!(warning.contains("audio"));
    }

    #[test]
    fn empty_manifest_is_rejected() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join(MANIFEST_FILE);
        fs::write(&path, "").expect("write");
        assert!(matches!(
            load_catalog_from_path(&path),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join(MANIFEST_FILE);
        fs::write(
            &path,
            "[[entries]]\nimage = \"a\"\naudio = \"a\"\ntitle = \"A\"\nkind = \"hologram\"\n",
        )
        .expect("write");
        assert!(matches!(
            load_catalog_from_path(&path),
            Err(Error::Config(_))
        ));
    }
}
