// SPDX-License-Identifier: MPL-2.0
//! Media catalog: the ordered gallery entries and the photo-stack manifest.
//!
//! The catalog is immutable once built. Entries are identified by their
//! position, and that order is the paging order of the gallery.

/// What happens when a gallery entry is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryKind {
    /// Plays the entry's audio and opens the photo stack.
    #[default]
    Normal,
    /// Opens the looping video overlay.
    SpecialVideo,
    /// Drives the unwrap sequence in place.
    Gift,
}

/// One selectable unit in the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub image: String,
    pub audio: Option<String>,
    pub title: String,
    pub kind: EntryKind,
}

impl CatalogEntry {
    pub fn normal(image: &str, audio: &str, title: &str) -> Self {
        Self {
            image: image.to_string(),
            audio: Some(audio.to_string()),
            title: title.to_string(),
            kind: EntryKind::Normal,
        }
    }

    pub fn special_video(image: &str, title: &str) -> Self {
        Self {
            image: image.to_string(),
            audio: None,
            title: title.to_string(),
            kind: EntryKind::SpecialVideo,
        }
    }

    pub fn gift(image: &str, audio: &str, title: &str) -> Self {
        Self {
            image: image.to_string(),
            audio: Some(audio.to_string()),
            title: title.to_string(),
            kind: EntryKind::Gift,
        }
    }

    #[must_use]
    pub fn is_gift(&self) -> bool {
        self.kind == EntryKind::Gift
    }
}

/// A photo shown in the polaroid stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub src: String,
    /// ISO date (`YYYY-MM-DD`), may be empty.
    pub date: String,
    pub location: String,
}

impl Photo {
    pub fn new(src: &str, date: &str, location: &str) -> Self {
        Self {
            src: src.to_string(),
            date: date.to_string(),
            location: location.to_string(),
        }
    }
}

/// Reasons a catalog is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    Empty,
    MissingAudio { index: usize },
    MissingVideo,
    NoPhotos,
}

impl std::fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogIssue::Empty => write!(f, "catalog has no entries"),
            CatalogIssue::MissingAudio { index } => {
                write!(f, "entry {} needs an audio reference", index)
            }
            CatalogIssue::MissingVideo => {
                write!(f, "catalog has a special video entry but no video file")
            }
            CatalogIssue::NoPhotos => write!(f, "photo stack manifest is empty"),
        }
    }
}

/// Everything the experience can show, in paging order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    video: Option<String>,
    photos: Vec<Photo>,
}

impl Catalog {
    /// Builds a catalog, rejecting combinations the coordinator cannot honor.
    pub fn new(
        entries: Vec<CatalogEntry>,
        video: Option<String>,
        photos: Vec<Photo>,
    ) -> Result<Self, CatalogIssue> {
        if entries.is_empty() {
            return Err(CatalogIssue::Empty);
        }

        for (index, entry) in entries.iter().enumerate() {
            match entry.kind {
                EntryKind::Normal | EntryKind::Gift if entry.audio.is_none() => {
                    return Err(CatalogIssue::MissingAudio { index });
                }
                EntryKind::SpecialVideo if video.is_none() => {
                    return Err(CatalogIssue::MissingVideo);
                }
                _ => {}
            }
        }

        if photos.is_empty() && entries.iter().any(|e| e.kind == EntryKind::Normal) {
            return Err(CatalogIssue::NoPhotos);
        }

        Ok(Self {
            entries,
            video,
            photos,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed catalog; kept for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn video(&self) -> Option<&str> {
        self.video.as_deref()
    }

    #[must_use]
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }
}

impl Default for Catalog {
    /// The built-in birthday catalog.
    fn default() -> Self {
        Self {
            entries: vec![
                CatalogEntry::normal("gallery/birthday.jpg", "birthday-song.mp3", "Happy Birthday!"),
                CatalogEntry::normal("gallery/baroque.jpg", "Baroque.mp3", "Classical Baroque"),
                CatalogEntry::normal("gallery/kpop1.jpg", "Kpop1.mp3", "K-Pop Vibes"),
                CatalogEntry::normal("gallery/kpop2.jpg", "Kpop2.mp3", "More K-Pop"),
                CatalogEntry::normal("gallery/rock.jpg", "Rock.mp3", "Rock Anthems"),
                CatalogEntry::special_video("gallery/zumba.jpg", "Zumba K-Pop Mix"),
                CatalogEntry::gift("present1.png", "Zumba X Kpop.mp3", "Your Birthday Present"),
            ],
            video: Some("zumbavideo.mp4".to_string()),
            photos: default_photos(),
        }
    }
}

fn default_photos() -> Vec<Photo> {
    vec![
        Photo::new("images/IMG_20140628_6853_Glastonbury.JPG", "2014-06-28", "Glastonbury"),
        Photo::new("images/IMG_20150912_8620_Thailand.JPG", "2015-09-12", "Thailand"),
        Photo::new("images/IMG_20161013_125239_Lisbon.jpg", "2016-10-13", "Lisbon"),
        Photo::new("images/IMG_20170527_201715_Suffolk.jpg", "2017-05-27", "Suffolk"),
        Photo::new("images/IMG_20170819_152654_Dublin.jpg", "2017-08-19", "Dublin"),
        Photo::new("images/IMG_20171028_195124_Octagon_Days.jpg", "2017-10-28", "Octagon Days"),
        Photo::new("images/IMG_20181013_113530_Japan.jpg", "2018-10-13", "Japan"),
        Photo::new("images/IMG_20181013_113716_Japan.jpg", "2018-10-13", "Japan"),
        Photo::new("images/IMG_20181013_170345_Japan.jpg", "2018-10-13", "Japan"),
        Photo::new("images/IMG_20181014_124912_Japan.jpg", "2018-10-14", "Japan"),
        Photo::new("images/IMG_20190308_135145_Italy.jpg", "2019-03-08", "Italy"),
        Photo::new("images/IMG_20190309_113439_Italy.jpg", "2019-03-09", "Italy"),
        Photo::new("images/IMG_20200813_174619_Leahurst_Days.jpg", "2020-08-13", "Leahurst Days"),
        Photo::new("images/IMG_20200820_164145_Cotswolds.jpg", "2020-08-20", "Cotswolds"),
        Photo::new("images/IMG_20240506_114928757_Galway.jpg", "2024-05-06", "Galway"),
        Photo::new("images/IMG_20240506_114934589_Galway.jpg", "2024-05-06", "Galway"),
        Photo::new("images/IMG_20240920_200706775_Hastings.jpg", "2024-09-20", "Hastings"),
        Photo::new("images/IMG-20240912-WA0001_Our_House.jpg", "2024-09-12", "Our House"),
        Photo::new("images/IMG-20240926-WA0010_Hastings.jpg", "2024-09-26", "Hastings"),
        Photo::new("images/IMG-20240926-WA0012_Hastings.jpg", "2024-09-26", "Hastings"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_valid() {
        let catalog = Catalog::default();
        let rebuilt = Catalog::new(
            catalog.entries().to_vec(),
            catalog.video().map(str::to_string),
            catalog.photos().to_vec(),
        );
        assert_eq!(rebuilt, Ok(catalog));
    }

    #[test]
    fn default_catalog_has_one_gift_and_one_video() {
        let catalog = Catalog::default();
        let gifts = catalog.entries().iter().filter(|e| e.is_gift()).count();
        let videos = catalog
            .entries()
            .iter()
            .filter(|e| e.kind == EntryKind::SpecialVideo)
            .count();
        assert_eq!(gifts, 1);
        assert_eq!(videos, 1);
        assert_eq!(catalog.photos().len(), 20);
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert_eq!(
            Catalog::new(Vec::new(), None, Vec::new()),
            Err(CatalogIssue::Empty)
        );
    }

    #[test]
    fn normal_entry_without_audio_is_rejected() {
        let mut entry = CatalogEntry::normal("a.jpg", "a.mp3", "A");
        entry.audio = None;
        let photos = vec![Photo::new("p.jpg", "", "")];
        assert_eq!(
            Catalog::new(vec![entry], None, photos),
            Err(CatalogIssue::MissingAudio { index: 0 })
        );
    }

    #[test]
    fn special_video_requires_video_file() {
        let entries = vec![CatalogEntry::special_video("v.jpg", "V")];
        assert_eq!(
            Catalog::new(entries, None, Vec::new()),
            Err(CatalogIssue::MissingVideo)
        );
    }

    #[test]
    fn normal_entries_require_photos() {
        let entries = vec![CatalogEntry::normal("a.jpg", "a.mp3", "A")];
        assert_eq!(
            Catalog::new(entries, None, Vec::new()),
            Err(CatalogIssue::NoPhotos)
        );
    }

    #[test]
    fn gift_only_catalog_needs_no_photos() {
        let entries = vec![CatalogEntry::gift("g.png", "g.mp3", "G")];
        let catalog = Catalog::new(entries, None, Vec::new()).expect("valid");
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get(0).is_some_and(CatalogEntry::is_gift));
        assert!(catalog.get(1).is_none());
    }
}
