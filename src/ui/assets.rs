// SPDX-License-Identifier: MPL-2.0
//! Image handles for files in the asset directory.

use iced::widget::image::Handle;
use std::path::{Path, PathBuf};

/// Resolves a catalog reference against the asset directory.
#[must_use]
pub fn resolve(assets_dir: &Path, reference: &str) -> PathBuf {
    assets_dir.join(reference)
}

/// Handle for an asset image. Iced keys path handles by path, so repeated
/// calls hit the same cached texture.
#[must_use]
pub fn image_handle(assets_dir: &Path, reference: &str) -> Handle {
    Handle::from_path(resolve(assets_dir, reference))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn references_are_relative_to_asset_dir() {
        let path = resolve(Path::new("/srv/party"), "gallery/rock.jpg");
        assert_eq!(path, PathBuf::from("/srv/party/gallery/rock.jpg"));
    }
}
