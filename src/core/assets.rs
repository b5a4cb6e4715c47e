//! Frame-sequence assets — discovery and all-or-nothing loading.
//!
//! A frame set is a directory of numbered images.  Every frame is decoded and
//! fitted to a fixed size up front; if any single frame fails the whole set
//! is rejected and nothing is retried.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::imageops::FilterType;
use thiserror::Error;
use walkdir::WalkDir;

/// Extensions accepted as frames (lower-case).
const FRAME_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp", "tif", "tiff"];

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("no frame images found in {0}")]
    EmptyDirectory(PathBuf),
    #[error("frame {index} ({path}) failed to load: {source}")]
    Load {
        index: usize,
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("cannot read frame directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Pixel box every frame is fitted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl Default for FrameSize {
    fn default() -> Self {
        Self {
            width: 160,
            height: 90,
        }
    }
}

/// A fully loaded, immutable frame sequence.
#[derive(Debug, Clone)]
pub struct FrameSet {
    frames: Vec<Arc<image::RgbaImage>>,
}

impl FrameSet {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<image::RgbaImage>> {
        self.frames.get(index)
    }
}

fn is_frame_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| FRAME_EXTENSIONS.contains(&ext.as_str()))
}

/// Sequence number of a frame: the last run of digits in its file stem.
fn frame_number(path: &Path) -> Option<u64> {
    let stem = path.file_stem()?.to_string_lossy();
    let digits: String = stem
        .chars()
        .rev()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    digits.parse().ok()
}

/// List frame images directly inside `dir` in sequence order.
///
/// Numbered files sort by their number (so `frame_2` precedes `frame_10`);
/// files without a number follow, by name.
pub fn discover_frames(dir: &Path) -> Result<Vec<PathBuf>, AssetError> {
    let mut frames = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_file() && is_frame_file(entry.path()) {
            frames.push(entry.into_path());
        }
    }
    if frames.is_empty() {
        return Err(AssetError::EmptyDirectory(dir.to_path_buf()));
    }
    frames.sort_by_cached_key(|p| {
        (
            frame_number(p).unwrap_or(u64::MAX),
            p.file_name().map(|n| n.to_os_string()),
        )
    });
    Ok(frames)
}

/// Decode every frame in order, fitting each into `size`.
///
/// Stops at the first failure.
pub fn load_frames(paths: &[PathBuf], size: FrameSize) -> Result<FrameSet, AssetError> {
    let mut frames = Vec::with_capacity(paths.len());
    for (index, path) in paths.iter().enumerate() {
        let img = image::open(path).map_err(|source| AssetError::Load {
            index,
            path: path.clone(),
            source,
        })?;
        let fitted = img.resize(size.width, size.height, FilterType::Triangle);
        frames.push(Arc::new(fitted.to_rgba8()));
    }
    if frames.is_empty() {
        let dir = paths
            .first()
            .and_then(|p| p.parent())
            .map(Path::to_path_buf)
            .unwrap_or_default();
        return Err(AssetError::EmptyDirectory(dir));
    }
    tracing::debug!(count = frames.len(), "frame set decoded");
    Ok(FrameSet { frames })
}

/// [`discover_frames`] followed by [`load_frames`].
pub fn load_frame_dir(dir: &Path, size: FrameSize) -> Result<FrameSet, AssetError> {
    let paths = discover_frames(dir)?;
    load_frames(&paths, size)
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn discovers_only_images_in_name_order() {
        let dir = scratch_dir("discover");
        write_png(&dir.join("002.png"), 20);
        write_png(&dir.join("001.png"), 10);
        std::fs::write(dir.join("notes.txt"), "not a frame").unwrap();

        let found = discover_frames(&dir).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["001.png", "002.png"]);
    }

    #[test]
    fn unpadded_frame_numbers_sort_numerically() {
        let dir = scratch_dir("unpadded");
        for n in [10, 2, 1] {
            write_png(&dir.join(format!("frame_{n}.png")), n as u8);
        }
        write_png(&dir.join("poster.png"), 0);

        let names: Vec<_> = discover_frames(&dir)
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["frame_1.png", "frame_2.png", "frame_10.png", "poster.png"]);
    }

    #[test]
    fn frame_number_takes_last_digit_run() {
        assert_eq!(frame_number(Path::new("shot2_0007.png")), Some(7));
        assert_eq!(frame_number(Path::new("12.jpg")), Some(12));
        assert_eq!(frame_number(Path::new("cover.png")), None);
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = scratch_dir("empty");
        assert!(matches!(
            discover_frames(&dir),
            Err(AssetError::EmptyDirectory(_))
        ));
    }

    #[test]
    fn loads_and_fits_frames() {
        let dir = scratch_dir("fit");
        write_png(&dir.join("a.png"), 0);
        write_png(&dir.join("b.png"), 255);
        let set = load_frame_dir(&dir, FrameSize { width: 4, height: 4 }).unwrap();
        assert_eq!(set.len(), 2);
        let first = set.get(0).unwrap();
        assert!(first.width() <= 4 && first.height() <= 4);
    }

    #[test]
    fn one_bad_frame_fails_the_whole_set() {
        let dir = scratch_dir("bad");
        write_png(&dir.join("1.png"), 0);
        std::fs::write(dir.join("2.png"), b"definitely not a png").unwrap();
        write_png(&dir.join("3.png"), 0);

        let err = load_frame_dir(&dir, FrameSize::default()).unwrap_err();
        match err {
            AssetError::Load { index, path, .. } => {
                assert_eq!(index, 1);
                assert!(path.ends_with("2.png"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
