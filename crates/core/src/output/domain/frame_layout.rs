use std::path::{Path, PathBuf};

use crate::shared::constants::{FRAME_EXTENSION, PROCESSED_FRAMES_DIR, RAW_FRAMES_DIR};

/// Where one video's frames land under the output root:
/// `<root>/frames/<name>/<i>.png` and `<root>/processed/<name>/<i>.png`.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameLayout {
    root: PathBuf,
    video_name: String,
}

impl FrameLayout {
    pub fn new(root: impl Into<PathBuf>, video_name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            video_name: video_name.into(),
        }
    }

    /// Layout keyed by the file stem of `video_path` (`clip.mp4` -> `clip`).
    ///
    /// Paths without a usable stem fall back to the lossy file name.
    pub fn for_video(root: impl Into<PathBuf>, video_path: &Path) -> Self {
        Self::new(root, video_name(video_path))
    }

    pub fn video_name(&self) -> &str {
        &self.video_name
    }

    pub fn raw_dir(&self) -> PathBuf {
        self.root.join(RAW_FRAMES_DIR).join(&self.video_name)
    }

    pub fn processed_dir(&self) -> PathBuf {
        self.root.join(PROCESSED_FRAMES_DIR).join(&self.video_name)
    }

    pub fn raw_path(&self, index: usize) -> PathBuf {
        self.raw_dir().join(frame_file_name(index))
    }

    pub fn processed_path(&self, index: usize) -> PathBuf {
        self.processed_dir().join(frame_file_name(index))
    }
}

pub fn video_name(video_path: &Path) -> String {
    video_path
        .file_stem()
        .or_else(|| video_path.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn frame_file_name(index: usize) -> String {
    format!("{index}.{FRAME_EXTENSION}")
}
