//! Background frame loading to keep the UI thread responsive.

use std::path::PathBuf;

use tokio::sync::mpsc;

use crate::core::assets::{self, AssetError, FrameSet, FrameSize};

pub enum AssetUpdate {
    FramesLoaded {
        dir: PathBuf,
        result: Result<FrameSet, AssetError>,
    },
}

/// Decode every frame in `dir` on a worker thread.  Exactly one update is
/// sent, success or failure.
pub fn spawn_frame_load(tx: mpsc::UnboundedSender<AssetUpdate>, dir: PathBuf, size: FrameSize) {
    std::thread::spawn(move || {
        let t0 = std::time::Instant::now();
        let result = assets::load_frame_dir(&dir, size);
        tracing::debug!(
            dir = %dir.display(),
            ok = result.is_ok(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "frame load finished"
        );
        let _ = tx.send(AssetUpdate::FramesLoaded { dir, result });
    });
}
