use std::path::{Path, PathBuf};

use super::clean_video_use_case::{CleanVideoUseCase, VideoReport};

/// Totals over one batch run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub videos_processed: usize,
    pub videos_failed: usize,
    pub raw_frames: usize,
    pub processed_frames: usize,
}

impl BatchReport {
    fn record(&mut self, report: &VideoReport) {
        self.videos_processed += 1;
        self.raw_frames += report.raw_frames;
        self.processed_frames += report.processed_frames;
    }
}

/// Cleans a list of videos one after another into the same output root.
///
/// A failing video is logged and counted; the remaining videos still run.
pub struct CleanBatchUseCase {
    video: CleanVideoUseCase,
}

impl CleanBatchUseCase {
    pub fn new(video: CleanVideoUseCase) -> Self {
        Self { video }
    }

    pub fn execute(&mut self, videos: &[PathBuf], output_root: &Path) -> BatchReport {
        let mut batch = BatchReport::default();

        for (i, path) in videos.iter().enumerate() {
            log::info!("[{}/{}] {}", i + 1, videos.len(), path.display());
            match self.video.execute(path, output_root) {
                Ok(report) => batch.record(&report),
                Err(e) => {
                    log::error!("Failed to clean {}: {e}", path.display());
                    batch.videos_failed += 1;
                }
            }
        }

        self.video.summary();
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blending::domain::edge_blender::EdgeBlender;
    use crate::inpainting::domain::inpainter::Inpainter;
    use crate::motion::domain::background_model::BackgroundModel;
    use crate::motion::domain::motion_mask_builder::MotionMaskBuilder;
    use crate::pipeline::frame_session::FrameCleaner;
    use crate::pipeline::pipeline_logger::NullPipelineLogger;
    use crate::shared::config::CleanerConfig;
    use crate::shared::frame::Frame;
    use crate::shared::plane::Plane;
    use crate::shared::stream_info::StreamInfo;
    use crate::video::domain::image_writer::ImageWriter;
    use crate::video::domain::video_reader::VideoReader;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Serves a fixed number of frames per video, keyed by file stem.
    /// Unknown stems fail to open.
    struct CatalogReader {
        catalog: Arc<HashMap<String, usize>>,
        remaining: usize,
    }

    impl VideoReader for CatalogReader {
        fn open(&mut self, path: &Path) -> Result<StreamInfo, Box<dyn std::error::Error>> {
            let stem = path.file_stem().unwrap().to_string_lossy().into_owned();
            let count = *self.catalog.get(&stem).ok_or("not a video")?;
            self.remaining = count;
            Ok(StreamInfo {
                width: 4,
                height: 4,
                fps: 25.0,
                frame_estimate: count,
                codec: "stub".into(),
            })
        }

        fn frames(
            &mut self,
        ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
            let count = std::mem::take(&mut self.remaining);
            Box::new((0..count).map(|i| {
                Ok::<_, Box<dyn std::error::Error>>(Frame::new(vec![0; 4 * 4 * 3], 4, 4, 3, i))
            }))
        }

        fn close(&mut self) {}
    }

    struct CountingWriter {
        writes: Arc<Mutex<usize>>,
    }

    impl ImageWriter for CountingWriter {
        fn write(&self, _path: &Path, _frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
            *self.writes.lock().unwrap() += 1;
            Ok(())
        }
    }

    struct StaticModel;

    impl BackgroundModel for StaticModel {
        fn apply(&mut self, frame: &Frame) -> Result<Plane, Box<dyn std::error::Error>> {
            Ok(Plane::zeros(frame.width(), frame.height()))
        }
    }

    struct Identity;

    impl Inpainter for Identity {
        fn inpaint(&self, frame: &Frame, _mask: &Plane) -> Result<Frame, Box<dyn std::error::Error>> {
            Ok(frame.clone())
        }
    }

    impl EdgeBlender for Identity {
        fn blend(&self, _frame: &mut Frame, _mask: &Plane) -> Result<(), Box<dyn std::error::Error>> {
            Ok(())
        }
    }

    fn batch_with(catalog: &[(&str, usize)], writes: Arc<Mutex<usize>>) -> CleanBatchUseCase {
        let catalog: Arc<HashMap<String, usize>> = Arc::new(
            catalog
                .iter()
                .map(|(name, count)| (name.to_string(), *count))
                .collect(),
        );
        let video = CleanVideoUseCase::new(
            Box::new(move || -> Box<dyn VideoReader> {
                Box::new(CatalogReader {
                    catalog: catalog.clone(),
                    remaining: 0,
                })
            }),
            Box::new(|| -> Box<dyn BackgroundModel> { Box::new(StaticModel) }),
            FrameCleaner::new(
                MotionMaskBuilder::new(&CleanerConfig::default()).unwrap(),
                Box::new(Identity),
                Box::new(Identity),
            ),
            Box::new(CountingWriter { writes }),
            Box::new(NullPipelineLogger),
        );
        CleanBatchUseCase::new(video)
    }

    #[test]
    fn test_totals_across_videos() {
        let dir = tempfile::tempdir().unwrap();
        let writes = Arc::new(Mutex::new(0));
        let mut batch = batch_with(&[("a", 3), ("b", 1), ("c", 0)], writes.clone());

        let videos: Vec<PathBuf> = ["a.mp4", "b.mp4", "c.mp4"].iter().map(PathBuf::from).collect();
        let report = batch.execute(&videos, dir.path());

        assert_eq!(
            report,
            BatchReport {
                videos_processed: 3,
                videos_failed: 0,
                raw_frames: 4,
                processed_frames: 2,
            }
        );
        assert_eq!(*writes.lock().unwrap(), 6);
    }

    #[test]
    fn test_non_video_counts_as_processed_with_no_frames() {
        let dir = tempfile::tempdir().unwrap();
        let mut batch = batch_with(&[("a", 2)], Arc::new(Mutex::new(0)));

        let videos = vec![PathBuf::from("notes.txt"), PathBuf::from("a.mp4")];
        let report = batch.execute(&videos, dir.path());

        assert_eq!(report.videos_processed, 2);
        assert_eq!(report.videos_failed, 0);
        assert_eq!(report.raw_frames, 2);
        assert!(dir.path().join("frames/notes").is_dir());
    }

    #[test]
    fn test_failed_video_does_not_stop_batch() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("processed")).unwrap();
        std::fs::write(dir.path().join("processed/a"), b"blocks the directory").unwrap();
        let mut batch = batch_with(&[("a", 2), ("b", 2)], Arc::new(Mutex::new(0)));

        let videos = vec![PathBuf::from("a.mp4"), PathBuf::from("b.mp4")];
        let report = batch.execute(&videos, dir.path());

        assert_eq!(report.videos_failed, 1);
        assert_eq!(report.videos_processed, 1);
        assert_eq!(report.raw_frames, 2);
        assert_eq!(report.processed_frames, 1);
    }

    #[test]
    fn test_empty_batch() {
        let dir = tempfile::tempdir().unwrap();
        let mut batch = batch_with(&[], Arc::new(Mutex::new(0)));
        assert_eq!(batch.execute(&[], dir.path()), BatchReport::default());
    }
}
