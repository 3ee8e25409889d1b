use std::path::Path;
use std::time::Instant;

use crate::motion::domain::background_model::BackgroundModelFactory;
use crate::output::domain::frame_layout::FrameLayout;
use crate::output::infrastructure::directory_provisioner;
use crate::shared::frame::Frame;
use crate::video::domain::image_writer::ImageWriter;
use crate::video::domain::video_reader::{VideoReader, VideoReaderFactory};

use super::frame_session::{FrameCleaner, FrameSession};
use super::pipeline_logger::PipelineLogger;

/// Frames written for one video.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VideoReport {
    pub name: String,
    pub raw_frames: usize,
    pub processed_frames: usize,
}

impl VideoReport {
    fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

/// Cleans one video end to end.
///
/// Every decoded frame is written to `<root>/frames/<name>/<i>.png`; every
/// frame after the first is also cleaned and written to
/// `<root>/processed/<name>/<i>.png`. A fresh reader and background model
/// are created per video; the mask, inpaint and blend stages are reused.
pub struct CleanVideoUseCase {
    reader_factory: VideoReaderFactory,
    model_factory: BackgroundModelFactory,
    cleaner: FrameCleaner,
    writer: Box<dyn ImageWriter>,
    logger: Box<dyn PipelineLogger>,
}

impl CleanVideoUseCase {
    pub fn new(
        reader_factory: VideoReaderFactory,
        model_factory: BackgroundModelFactory,
        cleaner: FrameCleaner,
        writer: Box<dyn ImageWriter>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            reader_factory,
            model_factory,
            cleaner,
            writer,
            logger,
        }
    }

    /// Fails only when an output directory cannot be provisioned, a frame
    /// cannot be written, or a cleaning stage errors. A file that does not
    /// open as a video yields an empty report; a decode error mid-stream
    /// ends the video early.
    pub fn execute(
        &mut self,
        video_path: &Path,
        output_root: &Path,
    ) -> Result<VideoReport, Box<dyn std::error::Error>> {
        let layout = FrameLayout::for_video(output_root, video_path);
        directory_provisioner::ensure(&layout.raw_dir())?;
        directory_provisioner::ensure(&layout.processed_dir())?;

        let mut reader = (self.reader_factory)();
        let info = match reader.open(video_path) {
            Ok(info) => info,
            Err(e) => {
                log::warn!("Skipping {}: not a readable video ({e})", video_path.display());
                reader.close();
                return Ok(VideoReport::empty(layout.video_name()));
            }
        };

        self.logger.info(&format!(
            "Cleaning {} ({})",
            video_path.display(),
            info.summary()
        ));

        let result = self.process_frames(reader.as_mut(), &layout, info.frame_estimate);
        reader.close();
        let report = result?;

        self.logger.info(&format!(
            "Finished {}: {} raw, {} processed",
            report.name, report.raw_frames, report.processed_frames
        ));
        Ok(report)
    }

    pub fn summary(&self) {
        self.logger.summary();
    }

    fn process_frames(
        &mut self,
        reader: &mut dyn VideoReader,
        layout: &FrameLayout,
        frame_estimate: usize,
    ) -> Result<VideoReport, Box<dyn std::error::Error>> {
        let mut report = VideoReport::empty(layout.video_name());
        let mut session = FrameSession::new((self.model_factory)());

        for decoded in reader.frames() {
            let frame = match decoded {
                Ok(frame) => frame,
                Err(e) => {
                    log::warn!(
                        "Decode error in {} after {} frame(s), stopping: {e}",
                        layout.video_name(),
                        report.raw_frames
                    );
                    break;
                }
            };

            let index = session.frame_index();
            self.write_frame(&layout.raw_path(index), &frame)?;
            report.raw_frames += 1;

            if let Some(cleaned) = session.step(&frame, &mut self.cleaner, self.logger.as_mut())? {
                self.write_frame(&layout.processed_path(index), &cleaned)?;
                report.processed_frames += 1;
            }

            self.logger.progress(index + 1, frame_estimate);
        }

        Ok(report)
    }

    fn write_frame(&mut self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        let t0 = Instant::now();
        self.writer
            .write(path, frame)
            .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
        self.logger.timing("write", t0.elapsed().as_secs_f64() * 1000.0);
        Ok(())
    }
}
