use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use frame_cleaner_core::blending::infrastructure::contour_edge_blender::ContourEdgeBlender;
use frame_cleaner_core::inpainting::infrastructure::telea_inpainter::TeleaInpainter;
use frame_cleaner_core::motion::domain::background_model::BackgroundModel;
use frame_cleaner_core::motion::domain::motion_mask_builder::MotionMaskBuilder;
use frame_cleaner_core::motion::infrastructure::mog2_background_model::Mog2BackgroundModel;
use frame_cleaner_core::pipeline::clean_batch_use_case::CleanBatchUseCase;
use frame_cleaner_core::pipeline::clean_video_use_case::CleanVideoUseCase;
use frame_cleaner_core::pipeline::frame_session::FrameCleaner;
use frame_cleaner_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use frame_cleaner_core::pipeline::video_discovery;
use frame_cleaner_core::shared::config::CleanerConfig;
use frame_cleaner_core::shared::constants::{
    DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR, DEFAULT_VIDEO_PATTERN,
};
use frame_cleaner_core::video::domain::video_reader::VideoReader;
use frame_cleaner_core::video::infrastructure::ffmpeg_reader::FfmpegReader;
use frame_cleaner_core::video::infrastructure::image_file_writer::ImageFileWriter;

/// Extract video frames and remove moving objects from them.
#[derive(Parser)]
#[command(name = "frame-cleaner")]
struct Cli {
    /// Directory searched for input videos.
    #[arg(long, default_value = DEFAULT_INPUT_DIR)]
    input_dir: PathBuf,

    /// Glob matched against file names in the input directory.
    #[arg(long, default_value = DEFAULT_VIDEO_PATTERN)]
    pattern: String,

    /// Root for frames/<video>/ and processed/<video>/.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CleanerConfig::default();
    config.validate()?;

    let videos = video_discovery::discover(&cli.input_dir, &cli.pattern)?;
    if videos.is_empty() {
        log::warn!(
            "No files in {} match {:?}",
            cli.input_dir.display(),
            cli.pattern
        );
        return Ok(());
    }
    log::info!("Found {} candidate video(s)", videos.len());

    let mut batch = build_batch(&config)?;
    let report = batch.execute(&videos, &cli.output_dir);

    log::info!(
        "Done: {} video(s) cleaned, {} failed, {} raw / {} processed frames in {}",
        report.videos_processed,
        report.videos_failed,
        report.raw_frames,
        report.processed_frames,
        output_summary_path(&cli.output_dir).display()
    );
    Ok(())
}

fn build_batch(config: &CleanerConfig) -> Result<CleanBatchUseCase, Box<dyn std::error::Error>> {
    let (history, var_threshold) = (config.history, config.var_threshold);

    let video = CleanVideoUseCase::new(
        Box::new(|| -> Box<dyn VideoReader> { Box::new(FfmpegReader::new()) }),
        Box::new(move || -> Box<dyn BackgroundModel> {
            Box::new(Mog2BackgroundModel::new(history, var_threshold))
        }),
        FrameCleaner::new(
            MotionMaskBuilder::new(config)?,
            Box::new(TeleaInpainter::new(config.inpaint_radius)),
            Box::new(ContourEdgeBlender::new(config.edge_blur_kernel)),
        ),
        Box::new(ImageFileWriter::new()),
        Box::new(StdoutPipelineLogger::default()),
    );
    Ok(CleanBatchUseCase::new(video))
}

fn output_summary_path(output_dir: &Path) -> PathBuf {
    std::fs::canonicalize(output_dir).unwrap_or_else(|_| output_dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["frame-cleaner"]);
        assert_eq!(cli.input_dir, PathBuf::from("all_videos"));
        assert_eq!(cli.pattern, "*");
        assert_eq!(cli.output_dir, PathBuf::from("save"));
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "frame-cleaner",
            "--input-dir",
            "clips",
            "--pattern",
            "*.mp4",
            "--output-dir",
            "out",
        ]);
        assert_eq!(cli.input_dir, PathBuf::from("clips"));
        assert_eq!(cli.pattern, "*.mp4");
        assert_eq!(cli.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_batch_over_non_videos_writes_no_frames() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        std::fs::write(input.path().join("notes.txt"), b"plain text").unwrap();

        let videos = video_discovery::discover(input.path(), "*").unwrap();
        let report = build_batch(&CleanerConfig::default())
            .unwrap()
            .execute(&videos, output.path());

        assert_eq!(report.videos_processed, 1);
        assert_eq!(report.raw_frames, 0);
        assert!(output.path().join("frames/notes").is_dir());
    }

    #[test]
    fn test_missing_input_dir_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            input_dir: dir.path().join("all_videos"),
            pattern: "*".to_string(),
            output_dir: dir.path().join("save"),
        };
        assert!(run(cli).is_ok());
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            input_dir: dir.path().to_path_buf(),
            pattern: "clip[0-9".to_string(),
            output_dir: dir.path().join("save"),
        };
        let err = run(cli).unwrap_err();
        assert!(err.to_string().contains("invalid pattern"));
    }

    #[test]
    fn test_output_summary_path_falls_back_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("not-yet");
        assert_eq!(output_summary_path(&missing), missing);
    }
}
