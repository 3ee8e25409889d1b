/// Subdirectory of the output root holding unmodified decoded frames.
pub const RAW_FRAMES_DIR: &str = "frames";
/// Subdirectory of the output root holding cleaned frames.
pub const PROCESSED_FRAMES_DIR: &str = "processed";
pub const FRAME_EXTENSION: &str = "png";

pub const DEFAULT_INPUT_DIR: &str = "all_videos";
pub const DEFAULT_OUTPUT_DIR: &str = "save";
pub const DEFAULT_VIDEO_PATTERN: &str = "*";

pub const DEFAULT_HISTORY: usize = 700;
pub const DEFAULT_VAR_THRESHOLD: f32 = 25.0;
pub const DEFAULT_DIFF_THRESHOLD: u8 = 25;
pub const DEFAULT_MORPH_KERNEL: (usize, usize) = (3, 3);
pub const DEFAULT_DIFF_BLUR_KERNEL: usize = 5;
pub const DEFAULT_EDGE_BLUR_KERNEL: usize = 21;
pub const DEFAULT_INPAINT_RADIUS: usize = 7;

/// Progress lines are logged every this many frames.
pub const PROGRESS_THROTTLE_FRAMES: usize = 30;
