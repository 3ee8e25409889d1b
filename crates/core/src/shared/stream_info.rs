/// What the decoder reports about a video stream before any frame is read.
#[derive(Clone, Debug, PartialEq)]
pub struct StreamInfo {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    /// Container's frame count; 0 when unknown. Only used for progress.
    pub frame_estimate: usize,
    pub codec: String,
}

impl StreamInfo {
    /// One-line summary for log output.
    pub fn summary(&self) -> String {
        let frames = match self.frame_estimate {
            0 => "unknown length".to_string(),
            n => format!("~{n} frames"),
        };
        format!(
            "{}x{}, {:.2} fps, {frames}, {}",
            self.width, self.height, self.fps, self.codec
        )
    }
}
