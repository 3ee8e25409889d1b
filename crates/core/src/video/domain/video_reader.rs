use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::stream_info::StreamInfo;

/// Decoded frames of one video, pulled one at a time.
pub trait VideoReader {
    /// Fails when the file is missing or holds no decodable video stream.
    fn open(&mut self, path: &Path) -> Result<StreamInfo, Box<dyn std::error::Error>>;

    /// Frames in decode order as packed RGB, indexed from 0. A decode
    /// failure is yielded in place of the frame it would have produced.
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;

    /// Drops the open file, if any. Calling it twice is fine.
    fn close(&mut self);
}

/// Each video gets its own reader.
pub type VideoReaderFactory = Box<dyn Fn() -> Box<dyn VideoReader>>;
