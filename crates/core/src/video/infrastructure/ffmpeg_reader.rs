use std::path::Path;

use ffmpeg_next::format::context::Input;
use ffmpeg_next::format::Pixel;
use ffmpeg_next::software::scaling;
use ffmpeg_next::util::error::EAGAIN;
use ffmpeg_next::util::frame::video::Video;

use crate::shared::frame::Frame;
use crate::shared::stream_info::StreamInfo;
use crate::video::domain::video_reader::VideoReader;

type FrameResult = Result<Frame, Box<dyn std::error::Error>>;

/// Reads the best video stream of a container through libav, scaling every
/// decoded picture to packed RGB24.
#[derive(Default)]
pub struct FfmpegReader {
    input: Option<Input>,
    stream_index: usize,
}

impl FfmpegReader {
    pub fn new() -> Self {
        Self::default()
    }
}

fn open_decoder(
    input: &Input,
    stream_index: usize,
) -> Result<ffmpeg_next::decoder::Video, Box<dyn std::error::Error>> {
    let stream = input
        .stream(stream_index)
        .ok_or("video stream index out of range")?;
    let context = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())?;
    Ok(context.decoder().video()?)
}

impl VideoReader for FfmpegReader {
    fn open(&mut self, path: &Path) -> Result<StreamInfo, Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;
        let input = ffmpeg_next::format::input(path)?;
        let stream = input
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or("no video stream")?;
        let stream_index = stream.index();
        let rate = stream.rate();
        let frame_estimate = stream.frames().max(0) as usize;

        let decoder = open_decoder(&input, stream_index)?;
        let info = StreamInfo {
            width: decoder.width(),
            height: decoder.height(),
            fps: match rate.denominator() {
                0 => 0.0,
                d => f64::from(rate.numerator()) / f64::from(d),
            },
            frame_estimate,
            codec: decoder
                .codec()
                .map(|codec| codec.name().to_string())
                .unwrap_or_default(),
        };

        self.stream_index = stream_index;
        self.input = Some(input);
        Ok(info)
    }

    fn frames(&mut self) -> Box<dyn Iterator<Item = FrameResult> + '_> {
        let stream_index = self.stream_index;
        let Some(input) = self.input.as_mut() else {
            return Box::new(std::iter::once(Err("reader is not open".into())));
        };
        match Decoding::start(input, stream_index) {
            Ok(decoding) => Box::new(decoding),
            Err(e) => Box::new(std::iter::once(Err(e))),
        }
    }

    fn close(&mut self) {
        self.input = None;
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Phase {
    Reading,
    Draining,
    Finished,
}

/// Pulls packets on demand, so only the current picture is held in memory.
struct Decoding<'a> {
    input: &'a mut Input,
    stream_index: usize,
    decoder: ffmpeg_next::decoder::Video,
    to_rgb: scaling::Context,
    next_index: usize,
    phase: Phase,
}

impl<'a> Decoding<'a> {
    fn start(
        input: &'a mut Input,
        stream_index: usize,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let decoder = open_decoder(input, stream_index)?;
        let to_rgb = scaling::Context::get(
            decoder.format(),
            decoder.width(),
            decoder.height(),
            Pixel::RGB24,
            decoder.width(),
            decoder.height(),
            scaling::Flags::BILINEAR,
        )?;
        Ok(Self {
            input,
            stream_index,
            decoder,
            to_rgb,
            next_index: 0,
            phase: Phase::Reading,
        })
    }

    /// `None` when the decoder needs more input or has nothing left.
    fn take_picture(&mut self) -> Option<FrameResult> {
        let mut picture = Video::empty();
        match self.decoder.receive_frame(&mut picture) {
            Ok(()) => {}
            Err(ffmpeg_next::Error::Eof) => {
                self.phase = Phase::Finished;
                return None;
            }
            Err(ffmpeg_next::Error::Other { errno }) if errno == EAGAIN => return None,
            Err(e) => {
                self.phase = Phase::Finished;
                return Some(Err(Box::new(e)));
            }
        }

        let mut rgb = Video::empty();
        if let Err(e) = self.to_rgb.run(&picture, &mut rgb) {
            self.phase = Phase::Finished;
            return Some(Err(Box::new(e)));
        }
        let frame = Frame::new(
            packed_rgb(&rgb),
            rgb.width(),
            rgb.height(),
            3,
            self.next_index,
        );
        self.next_index += 1;
        Some(Ok(frame))
    }

    fn feed(&mut self) {
        loop {
            let Some((stream, packet)) = self.input.packets().next() else {
                if let Err(e) = self.decoder.send_eof() {
                    log::debug!("Decoder refused end of stream: {e}");
                }
                self.phase = Phase::Draining;
                return;
            };
            if stream.index() != self.stream_index {
                continue;
            }
            match self.decoder.send_packet(&packet) {
                Ok(()) => return,
                Err(e) => log::debug!("Dropped packet before frame {}: {e}", self.next_index),
            }
        }
    }
}

impl Iterator for Decoding<'_> {
    type Item = FrameResult;

    fn next(&mut self) -> Option<FrameResult> {
        while self.phase != Phase::Finished {
            if let Some(result) = self.take_picture() {
                return Some(result);
            }
            match self.phase {
                Phase::Reading => self.feed(),
                Phase::Draining => self.phase = Phase::Finished,
                Phase::Finished => {}
            }
        }
        None
    }
}

/// Row-by-row copy that drops libav's line padding.
fn packed_rgb(picture: &Video) -> Vec<u8> {
    let row_bytes = picture.width() as usize * 3;
    picture
        .data(0)
        .chunks(picture.stride(0))
        .take(picture.height() as usize)
        .flat_map(|row| &row[..row_bytes])
        .copied()
        .collect()
}
