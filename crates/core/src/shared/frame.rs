use crate::shared::plane::Plane;

/// A single decoded video frame: contiguous RGB bytes in row-major order.
///
/// Pixel format conversion happens at I/O boundaries only; everything in
/// between works on packed RGB24.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Luma plane using the BT.601 weights in 14-bit fixed point, so the
    /// result is bit-exact across platforms.
    ///
    /// Single-channel frames are copied as-is.
    pub fn to_gray(&self) -> Plane {
        let channels = self.channels as usize;
        let gray = if channels < 3 {
            self.data.iter().step_by(channels.max(1)).copied().collect()
        } else {
            self.data
                .chunks_exact(channels)
                .map(|px| {
                    let (r, g, b) = (px[0] as u32, px[1] as u32, px[2] as u32);
                    ((r * 4899 + g * 9617 + b * 1868 + (1 << 13)) >> 14) as u8
                })
                .collect()
        };
        Plane::new(gray, self.width, self.height)
    }
}
