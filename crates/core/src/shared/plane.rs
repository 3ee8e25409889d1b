/// A single-channel 8-bit raster, row-major.
///
/// Used for grayscale frames and for motion masks. Masks follow the
/// convention 0 = static, anything else = moving.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plane {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Plane {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize),
            "data length must equal width * height"
        );
        Self {
            data,
            width,
            height,
        }
    }

    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self::new(
            vec![value; (width as usize) * (height as usize)],
            width,
            height,
        )
    }

    pub fn zeros(width: u32, height: u32) -> Self {
        Self::filled(width, height, 0)
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

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width as usize + x]
    }

    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    pub fn is_empty_mask(&self) -> bool {
        self.data.iter().all(|&v| v == 0)
    }
}
