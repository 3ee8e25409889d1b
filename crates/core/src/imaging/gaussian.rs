/// ROI rectangle within a frame, used to pass region coordinates without many arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoiRect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

/// Fixed binomial kernels used for small sizes when sigma is derived
/// from the kernel size.
const SMALL_KERNELS: [&[f32]; 4] = [
    &[1.0],
    &[0.25, 0.5, 0.25],
    &[0.0625, 0.25, 0.375, 0.25, 0.0625],
    &[0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125],
];

/// Sigma implied by a kernel size: `0.3 * ((k - 1) / 2 - 1) + 0.8`.
pub fn sigma_for_kernel(kernel_size: usize) -> f64 {
    0.3 * ((kernel_size as f64 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Precompute a normalised 1D Gaussian kernel of the given size.
///
/// `kernel_size` must be odd and >= 1. Sizes up to 7 use the fixed
/// binomial tables, larger sizes sample a Gaussian with
/// [`sigma_for_kernel`].
pub fn gaussian_kernel_1d(kernel_size: usize) -> Vec<f32> {
    debug_assert!(kernel_size >= 1 && kernel_size % 2 == 1);
    if let Some(table) = SMALL_KERNELS.get(kernel_size / 2) {
        return table.to_vec();
    }
    let sigma = sigma_for_kernel(kernel_size);
    let half = (kernel_size / 2) as f64;
    let mut kernel_f64: Vec<f64> = (0..kernel_size)
        .map(|i| {
            let x = i as f64 - half;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = kernel_f64.iter().sum();
    for v in &mut kernel_f64 {
        *v /= sum;
    }
    kernel_f64.iter().map(|&v| v as f32).collect()
}

/// Maps an out-of-range coordinate back into `0..len` by mirroring
/// without repeating the edge pixel (`gfedcb|abcdefgh|gfedcba`).
pub fn reflect_101(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let len = len as isize;
    let period = 2 * (len - 1);
    let m = i.rem_euclid(period);
    (if m >= len { period - m } else { m }) as usize
}

/// Convenience wrapper that builds the kernel and allocates its own temp buffer.
pub fn separable_gaussian_blur(
    data: &mut [u8],
    width: usize,
    height: usize,
    channels: usize,
    kernel_size: usize,
) {
    if kernel_size <= 1 || width == 0 || height == 0 {
        return;
    }
    let kernel = gaussian_kernel_1d(kernel_size);
    let mut temp = Vec::new();
    separable_gaussian_blur_with_kernel(data, width, height, channels, &kernel, &mut temp);
}

/// Apply a separable Gaussian blur using a pre-computed kernel, reusing `temp`.
///
/// Borders are handled with [`reflect_101`]; the buffer is treated in
/// isolation, so an ROI never samples pixels outside itself.
pub fn separable_gaussian_blur_with_kernel(
    data: &mut [u8],
    width: usize,
    height: usize,
    channels: usize,
    kernel: &[f32],
    temp: &mut Vec<f32>,
) {
    let kernel_size = kernel.len();
    if kernel_size <= 1 || width == 0 || height == 0 {
        return;
    }
    let half = (kernel_size / 2) as isize;

    let needed = width * height * channels;
    temp.resize(needed, 0.0);

    // Horizontal pass: data → temp
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut sum = 0.0f32;
                for (k, &w) in kernel.iter().enumerate() {
                    let sx = reflect_101(x as isize + k as isize - half, width);
                    sum += data[(y * width + sx) * channels + c] as f32 * w;
                }
                temp[(y * width + x) * channels + c] = sum;
            }
        }
    }

    // Vertical pass: temp → data
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut sum = 0.0f32;
                for (k, &w) in kernel.iter().enumerate() {
                    let sy = reflect_101(y as isize + k as isize - half, height);
                    sum += temp[(sy * width + x) * channels + c] * w;
                }
                data[(y * width + x) * channels + c] = sum.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

/// Extract a rectangular ROI from frame data into a reusable buffer.
pub fn extract_roi(
    data: &[u8],
    frame_width: usize,
    channels: usize,
    rect: RoiRect,
    roi: &mut Vec<u8>,
) {
    roi.resize(rect.w * rect.h * channels, 0);
    for row in 0..rect.h {
        let src_offset = ((rect.y + row) * frame_width + rect.x) * channels;
        let dst_offset = row * rect.w * channels;
        roi[dst_offset..dst_offset + rect.w * channels]
            .copy_from_slice(&data[src_offset..src_offset + rect.w * channels]);
    }
}

/// Write a blurred ROI buffer back into frame data.
pub fn write_roi_back(
    data: &mut [u8],
    roi: &[u8],
    frame_width: usize,
    channels: usize,
    rect: RoiRect,
) {
    for row in 0..rect.h {
        let dst_offset = ((rect.y + row) * frame_width + rect.x) * channels;
        let src_offset = row * rect.w * channels;
        data[dst_offset..dst_offset + rect.w * channels]
            .copy_from_slice(&roi[src_offset..src_offset + rect.w * channels]);
    }
}
