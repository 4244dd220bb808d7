use ndarray::Array3;

/// Decoded raster pixels in band-major order: `[bands, height, width]`.
///
/// Values are widened to `f32` on load and may contain NaN markers until
/// [`RasterData::zero_fill_nan`] is called.
#[derive(Debug, Clone)]
pub struct RasterData {
    data: Array3<f32>,
}

impl RasterData {
    pub fn new(data: Array3<f32>) -> Self {
        Self { data }
    }

    pub fn bands(&self) -> usize {
        self.data.shape()[0]
    }

    pub fn height(&self) -> usize {
        self.data.shape()[1]
    }

    pub fn width(&self) -> usize {
        self.data.shape()[2]
    }

    pub fn shape(&self) -> [usize; 3] {
        [self.bands(), self.height(), self.width()]
    }

    pub fn as_array(&self) -> &Array3<f32> {
        &self.data
    }

    /// Replace every NaN sample with 0.0, returning how many were replaced.
    /// Finite values pass through exactly; no clamping or scaling.
    pub fn zero_fill_nan(&mut self) -> usize {
        let mut replaced = 0;
        for value in self.data.iter_mut() {
            if value.is_nan() {
                *value = 0.0;
                replaced += 1;
            }
        }
        replaced
    }

    /// Count of samples per band that are exactly zero, used to flag bands
    /// that were entirely missing before cleaning.
    pub fn zero_band_indices(&self) -> Vec<usize> {
        (0..self.bands())
            .filter(|&band| {
                self.data
                    .index_axis(ndarray::Axis(0), band)
                    .iter()
                    .all(|&v| v == 0.0)
            })
            .collect()
    }
}
