use ndarray::Array3;
use serde::{Deserialize, Serialize};

/// Advisory statistics over a cleaned array. Purely observational; never
/// blocks or alters a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrayStats {
    pub min: f32,
    pub max: f32,
    pub mean: f32,
    pub std_dev: f32,
    pub nan_replaced: usize,
}

impl ArrayStats {
    /// Compute stats over an already-cleaned array. Mean and standard
    /// deviation accumulate in f64 to keep large rasters stable.
    pub fn from_cleaned(array: &Array3<f32>, nan_replaced: usize) -> Self {
        let len = array.len();
        if len == 0 {
            return Self {
                min: 0.0,
                max: 0.0,
                mean: 0.0,
                std_dev: 0.0,
                nan_replaced,
            };
        }

        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut sum = 0.0_f64;
        for &value in array.iter() {
            min = min.min(value);
            max = max.max(value);
            sum += value as f64;
        }
        let mean = sum / len as f64;

        let variance = array
            .iter()
            .map(|&v| {
                let d = v as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / len as f64;

        Self {
            min,
            max,
            mean: mean as f32,
            std_dev: variance.sqrt() as f32,
            nan_replaced,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Value range: [{:.3}, {:.3}], Mean: {:.3}, Std: {:.3}, NaN replaced: {}",
            self.min, self.max, self.mean, self.std_dev, self.nan_replaced
        )
    }
}
