use crate::error::{ConversionError, Result};
use crate::models::RasterData;
use ndarray::{Array3, ErrorKind, ShapeError};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::ColorType;

/// Reads every band of a GeoTIFF into a single `[bands, height, width]`
/// array, widening integer samples to f32.
///
/// Both band layouts seen in practice are handled: pixel-interleaved
/// samples within one directory, and planar files that store one band per
/// directory. Georeferencing tags are ignored.
pub struct GeoTiffReader;

impl GeoTiffReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_raster(&self, path: &Path) -> Result<RasterData> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut decoder = Decoder::new(reader)?.with_limits(Limits::unlimited());

        let mut data: Vec<f32> = Vec::new();
        let mut bands = 0;
        let mut directory = 0;
        let mut expected_dims: Option<(usize, usize)> = None;

        loop {
            let (width, height) = decoder.dimensions()?;
            let (height, width) = (height as usize, width as usize);

            match expected_dims {
                None => expected_dims = Some((height, width)),
                Some((expected_height, expected_width)) => {
                    if (height, width) != (expected_height, expected_width) {
                        return Err(ConversionError::BandShapeMismatch {
                            directory,
                            height,
                            width,
                            expected_height,
                            expected_width,
                        });
                    }
                }
            }

            let samples = samples_per_pixel(&decoder.colortype()?)?;
            let buffer = decode_to_f32(decoder.read_image()?)?;

            let pixels = height * width;
            if buffer.len() != pixels * samples {
                return Err(ShapeError::from_kind(ErrorKind::IncompatibleShape).into());
            }

            if samples == 1 {
                data.extend_from_slice(&buffer);
            } else {
                // De-interleave [h, w, samples] into band-major order
                data.reserve(buffer.len());
                for sample in 0..samples {
                    for pixel in 0..pixels {
                        data.push(buffer[pixel * samples + sample]);
                    }
                }
            }

            bands += samples;
            directory += 1;

            if !decoder.more_images() {
                break;
            }
            decoder.next_image()?;
        }

        let (height, width) = expected_dims.unwrap_or((0, 0));
        let array = Array3::from_shape_vec((bands, height, width), data)?;

        Ok(RasterData::new(array))
    }
}

impl Default for GeoTiffReader {
    fn default() -> Self {
        Self::new()
    }
}

fn samples_per_pixel(color: &ColorType) -> Result<usize> {
    match color {
        ColorType::Gray(_) => Ok(1),
        ColorType::RGB(_) => Ok(3),
        ColorType::RGBA(_) => Ok(4),
        ColorType::CMYK(_) => Ok(4),
        ColorType::Multiband { num_samples, .. } => Ok(*num_samples as usize),
        other => Err(ConversionError::UnsupportedSampleFormat(format!(
            "{:?}",
            other
        ))),
    }
}

fn decode_to_f32(result: DecodingResult) -> Result<Vec<f32>> {
    let buffer = match result {
        DecodingResult::U8(data) => data.iter().map(|&x| x as f32).collect(),
        DecodingResult::U16(data) => data.iter().map(|&x| x as f32).collect(),
        DecodingResult::U32(data) => data.iter().map(|&x| x as f32).collect(),
        DecodingResult::U64(data) => data.iter().map(|&x| x as f32).collect(),
        DecodingResult::I8(data) => data.iter().map(|&x| x as f32).collect(),
        DecodingResult::I16(data) => data.iter().map(|&x| x as f32).collect(),
        DecodingResult::I32(data) => data.iter().map(|&x| x as f32).collect(),
        DecodingResult::I64(data) => data.iter().map(|&x| x as f32).collect(),
        DecodingResult::F32(data) => data,
        DecodingResult::F64(data) => data.iter().map(|&x| x as f32).collect(),
        _ => {
            return Err(ConversionError::UnsupportedSampleFormat(
                "sample type has no f32 widening".to_string(),
            ))
        }
    };

    Ok(buffer)
}
