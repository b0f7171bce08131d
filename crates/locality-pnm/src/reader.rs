//! PPM decoding into a [`Pixmap`].

use std::io::{BufRead, Read};

use locality_array::Storage;
use locality_core::Array2;

use crate::codec::{
    check_sample, decode_raw_sample, read_header, read_plain_sample, PpmFormat, PpmHeader,
};
use crate::error::PnmError;
use crate::types::{Pixmap, Rgb};

/// Decode a `P3` or `P6` image, storing its pixels with `storage`.
///
/// Pixels are written in raster order whatever the storage. Generic over
/// `R: BufRead` so tests can use `&[u8]` and production code can use
/// `BufReader<File>` or a locked stdin.
///
/// # Examples
///
/// ```
/// use locality_array::Storage;
/// use locality_pnm::{read_ppm, Rgb};
///
/// let pixmap = read_ppm(&b"P3 2 1 15\n15 0 0  0 0 15\n"[..], Storage::Plain).unwrap();
/// assert_eq!((pixmap.width(), pixmap.height()), (2, 1));
/// assert_eq!(*pixmap.pixels().at(1, 0), Rgb::new(0, 0, 15));
/// ```
pub fn read_ppm<R: BufRead>(mut reader: R, storage: Storage) -> Result<Pixmap, PnmError> {
    let header = read_header(&mut reader)?;
    let raster = match header.format {
        PpmFormat::Plain => read_plain_raster(&mut reader, &header)?,
        PpmFormat::Raw => read_raw_raster(&mut reader, &header)?,
    };
    // The array is only allocated once the raster has arrived in full.
    let mut pixmap = Pixmap::new(header.width, header.height, header.maxval, storage)?;
    store_raster(pixmap.pixels_mut(), header.width, &raster);
    Ok(pixmap)
}

fn store_raster(pixels: &mut dyn Array2<Rgb>, width: usize, raster: &[Rgb]) {
    for (i, pixel) in raster.iter().enumerate() {
        *pixels.at_mut(i % width, i / width) = *pixel;
    }
}

fn read_plain_raster<R: BufRead>(reader: &mut R, header: &PpmHeader) -> Result<Vec<Rgb>, PnmError> {
    let expected = header.pixel_count();
    let mut raster = Vec::new();
    while raster.len() < expected {
        let mut samples = [0u16; 3];
        for sample in &mut samples {
            let value = read_plain_sample(reader)?.ok_or(PnmError::Truncated {
                expected,
                found: raster.len(),
            })?;
            *sample = check_sample(value, header.maxval)?;
        }
        let [red, green, blue] = samples;
        raster.push(Rgb::new(red, green, blue));
    }
    Ok(raster)
}

fn read_raw_raster<R: BufRead>(reader: &mut R, header: &PpmHeader) -> Result<Vec<Rgb>, PnmError> {
    let expected = header.pixel_count();
    let bytes_per_sample = header.bytes_per_sample();
    let bytes_per_pixel = header.bytes_per_pixel();
    let raster_len = expected.saturating_mul(bytes_per_pixel);
    let mut bytes = Vec::new();
    let limit = raster_len as u64;
    let n = reader.by_ref().take(limit).read_to_end(&mut bytes)?;
    if n < raster_len {
        return Err(PnmError::Truncated {
            expected,
            found: n / bytes_per_pixel,
        });
    }
    let mut raster = Vec::with_capacity(expected);
    for pixel in bytes.chunks_exact(bytes_per_pixel) {
        let mut samples = [0u16; 3];
        for (sample, bytes) in samples.iter_mut().zip(pixel.chunks_exact(bytes_per_sample)) {
            *sample = check_sample(decode_raw_sample(bytes), header.maxval)?;
        }
        let [red, green, blue] = samples;
        raster.push(Rgb::new(red, green, blue));
    }
    Ok(raster)
}
