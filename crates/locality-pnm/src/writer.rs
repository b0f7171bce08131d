//! PPM encoding from a [`Pixmap`].
//!
//! The raster is gathered with the pixmap's default traversal, so a
//! blocked pixmap is read tile by tile and scattered into raster order.

use std::io::Write;

use crate::codec::{encode_raw_sample, write_header, PpmFormat, PpmHeader};
use crate::error::PnmError;
use crate::types::{Pixmap, Rgb};

/// Encode `pixmap` as a raw `P6` image.
///
/// # Examples
///
/// ```
/// use locality_array::Storage;
/// use locality_pnm::{read_ppm, write_ppm, Pixmap};
///
/// let pixmap = Pixmap::new(2, 2, 255, Storage::Plain).unwrap();
/// let mut out = Vec::new();
/// write_ppm(&mut out, &pixmap).unwrap();
/// assert!(out.starts_with(b"P6\n2 2\n255\n"));
/// assert_eq!(read_ppm(out.as_slice(), Storage::Plain).unwrap().width(), 2);
/// ```
pub fn write_ppm<W: Write>(writer: W, pixmap: &Pixmap) -> Result<(), PnmError> {
    write_ppm_as(writer, pixmap, PpmFormat::Raw)
}

/// Encode `pixmap` in the given format.
///
/// Returns `Err(PnmError::SampleOutOfRange)` if any sample exceeds the
/// pixmap's denominator, and `Err(PnmError::MalformedHeader)` if the
/// denominator is 0.
pub fn write_ppm_as<W: Write>(
    mut writer: W,
    pixmap: &Pixmap,
    format: PpmFormat,
) -> Result<(), PnmError> {
    let header = PpmHeader {
        format,
        width: pixmap.width(),
        height: pixmap.height(),
        maxval: pixmap.denominator(),
    };
    if header.maxval == 0 {
        return Err(PnmError::MalformedHeader {
            detail: "denominator must be at least 1".to_string(),
        });
    }
    let raster = gather_raster(pixmap)?;
    write_header(&mut writer, &header)?;
    match format {
        PpmFormat::Raw => {
            let bytes_per_sample = header.bytes_per_sample();
            let mut bytes = vec![0u8; raster.len() * header.bytes_per_pixel()];
            for (out, px) in bytes.chunks_exact_mut(bytes_per_sample).zip(
                raster
                    .iter()
                    .flat_map(|px| [px.red, px.green, px.blue]),
            ) {
                encode_raw_sample(out, px);
            }
            writer.write_all(&bytes)?;
        }
        PpmFormat::Plain => {
            for row in raster.chunks(header.width) {
                for px in row {
                    writeln!(writer, "{} {} {}", px.red, px.green, px.blue)?;
                }
            }
        }
    }
    writer.flush()?;
    Ok(())
}

/// Pixels in raster order, rejecting samples above the denominator.
fn gather_raster(pixmap: &Pixmap) -> Result<Vec<Rgb>, PnmError> {
    let width = pixmap.width();
    let maxval = pixmap.denominator();
    let mut raster = vec![Rgb::default(); width * pixmap.height()];
    let mut too_large = None;
    pixmap.pixels().for_each_default(&mut |col, row, px| {
        if px.max_sample() > maxval {
            too_large.get_or_insert(px.max_sample());
        }
        raster[row * width + col] = *px;
    });
    match too_large {
        Some(value) => Err(PnmError::SampleOutOfRange {
            value: u32::from(value),
            maxval,
        }),
        None => Ok(raster),
    }
}
