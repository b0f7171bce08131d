use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use locality_array::Storage;
use locality_core::MapOrder;
use locality_pnm::{read_ppm, write_ppm, Pixmap};
use locality_transform::{apply_transform, Transform};

use crate::argparse::RunConfig;
use crate::utils::{append_line, open_input};

pub(crate) fn ppmtrans(config: RunConfig) -> Result<()> {
    log::debug!("{config:?}");

    let stdout = io::stdout().lock();
    match &config.input {
        Some(path) => {
            let input = BufReader::new(open_input(path)?);
            run(&config, input, BufWriter::new(stdout))
        }
        None => run(&config, io::stdin().lock(), BufWriter::new(stdout)),
    }
}

/// Read, transform and write one image.
pub(crate) fn run<R: BufRead, W: Write>(config: &RunConfig, input: R, output: W) -> Result<()> {
    let pixmap = read_ppm(input, config.storage).context("reading input PPM")?;
    let pixels = pixmap.width() * pixmap.height();

    let (pixmap, elapsed) =
        transform_pixmap(pixmap, config.transform, config.storage, config.order)?;
    log::info!(
        "{} of {pixels} pixels in {} order took {:?}",
        config.transform,
        config.order,
        elapsed
    );

    if let Some(path) = &config.time_file {
        append_line(path, &timing_line(elapsed, pixels))?;
    }

    write_ppm(output, &pixmap).context("writing output PPM")?;
    Ok(())
}

/// Apply `transform` to every pixel, timing only the traversal.
pub(crate) fn transform_pixmap(
    pixmap: Pixmap,
    transform: Transform,
    storage: Storage,
    order: MapOrder,
) -> Result<(Pixmap, Duration)> {
    let timer = Instant::now();
    let rotated = apply_transform(pixmap.pixels(), storage, transform, order)
        .with_context(|| format!("applying {transform} in {order} order"))?;
    let elapsed = timer.elapsed();
    Ok((pixmap.with_pixels(rotated), elapsed))
}

pub(crate) fn timing_line(elapsed: Duration, pixels: usize) -> String {
    let total = elapsed.as_nanos();
    let per_pixel = total / (pixels.max(1) as u128);
    format!("Total Time: {total} ns, Time/Pixel: {per_pixel} ns")
}

#[cfg(test)]
mod tests {
    use super::*;
    use locality_array::BlockSizing;
    use std::path::PathBuf;

    fn config(transform: Transform, storage: Storage, order: MapOrder) -> RunConfig {
        RunConfig {
            input: None,
            transform,
            order,
            storage,
            time_file: None,
            verbose: false,
        }
    }

    // 2x1 image: red then blue.
    const INPUT: &[u8] = b"P3 2 1 255\n255 0 0  0 0 255\n";

    #[test]
    fn rotate_90_writes_tall_image() {
        let mut out = Vec::new();
        let c = config(Transform::Rotate90, Storage::Plain, MapOrder::RowMajor);
        run(&c, INPUT, &mut out).unwrap();
        assert_eq!(out, b"P6\n1 2\n255\n\xff\x00\x00\x00\x00\xff");
    }

    #[test]
    fn every_order_produces_the_same_bytes() {
        let mut outputs = Vec::new();
        for (storage, order) in [
            (Storage::Plain, MapOrder::RowMajor),
            (Storage::Plain, MapOrder::ColMajor),
            (Storage::Blocked(BlockSizing::Fixed(1)), MapOrder::BlockMajor),
        ] {
            let mut out = Vec::new();
            run(&config(Transform::FlipHorizontal, storage, order), INPUT, &mut out).unwrap();
            outputs.push(out);
        }
        assert_eq!(outputs[0], b"P6\n2 1\n255\n\x00\x00\xff\xff\x00\x00");
        assert!(outputs.iter().all(|o| *o == outputs[0]));
    }

    #[test]
    fn order_unsupported_by_storage_fails() {
        let c = config(Transform::Rotate0, Storage::Plain, MapOrder::BlockMajor);
        let err = run(&c, INPUT, Vec::new()).unwrap_err();
        assert!(format!("{err:#}").contains("block-major"));
    }

    #[test]
    fn malformed_input_reports_context() {
        let c = config(Transform::Rotate0, Storage::Plain, MapOrder::RowMajor);
        let err = run(&c, &b"P9 1 1 255\n"[..], Vec::new()).unwrap_err();
        assert!(err.to_string().contains("reading input PPM"));
    }

    #[test]
    fn timing_is_appended() {
        let path: PathBuf =
            std::env::temp_dir().join(format!("ppmtrans-timing-{}.txt", std::process::id()));
        let mut c = config(Transform::Transpose, Storage::Plain, MapOrder::RowMajor);
        c.time_file = Some(path.clone());
        run(&c, INPUT, Vec::new()).unwrap();
        run(&c, INPUT, Vec::new()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().all(|l| l.starts_with("Total Time: ") && l.ends_with(" ns")));
    }

    #[test]
    fn timing_line_divides_by_pixels() {
        assert_eq!(
            timing_line(Duration::from_nanos(1000), 8),
            "Total Time: 1000 ns, Time/Pixel: 125 ns"
        );
        assert_eq!(
            timing_line(Duration::from_nanos(7), 0),
            "Total Time: 7 ns, Time/Pixel: 7 ns"
        );
    }
}
