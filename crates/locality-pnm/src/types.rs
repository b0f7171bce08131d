//! Pixel and image types.

use std::fmt;

use locality_array::Storage;
use locality_core::{Array2, ArrayError};

/// One RGB pixel with samples scaled by the owning image's denominator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red sample.
    pub red: u16,
    /// Green sample.
    pub green: u16,
    /// Blue sample.
    pub blue: u16,
}

impl Rgb {
    /// Create a pixel from its three samples.
    pub const fn new(red: u16, green: u16, blue: u16) -> Self {
        Self { red, green, blue }
    }

    /// Largest of the three samples.
    pub fn max_sample(self) -> u16 {
        self.red.max(self.green).max(self.blue)
    }
}

/// A decoded PPM image.
///
/// The pixels live in whatever [`Storage`] the caller chose, so the same
/// image can be walked in row-major, column-major or block-major order.
pub struct Pixmap {
    denominator: u16,
    pixels: Box<dyn Array2<Rgb>>,
}

impl Pixmap {
    /// A black `width x height` image.
    pub fn new(
        width: usize,
        height: usize,
        denominator: u16,
        storage: Storage,
    ) -> Result<Self, ArrayError> {
        Ok(Self {
            denominator,
            pixels: storage.create(width, height)?,
        })
    }

    /// Wrap existing pixels.
    pub fn from_pixels(denominator: u16, pixels: Box<dyn Array2<Rgb>>) -> Self {
        Self {
            denominator,
            pixels,
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.pixels.height()
    }

    /// Maximum sample value (the PPM `maxval`).
    pub fn denominator(&self) -> u16 {
        self.denominator
    }

    /// The pixel array.
    pub fn pixels(&self) -> &dyn Array2<Rgb> {
        self.pixels.as_ref()
    }

    /// Mutable access to the pixel array.
    pub fn pixels_mut(&mut self) -> &mut dyn Array2<Rgb> {
        self.pixels.as_mut()
    }

    /// Replace the pixels, keeping the denominator.
    ///
    /// Dimensions may change, as after a rotation.
    pub fn with_pixels(self, pixels: Box<dyn Array2<Rgb>>) -> Self {
        Self {
            denominator: self.denominator,
            pixels,
        }
    }
}

impl fmt::Debug for Pixmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pixmap")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("denominator", &self.denominator)
            .field("default_order", &self.pixels.default_order())
            .finish()
    }
}
