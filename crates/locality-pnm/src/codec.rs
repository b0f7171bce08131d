//! PPM header and sample encoding.
//!
//! A PPM stream is a magic number (`P3` plain or `P6` raw), the decimal
//! fields `width height maxval` separated by whitespace, then the raster.
//! A `#` in the header starts a comment that runs to the end of the line.
//! Raw samples take one byte when `maxval < 256` and two bytes big-endian
//! otherwise. Plain samples are whitespace-separated decimals.

use std::io::{self, BufRead, Write};

use crate::error::PnmError;

/// Magic number of a plain (ASCII) PPM.
pub const MAGIC_PLAIN: [u8; 2] = *b"P3";
/// Magic number of a raw (binary) PPM.
pub const MAGIC_RAW: [u8; 2] = *b"P6";
/// Largest legal `maxval`.
pub const MAX_MAXVAL: u16 = u16::MAX;

/// PPM raster encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PpmFormat {
    /// `P3`: decimal samples.
    Plain,
    /// `P6`: binary samples.
    Raw,
}

impl PpmFormat {
    /// The two magic bytes that open a stream in this format.
    pub fn magic(self) -> [u8; 2] {
        match self {
            Self::Plain => MAGIC_PLAIN,
            Self::Raw => MAGIC_RAW,
        }
    }

    /// The format opened by `magic`, if any.
    pub fn from_magic(magic: [u8; 2]) -> Option<Self> {
        match magic {
            MAGIC_PLAIN => Some(Self::Plain),
            MAGIC_RAW => Some(Self::Raw),
            _ => None,
        }
    }
}

/// Parsed PPM header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PpmHeader {
    /// Raster encoding.
    pub format: PpmFormat,
    /// Columns.
    pub width: usize,
    /// Rows.
    pub height: usize,
    /// Maximum sample value, in `1..=65535`.
    pub maxval: u16,
}

impl PpmHeader {
    /// Bytes per raw sample: 1 below 256, else 2.
    pub fn bytes_per_sample(&self) -> usize {
        if self.maxval < 256 {
            1
        } else {
            2
        }
    }

    /// Bytes per raw pixel.
    pub fn bytes_per_pixel(&self) -> usize {
        3 * self.bytes_per_sample()
    }

    /// Total pixels in the raster.
    pub fn pixel_count(&self) -> usize {
        self.width.saturating_mul(self.height)
    }
}

/// Outcome of scanning one decimal field.
enum Field {
    Value(u32),
    Eof,
    Invalid(String),
}

fn peek_byte<R: BufRead>(r: &mut R) -> io::Result<Option<u8>> {
    loop {
        match r.fill_buf() {
            Ok(buf) => return Ok(buf.first().copied()),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Skip whitespace and `#` comments.
fn skip_separators<R: BufRead>(r: &mut R) -> io::Result<()> {
    while let Some(b) = peek_byte(r)? {
        if b.is_ascii_whitespace() {
            r.consume(1);
        } else if b == b'#' {
            r.consume(1);
            let mut discard = Vec::new();
            r.read_until(b'\n', &mut discard)?;
        } else {
            break;
        }
    }
    Ok(())
}

/// Scan one decimal field, leaving its terminator unread.
fn read_field<R: BufRead>(r: &mut R) -> io::Result<Field> {
    skip_separators(r)?;
    let mut value: Option<u32> = None;
    loop {
        match peek_byte(r)? {
            Some(b @ b'0'..=b'9') => {
                r.consume(1);
                let digit = u32::from(b - b'0');
                match value.unwrap_or(0).checked_mul(10).and_then(|v| v.checked_add(digit)) {
                    Some(v) => value = Some(v),
                    None => return Ok(Field::Invalid("number too large".to_string())),
                }
            }
            Some(b) if (b.is_ascii_whitespace() || b == b'#') && value.is_some() => break,
            None => break,
            Some(b) => {
                return Ok(Field::Invalid(format!(
                    "unexpected byte {:?}",
                    char::from(b)
                )))
            }
        }
    }
    Ok(value.map_or(Field::Eof, Field::Value))
}

fn header_field<R: BufRead>(r: &mut R, name: &str) -> Result<u32, PnmError> {
    match read_field(r)? {
        Field::Value(v) => Ok(v),
        Field::Eof => Err(PnmError::MalformedHeader {
            detail: format!("missing {name}"),
        }),
        Field::Invalid(detail) => Err(PnmError::MalformedHeader {
            detail: format!("{name}: {detail}"),
        }),
    }
}

/// Read and validate a PPM header, leaving `r` at the first raster byte.
pub fn read_header<R: BufRead>(r: &mut R) -> Result<PpmHeader, PnmError> {
    let mut magic = [0u8; 2];
    r.read_exact(&mut magic).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => PnmError::MalformedHeader {
            detail: "missing magic number".to_string(),
        },
        _ => PnmError::Io(e),
    })?;
    let format = PpmFormat::from_magic(magic).ok_or(PnmError::BadMagic { found: magic })?;
    let width = header_field(r, "width")?;
    let height = header_field(r, "height")?;
    let maxval = header_field(r, "maxval")?;
    // Exactly one whitespace byte separates maxval from the raster.
    match peek_byte(r)? {
        Some(b) if b.is_ascii_whitespace() => r.consume(1),
        None => {}
        Some(b) => {
            let found = char::from(b);
            return Err(PnmError::MalformedHeader {
                detail: format!("maxval followed by {found:?} instead of whitespace"),
            });
        }
    }
    let maxval = match u16::try_from(maxval) {
        Ok(v) if v > 0 => v,
        _ => {
            return Err(PnmError::MalformedHeader {
                detail: format!("maxval {maxval} outside 1..={MAX_MAXVAL}"),
            })
        }
    };
    let header = PpmHeader {
        format,
        width: width as usize,
        height: height as usize,
        maxval,
    };
    log::debug!(
        "ppm header: {:?} {}x{} maxval {}",
        header.format,
        header.width,
        header.height,
        header.maxval
    );
    Ok(header)
}

/// Write `header` as `magic\nwidth height\nmaxval\n`.
pub fn write_header<W: Write>(w: &mut W, header: &PpmHeader) -> Result<(), PnmError> {
    w.write_all(&header.format.magic())?;
    write!(w, "\n{} {}\n{}\n", header.width, header.height, header.maxval)?;
    Ok(())
}

/// Read one plain sample, or `None` at end of input.
pub fn read_plain_sample<R: BufRead>(r: &mut R) -> Result<Option<u32>, PnmError> {
    match read_field(r)? {
        Field::Value(v) => Ok(Some(v)),
        Field::Eof => Ok(None),
        Field::Invalid(detail) => Err(PnmError::MalformedRaster { detail }),
    }
}

/// Decode one raw sample of `bytes.len()` (1 or 2) bytes.
pub fn decode_raw_sample(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0u32, |acc, &b| (acc << 8) | u32::from(b))
}

/// Encode `value` into `out`, which is 1 or 2 bytes long.
pub fn encode_raw_sample(out: &mut [u8], value: u16) {
    if let [byte] = out {
        *byte = value as u8;
    } else {
        out.copy_from_slice(&value.to_be_bytes());
    }
}

/// `value` as a sample, if it does not exceed `maxval`.
pub fn check_sample(value: u32, maxval: u16) -> Result<u16, PnmError> {
    if value > u32::from(maxval) {
        return Err(PnmError::SampleOutOfRange { value, maxval });
    }
    Ok(value as u16)
}
