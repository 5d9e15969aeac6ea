//! Pixel-scale calibration codec.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use super::PersistError;

const HEADER: &str = "pix\ttenths of mm";

/// Pixel-to-distance calibration pair for converting tracked positions to
/// physical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// Vertical pixel distance between two ruled markings in the
    /// calibration clip.
    pub pixel_span: u32,
    /// Physical distance between the markings, in tenths of a millimeter.
    pub tenths_of_mm: f64,
}

/// Write the calibration pair to `<base>.clb`. The distance is stored
/// absolute.
pub fn write_calibration(
    calibration: Calibration,
    base: impl AsRef<Path>,
) -> Result<(), PersistError> {
    let path = base.as_ref().with_extension("clb");
    let mut out = BufWriter::new(File::create(&path)?);
    writeln!(out, "{HEADER}")?;
    writeln!(
        out,
        "{}\t{}",
        calibration.pixel_span,
        calibration.tenths_of_mm.abs()
    )?;
    out.flush()?;
    Ok(())
}

/// Load a calibration pair from `path`.
pub fn load_calibration(path: impl AsRef<Path>) -> Result<Calibration, PersistError> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let mut lines = reader.lines();

    match lines.next() {
        Some(header) => {
            header?;
        }
        None => {
            return Err(PersistError::MissingHeader {
                path: path.to_path_buf(),
            });
        }
    }

    let row = match lines.next() {
        Some(row) => row?,
        None => {
            return Err(PersistError::Malformed {
                path: path.to_path_buf(),
                line: 2,
                reason: "missing calibration row".into(),
            });
        }
    };

    parse_row(&row).map_err(|reason| PersistError::Malformed {
        path: path.to_path_buf(),
        line: 2,
        reason,
    })
}

fn parse_row(line: &str) -> Result<Calibration, String> {
    let mut fields = line.split('\t');
    let pixel_span = fields
        .next()
        .ok_or_else(|| "missing pix field".to_string())?
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("bad pix value: {e}"))?;
    let tenths_of_mm = fields
        .next()
        .ok_or_else(|| "missing distance field".to_string())?
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad distance value: {e}"))?;

    Ok(Calibration {
        pixel_span,
        tenths_of_mm,
    })
}
