//! Position data codec: one tab-separated row per (droplet, frame) entry.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::FrameIndex;
use crate::tracker::{DropletRegistry, Rect};

use super::{CenterMode, PersistError};

const HEADER: &str = "drop#\tframe\tx\ty\tS_x\tS_y";

/// Write every droplet's history to `<base>.txt` as center/half-extent
/// rows.
///
/// Nothing is written (and no file is touched) when no droplet has any
/// history. Otherwise the file is replaced in full.
pub fn write_positions(
    registry: &DropletRegistry,
    base: impl AsRef<Path>,
    mode: CenterMode,
) -> Result<(), PersistError> {
    if registry.iter().all(|droplet| droplet.history().is_empty()) {
        return Ok(());
    }

    let path = base.as_ref().with_extension("txt");
    let mut out = BufWriter::new(File::create(&path)?);
    writeln!(out, "{HEADER}")?;

    let mut rows = 0usize;
    for (index, droplet) in registry.iter().enumerate() {
        for (&frame, rect) in droplet.history() {
            let (half_w, half_h) = rect.half_extents();
            let x = rect.x + half_w;
            let y = match mode {
                CenterMode::Corrected => rect.y + half_h,
                CenterMode::Legacy => rect.y + half_w,
            };
            writeln!(out, "{index}\t{frame}\t{x}\t{y}\t{half_w}\t{half_h}")?;
            rows += 1;
        }
    }
    out.flush()?;

    debug!("wrote {rows} position rows to {}", path.display());
    Ok(())
}

/// Load position rows from `path` into the registry.
///
/// The registry grows to fit the highest droplet index seen; restored
/// droplets are inactive and their histories are protected from
/// reconciliation until reseeded. When at least one row was read, the first
/// droplet becomes selected. The first bad row aborts the whole load.
pub fn load_positions(
    path: impl AsRef<Path>,
    registry: &mut DropletRegistry,
    mode: CenterMode,
) -> Result<(), PersistError> {
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

    let mut rows = 0usize;
    for (number, line) in lines.enumerate() {
        let line = line?;
        let (droplet, frame, x, y, half_w, half_h) =
            parse_row(&line).map_err(|reason| PersistError::Malformed {
                path: path.to_path_buf(),
                line: number + 2,
                reason,
            })?;

        let tl_x = x - half_w;
        let tl_y = match mode {
            CenterMode::Corrected => y - half_h,
            CenterMode::Legacy => y - half_w,
        };
        registry.restore(
            droplet,
            frame,
            Rect::new(tl_x, tl_y, 2.0 * half_w, 2.0 * half_h),
        );
        rows += 1;
    }

    if rows > 0 {
        registry.select_first();
    }

    debug!("loaded {rows} position rows from {}", path.display());
    Ok(())
}

fn parse_row(line: &str) -> Result<(usize, FrameIndex, f32, f32, f32, f32), String> {
    // Fields beyond the sixth are ignored.
    let mut fields = line.split('\t');

    let droplet = parse_field::<usize>(fields.next(), "drop#")?;
    // The registry grows to droplet + 1, so the top index is unusable.
    if droplet == usize::MAX {
        return Err("drop# out of range".into());
    }
    let frame = parse_field::<FrameIndex>(fields.next(), "frame")?;
    let x = parse_field::<f32>(fields.next(), "x")?;
    let y = parse_field::<f32>(fields.next(), "y")?;
    let half_w = parse_field::<f32>(fields.next(), "S_x")?;
    let half_h = parse_field::<f32>(fields.next(), "S_y")?;

    Ok((droplet, frame, x, y, half_w, half_h))
}

fn parse_field<T: std::str::FromStr>(field: Option<&str>, name: &str) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    let field = field.ok_or_else(|| format!("missing {name} field"))?;
    field
        .trim()
        .parse()
        .map_err(|e| format!("bad {name} value: {e}"))
}
