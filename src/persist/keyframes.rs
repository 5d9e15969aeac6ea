//! Keyframe marks codec: one frame index per row.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::FrameIndex;
use crate::tracker::KeyframeSet;

use super::PersistError;

const HEADER: &str = "keyframe";

/// Write the keyframe set to `<base>.kfr`, ascending.
///
/// Nothing is written when the set is empty.
pub fn write_keyframes(keyframes: &KeyframeSet, base: impl AsRef<Path>) -> Result<(), PersistError> {
    if keyframes.is_empty() {
        return Ok(());
    }

    let path = base.as_ref().with_extension("kfr");
    let mut out = BufWriter::new(File::create(&path)?);
    writeln!(out, "{HEADER}")?;
    for frame in keyframes.iter() {
        writeln!(out, "{frame}")?;
    }
    out.flush()?;

    debug!("wrote {} keyframes to {}", keyframes.len(), path.display());
    Ok(())
}

/// Load keyframe marks from `path` into the set.
///
/// Marks accumulate into whatever the set already holds. The first bad row
/// aborts the load.
pub fn load_keyframes(
    path: impl AsRef<Path>,
    keyframes: &mut KeyframeSet,
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

    for (number, line) in lines.enumerate() {
        let line = line?;
        let frame: FrameIndex =
            line.trim()
                .parse()
                .map_err(|e| PersistError::Malformed {
                    path: path.to_path_buf(),
                    line: number + 2,
                    reason: format!("bad keyframe value: {e}"),
                })?;
        keyframes.mark(frame);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_base(tag: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("droptrack-keyframes-{tag}-{}", std::process::id()));
        path
    }

    #[test]
    fn test_round_trip_in_ascending_order() {
        let base = temp_base("roundtrip");
        let mut keyframes = KeyframeSet::new();
        keyframes.mark(12);
        keyframes.mark(4);
        keyframes.mark(30);

        write_keyframes(&keyframes, &base).unwrap();

        let text = std::fs::read_to_string(base.with_extension("kfr")).unwrap();
        assert_eq!(text, "keyframe\n4\n12\n30\n");

        let mut loaded = KeyframeSet::new();
        load_keyframes(base.with_extension("kfr"), &mut loaded).unwrap();
        assert_eq!(loaded.iter().collect::<Vec<_>>(), vec![4, 12, 30]);

        std::fs::remove_file(base.with_extension("kfr")).ok();
    }

    #[test]
    fn test_empty_set_writes_no_file() {
        let base = temp_base("empty");
        write_keyframes(&KeyframeSet::new(), &base).unwrap();
        assert!(!base.with_extension("kfr").exists());
    }

    #[test]
    fn test_bad_row_aborts_load() {
        let base = temp_base("bad");
        let path = base.with_extension("kfr");
        std::fs::write(&path, "keyframe\n5\nnope\n").unwrap();

        let mut keyframes = KeyframeSet::new();
        let err = load_keyframes(&path, &mut keyframes).unwrap_err();
        assert!(matches!(err, PersistError::Malformed { line: 3, .. }));

        std::fs::remove_file(&path).ok();
    }
}
