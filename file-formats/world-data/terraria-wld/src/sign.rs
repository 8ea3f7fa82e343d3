//! Sign records.

use crate::error::{Error, Result};
use crate::stream::BinaryStream;

/// A sign, tombstone or other readable tile.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sign {
    /// Text shown when read
    pub text: String,
    /// Tile column
    pub x: i32,
    /// Tile row
    pub y: i32,
}

impl Sign {
    /// Create a sign.
    pub fn new(x: i32, y: i32, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            x,
            y,
        }
    }
}

pub(crate) fn read_signs(stream: &mut BinaryStream) -> Result<Vec<Sign>> {
    let position = stream.position();
    let count = stream.read_i16()?;
    let count = usize::try_from(count)
        .map_err(|_| Error::invalid_record(format!("negative sign count {count} at offset {position}")))?;

    let mut signs = Vec::with_capacity(count);
    for _ in 0..count {
        let text = stream.read_string()?;
        let x = stream.read_i32()?;
        let y = stream.read_i32()?;
        signs.push(Sign { text, x, y });
    }
    Ok(signs)
}

pub(crate) fn write_signs(stream: &mut BinaryStream, signs: &[Sign]) -> Result<()> {
    let count = i16::try_from(signs.len())
        .map_err(|_| Error::invalid_record(format!("{} signs exceed the i16 count", signs.len())))?;
    stream.write_i16(count)?;
    for sign in signs {
        stream.write_string(&sign.text)?;
        stream.write_i32(sign.x)?;
        stream.write_i32(sign.y)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip() {
        let signs = vec![Sign::new(10, 20, "Welcome"), Sign::new(-1, 0, "")];
        let mut stream = BinaryStream::new();
        write_signs(&mut stream, &signs).unwrap();

        stream.seek(0).unwrap();
        assert_eq!(read_signs(&mut stream).unwrap(), signs);
    }

    #[test]
    fn test_negative_count() {
        let mut stream = BinaryStream::from_bytes(vec![0xFF, 0xFF]);
        let err = read_signs(&mut stream).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptRecord);
    }
}
