//! Little-endian cursor over an in-memory byte buffer.
//!
//! [`BinaryStream`] is the only way the codec touches bytes. Every read is
//! bounds checked before the cursor moves, so a failed read leaves the
//! position exactly where it was. Writes go through the same cursor and
//! overwrite or extend the buffer, which lets the encoder backpatch the
//! section table after the body has been emitted.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Error, Result};

/// Longest 7-bit encoded `u32`.
const MAX_VARINT_BYTES: usize = 5;

/// An RGB color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Create a color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend between `self` (at `t = 0`) and `other` (at `t = 255`).
    pub fn lerp(self, other: Self, t: u8) -> Self {
        let mix = |a: u8, b: u8| -> u8 {
            let t = u32::from(t);
            ((u32::from(a) * (255 - t) + u32::from(b) * t) / 255) as u8
        };
        Self::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

/// A read/write cursor over a byte buffer.
///
/// # Examples
///
/// ```
/// use terraria_wld::BinaryStream;
///
/// let mut stream = BinaryStream::new();
/// stream.write_string("Forest").unwrap();
/// stream.write_u16(0x1234).unwrap();
///
/// stream.seek(0).unwrap();
/// assert_eq!(stream.read_string().unwrap(), "Forest");
/// assert_eq!(stream.read_u16().unwrap(), 0x1234);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BinaryStream {
    buf: Vec<u8>,
    pos: usize,
}

impl BinaryStream {
    /// Create an empty stream, ready for writing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stream positioned at the start of `bytes`.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            buf: bytes.into(),
            pos: 0,
        }
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total buffer length.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes left between the cursor and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// Move the cursor to `position`.
    ///
    /// Seeking to exactly the buffer length is allowed (end of stream).
    pub fn seek(&mut self, position: usize) -> Result<()> {
        if position > self.buf.len() {
            return Err(Error::OutOfBounds {
                position,
                needed: 0,
                len: self.buf.len(),
            });
        }
        self.pos = position;
        Ok(())
    }

    /// Advance the cursor by `count` bytes.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.take(count).map(|_| ())
    }

    /// Borrow the whole underlying buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the stream and return its buffer.
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    fn take(&mut self, count: usize) -> Result<&[u8]> {
        let end = self
            .pos
            .checked_add(count)
            .filter(|&end| end <= self.buf.len())
            .ok_or(Error::OutOfBounds {
                position: self.pos,
                needed: count,
                len: self.buf.len(),
            })?;
        let start = self.pos;
        self.pos = end;
        Ok(&self.buf[start..end])
    }

    fn put(&mut self, bytes: &[u8]) {
        let end = self.pos + bytes.len();
        if end > self.buf.len() {
            self.buf.resize(end, 0);
        }
        self.buf[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
    }

    fn check_width(width: usize) -> Result<()> {
        if matches!(width, 1..=8) {
            Ok(())
        } else {
            Err(Error::invalid_record(format!(
                "unsupported integer width {width}"
            )))
        }
    }

    /// Read an unsigned little-endian integer of `width` bytes (1 to 8).
    pub fn read_uint(&mut self, width: usize) -> Result<u64> {
        Self::check_width(width)?;
        Ok(LittleEndian::read_uint(self.take(width)?, width))
    }

    /// Read a signed little-endian integer of `width` bytes (1 to 8).
    pub fn read_int(&mut self, width: usize) -> Result<i64> {
        Self::check_width(width)?;
        Ok(LittleEndian::read_int(self.take(width)?, width))
    }

    /// Read one byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read one signed byte.
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.take(1)?[0] as i8)
    }

    /// Read a `u16`.
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    /// Read an `i16`.
    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(LittleEndian::read_i16(self.take(2)?))
    }

    /// Read a `u32`.
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    /// Read an `i32`.
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.take(4)?))
    }

    /// Read a `u64`.
    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(LittleEndian::read_u64(self.take(8)?))
    }

    /// Read a single-precision float.
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(LittleEndian::read_f32(self.take(4)?))
    }

    /// Read a double-precision float.
    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(LittleEndian::read_f64(self.take(8)?))
    }

    /// Read a boolean; any non-zero byte is `true`.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Read a 7-bit encoded variable-length integer.
    ///
    /// Each byte contributes its low seven bits, least significant group
    /// first; the high bit marks continuation.
    pub fn read_varint(&mut self) -> Result<u32> {
        let start = self.pos;
        let mut value: u32 = 0;
        for index in 0..MAX_VARINT_BYTES {
            let Some(&byte) = self.buf.get(start + index) else {
                return Err(Error::MalformedLength {
                    position: start,
                    reason: "continuation chain runs past end of buffer",
                });
            };
            if index == MAX_VARINT_BYTES - 1 && byte > 0x0F {
                return Err(Error::MalformedLength {
                    position: start,
                    reason: "value does not fit in 32 bits",
                });
            }
            value |= u32::from(byte & 0x7F) << (7 * index);
            if byte & 0x80 == 0 {
                self.pos = start + index + 1;
                return Ok(value);
            }
        }
        Err(Error::MalformedLength {
            position: start,
            reason: "continuation chain longer than five bytes",
        })
    }

    /// Read a string prefixed with its 7-bit encoded byte length.
    pub fn read_string(&mut self) -> Result<String> {
        let start = self.pos;
        let len = self.read_varint()? as usize;
        if len > self.remaining() {
            self.pos = start;
            return Err(Error::MalformedLength {
                position: start,
                reason: "string length exceeds remaining buffer",
            });
        }
        let text_start = self.pos;
        let bytes = self.take(len)?.to_vec();
        String::from_utf8(bytes).map_err(|_| {
            self.pos = start;
            Error::InvalidText {
                position: text_start,
            }
        })
    }

    /// Read `count` bytes and expand them into `count * 8` flags.
    ///
    /// Bit 0 of each byte is the first flag of that byte.
    pub fn read_bit_flags(&mut self, count: usize) -> Result<Vec<bool>> {
        let bytes = self.take(count)?;
        Ok(bytes
            .iter()
            .flat_map(|&byte| (0..8).map(move |bit| byte & (1 << bit) != 0))
            .collect())
    }

    /// Read a bit array prefixed with its `u16` bit count.
    pub fn read_bit_array(&mut self) -> Result<Vec<bool>> {
        let start = self.pos;
        let bits = usize::from(self.read_u16()?);
        match self.read_bit_flags(bits.div_ceil(8)) {
            Ok(mut flags) => {
                flags.truncate(bits);
                Ok(flags)
            }
            Err(err) => {
                self.pos = start;
                Err(err)
            }
        }
    }

    /// Read three bytes as an RGB color.
    pub fn read_color(&mut self) -> Result<Color> {
        let bytes = self.take(3)?;
        Ok(Color::new(bytes[0], bytes[1], bytes[2]))
    }

    /// Read `count` raw bytes.
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        self.take(count).map(<[u8]>::to_vec)
    }

    /// Write an unsigned little-endian integer of `width` bytes (1 to 8).
    ///
    /// High bytes that do not fit in `width` are dropped.
    pub fn write_uint(&mut self, width: usize, value: u64) -> Result<()> {
        Self::check_width(width)?;
        let mut bytes = [0u8; 8];
        LittleEndian::write_u64(&mut bytes, value);
        self.put(&bytes[..width]);
        Ok(())
    }

    /// Write a signed little-endian integer of `width` bytes (1 to 8).
    pub fn write_int(&mut self, width: usize, value: i64) -> Result<()> {
        self.write_uint(width, value as u64)
    }

    /// Write raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.put(bytes);
        Ok(())
    }

    /// Write one byte.
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.put(&[value]);
        Ok(())
    }

    /// Write one signed byte.
    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.put(&[value as u8]);
        Ok(())
    }

    /// Write a `u16`.
    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        let mut bytes = [0u8; 2];
        LittleEndian::write_u16(&mut bytes, value);
        self.put(&bytes);
        Ok(())
    }

    /// Write an `i16`.
    pub fn write_i16(&mut self, value: i16) -> Result<()> {
        let mut bytes = [0u8; 2];
        LittleEndian::write_i16(&mut bytes, value);
        self.put(&bytes);
        Ok(())
    }

    /// Write a `u32`.
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        let mut bytes = [0u8; 4];
        LittleEndian::write_u32(&mut bytes, value);
        self.put(&bytes);
        Ok(())
    }

    /// Write an `i32`.
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        let mut bytes = [0u8; 4];
        LittleEndian::write_i32(&mut bytes, value);
        self.put(&bytes);
        Ok(())
    }

    /// Write a `u64`.
    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        let mut bytes = [0u8; 8];
        LittleEndian::write_u64(&mut bytes, value);
        self.put(&bytes);
        Ok(())
    }

    /// Write a single-precision float.
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        let mut bytes = [0u8; 4];
        LittleEndian::write_f32(&mut bytes, value);
        self.put(&bytes);
        Ok(())
    }

    /// Write a double-precision float.
    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        let mut bytes = [0u8; 8];
        LittleEndian::write_f64(&mut bytes, value);
        self.put(&bytes);
        Ok(())
    }

    /// Write a boolean as a single `0`/`1` byte.
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(u8::from(value))
    }

    /// Write a 7-bit encoded variable-length integer.
    pub fn write_varint(&mut self, mut value: u32) -> Result<()> {
        while value >= 0x80 {
            self.put(&[(value as u8 & 0x7F) | 0x80]);
            value >>= 7;
        }
        self.put(&[value as u8]);
        Ok(())
    }

    /// Write a string prefixed with its 7-bit encoded byte length.
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        let len = u32::try_from(value.len()).map_err(|_| Error::MalformedLength {
            position: self.pos,
            reason: "string longer than u32::MAX bytes",
        })?;
        self.write_varint(len)?;
        self.put(value.as_bytes());
        Ok(())
    }

    /// Pack `flags` eight to a byte, least significant bit first.
    ///
    /// A trailing partial byte is padded with zero bits.
    pub fn write_bit_flags(&mut self, flags: &[bool]) -> Result<()> {
        for chunk in flags.chunks(8) {
            let byte = chunk
                .iter()
                .enumerate()
                .filter(|(_, set)| **set)
                .fold(0u8, |acc, (bit, _)| acc | (1 << bit));
            self.put(&[byte]);
        }
        Ok(())
    }

    /// Write a bit array prefixed with its `u16` bit count.
    pub fn write_bit_array(&mut self, flags: &[bool]) -> Result<()> {
        let bits = u16::try_from(flags.len()).map_err(|_| {
            Error::invalid_record(format!("bit array of {} bits is too long", flags.len()))
        })?;
        self.write_u16(bits)?;
        self.write_bit_flags(flags)
    }

    /// Write an RGB color as three bytes.
    pub fn write_color(&mut self, color: Color) -> Result<()> {
        self.put(&[color.r, color.g, color.b]);
        Ok(())
    }

    /// Overwrite a `u32` at `position` without moving the cursor.
    pub fn patch_u32(&mut self, position: usize, value: u32) -> Result<()> {
        if position.checked_add(4).is_none_or(|end| end > self.buf.len()) {
            return Err(Error::OutOfBounds {
                position,
                needed: 4,
                len: self.buf.len(),
            });
        }
        LittleEndian::write_u32(&mut self.buf[position..position + 4], value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test]
    fn test_short_read_does_not_advance() {
        let mut stream = BinaryStream::from_bytes(vec![1, 2, 3, 4, 5]);
        stream.skip(2).unwrap();

        let err = stream.read_uint(4).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
        assert_eq!(stream.position(), 2);

        assert_eq!(stream.read_uint(3).unwrap(), 0x05_04_03);
    }

    #[test]
    fn test_signed_reads_sign_extend() {
        let mut stream = BinaryStream::from_bytes(vec![0xFE, 0xFF, 0x80]);
        assert_eq!(stream.read_int(2).unwrap(), -2);
        assert_eq!(stream.read_int(1).unwrap(), -128);
    }

    #[test]
    fn test_invalid_width_is_rejected() {
        let mut stream = BinaryStream::from_bytes(vec![0; 16]);
        assert!(stream.read_uint(0).is_err());
        assert!(stream.read_uint(9).is_err());
        assert_eq!(stream.position(), 0);
    }

    #[test_case(0, &[0x00] ; "zero")]
    #[test_case(127, &[0x7F] ; "largest single byte")]
    #[test_case(128, &[0x80, 0x01] ; "smallest two bytes")]
    #[test_case(16_384, &[0x80, 0x80, 0x01] ; "smallest three bytes")]
    #[test_case(2_097_151, &[0xFF, 0xFF, 0x7F] ; "largest three bytes")]
    fn test_varint_boundaries(value: u32, encoded: &[u8]) {
        let mut stream = BinaryStream::new();
        stream.write_varint(value).unwrap();
        assert_eq!(stream.as_bytes(), encoded);

        stream.seek(0).unwrap();
        assert_eq!(stream.read_varint().unwrap(), value);
        assert_eq!(stream.position(), encoded.len());
    }

    #[test]
    fn test_varint_overlong_chain() {
        let mut stream = BinaryStream::from_bytes(vec![0x80, 0x80, 0x80, 0x80, 0x80, 0x01]);
        let err = stream.read_varint().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedLength);
        assert_eq!(stream.position(), 0);
    }

    #[test]
    fn test_varint_truncated_chain() {
        let mut stream = BinaryStream::from_bytes(vec![0x80, 0x80]);
        let err = stream.read_varint().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedLength);
    }

    #[test]
    fn test_string_length_past_end() {
        let mut stream = BinaryStream::from_bytes(vec![0x05, b'a', b'b']);
        let err = stream.read_string().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedLength);
        assert_eq!(stream.position(), 0);
    }

    #[test]
    fn test_string_rejects_invalid_utf8() {
        let mut stream = BinaryStream::from_bytes(vec![0x02, 0xC3, 0x28]);
        let err = stream.read_string().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptRecord);
        assert_eq!(stream.position(), 0);
    }

    #[test]
    fn test_bit_flags_are_lsb_first() {
        let mut stream = BinaryStream::from_bytes(vec![0b0000_0101, 0b1000_0000]);
        let flags = stream.read_bit_flags(2).unwrap();

        assert_eq!(flags.len(), 16);
        assert!(flags[0]);
        assert!(!flags[1]);
        assert!(flags[2]);
        assert!(flags[15]);
        assert_eq!(flags.iter().filter(|f| **f).count(), 3);
    }

    #[test]
    fn test_bit_array_keeps_declared_length() {
        let flags = vec![true, false, false, true, true, false, true, false, true, true];
        let mut stream = BinaryStream::new();
        stream.write_bit_array(&flags).unwrap();
        assert_eq!(stream.len(), 2 + 2);

        stream.seek(0).unwrap();
        assert_eq!(stream.read_bit_array().unwrap(), flags);
    }

    #[test]
    fn test_color() {
        let mut stream = BinaryStream::new();
        stream.write_color(Color::new(9, 61, 191)).unwrap();
        stream.seek(0).unwrap();
        assert_eq!(stream.read_color().unwrap(), Color::new(9, 61, 191));
    }

    #[test]
    fn test_color_lerp_endpoints() {
        let a = Color::new(50, 40, 255);
        let b = Color::new(145, 185, 255);
        assert_eq!(a.lerp(b, 0), a);
        assert_eq!(a.lerp(b, 255), b);
    }

    #[test]
    fn test_seek_past_end() {
        let mut stream = BinaryStream::from_bytes(vec![0; 4]);
        assert!(stream.seek(4).is_ok());
        let err = stream.seek(5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
        assert_eq!(stream.position(), 4);
    }

    #[test]
    fn test_write_in_the_middle_overwrites() {
        let mut stream = BinaryStream::from_bytes(vec![0xAA; 6]);
        stream.seek(1).unwrap();
        stream.write_u16(0x0102).unwrap();
        assert_eq!(stream.as_bytes(), &[0xAA, 0x02, 0x01, 0xAA, 0xAA, 0xAA]);

        stream.seek(5).unwrap();
        stream.write_u16(0x0304).unwrap();
        assert_eq!(stream.len(), 7);
    }

    #[test]
    fn test_patch_u32() {
        let mut stream = BinaryStream::new();
        stream.write_u32(0).unwrap();
        stream.write_u8(7).unwrap();
        stream.patch_u32(0, 0xDEAD_BEEF).unwrap();

        assert_eq!(stream.position(), 5);
        stream.seek(0).unwrap();
        assert_eq!(stream.read_u32().unwrap(), 0xDEAD_BEEF);
        assert!(stream.patch_u32(2, 1).is_err());
    }

    #[test]
    fn test_raw_bytes() {
        let mut stream = BinaryStream::new();
        stream.write_bytes(&[1, 2, 3]).unwrap();
        stream.seek(0).unwrap();
        assert_eq!(stream.read_bytes(2).unwrap(), vec![1, 2]);

        let err = stream.read_bytes(2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
        assert_eq!(stream.position(), 2);
    }

    proptest! {
        #[test]
        fn prop_string_round_trip(text in ".{0,300}") {
            let mut stream = BinaryStream::new();
            stream.write_string(&text).unwrap();
            stream.seek(0).unwrap();
            prop_assert_eq!(stream.read_string().unwrap(), text);
            prop_assert_eq!(stream.remaining(), 0);
        }

        #[test]
        fn prop_uint_round_trip(width in 1usize..=8, value in any::<u64>()) {
            let masked = if width == 8 { value } else { value & ((1u64 << (width * 8)) - 1) };
            let mut stream = BinaryStream::new();
            stream.write_uint(width, masked).unwrap();
            stream.seek(0).unwrap();
            prop_assert_eq!(stream.read_uint(width).unwrap(), masked);
        }
    }
}
