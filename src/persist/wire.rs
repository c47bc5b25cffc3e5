//! Little-endian primitives and section markers for the snapshot stream.

use std::io::{Read, Write};

use super::error::{PersistError, PersistResult};

/// Marker written at the end of every structural section.
pub const CONTROL_POINT: u32 = 0x5450_4331;

/// Upper bound for any length-prefixed blob or string.
pub const MAX_BLOB_LEN: u32 = 16 * 1024 * 1024;

/// Writes primitives to an underlying `Write`.
#[derive(Debug)]
pub struct WireWriter<W: Write> {
    inner: W,
}

impl<W: Write> WireWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    pub fn write_u8(&mut self, value: u8) -> PersistResult<()> {
        self.inner.write_all(&[value])?;
        Ok(())
    }

    pub fn write_u16(&mut self, value: u16) -> PersistResult<()> {
        self.inner.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    pub fn write_u32(&mut self, value: u32) -> PersistResult<()> {
        self.inner.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    pub fn write_i32(&mut self, value: i32) -> PersistResult<()> {
        self.inner.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    /// Write a count as `i32`.
    pub fn write_count(&mut self, count: usize) -> PersistResult<()> {
        let count = i32::try_from(count).map_err(|_| PersistError::InvalidLength(count as i64))?;
        self.write_i32(count)
    }

    pub fn write_raw(&mut self, bytes: &[u8]) -> PersistResult<()> {
        self.inner.write_all(bytes)?;
        Ok(())
    }

    /// Write a `u32` length prefix followed by the bytes.
    pub fn write_blob(&mut self, bytes: &[u8]) -> PersistResult<()> {
        let len = u32::try_from(bytes.len())
            .ok()
            .filter(|&n| n <= MAX_BLOB_LEN)
            .ok_or(PersistError::InvalidLength(bytes.len() as i64))?;
        self.write_u32(len)?;
        self.write_raw(bytes)
    }

    pub fn write_str(&mut self, value: &str) -> PersistResult<()> {
        self.write_blob(value.as_bytes())
    }

    pub fn write_control_point(&mut self) -> PersistResult<()> {
        self.write_u32(CONTROL_POINT)
    }

    pub fn flush(&mut self) -> PersistResult<()> {
        self.inner.flush()?;
        Ok(())
    }
}

/// Reads primitives from an underlying `Read`.
#[derive(Debug)]
pub struct WireReader<R: Read> {
    inner: R,
}

impl<R: Read> WireReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    fn read_array<const N: usize>(&mut self) -> PersistResult<[u8; N]> {
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }

    pub fn read_u8(&mut self) -> PersistResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> PersistResult<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> PersistResult<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_i32(&mut self) -> PersistResult<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    /// Read an `i32` count, rejecting negative values.
    pub fn read_count(&mut self) -> PersistResult<usize> {
        let count = self.read_i32()?;
        usize::try_from(count).map_err(|_| PersistError::InvalidLength(i64::from(count)))
    }

    pub fn read_magic(&mut self) -> PersistResult<[u8; 4]> {
        self.read_array()
    }

    /// Read a `u32`-length-prefixed blob.
    pub fn read_blob(&mut self) -> PersistResult<Vec<u8>> {
        let len = self.read_u32()?;
        if len > MAX_BLOB_LEN {
            return Err(PersistError::InvalidLength(i64::from(len)));
        }
        let mut buf = vec![0u8; len as usize];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }

    pub fn read_string(&mut self) -> PersistResult<String> {
        String::from_utf8(self.read_blob()?).map_err(|_| PersistError::InvalidUtf8)
    }

    /// Check the marker that closes `section`.
    pub fn expect_control_point(&mut self, section: &'static str) -> PersistResult<()> {
        let found = self.read_u32()?;
        if found == CONTROL_POINT {
            Ok(())
        } else {
            Err(PersistError::ControlPointMismatch { section, found })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives_are_little_endian() {
        let mut w = WireWriter::new(Vec::new());
        w.write_u16(0x0102).unwrap();
        w.write_i32(-2).unwrap();
        let bytes = w.into_inner();

        assert_eq!(bytes, vec![0x02, 0x01, 0xfe, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn test_blob_is_length_prefixed() {
        let mut w = WireWriter::new(Vec::new());
        w.write_str("ab").unwrap();
        assert_eq!(w.into_inner(), vec![2, 0, 0, 0, b'a', b'b']);
    }

    #[test]
    fn test_negative_count_rejected() {
        let mut w = WireWriter::new(Vec::new());
        w.write_i32(-1).unwrap();
        let bytes = w.into_inner();

        let mut r = WireReader::new(bytes.as_slice());
        assert!(matches!(r.read_count(), Err(PersistError::InvalidLength(-1))));
    }

    #[test]
    fn test_oversize_blob_rejected() {
        let mut w = WireWriter::new(Vec::new());
        w.write_u32(MAX_BLOB_LEN + 1).unwrap();
        let bytes = w.into_inner();

        let mut r = WireReader::new(bytes.as_slice());
        assert!(matches!(r.read_blob(), Err(PersistError::InvalidLength(_))));
    }

    #[test]
    fn test_control_point_mismatch() {
        let mut w = WireWriter::new(Vec::new());
        w.write_u32(7).unwrap();
        let bytes = w.into_inner();

        let mut r = WireReader::new(bytes.as_slice());
        let err = r.expect_control_point("children").unwrap_err();
        assert!(matches!(
            err,
            PersistError::ControlPointMismatch { section: "children", found: 7 }
        ));
    }

    #[test]
    fn test_truncated_input_is_io_error() {
        let bytes = [1u8, 2];
        let mut r = WireReader::new(&bytes[..]);
        assert!(matches!(r.read_u32(), Err(PersistError::Io(_))));
    }

    #[test]
    fn test_invalid_utf8() {
        let mut w = WireWriter::new(Vec::new());
        w.write_blob(&[0xff, 0xfe]).unwrap();
        let bytes = w.into_inner();

        let mut r = WireReader::new(bytes.as_slice());
        assert!(matches!(r.read_string(), Err(PersistError::InvalidUtf8)));
    }
}
