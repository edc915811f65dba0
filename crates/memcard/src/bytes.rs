//! Bounds-validated little-endian readers over untrusted byte buffers.
//!
//! Nothing in this module knows about the memory-card format. Every
//! routine validates its inputs before touching the buffer, so a
//! truncated or corrupt image surfaces as a [`BytesError`] instead of
//! a garbage value.

use byteorder::{ByteOrder, LittleEndian};

/// Failure modes of the raw byte readers.
///
/// These are contract violations for a single call, never recoverable
/// by retrying with the same arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BytesError {
    /// The input buffer is empty.
    InvalidBuffer,
    /// `start > end` for a range read.
    InvalidRange { start: usize, end: usize },
    /// A read of `len` bytes at `offset` would run past the buffer.
    OutOfBounds {
        offset: usize,
        len: usize,
        available: usize,
    },
    /// A list range whose byte length is not a multiple of the element width.
    MisalignedLength { len: usize },
}

impl std::fmt::Display for BytesError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            BytesError::InvalidBuffer => {
                write!(f, "Input bytes must be a non-empty byte slice.")
            }
            BytesError::InvalidRange { start, end } => {
                write!(
                    f,
                    "Invalid range [{start}, {end}]. Bounds must satisfy start <= end."
                )
            }
            BytesError::OutOfBounds {
                offset,
                len,
                available,
            } => {
                write!(
                    f,
                    "Attempted to read out of bounds. Offset {offset} (length {len}) exceeds available bytes length {available}."
                )
            }
            BytesError::MisalignedLength { len } => {
                write!(f, "Range length {len} is not a multiple of 4.")
            }
        }
    }
}

impl std::error::Error for BytesError {}

fn check_read(bytes: &[u8], offset: usize, len: usize) -> Result<(), BytesError> {
    if bytes.is_empty() {
        return Err(BytesError::InvalidBuffer);
    }
    if offset.checked_add(len).map_or(true, |end| end > bytes.len()) {
        return Err(BytesError::OutOfBounds {
            offset,
            len,
            available: bytes.len(),
        });
    }
    Ok(())
}

/// Reads a little-endian `u16` at `offset`.
pub fn read_u16(bytes: &[u8], offset: usize) -> Result<u16, BytesError> {
    check_read(bytes, offset, 2)?;
    Ok(LittleEndian::read_u16(&bytes[offset..offset + 2]))
}

/// Reads a little-endian `i32` at `offset`.
pub fn read_i32(bytes: &[u8], offset: usize) -> Result<i32, BytesError> {
    check_read(bytes, offset, 4)?;
    Ok(LittleEndian::read_i32(&bytes[offset..offset + 4]))
}

/// Decodes a contiguous run of little-endian `i32` values.
///
/// With `inclusive` set, `end` is the last byte of the run
/// (`len = end - start + 1`); otherwise `end` is one past it
/// (`len = end - start`). The byte length must be a multiple of 4.
pub fn read_i32_list(
    bytes: &[u8],
    start: usize,
    end: usize,
    inclusive: bool,
) -> Result<Vec<i32>, BytesError> {
    if bytes.is_empty() {
        return Err(BytesError::InvalidBuffer);
    }
    if start > end {
        return Err(BytesError::InvalidRange { start, end });
    }

    let len = end - start + usize::from(inclusive);
    check_read(bytes, start, len)?;
    if len % 4 != 0 {
        return Err(BytesError::MisalignedLength { len });
    }

    let list = bytes[start..start + len]
        .chunks_exact(4)
        .map(LittleEndian::read_i32)
        .collect();
    Ok(list)
}

/// Decodes bytes as text and strips every NUL character.
///
/// NUL is a pad byte in the card format, not a terminator, so all
/// occurrences are removed rather than truncating at the first one.
pub fn read_ascii_string(bytes: &[u8]) -> Result<String, BytesError> {
    if bytes.is_empty() {
        return Err(BytesError::InvalidBuffer);
    }
    let text = String::from_utf8_lossy(bytes)
        .chars()
        .filter(|&c| c != '\0')
        .collect();
    Ok(text)
}

/// Sums the byte values over `[start, end)`.
pub fn checksum_range(bytes: &[u8], start: usize, end: usize) -> Result<u64, BytesError> {
    if bytes.is_empty() {
        return Err(BytesError::InvalidBuffer);
    }
    if start > end {
        return Err(BytesError::InvalidRange { start, end });
    }
    check_read(bytes, start, end - start)?;

    Ok(bytes[start..end].iter().map(|&b| u64::from(b)).sum())
}
