//! Big-endian wire primitives shared by the header, question and answer code.

use bytes::{Buf, BufMut};

/// Read a big-endian `u16` at `offset`, or `None` if it does not fit.
pub fn read_u16(bytes: &[u8], offset: usize) -> Option<u16> {
    let mut field = bytes.get(offset..offset.checked_add(2)?)?;
    Some(field.get_u16())
}

/// Read a big-endian `u32` at `offset`, or `None` if it does not fit.
#[cfg(test)]
pub fn read_u32(bytes: &[u8], offset: usize) -> Option<u32> {
    let mut field = bytes.get(offset..offset.checked_add(4)?)?;
    Some(field.get_u32())
}

/// Append `value` most-significant byte first.
pub fn put_u16<B: BufMut>(buf: &mut B, value: u16) {
    buf.put_u16(value);
}

/// Append `value` most-significant byte first.
pub fn put_u32<B: BufMut>(buf: &mut B, value: u32) {
    buf.put_u32(value);
}
