//! Forward-only read cursor over a borrowed wire buffer.

use bytes::Buf;

use crate::{error::DecodeError, varint};

/// Read-only view of a wire buffer with a monotonically advancing position.
///
/// Every read starts exactly where the previous one stopped. A read that would
/// run past the end fails with [`DecodeError::TruncatedInput`] and leaves the
/// position unchanged.
#[derive(Debug, Clone)]
pub struct WireCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

macro_rules! read_fixed_le {
    ($($(#[$meta:meta])* $name:ident -> $ty:ty => $get:ident;)*) => {
        $(
            $(#[$meta])*
            pub fn $name(&mut self) -> Result<$ty, DecodeError> {
                let mut chunk = self.read_bytes(size_of::<$ty>())?;
                Ok(chunk.$get())
            }
        )*
    };
}

impl<'a> WireCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total buffer length.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// `true` once every byte has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.pos == self.buf.len()
    }

    /// Unread tail of the buffer.
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    pub fn truncated(&self, needed: usize) -> DecodeError {
        DecodeError::TruncatedInput {
            offset: self.pos,
            needed,
            remaining: self.remaining(),
        }
    }

    /// Fails unless at least `n` bytes remain, without consuming anything.
    pub fn ensure(&self, n: usize) -> Result<(), DecodeError> {
        if self.remaining() < n {
            return Err(self.truncated(n));
        }
        Ok(())
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        self.ensure(n)?;
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    pub(crate) fn advance(&mut self, n: usize) {
        debug_assert!(n <= self.remaining());
        self.pos += n;
    }

    pub fn read_varint(&mut self) -> Result<u64, DecodeError> {
        varint::read_varint(self)
    }

    pub fn read_length_prefixed_bytes(&mut self) -> Result<&'a [u8], DecodeError> {
        varint::read_length_prefixed_bytes(self)
    }

    read_fixed_le! {
        read_u8 -> u8 => get_u8;
        read_i8 -> i8 => get_i8;
        read_u16_le -> u16 => get_u16_le;
        read_i16_le -> i16 => get_i16_le;
        read_u32_le -> u32 => get_u32_le;
        read_i32_le -> i32 => get_i32_le;
        read_u64_le -> u64 => get_u64_le;
        read_i64_le -> i64 => get_i64_le;
        read_f32_le -> f32 => get_f32_le;
        read_f64_le -> f64 => get_f64_le;
    }
}
