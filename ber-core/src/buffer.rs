//! Bounds-checked byte buffers
//!
//! [`BerBuffer`] is the only way the encoder touches memory. A backend
//! supplies the backing slice and every access goes through the provided
//! methods, so owned and borrowed regions behave the same.
//!
//! # Access Contracts
//!
//! Two contracts coexist and are kept apart on purpose:
//!
//! - **Hard-fail**: `check_index`, `check_limit`, `get_byte`, `put_byte` and
//!   `put_int` return a capacity error and touch nothing when out of range.
//! - **Best-effort bulk copy**: `get_bytes*` and `put_bytes*` copy
//!   `min(requested, capacity - index)` bytes and return the count. A request
//!   that exceeds the remaining capacity is truncated, not rejected.
//!
//! Callers that need all-or-nothing behaviour for a bulk write validate the
//! whole region with [`BerBuffer::check_limit`] first, which is what the
//! encoder does.

use crate::error::{BerError, BerResult};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Bytes available from `index` to the end of a region of `capacity` bytes.
fn available(capacity: usize, index: usize) -> usize {
    capacity.saturating_sub(index)
}

/// Random-access byte region with a fixed capacity
///
/// Implementors only expose their backing memory; capacity is the length of
/// that memory and never changes while the encoder holds the buffer.
pub trait BerBuffer {
    /// Backing memory, read-only
    fn as_bytes(&self) -> &[u8];

    /// Backing memory, writable
    fn as_bytes_mut(&mut self) -> &mut [u8];

    /// Upper bound (exclusive) of valid indices
    fn capacity(&self) -> usize {
        self.as_bytes().len()
    }

    /// Validate a single-byte index
    ///
    /// # Errors
    /// `BerError::IndexOutOfBounds` if `index >= capacity`.
    fn check_index(&self, index: usize) -> BerResult<usize> {
        let capacity = self.capacity();
        if index >= capacity {
            return Err(BerError::IndexOutOfBounds { index, capacity });
        }
        Ok(index)
    }

    /// Validate the end (exclusive) of a write region
    ///
    /// # Errors
    /// `BerError::LimitExceeded` if `limit > capacity`.
    fn check_limit(&self, limit: usize) -> BerResult<usize> {
        let capacity = self.capacity();
        if limit > capacity {
            return Err(BerError::LimitExceeded { limit, capacity });
        }
        Ok(limit)
    }

    /// Validate the region `[offset, offset + length)` and return its end
    ///
    /// An end that does not fit in `usize` is reported as `LimitExceeded`
    /// with `limit = usize::MAX`.
    fn check_region(&self, offset: usize, length: usize) -> BerResult<usize> {
        let limit = offset.checked_add(length).unwrap_or(usize::MAX);
        self.check_limit(limit)
    }

    /// Read one byte
    fn get_byte(&self, index: usize) -> BerResult<u8> {
        let index = self.check_index(index)?;
        Ok(self.as_bytes()[index])
    }

    /// Write one byte
    fn put_byte(&mut self, index: usize, value: u8) -> BerResult<()> {
        let index = self.check_index(index)?;
        self.as_bytes_mut()[index] = value;
        Ok(())
    }

    /// Copy bytes starting at `index` into `dst`
    ///
    /// Returns the number of bytes copied, which is less than `dst.len()`
    /// when the buffer ends first.
    fn get_bytes(&self, index: usize, dst: &mut [u8]) -> usize {
        let count = dst.len().min(available(self.capacity(), index));
        if count > 0 {
            dst[..count].copy_from_slice(&self.as_bytes()[index..index + count]);
        }
        count
    }

    /// Copy up to `length` bytes starting at `index` into an external buffer
    ///
    /// The count is also bounded by `dst.remaining_mut()`. `dst` advances by
    /// the number of bytes copied, which is returned.
    fn get_bytes_into<B: BufMut + ?Sized>(&self, index: usize, dst: &mut B, length: usize) -> usize {
        let count = length
            .min(dst.remaining_mut())
            .min(available(self.capacity(), index));
        if count > 0 {
            dst.put_slice(&self.as_bytes()[index..index + count]);
        }
        count
    }

    /// Copy `src` into the buffer starting at `index`
    ///
    /// Returns the number of bytes copied; the tail of `src` that does not
    /// fit is dropped.
    fn put_bytes(&mut self, index: usize, src: &[u8]) -> usize {
        let count = src.len().min(available(self.capacity(), index));
        if count > 0 {
            self.as_bytes_mut()[index..index + count].copy_from_slice(&src[..count]);
        }
        count
    }

    /// Copy up to `length` bytes from an external buffer starting at `index`
    ///
    /// The count is also bounded by `src.remaining()`. `src` advances by the
    /// number of bytes copied, which is returned.
    fn put_bytes_from<B: Buf + ?Sized>(&mut self, index: usize, src: &mut B, length: usize) -> usize {
        let count = length
            .min(src.remaining())
            .min(available(self.capacity(), index));
        if count > 0 {
            src.copy_to_slice(&mut self.as_bytes_mut()[index..index + count]);
        }
        count
    }

    /// Write a 32-bit integer in big-endian (network) order
    ///
    /// The byte order is fixed regardless of the host.
    fn put_int(&mut self, index: usize, value: u32) -> BerResult<()> {
        let limit = self.check_region(index, 4)?;
        self.as_bytes_mut()[index..limit].copy_from_slice(&value.to_be_bytes());
        Ok(())
    }

    /// Independent read cursor over the same memory
    ///
    /// The returned view starts at position 0 with the limit at capacity;
    /// moving it does not affect this buffer.
    fn duplicate(&self) -> ByteView<'_> {
        ByteView::new(self.as_bytes())
    }
}

/// Read cursor with its own position and limit
///
/// Implements [`bytes::Buf`], so it can feed `put_bytes_from` or any other
/// `Buf` consumer.
#[derive(Debug, Clone, Copy)]
pub struct ByteView<'a> {
    bytes: &'a [u8],
    position: usize,
    limit: usize,
}

impl<'a> ByteView<'a> {
    /// Create a view spanning all of `bytes`
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            position: 0,
            limit: bytes.len(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Move the cursor
    ///
    /// # Errors
    /// `BerError::LimitExceeded` if `position` is past the current limit.
    pub fn set_position(&mut self, position: usize) -> BerResult<()> {
        if position > self.limit {
            return Err(BerError::LimitExceeded {
                limit: position,
                capacity: self.limit,
            });
        }
        self.position = position;
        Ok(())
    }

    /// Move the limit; the position is pulled back if it ends up past it
    ///
    /// # Errors
    /// `BerError::LimitExceeded` if `limit` is past the capacity.
    pub fn set_limit(&mut self, limit: usize) -> BerResult<()> {
        if limit > self.bytes.len() {
            return Err(BerError::LimitExceeded {
                limit,
                capacity: self.bytes.len(),
            });
        }
        self.limit = limit;
        self.position = self.position.min(limit);
        Ok(())
    }
}

impl Buf for ByteView<'_> {
    fn remaining(&self) -> usize {
        self.limit - self.position
    }

    fn chunk(&self) -> &[u8] {
        &self.bytes[self.position..self.limit]
    }

    fn advance(&mut self, cnt: usize) {
        assert!(
            cnt <= self.remaining(),
            "cannot advance past limit: {} > {}",
            cnt,
            self.remaining()
        );
        self.position += cnt;
    }
}

/// Buffer over caller-owned memory
///
/// Writes land directly in the wrapped slice.
#[derive(Debug)]
pub struct SliceBuffer<'a> {
    bytes: &'a mut [u8],
}

impl<'a> SliceBuffer<'a> {
    pub fn wrap(bytes: &'a mut [u8]) -> Self {
        Self { bytes }
    }

    pub fn into_inner(self) -> &'a mut [u8] {
        self.bytes
    }
}

impl BerBuffer for SliceBuffer<'_> {
    fn as_bytes(&self) -> &[u8] {
        &*self.bytes
    }

    fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut *self.bytes
    }
}

/// Buffer that owns a zero-filled region of fixed size
#[derive(Debug, Clone)]
pub struct OwnedBuffer {
    bytes: BytesMut,
}

impl OwnedBuffer {
    /// Allocate `capacity` zero bytes
    pub fn allocate(capacity: usize) -> Self {
        Self {
            bytes: BytesMut::zeroed(capacity),
        }
    }

    /// Freeze into an immutable, cheaply clonable `Bytes`
    pub fn into_bytes(self) -> Bytes {
        self.bytes.freeze()
    }

    pub fn into_inner(self) -> BytesMut {
        self.bytes
    }
}

impl BerBuffer for OwnedBuffer {
    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

/// Capacity is the current length; the buffer is never grown.
impl BerBuffer for BytesMut {
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn as_bytes_mut(&mut self) -> &mut [u8] {
        self
    }
}

/// Capacity is the current length; the buffer is never grown.
impl BerBuffer for Vec<u8> {
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn as_bytes_mut(&mut self) -> &mut [u8] {
        self
    }
}
