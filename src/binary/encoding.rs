// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Recursive binary encoding.
//!
//! Three shapes of value, three kinds of implementation, picked by type:
//!
//! - **Scalars** write their fixed-width little-endian byte image.
//! - **Sequences** (`[T]`, `Vec<T>`, `[T; N]`) write a `u64` element count,
//!   then each element recursively. On decode a `Vec` is resized to the
//!   stored count; a fixed array that cannot be resized fails with
//!   `SizeMismatch`.
//! - **Self-describing** types implement the traits by hand, delegating to
//!   the two shapes above in whatever order their layout needs.
//!
//! Scalar slices take a bulk path so a multi-gigabyte permutation is not
//! written one `write_all` per element.

use std::io::{self, Read, Write};
use std::mem::size_of;

use crate::error::{IndexError, Result};

/// Elements buffered per bulk read/write of a scalar slice.
const SCALAR_CHUNK: usize = 64 * 1024;

/// Write a value's binary image.
pub trait Encode {
    fn encode<W: Write>(&self, w: &mut W) -> Result<()>;

    /// Write every element of `items` back to back.
    fn encode_slice<W: Write>(items: &[Self], w: &mut W) -> Result<()>
    where
        Self: Sized,
    {
        for item in items {
            item.encode(w)?;
        }
        Ok(())
    }
}

/// Read a value's binary image back into an existing value.
pub trait Decode {
    fn decode_into<R: Read>(&mut self, r: &mut R) -> Result<()>;

    /// Fill every element of `items` in order.
    fn decode_slice<R: Read>(items: &mut [Self], r: &mut R) -> Result<()>
    where
        Self: Sized,
    {
        for item in items {
            item.decode_into(r)?;
        }
        Ok(())
    }

    /// Decode into a fresh default value.
    fn decode<R: Read>(r: &mut R) -> Result<Self>
    where
        Self: Sized + Default,
    {
        let mut value = Self::default();
        value.decode_into(r)?;
        Ok(value)
    }
}

// ============================================================================
// SCALARS
// ============================================================================

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl Encode for $ty {
            #[inline]
            fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
                w.write_all(&self.to_le_bytes())?;
                Ok(())
            }

            fn encode_slice<W: Write>(items: &[Self], w: &mut W) -> Result<()> {
                let mut buf = Vec::with_capacity(items.len().min(SCALAR_CHUNK) * size_of::<$ty>());
                for chunk in items.chunks(SCALAR_CHUNK) {
                    buf.clear();
                    for value in chunk {
                        buf.extend_from_slice(&value.to_le_bytes());
                    }
                    w.write_all(&buf)?;
                }
                Ok(())
            }
        }

        impl Decode for $ty {
            #[inline]
            fn decode_into<R: Read>(&mut self, r: &mut R) -> Result<()> {
                let mut bytes = [0u8; size_of::<$ty>()];
                r.read_exact(&mut bytes)?;
                *self = <$ty>::from_le_bytes(bytes);
                Ok(())
            }

            fn decode_slice<R: Read>(items: &mut [Self], r: &mut R) -> Result<()> {
                const WIDTH: usize = size_of::<$ty>();
                let mut buf = vec![0u8; items.len().min(SCALAR_CHUNK) * WIDTH];
                for chunk in items.chunks_mut(SCALAR_CHUNK) {
                    let bytes = &mut buf[..chunk.len() * WIDTH];
                    r.read_exact(bytes)?;
                    for (value, raw) in chunk.iter_mut().zip(bytes.chunks_exact(WIDTH)) {
                        let mut image = [0u8; WIDTH];
                        image.copy_from_slice(raw);
                        *value = <$ty>::from_le_bytes(image);
                    }
                }
                Ok(())
            }
        }
    )*};
}

impl_scalar!(u8, u16, u32, u64, i8, i16, i32, i64);

// usize is written as u64 so files move between 32- and 64-bit hosts.
impl Encode for usize {
    fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        (*self as u64).encode(w)
    }
}

impl Decode for usize {
    fn decode_into<R: Read>(&mut self, r: &mut R) -> Result<()> {
        let raw = u64::decode(r)?;
        *self = to_len(raw)?;
        Ok(())
    }
}

fn to_len(count: u64) -> Result<usize> {
    usize::try_from(count).map_err(|_| {
        IndexError::Io(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("length {} does not fit in memory on this host", count),
        ))
    })
}

// ============================================================================
// SEQUENCES
// ============================================================================

impl<T: Encode> Encode for [T] {
    fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        (self.len() as u64).encode(w)?;
        T::encode_slice(self, w)
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        self.as_slice().encode(w)
    }
}

impl<T: Decode + Default + Clone> Decode for Vec<T> {
    /// Resize to the stored count, then decode each element.
    ///
    /// Growth happens in bounded steps so a corrupt count hits end-of-stream
    /// before it can demand an absurd allocation.
    fn decode_into<R: Read>(&mut self, r: &mut R) -> Result<()> {
        let count = to_len(u64::decode(r)?)?;

        if count <= self.len() {
            self.truncate(count);
            return T::decode_slice(self, r);
        }

        T::decode_slice(self, r)?;
        while self.len() < count {
            let start = self.len();
            let step = (count - start).min(SCALAR_CHUNK);
            self.resize(start + step, T::default());
            T::decode_slice(&mut self[start..], r)?;
        }
        Ok(())
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        self.as_slice().encode(w)
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    /// Arrays cannot be resized: a stored count other than `N` is fatal.
    fn decode_into<R: Read>(&mut self, r: &mut R) -> Result<()> {
        let count = u64::decode(r)?;
        if count != N as u64 {
            return Err(IndexError::SizeMismatch {
                expected: N as u64,
                found: count,
            });
        }
        T::decode_slice(self, r)
    }
}
