//! # Structural Hashing
//!
//! Computes one deterministic [`Hash`] over an arbitrarily nested record
//! (a transaction, its inputs, outputs and payload) without a schema
//! compiler.
//!
//! ## How it works
//!
//! Every type that takes part implements [`Hashable`]: "append my
//! hash-relevant bytes, in canonical order, to this buffer". Composite
//! types call `compute_hash` on their fields one after the other; sequences
//! call it on their elements in order. [`hash_full`] opens a buffer, lets
//! the record fill it, and digests the result exactly once.
//!
//! ```text
//! hash_full(tx)
//!   └─ tx.compute_hash(buf)
//!        ├─ buf.put_u8(type)
//!        ├─ for input in inputs  → input.compute_hash(buf)
//!        ├─ for output in outputs → output.compute_hash(buf)
//!        └─ payload.compute_hash(buf)
//!   └─ hash(buf)
//! ```
//!
//! ## Rules
//!
//! - A type with its own `compute_hash` is never decomposed further. That is
//!   how fields such as signatures stay out of the hash.
//! - Sequences contribute their elements in order. Not sorted, not
//!   deduplicated, no length prefix.
//! - `None` contributes nothing. An absent record passed to
//!   [`hash_full_opt`] hashes to [`Hash::zero()`] without touching the
//!   digest at all.
//! - Integers are written fixed-width little-endian; `u8` and `bool` are a
//!   single byte; byte arrays are their raw bytes.
//! - Plain structs list their fields explicitly, in a declared order, with
//!   [`impl_hashable!`](crate::impl_hashable). Field order is part of the
//!   protocol and must never depend on how a compiler or serializer happens
//!   to enumerate fields.
//!
//! Accumulation is strictly sequential per record. Different records can be
//! hashed on different threads; there is no shared state.

use bytes::BufMut;
use tracing::trace;

use crate::crypto::digest::hash;
use crate::crypto::hash::Hash;

pub use bytes::BytesMut;

/// A record that can contribute its canonical bytes to a structural hash.
pub trait Hashable {
    /// Appends this value's hash-relevant bytes to `buffer`.
    ///
    /// Must be a pure function of the value: same value, same bytes, every
    /// time, on every platform.
    fn compute_hash(&self, buffer: &mut BytesMut);
}

/// Serializes `record` into a fresh buffer and hashes the buffer.
pub fn hash_full<T: Hashable + ?Sized>(record: &T) -> Hash {
    let mut buffer = BytesMut::new();
    hash_part(record, &mut buffer);
    trace!(bytes = buffer.len(), "structural hash");
    hash(&buffer)
}

/// Like [`hash_full`], but an absent record yields [`Hash::zero()`].
///
/// The digest function is not called at all for `None`.
pub fn hash_full_opt<T: Hashable + ?Sized>(record: Option<&T>) -> Hash {
    match record {
        Some(record) => hash_full(record),
        None => Hash::zero(),
    }
}

/// Appends the hash-relevant bytes of `record` to `buffer`.
///
/// Exposed for types that are hashed as part of a larger buffer (for
/// example a block header that embeds a transaction list).
pub fn hash_part<T: Hashable + ?Sized>(record: &T, buffer: &mut BytesMut) {
    record.compute_hash(buffer);
}

/// Implements [`Hashable`] for a struct by hashing the listed fields in the
/// listed order.
///
/// ```
/// use tally_protocol::impl_hashable;
///
/// struct Entry {
///     height: u64,
///     flags: u8,
///     cached_label: String, // not listed, not hashed
/// }
///
/// impl_hashable!(Entry { height, flags });
/// ```
#[macro_export]
macro_rules! impl_hashable {
    ($ty:ty { $($field:ident),+ $(,)? }) => {
        impl $crate::hashing::Hashable for $ty {
            fn compute_hash(&self, buffer: &mut $crate::hashing::BytesMut) {
                $( $crate::hashing::Hashable::compute_hash(&self.$field, buffer); )+
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Leaf values
// ---------------------------------------------------------------------------

impl Hashable for u8 {
    fn compute_hash(&self, buffer: &mut BytesMut) {
        buffer.put_u8(*self);
    }
}

impl Hashable for bool {
    fn compute_hash(&self, buffer: &mut BytesMut) {
        buffer.put_u8(u8::from(*self));
    }
}

macro_rules! hashable_le_int {
    ($($ty:ty => $put:ident),+ $(,)?) => {
        $(
            impl Hashable for $ty {
                fn compute_hash(&self, buffer: &mut BytesMut) {
                    buffer.$put(*self);
                }
            }
        )+
    };
}

hashable_le_int!(
    u16 => put_u16_le,
    u32 => put_u32_le,
    u64 => put_u64_le,
    i32 => put_i32_le,
    i64 => put_i64_le,
);

// ---------------------------------------------------------------------------
// Containers
// ---------------------------------------------------------------------------

impl<T: Hashable> Hashable for [T] {
    fn compute_hash(&self, buffer: &mut BytesMut) {
        for elem in self {
            elem.compute_hash(buffer);
        }
    }
}

impl<T: Hashable, const N: usize> Hashable for [T; N] {
    fn compute_hash(&self, buffer: &mut BytesMut) {
        self.as_slice().compute_hash(buffer);
    }
}

impl<T: Hashable> Hashable for Vec<T> {
    fn compute_hash(&self, buffer: &mut BytesMut) {
        self.as_slice().compute_hash(buffer);
    }
}

impl<T: Hashable> Hashable for Option<T> {
    fn compute_hash(&self, buffer: &mut BytesMut) {
        if let Some(value) = self {
            value.compute_hash(buffer);
        }
    }
}

impl<T: Hashable + ?Sized> Hashable for &T {
    fn compute_hash(&self, buffer: &mut BytesMut) {
        (**self).compute_hash(buffer);
    }
}

impl<T: Hashable + ?Sized> Hashable for Box<T> {
    fn compute_hash(&self, buffer: &mut BytesMut) {
        (**self).compute_hash(buffer);
    }
}

impl<A: Hashable, B: Hashable> Hashable for (A, B) {
    fn compute_hash(&self, buffer: &mut BytesMut) {
        self.0.compute_hash(buffer);
        self.1.compute_hash(buffer);
    }
}

impl<A: Hashable, B: Hashable, C: Hashable> Hashable for (A, B, C) {
    fn compute_hash(&self, buffer: &mut BytesMut) {
        self.0.compute_hash(buffer);
        self.1.compute_hash(buffer);
        self.2.compute_hash(buffer);
    }
}
