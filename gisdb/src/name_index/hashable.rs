//! Hash capability required by [`HashTable`](super::HashTable) entries.

/// 32-bit FNV offset basis.
pub const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;

/// 32-bit FNV prime.
pub const FNV_PRIME: u32 = 0x0100_0193;

/// FNV-1 hash of a string, folded to a non-negative value.
///
/// Each character is XORed into the running hash before the multiply. The
/// result is the absolute value of the hash read as a signed 32-bit integer,
/// so `i32::MIN` folds to `2^31`.
///
/// Characters are Unicode scalar values, so a character outside the Basic
/// Multilingual Plane is hashed once rather than as two UTF-16 surrogates.
pub fn fnv1_hash(key: &str) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    for c in key.chars() {
        hash ^= c as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    (hash as i32).unsigned_abs()
}

/// An entry that can be stored in a [`HashTable`](super::HashTable).
///
/// Equality (`PartialEq`) must compare keys only: two entries with equal keys
/// occupy the same table position, and the second is merged into the first
/// through [`absorb`](Hashable::absorb).
pub trait Hashable: PartialEq {
    /// Deterministic hash of the entry's key.
    fn hash_code(&self) -> u32;

    /// Merge the payload of an entry with an equal key into `self`.
    fn absorb(&mut self, other: Self);
}
