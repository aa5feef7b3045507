//! Thin single-pass adapters over an underlying pair cursor.
//!
//! Each adapter wraps exactly one cursor and keeps no state beyond what its own
//! traversal needs:
//!
//! - [`FilteredPairs`]: skips pairs rejected by a predicate; skipping happens inside
//!   the validity check, so `current` only ever sees accepted pairs.
//! - [`MappedValues`]: applies a callback to each value, keys preserved.
//! - [`ReversedPairs`]: materializes the underlying cursor once at construction and
//!   traverses the copy back to front.
//!
//! The [`PairCursorExt`](crate::cursor::PairCursorExt) trait provides convenient
//! methods to construct these adapters.

use kivi_common::Result;
use kivi_common::error::Error;

use crate::cursor::PairCursor;

/// A pair cursor that yields only the pairs accepted by a predicate.
///
/// The predicate receives the key and the value by reference. Rejected pairs are
/// passed over inside [`is_valid`](PairCursor::is_valid): the check advances the
/// underlying cursor until it either finds an accepted pair or exhausts it.
#[derive(Debug, Clone)]
pub struct FilteredPairs<C, F> {
    /// The underlying cursor.
    inner: C,
    /// The acceptance predicate.
    predicate: F,
}

impl<C, F> FilteredPairs<C, F>
where
    C: PairCursor,
    F: FnMut(&C::Key, &C::Value) -> bool,
{
    /// Creates a new `FilteredPairs` over `inner`.
    pub fn new(inner: C, predicate: F) -> Self {
        FilteredPairs { inner, predicate }
    }

    /// Consumes the adapter and returns the underlying cursor.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C, F> PairCursor for FilteredPairs<C, F>
where
    C: PairCursor,
    F: FnMut(&C::Key, &C::Value) -> bool,
{
    type Key = C::Key;
    type Value = C::Value;

    fn is_valid(&mut self) -> Result<bool> {
        while self.inner.is_valid()? {
            let (key, value) = self.inner.current()?;
            if (self.predicate)(&key, &value) {
                return Ok(true);
            }
            self.inner.advance()?;
        }
        Ok(false)
    }

    fn current(&mut self) -> Result<(C::Key, C::Value)> {
        self.inner.current()
    }

    fn advance(&mut self) -> Result<()> {
        self.inner.advance()
    }

    fn restart(&mut self) -> Result<()> {
        self.inner.restart()
    }
}

/// A pair cursor that applies a callback to every value, keys preserved.
#[derive(Debug, Clone)]
pub struct MappedValues<C, F> {
    /// The underlying cursor.
    inner: C,
    /// The value transform.
    transform: F,
}

impl<C, F> MappedValues<C, F> {
    /// Creates a new `MappedValues` over `inner`.
    pub fn new(inner: C, transform: F) -> Self {
        MappedValues { inner, transform }
    }

    /// Consumes the adapter and returns the underlying cursor.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C, F, T> PairCursor for MappedValues<C, F>
where
    C: PairCursor,
    F: FnMut(C::Value) -> T,
{
    type Key = C::Key;
    type Value = T;

    fn is_valid(&mut self) -> Result<bool> {
        self.inner.is_valid()
    }

    fn current(&mut self) -> Result<(C::Key, T)> {
        let (key, value) = self.inner.current()?;
        Ok((key, (self.transform)(value)))
    }

    fn advance(&mut self) -> Result<()> {
        self.inner.advance()
    }

    fn restart(&mut self) -> Result<()> {
        self.inner.restart()
    }
}

/// A pair cursor traversing a materialized sequence back to front, keys preserved.
///
/// Construction drains the underlying cursor completely; duplicates are retained.
/// Restart is free.
#[derive(Debug, Clone)]
pub struct ReversedPairs<K, V> {
    /// The materialized entries, in the underlying cursor's order.
    entries: Vec<(K, V)>,
    /// Offset from the back: 0 is the last entry.
    pos: usize,
}

impl<K, V> ReversedPairs<K, V> {
    /// Creates a new `ReversedPairs` by draining `cursor`.
    pub fn new<C>(cursor: C) -> Result<Self>
    where
        C: PairCursor<Key = K, Value = V>,
    {
        let entries = crate::convert::collect_entries(cursor)?;
        Ok(ReversedPairs { entries, pos: 0 })
    }

    /// Returns the total number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> PairCursor for ReversedPairs<K, V>
where
    K: Clone,
    V: Clone,
{
    type Key = K;
    type Value = V;

    fn is_valid(&mut self) -> Result<bool> {
        Ok(self.pos < self.entries.len())
    }

    fn current(&mut self) -> Result<(K, V)> {
        let len = self.entries.len();
        if self.pos < len {
            Ok(self.entries[len - 1 - self.pos].clone())
        } else {
            Err(Error::position_out_of_bounds(self.pos, len))
        }
    }

    fn advance(&mut self) -> Result<()> {
        self.pos += 1;
        Ok(())
    }

    fn restart(&mut self) -> Result<()> {
        self.pos = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::PairCursorExt;
    use crate::sources::{IterCursor, VecCursor};

    #[test]
    fn test_filter_skips_rejected() {
        let cursor = VecCursor::new(vec![("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
        let mut filtered = cursor.filter_pairs(|_, value| value % 2 == 0);

        let mut seen = Vec::new();
        while filtered.is_valid().unwrap() {
            seen.push(filtered.current().unwrap());
            filtered.advance().unwrap();
        }
        assert_eq!(seen, [("b", 2), ("d", 4)]);
    }

    #[test]
    fn test_filter_rejecting_everything() {
        let cursor = VecCursor::new(vec![("a", 1), ("b", 3)]);
        let mut filtered = cursor.filter_pairs(|_, value| value % 2 == 0);
        assert!(!filtered.is_valid().unwrap());
    }

    #[test]
    fn test_filter_on_key() {
        let cursor = VecCursor::new(vec![("keep", 1), ("drop", 2), ("keep", 3)]);
        let entries = cursor
            .filter_pairs(|key, _| *key == "keep")
            .collect_entries()
            .unwrap();
        assert_eq!(entries, [("keep", 1), ("keep", 3)]);
    }

    #[test]
    fn test_filter_restart_delegates() {
        let cursor = VecCursor::new(vec![("a", 1), ("b", 2)]);
        let mut filtered = cursor.filter_pairs(|_, value| value % 2 == 0);
        assert!(filtered.is_valid().unwrap());
        filtered.advance().unwrap();
        filtered.restart().unwrap();
        assert_eq!(filtered.current().unwrap(), ("a", 1));
        assert!(filtered.is_valid().unwrap());
        assert_eq!(filtered.current().unwrap(), ("b", 2));
    }

    #[test]
    fn test_map_preserves_keys() {
        let cursor = VecCursor::new(vec![(1u32, 10u32), (2, 20)]);
        let entries = cursor
            .map_values(|value| format!("v{value}"))
            .collect_entries()
            .unwrap();
        assert_eq!(entries, [(1, "v10".to_string()), (2, "v20".to_string())]);
    }

    #[test]
    fn test_map_over_one_pass_source() {
        let cursor = IterCursor::new([("a", 2), ("b", 3)]);
        let entries = cursor
            .map_values(|value| value * value)
            .collect_entries()
            .unwrap();
        assert_eq!(entries, [("a", 4), ("b", 9)]);
    }

    #[test]
    fn test_reversed_order_and_keys() {
        let cursor = VecCursor::new(vec![("a", 1), ("b", 2), ("c", 3)]);
        let mut reversed = cursor.reversed().unwrap();

        let mut seen = Vec::new();
        while reversed.is_valid().unwrap() {
            seen.push(reversed.current().unwrap());
            reversed.advance().unwrap();
        }
        assert_eq!(seen, [("c", 3), ("b", 2), ("a", 1)]);
    }

    #[test]
    fn test_reversed_restart() {
        let cursor = VecCursor::new(vec![("a", 1), ("b", 2)]);
        let mut reversed = cursor.reversed().unwrap();
        reversed.advance().unwrap();
        reversed.restart().unwrap();
        assert_eq!(reversed.current().unwrap(), ("b", 2));
    }

    #[test]
    fn test_reversed_empty() {
        let cursor = VecCursor::<&str, u32>::new(vec![]);
        let mut reversed = cursor.reversed().unwrap();
        assert!(reversed.is_empty());
        assert!(!reversed.is_valid().unwrap());
        assert!(reversed.current().is_err());
    }

    #[test]
    fn test_reversed_keeps_duplicates() {
        let cursor = VecCursor::new(vec![("a", 1), ("a", 2)]);
        let entries = cursor.reversed().unwrap().collect_entries().unwrap();
        assert_eq!(entries, [("a", 2), ("a", 1)]);
    }
}
