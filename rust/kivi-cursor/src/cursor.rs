//! The pair-cursor capability and its extension trait.

use std::hash::Hash;

use kivi_common::Result;
use kivi_pairmap::OrderedPairs;

use crate::adapters::{FilteredPairs, MappedValues, ReversedPairs};
use crate::convert;
use crate::replay::ReplayCursor;

/// A forward cursor over a sequence of key/value pairs.
///
/// `PairCursor` is the capability contract shared by every source and adapter in
/// this crate: a producer of (key, value) pairs that can be consumed in a single
/// forward pass. A cursor points at one pair at a time; [`is_valid`] reports whether
/// a pair is there, [`current`] reads it, [`advance`] moves on.
///
/// All operations take `&mut self`: even reads may perform work on the way (pulling
/// bytes from a reader, caching a newly observed pair), and a fault reported by the
/// underlying producer propagates unchanged through the `Result`.
///
/// [`is_valid`]: PairCursor::is_valid
/// [`current`]: PairCursor::current
/// [`advance`]: PairCursor::advance
pub trait PairCursor {
    type Key;
    type Value;

    /// Checks whether the cursor currently points at a pair.
    ///
    /// Returns `Ok(false)` once the sequence is exhausted; after that, [`current`]
    /// reports an error rather than a stale pair.
    ///
    /// [`current`]: PairCursor::current
    fn is_valid(&mut self) -> Result<bool>;

    /// Returns the pair at the current position.
    ///
    /// Defined only while [`is_valid`] reports `true`. Reading past the end is the
    /// [`PositionOutOfBounds`] error, never a stale or absent-looking pair. Calling
    /// `current` repeatedly without advancing returns the same pair each time.
    ///
    /// [`is_valid`]: PairCursor::is_valid
    /// [`PositionOutOfBounds`]: kivi_common::error::ErrorKind::PositionOutOfBounds
    fn current(&mut self) -> Result<(Self::Key, Self::Value)>;

    /// Moves the cursor forward by one pair.
    fn advance(&mut self) -> Result<()>;

    /// Resets the cursor to the first pair.
    ///
    /// Materialized cursors reset cheaply. Genuinely one-pass cursors report
    /// [`RestartUnsupported`] once consumption has begun.
    ///
    /// [`RestartUnsupported`]: kivi_common::error::ErrorKind::RestartUnsupported
    fn restart(&mut self) -> Result<()>;
}

impl<C> PairCursor for &mut C
where
    C: PairCursor + ?Sized,
{
    type Key = C::Key;
    type Value = C::Value;

    fn is_valid(&mut self) -> Result<bool> {
        (**self).is_valid()
    }

    fn current(&mut self) -> Result<(Self::Key, Self::Value)> {
        (**self).current()
    }

    fn advance(&mut self) -> Result<()> {
        (**self).advance()
    }

    fn restart(&mut self) -> Result<()> {
        (**self).restart()
    }
}

/// Adapter-building and collection conveniences, implemented for every pair cursor.
pub trait PairCursorExt: PairCursor + Sized {
    /// Wraps this cursor so that pairs rejected by `predicate` are skipped.
    fn filter_pairs<F>(self, predicate: F) -> FilteredPairs<Self, F>
    where
        F: FnMut(&Self::Key, &Self::Value) -> bool,
    {
        FilteredPairs::new(self, predicate)
    }

    /// Wraps this cursor so that `transform` is applied to every value.
    fn map_values<F, T>(self, transform: F) -> MappedValues<Self, F>
    where
        F: FnMut(Self::Value) -> T,
    {
        MappedValues::new(self, transform)
    }

    /// Materializes this cursor and returns a cursor traversing it back to front.
    fn reversed(self) -> Result<ReversedPairs<Self::Key, Self::Value>> {
        ReversedPairs::new(self)
    }

    /// Wraps this cursor in a lazily-caching [`ReplayCursor`].
    fn replay(self) -> ReplayCursor<Self>
    where
        Self::Key: Eq + Hash + Clone,
        Self::Value: Clone,
    {
        ReplayCursor::new(self)
    }

    /// Drains this cursor into an ordered mapping (duplicate keys: last write wins).
    fn collect_pairs(self) -> Result<OrderedPairs<Self::Key, Self::Value>>
    where
        Self::Key: Eq + Hash + Clone,
    {
        convert::collect_pairs(self)
    }

    /// Drains this cursor into a `Vec` of entries (duplicate keys retained).
    fn collect_entries(self) -> Result<Vec<(Self::Key, Self::Value)>> {
        convert::collect_entries(self)
    }
}

impl<C: PairCursor> PairCursorExt for C {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::IterCursor;

    #[test]
    fn test_adapter_pipeline() {
        let cursor = IterCursor::new((0u32..8).map(|i| (i, i * 10)));
        let pairs = cursor
            .filter_pairs(|key, _| key % 2 == 0)
            .map_values(|value| value + 1)
            .collect_pairs()
            .unwrap();

        let collected: Vec<_> = pairs.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(collected, [(0, 1), (2, 21), (4, 41), (6, 61)]);
    }

    #[test]
    fn test_mut_reference_is_a_cursor() {
        let mut cursor = IterCursor::new([(1u8, 'a'), (2, 'b'), (3, 'c')]);
        let entries = crate::convert::collect_entries(&mut cursor).unwrap();
        assert_eq!(entries, [(1, 'a'), (2, 'b'), (3, 'c')]);

        // The drain went through the original cursor, which is now exhausted.
        assert!(!cursor.is_valid().unwrap());
    }

    #[test]
    fn test_replay_through_ext() {
        let mut replay = IterCursor::new([("a", 1), ("b", 2)]).replay();
        assert_eq!(replay.size().unwrap(), 2);
    }
}
