//! Coercion of arbitrary pair cursors into concrete collections.

use std::hash::Hash;

use kivi_common::Result;
use kivi_pairmap::OrderedPairs;

use crate::cursor::PairCursor;

/// Drains a cursor into an ordered mapping keyed by the original keys.
///
/// Entries appear in discovery order; duplicate keys collapse to the last value
/// seen. Pass `&mut cursor` to keep the (exhausted) cursor afterwards.
pub fn collect_pairs<C>(mut cursor: C) -> Result<OrderedPairs<C::Key, C::Value>>
where
    C: PairCursor,
    C::Key: Eq + Hash + Clone,
{
    let mut pairs = OrderedPairs::new();
    while cursor.is_valid()? {
        let (key, value) = cursor.current()?;
        pairs.insert(key, value);
        cursor.advance()?;
    }
    Ok(pairs)
}

/// Drains a cursor into a `Vec` of entries, duplicates retained.
pub fn collect_entries<C>(mut cursor: C) -> Result<Vec<(C::Key, C::Value)>>
where
    C: PairCursor,
{
    let mut entries = Vec::new();
    while cursor.is_valid()? {
        entries.push(cursor.current()?);
        cursor.advance()?;
    }
    Ok(entries)
}
