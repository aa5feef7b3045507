//! Concrete pair sources: materialized vectors and plain iterators.
//!
//! The two flavors differ in what `restart` can do. [`VecCursor`] owns every pair up
//! front, so restarting is a free index reset. [`IterCursor`] wraps an arbitrary
//! iterator and is genuinely one-pass: once consumption has begun, restart is the
//! [`RestartUnsupported`] error.
//!
//! [`RestartUnsupported`]: kivi_common::error::ErrorKind::RestartUnsupported

use kivi_common::Result;
use kivi_common::error::Error;

use crate::cursor::PairCursor;

/// A pair cursor over an already-materialized sequence of entries.
///
/// Keys need not be unique; the cursor yields entries exactly as stored, in order.
///
/// # Examples
///
/// ```
/// use kivi_cursor::{PairCursor, VecCursor};
///
/// let mut cursor = VecCursor::new(vec![("a", 1), ("b", 2)]);
/// assert!(cursor.is_valid()?);
/// assert_eq!(cursor.current()?, ("a", 1));
/// cursor.advance()?;
/// assert_eq!(cursor.current()?, ("b", 2));
/// cursor.restart()?;
/// assert_eq!(cursor.current()?, ("a", 1));
/// # Ok::<(), kivi_common::error::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct VecCursor<K, V> {
    /// The entries, in traversal order.
    entries: Vec<(K, V)>,
    /// Current position in `entries`.
    pos: usize,
}

impl<K, V> VecCursor<K, V> {
    /// Creates a cursor over the given entries.
    pub fn new(entries: impl Into<Vec<(K, V)>>) -> Self {
        VecCursor {
            entries: entries.into(),
            pos: 0,
        }
    }

    /// Returns the total number of entries, traversed or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the cursor holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the cursor and returns the underlying entries.
    pub fn into_entries(self) -> Vec<(K, V)> {
        self.entries
    }
}

impl<K, V> From<Vec<(K, V)>> for VecCursor<K, V> {
    fn from(entries: Vec<(K, V)>) -> Self {
        VecCursor::new(entries)
    }
}

impl<K, V> FromIterator<(K, V)> for VecCursor<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        VecCursor::new(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<K, V> PairCursor for VecCursor<K, V>
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
        self.entries
            .get(self.pos)
            .cloned()
            .ok_or_else(|| Error::position_out_of_bounds(self.pos, self.entries.len()))
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

/// A pair cursor over an arbitrary iterator of (key, value) pairs.
///
/// The iterator is consumed lazily through a single-slot lookahead buffer, so
/// [`current`](PairCursor::current) is repeatable at one position even though the
/// underlying iterator only moves forward. The cursor is one-pass: `restart` reports
/// an error once the first pair has been pulled.
///
/// Anything `IntoIterator` works as input, which covers both plain iterators and
/// collections handing out their iterator.
pub struct IterCursor<I: Iterator> {
    iter: std::iter::Fuse<I>,
    /// The pair at the current position, if already pulled.
    lookahead: Option<I::Item>,
    /// Number of pairs pulled from the iterator so far.
    pulled: usize,
    /// True once any pull has been attempted.
    started: bool,
}

impl<I: Iterator> IterCursor<I> {
    /// Creates a cursor over the given iterable.
    pub fn new<T>(iterable: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        IterCursor {
            iter: iterable.into_iter().fuse(),
            lookahead: None,
            pulled: 0,
            started: false,
        }
    }

    fn fill(&mut self) {
        if self.lookahead.is_none() {
            self.started = true;
            self.lookahead = self.iter.next();
            if self.lookahead.is_some() {
                self.pulled += 1;
            }
        }
    }
}

impl<K, V, I> PairCursor for IterCursor<I>
where
    I: Iterator<Item = (K, V)>,
    K: Clone,
    V: Clone,
{
    type Key = K;
    type Value = V;

    fn is_valid(&mut self) -> Result<bool> {
        self.fill();
        Ok(self.lookahead.is_some())
    }

    fn current(&mut self) -> Result<(K, V)> {
        self.fill();
        self.lookahead
            .clone()
            .ok_or_else(|| Error::position_out_of_bounds(self.pulled, self.pulled))
    }

    fn advance(&mut self) -> Result<()> {
        self.fill();
        self.lookahead = None;
        Ok(())
    }

    fn restart(&mut self) -> Result<()> {
        if self.started {
            Err(Error::restart_unsupported("IterCursor"))
        } else {
            Ok(())
        }
    }
}

impl<I: Iterator> std::fmt::Debug for IterCursor<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IterCursor")
            .field("pulled", &self.pulled)
            .field("started", &self.started)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kivi_common::error::ErrorKind;

    #[test]
    fn test_vec_cursor_traversal() {
        let mut cursor = VecCursor::new(vec![("a", 1), ("b", 2), ("c", 3)]);
        let mut seen = Vec::new();
        while cursor.is_valid().unwrap() {
            seen.push(cursor.current().unwrap());
            cursor.advance().unwrap();
        }
        assert_eq!(seen, [("a", 1), ("b", 2), ("c", 3)]);
    }

    #[test]
    fn test_vec_cursor_restart() {
        let mut cursor = VecCursor::new(vec![("a", 1), ("b", 2)]);
        cursor.advance().unwrap();
        cursor.restart().unwrap();
        assert_eq!(cursor.current().unwrap(), ("a", 1));
    }

    #[test]
    fn test_vec_cursor_past_end() {
        let mut cursor = VecCursor::new(vec![("a", 1)]);
        cursor.advance().unwrap();
        assert!(!cursor.is_valid().unwrap());

        let err = cursor.current().unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::PositionOutOfBounds {
                position: 1,
                discovered: 1
            }
        ));
    }

    #[test]
    fn test_vec_cursor_empty() {
        let mut cursor = VecCursor::<&str, u32>::new(vec![]);
        assert!(cursor.is_empty());
        assert!(!cursor.is_valid().unwrap());
    }

    #[test]
    fn test_iter_cursor_current_is_repeatable() {
        let mut cursor = IterCursor::new([("a", 1), ("b", 2)]);
        assert_eq!(cursor.current().unwrap(), ("a", 1));
        assert_eq!(cursor.current().unwrap(), ("a", 1));
        cursor.advance().unwrap();
        assert_eq!(cursor.current().unwrap(), ("b", 2));
    }

    #[test]
    fn test_iter_cursor_advance_skips_unread() {
        let mut cursor = IterCursor::new([("a", 1), ("b", 2), ("c", 3)]);
        cursor.advance().unwrap();
        assert_eq!(cursor.current().unwrap(), ("b", 2));
    }

    #[test]
    fn test_iter_cursor_restart_before_consumption() {
        let mut cursor = IterCursor::new([("a", 1)]);
        cursor.restart().unwrap();
        assert_eq!(cursor.current().unwrap(), ("a", 1));
    }

    #[test]
    fn test_iter_cursor_restart_after_consumption() {
        let mut cursor = IterCursor::new([("a", 1), ("b", 2)]);
        cursor.current().unwrap();

        let err = cursor.restart().unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::RestartUnsupported { .. }));
    }

    #[test]
    fn test_iter_cursor_exhaustion() {
        let mut cursor = IterCursor::new([("a", 1)]);
        cursor.advance().unwrap();
        assert!(!cursor.is_valid().unwrap());
        assert!(cursor.current().is_err());
        // Fused: repeated validity checks after exhaustion stay false.
        assert!(!cursor.is_valid().unwrap());
    }
}
