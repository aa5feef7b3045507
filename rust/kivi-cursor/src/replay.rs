//! The lazily-caching replay adapter.

use std::hash::Hash;

use kivi_common::Result;
use kivi_common::error::Error;
use kivi_pairmap::OrderedPairs;

use crate::cursor::PairCursor;
use crate::sources::VecCursor;

/// How far the adapter has gotten with its source.
enum DrainState<C> {
    /// Populated up front from a materialized sequence; there never was a lazy phase.
    Eager,
    /// Still pulling pairs from the source, which is owned here exclusively.
    Partial(C),
    /// The source reported exhaustion and has been released.
    Complete,
}

/// A pair cursor that caches every pair of a one-pass source on first observation,
/// making the sequence repeatable and randomly re-enterable.
///
/// `ReplayCursor` wraps any [`PairCursor`] and transparently records each (key,
/// value) pair the first time it is observed. Re-reading an already-discovered
/// position is served from the cache and never touches the source again, even in
/// the middle of the first traversal. Nothing is materialized eagerly: the source
/// is only pulled as far as the caller has actually read, unless [`size`] or
/// [`snapshot`] forces a full drain, or a normal traversal exhausts it.
///
/// The adapter's read position ([`position`]) is independent of how much has been
/// discovered; [`restart_cursor`] rewinds it to the beginning without discarding
/// the cache and without restarting the source. Once the source reports
/// exhaustion, it is dropped on the spot and the adapter serves all further reads
/// from the cache alone.
///
/// Keys are preserved exactly as the source produced them. A duplicate key
/// overwrites the cached value (last write wins) but still occupies its own
/// position in the traversal order, mirroring what the source actually produced.
///
/// `ReplayCursor` is itself a [`PairCursor`], so it can be wrapped by any adapter
/// expecting a source.
///
/// # Examples
///
/// ```
/// use kivi_cursor::{IterCursor, PairCursor, ReplayCursor};
///
/// let source = IterCursor::new([("a", 1), ("b", 2)]);
/// let mut replay = ReplayCursor::new(source);
///
/// // The first pass pulls from the source and caches each pair.
/// let mut first = Vec::new();
/// while replay.is_valid()? {
///     first.push(replay.current()?);
///     replay.advance()?;
/// }
///
/// // The second pass is served entirely from the cache.
/// replay.restart_cursor();
/// let mut second = Vec::new();
/// while replay.is_valid()? {
///     second.push(replay.current()?);
///     replay.advance()?;
/// }
/// assert_eq!(first, second);
/// # Ok::<(), kivi_common::error::Error>(())
/// ```
///
/// [`size`]: ReplayCursor::size
/// [`snapshot`]: ReplayCursor::snapshot
/// [`position`]: ReplayCursor::position
/// [`restart_cursor`]: ReplayCursor::restart_cursor
pub struct ReplayCursor<C: PairCursor> {
    /// Cache of discovered pairs, keyed by original key, in discovery order.
    cached: OrderedPairs<C::Key, C::Value>,
    /// One key per pair the source produced, in discovery order.
    positions: Vec<C::Key>,
    /// Current read position into `positions`.
    cursor: usize,
    /// True while the pair at the source's physical position is already cached and
    /// the source owes one advance before the next undiscovered pair.
    pending_advance: bool,
    state: DrainState<C>,
}

impl<C: PairCursor> ReplayCursor<C> {
    /// Wraps a source for lazy caching. No pair is pulled until the first read.
    pub fn new(source: C) -> ReplayCursor<C> {
        ReplayCursor {
            cached: OrderedPairs::new(),
            positions: Vec::new(),
            cursor: 0,
            pending_advance: false,
            state: DrainState::Partial(source),
        }
    }

    /// Returns the number of pairs discovered so far, without touching the source.
    pub fn discovered(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` once no further source pulls can happen: either the source
    /// has been exhausted and released, or the adapter was populated eagerly.
    pub fn is_fully_drained(&self) -> bool {
        !matches!(self.state, DrainState::Partial(_))
    }

    /// Returns the current read position.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Rewinds the read position to the beginning.
    ///
    /// The cache is kept, and the source is deliberately left alone: replaying the
    /// discovered prefix is served from the cache, and lazy pulling past it resumes
    /// from wherever the source physically is. This holds for restartable and
    /// non-restartable sources alike.
    pub fn restart_cursor(&mut self) {
        self.cursor = 0;
    }
}

impl<C> ReplayCursor<C>
where
    C: PairCursor,
    C::Key: Eq + Hash + Clone,
{
    /// Returns the total number of pairs, draining the source if necessary.
    ///
    /// The read position is left untouched; only the cache frontier moves.
    pub fn size(&mut self) -> Result<usize> {
        self.drain()?;
        Ok(self.positions.len())
    }

    /// Returns every pair as an ordered mapping, draining the source if necessary.
    ///
    /// Entries are keyed by original key in discovery order; duplicate keys
    /// collapse to the last value seen.
    pub fn snapshot(&mut self) -> Result<&OrderedPairs<C::Key, C::Value>> {
        self.drain()?;
        Ok(&self.cached)
    }

    /// Consumes the adapter and returns the fully drained mapping.
    pub fn into_pairs(mut self) -> Result<OrderedPairs<C::Key, C::Value>> {
        self.drain()?;
        Ok(self.cached)
    }

    /// Pulls every remaining pair from the source. On success the source is
    /// released; on failure it is kept so the already-populated cache stays
    /// consistent with the source's physical position.
    fn drain(&mut self) -> Result<()> {
        let mut source = match std::mem::replace(&mut self.state, DrainState::Complete) {
            DrainState::Partial(source) => source,
            other => {
                self.state = other;
                return Ok(());
            }
        };

        let mut pending = self.pending_advance;
        let result =
            Self::pull_remaining(&mut source, &mut pending, &mut self.positions, &mut self.cached);
        self.pending_advance = pending;
        if result.is_err() {
            self.state = DrainState::Partial(source);
        }
        result
    }

    fn pull_remaining(
        source: &mut C,
        pending: &mut bool,
        positions: &mut Vec<C::Key>,
        cached: &mut OrderedPairs<C::Key, C::Value>,
    ) -> Result<()> {
        loop {
            if *pending {
                source.advance()?;
                *pending = false;
            }
            if !source.is_valid()? {
                return Ok(());
            }
            let (key, value) = source.current()?;
            positions.push(key.clone());
            cached.insert(key, value);
            *pending = true;
        }
    }
}

impl<K, V> ReplayCursor<VecCursor<K, V>>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Builds an adapter that is fully drained from the start.
    ///
    /// The cache and position list are populated directly from `entries`; there is
    /// no source and no lazy phase. Duplicate keys get separate position slots
    /// while the cache keeps the last value, exactly as lazy discovery would.
    pub fn from_entries(entries: impl Into<Vec<(K, V)>>) -> Self {
        let entries = entries.into();
        let mut cached = OrderedPairs::with_capacity(entries.len());
        let mut positions = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            positions.push(key.clone());
            cached.insert(key, value);
        }
        ReplayCursor {
            cached,
            positions,
            cursor: 0,
            pending_advance: false,
            state: DrainState::Eager,
        }
    }
}

impl<K, V> From<Vec<(K, V)>> for ReplayCursor<VecCursor<K, V>>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn from(entries: Vec<(K, V)>) -> Self {
        ReplayCursor::from_entries(entries)
    }
}

impl<C> PairCursor for ReplayCursor<C>
where
    C: PairCursor,
    C::Key: Eq + Hash + Clone,
    C::Value: Clone,
{
    type Key = C::Key;
    type Value = C::Value;

    /// Checks whether the current position holds a pair.
    ///
    /// This is the only place where the adapter can learn that the source is
    /// exhausted: if the position is past the cache frontier and the source
    /// reports no more data, the source is released and the adapter is fully
    /// drained from here on.
    fn is_valid(&mut self) -> Result<bool> {
        if self.cursor < self.positions.len() {
            return Ok(true);
        }
        let live = match &mut self.state {
            DrainState::Eager | DrainState::Complete => return Ok(false),
            DrainState::Partial(source) => source.is_valid()?,
        };
        if !live {
            self.state = DrainState::Complete;
        }
        Ok(live)
    }

    fn current(&mut self) -> Result<(C::Key, C::Value)> {
        if self.cursor < self.positions.len() {
            let key = self.positions[self.cursor].clone();
            let value = self
                .cached
                .get(&key)
                .expect("cached value for discovered key")
                .clone();
            return Ok((key, value));
        }
        if self.cursor == self.positions.len() {
            if let DrainState::Partial(source) = &mut self.state {
                let (key, value) = source.current()?;
                self.positions.push(key.clone());
                self.cached.insert(key.clone(), value.clone());
                self.pending_advance = true;
                return Ok((key, value));
            }
        }
        Err(Error::position_out_of_bounds(
            self.cursor,
            self.positions.len(),
        ))
    }

    fn advance(&mut self) -> Result<()> {
        self.cursor += 1;
        if self.cursor >= self.positions.len() && self.pending_advance {
            if let DrainState::Partial(source) = &mut self.state {
                source.advance()?;
            }
            self.pending_advance = false;
        }
        Ok(())
    }

    /// Same as [`restart_cursor`](ReplayCursor::restart_cursor); never fails and
    /// never touches the source, so the adapter restarts cheaply even when the
    /// wrapped source does not support restarting.
    fn restart(&mut self) -> Result<()> {
        self.restart_cursor();
        Ok(())
    }
}

impl<C> std::fmt::Debug for ReplayCursor<C>
where
    C: PairCursor,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplayCursor")
            .field("discovered", &self.positions.len())
            .field("cursor", &self.cursor)
            .field("fully_drained", &self.is_fully_drained())
            .finish_non_exhaustive()
    }
}
