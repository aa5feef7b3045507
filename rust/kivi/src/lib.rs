//! # Kivi: key/value pair cursors
//!
//! Kivi is a small toolkit for working with forward cursors over key/value pairs:
//! a capability trait, concrete sources (materialized vectors, plain iterators,
//! grapheme-segmented strings, byte-chunked readers), thin single-pass adapters
//! (filter, value mapping, reverse), and a lazily-caching replay adapter that
//! turns any one-pass sequence into a repeatable, randomly-re-enterable one.
//!
//! This crate is a convenience entry point that re-exports the member crates:
//!
//! * [`common`] - error taxonomy and `Result` alias
//! * [`cursor`] - the `PairCursor` trait, sources, adapters and `ReplayCursor`
//! * [`pairmap`] - `OrderedPairs`, the insertion-ordered mapping used for caches
//!   and snapshots
//!
//! The most frequently used items are also re-exported at the crate root.

pub use kivi_common as common;
pub use kivi_cursor as cursor;
pub use kivi_pairmap as pairmap;

pub use kivi_common::Result;
pub use kivi_common::error::{Error, ErrorKind};
pub use kivi_cursor::{
    ChunkCursor, FilteredPairs, IterCursor, MappedValues, PairCursor, PairCursorExt, ReplayCursor,
    ReversedPairs, StrCursor, VecCursor, collect_entries, collect_pairs,
};
pub use kivi_pairmap::OrderedPairs;
