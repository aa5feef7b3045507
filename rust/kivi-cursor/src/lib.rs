//! Forward cursors over key/value pairs.
//!
//! This crate defines the [`PairCursor`] capability (something that can produce, in
//! a single forward pass, a sequence of (key, value) pairs) together with concrete
//! sources, thin single-pass adapters, and the lazily-caching [`ReplayCursor`].
//!
//! # Core Concepts
//!
//! ## The cursor capability
//!
//! [`PairCursor`] exposes four operations: `is_valid` (is there a pair at the current
//! position?), `current` (the pair itself), `advance`, and `restart`. Restart is cheap
//! for materialized cursors and a reported error for one-pass ones. Every operation
//! takes `&mut self` and returns a `Result`, since even reads may perform work on the
//! way (pulling from a reader, populating a cache) and any fault the underlying
//! producer reports propagates unchanged.
//!
//! ## Sources
//!
//! - [`VecCursor`]: an already-materialized sequence of pairs; restart is free.
//! - [`IterCursor`]: any `Iterator<Item = (K, V)>`; genuinely one-pass.
//! - [`StrCursor`]: grapheme clusters of a string, keyed by cluster index.
//! - [`ChunkCursor`]: fixed-size byte chunks of a reader, keyed by byte offset.
//!
//! # Provided Adapters
//!
//! - [`FilteredPairs`]: skips pairs rejected by a predicate.
//! - [`MappedValues`]: applies a callback to each value, keys preserved.
//! - [`ReversedPairs`]: traverses a materialized copy back to front.
//! - [`ReplayCursor`]: caches each pair on first observation, turning a one-pass
//!   sequence into a repeatable one without eager materialization.
//!
//! The [`PairCursorExt`] trait is implemented for every pair cursor and provides
//! convenient methods to construct the adapters and to collect a cursor into
//! concrete collections.

pub mod adapters;
pub mod chunk_cursor;
pub mod convert;
pub mod cursor;
pub mod replay;
pub mod sources;
pub mod str_cursor;

pub use adapters::{FilteredPairs, MappedValues, ReversedPairs};
pub use chunk_cursor::ChunkCursor;
pub use convert::{collect_entries, collect_pairs};
pub use cursor::{PairCursor, PairCursorExt};
pub use replay::ReplayCursor;
pub use sources::{IterCursor, VecCursor};
pub use str_cursor::StrCursor;
