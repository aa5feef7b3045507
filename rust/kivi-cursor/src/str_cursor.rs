//! A pair cursor over the grapheme clusters of a string.

use kivi_common::Result;
use kivi_common::error::Error;
use unicode_segmentation::{GraphemeCursor, UnicodeSegmentation};

use crate::cursor::PairCursor;

/// A pair cursor over a borrowed string, yielding `(cluster_index, cluster)` pairs.
///
/// Segmentation is by extended grapheme cluster, so multibyte and combining
/// sequences are traversed as single units. The key is the zero-based index of the
/// cluster; the value borrows from the input string.
///
/// Besides the [`PairCursor`] operations, the cursor supports absolute and relative
/// repositioning (`move_to`, `forward`, `backward`) and peeking at the untraversed
/// tail (`remaining`, `read_next`).
///
/// # Examples
///
/// ```
/// use kivi_cursor::{PairCursor, StrCursor};
///
/// let mut cursor = StrCursor::new("Привет");
/// assert_eq!(cursor.current()?, (0, "П"));
/// cursor.advance()?;
/// assert_eq!(cursor.current()?, (1, "р"));
/// cursor.move_to(2)?;
/// assert_eq!(cursor.remaining(), "ивет");
/// # Ok::<(), kivi_common::error::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct StrCursor<'a> {
    text: &'a str,
    /// Byte offset of the current cluster.
    byte_pos: usize,
    /// Zero-based index of the current cluster.
    cluster_pos: usize,
}

impl<'a> StrCursor<'a> {
    /// Creates a cursor over the given string.
    pub fn new(text: &'a str) -> StrCursor<'a> {
        StrCursor {
            text,
            byte_pos: 0,
            cluster_pos: 0,
        }
    }

    /// Returns the whole input string.
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Returns the untraversed tail, starting at the current cluster.
    pub fn remaining(&self) -> &'a str {
        &self.text[self.byte_pos..]
    }

    /// Returns up to `clusters` grapheme clusters starting at the current position,
    /// without moving the cursor.
    pub fn read_next(&self, clusters: usize) -> &'a str {
        let tail = self.remaining();
        match tail.grapheme_indices(true).nth(clusters) {
            Some((end, _)) => &tail[..end],
            None => tail,
        }
    }

    /// Returns `true` if the cursor is at the first cluster.
    pub fn is_start(&self) -> bool {
        self.byte_pos == 0
    }

    /// Returns `true` if the cursor has passed the last cluster.
    pub fn is_end(&self) -> bool {
        self.byte_pos >= self.text.len()
    }

    /// Moves the cursor to the cluster with the given index.
    ///
    /// Positions past the end saturate at the end of the string.
    pub fn move_to(&mut self, cluster: usize) -> Result<()> {
        self.byte_pos = 0;
        self.cluster_pos = 0;
        self.forward(cluster)
    }

    /// Moves the cursor forward by `clusters` positions, saturating at the end.
    pub fn forward(&mut self, clusters: usize) -> Result<()> {
        for _ in 0..clusters {
            if self.is_end() {
                break;
            }
            self.advance()?;
        }
        Ok(())
    }

    /// Moves the cursor backward by `clusters` positions, saturating at the start.
    pub fn backward(&mut self, clusters: usize) -> Result<()> {
        for _ in 0..clusters {
            if self.byte_pos == 0 {
                break;
            }
            let mut boundary = GraphemeCursor::new(self.byte_pos, self.text.len(), true);
            self.byte_pos = boundary
                .prev_boundary(self.text, 0)
                .ok()
                .flatten()
                .expect("prev boundary");
            self.cluster_pos -= 1;
        }
        Ok(())
    }

    fn current_cluster(&self) -> Option<&'a str> {
        self.text[self.byte_pos..].graphemes(true).next()
    }
}

impl<'a> PairCursor for StrCursor<'a> {
    type Key = usize;
    type Value = &'a str;

    fn is_valid(&mut self) -> Result<bool> {
        Ok(!self.is_end())
    }

    fn current(&mut self) -> Result<(usize, &'a str)> {
        match self.current_cluster() {
            Some(cluster) => Ok((self.cluster_pos, cluster)),
            None => Err(Error::position_out_of_bounds(
                self.cluster_pos,
                self.text.graphemes(true).count(),
            )),
        }
    }

    fn advance(&mut self) -> Result<()> {
        if let Some(cluster) = self.current_cluster() {
            self.byte_pos += cluster.len();
            self.cluster_pos += 1;
        }
        Ok(())
    }

    fn restart(&mut self) -> Result<()> {
        self.byte_pos = 0;
        self.cluster_pos = 0;
        Ok(())
    }
}
