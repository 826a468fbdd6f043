//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

use crate::width::{ZERO_WIDTH_JOINER, char_width, is_joining};

/// Code points a user perceives as a single character.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GraphemeCluster {
    text: String,
    width: usize,
}

impl GraphemeCluster {
    fn new(ch: char) -> GraphemeCluster {
        let mut text = String::new();
        text.push(ch);
        GraphemeCluster {
            text,
            width: char_width(ch),
        }
    }

    fn push(&mut self, ch: char) {
        self.text.push(ch);
        let width = char_width(ch);
        if width > 0 {
            self.width = self.width.max(width);
        }
    }

    /// The code points of this cluster.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Columns the cluster occupies on a terminal, 0 to 2.
    pub fn display_width(&self) -> usize {
        self.width
    }

    /// Bytes needed to transmit the cluster as UTF-8.
    pub fn encoded_len(&self) -> usize {
        self.text.len()
    }
}

/// An editable line of grapheme clusters with a cursor.
///
/// The cursor is a cluster index in `0..=len()`. Every edit that changes what
/// the client should see reports the column width involved so the caller can
/// echo the matching cursor motion.
#[derive(Clone, Debug, Default)]
pub struct GraphemeBuffer {
    clusters: Vec<GraphemeCluster>,
    cursor: usize,
    pending_join: bool,
}

impl GraphemeBuffer {
    /// Creates an empty buffer.
    pub fn new() -> GraphemeBuffer {
        GraphemeBuffer::default()
    }

    /// Cursor position, counted in clusters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of clusters.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Returns `true` if the buffer holds no clusters.
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Returns `true` if the cursor sits before at least one cluster.
    pub fn is_cursor_inside(&self) -> bool {
        self.cursor < self.clusters.len()
    }

    /// Clusters in order.
    pub fn clusters(&self) -> &[GraphemeCluster] {
        &self.clusters
    }

    /// Inserts `ch` at the cursor.
    ///
    /// Joining code points, and anything following a zero width joiner, extend
    /// the cluster just before the cursor and leave the cursor in place. Any other
    /// code point starts a new cluster and advances the cursor past it.
    pub fn append(&mut self, ch: char) {
        if self.cursor > 0 && self.should_combine(ch) {
            self.clusters[self.cursor - 1].push(ch);
            return;
        }
        self.clusters.insert(self.cursor, GraphemeCluster::new(ch));
        self.cursor += 1;
        self.pending_join = ch == ZERO_WIDTH_JOINER;
    }

    fn should_combine(&mut self, ch: char) -> bool {
        if self.pending_join {
            self.pending_join = ch == ZERO_WIDTH_JOINER;
            return true;
        }
        if is_joining(ch) {
            self.pending_join = ch == ZERO_WIDTH_JOINER;
            return true;
        }
        false
    }

    /// Moves one cluster left, returning the width of the cluster crossed.
    pub fn move_cursor_left(&mut self) -> Option<usize> {
        if self.cursor == 0 {
            return None;
        }
        self.pending_join = false;
        self.cursor -= 1;
        Some(self.clusters[self.cursor].display_width())
    }

    /// Moves one cluster right, returning the width of the cluster crossed.
    pub fn move_cursor_right(&mut self) -> Option<usize> {
        if self.cursor == self.clusters.len() {
            return None;
        }
        self.pending_join = false;
        let width = self.clusters[self.cursor].display_width();
        self.cursor += 1;
        Some(width)
    }

    /// Moves to the start of the line, returning the total width crossed.
    pub fn move_cursor_to_start(&mut self) -> usize {
        let crossed = self.display_width_before_cursor();
        self.pending_join = false;
        self.cursor = 0;
        crossed
    }

    /// Moves to the end of the line, returning the total width crossed.
    pub fn move_cursor_to_end(&mut self) -> usize {
        let crossed = self.display_width_after_cursor();
        self.pending_join = false;
        self.cursor = self.clusters.len();
        crossed
    }

    /// Text of every cluster from the cursor to the end.
    pub fn text_after_cursor(&self) -> String {
        self.clusters[self.cursor..]
            .iter()
            .map(GraphemeCluster::as_str)
            .collect()
    }

    /// Columns occupied from the cursor to the end.
    pub fn display_width_after_cursor(&self) -> usize {
        self.clusters[self.cursor..]
            .iter()
            .map(GraphemeCluster::display_width)
            .sum()
    }

    /// Columns occupied from the start to the cursor.
    pub fn display_width_before_cursor(&self) -> usize {
        self.clusters[..self.cursor]
            .iter()
            .map(GraphemeCluster::display_width)
            .sum()
    }

    /// Removes the cluster before the cursor.
    ///
    /// Returns the columns to erase, at least 1 so a zero width cluster still
    /// clears a cell on the client.
    pub fn try_backspace(&mut self) -> Option<usize> {
        self.pending_join = false;
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        let removed = self.clusters.remove(self.cursor);
        Some(removed.display_width().max(1))
    }

    /// Removes the cluster at the cursor. Width rules match [`Self::try_backspace`].
    pub fn try_delete(&mut self) -> Option<usize> {
        self.pending_join = false;
        if self.cursor == self.clusters.len() {
            return None;
        }
        let removed = self.clusters.remove(self.cursor);
        Some(removed.display_width().max(1))
    }

    /// Takes the whole line and resets the buffer.
    ///
    /// Returns `None` when the buffer was already empty, which lets callers tell
    /// an empty submitted line apart from nothing typed at all.
    pub fn try_drain(&mut self) -> Option<String> {
        self.pending_join = false;
        if self.clusters.is_empty() {
            return None;
        }
        let line = self.clusters.drain(..).map(|cluster| cluster.text).collect();
        self.cursor = 0;
        Some(line)
    }
}

impl std::fmt::Display for GraphemeBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for cluster in &self.clusters {
            f.write_str(cluster.as_str())?;
        }
        Ok(())
    }
}
