//! Arranged Content
//!
//! The order the list view shows things in: the clipboard note in its own
//! slot, pinned items, everything else, then unlocked hidden items.

use std::cmp::Reverse;

use crate::models::{Content, Note};

use super::ContentState;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrangedContent {
    pub clipboard: Option<Note>,
    /// Visible pinned items, newest first
    pub pinned: Vec<Content>,
    /// Visible unpinned items, newest first
    pub others: Vec<Content>,
    /// Hidden items, pinned first, then newest first
    pub hidden: Vec<Content>,
}

impl ArrangedContent {
    pub fn is_empty(&self) -> bool {
        self.pinned.is_empty() && self.others.is_empty()
    }
}

pub fn arrange(state: &ContentState) -> ArrangedContent {
    let (mut pinned, mut others): (Vec<Content>, Vec<Content>) =
        state.content.iter().cloned().partition(Content::pinned);
    pinned.sort_by_key(|c| Reverse(c.created_at()));
    others.sort_by_key(|c| Reverse(c.created_at()));

    let mut hidden = state.hidden_content.clone();
    hidden.sort_by_key(|c| (Reverse(c.pinned()), Reverse(c.created_at())));

    ArrangedContent {
        clipboard: state.clipboard_note.clone(),
        pinned,
        others,
        hidden,
    }
}
