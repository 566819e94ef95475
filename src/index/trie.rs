// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Character trie over case-folded tokens.
//!
//! Nodes live in one arena (`Vec<TrieNode>`) and refer to their children by
//! index, so the whole tree has a single owner and structural mutation needs
//! nothing more than `&mut Trie`. Every node carries the ids of the documents
//! that passed through it: indexing "engineer" for doc 3 puts 3 into the sets
//! for "e", "en", "eng", ... "engineer". A prefix query is then a walk plus a
//! set read, no subtree traversal.
//!
//! # Invariants
//!
//! 1. **PATH_PREFIX**: the node reached from the root by consuming `c1..ck`
//!    represents the prefix `c1..ck`.
//! 2. **PATH_MARKED**: if a document was indexed with token `w`, its id is in
//!    the set of every node on `w`'s path, root included.
//! 3. **ROOT_COMPLETE**: the root set holds every document inserted into this
//!    trie, even ones whose text produced no tokens.

use std::collections::HashMap;

use crate::types::{DocumentId, IdSet};
use crate::utils::{fold_pattern, tokenize};

const ROOT: usize = 0;

static EMPTY: IdSet = IdSet::new();

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: HashMap<char, usize>,
    /// A complete token ends here.
    terminal: bool,
    ids: IdSet,
}

/// Precomputed token → id-set updates for one batch of documents.
///
/// Built off to the side (in parallel, per worker) and applied with
/// [`Trie::merge`] in a single pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrieBatch {
    /// Every document that would have been passed to [`Trie::insert`].
    pub roots: IdSet,
    pub tokens: HashMap<String, IdSet>,
}

impl TrieBatch {
    /// Record one `insert(text, id)` call.
    pub fn record(&mut self, text: &str, id: DocumentId) {
        self.roots.insert(id);
        for word in tokenize(text) {
            self.tokens.entry(word).or_default().insert(id);
        }
    }

    /// Fold another batch into this one.
    pub fn absorb(&mut self, other: TrieBatch) {
        self.roots.extend(other.roots);
        for (word, ids) in other.tokens {
            match self.tokens.get_mut(&word) {
                Some(existing) => existing.extend(ids),
                None => {
                    self.tokens.insert(word, ids);
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// Prefix tree mapping token prefixes to the documents containing them.
#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<TrieNode>,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        Trie {
            nodes: vec![TrieNode::default()],
        }
    }

    /// Index every distinct word of `token_source` for `id`.
    pub fn insert(&mut self, token_source: &str, id: DocumentId) {
        self.nodes[ROOT].ids.insert(id);
        for word in tokenize(token_source) {
            self.mark_path(&word, std::iter::once(id));
        }
    }

    /// Apply a whole batch. Equivalent to the `insert` calls it was built from.
    pub fn merge(&mut self, batch: &TrieBatch) {
        self.nodes[ROOT].ids.extend(batch.roots.iter().copied());
        for (word, ids) in &batch.tokens {
            self.mark_path(word, ids.iter().copied());
        }
    }

    /// Documents with at least one token starting with `pattern`.
    ///
    /// The pattern is case-folded and walked one character at a time; a
    /// missing edge means no match. The empty pattern stops at the root and
    /// matches every document inserted into this trie.
    pub fn search(&self, pattern: &str) -> &IdSet {
        match self.find(&fold_pattern(pattern)) {
            Some(node) => &self.nodes[node].ids,
            None => &EMPTY,
        }
    }

    /// Whether `word` was indexed as a complete token (not just a prefix).
    pub fn contains_token(&self, word: &str) -> bool {
        !word.is_empty()
            && self
                .find(&fold_pattern(word))
                .is_some_and(|node| self.nodes[node].terminal)
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct complete tokens.
    pub fn token_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.terminal).count()
    }

    /// True until something has been inserted.
    pub fn is_empty(&self) -> bool {
        self.nodes[ROOT].ids.is_empty()
    }

    /// Every id stored anywhere in the tree. Used by invariant checks.
    pub(crate) fn all_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.nodes.iter().flat_map(|node| node.ids.iter().copied())
    }

    fn find(&self, folded: &str) -> Option<usize> {
        let mut node = ROOT;
        for c in folded.chars() {
            node = *self.nodes[node].children.get(&c)?;
        }
        Some(node)
    }

    fn mark_path<I>(&mut self, word: &str, ids: I)
    where
        I: Iterator<Item = DocumentId> + Clone,
    {
        let mut node = ROOT;
        for c in word.chars() {
            node = self.child_or_insert(node, c);
            self.nodes[node].ids.extend(ids.clone());
        }
        self.nodes[node].terminal = true;
    }

    fn child_or_insert(&mut self, parent: usize, c: char) -> usize {
        if let Some(&child) = self.nodes[parent].children.get(&c) {
            return child;
        }
        let child = self.nodes.len();
        self.nodes.push(TrieNode::default());
        self.nodes[parent].children.insert(c, child);
        child
    }
}
