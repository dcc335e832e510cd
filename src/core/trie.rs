// --- File: src/core/trie.rs
use crate::core::types::DotSet;
use std::collections::HashMap;

/// Index of a node inside a [`PatternTrie`] arena.
pub type NodeId = usize;

/// Payload stored on the node where a word's pattern sequence ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terminal {
    pub word: String,
    pub frequency: u64,
}

#[derive(Debug, Clone)]
struct PatternNode {
    children: HashMap<DotSet, NodeId>,
    terminal: Option<Terminal>,
}

impl PatternNode {
    fn new() -> Self {
        Self { children: HashMap::new(), terminal: None }
    }
}

/// A prefix tree keyed by one dot-set per letter.
/// Nodes live in a flat arena; node 0 is the root.
#[derive(Debug, Clone)]
pub struct PatternTrie {
    nodes: Vec<PatternNode>,
    words: usize,
}

impl Default for PatternTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternTrie {
    pub const ROOT: NodeId = 0;

    pub fn new() -> Self {
        Self { nodes: vec![PatternNode::new()], words: 0 }
    }

    /// Walks or creates the path for `patterns` and sets its payload.
    /// An existing payload is overwritten.
    /// O(k) complexity where k is the pattern length.
    pub fn insert(&mut self, patterns: &[DotSet], word: &str, frequency: u64) {
        let mut node_idx = Self::ROOT;
        for &pattern in patterns {
            let next_idx = if let Some(&id) = self.nodes[node_idx].children.get(&pattern) {
                id
            } else {
                let new_node_id = self.nodes.len();
                self.nodes.push(PatternNode::new());
                self.nodes[node_idx].children.insert(pattern, new_node_id);
                new_node_id
            };
            node_idx = next_idx;
        }

        let node = &mut self.nodes[node_idx];
        if node.terminal.is_none() {
            self.words += 1;
        }
        node.terminal = Some(Terminal { word: word.to_string(), frequency });
    }

    /// Exact lookup of the payload at the end of `patterns`.
    pub fn get(&self, patterns: &[DotSet]) -> Option<&Terminal> {
        let mut node_idx = Self::ROOT;
        for pattern in patterns {
            node_idx = *self.nodes[node_idx].children.get(pattern)?;
        }
        self.nodes[node_idx].terminal.as_ref()
    }

    /// Updates the frequency on an existing payload. Returns `false` when
    /// no word ends at `patterns`.
    pub fn set_frequency(&mut self, patterns: &[DotSet], frequency: u64) -> bool {
        let mut node_idx = Self::ROOT;
        for pattern in patterns {
            match self.nodes[node_idx].children.get(pattern) {
                Some(&next) => node_idx = next,
                None => return false,
            }
        }
        match self.nodes[node_idx].terminal.as_mut() {
            Some(terminal) => {
                terminal.frequency = frequency;
                true
            }
            None => false,
        }
    }

    pub fn children(&self, node: NodeId) -> impl Iterator<Item = (DotSet, NodeId)> + '_ {
        self.nodes[node].children.iter().map(|(&pattern, &id)| (pattern, id))
    }

    pub fn terminal(&self, node: NodeId) -> Option<&Terminal> {
        self.nodes[node].terminal.as_ref()
    }

    /// Number of distinct words stored.
    pub fn len(&self) -> usize {
        self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    #[cfg(test)]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}
