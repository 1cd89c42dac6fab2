// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ucscene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// A stable identifier for scene objects.
///
/// IDs are opaque strings. The only enforced shape is a non-empty token without
/// whitespace, so they survive JSON documents and log lines unchanged. Freshly allocated IDs
/// look like `n:12` / `e:7`, but any valid token loaded from a document is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        validate_id_token(&value)?;
        Ok(Self { value, _marker: PhantomData })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl<T> TryFrom<String> for Id<T> {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty,
    ContainsWhitespace,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("id must not be empty"),
            Self::ContainsWhitespace => f.write_str("id must not contain whitespace"),
        }
    }
}

impl std::error::Error for IdError {}

fn validate_id_token(value: &str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    if value.chars().any(char::is_whitespace) {
        return Err(IdError::ContainsWhitespace);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeIdTag {}
pub type NodeId = Id<NodeIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeIdTag {}
pub type EdgeId = Id<EdgeIdTag>;

const NODE_PREFIX: &str = "n:";
const EDGE_PREFIX: &str = "e:";

/// Monotonic allocator for node and edge IDs.
///
/// Sequence numbers are never handed out twice. [`IdAllocator::observe_node`] and
/// [`IdAllocator::observe_edge`] advance the counters past IDs that entered the scene from
/// elsewhere (a loaded document), so a later allocation cannot collide with them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdAllocator {
    next_node: u64,
    next_edge: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next node ID, or `None` once the sequence space is used up.
    pub fn next_node_id(&mut self) -> Option<NodeId> {
        self.next_node = self.next_node.checked_add(1)?;
        Some(node_id_at(self.next_node))
    }

    /// Next edge ID, or `None` once the sequence space is used up.
    pub fn next_edge_id(&mut self) -> Option<EdgeId> {
        self.next_edge = self.next_edge.checked_add(1)?;
        Some(edge_id_at(self.next_edge))
    }

    pub fn observe_node(&mut self, node_id: &NodeId) {
        if let Some(seq) = parse_seq(NODE_PREFIX, node_id.as_str()) {
            self.next_node = self.next_node.max(seq);
        }
    }

    pub fn observe_edge(&mut self, edge_id: &EdgeId) {
        if let Some(seq) = parse_seq(EDGE_PREFIX, edge_id.as_str()) {
            self.next_edge = self.next_edge.max(seq);
        }
    }

    /// Keeps the higher counter of each kind, so IDs handed out by `other` stay retired.
    pub fn absorb(&mut self, other: &IdAllocator) {
        self.next_node = self.next_node.max(other.next_node);
        self.next_edge = self.next_edge.max(other.next_edge);
    }
}

pub(crate) fn node_id_at(seq: u64) -> NodeId {
    Id::new(format_seq(NODE_PREFIX, seq)).expect("allocated node id is valid")
}

pub(crate) fn edge_id_at(seq: u64) -> EdgeId {
    Id::new(format_seq(EDGE_PREFIX, seq)).expect("allocated edge id is valid")
}

fn format_seq(prefix: &str, seq: u64) -> String {
    let mut buf = itoa::Buffer::new();
    let digits = buf.format(seq);
    let mut out = String::with_capacity(prefix.len() + digits.len());
    out.push_str(prefix);
    out.push_str(digits);
    out
}

fn parse_seq(prefix: &str, value: &str) -> Option<u64> {
    value.strip_prefix(prefix)?.parse().ok()
}
