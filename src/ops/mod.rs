// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ucscene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations for scenes.
//!
//! A batch of ops is applied to a copy of the scene and committed only if every op succeeds,
//! so callers never observe a half-applied batch. Each structural op also refreshes the
//! geometry of the edges it affects before returning. The result carries a minimal delta the
//! UI can use to refresh derived state.

use std::collections::HashSet;
use std::fmt;

use crate::connect::{validate_connection, ConnectionError};
use crate::geometry::{compute_edge_layout, NodeDescriptor};
use crate::model::{
    Edge, EdgeId, EdgeKind, EdgeLabel, EdgeStyle, Node, NodeId, NodeKind, NodeStyle, Point,
    Scene, Transform,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    AddNode { node_id: NodeId, kind: NodeKind, label: String, transform: Transform },
    SetTransform { node_id: NodeId, transform: Transform },
    SetNodeLabel { node_id: NodeId, label: String },
    SetNodeStyle { node_id: NodeId, style: NodeStyle },
    RemoveNode { node_id: NodeId },
    AddEdge { edge_id: EdgeId, kind: EdgeKind, source: NodeId, target: NodeId },
    RemoveEdge { edge_id: EdgeId },
    SetEdgeLabel { edge_id: EdgeId, text: String },
    /// Moves a floating label relative to the line midpoint; `None` snaps it back.
    SetLabelOffset { edge_id: EdgeId, offset: Option<Point> },
    SetEdgeStyle { edge_id: EdgeId, style: EdgeStyle },
}

/// Reference to a node or an edge of a scene.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SceneRef {
    Node(NodeId),
    Edge(EdgeId),
}

impl fmt::Display for SceneRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(node_id) => write!(f, "node {node_id}"),
            Self::Edge(edge_id) => write!(f, "edge {edge_id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub applied: usize,
    pub delta: Delta,
}

/// Minimal delta describing which objects changed as the result of applying ops.
///
/// Edges whose geometry was refreshed because an endpoint moved are reported as updated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added: Vec<SceneRef>,
    pub removed: Vec<SceneRef>,
    pub updated: Vec<SceneRef>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: HashSet<SceneRef>,
    removed: HashSet<SceneRef>,
    updated: HashSet<SceneRef>,
}

impl DeltaBuilder {
    fn record_added(&mut self, object_ref: SceneRef) {
        self.removed.remove(&object_ref);
        self.updated.remove(&object_ref);
        self.added.insert(object_ref);
    }

    fn record_removed(&mut self, object_ref: SceneRef) {
        let was_added = self.added.remove(&object_ref);
        self.updated.remove(&object_ref);
        if !was_added {
            self.removed.insert(object_ref);
        }
    }

    fn record_updated(&mut self, object_ref: SceneRef) {
        if self.added.contains(&object_ref) || self.removed.contains(&object_ref) {
            return;
        }
        self.updated.insert(object_ref);
    }

    fn finish(self) -> Delta {
        let mut added = self.added.into_iter().collect::<Vec<_>>();
        let mut removed = self.removed.into_iter().collect::<Vec<_>>();
        let mut updated = self.updated.into_iter().collect::<Vec<_>>();

        added.sort();
        removed.sort();
        updated.sort();

        Delta { added, removed, updated }
    }
}

/// Applies `ops` atomically.
///
/// On error the scene is left exactly as it was before the call.
pub fn apply_ops(scene: &mut Scene, ops: &[Op]) -> Result<ApplyResult, ApplyError> {
    if ops.is_empty() {
        return Ok(ApplyResult { applied: 0, delta: Delta::default() });
    }

    let mut next = scene.clone();
    let mut delta = DeltaBuilder::default();

    for op in ops {
        apply_op(&mut next, op, &mut delta)?;
    }

    *scene = next;
    Ok(ApplyResult { applied: ops.len(), delta: delta.finish() })
}

/// Recomputes one edge's endpoints and decorations from its endpoints' current transforms.
pub fn refresh_edge_geometry(scene: &mut Scene, edge_id: &EdgeId) -> Result<(), ApplyError> {
    let Some(edge) = scene.edges().get(edge_id) else {
        return Err(ApplyError::EdgeNotFound { edge_id: edge_id.clone() });
    };
    let source = endpoint_descriptor(scene, edge.source())?;
    let target = endpoint_descriptor(scene, edge.target())?;
    let (geometry, decorations) = compute_edge_layout(edge.kind(), &source, &target, edge.label());

    let edge = scene.edges_mut().get_mut(edge_id).expect("edge existence checked above");
    edge.set_layout(geometry, decorations);
    Ok(())
}

/// Refreshes every edge whose endpoints both exist. Returns the edges that could not be
/// refreshed because an endpoint is missing.
pub fn refresh_all_geometry(scene: &mut Scene) -> Vec<EdgeId> {
    let edge_ids = scene.edges().keys().cloned().collect::<Vec<_>>();
    edge_ids.into_iter().filter(|edge_id| refresh_edge_geometry(scene, edge_id).is_err()).collect()
}

fn endpoint_descriptor(scene: &Scene, node_id: &NodeId) -> Result<NodeDescriptor, ApplyError> {
    scene
        .node(node_id)
        .map(NodeDescriptor::of)
        .ok_or_else(|| ApplyError::NodeNotFound { node_id: node_id.clone() })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    AlreadyExists { object: SceneRef },
    NodeNotFound { node_id: NodeId },
    EdgeNotFound { edge_id: EdgeId },
    Rejected(ConnectionError),
    LabelUnsupported { edge_id: EdgeId, kind: EdgeKind },
    /// A coordinate, scale or angle is NaN or infinite.
    InvalidTransform { node_id: NodeId },
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyExists { object } => write!(f, "{object} already exists"),
            Self::NodeNotFound { node_id } => write!(f, "node not found (id={node_id})"),
            Self::EdgeNotFound { edge_id } => write!(f, "edge not found (id={edge_id})"),
            Self::Rejected(reason) => write!(f, "relationship refused: {reason}"),
            Self::LabelUnsupported { edge_id, kind } => {
                write!(f, "{kind} edge {edge_id} has no label")
            }
            Self::InvalidTransform { node_id } => {
                write!(f, "transform of node {node_id} must be finite")
            }
        }
    }
}

impl std::error::Error for ApplyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Rejected(reason) => Some(reason),
            _ => None,
        }
    }
}

impl From<ConnectionError> for ApplyError {
    fn from(reason: ConnectionError) -> Self {
        Self::Rejected(reason)
    }
}

// Extracted per-op implementation for node/edge mutations.
include!("ops_impl.rs");
