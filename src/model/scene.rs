// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ucscene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use super::edge::Edge;
use super::ids::{edge_id_at, node_id_at, EdgeId, Id, IdAllocator, NodeId};
use super::node::Node;

/// The live diagram: an arena of nodes and edges keyed by stable IDs.
///
/// Nodes and edges refer to each other only by ID (`Node::incident_edges`, `Edge::source`,
/// `Edge::target`). Mutations go through [`crate::ops::apply_ops`], which keeps those
/// back-references and the cached edge geometry consistent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    nodes: BTreeMap<NodeId, Node>,
    edges: BTreeMap<EdgeId, Edge>,
    ids: IdAllocator,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &BTreeMap<NodeId, Node> {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut BTreeMap<NodeId, Node> {
        &mut self.nodes
    }

    pub fn edges(&self) -> &BTreeMap<EdgeId, Edge> {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut BTreeMap<EdgeId, Edge> {
        &mut self.edges
    }

    pub fn node(&self, node_id: &NodeId) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    pub fn edge(&self, edge_id: &EdgeId) -> Option<&Edge> {
        self.edges.get(edge_id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// A node ID not present in the scene.
    ///
    /// Once a loaded `n:<u64::MAX>` has used up the counter, the lowest free sequence is
    /// handed out instead.
    pub fn allocate_node_id(&mut self) -> NodeId {
        while let Some(node_id) = self.ids.next_node_id() {
            if !self.nodes.contains_key(&node_id) {
                return node_id;
            }
        }
        lowest_free(&self.nodes, node_id_at)
    }

    /// An edge ID not present in the scene. Falls back like [`Scene::allocate_node_id`].
    pub fn allocate_edge_id(&mut self) -> EdgeId {
        while let Some(edge_id) = self.ids.next_edge_id() {
            if !self.edges.contains_key(&edge_id) {
                return edge_id;
            }
        }
        lowest_free(&self.edges, edge_id_at)
    }

    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    pub fn ids_mut(&mut self) -> &mut IdAllocator {
        &mut self.ids
    }

    /// Edges touching `node_id`, resolved through the node's incident list.
    pub fn incident_edges<'a>(&'a self, node_id: &NodeId) -> impl Iterator<Item = &'a Edge> + 'a {
        self.nodes
            .get(node_id)
            .map(|node| node.incident_edges())
            .unwrap_or_default()
            .iter()
            .filter_map(|edge_id| self.edges.get(edge_id))
    }

    /// Checks the node/edge back-reference invariants.
    pub fn check_integrity(&self) -> Result<(), IntegrityError> {
        for (edge_id, edge) in &self.edges {
            if edge.source() == edge.target() {
                return Err(IntegrityError::SelfLoop { edge_id: edge_id.clone() });
            }
            for endpoint in [edge.source(), edge.target()] {
                let Some(node) = self.nodes.get(endpoint) else {
                    return Err(IntegrityError::DanglingEndpoint {
                        edge_id: edge_id.clone(),
                        node_id: endpoint.clone(),
                    });
                };
                if !node.incident_edges().contains(edge_id) {
                    return Err(IntegrityError::UnlinkedEdge {
                        edge_id: edge_id.clone(),
                        node_id: endpoint.clone(),
                    });
                }
            }
        }

        for (node_id, node) in &self.nodes {
            for edge_id in node.incident_edges() {
                let linked = self.edges.get(edge_id).is_some_and(|edge| edge.touches(node_id));
                if !linked {
                    return Err(IntegrityError::StaleIncidentEdge {
                        node_id: node_id.clone(),
                        edge_id: edge_id.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// At most `taken.len()` sequences are occupied, so the scan ends within `len + 1` steps.
fn lowest_free<T, V>(taken: &BTreeMap<Id<T>, V>, id_at: fn(u64) -> Id<T>) -> Id<T>
where
    T: Ord,
{
    (1..=u64::MAX)
        .map(id_at)
        .find(|candidate| !taken.contains_key(candidate))
        .expect("fewer ids taken than sequences available")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    SelfLoop { edge_id: EdgeId },
    DanglingEndpoint { edge_id: EdgeId, node_id: NodeId },
    UnlinkedEdge { edge_id: EdgeId, node_id: NodeId },
    StaleIncidentEdge { node_id: NodeId, edge_id: EdgeId },
}

impl fmt::Display for IntegrityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfLoop { edge_id } => write!(f, "edge {edge_id} connects a node to itself"),
            Self::DanglingEndpoint { edge_id, node_id } => {
                write!(f, "edge {edge_id} references missing node {node_id}")
            }
            Self::UnlinkedEdge { edge_id, node_id } => {
                write!(f, "edge {edge_id} is not listed by its endpoint {node_id}")
            }
            Self::StaleIncidentEdge { node_id, edge_id } => {
                write!(f, "node {node_id} lists edge {edge_id} which does not touch it")
            }
        }
    }
}

impl std::error::Error for IntegrityError {}
