// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ucscene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use super::geom::Transform;
use super::ids::{EdgeId, NodeId};

/// The five node archetypes a diagram may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Actor,
    UseCase,
    System,
    Misuser,
    MisuseCase,
}

impl NodeKind {
    pub const ALL: [Self; 5] = [
        Self::Actor,
        Self::UseCase,
        Self::System,
        Self::Misuser,
        Self::MisuseCase,
    ];

    /// Wire name used in documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Actor => "actor",
            Self::UseCase => "usecase",
            Self::System => "system",
            Self::Misuser => "misuser",
            Self::MisuseCase => "misusecase",
        }
    }

    /// Label given to a node placed with a tool.
    pub fn default_label(self) -> &'static str {
        match self {
            Self::Actor => "Actor",
            Self::UseCase => "Use Case",
            Self::System => "System",
            Self::Misuser => "Misuser",
            Self::MisuseCase => "Misuse Case",
        }
    }

    pub fn is_stick_figure(self) -> bool {
        matches!(self, Self::Actor | Self::Misuser)
    }

    pub fn is_oval(self) -> bool {
        matches!(self, Self::UseCase | Self::MisuseCase)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = InvalidNodeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| InvalidNodeKind { value: s.to_owned() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidNodeKind {
    value: String,
}

impl InvalidNodeKind {
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for InvalidNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid node kind {:?}", self.value)
    }
}

impl std::error::Error for InvalidNodeKind {}

/// Presentation fields edited from the property panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeStyle {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub font_size: Option<f64>,
}

/// A diagram element instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    node_id: NodeId,
    kind: NodeKind,
    label: String,
    transform: Transform,
    style: NodeStyle,
    incident_edges: SmallVec<[EdgeId; 4]>,
}

impl Node {
    pub fn new(
        node_id: NodeId,
        kind: NodeKind,
        label: impl Into<String>,
        transform: Transform,
    ) -> Self {
        Self {
            node_id,
            kind,
            label: label.into(),
            transform,
            style: NodeStyle::default(),
            incident_edges: SmallVec::new(),
        }
    }

    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    pub fn style(&self) -> &NodeStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: NodeStyle) {
        self.style = style;
    }

    pub fn incident_edges(&self) -> &[EdgeId] {
        &self.incident_edges
    }

    /// Registers `edge_id`; returns `false` if it was already present.
    pub fn link_edge(&mut self, edge_id: EdgeId) -> bool {
        if self.incident_edges.contains(&edge_id) {
            return false;
        }
        self.incident_edges.push(edge_id);
        true
    }

    pub fn unlink_edge(&mut self, edge_id: &EdgeId) -> bool {
        let before = self.incident_edges.len();
        self.incident_edges.retain(|candidate| candidate != edge_id);
        self.incident_edges.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::{Node, NodeKind};
    use crate::model::{EdgeId, NodeId, Transform};

    #[test]
    fn node_kind_parses_wire_names() {
        for kind in NodeKind::ALL {
            assert_eq!(kind.as_str().parse::<NodeKind>(), Ok(kind));
        }
        let err = "cloud".parse::<NodeKind>().unwrap_err();
        assert_eq!(err.value(), "cloud");
    }

    #[test]
    fn incident_edges_reject_duplicates() {
        let mut node = Node::new(
            NodeId::new("n:1").expect("node id"),
            NodeKind::Actor,
            "Customer",
            Transform::at(0.0, 0.0),
        );
        let edge_id = EdgeId::new("e:1").expect("edge id");

        assert!(node.link_edge(edge_id.clone()));
        assert!(!node.link_edge(edge_id.clone()));
        assert_eq!(node.incident_edges(), &[edge_id.clone()]);

        assert!(node.unlink_edge(&edge_id));
        assert!(!node.unlink_edge(&edge_id));
        assert!(node.incident_edges().is_empty());
    }
}
