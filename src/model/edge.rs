// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ucscene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use super::geom::Point;
use super::ids::{EdgeId, NodeId};

/// The five relationship archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeKind {
    Association,
    Include,
    Extend,
    Generalization,
    Threatens,
}

impl EdgeKind {
    pub const ALL: [Self; 5] = [
        Self::Association,
        Self::Include,
        Self::Extend,
        Self::Generalization,
        Self::Threatens,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Association => "association",
            Self::Include => "include",
            Self::Extend => "extend",
            Self::Generalization => "generalization",
            Self::Threatens => "threatens",
        }
    }

    /// Directed kinds are drawn with an arrowhead at the target end.
    pub fn is_directed(self) -> bool {
        !matches!(self, Self::Association)
    }

    /// Stereotype text drawn next to the line.
    pub fn type_tag(self) -> Option<&'static str> {
        match self {
            Self::Include => Some("«include»"),
            Self::Extend => Some("«extend»"),
            Self::Threatens => Some("«threatens»"),
            Self::Association | Self::Generalization => None,
        }
    }

    /// Whether the edge owns an editable floating label.
    pub fn has_label(self) -> bool {
        matches!(self, Self::Generalization)
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgeKind {
    type Err = InvalidEdgeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| InvalidEdgeKind { value: s.to_owned() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidEdgeKind {
    value: String,
}

impl InvalidEdgeKind {
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for InvalidEdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid edge kind {:?}", self.value)
    }
}

impl std::error::Error for InvalidEdgeKind {}

/// Cached line endpoints on the two node silhouettes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeGeometry {
    pub start: Point,
    pub end: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrowhead {
    pub tip: Point,
    /// Direction of the line at the tip, in degrees.
    pub angle: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeTag {
    pub text: &'static str,
    pub position: Point,
}

/// Derived visual sub-objects. Recomputed together with [`EdgeGeometry`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Decorations {
    pub arrowhead: Option<Arrowhead>,
    pub type_tag: Option<TypeTag>,
    pub label_position: Option<Point>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabelStyle {
    pub fill: Option<String>,
    pub font_size: Option<f64>,
}

/// Free-text annotation owned by an edge.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EdgeLabel {
    text: String,
    style: LabelStyle,
    manual_offset: Option<Point>,
}

impl EdgeLabel {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), style: LabelStyle::default(), manual_offset: None }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn style(&self) -> &LabelStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: LabelStyle) {
        self.style = style;
    }

    /// Offset from the line midpoint, set once the user drags the label.
    pub fn manual_offset(&self) -> Option<Point> {
        self.manual_offset
    }

    pub fn set_manual_offset(&mut self, offset: Option<Point>) {
        self.manual_offset = offset;
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EdgeStyle {
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
}

/// A typed relationship between two distinct nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    edge_id: EdgeId,
    kind: EdgeKind,
    source: NodeId,
    target: NodeId,
    geometry: EdgeGeometry,
    decorations: Decorations,
    label: Option<EdgeLabel>,
    style: EdgeStyle,
}

impl Edge {
    /// Builds an edge with empty geometry; callers refresh it before exposing the edge.
    pub fn new(edge_id: EdgeId, kind: EdgeKind, source: NodeId, target: NodeId) -> Self {
        Self {
            edge_id,
            kind,
            source,
            target,
            geometry: EdgeGeometry::default(),
            decorations: Decorations::default(),
            label: kind.has_label().then(EdgeLabel::default),
            style: EdgeStyle::default(),
        }
    }

    pub fn edge_id(&self) -> &EdgeId {
        &self.edge_id
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    pub fn source(&self) -> &NodeId {
        &self.source
    }

    pub fn target(&self) -> &NodeId {
        &self.target
    }

    pub fn touches(&self, node_id: &NodeId) -> bool {
        &self.source == node_id || &self.target == node_id
    }

    pub fn geometry(&self) -> &EdgeGeometry {
        &self.geometry
    }

    pub fn decorations(&self) -> &Decorations {
        &self.decorations
    }

    pub fn set_layout(&mut self, geometry: EdgeGeometry, decorations: Decorations) {
        self.geometry = geometry;
        self.decorations = decorations;
    }

    pub fn label(&self) -> Option<&EdgeLabel> {
        self.label.as_ref()
    }

    pub fn label_mut(&mut self) -> Option<&mut EdgeLabel> {
        self.label.as_mut()
    }

    /// Replaces the label. Ignored for kinds that carry no label.
    pub fn set_label(&mut self, label: Option<EdgeLabel>) {
        if self.kind.has_label() {
            self.label = label;
        }
    }

    pub fn style(&self) -> &EdgeStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: EdgeStyle) {
        self.style = style;
    }
}
