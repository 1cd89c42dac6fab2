// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ucscene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::connect::{validate_connection, ConnectionError};
use crate::model::{
    Edge, EdgeId, EdgeKind, EdgeLabel, EdgeStyle, IdError, LabelStyle, Node, NodeId, NodeKind,
    NodeStyle, Point, Scene, Transform,
};
use crate::ops::refresh_all_geometry;

pub const DOCUMENT_VERSION: u32 = 1;

/// Serialized scene: node records first, then edge records referencing nodes by ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Document {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

impl Default for Document {
    fn default() -> Self {
        Self { version: DOCUMENT_VERSION, nodes: Vec::new(), edges: Vec::new() }
    }
}

fn default_version() -> u32 {
    DOCUMENT_VERSION
}

impl Document {
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(text).map_err(DocumentError::Json)
    }

    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(DocumentError::Json)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NodeRecord {
    pub id: String,
    /// One of `actor`, `usecase`, `system`, `misuser`, `misusecase`.
    pub kind: String,
    #[serde(default)]
    pub label: String,
    pub transform: TransformRecord,
    #[serde(default, skip_serializing_if = "NodeStyleRecord::is_empty")]
    pub style: NodeStyleRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TransformRecord {
    pub x: f64,
    pub y: f64,
    #[serde(default = "unit_scale")]
    pub scale_x: f64,
    #[serde(default = "unit_scale")]
    pub scale_y: f64,
    /// Degrees.
    #[serde(default)]
    pub angle: f64,
}

fn unit_scale() -> f64 {
    1.0
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NodeStyleRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

impl NodeStyleRecord {
    fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EdgeRecord {
    pub id: String,
    /// One of `association`, `include`, `extend`, `generalization`, `threatens`.
    pub kind: String,
    pub source_id: String,
    pub target_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<EdgeLabelRecord>,
    #[serde(default, skip_serializing_if = "EdgeStyleRecord::is_empty")]
    pub style: EdgeStyleRecord,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EdgeLabelRecord {
    #[serde(default)]
    pub text: String,
    /// Offset from the line midpoint once the label has been dragged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<PointRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EdgeStyleRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

impl EdgeStyleRecord {
    fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl From<&Transform> for TransformRecord {
    fn from(transform: &Transform) -> Self {
        Self {
            x: transform.x,
            y: transform.y,
            scale_x: transform.scale_x,
            scale_y: transform.scale_y,
            angle: transform.angle,
        }
    }
}

impl From<TransformRecord> for Transform {
    fn from(record: TransformRecord) -> Self {
        Self {
            x: record.x,
            y: record.y,
            scale_x: record.scale_x,
            scale_y: record.scale_y,
            angle: record.angle,
        }
    }
}

impl From<Point> for PointRecord {
    fn from(point: Point) -> Self {
        Self { x: point.x, y: point.y }
    }
}

impl From<PointRecord> for Point {
    fn from(record: PointRecord) -> Self {
        Self::new(record.x, record.y)
    }
}

impl From<&NodeStyle> for NodeStyleRecord {
    fn from(style: &NodeStyle) -> Self {
        Self {
            fill: style.fill.clone(),
            stroke: style.stroke.clone(),
            stroke_width: style.stroke_width,
            font_size: style.font_size,
        }
    }
}

impl From<NodeStyleRecord> for NodeStyle {
    fn from(record: NodeStyleRecord) -> Self {
        Self {
            fill: record.fill,
            stroke: record.stroke,
            stroke_width: record.stroke_width,
            font_size: record.font_size,
        }
    }
}

impl From<&EdgeStyle> for EdgeStyleRecord {
    fn from(style: &EdgeStyle) -> Self {
        Self { stroke: style.stroke.clone(), stroke_width: style.stroke_width }
    }
}

impl From<EdgeStyleRecord> for EdgeStyle {
    fn from(record: EdgeStyleRecord) -> Self {
        Self { stroke: record.stroke, stroke_width: record.stroke_width }
    }
}

impl From<&EdgeLabel> for EdgeLabelRecord {
    fn from(label: &EdgeLabel) -> Self {
        Self {
            text: label.text().to_owned(),
            offset: label.manual_offset().map(PointRecord::from),
            fill: label.style().fill.clone(),
            font_size: label.style().font_size,
        }
    }
}

impl From<EdgeLabelRecord> for EdgeLabel {
    fn from(record: EdgeLabelRecord) -> Self {
        let mut label = EdgeLabel::new(record.text);
        label.set_manual_offset(record.offset.map(Point::from));
        label.set_style(LabelStyle { fill: record.fill, font_size: record.font_size });
        label
    }
}

/// Writes the scene as a document. Edges whose endpoints are missing are skipped.
pub fn serialize(scene: &Scene) -> Document {
    let nodes = scene
        .nodes()
        .values()
        .map(|node| NodeRecord {
            id: node.node_id().to_string(),
            kind: node.kind().as_str().to_owned(),
            label: node.label().to_owned(),
            transform: TransformRecord::from(node.transform()),
            style: NodeStyleRecord::from(node.style()),
        })
        .collect();

    let mut edges = Vec::with_capacity(scene.edges().len());
    for (edge_id, edge) in scene.edges() {
        let missing = [edge.source(), edge.target()]
            .into_iter()
            .find(|endpoint| scene.node(endpoint).is_none());
        if let Some(node_id) = missing {
            warn!("serialize: skipping edge {edge_id} with missing endpoint {node_id}");
            continue;
        }
        edges.push(EdgeRecord {
            id: edge_id.to_string(),
            kind: edge.kind().as_str().to_owned(),
            source_id: edge.source().to_string(),
            target_id: edge.target().to_string(),
            label: edge.label().map(EdgeLabelRecord::from),
            style: EdgeStyleRecord::from(edge.style()),
        });
    }

    Document { version: DOCUMENT_VERSION, nodes, edges }
}

/// A scene rebuilt from a document, plus every record that had to be dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Restored {
    pub scene: Scene,
    pub warnings: Vec<DeserializeWarning>,
}

/// Rebuilds a scene from `document`.
///
/// Nodes are restored first with their original IDs, then edges are resolved against them.
/// Unusable records are dropped and reported; this never fails as a whole.
pub fn deserialize(document: &Document) -> Restored {
    let mut scene = Scene::new();
    let mut warnings = Vec::new();

    if document.version != DOCUMENT_VERSION {
        warnings.push(DeserializeWarning::UnsupportedVersion { found: document.version });
    }

    for record in &document.nodes {
        if let Err(warning) = restore_node(&mut scene, record) {
            warnings.push(warning);
        }
    }
    for record in &document.edges {
        if let Err(warning) = restore_edge(&mut scene, record) {
            warnings.push(warning);
        }
    }

    // Every remaining edge has both endpoints, so this cannot report anything.
    let stale = refresh_all_geometry(&mut scene);
    debug_assert!(stale.is_empty());

    for warning in &warnings {
        warn!("deserialize: {warning}");
    }

    Restored { scene, warnings }
}

fn restore_node(scene: &mut Scene, record: &NodeRecord) -> Result<(), DeserializeWarning> {
    let node_id = NodeId::new(record.id.clone()).map_err(|source| {
        DeserializeWarning::InvalidNodeId { value: record.id.clone(), source }
    })?;
    if scene.nodes().contains_key(&node_id) {
        return Err(DeserializeWarning::DuplicateNode { node_id });
    }
    let kind = record
        .kind
        .parse::<NodeKind>()
        .map_err(|_| DeserializeWarning::UnknownNodeKind {
            node_id: node_id.clone(),
            value: record.kind.clone(),
        })?;

    let transform = Transform::from(record.transform);
    if !transform.is_finite() {
        return Err(DeserializeWarning::NonFiniteTransform { node_id });
    }

    let mut node = Node::new(node_id.clone(), kind, record.label.clone(), transform);
    node.set_style(NodeStyle::from(record.style.clone()));
    scene.ids_mut().observe_node(&node_id);
    scene.nodes_mut().insert(node_id, node);
    Ok(())
}

fn restore_edge(scene: &mut Scene, record: &EdgeRecord) -> Result<(), DeserializeWarning> {
    let edge_id = EdgeId::new(record.id.clone()).map_err(|source| {
        DeserializeWarning::InvalidEdgeId { value: record.id.clone(), source }
    })?;
    if scene.edges().contains_key(&edge_id) {
        return Err(DeserializeWarning::DuplicateEdge { edge_id });
    }
    let kind = record
        .kind
        .parse::<EdgeKind>()
        .map_err(|_| DeserializeWarning::UnknownEdgeKind {
            edge_id: edge_id.clone(),
            value: record.kind.clone(),
        })?;

    let source = resolve_endpoint(scene, &edge_id, &record.source_id)?;
    let target = resolve_endpoint(scene, &edge_id, &record.target_id)?;
    validate_connection(kind, (&source.0, source.1), (&target.0, target.1)).map_err(
        |reason| DeserializeWarning::IllegalRelationship { edge_id: edge_id.clone(), reason },
    )?;

    let (source, target) = (source.0, target.0);
    let mut edge = Edge::new(edge_id.clone(), kind, source.clone(), target.clone());
    if let Some(label) = record.label.clone() {
        edge.set_label(Some(EdgeLabel::from(label)));
    }
    edge.set_style(EdgeStyle::from(record.style.clone()));

    for endpoint in [&source, &target] {
        if let Some(node) = scene.nodes_mut().get_mut(endpoint) {
            node.link_edge(edge_id.clone());
        }
    }
    scene.ids_mut().observe_edge(&edge_id);
    scene.edges_mut().insert(edge_id, edge);
    Ok(())
}

fn resolve_endpoint(
    scene: &Scene,
    edge_id: &EdgeId,
    raw: &str,
) -> Result<(NodeId, NodeKind), DeserializeWarning> {
    scene
        .nodes()
        .get(raw)
        .map(|node| (node.node_id().clone(), node.kind()))
        .ok_or_else(|| DeserializeWarning::DanglingEndpoint {
            edge_id: edge_id.clone(),
            node_id: raw.to_owned(),
        })
}

/// JSON Schema of the document wire shape.
pub fn document_schema() -> schemars::Schema {
    schemars::schema_for!(Document)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeserializeWarning {
    UnsupportedVersion { found: u32 },
    InvalidNodeId { value: String, source: IdError },
    DuplicateNode { node_id: NodeId },
    UnknownNodeKind { node_id: NodeId, value: String },
    NonFiniteTransform { node_id: NodeId },
    InvalidEdgeId { value: String, source: IdError },
    DuplicateEdge { edge_id: EdgeId },
    UnknownEdgeKind { edge_id: EdgeId, value: String },
    DanglingEndpoint { edge_id: EdgeId, node_id: String },
    IllegalRelationship { edge_id: EdgeId, reason: ConnectionError },
}

impl fmt::Display for DeserializeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found } => write!(
                f,
                "document version {found} is not {DOCUMENT_VERSION}; reading it anyway"
            ),
            Self::InvalidNodeId { value, source } => {
                write!(f, "dropped node with invalid id {value:?}: {source}")
            }
            Self::DuplicateNode { node_id } => write!(f, "dropped duplicate node {node_id}"),
            Self::UnknownNodeKind { node_id, value } => {
                write!(f, "dropped node {node_id} of unknown kind {value:?}")
            }
            Self::NonFiniteTransform { node_id } => {
                write!(f, "dropped node {node_id} with a non-finite transform")
            }
            Self::InvalidEdgeId { value, source } => {
                write!(f, "dropped edge with invalid id {value:?}: {source}")
            }
            Self::DuplicateEdge { edge_id } => write!(f, "dropped duplicate edge {edge_id}"),
            Self::UnknownEdgeKind { edge_id, value } => {
                write!(f, "dropped edge {edge_id} of unknown kind {value:?}")
            }
            Self::DanglingEndpoint { edge_id, node_id } => {
                write!(f, "dropped edge {edge_id}: endpoint {node_id:?} does not exist")
            }
            Self::IllegalRelationship { edge_id, reason } => {
                write!(f, "dropped edge {edge_id}: {reason}")
            }
        }
    }
}

#[derive(Debug)]
pub enum DocumentError {
    Json(serde_json::Error),
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(source) => write!(f, "invalid document json: {source}"),
        }
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(source) => Some(source),
        }
    }
}
