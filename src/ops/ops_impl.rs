// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ucscene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Node/edge mutation helpers used by `apply_ops`.
/// Keeps `ops::mod` focused on public op types and orchestration.
fn apply_op(scene: &mut Scene, op: &Op, delta: &mut DeltaBuilder) -> Result<(), ApplyError> {
    match op {
        Op::AddNode { node_id, kind, label, transform } => {
            if scene.nodes().contains_key(node_id) {
                return Err(ApplyError::AlreadyExists { object: SceneRef::Node(node_id.clone()) });
            }
            check_transform(node_id, transform)?;
            scene.ids_mut().observe_node(node_id);
            scene.nodes_mut().insert(
                node_id.clone(),
                Node::new(node_id.clone(), *kind, label.clone(), *transform),
            );
            delta.record_added(SceneRef::Node(node_id.clone()));
            Ok(())
        }
        Op::SetTransform { node_id, transform } => {
            check_transform(node_id, transform)?;
            node_mut(scene, node_id)?.set_transform(*transform);
            delta.record_updated(SceneRef::Node(node_id.clone()));
            refresh_incident_edges(scene, node_id, delta)
        }
        Op::SetNodeLabel { node_id, label } => {
            node_mut(scene, node_id)?.set_label(label.clone());
            delta.record_updated(SceneRef::Node(node_id.clone()));
            Ok(())
        }
        Op::SetNodeStyle { node_id, style } => {
            node_mut(scene, node_id)?.set_style(style.clone());
            delta.record_updated(SceneRef::Node(node_id.clone()));
            Ok(())
        }
        Op::RemoveNode { node_id } => {
            let incident = scene
                .node(node_id)
                .ok_or_else(|| ApplyError::NodeNotFound { node_id: node_id.clone() })?
                .incident_edges()
                .to_vec();
            for edge_id in &incident {
                remove_edge(scene, edge_id, delta)?;
            }
            scene.nodes_mut().remove(node_id);
            delta.record_removed(SceneRef::Node(node_id.clone()));
            Ok(())
        }
        Op::AddEdge { edge_id, kind, source, target } => {
            if scene.edges().contains_key(edge_id) {
                return Err(ApplyError::AlreadyExists { object: SceneRef::Edge(edge_id.clone()) });
            }
            let source_kind = node_kind(scene, source)?;
            let target_kind = node_kind(scene, target)?;
            validate_connection(*kind, (source, source_kind), (target, target_kind))?;

            scene.ids_mut().observe_edge(edge_id);
            scene.edges_mut().insert(
                edge_id.clone(),
                Edge::new(edge_id.clone(), *kind, source.clone(), target.clone()),
            );
            node_mut(scene, source)?.link_edge(edge_id.clone());
            node_mut(scene, target)?.link_edge(edge_id.clone());
            refresh_edge_geometry(scene, edge_id)?;
            delta.record_added(SceneRef::Edge(edge_id.clone()));
            Ok(())
        }
        Op::RemoveEdge { edge_id } => remove_edge(scene, edge_id, delta),
        Op::SetEdgeLabel { edge_id, text } => {
            label_mut(scene, edge_id)?.set_text(text.clone());
            refresh_edge_geometry(scene, edge_id)?;
            delta.record_updated(SceneRef::Edge(edge_id.clone()));
            Ok(())
        }
        Op::SetLabelOffset { edge_id, offset } => {
            label_mut(scene, edge_id)?.set_manual_offset(*offset);
            refresh_edge_geometry(scene, edge_id)?;
            delta.record_updated(SceneRef::Edge(edge_id.clone()));
            Ok(())
        }
        Op::SetEdgeStyle { edge_id, style } => {
            let Some(edge) = scene.edges_mut().get_mut(edge_id) else {
                return Err(ApplyError::EdgeNotFound { edge_id: edge_id.clone() });
            };
            edge.set_style(style.clone());
            delta.record_updated(SceneRef::Edge(edge_id.clone()));
            Ok(())
        }
    }
}

fn node_mut<'a>(scene: &'a mut Scene, node_id: &NodeId) -> Result<&'a mut Node, ApplyError> {
    scene
        .nodes_mut()
        .get_mut(node_id)
        .ok_or_else(|| ApplyError::NodeNotFound { node_id: node_id.clone() })
}

fn check_transform(node_id: &NodeId, transform: &Transform) -> Result<(), ApplyError> {
    if transform.is_finite() {
        return Ok(());
    }
    Err(ApplyError::InvalidTransform { node_id: node_id.clone() })
}

fn node_kind(scene: &Scene, node_id: &NodeId) -> Result<NodeKind, ApplyError> {
    scene
        .node(node_id)
        .map(Node::kind)
        .ok_or_else(|| ApplyError::NodeNotFound { node_id: node_id.clone() })
}

fn label_mut<'a>(scene: &'a mut Scene, edge_id: &EdgeId) -> Result<&'a mut EdgeLabel, ApplyError> {
    let Some(edge) = scene.edges_mut().get_mut(edge_id) else {
        return Err(ApplyError::EdgeNotFound { edge_id: edge_id.clone() });
    };
    let kind = edge.kind();
    edge.label_mut().ok_or_else(|| ApplyError::LabelUnsupported { edge_id: edge_id.clone(), kind })
}

fn refresh_incident_edges(
    scene: &mut Scene,
    node_id: &NodeId,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    let incident = scene
        .node(node_id)
        .map(|node| node.incident_edges().to_vec())
        .unwrap_or_default();
    for edge_id in incident {
        refresh_edge_geometry(scene, &edge_id)?;
        delta.record_updated(SceneRef::Edge(edge_id));
    }
    Ok(())
}

/// Drops the edge together with its label and decorations and unlinks both endpoints.
fn remove_edge(
    scene: &mut Scene,
    edge_id: &EdgeId,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    let Some(edge) = scene.edges_mut().remove(edge_id) else {
        return Err(ApplyError::EdgeNotFound { edge_id: edge_id.clone() });
    };
    for endpoint in [edge.source(), edge.target()] {
        if let Some(node) = scene.nodes_mut().get_mut(endpoint) {
            node.unlink_edge(edge_id);
        }
    }
    delta.record_removed(SceneRef::Edge(edge_id.clone()));
    Ok(())
}
