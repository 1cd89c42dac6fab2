// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ucscene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::geometry::NodeDescriptor;
use crate::model::{EdgeKind, Node, NodeId, NodeKind, Point, Scene, Transform};
use crate::ops::Op;

use super::{MisuseSuggestion, SuggestError, SuggestionRequest, DEFAULT_SYSTEM_NAME};

/// Horizontal distance from the use case to the column of new misuse cases.
pub const MISUSE_COLUMN_OFFSET: f64 = 250.0;
/// Horizontal distance from the use case to the column of new misusers.
pub const MISUSER_COLUMN_OFFSET: f64 = 500.0;
pub const ROW_SPACING: f64 = 100.0;

fn use_case_node<'a>(scene: &'a Scene, node_id: &NodeId) -> Result<&'a Node, SuggestError> {
    let node = scene
        .node(node_id)
        .ok_or_else(|| SuggestError::NodeNotFound { node_id: node_id.clone() })?;
    if node.kind() != NodeKind::UseCase {
        return Err(SuggestError::NotAUseCase { node_id: node_id.clone(), kind: node.kind() });
    }
    Ok(node)
}

/// Builds the suggestion request for `use_case`.
///
/// The system name comes from the innermost system boundary containing the use case's
/// center; the other use cases are listed in ID order.
pub fn suggestion_request(
    scene: &Scene,
    use_case: &NodeId,
) -> Result<SuggestionRequest, SuggestError> {
    let node = use_case_node(scene, use_case)?;
    let center = node.transform().center();

    let system_name = scene
        .nodes()
        .values()
        .filter(|candidate| candidate.kind() == NodeKind::System)
        .map(|system| (system, NodeDescriptor::of(system)))
        .filter(|(_, bounds)| contains(bounds, center))
        .min_by(|(_, a), (_, b)| (a.width * a.height).total_cmp(&(b.width * b.height)))
        .map(|(system, _)| system.label().to_owned())
        .unwrap_or_else(|| DEFAULT_SYSTEM_NAME.to_owned());

    let other_use_cases = scene
        .nodes()
        .values()
        .filter(|other| other.kind() == NodeKind::UseCase && other.node_id() != use_case)
        .map(|other| other.label().to_owned())
        .collect();

    let request = SuggestionRequest {
        use_case_name: node.label().to_owned(),
        system_name,
        other_use_cases,
    };
    request.validate()?;
    Ok(request)
}

fn contains(bounds: &NodeDescriptor, point: Point) -> bool {
    let local = (point - bounds.center).rotated(-bounds.angle);
    local.x.abs() <= bounds.width / 2.0 && local.y.abs() <= bounds.height / 2.0
}

/// Vertical offset of row `index` out of `count`, centered on the anchor.
fn row_offset(index: usize, count: usize) -> f64 {
    (index as f64 - (count as f64 - 1.0) / 2.0) * ROW_SPACING
}

/// Turns confirmed suggestions into one op batch threatening `use_case`.
///
/// Each suggestion becomes a misuse case. Each distinct actor becomes a misuser, unless a
/// misuser with that label already exists. Misusers are associated with their misuse cases
/// and every misuse case threatens the use case. Only the scene's ID allocator advances;
/// nodes and edges appear once the returned batch is applied.
pub fn plan_materialization(
    scene: &mut Scene,
    use_case: &NodeId,
    suggestions: &[MisuseSuggestion],
) -> Result<Vec<Op>, SuggestError> {
    let anchor = use_case_node(scene, use_case)?.transform().center();
    if suggestions.is_empty() {
        return Ok(Vec::new());
    }

    let mut misusers: Vec<(String, NodeId)> = Vec::new();
    let mut new_misusers: Vec<(String, NodeId)> = Vec::new();
    for suggestion in suggestions {
        let actor = actor_label(suggestion);
        if misusers.iter().any(|(label, _)| label == &actor) {
            continue;
        }
        let existing = scene
            .nodes()
            .values()
            .find(|node| node.kind() == NodeKind::Misuser && node.label().trim() == actor)
            .map(|node| node.node_id().clone());
        let node_id = match existing {
            Some(node_id) => node_id,
            None => {
                let node_id = scene.allocate_node_id();
                new_misusers.push((actor.clone(), node_id.clone()));
                node_id
            }
        };
        misusers.push((actor, node_id));
    }

    let mut ops = Vec::with_capacity(new_misusers.len() + suggestions.len() * 3);
    for (index, (label, node_id)) in new_misusers.iter().enumerate() {
        ops.push(Op::AddNode {
            node_id: node_id.clone(),
            kind: NodeKind::Misuser,
            label: label.clone(),
            transform: Transform::at(
                anchor.x + MISUSER_COLUMN_OFFSET,
                anchor.y + row_offset(index, new_misusers.len()),
            ),
        });
    }

    for (index, suggestion) in suggestions.iter().enumerate() {
        let misuse_case = scene.allocate_node_id();
        ops.push(Op::AddNode {
            node_id: misuse_case.clone(),
            kind: NodeKind::MisuseCase,
            label: suggestion.name.clone(),
            transform: Transform::at(
                anchor.x + MISUSE_COLUMN_OFFSET,
                anchor.y + row_offset(index, suggestions.len()),
            ),
        });

        let actor = actor_label(suggestion);
        let misuser = misusers
            .iter()
            .find(|(label, _)| label == &actor)
            .map(|(_, node_id)| node_id.clone())
            .expect("every actor was registered above");
        ops.push(Op::AddEdge {
            edge_id: scene.allocate_edge_id(),
            kind: EdgeKind::Association,
            source: misuser,
            target: misuse_case.clone(),
        });
        ops.push(Op::AddEdge {
            edge_id: scene.allocate_edge_id(),
            kind: EdgeKind::Threatens,
            source: misuse_case,
            target: use_case.clone(),
        });
    }

    Ok(ops)
}

fn actor_label(suggestion: &MisuseSuggestion) -> String {
    let actor = suggestion.actor.trim();
    if actor.is_empty() {
        NodeKind::Misuser.default_label().to_owned()
    } else {
        actor.to_owned()
    }
}
