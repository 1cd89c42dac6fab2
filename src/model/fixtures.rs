// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ucscene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::edge::EdgeKind;
use super::geom::Transform;
use super::ids::{EdgeId, NodeId};
use super::node::NodeKind;
use super::scene::Scene;
use crate::ops::{apply_ops, Op};

pub(crate) fn add_node(scene: &mut Scene, kind: NodeKind, label: &str, x: f64, y: f64) -> NodeId {
    let node_id = scene.allocate_node_id();
    apply_ops(
        scene,
        &[Op::AddNode {
            node_id: node_id.clone(),
            kind,
            label: label.to_owned(),
            transform: Transform::at(x, y),
        }],
    )
    .expect("add node");
    node_id
}

pub(crate) fn add_edge(
    scene: &mut Scene,
    kind: EdgeKind,
    source: &NodeId,
    target: &NodeId,
) -> EdgeId {
    let edge_id = scene.allocate_edge_id();
    apply_ops(
        scene,
        &[Op::AddEdge {
            edge_id: edge_id.clone(),
            kind,
            source: source.clone(),
            target: target.clone(),
        }],
    )
    .expect("add edge");
    edge_id
}

pub(crate) struct SmallDiagram {
    pub scene: Scene,
    pub customer: NodeId,
    pub checkout: NodeId,
    pub pay: NodeId,
    pub thief: NodeId,
    pub steal_card: NodeId,
    pub shop: NodeId,
    pub uses: EdgeId,
    pub includes: EdgeId,
    pub performs: EdgeId,
    pub threatens: EdgeId,
}

/// A shop with one actor, two use cases, a misuser and a misuse case.
pub(crate) fn small_diagram() -> SmallDiagram {
    let mut scene = Scene::new();

    let shop = add_node(&mut scene, NodeKind::System, "Shop", 400.0, 300.0);
    let customer = add_node(&mut scene, NodeKind::Actor, "Customer", 100.0, 200.0);
    let checkout = add_node(&mut scene, NodeKind::UseCase, "Checkout", 400.0, 200.0);
    let pay = add_node(&mut scene, NodeKind::UseCase, "Pay", 400.0, 400.0);
    let thief = add_node(&mut scene, NodeKind::Misuser, "Thief", 800.0, 400.0);
    let steal_card = add_node(&mut scene, NodeKind::MisuseCase, "Steal card", 650.0, 450.0);

    let uses = add_edge(&mut scene, EdgeKind::Association, &customer, &checkout);
    let includes = add_edge(&mut scene, EdgeKind::Include, &checkout, &pay);
    let performs = add_edge(&mut scene, EdgeKind::Association, &thief, &steal_card);
    let threatens = add_edge(&mut scene, EdgeKind::Threatens, &steal_card, &pay);

    SmallDiagram {
        scene,
        customer,
        checkout,
        pay,
        thief,
        steal_card,
        shop,
        uses,
        includes,
        performs,
        threatens,
    }
}
