// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ucscene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use ucscene::format::{deserialize, serialize};
use ucscene::model::{EdgeKind, NodeId, NodeKind, Scene, Transform};
use ucscene::ops::{apply_ops, refresh_all_geometry, ApplyResult, Op};

// Case IDs (the string after the `/`) must remain stable so results stay comparable over time.
const CASES: [(&str, usize); 3] = [("small", 8), ("medium", 64), ("large", 256)];

/// Rows of actor -> use case pairs, each use case including the next and threatened by a
/// misuse case.
fn grid_scene(rows: usize) -> (Scene, Vec<NodeId>) {
    let mut scene = Scene::new();
    let mut ops = Vec::with_capacity(rows * 6);
    let mut actors = Vec::with_capacity(rows);
    let mut use_cases: Vec<NodeId> = Vec::with_capacity(rows);

    for row in 0..rows {
        let y = row as f64 * 120.0;
        let actor = scene.allocate_node_id();
        let use_case = scene.allocate_node_id();
        let misuse_case = scene.allocate_node_id();
        ops.push(Op::AddNode {
            node_id: actor.clone(),
            kind: NodeKind::Actor,
            label: format!("Actor {row}"),
            transform: Transform::at(100.0, y),
        });
        ops.push(Op::AddNode {
            node_id: use_case.clone(),
            kind: NodeKind::UseCase,
            label: format!("Use case {row}"),
            transform: Transform::at(400.0, y).scaled(1.5, 1.0),
        });
        ops.push(Op::AddNode {
            node_id: misuse_case.clone(),
            kind: NodeKind::MisuseCase,
            label: format!("Misuse case {row}"),
            transform: Transform::at(700.0, y + 40.0).rotated(15.0),
        });
        ops.push(Op::AddEdge {
            edge_id: scene.allocate_edge_id(),
            kind: EdgeKind::Association,
            source: actor.clone(),
            target: use_case.clone(),
        });
        ops.push(Op::AddEdge {
            edge_id: scene.allocate_edge_id(),
            kind: EdgeKind::Threatens,
            source: misuse_case,
            target: use_case.clone(),
        });
        if let Some(previous) = use_cases.last() {
            ops.push(Op::AddEdge {
                edge_id: scene.allocate_edge_id(),
                kind: EdgeKind::Include,
                source: previous.clone(),
                target: use_case.clone(),
            });
        }
        actors.push(actor);
        use_cases.push(use_case);
    }

    apply_ops(&mut scene, &ops).expect("grid fixture applies");
    (scene, actors)
}

fn checksum_apply_result(result: &ApplyResult) -> u64 {
    let mut acc = result.applied as u64;
    acc = acc.wrapping_mul(131).wrapping_add(result.delta.added.len() as u64);
    acc = acc.wrapping_mul(131).wrapping_add(result.delta.updated.len() as u64);
    acc.wrapping_mul(131).wrapping_add(result.delta.removed.len() as u64)
}

fn bench_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene.geometry");
    for (name, rows) in CASES {
        let (scene, _) = grid_scene(rows);
        group.throughput(Throughput::Elements(scene.edges().len() as u64));
        group.bench_function(name, |b| {
            b.iter_batched(
                || scene.clone(),
                |mut scene| black_box(refresh_all_geometry(&mut scene).len()),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_move_actors(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene.move_actors");
    for (name, rows) in CASES {
        let (scene, actors) = grid_scene(rows);
        let ops: Vec<Op> = actors
            .iter()
            .map(|actor| Op::SetTransform {
                node_id: actor.clone(),
                transform: Transform::at(150.0, 10.0).rotated(30.0),
            })
            .collect();
        group.throughput(Throughput::Elements(ops.len() as u64));
        group.bench_function(name, |b| {
            b.iter_batched(
                || scene.clone(),
                |mut scene| {
                    let result = apply_ops(&mut scene, black_box(&ops)).expect("apply");
                    black_box(checksum_apply_result(&result))
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene.document");
    for (name, rows) in CASES {
        let (scene, _) = grid_scene(rows);
        let document = serialize(&scene);
        group.throughput(Throughput::Elements(
            (document.nodes.len() + document.edges.len()) as u64,
        ));
        group.bench_function(format!("serialize/{name}"), |b| {
            b.iter(|| black_box(serialize(black_box(&scene)).edges.len()))
        });
        group.bench_function(format!("deserialize/{name}"), |b| {
            b.iter(|| black_box(deserialize(black_box(&document)).scene.edges().len()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_geometry, bench_move_actors, bench_document);
criterion_main!(benches);
