// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ucscene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use ucscene::connect::{ConnectionError, ConnectionStep};
use ucscene::editor::{Editor, EditorError, Tool};
use ucscene::format::{deserialize, serialize, Document};
use ucscene::history::{HistoryPolicy, ManualClock};
use ucscene::model::{EdgeKind, NodeId, NodeKind, Point, Transform};
use ucscene::ops::ApplyError;

#[fixture]
fn editor() -> Editor<ManualClock> {
    Editor::with_clock(ManualClock::new(), HistoryPolicy::default())
}

fn place(editor: &mut Editor<ManualClock>, kind: NodeKind, x: f64, y: f64) -> NodeId {
    editor.create_node(kind, Point::new(x, y), kind.default_label()).expect("create node")
}

#[rstest]
fn actor_connects_to_a_use_case_in_two_clicks(mut editor: Editor<ManualClock>) {
    let actor = place(&mut editor, NodeKind::Actor, 100.0, 200.0);
    let use_case = place(&mut editor, NodeKind::UseCase, 400.0, 200.0);

    editor.set_tool(Tool::Connect(EdgeKind::Association));
    editor.click_node(&actor).expect("source pick");
    let edge_id = editor.click_node(&use_case).expect("target pick").expect("edge");

    let edge = editor.scene().edge(&edge_id).expect("edge");
    assert_eq!(edge.kind(), EdgeKind::Association);
    assert!(edge.decorations().arrowhead.is_none());
    assert!(edge.decorations().type_tag.is_none());
    for node_id in [&actor, &use_case] {
        let node = editor.scene().node(node_id).expect("node");
        assert_eq!(node.incident_edges(), &[edge_id.clone()]);
    }
    assert_eq!(editor.connection().step(), ConnectionStep::Idle);
    editor.scene().check_integrity().expect("integrity");
}

#[rstest]
fn include_self_loop_is_refused(mut editor: Editor<ManualClock>) {
    let use_case = place(&mut editor, NodeKind::UseCase, 0.0, 0.0);
    editor.set_tool(Tool::Connect(EdgeKind::Include));
    editor.click_node(&use_case).expect("source pick");

    let err = editor.click_node(&use_case).unwrap_err();
    assert!(matches!(
        err,
        EditorError::Apply(ApplyError::Rejected(ConnectionError::SelfConnection { .. }))
    ));
    assert!(editor.scene().edges().is_empty());
}

#[rstest]
fn misuse_case_threatens_a_use_case(mut editor: Editor<ManualClock>) {
    let use_case = place(&mut editor, NodeKind::UseCase, 200.0, 200.0);
    let misuse_case = place(&mut editor, NodeKind::MisuseCase, 500.0, 260.0);

    editor.set_tool(Tool::Connect(EdgeKind::Threatens));
    let err = editor.click_node(&use_case).unwrap_err();
    assert!(matches!(
        err,
        EditorError::Apply(ApplyError::Rejected(ConnectionError::InvalidSource { .. }))
    ));
    assert_eq!(editor.connection().step(), ConnectionStep::Idle);

    editor.click_node(&misuse_case).expect("source pick");
    let edge_id = editor.click_node(&use_case).expect("target pick").expect("edge");
    let edge = editor.scene().edge(&edge_id).expect("edge");
    let arrowhead = edge.decorations().arrowhead.expect("arrowhead");
    assert_eq!(arrowhead.tip, edge.geometry().end);
    assert_eq!(edge.decorations().type_tag.as_ref().map(|tag| tag.text), Some("«threatens»"));
}

#[rstest]
fn undo_restores_node_position_and_edge_geometry(mut editor: Editor<ManualClock>) {
    let actor = place(&mut editor, NodeKind::Actor, 100.0, 100.0);
    let use_case = place(&mut editor, NodeKind::UseCase, 400.0, 100.0);
    let edge_id = editor.create_edge(EdgeKind::Association, &actor, &use_case).expect("edge");
    editor.flush_history();
    let before = *editor.scene().edge(&edge_id).expect("edge").geometry();

    editor.move_node(&actor, Transform::at(100.0, 400.0)).expect("move");
    assert_ne!(editor.scene().edge(&edge_id).expect("edge").geometry(), &before);

    editor.undo().expect("undo");
    assert_eq!(
        editor.scene().node(&actor).expect("actor").transform(),
        &Transform::at(100.0, 100.0)
    );
    assert_eq!(editor.scene().edge(&edge_id).expect("edge").geometry(), &before);
    editor.scene().check_integrity().expect("integrity");
}

#[rstest]
fn a_new_change_after_undo_discards_the_redo_branch(mut editor: Editor<ManualClock>) {
    place(&mut editor, NodeKind::Actor, 0.0, 0.0);
    editor.flush_history();
    assert_eq!(editor.history().len(), 2);

    editor.undo().expect("undo");
    assert!(editor.scene().nodes().is_empty());
    assert!(editor.history().can_redo());

    place(&mut editor, NodeKind::UseCase, 50.0, 50.0);
    editor.flush_history();
    assert!(!editor.history().can_redo());
    assert_eq!(editor.history().len(), 2);
    assert!(matches!(editor.redo(), Err(EditorError::History(_))));
}

#[rstest]
fn deleting_a_node_removes_its_edges(mut editor: Editor<ManualClock>) {
    let actor = place(&mut editor, NodeKind::Actor, 0.0, 0.0);
    let first = place(&mut editor, NodeKind::UseCase, 300.0, 0.0);
    let second = place(&mut editor, NodeKind::UseCase, 300.0, 200.0);
    editor.create_edge(EdgeKind::Association, &actor, &first).expect("association");
    let include = editor.create_edge(EdgeKind::Include, &first, &second).expect("include");

    editor.delete_node(&actor).expect("delete");

    assert_eq!(editor.scene().edges().keys().collect::<Vec<_>>(), vec![&include]);
    assert_eq!(editor.scene().node(&first).expect("use case").incident_edges(), &[include]);
    editor.scene().check_integrity().expect("integrity");
}

#[test]
fn demo_document_survives_a_json_round_trip() {
    let document = ucscene::demo::demo_document().expect("demo");
    let json = document.to_json_pretty().expect("json");
    let reparsed = Document::from_json(&json).expect("parse");

    let restored = deserialize(&reparsed);
    assert!(restored.warnings.is_empty());
    assert_eq!(restored.scene.nodes().len(), document.nodes.len());
    assert_eq!(restored.scene.edges().len(), document.edges.len());
    assert_eq!(serialize(&restored.scene).edges, document.edges);
    restored.scene.check_integrity().expect("integrity");
}
