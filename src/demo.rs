// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ucscene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::editor::{Editor, EditorError};
use crate::format::Document;
use crate::history::Clock;
use crate::model::{EdgeKind, NodeKind, Point};
use crate::suggest::MisuseSuggestion;

/// A small cash-machine diagram with one threatened use case.
pub fn demo_document() -> Result<Document, EditorError> {
    let mut editor = Editor::new();
    build_demo(&mut editor)?;
    Ok(editor.document())
}

pub fn build_demo<C: Clock>(editor: &mut Editor<C>) -> Result<(), EditorError> {
    editor.create_node(NodeKind::System, Point::new(450.0, 300.0), "ATM")?;
    let customer = editor.create_node(NodeKind::Actor, Point::new(100.0, 250.0), "Customer")?;
    let bank = editor.create_node(NodeKind::Actor, Point::new(100.0, 450.0), "Bank clerk")?;
    let withdraw =
        editor.create_node(NodeKind::UseCase, Point::new(450.0, 200.0), "Withdraw cash")?;
    let authenticate =
        editor.create_node(NodeKind::UseCase, Point::new(450.0, 350.0), "Authenticate")?;
    let refill = editor.create_node(NodeKind::UseCase, Point::new(450.0, 450.0), "Refill cash")?;

    editor.create_edge(EdgeKind::Association, &customer, &withdraw)?;
    editor.create_edge(EdgeKind::Association, &bank, &refill)?;
    editor.create_edge(EdgeKind::Include, &withdraw, &authenticate)?;

    let suggestions = [
        MisuseSuggestion {
            name: "Skim card data".to_owned(),
            description: "A hidden reader copies the magnetic stripe.".to_owned(),
            actor: "Card thief".to_owned(),
            impact: "Cloned cards drain the account.".to_owned(),
        },
        MisuseSuggestion {
            name: "Shoulder surf PIN".to_owned(),
            description: "The PIN is watched while typed.".to_owned(),
            actor: "Card thief".to_owned(),
            impact: "Stolen cards become usable.".to_owned(),
        },
    ];
    editor.materialize_suggestions(&authenticate, &suggestions)?;
    editor.flush_history();
    Ok(())
}
