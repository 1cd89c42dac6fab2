// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ucscene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Edge geometry.
//!
//! Pure functions: where an edge meets each node's silhouette, and where its arrowhead,
//! stereotype tag and floating label sit. Nothing in here mutates the scene.

pub mod boundary;
pub mod decorations;

pub use boundary::{
    resolve_boundary_point, NodeDescriptor, ACTOR_BASE_HEIGHT, ACTOR_BASE_WIDTH,
    SYSTEM_BASE_HEIGHT, SYSTEM_BASE_WIDTH, USE_CASE_BASE_RX, USE_CASE_BASE_RY,
};
pub use decorations::{
    arrowhead, compute_edge_layout, label_position, type_tag_position, TYPE_TAG_OFFSET,
};
