// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ucscene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A [`Scene`] owns nodes and edges; all cross references between them are IDs.

pub mod edge;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod geom;
pub mod ids;
pub mod node;
pub mod scene;

pub use edge::{
    Arrowhead, Decorations, Edge, EdgeGeometry, EdgeKind, EdgeLabel, EdgeStyle, InvalidEdgeKind,
    LabelStyle, TypeTag,
};
pub use geom::{Point, Transform};
pub use ids::{EdgeId, Id, IdAllocator, IdError, NodeId};
pub use node::{InvalidNodeKind, Node, NodeKind, NodeStyle};
pub use scene::{IntegrityError, Scene};
