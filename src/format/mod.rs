// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ucscene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Scene documents.
//!
//! A [`Document`] is the acyclic, ID-keyed form of a scene. It is the only shape that
//! crosses the history and persistence boundaries.

pub mod document;

pub use document::{
    deserialize, document_schema, serialize, DeserializeWarning, Document, DocumentError,
    EdgeLabelRecord, EdgeRecord, EdgeStyleRecord, NodeRecord, NodeStyleRecord, PointRecord,
    Restored, TransformRecord, DOCUMENT_VERSION,
};
