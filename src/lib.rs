// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ucscene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Ucscene: scene graph and relationship engine for use-case / misuse-case diagrams.
//!
//! The crate keeps a diagram's nodes and typed edges consistent while they are edited:
//! edge endpoints follow node transforms, relationship kinds are checked against the
//! notation's rules, and every change can be undone through document snapshots.

pub mod connect;
pub mod demo;
pub mod editor;
pub mod events;
pub mod format;
pub mod geometry;
pub mod history;
pub mod model;
pub mod ops;
pub mod store;
pub mod suggest;
