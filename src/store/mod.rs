// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ucscene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for diagram documents on disk.
//!
//! Documents are written atomically (temp file plus rename) so a crash never leaves a
//! half-written diagram behind.

pub mod document_file;

pub use document_file::{DocumentFile, StoreError, WriteDurability};
