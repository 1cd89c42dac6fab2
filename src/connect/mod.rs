// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ucscene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Relationship legality and the two-click connection protocol.

pub mod protocol;
pub mod rules;

pub use protocol::{CancelReason, ConnectionProtocol, ConnectionState, ConnectionStep, PickOutcome};
pub use rules::{
    is_valid_source, is_valid_target, valid_source_kinds, validate_connection, ConnectionError,
};
