// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ucscene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use crate::connect::ConnectionStep;
use crate::model::EdgeKind;
use crate::ops::SceneRef;

/// Outbound notification for panels and status bars, queued in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneEvent {
    SelectionChanged(Option<SceneRef>),
    ConnectionStepChanged { step: ConnectionStep, kind: Option<EdgeKind> },
    /// A refused gesture, worded for the user.
    ValidationError { reason: String },
    Status { message: String },
}

impl SceneEvent {
    pub fn validation(reason: impl fmt::Display) -> Self {
        Self::ValidationError { reason: reason.to_string() }
    }

    pub fn status(message: impl Into<String>) -> Self {
        Self::Status { message: message.into() }
    }
}

impl fmt::Display for SceneEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelectionChanged(None) => f.write_str("selection cleared"),
            Self::SelectionChanged(Some(object)) => write!(f, "selected {object}"),
            Self::ConnectionStepChanged { step, kind } => match kind {
                Some(kind) => write!(f, "{kind} connection: {step:?}"),
                None => write!(f, "connection: {step:?}"),
            },
            Self::ValidationError { reason } => write!(f, "refused: {reason}"),
            Self::Status { message } => f.write_str(message),
        }
    }
}
