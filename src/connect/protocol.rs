// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ucscene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use log::debug;

use super::rules::{is_valid_source, validate_connection, ConnectionError};
use crate::model::{EdgeKind, NodeId, NodeKind};

/// Coarse protocol step, as reported to panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStep {
    Idle,
    SourceSelected,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Idle,
    SourceSelected { kind: EdgeKind, source: NodeId, source_kind: NodeKind },
}

impl ConnectionState {
    pub fn step(&self) -> ConnectionStep {
        match self {
            Self::Idle => ConnectionStep::Idle,
            Self::SourceSelected { .. } => ConnectionStep::SourceSelected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    ToolChanged,
    Escape,
    EmptyCanvas,
    SourceRemoved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// No edge kind is armed; the click is not part of a connection.
    Ignored,
    SourceSelected { source: NodeId },
    /// Both ends are chosen and legal; the caller creates the edge.
    Ready { kind: EdgeKind, source: NodeId, target: NodeId },
}

/// The single in-flight "pick source, then pick target" interaction.
///
/// The protocol never touches the scene. It records which node is the highlighted
/// candidate source; cancelling drops that highlight in the same call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionProtocol {
    armed: Option<EdgeKind>,
    state: ConnectionState,
}

impl ConnectionProtocol {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn armed_kind(&self) -> Option<EdgeKind> {
        self.armed
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    pub fn step(&self) -> ConnectionStep {
        self.state.step()
    }

    /// Node currently highlighted as candidate source, if any.
    pub fn highlighted_source(&self) -> Option<&NodeId> {
        match &self.state {
            ConnectionState::Idle => None,
            ConnectionState::SourceSelected { source, .. } => Some(source),
        }
    }

    /// Arms (or disarms) an edge kind. Any pending source is cancelled first.
    ///
    /// Returns `true` if a pending connection was cancelled.
    pub fn arm(&mut self, kind: Option<EdgeKind>) -> bool {
        let cancelled = self.cancel(CancelReason::ToolChanged);
        self.armed = kind;
        cancelled
    }

    /// Feeds a node click into the protocol.
    ///
    /// On a refused pick the state is left exactly as it was.
    pub fn pick(
        &mut self,
        node_id: &NodeId,
        node_kind: NodeKind,
    ) -> Result<PickOutcome, ConnectionError> {
        let Some(kind) = self.armed else {
            return Ok(PickOutcome::Ignored);
        };

        match &self.state {
            ConnectionState::Idle => {
                if !is_valid_source(kind, node_kind) {
                    return Err(ConnectionError::InvalidSource { kind, source_kind: node_kind });
                }
                debug!("connection: {kind} source selected ({node_id})");
                self.state = ConnectionState::SourceSelected {
                    kind,
                    source: node_id.clone(),
                    source_kind: node_kind,
                };
                Ok(PickOutcome::SourceSelected { source: node_id.clone() })
            }
            ConnectionState::SourceSelected { kind, source, source_kind } => {
                let kind = *kind;
                validate_connection(kind, (source, *source_kind), (node_id, node_kind))?;
                let source = source.clone();
                debug!("connection: {kind} ready ({source} -> {node_id})");
                self.state = ConnectionState::Idle;
                Ok(PickOutcome::Ready { kind, source, target: node_id.clone() })
            }
        }
    }

    /// Returns to `Idle`. Returns `true` if a source had been selected.
    pub fn cancel(&mut self, reason: CancelReason) -> bool {
        if self.state == ConnectionState::Idle {
            return false;
        }
        debug!("connection: cancelled ({reason:?})");
        self.state = ConnectionState::Idle;
        true
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::{CancelReason, ConnectionProtocol, ConnectionStep, PickOutcome};
    use crate::connect::ConnectionError;
    use crate::model::{EdgeKind, NodeId, NodeKind};

    fn id(value: &str) -> NodeId {
        NodeId::new(value).expect("node id")
    }

    #[fixture]
    fn association() -> ConnectionProtocol {
        let mut protocol = ConnectionProtocol::new();
        protocol.arm(Some(EdgeKind::Association));
        protocol
    }

    #[test]
    fn unarmed_clicks_are_ignored() {
        let mut protocol = ConnectionProtocol::new();
        assert_eq!(protocol.pick(&id("n:1"), NodeKind::Actor), Ok(PickOutcome::Ignored));
        assert_eq!(protocol.step(), ConnectionStep::Idle);
    }

    #[rstest]
    fn two_clicks_produce_a_ready_edge(mut association: ConnectionProtocol) {
        let actor = id("n:1");
        let use_case = id("n:2");

        assert_eq!(
            association.pick(&actor, NodeKind::Actor),
            Ok(PickOutcome::SourceSelected { source: actor.clone() })
        );
        assert_eq!(association.highlighted_source(), Some(&actor));

        assert_eq!(
            association.pick(&use_case, NodeKind::UseCase),
            Ok(PickOutcome::Ready { kind: EdgeKind::Association, source: actor, target: use_case })
        );
        assert_eq!(association.step(), ConnectionStep::Idle);
        assert_eq!(association.highlighted_source(), None);
        assert_eq!(association.armed_kind(), Some(EdgeKind::Association));
    }

    #[rstest]
    fn invalid_source_keeps_idle(mut association: ConnectionProtocol) {
        let result = association.pick(&id("n:9"), NodeKind::System);
        assert_eq!(
            result,
            Err(ConnectionError::InvalidSource {
                kind: EdgeKind::Association,
                source_kind: NodeKind::System,
            })
        );
        assert_eq!(association.step(), ConnectionStep::Idle);
    }

    #[rstest]
    fn refused_target_keeps_the_source(mut association: ConnectionProtocol) {
        let actor = id("n:1");
        association.pick(&actor, NodeKind::Actor).expect("source");

        assert_eq!(
            association.pick(&actor, NodeKind::Actor),
            Err(ConnectionError::SelfConnection { kind: EdgeKind::Association })
        );
        assert_eq!(
            association.pick(&id("n:2"), NodeKind::Actor),
            Err(ConnectionError::InvalidTarget {
                kind: EdgeKind::Association,
                source_kind: NodeKind::Actor,
                target_kind: NodeKind::Actor,
            })
        );
        assert_eq!(association.step(), ConnectionStep::SourceSelected);
        assert_eq!(association.highlighted_source(), Some(&actor));
    }

    #[rstest]
    #[case(CancelReason::Escape)]
    #[case(CancelReason::EmptyCanvas)]
    #[case(CancelReason::SourceRemoved)]
    fn cancel_clears_source_and_highlight(
        mut association: ConnectionProtocol,
        #[case] reason: CancelReason,
    ) {
        association.pick(&id("n:1"), NodeKind::Actor).expect("source");

        assert!(association.cancel(reason));
        assert_eq!(association.step(), ConnectionStep::Idle);
        assert_eq!(association.highlighted_source(), None);
        assert!(!association.cancel(reason));
    }

    #[rstest]
    fn switching_tools_cancels(mut association: ConnectionProtocol) {
        association.pick(&id("n:1"), NodeKind::Actor).expect("source");

        assert!(association.arm(Some(EdgeKind::Include)));
        assert_eq!(association.step(), ConnectionStep::Idle);
        assert_eq!(association.armed_kind(), Some(EdgeKind::Include));
    }
}
