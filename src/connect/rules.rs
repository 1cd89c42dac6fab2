// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ucscene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use crate::model::{EdgeKind, NodeId, NodeKind};

/// Node kinds an edge of `kind` may start from.
pub fn valid_source_kinds(kind: EdgeKind) -> &'static [NodeKind] {
    match kind {
        EdgeKind::Association => &[
            NodeKind::Actor,
            NodeKind::Misuser,
            NodeKind::UseCase,
            NodeKind::MisuseCase,
        ],
        EdgeKind::Include | EdgeKind::Extend => &[NodeKind::UseCase],
        EdgeKind::Generalization => &[NodeKind::Actor, NodeKind::UseCase],
        EdgeKind::Threatens => &[NodeKind::MisuseCase],
    }
}

pub fn is_valid_source(kind: EdgeKind, source_kind: NodeKind) -> bool {
    valid_source_kinds(kind).contains(&source_kind)
}

/// Whether `source_kind -> target_kind` is a legal pair for `kind`.
pub fn is_valid_target(kind: EdgeKind, source_kind: NodeKind, target_kind: NodeKind) -> bool {
    use NodeKind::{Actor, Misuser, MisuseCase, UseCase};

    match kind {
        EdgeKind::Association => matches!(
            (source_kind, target_kind),
            (Actor, UseCase) | (UseCase, Actor) | (Misuser, MisuseCase) | (MisuseCase, Misuser)
        ),
        EdgeKind::Include | EdgeKind::Extend => (source_kind, target_kind) == (UseCase, UseCase),
        EdgeKind::Generalization => {
            source_kind == target_kind && matches!(source_kind, Actor | UseCase)
        }
        EdgeKind::Threatens => (source_kind, target_kind) == (MisuseCase, UseCase),
    }
}

/// Full legality check for a prospective edge.
///
/// Checks run in protocol order: source kind, then self-connection, then the pair.
pub fn validate_connection(
    kind: EdgeKind,
    source: (&NodeId, NodeKind),
    target: (&NodeId, NodeKind),
) -> Result<(), ConnectionError> {
    let (source_id, source_kind) = source;
    let (target_id, target_kind) = target;

    if !is_valid_source(kind, source_kind) {
        return Err(ConnectionError::InvalidSource { kind, source_kind });
    }
    if source_id == target_id {
        return Err(ConnectionError::SelfConnection { kind });
    }
    if !is_valid_target(kind, source_kind, target_kind) {
        return Err(ConnectionError::InvalidTarget { kind, source_kind, target_kind });
    }
    Ok(())
}

/// User-facing refusal of a connection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionError {
    InvalidSource { kind: EdgeKind, source_kind: NodeKind },
    InvalidTarget { kind: EdgeKind, source_kind: NodeKind, target_kind: NodeKind },
    SelfConnection { kind: EdgeKind },
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSource { kind, source_kind } => {
                write!(f, "a {kind} relationship cannot start at a {source_kind}")?;
                let allowed = valid_source_kinds(*kind)
                    .iter()
                    .map(|kind| kind.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, " (allowed: {allowed})")
            }
            Self::InvalidTarget { kind, source_kind, target_kind } => write!(
                f,
                "a {kind} relationship cannot connect a {source_kind} to a {target_kind}"
            ),
            Self::SelfConnection { kind } => {
                write!(f, "a {kind} relationship cannot connect an element to itself")
            }
        }
    }
}

impl std::error::Error for ConnectionError {}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::{is_valid_source, is_valid_target, validate_connection, ConnectionError};
    use crate::model::{EdgeKind, NodeId, NodeKind};

    fn legal_pairs(kind: EdgeKind) -> &'static [(NodeKind, NodeKind)] {
        use NodeKind::{Actor, Misuser, MisuseCase, UseCase};
        match kind {
            EdgeKind::Association => &[
                (Actor, UseCase),
                (UseCase, Actor),
                (Misuser, MisuseCase),
                (MisuseCase, Misuser),
            ],
            EdgeKind::Include | EdgeKind::Extend => &[(UseCase, UseCase)],
            EdgeKind::Generalization => &[(Actor, Actor), (UseCase, UseCase)],
            EdgeKind::Threatens => &[(MisuseCase, UseCase)],
        }
    }

    #[test]
    fn pair_table_matches_legal_pairs_exhaustively() {
        for kind in EdgeKind::ALL {
            for source in NodeKind::ALL {
                for target in NodeKind::ALL {
                    let expected = legal_pairs(kind).contains(&(source, target));
                    assert_eq!(
                        is_valid_source(kind, source) && is_valid_target(kind, source, target),
                        expected,
                        "{kind}: {source} -> {target}"
                    );
                }
            }
        }
    }

    #[rstest]
    #[case(EdgeKind::Association, NodeKind::System)]
    #[case(EdgeKind::Include, NodeKind::Actor)]
    #[case(EdgeKind::Extend, NodeKind::MisuseCase)]
    #[case(EdgeKind::Generalization, NodeKind::Misuser)]
    #[case(EdgeKind::Threatens, NodeKind::UseCase)]
    fn invalid_source_is_reported_first(#[case] kind: EdgeKind, #[case] source_kind: NodeKind) {
        let same = NodeId::new("n:1").expect("node id");
        let result = validate_connection(kind, (&same, source_kind), (&same, source_kind));
        assert_eq!(result, Err(ConnectionError::InvalidSource { kind, source_kind }));
    }

    #[test]
    fn self_connection_is_distinct_from_invalid_target() {
        let actor = NodeId::new("n:1").expect("node id");
        assert_eq!(
            validate_connection(
                EdgeKind::Association,
                (&actor, NodeKind::Actor),
                (&actor, NodeKind::Actor)
            ),
            Err(ConnectionError::SelfConnection { kind: EdgeKind::Association })
        );
    }

    #[test]
    fn messages_are_human_readable() {
        let err = ConnectionError::InvalidTarget {
            kind: EdgeKind::Threatens,
            source_kind: NodeKind::UseCase,
            target_kind: NodeKind::MisuseCase,
        };
        assert_eq!(
            err.to_string(),
            "a threatens relationship cannot connect a usecase to a misusecase"
        );
    }

    fn any_node_kind() -> impl Strategy<Value = NodeKind> {
        prop::sample::select(NodeKind::ALL.to_vec())
    }

    fn any_edge_kind() -> impl Strategy<Value = EdgeKind> {
        prop::sample::select(EdgeKind::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn pairs_outside_the_table_are_refused(
            kind in any_edge_kind(),
            source_kind in any_node_kind(),
            target_kind in any_node_kind(),
        ) {
            let source = NodeId::new("n:1").expect("node id");
            let target = NodeId::new("n:2").expect("node id");
            let result = validate_connection(kind, (&source, source_kind), (&target, target_kind));
            let legal = legal_pairs(kind).contains(&(source_kind, target_kind));
            prop_assert_eq!(result.is_ok(), legal);
        }
    }
}
