// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ucscene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::boundary::{resolve_boundary_point, NodeDescriptor};
use crate::model::{Arrowhead, Decorations, EdgeGeometry, EdgeKind, EdgeLabel, Point, TypeTag};

/// Distance between the line midpoint and the stereotype tag.
pub const TYPE_TAG_OFFSET: f64 = 15.0;

/// Recomputes an edge's endpoints and every derived decoration.
pub fn compute_edge_layout(
    kind: EdgeKind,
    source: &NodeDescriptor,
    target: &NodeDescriptor,
    label: Option<&EdgeLabel>,
) -> (EdgeGeometry, Decorations) {
    let start = resolve_boundary_point(source, target.center);
    let end = resolve_boundary_point(target, source.center);

    let decorations = Decorations {
        arrowhead: kind.is_directed().then(|| arrowhead(start, end)),
        type_tag: kind.type_tag().map(|text| TypeTag {
            text,
            position: type_tag_position(start, end),
        }),
        label_position: label.map(|label| label_position(start, end, label.manual_offset())),
    };

    (EdgeGeometry { start, end }, decorations)
}

/// Arrowhead sitting on `end`, pointing along the line.
pub fn arrowhead(start: Point, end: Point) -> Arrowhead {
    let direction = end - start;
    let angle = if direction.length() == 0.0 {
        0.0
    } else {
        direction.y.atan2(direction.x).to_degrees()
    };
    Arrowhead { tip: end, angle }
}

/// Line midpoint pushed [`TYPE_TAG_OFFSET`] units to the left of the travel direction.
pub fn type_tag_position(start: Point, end: Point) -> Point {
    let mid = start.midpoint(end);
    let direction = end - start;
    let length = direction.length();
    if length == 0.0 {
        return Point::new(mid.x, mid.y - TYPE_TAG_OFFSET);
    }
    let normal = Point::new(direction.y / length, -direction.x / length);
    Point::new(mid.x + normal.x * TYPE_TAG_OFFSET, mid.y + normal.y * TYPE_TAG_OFFSET)
}

pub fn label_position(start: Point, end: Point, manual_offset: Option<Point>) -> Point {
    start.midpoint(end) + manual_offset.unwrap_or(Point::ORIGIN)
}

#[cfg(test)]
mod tests {
    use super::{arrowhead, compute_edge_layout, label_position, type_tag_position};
    use crate::geometry::NodeDescriptor;
    use crate::model::{EdgeKind, EdgeLabel, NodeKind, Point};

    fn actor_at(x: f64, y: f64) -> NodeDescriptor {
        NodeDescriptor {
            kind: NodeKind::Actor,
            center: Point::new(x, y),
            width: 40.0,
            height: 90.0,
            angle: 0.0,
        }
    }

    fn assert_close(actual: Point, expected: Point) {
        assert!(
            (actual.x - expected.x).abs() < 1e-9 && (actual.y - expected.y).abs() < 1e-9,
            "expected {expected:?}, got {actual:?}"
        );
    }

    fn use_case_at(x: f64, y: f64) -> NodeDescriptor {
        NodeDescriptor {
            kind: NodeKind::UseCase,
            center: Point::new(x, y),
            width: 160.0,
            height: 80.0,
            angle: 0.0,
        }
    }

    #[test]
    fn arrowhead_points_along_the_line() {
        let head = arrowhead(Point::new(0.0, 0.0), Point::new(0.0, 10.0));
        assert_eq!(head.tip, Point::new(0.0, 10.0));
        assert!((head.angle - 90.0).abs() < 1e-9);
    }

    #[test]
    fn type_tag_sits_above_a_left_to_right_line() {
        let tag = type_tag_position(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!((tag.x - 50.0).abs() < 1e-9);
        assert!((tag.y + 15.0).abs() < 1e-9);
    }

    #[test]
    fn label_follows_manual_offset() {
        let pos = label_position(
            Point::new(0.0, 0.0),
            Point::new(100.0, 50.0),
            Some(Point::new(5.0, -5.0)),
        );
        assert_eq!(pos, Point::new(55.0, 20.0));
    }

    #[test]
    fn association_has_no_decorations() {
        let (geometry, decorations) = compute_edge_layout(
            EdgeKind::Association,
            &actor_at(0.0, 0.0),
            &use_case_at(300.0, 0.0),
            None,
        );

        assert_close(geometry.start, Point::new(20.0, 0.0));
        assert_close(geometry.end, Point::new(220.0, 0.0));
        assert_eq!(decorations.arrowhead, None);
        assert_eq!(decorations.type_tag, None);
        assert_eq!(decorations.label_position, None);
    }

    #[test]
    fn include_gets_arrowhead_and_tag() {
        let (geometry, decorations) = compute_edge_layout(
            EdgeKind::Include,
            &use_case_at(0.0, 0.0),
            &use_case_at(400.0, 0.0),
            None,
        );

        assert_close(geometry.start, Point::new(80.0, 0.0));
        assert_close(geometry.end, Point::new(320.0, 0.0));
        let head = decorations.arrowhead.expect("arrowhead");
        assert_eq!(head.tip, geometry.end);
        let tag = decorations.type_tag.expect("type tag");
        assert_eq!(tag.text, "«include»");
    }

    #[test]
    fn generalization_places_its_label() {
        let mut label = EdgeLabel::new("is a");
        label.set_manual_offset(Some(Point::new(0.0, 10.0)));
        let (geometry, decorations) = compute_edge_layout(
            EdgeKind::Generalization,
            &actor_at(0.0, 0.0),
            &actor_at(200.0, 0.0),
            Some(&label),
        );

        let mid = geometry.start.midpoint(geometry.end);
        let placed = decorations.label_position.expect("label position");
        assert_close(placed, Point::new(mid.x, mid.y + 10.0));
    }
}
