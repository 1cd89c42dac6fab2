// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ucscene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{Node, NodeKind, Point};

/// Unscaled bounding box of the actor / misuser stick figure.
pub const ACTOR_BASE_WIDTH: f64 = 40.0;
pub const ACTOR_BASE_HEIGHT: f64 = 90.0;
/// Unscaled radii of the use-case / misuse-case ellipse.
pub const USE_CASE_BASE_RX: f64 = 80.0;
pub const USE_CASE_BASE_RY: f64 = 40.0;
/// Unscaled size of the system boundary rectangle.
pub const SYSTEM_BASE_WIDTH: f64 = 300.0;
pub const SYSTEM_BASE_HEIGHT: f64 = 400.0;

/// What the resolver needs to know about one endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeDescriptor {
    pub kind: NodeKind,
    pub center: Point,
    /// Post-scale width.
    pub width: f64,
    /// Post-scale height.
    pub height: f64,
    /// Rotation in degrees.
    pub angle: f64,
}

impl NodeDescriptor {
    pub fn of(node: &Node) -> Self {
        let transform = node.transform();
        let (base_width, base_height) = base_size(node.kind());
        Self {
            kind: node.kind(),
            center: transform.center(),
            width: base_width * transform.scale_x.abs(),
            height: base_height * transform.scale_y.abs(),
            angle: transform.angle,
        }
    }
}

pub fn base_size(kind: NodeKind) -> (f64, f64) {
    if kind.is_stick_figure() {
        (ACTOR_BASE_WIDTH, ACTOR_BASE_HEIGHT)
    } else if kind.is_oval() {
        (USE_CASE_BASE_RX * 2.0, USE_CASE_BASE_RY * 2.0)
    } else {
        (SYSTEM_BASE_WIDTH, SYSTEM_BASE_HEIGHT)
    }
}

/// Point where the ray from `node`'s center towards `toward` leaves the node's silhouette.
///
/// Coincident centers yield the center itself.
pub fn resolve_boundary_point(node: &NodeDescriptor, toward: Point) -> Point {
    let direction = toward - node.center;
    if direction.x == 0.0 && direction.y == 0.0 {
        return node.center;
    }

    let local = direction.rotated(-node.angle);
    let half_width = node.width / 2.0;
    let half_height = node.height / 2.0;

    // Stick figures and systems are clipped against their bounding box.
    let local_hit = if node.kind.is_oval() {
        ellipse_point(local, half_width, half_height)
    } else {
        box_exit(local, half_width, half_height)
    };

    node.center + local_hit.rotated(node.angle)
}

/// Slab test against an axis-aligned box centered on the origin.
fn box_exit(direction: Point, half_width: f64, half_height: f64) -> Point {
    let dx = direction.x.abs();
    let dy = direction.y.abs();
    let t = if dx * half_height > dy * half_width {
        half_width / dx
    } else {
        half_height / dy
    };
    if !t.is_finite() {
        return Point::ORIGIN;
    }
    Point::new(direction.x * t, direction.y * t)
}

fn ellipse_point(direction: Point, rx: f64, ry: f64) -> Point {
    let theta = direction.y.atan2(direction.x);
    Point::new(rx * theta.cos(), ry * theta.sin())
}
