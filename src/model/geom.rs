// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ucscene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::ops::{Add, Sub};

/// A point in scene coordinates (y grows downwards, like the canvas).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Rotates the vector around the origin by `degrees` (clockwise on screen).
    pub fn rotated(self, degrees: f64) -> Self {
        if degrees == 0.0 {
            return self;
        }
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Placement of a node: center position, non-uniform scale and rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub angle: f64,
}

impl Transform {
    pub const fn at(x: f64, y: f64) -> Self {
        Self { x, y, scale_x: 1.0, scale_y: 1.0, angle: 0.0 }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// JSON has no NaN or infinity, so only finite transforms can be saved and loaded.
    pub fn is_finite(&self) -> bool {
        [self.x, self.y, self.scale_x, self.scale_y, self.angle]
            .iter()
            .all(|value| value.is_finite())
    }

    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn scaled(self, scale_x: f64, scale_y: f64) -> Self {
        Self {
            scale_x,
            scale_y,
            ..self
        }
    }

    pub fn rotated(self, angle: f64) -> Self {
        Self {
            angle: angle.rem_euclid(360.0),
            ..self
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::at(0.0, 0.0)
    }
}

impl From<Point> for Transform {
    fn from(point: Point) -> Self {
        Self::at(point.x, point.y)
    }
}
