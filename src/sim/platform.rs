//! Static platforms forming the arena
//!
//! Read-only for the whole session.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;

/// Thickness shared by every platform slab
pub const PLATFORM_THICKNESS: f32 = 20.0;

/// An immutable axis-aligned collision surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
}

impl Platform {
    pub fn new(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            rect: Rect::from_center(center, Vec2::new(width, height)),
        }
    }

    /// Y coordinate actors stand on
    #[inline]
    pub fn top(&self) -> f32 {
        self.rect.top()
    }
}

/// The five-platform multi-level arena
///
/// The first entry is the ground plane spanning the full width; the rest
/// are placed relative to the screen size so a resized arena keeps its shape.
pub fn arena_platforms(width: f32, height: f32) -> Vec<Platform> {
    let t = PLATFORM_THICKNESS;
    vec![
        Platform::new(Vec2::new(width / 2.0, height - 40.0), width, t),
        Platform::new(Vec2::new(width / 2.0 - 30.0, height - 300.0), 640.0, t),
        Platform::new(Vec2::new(16.0, height - 570.0), 650.0, t),
        Platform::new(Vec2::new(width - 120.0, height - 605.0), 670.0, t),
        Platform::new(Vec2::new(width / 2.0 + 5.0, height - 770.0), 500.0, t),
    ]
}
