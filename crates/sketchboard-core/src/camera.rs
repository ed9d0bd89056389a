//! Camera module for pan/zoom transforms.

use crate::geometry::Aabb;
use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Allowed zoom range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomLimits {
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min_zoom: 0.1,
            max_zoom: 8.0,
        }
    }
}

impl ZoomLimits {
    /// Clamp a requested zoom into range. Out-of-range requests are never
    /// rejected, and an inverted range resolves to `max_zoom`.
    pub fn clamp(&self, zoom: f64) -> f64 {
        if zoom.is_nan() {
            return self.min_zoom;
        }
        zoom.max(self.min_zoom).min(self.max_zoom)
    }

    /// Whether the range is finite, positive and not inverted.
    pub fn is_valid(&self) -> bool {
        self.min_zoom.is_finite()
            && self.max_zoom.is_finite()
            && self.min_zoom > 0.0
            && self.min_zoom <= self.max_zoom
    }
}

/// Camera maps world coordinates to screen coordinates.
///
/// `(x, y)` is the world point shown at the top-left of the viewport and
/// `zoom` the number of screen pixels per world unit:
/// `screen = (world - (x, y)) * zoom`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

impl Camera {
    pub fn new(x: f64, y: f64, zoom: f64) -> Self {
        Self { x, y, zoom }
    }

    /// Get the affine transform for rendering.
    ///
    /// Translates by `-(x, y) * zoom` and then scales, so the translation is
    /// expressed in screen units.
    pub fn transform(&self) -> Affine {
        Affine::translate((-self.x * self.zoom, -self.y * self.zoom)) * Affine::scale(self.zoom)
    }

    /// Get the inverse transform for input handling.
    pub fn inverse_transform(&self) -> Affine {
        Affine::translate((self.x, self.y)) * Affine::scale(1.0 / self.zoom)
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        Point::new(screen_point.x / self.zoom + self.x, screen_point.y / self.zoom + self.y)
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        Point::new((world_point.x - self.x) * self.zoom, (world_point.y - self.y) * self.zoom)
    }

    /// Same camera with zoom clamped into `limits`.
    pub fn clamped(&self, limits: &ZoomLimits) -> Camera {
        Camera {
            zoom: limits.clamp(self.zoom),
            ..*self
        }
    }

    /// Pan so that content follows a pointer moved by `delta` screen pixels.
    pub fn panned_by_screen(&self, delta: Vec2) -> Camera {
        Camera {
            x: self.x - delta.x / self.zoom,
            y: self.y - delta.y / self.zoom,
            zoom: self.zoom,
        }
    }

    /// Zoom by `factor`, keeping the world point under `screen_point` fixed.
    pub fn zoomed_at(&self, screen_point: Point, factor: f64, limits: &ZoomLimits) -> Camera {
        let new_zoom = limits.clamp(self.zoom * factor);

        // World position under the cursor before zoom
        let world = self.screen_to_world(screen_point);

        Camera {
            x: world.x - screen_point.x / new_zoom,
            y: world.y - screen_point.y / new_zoom,
            zoom: new_zoom,
        }
    }

    /// World-space region visible in a viewport of the given size.
    pub fn visible_world(&self, viewport: Size) -> Aabb {
        Aabb::new(self.x, self.y, viewport.width / self.zoom, viewport.height / self.zoom)
    }

    /// Fit the camera to show the given bounding box.
    pub fn fit_to_bounds(
        bounds: &Aabb,
        viewport: Size,
        padding: f64,
        limits: &ZoomLimits,
    ) -> Camera {
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            return Camera::default();
        }

        let padded_width = (viewport.width - padding * 2.0).max(1.0);
        let padded_height = (viewport.height - padding * 2.0).max(1.0);
        let zoom = limits.clamp((padded_width / bounds.width).min(padded_height / bounds.height));

        // Center the bounds in the viewport
        let center_x = bounds.x + bounds.width / 2.0;
        let center_y = bounds.y + bounds.height / 2.0;
        Camera {
            x: center_x - viewport.width / 2.0 / zoom,
            y: center_y - viewport.height / 2.0 / zoom,
            zoom,
        }
    }
}
