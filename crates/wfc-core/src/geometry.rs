//! World/screen geometry and the canvas viewport transform.
//!
//! World coordinates are the untransformed graph space. The viewport holds a
//! pan offset in screen pixels plus a uniform zoom, so
//! `screen = world * zoom + pan`.

use serde::{Deserialize, Serialize};

// ─── Points & Rects ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Component-wise `self - other`.
    pub fn delta(self, other: Self) -> (f32, f32) {
        (self.x - other.x, self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle with a non-negative extent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rect from two arbitrary corners (any drag direction).
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    pub fn min_x(&self) -> f32 {
        self.x
    }

    pub fn min_y(&self) -> f32 {
        self.y
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x() && p.x <= self.max_x() && p.y >= self.min_y() && p.y <= self.max_y()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.min_x() <= other.max_x()
            && self.max_x() >= other.min_x()
            && self.min_y() <= other.max_y()
            && self.max_y() >= other.min_y()
    }

    /// Smallest rect covering every point, or `None` for an empty iterator.
    pub fn enclosing(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut min, mut max) = (first, first);
        for p in iter {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self::from_corners(min, max))
    }
}

// ─── Viewport ────────────────────────────────────────────────────────────

/// Allowed zoom range for a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomLimits {
    pub min: f32,
    pub max: f32,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self { min: 0.1, max: 3.0 }
    }
}

impl ZoomLimits {
    /// Clamp into the range. Never panics; `min` wins if the limits are
    /// inverted.
    pub fn clamp(&self, zoom: f32) -> f32 {
        zoom.min(self.max).max(self.min)
    }
}

/// Pan (screen pixels) and uniform zoom mapping world space onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    pub const fn new(x: f32, y: f32, zoom: f32) -> Self {
        Self { x, y, zoom }
    }

    pub fn pan(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Same zoom, new pan offset.
    pub fn panned_to(&self, pan: Point) -> Self {
        Self::new(pan.x, pan.y, self.zoom)
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.x) / self.zoom,
            (screen.y - self.y) / self.zoom,
        )
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(world.x * self.zoom + self.x, world.y * self.zoom + self.y)
    }

    /// Zoom by `factor` keeping the world point under `screen` fixed.
    ///
    /// The resulting zoom is clamped to `limits`; the pan is derived from the
    /// clamped ratio so the anchor holds even at the bounds.
    pub fn zoom_at(&self, screen: Point, factor: f32, limits: ZoomLimits) -> Self {
        let zoom = limits.clamp(self.zoom * factor);
        let ratio = zoom / self.zoom;
        Self::new(
            screen.x - (screen.x - self.x) * ratio,
            screen.y - (screen.y - self.y) * ratio,
            zoom,
        )
    }

    /// World-space region shown on a canvas of `canvas` pixels.
    pub fn visible_world_rect(&self, canvas: Size) -> Rect {
        let top_left = self.screen_to_world(Point::ORIGIN);
        Rect::new(
            top_left.x,
            top_left.y,
            canvas.width / self.zoom,
            canvas.height / self.zoom,
        )
    }

    /// Keep the zoom, pan so `world` lands at the centre of the canvas.
    pub fn centered_on(&self, world: Point, canvas: Size) -> Self {
        Self::new(
            canvas.width / 2.0 - world.x * self.zoom,
            canvas.height / 2.0 - world.y * self.zoom,
            self.zoom,
        )
    }

    /// Viewport showing all of `bounds` with `padding` screen pixels around it.
    pub fn fit(bounds: Rect, canvas: Size, limits: ZoomLimits, padding: f32) -> Self {
        let avail_w = (canvas.width - 2.0 * padding).max(1.0);
        let avail_h = (canvas.height - 2.0 * padding).max(1.0);
        let zoom_w = if bounds.width > 0.0 {
            avail_w / bounds.width
        } else {
            limits.max
        };
        let zoom_h = if bounds.height > 0.0 {
            avail_h / bounds.height
        } else {
            limits.max
        };
        let zoom = limits.clamp(zoom_w.min(zoom_h));
        Self::new(0.0, 0.0, zoom).centered_on(bounds.center(), canvas)
    }
}
