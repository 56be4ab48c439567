//! Plain value types shared by windows and monitors
//!
//! All coordinates are GLFW screen coordinates, all sizes are integers except
//! content scales. [`DONT_CARE`] leaks through from the native library and is
//! kept verbatim so size limits can be pushed back without translation.
//! [`ANY_POSITION`] marks an unset position; backends turn it into a centred
//! placement instead of handing it to the library.

use serde::{Deserialize, Serialize};

/// Native "no preference" value for size limits and integer hints
pub const DONT_CARE: i32 = -1;

/// Unset window position, turned into a centred placement by the backends
pub const ANY_POSITION: i32 = i32::MIN;

/// Width and height pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    /// Horizontal extent
    pub width: i32,
    /// Vertical extent
    pub height: i32,
}

impl Size {
    /// Create a new size
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Both components set to [`DONT_CARE`]
    pub const DONT_CARE: Self = Self::new(DONT_CARE, DONT_CARE);

    /// True when both components are [`DONT_CARE`]
    pub const fn is_dont_care(&self) -> bool {
        self.width == DONT_CARE && self.height == DONT_CARE
    }
}

/// Screen-space position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate
    pub x: i32,
    /// Vertical coordinate
    pub y: i32,
}

impl Position {
    /// Create a new position
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Sentinel returned by invalid windows and used to clear a position
    pub const UNSET: Self = Self::new(ANY_POSITION, ANY_POSITION);

    /// True unless this is [`Position::UNSET`]
    pub const fn is_set(&self) -> bool {
        self.x != ANY_POSITION || self.y != ANY_POSITION
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::UNSET
    }
}

/// Axis-aligned rectangle, used for monitor work areas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Top-left corner
    pub position: Position,
    /// Extent from the top-left corner
    pub size: Size,
}

impl Rect {
    /// Create a rectangle from its corner and extent
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            position: Position::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// True if `other` lies entirely inside `self`
    pub const fn contains_rect(&self, other: &Self) -> bool {
        let (outer, inner) = (self.edges(), other.edges());
        inner[0] >= outer[0] && inner[1] >= outer[1] && inner[2] <= outer[2] && inner[3] <= outer[3]
    }

    /// Top-left corner that centres `size` inside `self`
    pub const fn centered(&self, size: Size) -> Position {
        Position::new(
            self.position.x.saturating_add(self.size.width.saturating_sub(size.width) / 2),
            self.position.y.saturating_add(self.size.height.saturating_sub(size.height) / 2),
        )
    }

    /// Left, top, right and bottom edges in `i64`
    const fn edges(&self) -> [i64; 4] {
        let (x, y) = (self.position.x as i64, self.position.y as i64);
        [x, y, x + self.size.width as i64, y + self.size.height as i64]
    }
}

/// Content scale factors of a monitor
///
/// Ratio between the current DPI and the platform's default DPI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentScale {
    /// Horizontal scale
    pub x: f32,
    /// Vertical scale
    pub y: f32,
}

impl ContentScale {
    /// Create a content scale, clamping negative or NaN factors to zero
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: x.max(0.0),
            y: y.max(0.0),
        }
    }
}

impl Default for ContentScale {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

/// Size of each edge of a window frame, in screen coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameThickness {
    /// Left edge
    pub left: i32,
    /// Top edge, including the title bar
    pub top: i32,
    /// Right edge
    pub right: i32,
    /// Bottom edge
    pub bottom: i32,
}

/// Minimum and maximum content-area size of a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLimits {
    /// Minimum size, components may be [`DONT_CARE`]
    pub min: Size,
    /// Maximum size, components may be [`DONT_CARE`]
    pub max: Size,
}

impl SizeLimits {
    /// No limits at all
    pub const UNBOUNDED: Self = Self {
        min: Size::DONT_CARE,
        max: Size::DONT_CARE,
    };

    /// True when neither bound is set
    pub const fn is_unbounded(&self) -> bool {
        self.min.is_dont_care() && self.max.is_dont_care()
    }
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(Size::default(), Size::new(0, 0));
        assert_eq!(Position::default(), Position::UNSET);
        assert!(!Position::default().is_set());
        assert!(SizeLimits::default().is_unbounded());
    }

    #[test]
    fn test_content_scale_never_negative() {
        let scale = ContentScale::new(-1.5, 2.0);
        assert_eq!(scale.x, 0.0);
        assert_eq!(scale.y, 2.0);

        let scale = ContentScale::new(f32::NAN, 1.0);
        assert_eq!(scale.x, 0.0);
    }

    #[test]
    fn test_rect_containment() {
        let monitor = Rect::new(1920, 0, 2560, 1440);
        assert!(monitor.contains_rect(&Rect::new(1920, 0, 2560, 1400)));
        assert!(!monitor.contains_rect(&Rect::new(0, 0, 2560, 1440)));
        assert!(!monitor.contains_rect(&Rect::new(1920, 40, 2560, 1440)));
    }

    #[test]
    fn test_rect_containment_at_coordinate_limits() {
        let far = Rect::new(i32::MAX - 10, i32::MAX - 10, i32::MAX, i32::MAX);
        assert!(far.contains_rect(&Rect::new(i32::MAX - 5, i32::MAX - 5, 100, 100)));
        assert!(!Rect::new(0, 0, 100, 100).contains_rect(&far));
    }

    #[test]
    fn test_centering_inside_work_area() {
        let area = Rect::new(1920, 20, 2560, 1400);
        assert_eq!(area.centered(Size::new(560, 400)), Position::new(2920, 520));
        // Oversized content hangs over the top-left edge
        assert_eq!(area.centered(Size::new(2760, 1400)), Position::new(1820, 20));
    }
}
