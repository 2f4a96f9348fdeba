//! Design tokens for Craftlink
//!
//! Spacing, sizing, radius, shadow and layering values used by the bottom
//! bar and the slide-up drawer.

use serde::{Deserialize, Serialize};

// =============================================================================
// Spacing Tokens
// =============================================================================

/// Spacing scale in pixels (4px base unit)
pub mod spacing {
    /// 4px - Extra small
    pub const SPACE_XS: f32 = 4.0;
    /// 8px - Small
    pub const SPACE_SM: f32 = 8.0;
    /// 12px - Medium
    pub const SPACE_MD: f32 = 12.0;
    /// 16px - Large
    pub const SPACE_LG: f32 = 16.0;
    /// 24px - 2x large
    pub const SPACE_2XL: f32 = 24.0;
}

// =============================================================================
// Sizing Tokens
// =============================================================================

/// Component sizes
pub mod sizing {
    /// Icon sizes
    pub mod icon {
        /// Drawer row icon
        pub const MD: f32 = 20.0;
        /// Bottom bar icon
        pub const LG: f32 = 24.0;
    }

    /// Avatar sizes
    pub mod avatar {
        /// Drawer header avatar
        pub const MD: f32 = 48.0;
    }

    /// Bottom bar
    pub mod bottom_bar {
        /// Bar height without safe area
        pub const HEIGHT: f32 = 56.0;
        /// Minimum bottom padding
        pub const MIN_SAFE_AREA: f32 = 8.0;
    }

    /// Drawer panel
    pub mod drawer {
        /// Drag handle width
        pub const HANDLE_WIDTH: f32 = 40.0;
        /// Drag handle height
        pub const HANDLE_HEIGHT: f32 = 4.0;
        /// Height of one entry row
        pub const ROW_HEIGHT: f32 = 52.0;
        /// Header height (avatar plus name)
        pub const HEADER_HEIGHT: f32 = 80.0;
        /// Largest share of the screen the panel may cover
        pub const MAX_SCREEN_FRACTION: f32 = 0.85;
    }
}

// =============================================================================
// Border Radius Tokens
// =============================================================================

/// Border radius values
pub mod radius {
    /// Small radius (4px)
    pub const SM: f32 = 4.0;
    /// Extra large radius (16px)
    pub const XL: f32 = 16.0;
    /// Full radius (pill/circle)
    pub const FULL: f32 = 9999.0;
}

// =============================================================================
// Shadow Tokens
// =============================================================================

/// Shadow definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    /// Horizontal offset
    pub offset_x: f32,
    /// Vertical offset
    pub offset_y: f32,
    /// Blur radius
    pub blur: f32,
    /// Spread radius
    pub spread: f32,
    /// Shadow color (with alpha)
    pub color: String,
}

impl Shadow {
    /// Create a new shadow
    pub fn new(offset_x: f32, offset_y: f32, blur: f32, spread: f32, color: &str) -> Self {
        Self {
            offset_x,
            offset_y,
            blur,
            spread,
            color: color.to_string(),
        }
    }
}

/// Predefined shadow styles
pub mod shadows {
    use super::Shadow;

    /// Bottom bar shadow, cast upwards
    pub fn bar() -> Shadow {
        Shadow::new(0.0, -1.0, 4.0, 0.0, "rgba(0, 0, 0, 0.08)")
    }

    /// Drawer panel shadow, cast upwards
    pub fn panel() -> Shadow {
        Shadow::new(0.0, -4.0, 16.0, 0.0, "rgba(0, 0, 0, 0.16)")
    }
}

// =============================================================================
// Z-Index Tokens
// =============================================================================

/// Z-index layers
pub mod z_index {
    /// Screen content
    pub const DEFAULT: i32 = 0;
    /// Bottom bar
    pub const BOTTOM_BAR: i32 = 30;
    /// Drawer backdrop
    pub const BACKDROP: i32 = 40;
    /// Drawer panel
    pub const DRAWER: i32 = 50;
}
