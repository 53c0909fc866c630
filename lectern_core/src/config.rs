// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inspector layout and animation configuration.

use kurbo::Point;

use crate::paint::Color;
use crate::time::Timebase;

/// Number of entries in the default foldout color palette.
pub const PALETTE_LEN: usize = 4;

/// Configuration for the [`Inspector`](crate::inspector::Inspector).
#[derive(Clone, Copy, Debug)]
pub struct InspectorConfig {
    /// Height of one standard control row.
    pub row_height: f64,
    /// Vertical gap added after every row that consumed a non-zero height.
    pub row_spacing: f64,
    /// Width reserved for field labels on the left of each control row.
    pub label_width: f64,
    /// Foldout fade speed in progress units per second. A value of `2.0`
    /// collapses a fully open group in half a second; `f64::INFINITY`
    /// toggles instantly.
    pub fade_speed: f64,
    /// Where measurement passes place their cursor. Anything drawn there is
    /// discarded anyway, the position only needs to be far from real content.
    pub measure_origin: Point,
    /// Width used when measuring a field that has never been painted.
    pub measure_width: f64,
    /// Converts [`HostTime`](crate::time::HostTime) ticks to seconds.
    pub timebase: Timebase,
    /// Background colors used for foldout regions without an explicit color,
    /// indexed by nesting depth.
    pub group_palette: [Color; PALETTE_LEN],
}

impl InspectorConfig {
    /// Default configuration for desktop inspectors.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            row_height: 18.0,
            row_spacing: 2.0,
            label_width: 120.0,
            fade_speed: 4.0,
            measure_origin: Point::new(-32_768.0, -32_768.0),
            measure_width: 320.0,
            timebase: Timebase::NANOS,
            group_palette: [
                Color::rgba8(0x3c, 0x3c, 0x46, 0xff),
                Color::rgba8(0x46, 0x3c, 0x3c, 0xff),
                Color::rgba8(0x3c, 0x46, 0x3c, 0xff),
                Color::rgba8(0x46, 0x46, 0x3c, 0xff),
            ],
        }
    }

    /// Tighter rows for dense inspectors.
    #[must_use]
    pub const fn compact() -> Self {
        let mut config = Self::standard();
        config.row_height = 16.0;
        config.row_spacing = 1.0;
        config.label_width = 96.0;
        config
    }

    /// Vertical advance of one standard row, including its spacing.
    #[must_use]
    pub fn line_advance(&self) -> f64 {
        self.row_height + self.row_spacing
    }

    /// Returns the palette color for a foldout region at `depth`.
    #[must_use]
    pub fn palette_color(&self, depth: usize) -> Color {
        self.group_palette[depth % PALETTE_LEN]
    }
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_is_denser_than_standard() {
        let standard = InspectorConfig::standard();
        let compact = InspectorConfig::compact();
        assert!(
            compact.line_advance() < standard.line_advance(),
            "compact rows should advance less"
        );
        assert_eq!(standard.line_advance(), 20.0);
    }

    #[test]
    fn palette_wraps_by_depth() {
        let config = InspectorConfig::standard();
        assert_eq!(config.palette_color(0), config.palette_color(PALETTE_LEN));
        assert_ne!(config.palette_color(0), config.palette_color(1));
    }
}
