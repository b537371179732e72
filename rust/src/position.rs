//! Mapping of time ranges and lane data to pixel geometry.

use crate::config::LayoutConfig;
use crate::models::{Geometry, HorizontalPlacement};

/// Vertical geometry of `[start, end)` on the time axis.
///
/// `top` is measured from the grid's first displayed minute and shifted down
/// by the header chrome; `height` depends only on the duration.
pub fn vertical_geometry(start: u16, end: u16, config: &LayoutConfig) -> Geometry {
    let ppm = config.pixels_per_minute();
    let offset = start as f64 - config.day_start_minutes as f64;
    Geometry {
        top: offset * ppm + config.header_offset_px,
        height: (end as f64 - start as f64) * ppm,
    }
}

/// Horizontal position of a column within a resource track.
///
/// Once the gaps alone exceed the track width, columns collapse to zero
/// width instead of going negative.
pub fn horizontal_placement(
    column_index: usize,
    lane_count: usize,
    config: &LayoutConfig,
) -> HorizontalPlacement {
    debug_assert!(column_index < lane_count);
    let lanes = lane_count.max(1) as f64;
    let width = ((config.track_width_px - (lanes - 1.0) * config.gap_px) / lanes).max(0.0);
    HorizontalPlacement {
        left: config.track_base_left_px + column_index as f64 * (width + config.gap_px),
        width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> LayoutConfig {
        LayoutConfig {
            slot_height_px: 60.0,
            slot_minutes: 30,
            day_start_minutes: 480,
            header_offset_px: 0.0,
            track_width_px: 202.0,
            gap_px: 2.0,
            track_base_left_px: 50.0,
            ..LayoutConfig::default()
        }
    }

    #[test]
    fn test_reference_geometry() {
        // 09:00-10:00 at 2 px/min from 08:00
        let g = vertical_geometry(540, 600, &grid());
        assert_eq!(g.top, 120.0);
        assert_eq!(g.height, 120.0);
    }

    #[test]
    fn test_header_offset_shifts_top_only() {
        let config = LayoutConfig {
            header_offset_px: 32.0,
            ..grid()
        };
        let g = vertical_geometry(540, 600, &config);
        assert_eq!(g.top, 152.0);
        assert_eq!(g.height, 120.0);
    }

    #[test]
    fn test_height_is_linear_in_duration() {
        let config = grid();
        let unit = vertical_geometry(600, 601, &config).height;
        for minutes in [5u16, 15, 45, 90, 240] {
            let g = vertical_geometry(600, 600 + minutes, &config);
            assert_eq!(g.height, unit * minutes as f64);
        }
    }

    #[test]
    fn test_width_never_negative() {
        let config = LayoutConfig {
            track_width_px: 200.0,
            gap_px: 2.0,
            track_base_left_px: 0.0,
            ..LayoutConfig::default()
        };
        let last = horizontal_placement(119, 120, &config);
        assert_eq!(last.width, 0.0);
        assert_eq!(last.left, 119.0 * 2.0);
        assert!(horizontal_placement(0, 101, &config).width >= 0.0);
    }

    #[test]
    fn test_horizontal_split() {
        let config = grid();
        let single = horizontal_placement(0, 1, &config);
        assert_eq!(single.left, 50.0);
        assert_eq!(single.width, 202.0);

        let first = horizontal_placement(0, 2, &config);
        let second = horizontal_placement(1, 2, &config);
        assert_eq!(first.width, 100.0);
        assert_eq!(first.left, 50.0);
        assert_eq!(second.left, 152.0);
        assert_eq!(second.left + second.width, 252.0);
    }
}
