use asmr_design::capacitive::solve_spacing;
use asmr_design::{CapacitiveGrid, GridConfig, GridPattern};
use asmr_export::group_shapes;
use proptest::prelude::*;

proptest! {
    #[test]
    fn solved_spacing_fills_the_pitch_exactly(
        pitch in 2.0f64..20.0,
        xwidth in 0.1f64..1.0,
        ywidth in 0.1f64..1.0,
        target in 0.1f64..0.6,
    ) {
        match solve_spacing(pitch, xwidth, ywidth, target) {
            Ok(s) => {
                prop_assert!(s.digits >= 1);
                prop_assert!(s.separation >= target - 1e-12);
                let total = s.digits as f64 * (xwidth + ywidth) + 2.0 * s.digits as f64 * s.separation;
                prop_assert!((total - pitch).abs() < 1e-9, "{} != {}", total, pitch);
            }
            Err(e) => {
                // Only possible when a single finger pair does not fit.
                prop_assert!(pitch - (xwidth + ywidth) <= 2.0 * target, "{}", e);
            }
        }
    }

    #[test]
    fn electrode_groups_match_pad_count(
        cols in 1usize..6,
        rows in 1usize..6,
        xres in 1usize..4,
        yres in 1usize..4,
        diamond in any::<bool>(),
    ) {
        let config = GridConfig {
            size: (cols, rows),
            resolution: (xres, yres),
            ..GridConfig::default()
        };
        let pattern = if diamond { GridPattern::Diamond } else { GridPattern::Interleaved };
        let grid = CapacitiveGrid::build(pattern, config).unwrap();
        let shapes = grid.layers().electrodes.shapes();
        prop_assert!(shapes.iter().all(|s| s.group().is_some()));
        let groups = group_shapes(shapes);
        prop_assert_eq!(groups.len(), cols.div_ceil(xres) + rows.div_ceil(yres));
    }
}
