use asmr_core::{Cutoff, Diamond, DiamondParams, HatchPattern, Point};
use proptest::prelude::*;

fn cutoff_from(i: u8) -> Cutoff {
    match i % 5 {
        0 => Cutoff::None,
        1 => Cutoff::Top,
        2 => Cutoff::Right,
        3 => Cutoff::Bottom,
        _ => Cutoff::Left,
    }
}

proptest! {
    #[test]
    fn hatch_count_matches_fill_formula(
        diagonal in 2.0f64..20.0,
        stroke in 0.05f64..0.5,
        fill in 0.01f64..0.99,
        cutoff in 0u8..5,
    ) {
        let d = Diamond::new(DiamondParams {
            origin: Point::new(20.0, 20.0),
            diagonal,
            fill,
            stroke_width: stroke,
            pattern: HatchPattern::Forward,
            cutoff: cutoff_from(cutoff),
            ..DiamondParams::default()
        }).unwrap();

        let n = (d.side_length() / stroke * fill).floor() as usize;
        prop_assert_eq!(d.fill_lines().len(), n.saturating_sub(1));
    }

    #[test]
    fn hatch_lines_carry_the_diamond_group(
        fill in 0.2f64..0.9,
    ) {
        let d = Diamond::new(DiamondParams {
            origin: Point::new(5.0, 0.0),
            diagonal: 10.0,
            fill,
            stroke_width: 0.25,
            pattern: HatchPattern::Cross,
            group: Some("3".to_string()),
            ..DiamondParams::default()
        }).unwrap();

        for line in d.fill_lines() {
            prop_assert_eq!(line.group.as_deref(), Some("3"));
            prop_assert_eq!(line.width, 0.25);
        }
    }
}

#[test]
fn whole_fills_never_hatch() {
    for fill in [0.0, 1.0] {
        let d = Diamond::new(DiamondParams {
            diagonal: 10.0,
            fill,
            stroke_width: 0.1,
            ..DiamondParams::default()
        })
        .unwrap();
        assert!(d.fill_lines().is_empty());
    }
}
