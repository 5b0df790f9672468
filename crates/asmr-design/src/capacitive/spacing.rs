use serde::Serialize;

use crate::error::DesignError;

/// Finger spacing of an interleaved grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Spacing {
    /// Row fingers per node, and column finger intervals per node.
    pub digits: usize,
    /// Clearance that makes `digits` fingers fill the pitch exactly.
    pub separation: f64,
    /// Distance between neighbouring column fingers.
    pub finger_pitch: f64,
}

/// Fit the largest number of finger pairs into one pitch, then stretch the separation so
/// they fill it evenly.
///
/// The solved separation is never below `target`. It satisfies
/// `pitch == digits * (xwidth + ywidth) + 2 * digits * separation`.
pub fn solve_spacing(
    pitch: f64,
    xwidth: f64,
    ywidth: f64,
    target: f64,
) -> Result<Spacing, DesignError> {
    for (name, value) in [
        ("pitch", pitch),
        ("xwidth", xwidth),
        ("ywidth", ywidth),
        ("separation", target),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(DesignError::invalid(
                name,
                format!("{value} must be a positive number"),
            ));
        }
    }

    let widths = xwidth + ywidth;
    let mut digits = 0usize;
    while pitch - digits as f64 * widths > 2.0 * digits as f64 * target {
        digits += 1;
    }
    digits -= 1;
    if digits == 0 {
        return Err(DesignError::InfeasibleSpacing {
            pitch,
            xwidth,
            ywidth,
            separation: target,
        });
    }

    let n = digits as f64;
    let separation = (pitch - n * widths) / (2.0 * n);
    Ok(Spacing {
        digits,
        separation,
        finger_pitch: widths + 2.0 * separation,
    })
}
