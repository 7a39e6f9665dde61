// spline.rs - Catmull-Rom paths for the vine tubes

use glam::Vec3;

/// Sample a uniform Catmull-Rom curve through `points` at `samples + 1`
/// evenly spaced parameters (endpoints included). Ends are clamped by
/// repeating the first and last control point.
pub fn catmull_rom(points: &[Vec3], samples: usize) -> Vec<Vec3> {
    match points.len() {
        0 => return Vec::new(),
        1 => return vec![points[0]; samples + 1],
        _ => {}
    }
    let segments = points.len() - 1;
    let at = |i: isize| points[i.clamp(0, segments as isize) as usize];

    (0..=samples)
        .map(|s| {
            let u = s as f32 / samples.max(1) as f32 * segments as f32;
            let i = (u.floor() as usize).min(segments - 1);
            let t = u - i as f32;
            let i = i as isize;
            segment(at(i - 1), at(i), at(i + 1), at(i + 2), t)
        })
        .collect()
}

#[inline]
fn segment(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_through_control_points() {
        let pts = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 2.0, -2.0),
            Vec3::new(3.0, 1.0, -4.0),
        ];
        let out = catmull_rom(&pts, 4);
        assert_eq!(out.len(), 5);
        assert!(out[0].abs_diff_eq(pts[0], 1e-5));
        assert!(out[2].abs_diff_eq(pts[1], 1e-5));
        assert!(out[4].abs_diff_eq(pts[2], 1e-5));
    }

    #[test]
    fn degenerate_inputs() {
        assert!(catmull_rom(&[], 8).is_empty());
        assert_eq!(catmull_rom(&[Vec3::ONE], 2), vec![Vec3::ONE; 3]);
    }
}
