// Axis-aligned boxes shared by rendering placement and hit checks.

/// Axis-aligned rectangle anchored at its top-left corner.
///
/// A box spans `[x, x + width)` horizontally and `[y, y + height)` vertically, so two boxes
/// that only share an edge do not overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// Visible play area, fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub width: u32,
    pub height: u32,
}

impl Stage {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True once the box sits entirely above the top edge or below the bottom edge.
    pub fn has_left_vertically(&self, b: &Bounds) -> bool {
        b.bottom() <= 0.0 || b.y >= self.height as f32
    }
}

/// Half-open rectangle overlap test used by every collision pass.
pub fn overlaps(a: &Bounds, b: &Bounds) -> bool {
    a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn identical_boxes_overlap() {
        let a = Bounds::new(200.0, 300.0, 26.0, 37.0);
        assert!(overlaps(&a, &a));
    }

    #[test]
    fn boxes_sharing_only_an_edge_do_not_overlap() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let right = Bounds::new(10.0, 0.0, 10.0, 10.0);
        let below = Bounds::new(0.0, 10.0, 10.0, 10.0);
        let corner = Bounds::new(10.0, 10.0, 10.0, 10.0);

        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&right, &a));
        assert!(!overlaps(&a, &below));
        assert!(!overlaps(&below, &a));
        assert!(!overlaps(&a, &corner));
    }

    #[test]
    fn one_unit_inside_the_edge_overlaps() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::new(9.0, 9.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));
    }

    #[test]
    fn containment_overlaps_both_ways() {
        let enemy = Bounds::new(100.0, 100.0, 217.0, 263.0);
        let shot = Bounds::new(150.0, 200.0, 26.0, 37.0);
        assert!(overlaps(&enemy, &shot));
        assert!(overlaps(&shot, &enemy));
    }

    #[test]
    fn overlap_is_symmetric_for_random_boxes() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..5_000 {
            // Integer-valued coordinates make edge contact common.
            let a = Bounds::new(
                rng.gen_range(-20..20) as f32,
                rng.gen_range(-20..20) as f32,
                rng.gen_range(1..15) as f32,
                rng.gen_range(1..15) as f32,
            );
            let b = Bounds::new(
                rng.gen_range(-20..20) as f32,
                rng.gen_range(-20..20) as f32,
                rng.gen_range(1..15) as f32,
                rng.gen_range(1..15) as f32,
            );
            assert_eq!(overlaps(&a, &b), overlaps(&b, &a), "a={a:?} b={b:?}");
        }
    }

    #[test]
    fn stage_reports_boxes_fully_outside() {
        let stage = Stage::new(500, 800);
        assert!(stage.has_left_vertically(&Bounds::new(0.0, -37.0, 26.0, 37.0)));
        assert!(!stage.has_left_vertically(&Bounds::new(0.0, -36.0, 26.0, 37.0)));
        assert!(stage.has_left_vertically(&Bounds::new(0.0, 800.0, 26.0, 37.0)));
        assert!(!stage.has_left_vertically(&Bounds::new(0.0, 799.0, 26.0, 37.0)));
    }
}
