pub struct StatsHelper;

impl StatsHelper {
    pub fn mean_pair(a: f64, b: f64) -> f64 {
        (a + b) / 2.0
    }

    /// Rounds the exact binary value of `value` to `decimals` places; exact
    /// ties go to the even digit.
    pub fn round_to(value: f64, decimals: i32) -> f64 {
        let factor = 10f64.powi(decimals);
        let scaled = value * factor;
        // What the multiplication rounded away. Settles products that only
        // land on a .5 after rounding.
        let residue = value.mul_add(factor, -scaled);
        let floor = scaled.floor();
        let rounded = if scaled - floor == 0.5 {
            if residue > 0.0 {
                floor + 1.0
            } else if residue < 0.0 {
                floor
            } else {
                scaled.round_ties_even()
            }
        } else {
            scaled.round()
        };
        rounded / factor
    }

    pub fn round2(value: f64) -> f64 {
        Self::round_to(value, 2)
    }
}
