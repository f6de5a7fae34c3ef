use crate::domain::model::PriceEstimate;

pub const MIN_POINTS: u64 = 4;
/// One extra staking point per this many square metres.
pub const AREA_PER_POINT: f64 = 200.0;

const LARGE_PLOT_AREA: f64 = 10_000.0;
const MEDIUM_PLOT_AREA: f64 = 5_000.0;

const LARGE_PLOT_COST: u64 = 3_500;
const MEDIUM_PLOT_COST: u64 = 4_000;
const SMALL_PLOT_COST: u64 = 4_500;

pub fn estimate(area: f64) -> PriceEstimate {
    let points_count = if area > 0.0 {
        // saturating cast; there is no upper bound on the number of points
        MIN_POINTS.max(((area / AREA_PER_POINT).floor() as u64).saturating_add(MIN_POINTS))
    } else {
        MIN_POINTS
    };

    let cost_per_point = if area > LARGE_PLOT_AREA {
        LARGE_PLOT_COST
    } else if area > MEDIUM_PLOT_AREA {
        MEDIUM_PLOT_COST
    } else {
        SMALL_PLOT_COST
    };

    PriceEstimate {
        points_count,
        cost_per_point,
        total_cost: points_count.saturating_mul(cost_per_point),
    }
}
