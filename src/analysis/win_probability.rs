use serde::Serialize;

const MAX_WIN_RATE: f64 = 80.0;
const MIN_WIN_RATE: f64 = 20.0;
const GROWTH_RATE: f64 = 0.025;

/// Maps a team score delta (ally minus enemy) to an ally win percentage.
///
/// `50 + 30 * tanh(delta * 0.025)`, kept inside [20, 80] so matchup data alone
/// never claims more certainty than it has.
pub fn win_probability(delta: f64) -> f64 {
    if delta.is_nan() {
        return 50.0;
    }

    let probability = 50.0 + (MAX_WIN_RATE - 50.0) * (delta * GROWTH_RATE).tanh();
    probability.clamp(MIN_WIN_RATE, MAX_WIN_RATE)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WinProbability {
    pub ally: f64,
    pub enemy: f64,
}

impl WinProbability {
    pub fn from_totals(ally_total: f64, enemy_total: f64) -> Self {
        let ally = win_probability(ally_total - enemy_total);
        // Derived, so the pair always sums to 100
        WinProbability {
            ally,
            enemy: 100.0 - ally,
        }
    }
}
