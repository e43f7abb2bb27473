pub mod breakdown;
pub mod draft_needs;
pub mod pool;
pub mod positions;
pub mod report;
pub mod score;
pub mod synergy;
pub mod win_probability;
