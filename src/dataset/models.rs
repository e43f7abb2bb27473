use crate::analysis::positions::HeroPositions;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// synergyMatrix.json: hero id (as string) -> matchup lists
pub type RawMatrix = HashMap<String, RawMatchupEntry>;

// hero-roles.json: hero id (as string) -> lane preferences
pub type RawRoleMap = HashMap<String, HeroPositions>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMatchupEntry {
    #[serde(default)]
    pub with: Vec<RawPair>,
    #[serde(default)]
    pub vs: Vec<RawPair>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPair {
    #[serde(rename = "heroId2")]
    pub hero_id2: u32,
    pub synergy: f64,
}
