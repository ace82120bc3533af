//! Upgrade catalog
//!
//! Three evolution paths, one option per path per level from 2 to 5.
//! Level 2 offers every path starter; later levels only offer the option on
//! the player's locked path.

use serde::{Deserialize, Serialize};

use super::entity::Color;

/// Upgrade branch, locked in by the first upgrade choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EvolutionPath {
    #[default]
    Subatomic,
    Stellar,
    Spacetime,
}

impl EvolutionPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvolutionPath::Subatomic => "Subatomic",
            EvolutionPath::Stellar => "Stellar",
            EvolutionPath::Spacetime => "Spacetime",
        }
    }
}

/// Player stat an upgrade modifies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatKind {
    Health,
    Speed,
    Size,
    Damage,
    Reload,
    /// Anything else; ignored when applied
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UpgradeStat {
    pub stat: StatKind,
    pub value: f32,
}

/// One selectable evolution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradeOption {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub level: u32,
    pub path: EvolutionPath,
    pub color: Color,
    pub stats: &'static [UpgradeStat],
}

mod colors {
    use super::Color;

    pub const ELECTRON: Color = Color::rgb(0x8a2be2);
    pub const QUARK: Color = Color::rgb(0xff6347);
    pub const ATOM: Color = Color::rgb(0x4682b4);
    pub const MOLECULE: Color = Color::rgb(0x32cd32);
    pub const HYDROGEN: Color = Color::rgb(0x87cefa);
    pub const STAR: Color = Color::rgb(0xffd700);
    pub const NEUTRON_STAR: Color = Color::rgb(0x00ffff);
    pub const BLACK_HOLE: Color = Color::rgb(0x000000);
    pub const QUANTUM_FLUCTUATION: Color = Color::rgb(0xda70d6);
    pub const WORMHOLE: Color = Color::rgb(0x9370db);
    pub const TIME_DISTORTION: Color = Color::rgb(0xff00ff);
}

/// Colour the player starts with
pub const STARTING_COLOR: Color = colors::ELECTRON;

const fn stat(stat: StatKind, value: f32) -> UpgradeStat {
    UpgradeStat { stat, value }
}

use EvolutionPath::*;
use StatKind::*;

static ALL_UPGRADES: [UpgradeOption; 12] = [
    // Level 2: path starters
    UpgradeOption {
        id: "electron",
        name: "Electron",
        description: "Fast and agile subatomic particle with negative charge",
        level: 2,
        path: Subatomic,
        color: colors::ELECTRON,
        stats: &[stat(Speed, 50.0), stat(Reload, 10.0), stat(Size, 2.0)],
    },
    UpgradeOption {
        id: "hydrogen",
        name: "Hydrogen Cloud",
        description: "Primordial gas that forms stars",
        level: 2,
        path: Stellar,
        color: colors::HYDROGEN,
        stats: &[stat(Health, 30.0), stat(Size, 5.0), stat(Damage, 5.0)],
    },
    UpgradeOption {
        id: "quantum_fluctuation",
        name: "Quantum Fluctuation",
        description: "Unpredictable energy that bends spacetime",
        level: 2,
        path: Spacetime,
        color: colors::QUANTUM_FLUCTUATION,
        stats: &[stat(Speed, 25.0), stat(Damage, 10.0), stat(Reload, 5.0)],
    },
    // Level 3
    UpgradeOption {
        id: "quark",
        name: "Quark",
        description: "Fundamental constituent of matter",
        level: 3,
        path: Subatomic,
        color: colors::QUARK,
        stats: &[stat(Damage, 15.0), stat(Speed, 20.0), stat(Reload, 15.0)],
    },
    UpgradeOption {
        id: "star",
        name: "Star",
        description: "Massive, luminous sphere of plasma",
        level: 3,
        path: Stellar,
        color: colors::STAR,
        stats: &[stat(Health, 50.0), stat(Size, 10.0), stat(Damage, 20.0)],
    },
    UpgradeOption {
        id: "wormhole",
        name: "Wormhole",
        description: "Connection between different points in spacetime",
        level: 3,
        path: Spacetime,
        color: colors::WORMHOLE,
        stats: &[stat(Speed, 40.0), stat(Reload, 20.0), stat(Damage, 10.0)],
    },
    // Level 4
    UpgradeOption {
        id: "atom",
        name: "Atom",
        description: "Basic unit of matter with balanced charges",
        level: 4,
        path: Subatomic,
        color: colors::ATOM,
        stats: &[stat(Health, 40.0), stat(Damage, 20.0), stat(Size, 5.0)],
    },
    UpgradeOption {
        id: "neutron_star",
        name: "Neutron Star",
        description: "Extremely dense remnant of a massive star",
        level: 4,
        path: Stellar,
        color: colors::NEUTRON_STAR,
        // Smaller but heavier hitting
        stats: &[stat(Health, 80.0), stat(Damage, 30.0), stat(Size, -5.0)],
    },
    UpgradeOption {
        id: "time_distortion",
        name: "Time Distortion",
        description: "Manipulation of the flow of time",
        level: 4,
        path: Spacetime,
        color: colors::TIME_DISTORTION,
        stats: &[stat(Speed, 30.0), stat(Reload, 25.0), stat(Damage, 20.0)],
    },
    // Level 5: final forms
    UpgradeOption {
        id: "molecule",
        name: "Complex Molecule",
        description: "Stable arrangement of atoms forming complex structures",
        level: 5,
        path: Subatomic,
        color: colors::MOLECULE,
        stats: &[
            stat(Health, 60.0),
            stat(Damage, 25.0),
            stat(Size, 10.0),
            stat(Reload, 10.0),
        ],
    },
    UpgradeOption {
        id: "black_hole",
        name: "Black Hole",
        description: "Region of spacetime with gravitational pull so strong nothing can escape",
        level: 5,
        path: Stellar,
        color: colors::BLACK_HOLE,
        stats: &[
            stat(Health, 100.0),
            stat(Damage, 40.0),
            stat(Size, 15.0),
            stat(Speed, -20.0),
        ],
    },
    UpgradeOption {
        id: "cosmic_string",
        name: "Cosmic String",
        description: "One-dimensional defect in the fabric of spacetime",
        level: 5,
        path: Spacetime,
        color: colors::TIME_DISTORTION,
        stats: &[
            stat(Speed, 50.0),
            stat(Reload, 30.0),
            stat(Damage, 30.0),
            stat(Health, 40.0),
        ],
    },
];

/// Options offered on reaching `level`.
///
/// Level 2 ignores `path` and returns every starter. Above that, options must
/// match both the level and the path (when one is given). An empty result
/// means the level-up carries no choice.
pub fn upgrades_for_level(level: u32, path: Option<EvolutionPath>) -> Vec<UpgradeOption> {
    ALL_UPGRADES
        .iter()
        .filter(|u| u.level == level)
        .filter(|u| level == 2 || path.is_none_or(|p| u.path == p))
        .cloned()
        .collect()
}

/// Look up a catalog entry by id
pub fn find_upgrade(id: &str) -> Option<&'static UpgradeOption> {
    ALL_UPGRADES.iter().find(|u| u.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_two_offers_every_path() {
        for path in [None, Some(Stellar), Some(Spacetime)] {
            let options = upgrades_for_level(2, path);
            assert_eq!(options.len(), 3);
            let paths: Vec<_> = options.iter().map(|o| o.path).collect();
            assert!(paths.contains(&Subatomic));
            assert!(paths.contains(&Stellar));
            assert!(paths.contains(&Spacetime));
        }
    }

    #[test]
    fn later_levels_follow_locked_path() {
        let options = upgrades_for_level(4, Some(Stellar));
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].id, "neutron_star");
    }

    #[test]
    fn levels_without_options_are_empty() {
        assert!(upgrades_for_level(1, Some(Subatomic)).is_empty());
        assert!(upgrades_for_level(6, Some(Subatomic)).is_empty());
    }

    #[test]
    fn find_by_id() {
        assert_eq!(find_upgrade("quark").map(|u| u.level), Some(3));
        assert!(find_upgrade("nope").is_none());
    }
}
