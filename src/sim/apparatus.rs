//! The closed set of playground apparatuses and their law table

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::energy::EnergyFrame;
use super::laws;
use super::pose::PoseFrame;
use crate::content::{self, ApparatusInfo};
use crate::error::SimError;

/// A playground apparatus. Declaration order is the navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Apparatus {
    Swing,
    Seesaw,
    Slide,
    Roundabout,
    Climber,
}

/// How one apparatus behaves and what its page says.
///
/// Laws take the normalized control in (0, 1] and elapsed seconds.
pub struct ApparatusLaw {
    pub energy: fn(f32, f32) -> EnergyFrame,
    pub pose: fn(f32, f32) -> PoseFrame,
    /// Loss shown before anything has been put in (control 0)
    pub rest_loss: f32,
    pub info: &'static ApparatusInfo,
}

/// Indexed by `Apparatus as usize`
static LAW_TABLE: [ApparatusLaw; 5] = [
    ApparatusLaw {
        energy: laws::swing_energy,
        pose: laws::swing_pose,
        rest_loss: laws::SWING_LOSS,
        info: &content::SWING,
    },
    ApparatusLaw {
        energy: laws::seesaw_energy,
        pose: laws::seesaw_pose,
        rest_loss: laws::SEESAW_LOSS,
        info: &content::SEESAW,
    },
    ApparatusLaw {
        energy: laws::slide_energy,
        pose: laws::slide_pose,
        rest_loss: 0.0,
        info: &content::SLIDE,
    },
    ApparatusLaw {
        energy: laws::roundabout_energy,
        pose: laws::roundabout_pose,
        rest_loss: 0.0,
        info: &content::ROUNDABOUT,
    },
    ApparatusLaw {
        energy: laws::climber_energy,
        pose: laws::climber_pose,
        rest_loss: 0.0,
        info: &content::CLIMBER,
    },
];

impl Apparatus {
    /// Every apparatus, in navigation order
    pub const ALL: [Apparatus; 5] = [
        Apparatus::Swing,
        Apparatus::Seesaw,
        Apparatus::Slide,
        Apparatus::Roundabout,
        Apparatus::Climber,
    ];

    /// Identifier used in markup and storage
    pub fn id(self) -> &'static str {
        match self {
            Apparatus::Swing => "swing",
            Apparatus::Seesaw => "seesaw",
            Apparatus::Slide => "slide",
            Apparatus::Roundabout => "roundabout",
            Apparatus::Climber => "climber",
        }
    }

    /// Parse an identifier. Anything outside the closed set is an error.
    pub fn from_id(id: &str) -> Result<Self, SimError> {
        Self::ALL
            .into_iter()
            .find(|a| a.id() == id.trim())
            .ok_or_else(|| SimError::UnknownApparatus(id.to_string()))
    }

    pub fn law(self) -> &'static ApparatusLaw {
        &LAW_TABLE[self as usize]
    }

    pub fn info(self) -> &'static ApparatusInfo {
        self.law().info
    }

    /// Next apparatus in navigation order (wraps)
    pub fn next(self) -> Self {
        Self::ALL[(self as usize + 1) % Self::ALL.len()]
    }

    /// Previous apparatus in navigation order (wraps)
    pub fn prev(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self as usize + len - 1) % len]
    }
}

impl FromStr for Apparatus {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s)
    }
}

impl fmt::Display for Apparatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
