use crate::character::EntityId;

/// What a strike did.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrikeOutcome {
    /// The attacker could not strike (exhausted, dead or unknown).
    Blocked,
    /// No valid victim in the strike zone.
    Whiff,
    Hit {
        victim: EntityId,
        damage: f32,
        /// The hit took the victim's last health point.
        killed: bool,
    },
    Parried {
        victim: EntityId,
    },
    PerfectParry {
        victim: EntityId,
        /// Everyone caught by the counter-riposte, attacker included.
        riposted: Vec<EntityId>,
    },
}

impl StrikeOutcome {
    /// Who received the strike, if anyone.
    pub fn victim(&self) -> Option<EntityId> {
        match self {
            Self::Hit { victim, .. } | Self::Parried { victim } | Self::PerfectParry { victim, .. } => Some(*victim),
            Self::Blocked | Self::Whiff => None,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }

    pub fn is_parry(&self) -> bool {
        matches!(self, Self::Parried { .. } | Self::PerfectParry { .. })
    }
}
