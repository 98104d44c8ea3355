use gnss::prelude::Constellation;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Constellation of a tracked satellite, as reported by the receiver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConstellationType {
    /// Not reported, or legacy sentence input
    #[default]
    Unknown,
    GPS,
    SBAS,
    Glonass,
    QZSS,
    BeiDou,
    Galileo,
}

impl From<u8> for ConstellationType {
    /// Decodes the wire value. Values outside of the known range
    /// decode to [ConstellationType::Unknown].
    fn from(value: u8) -> Self {
        match value {
            1 => Self::GPS,
            2 => Self::SBAS,
            3 => Self::Glonass,
            4 => Self::QZSS,
            5 => Self::BeiDou,
            6 => Self::Galileo,
            _ => Self::Unknown,
        }
    }
}

impl From<ConstellationType> for u8 {
    fn from(value: ConstellationType) -> Self {
        match value {
            ConstellationType::Unknown => 0,
            ConstellationType::GPS => 1,
            ConstellationType::SBAS => 2,
            ConstellationType::Glonass => 3,
            ConstellationType::QZSS => 4,
            ConstellationType::BeiDou => 5,
            ConstellationType::Galileo => 6,
        }
    }
}

impl ConstellationType {
    /// Returns the matching [Constellation], if known.
    pub fn constellation(&self) -> Option<Constellation> {
        match self {
            Self::Unknown => None,
            Self::GPS => Some(Constellation::GPS),
            Self::SBAS => Some(Constellation::SBAS),
            Self::Glonass => Some(Constellation::Glonass),
            Self::QZSS => Some(Constellation::QZSS),
            Self::BeiDou => Some(Constellation::BeiDou),
            Self::Galileo => Some(Constellation::Galileo),
        }
    }
}

impl std::fmt::Display for ConstellationType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        match self {
            Self::Unknown => write!(f, "Unknown"),
            Self::GPS => write!(f, "GPS"),
            Self::SBAS => write!(f, "SBAS"),
            Self::Glonass => write!(f, "Glonass"),
            Self::QZSS => write!(f, "QZSS"),
            Self::BeiDou => write!(f, "BeiDou"),
            Self::Galileo => write!(f, "Galileo"),
        }
    }
}
