use geo::Point;
use serde::{Deserialize, Serialize};

use crate::{Minutes, Money, NodeIdx};

/// Transit mode of an edge, and of the services calling at a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    RailRapidTransit,
    LightRail,
    BusRapidTransit,
    WalkingTransfer,
}

impl Mode {
    pub const ALL: [Self; 4] = [
        Self::RailRapidTransit,
        Self::LightRail,
        Self::BusRapidTransit,
        Self::WalkingTransfer,
    ];

    /// Parse the literal used in fact objects; `None` for anything outside
    /// the closed vocabulary
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "rail-rapid-transit" => Some(Self::RailRapidTransit),
            "light-rail" => Some(Self::LightRail),
            "bus-rapid-transit" => Some(Self::BusRapidTransit),
            "walking-transfer" => Some(Self::WalkingTransfer),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RailRapidTransit => "rail-rapid-transit",
            Self::LightRail => "light-rail",
            Self::BusRapidTransit => "bus-rapid-transit",
            Self::WalkingTransfer => "walking-transfer",
        }
    }

    /// Only walking transfers carry the transfer penalty
    pub const fn is_transfer(self) -> bool {
        matches!(self, Self::WalkingTransfer)
    }

    const fn bit(self) -> u8 {
        match self {
            Self::RailRapidTransit => 1,
            Self::LightRail => 1 << 1,
            Self::BusRapidTransit => 1 << 2,
            Self::WalkingTransfer => 1 << 3,
        }
    }
}

/// Compact set of [`Mode`]s
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeSet(u8);

impl ModeSet {
    pub fn insert(&mut self, mode: Mode) {
        self.0 |= mode.bit();
    }

    pub fn contains(self, mode: Mode) -> bool {
        self.0 & mode.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn iter(self) -> impl Iterator<Item = Mode> {
        Mode::ALL.into_iter().filter(move |m| self.contains(*m))
    }
}

impl FromIterator<Mode> for ModeSet {
    fn from_iter<I: IntoIterator<Item = Mode>>(iter: I) -> Self {
        let mut set = Self::default();
        for mode in iter {
            set.insert(mode);
        }
        set
    }
}

/// What a node stands for in the fact set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Transit stop or station
    Stop,
    /// Point of interest a tourist may route to
    Destination,
}

/// Transit stop or point of interest
///
/// Immutable after the build; owned exclusively by its graph.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub geometry: Point<f64>,
    /// Administrative or tourist-zone tag, empty when unasserted
    pub region: String,
    pub modes: ModeSet,
    /// Cross-region hubs survive every region filter
    pub gateway: bool,
    pub kind: NodeKind,
}

/// Directed transit segment or walking transfer between two nodes
///
/// Endpoints are indices into the owning graph's node table.
#[derive(Debug, Clone)]
pub struct Edge {
    pub source: NodeIdx,
    pub target: NodeIdx,
    pub mode: Mode,
    pub time: Minutes,
    pub cost: Money,
    pub is_transfer: bool,
    /// Physical service this segment belongs to (used for leg merging)
    pub line: Option<String>,
}

/// Normalization constants fixed once per graph at build time
///
/// Raw time and cost are scaled by the maxima observed across all edges so
/// the three weighting terms are commensurable, and stay so across repeated
/// searches with different weighting triples.
#[derive(Debug, Clone, Copy)]
pub struct WeightRefs {
    pub max_time: Minutes,
    pub max_cost: Money,
}

impl WeightRefs {
    pub(crate) fn from_edges<'a>(edges: impl Iterator<Item = &'a Edge>) -> Self {
        let mut max_time: f64 = 0.0;
        let mut max_cost: f64 = 0.0;
        for edge in edges {
            max_time = max_time.max(edge.time);
            max_cost = max_cost.max(edge.cost);
        }
        // Floor at 1.0 so an all-zero (or empty) axis never divides by zero
        Self {
            max_time: max_time.max(1.0),
            max_cost: max_cost.max(1.0),
        }
    }
}
