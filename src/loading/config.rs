/// Build-time options for the graph compiler
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// Synthesize bidirectional walking-transfer edges between nearby nodes
    /// of disjoint modes, in addition to any transfers asserted as facts
    pub derive_transfers: bool,
    /// Maximum walking-transfer distance in meters
    pub max_transfer_distance: f64,
    /// Walking speed in km/h used to estimate transfer durations
    pub walking_speed: f64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            derive_transfers: false,
            max_transfer_distance: 500.0,
            walking_speed: 5.0,
        }
    }
}
