//! Closed predicate vocabulary understood by the graph builder
//!
//! Facts using any other predicate on a known subject fail the build
//! instead of being duck-typed at use time.

/// `rdf:type` shorthand
pub const TYPE: &str = "a";

// Entity types
pub const STOP: &str = "Stop";
pub const DESTINATION: &str = "Destination";
pub const CONNECTION: &str = "Connection";

// Node attributes
pub const NAME: &str = "name";
pub const HAS_MODE: &str = "hasMode";
pub const HAS_COORDINATES: &str = "hasCoordinates";
pub const HAS_REGION: &str = "hasRegion";
pub const IS_GATEWAY: &str = "isGateway";

// Connection attributes
pub const CONNECTS_FROM: &str = "connectsFrom";
pub const CONNECTS_TO: &str = "connectsTo";
pub const TRAVEL_TIME: &str = "travelTime";
pub const COST: &str = "cost";
pub const ON_LINE: &str = "onLine";
pub const IS_TRANSFER_OF: &str = "isTransferOf";

/// Predicates valid on a `Stop` or `Destination` subject
pub const NODE_PREDICATES: &[&str] = &[
    TYPE,
    NAME,
    HAS_MODE,
    HAS_COORDINATES,
    HAS_REGION,
    IS_GATEWAY,
];

/// Predicates valid on a `Connection` subject
pub const CONNECTION_PREDICATES: &[&str] = &[
    TYPE,
    HAS_MODE,
    CONNECTS_FROM,
    CONNECTS_TO,
    TRAVEL_TIME,
    COST,
    ON_LINE,
    IS_TRANSFER_OF,
];
