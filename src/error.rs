use thiserror::Error;

/// Errors raised by the triple store adapter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("unconstrained pattern would scan the whole store")]
    FullScanDisallowed,
}

/// Errors raised while compiling facts into a graph
///
/// Any of these aborts the entire build; no partially constructed graph is
/// ever returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("conflicting facts about '{subject}': {detail}")]
    ConflictingFact { subject: String, detail: String },
    #[error("connection '{connection}' references unknown node '{node}'")]
    DanglingReference { connection: String, node: String },
    #[error("negative {attribute} ({value}) on '{subject}'")]
    InvalidWeight {
        subject: String,
        attribute: &'static str,
        value: f64,
    },
    #[error("unrecognized predicate '{predicate}' on '{subject}'")]
    UnrecognizedPredicate { subject: String, predicate: String },
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Errors raised by a single route planning call
///
/// `UnknownNode` signals a bad request (the id does not exist at all),
/// while `NoRouteFound` signals a well-formed but unsatisfiable one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("unknown node id '{0}'")]
    UnknownNode(String),
    #[error("no route between '{origin}' and '{destination}'")]
    NoRouteFound { origin: String, destination: String },
    #[error("invalid search criteria: {0}")]
    InvalidCriteria(String),
    #[error("itinerary invariant violated: {0}")]
    InvariantViolation(String),
}
