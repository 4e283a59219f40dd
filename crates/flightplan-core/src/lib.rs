pub mod arc;
pub mod config;
pub mod error;
pub mod models;
pub mod projection;
pub mod sequencer;
pub mod spatial;
pub mod summary;
pub mod turn;

pub use arc::ArcSampler;
pub use config::EngineConfig;
pub use error::{DomainError, NavError, ProjectionError, ValidationError};
pub use models::{
    GeoPoint, LegResult, Route, RouteParameters, TurnDirection, TurnSolution, TurnWarning,
    TurnpointData, Waypoint,
};
pub use projection::{PlanarProjector, PlanePoint, ProjectionConfig};
pub use sequencer::{FlightPlanData, LegSequencer};
pub use spatial::{bearing, haversine_distance, turn_radius, wind_corrected_heading};
pub use summary::RouteSummary;
pub use turn::TurnGeometryResolver;
