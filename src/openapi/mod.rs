//! Loading Swagger 2.0 / OpenAPI 3.x descriptions into a normalised model.
mod loader;
pub mod model;
mod raw;
pub mod servers;


pub use loader::{load_spec, parse_spec};
pub use model::{
    ApiSpec, HttpMethod, Operation, ParamLocation, Parameter, Schema, SchemaKind, Server,
};
pub use servers::{MAX_SELECTION_ATTEMPTS, select_base, server_candidates};
