//! Request synthesis and concurrent dispatch.
mod caller;
mod client;
mod dispatcher;
mod resolve;
mod synth;
mod workload;


pub use caller::{call, collapse_newlines};
pub use client::build_client;
pub use dispatcher::{Dispatcher, RoundProgress};
pub use resolve::{EndpointResolver, Resolution, has_placeholder};
pub use synth::ValueSynthesizer;
pub use workload::{Outcome, UNCAPTURED_RESPONSE, WorkUnit};
