mod endpoint;
mod rhasspy;

/// Pluggable sink for the client's diagnostic events.
pub mod diagnostics;

pub use diagnostics::{Diagnostic, DiagnosticSink, NullSink, TracingSink};
pub use endpoint::{Endpoint, ProfileLayers, Slots, WordLookup};
pub use rhasspy::{ClientOptions, RhasspyClient};
