// Service exports
pub mod auth;
pub mod candidates;
pub mod outcome;
pub mod script;
pub mod simulator;

pub use auth::{AuthError, AuthStub};
pub use candidates::{demo_candidates, load_from_path, parse_candidates, CandidateSourceError};
pub use outcome::{spawn_backend_stub, ChannelSink, LoggingSink, RecordingSink};
pub use script::{ScriptError, Step, SwipeScript};
pub use simulator::Simulator;
