//! Shared test infrastructure

pub mod test_server;
pub mod upstream;

#[allow(unused_imports)]
pub use test_server::TestServer;
#[allow(unused_imports)]
pub use upstream::{MockUpstream, ScriptedResponse};
