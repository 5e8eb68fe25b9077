/// Route descriptions
pub mod api;
/// Transport and the typed client
pub mod client;
