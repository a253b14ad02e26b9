// Lurecheck: phishing URL analysis client with a replayable local history
//
// This is the library root. Each module corresponds to a major subsystem
// of the client: wire model, classification, history, presentation, export.

pub mod api;
pub mod classify;
pub mod config;
pub mod export;
pub mod history;
pub mod output;
pub mod session;
pub mod status;
pub mod verdict;
