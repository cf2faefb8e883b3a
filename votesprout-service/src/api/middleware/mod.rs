pub mod correlation;
pub mod error_envelope;
pub mod logging;
pub mod metrics;
