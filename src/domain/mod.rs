// Roulette table and session history
pub mod roulette;

// Feature extraction, training sets, candidate selection
pub mod ml;

// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;
