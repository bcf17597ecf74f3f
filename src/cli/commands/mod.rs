//! Subcommand implementations.

/// Speech-to-text, text-to-speech and intent recognition.
pub mod speech;

/// Version, restart and training.
pub mod server;

/// Configured server management.
pub mod servers;

/// Sentences, custom words, slots, lookup and profile.
pub mod training_data;
