//! Test doubles for cloudflag.
//!
//! Hand-written mocks that record their calls so tests can assert on
//! interactions:
//!
//! - [`MockEvaluationClient`] - scripted evaluation client
//! - [`MockClientFactory`] - counts builds, can fail a set number of times
//! - [`RecordingLogger`] - captures everything logged through it

pub mod mock;

pub use mock::{
    EvaluationCall, LogEntry, MockClientFactory, MockEvaluationClient, RecordingLogger,
};
