//! Terminal client for a home price-prediction service.
//!
//! The [`view::ViewController`] drives a small state machine
//! (`Empty → Loading → Success | Failure`) over any [`display::DisplaySink`],
//! using a [`client::PredictionClient`] for the single network round-trip.

pub mod animation;
pub mod chart;
pub mod cli;
pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod form;
pub mod formatting;
pub mod model;
pub mod progress;
pub mod prompt;
pub mod terminal;
pub mod view;

pub use client::{HttpPredictionClient, PredictionClient};
pub use display::{DisplaySink, Panel, Slot};
pub use error::{ConfigError, PredictError};
pub use form::FormInput;
pub use model::{ConfidenceBand, PredictionError, PredictionRequest, PredictionResult};
pub use view::{ViewController, ViewState};
