//! Terminal weather widget
//!
//! Resolves a position once, fetches a multi-day forecast from a
//! WeatherAPI-compatible provider, and renders current or forecast
//! conditions into a presentation surface driven by user events.

pub mod app;
pub mod config;
pub mod constants;
pub mod controller;
pub mod display;
pub mod error;
pub mod location;
pub mod models;
pub mod selector;
pub mod service;

pub use config::Config;
pub use controller::{Command, Event, InteractionController, Session};
pub use display::{PresentationSurface, Section, Slot, SlotMap, TerminalSurface};
pub use error::{FetchError, LocationError, ParseDayError, SelectionError, WidgetError};
pub use location::{FixedLocation, IpLocation, LocationProvider, Unsupported};
pub use models::{Coordinates, DaySelector, DisplayRecord, RawWeatherRecord, UnitPreference};
pub use service::ForecastClient;
