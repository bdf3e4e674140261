//! Background push handler for critical workout alerts.
//!
//! A push payload becomes one fully defaulted [`NotificationDescriptor`] shown
//! through a [`NotificationHost`]; a later click on that notification is
//! closed and routed to exactly one [`Outcome`]. Install and activate hooks
//! let a new worker take over without waiting for a reload.

pub mod consts;
pub mod core;
pub mod error;
pub mod events;
pub mod host;
pub mod lifecycle;
pub mod model;
pub mod notifications;
pub mod routing;
pub mod settings;

pub use error::{Result, WorkerError};
pub use events::{handle_event, run_event_stream, EventReport, ReplaySummary, WorkerEvent};
pub use host::{LifecycleHost, LoggingHost, NotificationHost};
pub use lifecycle::{on_activate, on_install, LifecyclePhase};
pub use model::{
    AlertMetadata, DisplayedNotification, InteractionEvent, NotificationAction,
    NotificationDescriptor, PushPayloadWire, DECLARED_ACTIONS,
};
pub use notifications::dispatch_push;
pub use routing::{handle_interaction, route, DeclaredAction, Destination, Outcome};
pub use settings::WorkerSettings;
