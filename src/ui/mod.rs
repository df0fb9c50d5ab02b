//! Terminal presentation: state snapshot, widgets, and the driver loop

mod app;
mod state;
mod widgets;

pub use app::App;
pub use state::{Effect, Event, Notice, Transition, ViewState};
pub use widgets::{card, pair_details, view};
