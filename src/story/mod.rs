//! Scroll steps and their dispatch.
//!
//! The scroll observer lives outside this crate; it resolves anchors with
//! [`Step::from_anchor`] and calls a chart's `fire`. Any step may follow any
//! other, repeatedly, in either scroll direction.

mod dispatcher;
mod step;
mod transition;

pub use dispatcher::{StepDispatcher, StepHandler};
pub use step::{ChartId, Step};
pub use transition::TransitionTable;
