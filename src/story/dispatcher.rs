use std::fmt;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::error::{ChartError, ChartResult};
use crate::story::{Step, TransitionTable};

/// Callback run when its step fires. It receives the chart context explicitly.
pub type StepHandler<C> = Box<dyn Fn(&mut C) -> ChartResult<()>>;

/// Table of step handlers for one chart context type `C`.
///
/// Handlers are registered once and never removed. Firing a step without a
/// handler is a silent no-op.
pub struct StepDispatcher<C> {
    handlers: IndexMap<Step, StepHandler<C>>,
    last_fired: Option<Step>,
}

impl<C> Default for StepDispatcher<C> {
    fn default() -> Self {
        Self {
            handlers: IndexMap::new(),
            last_fired: None,
        }
    }
}

impl<C> fmt::Debug for StepDispatcher<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDispatcher")
            .field("steps", &self.handlers.keys().collect::<Vec<_>>())
            .field("last_fired", &self.last_fired)
            .finish()
    }
}

impl<C: 'static> StepDispatcher<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one handler per table entry, each applying its target state.
    pub fn from_table<S, F>(table: &TransitionTable<S>, apply: F) -> ChartResult<Self>
    where
        S: Clone + 'static,
        F: Fn(&mut C, &S) -> ChartResult<()> + Clone + 'static,
    {
        let mut dispatcher = Self::new();
        for (step, target) in table.iter() {
            let target = target.clone();
            let apply = apply.clone();
            dispatcher.register(step, move |context: &mut C| apply(context, &target))?;
        }
        Ok(dispatcher)
    }

    pub fn register<F>(&mut self, step: Step, handler: F) -> ChartResult<()>
    where
        F: Fn(&mut C) -> ChartResult<()> + 'static,
    {
        if self.handlers.contains_key(&step) {
            return Err(ChartError::DuplicateStep(step));
        }
        self.handlers.insert(step, Box::new(handler));
        Ok(())
    }

    /// Runs the handler for `step`. Returns `Ok(false)` when none is registered.
    pub fn fire(&mut self, step: Step, context: &mut C) -> ChartResult<bool> {
        let Some(handler) = self.handlers.get(&step) else {
            trace!(step = %step, "no handler registered; ignoring step");
            return Ok(false);
        };
        debug!(step = %step, previous = ?self.last_fired, "step fired");
        handler(context)?;
        self.last_fired = Some(step);
        Ok(true)
    }

    /// Re-runs the handler of the last fired step, if any.
    pub fn replay(&self, context: &mut C) -> ChartResult<bool> {
        let Some(handler) = self.last_fired.and_then(|step| self.handlers.get(&step)) else {
            return Ok(false);
        };
        trace!(step = ?self.last_fired, "replaying step");
        handler(context)?;
        Ok(true)
    }

    #[must_use]
    pub fn is_registered(&self, step: Step) -> bool {
        self.handlers.contains_key(&step)
    }

    pub fn steps(&self) -> impl Iterator<Item = Step> + '_ {
        self.handlers.keys().copied()
    }

    #[must_use]
    pub fn last_fired(&self) -> Option<Step> {
        self.last_fired
    }
}
