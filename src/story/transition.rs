use indexmap::IndexMap;

use crate::error::{ChartError, ChartResult};
use crate::story::{ChartId, Step};

/// Explicit step → target visual state table for one chart.
///
/// Every entry is reachable from any state: the source state is never
/// consulted, so a step's target must describe everything it governs.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionTable<S> {
    chart: ChartId,
    targets: IndexMap<Step, S>,
}

impl<S> TransitionTable<S> {
    #[must_use]
    pub fn new(chart: ChartId) -> Self {
        Self {
            chart,
            targets: IndexMap::new(),
        }
    }

    pub fn insert(&mut self, step: Step, target: S) -> ChartResult<()> {
        if step.chart() != self.chart {
            return Err(ChartError::InvalidData(format!(
                "step `{step}` does not belong to `{}`",
                self.chart.container_id()
            )));
        }
        if self.targets.contains_key(&step) {
            return Err(ChartError::DuplicateStep(step));
        }
        self.targets.insert(step, target);
        Ok(())
    }

    pub fn with(mut self, step: Step, target: S) -> ChartResult<Self> {
        self.insert(step, target)?;
        Ok(self)
    }

    #[must_use]
    pub fn chart(&self) -> ChartId {
        self.chart
    }

    #[must_use]
    pub fn target(&self, step: Step) -> Option<&S> {
        self.targets.get(&step)
    }

    pub fn steps(&self) -> impl Iterator<Item = Step> + '_ {
        self.targets.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Step, &S)> {
        self.targets.iter().map(|(step, target)| (*step, target))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
