use indexmap::IndexMap;

use crate::core::PlotArea;
use crate::render::{Mark, MarkId, MarkRole, RenderFrame};

/// Keyed scene graph of one chart.
///
/// Marks are stored by id in insertion order. `upsert` replaces a mark with
/// the same id in place, so redrawing with the same data never duplicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    marks: IndexMap<MarkId, Mark>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces `mark`. Returns `true` when the id was new.
    pub fn upsert(&mut self, mark: Mark) -> bool {
        self.marks.insert(mark.id.clone(), mark).is_none()
    }

    #[must_use]
    pub fn get(&self, id: &MarkId) -> Option<&Mark> {
        self.marks.get(id)
    }

    pub fn get_mut(&mut self, id: &MarkId) -> Option<&mut Mark> {
        self.marks.get_mut(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mark> {
        self.marks.values()
    }

    pub fn with_role(&self, role: MarkRole) -> impl Iterator<Item = &Mark> {
        self.marks.values().filter(move |mark| mark.id.role == role)
    }

    pub fn with_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Mark> {
        self.marks.values().filter(move |mark| mark.has_class(class))
    }

    /// Applies `update` to every mark of `role`; returns how many matched.
    pub fn update_role<F>(&mut self, role: MarkRole, mut update: F) -> usize
    where
        F: FnMut(&mut Mark),
    {
        let mut count = 0;
        for mark in self.marks.values_mut().filter(|mark| mark.id.role == role) {
            update(mark);
            count += 1;
        }
        count
    }

    /// Removes every mark of `role` whose id is not in `keep`.
    pub fn retain_role<F>(&mut self, role: MarkRole, mut keep: F) -> usize
    where
        F: FnMut(&MarkId) -> bool,
    {
        let before = self.marks.len();
        self.marks.retain(|id, _| id.role != role || keep(id));
        before - self.marks.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Paint-ordered snapshot for renderers.
    #[must_use]
    pub fn frame(&self, plot: PlotArea, container_id: &str) -> RenderFrame {
        let mut marks: Vec<Mark> = self.marks.values().cloned().collect();
        marks.sort_by_key(|mark| mark.layer);
        RenderFrame {
            viewport: plot.viewport,
            origin: plot.origin(),
            container_id: container_id.to_owned(),
            marks,
        }
    }
}
