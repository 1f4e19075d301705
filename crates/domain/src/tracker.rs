use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::{
    Equipment, ExerciseSpec, PreviousSet, RIR, RPE, Reps, SetPlan, SetTarget, SetType, Weight,
    WeightUnit,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetState {
    Pending,
    Current,
    Completed,
    Editing,
}

/// Frozen record of a completed set. Replaced via an explicit edit or removed
/// via an explicit delete, never patched in place.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedSet {
    pub weight: Weight,
    pub reps: Reps,
    pub rpe: Option<RPE>,
    pub rir: Option<RIR>,
    pub completed_at: DateTime<Utc>,
}

/// Snapshot of one set as performed. Actual weight and reps default to the
/// target until edited. Every change produces a new snapshot, so holders of
/// an old one never observe later edits.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSetData {
    pub set_number: u32,
    pub set_type: SetType,
    pub target_weight: Option<Weight>,
    pub target_reps: Option<Reps>,
    pub weight: Option<Weight>,
    pub reps: Option<Reps>,
    pub rpe: Option<RPE>,
    pub rir: Option<RIR>,
    pub is_completed: bool,
    pub previous_weight: Option<Weight>,
    pub previous_reps: Option<Reps>,
    pub equipment: Equipment,
}

impl ActiveSetData {
    fn new(
        index: usize,
        target: Option<&SetTarget>,
        previous: Option<&PreviousSet>,
        equipment: Equipment,
    ) -> Self {
        let target_weight = target.and_then(|t| t.weight);
        let target_reps = target.and_then(|t| t.reps);
        Self {
            set_number: set_number(index),
            set_type: target.map_or(SetType::Working, |t| t.set_type),
            target_weight,
            target_reps,
            weight: target_weight,
            reps: target_reps,
            rpe: None,
            rir: None,
            is_completed: false,
            previous_weight: previous.map(|p| p.weight),
            previous_reps: previous.map(|p| p.reps),
            equipment,
        }
    }

    fn from_completed(
        index: usize,
        target: Option<&SetTarget>,
        completed: &CompletedSet,
        previous: Option<&PreviousSet>,
        equipment: Equipment,
    ) -> Self {
        Self {
            weight: Some(completed.weight),
            reps: Some(completed.reps),
            rpe: completed.rpe,
            rir: completed.rir,
            is_completed: true,
            ..Self::new(index, target, previous, equipment)
        }
    }

    #[must_use]
    pub fn with_weight(&self, weight: Option<Weight>) -> Self {
        Self {
            weight,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_reps(&self, reps: Option<Reps>) -> Self {
        Self {
            reps,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_rpe(&self, rpe: Option<RPE>) -> Self {
        Self {
            rpe,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_rir(&self, rir: Option<RIR>) -> Self {
        Self {
            rir,
            ..self.clone()
        }
    }

    fn with_previous(&self, previous: Option<&PreviousSet>) -> Self {
        Self {
            previous_weight: previous.map(|p| p.weight),
            previous_reps: previous.map(|p| p.reps),
            ..self.clone()
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn set_number(index: usize) -> u32 {
    index as u32 + 1
}

#[derive(Debug, Clone, PartialEq)]
struct Edit {
    index: usize,
    buffer: ActiveSetData,
}

/// Lifecycle of the sets of one exercise instance within one session.
///
/// The index equal to the number of completed sets is the current one; there
/// is no explicit "become current" transition. The completed sequence is
/// owned exclusively by this tracker; external history updates are pushed in
/// as a full-record replace.
#[derive(Debug, Clone, PartialEq)]
pub struct SetTracker {
    plan: SetPlan,
    previous: Vec<PreviousSet>,
    equipment: Equipment,
    global_unit: WeightUnit,
    unit_override: Option<WeightUnit>,
    total_sets: usize,
    completed: Vec<CompletedSet>,
    current: Option<ActiveSetData>,
    editing: Option<Edit>,
}

impl SetTracker {
    #[must_use]
    pub fn new(spec: &ExerciseSpec, previous: Vec<PreviousSet>, unit: WeightUnit) -> Self {
        let plan = SetPlan::generate(spec);
        let total_sets = plan.len().max(1);
        let mut tracker = Self {
            plan,
            previous,
            equipment: spec.equipment_type(),
            global_unit: unit,
            unit_override: None,
            total_sets,
            completed: Vec::new(),
            current: None,
            editing: None,
        };
        tracker.current = tracker.seeded_set(0);
        tracker
    }

    fn seeded_set(&self, index: usize) -> Option<ActiveSetData> {
        (index < self.total_sets).then(|| {
            ActiveSetData::new(
                index,
                self.plan.get(index),
                self.previous.get(index),
                self.equipment,
            )
        })
    }

    #[must_use]
    pub fn plan(&self) -> &SetPlan {
        &self.plan
    }

    #[must_use]
    pub fn total_sets(&self) -> usize {
        self.total_sets
    }

    #[must_use]
    pub fn completed_sets(&self) -> &[CompletedSet] {
        &self.completed
    }

    #[must_use]
    pub fn state(&self, index: usize) -> SetState {
        if self.editing.as_ref().is_some_and(|e| e.index == index) {
            SetState::Editing
        } else if index < self.completed.len() {
            SetState::Completed
        } else if index == self.completed.len() && index < self.total_sets {
            SetState::Current
        } else {
            SetState::Pending
        }
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        (self.completed.len() < self.total_sets).then_some(self.completed.len())
    }

    #[must_use]
    pub fn all_sets_completed(&self) -> bool {
        self.completed.len() >= self.total_sets
    }

    #[must_use]
    pub fn label(&self, index: usize) -> String {
        self.plan.label(index)
    }

    #[must_use]
    pub fn target_display(&self, index: usize) -> String {
        self.plan.get(index).map_or_else(
            || String::from("no target"),
            |target| target.display(self.display_unit()),
        )
    }

    /// Merged snapshot of any set index for rendering: the edit buffer, the
    /// completed record, the live current set, or a pending preview.
    #[must_use]
    pub fn set_data(&self, index: usize) -> Option<ActiveSetData> {
        if let Some(edit) = &self.editing {
            if edit.index == index {
                return Some(edit.buffer.clone());
            }
        }
        if let Some(completed) = self.completed.get(index) {
            return Some(ActiveSetData::from_completed(
                index,
                self.plan.get(index),
                completed,
                self.previous.get(index),
                self.equipment,
            ));
        }
        if self.current_index() == Some(index) {
            return self.current.clone();
        }
        self.seeded_set(index)
    }

    #[must_use]
    pub fn display_unit(&self) -> WeightUnit {
        self.unit_override.unwrap_or(self.global_unit)
    }

    pub fn toggle_unit(&mut self) {
        self.unit_override = Some(self.display_unit().toggled());
    }

    pub fn clear_unit_override(&mut self) {
        self.unit_override = None;
    }

    pub fn set_global_unit(&mut self, unit: WeightUnit) {
        self.global_unit = unit;
    }

    #[must_use]
    pub fn weight_increment(&self) -> Weight {
        self.equipment.increment()
    }

    /// Input routes to the edit buffer while an edit is open, otherwise to
    /// the live current set.
    fn input_set(&mut self) -> Option<&mut ActiveSetData> {
        if let Some(edit) = &mut self.editing {
            Some(&mut edit.buffer)
        } else {
            self.current.as_mut()
        }
    }

    /// Weight input is interpreted in the active display unit and stored in
    /// kilograms. Unparsable input is ignored and the prior value retained.
    pub fn update_weight(&mut self, input: &str) {
        let unit = self.display_unit();
        let input = input.trim();
        let weight = if input.is_empty() {
            None
        } else {
            let Ok(value) = input.parse::<f32>() else {
                return;
            };
            let Ok(weight) = Weight::from_display(value, unit) else {
                return;
            };
            Some(weight)
        };
        if let Some(set) = self.input_set() {
            *set = set.with_weight(weight);
        }
    }

    pub fn update_reps(&mut self, input: &str) {
        let input = input.trim();
        let reps = if input.is_empty() {
            None
        } else {
            let Ok(reps) = Reps::try_from(input) else {
                return;
            };
            Some(reps)
        };
        if let Some(set) = self.input_set() {
            *set = set.with_reps(reps);
        }
    }

    pub fn update_rpe(&mut self, input: &str) {
        let input = input.trim();
        let rpe = if input.is_empty() {
            None
        } else {
            let Ok(rpe) = RPE::try_from(input) else {
                return;
            };
            Some(rpe)
        };
        if let Some(set) = self.input_set() {
            *set = set.with_rpe(rpe);
        }
    }

    pub fn update_rir(&mut self, input: &str) {
        let input = input.trim();
        let rir = if input.is_empty() {
            None
        } else {
            let Ok(rir) = RIR::try_from(input) else {
                return;
            };
            Some(rir)
        };
        if let Some(set) = self.input_set() {
            *set = set.with_rir(rir);
        }
    }

    pub fn step_weight_up(&mut self) {
        self.step_weight(1.0);
    }

    pub fn step_weight_down(&mut self) {
        self.step_weight(-1.0);
    }

    fn step_weight(&mut self, direction: f32) {
        let step = f32::from(self.equipment.increment());
        if step <= 0.0 {
            return;
        }
        let Some(set) = self.input_set() else {
            return;
        };
        let value = f32::from(set.weight.unwrap_or_default()) + direction * step;
        if let Ok(weight) = Weight::new(value) {
            *set = set.with_weight(Some(weight));
        }
    }

    /// Copies the previous-session values of the set currently accepting
    /// input into its actual fields.
    pub fn autofill_from_previous(&mut self) {
        let Some(set) = self.input_set() else {
            return;
        };
        let (Some(weight), Some(reps)) = (set.previous_weight, set.previous_reps) else {
            return;
        };
        *set = set.with_weight(Some(weight)).with_reps(Some(reps));
    }

    /// Freezes the live input of the current set into a completed record and
    /// advances the current index.
    pub fn complete_set(&mut self, completed_at: DateTime<Utc>) {
        if self.editing.is_some() {
            return;
        }
        let Some(set) = self.current.take() else {
            return;
        };
        self.completed.push(CompletedSet {
            weight: set.weight.unwrap_or_default(),
            reps: set.reps.unwrap_or_default(),
            rpe: set.rpe,
            rir: set.rir,
            completed_at,
        });
        self.current = self.seeded_set(self.completed.len());
    }

    /// Pops the most recent completed record back into the live input.
    pub fn uncomplete_set(&mut self) {
        if self.editing.is_some() {
            return;
        }
        let Some(completed) = self.completed.pop() else {
            return;
        };
        self.current = self.seeded_set(self.completed.len()).map(|set| {
            set.with_weight(Some(completed.weight))
                .with_reps(Some(completed.reps))
                .with_rpe(completed.rpe)
                .with_rir(completed.rir)
        });
    }

    pub fn begin_edit(&mut self, index: usize) {
        if self.editing.is_some() {
            return;
        }
        let Some(completed) = self.completed.get(index) else {
            return;
        };
        let buffer = ActiveSetData::from_completed(
            index,
            self.plan.get(index),
            completed,
            self.previous.get(index),
            self.equipment,
        );
        self.editing = Some(Edit { index, buffer });
    }

    /// Commits the edit buffer. Weight and reps must both be positive;
    /// otherwise nothing is written and the edit stays open.
    pub fn save_edit(&mut self) {
        let Some(edit) = &self.editing else {
            return;
        };
        let (Some(weight), Some(reps)) = (edit.buffer.weight, edit.buffer.reps) else {
            return;
        };
        if !weight.is_positive() || !reps.is_positive() {
            return;
        }
        let index = edit.index;
        let rpe = edit.buffer.rpe;
        let rir = edit.buffer.rir;
        if let Some(completed) = self.completed.get_mut(index) {
            *completed = CompletedSet {
                weight,
                reps,
                rpe,
                rir,
                completed_at: completed.completed_at,
            };
        }
        self.editing = None;
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn add_set(&mut self) {
        self.total_sets += 1;
        if self.current.is_none() {
            self.current = self.seeded_set(self.completed.len());
        }
    }

    #[must_use]
    pub fn can_remove_set(&self) -> bool {
        self.total_sets > 1
    }

    /// Removes the last row: a pending one if any exists, otherwise the most
    /// recent completed record.
    pub fn remove_set(&mut self) {
        if !self.can_remove_set() {
            return;
        }
        if self.completed.len() < self.total_sets {
            self.total_sets -= 1;
            if self.completed.len() >= self.total_sets {
                self.current = None;
            }
        } else {
            self.completed.pop();
            self.total_sets -= 1;
            if self
                .editing
                .as_ref()
                .is_some_and(|e| e.index >= self.completed.len())
            {
                self.editing = None;
            }
        }
    }

    /// Deletes one row. A completed row loses its record and every later set
    /// moves down one position; a pending row reduces the total set count.
    pub fn delete_set(&mut self, index: usize) {
        if !self.can_remove_set() || index >= self.total_sets {
            return;
        }
        if index < self.completed.len() {
            self.completed.remove(index);
            if let Some(edit) = self.editing.take() {
                self.editing = match edit.index.cmp(&index) {
                    Ordering::Greater => Some(Edit {
                        index: edit.index - 1,
                        buffer: edit.buffer,
                    }),
                    Ordering::Equal => None,
                    Ordering::Less => Some(edit),
                };
            }
            self.current = self.seeded_set(self.completed.len());
        } else {
            self.total_sets -= 1;
            if self.completed.len() >= self.total_sets {
                self.current = None;
            }
        }
    }

    /// Unidirectional refresh of the previous-session snapshot.
    pub fn replace_previous_sets(&mut self, previous: Vec<PreviousSet>) {
        self.previous = previous;
        let index = self.completed.len();
        if let Some(current) = self.current.take() {
            self.current = Some(current.with_previous(self.previous.get(index)));
        }
    }
}
