use derive_more::Deref;

use crate::{ExerciseSpec, RIR, Reps, Weight, WeightUnit, progression};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetType {
    Warmup,
    Working,
    Drop,
    Failure,
    Amrap,
}

impl SetType {
    #[must_use]
    pub fn is_working(self) -> bool {
        matches!(self, SetType::Working)
    }

    #[must_use]
    pub fn is_to_failure(self) -> bool {
        matches!(self, SetType::Failure | SetType::Amrap)
    }

    #[must_use]
    pub fn letter(self) -> Option<char> {
        match self {
            SetType::Warmup => Some('W'),
            SetType::Drop => Some('D'),
            SetType::Failure => Some('F'),
            SetType::Amrap => Some('A'),
            SetType::Working => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetTarget {
    pub index: u32,
    pub set_type: SetType,
    pub weight: Option<Weight>,
    pub reps: Option<Reps>,
    pub rir: Option<RIR>,
}

impl SetTarget {
    #[must_use]
    pub fn display(&self, unit: WeightUnit) -> String {
        let weight = self.weight.filter(Weight::is_positive);
        let reps = self.reps.filter(Reps::is_positive);
        match (weight, reps) {
            (Some(weight), _) if self.set_type.is_to_failure() => {
                format!("{} × AMRAP", unit.format(weight))
            }
            (Some(weight), Some(reps)) => format!("{} × {reps}", unit.format(weight)),
            (None, Some(reps)) => {
                if self.set_type.is_to_failure() {
                    String::from("AMRAP")
                } else {
                    format!("{reps} reps")
                }
            }
            _ => String::from("no target"),
        }
    }
}

/// The ordered set prescription for one exercise instance. Derived once from
/// the immutable `ExerciseSpec` and regenerated only if the spec changes.
#[derive(Deref, Debug, Clone, PartialEq)]
pub struct SetPlan(Vec<SetTarget>);

impl SetPlan {
    pub const WARMUP_SETS: u32 = 2;

    #[must_use]
    pub fn generate(spec: &ExerciseSpec) -> Self {
        if spec.set_targets.is_empty() {
            Self::fallback(spec)
        } else {
            Self::prescribed(spec)
        }
    }

    /// The explicit per-set prescription is authoritative. Only working sets
    /// without an explicit RIR get one from the progression rules.
    fn prescribed(spec: &ExerciseSpec) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let total_working = spec
            .set_targets
            .iter()
            .filter(|t| t.set_type.is_working())
            .count() as u32;
        let mut working_index = 0;
        Self(
            spec.set_targets
                .iter()
                .map(|target| {
                    let mut target = target.clone();
                    if target.set_type.is_working() {
                        if target.rir.is_none() {
                            target.rir =
                                progression::rir(SetType::Working, working_index, total_working);
                        }
                        working_index += 1;
                    }
                    target
                })
                .collect(),
        )
    }

    /// Legacy prescription: two warmup sets followed by the prescribed sets
    /// at the target weight.
    fn fallback(spec: &ExerciseSpec) -> Self {
        let set_type = if spec.is_failure_set {
            SetType::Failure
        } else if spec.is_drop_set {
            SetType::Drop
        } else {
            SetType::Working
        };
        let reps = Some(spec.default_reps());
        let weight = spec.target_weight.filter(Weight::is_positive);
        let set_count = spec.set_count();
        let mut targets = Vec::new();
        for i in 0..Self::WARMUP_SETS {
            targets.push(SetTarget {
                index: i + 1,
                set_type: SetType::Warmup,
                weight: None,
                reps,
                rir: progression::rir(SetType::Warmup, i, set_count),
            });
        }
        for i in 0..set_count {
            targets.push(SetTarget {
                index: Self::WARMUP_SETS + i + 1,
                set_type,
                weight,
                reps,
                rir: progression::rir(set_type, i, set_count),
            });
        }
        Self(targets)
    }

    #[must_use]
    pub fn working_sets(&self) -> usize {
        self.0.iter().filter(|t| t.set_type.is_working()).count()
    }

    /// Single-letter set type code, or the 1-based rank among working sets.
    /// Indices beyond the plan (added sets) continue the working ordinals.
    #[must_use]
    pub fn label(&self, index: usize) -> String {
        match self.0.get(index) {
            Some(target) => match target.set_type.letter() {
                Some(letter) => letter.to_string(),
                None => self.0[..=index]
                    .iter()
                    .filter(|t| t.set_type.is_working())
                    .count()
                    .to_string(),
            },
            None => (self.working_sets() + index - self.0.len() + 1).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{ExerciseID, Name};

    use super::*;

    fn spec(set_targets: Vec<SetTarget>) -> ExerciseSpec {
        ExerciseSpec {
            id: 1.into(),
            name: Name::new("Bench Press").unwrap(),
            equipment: Some(String::from("Barbell")),
            target_weight: Some(Weight::new(100.0).unwrap()),
            target_reps: None,
            target_rest: None,
            duration: None,
            sets: None,
            set_targets,
            is_drop_set: false,
            is_failure_set: false,
        }
    }

    fn target(index: u32, set_type: SetType, rir: Option<RIR>) -> SetTarget {
        SetTarget {
            index,
            set_type,
            weight: Some(Weight::new(80.0).unwrap()),
            reps: Some(Reps::new(8).unwrap()),
            rir,
        }
    }

    #[test]
    fn test_generate_prescribed_preserves_order_and_types() {
        let plan = SetPlan::generate(&spec(vec![
            target(1, SetType::Warmup, None),
            target(2, SetType::Working, None),
            target(3, SetType::Drop, None),
            target(4, SetType::Working, Some(RIR::ZERO)),
            target(5, SetType::Failure, None),
        ]));

        assert_eq!(plan.len(), 5);
        assert_eq!(
            plan.iter().map(|t| t.set_type).collect::<Vec<_>>(),
            vec![
                SetType::Warmup,
                SetType::Working,
                SetType::Drop,
                SetType::Working,
                SetType::Failure,
            ]
        );
    }

    #[test]
    fn test_generate_prescribed_rir() {
        let plan = SetPlan::generate(&spec(vec![
            target(1, SetType::Warmup, None),
            target(2, SetType::Working, None),
            target(3, SetType::Drop, None),
            target(4, SetType::Working, Some(RIR::ZERO)),
            target(5, SetType::Failure, None),
        ]));

        // warmup and non-working sets keep only explicit values
        assert_eq!(plan[0].rir, None);
        assert_eq!(plan[2].rir, None);
        assert_eq!(plan[4].rir, None);
        // first of two working sets, no explicit value
        assert_eq!(plan[1].rir, Some(RIR::THREE));
        // explicit value wins over the progression rules
        assert_eq!(plan[3].rir, Some(RIR::ZERO));
    }

    #[test]
    fn test_generate_prescribed_labels() {
        let plan = SetPlan::generate(&spec(vec![
            target(1, SetType::Warmup, None),
            target(2, SetType::Working, None),
            target(3, SetType::Drop, None),
            target(4, SetType::Working, None),
            target(5, SetType::Amrap, None),
        ]));

        assert_eq!(plan.label(0), "W");
        assert_eq!(plan.label(1), "1");
        assert_eq!(plan.label(2), "D");
        assert_eq!(plan.label(3), "2");
        assert_eq!(plan.label(4), "A");
        // added rows beyond the plan continue the working ordinals
        assert_eq!(plan.label(5), "3");
    }

    #[test]
    fn test_generate_fallback() {
        let plan = SetPlan::generate(&spec(vec![]));

        assert_eq!(plan.len(), 5);
        assert_eq!(
            plan.iter().map(|t| t.set_type).collect::<Vec<_>>(),
            vec![
                SetType::Warmup,
                SetType::Warmup,
                SetType::Working,
                SetType::Working,
                SetType::Working,
            ]
        );
        assert!(plan[..2].iter().all(|t| t.weight.is_none()));
        assert!(
            plan[2..]
                .iter()
                .all(|t| t.weight == Some(Weight::new(100.0).unwrap()))
        );
        assert!(
            plan.iter()
                .all(|t| t.reps == Some(Reps::new(ExerciseSpec::DEFAULT_REPS).unwrap()))
        );
        assert_eq!(
            plan.iter().map(|t| t.rir).collect::<Vec<_>>(),
            vec![
                None,
                None,
                Some(RIR::THREE),
                Some(RIR::TWO),
                Some(RIR::ONE),
            ]
        );
        assert_eq!(
            plan.iter().map(|t| t.index).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );
    }

    #[test]
    fn test_generate_fallback_set_count_and_reps() {
        let mut exercise = spec(vec![]);
        exercise.sets = Some(2);
        exercise.target_reps = Some(Reps::new(5).unwrap());

        let plan = SetPlan::generate(&exercise);

        assert_eq!(plan.len(), 4);
        assert_eq!(plan.working_sets(), 2);
        assert!(plan.iter().all(|t| t.reps == Some(Reps::new(5).unwrap())));
    }

    #[rstest]
    #[case(false, false, SetType::Working)]
    #[case(true, false, SetType::Drop)]
    #[case(false, true, SetType::Failure)]
    #[case(true, true, SetType::Failure)]
    fn test_generate_fallback_flags(
        #[case] is_drop_set: bool,
        #[case] is_failure_set: bool,
        #[case] expected: SetType,
    ) {
        let mut exercise = spec(vec![]);
        exercise.is_drop_set = is_drop_set;
        exercise.is_failure_set = is_failure_set;

        let plan = SetPlan::generate(&exercise);

        assert!(plan[2..].iter().all(|t| t.set_type == expected));
        assert!(plan[..2].iter().all(|t| t.set_type == SetType::Warmup));
    }

    #[test]
    fn test_generate_fallback_bodyweight() {
        let mut exercise = spec(vec![]);
        exercise.target_weight = None;

        let plan = SetPlan::generate(&exercise);

        assert!(plan.iter().all(|t| t.weight.is_none()));
        assert_eq!(plan[2].display(WeightUnit::Kg), "10 reps");
    }

    #[rstest]
    #[case(
        SetTarget {
            index: 1,
            set_type: SetType::Working,
            weight: Some(Weight::new(100.0).unwrap()),
            reps: Some(Reps::new(10).unwrap()),
            rir: None,
        },
        WeightUnit::Lb,
        "220 lbs × 10"
    )]
    #[case(
        SetTarget {
            index: 1,
            set_type: SetType::Working,
            weight: Some(Weight::new(87.5).unwrap()),
            reps: Some(Reps::new(8).unwrap()),
            rir: None,
        },
        WeightUnit::Kg,
        "87.5 kg × 8"
    )]
    #[case(
        SetTarget {
            index: 1,
            set_type: SetType::Failure,
            weight: Some(Weight::new(100.0).unwrap()),
            reps: Some(Reps::new(10).unwrap()),
            rir: None,
        },
        WeightUnit::Kg,
        "100 kg × AMRAP"
    )]
    #[case(
        SetTarget {
            index: 1,
            set_type: SetType::Amrap,
            weight: None,
            reps: Some(Reps::new(10).unwrap()),
            rir: None,
        },
        WeightUnit::Kg,
        "AMRAP"
    )]
    #[case(
        SetTarget {
            index: 1,
            set_type: SetType::Working,
            weight: None,
            reps: Some(Reps::new(12).unwrap()),
            rir: None,
        },
        WeightUnit::Kg,
        "12 reps"
    )]
    #[case(
        SetTarget {
            index: 1,
            set_type: SetType::Working,
            weight: None,
            reps: None,
            rir: None,
        },
        WeightUnit::Kg,
        "no target"
    )]
    fn test_set_target_display(
        #[case] set_target: SetTarget,
        #[case] unit: WeightUnit,
        #[case] expected: &str,
    ) {
        assert_eq!(set_target.display(unit), expected);
    }
}
