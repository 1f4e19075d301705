use crate::{RIR, SetType};

/// Effort target for one set of a working block. Warmups carry no target,
/// sets to failure are fixed, and working sets taper from RIR 3 towards
/// RIR 1 as the block approaches its final set.
#[must_use]
pub fn rir(set_type: SetType, working_set_index: u32, total_working_sets: u32) -> Option<RIR> {
    match set_type {
        SetType::Warmup => None,
        SetType::Failure | SetType::Amrap => Some(RIR::ZERO),
        SetType::Drop => Some(RIR::ONE),
        SetType::Working => Some(working_rir(working_set_index, total_working_sets)),
    }
}

fn working_rir(index: u32, total: u32) -> RIR {
    match total {
        0 | 1 => RIR::TWO,
        2 => {
            if index == 0 {
                RIR::THREE
            } else {
                RIR::ONE
            }
        }
        _ => {
            #[allow(clippy::cast_precision_loss)]
            let position = index as f32 / (total - 1) as f32;
            if position < 0.33 {
                RIR::THREE
            } else if position < 0.67 {
                RIR::TWO
            } else {
                RIR::ONE
            }
        }
    }
}
