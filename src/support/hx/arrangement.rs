//! Flow arrangements supported by the heat exchanger utilities.
//!
//! Every arrangement maps `(R1, NTU1)` to the temperature effectiveness `P1`
//! of stream 1. Stream 1 is the shell-side fluid for the TEMA shells, the air
//! for the air cooler, and side 1 for plate exchangers.
//!
//! Pass and row counts are checked by [`Arrangement::validate`] before any
//! relation is evaluated, so an unsupported combination surfaces as a
//! configuration error rather than a wrong number.

mod air_cooler;
mod basic;
mod plate;
mod tema;

use crate::{
    error::{ConfigurationError, Result},
    support::hx::{
        CapacityRatio, Effectiveness, Ntu, TemperatureEffectiveness,
        effectiveness_ntu::{effectiveness_via, relation_inputs},
    },
};

/// Most tube passes a TEMA E shell is evaluated for.
pub const MAX_E_TUBE_PASSES: u16 = 8;

/// Most tube rows an air cooler is evaluated for.
pub const MAX_AIR_COOLER_ROWS: u16 = 8;

/// Most passes per side of a plate exchanger.
pub const MAX_PLATE_PASSES: u16 = 4;

/// Single-pass arrangements with textbook closed forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicFlow {
    /// Pure counterflow.
    Counterflow,
    /// Pure parallel flow.
    Parallel,
    /// Crossflow with both streams unmixed.
    Crossflow,
    /// Crossflow with stream 1 mixed and stream 2 unmixed.
    CrossflowMixed1,
    /// Crossflow with stream 2 mixed and stream 1 unmixed.
    CrossflowMixed2,
    /// Crossflow with both streams mixed.
    CrossflowMixedBoth,
}

impl TemperatureEffectiveness for BasicFlow {
    fn temperature_effectiveness(&self, r1: CapacityRatio, ntu1: Ntu) -> Result<Effectiveness> {
        Arrangement::Basic(*self).temperature_effectiveness(r1, ntu1)
    }
}

/// A flow arrangement together with the parameters it needs.
///
/// # Example
///
/// ```
/// use shell_tube_rating::support::hx::{
///     Arrangement, CapacityRatio, Ntu, TemperatureEffectiveness,
/// };
///
/// # fn main() -> shell_tube_rating::Result<()> {
/// let one_two = Arrangement::TemaE { tube_passes: 2, counterflow: true };
/// let p1 = one_two.temperature_effectiveness(CapacityRatio::new(0.5)?, Ntu::new(1.0)?)?;
/// assert!((p1.value() - 0.5399).abs() < 1e-4);
///
/// let odd = Arrangement::TemaJ { tube_passes: 3 };
/// assert!(odd.validate().is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arrangement {
    /// One of the basic single-pass arrangements.
    Basic(BasicFlow),
    /// TEMA E shell with 1 to 8 tube passes.
    ///
    /// `counterflow` sets whether the first tube pass runs against the shell
    /// flow. Two passes use the symmetric 1-2 closed form, where it has no effect.
    TemaE { tube_passes: u16, counterflow: bool },
    /// TEMA G (split-flow) shell with 1 or 2 tube passes.
    ///
    /// With two passes, `counterflow` places the first tube pass on the side
    /// the split shell flow turns back along.
    TemaG { tube_passes: u16, counterflow: bool },
    /// TEMA H (double split-flow) shell with 1 or 2 tube passes.
    TemaH { tube_passes: u16, counterflow: bool },
    /// TEMA J (divided-flow) shell with 1, 2 or 4 tube passes.
    TemaJ { tube_passes: u16 },
    /// Air-cooled exchanger: air crosses `rows` tube rows grouped in `passes`.
    ///
    /// `counterflow` sends the tube fluid first through the rows the air
    /// meets last.
    AirCooler {
        rows: u16,
        passes: u16,
        counterflow: bool,
    },
    /// Plate exchanger with independent pass counts per side.
    ///
    /// `counterflow` sets the overall pass progression; `passes_counterflow`
    /// sets whether the two fluids run against each other within a pass.
    Plate {
        passes_1: u16,
        passes_2: u16,
        counterflow: bool,
        passes_counterflow: bool,
    },
}

impl Arrangement {
    /// Checks pass and row counts against what the arrangement supports.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] describing the unsupported parameter.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let unsupported = |arrangement, passes, supported| {
            Err(ConfigurationError::UnsupportedPassCount {
                arrangement,
                passes,
                supported,
            })
        };

        match *self {
            Self::Basic(_) => Ok(()),
            Self::TemaE { tube_passes, .. } => {
                if (1..=MAX_E_TUBE_PASSES).contains(&tube_passes) {
                    Ok(())
                } else {
                    unsupported("TEMA E", tube_passes, "1 to 8")
                }
            }
            Self::TemaG { tube_passes, .. } | Self::TemaH { tube_passes, .. } => {
                if matches!(tube_passes, 1 | 2) {
                    Ok(())
                } else {
                    unsupported(self.name(), tube_passes, "1 or 2")
                }
            }
            Self::TemaJ { tube_passes } => {
                if matches!(tube_passes, 1 | 2 | 4) {
                    Ok(())
                } else {
                    unsupported("TEMA J", tube_passes, "1, 2 or 4")
                }
            }
            Self::AirCooler { rows, passes, .. } => {
                if !(1..=MAX_AIR_COOLER_ROWS).contains(&rows) {
                    return Err(ConfigurationError::UnsupportedRows {
                        rows,
                        max: MAX_AIR_COOLER_ROWS,
                    });
                }
                if passes == 0 || passes > rows {
                    return unsupported("air cooler", passes, "1 up to the row count");
                }
                if rows % passes != 0 {
                    return Err(ConfigurationError::RowsNotDivisibleByPasses { rows, passes });
                }
                Ok(())
            }
            Self::Plate {
                passes_1, passes_2, ..
            } => {
                for passes in [passes_1, passes_2] {
                    if !(1..=MAX_PLATE_PASSES).contains(&passes) {
                        return unsupported("plate", passes, "1 to 4 per side");
                    }
                }
                Ok(())
            }
        }
    }

    /// Short human-readable name of the arrangement family.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Basic(BasicFlow::Counterflow) => "counterflow",
            Self::Basic(BasicFlow::Parallel) => "parallel flow",
            Self::Basic(BasicFlow::Crossflow) => "crossflow",
            Self::Basic(BasicFlow::CrossflowMixed1) => "crossflow (stream 1 mixed)",
            Self::Basic(BasicFlow::CrossflowMixed2) => "crossflow (stream 2 mixed)",
            Self::Basic(BasicFlow::CrossflowMixedBoth) => "crossflow (both mixed)",
            Self::TemaE { .. } => "TEMA E",
            Self::TemaG { .. } => "TEMA G",
            Self::TemaH { .. } => "TEMA H",
            Self::TemaJ { .. } => "TEMA J",
            Self::AirCooler { .. } => "air cooler",
            Self::Plate { .. } => "plate",
        }
    }
}

impl TemperatureEffectiveness for Arrangement {
    fn temperature_effectiveness(&self, r1: CapacityRatio, ntu1: Ntu) -> Result<Effectiveness> {
        self.validate()?;
        let (r, n) = relation_inputs(r1, ntu1)?;

        let raw = match *self {
            Self::Basic(flow) => basic::effectiveness(flow, r, n)?,
            Self::TemaE {
                tube_passes,
                counterflow,
            } => tema::e_shell(r, n, tube_passes, counterflow)?,
            Self::TemaG {
                tube_passes,
                counterflow,
            } => tema::split_flow(r, n, tube_passes, counterflow, 1)?,
            Self::TemaH {
                tube_passes,
                counterflow,
            } => tema::split_flow(r, n, tube_passes, counterflow, 2)?,
            Self::TemaJ { tube_passes } => tema::j_shell(r, n, tube_passes)?,
            Self::AirCooler {
                rows,
                passes,
                counterflow,
            } => air_cooler::effectiveness(r, n, rows, passes, counterflow)?,
            Self::Plate {
                passes_1,
                passes_2,
                counterflow,
                passes_counterflow,
            } => plate::effectiveness(r, n, passes_1, passes_2, counterflow, passes_counterflow)?,
        };

        tracing::trace!(arrangement = self.name(), r1 = r, ntu1 = n, p1 = raw);
        effectiveness_via(raw)
    }
}
