use uom::si::f64::{HeatTransfer, Power, ThermodynamicTemperature};

use crate::support::{
    conduction::{AxialProfile, CrossSectionField, RadialProfile},
    shell_tube::{FilmCoefficients, ResistanceStack, ShellGeometry, TubeGeometry},
};

/// Results of one rating.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingReport {
    pub tubes: TubeGeometry,
    /// Shell with the HEDH bundle estimate.
    pub shell: ShellGeometry,
    pub films: FilmCoefficients,
    pub resistances: ResistanceStack,
    pub overall_coefficient: HeatTransfer,
    /// Hot-side duty.
    pub duty: Power,
    pub duty_btu_per_hour: f64,
    pub cold_outlet: ThermodynamicTemperature,
    pub cold_outlet_fahrenheit: f64,
    /// Wall temperature from the tube bore (cold outlet) to the outer surface
    /// (hot inlet).
    pub radial: RadialProfile,
    pub cross_section: Option<CrossSectionField>,
    pub axial: AxialProfile,
}
