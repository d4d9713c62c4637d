use std::fmt;

use uom::si::angle::radian;

use crate::flow::{FlowError, MachNumber, SpecificHeatRatio, isentropic, normal_shock};

/// The quantity supplied to the inverse solver.
///
/// Angles are given in radians. The `Shock*` kinds describe a normal shock
/// and recover the upstream Mach number `M1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// `M` itself.
    MachNumber,
    /// `T/T0`, in `(0, 1)`.
    StagnationTemperatureRatio,
    /// `p/p0`, in `(0, 1)`.
    StagnationPressureRatio,
    /// `ρ/ρ0`, in `(0, 1)`.
    StagnationDensityRatio,
    /// `A/A* > 1` on the subsonic branch.
    AreaRatioSubsonic,
    /// `A/A* > 1` on the supersonic branch.
    AreaRatioSupersonic,
    /// `μ` in `(0, π/2)`.
    MachAngle,
    /// `ν` in `(0, ν_max(γ))`.
    PrandtlMeyerAngle,
    /// `p2/p1 > 1`.
    ShockStaticPressureRatio,
    /// `ρ2/ρ1` in `(1, (γ+1)/(γ−1))`.
    ShockDensityRatio,
    /// `T2/T1 > 1`.
    ShockTemperatureRatio,
    /// `p02/p01` in `(0, 1)`.
    ShockTotalPressureRatio,
    /// `M2` in `(sqrt((γ−1)/(2γ)), 1)`.
    ShockDownstreamMach,
}

impl RelationKind {
    /// Every kind, in display order.
    pub const ALL: [Self; 13] = [
        Self::MachNumber,
        Self::StagnationTemperatureRatio,
        Self::StagnationPressureRatio,
        Self::StagnationDensityRatio,
        Self::AreaRatioSubsonic,
        Self::AreaRatioSupersonic,
        Self::MachAngle,
        Self::PrandtlMeyerAngle,
        Self::ShockStaticPressureRatio,
        Self::ShockDensityRatio,
        Self::ShockTemperatureRatio,
        Self::ShockTotalPressureRatio,
        Self::ShockDownstreamMach,
    ];

    /// Short label of the supplied quantity.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::MachNumber => "M",
            Self::StagnationTemperatureRatio => "T/T0",
            Self::StagnationPressureRatio => "p/p0",
            Self::StagnationDensityRatio => "rho/rho0",
            Self::AreaRatioSubsonic => "A/A* (subsonic)",
            Self::AreaRatioSupersonic => "A/A* (supersonic)",
            Self::MachAngle => "Mach angle (rad)",
            Self::PrandtlMeyerAngle => "P-M angle (rad)",
            Self::ShockStaticPressureRatio => "p2/p1",
            Self::ShockDensityRatio => "rho2/rho1",
            Self::ShockTemperatureRatio => "T2/T1",
            Self::ShockTotalPressureRatio => "p02/p01",
            Self::ShockDownstreamMach => "M2",
        }
    }

    /// Human-readable description of the accepted input values.
    #[must_use]
    pub fn domain(self) -> &'static str {
        match self {
            Self::MachNumber => "M >= 0",
            Self::StagnationTemperatureRatio => "0 < T/T0 < 1",
            Self::StagnationPressureRatio => "0 < p/p0 < 1",
            Self::StagnationDensityRatio => "0 < rho/rho0 < 1",
            Self::AreaRatioSubsonic | Self::AreaRatioSupersonic => "A/A* > 1",
            Self::MachAngle => "0 < mu < pi/2",
            Self::PrandtlMeyerAngle => "0 < nu < nu_max(gamma)",
            Self::ShockStaticPressureRatio => "p2/p1 > 1",
            Self::ShockDensityRatio => "1 < rho2/rho1 < (gamma + 1)/(gamma - 1)",
            Self::ShockTemperatureRatio => "T2/T1 > 1",
            Self::ShockTotalPressureRatio => "0 < p02/p01 < 1",
            Self::ShockDownstreamMach => "sqrt((gamma - 1)/(2 gamma)) < M2 < 1",
        }
    }

    /// Returns `true` for the kinds that describe a normal shock.
    #[must_use]
    pub fn is_normal_shock(self) -> bool {
        matches!(
            self,
            Self::ShockStaticPressureRatio
                | Self::ShockDensityRatio
                | Self::ShockTemperatureRatio
                | Self::ShockTotalPressureRatio
                | Self::ShockDownstreamMach
        )
    }

    /// Evaluates the forward relation for this kind, angles in radians.
    ///
    /// The result is the value that [`invert`](super::invert) maps back to
    /// `mach`. Both area-ratio kinds evaluate the same `A/A*`.
    ///
    /// # Errors
    ///
    /// Returns the errors of the underlying relation, such as
    /// [`FlowError::NumericDomain`] for an angle at subsonic Mach number.
    pub fn evaluate(self, gamma: SpecificHeatRatio, mach: MachNumber) -> Result<f64, FlowError> {
        Ok(match self {
            Self::MachNumber => *mach,
            Self::StagnationTemperatureRatio => isentropic::temperature_ratio(gamma, mach),
            Self::StagnationPressureRatio => isentropic::pressure_ratio(gamma, mach),
            Self::StagnationDensityRatio => isentropic::density_ratio(gamma, mach),
            Self::AreaRatioSubsonic | Self::AreaRatioSupersonic => {
                isentropic::area_ratio(gamma, mach)?
            }
            Self::MachAngle => isentropic::mach_angle(mach)?.get::<radian>(),
            Self::PrandtlMeyerAngle => {
                isentropic::prandtl_meyer_angle(gamma, mach)?.get::<radian>()
            }
            Self::ShockStaticPressureRatio => normal_shock::pressure_ratio(gamma, mach),
            Self::ShockDensityRatio => normal_shock::density_ratio(gamma, mach),
            Self::ShockTemperatureRatio => normal_shock::temperature_ratio(gamma, mach),
            Self::ShockTotalPressureRatio => normal_shock::total_pressure_ratio(gamma, mach),
            Self::ShockDownstreamMach => normal_shock::downstream_mach(gamma, mach),
        })
    }

    pub(super) fn reject(self, value: f64) -> FlowError {
        FlowError::invalid(self.label(), value, self.domain())
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
