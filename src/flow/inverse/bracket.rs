//! Bracketed inversion of monotonic relations with bisection.

use std::convert::Infallible;

use tracing::debug;
use twine_core::{EquationProblem, Model};
use twine_solvers::equation::bisection;

use crate::flow::FlowError;

use super::{BisectionConfig, Inversion, SolveMethod, admissible};

/// Number of times a bracket end may be doubled or halved while searching
/// for a sign change.
const MAX_WIDENINGS: usize = 64;

/// Relative mismatch always accepted between the relation at the root and
/// the target.
const RESIDUAL_REL_TOL: f64 = 1e-6;

/// Model adapter exposing a forward relation `M ↦ value` to the solver.
struct Relation<F> {
    eval: F,
}

impl<F> Model for Relation<F>
where
    F: Fn(f64) -> Result<f64, FlowError>,
{
    type Input = f64;
    type Output = f64;
    type Error = FlowError;

    fn call(&self, mach: &Self::Input) -> Result<Self::Output, Self::Error> {
        (self.eval)(*mach)
    }
}

/// Equation problem with residual `value(M) − target`.
struct Target {
    value: f64,
}

impl EquationProblem<1> for Target {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(x[0])
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output - self.value])
    }
}

/// Scales `start` by `factor` until `crossed` holds for the relation's value.
///
/// Overflow counts as crossing, since the relations bracketed here only
/// overflow where they grow without bound.
///
/// # Errors
///
/// Returns [`FlowError::NonConvergence`] if no crossing is found, and any
/// non-overflow error of the relation.
pub(super) fn widen(
    eval: impl Fn(f64) -> Result<f64, FlowError>,
    start: f64,
    factor: f64,
    crossed: impl Fn(f64) -> bool,
) -> Result<f64, FlowError> {
    let mut x = start;
    for _ in 0..MAX_WIDENINGS {
        match eval(x) {
            Ok(value) if !crossed(value) => x *= factor,
            Ok(_) | Err(FlowError::Overflow { .. }) => return Ok(x),
            Err(err) => return Err(err),
        }
    }
    Err(FlowError::NonConvergence {
        last: x,
        iters: MAX_WIDENINGS,
    })
}

/// Solves `eval(M) = target` for `M` in `bracket`.
///
/// # Errors
///
/// Returns [`FlowError::Bisection`] if the solver rejects the bracket or
/// config, and [`FlowError::NonConvergence`] if it runs out of iterations or
/// the relation at the converged Mach number misses the target by more than
/// the Mach tolerance accounts for.
pub(super) fn solve(
    eval: impl Fn(f64) -> Result<f64, FlowError>,
    target: f64,
    bracket: [f64; 2],
    config: &BisectionConfig,
) -> Result<Inversion, FlowError> {
    let model = Relation { eval };
    let problem = Target { value: target };

    let solution = bisection::solve(
        &model,
        &problem,
        bracket,
        &config.bisection(),
        |event: &bisection::Event<'_, _, _>| {
            // Evaluation fails only where the relation overflows, which is
            // always on the high side of the target.
            if event.result().is_err() {
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    )?;

    if solution.status != bisection::Status::Converged
        || !reaches_target(&model.eval, target, solution.x, solution.residual, config)
    {
        debug!(
            mach = solution.x,
            residual = solution.residual,
            target,
            "bisection did not reach the target"
        );
        return Err(FlowError::NonConvergence {
            last: solution.x,
            iters: solution.iters,
        });
    }

    debug!(
        mach = solution.x,
        residual = solution.residual,
        iters = solution.iters,
        "bisection converged"
    );

    Ok(Inversion {
        mach: admissible(solution.x)?,
        method: SolveMethod::Bisection,
        iters: solution.iters,
    })
}

/// Whether the relation at `x` matches the target as closely as the Mach
/// tolerance can resolve.
///
/// Bisection stops on the Mach tolerance alone. A relation that is flat
/// around `x` (a plateau of underflowed values, say) converges without ever
/// approaching the target, and has no spread to account for the residual.
fn reaches_target(
    eval: impl Fn(f64) -> Result<f64, FlowError>,
    target: f64,
    x: f64,
    residual: f64,
    config: &BisectionConfig,
) -> bool {
    if residual.abs() <= RESIDUAL_REL_TOL * target.abs() {
        return true;
    }
    let step = config.x_abs_tol + config.x_rel_tol * x.abs();
    match (eval(x - step), eval(x + step)) {
        (Ok(below), Ok(above)) => residual.abs() <= (above - below).abs(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn inverts_a_monotonic_relation() {
        let inversion = solve(
            |m| Ok(m * m * m),
            8.0,
            [1.0, 4.0],
            &BisectionConfig::default(),
        )
        .unwrap();

        assert_eq!(inversion.method, SolveMethod::Bisection);
        assert_relative_eq!(*inversion.mach, 2.0, max_relative = 1e-10);
    }

    #[test]
    fn flat_relation_misses_the_target() {
        // Falls to zero at M = 2 and stays there, never reaching the target.
        let result = solve(
            |m| Ok(if m < 2.0 { 2.0 - m } else { 0.0 }),
            1e-100,
            [1.0, 4.0],
            &BisectionConfig::default(),
        );

        assert!(matches!(result, Err(FlowError::NonConvergence { .. })));
    }

    #[test]
    fn steep_relation_is_resolved_to_the_mach_tolerance() {
        // ν ∝ (M − 1)^(3/2) near sonic; a tiny target leaves a residual far
        // larger than its own size but within one Mach tolerance step.
        let nu = |m: f64| Ok((m - 1.0).max(0.0).powf(1.5));
        let inversion = solve(nu, 1e-16, [1.0, 2.0], &BisectionConfig::default()).unwrap();

        assert_relative_eq!(*inversion.mach, 1.0 + 1e-16_f64.powf(2.0 / 3.0), epsilon = 1e-11);
    }

    #[test]
    fn widen_doubles_until_crossing() {
        let hi = widen(|m| Ok(m), 2.0, 2.0, |value| value > 100.0).unwrap();
        assert_relative_eq!(hi, 128.0);
    }

    #[test]
    fn widen_treats_overflow_as_crossing() {
        let hi = widen(
            |m| {
                if m > 10.0 {
                    Err(FlowError::Overflow {
                        context: "test".into(),
                    })
                } else {
                    Ok(0.0)
                }
            },
            1.0,
            2.0,
            |value| value > 1.0,
        )
        .unwrap();
        assert_relative_eq!(hi, 16.0);
    }

    #[test]
    fn widen_gives_up() {
        assert!(matches!(
            widen(|_| Ok(0.0), 1.0, 2.0, |value| value > 1.0),
            Err(FlowError::NonConvergence { .. })
        ));
    }
}
