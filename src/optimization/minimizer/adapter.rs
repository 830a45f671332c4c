//! Adapter that exposes a user `Objective` as an `argmin` problem.
//!
//! The objective is already the quantity argmin minimizes, so values and
//! gradients pass through unchanged; the adapter only adds the finiteness and
//! shape checks argmin does not perform on its own.
use crate::optimization::{
    errors::OptError,
    minimizer::{
        traits::Objective,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};

/// Bridges a user [`Objective`] to `argmin`'s `CostFunction` and `Gradient`.
#[derive(Debug, Clone)]
pub struct ObjectiveAdapter<'a, F: Objective> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: Objective> CostFunction for ObjectiveAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate `f(θ)`.
    ///
    /// # Errors
    /// - Propagates any `OptError` from the objective.
    /// - `NonFiniteCost` if the value is NaN or infinite.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.value(theta, self.data)?;
        if !output.is_finite() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(output)
    }
}

impl<'a, F: Objective> Gradient for ObjectiveAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Evaluate `∇f(θ)`, checking its length against `θ` and its entries
    /// for finiteness.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let g = self.f.gradient(theta, self.data)?;
        validate_grad(&g, theta.len())?;
        Ok(g)
    }
}

impl<'a, F: Objective> ObjectiveAdapter<'a, F> {
    /// Construct a new adapter over an objective and its data.
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptResult;
    use ndarray::array;

    // Objective returning +∞ away from the origin and a wrong-length gradient.
    struct Broken;

    impl Objective for Broken {
        type Data = ();

        fn value(&self, theta: &Theta, _: &()) -> OptResult<Cost> {
            Ok(if theta.iter().all(|&v| v == 0.0) { 0.0 } else { f64::INFINITY })
        }

        fn gradient(&self, _theta: &Theta, _: &()) -> OptResult<Grad> {
            Ok(array![0.0])
        }

        fn check(&self, _theta: &Theta, _: &()) -> OptResult<()> {
            Ok(())
        }
    }

    #[test]
    // Purpose
    // -------
    // Non-finite costs and mis-sized gradients surface as errors that convert
    // back into the matching `OptError`.
    fn adapter_rejects_non_finite_cost_and_bad_gradient() {
        // Arrange
        let adapter = ObjectiveAdapter::new(&Broken, &());

        // Act
        let ok = adapter.cost(&array![0.0, 0.0]);
        let cost_err = adapter.cost(&array![1.0, 0.0]).unwrap_err();
        let grad_err = adapter.gradient(&array![1.0, 0.0]).unwrap_err();

        // Assert
        assert_eq!(ok.unwrap(), 0.0);
        assert_eq!(OptError::from(cost_err), OptError::NonFiniteCost { value: f64::INFINITY });
        assert_eq!(
            OptError::from(grad_err),
            OptError::GradientDimMismatch { expected: 2, found: 1 }
        );
    }
}
