//! Convolution kernel type

use crate::image_pipeline::common::error::{PipelineError, Result};

/// A square matrix of signed weights with an odd side length.
///
/// Weights are stored row-major. A kernel is immutable once built and can be
/// shared by any number of convolution calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    side: usize,
    weights: Vec<f32>,
}

impl Kernel {
    /// Builds a kernel from row-major weights.
    ///
    /// Fails with `InvalidKernel` when `side` is even or zero, or when the
    /// number of weights is not `side * side`.
    pub fn new(side: usize, weights: Vec<f32>) -> Result<Self> {
        if side == 0 || side % 2 == 0 || weights.len() != side * side {
            return Err(PipelineError::InvalidKernel {
                side,
                weights: weights.len(),
            });
        }

        Ok(Self { side, weights })
    }

    /// A kernel that reproduces its input: every weight is zero except the centre.
    pub fn identity(side: usize) -> Result<Self> {
        let mut weights = vec![0.0; side * side];
        if let Some(centre) = weights.get_mut(side * side / 2) {
            *centre = 1.0;
        }
        Self::new(side, weights)
    }

    /// The 3x3 cross sharpening kernel.
    pub fn sharpen() -> Self {
        Self {
            side: 3,
            weights: vec![0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0],
        }
    }

    /// A normalised box blur of the given side.
    pub fn box_blur(side: usize) -> Result<Self> {
        let area = (side * side).max(1) as f32;
        Self::new(side, vec![1.0 / area; side * side])
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Distance from the centre tap to the kernel edge.
    pub fn radius(&self) -> usize {
        self.side / 2
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Weight at column `kx`, row `ky` of the kernel.
    #[inline]
    pub fn weight(&self, kx: usize, ky: usize) -> f32 {
        self.weights[ky * self.side + kx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_even_side() {
        let result = Kernel::new(2, vec![0.25; 4]);
        assert!(matches!(
            result,
            Err(PipelineError::InvalidKernel { side: 2, weights: 4 })
        ));
    }

    #[test]
    fn test_rejects_zero_side_and_wrong_weight_count() {
        assert!(Kernel::new(0, Vec::new()).is_err());
        assert!(Kernel::new(3, vec![1.0; 8]).is_err());
    }

    #[test]
    fn test_identity_has_single_centre_weight() {
        let kernel = Kernel::identity(5).unwrap();
        assert_eq!(kernel.radius(), 2);
        assert_eq!(kernel.weight(2, 2), 1.0);
        assert_eq!(kernel.weights().iter().sum::<f32>(), 1.0);
    }

    #[test]
    fn test_box_blur_is_normalised() {
        let kernel = Kernel::box_blur(3).unwrap();
        let total: f32 = kernel.weights().iter().sum();
        assert!((total - 1.0).abs() < 1e-6);
    }
}
