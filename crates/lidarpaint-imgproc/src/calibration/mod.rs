/// image distortion module.
pub mod distortion;

/// Represents the intrinsic parameters of a pinhole camera
///
/// # Fields
///
/// * `fx` - The focal length in the x direction
/// * `fy` - The focal length in the y direction
/// * `cx` - The x coordinate of the principal point
/// * `cy` - The y coordinate of the principal point
#[derive(Debug, Clone, PartialEq)]
pub struct CameraIntrinsic {
    /// The focal length in the x direction
    pub fx: f64,
    /// The focal length in the y direction
    pub fy: f64,
    /// The x coordinate of the principal point
    pub cx: f64,
    /// The y coordinate of the principal point
    pub cy: f64,
}

impl CameraIntrinsic {
    /// Check that the parameters describe a usable projection.
    ///
    /// The focal lengths are used as divisors during projection and must be
    /// finite and non-zero.
    pub fn is_valid(&self) -> bool {
        self.fx != 0.0
            && self.fy != 0.0
            && self.fx.is_finite()
            && self.fy.is_finite()
            && self.cx.is_finite()
            && self.cy.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::CameraIntrinsic;

    #[test]
    fn intrinsic_validity() {
        let intrinsic = CameraIntrinsic {
            fx: 100.0,
            fy: 100.0,
            cx: 50.0,
            cy: 50.0,
        };
        assert!(intrinsic.is_valid());

        let bad = CameraIntrinsic { fx: 0.0, ..intrinsic };
        assert!(!bad.is_valid());
    }
}
