use crate::linalg::{transform_points3d, LinalgError};

/// A rigid body transform mapping points between two coordinate frames.
///
/// The transform is a rotation followed by a translation, no scaling or shear.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidTransform {
    /// Rotation matrix from the source to the destination frame.
    pub rotation: [[f64; 3]; 3],
    /// Translation vector from the source to the destination frame.
    pub translation: [f64; 3],
}

impl RigidTransform {
    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            rotation: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            translation: [0.0, 0.0, 0.0],
        }
    }

    /// Transform a single point into the destination frame.
    ///
    /// # Arguments
    ///
    /// * `point` - The point in the source frame.
    ///
    /// # Returns
    ///
    /// The point in the destination frame.
    pub fn apply(&self, point: &[f64; 3]) -> [f64; 3] {
        let r = &self.rotation;
        let t = &self.translation;
        [
            r[0][0] * point[0] + r[0][1] * point[1] + r[0][2] * point[2] + t[0],
            r[1][0] * point[0] + r[1][1] * point[1] + r[1][2] * point[2] + t[1],
            r[2][0] * point[0] + r[2][1] * point[1] + r[2][2] * point[2] + t[2],
        ]
    }

    /// Transform a batch of points into the destination frame.
    ///
    /// PRECONDITION: dst is a pre-allocated slice of the same size as src.
    pub fn transform_points(
        &self,
        src: &[[f64; 3]],
        dst: &mut [[f64; 3]],
    ) -> Result<(), LinalgError> {
        transform_points3d(src, &self.rotation, &self.translation, dst)
    }

    /// The inverse transform, mapping destination-frame points back to the
    /// source frame.
    ///
    /// R' = R^T, t' = -R^T * t
    pub fn inverse(&self) -> Self {
        let r = &self.rotation;
        let t = &self.translation;

        let mut rotation = [[0.0; 3]; 3];
        for (i, row) in r.iter().enumerate() {
            for (j, val) in row.iter().enumerate() {
                rotation[j][i] = *val;
            }
        }

        let translation = [
            -(rotation[0][0] * t[0] + rotation[0][1] * t[1] + rotation[0][2] * t[2]),
            -(rotation[1][0] * t[0] + rotation[1][1] * t[1] + rotation[1][2] * t[2]),
            -(rotation[2][0] * t[0] + rotation[2][1] * t[1] + rotation[2][2] * t[2]),
        ];

        Self {
            rotation,
            translation,
        }
    }
}

/// Compute the rotation matrix from an axis and angle.
///
/// # Arguments
///
/// * `axis` - The axis of rotation.
/// * `angle` - The angle of rotation.
///
/// # Returns
///
/// The rotation matrix.
///
/// Example:
///
/// ```no_run
/// use lidarpaint_3d::transforms::axis_angle_to_rotation_matrix;
///
/// let axis = [1.0, 0.0, 0.0];
/// let angle = std::f64::consts::PI / 2.0;
/// let rotation = axis_angle_to_rotation_matrix(&axis, angle).unwrap();
/// assert_eq!(rotation, [[1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]]);
/// ```
pub fn axis_angle_to_rotation_matrix(
    axis: &[f64; 3],
    angle: f64,
) -> Result<[[f64; 3]; 3], &'static str> {
    // normalize the vector
    let axis_norm = {
        let magnitude = (axis[0].powi(2) + axis[1].powi(2) + axis[2].powi(2)).sqrt();
        match magnitude < 1e-10 {
            true => return Err("cannot compute rotation matrix from a zero vector"),
            false => [
                axis[0] / magnitude,
                axis[1] / magnitude,
                axis[2] / magnitude,
            ],
        }
    };

    let x = axis_norm[0];
    let y = axis_norm[1];
    let z = axis_norm[2];

    let c = angle.cos();
    let s = angle.sin();
    let t = 1.0 - c;

    let m00 = c + x * x * t;
    let m11 = c + y * y * t;
    let m22 = c + z * z * t;

    let tmp1 = x * y * t;
    let tmp2 = z * s;

    let m10 = tmp1 + tmp2;
    let m01 = tmp1 - tmp2;

    let tmp3 = x * z * t;
    let tmp4 = y * s;

    let m20 = tmp3 - tmp4;
    let m02 = tmp3 + tmp4;

    let tmp5 = y * z * t;
    let tmp6 = x * s;

    let m12 = tmp5 - tmp6;
    let m21 = tmp5 + tmp6;

    Ok([[m00, m01, m02], [m10, m11, m12], [m20, m21, m22]])
}
