use crate::utils;

/// An error type for the linalg module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum LinalgError {
    /// The source and destination slices have different lengths.
    #[error("Source ({0}) and destination ({1}) must have the same length")]
    LengthMismatch(usize, usize),
}

/// Transform a set of 3D points using a rotation and translation.
///
/// # Arguments
///
/// * `src_points` - A set of points to be transformed.
/// * `dst_r_src` - A rotation matrix from the source to the destination frame.
/// * `dst_t_src` - A translation vector from the source to the destination frame.
/// * `dst_points` - A pre-allocated vector to store the transformed points.
///
/// PRECONDITION: dst_points is a pre-allocated vector of the same size as source.
///
/// Example:
///
/// ```no_run
/// use lidarpaint_3d::linalg::transform_points3d;
///
/// let src_points = vec![[2.0, 2.0, 2.0], [3.0, 4.0, 5.0]];
/// let rotation = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
/// let translation = [0.0, 0.0, 0.0];
/// let mut dst_points = vec![[0.0; 3]; src_points.len()];
/// transform_points3d(&src_points, &rotation, &translation, &mut dst_points).unwrap();
/// ```
pub fn transform_points3d(
    src_points: &[[f64; 3]],
    dst_r_src: &[[f64; 3]; 3],
    dst_t_src: &[f64; 3],
    dst_points: &mut [[f64; 3]],
) -> Result<(), LinalgError> {
    if src_points.len() != dst_points.len() {
        return Err(LinalgError::LengthMismatch(
            src_points.len(),
            dst_points.len(),
        ));
    }

    // create views of the rotation and translation matrices
    let dst_r_src_mat = utils::array33_to_faer_mat33(dst_r_src);
    let dst_t_src_col = utils::array3_to_faer_col(dst_t_src);

    // create view of the source points
    let points_in_src = {
        let src_points_slice = unsafe {
            std::slice::from_raw_parts(src_points.as_ptr() as *const f64, src_points.len() * 3)
        };
        // SAFETY: src_points_slice is an Nx3 matrix where each row represents a 3D point
        faer::mat::from_row_major_slice(src_points_slice, src_points.len(), 3)
    };

    // create a mutable view of the destination points
    let mut points_in_dst = {
        let dst_points_slice = unsafe {
            std::slice::from_raw_parts_mut(
                dst_points.as_mut_ptr() as *mut f64,
                dst_points.len() * 3,
            )
        };
        // SAFETY: dst_points_slice is a 3xN matrix where each column represents a 3D point
        faer::mat::from_column_major_slice_mut(dst_points_slice, 3, dst_points.len())
    };

    // perform the matrix multiplication
    faer::linalg::matmul::matmul(
        &mut points_in_dst,
        dst_r_src_mat,
        points_in_src.transpose(),
        None,
        1.0,
        faer::Parallelism::None,
    );

    let (tx, ty, tz) = (
        dst_t_src_col.read(0),
        dst_t_src_col.read(1),
        dst_t_src_col.read(2),
    );

    for mut col in points_in_dst.col_iter_mut() {
        col.write(0, col.read(0) + tx);
        col.write(1, col.read(1) + ty);
        col.write(2, col.read(2) + tz);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_transform_points3d_identity() -> Result<(), LinalgError> {
        let src_points = vec![[2.0, 2.0, 2.0], [3.0, 4.0, 5.0]];
        let rotation = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        let translation = [0.0, 0.0, 0.0];
        let mut dst_points = vec![[0.0; 3]; src_points.len()];
        transform_points3d(&src_points, &rotation, &translation, &mut dst_points)?;

        assert_eq!(dst_points, src_points);

        Ok(())
    }

    #[test]
    fn test_transform_points3d_rotation_translation() -> Result<(), LinalgError> {
        // 90 degrees around the x axis plus a shift
        let src_points = vec![[0.0, 1.0, 0.0]];
        let rotation = [[1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]];
        let translation = [1.0, 2.0, 3.0];
        let mut dst_points = vec![[0.0; 3]; src_points.len()];
        transform_points3d(&src_points, &rotation, &translation, &mut dst_points)?;

        assert_relative_eq!(dst_points[0][0], 1.0);
        assert_relative_eq!(dst_points[0][1], 2.0);
        assert_relative_eq!(dst_points[0][2], 4.0);

        Ok(())
    }

    #[test]
    fn test_transform_points3d_length_mismatch() {
        let src_points = vec![[0.0, 1.0, 0.0]];
        let rotation = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        let translation = [0.0, 0.0, 0.0];
        let mut dst_points = vec![[0.0; 3]; 2];
        let res = transform_points3d(&src_points, &rotation, &translation, &mut dst_points);
        assert_eq!(res, Err(LinalgError::LengthMismatch(1, 2)));
    }
}
