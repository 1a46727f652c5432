use lidarpaint_3d::pointcloud::PointCloud;
use lidarpaint_3d::transforms::RigidTransform;
use lidarpaint_image::Image;
use lidarpaint_imgproc::calibration::CameraIntrinsic;

use crate::error::FusionError;

/// Colorize a batch of lidar points from an undistorted camera image.
///
/// Every point is transformed into the camera frame and projected through the
/// pinhole model; points that land inside the image bounds with positive
/// depth are emitted with the sampled pixel color, the rest are dropped. The
/// output keeps the points in the original lidar frame and in input order.
///
/// # Arguments
///
/// * `points` - The batch of points in the lidar sensor frame.
/// * `camera_t_lidar` - The rigid transform mapping lidar points into the camera frame.
/// * `image` - The undistorted RGB image to sample colors from.
/// * `intrinsic` - The intrinsic parameters of the camera.
///
/// # Returns
///
/// The colorized point cloud; it may contain fewer points than the input.
///
/// # Errors
///
/// If the intrinsics are unusable as projection divisors, an error is
/// returned. Per-point numeric edge cases (zero or negative depth,
/// non-finite projections) reject the point instead of erroring.
pub fn colorize_cloud(
    points: &[[f64; 3]],
    camera_t_lidar: &RigidTransform,
    image: &Image<u8, 3>,
    intrinsic: &CameraIntrinsic,
) -> Result<PointCloud, FusionError> {
    if !intrinsic.is_valid() {
        return Err(FusionError::InvalidIntrinsics);
    }

    let mut cam_points = vec![[0.0; 3]; points.len()];
    camera_t_lidar.transform_points(points, &mut cam_points)?;

    let (rows, cols) = (image.rows() as f64, image.cols() as f64);

    let mut out_points = Vec::with_capacity(points.len());
    let mut out_colors = Vec::with_capacity(points.len());

    for (point, cam_point) in points.iter().zip(cam_points.iter()) {
        let [x, y, z] = *cam_point;

        // points at or behind the camera plane are invisible, and z is a divisor
        if z <= 0.0 {
            continue;
        }

        let row = (y * intrinsic.fy / z + intrinsic.cy).round();
        let col = (x * intrinsic.fx / z + intrinsic.cx).round();

        // non-finite projections fail these comparisons and drop the point
        if !(row >= 0.0 && row < rows && col >= 0.0 && col < cols) {
            continue;
        }

        let (row, col) = (row as usize, col as usize);
        let rgb = [
            image.get_pixel(col, row, 0)?,
            image.get_pixel(col, row, 1)?,
            image.get_pixel(col, row, 2)?,
        ];

        // the output keeps the original lidar-frame coordinates
        out_points.push(*point);
        out_colors.push(rgb);
    }

    Ok(PointCloud::new(out_points, Some(out_colors)))
}
