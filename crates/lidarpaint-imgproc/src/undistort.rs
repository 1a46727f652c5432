use crate::calibration::distortion::{generate_correction_map_polynomial, PolynomialDistortion};
use crate::calibration::CameraIntrinsic;
use crate::interpolation::{remap, InterpolationMode};
use lidarpaint_image::{Image, ImageError, ImageSize};

/// Applies the inverse of a polynomial distortion model to RGB images.
///
/// The correction maps depend only on the calibration and the image size, so
/// they are generated on first use and kept until an image with a different
/// size arrives.
pub struct ImageUndistorter {
    intrinsic: CameraIntrinsic,
    distortion: PolynomialDistortion,
    maps: Option<CorrectionMaps>,
}

struct CorrectionMaps {
    size: ImageSize,
    map_x: Image<f32, 1>,
    map_y: Image<f32, 1>,
}

impl ImageUndistorter {
    /// Create a new undistorter for the given calibration.
    ///
    /// # Arguments
    ///
    /// * `intrinsic` - The intrinsic parameters of the camera.
    /// * `distortion` - The distortion parameters of the camera.
    pub fn new(intrinsic: CameraIntrinsic, distortion: PolynomialDistortion) -> Self {
        Self {
            intrinsic,
            distortion,
            maps: None,
        }
    }

    /// Undistort an RGB image.
    ///
    /// # Arguments
    ///
    /// * `src` - The distorted input image.
    ///
    /// # Returns
    ///
    /// The corrected image with the same size and channel layout.
    pub fn undistort(&mut self, src: &Image<u8, 3>) -> Result<Image<u8, 3>, ImageError> {
        let size = src.size();

        let rebuild = match &self.maps {
            Some(maps) => maps.size != size,
            None => true,
        };
        if rebuild {
            let (map_x, map_y) =
                generate_correction_map_polynomial(&self.intrinsic, &self.distortion, &size)?;
            self.maps = Some(CorrectionMaps { size, map_x, map_y });
        }

        let src_f32 = src.cast_and_scale::<f32>(1.0)?;
        let mut dst_f32 = Image::from_size_val(size, 0.0f32)?;

        if let Some(maps) = &self.maps {
            remap(
                &src_f32,
                &mut dst_f32,
                &maps.map_x,
                &maps.map_y,
                InterpolationMode::Bilinear,
            )?;
        }

        Ok(Image::from_f32_image(&dst_f32))
    }
}
