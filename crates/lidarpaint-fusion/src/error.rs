use lidarpaint_3d::linalg::LinalgError;
use lidarpaint_image::ImageError;

/// An error type for the fusion node.
#[derive(thiserror::Error, Debug)]
pub enum FusionError {
    /// The camera intrinsics cannot be used for projection.
    #[error("Camera intrinsics are not usable: fx and fy must be finite and non-zero")]
    InvalidIntrinsics,

    /// The incoming image message could not be decoded into an RGB raster.
    #[error("Failed to decode the incoming image message")]
    ImageDecode(#[source] ImageError),

    /// Error from an image operation.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error from a point transform operation.
    #[error(transparent)]
    Linalg(#[from] LinalgError),
}
