use lidarpaint_image::Image;
use lidarpaint_imgproc::calibration::distortion::PolynomialDistortion;
use lidarpaint_imgproc::calibration::CameraIntrinsic;
use lidarpaint_imgproc::undistort::ImageUndistorter;

use crate::colorize::colorize_cloud;
use crate::config::FusionConfig;
use crate::error::FusionError;
use crate::messages::{CloudMessage, FusedCloudMessage, ImageMessage};
use crate::tf::{FrameTree, TransformResolver};

/// The latest undistorted camera frame and the frame tag it was captured in.
#[derive(Debug, Clone)]
pub struct ImageFrame {
    /// The corrected image.
    pub image: Image<u8, 3>,
    /// The coordinate frame the camera reports for this image.
    pub frame_id: String,
}

/// Fuses lidar point-cloud batches with time-synchronized camera imagery.
///
/// The node is driven by two handlers, [`FusionNode::on_image`] and
/// [`FusionNode::on_cloud`], which the host runtime calls from a
/// single-threaded dispatcher; the `&mut self` receivers encode that no two
/// handler invocations overlap. A multi-threaded host must wrap the node in
/// its own lock.
pub struct FusionNode<T: FrameTree> {
    config: FusionConfig,
    tree: T,
    intrinsic: Option<CameraIntrinsic>,
    undistorter: Option<ImageUndistorter>,
    frame: Option<ImageFrame>,
    resolver: TransformResolver,
}

impl<T: FrameTree> FusionNode<T> {
    /// Create a new fusion node.
    ///
    /// # Arguments
    ///
    /// * `config` - The channel configuration the host wires the node with.
    /// * `tree` - The frame tree service used to resolve the camera-lidar transform.
    pub fn new(config: FusionConfig, tree: T) -> Self {
        Self {
            config,
            tree,
            intrinsic: None,
            undistorter: None,
            frame: None,
            resolver: TransformResolver::new(),
        }
    }

    /// Load the camera calibration.
    ///
    /// Expected to be called once at startup, before the first messages
    /// arrive; until then both handlers stay in their not-ready paths.
    ///
    /// # Errors
    ///
    /// If the focal lengths are unusable as projection divisors, an error is
    /// returned and no calibration is stored.
    pub fn set_calibration(
        &mut self,
        intrinsic: CameraIntrinsic,
        distortion: PolynomialDistortion,
    ) -> Result<(), FusionError> {
        if !intrinsic.is_valid() {
            return Err(FusionError::InvalidIntrinsics);
        }

        self.undistorter = Some(ImageUndistorter::new(intrinsic.clone(), distortion));
        self.intrinsic = Some(intrinsic);

        Ok(())
    }

    /// The channel configuration this node was created with.
    pub fn config(&self) -> &FusionConfig {
        &self.config
    }

    /// The latest undistorted camera frame, if any arrived yet.
    pub fn latest_frame(&self) -> Option<&ImageFrame> {
        self.frame.as_ref()
    }

    /// Whether the camera-lidar transform has been resolved.
    pub fn transform_resolved(&self) -> bool {
        self.resolver.is_resolved()
    }

    /// Discard the cached camera-lidar transform, forcing a new lookup on the
    /// next point-cloud batch.
    pub fn invalidate_transform(&mut self) {
        self.resolver.invalidate();
    }

    /// The frame tree service this node queries.
    pub fn tree(&self) -> &T {
        &self.tree
    }

    /// Mutable access to the frame tree service.
    pub fn tree_mut(&mut self) -> &mut T {
        &mut self.tree
    }

    /// Handle an incoming raw image message.
    ///
    /// Decodes and undistorts the image, then replaces the stored frame and
    /// its frame tag in one assignment. On failure the previous frame is left
    /// in place so fusion keeps serving the last good image.
    ///
    /// # Errors
    ///
    /// If the message cannot be decoded into an RGB raster, or the
    /// undistortion fails, an error is returned.
    pub fn on_image(&mut self, msg: &ImageMessage) -> Result<(), FusionError> {
        let Some(undistorter) = self.undistorter.as_mut() else {
            log::info!("waiting for camera intrinsics before undistorting images");
            return Ok(());
        };

        let raw = msg.decode().map_err(|e| {
            log::error!("failed to decode image message: {e}");
            FusionError::ImageDecode(e)
        })?;

        let corrected = undistorter.undistort(&raw)?;

        self.frame = Some(ImageFrame {
            image: corrected,
            frame_id: msg.header.frame_id.clone(),
        });

        Ok(())
    }

    /// Handle an incoming point-cloud batch.
    ///
    /// Runs the readiness gate; a batch arriving before the node is ready is
    /// dropped and `Ok(None)` is returned, so the host publishes nothing for
    /// it. When ready, the whole batch is colorized and returned as one fused
    /// message carrying the input header.
    ///
    /// # Errors
    ///
    /// If the colorization itself fails, an error is returned; deferred
    /// readiness is not an error.
    pub fn on_cloud(&mut self, msg: &CloudMessage) -> Result<Option<FusedCloudMessage>, FusionError> {
        // 1. a current undistorted frame with a known frame tag
        let Some(frame) = &self.frame else {
            log::info!("waiting for current image frame");
            return Ok(None);
        };
        if frame.frame_id.is_empty() {
            log::info!("waiting for current image frame");
            return Ok(None);
        }

        // 2. the camera-lidar transform, resolved lazily from the frame tree
        let Some(transform) =
            self.resolver
                .resolve(&self.tree, &frame.frame_id, &msg.header.frame_id)
        else {
            return Ok(None);
        };

        // 3. the camera intrinsics
        let Some(intrinsic) = &self.intrinsic else {
            log::info!("waiting for camera intrinsics");
            return Ok(None);
        };

        let cloud = colorize_cloud(&msg.points, transform, &frame.image, intrinsic)?;

        Ok(Some(FusedCloudMessage {
            header: msg.header.clone(),
            cloud,
        }))
    }
}
