use lidarpaint_3d::pointcloud::PointCloud;
use lidarpaint_image::{Image, ImageError, ImageSize};

/// Message header carrying the coordinate frame tag and the capture time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    /// Name of the coordinate reference frame the payload is expressed in.
    pub frame_id: String,
    /// Acquisition time in nanoseconds since the epoch.
    pub acq_time: u64,
    /// Monotonic sequence number assigned by the producer.
    pub sequence: u32,
}

/// A raw RGB image message as delivered by the camera driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMessage {
    /// Message header.
    pub header: Header,
    /// Width of the image in pixels.
    pub width: usize,
    /// Height of the image in pixels.
    pub height: usize,
    /// Interleaved RGB8 pixel data, row-major.
    pub data: Vec<u8>,
}

impl ImageMessage {
    /// Decode the message payload into an image container.
    ///
    /// # Errors
    ///
    /// If the payload length does not match the advertised dimensions, an
    /// error is returned.
    pub fn decode(&self) -> Result<Image<u8, 3>, ImageError> {
        Image::new(
            ImageSize {
                width: self.width,
                height: self.height,
            },
            self.data.clone(),
        )
    }
}

/// A point cloud batch message as delivered by the lidar driver.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudMessage {
    /// Message header.
    pub header: Header,
    /// The points of the batch in the lidar sensor frame.
    pub points: Vec<[f64; 3]>,
}

/// A colorized point cloud batch produced by the fusion node.
///
/// The header is copied verbatim from the triggering input batch, so the
/// geometry stays expressed in the original lidar frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FusedCloudMessage {
    /// Message header, copied from the input batch.
    pub header: Header,
    /// The colorized points.
    pub cloud: PointCloud,
}
