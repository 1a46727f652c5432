use serde::Deserialize;

/// Channel configuration for the fusion node.
///
/// The host runtime wires the node's inputs and output to these channel
/// names; every field falls back to its documented default when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Channel delivering raw camera images.
    pub image_input: String,
    /// Channel delivering lidar point-cloud batches.
    pub cloud_input: String,
    /// Channel on which fused clouds are published.
    pub fusion_output: String,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            image_input: "/cv_camera/image_raw".to_string(),
            cloud_input: "/velodyne_points".to_string(),
            fusion_output: "/fusion_cloud".to_string(),
        }
    }
}
