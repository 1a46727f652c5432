use lidarpaint_3d::transforms::RigidTransform;
use lidarpaint_fusion::{
    CloudMessage, FusionConfig, FusionError, FusionNode, Header, ImageMessage, StaticFrameTree,
};
use lidarpaint_imgproc::calibration::distortion::PolynomialDistortion;
use lidarpaint_imgproc::calibration::CameraIntrinsic;

const CAMERA_FRAME: &str = "camera_optical";
const LIDAR_FRAME: &str = "lidar";

fn test_intrinsic() -> CameraIntrinsic {
    CameraIntrinsic {
        fx: 100.0,
        fy: 100.0,
        cx: 50.0,
        cy: 50.0,
    }
}

fn image_message(val: u8) -> ImageMessage {
    ImageMessage {
        header: Header {
            frame_id: CAMERA_FRAME.to_string(),
            acq_time: 1_000,
            sequence: 1,
        },
        width: 100,
        height: 100,
        data: vec![val; 100 * 100 * 3],
    }
}

fn cloud_message(points: Vec<[f64; 3]>) -> CloudMessage {
    CloudMessage {
        header: Header {
            frame_id: LIDAR_FRAME.to_string(),
            acq_time: 2_000,
            sequence: 5,
        },
        points,
    }
}

fn ready_node() -> Result<FusionNode<StaticFrameTree>, FusionError> {
    let mut tree = StaticFrameTree::new();
    tree.insert(CAMERA_FRAME, LIDAR_FRAME, RigidTransform::identity());

    let mut node = FusionNode::new(FusionConfig::default(), tree);
    node.set_calibration(test_intrinsic(), PolynomialDistortion::none())?;
    node.on_image(&image_message(20))?;

    Ok(node)
}

#[test]
fn cloud_before_image_produces_no_output() -> Result<(), FusionError> {
    let mut tree = StaticFrameTree::new();
    tree.insert(CAMERA_FRAME, LIDAR_FRAME, RigidTransform::identity());

    let mut node = FusionNode::new(FusionConfig::default(), tree);
    node.set_calibration(test_intrinsic(), PolynomialDistortion::none())?;

    let out = node.on_cloud(&cloud_message(vec![[0.0, 0.0, 1.0]]))?;
    assert!(out.is_none());
    assert!(!node.transform_resolved());

    Ok(())
}

#[test]
fn cloud_before_transform_produces_no_output() -> Result<(), FusionError> {
    // empty tree, the transform cannot resolve yet
    let mut node = FusionNode::new(FusionConfig::default(), StaticFrameTree::new());
    node.set_calibration(test_intrinsic(), PolynomialDistortion::none())?;
    node.on_image(&image_message(20))?;

    let out = node.on_cloud(&cloud_message(vec![[0.0, 0.0, 1.0]]))?;
    assert!(out.is_none());

    // once the frames connect, the next batch goes through
    node.tree_mut()
        .insert(CAMERA_FRAME, LIDAR_FRAME, RigidTransform::identity());
    let out = node.on_cloud(&cloud_message(vec![[0.0, 0.0, 1.0]]))?;
    assert!(out.is_some());

    Ok(())
}

#[test]
fn image_without_intrinsics_keeps_node_not_ready() -> Result<(), FusionError> {
    let mut tree = StaticFrameTree::new();
    tree.insert(CAMERA_FRAME, LIDAR_FRAME, RigidTransform::identity());

    let mut node = FusionNode::new(FusionConfig::default(), tree);

    // no calibration loaded: the image is ignored, the cloud is gated out
    node.on_image(&image_message(20))?;
    assert!(node.latest_frame().is_none());

    let out = node.on_cloud(&cloud_message(vec![[0.0, 0.0, 1.0]]))?;
    assert!(out.is_none());

    Ok(())
}

#[test]
fn ready_node_emits_one_batch_per_input() -> Result<(), FusionError> {
    let mut node = ready_node()?;

    let msg = cloud_message(vec![[-0.4, 0.3, 2.0], [1.0, 1.0, -1.0]]);
    let out = node.on_cloud(&msg)?;

    let fused = out.expect("node is ready, one output batch expected");
    assert_eq!(fused.header, msg.header);
    assert_eq!(fused.cloud.len(), 1);
    assert_eq!(fused.cloud.points()[0], [-0.4, 0.3, 2.0]);
    assert_eq!(fused.cloud.colors().map(|c| c[0]), Some([20, 20, 20]));

    Ok(())
}

#[test]
fn all_points_rejected_still_emits_empty_batch() -> Result<(), FusionError> {
    let mut node = ready_node()?;

    // fusion ran but found nothing: an empty message, not a missing one
    let out = node.on_cloud(&cloud_message(vec![[1.0, 1.0, -1.0]]))?;
    let fused = out.expect("node is ready, one output batch expected");
    assert!(fused.cloud.is_empty());

    Ok(())
}

#[test]
fn decode_failure_keeps_last_good_frame() -> Result<(), FusionError> {
    let mut node = ready_node()?;

    let mut bad = image_message(200);
    bad.data.truncate(17);

    let res = node.on_image(&bad);
    assert!(matches!(res, Err(FusionError::ImageDecode(_))));

    // the previous frame keeps serving colorization
    let out = node.on_cloud(&cloud_message(vec![[0.0, 0.0, 1.0]]))?;
    let fused = out.expect("node is ready, one output batch expected");
    assert_eq!(fused.cloud.colors().map(|c| c[0]), Some([20, 20, 20]));

    Ok(())
}

#[test]
fn transform_lookup_happens_once() -> Result<(), FusionError> {
    let mut node = ready_node()?;

    node.on_cloud(&cloud_message(vec![[0.0, 0.0, 1.0]]))?;
    assert!(node.transform_resolved());

    // with the transform cached, removing it from the tree changes nothing
    *node.tree_mut() = StaticFrameTree::new();
    let out = node.on_cloud(&cloud_message(vec![[0.0, 0.0, 1.0]]))?;
    assert!(out.is_some());

    // invalidation forces a fresh lookup, which now fails
    node.invalidate_transform();
    let out = node.on_cloud(&cloud_message(vec![[0.0, 0.0, 1.0]]))?;
    assert!(out.is_none());

    Ok(())
}

#[test]
fn new_image_replaces_frame_wholesale() -> Result<(), FusionError> {
    let mut node = ready_node()?;

    node.on_image(&image_message(77))?;

    let out = node.on_cloud(&cloud_message(vec![[0.0, 0.0, 1.0]]))?;
    let fused = out.expect("node is ready, one output batch expected");
    assert_eq!(fused.cloud.colors().map(|c| c[0]), Some([77, 77, 77]));

    Ok(())
}
