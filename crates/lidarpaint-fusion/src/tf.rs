use std::collections::HashMap;

use lidarpaint_3d::transforms::RigidTransform;

/// Error returned by a frame tree lookup.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformLookupError {
    /// The two frames are not yet connected in the tree.
    #[error("Transform from frame '{source}' to frame '{target}' is not available")]
    NotFound {
        /// The requested destination frame.
        target: String,
        /// The requested source frame.
        source: String,
    },
}

/// Lookup service for rigid transforms between named coordinate frames.
///
/// Implementations return the most recent available estimate and never block;
/// a transform that is not yet known is reported as
/// [`TransformLookupError::NotFound`], which callers treat as retryable.
pub trait FrameTree {
    /// Look up the transform mapping `source_frame` points into `target_frame`.
    fn lookup(
        &self,
        target_frame: &str,
        source_frame: &str,
    ) -> Result<RigidTransform, TransformLookupError>;
}

/// A frame tree backed by a static table of transforms.
#[derive(Debug, Clone, Default)]
pub struct StaticFrameTree {
    transforms: HashMap<(String, String), RigidTransform>,
}

impl StaticFrameTree {
    /// Create an empty frame tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the transform mapping `source_frame` points into `target_frame`.
    pub fn insert(&mut self, target_frame: &str, source_frame: &str, transform: RigidTransform) {
        self.transforms
            .insert((target_frame.to_string(), source_frame.to_string()), transform);
    }
}

impl FrameTree for StaticFrameTree {
    fn lookup(
        &self,
        target_frame: &str,
        source_frame: &str,
    ) -> Result<RigidTransform, TransformLookupError> {
        self.transforms
            .get(&(target_frame.to_string(), source_frame.to_string()))
            .cloned()
            .ok_or_else(|| TransformLookupError::NotFound {
                target: target_frame.to_string(),
                source: source_frame.to_string(),
            })
    }
}

/// Lazily resolved rigid transform between two frames.
///
/// The resolver starts unresolved, performs a lookup on demand, and keeps the
/// first successful result for the rest of the process lifetime. There is no
/// automatic back-transition; [`TransformResolver::invalidate`] forces a new
/// lookup for flows that recalibrate at runtime.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TransformResolver {
    /// No transform has been acquired yet.
    #[default]
    Unresolved,
    /// The transform was acquired and is reused for all subsequent batches.
    Resolved(RigidTransform),
}

impl TransformResolver {
    /// Create a new unresolved resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a transform has been acquired.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// The cached transform, if resolved.
    pub fn cached(&self) -> Option<&RigidTransform> {
        match self {
            Self::Resolved(transform) => Some(transform),
            Self::Unresolved => None,
        }
    }

    /// Attempt to resolve the transform from the frame tree.
    ///
    /// If already resolved, the cached transform is returned without touching
    /// the tree. A failed lookup is logged and left to be retried on the next
    /// call.
    ///
    /// # Arguments
    ///
    /// * `tree` - The frame tree service to query.
    /// * `target_frame` - The destination frame of the transform.
    /// * `source_frame` - The source frame of the transform.
    pub fn resolve(
        &mut self,
        tree: &impl FrameTree,
        target_frame: &str,
        source_frame: &str,
    ) -> Option<&RigidTransform> {
        if !self.is_resolved() {
            match tree.lookup(target_frame, source_frame) {
                Ok(transform) => {
                    log::info!(
                        "transform from '{source_frame}' to '{target_frame}' acquired"
                    );
                    *self = Self::Resolved(transform);
                }
                Err(e) => {
                    log::info!("{e}");
                }
            }
        }

        self.cached()
    }

    /// Discard the cached transform and force a new lookup on the next
    /// [`TransformResolver::resolve`] call.
    pub fn invalidate(&mut self) {
        *self = Self::Unresolved;
    }
}
