#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Projection and colorization engine.
pub mod colorize;

/// Channel configuration for the fusion node.
pub mod config;

/// Error types for the fusion node.
pub mod error;

/// Message types exchanged with the host runtime.
pub mod messages;

/// The fusion node and its handlers.
pub mod node;

/// Frame tree lookup and transform resolution.
pub mod tf;

pub use crate::colorize::colorize_cloud;
pub use crate::config::FusionConfig;
pub use crate::error::FusionError;
pub use crate::messages::{CloudMessage, FusedCloudMessage, Header, ImageMessage};
pub use crate::node::{FusionNode, ImageFrame};
pub use crate::tf::{FrameTree, StaticFrameTree, TransformLookupError, TransformResolver};
