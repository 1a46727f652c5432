#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use lidarpaint_image as image;

#[doc(inline)]
pub use lidarpaint_imgproc as imgproc;

#[doc(inline)]
pub use lidarpaint_3d as l3d;

#[doc(inline)]
pub use lidarpaint_fusion as fusion;
