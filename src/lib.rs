//! # NIfTI-view library
//!
//! This crate serves a small API for browsing 4-D NIfTI volumes plane by
//! plane.
//!
//! A volume with shape `(X, Y, A, B)` is loaded from a `.nii` or `.nii.gz`
//! file. Two bounded counters pick a position on the third ("image") and
//! fourth ("slice") axes, and the `X × Y` plane at that position is rendered
//! as a grayscale image scaled to the plane's own value range. Which two axes
//! are navigated can be changed with [`AxisRoles`].
//!
//! Decoding is done by the `nifti` crate; the viewer itself is synchronous
//! and keeps at most one volume at a time.
//!
//! # Examples
//!
//! ## Rendering one plane of a file
//!
//! ```no_run
//! # use nifti_view::Viewer;
//! let mut viewer = Viewer::new();
//! viewer.load("scan.nii.gz").expect("should have loaded the volume");
//! println!("{}", viewer.current_shape_label());
//!
//! viewer.next_image();
//! viewer.set_slice(3);
//! let image = viewer.render().expect("should have rendered the plane");
//! image.save("plane.png").expect("should have written the image");
//! ```
//!
//! ## Re-rendering on every change
//!
//! ```no_run
//! # use nifti_view::Viewer;
//! let mut viewer = Viewer::new();
//! viewer.on_selection_changed(|selection| {
//!     println!("now showing image {}, slice {}", selection.primary, selection.secondary);
//! });
//! viewer.load("scan.nii").expect("should have loaded the volume");
//! ```

pub mod axis_selector;
pub mod enums;
pub mod viewer;
pub mod volume;
pub mod volume_loader;

pub use axis_selector::{AxisSelector, Selection};
pub use enums::{Axis, AxisRoles, Direction};
pub use viewer::{Viewer, ViewerError};
pub use volume::{GrayImage, Volume, VolumeError};
pub use volume_loader::{VolumeLoader, VolumeLoaderError};
