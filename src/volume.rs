use crate::enums::AxisRoles;

use image::ImageBuffer;
use image::Luma;
use ndarray::Array2;
use ndarray::Array4;
use ndarray::ArrayView2;
use ndarray::Axis as NdAxis;
use rayon::prelude::*;
use thiserror::Error;

pub type GrayImage = ImageBuffer<Luma<u8>, Vec<u8>>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VolumeError {
    #[error(
        "Index ({primary}, {secondary}) out of range for extents ({primary_extent}, {secondary_extent})"
    )]
    IndexOutOfRange {
        primary: usize,
        secondary: usize,
        primary_extent: usize,
        secondary_extent: usize,
    },

    #[error("Volume shape {0:?} has an empty dimension")]
    EmptyDimension(Vec<usize>),

    #[error("Invalid axis roles: primary {primary}, secondary {secondary}")]
    InvalidAxisRoles { primary: usize, secondary: usize },
}

#[derive(Clone, Debug)]
pub struct Volume {
    data: Array4<f32>,
    roles: AxisRoles,
}

impl Volume {
    /// Wrap an in-memory array with shape (X, Y, A, B)
    pub fn from_array(data: Array4<f32>) -> Result<Self, VolumeError> {
        if data.shape().contains(&0) {
            return Err(VolumeError::EmptyDimension(data.shape().to_vec()));
        }
        Ok(Self {
            data,
            roles: AxisRoles::default(),
        })
    }

    pub fn with_roles(mut self, roles: AxisRoles) -> Self {
        self.roles = roles;
        self
    }

    pub fn roles(&self) -> AxisRoles {
        self.roles
    }

    /// Get the dimensions of the volume (X, Y, A, B)
    pub fn shape(&self) -> (usize, usize, usize, usize) {
        self.data.dim()
    }

    /// Number of positions along the primary and secondary axes
    pub fn extents(&self) -> (usize, usize) {
        let shape = self.data.shape();
        (shape[self.roles.primary()], shape[self.roles.secondary()])
    }

    /// Get a reference to the underlying data
    pub fn data(&self) -> &Array4<f32> {
        &self.data
    }

    pub fn plane_view(
        &self,
        primary: usize,
        secondary: usize,
    ) -> Result<ArrayView2<'_, f32>, VolumeError> {
        let (primary_extent, secondary_extent) = self.extents();
        if primary >= primary_extent || secondary >= secondary_extent {
            return Err(VolumeError::IndexOutOfRange {
                primary,
                secondary,
                primary_extent,
                secondary_extent,
            });
        }

        // Move the navigated axes last, then fix them from the back.
        let (rows, columns) = self.roles.plane_axes();
        Ok(self
            .data
            .view()
            .permuted_axes([rows, columns, self.roles.primary(), self.roles.secondary()])
            .index_axis_move(NdAxis(3), secondary)
            .index_axis_move(NdAxis(2), primary))
    }

    /// Copy out the plane at the given primary/secondary position.
    ///
    /// With the default roles this is `data[:, :, primary, secondary]`.
    pub fn plane_at(&self, primary: usize, secondary: usize) -> Result<Array2<f32>, VolumeError> {
        self.plane_view(primary, secondary).map(|view| view.to_owned())
    }
}

#[inline]
fn normalize_to_u8(value: f32, min: f32, range: f32) -> u8 {
    if !value.is_finite() || range <= 0.0 {
        return 0;
    }
    (((value - min) / range) * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Render a plane with a linear grayscale colormap spanning its own min/max.
///
/// Rows of the plane become image rows, so the image is `columns` wide and
/// `rows` high. Non-finite samples render black.
pub fn render_plane(plane: &ArrayView2<'_, f32>) -> Option<GrayImage> {
    let (height, width) = plane.dim();
    let (min, max) = plane
        .iter()
        .filter(|v| v.is_finite())
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let range = max - min;

    // Decoded volumes are column-major; pixels must come out row by row.
    let standard = plane.as_standard_layout();
    let pixel_data: Vec<u8> = standard
        .as_slice()?
        .par_iter()
        .map(|&v| normalize_to_u8(v, min, range))
        .collect();
    ImageBuffer::from_raw(width as u32, height as u32, pixel_data)
}
