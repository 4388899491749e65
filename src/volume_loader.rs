use crate::volume::{Volume, VolumeError};

use log::{debug, info};
use ndarray::{Axis, Ix4};
use nifti::volume::ndarray::IntoNdArray;
use nifti::{NiftiObject, ReaderOptions};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VolumeLoaderError {
    #[error("Unsupported file {0} (expected .nii or .nii.gz)")]
    UnsupportedExtension(PathBuf),

    #[error("Expected a 4-D volume, got shape {0:?}")]
    Dimensionality(Vec<usize>),

    #[error(transparent)]
    Volume(#[from] VolumeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("NIfTI error: {0}")]
    Nifti(#[from] nifti::error::NiftiError),
}

pub struct VolumeLoader;

impl VolumeLoader {
    /// Load a 4-D volume from a `.nii` or `.nii.gz` file
    ///
    /// Trailing dimensions past the fourth are accepted only when their
    /// extent is 1.
    ///
    /// # Errors
    ///
    /// Returns error if the file is missing, cannot be decoded, or does not
    /// hold a 4-D volume
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Volume, VolumeLoaderError> {
        let path = path.as_ref();
        if !Self::has_nifti_extension(path) {
            return Err(VolumeLoaderError::UnsupportedExtension(path.to_path_buf()));
        }
        fs::metadata(path)?;

        debug!("Reading NIfTI file {}", path.display());
        let object = ReaderOptions::new().read_file(path)?;
        let array = object.into_volume().into_ndarray::<f32>()?;

        let shape = array.shape().to_vec();
        if shape.len() < 4 || shape[4..].iter().any(|&extent| extent != 1) {
            return Err(VolumeLoaderError::Dimensionality(shape));
        }

        let mut array = array;
        while array.ndim() > 4 {
            let last = array.ndim() - 1;
            array = array.index_axis_move(Axis(last), 0);
        }
        let array = array
            .into_dimensionality::<Ix4>()
            .map_err(|_| VolumeLoaderError::Dimensionality(shape.clone()))?;

        let volume = Volume::from_array(array)?;
        info!("Loaded {} with shape {:?}", path.display(), volume.shape());
        Ok(volume)
    }

    pub fn has_nifti_extension(path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.to_ascii_lowercase())
            .is_some_and(|name| name.ends_with(".nii") || name.ends_with(".nii.gz"))
    }
}
