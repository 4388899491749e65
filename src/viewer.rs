use crate::axis_selector::{AxisSelector, Selection};
use crate::enums::{Axis, AxisRoles, Direction};
use crate::volume::{GrayImage, Volume, VolumeError, render_plane};
use crate::volume_loader::{VolumeLoader, VolumeLoaderError};

use log::{debug, warn};
use ndarray::Array2;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("No volume loaded")]
    NoVolumeLoaded,

    #[error(transparent)]
    Load(#[from] VolumeLoaderError),

    #[error(transparent)]
    Volume(#[from] VolumeError),

    #[error("Could not build an image from the current plane")]
    Render,
}

type Listener = Box<dyn FnMut(&Selection)>;

/// A viewing session: at most one volume plus the selector over it.
///
/// The session is `Empty` until the first successful load and `Loaded`
/// afterwards. Failed loads leave both the volume and the selector as they
/// were. Registered listeners hear about every change of the selection,
/// including the reset that follows a load.
#[derive(Default)]
pub struct Viewer {
    volume: Option<Volume>,
    selector: AxisSelector,
    roles: AxisRoles,
    listeners: Vec<Listener>,
}

impl Viewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roles(roles: AxisRoles) -> Self {
        Self {
            roles,
            ..Self::default()
        }
    }

    pub fn on_selection_changed(&mut self, listener: impl FnMut(&Selection) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn is_loaded(&self) -> bool {
        self.volume.is_some()
    }

    pub fn volume(&self) -> Option<&Volume> {
        self.volume.as_ref()
    }

    pub fn selection(&self) -> Selection {
        self.selector.value()
    }

    pub fn selector(&self) -> &AxisSelector {
        &self.selector
    }

    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), ViewerError> {
        let path = path.as_ref();
        let volume = VolumeLoader::load_from_file(path).inspect_err(|err| {
            warn!("Failed to load {}: {err}", path.display());
        })?;
        self.load_volume(volume);
        Ok(())
    }

    /// Replace the current volume and reset the selector to its extents
    pub fn load_volume(&mut self, volume: Volume) {
        let volume = volume.with_roles(self.roles);
        let (primary_extent, secondary_extent) = volume.extents();
        self.selector.set_bounds(primary_extent, secondary_extent);
        self.volume = Some(volume);
        self.notify();
    }

    pub fn step(&mut self, axis: Axis, direction: Direction) -> bool {
        let changed = self.selector.step(axis, direction);
        if changed {
            self.notify();
        }
        changed
    }

    pub fn set(&mut self, axis: Axis, value: usize) -> bool {
        let changed = self.selector.set(axis, value);
        if changed {
            self.notify();
        }
        changed
    }

    pub fn next_image(&mut self) -> bool {
        self.step(Axis::Primary, Direction::Next)
    }

    pub fn prev_image(&mut self) -> bool {
        self.step(Axis::Primary, Direction::Previous)
    }

    pub fn next_slice(&mut self) -> bool {
        self.step(Axis::Secondary, Direction::Next)
    }

    pub fn prev_slice(&mut self) -> bool {
        self.step(Axis::Secondary, Direction::Previous)
    }

    pub fn set_image(&mut self, value: usize) -> bool {
        self.set(Axis::Primary, value)
    }

    pub fn set_slice(&mut self, value: usize) -> bool {
        self.set(Axis::Secondary, value)
    }

    pub fn shape(&self) -> Result<(usize, usize, usize, usize), ViewerError> {
        Ok(self.loaded()?.shape())
    }

    pub fn current_plane(&self) -> Result<Array2<f32>, ViewerError> {
        let selection = self.selector.value();
        Ok(self
            .loaded()?
            .plane_at(selection.primary, selection.secondary)?)
    }

    pub fn render(&self) -> Result<GrayImage, ViewerError> {
        let selection = self.selector.value();
        let plane = self
            .loaded()?
            .plane_view(selection.primary, selection.secondary)?;
        debug!("Rendering plane at {selection:?}");
        render_plane(&plane).ok_or(ViewerError::Render)
    }

    pub fn current_shape_label(&self) -> String {
        match &self.volume {
            Some(volume) => format!("Image Shape: {:?}", volume.shape()),
            None => "No image loaded".to_string(),
        }
    }

    fn loaded(&self) -> Result<&Volume, ViewerError> {
        self.volume.as_ref().ok_or(ViewerError::NoVolumeLoaded)
    }

    fn notify(&mut self) {
        let selection = self.selector.value();
        debug!("Selection changed to {selection:?}");
        for listener in &mut self.listeners {
            listener(&selection);
        }
    }
}
