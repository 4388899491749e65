use ndarray::{Array, Array4, ArrayD, IxDyn};
use nifti::writer::WriterOptions;
use nifti_view::{Selection, Viewer, ViewerError, VolumeLoader, VolumeLoaderError};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Each voxel holds `x*1000 + y*100 + a*10 + b`
fn indexed(shape: (usize, usize, usize, usize)) -> Array4<f32> {
    Array4::from_shape_fn(shape, |(x, y, a, b)| (x * 1000 + y * 100 + a * 10 + b) as f32)
}

fn write(dir: &TempDir, name: &str, data: &ArrayD<f32>) -> PathBuf {
    let path = dir.path().join(name);
    WriterOptions::new(&path)
        .write_nifti(data)
        .expect("should have written the test volume");
    path
}

fn write_indexed(dir: &TempDir, name: &str, shape: (usize, usize, usize, usize)) -> PathBuf {
    write(dir, name, &indexed(shape).into_dyn())
}

fn loaded_viewer(path: &Path) -> Viewer {
    let mut viewer = Viewer::new();
    viewer.load(path).expect("should have loaded the test volume");
    viewer
}

#[test]
fn extracts_plane_with_file_axis_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_indexed(&dir, "indexed.nii", (4, 4, 3, 2));

    let mut viewer = loaded_viewer(&path);
    assert_eq!(viewer.shape().unwrap(), (4, 4, 3, 2));
    assert_eq!(viewer.current_shape_label(), "Image Shape: (4, 4, 3, 2)");
    assert_eq!(viewer.selector().max(), Selection { primary: 2, secondary: 1 });

    viewer.next_image();
    let plane = viewer.current_plane().unwrap();
    assert_eq!(plane.dim(), (4, 4));
    assert_eq!(plane[[2, 3]], 2310.0);
}

#[test]
fn reads_compressed_volumes() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_indexed(&dir, "indexed.nii.gz", (3, 2, 2, 4));

    let volume = VolumeLoader::load_from_file(&path).unwrap();
    assert_eq!(volume.shape(), (3, 2, 2, 4));
    assert_eq!(volume.plane_at(1, 3).unwrap()[[2, 1]], 2113.0);
}

#[test]
fn three_dimensional_file_is_rejected_and_state_kept() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_indexed(&dir, "good.nii", (4, 4, 3, 2));
    let flat: ArrayD<f32> = Array::zeros(IxDyn(&[4, 4, 3]));
    let bad = write(&dir, "flat.nii", &flat);

    let mut viewer = loaded_viewer(&good);
    viewer.set_image(2);
    viewer.set_slice(1);

    let err = viewer.load(&bad).unwrap_err();
    match err {
        ViewerError::Load(VolumeLoaderError::Dimensionality(shape)) => {
            assert_eq!(shape, vec![4, 4, 3]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(viewer.shape().unwrap(), (4, 4, 3, 2));
    assert_eq!(viewer.selection(), Selection { primary: 2, secondary: 1 });
    assert_eq!(viewer.current_plane().unwrap()[[1, 1]], 1121.0);
}

#[test]
fn trailing_singleton_dimensions_are_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let data = indexed((2, 3, 2, 2))
        .into_shape((2, 3, 2, 2, 1))
        .unwrap()
        .into_dyn();
    let path = write(&dir, "five.nii", &data);

    let volume = VolumeLoader::load_from_file(&path).unwrap();
    assert_eq!(volume.shape(), (2, 3, 2, 2));
    assert_eq!(volume.plane_at(1, 1).unwrap()[[1, 2]], 1211.0);
}

#[test]
fn extra_dimensions_with_extent_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let data: ArrayD<f32> = Array::zeros(IxDyn(&[2, 2, 2, 2, 3]));
    let path = write(&dir, "five.nii", &data);

    let err = VolumeLoader::load_from_file(&path).unwrap_err();
    match err {
        VolumeLoaderError::Dimensionality(shape) => assert_eq!(shape, vec![2, 2, 2, 2, 3]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn reload_resets_selection_to_new_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_indexed(&dir, "first.nii", (4, 4, 3, 2));
    let second = write_indexed(&dir, "second.nii", (2, 2, 6, 5));

    let mut viewer = loaded_viewer(&first);
    viewer.set_image(2);
    viewer.next_slice();

    viewer.load(&second).unwrap();
    assert_eq!(viewer.selection(), Selection::default());
    assert_eq!(viewer.selector().max(), Selection { primary: 5, secondary: 4 });

    for _ in 0..10 {
        viewer.next_slice();
    }
    assert_eq!(viewer.selection().secondary, 4);
}

#[test]
fn rendered_plane_is_written_as_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_indexed(&dir, "indexed.nii", (4, 6, 3, 2));
    let viewer = loaded_viewer(&path);

    let image = viewer.render().unwrap();
    assert_eq!(image.dimensions(), (6, 4));
    // lowest value (0) in the top-left corner, highest (3500) bottom-right
    assert_eq!(image.get_pixel(0, 0)[0], 0);
    assert_eq!(image.get_pixel(5, 3)[0], 255);

    let output = dir.path().join("plane.png");
    image.save(&output).unwrap();
    assert!(output.exists());
}

#[test]
fn rendered_pixels_follow_plane_rows_and_columns() {
    let dir = tempfile::tempdir().unwrap();
    let data = Array4::from_shape_fn((64, 48, 2, 1), |(x, y, a, _)| (a * 5000 + x * 48 + y) as f32);
    let path = write(&dir, "gradient.nii", &data.into_dyn());

    let mut viewer = loaded_viewer(&path);
    viewer.next_image();
    let plane = viewer.current_plane().unwrap();
    let image = viewer.render().unwrap();
    assert_eq!(image.dimensions(), (48, 64));

    // plane values run from 5000 to 5000 + 63*48 + 47 = 8071
    let mismatched: Vec<_> = image
        .enumerate_pixels()
        .filter(|(x, y, pixel)| {
            let value = plane[[*y as usize, *x as usize]];
            let expected = ((value - 5000.0) / 3071.0 * 255.0).round() as u8;
            pixel[0] != expected
        })
        .map(|(x, y, _)| (x, y))
        .take(5)
        .collect();
    assert_eq!(mismatched, Vec::new());
}
