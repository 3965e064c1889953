//! End-to-end runs of the viewer loop without a window

use arscene_core::Point3f;
use arscene_io::{load_dataset_blocking, DatasetPaths, LoadError, RowPolicy};
use arscene_scene::{names, SceneBuilder};
use arscene_visualization::*;
use std::fs;
use tempfile::TempDir;
use winit::keyboard::KeyCode;

fn write_capture(dir: &TempDir) -> DatasetPaths {
    let paths = DatasetPaths::with_prefix(dir.path(), "room");
    fs::write(&paths.points, "x,y,z\n0,0,0\n0.5,1,-0.5\n1,2,-1\n").unwrap();
    fs::write(
        &paths.anchors,
        "pos_x,pos_y,pos_z,rot_w,rot_x,rot_y,rot_z,width,length,orientation\n\
         0,0,-1,1,0,0,0,2,2,HorizontalPlaneAnchor\n",
    )
    .unwrap();
    fs::write(&paths.camera, "x,y,z\n0,0,0\n0,0,-0.5\n").unwrap();
    fs::write(&paths.objects, "pos_x,pos_y,pos_z,width,length\n").unwrap();
    paths
}

#[test]
fn test_capture_to_headless_frames() {
    let dir = TempDir::new().unwrap();
    let mut config = ViewerConfig::ground_walk();
    config.dataset = write_capture(&dir);
    config.scene.ground.segments = 4;

    let dataset = load_dataset_blocking(&config.dataset, config.row_policy).unwrap();
    let scene = SceneBuilder::new(&config.scene).build(&dataset);
    assert!(scene.node(names::POINT_CLOUD).is_some());

    let renderer = run_headless(scene, &config, 120, HeadlessRenderer::new()).unwrap();
    assert_eq!(renderer.frames, 120);
    assert_eq!(renderer.size, (1200, 800));

    // Nobody clicked, so the viewer never left the spawn point
    let frame = renderer.last_frame.unwrap();
    assert!(frame.overlay_visible);
    assert_eq!(frame.eye, Point3f::new(0.0, 10.0, 0.0));
}

#[test]
fn test_flight_through_loaded_scene() {
    let dir = TempDir::new().unwrap();
    let mut config = ViewerConfig::flight();
    config.dataset = write_capture(&dir);
    config.scene.ground.segments = 4;

    let dataset = load_dataset_blocking(&config.dataset, RowPolicy::Strict).unwrap();
    let scene = SceneBuilder::new(&config.scene).build(&dataset);

    let mut render_loop = RenderLoop::new(scene, &config, 0.0);
    let mut renderer = HeadlessRenderer::new();
    render_loop.lock();
    render_loop.handle_key(KeyCode::KeyR, true);
    render_loop.handle_key(KeyCode::KeyW, true);
    for i in 1..=60 {
        let now = i as f64 / 60.0;
        render_loop.frame(now, now * 1000.0, &mut renderer).unwrap();
    }

    let eye = renderer.last_frame.unwrap().eye;
    assert!(eye.y > 0.0);
    assert!(eye.z < 0.0);
    assert_eq!(render_loop.frames(), 60);
}

#[test]
fn test_loaded_scene_flattens_for_drawing() {
    let dir = TempDir::new().unwrap();
    let mut config = ViewerConfig::ground_walk();
    config.dataset = write_capture(&dir);
    config.scene.ground.segments = 4;

    let dataset = load_dataset_blocking(&config.dataset, RowPolicy::Skip).unwrap();
    let scene = SceneBuilder::new(&config.scene).build(&dataset);
    let list = DrawList::from_scene(&scene);

    // Three cloud points, the bounds outline plus one path segment, one anchor slab
    assert_eq!(list.points.len(), 3);
    assert_eq!(list.lines.len(), 24 + 2);
    assert_eq!(list.translucent.len(), 12 * 3);
    assert!(list.triangles.is_empty());
    assert_eq!(list.lines[25].position, [0.0, 0.0, -25.0]);
}

#[test]
fn test_missing_source_builds_nothing() {
    let dir = TempDir::new().unwrap();
    let paths = write_capture(&dir);
    fs::remove_file(&paths.camera).unwrap();

    let err = load_dataset_blocking(&paths, RowPolicy::Skip).unwrap_err();
    assert!(matches!(err, LoadError::FileNotFound { .. }));
}
