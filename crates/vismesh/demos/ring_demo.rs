//! Demo showing basic vismesh usage.
//!
//! Builds a textured ring and a colormapped cube, lights them with the main
//! camera light plus a yellow lamp, and prints the fixed-function command
//! stream of one frame. Run with `RUST_LOG=vismesh=debug` to see the
//! normal computation and uploads.

use vismesh::*;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let mut scene = Scene::default();

    // A ring with a checkerboard image mapped through its UV coordinates
    let ring = solid_ring(
        "ring",
        RingParams {
            thickness: 0.4,
            segments: 24,
            tube_segments: 8,
            translation: Some(Vec3::new(1.0, 1.0, 1.0)),
        },
    )?;
    let ring = scene.add_mesh(ring)?;
    let checker: Vec<[u8; 8]> = (0..8)
        .map(|y| std::array::from_fn(|x| if (x + y) % 2 == 0 { 255 } else { 0 }))
        .collect();
    ring.set_texture_data(&Array::from(checker))?;
    ring.material_mut().set_specular(0.8)?;
    ring.material_mut().set_shininess(90.0);

    // A cube colored by height through the jet colormap
    let mut block = cube("cube")?;
    let heights: Vec<f32> = block
        .geometry()
        .vertices()
        .iter()
        .map(|v| (v.z + 1.0) * 0.5)
        .collect();
    block.geometry_mut().set_texcoords(Some(heights))?;
    block.colormap_mut().set_preset(ColormapPreset::Jet);
    block.set_cull_faces_str(Some("back"))?;
    scene.add_mesh(block)?;

    let lamp = scene
        .lights_mut()
        .get_mut(1)
        .ok_or_else(|| VisError::value("light slot 1 missing"))?;
    lamp.set_point(Vec3::new(0.0, 0.0, 4.0));
    lamp.set_color("y")?;
    lamp.on();

    if let Some((lo, hi)) = scene.limits() {
        println!("scene limits: {lo} .. {hi}");
    }

    let mut backend = CommandRecorder::new();
    scene.render(&mut backend);
    for command in backend.commands() {
        match command {
            Command::VertexPointer(v) => println!("VertexPointer({} vertices)", v.len()),
            Command::NormalPointer(n) => println!("NormalPointer({} normals)", n.len()),
            Command::ColorPointer(c) => println!("ColorPointer({} colors)", c.len()),
            other => println!("{other:?}"),
        }
    }

    scene.destroy(&mut backend);
    println!("live textures after teardown: {}", backend.live_texture_count());
    Ok(())
}
