use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use embree_core::camera::Dof;
use embree_core::{Camera, Light, Material, MaterialKind, Scene, Sphere};
use embree_io::{process, write_scene_files, RenderOptions};

const USAGE: &str = "usage: scene-export <scene.json | --demo> <output-dir> [options.json]";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    }

    match run(&args[0], Path::new(&args[1]), args.get(2).map(PathBuf::from)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(source: &str, out_dir: &Path, options_path: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let scene = if source == "--demo" {
        demo_scene()
    } else {
        let json = fs::read_to_string(source)?;
        Scene::from_json(&json)?
    };
    let options = match options_path {
        Some(path) => RenderOptions::load(&path)?,
        None => RenderOptions::default(),
    };

    let output = process(&scene)?;
    fs::create_dir_all(out_dir)?;
    let paths = write_scene_files(out_dir, &output, &options)?;
    println!("{}", paths.script.display());
    Ok(())
}

/// A grid of spheres cycling through a few materials, seen through a lens.
fn demo_scene() -> Scene {
    const NUM_X: usize = 30;
    const NUM_Y: usize = 30;
    const SIZE: f64 = 3000.0;

    let materials = [
        Material::stock(MaterialKind::Dielectric),
        Material::stock(MaterialKind::BrushedMetal),
        Material::plastic([0.0, 0.0, 1.0]),
        Material::plastic([1.0, 0.0, 1.0]),
    ];

    let mut scene = Scene::new();
    let mut camera = Dof {
        radius: 10.0,
        ..Default::default()
    };
    camera.view.position = [400.0, 400.0, 400.0];
    scene.camera = Camera::Dof(camera);
    scene.add_light(Light::quad(
        [213.0, 548.77, 227.0],
        [130.0, 0.0, 0.0],
        [0.0, 0.0, 105.0],
        [50.0, 50.0, 50.0],
    ));
    scene.add_light(Light::ambient([0.5, 0.5, 0.5]));

    for i in 0..NUM_Y {
        for j in 0..NUM_X {
            let n = i + j * NUM_Y;
            let wave = ((i * j) as f64 * 0.37).sin();
            let sphere = Sphere::new(
                [
                    (-0.5 + i as f64 / (NUM_X - 1) as f64) * SIZE,
                    wave * SIZE,
                    (-0.5 + j as f64 / (NUM_Y - 1) as f64) * SIZE,
                ],
                100.0 + 20.0 * (1.0 + wave),
            )
            .with_motion([0.0, 5.0 * (1.0 + wave), 0.0])
            .with_material(materials[n % materials.len()].clone());
            scene.add_shape(sphere);
        }
    }
    scene
}
