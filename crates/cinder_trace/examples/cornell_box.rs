//! Cornell box intersection demo.
//!
//! Builds the classic Cornell box out of rectangles and rotated boxes,
//! casts one ray per pixel of a small pinhole view in parallel, and reports
//! how many rays landed on each surface. For a few diffuse hits it also
//! draws light-sampling directions from a mixture density.
//!
//! Usage: `cargo run --example cornell_box [config.json]`

use anyhow::{Context, Result};
use cinder_trace::{
    AxisRect, BoxShape, CosinePdf, Hittable, HittablePdf, MaterialId, MixturePdf, Pdf, Ray,
    RotateY, Scene, Sphere, TraceConfig, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;

const RED: MaterialId = MaterialId(0);
const WHITE: MaterialId = MaterialId(1);
const GREEN: MaterialId = MaterialId(2);
const LIGHT: MaterialId = MaterialId(3);
const GLASS: MaterialId = MaterialId(4);

const WIDTH: u32 = 200;
const HEIGHT: u32 = 200;

fn light() -> AxisRect {
    AxisRect::xz(213.0, 343.0, 227.0, 332.0, 554.0, LIGHT)
}

fn build_objects() -> Vec<Box<dyn Hittable>> {
    // Rotation is about the world Y axis, so the corners are chosen to land
    // inside the room after turning.
    let tall = RotateY::new(
        Box::new(BoxShape::new(
            Vec3::new(265.0, 0.0, 295.0),
            Vec3::new(430.0, 330.0, 460.0),
            WHITE,
        )),
        15.0,
    );
    let short = RotateY::new(
        Box::new(BoxShape::new(
            Vec3::new(130.0, 0.0, 65.0),
            Vec3::new(295.0, 165.0, 230.0),
            WHITE,
        )),
        -18.0,
    );

    vec![
        Box::new(AxisRect::yz(0.0, 555.0, 0.0, 555.0, 555.0, GREEN)),
        Box::new(AxisRect::yz(0.0, 555.0, 0.0, 555.0, 0.0, RED)),
        Box::new(light()),
        Box::new(AxisRect::xz(0.0, 555.0, 0.0, 555.0, 0.0, WHITE)),
        Box::new(AxisRect::xz(0.0, 555.0, 0.0, 555.0, 555.0, WHITE)),
        Box::new(AxisRect::xy(0.0, 555.0, 0.0, 555.0, 555.0, WHITE)),
        Box::new(tall),
        Box::new(short),
        Box::new(Sphere::new(Vec3::new(150.0, 250.0, 300.0), 60.0, GLASS)),
    ]
}

fn camera_rays() -> Vec<Ray> {
    let look_from = Vec3::new(278.0, 278.0, -800.0);
    let fov = 40.0_f32.to_radians();
    let half = (fov / 2.0).tan();

    (0..HEIGHT)
        .flat_map(|j| (0..WIDTH).map(move |i| (i, j)))
        .map(|(i, j)| {
            let u = (i as f32 + 0.5) / WIDTH as f32 * 2.0 - 1.0;
            let v = 1.0 - (j as f32 + 0.5) / HEIGHT as f32 * 2.0;
            Ray::new_simple(look_from, Vec3::new(u * half, v * half, 1.0))
        })
        .collect()
}

fn load_config() -> Result<TraceConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            Ok(TraceConfig::from_json_str(&json)?)
        }
        None => Ok(TraceConfig::default()),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = load_config()?;
    let scene = Scene::build(build_objects(), config)?;

    let rays = camera_rays();
    let start = std::time::Instant::now();
    let hits = scene.closest_hits(&rays);
    log::info!("Traced {} rays in {:?}", rays.len(), start.elapsed());

    let mut coverage: BTreeMap<u32, usize> = BTreeMap::new();
    for rec in hits.iter().flatten() {
        *coverage.entry(rec.material.0).or_default() += 1;
    }
    let misses = hits.iter().filter(|h| h.is_none()).count();
    for (material, count) in &coverage {
        println!("material {material}: {count} rays");
    }
    println!("missed: {misses} rays");

    // Light sampling from a handful of white-surface hits.
    let light = light();
    let mut rng = StdRng::seed_from_u64(config.seed);
    for rec in hits.iter().flatten().filter(|r| r.material == WHITE).take(5) {
        let to_light = HittablePdf::new(&light, rec.p);
        let cosine = CosinePdf::new(rec.normal);
        let mixture = MixturePdf::new(&to_light, &cosine);

        let direction = mixture.generate(&mut rng);
        println!(
            "hit at {:?}: sampled {:?} with pdf {:.5}",
            rec.p,
            direction.normalize(),
            mixture.value(direction)
        );
    }

    Ok(())
}
