use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::Instant;

use donut_swarm::config;
use donut_swarm::controls::Controls;
use donut_swarm::scene::{Scene, Texture};
use donut_swarm::{Driver, Params};

#[derive(Parser, Debug)]
#[command(about = "Textured spheres swarming around a shrinking torus")]
struct Args {
    /// YAML parameter file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Particle texture
    #[arg(short, long, default_value = "assets/textures/particle.png")]
    texture: PathBuf,

    /// Particle count, overrides the config file
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Seed for drift sampling
    #[arg(short, long)]
    seed: Option<u64>,
}

fn load_params(args: &Args) -> Result<Params> {
    let mut params = match &args.config {
        Some(path) => config::load(path).context("failed to load parameters")?,
        None => Params::default(),
    };
    if let Some(count) = args.count {
        params.count = count;
    }
    Ok(config::clamp_and_warn(params))
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let params = load_params(&args)?;

    let rng = match args.seed {
        Some(seed) => {
            info!("drift seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let texture = match Texture::locate(&args.texture) {
        Ok(texture) => Some(texture),
        Err(e) => {
            warn!("{}, particles will be untextured", e);
            None
        }
    };

    let mut scene = Scene::new("Donut swarm", texture.as_ref());
    let mut driver = Driver::new(params, rng, Instant::now());
    let mut controls = Controls::new();

    loop {
        let now = Instant::now();
        controls.handle_events(scene.window_mut(), &mut driver, now);
        driver.frame(now, &mut scene);
        controls.draw(scene.window_mut(), &driver, now);

        if !scene.render() {
            break;
        }
    }

    Ok(())
}
