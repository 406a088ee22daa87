//! Runs the reset / subdivide / to-sphere workflow without a window.
//!
//! Usage:
//! ```text
//! cargo run --example headless                    # 3 subdivide steps
//! cargo run --example headless -- 1               # stop after 1 step
//! RUST_LOG=icosa=debug cargo run --example headless
//! ```

use icosa::engine::{EngineParams, MorphPhase};
use icosa::render::Scene;
use icosa::Result;

const FRAME: f64 = 1.0 / 60.0;

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for icosa.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("headless=info".parse().unwrap_or_default())
        .add_directive("icosa=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let steps: u32 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(3);

    let mut scene = Scene::new(EngineParams::default())?;
    println!("{}", scene.info());

    for _ in 0..steps {
        if !scene.commands().subdivide {
            break;
        }
        scene.subdivide()?;
        println!("{}", scene.info());
    }

    scene.to_sphere()?;
    let mut frames = 0u32;
    while scene.tick(FRAME)? == MorphPhase::Animating {
        frames += 1;
    }
    println!("settled after {frames} frames");
    println!("{}", scene.info());
    Ok(())
}
