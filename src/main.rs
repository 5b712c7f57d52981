use anyhow::Result;

use crate::config::CraneConfig;
use crate::demo::DemoChoice;

mod animation;
mod camera;
mod carousel;
mod config;
mod crane;
mod demo;
mod engine;
mod input;
mod math;
mod scene_graph;
mod window;

fn main() -> Result<()> {
    pretty_env_logger::init();

    let choice = if std::env::args().skip(1).any(|arg| arg == "--carousel") {
        DemoChoice::Carousel
    } else {
        DemoChoice::Crane
    };

    window::run(choice, CraneConfig::from_env())?;

    Ok(())
}
