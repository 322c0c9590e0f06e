use anyhow::Result;
use portal_spheres::{
    PortalSimulation,
    math::TICK_INTERVAL_MS,
    scenario::SceneDescription,
    uniforms::{FramePacket, SceneSink},
};
use std::env;

/// Stands in for the renderer: logs what would be uploaded
struct LogSink;

impl SceneSink for LogSink {
    fn publish(&mut self, packet: &FramePacket) -> Result<()> {
        let ghosts = packet.inside_portal.iter().filter(|&&p| p >= 0).count();
        log::debug!(
            "Publishing {} spheres ({} ghosted, {} bytes) at {:.0} ms",
            packet.len(),
            ghosts,
            bytemuck::cast_slice::<_, u8>(packet.sphere_uniforms().as_slice()).len(),
            packet.time
        );
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();

    log::info!("Starting portal sphere scene...");

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let description = match args.get(1) {
        Some(path) => SceneDescription::load(path)?,
        None => SceneDescription::two_rooms(),
    };

    let frames = if args.len() > 2 {
        args[2].parse::<u64>().unwrap_or(600)
    } else {
        600
    };

    log::info!("Running {} frames", frames);

    let mut simulation = PortalSimulation::from_description(&description)?;
    let mut sink = LogSink;
    let mut transits = 0;
    let mut relocations = 0;

    for frame in 1..=frames {
        let report = simulation.tick(frame as f32 * TICK_INTERVAL_MS, &mut sink)?;
        transits += usize::from(report.transit.is_some());
        relocations += report.relocations().count();
    }

    log::info!(
        "Finished {} frames: {} observer transits, {} relocations",
        frames,
        transits,
        relocations
    );
    Ok(())
}
