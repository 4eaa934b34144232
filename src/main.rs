//! hyperview - headless 4D projection driver
//!
//! Runs the projection pipeline for a configured number of ticks, logs a
//! summary of the final frame and optionally dumps it as RON.

use hyperview::config::AppConfig;
use hyperview::systems::AnimationSystem;

fn main() {
    // Load configuration before the logger so its level can apply
    let config = AppConfig::load();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(
            config.as_ref().map(|c| c.debug.log_level.as_str()).unwrap_or("info"),
        ),
    )
    .init();

    let config = config.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    log::info!("Starting hyperview");

    let mut system = AnimationSystem::from_config(&config).unwrap_or_else(|e| {
        log::error!("{}", e);
        std::process::exit(1);
    });

    let Some(summary) = system.run(config.animation.ticks) else {
        log::error!("No shape active after {} ticks", config.animation.ticks);
        std::process::exit(1);
    };

    log::info!(
        "{} ticks at intensity {}: {} points ({} at sentinel)",
        summary.ticks,
        system.intensity(),
        summary.point_count,
        summary.sentinel_points
    );
    log::info!(
        "Bounds [{:.3}, {:.3}, {:.3}] .. [{:.3}, {:.3}, {:.3}], angles yz={:.4} xw={:.4}",
        summary.bounds_min.x, summary.bounds_min.y, summary.bounds_min.z,
        summary.bounds_max.x, summary.bounds_max.y, summary.bounds_max.z,
        summary.rotation.angle_yz, summary.rotation.angle_xw
    );

    if let Some(path) = &config.debug.dump_path {
        if let Err(e) = system.write_snapshot(path) {
            log::error!("{}", e);
            std::process::exit(1);
        }
        log::info!("Wrote frame snapshot to {}", path.display());
    }
}
