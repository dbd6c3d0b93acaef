//! Mirror Turret entry point
//!
//! Runs a headless session: the autopilot plays against a stepped clock and
//! the HUD goes to the log. Hosts with a window drive `Driver` with their own
//! `InputSource` and `Renderer` instead.

use mirror_turret::driver::{Autopilot, Driver, Scripted};
use mirror_turret::platform::FrameClock;
use mirror_turret::renderer::LogRenderer;
use mirror_turret::settings::Settings;
use mirror_turret::sim::GameOutcome;

fn main() {
    env_logger::init();
    log::info!("Mirror Turret (headless) starting...");

    let settings = Settings::load();
    let clock = FrameClock::new(settings.frame_rate);
    let mut driver = Driver::new(&settings, clock);
    let mut renderer = LogRenderer::new(settings.hud_every);

    let outcome: GameOutcome = if settings.autopilot {
        let mut input = Autopilot {
            quit_after: settings.max_frames,
        };
        driver.run(&mut input, &mut renderer)
    } else {
        // Nothing steers; blocks fall until the frame budget (if any) runs out
        // or missed black blocks push the score below the threshold
        let mut input = Scripted::idle_for(settings.max_frames);
        driver.run(&mut input, &mut renderer)
    };

    println!("{outcome}");
    println!("{}", driver.state.score);
}
