//! Exhaust light demo
//!
//! Runs a four-nozzle engine through a scripted flight profile on the
//! headless host and logs what its lights are doing once per simulated
//! second. Pass a `.toml` or `.ron` tuning file as the only argument to try
//! different settings.
//!
//! ```text
//! RUST_LOG=debug cargo run -p exhaust_demo -- exhaust_demo/tuning.toml
//! ```

use engine_light::config::{Config, ConfigError, EngineLightConfig};
use engine_light::effects::RandomJitter;
use engine_light::foundation::logging;
use engine_light::foundation::time::FixedTimestep;
use engine_light::host::sim::{SimEngine, SimulatedHost, ThrottleLever};
use engine_light::host::{CameraMode, EngineModuleSet, ViewState};
use engine_light::{ConfigurationFault, EngineLightError, EngineLightModule, HostedComponent, TickStatus};
use thiserror::Error;

/// Frame time of the pretend renderer
const FRAME_DT: f32 = 1.0 / 60.0;

/// Seed for the flicker so runs are repeatable
const JITTER_SEED: u64 = 0x5EED;

#[derive(Error, Debug)]
enum DemoError {
    #[error("Usage: exhaust_demo [tuning.toml | tuning.ron]")]
    Usage,

    #[error("Failed to load tuning: {0}")]
    Config(#[from] ConfigError),

    #[error("Engine setup failed: {0}")]
    Engine(#[from] ConfigurationFault),

    #[error(transparent)]
    EngineLight(#[from] EngineLightError),
}

/// How the throttle moves during a phase
#[derive(Debug, Clone, Copy)]
enum Throttle {
    Hold(f32),
    Ramp { from: f32, to: f32 },
}

impl Throttle {
    fn at(self, progress: f32) -> f32 {
        match self {
            Self::Hold(value) => value,
            Self::Ramp { from, to } => from + (to - from) * progress.clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Phase {
    name: &'static str,
    seconds: f32,
    throttle: Throttle,
    view: ViewState,
}

fn profile() -> Vec<Phase> {
    let flight = ViewState::flight();
    vec![
        Phase { name: "ignition", seconds: 2.0, throttle: Throttle::Ramp { from: 0.0, to: 1.0 }, view: flight },
        Phase { name: "full burn", seconds: 3.0, throttle: Throttle::Hold(1.0), view: flight },
        Phase { name: "cutoff", seconds: 2.0, throttle: Throttle::Hold(0.0), view: flight },
        Phase {
            name: "interior",
            seconds: 2.0,
            throttle: Throttle::Hold(0.6),
            view: flight.with_camera(CameraMode::Iva),
        },
        Phase { name: "map", seconds: 1.0, throttle: Throttle::Hold(1.0), view: flight.with_camera(CameraMode::Map) },
        Phase { name: "relight", seconds: 2.0, throttle: Throttle::Ramp { from: 0.3, to: 1.0 }, view: flight },
    ]
}

fn load_tuning() -> Result<EngineLightConfig, DemoError> {
    let mut args = std::env::args().skip(1);
    let path = args.next();
    if args.next().is_some() {
        return Err(DemoError::Usage);
    }

    match path {
        Some(path) => {
            log::info!("Loading tuning from {}", path);
            Ok(EngineLightConfig::load_from_file(path)?)
        }
        None => Ok(EngineLightConfig::default()),
    }
}

/// Counts of tick outcomes inside one summary window
#[derive(Debug, Default)]
struct Window {
    updated: u32,
    idle: u32,
    inert: u32,
    faulted: u32,
}

impl Window {
    fn record(&mut self, status: TickStatus) {
        match status {
            TickStatus::Updated(_) => self.updated += 1,
            TickStatus::Idle => self.idle += 1,
            TickStatus::Inert => self.inert += 1,
            TickStatus::Faulted => self.faulted += 1,
        }
    }
}

fn summarize(seconds: f32, phase: &Phase, lever: &ThrottleLever, host: &SimulatedHost, window: &Window) {
    let lights = host.lights();
    let lit = lights.iter().filter(|light| light.params.enabled).count();
    let brightest = lights.iter().map(|light| light.params.intensity).fold(0.0, f32::max);
    let reach = lights.iter().map(|light| light.params.range).fold(0.0, f32::max);

    log::info!(
        "t={:>5.2}s {:<10} throttle={:.2} lit={}/{} peak intensity={:.3} peak range={:.1} ticks(updated={} idle={} inert={} faulted={})",
        seconds,
        phase.name,
        lever.get(),
        lit,
        lights.len(),
        brightest,
        reach,
        window.updated,
        window.idle,
        window.inert,
        window.faulted,
    );
}

fn run() -> Result<(), DemoError> {
    let config = load_tuning()?;

    let engine = SimEngine::new(1_500.0).with_nozzle_ring(4, 1.25);
    let lever = engine.lever();
    let engine = EngineModuleSet::new("Mainsail", vec![engine])?;

    let mut host = SimulatedHost::new();
    let mut module: EngineLightModule<_, SimulatedHost> = EngineLightModule::new(config)
        .with_engine(engine)
        .with_jitter_source(RandomJitter::seeded(JITTER_SEED));
    let pairs = module.initialize(&mut host)?;
    log::info!("Spawned {} lights for {} nozzle(s)", host.light_count(), pairs);

    let mut timestep = FixedTimestep::default();
    let mut window = Window::default();
    let mut next_summary = 1.0;

    for phase in profile() {
        log::info!("--- {} ---", phase.name);
        let mut elapsed = 0.0;
        while elapsed < phase.seconds {
            lever.set(phase.throttle.at(elapsed / phase.seconds));
            for _ in 0..timestep.accumulate(FRAME_DT) {
                window.record(module.tick(timestep.dt(), &phase.view));
            }
            elapsed += FRAME_DT;

            if timestep.simulated_time() >= next_summary {
                summarize(timestep.simulated_time(), &phase, &lever, &host, &window);
                window = Window::default();
                next_summary += 1.0;
            }
        }
    }

    module.cleanup(&mut host);
    log::info!(
        "Profile finished after {} steps, {} lights left on the host",
        timestep.total_steps(),
        host.light_count()
    );
    Ok(())
}

fn main() {
    logging::init();

    log::info!("Starting exhaust light demo");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
