//! Hosted component lifecycle
//!
//! The host calls [`HostedComponent::initialize`] when a vehicle is loaded and
//! [`HostedComponent::tick`] once per simulation step afterwards.
//! [`EngineLightModule`] is the component that drives one engine's lights.

use crate::config::EngineLightConfig;
use crate::effects::{compensate, JitterBuffer, JitterSource};
use crate::error::{ConfigurationFault, EngineLightError, HostError, Result};
use crate::foundation::logging::PREFIX;
use crate::host::{EngineSource, LightHost, ViewContext};
use crate::lights::{ExhaustLightSystem, ExhaustState, LightPair, NozzleLightFactory};

/// Lifecycle hooks a host calls on its components
///
/// Implement this for anything the host should set up once and then step
/// every tick.
pub trait HostedComponent {
    /// Host the component allocates its lights from
    type Host: LightHost;

    /// Set up (or set up again) against `host`.
    ///
    /// Returns the number of light pairs built.
    fn initialize(&mut self, host: &mut Self::Host) -> Result<usize>;

    /// Advance by `dt` seconds of simulated time.
    ///
    /// Never fails; the returned status says what happened.
    fn tick(&mut self, dt: f32, view: &dyn ViewContext) -> TickStatus;

    /// Hand every host resource back
    fn cleanup(&mut self, host: &mut Self::Host);
}

/// Outcome of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// Simulation not running, nothing touched
    Idle,
    /// A configuration fault is latched, nothing touched
    Inert,
    /// Lights written in the given state
    Updated(ExhaustState),
    /// The host rejected a write; this tick was skipped
    Faulted,
}

/// Snapshot written by the periodic debug report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExhaustReport {
    /// State the lights were written in
    pub state: ExhaustState,
    /// Damped throttle the lights were driven with
    pub throttle: f32,
    /// Damped throttle scaled by the flicker
    pub jittered: f32,
    /// Damped throttle of the tick before
    pub last: f32,
    /// Current flicker mean
    pub jitter: f32,
}

/// Exhaust light driver for one engine
#[derive(Debug)]
pub struct EngineLightModule<E, H: LightHost> {
    config: EngineLightConfig,
    engine: Option<E>,
    system: ExhaustLightSystem,
    light_pairs: Option<Vec<LightPair<H::Light>>>,
    fault: Option<ConfigurationFault>,
    max_thrust: f32,
    active_max_thrust: f32,
    report_elapsed: f32,
    last_report: Option<ExhaustReport>,
}

impl<E: EngineSource, H: LightHost> EngineLightModule<E, H> {
    /// Module with the given tuning, no engine attached yet
    pub fn new(config: EngineLightConfig) -> Self {
        Self {
            system: ExhaustLightSystem::new(config.clone(), JitterBuffer::default()),
            config,
            engine: None,
            light_pairs: None,
            fault: None,
            max_thrust: 0.0,
            active_max_thrust: 0.0,
            report_elapsed: 0.0,
            last_report: None,
        }
    }

    /// Builder pattern: attach an engine
    pub fn with_engine(mut self, engine: E) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Builder pattern: replace the flicker source
    pub fn with_jitter_source(mut self, source: impl JitterSource + 'static) -> Self {
        self.system.jitter_mut().set_source(source);
        self
    }

    /// Attach an engine; takes effect on the next [`HostedComponent::initialize`]
    pub fn attach_engine(&mut self, engine: E) {
        self.engine = Some(engine);
    }

    /// Detach the engine; ticks stay inert until one is attached and the module re-initialized
    pub fn detach_engine(&mut self) -> Option<E> {
        self.engine.take()
    }

    /// Tuning in use
    pub fn config(&self) -> &EngineLightConfig {
        &self.config
    }

    /// Attached engine
    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    /// Light pairs, one per nozzle, once initialized
    pub fn light_pairs(&self) -> Option<&[LightPair<H::Light>]> {
        self.light_pairs.as_deref()
    }

    /// Per-tick state
    pub fn system(&self) -> &ExhaustLightSystem {
        &self.system
    }

    /// Latched configuration fault, if any
    pub fn fault(&self) -> Option<&ConfigurationFault> {
        self.fault.as_ref()
    }

    /// Max thrust read at initialization
    pub fn max_thrust(&self) -> f32 {
        self.max_thrust
    }

    /// Max thrust of the modules that were enabled at initialization
    pub fn active_max_thrust(&self) -> f32 {
        self.active_max_thrust
    }

    /// Most recent periodic report, if one has been written since initialization
    pub fn last_report(&self) -> Option<&ExhaustReport> {
        self.last_report.as_ref()
    }

    fn release_pairs(&mut self, host: &mut H) {
        if let Some(pairs) = self.light_pairs.take() {
            log::debug!("{} releasing {} light pair(s)", PREFIX, pairs.len());
            for pair in pairs {
                pair.release(host);
            }
        }
    }

    fn build_pairs(&self, host: &mut H) -> Result<Vec<LightPair<H::Light>>> {
        self.config.validate()?;

        let engine = self.engine.as_ref().ok_or(ConfigurationFault::MissingEngine)?;
        let nozzles = engine.thrust_transforms();
        if nozzles.is_empty() {
            return Err(ConfigurationFault::NoNozzles {
                engine: engine.name().to_string(),
            }
            .into());
        }

        let frame = engine.frame();
        let mut pairs = Vec::with_capacity(nozzles.len());
        for nozzle in &nozzles {
            match NozzleLightFactory::build_pair(host, &frame, nozzle, &self.config) {
                Ok(pair) => pairs.push(pair),
                Err(err) => {
                    for pair in pairs {
                        pair.release(host);
                    }
                    return Err(err.into());
                }
            }
        }
        Ok(pairs)
    }

    /// Latch `fault` and log it, once per occurrence
    fn report_fault(&mut self, fault: ConfigurationFault) {
        if self.fault.is_some() {
            log::trace!("{} inert: {}", PREFIX, fault);
            return;
        }
        log::warn!("{} {}; lights inert until re-initialized", PREFIX, fault);
        self.fault = Some(fault);
    }

    fn host_fault(&self, err: &HostError) {
        let name = self.engine.as_ref().map_or("<detached>", EngineSource::name);
        log::warn!("{} skipped tick for engine '{}': {}", PREFIX, name, err);
    }

    /// Runs after a successful update; `previous` is the damped throttle from before it.
    fn periodic_report(&mut self, dt: f32, state: ExhaustState, previous: f32) {
        self.report_elapsed += dt;
        if self.report_elapsed < self.config.report_interval {
            return;
        }
        self.report_elapsed = 0.0;

        let Some(engine) = self.engine.as_ref() else { return };
        if !engine.is_enabled() {
            return;
        }

        let report = ExhaustReport {
            state,
            throttle: self.system.last_frame_throttle(),
            jittered: self.system.jittered_throttle(),
            last: previous,
            jitter: self.system.jitter().peek(),
        };
        log::debug!(
            "{} '{}': fade={} state={:?} throttle={:.3} jittered={:.3} last={:.3} jitter={:.3}",
            PREFIX,
            engine.name(),
            self.config.fade_coefficient,
            report.state,
            report.throttle,
            report.jittered,
            report.last,
            report.jitter,
        );
        self.last_report = Some(report);
    }
}

impl<E: EngineSource, H: LightHost> HostedComponent for EngineLightModule<E, H> {
    type Host = H;

    fn initialize(&mut self, host: &mut H) -> Result<usize> {
        self.release_pairs(host);
        self.fault = None;
        self.report_elapsed = 0.0;
        self.last_report = None;
        self.max_thrust = 0.0;
        self.active_max_thrust = 0.0;
        self.system.reset(1.0);

        let pairs = match self.build_pairs(host) {
            Ok(pairs) => pairs,
            Err(err) => {
                log::error!("{} initialization failed: {}", PREFIX, err);
                if let EngineLightError::Configuration(fault) = &err {
                    self.fault = Some(fault.clone());
                }
                return Err(err);
            }
        };

        let multiplier = compensate(pairs.len());
        self.system.reset(multiplier);
        if let Some(engine) = &self.engine {
            self.max_thrust = engine.max_thrust();
            self.active_max_thrust = engine.active_max_thrust();
            log::info!(
                "{} engine '{}': {} nozzle(s), max thrust {} ({} enabled), intensity multiplier {}",
                PREFIX,
                engine.name(),
                pairs.len(),
                self.max_thrust,
                self.active_max_thrust,
                multiplier
            );
        }

        let count = pairs.len();
        self.light_pairs = Some(pairs);
        Ok(count)
    }

    fn tick(&mut self, dt: f32, view: &dyn ViewContext) -> TickStatus {
        if !view.is_simulation_running() {
            return TickStatus::Idle;
        }

        if self.engine.is_none() {
            self.report_fault(ConfigurationFault::MissingEngine);
            return TickStatus::Inert;
        }
        if self.light_pairs.is_none() {
            self.report_fault(ConfigurationFault::MissingLightPairs);
            return TickStatus::Inert;
        }

        let (Some(engine), Some(pairs)) = (self.engine.as_ref(), self.light_pairs.as_mut()) else {
            return TickStatus::Inert;
        };
        let previous = self.system.last_frame_throttle();
        let result = self.system.update(pairs, engine.throttle(), view);

        match result {
            Ok(state) => {
                self.periodic_report(dt, state, previous);
                TickStatus::Updated(state)
            }
            Err(err) => {
                self.host_fault(&err);
                TickStatus::Faulted
            }
        }
    }

    fn cleanup(&mut self, host: &mut H) {
        self.release_pairs(host);
    }
}
