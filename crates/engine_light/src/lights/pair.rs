//! Light pair storage

use crate::error::HostError;
use crate::host::{LightHost, LightParams, LightSink};

/// One host light plus the parameters last written to it
#[derive(Debug)]
pub struct ExhaustLight<L> {
    handle: L,
    params: LightParams,
}

impl<L: LightSink> ExhaustLight<L> {
    /// Wrap a freshly spawned light and the parameters it was spawned with
    pub fn new(handle: L, params: LightParams) -> Self {
        Self { handle, params }
    }

    /// Parameters of the last successful write
    pub fn params(&self) -> &LightParams {
        &self.params
    }

    /// Host handle
    pub fn handle(&self) -> &L {
        &self.handle
    }

    /// Write `params` to the host, remembering them only if the write succeeds
    pub fn commit(&mut self, params: LightParams) -> Result<(), HostError> {
        self.handle.apply(&params)?;
        self.params = params;
        Ok(())
    }

    /// Unwrap the host handle
    pub fn into_handle(self) -> L {
        self.handle
    }
}

/// The two lights standing for one nozzle
#[derive(Debug)]
pub struct LightPair<L> {
    /// Narrow spot light at the nozzle
    pub nozzle: ExhaustLight<L>,
    /// Broad point light down the plume
    pub area: ExhaustLight<L>,
}

impl<L: LightSink> LightPair<L> {
    /// Lower of the two last written intensities
    pub fn min_intensity(&self) -> f32 {
        self.nozzle.params().intensity.min(self.area.params().intensity)
    }

    /// Whether both lights are currently enabled
    pub fn is_enabled(&self) -> bool {
        self.nozzle.params().enabled && self.area.params().enabled
    }

    /// Hand both lights back to the host
    pub fn release<H: LightHost<Light = L>>(self, host: &mut H) {
        host.release_light(self.nozzle.into_handle());
        host.release_light(self.area.into_handle());
    }
}
