//! Simulation and camera state

/// Camera modes the host can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    /// Ordinary external flight camera
    #[default]
    Flight,
    /// External camera trailing the vehicle
    Chase,
    /// Top-down map camera
    Map,
    /// First-person view from a crew seat
    Iva,
    /// Internal view of the vehicle interior
    Internal,
}

impl CameraMode {
    /// Whether the camera sits inside the vehicle
    pub fn is_interior(self) -> bool {
        matches!(self, Self::Iva | Self::Internal)
    }
}

/// What the light driver asks the host about the current view
pub trait ViewContext {
    /// Whether the simulation proper is running, as opposed to an editor or menu
    fn is_simulation_running(&self) -> bool;

    /// Active camera mode
    fn camera_mode(&self) -> CameraMode;

    /// Whether the camera is inside the vehicle
    fn is_interior_view(&self) -> bool {
        self.camera_mode().is_interior()
    }

    /// Whether the map overview is showing
    fn is_map_view(&self) -> bool;

    /// Rendering layer of the current scaled celestial body, if any
    fn scaled_body_layer(&self) -> Option<u8>;
}

/// Plain-data [`ViewContext`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    /// Simulation running
    pub running: bool,
    /// Active camera
    pub camera_mode: CameraMode,
    /// Map overview showing
    pub map_view: bool,
    /// Scaled body layer
    pub scaled_body_layer: Option<u8>,
}

/// Layer scaled celestial bodies are usually drawn on
pub const DEFAULT_SCALED_BODY_LAYER: u8 = 10;

impl Default for ViewState {
    fn default() -> Self {
        Self::flight()
    }
}

impl ViewState {
    /// Running simulation, external camera
    pub fn flight() -> Self {
        Self {
            running: true,
            camera_mode: CameraMode::Flight,
            map_view: false,
            scaled_body_layer: Some(DEFAULT_SCALED_BODY_LAYER),
        }
    }

    /// Editor or menu scene
    pub fn paused() -> Self {
        Self {
            running: false,
            ..Self::flight()
        }
    }

    /// Builder pattern: set the camera mode
    ///
    /// Switching to [`CameraMode::Map`] also turns the map overview on.
    pub fn with_camera(mut self, camera_mode: CameraMode) -> Self {
        self.camera_mode = camera_mode;
        self.map_view = camera_mode == CameraMode::Map;
        self
    }

    /// Builder pattern: set the scaled body layer
    pub fn with_scaled_body_layer(mut self, layer: Option<u8>) -> Self {
        self.scaled_body_layer = layer;
        self
    }
}

impl ViewContext for ViewState {
    fn is_simulation_running(&self) -> bool {
        self.running
    }

    fn camera_mode(&self) -> CameraMode {
        self.camera_mode
    }

    fn is_map_view(&self) -> bool {
        self.map_view
    }

    fn scaled_body_layer(&self) -> Option<u8> {
        self.scaled_body_layer
    }
}
