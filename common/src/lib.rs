pub mod clock;
pub mod config;
pub mod drift;
pub mod thermostat;
pub mod types;
pub mod units;

pub use clock::{ClockSubscription, ManualClock};
pub use config::{SimulationConfig, StartupSettings};
pub use drift::{DriftSource, RandomDrift, ScriptedDrift};
pub use thermostat::ThermostatController;
pub use types::{ControllerStatus, HvacActivity, ParseError, TemperatureUnit, ThermostatMode};
