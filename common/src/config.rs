use serde::Deserialize;

use crate::types::{TemperatureUnit, ThermostatMode};

pub const MIN_TARGET_F: f32 = 50.0;
pub const MAX_TARGET_F: f32 = 90.0;
pub const MIN_TARGET_C: i32 = 10;
pub const MAX_TARGET_C: i32 = 32;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub tick_interval_ms: u64,
    pub heat_cool_step_f: f32,
    pub deadband_f: f32,
    pub idle_drift_f: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 2_000,
            heat_cool_step_f: 0.5,
            deadband_f: 1.0,
            idle_drift_f: 0.1,
        }
    }
}

impl SimulationConfig {
    pub fn sanitize(&mut self) {
        self.tick_interval_ms = self.tick_interval_ms.clamp(100, 60_000);

        let defaults = Self::default();
        if !self.heat_cool_step_f.is_finite() || self.heat_cool_step_f <= 0.0 {
            self.heat_cool_step_f = defaults.heat_cool_step_f;
        }
        if !self.deadband_f.is_finite() || self.deadband_f < 0.0 {
            self.deadband_f = defaults.deadband_f;
        }
        if !self.idle_drift_f.is_finite() || self.idle_drift_f < 0.0 {
            self.idle_drift_f = defaults.idle_drift_f;
        }

        self.heat_cool_step_f = self.heat_cool_step_f.min(5.0);
        self.deadband_f = self.deadband_f.min(5.0);
        self.idle_drift_f = self.idle_drift_f.min(1.0);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StartupSettings {
    pub target_temp_f: f32,
    pub current_temp_f: f32,
    pub power: bool,
    pub mode: ThermostatMode,
    pub display_unit: TemperatureUnit,
}

impl Default for StartupSettings {
    fn default() -> Self {
        Self {
            target_temp_f: 72.0,
            current_temp_f: 68.0,
            power: true,
            mode: ThermostatMode::Auto,
            display_unit: TemperatureUnit::Fahrenheit,
        }
    }
}

impl StartupSettings {
    pub fn sanitize(&mut self) {
        let defaults = Self::default();
        if !self.target_temp_f.is_finite() {
            self.target_temp_f = defaults.target_temp_f;
        }
        if !self.current_temp_f.is_finite() {
            self.current_temp_f = defaults.current_temp_f;
        }
        self.target_temp_f = self.target_temp_f.clamp(MIN_TARGET_F, MAX_TARGET_F);
    }
}

pub fn target_bounds(unit: TemperatureUnit) -> (i32, i32) {
    match unit {
        TemperatureUnit::Fahrenheit => (MIN_TARGET_F as i32, MAX_TARGET_F as i32),
        TemperatureUnit::Celsius => (MIN_TARGET_C, MAX_TARGET_C),
    }
}
