use std::fmt;

use crate::{
    clock::ClockSubscription,
    config::{target_bounds, SimulationConfig, StartupSettings, MAX_TARGET_F, MIN_TARGET_F},
    drift::DriftSource,
    types::{ControllerStatus, HvacActivity, TemperatureUnit, ThermostatMode},
    units,
};

pub struct ThermostatController {
    config: SimulationConfig,

    target_temp_f: f32,
    current_temp_f: f32,
    power: bool,
    mode: ThermostatMode,
    activity: HvacActivity,
    display_unit: TemperatureUnit,

    drift: Box<dyn DriftSource>,
    clock: Option<Box<dyn ClockSubscription>>,
}

impl ThermostatController {
    pub fn new(
        mut config: SimulationConfig,
        mut settings: StartupSettings,
        drift: Box<dyn DriftSource>,
    ) -> Self {
        config.sanitize();
        settings.sanitize();
        Self {
            config,
            target_temp_f: settings.target_temp_f,
            current_temp_f: units::round_tenths(settings.current_temp_f),
            power: settings.power,
            mode: settings.mode,
            activity: HvacActivity::Idle,
            display_unit: settings.display_unit,
            drift,
            clock: None,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn target_temp_f(&self) -> f32 {
        self.target_temp_f
    }

    pub fn current_temp_f(&self) -> f32 {
        self.current_temp_f
    }

    pub fn is_powered(&self) -> bool {
        self.power
    }

    pub fn mode(&self) -> ThermostatMode {
        self.mode
    }

    pub fn activity(&self) -> HvacActivity {
        self.activity
    }

    pub fn is_heating(&self) -> bool {
        self.activity.is_heating()
    }

    pub fn is_cooling(&self) -> bool {
        self.activity.is_cooling()
    }

    pub fn display_unit(&self) -> TemperatureUnit {
        self.display_unit
    }

    pub fn attach_clock(&mut self, mut clock: Box<dyn ClockSubscription>) {
        if let Some(mut previous) = self.clock.take() {
            previous.stop();
        }
        if self.power {
            clock.start(self.config.tick_interval_ms);
        }
        self.clock = Some(clock);
    }

    pub fn detach_clock(&mut self) -> Option<Box<dyn ClockSubscription>> {
        let mut clock = self.clock.take()?;
        clock.stop();
        Some(clock)
    }

    pub fn set_mode(&mut self, mode: ThermostatMode) -> bool {
        if !self.power || self.mode == mode {
            return false;
        }
        self.mode = mode;
        true
    }

    pub fn adjust_target(&mut self, delta: i32) -> bool {
        if !self.power {
            return false;
        }

        let unit = self.display_unit;
        let (min, max) = target_bounds(unit);
        let shown = units::to_display_whole(self.target_temp_f, unit);
        let next = shown.saturating_add(delta).clamp(min, max);
        let next_f = units::from_display(next as f32, unit).clamp(MIN_TARGET_F, MAX_TARGET_F);

        if (self.target_temp_f - next_f).abs() > f32::EPSILON {
            self.target_temp_f = next_f;
            true
        } else {
            false
        }
    }

    pub fn toggle_power(&mut self) -> bool {
        self.power = !self.power;
        let interval_ms = self.config.tick_interval_ms;

        if self.power {
            if let Some(clock) = self.clock.as_mut() {
                clock.start(interval_ms);
            }
        } else {
            self.activity = HvacActivity::Idle;
            if let Some(clock) = self.clock.as_mut() {
                clock.stop();
            }
        }

        self.power
    }

    pub fn toggle_unit(&mut self) -> TemperatureUnit {
        self.display_unit = self.display_unit.toggled();
        self.display_unit
    }

    pub fn tick(&mut self) -> Option<HvacActivity> {
        if !self.power {
            return None;
        }

        let current = self.current_temp_f;
        let target = self.target_temp_f;
        let band = self.config.deadband_f;
        let step = self.config.heat_cool_step_f;
        let auto = self.mode == ThermostatMode::Auto;
        let wants_heat = self.mode == ThermostatMode::Heat || (auto && current < target - band);
        let wants_cool = self.mode == ThermostatMode::Cool || (auto && current > target + band);

        let (activity, next) = if wants_heat {
            (HvacActivity::Heating, (current + step).min(target))
        } else if wants_cool {
            (HvacActivity::Cooling, (current - step).max(target))
        } else {
            let offset = self.drift.sample(self.config.idle_drift_f);
            (HvacActivity::Idle, current + offset)
        };

        self.activity = activity;
        self.current_temp_f = units::round_tenths(next);
        Some(activity)
    }

    pub fn status(&self) -> ControllerStatus {
        let unit = self.display_unit;
        let (min_target_display, max_target_display) = target_bounds(unit);
        let status = if !self.power {
            "OFF"
        } else {
            self.activity.as_str()
        };

        ControllerStatus {
            current_temp_f: self.current_temp_f,
            target_temp_f: self.target_temp_f,
            current_temp_c: units::fahrenheit_to_celsius(self.current_temp_f),
            target_temp_c: units::fahrenheit_to_celsius(self.target_temp_f),
            current_temp_display: units::to_display(self.current_temp_f, unit),
            target_temp_display: units::to_display_whole(self.target_temp_f, unit),
            min_target_display,
            max_target_display,
            mode: self.mode.as_str(),
            power: self.power,
            heating: self.is_heating(),
            cooling: self.is_cooling(),
            status,
            activity: self.activity,
            display_unit: unit.as_str(),
        }
    }
}

impl fmt::Debug for ThermostatController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThermostatController")
            .field("config", &self.config)
            .field("target_temp_f", &self.target_temp_f)
            .field("current_temp_f", &self.current_temp_f)
            .field("power", &self.power)
            .field("mode", &self.mode)
            .field("activity", &self.activity)
            .field("display_unit", &self.display_unit)
            .field("clock_attached", &self.clock.is_some())
            .finish_non_exhaustive()
    }
}
