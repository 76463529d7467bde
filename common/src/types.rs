use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown mode '{0}', expected heat, cool or auto")]
    Mode(String),
    #[error("unknown unit '{0}', expected F or C")]
    Unit(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThermostatMode {
    Heat,
    Cool,
    Auto,
}

impl ThermostatMode {
    pub const ALL: [ThermostatMode; 3] = [Self::Heat, Self::Cool, Self::Auto];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heat => "HEAT",
            Self::Cool => "COOL",
            Self::Auto => "AUTO",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Heat => "Heat",
            Self::Cool => "Cool",
            Self::Auto => "Auto",
        }
    }
}

impl FromStr for ThermostatMode {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "HEAT" => Ok(Self::Heat),
            "COOL" => Ok(Self::Cool),
            "AUTO" => Ok(Self::Auto),
            _ => Err(ParseError::Mode(value.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureUnit {
    Fahrenheit,
    Celsius,
}

impl TemperatureUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fahrenheit => "F",
            Self::Celsius => "C",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Fahrenheit => "°F",
            Self::Celsius => "°C",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Fahrenheit => Self::Celsius,
            Self::Celsius => Self::Fahrenheit,
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "F" | "°F" | "FAHRENHEIT" => Ok(Self::Fahrenheit),
            "C" | "°C" | "CELSIUS" => Ok(Self::Celsius),
            _ => Err(ParseError::Unit(value.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HvacActivity {
    Idle,
    Heating,
    Cooling,
}

impl HvacActivity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Heating => "HEATING",
            Self::Cooling => "COOLING",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Heating => "Heating",
            Self::Cooling => "Cooling",
        }
    }

    pub fn is_heating(self) -> bool {
        self == Self::Heating
    }

    pub fn is_cooling(self) -> bool {
        self == Self::Cooling
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControllerStatus {
    #[serde(rename = "currentTemp")]
    pub current_temp_f: f32,
    #[serde(rename = "targetTemp")]
    pub target_temp_f: f32,
    #[serde(rename = "currentTempC")]
    pub current_temp_c: f32,
    #[serde(rename = "targetTempC")]
    pub target_temp_c: f32,
    #[serde(rename = "currentTempDisplay")]
    pub current_temp_display: f32,
    #[serde(rename = "targetTempDisplay")]
    pub target_temp_display: i32,
    #[serde(rename = "minTargetDisplay")]
    pub min_target_display: i32,
    #[serde(rename = "maxTargetDisplay")]
    pub max_target_display: i32,
    pub mode: &'static str,
    pub power: bool,
    pub heating: bool,
    pub cooling: bool,
    pub status: &'static str,
    #[serde(skip)]
    pub activity: HvacActivity,
    #[serde(rename = "displayUnit")]
    pub display_unit: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("heat".parse::<ThermostatMode>(), Ok(ThermostatMode::Heat));
        assert_eq!(" Cool ".parse::<ThermostatMode>(), Ok(ThermostatMode::Cool));
        assert_eq!("AUTO".parse::<ThermostatMode>(), Ok(ThermostatMode::Auto));
        assert_eq!(
            "off".parse::<ThermostatMode>(),
            Err(ParseError::Mode("off".to_string()))
        );
    }

    #[test]
    fn unit_toggles_back_and_forth() {
        let unit = TemperatureUnit::Fahrenheit;
        assert_eq!(unit.toggled(), TemperatureUnit::Celsius);
        assert_eq!(unit.toggled().toggled(), unit);
        assert_eq!("°c".parse::<TemperatureUnit>(), Ok(TemperatureUnit::Celsius));
        assert!("kelvin".parse::<TemperatureUnit>().is_err());
    }

    #[test]
    fn activity_flags_are_exclusive() {
        for activity in [HvacActivity::Idle, HvacActivity::Heating, HvacActivity::Cooling] {
            assert!(!(activity.is_heating() && activity.is_cooling()));
        }
    }
}
