use crate::types::TemperatureUnit;

pub fn round_tenths(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

pub fn fahrenheit_to_celsius(temp_f: f32) -> f32 {
    round_tenths((temp_f - 32.0) * 5.0 / 9.0)
}

pub fn celsius_to_fahrenheit(temp_c: f32) -> f32 {
    round_tenths(temp_c * 9.0 / 5.0 + 32.0)
}

pub fn to_display(temp_f: f32, unit: TemperatureUnit) -> f32 {
    match unit {
        TemperatureUnit::Fahrenheit => temp_f,
        TemperatureUnit::Celsius => fahrenheit_to_celsius(temp_f),
    }
}

pub fn to_display_whole(temp_f: f32, unit: TemperatureUnit) -> i32 {
    to_display(temp_f, unit).round() as i32
}

pub fn from_display(value: f32, unit: TemperatureUnit) -> f32 {
    match unit {
        TemperatureUnit::Fahrenheit => value,
        TemperatureUnit::Celsius => celsius_to_fahrenheit(value),
    }
}
