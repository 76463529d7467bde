use std::{fmt::Write as _, str::FromStr};

use thermostat_common::{
    ControllerStatus, ParseError, TemperatureUnit, ThermostatController, ThermostatMode,
};
use thiserror::Error;
use tracing::info;

pub const HELP: &str = "\
commands:
  up | +                raise target one degree
  down | -              lower target one degree
  heat | cool | auto    select mode
  mode <heat|cool|auto> select mode
  power                 toggle power
  unit [f|c]            toggle or pick °F / °C
  status                redraw the panel
  json                  print the status snapshot as JSON
  help                  show this list
  quit                  end the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Adjust(i32),
    Mode(ThermostatMode),
    Power,
    Unit(Option<TemperatureUnit>),
    Status,
    Json,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Empty);
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "up" | "+" => Self::Adjust(1),
            "down" | "-" => Self::Adjust(-1),
            "heat" | "cool" | "auto" => Self::Mode(head.parse()?),
            "mode" => {
                let value = words.next().ok_or(CommandError::MissingArgument("mode"))?;
                Self::Mode(value.parse()?)
            }
            "power" => Self::Power,
            "unit" => Self::Unit(words.next().map(str::parse::<TemperatureUnit>).transpose()?),
            "status" => Self::Status,
            "json" => Self::Json,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Render,
    Json,
    Help,
    Quit,
}

pub fn apply(controller: &mut ThermostatController, command: &Command) -> Reply {
    match command {
        Command::Adjust(delta) => {
            if controller.adjust_target(*delta) {
                info!("target set to {:.1}°F", controller.target_temp_f());
            }
            Reply::Render
        }
        Command::Mode(mode) => {
            if controller.set_mode(*mode) {
                info!("mode set to {}", mode.as_str());
            }
            Reply::Render
        }
        Command::Power => {
            let powered = controller.toggle_power();
            info!("power {}", if powered { "on" } else { "off" });
            Reply::Render
        }
        Command::Unit(unit) => {
            let wanted = unit.unwrap_or_else(|| controller.display_unit().toggled());
            if controller.display_unit() != wanted {
                let unit = controller.toggle_unit();
                info!("display unit {}", unit.symbol());
            }
            Reply::Render
        }
        Command::Status => Reply::Render,
        Command::Json => Reply::Json,
        Command::Help => Reply::Help,
        Command::Quit => Reply::Quit,
    }
}

pub fn render_panel(status: &ControllerStatus) -> String {
    let mut panel = String::new();
    let unit = format!("°{}", status.display_unit);

    let _ = writeln!(panel, "=== Smart Thermostat [{unit}] ===");
    let label = if status.power {
        status.activity.label()
    } else {
        "Off"
    };
    let _ = writeln!(panel, "Status:  {label}");
    let _ = writeln!(panel, "Current: {:.1}°", status.current_temp_display);

    let controls = if status.power { "" } else { "  (disabled)" };
    let _ = writeln!(
        panel,
        "Target:  [-] {}° [+]  range {}..{}{unit}{controls}",
        status.target_temp_display, status.min_target_display, status.max_target_display,
    );

    let modes: Vec<String> = ThermostatMode::ALL
        .iter()
        .map(|mode| {
            if status.power && mode.as_str() == status.mode {
                format!("[{}]", mode.label())
            } else {
                format!(" {} ", mode.label())
            }
        })
        .collect();
    let _ = writeln!(panel, "Mode:   {}", modes.join(" "));

    let power = if status.power { "Turn Off" } else { "Turn On" };
    let _ = writeln!(panel, "Power:   {power}");

    let heat = if status.heating { "*" } else { "-" };
    let cool = if status.cooling { "*" } else { "-" };
    let _ = writeln!(panel, "Heat {heat}  Cool {cool}");

    panel
}

#[cfg(test)]
mod tests {
    use super::*;
    use thermostat_common::{ScriptedDrift, SimulationConfig, StartupSettings};

    fn controller() -> ThermostatController {
        ThermostatController::new(
            SimulationConfig::default(),
            StartupSettings::default(),
            Box::new(ScriptedDrift::default()),
        )
    }

    #[test]
    fn parses_known_commands() {
        assert_eq!("+".parse(), Ok(Command::Adjust(1)));
        assert_eq!("DOWN".parse(), Ok(Command::Adjust(-1)));
        assert_eq!("cool".parse(), Ok(Command::Mode(ThermostatMode::Cool)));
        assert_eq!("mode Heat".parse(), Ok(Command::Mode(ThermostatMode::Heat)));
        assert_eq!("  power ".parse(), Ok(Command::Power));
        assert_eq!("unit".parse(), Ok(Command::Unit(None)));
        assert_eq!("unit C".parse(), Ok(Command::Unit(Some(TemperatureUnit::Celsius))));
        assert_eq!("json".parse(), Ok(Command::Json));
        assert_eq!("exit".parse(), Ok(Command::Quit));
    }

    #[test]
    fn rejects_bad_commands() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "fan".parse::<Command>(),
            Err(CommandError::Unknown("fan".to_string()))
        );
        assert_eq!(
            "mode".parse::<Command>(),
            Err(CommandError::MissingArgument("mode"))
        );
        assert_eq!(
            "mode off".parse::<Command>(),
            Err(CommandError::Parse(ParseError::Mode("off".to_string())))
        );
        assert_eq!(
            "unit k".parse::<Command>(),
            Err(CommandError::Parse(ParseError::Unit("k".to_string())))
        );
    }

    #[test]
    fn unit_command_toggles_or_picks() {
        let mut controller = controller();

        apply(&mut controller, &Command::Unit(Some(TemperatureUnit::Fahrenheit)));
        assert_eq!(controller.display_unit(), TemperatureUnit::Fahrenheit);

        apply(&mut controller, &Command::Unit(None));
        assert_eq!(controller.display_unit(), TemperatureUnit::Celsius);

        apply(&mut controller, &Command::Unit(Some(TemperatureUnit::Celsius)));
        assert_eq!(controller.display_unit(), TemperatureUnit::Celsius);

        apply(&mut controller, &Command::Unit(Some(TemperatureUnit::Fahrenheit)));
        assert_eq!(controller.display_unit(), TemperatureUnit::Fahrenheit);
    }

    #[test]
    fn panel_labels_idle_from_activity() {
        let mut controller = controller();
        controller.set_mode(ThermostatMode::Heat);
        controller.tick();
        controller.toggle_power();
        controller.toggle_power();

        let panel = render_panel(&controller.status());

        assert!(panel.contains("Status:  Idle"));
        assert!(panel.contains("[Heat]"));
        assert!(panel.contains("Heat -  Cool -"));
    }

    #[test]
    fn apply_drives_controller() {
        let mut controller = controller();

        assert_eq!(apply(&mut controller, &Command::Adjust(1)), Reply::Render);
        assert_eq!(controller.target_temp_f(), 73.0);

        assert_eq!(
            apply(&mut controller, &Command::Mode(ThermostatMode::Heat)),
            Reply::Render
        );
        assert_eq!(controller.mode(), ThermostatMode::Heat);

        assert_eq!(apply(&mut controller, &Command::Power), Reply::Render);
        assert!(!controller.is_powered());

        assert_eq!(apply(&mut controller, &Command::Json), Reply::Json);
        assert_eq!(apply(&mut controller, &Command::Quit), Reply::Quit);
    }

    #[test]
    fn panel_shows_heating_state() {
        let mut controller = controller();
        controller.tick();

        let panel = render_panel(&controller.status());

        assert!(panel.contains("[°F]"));
        assert!(panel.contains("Status:  Heating"));
        assert!(panel.contains("Current: 68.5°"));
        assert!(panel.contains("[-] 72° [+]  range 50..90°F"));
        assert!(panel.contains("[Auto]"));
        assert!(panel.contains("Turn Off"));
        assert!(panel.contains("Heat *  Cool -"));
    }

    #[test]
    fn panel_when_off_in_celsius() {
        let mut controller = controller();
        controller.toggle_unit();
        controller.toggle_power();

        let panel = render_panel(&controller.status());

        assert!(panel.contains("[°C]"));
        assert!(panel.contains("Status:  Off"));
        assert!(panel.contains("Current: 20.0°"));
        assert!(panel.contains("[-] 22° [+]  range 10..32°C  (disabled)"));
        assert!(!panel.contains("[Auto]"));
        assert!(panel.contains("Turn On"));
        assert!(panel.contains("Heat -  Cool -"));
    }
}
