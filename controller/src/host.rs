use std::{
    future::Future,
    io::{BufRead, ErrorKind},
    path::Path,
    sync::Arc,
};

use anyhow::Context;
use thermostat_common::{
    ControllerStatus, RandomDrift, SimulationConfig, StartupSettings, ThermostatController,
};
use tokio::sync::{mpsc, Mutex};
use tracing::{info, warn};

use crate::{
    clock::{spawn_tick_loop, IntervalClock},
    console::{self, Command, Reply, HELP},
};

pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = load_simulation_config().await?;
    let drift = match std::env::var("THERMOSTAT_DRIFT_SEED")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
    {
        Some(seed) => {
            info!("idle drift seeded with {seed}");
            RandomDrift::seeded(seed)
        }
        None => RandomDrift::from_os_rng(),
    };

    let mut controller =
        ThermostatController::new(config, StartupSettings::default(), Box::new(drift));
    let (clock, schedule) = IntervalClock::new();
    controller.attach_clock(Box::new(clock));
    info!(
        "thermostat simulation started, ticking every {} ms",
        controller.config().tick_interval_ms
    );

    let initial = controller.status();
    let controller = Arc::new(Mutex::new(controller));

    let (updates, rendered) = mpsc::channel::<ControllerStatus>(16);
    let render_task = spawn_render_loop(rendered);
    let tick_task = spawn_tick_loop(controller.clone(), schedule, updates.clone());

    println!("{HELP}");
    send_update(&updates, initial).await;

    let shutdown = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("interrupt received"),
            Err(err) => {
                warn!("ctrl-c handler unavailable: {err}");
                std::future::pending::<()>().await;
            }
        }
    };
    run_session(controller.clone(), updates.clone(), spawn_stdin_reader(), shutdown).await?;

    // Dropping the detached clock closes the schedule channel and ends the tick loop.
    drop(controller.lock().await.detach_clock());
    if let Err(err) = tick_task.await {
        warn!("tick loop ended abnormally: {err}");
    }

    drop(updates);
    if let Err(err) = render_task.await {
        warn!("render loop ended abnormally: {err}");
    }

    info!("session ended");
    Ok(())
}

async fn run_session(
    controller: Arc<Mutex<ThermostatController>>,
    updates: mpsc::Sender<ControllerStatus>,
    mut input: mpsc::Receiver<std::io::Result<String>>,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<()> {
    tokio::pin!(shutdown);
    let mut input_open = true;

    loop {
        tokio::select! {
            _ = &mut shutdown => return Ok(()),
            line = input.recv(), if input_open => {
                let Some(line) = line else {
                    info!("console input closed, running until interrupted");
                    input_open = false;
                    continue;
                };
                let line = line.context("failed to read console input")?;
                if line.trim().is_empty() {
                    continue;
                }

                let command = match line.parse::<Command>() {
                    Ok(command) => command,
                    Err(err) => {
                        println!("error: {err}");
                        continue;
                    }
                };

                let (reply, status) = {
                    let mut controller = controller.lock().await;
                    let reply = console::apply(&mut controller, &command);
                    (reply, controller.status())
                };

                match reply {
                    Reply::Render => send_update(&updates, status).await,
                    Reply::Json => println!(
                        "{}",
                        serde_json::to_string_pretty(&status)
                            .context("failed to serialize status")?
                    ),
                    Reply::Help => println!("{HELP}"),
                    Reply::Quit => return Ok(()),
                }
            }
        }
    }
}

async fn load_simulation_config() -> anyhow::Result<SimulationConfig> {
    let mut config = match std::env::var("THERMOSTAT_CONFIG") {
        Ok(path) => read_config_file(Path::new(&path)).await?,
        Err(_) => SimulationConfig::default(),
    };

    if let Some(tick_ms) = std::env::var("THERMOSTAT_TICK_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
    {
        config.tick_interval_ms = tick_ms;
    }

    config.sanitize();
    Ok(config)
}

async fn read_config_file(path: &Path) -> anyhow::Result<SimulationConfig> {
    match tokio::fs::read(path).await {
        Ok(raw) => serde_json::from_slice::<SimulationConfig>(&raw)
            .with_context(|| format!("invalid simulation config in {}", path.display())),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            warn!(
                "simulation config {} not found, using defaults",
                path.display()
            );
            Ok(SimulationConfig::default())
        }
        Err(err) => {
            Err(err).with_context(|| format!("failed to read simulation config {}", path.display()))
        }
    }
}

fn spawn_render_loop(mut rendered: mpsc::Receiver<ControllerStatus>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(status) = rendered.recv().await {
            print!("\n{}", console::render_panel(&status));
        }
    })
}

async fn send_update(updates: &mpsc::Sender<ControllerStatus>, status: ControllerStatus) {
    if updates.send(status).await.is_err() {
        warn!("render loop is gone, dropping status update");
    }
}

// Blocking stdin reads cannot be cancelled, so they run on a plain thread
// that is abandoned at shutdown.
fn spawn_stdin_reader() -> mpsc::Receiver<std::io::Result<String>> {
    let (lines, receiver) = mpsc::channel(8);
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            if lines.blocking_send(line).is_err() {
                break;
            }
        }
    });
    receiver
}
