use anyhow::Context;
use clap::Parser;
use obis2mqtt::bridge::Bridge;
use obis2mqtt::config::Config;
use obis2mqtt::mqtt::MqttPublisher;
use obis2mqtt::{init_logger, log_info};

#[derive(Parser)]
#[command(name = "obis2mqtt")]
#[command(about = "Bridge OBIS smart-meter telegrams to MQTT")]
struct Cli {
    /// Transport mode, "serial" or "socket" (overrides MODE)
    #[arg(long)]
    mode: Option<String>,
    /// Serial device path (overrides SERIAL_PATH)
    #[arg(long)]
    serial_path: Option<String>,
    /// Socket transport host (overrides SOCKET_HOST)
    #[arg(long)]
    socket_host: Option<String>,
    /// Socket transport port (overrides SOCKET_PORT)
    #[arg(long)]
    socket_port: Option<u16>,
    /// MQTT broker host (overrides MQTT_HOST)
    #[arg(long)]
    mqtt_host: Option<String>,
    /// Meter designation, topic suffix and entity-id part (overrides POWERTYPE)
    #[arg(long)]
    power_type: Option<String>,
    /// Verbose logging (overrides DEBUG)
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env().context("loading configuration")?;
    if let Some(mode) = cli.mode {
        config.mode = mode.parse()?;
    }
    if let Some(path) = cli.serial_path {
        config.serial_path = path;
    }
    if let Some(host) = cli.socket_host {
        config.socket_host = host;
    }
    if let Some(port) = cli.socket_port {
        config.socket_port = port;
    }
    if let Some(host) = cli.mqtt_host {
        config.mqtt_host = host;
    }
    if let Some(power_type) = cli.power_type {
        config.set_power_type(power_type);
    }
    if cli.debug {
        config.debug = true;
    }

    init_logger(config.debug);
    log_info(&format!(
        "bridging {:?} meter readout to mqtt://{}/{}",
        config.mode, config.mqtt_host, config.mqtt_topic
    ));

    let publisher = MqttPublisher::connect(&config);
    let mut bridge = Bridge::new(config, publisher);
    bridge.run().await.context("bridge terminated")
}
