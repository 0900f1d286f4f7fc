//! Splice relay binary.
//!
//! Usage:
//!   relay <listen_ip> <listen_port> <forward_ip> <forward_port> \
//!         <rx_cpu> <tx_cpu> <sleep_cpu> \
//!         [--translate] [--measure-latency <log_file> <flush_interval_ms>] \
//!         [--debug-level=2]

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use splice_relay::{Acceptor, LatencyConfig, RelayConfig};
use splice_types::{Credentials, Dialect, Profile, TranslateConfig};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "relay")]
#[command(about = "Low-latency order-path splice: raw TCP relay or in-line FIX→OUCH translation")]
#[command(version)]
struct Args {
    /// Address to accept the client connection on
    listen_ip: IpAddr,
    listen_port: u16,

    /// Downstream gateway endpoint
    forward_ip: IpAddr,
    forward_port: u16,

    /// CPU core for the receive stage
    rx_cpu: usize,

    /// CPU core for the send stage
    tx_cpu: usize,

    /// CPU core held idle by the sleeper thread
    sleep_cpu: usize,

    /// Translate FIX NewOrderSingle into binary gateway orders behind a
    /// login handshake, instead of raw byte relay
    #[arg(long)]
    translate: bool,

    /// Gateway login username (translation profile)
    #[arg(long, default_value = "USER01")]
    username: String,

    /// Gateway login password (translation profile)
    #[arg(long, default_value = "PASSWORD1234567890")]
    password: String,

    /// Enable the latency pipeline: CSV path and writer flush cadence
    #[arg(long, num_args = 2, value_names = ["LOG_FILE", "FLUSH_INTERVAL_MS"])]
    measure_latency: Option<Vec<String>>,

    /// Debug verbosity; 2 enables per-frame diagnostics
    #[arg(long, default_value_t = 0)]
    debug_level: u8,
}

fn main() {
    // any argument failure exits 1, same as every other startup failure
    let args = Args::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        std::process::exit(1);
    });
    if let Err(e) = run(args) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    init_logging(args.debug_level);

    let config = build_config(&args)?;
    config.validate()?;

    info!("Starting splice relay");
    info!(listen = %config.listen, forward = %config.forward, "endpoints");
    match &config.latency {
        Some(latency) => info!(
            path = %latency.log_path.display(),
            interval_ms = latency.flush_interval.as_millis() as u64,
            "latency measurement enabled"
        ),
        None => info!("latency measurement disabled"),
    }

    let profile = if args.translate {
        Profile::Translate(TranslateConfig {
            downstream: config.forward,
            dialect: Dialect::Ouch5,
            credentials: Credentials {
                username: args.username.clone(),
                password: args.password.clone(),
            },
        })
    } else {
        Profile::Relay {
            downstream: config.forward,
        }
    };

    // sleeper runs detached for the process lifetime
    splice_relay::affinity::spawn_sleeper(config.sleep_cpu)?;

    let acceptor = Acceptor::bind(config.listen)?;
    let config = Arc::new(config);
    acceptor.serve(&profile, &config)
}

fn build_config(args: &Args) -> Result<RelayConfig> {
    let latency = match &args.measure_latency {
        Some(values) => {
            let flush_ms: u64 = values[1].parse().map_err(|_| {
                anyhow::anyhow!("invalid flush interval: {}", values[1])
            })?;
            Some(LatencyConfig {
                log_path: values[0].clone().into(),
                flush_interval: Duration::from_millis(flush_ms),
            })
        }
        None => None,
    };

    Ok(RelayConfig {
        listen: SocketAddr::new(args.listen_ip, args.listen_port),
        forward: SocketAddr::new(args.forward_ip, args.forward_port),
        rx_cpu: args.rx_cpu,
        tx_cpu: args.tx_cpu,
        sleep_cpu: args.sleep_cpu,
        latency,
        debug_level: args.debug_level,
    })
}

fn init_logging(debug_level: u8) {
    let level = if debug_level >= 2 {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();
}
