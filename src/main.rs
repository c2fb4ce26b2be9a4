use clap::{Parser, Subcommand, ValueEnum};
use scodec::codec::{Dimension, Point};
use scodec::components::{control_page, ControlInputForm, Node, TextPanel};
use scodec::config::{Config, ConfigLoader};
use scodec::error::AppResult;
use scodec::logging::init_tracing;
use scodec::service::{
    CodecService, DecodeRequest, DecodeResult, EncodeRequest, EncodeResult, RenderRequest,
};
use serde::Serialize;
use std::path::PathBuf;

#[cfg(feature = "rest-api")]
use {
    scodec::rest_api::{build_router, RestContext},
    tokio::{net::TcpListener, signal},
    tracing::{error, info},
};

// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    name = "scodec",
    version,
    about = "Hilbert-curve spatial codec with an HTTP control panel.",
    long_about = "Encodes data blocks as coordinates on 2D and 3D Hilbert curves, decodes them back, renders the curve as SVG, and serves the control panel components over HTTP."
)]
struct Args {
    /// Path to a scodec.toml; overrides the standard search locations.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct CodecArgs {
    /// Curve dimension: 2 or 3.
    #[arg(short = 'n', long)]
    dimension: Option<Dimension>,

    /// Bits per block (a power of 4 for N2, 8 for N3).
    #[arg(short, long)]
    block: Option<usize>,
}

#[derive(clap::Args, Debug)]
#[group(multiple = false)]
struct PayloadArgs {
    /// Payload as hex, or as a bit array with a 0b prefix.
    #[arg(long)]
    hex: Option<String>,

    /// Payload as UTF-8 text.
    #[arg(short = 'd', long)]
    text: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server.
    #[cfg(feature = "rest-api")]
    Serve {
        /// Address to bind (defaults to server.host).
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (defaults to server.port).
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Encode a payload, then decode it again to check the round trip.
    Encode {
        #[command(flatten)]
        codec: CodecArgs,
        #[command(flatten)]
        payload: PayloadArgs,
        /// Number of frames; defaults to as many as the payload needs.
        #[arg(short, long)]
        frames: Option<usize>,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Decode frames of coordinates given as JSON.
    Decode {
        #[command(flatten)]
        codec: CodecArgs,
        /// `[[x,y],...]` for one frame or `[[[x,y],...],...]` for several.
        #[arg(long)]
        points: String,
        /// Output length in bytes.
        #[arg(long)]
        bytes: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Render a block and its encoded payload as SVG.
    Render {
        #[command(flatten)]
        codec: CodecArgs,
        #[command(flatten)]
        payload: PayloadArgs,
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the control panel components.
    Page {
        #[arg(long, value_enum, default_value_t = PageComponent::All)]
        component: PageComponent,
        /// Text panel content (defaults to ui.display_text).
        #[arg(long)]
        text: Option<String>,
        /// Print the render tree as JSON instead of HTML.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PageComponent {
    TextPanel,
    ControlForm,
    All,
}

/// `encode --json` output: the encoding plus the decode that checked it.
#[derive(Serialize)]
struct EncodeReport<'a> {
    #[serde(flatten)]
    encoded: &'a EncodeResult,
    round_trip: &'a DecodeResult,
    verified: bool,
}

fn load_config(path: Option<&PathBuf>) -> AppResult<Config> {
    match path {
        Some(path) => Ok(ConfigLoader::load_from(path)?.into_config()),
        None => Ok(match ConfigLoader::load() {
            Ok(loader) => loader.into_config(),
            Err(e) => {
                eprintln!("Warning: Failed to load config, using defaults: {}", e);
                ConfigLoader::with_defaults().into_config()
            }
        }),
    }
}

/// Accept either a single frame or a list of frames.
fn parse_frames(raw: &str) -> Result<Vec<Vec<Point>>, serde_json::Error> {
    serde_json::from_str::<Vec<Vec<Point>>>(raw)
        .or_else(|_| serde_json::from_str::<Vec<Point>>(raw).map(|frame| vec![frame]))
}

fn join_points(points: &[Point]) -> String {
    points
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

// --- Main Application Entry Point ---
#[tokio::main]
async fn main() -> AppResult<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;

    let level = match (&args.command, args.verbose) {
        (_, true) => "debug",
        #[cfg(feature = "rest-api")]
        (Command::Serve { .. }, false) => config.server.log_level.as_str(),
        _ => "warn",
    };
    init_tracing(level, &config.logging)?;

    let service = CodecService::new(config.codec.clone(), config.render);

    match args.command {
        #[cfg(feature = "rest-api")]
        Command::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let app = build_router(RestContext::new(service, config.ui.clone()));
            let listener = TcpListener::bind((host.as_str(), port)).await?;
            let addr = listener.local_addr()?;
            info!(%addr, version = env!("CARGO_PKG_VERSION"), "scodec server listening");
            println!("Spatial codec control panel on http://{}", addr);

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
        Command::Encode {
            codec,
            payload,
            frames,
            json,
        } => {
            let encoded = service.encode(EncodeRequest {
                dimension: codec.dimension,
                block_size: codec.block,
                frames,
                hex: payload.hex,
                text: payload.text,
            })?;
            // a truncated encode cannot fill the payload's full length
            let capacity = (encoded.frames.len() * encoded.block_size).div_ceil(8);
            let decoded = service.decode(DecodeRequest {
                dimension: Some(encoded.dimension),
                block_size: Some(encoded.block_size),
                frames: encoded.frames.clone(),
                byte_len: Some(encoded.byte_len.min(capacity)),
            })?;
            let verified = decoded.hex == encoded.payload_hex;

            if json {
                let report = EncodeReport {
                    encoded: &encoded,
                    round_trip: &decoded,
                    verified,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            println!(
                "codec: {} ({}-bit block), payload: 0x{}",
                encoded.dimension, encoded.block_size, encoded.payload_hex
            );
            for (i, frame) in encoded.frames.iter().enumerate() {
                println!("frame {i}: {}", join_points(frame));
            }
            if encoded.truncated {
                println!("warning: payload truncated to {} frame(s)", encoded.frames.len());
            }
            match decoded.text {
                Some(text) => println!("decoded: {text}"),
                None => println!("decoded: 0x{}", decoded.hex),
            }
            if !verified {
                println!("round trip differs from the input");
            }
        }
        Command::Decode {
            codec,
            points,
            bytes,
            json,
        } => {
            let decoded = service.decode(DecodeRequest {
                dimension: codec.dimension,
                block_size: codec.block,
                frames: parse_frames(&points)?,
                byte_len: bytes,
            })?;
            if json {
                println!("{}", serde_json::to_string_pretty(&decoded)?);
            } else {
                println!("hex: 0x{}", decoded.hex);
                if let Some(text) = decoded.text {
                    println!("text: {text}");
                }
            }
        }
        Command::Render {
            codec,
            payload,
            output,
        } => {
            let svg = service.render(RenderRequest {
                dimension: codec.dimension,
                block_size: codec.block,
                hex: payload.hex,
                text: payload.text,
                points: None,
            })?;
            match output {
                Some(path) => std::fs::write(path, svg)?,
                None => print!("{svg}"),
            }
        }
        Command::Page {
            component,
            text,
            json,
        } => {
            let text = text.unwrap_or_else(|| config.ui.display_text.clone());
            let nodes: Vec<Node> = match component {
                PageComponent::TextPanel => vec![TextPanel::new(text.as_str()).render()],
                PageComponent::ControlForm => vec![ControlInputForm::new().render()],
                PageComponent::All => vec![
                    TextPanel::new(text.as_str()).render(),
                    ControlInputForm::new().render(),
                ],
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&nodes)?);
            } else if component == PageComponent::All {
                print!("{}", control_page(&config.ui.title, &text));
            } else {
                for node in nodes {
                    println!("{}", node.to_html());
                }
            }
        }
    }

    Ok(())
}

// --- Graceful Shutdown Handler ---
#[cfg(feature = "rest-api")]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("signal received, starting graceful shutdown");
}
