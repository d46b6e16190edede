use app::{AppState, create_app};
use axum_server::tls_rustls::RustlsConfig;
use clap::Parser;
use error::ServerError;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use temperature::load_temperature_store;

mod app;
mod error;
mod index;
mod lookup;
mod temperature;
mod temperature_routes;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "TEMPERATURES_HOST", default_value = "127.0.0.1")]
    host: String,

    #[arg(short, long, env = "TEMPERATURES_PORT", default_value_t = 5000)]
    port: u16,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, env = "TEMPERATURES_DEBUG")]
    debug: bool,

    /// Answer unknown places with 404 instead of 200
    #[arg(long, env = "TEMPERATURES_STRICT_STATUS")]
    strict_status: bool,

    /// TOML file with places, replacing the built-in ones
    #[arg(long, env = "TEMPERATURES_PLACES_FILE")]
    places_file: Option<PathBuf>,

    #[arg(short, long, env = "KEY_FILE_PATH")]
    key_file_path: Option<String>,

    #[arg(short, long, env = "CERT_FILE_PATH")]
    cert_file_path: Option<String>,
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

async fn resolve_address(host: &str, port: u16) -> Result<SocketAddr, ServerError> {
    let mut addresses = tokio::net::lookup_host((host, port))
        .await
        .map_err(|source| ServerError::Resolve {
            host: host.to_string(),
            port,
            source,
        })?;
    addresses.next().ok_or_else(|| ServerError::InvalidAddress {
        host: host.to_string(),
        port,
    })
}

async fn run(args: Args) -> Result<(), ServerError> {
    let temperatures = load_temperature_store(args.places_file.as_deref()).await?;
    let app = create_app(AppState::new(temperatures, args.strict_status));
    if args.strict_status {
        log::info!("unknown places are answered with 404");
    }

    let addr = resolve_address(&args.host, args.port).await?;
    log::info!("listening on {}", addr);
    if let Some(key_file_path) = args.key_file_path {
        let cert_file_path = args
            .cert_file_path
            .ok_or(ServerError::MissingCertificate)?;
        log::info!(
            "using tls with key file {} and cert file {}",
            key_file_path,
            cert_file_path
        );
        let tls = RustlsConfig::from_pem_file(cert_file_path, key_file_path)
            .await
            .map_err(|source| ServerError::Tls { source })?;
        axum_server::bind_rustls(addr, tls)
            .serve(app.into_make_service())
            .await?;
    } else {
        axum_server::bind(addr)
            .serve(app.into_make_service())
            .await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{}", error);
            ExitCode::FAILURE
        }
    }
}
