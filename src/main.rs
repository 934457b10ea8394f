use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod gallery;
mod manifest;
mod server;
mod ui;

use config::GalleryConfig;
use gallery::fetch::Source;
use gallery::location::{gallery_url, parse_location};

fn root_arg() -> Arg {
    Arg::new("root")
        .long("root")
        .value_parser(value_parser!(PathBuf))
        .help("Site root containing index.html, images.json and gallery/ [env: TAG_GALLERY_ROOT]")
}

fn cli() -> Command {
    Command::new("tag-gallery")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Tag-folder image gallery: manifest generator, JSON server and viewer")
        .subcommand(
            Command::new("generate")
                .about("Scan gallery/<tag>/ folders and write images.json")
                .arg(root_arg()),
        )
        .subcommand(
            Command::new("serve")
                .about("Serve the site with live /api/images and /api/tags endpoints")
                .arg(root_arg())
                .arg(
                    Arg::new("bind")
                        .long("bind")
                        .help("Address to bind [env: TAG_GALLERY_BIND]"),
                )
                .arg(
                    Arg::new("port")
                        .long("port")
                        .value_parser(value_parser!(u16))
                        .help("Port to listen on [env: TAG_GALLERY_PORT]"),
                ),
        )
        .subcommand(
            Command::new("view")
                .about("Open the gallery viewer")
                .arg(
                    Arg::new("location")
                        .help("Site folder, page file or http(s) page URL to open"),
                )
                .arg(
                    Arg::new("tag")
                        .long("tag")
                        .help("Open the gallery page for this tag"),
                )
                .arg(
                    Arg::new("api")
                        .long("api")
                        .action(ArgAction::SetTrue)
                        .help("Load images from the server's /api endpoints instead of images.json"),
                )
                .arg(
                    Arg::new("columns")
                        .long("columns")
                        .value_parser(value_parser!(usize))
                        .help("Number of grid columns [env: TAG_GALLERY_COLUMNS]"),
                ),
        )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn apply_root(config: &mut GalleryConfig, args: &ArgMatches) {
    if let Some(root) = args.get_one::<PathBuf>("root") {
        config.site_root = root.clone();
    }
}

fn run_generate(mut config: GalleryConfig, args: &ArgMatches) -> ExitCode {
    apply_root(&mut config, args);

    match manifest::writer::generate(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("❌ Error generating {}: {}", config.manifest_name, e);
            ExitCode::FAILURE
        }
    }
}

fn run_serve(mut config: GalleryConfig, args: &ArgMatches) -> ExitCode {
    apply_root(&mut config, args);
    if let Some(bind) = args.get_one::<String>("bind") {
        config.bind = bind.clone();
    }
    if let Some(port) = args.get_one::<u16>("port") {
        config.port = *port;
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("❌ Failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(server::run(&config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("❌ Server failed on {}: {}", config.bind_addr(), e);
            ExitCode::FAILURE
        }
    }
}

fn run_view(mut config: GalleryConfig, args: &ArgMatches) -> ExitCode {
    if let Some(columns) = args.get_one::<usize>("columns").filter(|c| **c > 0) {
        config.columns = *columns;
    }

    let source = if args.get_flag("api") {
        Source::Api
    } else {
        Source::Manifest
    };

    let mut start = match args.get_one::<String>("location") {
        Some(input) => match parse_location(input) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::error!("❌ Cannot open {}: {}", input, e);
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    if let (Some(url), Some(tag)) = (start.as_mut(), args.get_one::<String>("tag")) {
        *url = gallery_url(url, tag);
    }

    match ui::run(start, source, config.columns) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("❌ Viewer failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let matches = cli().get_matches();
    let config = GalleryConfig::from_env();

    match matches.subcommand() {
        Some(("generate", args)) => run_generate(config, args),
        Some(("serve", args)) => run_serve(config, args),
        Some(("view", args)) => run_view(config, args),
        _ => {
            let _ = cli().print_help();
            ExitCode::SUCCESS
        }
    }
}
