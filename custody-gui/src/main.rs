#![windows_subsystem = "windows"]

use std::{error::Error, io::Write};

use iced::{Settings, Size};
use tracing::{error, info};

use custody_ui::{component::text, font, theme};

use custody_gui::{
    app::{
        config::{Config, ConfigError},
        App,
    },
    args::{datadir, parse_args},
    dir::CustodyDirectory,
    logger::{parse_log_level, setup_logger},
    VERSION,
};

fn main() -> Result<(), Box<dyn Error>> {
    let args = parse_args(std::env::args().collect(), VERSION)?;
    let datadir = datadir(&args)?;
    if !datadir.exists() {
        datadir.init()?;
    }

    let config_path = datadir.config_file();
    let (config, created) = match Config::from_file(&config_path) {
        Ok(config) => (config, false),
        Err(ConfigError::NotFound) => {
            let config = Config::default();
            config.to_file(&config_path)?;
            (config, true)
        }
        Err(e) => return Err(e.into()),
    };

    let log_level = match parse_log_level()? {
        Some(level) => level,
        None => config.log_level()?,
    };
    setup_logger(log_level, &datadir)?;
    setup_panic_hook(&datadir);
    if created {
        info!("Default configuration written to {}", config_path.display());
    }
    info!("custody-gui v{} starting", VERSION);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let handle = runtime.handle().clone();

    let settings = Settings {
        id: Some("Custody".to_string()),
        antialiasing: false,
        default_text_size: text::P1_SIZE.into(),
        default_font: font::REGULAR,
        fonts: Vec::new(),
    };

    let window_settings = iced::window::Settings {
        min_size: Some(Size {
            width: 800.0,
            height: 600.0,
        }),
        ..Default::default()
    };

    if let Err(e) = iced::application(App::title, App::update, App::view)
        .theme(|_| theme::Theme::default())
        .subscription(App::subscription)
        .settings(settings)
        .window(window_settings)
        .run_with(move || App::new(config, handle))
    {
        error!("{}", e);
        Err(format!("Failed to launch UI: {}", e).into())
    } else {
        Ok(())
    }
}

// A panic in any thread should stop the main thread, and print the panic.
fn setup_panic_hook(datadir: &CustodyDirectory) {
    let datadir = datadir.path().to_path_buf();
    std::panic::set_hook(Box::new(move |panic_info| {
        let file = panic_info
            .location()
            .map(|l| l.file())
            .unwrap_or_else(|| "'unknown'");
        let line = panic_info
            .location()
            .map(|l| l.line().to_string())
            .unwrap_or_else(|| "'unknown'".to_string());

        let bt = backtrace::Backtrace::new();
        let info = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned());
        error!(
            "panic occurred at line {} of file {}: {:?}\n{:?}",
            line, file, info, bt
        );
        error!("Logs are in {}", datadir.display());

        std::io::stdout().flush().expect("Flushing stdout");
        std::process::exit(1);
    }));
}
