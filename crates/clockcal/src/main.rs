use std::process::ExitCode;

use clockcal::config::AppConfig;
use clockcal::supervisor::Supervisor;
use clockcal::view::ClockView;
use clockcal_engine::logging::{LoggingConfig, init_logging};

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    let config = AppConfig::default();
    let (supervisor, port) = Supervisor::new(&config);
    let view = ClockView::new(config, port);

    match supervisor.run(view) {
        Ok(reason) => {
            log::info!("exiting: {reason}");
            ExitCode::from(reason.exit_code())
        }
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
