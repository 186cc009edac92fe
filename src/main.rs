use clap::Parser;
use log::{
    error,
    info,
};
use noteapp::{
    cli::CliArgs,
    gui::NoteWindow,
    logging::init_logging,
    setup::build_app,
    AppConfig,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();
    init_logging();

    let data_dir = args.data_dir();
    let mut config = AppConfig::load(&data_dir);
    args.apply(&mut config);

    let app = match build_app(&config, data_dir) {
        Ok(app) => app,
        Err(e) => {
            error!("Startup failed: {e}");
            return Err(e.into());
        }
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Notes")
            .with_inner_size([520.0, 640.0]),
        ..Default::default()
    };

    info!("Starting noteapp {}", env!("CARGO_PKG_VERSION"));
    eframe::run_native("noteapp", options, Box::new(|cc| Ok(Box::new(NoteWindow::new(cc, app)))))?;
    Ok(())
}
