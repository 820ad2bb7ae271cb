mod interface;
mod worker;
mod gui;
mod error;

use eframe::egui;
use env_logger;
use gui::PowerDashboard;
use interface::PowerDashboardConfig;


fn main() {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let cfg : PowerDashboardConfig = match confy::load("power-dashboard", None) {
    Ok( cfg ) => cfg,
    Err( e ) => {
      log::error!("Failed to load configuration : {}. Falling back to defaults.", e);
      PowerDashboardConfig::default()
    },
  };
  let cfg = cfg.apply_env_overrides();

  let mut native_options = eframe::NativeOptions::default();
  native_options.initial_window_size = Some( egui::vec2(900.0, 700.0) );

  if let Err( e ) = eframe::run_native(
      "Power Dashboard",
      native_options,
      Box::new(|cc| Box::new(PowerDashboard::new(cc, cfg)) )
    )  {
    log::error!("Failed to run Power Dashboard {:?}", e);
  };
}
