use crate::egui::Context; // b/c of re-export
use tokio::sync::mpsc::Sender;
use tokio::sync::mpsc::error::TrySendError;
use tokio;
use log;
use chrono::Local;
use crate::interface::*;
use crate::error::DashboardError;

mod api;
mod packet;
mod resolve;

use api::DeviceApi;

/// One load cycle: resolve the first connected device, fetch its latest
/// packet, decode it. Callable from anywhere that has an ApiConfig, the GUI
/// worker below is just one caller.
pub async fn load_reading(cfg : &ApiConfig) -> Result<Reading, DashboardError> {
  let api = DeviceApi::new(cfg)?;
  resolve::resolve_reading(&api).await
}

/// Runs exactly once per session on its own thread. Whatever happens, the GUI
/// gets a single PowerState message: a reading or a collapsed error string.
#[tokio::main]
pub async fn worker_thread(sender : Sender<PowerState>, ctx : Context, cfg : PowerDashboardConfig) {
  let mut state = PowerState::default();

  match load_reading(&cfg.api).await {
    Ok( reading ) => {
      state.reading = Some( reading );
      state.fetched_at = Some( Local::now() );
    },
    Err( e ) => {
      log::error!("Load cycle failed : {}", e);
      state.error = Some( e.to_string() );
    },
  }

  match sender.try_send(state) {
    Ok(()) => ctx.request_repaint(),
    Err( TrySendError::Full( _ ) ) => log::warn!("Failed to send state, GUI is not consuming it!"),
    Err( TrySendError::Closed( _ ) ) => log::warn!("Failed to send state - channel is closed. Probably GUI is dead."),
  }
}
