use eframe::egui;
use crate::egui::*;
use crate::egui::widget_text::RichText;
use tokio::sync::mpsc::{channel, Receiver};
use tokio::sync::mpsc::error::TryRecvError;
use std::thread;
use std::path::Path;
use log;
use egui_extras::image::RetainedImage;

use crate::interface::*;
use crate::worker::worker_thread;

mod images;
mod texts;

use images::Images;
use texts::{Texts, language_from_code};

pub struct PowerDashboard {
  state : PowerState,
  latch : AlarmLatch,
  receiver : Receiver<PowerState>,
  images : Images,
  texts : Texts,
  worker_done : bool,
}

impl PowerDashboard {
  pub fn new(cc : &eframe::CreationContext<'_>, cfg : PowerDashboardConfig) -> Self {
    log::debug!("PowerDashboard created with IntegrationInfo {:?}", cc.integration_info);
    const MAX_NUM_MESSAGES : usize = 10;

    let (worker_sender, gui_receiver) = channel::<PowerState>(MAX_NUM_MESSAGES);
    let ctx = cc.egui_ctx.clone();

    let texts = Texts::new(language_from_code(&cfg.language));
    let images = Images::new(Path::new("."));

    // it detaches but the single state message comes back via the channel
    thread::spawn(move|| worker_thread(worker_sender, ctx, cfg));

    PowerDashboard {
     state : PowerState::default(),
     latch : AlarmLatch::default(),
     receiver : gui_receiver,
     images,
     texts,
     worker_done : false,
   }
  }

  fn stat_card(&self, ui : &mut Ui, image : Option<&RetainedImage>, title : &str, value : Option<String>, color : Color32) {
    ui.group(|ui| {
      ui.vertical_centered(|ui| {
        ui.horizontal(|ui| {
          if let Some( image ) = image {
            image.show_size(ui, vec2(28.0, 28.0));
          }
          ui.heading(title);
        });
        match value {
          Some( text ) => ui.label( RichText::new(text).heading().color(color).size(36.0) ),
          //still loading, or the reading came back short
          None => ui.label( RichText::new("--").heading().weak().size(36.0) ),
        };
      });
    });
  }
}

impl eframe::App for PowerDashboard {
  fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {

    //only last message from channel is actual
    let mut new_state : Option<PowerState> = None;
    while !self.worker_done {
      match self.receiver.try_recv() {
        Ok( state ) => {
            new_state = Some( state );
            log::debug!("recv: {:?}", new_state);
         },
        Err( TryRecvError::Disconnected ) => {
          //the worker exits right after its single send, nothing more will arrive
          log::debug!("Worker channel is closed, load cycle is over.");
          self.worker_done = true;
        },
        _ => break,
      }
    }

    if let Some( new_state ) = new_state {
      if let Some( reading ) = &new_state.reading {
        self.latch.observe(reading);
      }
      self.state = new_state;
    }

    let Vec2 {x : frame_width, ..} = ctx.screen_rect().size();

    egui::CentralPanel::default().show(ctx, |ui| {
      if ui.ctx().input( |i| i.key_pressed(Key::Q) )   {
        frame.close();
      }

      if let Some( error ) = &self.state.error {
        ui.label( RichText::new(format!("{} : {}", self.texts.request_failed(), error)).heading().color(Color32::RED) );
        return;
      }

      let reading = self.state.reading.clone().unwrap_or_default();

      let titles = [
        self.texts.temperature(),
        self.texts.humidity(),
        self.texts.voltage(),
        self.texts.current(),
        self.texts.leakage_current(),
        self.texts.active_power(),
        self.texts.reactive_power(),
      ];
      let icons = [
        self.images.temperature.as_ref(),
        self.images.humidity.as_ref(),
        self.images.voltage.as_ref(),
        self.images.current.as_ref(),
        self.images.leakage_current.as_ref(),
        self.images.active_power.as_ref(),
        self.images.reactive_power.as_ref(),
      ];

      Grid::new("power grid")
       .min_col_width(frame_width / 2.2)
       .num_columns(2)
       .show(ui, |ui| {
         for index in 0..titles.len() {
           let value = reading.get(index).map(|v| format!("{}", v));
           self.stat_card(ui, icons[index], titles[index], value, Color32::GREEN);
           if index % 2 == 1 {
             ui.end_row();
           }
         }

         let status = self.latch.status();
         let color = match status {
           AlarmStatus::Alarm => Color32::RED,
           _ => Color32::LIGHT_BLUE,
         };
         let value = match status {
           AlarmStatus::Unset => None,
           _ => Some( self.texts.alarm_text(status).to_string() ),
         };
         self.stat_card(ui, self.images.alarm(status), self.texts.status(), value, color);
         ui.end_row();
       });

      if let Some( fetched_at ) = &self.state.fetched_at {
        ui.label(format!("{} {}", self.texts.updated_at(), fetched_at.format("%Y-%m-%d %H:%M:%S")));
      }
    });
  }

}
