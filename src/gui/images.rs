use log;
use egui_extras::image::RetainedImage;
use std::fs;
use std::path::Path;

use crate::interface::AlarmStatus;

/// Card icons, loaded from the working directory with the asset names the
/// deployment already uses. A missing file just means the card renders
/// without an icon.
pub struct Images {
  pub temperature : Option<RetainedImage>,
  pub humidity : Option<RetainedImage>,
  pub voltage : Option<RetainedImage>,
  pub current : Option<RetainedImage>,
  pub leakage_current : Option<RetainedImage>,
  pub active_power : Option<RetainedImage>,
  pub reactive_power : Option<RetainedImage>,
  alarm_blue : Option<RetainedImage>,
  alarm_red : Option<RetainedImage>,
}

impl Images {
  pub fn new(path : &Path) -> Images {
    Images {
      temperature : read_svg_image_with_log(&path.join("temperature.svg")),
      humidity : read_svg_image_with_log(&path.join("humid.svg")),
      voltage : read_svg_image_with_log(&path.join("voltage.svg")),
      current : read_svg_image_with_log(&path.join("electric.svg")),
      leakage_current : read_svg_image_with_log(&path.join("louelectric.svg")),
      active_power : read_svg_image_with_log(&path.join("yougong.svg")),
      reactive_power : read_svg_image_with_log(&path.join("wugong.svg")),
      alarm_blue : load_alarm_icon(path, AlarmStatus::Normal),
      alarm_red : load_alarm_icon(path, AlarmStatus::Alarm),
    }
  }

  pub fn alarm(&self, status : AlarmStatus) -> Option<&RetainedImage> {
    match status {
      AlarmStatus::Unset => None,
      AlarmStatus::Normal => self.alarm_blue.as_ref(),
      AlarmStatus::Alarm => self.alarm_red.as_ref(),
    }
  }
}

fn load_alarm_icon(path : &Path, status : AlarmStatus) -> Option<RetainedImage> {
  status.icon_file().and_then(|name| read_svg_image_with_log(&path.join(name)))
}

fn read_svg_image_with_log(file_path : &Path) -> Option<RetainedImage>
{
    match fs::read(file_path) {
        Err( err ) => {log::warn!("Failed to read {} : {}", file_path.display(), err); None},
        Ok( image_bytes ) => {
            match RetainedImage::from_svg_bytes(file_path.display().to_string(), &image_bytes) {
                Err( err ) => { log::error!("Failed to convert {} content to svg image : {}", file_path.display(), err); None },
                Ok( svg_image ) => Some( svg_image),
            }
        },
    }
}
