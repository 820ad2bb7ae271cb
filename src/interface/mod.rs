use serde::{Serialize, Deserialize};
use std::option::Option;

/// What the worker hands to the GUI after the one load cycle of a session.
/// Either `reading` or `error` is set, never both.
#[derive(Default, Debug, Clone)]
pub struct PowerState {
  pub reading : Option<Reading>,
  pub error : Option<String>,
  pub fetched_at : Option<chrono::DateTime<chrono::Local>>,
}

/// One decoded telemetry sample. Positional: temperature, humidity, voltage,
/// current, leakage current, active power, reactive power, alarm code.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Reading {
  pub values : Vec<f64>,
}

pub const ALARM_INDEX : usize = 7;

impl Reading {
  pub fn new(values : Vec<f64>) -> Reading {
    Reading { values }
  }

  pub fn get(&self, index : usize) -> Option<f64> {
    self.values.get(index).copied()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }
}

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub enum AlarmStatus {
  #[default]
  Unset,
  Normal,
  Alarm,
}

impl AlarmStatus {
  pub fn icon_file(&self) -> Option<&'static str> {
    match self {
      AlarmStatus::Unset => None,
      AlarmStatus::Normal => Some( "alarm_blue.svg" ),
      AlarmStatus::Alarm => Some( "alarm_red.svg" ),
    }
  }
}

/// Sticky alarm state. An alarm code outside 0/1 keeps whatever status was
/// latched before, it does not fall back to Unset.
#[derive(Default, Debug, Clone)]
pub struct AlarmLatch {
  status : AlarmStatus,
}

impl AlarmLatch {
  pub fn status(&self) -> AlarmStatus {
    self.status
  }

  pub fn observe(&mut self, reading : &Reading) {
    if reading.is_empty() {
      return;
    }
    match reading.get(ALARM_INDEX) {
      Some( code ) if code == 0.0 => self.status = AlarmStatus::Normal,
      Some( code ) if code == 1.0 => self.status = AlarmStatus::Alarm,
      other => log::warn!("Alarm code {:?} is out of range, keeping {:?}", other, self.status),
    }
  }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PowerDashboardConfig {
  pub api : ApiConfig,
  pub language : String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApiConfig {
  pub base_url : String,
  pub token : String,
}

impl Default for PowerDashboardConfig {
  fn default() -> Self {
    PowerDashboardConfig {
      api : ApiConfig::default(),
      language : String::from("cn"),
    }
  }
}

impl Default for ApiConfig {
  fn default() -> Self {
    ApiConfig {
      base_url : String::from("http://127.0.0.1:8080/api"),
      token : String::new(),
    }
  }
}

impl PowerDashboardConfig {
  /// The token usually comes from the environment rather than the config
  /// file, same as the original deployment did.
  pub fn apply_env_overrides(mut self) -> Self {
    if let Ok( token ) = std::env::var("POWER_DASHBOARD_TOKEN") {
      self.api.token = token;
    }
    if let Ok( base_url ) = std::env::var("POWER_DASHBOARD_API_URL") {
      self.api.base_url = base_url;
    }
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn latch_starts_unset() {
    let latch = AlarmLatch::default();
    assert_eq!(latch.status(), AlarmStatus::Unset);
  }

  #[test]
  fn latch_follows_alarm_code() {
    let mut latch = AlarmLatch::default();

    latch.observe(&Reading::new(vec![23.5, 41.0, 229.8, 1.2, 0.003, 250.0, 30.0, 0.0]));
    assert_eq!(latch.status(), AlarmStatus::Normal);

    latch.observe(&Reading::new(vec![23.5, 41.0, 229.8, 1.2, 0.003, 250.0, 30.0, 1.0]));
    assert_eq!(latch.status(), AlarmStatus::Alarm);
  }

  #[test]
  fn latch_keeps_status_on_out_of_range_code() {
    let mut latch = AlarmLatch::default();

    latch.observe(&Reading::new(vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]));
    assert_eq!(latch.status(), AlarmStatus::Normal);

    latch.observe(&Reading::new(vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0]));
    assert_eq!(latch.status(), AlarmStatus::Normal);
  }

  #[test]
  fn latch_ignores_empty_and_short_readings() {
    let mut latch = AlarmLatch::default();

    latch.observe(&Reading::new(vec![]));
    assert_eq!(latch.status(), AlarmStatus::Unset);

    latch.observe(&Reading::new(vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]));
    assert_eq!(latch.status(), AlarmStatus::Alarm);

    // a reading without the alarm element keeps the latched status
    latch.observe(&Reading::new(vec![1.0, 2.0, 3.0]));
    assert_eq!(latch.status(), AlarmStatus::Alarm);
  }
}
