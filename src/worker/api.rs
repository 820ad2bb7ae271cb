use std::time::Duration;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use crate::error::DashboardError;
use crate::interface::ApiConfig;

const API_TIMEOUT : Duration = Duration::from_secs(10);

/// Every endpoint answers with the same wrapper, the payload type is the only
/// thing that changes.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
  pub code : i64,
  #[serde(default)]
  pub message : String,
  pub data : Option<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Org {
  pub id : String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Group {
  pub id : String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Device {
  pub id : String,
  pub number : i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DevicePacket {
  pub total_item : i64,
  #[serde(default)]
  pub items : Vec<PacketItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PacketItem {
  pub hex_packet : String,
}

pub struct DeviceApi {
  client : reqwest::Client,
  base_url : String,
}

impl DeviceApi {
  pub fn new(cfg : &ApiConfig) -> Result<DeviceApi, DashboardError> {
    let token = HeaderValue::from_str(&cfg.token)
      .map_err(|e| DashboardError::Resolution(format!("api token is not a valid header value : {}", e)))?;
    let mut headers = HeaderMap::new();
    headers.insert("token", token);

    let client = reqwest::Client::builder()
      .default_headers(headers)
      .timeout(API_TIMEOUT)
      .build()?;

    Ok( DeviceApi {
      client,
      base_url : cfg.base_url.trim_end_matches('/').to_string(),
    })
  }

  pub async fn fetch_orgs(&self) -> Result<Vec<Org>, DashboardError> {
    self.get(String::from("/orgs"), "org list").await
  }

  pub async fn fetch_grouplist(&self, org_id : &str) -> Result<Vec<Group>, DashboardError> {
    self.get(format!("/orgs/{}/grouplist", org_id), "group list").await
  }

  pub async fn fetch_devices(&self, org_id : &str, group_id : &str) -> Result<Vec<Device>, DashboardError> {
    self.get(format!("/orgs/{}/groups/{}/devices", org_id, group_id), "device list").await
  }

  pub async fn fetch_device_state(&self, org_id : &str, device_id : &str) -> Result<String, DashboardError> {
    self.get(format!("/orgs/{}/devicestate/{}", org_id, device_id), "device state").await
  }

  pub async fn fetch_device_packet(&self, org_id : &str, device_number : i64) -> Result<DevicePacket, DashboardError> {
    self.get(format!("/orgs/{}/devicepacket/{}", org_id, device_number), "device packet").await
  }

  // the backend also accepts pushed payloads; the dashboard itself never
  // sends any, so nothing in the load cycle calls this
  #[allow(dead_code)]
  pub async fn push_data(&self, payload : &serde_json::Value) -> Result<(), DashboardError> {
    let url = format!("{}/data", self.base_url);
    log::debug!("POST {}", url);
    self.client.post(&url).json(payload).send().await?.error_for_status()?;
    Ok(())
  }

  async fn get<T : DeserializeOwned>(&self, path : String, what : &str) -> Result<T, DashboardError> {
    let url = format!("{}{}", self.base_url, path);
    log::debug!("GET {}", url);
    let envelope : Envelope<T> = self.client.get(&url).send().await?.json().await?;
    unwrap_envelope(envelope, what)
  }
}

pub fn unwrap_envelope<T>(envelope : Envelope<T>, what : &str) -> Result<T, DashboardError> {
  if envelope.code != 200 {
    return Err( DashboardError::Resolution(format!("failed to fetch {} : {}", what, envelope.message)) );
  }
  match envelope.data {
    Some( data ) => Ok( data ),
    None => Err( DashboardError::Resolution(format!("failed to fetch {} : empty response body", what)) ),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn deserializes_org_envelope() {
    let body = r#"{"code":200,"message":"ok","data":[{"id":"org-1"},{"id":"org-2"}]}"#;
    let envelope : Envelope<Vec<Org>> = serde_json::from_str(body).unwrap();
    let orgs = unwrap_envelope(envelope, "org list").unwrap();
    assert_eq!(orgs.len(), 2);
    assert_eq!(orgs[0].id, "org-1");
  }

  #[test]
  fn deserializes_packet_envelope() {
    let body = r#"{"code":200,"message":"","data":{"total_item":1,"items":[{"hex_packet":"48656c6c6f"}]}}"#;
    let envelope : Envelope<DevicePacket> = serde_json::from_str(body).unwrap();
    let packet = unwrap_envelope(envelope, "device packet").unwrap();
    assert_eq!(packet.total_item, 1);
    assert_eq!(packet.items[0].hex_packet, "48656c6c6f");
  }

  #[test]
  fn non_200_code_carries_server_message() {
    let body = r#"{"code":500,"message":"boom","data":null}"#;
    let envelope : Envelope<Vec<Org>> = serde_json::from_str(body).unwrap();
    let err = unwrap_envelope(envelope, "org list").unwrap_err();
    assert!(matches!(&err, DashboardError::Resolution( msg ) if msg.contains("boom")));
  }

  #[test]
  fn missing_data_is_a_resolution_error() {
    let body = r#"{"code":200,"message":"ok"}"#;
    let envelope : Envelope<Vec<Org>> = serde_json::from_str(body).unwrap();
    let err = unwrap_envelope(envelope, "org list").unwrap_err();
    assert!(matches!(err, DashboardError::Resolution( _ )));
  }
}
