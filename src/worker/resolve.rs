use std::future::Future;
use futures::{pin_mut, FutureExt, StreamExt};
use crate::error::DashboardError;
use crate::interface::Reading;
use super::api::{Device, DeviceApi, DevicePacket};
use super::packet;

/// Walks org -> group -> devices -> first connected device -> packet and
/// decodes the packet into a reading. The first failing step aborts the whole
/// cycle, there is no retry.
pub async fn resolve_reading(api : &DeviceApi) -> Result<Reading, DashboardError> {
  let orgs = api.fetch_orgs().await?;
  let org = match orgs.first() {
    Some( org ) => org,
    None => return Err( DashboardError::Resolution(String::from("org list is empty")) ),
  };

  let groups = api.fetch_grouplist(&org.id).await?;
  let group = match groups.first() {
    Some( group ) => group,
    None => return Err( DashboardError::Resolution(String::from("group list is empty")) ),
  };

  let devices = api.fetch_devices(&org.id, &group.id).await?;

  let number = first_connected(&devices, |device| api.fetch_device_state(&org.id, &device.id)).await?;
  let number = match number {
    Some( number ) => number,
    None => return Err( DashboardError::Resolution(String::from("no connected device")) ),
  };

  let packet = api.fetch_device_packet(&org.id, number).await?;
  let hex_packet = take_first_hex(packet)?;

  let text = packet::hex_to_string(&hex_packet)?;
  log::debug!("decoded packet text : {}", text);

  let values = packet::parse_number_array(&text)?;
  log::info!("decoded reading : {:?}", values);

  Ok( Reading::new(values) )
}

/// Lazily queries device states in list order and stops at the first device
/// that is neither "disconnected" nor "notbind". First match wins, devices
/// after it are never queried.
pub async fn first_connected<'a, F, Fut>(devices : &'a [Device], mut fetch_state : F) -> Result<Option<i64>, DashboardError>
where
  F : FnMut(&'a Device) -> Fut,
  Fut : Future<Output = Result<String, DashboardError>>,
{
  let states = futures::stream::iter(devices)
    .then(move |device| fetch_state(device).map(move |state| state.map(|s| (device, s))));
  pin_mut!(states);

  while let Some( next ) = states.next().await {
    let (device, state) = next?;
    if state == "disconnected" || state == "notbind" {
      log::debug!("device {} is {}, looking further", device.id, state);
      continue;
    }
    log::info!("selected device {} with state {}", device.id, state);
    return Ok( Some( device.number ) );
  }

  Ok( None )
}

pub fn take_first_hex(packet : DevicePacket) -> Result<String, DashboardError> {
  if packet.total_item <= 0 {
    return Err( DashboardError::Resolution(String::from("no packet received")) );
  }
  match packet.items.into_iter().next() {
    Some( item ) => Ok( item.hex_packet ),
    None => Err( DashboardError::Resolution(String::from("no packet received")) ),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use super::super::api::PacketItem;
  use std::cell::Cell;

  fn device(id : &str, number : i64) -> Device {
    Device { id : String::from(id), number }
  }

  #[tokio::test]
  async fn skips_disconnected_and_notbind_devices() {
    let devices = vec![device("dev-a", 17), device("dev-b", 23), device("dev-c", 42)];

    let picked = first_connected(&devices, |device| {
      let state = match device.id.as_str() {
        "dev-a" => "disconnected",
        "dev-b" => "notbind",
        _ => "working",
      };
      async move { Ok( String::from(state) ) }
    }).await.unwrap();

    assert_eq!(picked, Some( 42 ));
  }

  #[tokio::test]
  async fn stops_at_the_first_connected_device() {
    let devices = vec![device("dev-a", 17), device("dev-b", 23)];
    let queried = Cell::new(0);

    let picked = first_connected(&devices, |_| {
      queried.set(queried.get() + 1);
      async { Ok( String::from("working") ) }
    }).await.unwrap();

    assert_eq!(picked, Some( 17 ));
    assert_eq!(queried.get(), 1);
  }

  #[tokio::test]
  async fn yields_none_when_every_device_is_filtered_out() {
    let devices = vec![device("dev-a", 17), device("dev-b", 23)];

    let picked = first_connected(&devices, |_| async { Ok( String::from("disconnected") ) })
      .await
      .unwrap();

    assert_eq!(picked, None);
  }

  #[tokio::test]
  async fn propagates_state_fetch_failures() {
    let devices = vec![device("dev-a", 17)];

    let result = first_connected(&devices, |_| async {
      Err( DashboardError::Resolution(String::from("failed to fetch device state : boom")) )
    }).await;

    assert!(matches!(result, Err( DashboardError::Resolution( _ ) )));
  }

  #[test]
  fn empty_packet_is_an_error() {
    let packet = DevicePacket { total_item : 0, items : vec![] };
    assert!(matches!(take_first_hex(packet), Err( DashboardError::Resolution( _ ) )));

    let packet = DevicePacket { total_item : 1, items : vec![] };
    assert!(matches!(take_first_hex(packet), Err( DashboardError::Resolution( _ ) )));
  }

  #[test]
  fn first_item_wins() {
    let packet = DevicePacket {
      total_item : 2,
      items : vec![
        PacketItem { hex_packet : String::from("aa") },
        PacketItem { hex_packet : String::from("bb") },
      ],
    };
    assert_eq!(take_first_hex(packet).unwrap(), "aa");
  }
}
