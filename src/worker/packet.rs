use crate::error::DashboardError;

/// Turns a hex payload like "5b32332e352c2e2e5d" into the text it encodes.
/// Whitespace and "0x" prefixes are tolerated anywhere in the input, an odd
/// number of digits gets one leading zero. Anything that is not valid hex or
/// not valid UTF-8 is an error, never silently patched up.
pub fn hex_to_string(input : &str) -> Result<String, DashboardError> {
  let mut cleaned = String::with_capacity(input.len());
  let mut chars = input.chars().peekable();
  while let Some( c ) = chars.next() {
    if c.is_whitespace() {
      continue;
    }
    if c == '0' && chars.peek() == Some( &'x' ) {
      chars.next();
      continue;
    }
    cleaned.push(c);
  }

  if !cleaned.chars().all(|c| c.is_ascii_hexdigit()) {
    return Err( DashboardError::Decode(String::from("invalid hex input")) );
  }

  let padded = if cleaned.len() % 2 != 0 {
    format!("0{}", cleaned)
  } else {
    cleaned
  };

  let bytes = hex::decode(&padded)
    .map_err(|e| DashboardError::Decode(format!("invalid hex input : {}", e)))?;

  String::from_utf8(bytes)
    .map_err(|e| DashboardError::Decode(format!("packet is not valid utf-8 : {}", e)))
}

/// Parses the decoded packet text as a flat json array of numbers.
/// The length is not checked here, the GUI simply leaves missing positions
/// blank.
pub fn parse_number_array(text : &str) -> Result<Vec<f64>, DashboardError> {
  let cleaned : String = text.chars().filter(|c| !c.is_whitespace()).collect();

  let value : serde_json::Value = serde_json::from_str(&cleaned)
    .map_err(|e| DashboardError::Parse(format!("not valid json : {}", e)))?;

  let items = match value.as_array() {
    Some( items ) => items,
    None => return Err( DashboardError::Parse(String::from("not an array")) ),
  };

  items.iter()
    .map(|item| {
      item.as_f64()
        .filter(|number| number.is_finite())
        .ok_or_else(|| DashboardError::Parse(String::from("non-numeric element")))
    })
    .collect()
}
