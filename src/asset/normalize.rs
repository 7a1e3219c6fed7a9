use serde::Serialize;
use serde_json::Value;

/// Sentinel written for every field missing from the source record
pub const MISSING: &str = "N/A";

/// The two shapes the search API is known to return under its top-level
/// `data` field
#[derive(Debug, Clone, PartialEq)]
pub enum SearchData {
    /// `data` is a mapping carrying the asset list under `items`
    Envelope(Vec<Value>),
    /// `data` is the asset list itself
    Bare(Vec<Value>),
}

impl SearchData {
    /// Resolve the response shape. The envelope form wins when `data` is a
    /// mapping; a bare list is accepted as fallback. Any other shape
    /// (including a missing `data` field) is `None`.
    pub fn from_response(response: &Value) -> Option<Self> {
        match response.get("data") {
            Some(Value::Object(map)) => {
                let items = map
                    .get("items")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default();
                Some(SearchData::Envelope(items))
            }
            Some(Value::Array(items)) => Some(SearchData::Bare(items.clone())),
            _ => None,
        }
    }

    pub fn into_items(self) -> Vec<Value> {
        match self {
            SearchData::Envelope(items) | SearchData::Bare(items) => items,
        }
    }
}

/// Coerce one raw search item into a JSON object.
///
/// Items arrive either pre-parsed or as a JSON-encoded string; anything
/// that does not resolve to an object is skipped with a warning.
pub fn coerce_record(item: Value) -> Option<Value> {
    match item {
        Value::Object(_) => Some(item),
        Value::String(text) => match serde_json::from_str::<Value>(&text) {
            Ok(parsed @ Value::Object(_)) => Some(parsed),
            Ok(_) => {
                tracing::warn!(
                    "Search item decoded to a non-object value, skipping: {}",
                    snippet(&text)
                );
                None
            }
            Err(e) => {
                tracing::warn!(
                    "Search item is not valid JSON, skipping ({e}): {}",
                    snippet(&text)
                );
                None
            }
        },
        other => {
            tracing::warn!(
                "Unexpected search item type, skipping: {}",
                json_type_name(&other)
            );
            None
        }
    }
}

/// First 100 characters of a skipped item, for the warning
fn snippet(text: &str) -> &str {
    text.char_indices()
        .nth(100)
        .map(|(i, _)| &text[..i])
        .unwrap_or(text)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One flattened report row. Field order fixes the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetRow {
    #[serde(rename = "AssetID")]
    pub asset_id: String,
    #[serde(rename = "InstanceID")]
    pub instance_id: String,
    #[serde(rename = "InstanceName")]
    pub instance_name: String,
    #[serde(rename = "InstanceType")]
    pub instance_type: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "PrivateIP")]
    pub private_ip: String,
    #[serde(rename = "PublicIP")]
    pub public_ip: String,
    #[serde(rename = "VPC_ID")]
    pub vpc_id: String,
    #[serde(rename = "SubnetID")]
    pub subnet_id: String,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "AccountID")]
    pub account_id: String,
}

impl AssetRow {
    /// Flatten one coerced record. Missing paths never fail; they produce
    /// the `N/A` sentinel.
    pub fn from_record(record: &Value) -> Self {
        // Resource-specific fields live in a nested `data` mapping
        let details = record.get("data");

        Self {
            asset_id: asset_identifier(record),
            instance_id: string_field(details, "instanceId"),
            instance_name: name_tag(details),
            instance_type: string_field(details, "instanceType"),
            state: instance_state(details),
            private_ip: string_field(details, "privateIpAddress"),
            public_ip: string_field(details, "publicIpAddress"),
            vpc_id: string_field(details, "vpcId"),
            subnet_id: string_field(details, "subnetId"),
            region: string_field(Some(record), "region"),
            account_id: string_field(Some(record), "accountId"),
        }
    }
}

/// Prefer the unified asset id, fall back to the RRN
fn asset_identifier(record: &Value) -> String {
    let unified = record
        .get("unifiedAssetId")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty());

    match unified {
        Some(id) => id.to_string(),
        None => string_field(Some(record), "rrn"),
    }
}

fn string_field(value: Option<&Value>, key: &str) -> String {
    value
        .and_then(|v| v.get(key))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| MISSING.to_string())
}

/// The instance state is nested one level down as `state.name`
fn instance_state(details: Option<&Value>) -> String {
    details
        .and_then(|d| d.get("state"))
        .and_then(|s| s.get("name"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| MISSING.to_string())
}

/// Scan the tag list for the entry whose key is `Name`
fn name_tag(details: Option<&Value>) -> String {
    let tags = details.and_then(|d| d.get("tags")).and_then(Value::as_array);

    if let Some(tags) = tags {
        for tag in tags {
            if tag.get("key").and_then(Value::as_str) == Some("Name") {
                return tag
                    .get("value")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| MISSING.to_string());
            }
        }
    }

    MISSING.to_string()
}

/// Normalize a full search response into report rows.
///
/// `None` means the response carried no recognizable `data` shape. Items
/// that fail to coerce are dropped individually, so the row count can be
/// lower than the item count but the call itself never fails.
pub fn normalize_search_results(response: &Value) -> Option<Vec<AssetRow>> {
    let items = SearchData::from_response(response)?.into_items();

    let rows = items
        .into_iter()
        .filter_map(coerce_record)
        .map(|record| AssetRow::from_record(&record))
        .collect();

    Some(rows)
}
