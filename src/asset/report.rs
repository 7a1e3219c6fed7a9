use crate::asset::normalize::AssetRow;
use crate::utils::errors::Result;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write the CSV report. The header row and column order come from
/// `AssetRow`'s field declaration.
pub fn write_csv_report(rows: &[AssetRow], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    write_rows(rows, &mut writer)?;
    writer.flush()?;

    tracing::info!("Wrote {} asset row(s) to {}", rows.len(), path.display());
    Ok(())
}

fn write_rows<W: Write>(rows: &[AssetRow], writer: &mut csv::Writer<W>) -> Result<()> {
    for row in rows {
        writer.serialize(row)?;
    }
    Ok(())
}

/// Derive the details filename from the asset id's trailing `:` segment
/// (the whole id when there is none)
pub fn details_file_name(asset_id: &str) -> String {
    let trailing = asset_id.rsplit(':').next().unwrap_or(asset_id);
    format!("asset_details_{trailing}.txt")
}

/// Serialize with the report's 4-space indentation
pub fn to_pretty_json(value: &Value) -> Result<String> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}

/// Write the raw lookup response into `dir`, named from the asset id
pub fn write_details_file(details: &Value, asset_id: &str, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(details_file_name(asset_id));
    fs::write(&path, to_pretty_json(details)?)?;

    tracing::info!("Wrote asset details to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_row() -> AssetRow {
        AssetRow {
            asset_id: "a1".to_string(),
            instance_id: "i-1".to_string(),
            instance_name: "web1".to_string(),
            instance_type: "t3.micro".to_string(),
            state: "running".to_string(),
            private_ip: "10.0.0.5".to_string(),
            public_ip: "203.0.113.9".to_string(),
            vpc_id: "vpc-0abc".to_string(),
            subnet_id: "subnet-0def".to_string(),
            region: "eu-west-3".to_string(),
            account_id: "123456789012".to_string(),
        }
    }

    #[test]
    fn test_csv_header_and_column_order() {
        let mut buf = Vec::new();
        {
            let mut writer = csv::Writer::from_writer(&mut buf);
            write_rows(&[sample_row()], &mut writer).unwrap();
            writer.flush().unwrap();
        }

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "AssetID,InstanceID,InstanceName,InstanceType,State,PrivateIP,PublicIP,VPC_ID,SubnetID,Region,AccountID"
        );
        assert_eq!(
            lines.next().unwrap(),
            "a1,i-1,web1,t3.micro,running,10.0.0.5,203.0.113.9,vpc-0abc,subnet-0def,eu-west-3,123456789012"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_csv_report_written_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("asset_report.csv");

        write_csv_report(&[sample_row(), sample_row()], &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("AssetID,"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_details_file_name_uses_trailing_segment() {
        assert_eq!(
            details_file_name("rrn::instance:eu-west-3:acct:x:i-0a1b2c"),
            "asset_details_i-0a1b2c.txt"
        );
        assert_eq!(details_file_name("plain-id"), "asset_details_plain-id.txt");
    }

    #[test]
    fn test_pretty_json_uses_four_space_indent() {
        let value = json!({"a": {"b": 1}});
        assert_eq!(
            to_pretty_json(&value).unwrap(),
            "{\n    \"a\": {\n        \"b\": 1\n    }\n}"
        );
    }

    #[test]
    fn test_details_file_written_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let details = json!({"assetId": "a1", "type": "asset"});

        let path = write_details_file(&details, "rrn::instance:x:i-1", dir.path()).unwrap();

        assert_eq!(path.file_name().unwrap(), "asset_details_i-1.txt");
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("    \"assetId\": \"a1\""));
    }
}
