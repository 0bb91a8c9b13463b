// JSON rendering. Every section key is always present; excluded
// sections serialize as empty arrays.

use serde::Serialize;

use super::{DateRange, ExportFormat, ExportType, Header};
use crate::error::CoreError;
use crate::model::{AiAlert, CommandOutput, NetworkDevice, VlanConfig};

#[derive(Serialize)]
struct ExportInfo<'a> {
    #[serde(rename = "type")]
    export_type: ExportType,
    format: ExportFormat,
    generated: &'a str,
    date_range: DateRange,
}

#[derive(Serialize)]
struct Document<'a> {
    export_info: ExportInfo<'a>,
    devices: &'a [&'a NetworkDevice],
    vlans: &'a [&'a VlanConfig],
    commands: &'a [&'a str],
    outputs: &'a [&'a CommandOutput],
    alerts: &'a [&'a AiAlert],
}

pub(super) fn render(header: &Header<'_>) -> Result<Vec<u8>, CoreError> {
    let s = &header.sections;
    let doc = Document {
        export_info: ExportInfo {
            export_type: header.export_type,
            format: header.format,
            generated: &header.generated,
            date_range: header.date_range,
        },
        devices: s.devices.as_deref().unwrap_or_default(),
        vlans: s.vlans.as_deref().unwrap_or_default(),
        commands: s.commands.as_deref().unwrap_or_default(),
        outputs: s.outputs.as_deref().unwrap_or_default(),
        alerts: s.alerts.as_deref().unwrap_or_default(),
    };
    Ok(serde_json::to_vec_pretty(&doc)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::{Value, json};

    use super::super::Sections;
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn document_shape() {
        let catalog = Catalog::builtin();
        let fw = catalog.find_device("fw-01").unwrap();
        let header = Header {
            export_type: ExportType::Devices,
            format: ExportFormat::Json,
            generated: "2024-01-15T12:30:00.000Z".into(),
            date_range: DateRange::Week,
            sections: Sections {
                devices: Some(vec![fw]),
                ..Sections::default()
            },
        };

        let value: Value = serde_json::from_slice(&render(&header).unwrap()).unwrap();
        assert_eq!(
            value["export_info"],
            json!({
                "type": "devices",
                "format": "json",
                "generated": "2024-01-15T12:30:00.000Z",
                "date_range": "week"
            })
        );
        assert_eq!(
            value["devices"][0],
            json!({
                "id": "fw-01",
                "name": "Firewall",
                "ip": "10.19.10.1",
                "type": "core",
                "status": "online"
            })
        );
        for key in ["vlans", "commands", "outputs", "alerts"] {
            assert_eq!(value[key], json!([]), "{key}");
        }
    }
}
