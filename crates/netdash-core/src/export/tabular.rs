// CSV rendering: a three-line banner, then one titled table per section.

use std::io::Write;

use csv::Writer;

use super::{Header, iso_timestamp};
use crate::error::CoreError;
use crate::model::CommandOutput;

const OUTPUT_COLUMNS: [&str; 6] = ["ID", "Command", "Device", "Timestamp", "Status", "Output"];

fn finish(writer: Writer<Vec<u8>>) -> Result<Vec<u8>, CoreError> {
    writer.into_inner().map_err(|e| CoreError::Export {
        message: e.to_string(),
    })
}

fn output_row(o: &CommandOutput) -> [String; 6] {
    [
        o.id.to_string(),
        o.command.clone(),
        o.device.clone(),
        iso_timestamp(o.timestamp),
        o.status.to_string(),
        o.output.clone(),
    ]
}

/// Write a blank separator and a section title, then hand back the writer.
fn section(buf: Vec<u8>, title: &str) -> Result<Writer<Vec<u8>>, CoreError> {
    let mut buf = buf;
    writeln!(buf, "\n{title}").map_err(csv::Error::from)?;
    Ok(Writer::from_writer(buf))
}

pub(super) fn render(header: &Header<'_>) -> Result<Vec<u8>, CoreError> {
    let mut buf = Vec::new();
    writeln!(buf, "Network Management Export").map_err(csv::Error::from)?;
    writeln!(buf, "Export Type: {}", header.export_type).map_err(csv::Error::from)?;
    writeln!(buf, "Generated: {}", header.generated).map_err(csv::Error::from)?;
    writeln!(buf, "Date Range: {}", header.date_range).map_err(csv::Error::from)?;

    let s = &header.sections;

    if let Some(devices) = &s.devices {
        let mut w = section(buf, "Devices")?;
        w.write_record(["Device Name", "IP Address", "Type", "Location", "Status"])?;
        for d in devices {
            w.write_record([
                d.name.as_str(),
                &d.ip.to_string(),
                &d.device_type.to_string(),
                d.location.as_deref().unwrap_or_default(),
                &d.status.to_string(),
            ])?;
        }
        buf = finish(w)?;
    }

    if let Some(vlans) = &s.vlans {
        let mut w = section(buf, "VLANs")?;
        w.write_record(["VLAN ID", "Network", "Description"])?;
        for v in vlans {
            w.write_record([v.id.to_string().as_str(), &v.network, &v.description])?;
        }
        buf = finish(w)?;
    }

    if let Some(commands) = &s.commands {
        let mut w = section(buf, "Command History")?;
        w.write_record(["#", "Command"])?;
        for (i, cmd) in commands.iter().enumerate() {
            w.write_record([(i + 1).to_string().as_str(), *cmd])?;
        }
        buf = finish(w)?;
    }

    if let Some(outputs) = &s.outputs {
        let mut w = section(buf, "Command Outputs")?;
        w.write_record(OUTPUT_COLUMNS)?;
        for o in outputs {
            w.write_record(output_row(o))?;
        }
        buf = finish(w)?;
    }

    if let Some(alerts) = &s.alerts {
        let mut w = section(buf, "AI Alerts")?;
        w.write_record(["ID", "Device", "Severity", "Issue", "Suggestion", "Timestamp", "Status"])?;
        for a in alerts {
            w.write_record([
                a.id.to_string(),
                a.device.clone(),
                a.severity.to_string(),
                a.issue.clone(),
                a.suggestion.clone(),
                iso_timestamp(a.timestamp),
                a.status.to_string(),
            ])?;
        }
        buf = finish(w)?;
    }

    Ok(buf)
}

pub(super) fn render_output(output: &CommandOutput) -> Result<Vec<u8>, CoreError> {
    let mut w = Writer::from_writer(Vec::new());
    w.write_record(OUTPUT_COLUMNS)?;
    w.write_record(output_row(output))?;
    finish(w)
}
