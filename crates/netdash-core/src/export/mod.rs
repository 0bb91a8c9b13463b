// ── Export serializer ──
//
// Pure transform from a state snapshot to a downloadable document.
// The generation time is part of the request, so identical inputs
// always produce identical bytes.

mod json;
mod tabular;
mod text;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::CoreError;
use crate::model::{AiAlert, CommandOutput, NetworkDevice, OutputStatus, VlanConfig};

// ── Request types ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExportType {
    Logs,
    Commands,
    Devices,
    All,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Txt,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Txt => "txt",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Json => "application/json",
            Self::Txt => "text/plain",
        }
    }
}

/// Window over output and alert timestamps, relative to generation time.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DateRange {
    /// Same UTC calendar day.
    #[default]
    Today,
    Week,
    Month,
    All,
}

impl DateRange {
    pub fn contains(self, timestamp: DateTime<Utc>, generated_at: DateTime<Utc>) -> bool {
        match self {
            Self::Today => timestamp.date_naive() == generated_at.date_naive(),
            Self::Week => timestamp >= generated_at - Duration::days(7),
            Self::Month => timestamp >= generated_at - Duration::days(30),
            Self::All => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    /// Must be chosen before serializing.
    pub export_type: Option<ExportType>,
    pub format: ExportFormat,
    pub date_range: DateRange,
    pub include_device_info: bool,
    pub include_commands: bool,
    pub include_outputs: bool,
    /// Keep outputs whose status is `error`.
    pub include_errors: bool,
    pub custom_file_name: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl ExportRequest {
    /// Request with the dashboard defaults and no export type.
    pub fn new(generated_at: DateTime<Utc>) -> Self {
        Self {
            export_type: None,
            format: ExportFormat::default(),
            date_range: DateRange::default(),
            include_device_info: true,
            include_commands: true,
            include_outputs: true,
            include_errors: false,
            custom_file_name: None,
            generated_at,
        }
    }

    pub fn with_type(mut self, export_type: ExportType) -> Self {
        self.export_type = Some(export_type);
        self
    }

    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }
}

/// Borrowed view of the state being exported.
#[derive(Debug, Clone, Copy)]
pub struct ExportContext<'a> {
    pub devices: &'a [NetworkDevice],
    pub vlans: &'a [VlanConfig],
    pub history: &'a [String],
    pub outputs: &'a [CommandOutput],
    pub alerts: &'a [AiAlert],
    pub file_prefix: &'a str,
}

/// A finished file ready for the download collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub mime_type: &'static str,
}

// ── Section selection ────────────────────────────────────────────

/// Sections that survived type, flag and date filtering. `None` means
/// the section is not part of this export at all.
#[derive(Debug, Default)]
struct Sections<'a> {
    devices: Option<Vec<&'a NetworkDevice>>,
    vlans: Option<Vec<&'a VlanConfig>>,
    commands: Option<Vec<&'a str>>,
    outputs: Option<Vec<&'a CommandOutput>>,
    alerts: Option<Vec<&'a AiAlert>>,
}

/// Metadata shared by every format.
struct Header<'a> {
    export_type: ExportType,
    format: ExportFormat,
    generated: String,
    date_range: DateRange,
    sections: Sections<'a>,
}

fn select_sections<'a>(
    ctx: &ExportContext<'a>,
    req: &ExportRequest,
    export_type: ExportType,
) -> Sections<'a> {
    let (devices, commands, logs) = match export_type {
        ExportType::Devices => (true, false, false),
        ExportType::Commands => (false, true, false),
        ExportType::Logs => (false, false, true),
        ExportType::All => (true, true, true),
    };
    let in_range = |ts: DateTime<Utc>| req.date_range.contains(ts, req.generated_at);

    let mut sections = Sections::default();
    if devices && req.include_device_info {
        sections.devices = Some(ctx.devices.iter().collect());
        sections.vlans = Some(ctx.vlans.iter().collect());
    }
    if commands && req.include_commands {
        sections.commands = Some(ctx.history.iter().map(String::as_str).collect());
    }
    if (commands || logs) && req.include_outputs {
        sections.outputs = Some(
            ctx.outputs
                .iter()
                .filter(|o| req.include_errors || o.status != OutputStatus::Error)
                .filter(|o| in_range(o.timestamp))
                .collect(),
        );
    }
    if logs {
        sections.alerts = Some(ctx.alerts.iter().filter(|a| in_range(a.timestamp)).collect());
    }
    sections
}

fn iso_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn file_date(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

/// Filename segment with path separators replaced by `_`.
fn file_segment(raw: &str) -> String {
    raw.replace(['/', '\\'], "_")
}

// ── Public entry points ──────────────────────────────────────────

/// Serialize the requested slice of state.
pub fn serialize(
    ctx: &ExportContext<'_>,
    req: &ExportRequest,
) -> Result<ExportDocument, CoreError> {
    let export_type = req
        .export_type
        .ok_or_else(|| CoreError::validation("select an export type"))?;

    let header = Header {
        export_type,
        format: req.format,
        generated: iso_timestamp(req.generated_at),
        date_range: req.date_range,
        sections: select_sections(ctx, req, export_type),
    };

    let bytes = match req.format {
        ExportFormat::Csv => tabular::render(&header)?,
        ExportFormat::Json => json::render(&header)?,
        ExportFormat::Txt => text::render(&header).into_bytes(),
    };

    let filename = match req.custom_file_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_owned(),
        _ => format!(
            "{}_{export_type}_{}.{}",
            ctx.file_prefix,
            file_date(req.generated_at),
            req.format.extension()
        ),
    };

    Ok(ExportDocument {
        bytes,
        filename,
        mime_type: req.format.mime_type(),
    })
}

/// Single-output document. `txt` carries the raw output text.
pub fn serialize_output(
    output: &CommandOutput,
    format: ExportFormat,
    generated_at: DateTime<Utc>,
) -> Result<ExportDocument, CoreError> {
    let bytes = match format {
        ExportFormat::Txt => output.output.clone().into_bytes(),
        ExportFormat::Csv => tabular::render_output(output)?,
        ExportFormat::Json => serde_json::to_vec_pretty(output)?,
    };

    let command = output.command.split_whitespace().collect::<Vec<_>>().join("_");
    let filename = format!(
        "{}_{}_{}.{}",
        file_segment(&command),
        file_segment(output.device_name()),
        file_date(generated_at),
        format.extension()
    );

    Ok(ExportDocument {
        bytes,
        filename,
        mime_type: format.mime_type(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::Catalog;
    use crate::model::{AlertSeverity, AlertStatus, EntityId};

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, h, 30, 0).unwrap()
    }

    fn output(id: &str, status: OutputStatus, ts: DateTime<Utc>) -> CommandOutput {
        CommandOutput {
            id: EntityId::from(id),
            command: "show version".into(),
            output: "Cisco IOS Software".into(),
            timestamp: ts,
            device: "Core Switch (10.19.10.2)".into(),
            status,
        }
    }

    struct Fixture {
        catalog: Catalog,
        history: Vec<String>,
        outputs: Vec<CommandOutput>,
        alerts: Vec<AiAlert>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                catalog: Catalog::builtin(),
                history: vec!["show version".into(), "show vlan".into()],
                outputs: vec![
                    output("1", OutputStatus::Success, at(10)),
                    output("2", OutputStatus::Error, at(9)),
                    output("3", OutputStatus::Success, at(10) - Duration::days(3)),
                ],
                alerts: vec![AiAlert {
                    id: EntityId::from("a1"),
                    device: "AP-04 (10.19.10.54)".into(),
                    severity: AlertSeverity::Medium,
                    issue: "High packet loss detected (15%)".into(),
                    suggestion: "Check wireless interference.".into(),
                    timestamp: at(8),
                    status: AlertStatus::Active,
                }],
            }
        }

        fn ctx(&self) -> ExportContext<'_> {
            ExportContext {
                devices: self.catalog.all_devices(),
                vlans: self.catalog.list_vlans(),
                history: &self.history,
                outputs: &self.outputs,
                alerts: &self.alerts,
                file_prefix: "network_export",
            }
        }
    }

    fn request(export_type: ExportType) -> ExportRequest {
        ExportRequest::new(at(12)).with_type(export_type)
    }

    #[test]
    fn missing_type_is_validation_error() {
        let fx = Fixture::new();
        let err = serialize(&fx.ctx(), &ExportRequest::new(at(12))).unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));
    }

    #[test]
    fn default_filename_embeds_type_and_date() {
        let fx = Fixture::new();
        let doc = serialize(&fx.ctx(), &request(ExportType::Logs)).unwrap();
        assert_eq!(doc.filename, "network_export_logs_2024-01-15.csv");
        assert_eq!(doc.mime_type, "text/csv");

        let mut req = request(ExportType::Logs).with_format(ExportFormat::Json);
        req.custom_file_name = Some("  ".into());
        let doc = serialize(&fx.ctx(), &req).unwrap();
        assert_eq!(doc.filename, "network_export_logs_2024-01-15.json");

        req.custom_file_name = Some("weekly.json".into());
        assert_eq!(serialize(&fx.ctx(), &req).unwrap().filename, "weekly.json");
    }

    #[test]
    fn serialization_is_deterministic() {
        let fx = Fixture::new();
        for format in [ExportFormat::Csv, ExportFormat::Json, ExportFormat::Txt] {
            let req = request(ExportType::All).with_format(format);
            assert_eq!(
                serialize(&fx.ctx(), &req).unwrap(),
                serialize(&fx.ctx(), &req).unwrap()
            );
        }
    }

    #[test]
    fn type_picks_sections() {
        let fx = Fixture::new();
        let ctx = fx.ctx();

        let s = select_sections(&ctx, &request(ExportType::Devices), ExportType::Devices);
        assert!(s.devices.is_some() && s.vlans.is_some());
        assert!(s.commands.is_none() && s.outputs.is_none() && s.alerts.is_none());

        let s = select_sections(&ctx, &request(ExportType::Commands), ExportType::Commands);
        assert!(s.devices.is_none() && s.alerts.is_none());
        assert_eq!(s.commands.unwrap(), ["show version", "show vlan"]);
        assert!(s.outputs.is_some());

        let s = select_sections(&ctx, &request(ExportType::Logs), ExportType::Logs);
        assert!(s.devices.is_none() && s.commands.is_none());
        assert!(s.outputs.is_some() && s.alerts.is_some());
    }

    #[test]
    fn flags_and_range_filter_rows() {
        let fx = Fixture::new();
        let ctx = fx.ctx();

        // Defaults: today only, errors excluded.
        let s = select_sections(&ctx, &request(ExportType::All), ExportType::All);
        let ids: Vec<_> = s.outputs.unwrap().iter().map(|o| o.id.to_string()).collect();
        assert_eq!(ids, ["1"]);
        assert_eq!(s.alerts.unwrap().len(), 1);

        let mut req = request(ExportType::All);
        req.include_errors = true;
        req.date_range = DateRange::Week;
        let s = select_sections(&ctx, &req, ExportType::All);
        assert_eq!(s.outputs.unwrap().len(), 3);

        req.include_device_info = false;
        req.include_commands = false;
        req.include_outputs = false;
        let s = select_sections(&ctx, &req, ExportType::All);
        assert!(s.devices.is_none() && s.vlans.is_none());
        assert!(s.commands.is_none() && s.outputs.is_none());
        assert!(s.alerts.is_some());
    }

    #[test]
    fn date_ranges() {
        let now = at(12);
        assert!(DateRange::Today.contains(at(0), now));
        assert!(!DateRange::Today.contains(at(23) - Duration::days(1), now));
        assert!(DateRange::Week.contains(now - Duration::days(7), now));
        assert!(!DateRange::Week.contains(now - Duration::days(8), now));
        assert!(DateRange::Month.contains(now - Duration::days(29), now));
        assert!(DateRange::All.contains(now - Duration::days(400), now));
    }

    #[test]
    fn single_output_txt_is_raw_text() {
        let mut out = output("1", OutputStatus::Success, at(10));
        out.command = "show  interfaces status".into();
        let doc = serialize_output(&out, ExportFormat::Txt, at(12)).unwrap();
        assert_eq!(doc.filename, "show_interfaces_status_Core Switch_2024-01-15.txt");
        assert_eq!(doc.bytes, b"Cisco IOS Software");
        assert_eq!(doc.mime_type, "text/plain");
    }

    #[test]
    fn single_output_name_has_no_path_separators() {
        let mut out = output("1", OutputStatus::Success, at(10));
        out.command = "show interfaces gi1/0/1".into();
        out.device = r"Lab\Edge (10.0.0.1)".into();
        let doc = serialize_output(&out, ExportFormat::Txt, at(12)).unwrap();
        assert_eq!(doc.filename, "show_interfaces_gi1_0_1_Lab_Edge_2024-01-15.txt");
        assert_eq!(
            std::path::Path::new(&doc.filename).file_name().unwrap(),
            doc.filename.as_str()
        );
    }

    #[test]
    fn single_output_json_carries_all_fields() {
        let out = output("1", OutputStatus::Error, at(10));
        let doc = serialize_output(&out, ExportFormat::Json, at(12)).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&doc.bytes).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["device"], "Core Switch (10.19.10.2)");
        assert!(doc.filename.ends_with(".json"));
    }
}
