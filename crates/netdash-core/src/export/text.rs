// Plain-text rendering with fixed-width columns.

use std::fmt::Write;

use super::{Header, iso_timestamp};

const RULE: &str = "========================================";

fn heading(out: &mut String, title: &str, count: usize) {
    let _ = writeln!(out, "\n{title} ({count})");
    let _ = writeln!(out, "{}", "-".repeat(title.len()));
}

pub(super) fn render(header: &Header<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Network Management Export");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Export Type: {}", header.export_type);
    let _ = writeln!(out, "Generated:   {}", header.generated);
    let _ = writeln!(out, "Date Range:  {}", header.date_range);

    let s = &header.sections;

    if let Some(devices) = &s.devices {
        heading(&mut out, "Devices", devices.len());
        for d in devices {
            let _ = writeln!(
                out,
                "{:<24} {:<15} {:<18} {:<8} {}",
                d.name,
                d.ip.to_string(),
                d.device_type.to_string(),
                d.status.to_string(),
                d.location.as_deref().unwrap_or("-"),
            );
        }
    }

    if let Some(vlans) = &s.vlans {
        heading(&mut out, "VLANs", vlans.len());
        for v in vlans {
            let _ = writeln!(out, "{:<6} {:<16} {}", v.id, v.network, v.description);
        }
    }

    if let Some(commands) = &s.commands {
        heading(&mut out, "Command History", commands.len());
        for (i, cmd) in commands.iter().enumerate() {
            let _ = writeln!(out, "{:>3}. {cmd}", i + 1);
        }
    }

    if let Some(outputs) = &s.outputs {
        heading(&mut out, "Command Outputs", outputs.len());
        for o in outputs {
            let _ = writeln!(
                out,
                "[{}] {} @ {} ({})",
                o.status,
                o.command,
                o.device,
                iso_timestamp(o.timestamp)
            );
            for line in o.output.lines() {
                let _ = writeln!(out, "    {line}");
            }
        }
    }

    if let Some(alerts) = &s.alerts {
        heading(&mut out, "AI Alerts", alerts.len());
        for a in alerts {
            let _ = writeln!(
                out,
                "[{}/{}] {}: {}",
                a.severity,
                a.status,
                a.device,
                a.issue
            );
            let _ = writeln!(out, "    Suggestion: {}", a.suggestion);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::super::{DateRange, ExportFormat, ExportType, Sections};
    use super::*;

    #[test]
    fn lists_only_present_sections() {
        let header = Header {
            export_type: ExportType::Commands,
            format: ExportFormat::Txt,
            generated: "2024-01-15T12:30:00.000Z".into(),
            date_range: DateRange::All,
            sections: Sections {
                commands: Some(vec!["show version", "show vlan"]),
                ..Sections::default()
            },
        };
        let text = render(&header);
        assert!(text.starts_with("Network Management Export\n"));
        assert!(text.contains("Export Type: commands"));
        assert!(text.contains("Command History (2)"));
        assert!(text.contains("  1. show version\n  2. show vlan\n"));
        assert!(!text.contains("Devices"));
    }
}
