//! Minimal CSV writer for the visitor export
//!
//! Records end in `\r\n`. A field is quoted only when it contains a
//! delimiter, a quote or a line break; embedded quotes are doubled.

use crate::models::{format_timestamp, Visitor};

/// Export columns of a visitor row, in output order
pub fn export_fields(v: &Visitor) -> Vec<(&'static str, String)> {
    let opt = |value: &Option<String>| value.clone().unwrap_or_default();

    vec![
        ("id", v.id.to_string()),
        ("session_id", v.session_id.clone()),
        ("ip_address", v.ip_address.clone()),
        ("user_agent", opt(&v.user_agent)),
        ("timestamp", format_timestamp(v.timestamp)),
        ("page", v.page.clone()),
        ("action", v.action.clone()),
        ("referrer", opt(&v.referrer)),
        ("host", opt(&v.host)),
        ("method", opt(&v.method)),
        ("platform", opt(&v.platform)),
        ("browser", opt(&v.browser)),
    ]
}

/// Render visitors as CSV. The header comes from the first row's fields, so
/// an empty input yields a single empty header line.
pub fn visitors_to_csv(visitors: &[Visitor]) -> String {
    let rows: Vec<Vec<(&'static str, String)>> = visitors.iter().map(export_fields).collect();

    let header: Vec<&str> = rows
        .first()
        .map(|fields| fields.iter().map(|(name, _)| *name).collect())
        .unwrap_or_default();

    let mut out = String::new();
    write_record(&mut out, header);
    for fields in &rows {
        write_record(&mut out, fields.iter().map(|(_, value)| value.as_str()));
    }
    out
}

fn write_record<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push_str("\r\n");
}

fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\r', '\n']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}
