use chrono::{DateTime, SecondsFormat};
use std::fmt::Write;

use super::proto::{Label, WriteRequest};

const METRIC_NAME_LABEL: &str = "__name__";

/// Human-readable dump of a decoded request, one block per series.
///
/// ```text
/// up{instance="a:9100", job="node"}
/// 	Sample:  value=1 timestamp=1000 (1970-01-01T00:00:01.000Z)
/// 	Exemplar:  {trace_id="abc"} value=0.5 timestamp=1000 (1970-01-01T00:00:01.000Z)
/// ```
pub fn render(request: &WriteRequest) -> String {
    let mut out = String::new();

    for ts in &request.timeseries {
        let _ = writeln!(out, "{}", metric_identity(&ts.labels));
        for s in &ts.samples {
            let _ = writeln!(
                out,
                "\tSample:  value={} timestamp={} ({})",
                s.value,
                s.timestamp,
                format_millis(s.timestamp)
            );
        }
        for e in &ts.exemplars {
            let _ = writeln!(
                out,
                "\tExemplar:  {} value={} timestamp={} ({})",
                label_set(&e.labels),
                e.value,
                e.timestamp,
                format_millis(e.timestamp)
            );
        }
    }

    for m in &request.metadata {
        let _ = writeln!(
            out,
            "Metadata:  {} type={} unit={} help={:?}",
            m.metric_family_name,
            m.metric_type().as_str(),
            m.unit,
            m.help
        );
    }

    out
}

/// `name{k="v", ...}` with `__name__` pulled out front and the rest sorted.
fn metric_identity(labels: &[Label]) -> String {
    let name = labels
        .iter()
        .find(|l| l.name == METRIC_NAME_LABEL)
        .map(|l| l.value.as_str())
        .unwrap_or_default();
    let rest: Vec<&Label> = labels
        .iter()
        .filter(|l| l.name != METRIC_NAME_LABEL)
        .collect();

    if !name.is_empty() && rest.is_empty() {
        return name.to_owned();
    }
    format!("{name}{}", join_sorted(rest))
}

fn label_set(labels: &[Label]) -> String {
    join_sorted(labels.iter().collect())
}

fn join_sorted(mut labels: Vec<&Label>) -> String {
    labels.sort_by(|a, b| a.name.cmp(&b.name));
    let body = labels
        .iter()
        .map(|l| format!("{}=\"{}\"", l.name, escape(&l.value)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{body}}}")
}

fn escape(v: &str) -> String {
    v.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

fn format_millis(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| "out of range".into())
}
