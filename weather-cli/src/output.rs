use weather_core::QueryState;

/// Human-readable view of the current report, or `None` before the first
/// successful lookup.
pub fn render_report(state: &QueryState) -> Option<String> {
    let report = state.current_report.as_ref()?;

    let fields = report.display_fields();
    let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    let mut out = format!("[background: {}]\n", state.background);
    for (label, value) in fields {
        out.push_str(&format!("{label:<width$}  {value}\n"));
    }
    Some(out)
}

pub fn render_suggestions(state: &QueryState) -> String {
    state
        .suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{:>2}. {s}\n", i + 1))
        .collect()
}
