use std::collections::BTreeMap;

use chrono::Local;

use crate::error::{AppError, AppResult, SinkError};

use super::format::{
    border, csv_field, html_escape, markdown_cell, table_line, truncate, write_line,
};
use super::{PathReport, RunReport};

const HEADERS: [&str; 6] = ["#", "Path", "URL", "Method", "Avg. ms", "Response"];
const CONSOLE_RESPONSE_LIMIT: usize = 100;

fn cells(index: usize, entry: &PathReport) -> [Vec<String>; 6] {
    [
        vec![index.saturating_add(1).to_string()],
        vec![entry.path.clone()],
        entry.urls.clone(),
        vec![entry.method.to_string()],
        vec![entry.avg_ms.to_string()],
        entry.responses.clone(),
    ]
}

/// Boxed text table. Each URL/response sits on its own line within the row.
///
/// # Errors
///
/// Returns an error when formatting into the buffer fails.
pub fn render_console(report: &RunReport) -> AppResult<String> {
    let rows: Vec<[Vec<String>; 6]> = report
        .entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let mut row = cells(index, entry);
            if let Some(responses) = row.last_mut() {
                for response in responses.iter_mut() {
                    *response = truncate(response, CONSOLE_RESPONSE_LIMIT);
                }
            }
            row
        })
        .collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            for line in cell {
                *width = (*width).max(line.chars().count());
            }
        }
    }

    let separator = border(&widths);
    let mut output = String::new();
    write_line(&mut output, &separator)?;
    write_line(&mut output, &table_line(&widths, HEADERS.into_iter()))?;
    write_line(&mut output, &separator)?;
    for row in &rows {
        let height = row.iter().map(Vec::len).max().unwrap_or_default().max(1);
        for line in 0..height {
            let line_cells = row
                .iter()
                .map(|cell| cell.get(line).map_or("", String::as_str));
            write_line(&mut output, &table_line(&widths, line_cells))?;
        }
        write_line(&mut output, &separator)?;
    }
    write_line(
        &mut output,
        &format!("{} routes x {} rounds", report.routes, report.rounds),
    )?;
    Ok(output)
}

/// RFC 4180 CSV; multi-valued cells are joined with `\r\n` inside quotes.
///
/// # Errors
///
/// Returns an error when formatting into the buffer fails.
pub fn render_csv(report: &RunReport) -> AppResult<String> {
    let mut output = String::new();
    let header: Vec<String> = HEADERS.iter().map(|header| csv_field(header)).collect();
    write_line(&mut output, &header.join(","))?;
    for (index, entry) in report.entries.iter().enumerate() {
        let row: Vec<String> = cells(index, entry)
            .iter()
            .map(|cell| csv_field(&cell.join("\r\n")))
            .collect();
        write_line(&mut output, &row.join(","))?;
    }
    Ok(output)
}

/// GitHub-flavoured Markdown table.
///
/// # Errors
///
/// Returns an error when formatting into the buffer fails.
pub fn render_markdown(report: &RunReport) -> AppResult<String> {
    let mut output = String::new();
    write_line(&mut output, &format!("| {} |", HEADERS.join(" | ")))?;
    write_line(&mut output, "| ---: | --- | --- | --- | ---: | --- |")?;
    for (index, entry) in report.entries.iter().enumerate() {
        let row: Vec<String> = cells(index, entry)
            .iter()
            .map(|cell| {
                cell.iter()
                    .map(|value| markdown_cell(value))
                    .collect::<Vec<_>>()
                    .join("<br/>")
            })
            .collect();
        write_line(&mut output, &format!("| {} |", row.join(" | ")))?;
    }
    Ok(output)
}

/// Standalone HTML page headed by `title` and the render time.
///
/// # Errors
///
/// Returns an error when formatting into the buffer fails.
pub fn render_html(report: &RunReport, title: &str) -> AppResult<String> {
    let mut output = String::new();
    write_line(&mut output, "<!doctype html>")?;
    write_line(&mut output, "<html lang=\"en\">")?;
    write_line(&mut output, "<head>")?;
    write_line(&mut output, "  <meta charset=\"utf-8\">")?;
    write_line(&mut output, "  <title>apiping - Results</title>")?;
    write_line(
        &mut output,
        "  <style>table{border-collapse:collapse}th,td{border:1px solid #ccc;padding:4px 8px;vertical-align:top}</style>",
    )?;
    write_line(&mut output, "</head>")?;
    write_line(&mut output, "<body>")?;
    write_line(&mut output, "  <h2>apiping - Results</h2>")?;
    write_line(
        &mut output,
        &format!(
            "  <h4>{} @ {}</h4>",
            html_escape(title),
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ),
    )?;
    write_line(
        &mut output,
        &format!(
            "  <p>{} routes x {} rounds</p>",
            report.routes, report.rounds
        ),
    )?;
    write_line(&mut output, "  <table class=\"apiping-table\">")?;
    let header: Vec<String> = HEADERS
        .iter()
        .map(|header| format!("<th>{}</th>", html_escape(header)))
        .collect();
    write_line(&mut output, &format!("    <thead><tr>{}</tr></thead>", header.concat()))?;
    write_line(&mut output, "    <tbody>")?;
    for (index, entry) in report.entries.iter().enumerate() {
        let row: Vec<String> = cells(index, entry)
            .iter()
            .map(|cell| {
                let values: Vec<String> = cell.iter().map(|value| html_escape(value)).collect();
                format!("<td>{}</td>", values.join("<br/>"))
            })
            .collect();
        write_line(&mut output, &format!("      <tr>{}</tr>", row.concat()))?;
    }
    write_line(&mut output, "    </tbody>")?;
    write_line(&mut output, "  </table>")?;
    write_line(&mut output, "</body>")?;
    write_line(&mut output, "</html>")?;
    Ok(output)
}

/// Pretty JSON object keyed by `"<METHOD> <path>"`.
///
/// # Errors
///
/// Returns an error when serialization fails.
pub fn render_json(report: &RunReport) -> AppResult<String> {
    let keyed: BTreeMap<String, &PathReport> = report
        .entries
        .iter()
        .map(|entry| (format!("{} {}", entry.method, entry.path), entry))
        .collect();
    serde_json::to_string_pretty(&keyed)
        .map_err(|err| AppError::sink(SinkError::SerializeJson { source: err }))
}
