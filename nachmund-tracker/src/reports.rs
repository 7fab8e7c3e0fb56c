use std::io::Write;

use anyhow::Result;
use colored::{ColoredString, Colorize};
use nachmund_campaign::{
    Alliance, AllianceResults, Keyword, LocationTotals, Phase, PhaseResults, Results,
    ValidationOutcome,
};
use serde::Serialize;

use crate::filters::Selection;

const HEADERS: [&str; 6] = ["Alliance", "Bastion", "Battery", "Spaceport", "Tower", "Total"];

/// One table row: an alliance's totals in column order.
fn row_cells(alliance: Alliance, totals: &LocationTotals) -> [String; 6] {
    [
        alliance.title().to_string(),
        totals.bastion.to_string(),
        totals.battery.to_string(),
        totals.spaceport.to_string(),
        totals.tower.to_string(),
        totals.total().to_string(),
    ]
}

fn column_widths(rows: &[[String; 6]]) -> [usize; 6] {
    let mut widths = HEADERS.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }
    widths
}

fn write_table(
    out: &mut dyn Write,
    rows: &[[String; 6]],
    header_style: fn(&str) -> ColoredString,
) -> Result<()> {
    let widths = column_widths(rows);

    let header: Vec<String> = HEADERS
        .iter()
        .zip(widths)
        .map(|(title, width)| header_style(&format!("{title:<width$}")).to_string())
        .collect();
    writeln!(out, "{}", header.join("  ").trim_end())?;

    for row in rows {
        let mut cells = Vec::with_capacity(row.len());
        for (index, (cell, width)) in row.iter().zip(widths).enumerate() {
            let padded = format!("{cell:<width$}");
            if index == 0 {
                cells.push(padded.yellow().to_string());
            } else {
                cells.push(padded);
            }
        }
        writeln!(out, "{}", cells.join("  ").trim_end())?;
    }
    Ok(())
}

fn bp_header(text: &str) -> ColoredString {
    text.red().underline()
}

fn sap_header(text: &str) -> ColoredString {
    text.blue().underline()
}

const fn bp_totals(results: &AllianceResults) -> &LocationTotals {
    &results.bp
}

const fn sap_totals(results: &AllianceResults) -> &LocationTotals {
    &results.sap
}

fn phase_rows(
    phase: &PhaseResults,
    alliances: &[Alliance],
    pick: fn(&AllianceResults) -> &LocationTotals,
) -> Vec<[String; 6]> {
    alliances
        .iter()
        .map(|alliance| row_cells(*alliance, pick(phase.alliance(*alliance))))
        .collect()
}

fn selected_phases<'a>(
    results: &'a Results,
    selection: &'a Selection,
) -> impl Iterator<Item = (Phase, PhaseResults)> + 'a {
    selection
        .phases
        .iter()
        .map(|phase| (*phase, results.phase(*phase).copied().unwrap_or_default()))
}

pub fn generate_console_report(
    out: &mut dyn Write,
    results: &Results,
    selection: &Selection,
) -> Result<()> {
    for (index, (phase, totals)) in selected_phases(results, selection).enumerate() {
        if index > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{}", format!("Phase {phase}").bright_green().underline())?;

        writeln!(out, "{}", "BP Allocation".red())?;
        let bp_rows = phase_rows(&totals, &selection.alliances, bp_totals);
        write_table(out, &bp_rows, bp_header)?;
        writeln!(out)?;

        writeln!(out, "{}", "SAP Allocation".blue())?;
        let sap_rows = phase_rows(&totals, &selection.alliances, sap_totals);
        write_table(out, &sap_rows, sap_header)?;
    }
    Ok(())
}

pub fn generate_markdown_report(
    out: &mut dyn Write,
    results: &Results,
    selection: &Selection,
) -> Result<()> {
    writeln!(out, "# Nachmund Campaign Results")?;

    for (phase, totals) in selected_phases(results, selection) {
        writeln!(out, "\n## Phase {phase}")?;
        let tables: [(&str, fn(&AllianceResults) -> &LocationTotals); 2] =
            [("BP Allocation", bp_totals), ("SAP Allocation", sap_totals)];
        for (title, pick) in tables {
            writeln!(out, "\n### {title}\n")?;
            writeln!(out, "| {} |", HEADERS.join(" | "))?;
            writeln!(out, "|{}", "---|".repeat(HEADERS.len()))?;
            for row in phase_rows(&totals, &selection.alliances, pick) {
                writeln!(out, "| {} |", row.join(" | "))?;
            }
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct LocationRow {
    bastion: u32,
    battery: u32,
    spaceport: u32,
    tower: u32,
    total: u32,
}

impl From<&LocationTotals> for LocationRow {
    fn from(totals: &LocationTotals) -> Self {
        Self {
            bastion: totals.bastion,
            battery: totals.battery,
            spaceport: totals.spaceport,
            tower: totals.tower,
            total: totals.total(),
        }
    }
}

#[derive(Debug, Serialize)]
struct AllianceEntry {
    alliance: &'static str,
    bp: LocationRow,
    sap: LocationRow,
}

#[derive(Debug, Serialize)]
struct PhaseEntry {
    phase: Phase,
    alliances: Vec<AllianceEntry>,
}

pub fn generate_json_report(
    out: &mut dyn Write,
    results: &Results,
    selection: &Selection,
) -> Result<()> {
    let entries: Vec<PhaseEntry> = selected_phases(results, selection)
        .map(|(phase, totals)| PhaseEntry {
            phase,
            alliances: selection
                .alliances
                .iter()
                .map(|alliance| {
                    let totals = totals.alliance(*alliance);
                    AllianceEntry {
                        alliance: alliance.as_str(),
                        bp: LocationRow::from(&totals.bp),
                        sap: LocationRow::from(&totals.sap),
                    }
                })
                .collect(),
        })
        .collect();
    let json_output = serde_json::to_string_pretty(&entries)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_validation_report(out: &mut dyn Write, outcome: &ValidationOutcome) -> Result<()> {
    if outcome.is_clean() {
        writeln!(out, "{} campaign file valid", "✅".green())?;
        return Ok(());
    }

    let invalid = outcome.errors.len();
    writeln!(
        out,
        "{}",
        format!(
            "❌ {invalid} invalid game record{} ({} valid)",
            if invalid == 1 { "" } else { "s" },
            outcome.valid.len()
        )
        .red()
        .bold()
    )?;

    for game in &outcome.errors {
        writeln!(out)?;
        writeln!(out, "{}", game.record().to_string().bold())?;
        for violation in game.violations() {
            writeln!(out, "   • {}", violation.to_string().red())?;
        }
    }
    Ok(())
}
