use crate::core::{ComprehensiveReport, ReadinessTier, Severity};
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use std::io::Write;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait ReportWriter {
    fn write_report(&mut self, report: &ComprehensiveReport) -> anyhow::Result<()>;
}

pub fn create_writer(
    format: OutputFormat,
    output: Option<PathBuf>,
) -> anyhow::Result<Box<dyn ReportWriter>> {
    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(std::fs::File::create(path)?),
        None => Box::new(std::io::stdout()),
    };
    Ok(match format {
        OutputFormat::Json => Box::new(JsonWriter { writer: sink }),
        OutputFormat::Markdown => Box::new(MarkdownWriter { writer: sink }),
        OutputFormat::Terminal => Box::new(TerminalWriter { writer: sink }),
    })
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> ReportWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &ComprehensiveReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> ReportWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &ComprehensiveReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Readiness Audit Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer, "Project: {}", report.project_path.display())?;
        writeln!(self.writer)?;
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Overall score | {:.1} |", report.overall_score)?;
        writeln!(self.writer, "| Overall status | {} |", report.overall_status)?;
        writeln!(self.writer, "| Readiness | {} |", report.readiness)?;
        writeln!(self.writer)?;

        writeln!(self.writer, "## Phases")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Phase | Score | Status | Violations |")?;
        writeln!(self.writer, "|-------|-------|--------|------------|")?;
        for phase in &report.phases {
            writeln!(
                self.writer,
                "| {} | {:.1} | {} | {} |",
                phase.phase,
                phase.score,
                phase.status,
                phase.violations.len()
            )?;
        }
        for phase in &report.failed_phases {
            writeln!(self.writer, "| {phase} | - | did not run | - |")?;
        }
        writeln!(self.writer)?;

        self.write_violations(report)?;
        self.write_recommendations(report)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_violations(&mut self, report: &ComprehensiveReport) -> anyhow::Result<()> {
        let total: usize = report.phases.iter().map(|p| p.violations.len()).sum();
        if total == 0 {
            return Ok(());
        }
        writeln!(self.writer, "## Violations")?;
        writeln!(self.writer)?;
        for phase in &report.phases {
            for violation in &phase.violations {
                writeln!(
                    self.writer,
                    "- **{}** `{}` {}:{} — {}",
                    violation.severity,
                    violation.rule,
                    violation.file.display(),
                    violation.line,
                    violation.message
                )?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_recommendations(&mut self, report: &ComprehensiveReport) -> anyhow::Result<()> {
        if report.recommendations.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Recommendations")?;
        writeln!(self.writer)?;
        for (index, rec) in report.recommendations.iter().enumerate() {
            writeln!(self.writer, "{}. [{}] {}", index + 1, rec.severity, rec.text)?;
        }
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> ReportWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &ComprehensiveReport) -> anyhow::Result<()> {
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{}  {}",
            "Readiness:".bold(),
            tier_label(report.readiness)
        )?;
        writeln!(
            self.writer,
            "{}  {:.1}/100 ({})",
            "Score:".bold(),
            report.overall_score,
            report.overall_status
        )?;
        writeln!(self.writer)?;

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Phase", "Score", "Status", "Violations"]);
        for phase in &report.phases {
            table.add_row(vec![
                Cell::new(phase.phase),
                Cell::new(format!("{:.1}", phase.score)),
                Cell::new(phase.status),
                Cell::new(phase.violations.len()),
            ]);
        }
        for phase in &report.failed_phases {
            table.add_row(vec![
                Cell::new(phase),
                Cell::new("-"),
                Cell::new("did not run"),
                Cell::new("-"),
            ]);
        }
        writeln!(self.writer, "{table}")?;

        for error in &report.errors {
            writeln!(
                self.writer,
                "{} [{}] {} — {}",
                "error:".red().bold(),
                error.phase,
                error.message,
                error.remediation.dimmed()
            )?;
        }

        self.write_top_violations(report)?;

        if !report.recommendations.is_empty() {
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", "Recommendations".bold())?;
            for rec in report.recommendations.iter().take(10) {
                writeln!(
                    self.writer,
                    "  {} {}",
                    severity_label(rec.severity),
                    rec.text
                )?;
            }
        }
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn write_top_violations(&mut self, report: &ComprehensiveReport) -> anyhow::Result<()> {
        let mut violations: Vec<_> = report
            .phases
            .iter()
            .flat_map(|p| p.violations.iter())
            .collect();
        if violations.is_empty() {
            return Ok(());
        }
        violations.sort_by(|a, b| b.severity.cmp(&a.severity));

        writeln!(self.writer)?;
        writeln!(self.writer, "{}", "Top violations".bold())?;
        for violation in violations.iter().take(15) {
            writeln!(
                self.writer,
                "  {} {}:{} {}",
                severity_label(violation.severity),
                violation.file.display(),
                violation.line,
                violation.message
            )?;
            if let Some(excerpt) = &violation.excerpt {
                writeln!(self.writer, "      {}", excerpt.dimmed())?;
            }
        }
        Ok(())
    }
}

fn tier_label(tier: ReadinessTier) -> ColoredString {
    match tier {
        ReadinessTier::ProductionReady => tier.to_string().green().bold(),
        ReadinessTier::Ready => tier.to_string().green(),
        ReadinessTier::NeedsWork => tier.to_string().yellow(),
        ReadinessTier::NotReady => tier.to_string().red().bold(),
    }
}

fn severity_label(severity: Severity) -> ColoredString {
    match severity {
        Severity::Critical => "CRITICAL".red().bold(),
        Severity::High => "HIGH".red(),
        Severity::Medium => "MEDIUM".yellow(),
        Severity::Low => "LOW".normal(),
    }
}
