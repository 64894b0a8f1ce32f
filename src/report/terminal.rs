use super::UnusedCodeReport;
use crate::error::{DetectError, Result};
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;

/// Terminal reporter with colored output
pub struct TerminalReporter {
    /// Print the manual-review advisory when something was found
    show_advisory: bool,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self {
            show_advisory: true,
        }
    }

    pub fn with_advisory(mut self, show: bool) -> Self {
        self.show_advisory = show;
        self
    }

    pub fn report(&self, report: &UnusedCodeReport) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.render(report, &mut out)
            .map_err(|source| DetectError::Output {
                path: PathBuf::from("<stdout>"),
                source,
            })
    }

    pub fn render(&self, report: &UnusedCodeReport, out: &mut impl Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", "📊 UNUSED CODE ANALYSIS REPORT".bold())?;
        writeln!(out, "{}", "═".repeat(50).dimmed())?;

        self.render_summary(report, out)?;
        self.render_unused_files(report, out)?;
        self.render_unused_exports(report, out)?;

        writeln!(out)?;
        writeln!(out, "{}", "💡 OPTIMIZATION POTENTIAL:".bold())?;
        writeln!(
            out,
            "   {:.1}% of files could potentially be removed",
            report.waste_percentage()
        )?;

        if self.show_advisory && report.has_findings() {
            writeln!(out)?;
            writeln!(
                out,
                "{}",
                "⚠️  NOTE: Please review these findings carefully before removing any code."
                    .yellow()
            )?;
            writeln!(out, "   Some code might be used dynamically or be intended for future use.")?;
            writeln!(out, "   UI components may be installed but not yet used.")?;
        }

        Ok(())
    }

    fn render_summary(&self, report: &UnusedCodeReport, out: &mut impl Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", "📈 SUMMARY:".bold())?;
        writeln!(out, "   Total files analyzed: {}", report.total_files)?;
        writeln!(out, "   Unused files: {}", report.total_unused_files)?;
        writeln!(
            out,
            "   Files with unused exports: {}",
            report.files_with_unused_exports.len()
        )?;
        writeln!(out, "   Total unused exports: {}", report.total_unused_exports)
    }

    fn render_unused_files(&self, report: &UnusedCodeReport, out: &mut impl Write) -> io::Result<()> {
        writeln!(out)?;
        if report.unused_files.is_empty() {
            return writeln!(out, "{}", "✅ No unused files found!".green());
        }

        writeln!(out, "{}", "🗑️  UNUSED FILES:".red().bold())?;
        writeln!(out, "{}", "─".repeat(30).dimmed())?;
        for file in &report.unused_files {
            writeln!(out, "   📄 {}", file.cyan())?;
        }
        Ok(())
    }

    fn render_unused_exports(&self, report: &UnusedCodeReport, out: &mut impl Write) -> io::Result<()> {
        writeln!(out)?;
        if report.files_with_unused_exports.is_empty() {
            return writeln!(out, "{}", "✅ No unused exports found!".green());
        }

        writeln!(out, "{}", "🚫 UNUSED EXPORTS:".yellow().bold())?;
        writeln!(out, "{}", "─".repeat(30).dimmed())?;
        for file in &report.files_with_unused_exports {
            writeln!(out, "   📄 {}", file.file_path.cyan())?;
            for name in &file.unused_exports {
                writeln!(out, "      ↳ {}", name)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
