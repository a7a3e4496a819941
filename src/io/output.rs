use crate::core::{CategoryCount, OverallThemes, ThemeSummary};
use crate::priority::{DashboardView, FilterConfig, RankMode, RankingOutcome};
use crate::report::{DashboardReport, FirmDetail};
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Table};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Placeholder for undefined values.
pub const UNDEFINED: &str = "-";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
    #[default]
    Terminal,
}

pub trait OutputWriter {
    fn write_dashboard(&mut self, report: &DashboardReport) -> anyhow::Result<()>;
    fn write_firm_detail(&mut self, detail: &FirmDetail) -> anyhow::Result<()>;
}

/// Two decimals, or the placeholder when undefined.
pub fn format_mean(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| UNDEFINED.to_string())
}

fn format_list(values: &[String]) -> String {
    if values.is_empty() {
        UNDEFINED.to_string()
    } else {
        values.join(", ")
    }
}

fn describe_filters(config: &FilterConfig) -> String {
    let search = if config.search_text.trim().is_empty() {
        UNDEFINED.to_string()
    } else {
        format!("\"{}\"", config.search_text.trim())
    };
    format!(
        "search: {}, platform: {}, rank: {}, exclude enforcement: {}, minN: {}",
        search,
        config.platform,
        config.rank_mode,
        if config.exclude_enforcement { "yes" } else { "no" },
        config.min_n
    )
}

fn ranking_title(ranking: &RankingOutcome) -> String {
    let metric = match ranking.mode {
        RankMode::Rating => "average rating (0-5)",
        RankMode::Sentiment => "average sentiment",
    };
    format!("Top {} by {}", ranking.limit, metric)
}

fn sample_label(mode: RankMode) -> &'static str {
    match mode {
        RankMode::Rating => "Ratings",
        RankMode::Sentiment => "Scored",
    }
}

// ============================================================================
// JSON
// ============================================================================

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_dashboard(&mut self, report: &DashboardReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    fn write_firm_detail(&mut self, detail: &FirmDetail) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(detail)?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }
}

// ============================================================================
// MARKDOWN
// ============================================================================

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_totals(&mut self, view: &DashboardView) -> anyhow::Result<()> {
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "_Filters: {}_", describe_filters(&view.config))?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Firms | {} |", view.totals.firms)?;
        writeln!(self.writer, "| Reviews | {} |", view.totals.reviews)?;
        writeln!(self.writer, "| Reviews with rating | {} |", view.totals.reviews_with_rating)?;
        writeln!(self.writer, "| Reviews with text | {} |", view.totals.reviews_with_text)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_ranking(&mut self, ranking: &RankingOutcome) -> anyhow::Result<()> {
        writeln!(self.writer, "## {}", ranking_title(ranking))?;
        writeln!(self.writer)?;
        if let Some(note) = ranking.note() {
            writeln!(self.writer, "> {}", note)?;
            writeln!(self.writer)?;
            return Ok(());
        }
        writeln!(
            self.writer,
            "| # | Firm | Value | {} | Reviews |",
            sample_label(ranking.mode)
        )?;
        writeln!(self.writer, "|---|------|-------|------|---------|")?;
        for entry in &ranking.entries {
            writeln!(
                self.writer,
                "| {} | {} | {:.2} | {} | {} |",
                entry.rank, entry.firm_name, entry.value, entry.sample_n, entry.reviews_n
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_firms(&mut self, view: &DashboardView) -> anyhow::Result<()> {
        writeln!(self.writer, "## Firms")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Firm | Cities | Platforms | Reviews | Avg rating | Ratings | Avg sentiment | Scored |"
        )?;
        writeln!(
            self.writer,
            "|------|--------|-----------|---------|------------|---------|---------------|--------|"
        )?;
        for row in &view.firms {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} | {} | {} | {} |",
                row.firm_name,
                format_list(&row.cities),
                format_list(&row.platforms),
                row.stats.reviews_n,
                format_mean(row.stats.avg_rating_5),
                row.stats.ratings_n,
                format_mean(row.stats.avg_sentiment),
                row.stats.scored_n
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_categories(
        &mut self,
        title: &str,
        categories: &[CategoryCount],
    ) -> anyhow::Result<()> {
        writeln!(self.writer, "### {}", title)?;
        writeln!(self.writer)?;
        if categories.is_empty() {
            writeln!(self.writer, "{}", UNDEFINED)?;
        }
        for c in categories {
            writeln!(self.writer, "- {} ({})", c.category, c.count)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_quotes(&mut self, title: &str, quotes: &[String]) -> anyhow::Result<()> {
        writeln!(self.writer, "### {}", title)?;
        writeln!(self.writer)?;
        if quotes.is_empty() {
            writeln!(self.writer, "{}", UNDEFINED)?;
        }
        for q in quotes {
            writeln!(self.writer, "> {}", q)?;
            writeln!(self.writer)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_overall_themes(&mut self, themes: &OverallThemes) -> anyhow::Result<()> {
        writeln!(self.writer, "## Themes")?;
        writeln!(self.writer)?;
        self.write_categories("Positive", &themes.top_positive_categories)?;
        self.write_categories("Negative", &themes.top_negative_categories)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_dashboard(&mut self, report: &DashboardReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Law Firm Reviews")?;
        writeln!(self.writer)?;
        self.write_totals(&report.view)?;
        self.write_ranking(&report.view.ranking)?;
        self.write_firms(&report.view)?;
        self.write_overall_themes(&report.overall_themes)?;
        if !report.limitations.is_empty() {
            writeln!(self.writer, "## Limitations")?;
            writeln!(self.writer)?;
            for l in &report.limitations {
                writeln!(self.writer, "- {}", l)?;
            }
        }
        Ok(())
    }

    fn write_firm_detail(&mut self, detail: &FirmDetail) -> anyhow::Result<()> {
        writeln!(self.writer, "# {}", detail.firm_name)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "_Filters: {}_", describe_filters(&detail.config))?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Field | Value |")?;
        writeln!(self.writer, "|-------|-------|")?;
        writeln!(self.writer, "| Firm id | {} |", detail.firm_id)?;
        writeln!(
            self.writer,
            "| Website | {} |",
            detail.website.as_deref().unwrap_or(UNDEFINED)
        )?;
        writeln!(self.writer, "| Cities | {} |", format_list(&detail.cities))?;
        writeln!(self.writer, "| Platforms | {} |", format_list(&detail.platforms))?;
        writeln!(
            self.writer,
            "| Reviews | {} of {} |",
            detail.stats.reviews_n, detail.reviews_total
        )?;
        writeln!(
            self.writer,
            "| Avg rating | {} (n={}) |",
            format_mean(detail.stats.avg_rating_5),
            detail.stats.ratings_n
        )?;
        writeln!(
            self.writer,
            "| Avg sentiment | {} (n={}) |",
            format_mean(detail.stats.avg_sentiment),
            detail.stats.scored_n
        )?;
        writeln!(self.writer)?;

        let empty = ThemeSummary::default();
        let themes = detail.themes.as_ref().unwrap_or(&empty);
        self.write_categories("Positive themes", &themes.top_positive_categories)?;
        self.write_categories("Negative themes", &themes.top_negative_categories)?;
        self.write_quotes("Positive quotes", &themes.representative_quotes_positive)?;
        self.write_quotes("Negative quotes", &themes.representative_quotes_negative)?;
        Ok(())
    }
}

// ============================================================================
// TERMINAL
// ============================================================================

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn print_header(&mut self, title: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", title.bold().blue())?;
        writeln!(self.writer, "{}", "=".repeat(title.chars().count()).blue())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_summary(&mut self, view: &DashboardView) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Summary:".bold())?;
        writeln!(self.writer, "  Filters: {}", describe_filters(&view.config))?;
        writeln!(self.writer, "  Firms: {}", view.totals.firms)?;
        writeln!(self.writer, "  Reviews: {}", view.totals.reviews)?;
        writeln!(
            self.writer,
            "  Reviews with rating: {}",
            view.totals.reviews_with_rating
        )?;
        writeln!(
            self.writer,
            "  Reviews with text: {}",
            view.totals.reviews_with_text
        )?;
        if view.filter_stats.total_filtered() > 0 {
            writeln!(
                self.writer,
                "  Excluded: {} by platform, {} as enforcement",
                view.filter_stats.filtered_by_platform, view.filter_stats.filtered_by_enforcement
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_ranking(&mut self, ranking: &RankingOutcome) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", ranking_title(ranking).bold())?;
        if let Some(note) = ranking.note() {
            writeln!(self.writer, "  {}", note.yellow())?;
            writeln!(self.writer)?;
            return Ok(());
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["#", "Firm", "Value", sample_label(ranking.mode), "Reviews"]);
        for entry in &ranking.entries {
            table.add_row(vec![
                Cell::new(entry.rank).set_alignment(CellAlignment::Right),
                Cell::new(&entry.firm_name),
                Cell::new(format!("{:.2}", entry.value)).set_alignment(CellAlignment::Right),
                Cell::new(entry.sample_n).set_alignment(CellAlignment::Right),
                Cell::new(entry.reviews_n).set_alignment(CellAlignment::Right),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_firms(&mut self, view: &DashboardView) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Firms".bold())?;
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![
            "Firm",
            "Cities",
            "Platforms",
            "Reviews",
            "Avg rating",
            "Ratings",
            "Avg sentiment",
            "Scored",
        ]);
        for row in &view.firms {
            table.add_row(vec![
                Cell::new(&row.firm_name),
                Cell::new(format_list(&row.cities)),
                Cell::new(format_list(&row.platforms)),
                Cell::new(row.stats.reviews_n).set_alignment(CellAlignment::Right),
                Cell::new(format_mean(row.stats.avg_rating_5)).set_alignment(CellAlignment::Right),
                Cell::new(row.stats.ratings_n).set_alignment(CellAlignment::Right),
                Cell::new(format_mean(row.stats.avg_sentiment)).set_alignment(CellAlignment::Right),
                Cell::new(row.stats.scored_n).set_alignment(CellAlignment::Right),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_categories(
        &mut self,
        title: &str,
        categories: &[CategoryCount],
    ) -> anyhow::Result<()> {
        writeln!(self.writer, "  {}:", title.bold())?;
        if categories.is_empty() {
            writeln!(self.writer, "    {}", UNDEFINED)?;
        }
        for c in categories {
            writeln!(self.writer, "    {:<36} {:>4}", c.category, c.count)?;
        }
        Ok(())
    }

    fn print_quotes(&mut self, title: &str, quotes: &[String]) -> anyhow::Result<()> {
        writeln!(self.writer, "  {}:", title.bold())?;
        if quotes.is_empty() {
            writeln!(self.writer, "    {}", UNDEFINED)?;
        }
        for q in quotes {
            writeln!(self.writer, "    \"{}\"", q.italic())?;
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_dashboard(&mut self, report: &DashboardReport) -> anyhow::Result<()> {
        self.print_header("Law Firm Reviews")?;
        self.print_summary(&report.view)?;
        self.print_ranking(&report.view.ranking)?;
        self.print_firms(&report.view)?;
        writeln!(self.writer, "{}", "Themes (all firms)".bold())?;
        self.print_categories("Positive", &report.overall_themes.top_positive_categories)?;
        self.print_categories("Negative", &report.overall_themes.top_negative_categories)?;
        if !report.limitations.is_empty() {
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", "Limitations".bold())?;
            for l in &report.limitations {
                writeln!(self.writer, "  - {}", l.dimmed())?;
            }
        }
        Ok(())
    }

    fn write_firm_detail(&mut self, detail: &FirmDetail) -> anyhow::Result<()> {
        self.print_header(&detail.firm_name)?;
        writeln!(self.writer, "  Filters: {}", describe_filters(&detail.config))?;
        writeln!(self.writer, "  Firm id: {}", detail.firm_id)?;
        writeln!(
            self.writer,
            "  Website: {}",
            detail.website.as_deref().unwrap_or(UNDEFINED)
        )?;
        writeln!(self.writer, "  Offices: {}", detail.offices_n)?;
        writeln!(self.writer, "  Cities: {}", format_list(&detail.cities))?;
        writeln!(self.writer, "  Platforms: {}", format_list(&detail.platforms))?;
        writeln!(
            self.writer,
            "  Reviews: {} of {}",
            detail.stats.reviews_n, detail.reviews_total
        )?;
        writeln!(
            self.writer,
            "  Avg rating: {} (n={})",
            format_mean(detail.stats.avg_rating_5),
            detail.stats.ratings_n
        )?;
        writeln!(
            self.writer,
            "  Avg sentiment: {} (n={})",
            format_mean(detail.stats.avg_sentiment),
            detail.stats.scored_n
        )?;
        writeln!(self.writer)?;

        match &detail.themes {
            Some(themes) => {
                self.print_categories("Positive themes", &themes.top_positive_categories)?;
                self.print_categories("Negative themes", &themes.top_negative_categories)?;
                self.print_quotes("Positive quotes", &themes.representative_quotes_positive)?;
                self.print_quotes("Negative quotes", &themes.representative_quotes_negative)?;
            }
            None => writeln!(self.writer, "  Themes: {}", UNDEFINED)?,
        }
        Ok(())
    }
}

pub fn create_writer<'w>(
    format: OutputFormat,
    writer: Box<dyn Write + 'w>,
) -> Box<dyn OutputWriter + 'w> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}
