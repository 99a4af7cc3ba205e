use crate::live_view::domain::{
    severity_rank, ActivityEntry, FacetOptions, FindingDetail, FindingsPage, ProjectCard,
    StatsSnapshot,
};
use crate::ports::outbound::DashboardPresenter;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::cell::RefCell;
use std::collections::HashMap;

/// TerminalPresenter adapter - renders the non-chart surfaces of the
/// dashboard as plain colored text.
///
/// Scan progress is drawn with one indicatif bar per active project,
/// kept alive across renders so the bar animates in place instead of
/// reprinting.
pub struct TerminalPresenter {
    multi: MultiProgress,
    bars: RefCell<HashMap<String, ProgressBar>>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: RefCell::new(HashMap::new()),
        }
    }

    fn get_or_create_bar(&self, project: &str) -> ProgressBar {
        let mut bars = self.bars.borrow_mut();
        if let Some(bar) = bars.get(project) {
            return bar.clone();
        }
        let bar = self.multi.add(ProgressBar::new(100));
        bar.set_style(
            ProgressStyle::default_bar()
                .template("   {prefix:>24} [{bar:30.cyan/blue}] {pos}% - {msg}")
                .expect("Failed to set progress bar template")
                .progress_chars("=>-"),
        );
        bar.set_prefix(project.to_string());
        bars.insert(project.to_string(), bar.clone());
        bar
    }

    /// Drops bars for projects that no longer have an active scan.
    fn retire_stale_bars(&self, projects: &[ProjectCard]) {
        let mut bars = self.bars.borrow_mut();
        bars.retain(|name, bar| {
            let still_active = projects
                .iter()
                .any(|card| card.project.name == *name && card.project.is_active);
            if !still_active {
                bar.finish_and_clear();
            }
            still_active
        });
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Pads first, colors second, so ANSI codes don't break column widths.
fn severity_cell(severity: &str, width: usize) -> String {
    let padded = format!("{:<width$}", severity, width = width);
    match severity_rank(severity) {
        0 => padded.bright_red().to_string(),
        1 => padded.bright_yellow().to_string(),
        2 => padded.bright_cyan().to_string(),
        3 => padded.bright_black().to_string(),
        _ => padded,
    }
}

impl DashboardPresenter for TerminalPresenter {
    fn render_summary(&self, stats: &StatsSnapshot, scope: Option<&str>) {
        let heading = match scope {
            Some(repo) => format!("📊 Security posture - {}", repo),
            None => "📊 Security posture - all projects".to_string(),
        };
        println!();
        println!("{}", heading.bold());
        println!(
            "   {} findings across {} repos ({} completed scans)",
            stats.total_findings, stats.total_repos, stats.total_scans
        );
        println!(
            "   severity: {} critical / {} high / {} medium / {} low",
            stats.severity.critical.bright_red(),
            stats.severity.high.bright_yellow(),
            stats.severity.medium.bright_cyan(),
            stats.severity.low.bright_black()
        );
        println!(
            "   AI triage: {} auto-fixed, {} false positives, efficacy {:.1}%, confidence {:.1}%",
            stats.ai_metrics.auto_fixed,
            stats.ai_metrics.false_positives,
            stats.ai_metrics.efficacy_percent,
            stats.ai_metrics.confidence_avg
        );
        println!(
            "   MTTF: {:.1}h overall (AI {:.1}h / manual {:.1}h)",
            stats.devsecops_metrics.mttf_hours,
            stats.devsecops_metrics.mttf_ai_hours,
            stats.devsecops_metrics.mttf_manual_hours
        );
        println!(
            "   pipeline: database {}, cache {} ({})",
            stats.system_health.database, stats.system_health.redis, stats.system_health.status
        );
        if !stats.devsecops_metrics.risk_per_repo.is_empty() {
            let ranking: Vec<String> = stats
                .devsecops_metrics
                .risk_per_repo
                .iter()
                .map(|entry| format!("{} ({:.1})", entry.repo, entry.risk))
                .collect();
            println!("   top risk: {}", ranking.join(", "));
        }
    }

    fn render_projects(&self, projects: &[ProjectCard]) {
        self.retire_stale_bars(projects);
        if projects.is_empty() {
            println!("📁 No projects yet.");
            return;
        }
        println!();
        println!("{}", "📁 Projects".bold());
        for card in projects {
            let activity = if card.project.is_active {
                "● scanning".bright_green().to_string()
            } else {
                "○ idle".bright_black().to_string()
            };
            let last_run = card
                .project
                .last_run_time()
                .map(|time| time.format("%Y-%m-%d %H:%M UTC").to_string())
                .unwrap_or_else(|| "never".to_string());
            println!(
                "   {:<32} {:<10} {:<14} {}  last run {}",
                card.project.name, card.project.provider, card.project.branch, activity, last_run
            );
            if card.project.is_active {
                if let Some(progress) = &card.progress {
                    let bar = self.get_or_create_bar(&card.project.name);
                    bar.set_position(progress.percent() as u64);
                    bar.set_message(format!(
                        "{} (step {}/{})",
                        progress.stage, progress.step, progress.total_steps
                    ));
                }
            }
        }
    }

    fn render_activity(&self, activity: &[ActivityEntry]) {
        if activity.is_empty() {
            return;
        }
        let running: Vec<String> = activity
            .iter()
            .map(|entry| format!("{} #{} ({})", entry.project, entry.id, entry.status))
            .collect();
        println!("🔄 {} running: {}", activity.len(), running.join(", "));
    }

    fn render_findings(&self, page: &FindingsPage, total_pages: u64, controls_disabled: bool) {
        println!();
        println!("{}", "🔎 Findings".bold());
        if page.findings.is_empty() {
            println!("   No findings match the current filters.");
            return;
        }
        println!(
            "   {:>6}  {:<10} {:<12} {:>5}  {:<34} {:<24} {:<8} {}",
            "ID", "SEVERITY", "TOOL", "RISK", "LOCATION", "PROJECT", "VERDICT", "FIX"
        );
        for finding in &page.findings {
            println!(
                "   {:>6}  {} {:<12} {:>5.1}  {:<34} {:<24} {:<8} {}",
                finding.id,
                severity_cell(&finding.severity, 10),
                finding.tool,
                finding.risk_score,
                finding.location,
                finding.project,
                finding.ai_verdict.as_deref().unwrap_or("-"),
                if finding.has_fix { "🔧" } else { "" }
            );
        }
        if controls_disabled {
            println!(
                "   {} findings (pagination unavailable for this cycle)",
                page.total
            );
        } else {
            println!(
                "   page {} of {} - {} findings total",
                page.page, total_pages, page.total
            );
        }
    }

    fn render_detail(&self, detail: &FindingDetail) {
        println!();
        println!(
            "{}",
            format!("📄 Finding #{} - {}", detail.id, detail.tool).bold()
        );
        println!(
            "   severity {}  risk {:.1}  rule {}",
            severity_cell(&detail.severity, 0),
            detail.risk_score,
            detail.rule_id.as_deref().unwrap_or("-")
        );
        if let (Some(file), Some(line)) = (detail.file.as_deref(), detail.line) {
            println!("   location {}:{}", file, line);
        }
        if let Some(project) = detail.project.as_deref() {
            println!("   project  {}", project);
        }
        if let Some(message) = detail.message.as_deref() {
            println!("   {}", message);
        }
        if let Some(snippet) = detail.snippet.as_deref() {
            println!("   ┌─ snippet");
            for line in snippet.lines() {
                println!("   │ {}", line);
            }
            println!("   └─");
        }
        if let (Some(verdict), reasoning) = (detail.ai_verdict.as_deref(), &detail.ai_reasoning) {
            println!(
                "   AI verdict {} (confidence {:.1}%)",
                verdict, detail.ai_confidence
            );
            if let Some(reasoning) = reasoning.as_deref() {
                println!("   {}", reasoning);
            }
        }
        match detail.remediation_patch.as_deref() {
            Some(_) => println!("   🔧 Remediation patch available - type 'fix' to print it."),
            None => println!("   No remediation patch yet."),
        }
        if let Some(url) = detail.pr_url.as_deref() {
            println!("   PR: {}", url);
        }
    }

    fn render_facets(&self, facets: &FacetOptions) {
        println!();
        println!("{}", "🔧 Filter values".bold());
        println!("   repos:      {}", facets.repos.join(", "));
        println!("   tools:      {}", facets.tools.join(", "));
        println!("   severities: {}", facets.severities.join(", "));
    }

    fn notice(&self, message: &str) {
        println!("{}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("❌ {}", message);
    }
}
