//! Plain-text rendering of a decision report.

use std::fmt::Write;

use crate::application::DecisionReport;

/// Renders the leaderboard, contribution breakdown and warnings.
pub fn render_report(report: &DecisionReport) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, report: &DecisionReport) -> std::fmt::Result {
    if let Some(title) = &report.title {
        writeln!(out, "{}", title)?;
        writeln!(out, "{}", "=".repeat(title.chars().count()))?;
    }

    writeln!(out, "Ranking")?;
    let width = report
        .ranking
        .ranking
        .iter()
        .map(|line| line.alternative.chars().count())
        .max()
        .unwrap_or(0);
    for line in &report.ranking.ranking {
        let tie = if line.tied_with_next { "  (tied with next)" } else { "" };
        writeln!(
            out,
            "  {:>2}. {:<width$}  {:>10.4}{}",
            line.rank,
            line.alternative,
            line.total,
            tie,
            width = width
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Breakdown")?;
    for line in &report.ranking.ranking {
        writeln!(out, "  {}", line.alternative)?;
        for c in &line.contributions {
            writeln!(
                out,
                "    {:<20} {:>8.4} x {:<8.4} = {:>8.4}",
                c.criterion, c.raw_score, c.normalized_weight, c.weighted_score
            )?;
        }
        if let Some(margin) = line.margin_to_next {
            writeln!(out, "    margin to next: {:.4}", margin)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Sensitivity")?;
    if report.is_fragile() {
        for analysis in report.fragile_criteria() {
            if let (Some(delta), Some(challenger)) = (analysis.tipping_point, analysis.challenger()) {
                writeln!(
                    out,
                    "  WARNING: changing the weight of '{}' by {:+.1}% makes '{}' the winner",
                    analysis.criterion,
                    delta * 100.0,
                    challenger
                )?;
            }
        }
    } else {
        writeln!(out, "  Robust: the winner holds under every tested weight change")?;
    }

    if !report.dominated.is_empty() {
        writeln!(out)?;
        writeln!(out, "Dominated alternatives")?;
        for d in &report.dominated {
            writeln!(out, "  {} (by {}): {}", d.alternative, d.dominated_by, d.explanation)?;
        }
    }

    if !report.non_discriminating.is_empty() {
        writeln!(out)?;
        writeln!(out, "Criteria that do not distinguish alternatives")?;
        for c in &report.non_discriminating {
            writeln!(out, "  {} (all score {})", c.criterion, c.uniform_score)?;
        }
    }

    Ok(())
}
