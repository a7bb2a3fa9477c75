use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::{HUD_SEPARATOR, MovePolicy, Theme};
use crate::game::{Snapshot, TickOutcome};

/// Supplemental values displayed by the HUD rows.
#[derive(Debug, Clone)]
pub struct HudInfo<'a> {
    pub theme: &'a Theme,
    pub policy: MovePolicy,
    pub paused: bool,
    pub show_help: bool,
    /// Highlights the score after a pellet was eaten on the latest tick.
    pub score_changed: bool,
    /// Highlights the level after it advanced on the latest tick.
    pub level_changed: bool,
}

impl<'a> HudInfo<'a> {
    #[must_use]
    pub fn new(theme: &'a Theme, policy: MovePolicy) -> Self {
        Self {
            theme,
            policy,
            paused: false,
            show_help: false,
            score_changed: false,
            level_changed: false,
        }
    }

    /// Updates the change highlights from the latest tick.
    pub fn record_outcome(&mut self, outcome: TickOutcome) {
        let (score_changed, level_changed) = match outcome {
            TickOutcome::Moved {
                ate_pellet,
                level_completed,
            } => (ate_pellet, level_completed),
            TickOutcome::Idle | TickOutcome::Blocked => (false, false),
        };
        self.score_changed = score_changed;
        self.level_changed = level_changed;
    }
}

/// Renders the score/level readout and returns the remaining play area above it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &Snapshot<'_>,
    info: &HudInfo<'_>,
) -> Rect {
    let [play_area, score_area, help_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let pellets = snapshot.grid.pellet_count();
    frame.render_widget(
        Paragraph::new(score_line(
            snapshot.progress.score,
            snapshot.progress.level,
            pellets,
            usize::from(score_area.width),
            info,
        ))
        .alignment(Alignment::Center)
        .style(Style::default().fg(info.theme.hud_label)),
        score_area,
    );

    frame.render_widget(
        Paragraph::new(Line::from(help_text(info.policy, info.paused)))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        help_area,
    );

    play_area
}

fn score_line(
    score: u32,
    level: u32,
    pellets: usize,
    available_width: usize,
    info: &HudInfo<'_>,
) -> Line<'static> {
    let compact = score_line_width(score, level, pellets, false) > available_width;
    let score_label = if compact { "S" } else { "Score" };
    let level_label = if compact { "L" } else { "Level" };
    let pellets_label = if compact { "P" } else { "Pellets" };
    let sep = format!(" {HUD_SEPARATOR} ");

    let value = Style::default().fg(info.theme.hud_value);
    let accent = Style::default().fg(info.theme.hud_accent);

    Line::from(vec![
        Span::raw(format!("{score_label}: ")),
        Span::styled(
            score.to_string(),
            if info.score_changed { accent } else { value },
        ),
        Span::raw(sep.clone()),
        Span::raw(format!("{level_label}: ")),
        Span::styled(
            level.to_string(),
            if info.level_changed { accent } else { value },
        ),
        Span::raw(sep),
        Span::raw(format!("{pellets_label}: ")),
        Span::styled(pellets.to_string(), value),
    ])
}

fn score_line_width(score: u32, level: u32, pellets: usize, compact: bool) -> usize {
    let (score_label, level_label, pellets_label) = if compact {
        ("S", "L", "P")
    } else {
        ("Score", "Level", "Pellets")
    };
    let sep_width = format!(" {HUD_SEPARATOR} ").width();

    format!("{score_label}: {score}").width()
        + sep_width
        + format!("{level_label}: {level}").width()
        + sep_width
        + format!("{pellets_label}: {pellets}").width()
}

fn help_text(policy: MovePolicy, paused: bool) -> &'static str {
    match (policy, paused) {
        (_, true) => "[P] resume  [H] help  [Q] quit",
        (MovePolicy::FixedInterval, false) => "arrows steer  [P] pause  [H] help  [Q] quit",
        (MovePolicy::PerKeyPress, false) => "arrows step  [P] pause  [H] help  [Q] quit",
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{MovePolicy, THEME_CLASSIC};
    use crate::game::TickOutcome;

    use super::{HudInfo, score_line, score_line_width};

    #[test]
    fn score_line_uses_compact_labels_when_narrow() {
        let info = HudInfo::new(&THEME_CLASSIC, MovePolicy::FixedInterval);

        let wide = score_line(12, 3, 40, 80, &info).to_string();
        let narrow = score_line(12, 3, 40, 10, &info).to_string();

        assert_eq!(wide, "Score: 12 │ Level: 3 │ Pellets: 40");
        assert_eq!(narrow, "S: 12 │ L: 3 │ P: 40");
    }

    #[test]
    fn width_counts_display_columns() {
        assert_eq!(score_line_width(0, 1, 5, true), 18);
        assert_eq!(score_line_width(0, 1, 5, false), 32);
    }

    #[test]
    fn outcome_sets_highlights() {
        let mut info = HudInfo::new(&THEME_CLASSIC, MovePolicy::FixedInterval);

        info.record_outcome(TickOutcome::Moved {
            ate_pellet: true,
            level_completed: true,
        });
        assert!(info.score_changed && info.level_changed);

        info.record_outcome(TickOutcome::Blocked);
        assert!(!info.score_changed && !info.level_changed);
    }
}
