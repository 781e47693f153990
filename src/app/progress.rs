use std::io::{IsTerminal, Write};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use tokio::sync::watch;
use tracing::debug;

use crate::http::RoundProgress;

/// Renders one progress line per round on stderr until `done_rx` fires.
pub(crate) fn setup_progress_indicator(
    progress: Arc<RoundProgress>,
    rounds: usize,
    no_color: bool,
    mut done_rx: watch::Receiver<bool>,
) -> tokio::task::JoinHandle<()> {
    let style = ProgressStyle::new(30);

    tokio::spawn(async move {
        if !std::io::stderr().is_terminal() {
            return;
        }

        let mut ticker = tokio::time::interval(Duration::from_millis(100));
        let mut shown_round: usize = 0;
        let mut shown_total: usize = 0;

        loop {
            tokio::select! {
                _ = done_rx.changed() => {
                    if shown_round > 0 {
                        let state = RoundState {
                            round: progress.round(),
                            rounds,
                            completed: progress.completed(),
                            total: progress.total(),
                        };
                        if let Err(err) = render_progress_line(&style, &state, no_color)
                            .and_then(|()| finish_progress_line())
                        {
                            debug!("Progress line failed: {}", err);
                        }
                    }
                    break;
                }
                _ = ticker.tick() => {
                    let round = progress.round();
                    if round == 0 {
                        continue;
                    }
                    if round != shown_round && shown_round > 0 {
                        let finished = RoundState {
                            round: shown_round,
                            rounds,
                            completed: shown_total,
                            total: shown_total,
                        };
                        if render_progress_line(&style, &finished, no_color).is_err()
                            || finish_progress_line().is_err()
                        {
                            break;
                        }
                    }
                    shown_round = round;
                    shown_total = progress.total();
                    let state = RoundState {
                        round,
                        rounds,
                        completed: progress.completed(),
                        total: shown_total,
                    };
                    if render_progress_line(&style, &state, no_color).is_err() {
                        break;
                    }
                }
            }
        }
    })
}

struct RoundState {
    round: usize,
    rounds: usize,
    completed: usize,
    total: usize,
}

fn render_progress_line(
    style: &ProgressStyle,
    state: &RoundState,
    no_color: bool,
) -> Result<(), std::io::Error> {
    let line = build_progress_line(style, state, no_color);

    let mut out = std::io::stderr();
    queue!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    for segment in line {
        if let Some(color) = segment.color {
            queue!(
                out,
                SetForegroundColor(color),
                Print(&segment.text),
                ResetColor
            )?;
        } else {
            queue!(out, Print(&segment.text))?;
        }
    }
    out.flush()?;
    Ok(())
}

fn finish_progress_line() -> Result<(), std::io::Error> {
    let mut out = std::io::stderr();
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

fn build_progress_line(
    style: &ProgressStyle,
    state: &RoundState,
    no_color: bool,
) -> Vec<ProgressSegment> {
    let size = style.size.max(1);
    let goal = state.total.max(1);
    let current = state.completed.min(state.total);

    let complete_size = current
        .saturating_mul(size)
        .checked_div(goal)
        .unwrap_or_default()
        .min(size);
    let incomplete_size = size.saturating_sub(complete_size);

    let round_text = format!("Round {}/{} ", state.round, state.rounds);
    let progress_bar = format!(
        "{}{}{}{}",
        style.begin,
        style.fill.repeat(complete_size),
        style.empty.repeat(incomplete_size),
        style.end
    );
    let count_text = format!(" {}/{} routes", current, state.total);

    if no_color {
        vec![
            ProgressSegment::plain(round_text),
            ProgressSegment::plain(progress_bar),
            ProgressSegment::plain(count_text),
        ]
    } else {
        vec![
            ProgressSegment::colored(round_text, Color::Yellow),
            ProgressSegment::plain(progress_bar),
            ProgressSegment::colored(count_text, Color::Cyan),
        ]
    }
}

struct ProgressStyle {
    size: usize,
    begin: &'static str,
    end: &'static str,
    fill: &'static str,
    empty: &'static str,
}

impl ProgressStyle {
    const fn new(size: usize) -> Self {
        Self {
            size,
            begin: "[",
            end: "]",
            fill: "#",
            empty: "-",
        }
    }
}

struct ProgressSegment {
    text: String,
    color: Option<Color>,
}

impl ProgressSegment {
    const fn plain(text: String) -> Self {
        Self { text, color: None }
    }

    const fn colored(text: String, color: Color) -> Self {
        Self {
            text,
            color: Some(color),
        }
    }
}
