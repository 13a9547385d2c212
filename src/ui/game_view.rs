use std::str::FromStr;

use crate::game::{Cell, GameEngine, GameOutcome, Player};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(
    frame: &mut Frame,
    engine: &GameEngine,
    selected_column: usize,
    message: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(board_rows(engine)), // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, engine, chunks[0]);
    render_board(frame, engine, selected_column, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

/// Rows needed for the board plus column labels, borders and indicator.
fn board_rows(engine: &GameEngine) -> u16 {
    u16::try_from(engine.height())
        .unwrap_or(u16::MAX)
        .saturating_add(4)
}

/// Terminal colour for a player's pieces. Profile colours that ratatui can
/// parse ("red", "lightblue", "#ff8800", ...) are used as-is.
fn player_color(engine: &GameEngine, player: Player) -> Color {
    Color::from_str(&engine.profile(player).color).unwrap_or(match player {
        Player::One => Color::Red,
        Player::Two => Color::Yellow,
    })
}

fn render_header(frame: &mut Frame, engine: &GameEngine, area: Rect) {
    let (status, color) = match engine.outcome() {
        Some(GameOutcome::Winner(player)) => (
            format!("Game Over  |  {} wins", engine.profile(player)),
            player_color(engine, player),
        ),
        Some(GameOutcome::Draw) => ("Game Over  |  Tie".to_string(), Color::White),
        None => {
            let player = engine.current_player();
            (
                format!("Current Player: {}", engine.profile(player)),
                player_color(engine, player),
            )
        }
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, engine: &GameEngine, selected_column: usize, area: Rect) {
    let width = engine.width();
    let winning_line = engine.winning_line();
    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..width {
        let label = format!("{:^3}", col + 1);
        if col == selected_column && !engine.is_over() {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    let rule = "═".repeat(width * 3 + 1);
    lines.push(Line::from(format!("  ╔{rule}╗")));

    for row in 0..engine.height() {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..width {
            let span = match engine.cell(row, col) {
                Some(Cell::Occupied(player)) => {
                    let mut style = Style::default().fg(player_color(engine, player));
                    let on_line = winning_line
                        .map(|line| line.contains(&(row, col)))
                        .unwrap_or(false);
                    if on_line {
                        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                    } else if engine.last_move() == Some((row, col)) {
                        style = style.add_modifier(Modifier::BOLD);
                    }
                    Span::styled(" ● ", style)
                }
                _ => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
            };
            row_spans.push(span);
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{rule}╝")));

    // Selection indicator
    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..width {
        if col == selected_column && !engine.is_over() {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line = Line::from("←/→: Move  |  Enter or 1-9: Drop  |  R: Start/Restart  |  Q: Quit");

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}
