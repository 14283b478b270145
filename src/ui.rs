use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::{session::Segment, App};

const HORIZONTAL_MARGIN: u16 = 5;

// Two cells per segment so the bar reads well at typical font aspect ratios.
const FILLED_CELL: &str = "██";
const EMPTY_CELL: &str = "░░";

// headline, timer, bar, cycle label, key hint, plus blank rows between
const BLOCK_HEIGHT: u16 = 9;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snapshot = self.session.snapshot();

        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);
        let idle_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC);

        let top_pad = area.height.saturating_sub(BLOCK_HEIGHT) / 2;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints(
                [
                    Constraint::Length(top_pad),
                    Constraint::Length(1), // headline
                    Constraint::Length(1),
                    Constraint::Length(1), // seconds remaining
                    Constraint::Length(1),
                    Constraint::Length(1), // progress bar
                    Constraint::Length(1),
                    Constraint::Length(1), // cycle label
                    Constraint::Length(1),
                    Constraint::Min(1), // key hint
                ]
                .as_ref(),
            )
            .split(area);

        let headline_style = if snapshot.is_running {
            bold_style
        } else {
            idle_style
        };
        Paragraph::new(Span::styled(snapshot.headline.clone(), headline_style))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        Paragraph::new(Span::styled(
            snapshot.seconds_left.to_string(),
            dim_bold_style,
        ))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

        let mut bar = Vec::new();
        for segment in &snapshot.segments {
            let cell = match segment {
                Segment::Filled => Span::styled(FILLED_CELL, green_bold_style),
                Segment::Empty => Span::styled(EMPTY_CELL, dim_bold_style),
                Segment::Hidden => continue,
            };
            if !bar.is_empty() {
                bar.push(Span::raw(" "));
            }
            bar.push(cell);
        }
        Paragraph::new(Line::from(bar))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);

        Paragraph::new(Span::styled(snapshot.cycle_label.clone(), dim_bold_style))
            .alignment(Alignment::Center)
            .render(chunks[7], buf);

        let hint = if snapshot.is_running {
            "(r)eset  (esc)ape"
        } else {
            "(s)tart  (↑/↓) cycles  (esc)ape"
        };
        Paragraph::new(Span::styled(hint, italic_style))
            .alignment(Alignment::Center)
            .render(chunks[9], buf);
    }
}
