use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    app::App,
    clock::Clock,
    feedback::{Classification, WordMark},
    surface::{ElementId, Panel, Surface},
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

pub fn draw<R: Rng, C: Clock>(app: &App<R, C>, f: &mut Frame) {
    f.render_widget(app, f.area());
}

fn word_style(mark: WordMark) -> Style {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let style = match mark.class {
        Classification::Correct => bold.fg(Color::Green),
        Classification::Incorrect => bold.fg(Color::Red),
        Classification::Partial => bold.fg(Color::Yellow),
        Classification::Unmarked => bold.add_modifier(Modifier::DIM),
    };

    if mark.current {
        style.add_modifier(Modifier::UNDERLINED)
    } else {
        style
    }
}

fn button_span(label: &str, enabled: Option<bool>) -> Option<Span<'static>> {
    let style = match enabled? {
        true => Style::default().add_modifier(Modifier::BOLD),
        false => Style::default().add_modifier(Modifier::DIM),
    };
    Some(Span::styled(format!(" {label} "), style))
}

fn selector_line(panel: &Panel) -> Option<Line<'static>> {
    let selector = panel.selector()?;
    let mut spans = vec![Span::raw("difficulty ")];
    for (idx, option) in selector.options.iter().enumerate() {
        let style = if idx == selector.selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        spans.push(Span::styled(format!(" {} ", option.label), style));
    }
    Some(Line::from(spans))
}

fn sample_line(panel: &Panel) -> Line<'static> {
    let mut spans = Vec::with_capacity(panel.words().len() * 2);
    for (idx, word) in panel.words().iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(word.text.clone(), word_style(word.mark)));
    }
    Line::from(spans)
}

/// Rows a word-wrapped paragraph of `widths` needs at `max` columns.
/// Words wider than a row are broken across rows.
fn wrapped_rows(widths: impl IntoIterator<Item = usize>, max: usize) -> u16 {
    let max = max.max(1);
    let mut rows = 1usize;
    let mut line = 0usize;

    for width in widths {
        let needed = if line == 0 { width } else { line + 1 + width };
        if needed <= max {
            line = needed;
            continue;
        }
        if line > 0 {
            rows += 1;
        }
        rows += width.saturating_sub(1) / max;
        line = width - width.saturating_sub(1) / max * max;
    }

    rows.min(u16::MAX as usize) as u16
}

/// Keep the end of `text` that fits in `max` columns.
fn visible_tail(text: &str, max: usize) -> &str {
    let mut used = 0;
    for (idx, c) in text.char_indices().rev() {
        used += c.width().unwrap_or(0);
        if used > max {
            return &text[idx + c.len_utf8()..];
        }
    }
    text
}

fn input_line(panel: &Panel, width: u16) -> Option<Line<'static>> {
    let input = panel.input_box()?;
    let text = input.text.replace(|c: char| c.is_control(), "\u{FFFD}");
    // prompt and cursor take three columns
    let shown = visible_tail(&text, (width as usize).saturating_sub(3)).to_string();
    let cursor_style = if input.focused {
        Style::default().add_modifier(Modifier::SLOW_BLINK)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };

    Some(Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Magenta)),
        Span::raw(shown),
        Span::styled("█", cursor_style),
    ]))
}

fn metrics_line(panel: &Panel, running_secs: Option<f64>) -> Line<'static> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();

    if let Some(time) = panel.text(ElementId::Time) {
        spans.push(Span::styled(format!("{time} s"), bold));
        spans.push(Span::raw("   "));
    }
    if let Some(wpm) = panel.text(ElementId::Wpm) {
        spans.push(Span::styled(format!("{wpm} wpm"), bold));
        spans.push(Span::raw("   "));
    }
    if let Some(level) = panel.text(ElementId::Level).filter(|l| !l.is_empty()) {
        spans.push(Span::styled(
            format!("level {level}"),
            Style::default().fg(Color::Cyan),
        ));
    }
    if let Some(secs) = running_secs {
        spans.push(Span::styled(
            format!("   ● running {secs:.1}s"),
            Style::default().fg(Color::Yellow),
        ));
    }

    Line::from(spans)
}

fn buttons_line(panel: &Panel) -> Line<'static> {
    let spans: Vec<Span> = [
        button_span("(ctrl-s) start", panel.is_enabled(ElementId::StartButton)),
        button_span("(enter) stop", panel.is_enabled(ElementId::StopButton)),
        panel
            .has(ElementId::RetryButton)
            .then(|| button_span("(ctrl-r) retry", Some(true)))
            .flatten(),
    ]
    .into_iter()
    .flatten()
    .collect();

    Line::from(spans)
}

impl<R: Rng, C: Clock> Widget for &App<R, C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let panel = self.panel();
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let mut sample_lines = wrapped_rows(
            panel.words().iter().map(|w| w.text.width()),
            max_chars_per_line as usize,
        );
        // one spare row for wrapped samples
        if sample_lines > 1 {
            sample_lines = sample_lines.saturating_add(1);
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints(
                [
                    Constraint::Length(1),            // difficulty selector
                    Constraint::Min(1),               // top padding
                    Constraint::Length(sample_lines), // sample
                    Constraint::Length(1),            // padding
                    Constraint::Length(1),            // user input
                    Constraint::Min(1),               // bottom padding
                    Constraint::Length(1),            // time / wpm / level
                    Constraint::Length(1),            // buttons
                    Constraint::Length(1),            // legend
                ]
                .as_ref(),
            )
            .split(area);

        if let Some(line) = selector_line(panel) {
            Paragraph::new(line).render(chunks[0], buf);
        }

        if panel.has(ElementId::SampleText) {
            Paragraph::new(sample_line(panel))
                .alignment(if sample_lines == 1 {
                    Alignment::Center
                } else {
                    Alignment::Left
                })
                .wrap(Wrap { trim: true })
                .render(chunks[2], buf);
        }

        if let Some(line) = input_line(panel, chunks[4].width) {
            Paragraph::new(line)
                .alignment(Alignment::Center)
                .render(chunks[4], buf);
        }

        let running_secs = self.controller.elapsed().map(|d| d.as_secs_f64());
        Paragraph::new(metrics_line(panel, running_secs))
            .alignment(Alignment::Center)
            .render(chunks[6], buf);

        Paragraph::new(buttons_line(panel))
            .alignment(Alignment::Center)
            .render(chunks[7], buf);

        Paragraph::new(Span::styled(
            "(tab) difficulty / (esc)ape",
            italic_style,
        ))
        .render(chunks[8], buf);
    }
}
