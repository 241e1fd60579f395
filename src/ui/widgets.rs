//! Custom TUI widgets

use super::theme::ThemeColors;
use super::window::Prompt;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};

/// Widget for the operator prompt
pub struct PromptPanel<'a> {
    prompt: &'a Prompt,
    colors: &'a ThemeColors,
    notice: Option<&'a str>,
}

impl<'a> PromptPanel<'a> {
    pub fn new(prompt: &'a Prompt, colors: &'a ThemeColors) -> Self {
        Self {
            prompt,
            colors,
            notice: None,
        }
    }

    pub fn notice(mut self, notice: Option<&'a str>) -> Self {
        self.notice = notice;
        self
    }
}

impl Widget for PromptPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let base = Style::default().bg(self.colors.bg).fg(self.colors.fg);
        buf.set_style(area, base);

        let block = Block::default()
            .title(format!(" {} ", self.prompt.title))
            .borders(Borders::ALL)
            .border_style(base.fg(self.colors.accent));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let bottom = inner.y + inner.height - 1;
        for (i, line) in self.prompt.question.lines().enumerate() {
            let y = inner.y + i as u16;
            if y >= bottom {
                break;
            }
            let style = if line.starts_with("Press Esc") {
                base.fg(self.colors.dim)
            } else {
                base.add_modifier(Modifier::BOLD)
            };
            buf.set_stringn(inner.x + 1, y, line, inner.width.saturating_sub(1) as usize, style);
        }

        if let Some(notice) = self.notice {
            if inner.height > 1 {
                buf.set_stringn(
                    inner.x + 1,
                    bottom - 1,
                    notice,
                    inner.width.saturating_sub(1) as usize,
                    base.fg(self.colors.warning),
                );
            }
        }

        buf.set_stringn(
            inner.x + 1,
            bottom,
            self.prompt.progress(),
            inner.width.saturating_sub(1) as usize,
            base.fg(self.colors.dim),
        );
    }
}
