//! Terminal-backed window
//!
//! Press and release events need the kitty keyboard protocol; terminals
//! without it only ever report presses.

use super::theme::ThemeColors;
use super::widgets::PromptPanel;
use super::window::{Prompt, Window};
use crate::config::WindowConfig;
use crate::keyboard::{keymap, InputEvent, KeyCode, Modifiers};
use anyhow::Result;
use crossterm::{
    event::{
        self, Event, KeyCode as CtKeyCode, KeyEvent as CtKeyEvent, KeyEventKind, KeyEventState,
        KeyModifiers, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use log::{info, warn};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::Style,
    widgets::Block,
    Terminal,
};
use std::io::{stdout, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

const NO_RELEASE_NOTICE: &str = "Terminal reports no key releases";

/// Fixed-size prompt box in the alternate screen
pub struct TerminalWindow {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    width: u16,
    height: u16,
    tick: Duration,
    colors: ThemeColors,
    visible: bool,
    enhanced: bool,
    closed: bool,
    exit: Arc<AtomicBool>,
}

impl TerminalWindow {
    /// Take over the terminal. `exit` is shared with signal handlers; once
    /// set, [`Window::has_exit`] reports true.
    pub fn open(config: &WindowConfig, tick: Duration, exit: Arc<AtomicBool>) -> Result<Self> {
        enable_raw_mode()?;
        let mut out = stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen) {
            if let Err(restore) = disable_raw_mode() {
                warn!("Failed to leave raw mode: {}", restore);
            }
            return Err(e.into());
        }

        let enhanced = supports_keyboard_enhancement().unwrap_or_else(|e| {
            warn!("Keyboard enhancement query failed: {}", e);
            false
        });
        if enhanced {
            execute!(
                out,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                        | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
                        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                )
            )?;
        } else {
            warn!("Keyboard enhancement unsupported, release events will not arrive");
        }

        let terminal = Terminal::new(CrosstermBackend::new(out))?;
        info!(
            "Window opened ({}x{}, enhanced keyboard: {})",
            config.width, config.height, enhanced
        );

        Ok(Self {
            terminal,
            width: config.width,
            height: config.height,
            tick,
            colors: ThemeColors::from_theme(config.theme),
            visible: false,
            enhanced,
            closed: false,
            exit,
        })
    }
}

/// Turn one crossterm key event into harness events. Escape sets `exit`
/// and produces nothing.
fn translate(key: CtKeyEvent, exit: &AtomicBool, handler: &mut dyn FnMut(InputEvent)) {
    if key.code == CtKeyCode::Esc {
        if key.kind == KeyEventKind::Press {
            exit.store(true, Ordering::SeqCst);
        }
        return;
    }

    let symbol = KeyCode::from(key.code);
    let mut modifiers = Modifiers::from(key.modifiers);
    if implied_shift(&key) {
        modifiers |= Modifiers::SHIFT;
    }
    match key.kind {
        KeyEventKind::Press => {
            handler(InputEvent::press(symbol, modifiers));
            if let Some(text) = text_of(&key) {
                handler(InputEvent::Text(text));
            }
        }
        KeyEventKind::Release => handler(InputEvent::release(symbol, modifiers)),
        KeyEventKind::Repeat => {}
    }
}

/// With alternate key reporting the terminal sends the shifted character
/// and clears the Shift flag.
fn implied_shift(key: &CtKeyEvent) -> bool {
    match key.code {
        CtKeyCode::Char(c) if c.is_ascii_uppercase() => {
            !key.state.contains(KeyEventState::CAPS_LOCK)
        }
        CtKeyCode::Char(c) => keymap::is_shifted_symbol(c),
        _ => false,
    }
}

/// Text a key press produces, if any
fn text_of(key: &CtKeyEvent) -> Option<String> {
    let command = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER | KeyModifiers::META;
    match key.code {
        CtKeyCode::Char(c) if !c.is_control() && !key.modifiers.intersects(command) => {
            Some(c.to_string())
        }
        _ => None,
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

impl Window for TerminalWindow {
    fn set_visible(&mut self, visible: bool) -> Result<()> {
        self.visible = visible;
        self.terminal.clear()?;
        Ok(())
    }

    fn draw(&mut self, prompt: &Prompt) -> Result<()> {
        if !self.visible {
            return Ok(());
        }
        let colors = self.colors;
        let (width, height) = (self.width, self.height);
        let notice = (!self.enhanced).then_some(NO_RELEASE_NOTICE);

        self.terminal.draw(|frame| {
            let full = frame.area();
            frame.render_widget(Block::default().style(Style::default().bg(colors.bg)), full);
            let area = centered(full, width, height);
            frame.render_widget(PromptPanel::new(prompt, &colors).notice(notice), area);
        })?;
        Ok(())
    }

    fn dispatch_events(&mut self, handler: &mut dyn FnMut(InputEvent)) -> Result<()> {
        if !event::poll(self.tick)? {
            return Ok(());
        }
        loop {
            // Resize is ignored: the prompt box keeps its configured size.
            if let Event::Key(key) = event::read()? {
                translate(key, &self.exit, handler);
            }
            if !event::poll(Duration::ZERO)? {
                break;
            }
        }
        Ok(())
    }

    fn has_exit(&self) -> bool {
        self.exit.load(Ordering::SeqCst)
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        if self.enhanced {
            execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
        }
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        disable_raw_mode()?;
        self.terminal.show_cursor()?;
        info!("Window closed");
        Ok(())
    }
}
