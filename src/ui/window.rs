//! The window the session draws into and polls for input

use crate::keyboard::InputEvent;
use anyhow::Result;
use log::error;
use std::ops::{Deref, DerefMut};

/// What one frame shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Verifier name
    pub title: String,
    /// Instructions for the operator
    pub question: String,
    pub checks_passed: u32,
    pub number_of_checks: u32,
}

impl Prompt {
    pub fn progress(&self) -> String {
        format!("Checks passed: {}/{}", self.checks_passed, self.number_of_checks)
    }
}

/// Window lifecycle, drawing and input dispatch
pub trait Window {
    fn set_visible(&mut self, visible: bool) -> Result<()>;

    /// Clear the frame, draw the prompt and present it
    fn draw(&mut self, prompt: &Prompt) -> Result<()>;

    /// Deliver pending input to `handler`, one event at a time
    fn dispatch_events(&mut self, handler: &mut dyn FnMut(InputEvent)) -> Result<()>;

    /// Whether the operator asked to leave (Escape, close, signal)
    fn has_exit(&self) -> bool;

    fn close(&mut self) -> Result<()>;
}

/// Closes the wrapped window when dropped, unless already closed
pub struct WindowGuard<'a, W: Window> {
    window: &'a mut W,
    closed: bool,
}

impl<'a, W: Window> WindowGuard<'a, W> {
    pub fn new(window: &'a mut W) -> Self {
        Self {
            window,
            closed: false,
        }
    }

    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.window.close()
    }
}

impl<W: Window> Deref for WindowGuard<'_, W> {
    type Target = W;

    fn deref(&self) -> &W {
        self.window
    }
}

impl<W: Window> DerefMut for WindowGuard<'_, W> {
    fn deref_mut(&mut self) -> &mut W {
        self.window
    }
}

impl<W: Window> Drop for WindowGuard<'_, W> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            error!("Failed to close window: {:#}", e);
        }
    }
}
