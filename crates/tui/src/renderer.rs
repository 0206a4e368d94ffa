use std::io::{Stdout, stdout};

use anyhow::Result;
use camline_protocol::{Icon, RenderCommand, TextAlign, ThemeToken};
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::Color,
};

fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::Background => Color::Black,
        ThemeToken::Border => Color::DarkGray,
        ThemeToken::ToolbarText => Color::White,
        ThemeToken::ToolbarMuted => Color::DarkGray,
        ThemeToken::ButtonBackground => Color::Rgb(40, 40, 40),
        ThemeToken::ButtonDisabled => Color::Rgb(20, 20, 20),
        ThemeToken::CameraLabelText => Color::White,
        ThemeToken::RowBackground => Color::Rgb(16, 16, 16),
        ThemeToken::RowSelected => Color::Rgb(34, 35, 34),
        ThemeToken::TickMajor => Color::Gray,
        ThemeToken::TickMinor => Color::DarkGray,
        ThemeToken::TickLabel => Color::Gray,
        ThemeToken::CursorLine | ThemeToken::CursorBadge => Color::Yellow,
        ThemeToken::CursorBadgeText => Color::Black,
        ThemeToken::EventUnauthorisedAccess => Color::Rgb(234, 88, 12),
        ThemeToken::EventFaceRecognised => Color::Rgb(37, 99, 235),
        ThemeToken::EventTrafficCongestion => Color::Rgb(13, 148, 136),
        ThemeToken::EventMultiple => Color::Rgb(75, 85, 99),
        ThemeToken::EventText => Color::White,
        ThemeToken::EventTimeText => Color::Gray,
    }
}

fn icon_char(icon: Icon) -> char {
    match icon {
        Icon::Camera => '▣',
        Icon::Lock => '⊘',
        Icon::Person => '☺',
        Icon::Vehicle => '⛟',
        Icon::Overflow => '▲',
    }
}

/// Raw mode, alternate screen, mouse capture and focus reporting for as long
/// as it lives.
pub struct TerminalSession {
    pub terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        if let Err(e) = execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange
        ) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableFocusChange
        );
        let _ = self.terminal.show_cursor();
    }
}

/// Paint render commands into `area`, one logical unit per cell.
pub fn paint(buf: &mut Buffer, area: Rect, commands: &[RenderCommand]) {
    let mut clips: Vec<Rect> = Vec::new();

    for cmd in commands {
        let clip = clips.last().copied().unwrap_or(area);
        match cmd {
            RenderCommand::DrawRect { rect, color, .. } => {
                let cells = to_cells(area, rect.x, rect.y, rect.w, rect.h).intersection(clip);
                let bg = theme_to_color(*color);
                for y in cells.top()..cells.bottom() {
                    for x in cells.left()..cells.right() {
                        if let Some(cell) = buf.cell_mut((x, y)) {
                            cell.set_char(' ').set_bg(bg);
                        }
                    }
                }
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                align,
                ..
            } => {
                let len = text.chars().count() as f64;
                let start = match align {
                    TextAlign::Left => position.x,
                    TextAlign::Center => position.x - len / 2.0,
                    TextAlign::Right => position.x - len,
                };
                let fg = theme_to_color(*color);
                for (i, ch) in text.chars().enumerate() {
                    put(buf, area, clip, start + i as f64, position.y, ch, fg);
                }
            }
            RenderCommand::DrawLine {
                from, to, color, ..
            } => {
                let fg = theme_to_color(*color);
                if (from.x - to.x).abs() < 1.0 {
                    let (top, bottom) = (from.y.min(to.y), from.y.max(to.y));
                    let mut y = top.floor();
                    while y < bottom {
                        put(buf, area, clip, from.x, y, '│', fg);
                        y += 1.0;
                    }
                } else {
                    let (left, right) = (from.x.min(to.x), from.x.max(to.x));
                    let mut x = left.floor();
                    while x < right {
                        put(buf, area, clip, x, from.y, '─', fg);
                        x += 1.0;
                    }
                }
            }
            RenderCommand::DrawIcon {
                position,
                icon,
                color,
                ..
            } => {
                let fg = theme_to_color(*color);
                put(buf, area, clip, position.x, position.y, icon_char(*icon), fg);
            }
            RenderCommand::SetClip { rect } => {
                clips.push(to_cells(area, rect.x, rect.y, rect.w, rect.h).intersection(clip));
            }
            RenderCommand::ClearClip => {
                clips.pop();
            }
            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
        }
    }
}

/// Snap a logical rectangle to whole cells inside `area`.
fn to_cells(area: Rect, x: f64, y: f64, w: f64, h: f64) -> Rect {
    let left = x.round().max(0.0);
    let top = y.round().max(0.0);
    let right = (x + w).round().max(left + 1.0);
    let bottom = (y + h).round().max(top + 1.0);
    let cell = |v: f64| v.min(f64::from(u16::MAX)) as u16;
    Rect::new(
        area.x.saturating_add(cell(left)),
        area.y.saturating_add(cell(top)),
        cell(right - left),
        cell(bottom - top),
    )
    .intersection(area)
}

fn put(buf: &mut Buffer, area: Rect, clip: Rect, x: f64, y: f64, ch: char, fg: Color) {
    if !(x.is_finite() && y.is_finite()) || x < 0.0 || y < 0.0 {
        return;
    }
    let col = area.x.saturating_add(x.floor().min(f64::from(u16::MAX)) as u16);
    let row = area.y.saturating_add(y.floor().min(f64::from(u16::MAX)) as u16);
    let inside =
        col >= clip.left() && col < clip.right() && row >= clip.top() && row < clip.bottom();
    if !inside {
        return;
    }
    if let Some(cell) = buf.cell_mut((col, row)) {
        cell.set_char(ch).set_fg(fg);
    }
}
