mod logging;
mod renderer;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use camline_core::svg::render_svg;
use camline_core::{Clock, Input, SystemClock, Timeline, TimelineConfig, parse_feed};
use camline_protocol::{Point, Viewport};
use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
};

use crate::logging::{LoggingConfig, init_logging};
use crate::renderer::TerminalSession;

const USAGE: &str = "Usage: camline [feed.json] [--config <config.json>] [--svg <out.svg>] [--log-file <path>]";
/// Width of the exported SVG, in pixels.
const SVG_WIDTH: f64 = 1120.0;
const FRAME_POLL: Duration = Duration::from_millis(100);

#[derive(Debug, Default)]
struct Args {
    feed: Option<PathBuf>,
    config: Option<PathBuf>,
    svg: Option<PathBuf>,
    log_file: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .map(PathBuf::from)
                .with_context(|| format!("{name} needs a path\n{USAGE}"))
        };
        match arg.as_str() {
            "--config" => args.config = Some(value("--config")?),
            "--svg" => args.svg = Some(value("--svg")?),
            "--log-file" => args.log_file = Some(value("--log-file")?),
            "-h" | "--help" => bail!("{USAGE}"),
            flag if flag.starts_with("--") => bail!("unknown option {flag}\n{USAGE}"),
            _ if args.feed.is_none() => args.feed = Some(PathBuf::from(&arg)),
            _ => bail!("more than one feed given\n{USAGE}"),
        }
    }
    Ok(args)
}

/// Layout metrics in character cells.
fn terminal_config() -> TimelineConfig {
    TimelineConfig {
        toolbar_height: 1.0,
        header_height: 3.0,
        row_height: 3.0,
        label_width: 16.0,
        char_width: 1.0,
        font_size: 1.0,
        ..TimelineConfig::default()
    }
}

/// Overlay a JSON config file onto `base`, so a file only needs the fields it
/// changes.
fn load_config(path: Option<&Path>, base: TimelineConfig) -> Result<TimelineConfig> {
    let Some(path) = path else {
        return Ok(base);
    };
    let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let overrides: serde_json::Value =
        serde_json::from_slice(&data).with_context(|| format!("parsing {}", path.display()))?;
    let serde_json::Value::Object(fields) = overrides else {
        bail!("{} must contain a JSON object", path.display());
    };
    let mut merged = serde_json::to_value(base)?;
    if let Some(target) = merged.as_object_mut() {
        target.extend(fields);
    }
    let config = TimelineConfig::from_json(&serde_json::to_vec(&merged)?)
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = parse_args()?;

    let log_file = args
        .log_file
        .as_deref()
        .map(File::create)
        .transpose()
        .context("opening log file")?;
    let interactive = args.svg.is_none();
    init_logging(LoggingConfig {
        // Nothing may write to the terminal while the UI owns it.
        env_filter: (interactive && log_file.is_none()).then(|| "off".to_string()),
        file: log_file,
        ..LoggingConfig::default()
    });

    let data = match &args.feed {
        Some(path) => std::fs::read(path).with_context(|| format!("reading {}", path.display()))?,
        None => camline_core::DEMO_FEED.to_vec(),
    };
    let session = parse_feed(&data).context("invalid feed")?;
    log::info!("loaded {} cameras, {} events", session.len(), session.events().len());

    match &args.svg {
        Some(out) => {
            let config = load_config(args.config.as_deref(), TimelineConfig::default())?;
            export_svg(Timeline::new(session, config)?, out)
        }
        None => {
            let config = load_config(args.config.as_deref(), terminal_config())?;
            run(Timeline::new(session, config)?)
        }
    }
}

fn export_svg(mut timeline: Timeline, out: &Path) -> Result<()> {
    let height = timeline.content_height();
    timeline.set_viewport(Viewport::new(SVG_WIDTH, height));
    timeline.handle(Input::ClockTick(SystemClock.now()), Duration::ZERO);
    let svg = render_svg(&timeline.render(), SVG_WIDTH, height, true);
    std::fs::write(out, svg).with_context(|| format!("writing {}", out.display()))?;
    log::info!("wrote {}", out.display());
    Ok(())
}

fn run(mut timeline: Timeline) -> Result<()> {
    let mut tty = TerminalSession::new()?;
    let clock = SystemClock;
    let origin = Instant::now();
    timeline.start_clock(Duration::ZERO);

    loop {
        let now = origin.elapsed();
        timeline.poll_clock(now, &clock);

        let size = tty.terminal.size()?;
        let content = Rect::new(0, 0, size.width, size.height.saturating_sub(1));
        timeline.set_viewport(Viewport::new(
            f64::from(content.width),
            f64::from(content.height),
        ));
        let commands = timeline.render();

        tty.terminal.draw(|frame| {
            let area = frame.area();
            renderer::paint(frame.buffer_mut(), content, &commands);

            let status_area = Rect::new(0, area.height.saturating_sub(1), area.width, 1);
            let status = Block::default()
                .borders(Borders::NONE)
                .title(format!(
                    " camline | {} cameras | drag to scrub | ctrl+wheel or +/- zoom | ←→ scroll | q quit ",
                    timeline.session().len()
                ))
                .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(status, status_area);
        })?;

        let wait = timeline
            .ticker()
            .next_due()
            .map_or(FRAME_POLL, |due| due.saturating_sub(origin.elapsed()))
            .min(FRAME_POLL);
        if !event::poll(wait)? {
            continue;
        }
        let now = origin.elapsed();
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let page = timeline.layout().rows.w / 10.0;
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('+') | KeyCode::Char('=') => {
                        timeline.handle(Input::ZoomIn, now);
                    }
                    KeyCode::Char('-') => {
                        timeline.handle(Input::ZoomOut, now);
                    }
                    KeyCode::Left => {
                        timeline.scroll_by(-page, now);
                    }
                    KeyCode::Right => {
                        timeline.scroll_by(page, now);
                    }
                    KeyCode::Home => {
                        timeline.handle(Input::Scroll { offset: 0.0 }, now);
                    }
                    KeyCode::End => {
                        let offset = timeline.max_scroll();
                        timeline.handle(Input::Scroll { offset }, now);
                    }
                    _ => {}
                }
            }
            Event::Mouse(mouse) => handle_mouse(&mut timeline, mouse, content, now),
            Event::FocusLost => {
                timeline.handle(Input::PointerLeave, now);
            }
            _ => {}
        }
    }

    Ok(())
}

/// Feed one mouse event to the timeline drawn in `content`. A drag that
/// leaves `content` ends the scrub.
fn handle_mouse(timeline: &mut Timeline, mouse: MouseEvent, content: Rect, now: Duration) {
    // Aim at the cell center.
    let x = f64::from(mouse.column) + 0.5;
    let y = f64::from(mouse.row) + 0.5;
    let zoom_modifier = mouse
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER);
    let notch = timeline.layout().rows.w / 20.0;

    let update = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => timeline.pointer_down(Point::new(x, y), now),
        MouseEventKind::Drag(MouseButton::Left)
            if !content.contains(Position::new(mouse.column, mouse.row)) =>
        {
            timeline.handle(Input::PointerLeave, now)
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            timeline.handle(Input::PointerMove { client_x: x }, now)
        }
        MouseEventKind::Up(MouseButton::Left) => timeline.handle(Input::PointerUp, now),
        MouseEventKind::ScrollUp | MouseEventKind::ScrollDown if zoom_modifier => {
            let delta_y = if mouse.kind == MouseEventKind::ScrollDown {
                1.0
            } else {
                -1.0
            };
            timeline.handle(
                Input::Wheel {
                    delta_y,
                    zoom_modifier,
                },
                now,
            )
        }
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => timeline.scroll_by(-notch, now),
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => timeline.scroll_by(notch, now),
        _ => return,
    };
    if let Some(state) = update.transition {
        log::debug!("pointer {:?} -> {state:?}", mouse.kind);
    }
}

#[cfg(test)]
mod tests {
    use camline_core::InteractionState;

    use super::*;

    /// 80x24 terminal; the last row is the status bar.
    const CONTENT: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 23,
    };

    fn send(timeline: &mut Timeline, kind: MouseEventKind, column: u16, row: u16) {
        let mouse = MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(timeline, mouse, CONTENT, Duration::ZERO);
    }

    #[test]
    fn drag_past_the_widget_ends_the_scrub() {
        let session = parse_feed(camline_core::DEMO_FEED).unwrap();
        let mut timeline = Timeline::new(session, terminal_config()).unwrap();
        timeline.set_viewport(Viewport::new(80.0, 23.0));
        let drag = MouseEventKind::Drag(MouseButton::Left);

        send(&mut timeline, MouseEventKind::Down(MouseButton::Left), 40, 5);
        assert_eq!(timeline.state(), InteractionState::Dragging);

        send(&mut timeline, drag, 50, 22);
        assert_eq!(timeline.state(), InteractionState::Dragging);

        let before = timeline.position();
        send(&mut timeline, drag, 70, 23);
        assert_eq!(timeline.state(), InteractionState::Idle);
        assert_eq!(timeline.position(), before);
    }

    fn write_config(name: &str, body: &str) -> PathBuf {
        let file = format!("camline-{}-{name}.json", std::process::id());
        let path = std::env::temp_dir().join(file);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn config_overlay_keeps_terminal_metrics() {
        let path = write_config("overlay", r#"{"initial_zoom": 4}"#);
        let config = load_config(Some(&path), terminal_config()).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.row_height, 3.0);
        assert_eq!(config.initial_zoom.get(), 4);
    }

    #[test]
    fn config_overlay_must_be_an_object() {
        let path = write_config("array", "[1, 2]");
        let result = load_config(Some(&path), terminal_config());
        std::fs::remove_file(&path).unwrap();
        let Err(err) = result else {
            panic!("array config accepted");
        };
        assert!(err.to_string().contains("must contain a JSON object"), "{err}");
    }
}
