//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.

use std::fmt::Write as _;

use camline_protocol::{Icon, RenderCommand, TextAlign, ThemeToken};

/// Open `<g>` elements, innermost last.
enum Open {
    Group,
    Clip,
}

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the SVG viewBox dimensions.
/// `dark` selects the color palette.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64, dark: bool) -> String {
    let mut svg = String::with_capacity(commands.len() * 160);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif">"#,
    );
    let _ = write!(
        svg,
        r#"<rect width="{width}" height="{height}" fill="{}"/>"#,
        resolve_color(ThemeToken::Background, dark),
    );

    let mut open: Vec<Open> = Vec::new();
    let mut clip_count = 0usize;

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                label,
                event_id,
            } => {
                let fill = resolve_color(*color, dark);
                let _ = write!(
                    svg,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}""#,
                    rect.x, rect.y, rect.w, rect.h,
                );
                if let Some(border) = border_color {
                    let _ = write!(svg, r#" stroke="{}""#, resolve_color(*border, dark));
                }
                if let Some(id) = event_id {
                    let _ = write!(svg, r#" rx="3" data-event="{id}""#);
                }
                svg.push('>');
                if let Some(label) = label {
                    let _ = write!(svg, "<title>{}</title>", escape_xml(label));
                }
                svg.push_str("</rect>");
            }
            RenderCommand::DrawLine {
                from,
                to,
                color,
                width: line_width,
            } => {
                let stroke = resolve_color(*color, dark);
                let _ = write!(
                    svg,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{stroke}" stroke-width="{line_width}"/>"#,
                    from.x, from.y, to.x, to.y,
                );
            }
            RenderCommand::DrawText {
                text,
                position,
                color,
                font_size,
                align,
            } => {
                let fill = resolve_color(*color, dark);
                let _ = write!(
                    svg,
                    r#"<text x="{}" y="{}" fill="{fill}" font-size="{font_size}" text-anchor="{}" dominant-baseline="middle">{}</text>"#,
                    position.x,
                    position.y,
                    anchor(*align),
                    escape_xml(text),
                );
            }
            RenderCommand::DrawIcon {
                position,
                icon,
                color,
                size,
            } => {
                let fill = resolve_color(*color, dark);
                let _ = write!(
                    svg,
                    r#"<text x="{}" y="{}" fill="{fill}" font-size="{size}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
                    position.x + size / 2.0,
                    position.y + size / 2.0,
                    icon_glyph(*icon),
                );
            }
            RenderCommand::SetClip { rect } => {
                clip_count += 1;
                let _ = write!(
                    svg,
                    r#"<clipPath id="clip{clip_count}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath><g clip-path="url(#clip{clip_count})">"#,
                    rect.x, rect.y, rect.w, rect.h,
                );
                open.push(Open::Clip);
            }
            RenderCommand::ClearClip => {
                if matches!(open.last(), Some(Open::Clip)) {
                    open.pop();
                    svg.push_str("</g>");
                }
            }
            RenderCommand::BeginGroup { id, label } => {
                let _ = write!(svg, r#"<g id="{}">"#, escape_xml(id));
                if let Some(label) = label {
                    let _ = write!(svg, "<title>{}</title>", escape_xml(label));
                }
                open.push(Open::Group);
            }
            RenderCommand::EndGroup => {
                // Closes any clip left open inside the group as well.
                while let Some(top) = open.pop() {
                    svg.push_str("</g>");
                    if matches!(top, Open::Group) {
                        break;
                    }
                }
            }
        }
    }

    for _ in open {
        svg.push_str("</g>");
    }
    svg.push_str("</svg>");
    svg
}

fn anchor(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "start",
        TextAlign::Center => "middle",
        TextAlign::Right => "end",
    }
}

fn icon_glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::Camera => "\u{25A3}",
        Icon::Lock => "\u{1F512}",
        Icon::Person => "\u{263A}",
        Icon::Vehicle => "\u{26DF}",
        Icon::Overflow => "\u{26A0}",
    }
}

fn resolve_color(token: ThemeToken, dark: bool) -> &'static str {
    if dark {
        match token {
            ThemeToken::Background => "#111827",
            ThemeToken::Border => "#374151",
            ThemeToken::ToolbarText | ThemeToken::CameraLabelText | ThemeToken::TickLabel => {
                "#e5e7eb"
            }
            ThemeToken::ToolbarMuted | ThemeToken::ButtonDisabled => "#6b7280",
            ThemeToken::ButtonBackground => "#1f2937",
            ThemeToken::RowBackground => "#161e2e",
            ThemeToken::RowSelected => "#1e3a5f",
            ThemeToken::TickMajor => "#9ca3af",
            ThemeToken::TickMinor => "#4b5563",
            ThemeToken::CursorLine | ThemeToken::CursorBadge => "#facc15",
            ThemeToken::CursorBadgeText => "#111827",
            ThemeToken::EventUnauthorisedAccess => "#ea580c",
            ThemeToken::EventFaceRecognised => "#2563eb",
            ThemeToken::EventTrafficCongestion => "#0d9488",
            ThemeToken::EventMultiple => "#4b5563",
            ThemeToken::EventText => "#ffffff",
            ThemeToken::EventTimeText => "#e5e7eb",
        }
    } else {
        match token {
            ThemeToken::Background => "#ffffff",
            ThemeToken::Border => "#e5e7eb",
            ThemeToken::ToolbarText | ThemeToken::CameraLabelText | ThemeToken::TickLabel => {
                "#1f2937"
            }
            ThemeToken::ToolbarMuted | ThemeToken::ButtonDisabled => "#9ca3af",
            ThemeToken::ButtonBackground => "#f3f4f6",
            ThemeToken::RowBackground => "#f9fafb",
            ThemeToken::RowSelected => "#dbeafe",
            ThemeToken::TickMajor => "#6b7280",
            ThemeToken::TickMinor => "#d1d5db",
            ThemeToken::CursorLine | ThemeToken::CursorBadge => "#eab308",
            ThemeToken::CursorBadgeText => "#111827",
            ThemeToken::EventUnauthorisedAccess => "#f97316",
            ThemeToken::EventFaceRecognised => "#3b82f6",
            ThemeToken::EventTrafficCongestion => "#14b8a6",
            ThemeToken::EventMultiple => "#6b7280",
            ThemeToken::EventText => "#ffffff",
            ThemeToken::EventTimeText => "#e5e7eb",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
