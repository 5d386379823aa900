//! Text rendering of the display model.

use client_core::projection::{DisplayModel, Panel};

use std::fmt::Write;

const EMPTY_SCREEN: &str = "(nothing to show yet, type /init)";

/// Render every visible panel, in fixed order, under its own heading.
pub fn render(display: &DisplayModel) -> String {
    let mut out = String::new();

    for (title, panel) in [
        ("Node", &display.node_identity),
        ("Connections", &display.connections),
        ("Messages", &display.messages),
    ] {
        write_panel(&mut out, title, panel);
    }

    if out.is_empty() {
        out.push_str(EMPTY_SCREEN);
        out.push('\n');
    }

    out
}

fn write_panel(out: &mut String, title: &str, panel: &Panel) {
    if !panel.visible {
        return;
    }

    // Writing to a String cannot fail.
    let _ = writeln!(out, "== {title} ==");
    for line in &panel.lines {
        let _ = writeln!(out, "  {line}");
    }
}
