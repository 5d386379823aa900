use crate::render::render;

use client_core::projection::{DisplayModel, Panel};

fn shown(lines: &[&str]) -> Panel {
    Panel {
        visible: true,
        lines: lines.iter().map(|line| line.to_string()).collect(),
    }
}

#[test]
fn given_empty_display_when_rendered_then_placeholder_only() {
    let screen = render(&DisplayModel::default());

    assert!(screen.contains("nothing to show yet"));
    assert!(!screen.contains("=="));
}

/// **VALUE**: Hidden panels leave no heading behind.
#[test]
fn given_hidden_connections_when_rendered_then_heading_absent() {
    // GIVEN: Identity and messages shown, roster empty
    let display = DisplayModel {
        node_identity: shown(&["node-abc"]),
        connections: Panel::default(),
        messages: shown(&["p1: hi"]),
    };

    // WHEN: Rendering
    let screen = render(&display);

    // THEN: Two panels in order, no connections heading
    assert_eq!(screen, "== Node ==\n  node-abc\n== Messages ==\n  p1: hi\n");
}
