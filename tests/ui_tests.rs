use hybrid_desk::catalog::QUICK_ACTIONS;
use hybrid_desk::display::DisplayEvent;
use hybrid_desk::ipc::DispatchOutcome;
use hybrid_desk::ui::{self, App};
use ratatui::{Terminal, backend::TestBackend};

/// Render the app to a test terminal and return the buffer, one string per row
fn render_rows(app: &mut App, width: u16, height: u16) -> Vec<String> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();

    terminal.draw(|f| ui::draw(f, app)).unwrap();

    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        })
        .collect()
}

fn screen(rows: &[String]) -> String {
    rows.join("\n")
}

#[test]
fn initial_screen_shows_connecting() {
    let mut app = App::new();
    let rows = render_rows(&mut app, 100, 12);

    assert!(rows[0].contains("Hybrid Desktop"));
    assert!(rows[1].contains("Connecting to backend..."));
    assert!(rows[11].contains("Select an app to launch"));
}

#[test]
fn every_quick_action_is_listed_in_order() {
    let mut app = App::new();
    let rows = render_rows(&mut app, 100, 12);

    for (index, action) in QUICK_ACTIONS.iter().enumerate() {
        let row = &rows[3 + index];
        assert!(row.contains(action.label), "row {index}: {row}");
        assert!(row.contains(action.category), "row {index}: {row}");
    }
    assert!(rows[3].starts_with("> "));
    assert!(rows[4].starts_with("  "));
}

#[test]
fn status_event_replaces_status_line() {
    let mut app = App::new();
    app.apply_display_event(DisplayEvent::Status("\u{1F50B} 87%   |   \u{1F4F6} HomeNet".into()));
    let text = screen(&render_rows(&mut app, 100, 12));

    assert!(text.contains("87%"));
    assert!(text.contains("HomeNet"));
    assert!(!text.contains("Connecting to backend..."));
}

#[test]
fn connect_error_is_shown() {
    let mut app = App::new();
    app.apply_display_event(DisplayEvent::ConnectError(
        "Unable to reach backend: Connection refused (os error 111)".into(),
    ));
    let rows = render_rows(&mut app, 100, 12);

    assert!(rows[1].contains("Unable to reach backend: Connection refused"));
}

#[test]
fn launch_feedback_in_footer() {
    let mut app = App::new();
    app.record_launch(&QUICK_ACTIONS[2], DispatchOutcome::Sent);
    let rows = render_rows(&mut app, 100, 12);

    assert!(rows[11].contains("Waveform Studio is launching..."), "{}", rows[11]);
}

#[test]
fn draw_records_click_regions() {
    let mut app = App::new();
    render_rows(&mut app, 100, 12);

    assert_eq!(app.regions.action_regions.len(), QUICK_ACTIONS.len());
    assert_eq!(app.regions.action_at(10, 3), Some(0));
    assert_eq!(app.regions.action_at(10, 6), Some(3));
    assert_eq!(app.regions.action_at(10, 1), None);
}

#[test]
fn small_terminal_clips_actions() {
    let mut app = App::new();
    render_rows(&mut app, 60, 6);

    // 3 rows of header, 1 footer, leaves room for two actions
    assert_eq!(app.regions.action_regions.len(), 2);
}
