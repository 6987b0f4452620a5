// End-to-end checks of the session state machine through the library API,
// without any terminal or runtime involved.

use std::time::Duration;

use retype::buffer::{Expected, TextBuffer};
use retype::metrics::Summary;
use retype::session::{Applied, KeyPress, Mark, Outcome, Session};

fn buffer(lines: &[&str], tab_width: usize) -> TextBuffer {
    TextBuffer::new(lines.iter().map(|s| s.to_string()).collect(), tab_width).unwrap()
}

fn type_line(session: &mut Session, text: &str, press_enter: bool) {
    for c in text.chars() {
        session.apply(KeyPress::Char(c));
    }
    if press_enter {
        session.apply(KeyPress::Enter);
    }
}

#[test]
fn full_session_over_two_pages() {
    let mut session = Session::new(buffer(&["one", "two", "three", "four", "five"], 4), 2);

    type_line(&mut session, "one", true);
    type_line(&mut session, "two", true);
    assert!(session.end_of_page());
    assert!(!session.at_buffer_end());
    assert_eq!(session.cursor(), (2, 0));

    session.advance_page(2);
    assert_eq!(session.page(), (2, 4));
    type_line(&mut session, "three", true);
    type_line(&mut session, "four", true);
    assert!(session.end_of_page());

    session.advance_page(2);
    assert_eq!(session.page(), (4, 5));
    type_line(&mut session, "five", false);

    assert!(session.at_buffer_end());
    assert!(session.end_of_page());
    assert!(session.pages_remaining());

    // 19 characters plus 4 line ends, all correct
    assert_eq!(session.correct(), 23);
    assert_eq!(session.wrong(), 0);
    assert_eq!(session.ignore(), 0);
}

#[test]
fn counters_are_monotonic_under_heavy_correction() {
    let mut session = Session::new(buffer(&["abc", "def"], 4), 10);
    let keys = [
        KeyPress::Char('a'),
        KeyPress::Char('x'),
        KeyPress::Backspace,
        KeyPress::Backspace,
        KeyPress::Backspace, // page start, no-op
        KeyPress::Char('a'),
        KeyPress::Char('b'),
        KeyPress::Char('c'),
        KeyPress::Enter,
        KeyPress::Backspace,
        KeyPress::Enter,
        KeyPress::Char('d'),
    ];

    let (mut last_correct, mut last_wrong) = (0, 0);
    for key in keys {
        session.apply(key);
        assert!(session.correct() >= last_correct);
        assert!(session.wrong() >= last_wrong);
        last_correct = session.correct();
        last_wrong = session.wrong();

        let (line, index) = session.cursor();
        assert!(line < session.buffer().line_count());
        assert!(index <= session.buffer().line_len(line));
    }
}

#[test]
fn tab_key_scores_expanded_spaces_independently() {
    let mut session = Session::new(buffer(&["    x"], 4), 10);

    assert_eq!(session.apply(KeyPress::Tab), Applied::ExpandTab(4));
    for _ in 0..4 {
        assert_eq!(
            session.apply(KeyPress::Char(' ')),
            Applied::Scored(Outcome::Correct)
        );
    }
    assert_eq!(session.correct(), 4);
    session.apply(KeyPress::Char('x'));
    assert!(session.at_buffer_end());
    assert_eq!(session.correct(), 5);
}

#[test]
fn tabs_in_source_lines_are_expanded_on_load() {
    let buf = buffer(&["\tindent"], 4);
    assert_eq!(buf.line(0), "    indent");
    assert_eq!(buf.expected(0, 0), Expected::Char(' '));
    assert_eq!(buf.expected(0, 4), Expected::Char('i'));
}

#[test]
fn accuracy_and_speed_from_session_counters() {
    let mut session = Session::new(buffer(&["aaaaaaaaaa"], 4), 10);
    for c in "aaaaaaaaxx".chars() {
        session.apply(KeyPress::Char(c));
    }
    assert_eq!(session.correct(), 8);
    assert_eq!(session.wrong(), 2);

    let summary =
        Summary::compute(session.correct(), session.wrong(), Duration::from_secs(60)).unwrap();
    assert_eq!(summary.accuracy, 0.8);
    assert_eq!(summary.wpm, 2.0);
}

#[test]
fn page_repaint_state_matches_history() {
    let mut session = Session::new(buffer(&["ok", "no"], 4), 10);
    session.apply(KeyPress::Char('o'));
    session.apply(KeyPress::Char('x'));
    session.apply(KeyPress::Enter);

    assert_eq!(session.mark_at(0, 0), Mark::Correct { at_eol: false });
    assert_eq!(session.mark_at(0, 1), Mark::Wrong { at_eol: false });
    assert_eq!(session.mark_at(0, 2), Mark::Correct { at_eol: true });
    assert_eq!(session.mark_at(1, 0), Mark::Cursor);
    assert_eq!(session.mark_at(1, 1), Mark::Normal);
}

#[test]
fn escape_first_key_leaves_no_metrics() {
    let mut session = Session::new(buffer(&["text"], 4), 10);
    assert_eq!(session.apply(KeyPress::Escape), Applied::Aborted);
    assert!(
        Summary::compute(session.correct(), session.wrong(), Duration::from_secs(3)).is_none()
    );
}
