//! Line editor tests

use policychat_cli::tui::screens::chat::LineEditor;

#[test]
fn test_insert_char() {
    let mut field = LineEditor::default();

    field.insert_char('H');
    field.insert_char('i');

    assert_eq!(field.text(), "Hi");
    assert_eq!(field.cursor(), 2);
}

#[test]
fn test_insert_in_middle() {
    let mut field = LineEditor::default();
    field.set("Hllo");
    field.move_home();
    field.move_right();

    field.insert_char('e');

    assert_eq!(field.text(), "Hello");
    assert_eq!(field.cursor(), 2);
}

#[test]
fn test_delete_char() {
    let mut field = LineEditor::default();
    field.set("Hello");

    field.delete_char();

    assert_eq!(field.text(), "Hell");
    assert_eq!(field.cursor(), 4);
}

#[test]
fn test_delete_char_at_start_is_noop() {
    let mut field = LineEditor::default();
    field.set("Hello");
    field.move_home();

    field.delete_char();

    assert_eq!(field.text(), "Hello");
    assert_eq!(field.cursor(), 0);
}

#[test]
fn test_delete_char_forward() {
    let mut field = LineEditor::default();
    field.set("Hello");
    field.move_home();

    field.delete_char_forward();
    assert_eq!(field.text(), "ello");

    field.move_end();
    field.delete_char_forward();
    assert_eq!(field.text(), "ello");
}

#[test]
fn test_multibyte_characters() {
    let mut field = LineEditor::default();
    field.set("cuti é");
    field.move_left();
    field.insert_char('ü');

    assert_eq!(field.text(), "cuti üé");
    field.move_end();
    field.delete_char();
    assert_eq!(field.text(), "cuti ü");
}

#[test]
fn test_cursor_stays_in_bounds() {
    let mut field = LineEditor::default();
    field.set("ab");

    field.move_right();
    field.move_right();
    assert_eq!(field.cursor(), 2);

    field.move_home();
    field.move_left();
    assert_eq!(field.cursor(), 0);
}

#[test]
fn test_take_empties_field() {
    let mut field = LineEditor::default();
    field.set("/help");

    assert_eq!(field.take(), "/help");
    assert!(field.is_empty());
    assert_eq!(field.cursor(), 0);
}

#[test]
fn test_insert_str_drops_control_characters() {
    let mut field = LineEditor::default();
    field.insert_str("line one\nline two\t!");

    assert_eq!(field.text(), "line oneline two!");
}
