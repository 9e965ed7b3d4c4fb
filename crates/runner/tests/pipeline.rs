//! End-to-end pipeline: parse a test source, locate the cursor, build the
//! run command.

use testlens_command::{ArgBuilder, RunnerConfig};
use testlens_parser::{Language, TestFileParser};
use testlens_tree::locate;

#[test]
fn cursor_on_test_line_builds_filtered_command() {
    let source = r#"suite_placeholder();
describe("A", () => {
  test("B", () => {
    expect(true).toBe(true);
  });
});
"#;
    let mut parser = TestFileParser::new(Language::JavaScript).unwrap();
    let forest = parser.parse(source).unwrap();

    // Cursor on the `test("B", ...)` line.
    let name = locate(3, &forest).unwrap();
    assert_eq!(name, "A B");

    let config = RunnerConfig::default();
    let command = ArgBuilder::new(&config)
        .command("/repo/a.test.js", Some(&name), &[])
        .to_string();
    assert!(command.contains("-t 'A B'"), "{command}");
    assert!(command.starts_with("npx jest '/repo/a.test.js'"), "{command}");
}

#[test]
fn cursor_outside_declarations_runs_whole_file() {
    let source = "const setup = 1;\ntest('only one', () => {});\n";
    let mut parser = TestFileParser::new(Language::JavaScript).unwrap();
    let forest = parser.parse(source).unwrap();

    assert_eq!(locate(1, &forest), None);

    let config = RunnerConfig::default();
    let command = ArgBuilder::new(&config)
        .command("/repo/a.test.js", None, &[])
        .to_string();
    assert!(!command.contains("-t"), "{command}");
}
