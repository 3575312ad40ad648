use super::*;

#[test]
fn status_is_the_pushed_argument() {
    // exit(5) as emitted for the built-in: argument pushed, then EXIT.
    let code = code![Opcode::IMM, 5, Opcode::PSH, Opcode::EXIT];
    assert_eq!(run_ok(code), 5);
}

#[test]
fn negative_status() {
    let code = code![Opcode::IMM, -1, Opcode::PSH, Opcode::EXIT];
    assert_eq!(run_ok(code), -1);
}
