use super::*;

#[test]
fn discards_stack_words() {
    let code = code![
        Opcode::IMM, 1,
        Opcode::PSH,
        Opcode::IMM, 2,
        Opcode::PSH,
        Opcode::ADJ, 1,
        Opcode::EXIT
    ];
    assert_eq!(run_ok(code), 1);
}
