use super::*;

#[test]
fn call_passes_argument_and_cleans_up() {
    // main: f(5) + 1; f returns its argument.
    let code = code![
        Opcode::IMM, 5,
        Opcode::PSH,
        Opcode::JSR, 13,
        Opcode::ADJ, 1,
        Opcode::PSH,
        Opcode::IMM, 1,
        Opcode::ADD,
        Opcode::PSH,
        Opcode::EXIT,
        // f:
        Opcode::ENT, 0,
        Opcode::LEA, 2,
        Opcode::LI,
        Opcode::LEV
    ];
    assert_eq!(run_ok(code), 6);
}

#[test]
fn nested_calls_keep_their_frames() {
    // main: f(10); f: arg + g(arg); g: arg * 2.
    let code = code![
        Opcode::IMM, 10,
        Opcode::PSH,
        Opcode::JSR, 9,
        Opcode::ADJ, 1,
        Opcode::PSH,
        Opcode::EXIT,
        // f:
        Opcode::ENT, 0,
        Opcode::LEA, 2,
        Opcode::LI,
        Opcode::PSH,
        Opcode::LEA, 2,
        Opcode::LI,
        Opcode::PSH,
        Opcode::JSR, 25,
        Opcode::ADJ, 1,
        Opcode::ADD,
        Opcode::LEV,
        // g:
        Opcode::ENT, 0,
        Opcode::LEA, 2,
        Opcode::LI,
        Opcode::PSH,
        Opcode::IMM, 2,
        Opcode::MUL,
        Opcode::LEV
    ];
    assert_eq!(run_ok(code), 30);
}
