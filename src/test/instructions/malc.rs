use super::*;

#[test]
fn first_block_sits_on_the_heap_base() {
    let code = code![
        Opcode::IMM, 1,
        Opcode::PSH,
        Opcode::MALC,
        Opcode::ADJ, 1,
        Opcode::PSH,
        Opcode::EXIT
    ];
    assert_eq!(run_ok(code), 8);
}

#[test]
fn blocks_are_distinct_and_word_aligned() {
    // malloc(3) then malloc(5): the second block starts one word later.
    let code = code![
        Opcode::IMM, 3,
        Opcode::PSH,
        Opcode::MALC,
        Opcode::ADJ, 1,
        Opcode::PSH,
        Opcode::IMM, 5,
        Opcode::PSH,
        Opcode::MALC,
        Opcode::ADJ, 1,
        Opcode::SUB,
        Opcode::PSH,
        Opcode::EXIT
    ];
    assert_eq!(run_ok(code), -8);
}

#[test]
fn exhaustion_returns_null() {
    let code = code![
        Opcode::IMM, 1 << 40,
        Opcode::PSH,
        Opcode::MALC,
        Opcode::ADJ, 1,
        Opcode::PSH,
        Opcode::EXIT
    ];
    assert_eq!(run_ok(code), 0);
}

#[test]
fn negative_size_returns_null() {
    let code = code![
        Opcode::IMM, -1,
        Opcode::PSH,
        Opcode::MALC,
        Opcode::ADJ, 1,
        Opcode::PSH,
        Opcode::EXIT
    ];
    assert_eq!(run_ok(code), 0);
}

#[test]
fn free_is_accepted() {
    let code = code![
        Opcode::IMM, 1,
        Opcode::PSH,
        Opcode::MALC,
        Opcode::ADJ, 1,
        Opcode::PSH,
        Opcode::FREE,
        Opcode::ADJ, 1,
        Opcode::PSH,
        Opcode::EXIT
    ];
    // The freed pointer is still in the accumulator afterwards.
    assert_eq!(run_ok(code), 8);
}
