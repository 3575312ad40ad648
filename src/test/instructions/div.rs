use super::*;

#[test]
fn truncating_division() {
    accumulator_is!(3, [Opcode::IMM, 7, Opcode::PSH, Opcode::IMM, 2, Opcode::DIV]);
    accumulator_is!(-3, [Opcode::IMM, -7, Opcode::PSH, Opcode::IMM, 2, Opcode::DIV]);
}

#[test]
fn remainder_follows_the_dividend() {
    accumulator_is!(1, [Opcode::IMM, 7, Opcode::PSH, Opcode::IMM, 3, Opcode::MOD]);
    accumulator_is!(-1, [Opcode::IMM, -7, Opcode::PSH, Opcode::IMM, 3, Opcode::MOD]);
}

#[test]
fn division_by_zero_is_a_fault() {
    let err = run_err(code![Opcode::IMM, 1, Opcode::PSH, Opcode::IMM, 0, Opcode::DIV]);
    assert_eq!(err, Error::DivisionByZero { cycle: 4 });
}

#[test]
fn remainder_by_zero_is_a_fault() {
    let err = run_err(code![Opcode::IMM, 1, Opcode::PSH, Opcode::IMM, 0, Opcode::MOD]);
    assert_eq!(err, Error::DivisionByZero { cycle: 4 });
}
