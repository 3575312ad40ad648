use super::*;

#[test]
fn shl() {
    accumulator_is!(16, [Opcode::IMM, 1, Opcode::PSH, Opcode::IMM, 4, Opcode::SHL]);
}

#[test]
fn shr_is_arithmetic() {
    accumulator_is!(-4, [Opcode::IMM, -8, Opcode::PSH, Opcode::IMM, 1, Opcode::SHR]);
    accumulator_is!(4, [Opcode::IMM, 8, Opcode::PSH, Opcode::IMM, 1, Opcode::SHR]);
}
