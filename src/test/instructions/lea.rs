use super::*;

#[test]
fn addresses_a_local_slot() {
    accumulator_is!(7, [
        Opcode::ENT, 1,
        Opcode::LEA, -1,
        Opcode::PSH,
        Opcode::IMM, 7,
        Opcode::SI,
        Opcode::LEA, -1,
        Opcode::LI
    ]);
}

#[test]
fn distinct_slots_do_not_alias() {
    accumulator_is!(3, [
        Opcode::ENT, 2,
        Opcode::LEA, -1,
        Opcode::PSH,
        Opcode::IMM, 1,
        Opcode::SI,
        Opcode::LEA, -2,
        Opcode::PSH,
        Opcode::IMM, 2,
        Opcode::SI,
        Opcode::LEA, -1,
        Opcode::LI,
        Opcode::PSH,
        Opcode::LEA, -2,
        Opcode::LI,
        Opcode::ADD
    ]);
}
