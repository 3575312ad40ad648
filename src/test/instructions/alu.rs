use super::*;

// The binary group pops the left operand and combines it with the
// accumulator: `a = popped ⊕ a`.

#[test]
fn add() {
    accumulator_is!(106, [Opcode::IMM, 42, Opcode::PSH, Opcode::IMM, 64, Opcode::ADD]);
}

#[test]
fn add_wraps() {
    accumulator_is!(Word::min_value(), [
        Opcode::IMM, Word::max_value(),
        Opcode::PSH,
        Opcode::IMM, 1,
        Opcode::ADD
    ]);
}

#[test]
fn sub_is_left_to_right() {
    accumulator_is!(7, [Opcode::IMM, 10, Opcode::PSH, Opcode::IMM, 3, Opcode::SUB]);
}

#[test]
fn mul() {
    accumulator_is!(-12, [Opcode::IMM, 4, Opcode::PSH, Opcode::IMM, -3, Opcode::MUL]);
}

#[test]
fn or() {
    accumulator_is!(0b111, [Opcode::IMM, 0b101, Opcode::PSH, Opcode::IMM, 0b011, Opcode::OR]);
}

#[test]
fn xor() {
    accumulator_is!(0b110, [Opcode::IMM, 0b101, Opcode::PSH, Opcode::IMM, 0b011, Opcode::XOR]);
}

#[test]
fn and() {
    accumulator_is!(0b001, [Opcode::IMM, 0b101, Opcode::PSH, Opcode::IMM, 0b011, Opcode::AND]);
}

#[test]
fn eq() {
    accumulator_is!(1, [Opcode::IMM, 5, Opcode::PSH, Opcode::IMM, 5, Opcode::EQ]);
    accumulator_is!(0, [Opcode::IMM, 5, Opcode::PSH, Opcode::IMM, 6, Opcode::EQ]);
}

#[test]
fn ne() {
    accumulator_is!(1, [Opcode::IMM, 5, Opcode::PSH, Opcode::IMM, 6, Opcode::NE]);
    accumulator_is!(0, [Opcode::IMM, 5, Opcode::PSH, Opcode::IMM, 5, Opcode::NE]);
}

#[test]
fn lt_is_signed() {
    accumulator_is!(1, [Opcode::IMM, -2, Opcode::PSH, Opcode::IMM, 1, Opcode::LT]);
    accumulator_is!(0, [Opcode::IMM, 1, Opcode::PSH, Opcode::IMM, -2, Opcode::LT]);
}

#[test]
fn gt() {
    accumulator_is!(1, [Opcode::IMM, 3, Opcode::PSH, Opcode::IMM, 2, Opcode::GT]);
    accumulator_is!(0, [Opcode::IMM, 2, Opcode::PSH, Opcode::IMM, 2, Opcode::GT]);
}

#[test]
fn le() {
    accumulator_is!(1, [Opcode::IMM, 2, Opcode::PSH, Opcode::IMM, 2, Opcode::LE]);
    accumulator_is!(0, [Opcode::IMM, 3, Opcode::PSH, Opcode::IMM, 2, Opcode::LE]);
}

#[test]
fn ge() {
    accumulator_is!(1, [Opcode::IMM, 2, Opcode::PSH, Opcode::IMM, 2, Opcode::GE]);
    accumulator_is!(0, [Opcode::IMM, 1, Opcode::PSH, Opcode::IMM, 2, Opcode::GE]);
}
