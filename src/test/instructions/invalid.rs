use super::*;

#[test]
fn unknown_opcode_is_a_fault() {
    let err = run_err(code![99]);
    assert_eq!(
        err,
        Error::UnknownInstruction {
            word: 99,
            cycle: 1
        }
    );
}

#[test]
fn negative_opcode_is_a_fault() {
    let err = run_err(code![-2]);
    assert_eq!(
        err,
        Error::UnknownInstruction {
            word: -2,
            cycle: 1
        }
    );
}
