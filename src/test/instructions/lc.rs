use super::*;

#[test]
fn loads_byte() {
    let (data, address) = data_with(b"A");
    let code = code![Opcode::IMM, address, Opcode::LC, Opcode::PSH, Opcode::EXIT];
    let (result, _) = run_with_data(code, data);
    assert_eq!(result.unwrap(), 65);
}

#[test]
fn sign_extends_high_bytes() {
    let (data, address) = data_with(&[0xff]);
    let code = code![Opcode::IMM, address, Opcode::LC, Opcode::PSH, Opcode::EXIT];
    let (result, _) = run_with_data(code, data);
    assert_eq!(result.unwrap(), -1);
}
