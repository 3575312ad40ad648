use super::*;

#[test]
fn stores_word_and_keeps_accumulator() {
    let code = code![
        Opcode::IMM, 8,
        Opcode::PSH,
        Opcode::IMM, 42,
        Opcode::SI,
        Opcode::PSH,
        Opcode::EXIT
    ];
    let (result, processor) = run_with_data(code, vec![0; 16]);
    assert_eq!(result.unwrap(), 42);
    assert_eq!(processor.memory().read_word(8), Ok(42));
}
