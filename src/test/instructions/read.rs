use super::*;

use std::fs;

#[test]
fn reads_file_contents_into_memory() {
    let file = std::env::temp_dir().join("mcvm_read_test.txt");
    fs::write(&file, b"hello").unwrap();

    let (data, path) = data_with(file.to_str().unwrap().as_bytes());
    let code = code![
        Opcode::IMM, path,
        Opcode::PSH,
        Opcode::IMM, 0,
        Opcode::PSH,
        Opcode::OPEN,
        Opcode::ADJ, 2,
        Opcode::PSH,
        Opcode::IMM, 512,
        Opcode::PSH,
        Opcode::IMM, 16,
        Opcode::PSH,
        Opcode::READ,
        Opcode::ADJ, 3,
        Opcode::PSH,
        Opcode::EXIT
    ];
    let (result, processor) = run_with_data(code, data);
    assert_eq!(result.unwrap(), 5);
    assert_eq!(processor.memory().borrow_slice(512, 5), Ok(&b"hello"[..]));

    fs::remove_file(&file).unwrap();
}

#[test]
fn bad_descriptor_reads_nothing() {
    let code = code![
        Opcode::IMM, 99,
        Opcode::PSH,
        Opcode::IMM, 512,
        Opcode::PSH,
        Opcode::IMM, 16,
        Opcode::PSH,
        Opcode::READ,
        Opcode::ADJ, 3,
        Opcode::PSH,
        Opcode::EXIT
    ];
    assert_eq!(run_ok(code), -1);
}
