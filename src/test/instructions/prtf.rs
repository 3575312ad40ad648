use super::*;

fn prtf_status(code: Vec<Word>, data: Vec<u8>) -> Word {
    let (result, _) = run_with_data(code, data);
    result.unwrap()
}

#[test]
fn returns_the_byte_count() {
    let (data, format) = data_with(b"n=%d\n");
    let code = code![
        Opcode::IMM, format,
        Opcode::PSH,
        Opcode::IMM, 42,
        Opcode::PSH,
        Opcode::PRTF,
        Opcode::ADJ, 2,
        Opcode::PSH,
        Opcode::EXIT
    ];
    assert_eq!(prtf_status(code, data), 5);
}

#[test]
fn formats_strings_and_characters() {
    let mut data = vec![0; 8];
    data.extend_from_slice(b"%s %c\0ok\0");
    let code = code![
        Opcode::IMM, 8,  // "%s %c"
        Opcode::PSH,
        Opcode::IMM, 14, // "ok"
        Opcode::PSH,
        Opcode::IMM, Word::from(b'k'),
        Opcode::PSH,
        Opcode::PRTF,
        Opcode::ADJ, 3,
        Opcode::PSH,
        Opcode::EXIT
    ];
    assert_eq!(prtf_status(code, data), 4);
}

#[test]
fn precision_limits_string_output() {
    let mut data = vec![0; 8];
    data.extend_from_slice(b"%.*s\0abcd\0");
    let code = code![
        Opcode::IMM, 8,  // "%.*s"
        Opcode::PSH,
        Opcode::IMM, 2,
        Opcode::PSH,
        Opcode::IMM, 13, // "abcd"
        Opcode::PSH,
        Opcode::PRTF,
        Opcode::ADJ, 3,
        Opcode::PSH,
        Opcode::EXIT
    ];
    assert_eq!(prtf_status(code, data), 2);
}

#[test]
fn literal_percent() {
    let (data, format) = data_with(b"100%%");
    let code = code![
        Opcode::IMM, format,
        Opcode::PSH,
        Opcode::PRTF,
        Opcode::ADJ, 1,
        Opcode::PSH,
        Opcode::EXIT
    ];
    assert_eq!(prtf_status(code, data), 4);
}

#[test]
fn hexadecimal() {
    let (data, format) = data_with(b"%x");
    let code = code![
        Opcode::IMM, format,
        Opcode::PSH,
        Opcode::IMM, 255,
        Opcode::PSH,
        Opcode::PRTF,
        Opcode::ADJ, 2,
        Opcode::PSH,
        Opcode::EXIT
    ];
    assert_eq!(prtf_status(code, data), 2);
}
