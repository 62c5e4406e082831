//! Rejection of input that is not a well-formed hex memory file.

use verihex::prelude::*;

fn open(text: &[u8]) -> Result<VerilogFile> {
    VerilogFile::from_mem(text.to_vec())
}

#[test]
fn lexical_errors_fail_detection() {
    let inputs: [&[u8]; 9] = [
        b"@100 4Z",
        b"@100 4",
        b"@",
        b"@G0 00",
        b"@0 00 /* never closed",
        b"@0 00 / 01",
        b"@0 000",
        b"@0 00 #",
        b"@10000000000000000 00",
    ];

    for input in inputs {
        let result = open(input);
        assert!(
            matches!(result, Err(Error::Malformed { .. })),
            "input {:?} gave {:?}",
            String::from_utf8_lossy(input),
            result.map(|file| file.sections().len())
        );
        assert!(!probe(input));
    }
}

#[test]
fn data_before_any_address() {
    assert!(matches!(open(b"00 11 22"), Err(Error::Malformed { .. })));
    assert!(matches!(
        open(b"// header\n00 @0 11"),
        Err(Error::Malformed { .. })
    ));
}

#[test]
fn empty_input() {
    assert!(matches!(open(b""), Err(Error::Empty)));
}

#[test]
fn blank_and_comment_only_input_has_no_sections() {
    for input in [&b" \t\r\n\x0b\x0c"[..], b"// nothing here\n/* or here */\n"] {
        let file = open(input).unwrap();
        assert!(file.sections().is_empty());
    }
}

#[test]
fn comments_between_tokens() {
    let file = open(b"/* boot */ @0000 // vector\n 01 /* a */ 02\n").unwrap();
    assert_eq!(file.sections().len(), 1);
    assert_eq!(file.section_contents(0).unwrap(), &[0x01, 0x02]);
}

#[test]
fn lowercase_and_short_addresses() {
    let file = open(b"@a0 de ad\n@A2 Be eF").unwrap();
    assert_eq!(file.sections().len(), 1);
    assert_eq!(file.sections()[0].vma, 0xA0);
    assert_eq!(file.section_contents(0).unwrap(), &[0xDE, 0xAD, 0xBE, 0xEF]);
}

#[test]
fn changed_input_is_caught_on_read() {
    let format = VerilogFormat::default();

    let scanned = Memory::new(b"@1000 01 02\n@1002 03\n".to_vec());
    let sections = format.object_p(&scanned).unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].size, 3);

    // Same length, second marker moved
    let changed = Memory::new(b"@1000 01 02\n@1004 03\n".to_vec());
    assert!(matches!(
        format.read_section(&changed, &sections[0]),
        Err(Error::AddressMismatch {
            expected: 0x1002,
            found: 0x1004
        })
    ));

    let truncated = Memory::new(b"@1000 01 02\n".to_vec());
    assert!(matches!(
        format.read_section(&truncated, &sections[0]),
        Err(Error::Malformed { .. })
    ));
}

#[test]
fn standard_dialect_section_ends_at_marker() {
    let standard = VerilogFormat::new(Config::default().with_dialect(Dialect::Standard));

    let scanned = Memory::new(b"@0000000000000000\r\n01 02\r\n".to_vec());
    let sections = standard.object_p(&scanned).unwrap();

    let changed = Memory::new(b"@0000000000000000\r\n01\r\n@0000000000000001\r\n02\r\n".to_vec());
    assert!(matches!(
        standard.read_section(&changed, &sections[0]),
        Err(Error::Malformed { .. })
    ));
}

#[test]
fn section_out_of_range() {
    let file = open(b"@0 01").unwrap();
    assert!(matches!(
        file.section_contents(1),
        Err(Error::SectionNotFound(1))
    ));
}

#[test]
fn missing_file() {
    let path = std::env::temp_dir().join("verihex_does_not_exist.hex");
    assert!(matches!(
        VerilogFile::from_file(&path),
        Err(Error::FileError(_))
    ));
}
