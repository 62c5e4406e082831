//! Section discovery.
//!
//! Runs the lexer over a whole input and records where sections start and how many bytes
//! they hold, without keeping any of the data. A section opens at an address marker and
//! grows by one byte per data token. In the [`Dialect::PerLine`] dialect a marker that
//! continues the open section (`vma + size == address`) does not start a new one; this is
//! decided at the marker, sections are never merged afterwards.

use crate::{
    verilog::{
        config::Dialect,
        lexer::{Lexer, Token},
        section::Section,
    },
    Result,
};

/// Scans `data` and returns the sections it contains, in file order.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] on any lexical error, or if a data byte appears before
/// the first address marker.
pub fn scan_sections(data: &[u8], dialect: Dialect) -> Result<Vec<Section>> {
    let mut sections: Vec<Section> = Vec::new();
    let mut open: Option<usize> = None;
    let mut lexer = Lexer::new(data);

    while let Some(token) = lexer.next_token()? {
        match token {
            Token::Address { address, offset } => {
                if let Some(index) = open {
                    let section = &sections[index];
                    if dialect.coalesces() && section.end() == Some(address) {
                        continue;
                    }
                    log::debug!(
                        "Closed {} at 0x{:X} with {} bytes",
                        section.name,
                        section.vma,
                        section.size
                    );
                }

                let section = Section::new(sections.len() + 1, address, offset);
                log::debug!("Opened {} at 0x{:X} (offset {})", section.name, address, offset);
                sections.push(section);
                open = Some(sections.len() - 1);
            }
            Token::Byte(_) => {
                let Some(index) = open else {
                    return Err(malformed_error!(
                        "Data at offset {} precedes the first address",
                        lexer.pos().saturating_sub(2)
                    ));
                };
                sections[index].size += 1;
            }
        }
    }

    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn single_section() {
        let sections = scan_sections(b"@1000\n01 ae 3f 45 12\n", Dialect::PerLine).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, ".sec1");
        assert_eq!(sections[0].vma, 0x1000);
        assert_eq!(sections[0].size, 5);
        assert_eq!(sections[0].filepos, 0);
    }

    #[test]
    fn contiguous_lines_coalesce() {
        let input = b"@00001000 01 02 03 04 \r\n@00001004 05 06 \r\n";
        let sections = scan_sections(input, Dialect::PerLine).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].vma, 0x1000);
        assert_eq!(sections[0].size, 6);
    }

    #[test]
    fn gap_opens_new_section() {
        let input = b"@00001000 01 02 \r\n@00002000 03 \r\n";
        let sections = scan_sections(input, Dialect::PerLine).unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].name, ".sec2");
        assert_eq!(sections[1].vma, 0x2000);
        assert_eq!(sections[1].size, 1);
        assert_eq!(sections[1].filepos, 18);
    }

    #[test]
    fn backwards_address_opens_new_section() {
        let input = b"@10 01 02 @0 03";
        let sections = scan_sections(input, Dialect::PerLine).unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].vma, 0);
    }

    #[test]
    fn standard_dialect_never_coalesces() {
        let input = b"@1000\r\n01 02\r\n@1002\r\n03\r\n";
        let sections = scan_sections(input, Dialect::Standard).unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].size, 2);
        assert_eq!(sections[1].vma, 0x1002);
    }

    #[test]
    fn repeated_address_with_no_data() {
        // An empty section is continued by a marker at its own start address
        let sections = scan_sections(b"@100 @100 AA", Dialect::PerLine).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].size, 1);

        // ...but kept as an empty section if the next marker is elsewhere
        let sections = scan_sections(b"@100\n@200 AA", Dialect::PerLine).unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].size, 0);
    }

    #[test]
    fn empty_input_has_no_sections() {
        assert!(scan_sections(b"", Dialect::PerLine).unwrap().is_empty());
        assert!(scan_sections(b"// nothing\n", Dialect::PerLine)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn data_without_address_is_rejected() {
        assert!(matches!(
            scan_sections(b"01 02", Dialect::PerLine),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn malformed_is_rejected() {
        for input in [&b"@100 4Z"[..], b"/* unterminated", b"@"] {
            assert!(matches!(
                scan_sections(input, Dialect::PerLine),
                Err(Error::Malformed { .. })
            ));
        }
    }
}
