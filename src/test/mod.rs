use crate::verilog::hex::{encode_address, encode_byte, AddressWidth};

/// Deterministic test bytes: `len` values starting at `seed`, stepping by a prime.
pub fn pattern(len: usize, seed: u8) -> Vec<u8> {
    (0..len)
        .map(|i| seed.wrapping_add((i as u8).wrapping_mul(31)))
        .collect()
}

/// Builds per-line hex memory text by hand, one line per `(address, bytes)` entry.
pub fn hex_lines(lines: &[(u64, &[u8])]) -> Vec<u8> {
    let mut out = Vec::new();
    for (address, bytes) in lines {
        out.extend_from_slice(&encode_address(*address, AddressWidth::Bits32));
        out.push(b' ');
        for &byte in *bytes {
            out.extend_from_slice(&encode_byte(byte));
            out.push(b' ');
        }
        out.extend_from_slice(b"\r\n");
    }
    out
}
