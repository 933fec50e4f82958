/// Format a memory region as a hex dump with both hex and ASCII representation.
pub fn format_hex_dump(addr: usize, bytes: &[u8]) -> String {
    format_hex_dump_with_width(addr, bytes, 16)
}

pub fn format_hex_dump_with_width(addr: usize, bytes: &[u8], width: usize) -> String {
    bytes
        .chunks(width)
        .enumerate()
        .map(|(row, chunk)| {
            let hex = chunk
                .iter()
                .map(|byte| format!("{:02X} ", byte))
                .collect::<String>();
            let ascii = chunk
                .iter()
                .map(|&byte| {
                    if (0x20..=0x7e).contains(&byte) {
                        byte as char
                    } else {
                        '.'
                    }
                })
                .collect::<String>();

            format!(
                "{:02X} : {:<pad$}| {}",
                addr + row * width,
                hex,
                ascii,
                pad = width * 3
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
