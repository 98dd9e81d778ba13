/// Repeated nucleotide motif.
pub const MOTIF: &str = "ATGC";
/// Total payload length in characters.
pub const PAYLOAD_LEN: usize = 160;
/// Column at which the payload wraps.
pub const LINE_WIDTH: usize = 80;

/// Encode a single FASTA record with a constant payload.
///
/// Only the header varies between calls.
pub fn encode_sequence(sequence_name: &str) -> String {
    let payload = MOTIF.repeat(PAYLOAD_LEN / MOTIF.len());
    let lines = PAYLOAD_LEN.div_ceil(LINE_WIDTH);
    let mut out = String::with_capacity(sequence_name.len() + 2 + PAYLOAD_LEN + lines);

    out.push('>');
    out.push_str(sequence_name);
    out.push('\n');

    let mut start = 0;
    while start < payload.len() {
        let end = (start + LINE_WIDTH).min(payload.len());
        out.push_str(&payload[start..end]);
        out.push('\n');
        start = end;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_has_header_and_two_wrapped_lines() {
        let encoded = encode_sequence("donor_v2_ABC12");
        let lines: Vec<&str> = encoded.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], ">donor_v2_ABC12");
        assert!(lines[1..].iter().all(|line| line.len() == LINE_WIDTH));
        assert_eq!(lines[1..].concat(), "ATGC".repeat(40));
        assert!(encoded.ends_with('\n'));
    }

    #[test]
    fn payload_is_constant() {
        let a = encode_sequence("a");
        let b = encode_sequence("another_name");
        let payload = |encoded: &str| encoded.split_once('\n').map(|(_, rest)| rest.to_string());
        assert_eq!(payload(&a), payload(&b));
    }
}
