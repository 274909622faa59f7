use std::net::Ipv4Addr;

const REVERSE_SUFFIX: &str = ".in-addr.arpa";

/// Turns `"4.3.2.1.in-addr.arpa"` into `1.2.3.4`.
///
/// Returns `None` unless the name ends in `.in-addr.arpa` and carries exactly
/// four decimal labels in the range 0-255. A trailing root dot is accepted.
pub fn parse_reverse_name(name: &str) -> Option<Ipv4Addr> {
    let name = name.trim_end_matches('.').to_ascii_lowercase();
    let labels = name.strip_suffix(REVERSE_SUFFIX)?;

    let mut octets = [0u8; 4];
    let mut count = 0;
    for label in labels.split('.') {
        if count == 4 || label.is_empty() || !label.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        octets[3 - count] = label.parse::<u8>().ok()?;
        count += 1;
    }

    if count != 4 {
        return None;
    }
    Some(Ipv4Addr::from(octets))
}
