//! Resident id format: `VH-YYYY-NNNN`
//!
//! The year is the registration year; the sequence restarts at 0001 each
//! year. Allocation itself lives on the store (`RecordsStore::next_resident_id`)
//! so it can consult existing rows.

/// Format a resident id from year and sequence
pub fn format_resident_id(year: i32, sequence: u32) -> String {
    format!("VH-{}-{:04}", year, sequence)
}

/// Check that an id follows the `VH-YYYY-NNNN` format
pub fn is_valid_resident_id(id: &str) -> bool {
    let mut parts = id.split('-');
    let (Some(prefix), Some(year), Some(seq), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    prefix == "VH"
        && year.len() == 4
        && year.chars().all(|c| c.is_ascii_digit())
        && seq.len() == 4
        && seq.chars().all(|c| c.is_ascii_digit())
}

/// Extract the sequence number from a valid resident id
pub fn parse_sequence(id: &str) -> Option<u32> {
    if !is_valid_resident_id(id) {
        return None;
    }
    id.rsplit('-').next()?.parse().ok()
}
