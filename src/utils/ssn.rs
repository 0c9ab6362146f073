//! Finnish personal identity code handling.
//!
//! A code is eleven characters: the birth date as `ddmmyy`, a century
//! marker (`+` for 18xx, `-` for 19xx, `A` for 20xx), a three digit serial
//! in 002..=899 and a control character. The control character indexes a
//! 31 character alphabet with the birth date and serial read together as a
//! nine digit number modulo 31. See
//! <https://dvv.fi/en/personal-identity-code>.

use chrono::{Datelike, NaiveDate};
use rand::Rng;

const CONTROL_CHARS: [char; 31] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'H', 'J', 'K',
    'L', 'M', 'N', 'P', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y',
];

/// Checks shape, date part, century marker and control character of `ssn`
/// against `date_of_birth`.
pub fn is_valid_ssn(ssn: &str, date_of_birth: NaiveDate) -> bool {
    let bytes = ssn.as_bytes();
    if bytes.len() != 11 {
        return false;
    }
    if !bytes[..6].iter().all(u8::is_ascii_digit) || !bytes[7..10].iter().all(u8::is_ascii_digit) {
        return false;
    }
    let Ok(serial) = ssn[7..10].parse::<u32>() else {
        return false;
    };
    if !(2..=899).contains(&serial) {
        return false;
    }
    let Some(century) = century_character(date_of_birth) else {
        return false;
    };
    bytes[6] as char == century
        && &ssn[..6] == date_of_birth.format("%d%m%y").to_string()
        && control_character(&ssn[..10]) == Some(bytes[10] as char)
}

/// Generates a code that [`is_valid_ssn`] accepts for `date`. The serial
/// section is drawn at random with no regard for gender conventions.
/// Returns `None` for years outside the 1800..=2099 century mapping.
pub fn generate_ssn(date: NaiveDate) -> Option<String> {
    let century = century_character(date)?;
    let serial: u32 = rand::rng().random_range(2..900);
    let partial = format!("{}{}{:03}", date.format("%d%m%y"), century, serial);
    let control = control_character(&partial)?;
    Some(format!("{partial}{control}"))
}

/// Control character for the first ten characters of a code.
fn control_character(partial: &str) -> Option<char> {
    let digits = format!("{}{}", &partial[..6], &partial[7..10]);
    let num: u64 = digits.parse().ok()?;
    CONTROL_CHARS.get((num % 31) as usize).copied()
}

fn century_character(date: NaiveDate) -> Option<char> {
    match date.year().div_euclid(100) {
        18 => Some('+'),
        19 => Some('-'),
        20 => Some('A'),
        _ => None,
    }
}
