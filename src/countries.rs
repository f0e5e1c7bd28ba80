//! Countries

/// ISO alpha-2 code of the store's home country, used for any unrecognised country name.
pub const HOME_COUNTRY_CODE: &str = "ZA";

/// Countries the store ships to, by display name.
const COUNTRIES: [(&str, &str); 4] = [
    ("South Africa", "ZA"),
    ("Namibia", "NA"),
    ("Botswana", "BW"),
    ("Zimbabwe", "ZW"),
];

/// Map a country display name to its ISO alpha-2 code.
///
/// Matching ignores surrounding whitespace and ASCII case. Names outside the shipping table
/// resolve to [`HOME_COUNTRY_CODE`].
pub fn country_code(name: &str) -> &'static str {
    let name = name.trim();

    COUNTRIES
        .iter()
        .find(|(display, _)| display.eq_ignore_ascii_case(name))
        .map_or(HOME_COUNTRY_CODE, |(_, code)| code)
}
