/// A country as known to the WCA, keyed by its ISO-3166 alpha-2 code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub iso2: &'static str,
    /// WCA country id, also used as the display name
    pub id: &'static str,
}

const fn c(iso2: &'static str, id: &'static str) -> Country {
    Country { iso2, id }
}

static COUNTRIES: &[Country] = &[
    c("AD", "Andorra"),
    c("AE", "United Arab Emirates"),
    c("AF", "Afghanistan"),
    c("AG", "Antigua and Barbuda"),
    c("AL", "Albania"),
    c("AM", "Armenia"),
    c("AO", "Angola"),
    c("AR", "Argentina"),
    c("AT", "Austria"),
    c("AU", "Australia"),
    c("AZ", "Azerbaijan"),
    c("BA", "Bosnia and Herzegovina"),
    c("BB", "Barbados"),
    c("BD", "Bangladesh"),
    c("BE", "Belgium"),
    c("BF", "Burkina Faso"),
    c("BG", "Bulgaria"),
    c("BH", "Bahrain"),
    c("BI", "Burundi"),
    c("BJ", "Benin"),
    c("BN", "Brunei"),
    c("BO", "Bolivia"),
    c("BR", "Brazil"),
    c("BS", "Bahamas"),
    c("BT", "Bhutan"),
    c("BW", "Botswana"),
    c("BY", "Belarus"),
    c("BZ", "Belize"),
    c("CA", "Canada"),
    c("CD", "Democratic Republic of the Congo"),
    c("CF", "Central African Republic"),
    c("CG", "Congo"),
    c("CH", "Switzerland"),
    c("CI", "Cote d_Ivoire"),
    c("CL", "Chile"),
    c("CM", "Cameroon"),
    c("CN", "China"),
    c("CO", "Colombia"),
    c("CR", "Costa Rica"),
    c("CU", "Cuba"),
    c("CV", "Cabo Verde"),
    c("CY", "Cyprus"),
    c("CZ", "Czech Republic"),
    c("DE", "Germany"),
    c("DJ", "Djibouti"),
    c("DK", "Denmark"),
    c("DM", "Dominica"),
    c("DO", "Dominican Republic"),
    c("DZ", "Algeria"),
    c("EC", "Ecuador"),
    c("EE", "Estonia"),
    c("EG", "Egypt"),
    c("ER", "Eritrea"),
    c("ES", "Spain"),
    c("ET", "Ethiopia"),
    c("FI", "Finland"),
    c("FJ", "Fiji"),
    c("FM", "Federated States of Micronesia"),
    c("FR", "France"),
    c("GA", "Gabon"),
    c("GB", "United Kingdom"),
    c("GD", "Grenada"),
    c("GE", "Georgia"),
    c("GH", "Ghana"),
    c("GM", "Gambia"),
    c("GN", "Guinea"),
    c("GQ", "Equatorial Guinea"),
    c("GR", "Greece"),
    c("GT", "Guatemala"),
    c("GW", "Guinea Bissau"),
    c("GY", "Guyana"),
    c("HK", "Hong Kong, China"),
    c("HN", "Honduras"),
    c("HR", "Croatia"),
    c("HT", "Haiti"),
    c("HU", "Hungary"),
    c("ID", "Indonesia"),
    c("IE", "Ireland"),
    c("IL", "Israel"),
    c("IN", "India"),
    c("IQ", "Iraq"),
    c("IR", "Iran"),
    c("IS", "Iceland"),
    c("IT", "Italy"),
    c("JM", "Jamaica"),
    c("JO", "Jordan"),
    c("JP", "Japan"),
    c("KE", "Kenya"),
    c("KG", "Kyrgyzstan"),
    c("KH", "Cambodia"),
    c("KI", "Kiribati"),
    c("KM", "Comoros"),
    c("KN", "Saint Kitts and Nevis"),
    c("KP", "North Korea"),
    c("KR", "Republic of Korea"),
    c("KW", "Kuwait"),
    c("KZ", "Kazakhstan"),
    c("LA", "Laos"),
    c("LB", "Lebanon"),
    c("LC", "Saint Lucia"),
    c("LI", "Liechtenstein"),
    c("LK", "Sri Lanka"),
    c("LR", "Liberia"),
    c("LS", "Lesotho"),
    c("LT", "Lithuania"),
    c("LU", "Luxembourg"),
    c("LV", "Latvia"),
    c("LY", "Libya"),
    c("MA", "Morocco"),
    c("MC", "Monaco"),
    c("MD", "Moldova"),
    c("ME", "Montenegro"),
    c("MG", "Madagascar"),
    c("MH", "Marshall Islands"),
    c("MK", "North Macedonia"),
    c("ML", "Mali"),
    c("MM", "Myanmar"),
    c("MN", "Mongolia"),
    c("MO", "Macau, China"),
    c("MR", "Mauritania"),
    c("MT", "Malta"),
    c("MU", "Mauritius"),
    c("MV", "Maldives"),
    c("MW", "Malawi"),
    c("MX", "Mexico"),
    c("MY", "Malaysia"),
    c("MZ", "Mozambique"),
    c("NA", "Namibia"),
    c("NE", "Niger"),
    c("NG", "Nigeria"),
    c("NI", "Nicaragua"),
    c("NL", "Netherlands"),
    c("NO", "Norway"),
    c("NP", "Nepal"),
    c("NR", "Nauru"),
    c("NZ", "New Zealand"),
    c("OM", "Oman"),
    c("PA", "Panama"),
    c("PE", "Peru"),
    c("PG", "Papua New Guinea"),
    c("PH", "Philippines"),
    c("PK", "Pakistan"),
    c("PL", "Poland"),
    c("PS", "Palestine"),
    c("PT", "Portugal"),
    c("PW", "Palau"),
    c("PY", "Paraguay"),
    c("QA", "Qatar"),
    c("RO", "Romania"),
    c("RS", "Serbia"),
    c("RU", "Russia"),
    c("RW", "Rwanda"),
    c("SA", "Saudi Arabia"),
    c("SB", "Solomon Islands"),
    c("SC", "Seychelles"),
    c("SD", "Sudan"),
    c("SE", "Sweden"),
    c("SG", "Singapore"),
    c("SI", "Slovenia"),
    c("SK", "Slovakia"),
    c("SL", "Sierra Leone"),
    c("SM", "San Marino"),
    c("SN", "Senegal"),
    c("SO", "Somalia"),
    c("SR", "Suriname"),
    c("SS", "South Sudan"),
    c("ST", "Sao Tome and Principe"),
    c("SV", "El Salvador"),
    c("SY", "Syria"),
    c("SZ", "Eswatini"),
    c("TD", "Chad"),
    c("TG", "Togo"),
    c("TH", "Thailand"),
    c("TJ", "Tajikistan"),
    c("TL", "Timor-Leste"),
    c("TM", "Turkmenistan"),
    c("TN", "Tunisia"),
    c("TO", "Tonga"),
    c("TR", "Turkey"),
    c("TT", "Trinidad and Tobago"),
    c("TV", "Tuvalu"),
    c("TW", "Chinese Taipei"),
    c("TZ", "Tanzania"),
    c("UA", "Ukraine"),
    c("UG", "Uganda"),
    c("US", "USA"),
    c("UY", "Uruguay"),
    c("UZ", "Uzbekistan"),
    c("VA", "Vatican City"),
    c("VC", "Saint Vincent and the Grenadines"),
    c("VE", "Venezuela"),
    c("VN", "Vietnam"),
    c("VU", "Vanuatu"),
    c("WS", "Samoa"),
    c("XA", "Multiple Countries (Asia)"),
    c("XE", "Multiple Countries (Europe)"),
    c("XF", "Multiple Countries (Africa)"),
    c("XM", "Multiple Countries (Americas)"),
    c("XN", "Multiple Countries (North America)"),
    c("XO", "Multiple Countries (Oceania)"),
    c("XS", "Multiple Countries (South America)"),
    c("XW", "Multiple Countries (World)"),
    c("XK", "Kosovo"),
    c("YE", "Yemen"),
    c("ZA", "South Africa"),
    c("ZM", "Zambia"),
    c("ZW", "Zimbabwe"),
];

/// Case-insensitive lookup by ISO-3166 alpha-2 code.
pub fn find_by_iso2(iso2: &str) -> Option<&'static Country> {
    let iso2 = iso2.trim();
    COUNTRIES.iter().find(|c| c.iso2.eq_ignore_ascii_case(iso2))
}

pub fn find_by_id(id: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(find_by_iso2("us").map(|c| c.id), Some("USA"));
        assert_eq!(find_by_iso2("Gb").map(|c| c.id), Some("United Kingdom"));
    }

    #[test]
    fn test_unknown_codes() {
        assert!(find_by_iso2("XY").is_none());
        assert!(find_by_iso2("USA").is_none());
        assert!(find_by_iso2("").is_none());
    }

    #[test]
    fn test_round_trip_through_wca_id() {
        for country in COUNTRIES {
            assert_eq!(find_by_id(country.id).map(|c| c.iso2), Some(country.iso2));
        }
    }
}
