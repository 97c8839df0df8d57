//! UK SIC 2007 code descriptions.
//!
//! Lookup falls through three levels: the curated five-digit table, the
//! two-digit division table, then the literal `SIC code <code>`.

/// Curated five-digit codes seen among tyre and vehicle-service companies.
const SIC_CODES: &[(&str, &str)] = &[
    ("01110", "Growing of cereals (except rice), leguminous crops and oil seeds"),
    ("01610", "Support activities for crop production"),
    ("22110", "Manufacture of rubber tyres and tubes"),
    ("22190", "Manufacture of other rubber products"),
    ("45110", "Sale of cars and light motor vehicles"),
    ("45190", "Sale of other motor vehicles"),
    ("45200", "Maintenance and repair of motor vehicles"),
    ("45310", "Wholesale trade of motor vehicle parts and accessories"),
    ("45320", "Retail trade of motor vehicle parts and accessories"),
    (
        "45400",
        "Sale, maintenance and repair of motorcycles and related parts and accessories",
    ),
    ("46690", "Wholesale of other machinery and equipment"),
    ("46900", "Non-specialised wholesale trade"),
    ("47300", "Retail sale of automotive fuel in specialised stores"),
    ("47990", "Other retail sale not in stores, stalls or markets"),
    ("49410", "Freight transport by road"),
    ("52100", "Warehousing and storage"),
    ("52210", "Service activities incidental to land transportation"),
    ("52290", "Other transportation support activities"),
    ("66220", "Activities of insurance agents and brokers"),
    ("70100", "Activities of head offices"),
    ("70210", "Public relations and communication activities"),
    ("70229", "Management consultancy activities other than financial management"),
    ("71200", "Technical testing and analysis"),
    ("74909", "Other professional, scientific and technical activities n.e.c."),
    ("77110", "Renting and leasing of cars and light motor vehicles"),
    ("77120", "Renting and leasing of trucks"),
    (
        "77390",
        "Renting and leasing of other machinery, equipment and tangible goods n.e.c.",
    ),
    ("81210", "General cleaning of buildings"),
    ("82990", "Other business support service activities n.e.c."),
    ("95120", "Repair of communication equipment"),
    ("96090", "Other personal service activities n.e.c."),
];

/// Two-digit division descriptions.
const SIC_DIVISIONS: &[(&str, &str)] = &[
    ("01", "Agriculture, forestry and fishing"),
    ("22", "Manufacture of rubber and plastic products"),
    ("45", "Wholesale and retail trade; repair of motor vehicles"),
    ("46", "Wholesale trade, except of motor vehicles"),
    ("47", "Retail trade, except of motor vehicles"),
    ("49", "Land transport and transport via pipelines"),
    ("52", "Warehousing and support activities for transportation"),
    ("66", "Activities auxiliary to financial services"),
    ("70", "Activities of head offices; management consultancy"),
    ("71", "Architectural and engineering activities"),
    ("74", "Other professional, scientific and technical activities"),
    ("77", "Rental and leasing activities"),
    ("81", "Services to buildings and landscape activities"),
    ("82", "Office administrative and business support activities"),
    ("95", "Repair of computers and personal and household goods"),
    ("96", "Other personal service activities"),
];

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(code, _)| *code == key)
        .map(|(_, description)| *description)
}

/// Human-readable description for a code. Never empty.
pub fn describe(code: &str) -> String {
    let code = code.trim();
    if let Some(description) = lookup(SIC_CODES, code) {
        return description.to_string();
    }
    if let Some(description) = code.get(..2).and_then(|prefix| lookup(SIC_DIVISIONS, prefix)) {
        return description.to_string();
    }
    format!("SIC code {}", code)
}

/// `<code>: <description>`, the form written to the artefacts.
pub fn label(code: &str) -> String {
    format!("{}: {}", code.trim(), describe(code))
}

pub fn labels(codes: &[String]) -> Vec<String> {
    codes.iter().map(|code| label(code)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_fallback_exact() {
        let codes = vec!["22110".to_string(), "99999".to_string(), "45200".to_string()];
        assert_eq!(
            labels(&codes),
            vec![
                "22110: Manufacture of rubber tyres and tubes",
                "99999: SIC code 99999",
                "45200: Maintenance and repair of motor vehicles",
            ]
        );
    }

    #[test]
    fn division_prefix_fallback() {
        assert_eq!(describe("45999"), "Wholesale and retail trade; repair of motor vehicles");
        assert_eq!(describe("77400"), "Rental and leasing activities");
    }

    #[test]
    fn short_and_odd_codes_never_panic() {
        assert_eq!(describe(""), "SIC code ");
        assert_eq!(describe("4"), "SIC code 4");
        assert_eq!(describe("£5"), "SIC code £5");
    }

    #[test]
    fn every_five_digit_code_gets_one_of_three_forms() {
        for n in (0..100_000).step_by(997) {
            let code = format!("{:05}", n);
            let description = describe(&code);
            assert!(!description.is_empty());
            let exact = lookup(SIC_CODES, &code);
            let division = lookup(SIC_DIVISIONS, &code[..2]);
            match (exact, division) {
                (Some(d), _) => assert_eq!(description, d),
                (None, Some(d)) => assert_eq!(description, d),
                (None, None) => assert_eq!(description, format!("SIC code {}", code)),
            }
        }
    }

    #[test]
    fn tables_have_well_formed_keys() {
        assert!(SIC_CODES.iter().all(|(code, _)| code.len() == 5));
        assert!(SIC_DIVISIONS.iter().all(|(code, _)| code.len() == 2));
    }
}
