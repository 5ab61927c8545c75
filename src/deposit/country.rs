use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UnknownCode;

macro_rules! country_codes {
    ($($code:ident),+ $(,)?) => {
        /// ISO 3166-1 alpha-2 country code
        #[allow(missing_docs)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum CountryCode {
            $($code),+
        }

        impl CountryCode {
            /// Every assigned code, in alphabetical order
            pub const ALL: &'static [CountryCode] = &[$(CountryCode::$code),+];

            /// Two-letter upper-case code
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(CountryCode::$code => stringify!($code)),+
                }
            }
        }
    };
}

country_codes! {
    AD, AE, AF, AG, AI, AL, AM, AO, AQ, AR, AS, AT, AU, AW, AX, AZ,
    BA, BB, BD, BE, BF, BG, BH, BI, BJ, BL, BM, BN, BO, BQ, BR, BS, BT, BV, BW, BY, BZ,
    CA, CC, CD, CF, CG, CH, CI, CK, CL, CM, CN, CO, CR, CU, CV, CW, CX, CY, CZ,
    DE, DJ, DK, DM, DO, DZ,
    EC, EE, EG, EH, ER, ES, ET,
    FI, FJ, FK, FM, FO, FR,
    GA, GB, GD, GE, GF, GG, GH, GI, GL, GM, GN, GP, GQ, GR, GS, GT, GU, GW, GY,
    HK, HM, HN, HR, HT, HU,
    ID, IE, IL, IM, IN, IO, IQ, IR, IS, IT,
    JE, JM, JO, JP,
    KE, KG, KH, KI, KM, KN, KP, KR, KW, KY, KZ,
    LA, LB, LC, LI, LK, LR, LS, LT, LU, LV, LY,
    MA, MC, MD, ME, MF, MG, MH, MK, ML, MM, MN, MO, MP, MQ, MR, MS, MT, MU, MV, MW, MX, MY, MZ,
    NA, NC, NE, NF, NG, NI, NL, NO, NP, NR, NU, NZ,
    OM,
    PA, PE, PF, PG, PH, PK, PL, PM, PN, PR, PS, PT, PW, PY,
    QA,
    RE, RO, RS, RU, RW,
    SA, SB, SC, SD, SE, SG, SH, SI, SJ, SK, SL, SM, SN, SO, SR, SS, ST, SV, SX, SY, SZ,
    TC, TD, TF, TG, TH, TJ, TK, TL, TM, TN, TO, TR, TT, TV, TW, TZ,
    UA, UG, UM, US, UY, UZ,
    VA, VC, VE, VG, VI, VN, VU,
    WF, WS,
    YE, YT,
    ZA, ZM, ZW,
}

impl FromStr for CountryCode {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // ALL is sorted, so a binary search over the codes is enough
        Self::ALL
            .binary_search_by(|c| c.as_str().cmp(s))
            .map(|i| Self::ALL[i])
            .map_err(|_| UnknownCode::new("country", s))
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_list_is_sorted_and_complete() {
        assert_eq!(CountryCode::ALL.len(), 249);
        assert!(CountryCode::ALL
            .windows(2)
            .all(|w| w[0].as_str() < w[1].as_str()));
    }

    #[test]
    fn test_lookup() {
        assert_eq!("US".parse::<CountryCode>().unwrap(), CountryCode::US);
        assert_eq!("DE".parse::<CountryCode>().unwrap(), CountryCode::DE);
        assert_eq!("ZW".parse::<CountryCode>().unwrap(), CountryCode::ZW);
        assert_eq!(CountryCode::IN.to_string(), "IN");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!("us".parse::<CountryCode>().is_err());
        assert!("XX".parse::<CountryCode>().is_err());
        assert!("".parse::<CountryCode>().is_err());
    }
}
