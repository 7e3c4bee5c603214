//! Controller family classification from the `*IDN?` string.

/// GCS dialect a controller speaks, decided once from its identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum ControllerFamily {
    /// C-663, C-863 and C-867 servo motor controllers
    #[strum(serialize = "motor")]
    GenericMotor,
    /// E-753, E-709, E-725, E-727 and other digital piezo controllers
    #[strum(serialize = "piezo")]
    Piezo,
    /// E-517/E-545 piezo controllers with switchable online channels
    #[strum(serialize = "E-517")]
    E517,
    /// E-755 piezo-walk controller, motor-like but reports through the busy byte
    #[strum(serialize = "E-755")]
    E755,
    /// C-702 with legacy mnemonics and a slow reference acknowledgement
    #[strum(serialize = "C-702")]
    C702,
    /// Hexapod speaking GCS 1
    #[strum(serialize = "hexapod (GCS 1)")]
    Hexapod1,
    /// Hexapod speaking GCS 2
    #[strum(serialize = "hexapod (GCS 2)")]
    Hexapod2,
}

/// Outcome of matching an identification string against the known tokens.
///
/// Hexapods need a `CSV?` round trip before the family is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamilyMatch {
    Known(ControllerFamily),
    Hexapod,
}

/// Ordered token table. More specific tokens come first so that, for
/// example, an E-755 never falls through to the generic piezo branch.
const FAMILY_TOKENS: &[(&[&str], FamilyMatch)] = &[
    (
        &["C-663", "C-863", "C-867"],
        FamilyMatch::Known(ControllerFamily::GenericMotor),
    ),
    (&["E-517"], FamilyMatch::Known(ControllerFamily::E517)),
    (&["E-755"], FamilyMatch::Known(ControllerFamily::E755)),
    (&["C-702"], FamilyMatch::Known(ControllerFamily::C702)),
    (
        &["E-753", "E-709", "E-725", "E-727"],
        FamilyMatch::Known(ControllerFamily::Piezo),
    ),
    (
        &["HEXAPOD", "F-HEX", "F-206", "M-8", "C-887"],
        FamilyMatch::Hexapod,
    ),
];

/// GCS version from which hexapods speak the GCS 2 dialect.
pub const GCS2_VERSION: f64 = 2.0;

impl ControllerFamily {
    /// Match an identification string. Matching is case-insensitive.
    pub fn classify(idn: &str) -> Option<FamilyMatch> {
        let idn = idn.to_uppercase();
        FAMILY_TOKENS
            .iter()
            .find(|(tokens, _)| tokens.iter().any(|t| idn.contains(t)))
            .map(|(_, family)| *family)
    }

    /// Hexapod family for a `CSV?` protocol version.
    pub fn hexapod_for_version(version: f64) -> Self {
        if version >= GCS2_VERSION {
            ControllerFamily::Hexapod2
        } else {
            ControllerFamily::Hexapod1
        }
    }

    pub fn is_hexapod(self) -> bool {
        matches!(self, ControllerFamily::Hexapod1 | ControllerFamily::Hexapod2)
    }

    /// Families whose referencing and acceleration go through motor parameters.
    pub fn is_motor_like(self) -> bool {
        matches!(
            self,
            ControllerFamily::GenericMotor | ControllerFamily::E755 | ControllerFamily::C702
        )
    }

    pub fn is_gcs2(self) -> bool {
        !matches!(self, ControllerFamily::C702 | ControllerFamily::Hexapod1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn known(idn: &str) -> Option<ControllerFamily> {
        match ControllerFamily::classify(idn)? {
            FamilyMatch::Known(family) => Some(family),
            FamilyMatch::Hexapod => None,
        }
    }

    #[test]
    fn test_documented_identities() {
        let cases = [
            ("PI C-663.12", ControllerFamily::GenericMotor),
            ("(c)2015 Physik Instrumente(PI) Karlsruhe, C-863.11,0,1.2.3.4", ControllerFamily::GenericMotor),
            ("PI C-867.260", ControllerFamily::GenericMotor),
            ("PI E-517.i3", ControllerFamily::E517),
            ("PI E-755.1CD", ControllerFamily::E755),
            ("PI C-702.00", ControllerFamily::C702),
            ("PI E-753.1CD", ControllerFamily::Piezo),
            ("PI E-709.CHG", ControllerFamily::Piezo),
            ("PI E-725.3CD", ControllerFamily::Piezo),
            ("Physik Instrumente (PI) GmbH & Co. KG, E-727, 0113000123", ControllerFamily::Piezo),
        ];
        for (idn, family) in cases {
            assert_eq!(known(idn), Some(family), "{idn}");
        }
    }

    #[test]
    fn test_matching_ignores_case() {
        assert_eq!(known("pi c-863.11"), Some(ControllerFamily::GenericMotor));
        assert_eq!(
            ControllerFamily::classify("physik instrumente f-206.s"),
            Some(FamilyMatch::Hexapod)
        );
    }

    #[test]
    fn test_specific_token_wins_over_generic() {
        // an identity carrying both tokens resolves to the specific family
        assert_eq!(known("E-755 COMPATIBLE WITH E-727"), Some(ControllerFamily::E755));
        assert_eq!(known("E-727 COMPATIBLE WITH E-755"), Some(ControllerFamily::E755));
        assert_eq!(known("E-517 / E-709 BUNDLE"), Some(ControllerFamily::E517));
        assert_eq!(known("C-863 HEXAPOD DRIVER"), Some(ControllerFamily::GenericMotor));
    }

    #[test]
    fn test_hexapod_tokens() {
        for idn in ["PI HEXAPOD", "F-HEX 01", "F-206.S", "M-840.5DG", "C-887.11"] {
            assert_eq!(
                ControllerFamily::classify(idn),
                Some(FamilyMatch::Hexapod),
                "{idn}"
            );
        }
    }

    #[test]
    fn test_hexapod_version_split() {
        assert_eq!(ControllerFamily::hexapod_for_version(1.0), ControllerFamily::Hexapod1);
        assert_eq!(ControllerFamily::hexapod_for_version(1.99), ControllerFamily::Hexapod1);
        assert_eq!(ControllerFamily::hexapod_for_version(2.0), ControllerFamily::Hexapod2);
        assert_eq!(ControllerFamily::hexapod_for_version(2.1), ControllerFamily::Hexapod2);
    }

    #[test]
    fn test_unknown_identity() {
        assert_eq!(ControllerFamily::classify("KEITHLEY 2400"), None);
        assert_eq!(ControllerFamily::classify(""), None);
    }

    #[test]
    fn test_gcs2_capability() {
        let gcs1: Vec<_> = ControllerFamily::iter().filter(|f| !f.is_gcs2()).collect();
        assert_eq!(gcs1, vec![ControllerFamily::C702, ControllerFamily::Hexapod1]);
    }
}
