//! Refrigerant identities.

use rfluids::substance::{PredefinedMix, Pure};

/// Whether a refrigerant is a single substance or a predefined blend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefrigerantKind {
    Pure,
    /// Zeotropic or near-azeotropic blend; bubble and dew temperatures differ.
    Blend,
}

/// Refrigerants known to refcycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Refrigerant {
    /// Difluoromethane
    R32,
    /// Pentafluoroethane
    R125,
    /// 1,1,1,2-Tetrafluoroethane
    R134a,
    /// 1,1-Difluoroethane
    R152a,
    /// 1,1,1,3,3-Pentafluoropropane
    R245fa,
    /// 2,3,3,3-Tetrafluoropropene
    R1234yf,
    /// Propane
    R290,
    /// Isobutane
    R600a,
    /// Ammonia
    R717,
    /// Carbon dioxide
    R744,
    /// R125/R143a/R134a (44/52/4)
    R404A,
    /// R32/R125/R134a (23/25/52)
    R407C,
    /// R32/R125 (50/50)
    R410A,
    /// R125/R143a (50/50)
    R507A,
}

/// Backend substance behind a refrigerant.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Substance {
    Pure(Pure),
    Blend(PredefinedMix),
}

impl Refrigerant {
    pub const ALL: [Refrigerant; 14] = [
        Refrigerant::R32,
        Refrigerant::R125,
        Refrigerant::R134a,
        Refrigerant::R152a,
        Refrigerant::R245fa,
        Refrigerant::R1234yf,
        Refrigerant::R290,
        Refrigerant::R600a,
        Refrigerant::R717,
        Refrigerant::R744,
        Refrigerant::R404A,
        Refrigerant::R407C,
        Refrigerant::R410A,
        Refrigerant::R507A,
    ];

    /// Canonical ASHRAE designation.
    pub fn key(&self) -> &'static str {
        match self {
            Refrigerant::R32 => "R32",
            Refrigerant::R125 => "R125",
            Refrigerant::R134a => "R134a",
            Refrigerant::R152a => "R152a",
            Refrigerant::R245fa => "R245fa",
            Refrigerant::R1234yf => "R1234yf",
            Refrigerant::R290 => "R290",
            Refrigerant::R600a => "R600a",
            Refrigerant::R717 => "R717",
            Refrigerant::R744 => "R744",
            Refrigerant::R404A => "R404A",
            Refrigerant::R407C => "R407C",
            Refrigerant::R410A => "R410A",
            Refrigerant::R507A => "R507A",
        }
    }

    /// Get human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Refrigerant::R290 => "Propane (R290)",
            Refrigerant::R600a => "Isobutane (R600a)",
            Refrigerant::R717 => "Ammonia (R717)",
            Refrigerant::R744 => "Carbon Dioxide (R744)",
            other => other.key(),
        }
    }

    pub fn kind(&self) -> RefrigerantKind {
        match self.substance() {
            Substance::Pure(_) => RefrigerantKind::Pure,
            Substance::Blend(_) => RefrigerantKind::Blend,
        }
    }

    /// Map to the rfluids substance (internal use for the CoolProp backend).
    pub(crate) fn substance(&self) -> Substance {
        match self {
            Refrigerant::R32 => Substance::Pure(Pure::R32),
            Refrigerant::R125 => Substance::Pure(Pure::R125),
            Refrigerant::R134a => Substance::Pure(Pure::R134a),
            Refrigerant::R152a => Substance::Pure(Pure::R152a),
            Refrigerant::R245fa => Substance::Pure(Pure::R245fa),
            Refrigerant::R1234yf => Substance::Pure(Pure::R1234yf),
            Refrigerant::R290 => Substance::Pure(Pure::nPropane),
            Refrigerant::R600a => Substance::Pure(Pure::Isobutane),
            Refrigerant::R717 => Substance::Pure(Pure::Ammonia),
            Refrigerant::R744 => Substance::Pure(Pure::CarbonDioxide),
            Refrigerant::R404A => Substance::Blend(PredefinedMix::R404A),
            Refrigerant::R407C => Substance::Blend(PredefinedMix::R407C),
            Refrigerant::R410A => Substance::Blend(PredefinedMix::R410A),
            Refrigerant::R507A => Substance::Blend(PredefinedMix::R507A),
        }
    }
}

impl std::fmt::Display for Refrigerant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Refrigerant {
    type Err = &'static str;

    /// Accepts canonical keys and catalog aliases, ignoring case, spaces and
    /// dashes ("R-404A", "r404a", "propane").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::catalog::lookup_refrigerant(s)
            .map(|entry| entry.refrigerant)
            .ok_or("unknown refrigerant")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blends_are_predefined_mixes() {
        assert_eq!(Refrigerant::R134a.kind(), RefrigerantKind::Pure);
        assert_eq!(Refrigerant::R290.kind(), RefrigerantKind::Pure);
        assert_eq!(Refrigerant::R404A.kind(), RefrigerantKind::Blend);
    }

    #[test]
    fn parse_aliases() {
        assert_eq!("R-404A".parse::<Refrigerant>(), Ok(Refrigerant::R404A));
        assert_eq!("r134a".parse::<Refrigerant>(), Ok(Refrigerant::R134a));
        assert_eq!("propane".parse::<Refrigerant>(), Ok(Refrigerant::R290));
        assert_eq!("NH3".parse::<Refrigerant>(), Ok(Refrigerant::R717));
        assert_eq!("CO2".parse::<Refrigerant>(), Ok(Refrigerant::R744));
        assert!("R9999".parse::<Refrigerant>().is_err());
        assert!("".parse::<Refrigerant>().is_err());
    }

    #[test]
    fn blends_are_flagged() {
        assert_eq!(Refrigerant::R404A.kind(), RefrigerantKind::Blend);
        assert_eq!(Refrigerant::R410A.kind(), RefrigerantKind::Blend);
        assert_eq!(Refrigerant::R134a.kind(), RefrigerantKind::Pure);
    }

    #[test]
    fn canonical_key_roundtrip() {
        for refrigerant in Refrigerant::ALL {
            let parsed = refrigerant
                .key()
                .parse::<Refrigerant>()
                .expect("canonical key should parse");
            assert_eq!(parsed, refrigerant);
        }
    }

    #[test]
    fn display_uses_key() {
        assert_eq!(Refrigerant::R507A.to_string(), "R507A");
        assert_eq!(Refrigerant::R744.display_name(), "Carbon Dioxide (R744)");
    }
}
