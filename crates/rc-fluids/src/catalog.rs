use crate::{Refrigerant, RefrigerantKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefrigerantCatalogEntry {
    pub refrigerant: Refrigerant,
    pub canonical_id: &'static str,
    pub display_name: &'static str,
    pub aliases: &'static [&'static str],
}

/// Uppercase and drop spaces, dashes and underscores so "R-404A", "r404a"
/// and "R 404 A" compare equal.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_uppercase)
        .collect()
}

impl RefrigerantCatalogEntry {
    pub fn kind(&self) -> RefrigerantKind {
        self.refrigerant.kind()
    }

    /// Exact match on canonical id or alias (normalized).
    pub fn matches_id(&self, id: &str) -> bool {
        let id = normalize(id);
        if id.is_empty() {
            return false;
        }
        normalize(self.canonical_id) == id || self.aliases.iter().any(|alias| normalize(alias) == id)
    }

    /// Substring match used by interactive search.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }

        self.canonical_id.to_ascii_lowercase().contains(&query)
            || self.display_name.to_ascii_lowercase().contains(&query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_ascii_lowercase().contains(&query))
    }
}

const REFRIGERANT_CATALOG: [RefrigerantCatalogEntry; 14] = [
    RefrigerantCatalogEntry {
        refrigerant: Refrigerant::R32,
        canonical_id: "R32",
        display_name: "R32",
        aliases: &["difluoromethane", "HFC-32"],
    },
    RefrigerantCatalogEntry {
        refrigerant: Refrigerant::R125,
        canonical_id: "R125",
        display_name: "R125",
        aliases: &["pentafluoroethane", "HFC-125"],
    },
    RefrigerantCatalogEntry {
        refrigerant: Refrigerant::R134a,
        canonical_id: "R134a",
        display_name: "R134a",
        aliases: &["HFC-134a", "tetrafluoroethane"],
    },
    RefrigerantCatalogEntry {
        refrigerant: Refrigerant::R152a,
        canonical_id: "R152a",
        display_name: "R152a",
        aliases: &["HFC-152a", "difluoroethane"],
    },
    RefrigerantCatalogEntry {
        refrigerant: Refrigerant::R245fa,
        canonical_id: "R245fa",
        display_name: "R245fa",
        aliases: &["HFC-245fa"],
    },
    RefrigerantCatalogEntry {
        refrigerant: Refrigerant::R1234yf,
        canonical_id: "R1234yf",
        display_name: "R1234yf",
        aliases: &["HFO-1234yf"],
    },
    RefrigerantCatalogEntry {
        refrigerant: Refrigerant::R290,
        canonical_id: "R290",
        display_name: "Propane (R290)",
        aliases: &["propane", "n-propane", "c3h8"],
    },
    RefrigerantCatalogEntry {
        refrigerant: Refrigerant::R600a,
        canonical_id: "R600a",
        display_name: "Isobutane (R600a)",
        aliases: &["isobutane", "i-butane"],
    },
    RefrigerantCatalogEntry {
        refrigerant: Refrigerant::R717,
        canonical_id: "R717",
        display_name: "Ammonia (R717)",
        aliases: &["ammonia", "NH3"],
    },
    RefrigerantCatalogEntry {
        refrigerant: Refrigerant::R744,
        canonical_id: "R744",
        display_name: "Carbon Dioxide (R744)",
        aliases: &["carbon dioxide", "CO2"],
    },
    RefrigerantCatalogEntry {
        refrigerant: Refrigerant::R404A,
        canonical_id: "R404A",
        display_name: "R404A",
        aliases: &["R404A.mix"],
    },
    RefrigerantCatalogEntry {
        refrigerant: Refrigerant::R407C,
        canonical_id: "R407C",
        display_name: "R407C",
        aliases: &["R407C.mix"],
    },
    RefrigerantCatalogEntry {
        refrigerant: Refrigerant::R410A,
        canonical_id: "R410A",
        display_name: "R410A",
        aliases: &["R410A.mix"],
    },
    RefrigerantCatalogEntry {
        refrigerant: Refrigerant::R507A,
        canonical_id: "R507A",
        display_name: "R507A",
        aliases: &["R507A.mix", "R507"],
    },
];

pub fn refrigerant_catalog() -> &'static [RefrigerantCatalogEntry] {
    &REFRIGERANT_CATALOG
}

pub fn filter_refrigerant_catalog(query: &str) -> Vec<RefrigerantCatalogEntry> {
    refrigerant_catalog()
        .iter()
        .copied()
        .filter(|entry| entry.matches_query(query))
        .collect()
}

/// Resolve a user-supplied id (canonical or alias) to its catalog entry.
pub fn lookup_refrigerant(id: &str) -> Option<&'static RefrigerantCatalogEntry> {
    refrigerant_catalog().iter().find(|entry| entry.matches_id(id))
}
