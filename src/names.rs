//! Scientific name corrections applied before text and media lookups.
//!
//! The listing still uses some superseded scientific names. The encyclopedia
//! and media providers index the current ones, so lookups go through a
//! read-only [`NameCorrections`] table injected into the enricher.

use std::collections::HashMap;

/// Superseded names used by the listing, paired with the name providers expect.
const BUILTIN_CORRECTIONS: &[(&str, &str)] = &[
    ("Phalacrocorax brasilianus", "Nannopterum brasilianum"),
    ("Phalacrocorax atriceps", "Leucocarbo atriceps"),
    ("Phalacrocorax bougainvillii", "Leucocarbo bougainvillorum"),
    ("Phalacrocorax gaimardi", "Poikilocarbo gaimardi"),
    ("Phalacrocorax magellanicus", "Leucocarbo magellanicus"),
    ("Oceanodroma hornbyi", "Hydrobates hornbyi"),
    ("Oceanodroma markhami", "Hydrobates markhami"),
    ("Larus maculipennis", "Chroicocephalus maculipennis"),
    ("Larus serranus", "Chroicocephalus serranus"),
    ("Larus pipixcan", "Leucophaeus pipixcan"),
    ("Larus modestus", "Leucophaeus modestus"),
    ("Larus scoresbii", "Leucophaeus scoresbii"),
    ("Sterna elegans", "Thalasseus elegans"),
    ("Sterna lorata", "Sternula lorata"),
    ("Pterocnemia pennata", "Rhea pennata"),
    ("Buteo polyosoma", "Geranoaetus polyosoma"),
    ("Anas specularioides", "Lophonetta specularioides"),
    ("Anas sibilatrix", "Mareca sibilatrix"),
    ("Anas cyanoptera", "Spatula cyanoptera"),
    ("Anas platalea", "Spatula platalea"),
    ("Carduelis barbata", "Spinus barbatus"),
    ("Carduelis uropygialis", "Spinus uropygialis"),
    ("Thraupis bonariensis", "Pipraeidea bonariensis"),
];

/// Read-only mapping from superseded to current scientific names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameCorrections {
    table: HashMap<String, String>,
}

impl NameCorrections {
    /// Creates an empty table (every name passes through unchanged).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates the table shipped with the tool.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN_CORRECTIONS
            .iter()
            .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
            .collect()
    }

    /// Parses a JSON object of `"superseded": "current"` pairs.
    ///
    /// # Errors
    ///
    /// Returns the decode error when `json` is not a string-to-string object.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let table: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(Self { table })
    }

    /// Adds every entry of `other`, overriding existing ones.
    #[must_use]
    pub fn merged_with(mut self, other: Self) -> Self {
        self.table.extend(other.table);
        self
    }

    /// Returns the corrected name, or `name` itself when it is not mapped.
    #[must_use]
    pub fn correct<'a>(&'a self, name: &'a str) -> &'a str {
        self.table.get(name).map_or(name, String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl FromIterator<(String, String)> for NameCorrections {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            table: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_maps_superseded_name() {
        let names = NameCorrections::builtin();
        assert_eq!(
            names.correct("Phalacrocorax brasilianus"),
            "Nannopterum brasilianum"
        );
    }

    #[test]
    fn test_correct_passes_unmapped_name_through() {
        let names = NameCorrections::builtin();
        assert_eq!(names.correct("Buteo albigula"), "Buteo albigula");
        assert_eq!(NameCorrections::empty().correct("Rhea pennata"), "Rhea pennata");
    }

    #[test]
    fn test_builtin_table_is_not_empty() {
        let names = NameCorrections::builtin();
        assert!(!names.is_empty());
        assert_eq!(names.len(), BUILTIN_CORRECTIONS.len());
    }

    #[test]
    fn test_from_json_str_and_merge_overrides() {
        let extra =
            NameCorrections::from_json_str(r#"{"Buteo polyosoma": "Geranoaetus polyosomus", "A b": "C d"}"#)
                .unwrap();
        let names = NameCorrections::builtin().merged_with(extra);
        assert_eq!(names.correct("Buteo polyosoma"), "Geranoaetus polyosomus");
        assert_eq!(names.correct("A b"), "C d");
    }

    #[test]
    fn test_from_json_str_rejects_non_object() {
        assert!(NameCorrections::from_json_str("[1, 2]").is_err());
    }
}
