use serde::{Deserialize, Serialize};

/// A suggested material category.
///
/// The catalog is a suggestion list for intake forms; `Material::category`
/// stays freeform text and is not validated against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// The default catalog, seeded into the ledger at construction.
pub fn default_catalog() -> Vec<Category> {
    [
        ("1", "Material de Informatica"),
        ("2", "Material de Impressora"),
        ("3", "Material Periférico"),
        ("4", "Material de Redes"),
        ("5", "Outros"),
    ]
    .into_iter()
    .map(|(id, name)| Category {
        id: id.to_string(),
        name: name.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_five_stable_entries() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog[0].id, "1");
        assert_eq!(catalog[2].name, "Material Periférico");
        assert_eq!(catalog[4].name, "Outros");
    }
}
