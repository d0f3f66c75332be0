//! The static world catalog shown on the level-select map.

use stellar_types::{LevelId, LevelInfo};

/// Every world with its display data and unlock state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCatalog {
    levels: Vec<LevelInfo>,
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl LevelCatalog {
    /// The shipped catalog: two playable worlds, three locked.
    pub fn standard() -> Self {
        let levels = vec![
            level(
                LevelId::Decentralized,
                "MUNDO DECENTRALIZADO",
                "Explora las redes descentralizadas",
                "\u{1F310}",
                &["\u{1F468}\u{200D}\u{1F4BB}", "\u{1F517}", "\u{1F30D}"],
                true,
            ),
            level(
                LevelId::Wallet,
                "CIUDAD DE LA CARTERA",
                "Domina las carteras digitales",
                "\u{1F3E6}",
                &["\u{1F4B3}", "\u{1F3DB}\u{FE0F}", "\u{1F4B0}"],
                true,
            ),
            level(
                LevelId::Token,
                "CIUDAD DE TOKENS",
                "Comercia con tokens",
                "\u{1FA99}",
                &["\u{1F6D2}", "\u{1F48E}", "\u{26A1}"],
                false,
            ),
            level(
                LevelId::Soroban,
                "LABORATORIO SOROBAN",
                "Experimenta con smart contracts",
                "\u{1F9EA}",
                &["\u{2697}\u{FE0F}", "\u{1F52C}", "\u{1F916}"],
                false,
            ),
            level(
                LevelId::Treasure,
                "CAMINO DEL TESORO",
                "Encuentra el tesoro final",
                "\u{1F48E}",
                &["\u{1F5DD}\u{FE0F}", "\u{1F451}", "\u{2728}"],
                false,
            ),
        ];
        Self { levels }
    }

    /// All worlds in map order.
    pub fn levels(&self) -> &[LevelInfo] {
        &self.levels
    }

    /// Look up a world.
    pub fn get(&self, id: LevelId) -> Option<&LevelInfo> {
        self.levels.iter().find(|l| l.id == id)
    }

    /// Whether the world can be entered.
    pub fn is_playable(&self, id: LevelId) -> bool {
        self.get(id).is_some_and(|l| l.completed)
    }

    /// Number of completed worlds.
    pub fn completed_count(&self) -> u32 {
        let count = self.levels.iter().filter(|l| l.completed).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Number of worlds.
    pub fn total(&self) -> u32 {
        u32::try_from(self.levels.len()).unwrap_or(u32::MAX)
    }

    /// `completed / total * 100`; 0 for an empty catalog.
    pub fn completion_percent(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        f64::from(self.completed_count()) / f64::from(total) * 100.0
    }
}

fn level(
    id: LevelId,
    name: &str,
    description: &str,
    icon: &str,
    characters: &[&str],
    completed: bool,
) -> LevelInfo {
    LevelInfo {
        id,
        name: name.to_owned(),
        description: description.to_owned(),
        icon: icon.to_owned(),
        characters: characters.iter().map(|&c| c.to_owned()).collect(),
        completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lists_every_level_in_order() {
        let catalog = LevelCatalog::standard();
        let ids: Vec<LevelId> = catalog.levels().iter().map(|l| l.id).collect();
        assert_eq!(ids, LevelId::ALL.to_vec());
    }

    #[test]
    fn only_first_two_levels_are_playable() {
        let catalog = LevelCatalog::standard();
        assert!(catalog.is_playable(LevelId::Decentralized));
        assert!(catalog.is_playable(LevelId::Wallet));
        assert!(!catalog.is_playable(LevelId::Token));
        assert!(!catalog.is_playable(LevelId::Soroban));
        assert!(!catalog.is_playable(LevelId::Treasure));
    }

    #[test]
    fn completion_is_forty_percent() {
        let catalog = LevelCatalog::standard();
        assert_eq!(catalog.completed_count(), 2);
        assert_eq!(catalog.total(), 5);
        assert!((catalog.completion_percent() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn every_level_has_three_characters() {
        let catalog = LevelCatalog::standard();
        assert!(catalog.levels().iter().all(|l| l.characters.len() == 3));
    }
}
