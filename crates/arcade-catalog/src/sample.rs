//! Built-in sample catalog used when no catalog file is configured

use crate::{CatalogError, CatalogStore, GameEntity};

const UNSPLASH: &str = "https://images.unsplash.com";

/// The eight built-in games
pub fn games() -> Vec<GameEntity> {
    vec![
        GameEntity::new("1", "Arcade Racer", "Racing", 4.5)
            .with_image(format!("{UNSPLASH}/photo-1612404730960-5c71577fca11?q=80&w=600&auto=format"))
            .with_description("Fast-paced retro racing game with multiple tracks and vehicles.")
            .with_tags(["Arcade", "Retro", "Action"])
            .with_counters(1240, 28)
            .new_release(),
        GameEntity::new("2", "Puzzle Master", "Puzzle", 4.2)
            .with_image(format!("{UNSPLASH}/photo-1611996575749-79a3a250f948?q=80&w=600&auto=format"))
            .with_description(
                "Brain-teasing puzzles that will challenge your problem-solving skills.",
            )
            .with_tags(["Strategy", "Educational", "Casual"])
            .with_counters(890, 15)
            .hot(),
        GameEntity::new("3", "Space Shooter", "Action", 4.7)
            .with_image(format!("{UNSPLASH}/photo-1596727147705-61a532a659bd?q=80&w=600&auto=format"))
            .with_description("Defend the galaxy from alien invaders in this classic arcade shooter.")
            .with_tags(["Space", "Shooter", "Arcade"])
            .with_counters(1560, 42),
        GameEntity::new("4", "Stealth Ninja", "Stealth", 4.8)
            .with_image(format!("{UNSPLASH}/photo-1551103782-8ab07afd45c1?q=80&w=600&auto=format"))
            .with_description("Master the art of stealth and deception in this ninja adventure.")
            .with_tags(["Adventure", "Action", "Ninja"])
            .with_counters(1320, 36)
            .hot(),
        GameEntity::new("5", "Block Builder", "Sandbox", 4.3)
            .with_image(format!("{UNSPLASH}/photo-1493711662062-fa541adb3fc8?q=80&w=600&auto=format"))
            .with_description(
                "Creative sandbox where you can build anything your imagination desires.",
            )
            .with_tags(["Building", "Creative", "Multiplayer"])
            .with_counters(980, 24),
        GameEntity::new("6", "Dungeon Crawler", "RPG", 4.6)
            .with_image(format!("{UNSPLASH}/photo-1518791841217-8f162f1e1131?q=80&w=600&auto=format"))
            .with_description(
                "Explore dangerous dungeons and defeat monsters in this roguelike adventure.",
            )
            .with_tags(["Adventure", "Fantasy", "Strategy"])
            .with_counters(1150, 31)
            .new_release(),
        GameEntity::new("7", "Hidden School", "Stealth", 4.9)
            .with_image(format!("{UNSPLASH}/photo-1588666309990-d68f08e3d4a6?q=80&w=600&auto=format"))
            .with_description("Play this stealth game during class without getting caught!")
            .with_tags(["School", "Casual", "Stealth"])
            .with_counters(2100, 58)
            .hot(),
        GameEntity::new("8", "Office Escape", "Stealth", 4.4)
            .with_image(format!("{UNSPLASH}/photo-1497215842964-222b430dc094?q=80&w=600&auto=format"))
            .with_description("Hide your gaming from the boss in this office-themed stealth game.")
            .with_tags(["Office", "Casual", "Strategy"])
            .with_counters(1050, 27),
    ]
}

/// The built-in games as a catalog store
pub fn catalog() -> Result<CatalogStore, CatalogError> {
    CatalogStore::new(games())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_is_valid() {
        let store = catalog().unwrap();
        assert_eq!(store.len(), 8);
        assert_eq!(store.featured().len(), 3);
    }
}
