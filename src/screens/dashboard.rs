// src/screens/dashboard.rs
use crate::navigation::Screen;
use crate::tumor::TumorReference;

/// One card in the "Learn" list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TumorCard {
    pub name: &'static str,
    pub short_description: &'static str,
    pub image_asset: &'static str,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DashboardScreen;

impl DashboardScreen {
    pub fn cards(&self) -> Vec<TumorCard> {
        TumorReference::all()
            .iter()
            .map(|entry| TumorCard {
                name: entry.name,
                short_description: entry.short_description,
                image_asset: entry.image_asset,
            })
            .collect()
    }

    pub fn open_tumor(&self, card: &TumorCard) -> Screen {
        Screen::TumorDetail {
            tumor_name: card.name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_follow_reference_order() {
        let names: Vec<&str> = DashboardScreen.cards().iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Glioma", "Meningioma", "Pituitary"]);
    }

    #[test]
    fn opening_a_card_carries_its_name() {
        let dashboard = DashboardScreen;
        let cards = dashboard.cards();
        assert_eq!(
            dashboard.open_tumor(&cards[2]),
            Screen::TumorDetail {
                tumor_name: "Pituitary".to_string()
            }
        );
    }
}
