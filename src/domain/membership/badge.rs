//! Gamification badges by total attended outings.

use serde::{Deserialize, Serialize};

use crate::config::BadgeThresholds;

/// Member badge tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    Bronce,
    Plata,
    Oro,
}

impl Badge {
    /// The badge earned by `total_salidas` outings.
    pub fn for_total(thresholds: &BadgeThresholds, total_salidas: u32) -> Self {
        if total_salidas >= thresholds.oro_minimo_salidas {
            Badge::Oro
        } else if total_salidas >= thresholds.plata_minimo_salidas {
            Badge::Plata
        } else {
            Badge::Bronce
        }
    }

    pub fn nombre(&self) -> &'static str {
        match self {
            Badge::Bronce => "Bronce",
            Badge::Plata => "Plata",
            Badge::Oro => "Oro",
        }
    }

    /// Display color, as shipped in the product palette.
    pub fn color(&self) -> &'static str {
        match self {
            Badge::Bronce => "#CD7F32",
            Badge::Plata => "#C0C0C0",
            Badge::Oro => "#FFD700",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> BadgeThresholds {
        BadgeThresholds::default()
    }

    #[test]
    fn zero_salidas_is_bronce() {
        assert_eq!(Badge::for_total(&thresholds(), 0), Badge::Bronce);
    }

    #[test]
    fn ten_salidas_reaches_plata() {
        assert_eq!(Badge::for_total(&thresholds(), 9), Badge::Bronce);
        assert_eq!(Badge::for_total(&thresholds(), 10), Badge::Plata);
    }

    #[test]
    fn twenty_five_salidas_reaches_oro() {
        assert_eq!(Badge::for_total(&thresholds(), 24), Badge::Plata);
        assert_eq!(Badge::for_total(&thresholds(), 25), Badge::Oro);
        assert_eq!(Badge::for_total(&thresholds(), 100), Badge::Oro);
    }

    #[test]
    fn badges_carry_their_palette_colors() {
        assert_eq!(Badge::Bronce.color(), "#CD7F32");
        assert_eq!(Badge::Plata.color(), "#C0C0C0");
        assert_eq!(Badge::Oro.color(), "#FFD700");
    }
}
