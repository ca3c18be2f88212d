// ============================================================================
// Comparison Ranker
// ============================================================================
// Trie les offres par prix croissant et calcule l'écart en pourcentage
// de chaque offre par rapport à la moins chère
//
// CONCEPTS RUST :
// 1. sort_by : tri stable (les prix égaux gardent l'ordre du backend)
// 2. Enum "tagué" PriceDelta : pas de NaN ni d'infini quand le prix
//    le plus bas vaut 0, on renvoie NotComparable
// 3. Type garantissant un invariant : RankedComparison n'est jamais vide
// ============================================================================

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{ComparisonResult, Offer};

/// Erreurs possibles lors du classement
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankError {
    #[error("no offers to compare")]
    NoOffers,

    #[error("negative price {price} at {market}")]
    NegativePrice { market: String, price: Decimal },
}

/// Écart d'une offre par rapport à la moins chère
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceDelta {
    /// L'offre la moins chère (affichée 0 %)
    Cheapest,
    /// Pourcentage au-dessus du prix le plus bas (toujours >= 0)
    Above(Decimal),
    /// Prix le plus bas nul : pourcentage indéfini
    NotComparable,
}

impl PriceDelta {
    /// Pourcentage affichable, None si non comparable
    pub fn percent(&self) -> Option<Decimal> {
        match self {
            PriceDelta::Cheapest => Some(Decimal::ZERO),
            PriceDelta::Above(p) => Some(*p),
            PriceDelta::NotComparable => None,
        }
    }

    /// Texte court pour l'UI ("cheapest", "+12.50%", "n/a")
    pub fn label(&self) -> String {
        match self {
            PriceDelta::Cheapest => "cheapest".to_string(),
            PriceDelta::Above(p) => format!("+{}%", p.round_dp(2)),
            PriceDelta::NotComparable => "n/a".to_string(),
        }
    }
}

/// Une offre classée avec son écart
#[derive(Debug, Clone, PartialEq)]
pub struct RankedOffer {
    pub offer: Offer,
    pub delta: PriceDelta,
}

/// Comparaison classée : offres triées, la moins chère en premier
///
/// Construite uniquement par `rank_offers`, donc jamais vide.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedComparison {
    pub product_name: String,
    pub barcode: String,
    pub country_name: Option<String>,
    pub country_flag_emoji: &'static str,
    pub image_url: Option<String>,
    offers: Vec<RankedOffer>,
}

impl RankedComparison {
    /// Classe les offres d'un résultat de comparaison
    pub fn from_result(result: ComparisonResult) -> Result<Self, RankError> {
        let offers = rank_offers(result.offers)?;
        Ok(Self {
            product_name: result.product_name,
            barcode: result.barcode,
            country_name: result.country_name,
            country_flag_emoji: result.country_flag_emoji,
            image_url: result.image_url,
            offers,
        })
    }

    pub fn offers(&self) -> &[RankedOffer] {
        &self.offers
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    /// Toujours false (invariant du constructeur)
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    /// Offre la moins chère
    pub fn cheapest(&self) -> &Offer {
        &self.offers[0].offer
    }

    /// Offre la plus chère (la dernière après tri)
    pub fn most_expensive(&self) -> &Offer {
        &self.offers[self.offers.len() - 1].offer
    }

    /// Économie possible en achetant au moins cher
    ///
    /// None s'il n'y a qu'une seule offre (rien à comparer).
    pub fn potential_savings(&self) -> Option<Decimal> {
        if self.offers.len() < 2 {
            return None;
        }
        Some(self.most_expensive().price - self.cheapest().price)
    }
}

/// Trie les offres par prix croissant et calcule les écarts
///
/// # Erreurs
/// * `RankError::NoOffers` - liste vide
/// * `RankError::NegativePrice` - un prix est négatif
pub fn rank_offers(mut offers: Vec<Offer>) -> Result<Vec<RankedOffer>, RankError> {
    if offers.is_empty() {
        return Err(RankError::NoOffers);
    }

    if let Some(bad) = offers.iter().find(|o| o.price < Decimal::ZERO) {
        return Err(RankError::NegativePrice {
            market: bad.market_name.clone(),
            price: bad.price,
        });
    }

    // Tri stable : Decimal est Ord, pas besoin de partial_cmp
    offers.sort_by(|a, b| a.price.cmp(&b.price));

    let cheapest = offers[0].price;

    let ranked = offers
        .into_iter()
        .enumerate()
        .map(|(i, offer)| {
            let delta = if i == 0 {
                PriceDelta::Cheapest
            } else {
                percent_above(offer.price, cheapest)
            };
            RankedOffer { offer, delta }
        })
        .collect();

    Ok(ranked)
}

/// (price - cheapest) / cheapest * 100, garde contre la division par zéro
fn percent_above(price: Decimal, cheapest: Decimal) -> PriceDelta {
    if cheapest.is_zero() {
        return PriceDelta::NotComparable;
    }
    match (price - cheapest).checked_div(cheapest) {
        Some(ratio) => PriceDelta::Above(ratio * Decimal::ONE_HUNDRED),
        None => PriceDelta::NotComparable,
    }
}
