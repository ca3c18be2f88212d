// ============================================================================
// Structures : Offer et ComparisonResult
// ============================================================================
// Résultat d'une comparaison de prix pour un code-barres scanné
//
// CONCEPTS RUST :
// 1. rust_decimal::Decimal : montants exacts (0.1 + 0.2 == 0.3)
// 2. #[serde(rename_all = "camelCase")] : mapping direct du JSON backend
// 3. Lookup table avec match : drapeau du pays d'origine
// ============================================================================

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Une offre : un supermarché et son prix pour le produit scanné
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    /// Nom du supermarché (ex: "Migros", "A101")
    pub market_name: String,

    /// Logo du supermarché (peut être absent dans la réponse)
    #[serde(default)]
    pub market_logo_url: Option<String>,

    /// Prix en devise locale
    pub price: Decimal,
}

impl Offer {
    /// Crée une offre sans logo
    pub fn new(market_name: impl Into<String>, price: Decimal) -> Self {
        Self {
            market_name: market_name.into(),
            market_logo_url: None,
            price,
        }
    }
}

/// Résultat complet d'une comparaison (produit + offres)
///
/// Produit à chaque scan, jamais persisté.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    pub product_name: String,
    pub image_url: Option<String>,
    pub barcode: String,
    pub country_name: Option<String>,
    pub country_flag_emoji: &'static str,

    /// Offres telles que reçues (le tri est fait par le ranker)
    pub offers: Vec<Offer>,
}

impl ComparisonResult {
    pub fn new(
        barcode: String,
        product_name: String,
        image_url: Option<String>,
        country_name: Option<String>,
        offers: Vec<Offer>,
    ) -> Self {
        let country_flag_emoji = country_name
            .as_deref()
            .map(flag_for_country)
            .unwrap_or(UNKNOWN_FLAG);

        Self {
            product_name,
            image_url,
            barcode,
            country_name,
            country_flag_emoji,
            offers,
        }
    }

    /// Vrai si le backend n'a renvoyé aucune offre exploitable
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}

/// Drapeau utilisé quand le pays est inconnu
pub const UNKNOWN_FLAG: &str = "🌍";

/// Retourne le drapeau emoji d'un pays (noms tels que renvoyés par le backend)
///
/// La comparaison se fait en majuscules, comme les noms du catalogue.
/// `to_uppercase()` transforme "i" en "I" (pas en "İ"), d'où les doubles entrées.
pub fn flag_for_country(country: &str) -> &'static str {
    match country.trim().to_uppercase().as_str() {
        "TÜRKİYE" | "TURKIYE" | "TÜRKIYE" => "🇹🇷",
        "ALMANYA" => "🇩🇪",
        "POLONYA" => "🇵🇱",
        "FRANSA" => "🇫🇷",
        "İTALYA" | "ITALYA" => "🇮🇹",
        "İSPANYA" | "ISPANYA" => "🇪🇸",
        "ABD" => "🇺🇸",
        _ => UNKNOWN_FLAG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offer_deserialize_from_backend_json() {
        let json = r#"{"marketName":"Migros","marketLogoUrl":"https://x/logo.png","price":12.5}"#;
        let offer: Offer = serde_json::from_str(json).unwrap();

        assert_eq!(offer.market_name, "Migros");
        assert_eq!(offer.price, Decimal::new(125, 1));
        assert!(offer.market_logo_url.is_some());
    }

    #[test]
    fn test_offer_without_logo() {
        let json = r#"{"marketName":"ŞOK","price":"9.90"}"#;
        let offer: Offer = serde_json::from_str(json).unwrap();

        assert_eq!(offer.market_logo_url, None);
        assert_eq!(offer.price, Decimal::new(990, 2));
    }

    #[test]
    fn test_flag_for_country() {
        assert_eq!(flag_for_country("Almanya"), "🇩🇪");
        assert_eq!(flag_for_country("TÜRKİYE"), "🇹🇷");
        assert_eq!(flag_for_country("abd"), "🇺🇸");
        assert_eq!(flag_for_country("Narnia"), UNKNOWN_FLAG);
    }

    #[test]
    fn test_comparison_result_flag() {
        let result = ComparisonResult::new(
            "8690000000001".to_string(),
            "Süt".to_string(),
            None,
            Some("Fransa".to_string()),
            vec![Offer::new("A101", Decimal::new(1000, 2))],
        );
        assert_eq!(result.country_flag_emoji, "🇫🇷");
        assert!(!result.is_empty());

        let unknown = ComparisonResult::new("1".into(), "x".into(), None, None, vec![]);
        assert_eq!(unknown.country_flag_emoji, UNKNOWN_FLAG);
        assert!(unknown.is_empty());
    }
}
