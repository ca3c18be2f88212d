// ============================================================================
// Structures : ProductSummary et ProductDetail
// ============================================================================
// Résultats de recherche et fiche nutritionnelle d'un produit
// ============================================================================

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::offer::{flag_for_country, UNKNOWN_FLAG};

/// Résultat de recherche (autocomplétion)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    #[serde(alias = "urunId", deserialize_with = "id_from_text_or_number")]
    pub id: String,

    #[serde(alias = "urunName")]
    pub name: String,

    #[serde(default, alias = "barkod")]
    pub barcode: Option<String>,
}

/// Le catalogue renvoie l'identifiant en texte ou en nombre selon l'endpoint
fn id_from_text_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

/// Fiche produit avec valeurs nutritionnelles pour 100 g
///
/// Les champs suivent le JSON de `/api/urunler/detay/<id>`.
/// Toutes les valeurs nutritionnelles sont optionnelles : le catalogue
/// est souvent incomplet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetail {
    #[serde(rename = "urunName")]
    pub name: String,

    #[serde(rename = "urunGorsel", default)]
    pub image_url: Option<String>,

    #[serde(rename = "kategoriAdi", default)]
    pub category: Option<String>,

    #[serde(rename = "ulkeAdi", default)]
    pub country: Option<String>,

    #[serde(rename = "enerjiKcal", default)]
    pub energy_kcal: Option<f64>,

    #[serde(rename = "yag", default)]
    pub fat: Option<f64>,

    #[serde(rename = "doymusYag", default)]
    pub saturated_fat: Option<f64>,

    #[serde(rename = "karbonhidrat", default)]
    pub carbohydrate: Option<f64>,

    #[serde(rename = "seker", default)]
    pub sugar: Option<f64>,

    #[serde(default)]
    pub protein: Option<f64>,

    #[serde(rename = "tuz", default)]
    pub salt: Option<f64>,

    #[serde(rename = "urunIcerik", default)]
    pub ingredients: Option<String>,
}

impl ProductDetail {
    /// Drapeau du pays d'origine
    pub fn country_flag(&self) -> &'static str {
        self.country
            .as_deref()
            .map(flag_for_country)
            .unwrap_or(UNKNOWN_FLAG)
    }

    /// Lignes (libellé, valeur formatée) du tableau nutritionnel
    ///
    /// Les valeurs absentes sont affichées "-".
    pub fn nutrition_rows(&self) -> Vec<(&'static str, String)> {
        let grams = |v: Option<f64>| v.map(|g| format!("{g} g")).unwrap_or_else(|| "-".to_string());

        vec![
            (
                "Energy",
                self.energy_kcal
                    .map(|k| format!("{k} kcal"))
                    .unwrap_or_else(|| "-".to_string()),
            ),
            ("Fat", grams(self.fat)),
            ("Saturated fat", grams(self.saturated_fat)),
            ("Carbohydrate", grams(self.carbohydrate)),
            ("Sugar", grams(self.sugar)),
            ("Protein", grams(self.protein)),
            ("Salt", grams(self.salt)),
        ]
    }
}
