// ============================================================================
// API Client : backend de comparaison de prix
// ============================================================================
// Toutes les opérations REST du backend (comptes, comparaison, économies,
// santé, commentaires IA). Chaque méthode est async et retourne un
// anyhow::Result avec contexte ; les statuts non-succès deviennent un
// ApiError classé.
//
// CONCEPTS RUST :
// 1. Un seul reqwest::Client réutilisé (pool de connexions)
// 2. Génériques DeserializeOwned / Serialize pour factoriser GET/POST
// 3. Structures "wire" privées : on ne garde que ce dont le client a besoin
// 4. #[instrument] : chaque appel a son span avec les paramètres utiles
// ============================================================================

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Response;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::api::error::ApiError;
use crate::config::Config;
use crate::models::{
    AiCommentary, ComparisonResult, HealthOption, HealthSelection, Offer, ProductDetail,
    ProductSummary, Registration, UserProfile,
};

// ============================================================================
// Structures "wire"
// ============================================================================

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    #[serde(rename = "parola")]
    password: &'a str,
}

/// Réponse de `/api/urunler/karsilastir` (le code-barres n'y figure pas)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComparisonResponse {
    #[serde(default)]
    product_name: String,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    country_name: Option<String>,
    #[serde(default)]
    offers: Vec<Offer>,
}

#[derive(Debug, Deserialize)]
struct MonthlySavingsResponse {
    #[serde(rename = "aylikTasarruf", default)]
    monthly: Option<Decimal>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddSavingsRequest {
    user_id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
}

#[derive(Debug, Deserialize)]
struct IdRef {
    id: i64,
}

/// Sélection santé telle que renvoyée par `/api/saglik/getir` (objets complets)
#[derive(Debug, Default, Deserialize)]
struct SelectionResponse {
    #[serde(rename = "hastaliklar", default)]
    conditions: Vec<IdRef>,
    #[serde(rename = "alerjenler", default)]
    allergens: Vec<IdRef>,
}

impl From<SelectionResponse> for HealthSelection {
    fn from(raw: SelectionResponse) -> Self {
        HealthSelection {
            conditions: raw.conditions.into_iter().map(|r| r.id).collect(),
            allergens: raw.allergens.into_iter().map(|r| r.id).collect(),
        }
    }
}

// ============================================================================
// Client
// ============================================================================

/// Client HTTP du backend
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Construit le client à partir de la configuration (URL + timeout)
    pub fn new(config: &Config) -> Result<Self> {
        debug!(base_url = %config.api_base_url, timeout_secs = config.timeout_secs, "Creating HTTP client");
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("lazycart/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Échec de la création du client HTTP")?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ------------------------------------------------------------------------
    // Comptes
    // ------------------------------------------------------------------------

    /// Connexion : retourne le profil complet
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile> {
        let body = LoginRequest { email, password };
        let response = self
            .http
            .post(self.url("/api/kullanici/giris"))
            .json(&body)
            .send()
            .await
            .context("Échec de la requête de connexion")?;

        let profile: UserProfile = parse_json(check(response, "login").await?, "login").await?;
        info!(user_id = profile.id, "Login succeeded");
        Ok(profile)
    }

    /// Inscription (le formulaire doit avoir été validé avant)
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: &Registration) -> Result<()> {
        let response = self
            .http
            .post(self.url("/api/kullanici/kayit"))
            .json(registration)
            .send()
            .await
            .context("Échec de la requête d'inscription")?;

        check(response, "register").await?;
        info!("Registration accepted");
        Ok(())
    }

    /// Enregistrement serveur de l'utilisateur
    #[instrument(skip(self))]
    pub async fn fetch_user(&self, user_id: i64) -> Result<UserProfile> {
        self.get_json(&format!("/api/kullanici/{user_id}"), &[], "user")
            .await
    }

    /// Total économisé ce mois-ci (None si le backend n'a rien)
    #[instrument(skip(self))]
    pub async fn monthly_savings(&self, user_id: i64) -> Result<Option<Decimal>> {
        let raw: MonthlySavingsResponse = self
            .get_json(&format!("/api/kullanici/{user_id}/aylik-tasarruf"), &[], "monthly savings")
            .await?;
        Ok(raw.monthly)
    }

    /// Économies par jour ("YYYY-MM-DD" → montant)
    #[instrument(skip(self))]
    pub async fn chart_data(&self, user_id: i64) -> Result<BTreeMap<String, Decimal>> {
        let data: BTreeMap<String, Decimal> = self
            .get_json(&format!("/api/kullanici/{user_id}/grafik-verisi"), &[], "chart data")
            .await?;
        debug!(days = data.len(), "Chart data received");
        Ok(data)
    }

    /// Envoie une économie au registre du backend
    #[instrument(skip(self, amount), fields(amount = %amount))]
    pub async fn add_savings(&self, user_id: i64, amount: Decimal) -> Result<()> {
        let body = AddSavingsRequest { user_id, amount };
        let response = self
            .http
            .post(self.url("/api/kullanici/tasarruf-ekle"))
            .json(&body)
            .send()
            .await
            .context("Échec de l'envoi de l'économie")?;

        check(response, "add savings").await?;
        info!("Savings recorded by backend");
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Produits
    // ------------------------------------------------------------------------

    /// Compare les prix d'un produit entre supermarchés
    #[instrument(skip(self))]
    pub async fn compare(&self, barcode: &str) -> Result<ComparisonResult> {
        let raw: ComparisonResponse = self
            .get_json(
                "/api/urunler/karsilastir",
                &[("barkod", barcode.to_string())],
                "comparison",
            )
            .await?;

        info!(product = %raw.product_name, offers = raw.offers.len(), "Comparison received");
        Ok(ComparisonResult::new(
            barcode.to_string(),
            raw.product_name,
            raw.image_url,
            raw.country_name,
            raw.offers,
        ))
    }

    /// Recherche de produits (autocomplétion)
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<ProductSummary>> {
        let results: Vec<ProductSummary> = self
            .get_json("/api/urunler/search", &[("query", query.to_string())], "search")
            .await?;
        debug!(results = results.len(), "Search results received");
        Ok(results)
    }

    /// Fiche nutritionnelle d'un produit
    #[instrument(skip(self))]
    pub async fn product_detail(&self, product_id: &str) -> Result<ProductDetail> {
        self.get_json(&format!("/api/urunler/detay/{product_id}"), &[], "product detail")
            .await
    }

    // ------------------------------------------------------------------------
    // Santé et IA
    // ------------------------------------------------------------------------

    #[instrument(skip(self))]
    pub async fn health_conditions(&self) -> Result<Vec<HealthOption>> {
        self.get_json("/api/saglik/hastaliklar", &[], "health conditions")
            .await
    }

    #[instrument(skip(self))]
    pub async fn allergens(&self) -> Result<Vec<HealthOption>> {
        self.get_json("/api/saglik/alerjenler", &[], "allergens").await
    }

    /// Sélection santé enregistrée pour l'utilisateur
    #[instrument(skip(self))]
    pub async fn health_selection(&self, user_id: i64) -> Result<HealthSelection> {
        let raw: SelectionResponse = self
            .get_json(
                "/api/saglik/getir",
                &[("kullaniciId", user_id.to_string())],
                "health selection",
            )
            .await?;
        Ok(raw.into())
    }

    #[instrument(skip(self, selection))]
    pub async fn save_health_selection(&self, user_id: i64, selection: &HealthSelection) -> Result<()> {
        let response = self
            .http
            .post(self.url("/api/saglik/kaydet"))
            .query(&[("kullaniciId", user_id)])
            .json(selection)
            .send()
            .await
            .context("Échec de l'enregistrement du profil santé")?;

        check(response, "save health selection").await?;
        info!(
            conditions = selection.conditions.len(),
            allergens = selection.allergens.len(),
            "Health selection saved"
        );
        Ok(())
    }

    /// Commentaires IA d'un produit selon le profil santé
    #[instrument(skip(self, selection))]
    pub async fn ai_commentary(&self, product_id: &str, selection: &HealthSelection) -> Result<AiCommentary> {
        let response = self
            .http
            .post(self.url("/api/ai/yorum"))
            .query(&[("urunId", product_id)])
            .json(selection)
            .send()
            .await
            .context("Échec de la requête de commentaire IA")?;

        let commentary: AiCommentary =
            parse_json(check(response, "AI commentary").await?, "AI commentary").await?;
        debug!(comments = commentary.comments.len(), "AI commentary received");
        Ok(commentary)
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        what: &str,
    ) -> Result<T> {
        let url = self.url(path);
        debug!(url = %url, "Sending GET request");

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Échec de la requête HTTP ({what})"))?;

        parse_json(check(response, what).await?, what).await
    }
}

/// Vérifie le statut HTTP, convertit les échecs en ApiError
async fn check(response: Response, what: &str) -> Result<Response> {
    let status = response.status();
    debug!(status = %status, what, "Received HTTP response");

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    error!(status = %status, what, body = %body, "Backend returned error status");
    Err(ApiError::from_status(status, what, body).into())
}

async fn parse_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    response
        .json()
        .await
        .with_context(|| format!("Échec du parsing JSON ({what})"))
}
