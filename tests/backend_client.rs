// ============================================================================
// Tests d'intégration : BackendClient contre un serveur wiremock local
// ============================================================================
// Aucun trafic réseau réel : chaque test démarre son propre MockServer et
// vérifie le chemin, les paramètres, le corps envoyé et le parsing.
// ============================================================================

use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lazycart::api::{ApiError, BackendClient};
use lazycart::config::Config;
use lazycart::models::HealthSelection;

fn test_client(server: &MockServer) -> BackendClient {
    let config = Config::with_api_url(server.uri(), std::env::temp_dir());
    BackendClient::new(&config).expect("failed to build test client")
}

// ---------------------------------------------------------------------------
// Comptes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_posts_credentials_and_parses_profile() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/kullanici/giris"))
        .and(body_json(json!({"email": "ayse@example.com", "parola": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kullanici_id": 42,
            "isim": "Ayşe",
            "soyisim": "Yılmaz",
            "email": "ayse@example.com",
            "toplamTasarruf": 125.5,
            "aylikTasarruf": 12.25
        })))
        .expect(1)
        .mount(&server)
        .await;

    let profile = test_client(&server)
        .login("ayse@example.com", "secret")
        .await
        .expect("login should succeed");

    assert_eq!(profile.id, 42);
    assert_eq!(profile.display_name(), "Ayşe Yılmaz");
    assert_eq!(profile.total_savings, Decimal::new(1255, 1));
    assert_eq!(profile.monthly_savings, Decimal::new(1225, 2));
}

#[tokio::test]
async fn login_with_bad_password_is_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/kullanici/giris"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Hatalı şifre"))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .login("ayse@example.com", "wrong")
        .await
        .expect_err("login should fail");

    assert_eq!(
        err.downcast_ref::<ApiError>(),
        Some(&ApiError::Unauthorized { status: 401 })
    );
}

#[tokio::test]
async fn monthly_savings_accepts_missing_total() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/kullanici/42/aylik-tasarruf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"aylikTasarruf": null})))
        .mount(&server)
        .await;

    let monthly = test_client(&server).monthly_savings(42).await.unwrap();
    assert_eq!(monthly, None);
}

#[tokio::test]
async fn chart_data_maps_days_to_amounts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/kullanici/42/grafik-verisi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "2026-10-12": 3.5,
            "2026-10-14": 10
        })))
        .mount(&server)
        .await;

    let data = test_client(&server).chart_data(42).await.unwrap();

    assert_eq!(data.len(), 2);
    assert_eq!(data["2026-10-12"], Decimal::new(35, 1));
    assert_eq!(data["2026-10-14"], Decimal::new(10, 0));
}

#[tokio::test]
async fn add_savings_sends_numeric_amount() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/kullanici/tasarruf-ekle"))
        .and(body_json(json!({"userId": 42, "amount": 4.5})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server)
        .add_savings(42, Decimal::new(450, 2))
        .await
        .expect("add savings should succeed");
}

#[tokio::test]
async fn add_savings_server_error_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/kullanici/tasarruf-ekle"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .add_savings(42, Decimal::ONE)
        .await
        .expect_err("add savings should fail");

    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::Server { status: 503, .. })
    ));
}

// ---------------------------------------------------------------------------
// Comparaison et produits
// ---------------------------------------------------------------------------

#[tokio::test]
async fn compare_passes_barcode_and_keeps_it_in_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/urunler/karsilastir"))
        .and(query_param("barkod", "8690504012345"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "productName": "Süt 1L",
            "countryName": "Türkiye",
            "offers": [
                {"marketName": "Migros", "price": 32.5},
                {"marketName": "A101", "marketLogoUrl": "https://cdn/a101.png", "price": 29.9}
            ]
        })))
        .mount(&server)
        .await;

    let result = test_client(&server).compare("8690504012345").await.unwrap();

    assert_eq!(result.barcode, "8690504012345");
    assert_eq!(result.product_name, "Süt 1L");
    assert_eq!(result.offers.len(), 2);
    assert_eq!(result.offers[1].market_name, "A101");
    assert_eq!(result.offers[1].price, Decimal::new(299, 1));
}

#[tokio::test]
async fn compare_unknown_barcode_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/urunler/karsilastir"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = test_client(&server).compare("0000000000000").await.unwrap_err();

    assert_eq!(
        err.downcast_ref::<ApiError>(),
        Some(&ApiError::NotFound {
            what: "comparison".to_string()
        })
    );
}

#[tokio::test]
async fn compare_with_malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/urunler/karsilastir"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server).compare("8690504012345").await.unwrap_err();

    assert!(err.downcast_ref::<ApiError>().is_none());
    assert!(err.to_string().contains("comparison"));
}

#[tokio::test]
async fn search_accepts_numeric_product_ids() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/urunler/search"))
        .and(query_param("query", "süt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"urunId": 17, "urunName": "Süt 1L"}
        ])))
        .mount(&server)
        .await;

    let results = test_client(&server).search("süt").await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "17");
    assert_eq!(results[0].name, "Süt 1L");
}

// ---------------------------------------------------------------------------
// Santé et IA
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_selection_keeps_only_ids() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/saglik/getir"))
        .and(query_param("kullaniciId", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hastaliklar": [{"id": 3, "adi": "Diyabet"}],
            "alerjenler": [{"id": 5, "adi": "Gluten"}, {"id": 1, "adi": "Laktoz"}]
        })))
        .mount(&server)
        .await;

    let selection = test_client(&server).health_selection(42).await.unwrap();

    assert_eq!(selection.conditions.into_iter().collect::<Vec<_>>(), vec![3]);
    assert_eq!(selection.allergens.into_iter().collect::<Vec<_>>(), vec![1, 5]);
}

#[tokio::test]
async fn save_health_selection_posts_ids() {
    let server = MockServer::start().await;

    let mut selection = HealthSelection::default();
    selection.toggle_condition(3);
    selection.toggle_allergen(5);

    Mock::given(method("POST"))
        .and(path("/api/saglik/kaydet"))
        .and(query_param("kullaniciId", "42"))
        .and(body_json(json!({"hastaliklar": [3], "alerjenler": [5]})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server)
        .save_health_selection(42, &selection)
        .await
        .expect("save should succeed");
}

#[tokio::test]
async fn ai_commentary_is_parsed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/ai/yorum"))
        .and(query_param("urunId", "17"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "urun": "Süt 1L",
            "yorumlar": ["Laktoz içerir", "Protein kaynağı"]
        })))
        .mount(&server)
        .await;

    let commentary = test_client(&server)
        .ai_commentary("17", &HealthSelection::default())
        .await
        .unwrap();

    assert_eq!(commentary.product, "Süt 1L");
    assert_eq!(commentary.comments.len(), 2);
}
