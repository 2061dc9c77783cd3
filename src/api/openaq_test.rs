#[cfg(test)]
mod tests {
    use crate::api::{AirQualityProvider, ApiMode, LocationQuery, OpenAqClient};
    use crate::error::{AppError, Result};
    use mockito::{Matcher, Server};
    use serde_json::json;
    use std::time::Duration;

    fn client(api_key: Option<&str>, server: &Server) -> OpenAqClient {
        OpenAqClient::new(api_key.map(str::to_string), Duration::from_secs(2))
            .unwrap()
            .with_base_url(&server.url())
    }

    fn delhi_latest_body() -> String {
        json!({
            "meta": { "name": "openaq-api", "found": 1 },
            "results": [{
                "location": "Anand Vihar",
                "city": "Delhi",
                "country": "IN",
                "coordinates": { "latitude": 28.65, "longitude": 77.31 },
                "measurements": [
                    { "parameter": "pm25", "value": 40.0, "unit": "µg/m³", "lastUpdated": "2024-05-01T10:00:00Z" },
                    { "parameter": "no2", "value": 35.0, "unit": "ppb", "lastUpdated": "2024-05-01T10:00:00Z" }
                ]
            }]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_latest_by_name_success() -> Result<()> {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/latest")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("city".into(), "Delhi".into()),
                Matcher::UrlEncoded("limit".into(), "1".into()),
                Matcher::UrlEncoded("sort".into(), "desc".into()),
            ]))
            .match_header("X-API-Key", "test_key")
            .match_header("accept", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(delhi_latest_body())
            .create_async()
            .await;

        let readings = client(Some("test_key"), &server)
            .fetch_latest(&LocationQuery::ByName("Delhi".to_string()))
            .await?;

        mock.assert_async().await;
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].city.as_deref(), Some("Delhi"));
        assert_eq!(readings[0].measurements.len(), 2);
        assert_eq!(readings[0].measurements[1].unit, "ppb");
        Ok(())
    }

    #[tokio::test]
    async fn test_latest_by_coordinates_sends_radius() -> Result<()> {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/latest")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("coordinates".into(), "28.6139,77.209".into()),
                Matcher::UrlEncoded("radius".into(), "50000".into()),
                Matcher::UrlEncoded("limit".into(), "1".into()),
            ]))
            .with_status(200)
            .with_body(json!({ "results": [] }).to_string())
            .create_async()
            .await;

        let readings = client(Some("test_key"), &server)
            .fetch_latest(&LocationQuery::ByCoordinates {
                latitude: 28.6139,
                longitude: 77.209,
                radius_m: 50_000,
            })
            .await?;

        mock.assert_async().await;
        assert!(readings.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_no_key_sends_no_key_header() -> Result<()> {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/latest")
            .match_query(Matcher::Any)
            .match_header("X-API-Key", Matcher::Missing)
            .with_status(200)
            .with_body(json!({ "data": [] }).to_string())
            .create_async()
            .await;

        let client = client(None, &server);
        assert!(!client.is_configured());
        client
            .fetch_latest(&LocationQuery::ByName("Delhi".to_string()))
            .await?;
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_unauthorized_is_api_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/latest")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(json!({ "detail": "Unauthorized" }).to_string())
            .create_async()
            .await;

        let result = client(Some("bad_key"), &server)
            .fetch_latest(&LocationQuery::ByName("Delhi".to_string()))
            .await;

        match result {
            Err(AppError::Api(e)) => assert_eq!(e.status(), Some(reqwest::StatusCode::UNAUTHORIZED)),
            other => panic!("Expected AppError::Api, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/latest")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let result = client(Some("test_key"), &server)
            .fetch_latest(&LocationQuery::ByName("Delhi".to_string()))
            .await;
        assert!(matches!(result, Err(AppError::JsonParse(_))));
    }

    #[tokio::test]
    async fn test_empty_body_is_provider_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/latest")
            .match_query(Matcher::Any)
            .with_status(200)
            .create_async()
            .await;

        let result = client(Some("test_key"), &server)
            .fetch_latest(&LocationQuery::ByName("Delhi".to_string()))
            .await;
        assert!(matches!(result, Err(AppError::Provider(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_api_error() {
        // Nothing listens on port 9 (discard) in the test environment.
        let client = OpenAqClient::new(Some("k".to_string()), Duration::from_millis(500))
            .unwrap()
            .with_base_url("http://127.0.0.1:9");
        let result = client
            .fetch_latest(&LocationQuery::ByName("Delhi".to_string()))
            .await;
        assert!(matches!(result, Err(AppError::Api(_))));
    }

    #[tokio::test]
    async fn test_locations_mode_two_step() -> Result<()> {
        let mut server = Server::new_async().await;
        let locations = server
            .mock("GET", "/locations")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("coordinates".into(), "52.52,13.405".into()),
                // Clamped to the endpoint's maximum.
                Matcher::UrlEncoded("radius".into(), "25000".into()),
                Matcher::UrlEncoded("limit".into(), "1".into()),
            ]))
            .match_header("X-API-Key", "test_key")
            .with_status(200)
            .with_body(
                json!({
                    "results": [{
                        "id": 2162,
                        "name": "Berlin Mitte",
                        "locality": "Berlin",
                        "country": { "id": 50, "code": "DE", "name": "Germany" },
                        "coordinates": { "latitude": 52.52, "longitude": 13.40 },
                        "sensors": [
                            { "id": 10, "name": "pm10 µg/m³", "parameter": { "id": 1, "name": "pm10", "units": "µg/m³", "displayName": "PM10" } },
                            { "id": 11, "name": "o3 ppm", "parameter": { "id": 10, "name": "o3", "units": "ppm", "displayName": "O₃" } }
                        ]
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;
        let latest = server
            .mock("GET", "/locations/2162/latest")
            .with_status(200)
            .with_body(
                json!({
                    "results": [
                        { "datetime": { "utc": "2024-05-01T10:00:00Z", "local": "2024-05-01T12:00:00+02:00" }, "value": 30.0, "coordinates": { "latitude": 52.52, "longitude": 13.40 }, "sensorsId": 10, "locationsId": 2162 },
                        { "datetime": { "utc": "2024-05-01T10:00:00Z", "local": "2024-05-01T12:00:00+02:00" }, "value": 0.03, "coordinates": { "latitude": 52.52, "longitude": 13.40 }, "sensorsId": 11, "locationsId": 2162 }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = client(Some("test_key"), &server).with_mode(ApiMode::Locations);
        let readings = client
            .fetch_latest(&LocationQuery::ByCoordinates {
                latitude: 52.52,
                longitude: 13.405,
                radius_m: 50_000,
            })
            .await?;

        locations.assert_async().await;
        latest.assert_async().await;
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].city.as_deref(), Some("Berlin"));
        assert_eq!(readings[0].country.as_deref(), Some("DE"));
        assert_eq!(readings[0].measurements.len(), 2);
        assert_eq!(readings[0].measurements[0].parameter.as_deref(), Some("pm10"));
        Ok(())
    }

    #[tokio::test]
    async fn test_locations_mode_skips_name_queries() -> Result<()> {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let readings = client(Some("test_key"), &server)
            .with_mode(ApiMode::Locations)
            .fetch_latest(&LocationQuery::ByName("Berlin".to_string()))
            .await?;

        assert!(readings.is_empty());
        mock.assert_async().await;
        Ok(())
    }

    #[test]
    fn test_api_mode_parsing() {
        assert_eq!("latest".parse::<ApiMode>().unwrap(), ApiMode::Latest);
        assert_eq!(" LOCATIONS ".parse::<ApiMode>().unwrap(), ApiMode::Locations);
        assert!(matches!("v2".parse::<ApiMode>(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_blank_key_is_not_configured() {
        let client = OpenAqClient::new(Some("  ".to_string()), Duration::from_secs(1)).unwrap();
        assert!(!client.is_configured());
        assert_eq!(client.mode(), ApiMode::Latest);
    }
}
