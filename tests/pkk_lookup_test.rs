use anyhow::Result;
use cadastre_lookup::utils::error::ErrorBody;
use cadastre_lookup::{
    GatewayRequest, LambdaConfig, PlotLookupHandler, PlotResult, ReqwestUpstreamClient,
    SourceKind,
};
use httpmock::prelude::*;
use std::collections::HashMap;

/// Builds the handler the same way the function binary does, from environment-style variables.
fn handler_for(server: &MockServer) -> Result<PlotLookupHandler<ReqwestUpstreamClient>> {
    let mut vars = HashMap::new();
    vars.insert("PLOT_SOURCE".to_string(), "pkk".to_string());
    vars.insert("PKK_FEATURE_URL".to_string(), server.url("/api/features/1"));

    let config = LambdaConfig::from_lookup(|key| vars.get(key).cloned())?;
    assert_eq!(config.settings.source, SourceKind::Pkk);

    Ok(PlotLookupHandler::new(
        config.settings.build_source(),
        ReqwestUpstreamClient::new(),
    ))
}

#[tokio::test]
async fn test_pkk_lookup_end_to_end() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/features/1/50:23:0030214:117")
            .header("User-Agent", "Mozilla/5.0")
            .header("Referer", "https://pkk.rosreestr.ru/");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "feature": {
                    "attrs": {
                        "address": "None",
                        "util_by_doc": "для индивидуального жилищного строительства",
                        "area_value": "7500,25",
                        "category_type": "Земли населённых пунктов"
                    },
                    "extent": {
                        "xmin": 38.1234567,
                        "ymin": 55.1234567,
                        "xmax": 38.1244567,
                        "ymax": 55.1244567
                    }
                }
            }));
    });

    let response = handler_for(&server)?
        .handle(&GatewayRequest::get("50:23:0030214:117"))
        .await;

    api_mock.assert();
    assert_eq!(response.status_code, 200);

    let result: PlotResult = serde_json::from_str(&response.body)?;
    assert_eq!(
        result.address,
        "Местоположение установлено относительно ориентира: для индивидуального жилищного строительства"
    );
    assert_eq!(result.area, 7500.25);
    assert_eq!(result.category, "Земли населённых пунктов");
    assert_eq!(result.points_count, 41);
    assert_eq!(result.cost_per_point, 4000);
    assert_eq!(result.total_cost, 164000);
    assert_eq!(
        result.coordinates,
        vec![
            [55.123457, 38.123457],
            [55.123457, 38.124457],
            [55.124457, 38.124457],
            [55.124457, 38.123457]
        ]
    );
    assert_eq!(result.source, "PKK");
    Ok(())
}

#[tokio::test]
async fn test_pkk_unit_bounding_box() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/features/1/1:2:3:4");
        then.status(200).json_body(serde_json::json!({
            "feature": {
                "attrs": {"address": "Тестовый адрес"},
                "extent": {"xmin": 1, "ymin": 2, "xmax": 3, "ymax": 4}
            }
        }));
    });

    let response = handler_for(&server)?
        .handle(&GatewayRequest::get("1:2:3:4"))
        .await;

    let body: serde_json::Value = serde_json::from_str(&response.body)?;
    assert_eq!(
        body["coordinates"],
        serde_json::json!([[2.0, 1.0], [2.0, 3.0], [4.0, 3.0], [4.0, 1.0]])
    );
    assert_eq!(body["area"], 0.0);
    assert_eq!(body["pointsCount"], 4);
    assert_eq!(body["costPerPoint"], 4500);
    Ok(())
}

#[tokio::test]
async fn test_pkk_error_flag_is_404() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/features/1/99:99:9999999:9");
        then.status(200).json_body(serde_json::json!({
            "error": {"code": 404, "message": "Object not found"}
        }));
    });

    let response = handler_for(&server)?
        .handle(&GatewayRequest::get("99:99:9999999:9"))
        .await;

    assert_eq!(response.status_code, 404);
    let body: ErrorBody = serde_json::from_str(&response.body)?;
    assert_eq!(body.error, "Участок не найден в ПКК Росреестра");
    Ok(())
}

#[tokio::test]
async fn test_pkk_document_without_feature_is_200() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/features/1/50:23:0030214:118");
        then.status(200).json_body(serde_json::json!({}));
    });

    let response = handler_for(&server)?
        .handle(&GatewayRequest::get("50:23:0030214:118"))
        .await;

    assert_eq!(response.status_code, 200);
    let result: PlotResult = serde_json::from_str(&response.body)?;
    assert_eq!(
        result.address,
        "Местоположение установлено относительно ориентира: не указано"
    );
    assert_eq!(result.area, 0.0);
    assert_eq!(result.category, "Не указана");
    assert!(result.coordinates.is_empty());
    assert_eq!(result.source, "PKK");
    Ok(())
}

#[tokio::test]
async fn test_pkk_invalid_json_is_500() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/features/1/1:2:3:4");
        then.status(200).body("not json at all");
    });

    let response = handler_for(&server)?
        .handle(&GatewayRequest::get("1:2:3:4"))
        .await;

    assert_eq!(response.status_code, 500);
    let body: ErrorBody = serde_json::from_str(&response.body)?;
    assert_eq!(body.error, "Внутренняя ошибка сервера");
    assert!(!body.message.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_pkk_unreachable_is_503() -> Result<()> {
    let mut vars = HashMap::new();
    vars.insert("PLOT_SOURCE".to_string(), "pkk".to_string());
    vars.insert(
        "PKK_FEATURE_URL".to_string(),
        "http://127.0.0.1:9/api/features/1".to_string(),
    );
    let config = LambdaConfig::from_lookup(|key| vars.get(key).cloned())?;
    let handler = PlotLookupHandler::new(
        config.settings.build_source(),
        ReqwestUpstreamClient::new(),
    );

    let response = handler.handle(&GatewayRequest::get("1:2:3:4")).await;

    assert_eq!(response.status_code, 503);
    let body: ErrorBody = serde_json::from_str(&response.body)?;
    assert_eq!(body.message, "Не удалось подключиться к API ПКК Росреестра");
    Ok(())
}
