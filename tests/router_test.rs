mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{offline_app, send};

#[tokio::test]
async fn unknown_or_missing_path_is_not_found() {
    let app = offline_app();

    let (status, body) = send(&app, Method::GET, "/?path=nada", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn repeated_query_keys_still_answer_with_json() {
    let app = offline_app();

    let (status, body) = send(&app, Method::GET, "/?path=nada&path=otra", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Ruta no encontrada");

    let (status, body) = send(&app, Method::DELETE, "/?path=usuario&id=1&id=2", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("'id'"));
}

#[tokio::test]
async fn preflight_is_answered_with_ok() {
    let app = offline_app();
    let (status, _) = send(&app, Method::OPTIONS, "/?path=usuario", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unsupported_method_is_rejected() {
    let app = offline_app();
    let (status, body) = send(&app, Method::TRACE, "/index.php?path=oferta_laboral", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(body["error"].as_str().unwrap().contains("TRACE"));
}

#[tokio::test]
async fn writes_without_id_are_bad_requests() {
    let app = offline_app();
    for path in [
        "usuario",
        "oferta_laboral",
        "postulacion",
        "antecedente_laboral",
        "antecedente_academico",
    ] {
        for method in [Method::PUT, Method::PATCH, Method::DELETE] {
            let uri = format!("/?path={}", path);
            let (status, _) = send(&app, method.clone(), &uri, Some(json!({ "x": 1 }))).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", method, path);
        }
    }
}

#[tokio::test]
async fn empty_patch_is_rejected_for_every_resource() {
    let app = offline_app();
    for path in [
        "usuario",
        "oferta_laboral",
        "postulacion",
        "antecedente_laboral",
        "antecedente_academico",
    ] {
        let uri = format!("/?path={}&id=1", path);
        let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", path);
        assert_eq!(body["error"], "No se proporcionaron datos para actualizar");

        let (status, _) = send(&app, Method::PATCH, &uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", path);
    }
}

#[tokio::test]
async fn non_numeric_id_and_malformed_json_are_bad_requests() {
    let app = offline_app();

    let (status, _) = send(&app, Method::GET, "/?path=usuario&id=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/?path=usuario")
        .body(axum::body::Body::from("{\"nombre\": "))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn user_with_unknown_role_is_rejected() {
    let app = offline_app();
    let body = json!({
        "nombre": "Pedro",
        "apellido": "Rojas",
        "email": "pedro@example.com",
        "contraseña": "clave",
        "fecha_nacimiento": "1990-01-01",
        "telefono": "+56900000000",
        "direccion": "Calle 1",
        "rol": "Administrador"
    });
    let (status, _) = send(&app, Method::POST, "/?path=usuario", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn application_status_outside_enumeration_is_rejected() {
    let app = offline_app();
    let body = json!({ "estado_postulacion": "Contratado", "comentario": "ok" });

    let (status, _) = send(&app, Method::PUT, "/?path=postulacion&id=3", Some(body.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::PATCH, "/?path=postulacion&id=3", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn status_change_requires_comment() {
    let app = offline_app();
    let body = json!({ "estado_postulacion": "Revisando" });
    let (status, body) = send(&app, Method::PATCH, "/?path=postulacion&id=3", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("comentario"));
}

#[tokio::test]
async fn fields_outside_the_allow_list_are_rejected() {
    let app = offline_app();
    let cases = [
        ("usuario", json!({ "id": 9 })),
        ("oferta_laboral", json!({ "reclutador_id": 2 })),
        ("postulacion", json!({ "candidato_id": 2 })),
        ("antecedente_academico", json!({ "candidato_id": 2 })),
        ("antecedente_laboral", json!({ "sueldo": 100 })),
    ];
    for (path, body) in cases {
        let uri = format!("/?path={}&id=1", path);
        let (status, _) = send(&app, Method::PATCH, &uri, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", path);
    }
}

#[tokio::test]
async fn invalid_offer_actions_and_salaries_are_rejected() {
    let app = offline_app();

    let body = json!({ "accion": "archivar" });
    let (status, _) = send(&app, Method::PUT, "/?path=oferta_laboral&id=1", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let body = json!({ "salario": -10 });
    let (status, _) = send(&app, Method::PATCH, "/?path=oferta_laboral&id=1", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn background_ranges_are_checked_before_any_lookup() {
    let app = offline_app();

    let academic = json!({
        "candidato_id": 1,
        "institucion": "Universidad de Concepción",
        "titulo_obtenido": "Psicología",
        "anio_ingreso": 2018,
        "anio_egreso": 2015
    });
    let (status, _) =
        send(&app, Method::POST, "/?path=antecedente_academico", Some(academic)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let employment = json!({
        "candidato_id": 1,
        "empresa": "Falabella",
        "cargo": "Analista",
        "funciones": "Reportes",
        "fecha_inicio": "2022-03-01",
        "fecha_termino": "2021-03-01"
    });
    let (status, _) =
        send(&app, Method::POST, "/?path=antecedente_laboral", Some(employment)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
